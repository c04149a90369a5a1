#![cfg(test)]

use super::*;
use crate::result::{Maybe, Outcome};

fn sample() -> Environment {
    Environment::from_pairs([("HOME", "/home/user"), ("LANG", "C.UTF-8"), ("EMPTY", "")]).unwrap()
}

#[test]
fn test_get() {
    let env = sample();
    assert_eq!(env.len(), 3);
    assert_eq!(*env.get("LANG").unwrap(), "C.UTF-8");
    assert_eq!(*env.get("EMPTY").unwrap(), "");
    assert_eq!(env.get("MISSING"), Outcome::Failure(EnvError::VariableDoesNotExist));
    assert_eq!(env.get("home"), Outcome::Failure(EnvError::VariableDoesNotExist));
    assert!(env.contains("HOME"));
    assert!(!env.contains(""));
}

#[test]
fn test_set_overwrites_in_place() {
    let mut env = sample();
    assert!(env.set("HOME", "/root").is_ok());
    assert!(env.set("PATH", "/bin").is_ok());

    let keys: Vec<_> = env.iter().map(|var| var.key().to_string()).collect();
    assert_eq!(keys, ["HOME", "LANG", "EMPTY", "PATH"]);
    assert_eq!(*env.get("HOME").unwrap(), "/root");
}

#[test]
fn test_invalid_entries() {
    let mut env = Environment::new();
    assert_eq!(env.set("", "value"), Outcome::Failure(EnvError::InvalidKey));
    assert_eq!(env.set("A=B", "value"), Outcome::Failure(EnvError::InvalidKey));
    assert_eq!(env.set("A\0", "value"), Outcome::Failure(EnvError::InvalidKey));
    assert_eq!(env.set("A", "val\0ue"), Outcome::Failure(EnvError::InvalidValue));
    assert!(env.is_empty());

    assert!(Environment::from_pairs([("OK", "1"), ("NOT=OK", "2")]).is_err());
}

#[test]
fn test_remove() {
    let mut env = sample();
    let removed = env.remove("LANG");
    assert!(removed.is_some_and(|value| value == "C.UTF-8"));
    assert_eq!(env.remove("LANG"), Maybe::Absent);
    assert_eq!(env.len(), 2);
    assert!(!env.contains("LANG"));
}

#[test]
fn test_display() {
    let env = Environment::from_pairs([("A", "1"), ("B", "two")]).unwrap();
    assert_eq!(env.to_string(), "A=1\nB=two\n");
}

#[test]
fn test_capture_matches_process() {
    let env = Environment::capture();
    for (key, value) in std::env::vars_os() {
        let (Some(key), Some(value)) = (key.to_str(), value.to_str()) else {
            continue;
        };
        if key.is_empty() || key.contains('=') {
            continue;
        }
        assert_eq!(*env.get(key).unwrap(), value, "{key} should have been captured.");
    }
    assert!(env.iter().all(|var| !var.key().is_empty()));
}

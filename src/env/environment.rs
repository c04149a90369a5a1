use std::env;
use std::fmt::{self, Display, Formatter};
use std::slice;

use super::EnvError;
use crate::collections::contiguous::Vector;
use crate::result::Maybe::{self, Absent, Present};
use crate::result::Outcome::{self, Failure, Success};
use crate::string::HeapString;

/// A single `KEY=VALUE` entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvVar {
    key: HeapString,
    value: HeapString,
}

impl EnvVar {
    pub const fn key(&self) -> &HeapString {
        &self.key
    }

    pub const fn value(&self) -> &HeapString {
        &self.value
    }
}

/// An ordered set of environment variables, with unique keys.
///
/// # Examples
/// ```
/// # use owned_std::env::{EnvError, Environment};
/// # use owned_std::result::Outcome;
/// let mut env = Environment::from_pairs([("HOME", "/home/user"), ("SHELL", "/bin/sh")]).unwrap();
/// assert_eq!(*env.get("HOME").unwrap(), "/home/user");
///
/// env.set("HOME", "/root").unwrap();
/// assert_eq!(*env.get("HOME").unwrap(), "/root");
/// assert_eq!(env.get("PATH"), Outcome::Failure(EnvError::VariableDoesNotExist));
/// ```
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Environment {
    vars: Vector<EnvVar>,
}

impl Environment {
    /// Creates an empty Environment.
    pub const fn new() -> Environment {
        Environment {
            vars: Vector::new(),
        }
    }

    /// Snapshots the environment of the current process. Entries that aren't valid UTF-8, or that
    /// couldn't be set through [`set`](Environment::set), are skipped.
    pub fn capture() -> Environment {
        let mut environment = Environment::new();
        let mut skipped = 0_usize;

        for (key, value) in env::vars_os() {
            let (Some(key), Some(value)) = (key.to_str(), value.to_str()) else {
                skipped += 1;
                continue;
            };
            if environment.set(key, value).is_err() {
                skipped += 1;
            }
        }

        log::debug!(
            "captured {} environment variables, skipped {skipped}",
            environment.len()
        );
        environment
    }

    /// Builds an Environment from `(key, value)` pairs. Later pairs replace earlier ones with the
    /// same key.
    ///
    /// # Errors
    /// Fails on the first pair that [`set`](Environment::set) rejects.
    pub fn from_pairs<I, K, V>(pairs: I) -> Outcome<Environment, EnvError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut environment = Environment::new();
        for (key, value) in pairs {
            environment.set(key.as_ref(), value.as_ref())?;
        }
        Success(environment)
    }

    /// Returns the value of the variable named `key`.
    ///
    /// # Errors
    /// Fails with [`EnvError::VariableDoesNotExist`] if there is no such variable.
    pub fn get(&self, key: &str) -> Outcome<&HeapString, EnvError> {
        match self.position(key) {
            Present(index) => Success(&self.vars[index].value),
            Absent => Failure(EnvError::VariableDoesNotExist),
        }
    }

    pub fn contains(&self, key: &str) -> bool {
        self.position(key).is_some()
    }

    /// Returns the number of variables.
    pub const fn len(&self) -> usize {
        self.vars.size()
    }

    pub const fn is_empty(&self) -> bool {
        self.vars.size() == 0
    }

    /// Iterates over the variables in the order they were first set.
    pub fn iter(&self) -> slice::Iter<'_, EnvVar> {
        self.vars.iter()
    }

    /// Sets the variable named `key` to `value`, replacing any previous value in place. This only
    /// changes this Environment.
    ///
    /// # Errors
    /// Fails with [`EnvError::InvalidKey`] if `key` is empty or contains `=` or NUL, or with
    /// [`EnvError::InvalidValue`] if `value` contains NUL.
    pub fn set(&mut self, key: &str, value: &str) -> Outcome<(), EnvError> {
        if key.is_empty() || key.contains(['=', '\0']) {
            return Failure(EnvError::InvalidKey);
        }
        if value.contains('\0') {
            return Failure(EnvError::InvalidValue);
        }

        match self.position(key) {
            Present(index) => self.vars.at(index).value.overwrite_init(value),
            Absent => self.vars.push_back(EnvVar {
                key: HeapString::from(key),
                value: HeapString::from(value),
            }),
        }
        Success(())
    }

    /// Removes the variable named `key`, returning its value.
    pub fn remove(&mut self, key: &str) -> Maybe<HeapString> {
        let index = self.position(key)?;
        Present(self.vars.remove(index).value)
    }

    fn position(&self, key: &str) -> Maybe<usize> {
        self.vars
            .iter()
            .position(|var| var.key == key)
            .into()
    }
}

impl<'a> IntoIterator for &'a Environment {
    type Item = &'a EnvVar;
    type IntoIter = slice::Iter<'a, EnvVar>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl Display for EnvVar {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.key, self.value)
    }
}

impl Display for Environment {
    /// Writes one `KEY=VALUE` line per variable.
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for var in self.iter() {
            writeln!(f, "{var}")?;
        }
        Ok(())
    }
}

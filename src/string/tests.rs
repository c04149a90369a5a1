#![cfg(test)]

use std::fmt::Write;

use proptest::prelude::*;

use super::*;
use crate::alloc::{Global, GrowError};
use crate::result::Maybe;
use crate::util::alloc::CountingAlloc;
use crate::util::panic::assert_panics;

type Str64 = HeapString<Global, 64>;
type Counted64 = HeapString<CountingAlloc, 64>;

fn filled(len: usize) -> std::string::String {
    (0..len).map(|i| char::from(b'a' + (i % 26) as u8)).collect()
}

#[test]
fn test_unallocated_string() {
    let string = Str64::new_in(Global);
    assert_eq!(string.len(), 0);
    assert_eq!(string.capacity(), 0);
    assert!(string.as_ptr().is_null());
    assert_eq!(string.as_bytes(), b"");
    assert_eq!(string.as_bytes_with_nul(), b"\0");
    assert_eq!(string.as_c_str(), c"");
    assert_eq!(string.as_str(), Maybe::Present(""));
}

#[test]
fn test_overwrite_init() {
    let alloc = CountingAlloc::new();
    let mut string = Counted64::new_in(alloc.clone());

    string.overwrite_init("hello");
    assert_eq!(string.as_bytes_with_nul(), b"hello\0");
    assert_eq!(string.capacity(), 64);
    assert_eq!(alloc.stats.allocs.get(), 1);

    string.overwrite_init("world");
    assert_eq!(string, "world", "Equal lengths should be copied in place.");
    string.overwrite_init("hi");
    assert_eq!(string.as_bytes_with_nul(), b"hi\0");
    assert_eq!(string.capacity(), 64, "Shorter content should reuse the buffer.");
    assert_eq!(alloc.stats.reallocs.get(), 0);

    let long = filled(64);
    string.overwrite_init(&long);
    assert_eq!(string.as_bytes(), long.as_bytes());
    assert_eq!(string.capacity(), 128);
    assert_eq!(alloc.stats.reallocs.get(), 1);
    assert_eq!(string.as_ptr() as usize % 64, 0, "The buffer should be aligned to ALIGN.");
}

#[test]
fn test_overwrite_init_stops_at_nul() {
    let mut string = Str64::new_in(Global);
    string.overwrite_init(b"abc\0def");
    assert_eq!(string.len(), 3);
    assert_eq!(string.as_c_str(), c"abc");
}

#[test]
fn test_append_boundaries() {
    let alloc = CountingAlloc::new();
    let mut string = Counted64::new_in(alloc.clone());

    string.append(filled(63));
    assert_eq!(string.capacity(), 64, "63 bytes and a terminator fit in 64.");

    string.append("x");
    assert_eq!(string.len(), 64);
    assert_eq!(string.capacity(), 128, "64 bytes need room for the terminator.");

    string.append(filled(63));
    assert_eq!(string.len(), 127);
    assert_eq!(string.capacity(), 128);

    string.append("y");
    assert_eq!(string.len(), 128);
    assert_eq!(string.capacity(), 192);
    assert_eq!(string.as_bytes_with_nul().last(), Some(&0));
    assert_eq!(*alloc.stats.sizes.borrow(), [64, 128, 192]);
}

#[test]
fn test_append_empty_never_allocates() {
    let alloc = CountingAlloc::new();
    let mut string = Counted64::new_in(alloc.clone());
    string.append("");
    string.push('\0');
    assert_eq!(string.capacity(), 0);
    assert_eq!(alloc.stats.allocs.get(), 0);
}

#[test]
fn test_push() {
    let mut string = HeapString::new();
    for ch in ['a', 'é', '€', '🦀'] {
        string.push(ch);
    }
    assert_eq!(string, "aé€🦀");
    assert_eq!(string.len(), 10);
    assert_eq!(string.capacity() % crate::alloc::DESTRUCTIVE_INTERFERENCE_SIZE, 0);
}

#[test]
fn test_invalid_utf8() {
    let mut string = Str64::new_in(Global);
    string.overwrite_init(b"ok\xFFok");
    assert_eq!(string.as_str(), Maybe::Absent);
    assert_eq!(string.to_string(), "ok\u{FFFD}ok");
}

#[test]
fn test_clear_keeps_buffer() {
    let mut string = HeapString::from("some text");
    let capacity = string.capacity();
    string.clear();
    assert!(string.is_empty());
    assert_eq!(string.capacity(), capacity);
    assert_eq!(string.as_bytes_with_nul(), b"\0");
    assert!(!string.as_ptr().is_null());
}

#[test]
fn test_take_leaves_source_empty() {
    let alloc = CountingAlloc::new();
    let mut source = Counted64::new_in(alloc.clone());
    source.overwrite_init("owned");

    let dest = source.take();
    assert_eq!(dest, "owned");
    assert_eq!(source.len(), 0);
    assert_eq!(source.capacity(), 0);
    assert!(source.as_ptr().is_null());

    drop(source);
    assert_eq!(alloc.stats.frees.get(), 0, "A moved-from string should not free anything.");
    drop(dest);
    assert_eq!(alloc.stats.frees.get(), 1);
}

#[test]
fn test_clone_and_equality() {
    let original = HeapString::from("shared?");
    let mut copy = original.clone();
    assert_eq!(copy, original);
    assert_ne!(copy.as_ptr(), original.as_ptr(), "Clones should not share a buffer.");

    copy.append(" no");
    assert_eq!(original, "shared?");
    assert_eq!(copy, "shared? no");

    let other: HeapString<Global, 128> = HeapString::new_in(Global);
    assert_ne!(original, other);
    assert_eq!(HeapString::new(), other, "Equality compares contents, not buffers.");
}

#[test]
fn test_alloc_failure_keeps_contents() {
    let alloc = CountingAlloc::failing_after(1);
    let mut string = Counted64::new_in(alloc.clone());
    string.overwrite_init("kept");

    let result = string.try_append(filled(100));
    assert!(result.view_err().is_some_and(GrowError::is_alloc_failed));
    assert_eq!(string, "kept");
    assert_eq!(string.capacity(), 64);

    assert_panics!({
        string.append(filled(100));
    });
}

#[test]
fn test_formatting() {
    let mut string = HeapString::new();
    write!(string, "{}-{}", 1, 2).unwrap();
    assert_eq!(string, "1-2");
    assert_eq!(format!("{string}"), "1-2");
    assert!(format!("{string:?}").contains("\"1-2\""));
}

proptest! {
    #[test]
    fn appends_concatenate(parts in prop::collection::vec("[a-z]{0,130}", 0..8)) {
        let mut string = Str64::new_in(Global);
        let mut expected = std::string::String::new();

        for part in parts.iter() {
            string.append(part);
            expected.push_str(part);

            prop_assert_eq!(string.as_bytes(), expected.as_bytes());
            prop_assert!(string.capacity() % 64 == 0);
            if string.capacity() != 0 {
                prop_assert!(string.capacity() > string.len());
                prop_assert_eq!(string.as_bytes_with_nul()[string.len()], 0);
            }
        }
    }

    #[test]
    fn overwrite_matches_content(first in "[ -~]{0,200}", second in "[ -~]{0,200}") {
        let mut string = Str64::new_in(Global);
        string.overwrite_init(&first);
        let capacity = string.capacity();
        prop_assert!(capacity >= first.len() + 1);

        string.overwrite_init(&second);
        prop_assert_eq!(string.as_bytes(), second.as_bytes());
        prop_assert!(string.capacity() >= capacity, "Capacity should never decrease.");
        prop_assert!(string.capacity() >= second.len() + 1);
    }
}

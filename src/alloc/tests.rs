#![cfg(all(test, feature = "libc-alloc"))]

use std::alloc::Layout;
use std::slice;

use super::*;

fn is_aligned(ptr: *const u8, align: usize) -> bool {
    ptr as usize % align == 0
}

#[test]
fn test_libc_fundamental_alignment() {
    let layout = Layout::new::<[u32; 4]>();
    let ptr = Libc.allocate(layout).unwrap();
    assert!(is_aligned(ptr.as_ptr(), layout.align()));

    // SAFETY: ptr is valid for layout.size() bytes.
    unsafe { ptr.as_ptr().write_bytes(0x5A, layout.size()) };
    // SAFETY: ptr came from Libc with layout, and 64 is a valid size for the same alignment.
    let grown = unsafe { Libc.reallocate(ptr, layout, 64) }.unwrap();
    // SAFETY: The first layout.size() bytes were carried over by reallocate.
    let kept = unsafe { slice::from_raw_parts(grown.as_ptr(), layout.size()) };
    assert!(kept.iter().all(|byte| *byte == 0x5A));

    // SAFETY: grown came from Libc and isn't used again.
    unsafe { Libc.free(grown, Layout::from_size_align(64, layout.align()).unwrap()) };
}

#[test]
fn test_libc_over_aligned() {
    let layout = Layout::from_size_align(100, 64).unwrap();
    let ptr = Libc.allocate(layout).unwrap();
    assert!(is_aligned(ptr.as_ptr(), 64));

    // SAFETY: ptr is valid for layout.size() bytes.
    unsafe { ptr.as_ptr().write_bytes(0xAB, layout.size()) };
    // SAFETY: ptr came from Libc with layout, and 300 is a valid size for the same alignment.
    let grown = unsafe { Libc.reallocate(ptr, layout, 300) }.unwrap();
    assert!(is_aligned(grown.as_ptr(), 64), "Growing should keep the alignment.");
    // SAFETY: The first layout.size() bytes were copied into the new block.
    let kept = unsafe { slice::from_raw_parts(grown.as_ptr(), layout.size()) };
    assert!(kept.iter().all(|byte| *byte == 0xAB));

    // SAFETY: grown came from Libc and isn't used again.
    unsafe { Libc.free(grown, Layout::from_size_align(300, 64).unwrap()) };
}

#[cfg(feature = "string")]
#[test]
fn test_libc_heap_string_growth() {
    use crate::string::HeapString;

    let mut string = HeapString::<Libc, 64>::new_in(Libc);
    let mut expected = String::new();
    let mut capacities = Vec::new();

    for i in 0..300 {
        let ch = char::from(b'a' + (i % 26) as u8);
        string.push(ch);
        expected.push(ch);

        if capacities.last() != Some(&string.capacity()) {
            capacities.push(string.capacity());
        }
        assert!(is_aligned(string.as_ptr().cast(), 64));
        assert_eq!(string.as_bytes_with_nul().last(), Some(&0));
    }

    assert_eq!(string.len(), 300);
    assert_eq!(string, expected.as_str());
    assert_eq!(capacities, [64, 128, 192, 256, 320]);
}

#[cfg(feature = "contiguous")]
#[test]
fn test_libc_vector_growth() {
    use crate::collections::contiguous::Vector;

    let mut vec = Vector::new_in(Libc);
    for i in 0..1000_u64 {
        vec.push_back(i);
    }

    assert_eq!(vec.size(), 1000);
    assert_eq!(vec.capacity(), 1024);
    assert!(vec.iter().copied().eq(0..1000));
    assert_eq!(*vec.at(999), 999);
}

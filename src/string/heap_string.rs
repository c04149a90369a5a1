use std::alloc::Layout;
use std::ffi::{CStr, c_char};
use std::fmt::{self, Debug, Display, Formatter, Write};
use std::hash::{Hash, Hasher};
use std::mem;
use std::ptr::{self, NonNull};
use std::slice;
use std::str;

use crate::alloc::{
    AllocError, CapacityOverflow, DESTRUCTIVE_INTERFERENCE_SIZE, Global, GrowError, RawAlloc,
};
use crate::result::Maybe;
use crate::result::Outcome::{self, Failure, Success};
use crate::util::result::ResultExtension;

/// A growable, null-terminated byte string in a single heap buffer.
///
/// The buffer is allocated on the first write of non-empty content. From then on, the byte at
/// index `len()` is always a NUL terminator, and the capacity is always a multiple of `ALIGN` that
/// leaves room for it. The buffer itself is also aligned to `ALIGN`, so by default a HeapString
/// starts on its own cache line. Capacity never shrinks, so clearing or overwriting with shorter
/// content reuses the existing buffer.
///
/// Contents are bytes. Writing content that contains a NUL byte stores everything before the
/// first NUL, as a C string would, and nothing else. Contents are usually UTF-8, but nothing
/// enforces it, so [`as_str`](HeapString::as_str) is checked.
///
/// # Examples
/// ```
/// # use owned_std::string::HeapString;
/// let mut string = HeapString::new();
/// string.overwrite_init("hello");
/// string.append(", world");
/// string.push('!');
/// assert_eq!(string, "hello, world!");
/// assert_eq!(string.as_bytes_with_nul(), b"hello, world!\0");
/// ```
pub struct HeapString<A: RawAlloc = Global, const ALIGN: usize = DESTRUCTIVE_INTERFERENCE_SIZE> {
    ptr: Option<NonNull<u8>>,
    len: usize,
    cap: usize,
    alloc: A,
}

impl HeapString {
    /// Creates a new, unallocated HeapString using the [`Global`] allocator.
    pub const fn new() -> HeapString {
        HeapString::new_in(Global)
    }
}

impl<A: RawAlloc, const ALIGN: usize> HeapString<A, ALIGN> {
    const VALID_ALIGN: () = assert!(ALIGN.is_power_of_two(), "ALIGN must be a power of two");

    /// Creates a new, unallocated HeapString that will obtain its buffer from `alloc`.
    pub const fn new_in(alloc: A) -> HeapString<A, ALIGN> {
        let () = Self::VALID_ALIGN;
        HeapString {
            ptr: None,
            len: 0,
            cap: 0,
            alloc,
        }
    }

    /// Returns the smallest multiple of `ALIGN` that is no less than `size`.
    ///
    /// # Errors
    /// Fails if the result isn't representable.
    ///
    /// # Examples
    /// ```
    /// # use owned_std::alloc::Global;
    /// # use owned_std::result::Outcome;
    /// # use owned_std::string::HeapString;
    /// type Str = HeapString<Global, 64>;
    /// assert_eq!(Str::aligned_size(0), Outcome::Success(0));
    /// assert_eq!(Str::aligned_size(1), Outcome::Success(64));
    /// assert_eq!(Str::aligned_size(64), Outcome::Success(64));
    /// assert_eq!(Str::aligned_size(65), Outcome::Success(128));
    /// ```
    pub fn aligned_size(size: usize) -> Outcome<usize, CapacityOverflow> {
        size.checked_next_multiple_of(ALIGN).ok_or(CapacityOverflow).into()
    }

    /// Returns the length of the contents in bytes, excluding the terminator.
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the string has no content, whether or not a buffer is allocated.
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the size of the buffer in bytes, including the space reserved for the terminator.
    pub const fn capacity(&self) -> usize {
        self.cap
    }

    /// Returns the allocator that owns the buffer.
    pub const fn allocator(&self) -> &A {
        &self.alloc
    }

    /// Replaces the contents with a copy of `content`.
    ///
    /// # Panics
    /// Raises a fatal assertion if the buffer can't be grown.
    #[track_caller]
    pub fn overwrite_init(&mut self, content: impl AsRef<[u8]>) {
        self.try_overwrite_init(content).throw()
    }

    /// Replaces the contents with a copy of `content`, up to its first NUL byte.
    ///
    /// An unallocated string allocates exactly `aligned_size(len + 1)` bytes. Content that still
    /// fits alongside its terminator is copied in place, otherwise the buffer is reallocated to
    /// `aligned_size(len + 1)` bytes.
    ///
    /// # Errors
    /// If the allocator refuses, the string is left exactly as it was.
    pub fn try_overwrite_init(&mut self, content: impl AsRef<[u8]>) -> Outcome<(), GrowError> {
        let content = until_nul(content.as_ref());
        let required = content.len().checked_add(1).ok_or(CapacityOverflow)?;

        if self.ptr.is_none() || required > self.cap {
            self.try_resize(Self::aligned_size(required)?)?;
        }

        // SAFETY: The buffer holds at least len + 1 bytes, and content can't overlap it because
        // self is borrowed mutably.
        unsafe { self.write_at(0, content) }
        Success(())
    }

    /// Appends a copy of `content` to the end of the string.
    ///
    /// # Panics
    /// Raises a fatal assertion if the buffer can't be grown.
    #[track_caller]
    pub fn append(&mut self, content: impl AsRef<[u8]>) {
        self.try_append(content).throw()
    }

    /// Appends a copy of `content`, up to its first NUL byte, to the end of the string.
    ///
    /// The buffer is only reallocated if the combined contents and their terminator don't fit,
    /// in which case it grows to `aligned_size(combined + 1)` bytes. Appending nothing never
    /// allocates.
    ///
    /// # Errors
    /// If the allocator refuses, the string is left exactly as it was.
    pub fn try_append(&mut self, content: impl AsRef<[u8]>) -> Outcome<(), GrowError> {
        let content = until_nul(content.as_ref());
        if content.is_empty() {
            return Success(());
        }

        let combined = self.len.checked_add(content.len()).ok_or(CapacityOverflow)?;
        if combined >= self.cap {
            let required = combined.checked_add(1).ok_or(CapacityOverflow)?;
            self.try_resize(Self::aligned_size(required)?)?;
        }

        // SAFETY: The buffer holds at least combined + 1 bytes, and content can't overlap it
        // because self is borrowed mutably.
        unsafe { self.write_at(self.len, content) }
        Success(())
    }

    /// Appends the UTF-8 encoding of `ch`. Pushing `'\0'` does nothing.
    ///
    /// # Panics
    /// Raises a fatal assertion if the buffer can't be grown.
    #[track_caller]
    pub fn push(&mut self, ch: char) {
        let mut encoded = [0_u8; 4];
        self.append(ch.encode_utf8(&mut encoded))
    }

    /// Empties the string, keeping its buffer.
    pub fn clear(&mut self) {
        if let Some(ptr) = self.ptr {
            // SAFETY: An allocated buffer always has room for at least the terminator.
            unsafe { ptr.write(0) }
        }
        self.len = 0;
    }

    /// Returns the contents, without the terminator.
    pub const fn as_bytes(&self) -> &[u8] {
        match self.ptr {
            // SAFETY: The first len bytes of the buffer are always initialized.
            Some(ptr) => unsafe { slice::from_raw_parts(ptr.as_ptr(), self.len) },
            None => &[],
        }
    }

    /// Returns the contents, including the terminator. An unallocated string is just the
    /// terminator.
    pub const fn as_bytes_with_nul(&self) -> &[u8] {
        match self.ptr {
            // SAFETY: The first len bytes of the buffer are initialized, followed by a NUL.
            Some(ptr) => unsafe { slice::from_raw_parts(ptr.as_ptr(), self.len + 1) },
            None => b"\0",
        }
    }

    /// Returns the contents as a `str`, or [`Absent`](Maybe::Absent) if they aren't valid UTF-8.
    pub fn as_str(&self) -> Maybe<&str> {
        str::from_utf8(self.as_bytes()).ok().into()
    }

    /// Returns the contents as a C string, which is empty when nothing has been allocated.
    pub const fn as_c_str(&self) -> &CStr {
        // SAFETY: Contents never include a NUL byte, and are always followed by one.
        unsafe { CStr::from_bytes_with_nul_unchecked(self.as_bytes_with_nul()) }
    }

    /// Returns a pointer to the null-terminated contents, or null if nothing has been allocated.
    pub const fn as_ptr(&self) -> *const c_char {
        match self.ptr {
            Some(ptr) => ptr.as_ptr().cast_const().cast(),
            None => ptr::null(),
        }
    }

    /// Moves the contents of this string into a new one, leaving this string empty and
    /// unallocated.
    ///
    /// # Examples
    /// ```
    /// # use owned_std::string::HeapString;
    /// let mut source = HeapString::from("moved");
    /// let dest = source.take();
    /// assert_eq!(dest, "moved");
    /// assert_eq!(source.capacity(), 0);
    /// assert!(source.as_ptr().is_null());
    /// ```
    pub fn take(&mut self) -> HeapString<A, ALIGN>
    where
        A: Clone,
    {
        log::trace!("moving a string of {} bytes out of its owner", self.len);
        HeapString {
            ptr: self.ptr.take(),
            len: mem::take(&mut self.len),
            cap: mem::take(&mut self.cap),
            alloc: self.alloc.clone(),
        }
    }

    const fn layout_for(cap: usize) -> Outcome<Layout, CapacityOverflow> {
        match Layout::from_size_align(cap, ALIGN) {
            Ok(layout) => Success(layout),
            Err(_) => Failure(CapacityOverflow),
        }
    }

    /// Allocates or reallocates the buffer to exactly `new_cap` bytes, which must be non-zero and
    /// no smaller than the current capacity.
    fn try_resize(&mut self, new_cap: usize) -> Outcome<(), GrowError> {
        debug_assert!(new_cap >= self.cap && new_cap > 0);
        let new_layout = Self::layout_for(new_cap)?;

        let new_ptr = match self.ptr {
            None => self.alloc.allocate(new_layout),
            Some(old) => {
                // SAFETY: old was allocated with this layout, which was valid at the time.
                let old_layout = unsafe { Layout::from_size_align_unchecked(self.cap, ALIGN) };
                // SAFETY: old was allocated by alloc with old_layout, and new_cap is non-zero and
                // has been checked by Layout::from_size_align.
                unsafe { self.alloc.reallocate(old, old_layout, new_cap) }
            },
        };

        match new_ptr {
            Some(new_ptr) => {
                log::trace!("resized string buffer from {} to {new_cap} bytes", self.cap);
                self.ptr = Some(new_ptr);
                self.cap = new_cap;
                Success(())
            },
            None => {
                log::warn!("allocation of {new_cap} bytes refused, string left unchanged");
                Failure(AllocError { size: new_cap }.into())
            },
        }
    }

    /// Copies `content` to `offset`, terminates it and sets the length to match.
    ///
    /// # Safety
    /// The buffer must be allocated and hold at least `offset + content.len() + 1` bytes, the
    /// first `offset` of which are initialized. `content` must not overlap the buffer.
    unsafe fn write_at(&mut self, offset: usize, content: &[u8]) {
        let Some(buf) = self.ptr else {
            return;
        };

        let end = offset + content.len();
        // SAFETY: The caller guarantees that the buffer is large enough and doesn't overlap.
        unsafe {
            ptr::copy_nonoverlapping(content.as_ptr(), buf.as_ptr().add(offset), content.len());
            buf.add(end).write(0);
        }
        self.len = end;
    }
}

/// Truncates `bytes` at its first NUL, if there is one.
fn until_nul(bytes: &[u8]) -> &[u8] {
    match bytes.iter().position(|byte| *byte == 0) {
        Some(end) => &bytes[..end],
        None => bytes,
    }
}

impl<A: RawAlloc, const ALIGN: usize> Drop for HeapString<A, ALIGN> {
    fn drop(&mut self) {
        if let Some(ptr) = self.ptr {
            // SAFETY: The buffer was allocated with exactly this layout, which was valid.
            let layout = unsafe { Layout::from_size_align_unchecked(self.cap, ALIGN) };
            // SAFETY: ptr was allocated by alloc and is never used again.
            unsafe { self.alloc.free(ptr, layout) }
        }
    }
}

// SAFETY: HeapString owns its buffer outright, so it can be sent wherever its allocator can.
unsafe impl<A: RawAlloc + Send, const ALIGN: usize> Send for HeapString<A, ALIGN> {}
// SAFETY: No interior mutability is possible through a shared reference.
unsafe impl<A: RawAlloc + Sync, const ALIGN: usize> Sync for HeapString<A, ALIGN> {}

impl<A: RawAlloc + Default, const ALIGN: usize> Default for HeapString<A, ALIGN> {
    fn default() -> Self {
        HeapString::new_in(A::default())
    }
}

impl<A: RawAlloc + Clone, const ALIGN: usize> Clone for HeapString<A, ALIGN> {
    /// Deep copies the contents into a new buffer, sized for the contents rather than the
    /// original's capacity.
    fn clone(&self) -> Self {
        let mut string = HeapString::new_in(self.alloc.clone());
        if self.ptr.is_some() {
            string.overwrite_init(self.as_bytes());
        }
        string
    }
}

impl From<&str> for HeapString {
    fn from(value: &str) -> Self {
        let mut string = HeapString::new();
        string.overwrite_init(value);
        string
    }
}

impl<A: RawAlloc, const ALIGN: usize> AsRef<[u8]> for HeapString<A, ALIGN> {
    fn as_ref(&self) -> &[u8] {
        self.as_bytes()
    }
}

impl<A, B, const X: usize, const Y: usize> PartialEq<HeapString<B, Y>> for HeapString<A, X>
where
    A: RawAlloc,
    B: RawAlloc,
{
    fn eq(&self, other: &HeapString<B, Y>) -> bool {
        self.as_bytes() == other.as_bytes()
    }
}

impl<A: RawAlloc, const ALIGN: usize> Eq for HeapString<A, ALIGN> {}

impl<A: RawAlloc, const ALIGN: usize> PartialEq<str> for HeapString<A, ALIGN> {
    fn eq(&self, other: &str) -> bool {
        self.as_bytes() == other.as_bytes()
    }
}

impl<A: RawAlloc, const ALIGN: usize> PartialEq<&str> for HeapString<A, ALIGN> {
    fn eq(&self, other: &&str) -> bool {
        self.as_bytes() == other.as_bytes()
    }
}

impl<A: RawAlloc, const ALIGN: usize> Hash for HeapString<A, ALIGN> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.as_bytes().hash(state);
    }
}

impl<A: RawAlloc, const ALIGN: usize> Write for HeapString<A, ALIGN> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.try_append(s).map_err(|_| fmt::Error).into()
    }
}

impl<A: RawAlloc, const ALIGN: usize> Display for HeapString<A, ALIGN> {
    /// Writes the contents, replacing any invalid UTF-8 with U+FFFD.
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for chunk in self.as_bytes().utf8_chunks() {
            f.write_str(chunk.valid())?;
            if !chunk.invalid().is_empty() {
                f.write_char(char::REPLACEMENT_CHARACTER)?;
            }
        }
        Ok(())
    }
}

impl<A: RawAlloc, const ALIGN: usize> Debug for HeapString<A, ALIGN> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("HeapString")
            .field_with("contents", |f| write!(f, "\"{self}\""))
            .field("len", &self.len)
            .field("capacity", &self.cap)
            .finish()
    }
}

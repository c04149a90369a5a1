use std::alloc::Layout;
use std::cell::{Cell, RefCell};
use std::ops::{Deref, DerefMut};
use std::ptr::NonNull;
use std::rc::Rc;

use crate::alloc::{Global, RawAlloc};

#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct ZeroSizedType;

#[derive(Debug, Clone)]
pub struct CountedDrop(pub Rc<RefCell<usize>>);

impl CountedDrop {
    pub fn new(value: usize) -> CountedDrop {
        CountedDrop(Rc::new(RefCell::new(value)))
    }
}

impl Deref for CountedDrop {
    type Target = Rc<RefCell<usize>>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for CountedDrop {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl Drop for CountedDrop {
    fn drop(&mut self) {
        self.0.replace_with(|v| *v + 1);
    }
}

#[derive(Debug, Default)]
pub struct AllocStats {
    pub allocs: Cell<usize>,
    pub reallocs: Cell<usize>,
    pub frees: Cell<usize>,
    /// The layout sizes of every successful allocation or reallocation, in order.
    pub sizes: RefCell<std::vec::Vec<usize>>,
}

impl AllocStats {
    pub fn live(&self) -> usize {
        self.allocs.get() - self.frees.get()
    }
}

/// Wraps [`Global`], recording every call. Clones share the same statistics.
#[derive(Debug, Default, Clone)]
pub struct CountingAlloc {
    pub stats: Rc<AllocStats>,
    /// Remaining successful allocations / reallocations, or unlimited if `None`.
    pub budget: Rc<Cell<Option<usize>>>,
}

impl CountingAlloc {
    pub fn new() -> CountingAlloc {
        CountingAlloc::default()
    }

    /// Creates an allocator that refuses every request after the first `budget`.
    pub fn failing_after(budget: usize) -> CountingAlloc {
        let alloc = CountingAlloc::default();
        alloc.budget.set(Some(budget));
        alloc
    }

    fn spend(&self) -> bool {
        match self.budget.get() {
            None => true,
            Some(0) => false,
            Some(n) => {
                self.budget.set(Some(n - 1));
                true
            },
        }
    }
}

// SAFETY: Every successful request is forwarded to Global unchanged.
unsafe impl RawAlloc for CountingAlloc {
    fn allocate(&self, layout: Layout) -> Option<NonNull<u8>> {
        if !self.spend() {
            return None;
        }
        let ptr = Global.allocate(layout)?;
        self.stats.allocs.set(self.stats.allocs.get() + 1);
        self.stats.sizes.borrow_mut().push(layout.size());
        Some(ptr)
    }

    unsafe fn reallocate(&self, ptr: NonNull<u8>, old: Layout, new_size: usize)
        -> Option<NonNull<u8>>
    {
        if !self.spend() {
            return None;
        }
        // SAFETY: Requirements are passed on to the caller.
        let new_ptr = unsafe { Global.reallocate(ptr, old, new_size) }?;
        self.stats.reallocs.set(self.stats.reallocs.get() + 1);
        self.stats.sizes.borrow_mut().push(new_size);
        Some(new_ptr)
    }

    unsafe fn free(&self, ptr: NonNull<u8>, layout: Layout) {
        self.stats.frees.set(self.stats.frees.get() + 1);
        // SAFETY: Requirements are passed on to the caller.
        unsafe { Global.free(ptr, layout) }
    }
}

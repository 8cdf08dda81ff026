use std::alloc::{self, Layout};
use std::marker::PhantomData;
use std::ptr::NonNull;

/// A raw allocation holding space for `cap` values of `T`.
///
/// This type tracks no initialization state whatsoever; owners are responsible for dropping every
/// value they initialize before the buffer is released or shrunk. Dropping a RawBuf releases the
/// allocation only.
///
/// Zero-sized types never allocate: the pointer stays dangling and the capacity is purely
/// nominal, which is exactly what [`ptr::read`](std::ptr::read) and friends expect.
pub(crate) struct RawBuf<T> {
    ptr: NonNull<T>,
    cap: usize,
    _phantom: PhantomData<T>,
}

impl<T> RawBuf<T> {
    /// Creates a buffer with capacity 0 and no allocation.
    pub(crate) const fn new() -> RawBuf<T> {
        RawBuf {
            ptr: NonNull::dangling(),
            cap: 0,
            _phantom: PhantomData,
        }
    }

    /// Creates a buffer with space for exactly `cap` values, all uninitialized.
    ///
    /// # Panics
    /// Panics if the memory layout size would exceed [`isize::MAX`].
    pub(crate) fn with_cap(cap: usize) -> RawBuf<T> {
        let mut buf = RawBuf::new();
        buf.realloc(cap);
        buf
    }

    /// Returns the number of values the buffer has space for.
    pub(crate) const fn cap(&self) -> usize {
        self.cap
    }

    /// Returns the pointer to the start of the buffer. Dangling (but aligned and nonnull) when the
    /// capacity is 0 or `T` is zero-sized.
    pub(crate) const fn ptr(&self) -> NonNull<T> {
        self.ptr
    }

    /// A helper to build the [`Layout`] for `cap` values of `T`.
    ///
    /// # Panics
    /// Panics if the layout size would exceed [`isize::MAX`].
    fn layout(cap: usize) -> Layout {
        Layout::array::<T>(cap).expect("Capacity overflow!")
    }

    /// Reallocates the buffer to have space for exactly `new_cap` values. Values inside the common
    /// prefix of the old and new capacities are preserved bitwise; any new slots are
    /// uninitialized. Owners must have dropped every initialized value beyond `new_cap` before
    /// shrinking.
    ///
    /// # Panics
    /// Panics if the new memory layout size would exceed [`isize::MAX`].
    ///
    /// # Errors
    /// In the event of an allocation failure, this method calls [`alloc::handle_alloc_error`] as
    /// recommended, to avoid new allocations rather than panicking.
    pub(crate) fn realloc(&mut self, new_cap: usize) {
        let new_ptr = match (self.cap, new_cap) {
            (_, _) if size_of::<T>() == 0 => {
                // Zero-sized types are never allocated; only the nominal capacity changes.
                self.ptr
            },
            (old, new) if old == new => {
                // The capacities are equal, there is no need to reallocate.
                return;
            },
            (0, _) => {
                let layout = Self::layout(new_cap);

                // SAFETY: The layout has non-zero size because both 0 capacity and zero-sized
                // types are guarded against.
                let raw_ptr: *mut T = unsafe { alloc::alloc(layout).cast() };

                NonNull::new(raw_ptr).unwrap_or_else(|| alloc::handle_alloc_error(layout))
            },
            (_, 0) => {
                let old_layout = Self::layout(self.cap);

                // SAFETY: ptr was allocated in the global allocator with this exact layout, which
                // has non-zero size.
                unsafe { alloc::dealloc(self.ptr.as_ptr().cast(), old_layout); }

                NonNull::dangling()
            },
            (_, _) => {
                let old_layout = Self::layout(self.cap);
                let new_layout = Self::layout(new_cap);

                // SAFETY: The same layout and allocator are used as for the original allocation,
                // and the new size is non-zero and within isize::MAX (checked by layout()).
                let raw_ptr: *mut T = unsafe {
                    alloc::realloc(
                        self.ptr.as_ptr().cast(),
                        old_layout,
                        new_layout.size()
                    ).cast()
                };

                NonNull::new(raw_ptr).unwrap_or_else(|| alloc::handle_alloc_error(new_layout))
            },
        };

        self.ptr = new_ptr;
        self.cap = new_cap;
    }
}

impl<T> Drop for RawBuf<T> {
    fn drop(&mut self) {
        let layout = Self::layout(self.cap);

        if layout.size() != 0 {
            // SAFETY: ptr is always allocated in the global allocator and layout is the same as
            // when allocated. Zero-sized layouts aren't allocated and are guarded against
            // deallocation.
            unsafe {
                alloc::dealloc(self.ptr.as_ptr().cast(), layout)
            }
        }
    }
}

// SAFETY: RawBuf's pointer is unique and never aliased by the type itself, so it is safe to send
// when T is.
unsafe impl<T: Send> Send for RawBuf<T> {}
// SAFETY: RawBuf provides no interior mutability, so sharing references is safe when T: Sync.
unsafe impl<T: Sync> Sync for RawBuf<T> {}

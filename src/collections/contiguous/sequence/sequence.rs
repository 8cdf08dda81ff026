use std::borrow::{Borrow, BorrowMut};
use std::cmp;
use std::fmt::{self, Debug, Display, Formatter};
use std::mem;
use std::ops::{Deref, DerefMut};
use std::ptr;
use std::slice;

use super::{CapacityOverflow, IndexOrCapOverflow, IndexOutOfBounds};
use crate::collections::contiguous::raw::RawBuf;

/// The smallest capacity a Sequence will grow to on its own. Growing straight to a reasonable
/// block avoids a run of tiny reallocations for small sequences.
const GROWTH_FLOOR: usize = 256;

const GROWTH_FACTOR: usize = 2;

/// A variable size contiguous collection with explicit length and capacity tracking.
///
/// A Sequence owns its backing buffer exclusively. The buffer is valid for `cap()` slots but only
/// the first `len()` hold values; automatic growth doubles the capacity (with a floor of 256
/// slots), which amortizes reallocation to `O(1)` per push. A Sequence never shrinks on its own,
/// only through [`ensure`](Sequence::ensure).
///
/// # Time Complexity
/// For this analysis of time complexity, variables are defined as follows:
/// - `n`: The number of items in the Sequence.
/// - `i`: The index of the item in question.
/// - `m`: The number of items being added.
///
/// | Method | Complexity |
/// |-|-|
/// | `get` | `O(1)` |
/// | `len` | `O(1)` |
/// | `push` | `O(1)`*, `O(n)` |
/// | `push_all` | `O(m)`* |
/// | `pop` | `O(1)` |
/// | `shift` | `O(n)` |
/// | `insert` | `O(n-i)` |
/// | `insert_all` | `O(n-i+m)` |
/// | `remove` | `O(n-i)` |
/// | `remove_n` | `O(n-i)` |
/// | `replace` | `O(1)` |
/// | `ensure` | `O(n)` |
/// | `concat` | `O(m)`* |
///
/// \* If the Sequence doesn't have enough capacity for the new elements, these methods take an
/// additional `O(n)` for the reallocation.
pub struct Sequence<T> {
    pub(crate) buf: RawBuf<T>,
    pub(crate) len: usize,
}

impl<T> Sequence<T> {
    /// Returns the length of the Sequence.
    ///
    /// # Examples
    /// ```
    /// # use smallstd::collections::contiguous::Sequence;
    /// let seq: Sequence<_> = (1_u8..=3).collect();
    /// assert_eq!(seq.len(), 3);
    /// ```
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns the current capacity of the Sequence. Unlike [`Vec`], the capacity is guaranteed
    /// to be exactly the value provided to any of the capacity manipulation functions.
    ///
    /// # Examples
    /// ```
    /// # use smallstd::collections::contiguous::Sequence;
    /// let seq: Sequence<u8> = Sequence::with_cap(5);
    /// assert_eq!(seq.cap(), 5);
    /// ```
    pub const fn cap(&self) -> usize {
        self.buf.cap()
    }

    /// Returns true if the Sequence contains no elements.
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Creates a new Sequence with length and capacity 0. Memory will be allocated when the
    /// capacity changes.
    ///
    /// # Examples
    /// ```
    /// # use smallstd::collections::contiguous::Sequence;
    /// let seq: Sequence<u8> = Sequence::new();
    /// assert_eq!(seq.len(), 0);
    /// assert_eq!(seq.cap(), 0);
    /// ```
    pub const fn new() -> Sequence<T> {
        Sequence {
            buf: RawBuf::new(),
            len: 0,
        }
    }

    /// Creates a new Sequence with capacity exactly equal to the provided value, allowing values
    /// to be added without reallocation.
    ///
    /// # Panics
    /// Panics if the memory layout size would exceed [`isize::MAX`].
    pub fn with_cap(cap: usize) -> Sequence<T> {
        Sequence {
            buf: RawBuf::with_cap(cap),
            len: 0,
        }
    }

    /// Reallocates the backing buffer to exactly `new_cap` slots. If `new_cap` is smaller than the
    /// current length, the excess elements are dropped and the length truncated to `new_cap`.
    ///
    /// This is the only way a Sequence shrinks; every other operation either keeps or grows the
    /// capacity.
    ///
    /// # Panics
    /// Panics if the new memory layout size would exceed [`isize::MAX`]. Allocation failure is
    /// fatal and reported through [`handle_alloc_error`](std::alloc::handle_alloc_error).
    ///
    /// # Examples
    /// ```
    /// # use smallstd::collections::contiguous::Sequence;
    /// let mut seq: Sequence<_> = (0..4).collect();
    /// seq.ensure(3);
    /// assert_eq!(seq.len(), 3);
    /// assert_eq!(seq.cap(), 3);
    /// assert_eq!(&*seq, &[0, 1, 2]);
    /// ```
    pub fn ensure(&mut self, new_cap: usize) {
        if new_cap < self.len {
            for i in new_cap..self.len {
                // SAFETY: Every index below len is initialized and within the allocation, and the
                // length is truncated immediately after so nothing is dropped twice.
                unsafe {
                    ptr::drop_in_place(self.buf.ptr().add(i).as_ptr());
                }
            }
            self.len = new_cap;
        }

        self.buf.realloc(new_cap);
    }

    /// Push the provided value onto the end of the Sequence, increasing the capacity if required.
    ///
    /// # Panics
    /// Panics if the new memory layout size would exceed [`isize::MAX`].
    ///
    /// # Examples
    /// ```
    /// # use smallstd::collections::contiguous::Sequence;
    /// let mut seq = Sequence::<u8>::new();
    /// for i in 0..=5 {
    ///     seq.push(i);
    /// }
    /// assert_eq!(&*seq, &[0, 1, 2, 3, 4, 5]);
    /// ```
    pub fn push(&mut self, value: T) {
        if self.len == self.cap() {
            self.grow_for(self.len + 1);
        }
        // SAFETY: The capacity has just been adjusted to support the addition of the new value.
        unsafe { self.push_unchecked(value) }
    }

    /// Push the provided value onto the end of the Sequence, assuming that there is enough
    /// capacity to do so.
    ///
    /// # Safety
    /// It is up to the caller to ensure that the Sequence has enough capacity to add the provided
    /// value, using methods like [`reserve`](Sequence::reserve), [`ensure`](Sequence::ensure) or
    /// [`with_cap`](Sequence::with_cap) to do so. Using this method on a Sequence without enough
    /// capacity is undefined behavior.
    pub unsafe fn push_unchecked(&mut self, value: T) {
        // SAFETY: It is up to the caller to ensure that the Sequence has enough capacity for this
        // push, keeping the pointer write in bounds of the allocation.
        unsafe { self.buf.ptr().add(self.len).write(value); }
        self.len += 1;
    }

    /// Pops the last value off the end of the Sequence, returning an owned value if the Sequence
    /// has length greater than 0. Popping an empty Sequence returns `None` rather than touching
    /// the length.
    ///
    /// # Examples
    /// ```
    /// # use smallstd::collections::contiguous::Sequence;
    /// let mut seq: Sequence<_> = (0..5).collect();
    /// for i in (0..5).rev() {
    ///     assert_eq!(seq.pop(), Some(i));
    /// }
    /// assert_eq!(seq.pop(), None);
    /// ```
    pub fn pop(&mut self) -> Option<T> {
        if self.len == 0 {
            None
        } else {
            // Decrement len before reading.
            self.len -= 1;

            // SAFETY: len has just been decremented, so the slot is initialized, within the
            // allocation and no longer considered part of the Sequence. Reading it moves the
            // value out.
            let value = unsafe { self.buf.ptr().add(self.len).read() };
            Some(value)
        }
    }

    /// Removes the first element and returns it, moving all following values left by one. Returns
    /// `None` if the Sequence is empty.
    ///
    /// Equivalent to `remove(0)` without the out-of-bounds panic.
    pub fn shift(&mut self) -> Option<T> {
        if self.is_empty() {
            None
        } else {
            Some(self.remove(0))
        }
    }

    /// Inserts the provided value at the given index, growing and moving items as necessary.
    /// `index` may be equal to the length, in which case this is a push.
    ///
    /// # Panics
    /// Panics if the provided index is greater than the length, or on capacity overflow.
    ///
    /// # Examples
    /// ```
    /// # use smallstd::collections::contiguous::Sequence;
    /// let mut seq: Sequence<_> = (0..3).collect();
    /// seq.insert(1, 100);
    /// seq.insert(1, 200);
    /// seq.insert(3, 300);
    /// assert_eq!(&*seq, &[0, 200, 100, 300, 1, 2]);
    /// ```
    pub fn insert(&mut self, index: usize, value: T) {
        assert!(
            index <= self.len,
            "index {} out of bounds for insertion into collection with {} elements",
            index,
            self.len
        );

        if self.len == self.cap() {
            self.grow_for(self.len + 1);
        }

        // SAFETY: The capacity supports one more element, index <= len keeps both the copy and
        // the write in bounds, and the copy preserves every initialized value.
        unsafe {
            let slot = self.buf.ptr().add(index).as_ptr();
            ptr::copy(slot, slot.add(1), self.len - index);
            ptr::write(slot, value);
        }

        self.len += 1;
    }

    /// A fallible version of [`insert`](Sequence::insert): rejects an out-of-bounds index or a
    /// length overflow with a typed error instead of panicking.
    pub fn try_insert(&mut self, index: usize, value: T) -> Result<(), IndexOrCapOverflow> {
        if index > self.len {
            return Err(IndexOutOfBounds { index, len: self.len }.into());
        }
        if self.len.checked_add(1).is_none() {
            return Err(CapacityOverflow.into());
        }

        self.insert(index, value);
        Ok(())
    }

    /// Removes the element at the provided index, moving all following values to fill in the gap.
    ///
    /// # Panics
    /// Panics if the provided index is out of bounds.
    ///
    /// # Examples
    /// ```
    /// # use smallstd::collections::contiguous::Sequence;
    /// let mut seq: Sequence<_> = "Hello world!".chars().collect();
    /// assert_eq!(seq.remove(1), 'e');
    /// assert_eq!(seq.remove(4), ' ');
    /// assert_eq!(seq, "Hlloworld!".chars().collect());
    /// ```
    pub fn remove(&mut self, index: usize) -> T {
        self.check_index(index);

        // SAFETY: index < len, so the slot is initialized and the trailing copy stays in bounds.
        // The value is read out before being overwritten and the length is decremented so it
        // isn't dropped again.
        unsafe {
            let slot = self.buf.ptr().add(index).as_ptr();
            let value = ptr::read(slot);
            ptr::copy(slot.add(1), slot, self.len - index - 1);
            self.len -= 1;
            value
        }
    }

    /// A fallible version of [`remove`](Sequence::remove): rejects an out-of-bounds index with a
    /// typed error instead of panicking.
    pub fn try_remove(&mut self, index: usize) -> Result<T, IndexOutOfBounds> {
        if index >= self.len {
            return Err(IndexOutOfBounds { index, len: self.len });
        }

        Ok(self.remove(index))
    }

    /// Removes `n` contiguous elements starting at `index`, dropping them and moving the suffix
    /// left by `n`.
    ///
    /// # Panics
    /// Panics if `index + n` is greater than the length.
    ///
    /// # Examples
    /// ```
    /// # use smallstd::collections::contiguous::Sequence;
    /// let mut seq: Sequence<_> = (1..=5).collect();
    /// seq.remove_n(1, 2);
    /// assert_eq!(&*seq, &[1, 4, 5]);
    /// ```
    pub fn remove_n(&mut self, index: usize, n: usize) {
        let end = index.checked_add(n).expect("Capacity overflow!");
        assert!(
            end <= self.len,
            "range {}..{} out of bounds for collection with {} elements",
            index,
            end,
            self.len
        );

        // SAFETY: index..end is initialized and in bounds; each value is dropped exactly once
        // before the suffix is copied over the gap and the length is reduced.
        unsafe {
            let slot = self.buf.ptr().add(index).as_ptr();
            for i in 0..n {
                ptr::drop_in_place(slot.add(i));
            }
            ptr::copy(slot.add(n), slot, self.len - end);
        }

        self.len -= n;
    }

    /// Replaces the element at `index` with `new_value`, returning the previous element.
    ///
    /// # Panics
    /// Panics if the provided index is out of bounds.
    pub fn replace(&mut self, index: usize, new_value: T) -> T {
        self.check_index(index);

        mem::replace(&mut self[index], new_value)
    }

    /// Appends all elements of `other` onto the end of self, consuming it. Grows to the larger of
    /// the doubling target and the exact required size, so a single large concat can't under-grow.
    ///
    /// # Panics
    /// Panics on capacity overflow.
    ///
    /// # Examples
    /// ```
    /// # use smallstd::collections::contiguous::Sequence;
    /// let mut seq: Sequence<_> = (1..=3).collect();
    /// seq.concat((8..=10).rev().collect());
    /// assert_eq!(&*seq, &[1, 2, 3, 10, 9, 8]);
    /// ```
    pub fn concat(&mut self, other: Sequence<T>) {
        let required = self.len.checked_add(other.len).expect("Capacity overflow!");
        if required > self.cap() {
            self.grow_for(required);
        }

        for value in other {
            // SAFETY: The capacity was just grown to hold every element of other.
            unsafe { self.push_unchecked(value) }
        }
    }

    /// Increases the capacity of the Sequence to ensure that `extra` additional elements will fit
    /// without reallocation. Does nothing if the capacity is already sufficient.
    ///
    /// # Panics
    /// Panics on capacity overflow.
    pub fn reserve(&mut self, extra: usize) {
        let new_cap = self.len.checked_add(extra).expect("Capacity overflow!");

        if new_cap > self.cap() {
            self.ensure(new_cap);
        }
    }

    /// Drops every element, leaving the capacity untouched.
    pub fn clear(&mut self) {
        self.ensure_len(0);
    }
}

impl<T: Clone> Sequence<T> {
    /// Appends clones of all provided items contiguously onto the end of the Sequence. Grows to
    /// the larger of the doubling target and the exact required size, so a single bulk append
    /// can't under-grow.
    ///
    /// # Panics
    /// Panics on capacity overflow.
    ///
    /// # Examples
    /// ```
    /// # use smallstd::collections::contiguous::Sequence;
    /// let mut seq = Sequence::new();
    /// seq.push(1);
    /// seq.push_all(&[2, 3, 4]);
    /// assert_eq!(&*seq, &[1, 2, 3, 4]);
    /// assert_eq!(seq.len(), 4);
    /// ```
    pub fn push_all(&mut self, items: &[T]) {
        let required = self.len.checked_add(items.len()).expect("Capacity overflow!");
        if required > self.cap() {
            self.grow_for(required);
        }

        for item in items {
            // SAFETY: The capacity was just grown to hold every provided item.
            unsafe { self.push_unchecked(item.clone()) }
        }
    }

    /// Inserts clones of all provided items at `index`, shifting the suffix right by
    /// `items.len()`. `index` may be equal to the length.
    ///
    /// # Panics
    /// Panics if the provided index is greater than the length, or on capacity overflow.
    ///
    /// # Examples
    /// ```
    /// # use smallstd::collections::contiguous::Sequence;
    /// let mut seq: Sequence<_> = [1, 2, 6].into_iter().collect();
    /// seq.insert_all(2, &[3, 4, 5]);
    /// assert_eq!(&*seq, &[1, 2, 3, 4, 5, 6]);
    /// ```
    pub fn insert_all(&mut self, index: usize, items: &[T]) {
        assert!(
            index <= self.len,
            "index {} out of bounds for insertion into collection with {} elements",
            index,
            self.len
        );

        let required = self.len.checked_add(items.len()).expect("Capacity overflow!");
        if required > self.cap() {
            self.grow_for(required);
        }

        // SAFETY: The capacity supports the extra items and index <= len keeps the shifted suffix
        // in bounds. The gap is written before the length is increased; if a clone panics, the
        // shifted suffix leaks rather than exposing uninitialized slots.
        unsafe {
            let slot = self.buf.ptr().add(index).as_ptr();
            ptr::copy(slot, slot.add(items.len()), self.len - index);

            for (i, item) in items.iter().enumerate() {
                ptr::write(slot.add(i), item.clone());
            }
        }

        self.len += items.len();
    }
}

impl<T> Sequence<T> {
    /// Grows the Sequence to the larger of the doubling target (with the growth floor) and
    /// `required`, so that bulk operations always end up with enough space in one reallocation.
    pub(crate) fn grow_for(&mut self, required: usize) {
        let doubled = cmp::max(self.cap() * GROWTH_FACTOR, GROWTH_FLOOR);

        self.ensure(cmp::max(doubled, required));
    }

    /// Truncates to `new_len` without touching the capacity.
    pub(crate) fn ensure_len(&mut self, new_len: usize) {
        for i in new_len..self.len {
            // SAFETY: Every index below len is initialized; the length is set afterwards so
            // nothing is dropped twice.
            unsafe {
                ptr::drop_in_place(self.buf.ptr().add(i).as_ptr());
            }
        }
        if new_len < self.len {
            self.len = new_len;
        }
    }

    pub(crate) fn check_index(&self, index: usize) {
        assert!(
            index < self.len,
            "index {} out of bounds for collection with {} elements",
            index,
            self.len
        );
    }
}

impl<T> Extend<T> for Sequence<T> {
    fn extend<A: IntoIterator<Item = T>>(&mut self, iter: A) {
        for item in iter.into_iter() {
            self.push(item);
        }
    }
}

impl<T> FromIterator<T> for Sequence<T> {
    fn from_iter<I: IntoIterator<Item = T>>(value: I) -> Self {
        let iter = value.into_iter();
        let mut seq = Sequence::with_cap(iter.size_hint().0);

        for item in iter {
            seq.push(item);
        }

        seq
    }
}

impl<T> Default for Sequence<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Drop for Sequence<T> {
    fn drop(&mut self) {
        // Drop all initialized values in place; the RawBuf releases the allocation afterwards.
        for i in 0..self.len {
            // SAFETY: Every index below len is initialized and dropped exactly once here.
            unsafe { ptr::drop_in_place(self.buf.ptr().add(i).as_ptr()); }
        }
    }
}

impl<T> Deref for Sequence<T> {
    type Target = [T];

    fn deref(&self) -> &Self::Target {
        // SAFETY: The buffer is valid and properly aligned for cap() elements, of which the first
        // len are initialized. The safe API doesn't leak raw pointers, so the borrow checker
        // prevents mutation for the lifetime of the slice.
        unsafe {
            slice::from_raw_parts(self.buf.ptr().as_ptr(), self.len)
        }
    }
}

impl<T> DerefMut for Sequence<T> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        // SAFETY: As for Deref, with exclusive access guaranteed by the mutable borrow of self.
        unsafe {
            slice::from_raw_parts_mut(self.buf.ptr().as_ptr(), self.len)
        }
    }
}

impl<T> AsRef<[T]> for Sequence<T> {
    fn as_ref(&self) -> &[T] {
        self.deref()
    }
}

impl<T> AsMut<[T]> for Sequence<T> {
    fn as_mut(&mut self) -> &mut [T] {
        self.deref_mut()
    }
}

impl<T> Borrow<[T]> for Sequence<T> {
    fn borrow(&self) -> &[T] {
        self.as_ref()
    }
}

impl<T> BorrowMut<[T]> for Sequence<T> {
    fn borrow_mut(&mut self) -> &mut [T] {
        self.as_mut()
    }
}

impl<T: Clone> Clone for Sequence<T> {
    fn clone(&self) -> Self {
        let mut seq = Self::with_cap(self.cap());

        for value in self.iter() {
            seq.push(value.clone());
        }

        seq
    }
}

impl<T: PartialEq> PartialEq for Sequence<T> {
    fn eq(&self, other: &Self) -> bool {
        **self == **other
    }
}

impl<T: Eq> Eq for Sequence<T> {}

impl<T: Debug> Debug for Sequence<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("Sequence")
            .field("contents", &&**self)
            .field("len", &self.len)
            .field("cap", &self.cap())
            .finish()
    }
}

impl<T: Debug> Display for Sequence<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "!")?;
        f.debug_list().entries(self.iter()).finish()
    }
}

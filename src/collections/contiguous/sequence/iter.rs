use std::iter::FusedIterator;
use std::mem;
use std::ptr;

use super::Sequence;
use crate::collections::contiguous::raw::RawBuf;

impl<T> IntoIterator for Sequence<T> {
    type Item = T;

    type IntoIter = IntoIter<T>;

    fn into_iter(mut self) -> Self::IntoIter {
        // Steal the buffer so that the Sequence's Drop has nothing left to do; the iterator now
        // owns the allocation and the remaining elements.
        let buf = mem::replace(&mut self.buf, RawBuf::new());
        let len = mem::replace(&mut self.len, 0);

        IntoIter {
            buf,
            start: 0,
            end: len,
        }
    }
}

/// An owned iterator over a [`Sequence`], moving each element out of the buffer. Elements that
/// are never yielded are dropped along with the allocation. See [`Sequence::into_iter`].
pub struct IntoIter<T> {
    buf: RawBuf<T>,
    start: usize,
    end: usize,
}

impl<T> Drop for IntoIter<T> {
    fn drop(&mut self) {
        for i in self.start..self.end {
            // SAFETY: start..end always covers exactly the elements that haven't been moved out
            // yet, all of which are initialized and within the allocation.
            unsafe { ptr::drop_in_place(self.buf.ptr().add(i).as_ptr()) }
        }
    }
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        if self.start < self.end {
            // SAFETY: start < end, so the slot is initialized and in bounds. Incrementing start
            // afterwards means the value is moved out exactly once.
            let value = unsafe { self.buf.ptr().add(self.start).read() };
            self.start += 1;
            Some(value)
        } else {
            None
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.end - self.start;
        (remaining, Some(remaining))
    }
}

impl<T> DoubleEndedIterator for IntoIter<T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.start < self.end {
            self.end -= 1;
            // SAFETY: end has just been decremented to an initialized, in-bounds slot which is no
            // longer covered by start..end, so the value is moved out exactly once.
            let value = unsafe { self.buf.ptr().add(self.end).read() };
            Some(value)
        } else {
            None
        }
    }
}

impl<T> FusedIterator for IntoIter<T> {}

impl<T> ExactSizeIterator for IntoIter<T> {
    fn len(&self) -> usize {
        self.end - self.start
    }
}

// Borrowed iteration comes from Deref<Target = [T]>: iter and iter_mut are the slice versions.

use std::slice;

use super::ByteMap;
use super::byte_map::Slot;
use crate::collections::contiguous::Sequence;
use crate::collections::contiguous::sequence::IntoIter as SeqIntoIter;

impl<V> IntoIterator for ByteMap<V> {
    type Item = (Sequence<u8>, V);

    type IntoIter = IntoIter<V>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter {
            len: self.len,
            inner: self.slots.into_iter(),
        }
    }
}

/// An owned iterator over a [`ByteMap`]'s entries, yielding each owned key and value. Empty slots
/// and tombstones are skipped.
pub struct IntoIter<V> {
    pub(crate) inner: SeqIntoIter<Slot<V>>,
    pub(crate) len: usize,
}

impl<V> Iterator for IntoIter<V> {
    type Item = (Sequence<u8>, V);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Slot::Occupied(key, value) = self.inner.next()? {
                self.len -= 1;
                return Some((key, value));
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.len, Some(self.len))
    }
}

impl<'a, V> IntoIterator for &'a ByteMap<V> {
    type Item = (&'a [u8], &'a V);

    type IntoIter = Iter<'a, V>;

    fn into_iter(self) -> Self::IntoIter {
        Iter {
            len: self.len,
            inner: self.slots.iter(),
        }
    }
}

/// A borrowed iterator over a [`ByteMap`]'s entries. Empty slots and tombstones are skipped.
pub struct Iter<'a, V> {
    pub(crate) inner: slice::Iter<'a, Slot<V>>,
    pub(crate) len: usize,
}

impl<'a, V> Iterator for Iter<'a, V> {
    type Item = (&'a [u8], &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Slot::Occupied(key, value) = self.inner.next()? {
                self.len -= 1;
                return Some((&**key, value));
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.len, Some(self.len))
    }
}

impl<'a, V> IntoIterator for &'a mut ByteMap<V> {
    type Item = (&'a [u8], &'a mut V);

    type IntoIter = IterMut<'a, V>;

    fn into_iter(self) -> Self::IntoIter {
        IterMut {
            len: self.len,
            inner: self.slots.iter_mut(),
        }
    }
}

/// A borrowed iterator over a [`ByteMap`]'s entries with mutable access to the values. Keys stay
/// immutable because mutating one would change its hash.
pub struct IterMut<'a, V> {
    pub(crate) inner: slice::IterMut<'a, Slot<V>>,
    pub(crate) len: usize,
}

impl<'a, V> Iterator for IterMut<'a, V> {
    type Item = (&'a [u8], &'a mut V);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Slot::Occupied(key, value) = self.inner.next()? {
                self.len -= 1;
                return Some((&**key, value));
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.len, Some(self.len))
    }
}

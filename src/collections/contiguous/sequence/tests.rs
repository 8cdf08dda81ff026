#![cfg(test)]

use std::iter;

use super::*;
use crate::util::alloc::{CountedDrop, ZeroSizedType};
use crate::util::panic::assert_panics;

#[test]
fn test_push_preserves_prefix() {
    let mut seq = Sequence::new();
    for i in 0..1000_usize {
        seq.push(i + 2);
    }

    assert_eq!(seq.len(), 1000, "Every pushed element should be counted.");
    for i in 0..1000_usize {
        assert_eq!(seq[i], i + 2, "Growth should preserve every element in order.");
    }
}

#[test]
fn test_growth_policy() {
    let mut seq = Sequence::new();
    seq.push(1_u8);
    assert_eq!(
        seq.cap(),
        256,
        "The first growth should jump straight to the floor."
    );

    for i in 0..256 {
        seq.push(i as u8);
    }
    assert_eq!(seq.cap(), 512, "Subsequent growth should double.");
}

#[test]
fn test_push_all() {
    let mut seq = Sequence::new();
    seq.push(1);
    seq.push_all(&[2, 3, 4]);

    assert_eq!(&*seq, &[1, 2, 3, 4]);
    assert_eq!(seq.len(), 4);
}

#[test]
fn test_push_all_grows_to_required() {
    let mut seq: Sequence<usize> = Sequence::new();
    let items: Sequence<usize> = (0..600).collect();

    seq.push_all(&items);
    assert_eq!(
        seq.cap(),
        600,
        "A bulk append larger than the doubling target should grow to the required size."
    );
    assert_eq!(&*seq, &*items);

    seq.push_all(&items);
    assert_eq!(seq.len(), 1200);
    assert!(seq.cap() >= 1200, "Repeated bulk appends should never under-grow.");
}

#[test]
fn test_concat() {
    let mut seq: Sequence<_> = [1, 2, 3].into_iter().collect();
    let other: Sequence<_> = [8, 7, 6].into_iter().collect();

    seq.concat(other);

    assert_eq!(&*seq, &[1, 2, 3, 8, 7, 6]);
    assert_eq!(seq.len(), 6);
}

#[test]
fn test_insert() {
    let mut seq: Sequence<_> = [1, 2, 4].into_iter().collect();
    seq.insert(2, 3);

    assert_eq!(&*seq, &[1, 2, 3, 4]);

    seq.insert(4, 5);
    assert_eq!(
        &*seq,
        &[1, 2, 3, 4, 5],
        "Inserting at the length should behave like a push."
    );
}

#[test]
fn test_insert_all() {
    let mut seq: Sequence<_> = [1, 2, 6].into_iter().collect();
    seq.insert_all(2, &[3, 4, 5]);

    assert_eq!(&*seq, &[1, 2, 3, 4, 5, 6]);
    assert_eq!(seq.len(), 6);
}

#[test]
fn test_insert_remove_round_trip() {
    let original: Sequence<_> = (0..10).collect();
    let mut seq = original.clone();

    seq.insert(4, 100);
    assert_eq!(seq.len(), 11);
    assert_eq!(seq.remove(4), 100);

    assert_eq!(seq, original, "Insert followed by remove should restore the content.");
    assert_eq!(seq.len(), original.len());
}

#[test]
fn test_pop() {
    let mut seq: Sequence<_> = [1, 5, 10].into_iter().collect();

    assert_eq!(seq.pop(), Some(10));
    assert_eq!(seq.len(), 2);
    assert_eq!(seq[seq.len() - 1], 5);

    seq.pop();
    seq.pop();
    assert_eq!(seq.pop(), None, "Popping an empty Sequence should return None.");
    assert_eq!(seq.len(), 0);
}

#[test]
fn test_shift() {
    let mut seq: Sequence<_> = [1, 3, 5, 7].into_iter().collect();

    assert_eq!(seq.shift(), Some(1));
    assert_eq!(&*seq, &[3, 5, 7]);

    let mut empty: Sequence<u8> = Sequence::new();
    assert_eq!(empty.shift(), None);
}

#[test]
fn test_remove() {
    let mut seq: Sequence<_> = [1, 3, 5, 7, 9, 11, 16, 19].into_iter().collect();

    assert_eq!(seq.remove(3), 7);
    assert_eq!(seq.remove(1), 3);

    assert_eq!(seq.len(), 6);
    assert_eq!(&seq[..4], &[1, 5, 9, 11]);
}

#[test]
fn test_remove_n() {
    let mut seq: Sequence<_> = (1..=5).collect();
    seq.remove_n(1, 2);

    assert_eq!(&*seq, &[1, 4, 5]);
    assert_eq!(seq.len(), 3);

    seq.remove_n(0, 0);
    assert_eq!(seq.len(), 3, "Removing zero elements should do nothing.");
}

#[test]
fn test_remove_n_drops() {
    let counter = CountedDrop::new(0);
    let mut seq: Sequence<_> = iter::repeat_with(|| counter.clone()).take(10).collect();

    seq.remove_n(2, 4);

    assert_eq!(counter.take(), 4, "Removed elements should be dropped.");
    assert_eq!(seq.len(), 6);
}

#[test]
fn test_ensure_truncates() {
    let counter = CountedDrop::new(0);
    let mut seq: Sequence<_> = iter::repeat_with(|| counter.clone()).take(4).collect();

    seq.ensure(3);

    assert_eq!(seq.len(), 3, "Shrinking below the length should truncate.");
    assert_eq!(seq.cap(), 3);
    assert_eq!(counter.take(), 1, "The truncated element should be dropped.");

    seq.ensure(10);
    assert_eq!(seq.len(), 3, "Growing should leave the length alone.");
    assert_eq!(seq.cap(), 10);
}

#[test]
fn test_replace() {
    let mut seq: Sequence<_> = [1, 2, 3].into_iter().collect();

    assert_eq!(seq.replace(1, 20), 2);
    assert_eq!(&*seq, &[1, 20, 3]);
}

#[test]
fn test_reserve() {
    let mut seq: Sequence<u8> = Sequence::new();
    seq.reserve(10);
    assert_eq!(seq.cap(), 10);

    seq.push(1);
    seq.reserve(5);
    assert_eq!(seq.cap(), 10, "Reserve should do nothing when capacity suffices.");
}

#[test]
fn test_clear() {
    let counter = CountedDrop::new(0);
    let mut seq: Sequence<_> = iter::repeat_with(|| counter.clone()).take(5).collect();

    seq.clear();

    assert_eq!(seq.len(), 0);
    assert_eq!(seq.cap(), 5, "Clearing should leave the capacity alone.");
    assert_eq!(counter.take(), 5);
}

#[test]
fn test_try_variants() {
    let mut seq: Sequence<_> = [1, 2, 3].into_iter().collect();

    assert!(seq.try_insert(3, 4).is_ok());
    assert_eq!(&*seq, &[1, 2, 3, 4]);

    let err = seq.try_insert(10, 5).expect_err("out of bounds");
    assert!(err.is_index_out_of_bounds());

    assert_eq!(seq.try_remove(3), Ok(4));
    assert_eq!(
        seq.try_remove(3),
        Err(IndexOutOfBounds { index: 3, len: 3 })
    );
}

#[test]
fn test_index_panic_policy() {
    assert_panics!({
        let mut seq: Sequence<_> = (0..3).collect();
        seq.remove(3)
    });

    assert_panics!({
        let mut seq: Sequence<_> = (0..3).collect();
        seq.insert(4, 0)
    });

    assert_panics!({
        let mut seq: Sequence<_> = (0..3).collect();
        seq.remove_n(2, 2)
    });
}

#[test]
fn test_zst_support() {
    let mut seq = Sequence::new();
    for _ in 0..100 {
        seq.push(ZeroSizedType);
    }

    assert_eq!(seq.len(), 100);
    assert_eq!(seq[99], ZeroSizedType);
    assert_eq!(seq.pop(), Some(ZeroSizedType));
    assert_eq!(seq.len(), 99);
}

#[test]
fn test_drop() {
    let counter = CountedDrop::new(0);
    let seq: Sequence<_> = iter::repeat_with(|| counter.clone()).take(10).collect();

    drop(seq);

    assert_eq!(counter.take(), 10, "10 elements should have been dropped.");
}

#[test]
fn test_empty_drop() {
    // Dropping containers that never allocated (or hold nothing) must not fault.
    drop(Sequence::<u8>::new());
    drop(Sequence::<u8>::with_cap(0));
    drop(Sequence::<u8>::with_cap(16));
}

#[test]
fn test_iterators() {
    let mut seq: Sequence<_> = (0_usize..5).collect();

    let total: usize = seq.iter().sum();
    assert_eq!(total, 10);

    for value in seq.iter_mut() {
        *value *= 2;
    }
    assert_eq!(&*seq, &[0, 2, 4, 6, 8]);

    let mut iter = seq.into_iter();
    assert_eq!(iter.next(), Some(0));
    assert_eq!(iter.next_back(), Some(8));
    assert_eq!(iter.next_back(), Some(6));
    assert_eq!(iter.next(), Some(2));
    assert_eq!(iter.len(), 1);
    assert_eq!(iter.next_back(), Some(4));
    assert_eq!(iter.next(), None);
}

#[test]
fn test_into_iter_drops_remainder() {
    let counter = CountedDrop::new(0);
    let seq: Sequence<_> = iter::repeat_with(|| counter.clone()).take(10).collect();

    let mut iter = seq.into_iter();
    drop(iter.next());
    drop(iter.next());
    assert_eq!(counter.take(), 2);

    drop(iter);
    assert_eq!(
        counter.take(),
        8,
        "Dropping a part-consumed owned iterator should drop the remaining elements."
    );
}

#[test]
fn test_equality_and_clone() {
    let seq: Sequence<_> = (0..5).collect();

    assert_eq!(seq, (0..5).collect());
    assert_ne!(seq, (1..6).collect());

    let cloned = seq.clone();
    assert_eq!(seq, cloned);
    assert_eq!(cloned.cap(), seq.cap(), "Clone should preserve the capacity.");
}

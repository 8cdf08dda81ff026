//! A small container toolkit built from scratch: a growable contiguous sequence, an open-addressed
//! map keyed by byte strings, and a string builder layered over the sequence.
//!
//! # Purpose
//! This crate exists because I kept rewriting the same three containers in every project: a
//! dynamic array with explicit capacity control, a flat hash table for byte-string keys, and a
//! byte buffer for assembling text. Writing them once, properly, means the growth policy and the
//! probing protocol get real tests instead of being re-derived (slightly differently) each time.
//!
//! # Method
//! All containers own their storage directly via raw allocations; this crate doesn't use [`Vec`]
//! at all. [`Sequence`](collections::contiguous::Sequence) is the base primitive and everything
//! else composes it: [`ByteMap`](collections::hash::ByteMap) stores its slot array and its owned
//! keys as sequences, and [`StringBuilder`](collections::text::StringBuilder) is a thin
//! specialization over `Sequence<u8>`. Applicable types implement
//! [`Deref<Target = [T]>`](std::ops::Deref) (and `DerefMut`), which saves writing the more
//! repetitive slice-shaped functionality.
//!
//! # Error Handling
//! Containers shouldn't force callers to handle an error on every push, so the primary API panics
//! on programmer errors (out-of-bounds indices, capacity overflow) with the conditions documented
//! under `# Panics`. Where a failure is a legitimate runtime outcome - a fixed-capacity table
//! running out of slots, or a caller preferring results over panics - there is a strongly typed
//! error implementing [`Error`](std::error::Error), combined into enums with static dispatch
//! rather than boxed trait objects. Allocation failure is fatal and routed through
//! [`handle_alloc_error`](std::alloc::handle_alloc_error); no partially initialized container can
//! escape.
//!
//! # Concurrency
//! Everything here is single-threaded and synchronous. There is no internal locking; `Send` and
//! `Sync` are implemented exactly where the element types allow them and external mutual
//! exclusion is the caller's job beyond that.

#![warn(clippy::missing_safety_doc)]
#![warn(clippy::undocumented_unsafe_blocks)]
#![warn(clippy::missing_panics_doc)]
#![warn(clippy::unwrap_used)]
#![allow(clippy::module_inception)]

#[cfg(feature = "collections")]
pub mod collections;

pub(crate) mod util;

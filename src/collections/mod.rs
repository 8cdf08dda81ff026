//! The container types themselves.
//!
//! # Layout
//! Each family of containers lives in its own submodule: [`contiguous`] for the growable
//! [`Sequence`](contiguous::Sequence), [`hash`] for the open-addressed
//! [`ByteMap`](hash::ByteMap) and [`text`] for [`StringBuilder`](text::StringBuilder). The map
//! and the string builder are both built on top of the sequence, so their features pull
//! `contiguous` in.

#[cfg(feature = "contiguous")]
pub mod contiguous;
#[cfg(feature = "hash")]
pub mod hash;
#[cfg(feature = "text")]
pub mod text;

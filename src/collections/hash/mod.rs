//! Hash-based collection types, keyed by byte strings.
#![warn(missing_docs)]

pub mod map;

#[doc(inline)]
pub use map::ByteMap;

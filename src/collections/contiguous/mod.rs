//! Contiguous collection types. Namely [`Sequence`], a growable contiguous buffer with explicit
//! length and capacity tracking, and the raw allocation primitive it is built on.
#![warn(missing_docs)]

pub(crate) mod raw;
pub mod sequence;

#[doc(inline)]
pub use sequence::Sequence;

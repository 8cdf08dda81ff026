//! Text assembly types. Namely [`StringBuilder`], a growable byte buffer for building strings,
//! layered directly over [`Sequence<u8>`](crate::collections::contiguous::Sequence).
#![warn(missing_docs)]

mod string_builder;
mod tests;

pub use string_builder::*;

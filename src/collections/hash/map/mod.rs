//! A module containing [`ByteMap`] and associated types: the borrowed and owned iterators, the
//! [`TableFull`] error for fixed-capacity insertion and the [`hash_bytes`] function the map
//! probes with.
//!
//! [`ByteMap`] is also re-exported under the parent module.

mod byte_map;
mod error;
mod iter;

pub use byte_map::*;
pub use error::*;
pub use iter::*;

//! A module containing [`Sequence`] and associated types.
//!
//! The other included types are [`IntoIter`] for owned iteration over a Sequence and the typed
//! errors returned by the fallible mutation methods.
//! [`Iter`](std::slice::Iter) and [`IterMut`](std::slice::IterMut) from [`std::slice`] are used
//! for borrowed iteration.
//!
//! [`Sequence`] is also re-exported under the parent module.

mod error;
mod iter;
mod sequence;
mod tests;

pub use error::*;
pub use iter::*;
pub use sequence::*;

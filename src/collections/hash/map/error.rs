use std::error::Error;
use std::fmt::{self, Display, Formatter};

/// A fixed-capacity insertion probed every slot without finding one to write to. The entry was
/// not inserted; the table is unchanged.
#[derive(Debug, PartialEq, Eq)]
pub struct TableFull {
    /// The capacity of the table at the time of the failed insertion.
    pub cap: usize,
}

impl Display for TableFull {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "No free slot for insertion into table with capacity {}!", self.cap)
    }
}

impl Error for TableFull {}

use std::fmt::{self, Debug, Formatter};

/// Wraps a pre-rendered string so that Debug formatting emits it verbatim, without quoting.
/// Useful for building composite Debug output from formatted fragments.
pub struct DebugRaw(pub String);

impl Debug for DebugRaw {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

use std::fmt::{self, Debug, Display, Formatter, Write};
use std::ops::Deref;
use std::str::{self, Utf8Error};

use crate::collections::contiguous::Sequence;

/// A growable buffer of bytes for assembling text, specialized over [`Sequence<u8>`].
///
/// A StringBuilder adds no invariants of its own: it inherits the sequence's growth policy and
/// stores whatever bytes the caller pushes, UTF-8 or not. Callers producing conventionally
/// NUL-terminated text append the terminator explicitly with
/// [`push_nul`](StringBuilder::push_nul).
///
/// Implements [`fmt::Write`], so `write!` can format straight into the buffer.
///
/// # Examples
/// ```
/// # use smallstd::collections::text::StringBuilder;
/// let mut sb = StringBuilder::new();
/// sb.push_str("hello ");
/// sb.push_str("world!");
/// assert_eq!(sb.as_str(), Ok("hello world!"));
/// ```
#[derive(Default, Clone, PartialEq, Eq)]
pub struct StringBuilder {
    bytes: Sequence<u8>,
}

impl StringBuilder {
    /// Creates a new empty StringBuilder with capacity 0.
    pub const fn new() -> StringBuilder {
        StringBuilder {
            bytes: Sequence::new(),
        }
    }

    /// Creates a new StringBuilder with capacity exactly equal to the provided value.
    ///
    /// # Panics
    /// Panics if the memory layout size would exceed [`isize::MAX`].
    pub fn with_cap(cap: usize) -> StringBuilder {
        StringBuilder {
            bytes: Sequence::with_cap(cap),
        }
    }

    /// Returns the length of the buffer in bytes.
    pub const fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Returns true if the buffer contains no bytes.
    pub const fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Returns the current capacity of the buffer in bytes.
    pub const fn cap(&self) -> usize {
        self.bytes.cap()
    }

    /// Appends a single byte.
    pub fn push(&mut self, byte: u8) {
        self.bytes.push(byte);
    }

    /// Appends a character, encoded as UTF-8.
    pub fn push_char(&mut self, c: char) {
        let mut encoded = [0; 4];
        self.bytes.push_all(c.encode_utf8(&mut encoded).as_bytes());
    }

    /// Appends the bytes of a string slice.
    ///
    /// # Examples
    /// ```
    /// # use smallstd::collections::text::StringBuilder;
    /// let mut sb = StringBuilder::new();
    /// sb.push_str("test");
    /// assert_eq!(&*sb, b"test");
    /// ```
    pub fn push_str(&mut self, s: &str) {
        self.bytes.push_all(s.as_bytes());
    }

    /// Appends raw bytes.
    pub fn push_bytes(&mut self, bytes: &[u8]) {
        self.bytes.push_all(bytes);
    }

    /// Appends a NUL byte, for producing conventionally-terminated text.
    pub fn push_nul(&mut self) {
        self.bytes.push(0);
    }

    /// Inserts a single byte at `index`.
    ///
    /// # Panics
    /// Panics if the provided index is greater than the length.
    pub fn insert(&mut self, index: usize, byte: u8) {
        self.bytes.insert(index, byte);
    }

    /// Inserts the bytes of a string slice at `index`, shifting the suffix right.
    ///
    /// # Panics
    /// Panics if the provided index is greater than the length.
    ///
    /// # Examples
    /// ```
    /// # use smallstd::collections::text::StringBuilder;
    /// let mut sb = StringBuilder::from("hlo");
    /// sb.insert_str(1, "el");
    /// assert_eq!(sb.as_str(), Ok("hello"));
    /// ```
    pub fn insert_str(&mut self, index: usize, s: &str) {
        self.bytes.insert_all(index, s.as_bytes());
    }

    /// Appends the contents of `other`, consuming it.
    pub fn concat(&mut self, other: StringBuilder) {
        self.bytes.concat(other.bytes);
    }

    /// Drops every byte, leaving the capacity untouched.
    pub fn clear(&mut self) {
        self.bytes.clear();
    }

    /// Returns the buffer's contents as a byte slice.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Returns the buffer's contents as a string slice, if they are valid UTF-8.
    ///
    /// # Errors
    /// Returns the underlying [`Utf8Error`] otherwise.
    pub fn as_str(&self) -> Result<&str, Utf8Error> {
        str::from_utf8(&self.bytes)
    }

    /// Consumes the builder, returning the underlying byte sequence.
    pub fn into_bytes(self) -> Sequence<u8> {
        self.bytes
    }
}

impl Write for StringBuilder {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.push_str(s);
        Ok(())
    }

    fn write_char(&mut self, c: char) -> fmt::Result {
        self.push_char(c);
        Ok(())
    }
}

impl Deref for StringBuilder {
    type Target = [u8];

    fn deref(&self) -> &Self::Target {
        &self.bytes
    }
}

impl AsRef<[u8]> for StringBuilder {
    fn as_ref(&self) -> &[u8] {
        self
    }
}

impl From<&str> for StringBuilder {
    fn from(value: &str) -> Self {
        let mut sb = StringBuilder::with_cap(value.len());
        sb.push_str(value);
        sb
    }
}

impl Extend<char> for StringBuilder {
    fn extend<I: IntoIterator<Item = char>>(&mut self, iter: I) {
        for c in iter.into_iter() {
            self.push_char(c);
        }
    }
}

impl FromIterator<char> for StringBuilder {
    fn from_iter<I: IntoIterator<Item = char>>(iter: I) -> Self {
        let mut sb = StringBuilder::new();
        sb.extend(iter);
        sb
    }
}

impl Debug for StringBuilder {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("StringBuilder")
            .field("contents", &String::from_utf8_lossy(&self.bytes))
            .field("len", &self.len())
            .field("cap", &self.cap())
            .finish()
    }
}

impl Display for StringBuilder {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", String::from_utf8_lossy(&self.bytes))
    }
}

//! Borrowed byte-string views.

use std::fmt;

/// A `(pointer, length)` view of byte-string data.
///
/// `Str` owns nothing: it borrows whatever buffer produced it — typically
/// arena memory resolved through a handle, or a literal. Equality is by
/// content. The data is not required to be UTF-8; [`fmt::Display`] renders
/// it lossily.
///
/// ```
/// use ferrite_io::Str;
///
/// let s = Str::from("Hello");
/// assert_eq!(s.len(), 5);
/// assert_eq!(s, Str::new(b"Hello"));
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct Str<'a> {
    bytes: &'a [u8],
}

impl<'a> Str<'a> {
    /// Wrap a byte slice.
    pub fn new(bytes: &'a [u8]) -> Self {
        Self { bytes }
    }

    /// The underlying bytes.
    pub fn as_bytes(&self) -> &'a [u8] {
        self.bytes
    }

    /// Length in bytes.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Whether the view is zero-length.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

impl<'a> From<&'a str> for Str<'a> {
    fn from(s: &'a str) -> Self {
        Self::new(s.as_bytes())
    }
}

impl<'a> From<&'a [u8]> for Str<'a> {
    fn from(bytes: &'a [u8]) -> Self {
        Self::new(bytes)
    }
}

impl fmt::Display for Str<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", String::from_utf8_lossy(self.bytes))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equality_is_by_content() {
        let owned = b"abc".to_vec();
        assert_eq!(Str::new(&owned), Str::from("abc"));
        assert_ne!(Str::from("abc"), Str::from("abd"));
        assert_ne!(Str::from("abc"), Str::from("ab"));
    }

    #[test]
    fn empty_view() {
        let s = Str::new(b"");
        assert!(s.is_empty());
        assert_eq!(s.len(), 0);
    }

    #[test]
    fn display_is_lossy() {
        let s = Str::new(&[0x66, 0xFF, 0x6F]);
        assert_eq!(s.to_string(), "f\u{FFFD}o");
    }
}

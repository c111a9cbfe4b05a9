//! Byte-to-character translation collaborator.
//!
//! Legacy single-byte encodings are supplied to the decode session as a
//! [`Charset`] trait object rather than owned by the core. When no
//! charset is injected the session reads its input as UTF-8; when one is
//! present every printable byte maps one-to-one through
//! [`Charset::decode`]. [`Latin1`] is the reference implementation.

/// Maps a single input byte to the display character it encodes.
pub trait Charset {
    /// Translate one byte into its display character.
    fn decode(&self, byte: u8) -> char;
}

/// ISO-8859-1 (Latin-1): each byte maps directly to the Unicode code
/// point of the same value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Latin1;

impl Charset for Latin1 {
    fn decode(&self, byte: u8) -> char {
        char::from(byte)
    }
}

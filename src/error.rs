//! Error taxonomy and `Result` alias for the decode session.
//!
//! A single `thiserror` enum covers every anomaly the parser can raise
//! (§7 of the spec). In permissive mode these are logged and skipped; in
//! strict mode the named variant is surfaced and the session aborts.
//! `Io` is fatal in both modes.

use std::io;

/// Decode session error.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The byte following `ESC` was not a recognized introducer.
    #[error("unknown escape sequence: ESC {0:#04x}")]
    UnknownEscape(u8),

    /// An empty parameter appeared between separators.
    #[error("missing parameter")]
    MissingParam,

    /// Wrong parameter count or unsupported value for a command.
    #[error("parameter count for {command}: expected {expected}")]
    ParamCount {
        /// The two/three-letter command mnemonic (e.g. `"CUU"`).
        command: &'static str,
        /// Human-readable description of the accepted count(s).
        expected: &'static str,
    },

    /// An unknown CSI final byte.
    #[error("unknown CSI final byte: {0:?}")]
    UnknownCsi(char),

    /// An unhandled non-printable control byte in ground state.
    #[error("unknown control byte: {0:#04x}")]
    UnknownControl(u8),

    /// A read failure; always fatal.
    #[error("io error: {0}")]
    Io(#[from] io::Error),
}

/// Convenience alias for results carrying a decode [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

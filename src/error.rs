//! Error types for Adiantum and HPolyC operations.

use core::fmt;

/// Result type alias for this crate.
pub type Result<T> = core::result::Result<T, Error>;

/// Errors that can occur while building or using a cipher instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// Invalid master key length (must be 32 bytes).
    InvalidKeyLength,

    /// Invalid ChaCha round count (must be 8, 12 or 20).
    InvalidRounds,

    /// Input is shorter than the 16-byte minimum.
    InputTooShort,

    /// Input is longer than the stream cipher can cover with one nonce.
    InputTooLong,

    /// Tweak is too long for the 32-bit bit-length header.
    TweakTooLong,

    /// Stream cipher nonce does not leave room for the domain separator.
    InvalidNonceLength,

    /// NH message length is not a multiple of 16 bytes.
    InvalidMessageLength,

    /// NH key is shorter than the message plus 48 bytes.
    KeyTooShort,

    /// The requested NH backend is not supported by this CPU.
    BackendUnavailable,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidKeyLength => write!(f, "invalid key length (must be 32 bytes)"),
            Error::InvalidRounds => write!(f, "invalid round count (must be 8, 12 or 20)"),
            Error::InputTooShort => write!(f, "input too short (minimum 16 bytes)"),
            Error::InputTooLong => write!(f, "input too long for the keystream"),
            Error::TweakTooLong => write!(f, "tweak too long"),
            Error::InvalidNonceLength => {
                write!(f, "invalid nonce length (maximum 23 bytes)")
            }
            Error::InvalidMessageLength => {
                write!(f, "NH message length must be a multiple of 16 bytes")
            }
            Error::KeyTooShort => write!(f, "NH key must be at least 48 bytes longer than the message"),
            Error::BackendUnavailable => write!(f, "NH backend not supported on this CPU"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

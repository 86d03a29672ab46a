//! Crate-wide error type.
//!
//! List exhaustion is *not* represented here: running out of list budget
//! without finding a tail-biting, CRC-valid path is an expected outcome of
//! `decode`, carried on `MessageInformation::list_size_exceeded` rather than
//! surfaced as an `Err`.

use thiserror::Error;

/// Standard result using [`DecodeError`].
pub type Result<T> = std::result::Result<T, DecodeError>;

/// Errors that can occur while building a trellis, decoding a received
/// vector, or loading a run configuration.
#[derive(Error, Debug)]
pub enum DecodeError {
    /// The code parameters given to [`crate::trellis::Trellis::build`] can't
    /// describe a valid feed-forward convolutional code.
    #[error("invalid code: {0}")]
    InvalidCode(&'static str),

    /// The received vector or puncturing set handed to `decode` is
    /// malformed.
    #[error("malformed input: {0}")]
    MalformedInput(&'static str),

    /// A run configuration file failed to parse or failed structural
    /// validation.
    #[error("invalid configuration: {0}")]
    Config(String),
}

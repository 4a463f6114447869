//! Error types shared by every stage of the encode/decode pipeline.

use thiserror::Error;

/// The crate-wide result alias used by the public `encode`/`decode` surface.
pub type Result<T> = std::result::Result<T, Error>;

/// Everything that can go wrong while encoding or decoding geometry.
///
/// Every variant here corresponds to exactly one failure kind from the
/// codec's error table; none of them ever terminate the process and no
/// panic is allowed to escape `encode`/`decode`.
#[derive(Debug, Error)]
pub enum Error {
    /// Null/empty geometry, or an option value out of its documented range.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// The bitstream's header names a bitstream version newer than this
    /// implementation understands.
    #[error("unsupported bitstream version {major}.{minor}")]
    UnsupportedVersion { major: u8, minor: u8 },

    /// A flag in the header requests a feature this build does not implement.
    #[error("unsupported feature: {0}")]
    UnsupportedFeature(String),

    /// The bitstream is structurally invalid: a frequency table that
    /// doesn't sum to its frame size, a symbol outside its alphabet, an
    /// index out of range, or any other internal-consistency violation
    /// discovered while parsing.
    #[error("corrupt bitstream: {0}")]
    CorruptBitstream(String),

    /// A decoder buffer was asked to read past the data it was given.
    #[error("buffer underflow: {0}")]
    BufferUnderflow(String),

    /// A mesh submitted to the EdgeBreaker codec has an edge shared by more
    /// than two corners.
    #[error("non-manifold mesh: {0}")]
    NonManifold(String),

    /// An internal invariant was violated; indicates a bug in this crate
    /// rather than a malformed input.
    #[error("internal error: {0}")]
    Internal(String),
}

impl Error {
    pub(crate) fn internal(msg: impl Into<String>) -> Self {
        Error::Internal(msg.into())
    }

    pub(crate) fn corrupt(msg: impl Into<String>) -> Self {
        Error::CorruptBitstream(msg.into())
    }

    pub(crate) fn underflow(msg: impl Into<String>) -> Self {
        Error::BufferUnderflow(msg.into())
    }
}

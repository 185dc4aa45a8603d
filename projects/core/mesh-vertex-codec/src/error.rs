//! Error types for vertex buffer decoding.

use thiserror::Error;

/// Errors that can occur while decoding a compressed vertex buffer.
///
/// Every error is immediately fatal to the decode call; no partial output
/// is produced. Use [`DecodeError::kind`] to distinguish caller-contract
/// violations from malformed input data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// The vertex size is out of range or not a multiple of 4.
    #[error("Invalid vertex size: {0}. Size must be a multiple of 4 between 4 and 256.")]
    InvalidVertexSize(usize),

    /// A block decode was requested for a vertex count outside `1..=256`.
    #[error("Invalid block vertex count: {0}. Count must be between 1 and 256.")]
    InvalidBlockVertexCount(usize),

    /// The output buffer is too small for the decoded vertex data.
    #[error("Output buffer too small: need {needed} bytes, but only {actual} bytes available.")]
    OutputBufferTooSmall {
        /// The required size in bytes
        needed: usize,
        /// The actual size in bytes
        actual: usize,
    },

    /// The input buffer is shorter than the format tag plus the trailing
    /// last-vertex snapshot.
    #[error("Vertex buffer too short: need at least {needed} bytes, got {actual}.")]
    BufferTooShort {
        /// The minimum length for this vertex size
        needed: usize,
        /// The actual input length
        actual: usize,
    },

    /// The first byte of the input did not match the expected format tag.
    #[error("Invalid vertex buffer header: expected {expected:#04x}, got {actual:#04x}.")]
    WrongHeader {
        /// The expected format tag
        expected: u8,
        /// The tag byte found in the input
        actual: u8,
    },

    /// The compressed data ran out mid-stream (tail safety margin violated
    /// while decoding a byte group, or a plane header past the end).
    #[error("Compressed vertex data is truncated.")]
    TruncatedStream,
}

/// Coarse classification of a [`DecodeError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The caller violated the API contract; the input data was never the
    /// problem.
    InvalidArgument,
    /// The input data is malformed or truncated.
    CorruptStream,
}

impl DecodeError {
    /// Returns whether this error is a caller-contract violation or a sign
    /// of corrupt input data.
    pub fn kind(&self) -> ErrorKind {
        match self {
            DecodeError::InvalidVertexSize(_)
            | DecodeError::InvalidBlockVertexCount(_)
            | DecodeError::OutputBufferTooSmall { .. } => ErrorKind::InvalidArgument,
            DecodeError::BufferTooShort { .. }
            | DecodeError::WrongHeader { .. }
            | DecodeError::TruncatedStream => ErrorKind::CorruptStream,
        }
    }
}

//! Error types for vertex buffer decode operations.

use mesh_vertex_codec::{DecodeError, ErrorKind};
use thiserror::Error;

/// Errors that can occur during vertex buffer decode operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum VertexCodecError {
    /// The decode failed; see the wrapped [`DecodeError`] for the cause.
    #[error(transparent)]
    Decode(#[from] DecodeError),

    /// `vertex_count * vertex_size` does not fit in memory.
    #[error("Decoded size overflow: {vertex_count} vertices of {vertex_size} bytes.")]
    DecodedSizeOverflow {
        /// The requested vertex count
        vertex_count: usize,
        /// The requested vertex stride
        vertex_size: usize,
    },
}

impl VertexCodecError {
    /// Returns whether this error is a caller-contract violation or a sign
    /// of corrupt input data.
    pub fn kind(&self) -> ErrorKind {
        match self {
            VertexCodecError::Decode(e) => e.kind(),
            VertexCodecError::DecodedSizeOverflow { .. } => ErrorKind::InvalidArgument,
        }
    }
}

#![doc = include_str!(concat!("../", core::env!("CARGO_PKG_README")))]
#![cfg_attr(not(feature = "std"), no_std)]
#![warn(missing_docs)]

extern crate alloc;

// Module declarations
pub mod decode;
pub mod error;

// Re-export main functionality at crate root
pub use decode::{decode_vertex_buffer, decode_vertex_buffer_into};
pub use error::VertexCodecError;

// Re-export the low-level error classification for callers that want to
// distinguish bad arguments from corrupt data.
pub use mesh_vertex_codec::{DecodeError, ErrorKind};

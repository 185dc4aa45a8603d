//! Safe decode operations (slice-based and allocating wrappers).
//!
//! Note: the allocating variant zero-initializes its output before
//! decoding over it. For repeated decodes into a reusable buffer prefer
//! [`decode_vertex_buffer_into`].

use crate::error::VertexCodecError;
use alloc::vec;
use alloc::vec::Vec;

/// Decodes a compressed vertex buffer into a freshly allocated `Vec`.
///
/// # Parameters
///
/// - `vertex_count`: Number of vertices to produce (from the surrounding
///   mesh container)
/// - `vertex_size`: Stride in bytes; a multiple of 4 between 4 and 256
/// - `input`: The compressed blob as stored in the resource container
///
/// # Returns
///
/// `vertex_count * vertex_size` bytes of row-major vertex data.
///
/// # Errors
///
/// Any [`mesh_vertex_codec::DecodeError`] from the underlying decode, or
/// [`VertexCodecError::DecodedSizeOverflow`] if the output size does not
/// fit in `usize`. Errors mean the vertex data is unusable; there is no
/// partial output.
///
/// # Examples
///
/// ```
/// use mesh_vertex_codec_api::decode_vertex_buffer;
/// # use mesh_vertex_codec_api::VertexCodecError;
///
/// # fn main() -> Result<(), VertexCodecError> {
/// // 16 four-byte vertices, all deltas zero, trailing snapshot zero.
/// let mut blob = vec![0xa0u8];
/// blob.extend_from_slice(&[0u8; 40]); // plane headers + tail + snapshot
///
/// let vertices = decode_vertex_buffer(16, 4, &blob)?;
/// assert_eq!(vertices, vec![0u8; 64]);
/// # Ok(())
/// # }
/// ```
pub fn decode_vertex_buffer(
    vertex_count: usize,
    vertex_size: usize,
    input: &[u8],
) -> Result<Vec<u8>, VertexCodecError> {
    let needed = vertex_count.checked_mul(vertex_size).ok_or(
        VertexCodecError::DecodedSizeOverflow {
            vertex_count,
            vertex_size,
        },
    )?;

    let mut output = vec![0u8; needed];
    decode_vertex_buffer_into(&mut output, vertex_count, vertex_size, input)?;

    Ok(output)
}

/// Decodes a compressed vertex buffer into a caller-supplied buffer.
///
/// `output` must hold at least `vertex_count * vertex_size` bytes; the
/// decoded vertices are written row-major at the start of the slice.
///
/// # Errors
///
/// Any [`mesh_vertex_codec::DecodeError`] from the underlying decode.
pub fn decode_vertex_buffer_into(
    output: &mut [u8],
    vertex_count: usize,
    vertex_size: usize,
    input: &[u8],
) -> Result<(), VertexCodecError> {
    mesh_vertex_codec::decode_vertex_buffer_into(output, vertex_count, vertex_size, input)?;
    Ok(())
}

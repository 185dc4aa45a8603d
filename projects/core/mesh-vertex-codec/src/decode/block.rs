//! Decoding of a single vertex block.
//!
//! A block holds up to [`VERTEX_BLOCK_MAX_SIZE`] vertices. Within a block
//! the data is stored column-major: for each byte offset `k` of the vertex
//! stride, one byte plane carries that byte of every vertex in the block,
//! as zig-zag encoded deltas against the previous vertex.

use super::groups;
use super::{unzigzag8, BYTE_GROUP_SIZE, VERTEX_BLOCK_MAX_SIZE, VERTEX_BLOCK_SIZE_BYTES};
use crate::error::DecodeError;
use likely_stable::unlikely;

/// Decodes one block of `vertex_count` vertices and returns the remaining
/// compressed data.
///
/// `vertex_data` receives `vertex_count * vertex_size` bytes of row-major
/// vertex data at its start. `last_vertex` supplies the delta predictor
/// for the block's first vertex and is updated to the block's final
/// vertex, so consecutive blocks chain their deltas.
///
/// # Errors
///
/// - [`DecodeError::InvalidBlockVertexCount`] if `vertex_count` is outside
///   `1..=256` (a caller-contract violation, not stream corruption)
/// - [`DecodeError::TruncatedStream`] if the compressed data runs out
pub(crate) fn decode_vertex_block<'a>(
    mut data: &'a [u8],
    vertex_data: &mut [u8],
    vertex_count: usize,
    vertex_size: usize,
    last_vertex: &mut [u8],
) -> Result<&'a [u8], DecodeError> {
    if unlikely(vertex_count == 0 || vertex_count > VERTEX_BLOCK_MAX_SIZE) {
        return Err(DecodeError::InvalidBlockVertexCount(vertex_count));
    }

    debug_assert_eq!(last_vertex.len(), vertex_size);

    // Scratch space is call-scoped; 8.25 KiB of stack keeps the decoder
    // free of allocator traffic and global state.
    let mut buffer = [0u8; VERTEX_BLOCK_MAX_SIZE];
    let mut transposed = [0u8; VERTEX_BLOCK_SIZE_BYTES];

    let vertex_count_aligned = (vertex_count + BYTE_GROUP_SIZE - 1) & !(BYTE_GROUP_SIZE - 1);

    for k in 0..vertex_size {
        data = groups::decode_bytes(data, &mut buffer[..vertex_count_aligned])?;

        let mut vertex_offset = k;
        let mut p = last_vertex[k];

        for &delta in &buffer[..vertex_count] {
            let v = unzigzag8(delta).wrapping_add(p);

            transposed[vertex_offset] = v;
            p = v;

            vertex_offset += vertex_size;
        }
    }

    let decoded_len = vertex_count * vertex_size;
    vertex_data[..decoded_len].copy_from_slice(&transposed[..decoded_len]);

    last_vertex.copy_from_slice(&transposed[decoded_len - vertex_size..decoded_len]);

    Ok(data)
}

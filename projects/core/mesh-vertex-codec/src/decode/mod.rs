//! Decoding of compressed vertex buffers.
//!
//! Layout of an encoded buffer: a 1-byte format tag ([`VERTEX_HEADER`]),
//! block-encoded segments, and a trailing snapshot of the final vertex
//! (`vertex_size` bytes at the very end of the buffer) which primes the
//! delta predictor before the first block is decoded.

mod block;
mod groups;

use crate::error::DecodeError;

/// Format tag expected as the first byte of every encoded vertex buffer.
pub const VERTEX_HEADER: u8 = 0xa0;

/// Upper bound on the working-set bytes decoded per block.
pub const VERTEX_BLOCK_SIZE_BYTES: usize = 8192;

/// Maximum number of vertices decoded in one block.
pub const VERTEX_BLOCK_MAX_SIZE: usize = 256;

/// Number of bytes decoded per bit-width selector.
pub const BYTE_GROUP_SIZE: usize = 16;

/// Worst-case encoded size of a single byte group (8 packed selector
/// bytes plus 16 overflow bytes).
pub(crate) const BYTE_GROUP_DECODE_LIMIT: usize = 24;

/// Safety margin the format requires at the end of the compressed data;
/// allows the vectorized path a bounded overread. The scalar path
/// enforces the same margin so both paths accept identical inputs.
pub(crate) const TAIL_MAX_SIZE: usize = 32;

/// Number of vertices per block for the given vertex stride.
///
/// Larger vertices get smaller blocks so that one block's working set
/// stays within [`VERTEX_BLOCK_SIZE_BYTES`]; the result is rounded down
/// to a multiple of [`BYTE_GROUP_SIZE`] and capped at
/// [`VERTEX_BLOCK_MAX_SIZE`].
pub(crate) fn vertex_block_size(vertex_size: usize) -> usize {
    let result = (VERTEX_BLOCK_SIZE_BYTES / vertex_size) & !(BYTE_GROUP_SIZE - 1);
    result.min(VERTEX_BLOCK_MAX_SIZE)
}

/// Reverses zig-zag encoding of a single byte, modulo 256.
///
/// Maps `0, 1, 2, 3, ...` back to `0, -1, 1, -2, ...` as wrapping u8
/// arithmetic.
#[inline]
pub(crate) fn unzigzag8(v: u8) -> u8 {
    (v & 1).wrapping_neg() ^ (v >> 1)
}

/// Decodes a compressed vertex buffer into `output`.
///
/// `output` must hold at least `vertex_count * vertex_size` bytes; the
/// decoded vertices are written row-major (vertex-by-vertex) at the start
/// of the slice.
///
/// The call is deterministic and touches no global state, so independent
/// buffers can be decoded concurrently from multiple threads.
///
/// # Parameters
///
/// - `output`: Destination for the decoded vertex data
/// - `vertex_count`: Number of vertices to produce
/// - `vertex_size`: Stride in bytes; a multiple of 4 between 4 and 256
/// - `input`: The encoded buffer, starting with the format tag
///
/// # Errors
///
/// - [`DecodeError::InvalidVertexSize`] if `vertex_size` is out of range
///   or not a multiple of 4
/// - [`DecodeError::OutputBufferTooSmall`] if `output` cannot hold the
///   decoded data
/// - [`DecodeError::BufferTooShort`] if `input` is shorter than the tag
///   plus the trailing last-vertex snapshot
/// - [`DecodeError::WrongHeader`] if the format tag does not match
/// - [`DecodeError::TruncatedStream`] if the compressed data runs out
///   mid-stream
pub fn decode_vertex_buffer_into(
    output: &mut [u8],
    vertex_count: usize,
    vertex_size: usize,
    input: &[u8],
) -> Result<(), DecodeError> {
    if vertex_size == 0 || vertex_size > 256 || vertex_size % 4 != 0 {
        return Err(DecodeError::InvalidVertexSize(vertex_size));
    }

    // A decoded size past usize::MAX cannot fit in any buffer.
    let needed = match vertex_count.checked_mul(vertex_size) {
        Some(needed) => needed,
        None => {
            return Err(DecodeError::OutputBufferTooSmall {
                needed: usize::MAX,
                actual: output.len(),
            })
        }
    };
    if output.len() < needed {
        return Err(DecodeError::OutputBufferTooSmall {
            needed,
            actual: output.len(),
        });
    }

    if input.len() < 1 + vertex_size {
        return Err(DecodeError::BufferTooShort {
            needed: 1 + vertex_size,
            actual: input.len(),
        });
    }

    let header = input[0];
    if header != VERTEX_HEADER {
        return Err(DecodeError::WrongHeader {
            expected: VERTEX_HEADER,
            actual: header,
        });
    }

    // The trailing snapshot is an independent view over the end of the
    // buffer; the block cursor below never consumes it explicitly.
    let mut last_vertex = [0u8; VERTEX_BLOCK_MAX_SIZE];
    last_vertex[..vertex_size].copy_from_slice(&input[input.len() - vertex_size..]);

    let block_size = vertex_block_size(vertex_size);

    let mut data = &input[1..];
    let mut vertex_offset = 0;

    while vertex_offset < vertex_count {
        let block_count = block_size.min(vertex_count - vertex_offset);

        data = block::decode_vertex_block(
            data,
            &mut output[vertex_offset * vertex_size..],
            block_count,
            vertex_size,
            &mut last_vertex[..vertex_size],
        )?;

        vertex_offset += block_count;
    }

    Ok(())
}

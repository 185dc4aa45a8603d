//! Portable scalar byte group decoding.

use crate::decode::{BYTE_GROUP_SIZE, TAIL_MAX_SIZE};
use crate::error::DecodeError;
use likely_stable::unlikely;

/// Decodes one 16-byte group from `data` and returns the number of bytes
/// consumed.
///
/// Packed codes are read most-significant bits first; a code of all ones
/// escapes to the overflow byte stream positioned right after the packed
/// selector bytes.
///
/// `data` must hold at least [`TAIL_MAX_SIZE`] bytes (the worst case group
/// consumes 24), `destination` exactly 16.
pub(crate) fn decode_bytes_group(data: &[u8], destination: &mut [u8], bitslog2: u8) -> usize {
    debug_assert!(data.len() >= TAIL_MAX_SIZE);
    debug_assert_eq!(destination.len(), BYTE_GROUP_SIZE);

    match bitslog2 {
        0 => {
            destination.fill(0);
            0
        }
        1 => {
            // 16 two-bit codes in 4 packed bytes; code 3 spills to the
            // overflow stream at data[4..].
            let mut overflow = 4;
            for k in 0..4 {
                let mut b = data[k];
                for j in 0..4 {
                    let enc = b >> 6;
                    b <<= 2;

                    destination[k * 4 + j] = if enc == 3 {
                        let v = data[overflow];
                        overflow += 1;
                        v
                    } else {
                        enc
                    };
                }
            }
            overflow
        }
        2 => {
            // 16 four-bit codes in 8 packed bytes; code 15 escapes.
            let mut overflow = 8;
            for k in 0..8 {
                let mut b = data[k];
                for j in 0..2 {
                    let enc = b >> 4;
                    b <<= 4;

                    destination[k * 2 + j] = if enc == 15 {
                        let v = data[overflow];
                        overflow += 1;
                        v
                    } else {
                        enc
                    };
                }
            }
            overflow
        }
        _ => {
            destination.copy_from_slice(&data[..BYTE_GROUP_SIZE]);
            BYTE_GROUP_SIZE
        }
    }
}

/// Decodes one byte plane into `destination`, returning the remaining
/// data.
///
/// `destination.len()` must be a multiple of [`BYTE_GROUP_SIZE`].
pub(crate) fn decode_bytes<'a>(
    mut data: &'a [u8],
    destination: &mut [u8],
) -> Result<&'a [u8], DecodeError> {
    debug_assert!(destination.len() % BYTE_GROUP_SIZE == 0);

    let header_size = (destination.len() / BYTE_GROUP_SIZE).div_ceil(4);
    if unlikely(data.len() < header_size) {
        return Err(DecodeError::TruncatedStream);
    }

    let (header, rest) = data.split_at(header_size);
    data = rest;

    for (i, group) in destination.chunks_exact_mut(BYTE_GROUP_SIZE).enumerate() {
        if unlikely(data.len() < TAIL_MAX_SIZE) {
            return Err(DecodeError::TruncatedStream);
        }

        let bitslog2 = (header[i / 4] >> ((i % 4) * 2)) & 3;

        let consumed = decode_bytes_group(data, group, bitslog2);
        data = &data[consumed..];
    }

    Ok(data)
}

//! SSSE3 byte group decoding.
//!
//! Escaped lanes are gathered from the overflow stream in one pass: the
//! 16-lane escape mask from `pcmpeqb`/`pmovmskb` indexes two precomputed
//! 256-entry tables mapping each 8-bit escape mask to the `pshufb`
//! permutation that scatters consecutive overflow bytes into the escaped
//! lanes, and to the number of overflow bytes those lanes consume. The
//! tables are built once in const eval and never mutated.

#[cfg(target_arch = "x86")]
use core::arch::x86::*;
#[cfg(target_arch = "x86_64")]
use core::arch::x86_64::*;

use crate::decode::{BYTE_GROUP_DECODE_LIMIT, BYTE_GROUP_SIZE, TAIL_MAX_SIZE};
use crate::error::DecodeError;
use likely_stable::unlikely;

const fn build_shuffle_tables() -> ([[u8; 8]; 256], [u8; 256]) {
    let mut shuffle = [[0u8; 8]; 256];
    let mut count = [0u8; 256];

    let mut mask = 0usize;
    while mask < 256 {
        let mut escapes = 0u8;
        let mut i = 0;
        while i < 8 {
            if (mask >> i) & 1 != 0 {
                shuffle[mask][i] = escapes;
                escapes += 1;
            } else {
                // High bit set makes pshufb zero the lane, so non-escaped
                // lanes survive the blend untouched.
                shuffle[mask][i] = 0x80;
            }
            i += 1;
        }
        count[mask] = escapes;
        mask += 1;
    }

    (shuffle, count)
}

/// Per-escape-mask `pshufb` permutations and overflow byte counts.
static DECODE_TABLES: ([[u8; 8]; 256], [u8; 256]) = build_shuffle_tables();

#[inline]
fn escape_count(mask: u8) -> usize {
    DECODE_TABLES.1[mask as usize] as usize
}

/// Builds the 16-lane overflow gather permutation from the two 8-lane
/// escape masks. The second half's indices are offset by the first half's
/// escape count so both halves read one contiguous overflow run.
#[inline]
#[target_feature(enable = "ssse3")]
unsafe fn decode_shuffle_mask(mask0: u8, mask1: u8) -> __m128i {
    let sm0 = _mm_loadl_epi64(DECODE_TABLES.0[mask0 as usize].as_ptr() as *const __m128i);
    let sm1 = _mm_loadl_epi64(DECODE_TABLES.0[mask1 as usize].as_ptr() as *const __m128i);
    let sm1off = _mm_set1_epi8(DECODE_TABLES.1[mask0 as usize] as i8);

    let sm1r = _mm_add_epi8(sm1, sm1off);

    _mm_unpacklo_epi64(sm0, sm1r)
}

/// Decodes one 16-byte group from `data` and returns the number of bytes
/// consumed. Bit-identical to the portable implementation.
///
/// # Safety
///
/// - CPU must support SSSE3 instructions (for `pshufb`)
/// - `data` must hold at least [`BYTE_GROUP_DECODE_LIMIT`] bytes: the
///   unaligned 16-byte loads read past the packed selector bytes
/// - `destination` must hold exactly 16 bytes
#[target_feature(enable = "ssse3")]
pub(crate) unsafe fn decode_bytes_group(data: &[u8], destination: &mut [u8], bitslog2: u8) -> usize {
    debug_assert!(data.len() >= BYTE_GROUP_DECODE_LIMIT);
    debug_assert_eq!(destination.len(), BYTE_GROUP_SIZE);

    match bitslog2 {
        0 => {
            destination.fill(0);
            0
        }
        1 => {
            // Spread the 4 packed bytes into 16 lanes of 2-bit codes,
            // most-significant code pair first within each source byte.
            let sel2 = _mm_cvtsi32_si128(core::ptr::read_unaligned(data.as_ptr() as *const i32));
            let rest = _mm_loadu_si128(data.as_ptr().add(4) as *const __m128i);

            let sel22 = _mm_unpacklo_epi8(_mm_srli_epi16(sel2, 4), sel2);
            let sel2222 = _mm_unpacklo_epi8(_mm_srli_epi16(sel22, 2), sel22);
            let sel = _mm_and_si128(sel2222, _mm_set1_epi8(3));

            let mask = _mm_cmpeq_epi8(sel, _mm_set1_epi8(3));
            let mask16 = _mm_movemask_epi8(mask);
            let mask0 = (mask16 & 0xff) as u8;
            let mask1 = ((mask16 >> 8) & 0xff) as u8;

            let shuf = decode_shuffle_mask(mask0, mask1);
            let result = _mm_or_si128(_mm_shuffle_epi8(rest, shuf), _mm_andnot_si128(mask, sel));

            _mm_storeu_si128(destination.as_mut_ptr() as *mut __m128i, result);

            4 + escape_count(mask0) + escape_count(mask1)
        }
        2 => {
            let sel4 = _mm_loadl_epi64(data.as_ptr() as *const __m128i);
            let rest = _mm_loadu_si128(data.as_ptr().add(8) as *const __m128i);

            let sel44 = _mm_unpacklo_epi8(_mm_srli_epi16(sel4, 4), sel4);
            let sel = _mm_and_si128(sel44, _mm_set1_epi8(15));

            let mask = _mm_cmpeq_epi8(sel, _mm_set1_epi8(15));
            let mask16 = _mm_movemask_epi8(mask);
            let mask0 = (mask16 & 0xff) as u8;
            let mask1 = ((mask16 >> 8) & 0xff) as u8;

            let shuf = decode_shuffle_mask(mask0, mask1);
            let result = _mm_or_si128(_mm_shuffle_epi8(rest, shuf), _mm_andnot_si128(mask, sel));

            _mm_storeu_si128(destination.as_mut_ptr() as *mut __m128i, result);

            8 + escape_count(mask0) + escape_count(mask1)
        }
        _ => {
            let literals = _mm_loadu_si128(data.as_ptr() as *const __m128i);
            _mm_storeu_si128(destination.as_mut_ptr() as *mut __m128i, literals);

            BYTE_GROUP_SIZE
        }
    }
}

/// Decodes one byte plane into `destination`, returning the remaining
/// data.
///
/// Groups are decoded four at a time while at least
/// `4 * `[`BYTE_GROUP_DECODE_LIMIT`] input bytes remain, amortizing the
/// bounds check; the tail falls back to a per-group check against
/// [`TAIL_MAX_SIZE`].
///
/// # Safety
///
/// CPU must support SSSE3 instructions. `destination.len()` must be a
/// multiple of [`BYTE_GROUP_SIZE`].
#[target_feature(enable = "ssse3")]
pub(crate) unsafe fn decode_bytes<'a>(
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

    let mut i = 0;

    // Fast path: four groups per shared bounds check, each group reads
    // at most BYTE_GROUP_DECODE_LIMIT bytes.
    while i + BYTE_GROUP_SIZE * 4 <= destination.len()
        && data.len() >= BYTE_GROUP_DECODE_LIMIT * 4
    {
        let header_byte = header[i / BYTE_GROUP_SIZE / 4];

        for j in 0..4 {
            let bitslog2 = (header_byte >> (j * 2)) & 3;
            let dest = &mut destination[i + BYTE_GROUP_SIZE * j..i + BYTE_GROUP_SIZE * (j + 1)];

            let consumed = decode_bytes_group(data, dest, bitslog2);
            data = &data[consumed..];
        }

        i += BYTE_GROUP_SIZE * 4;
    }

    // Slow path: remaining groups, one bounds check each.
    while i < destination.len() {
        if unlikely(data.len() < TAIL_MAX_SIZE) {
            return Err(DecodeError::TruncatedStream);
        }

        let header_offset = i / BYTE_GROUP_SIZE;
        let bitslog2 = (header[header_offset / 4] >> ((header_offset % 4) * 2)) & 3;

        let consumed =
            decode_bytes_group(data, &mut destination[i..i + BYTE_GROUP_SIZE], bitslog2);
        data = &data[consumed..];

        i += BYTE_GROUP_SIZE;
    }

    Ok(data)
}

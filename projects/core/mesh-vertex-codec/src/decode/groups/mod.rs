//! Byte group decoding: 16-byte groups with a shared 2-bit width selector.
//!
//! A byte plane of `n` bytes (`n` a multiple of 16) is stored as a header
//! of `ceil(n / 16 / 4)` bytes (four 2-bit selectors per byte, low bits
//! first) followed by the groups' packed data. Selector semantics:
//!
//! - `0`: all 16 bytes zero, nothing stored
//! - `1`: 4 packed bytes of 2-bit codes; code 3 escapes to an overflow byte
//! - `2`: 8 packed bytes of 4-bit codes; code 15 escapes to an overflow byte
//! - `3`: 16 literal bytes
//!
//! The portable and SSSE3 implementations produce bit-identical output and
//! consume identical byte counts.

pub(crate) mod portable;

#[cfg(any(target_arch = "x86_64", target_arch = "x86"))]
pub(crate) mod ssse3;

use crate::error::DecodeError;

/// Decodes one byte plane into `destination` using the best available
/// implementation for the current CPU, returning the remaining data.
///
/// `destination.len()` must be a non-zero multiple of 16.
#[inline]
pub(crate) fn decode_bytes<'a>(
    data: &'a [u8],
    destination: &mut [u8],
) -> Result<&'a [u8], DecodeError> {
    #[cfg(any(target_arch = "x86_64", target_arch = "x86"))]
    {
        #[cfg(not(feature = "no-runtime-cpu-detection"))]
        if crate::cpu_detect::has_ssse3() {
            return unsafe { ssse3::decode_bytes(data, destination) };
        }

        #[cfg(feature = "no-runtime-cpu-detection")]
        if cfg!(target_feature = "ssse3") {
            return unsafe { ssse3::decode_bytes(data, destination) };
        }
    }

    portable::decode_bytes(data, destination)
}

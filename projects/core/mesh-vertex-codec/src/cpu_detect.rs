//! Helpers for CPU feature detection without using std.
//!
//! This module provides CPU feature detection for SIMD instruction sets using the
//! `cpufeatures` crate. These functions are used to determine at runtime which optimized code paths
//! can be safely executed on the current CPU.
//!
//! The functions are minimal overhead, they have an init that's called once, and every subsequent
//! call simply loads and compares a bool.

/// Checks if the CPU supports SSSE3 (Supplemental SSE3) instructions.
///
/// SSSE3 provides `pshufb`, which the byte group decoder uses to gather
/// escaped overflow bytes into their output lanes in a single pass.
///
/// # Returns
/// `true` if the CPU supports SSSE3 instructions, `false` otherwise.
#[inline]
#[cfg(any(target_arch = "x86_64", target_arch = "x86"))]
pub fn has_ssse3() -> bool {
    cpufeatures::new!(cpuid_ssse3, "ssse3");
    cpuid_ssse3::get()
}

#![doc = include_str!(concat!("../", core::env!("CARGO_PKG_README")))]
#![cfg_attr(not(feature = "std"), no_std)]
#![warn(missing_docs)]

pub(crate) mod decode;
pub mod cpu_detect;
pub mod error;

// Re-export main types and functions from the decode module
pub use decode::*;
pub use error::{DecodeError, ErrorKind};

/// Common test prelude for avoiding duplicate imports in test modules
#[cfg(test)]
pub(crate) mod test_prelude;

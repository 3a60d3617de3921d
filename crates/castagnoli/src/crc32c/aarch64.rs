//! aarch64 CRC-32C kernel.
//!
//! Uses the ARMv8 CRC32 extension (`crc32c*` instructions).
//!
//! Safety:
//! - This file is allowed to use `unsafe` for ISA-specific intrinsics.
//! - All unsafe is contained within this module and reached only through
//!   [`super::Engine`].

#![allow(unsafe_code)]

use core::arch::aarch64::{__crc32cb, __crc32cw};

/// Fold `data` into `crc` with the CRC extension.
///
/// # Safety
/// Caller must ensure the CPU supports the `crc` target feature.
#[target_feature(enable = "crc")]
pub(super) unsafe fn update_crc(crc: u32, data: &[u8]) -> u32 {
  let mut current = crc;

  let mut words = data.chunks_exact(4);
  for word in words.by_ref() {
    let word = u32::from_le_bytes([word[0], word[1], word[2], word[3]]);
    current = __crc32cw(current, word);
  }

  for &byte in words.remainder() {
    current = __crc32cb(current, byte);
  }

  current
}

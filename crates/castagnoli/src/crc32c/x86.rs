//! x86 / x86_64 CRC-32C kernel.
//!
//! Uses the SSE4.2 `crc32` instruction, which implements the Castagnoli
//! polynomial directly.
//!
//! Safety:
//! - This file is allowed to use `unsafe` for ISA-specific intrinsics.
//! - All unsafe is contained within this module and reached only through
//!   [`super::Engine`].

#![allow(unsafe_code)]

#[cfg(target_arch = "x86")]
use core::arch::x86::{_mm_crc32_u8, _mm_crc32_u32};
#[cfg(target_arch = "x86_64")]
use core::arch::x86_64::{_mm_crc32_u8, _mm_crc32_u32};

/// Fold `data` into `crc` with SSE4.2 `crc32`.
///
/// Words are assembled from bytes (little-endian) rather than read through a
/// reinterpreted pointer, so `data` needs no particular alignment.
///
/// # Safety
/// Caller must ensure the CPU supports the `sse4.2` target feature.
#[target_feature(enable = "sse4.2")]
pub(super) unsafe fn update_sse42(crc: u32, data: &[u8]) -> u32 {
  let mut current = crc;

  let mut words = data.chunks_exact(4);
  for word in words.by_ref() {
    let word = u32::from_le_bytes([word[0], word[1], word[2], word[3]]);
    current = _mm_crc32_u32(current, word);
  }

  for &byte in words.remainder() {
    current = _mm_crc32_u8(current, byte);
  }

  current
}

#[cfg(all(test, feature = "std"))]
mod tests {
  use super::*;
  use crate::crc32c::{CHECK, INIT, XOROUT, portable};

  fn sse42() -> bool {
    !cfg!(miri) && std::arch::is_x86_feature_detected!("sse4.2")
  }

  #[test]
  fn test_check_string() {
    if !sse42() {
      return;
    }
    // SAFETY: SSE4.2 confirmed above.
    let crc = unsafe { update_sse42(INIT, b"123456789") } ^ XOROUT;
    assert_eq!(crc, CHECK);
  }

  #[test]
  fn test_zero_seed_without_complement() {
    if !sse42() {
      return;
    }
    // Raw register semantics: no implicit init or final XOR.
    // SAFETY: SSE4.2 confirmed above.
    unsafe {
      assert_eq!(update_sse42(0, b""), 0);
      assert_eq!(update_sse42(0, b"123456789"), 0x58E3_FA20);
    }
  }

  #[test]
  fn test_word_and_tail_split() {
    if !sse42() {
      return;
    }
    let table = portable::init_table();
    let data = b"123456789";
    for len in [1usize, 3, 4, 5, 7, 8] {
      // SAFETY: SSE4.2 confirmed above.
      let hw = unsafe { update_sse42(INIT, &data[..len]) };
      assert_eq!(hw, portable::update(table, INIT, &data[..len]), "len={len}");
    }
  }
}

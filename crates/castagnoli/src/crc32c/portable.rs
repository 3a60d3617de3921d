//! Portable CRC-32C: one 256-entry table, one byte per step.
//!
//! # Table
//!
//! Entry construction runs MSB-first: the byte is placed in the top 8 bits of
//! the register and reduced 8 times by the normal-form polynomial
//! `0x1EDC6F41` (`0x1_1EDC_6F41` with the implicit x^32 term dropped). The
//! update loop below consumes the register LSB-first (reflected), so each
//! result is stored bit-reversed, at the bit-reversed index. Entry `0x80` is
//! therefore the reflected polynomial `0x82F63B78`.
//!
//! # Lifecycle
//!
//! With `std`, the table is built lazily by the first caller of
//! [`init_table`] and never rebuilt or released; `OnceLock` guarantees
//! at-most-once construction and that every thread that sees it sees all 256
//! entries. Without `std`, it is a compile-time constant.

// SAFETY: All table indexing uses `u8`-derived indices into 256-entry arrays,
// or bounded loop indices (0..len) in const fn contexts.
#![allow(clippy::indexing_slicing)]

use super::{INIT, POLYNOMIAL, XOROUT};

/// Number of reduction rounds per table entry: one per bit of a byte.
const ROUNDS: u32 = 8;

/// Build the lookup table.
///
/// Pure function of [`POLYNOMIAL`]: two calls always produce identical tables.
#[must_use]
pub const fn build_table() -> [u32; 256] {
  let mut table = [0u32; 256];

  let mut i = 0usize;
  while i < 256 {
    let mut a = (i as u32) << 24;

    let mut round = 0;
    while round < ROUNDS {
      if a & 0x8000_0000 != 0 {
        a = (a << 1) ^ POLYNOMIAL;
      } else {
        a <<= 1;
      }
      round += 1;
    }

    table[(i as u8).reverse_bits() as usize] = a.reverse_bits();
    i += 1;
  }

  table
}

const _: () = assert!(build_table()[0x80] == super::POLYNOMIAL_REFLECTED);

#[cfg(feature = "std")]
static TABLE: std::sync::OnceLock<[u32; 256]> = std::sync::OnceLock::new();

#[cfg(not(feature = "std"))]
static TABLE: [u32; 256] = build_table();

/// Return the lookup table, building it on first use.
///
/// Idempotent and safe to race: concurrent first callers block until one of
/// them has finished, then all observe the same fully built table.
#[inline]
#[must_use]
pub fn init_table() -> &'static [u32; 256] {
  #[cfg(feature = "std")]
  {
    TABLE.get_or_init(build_table)
  }

  #[cfg(not(feature = "std"))]
  {
    &TABLE
  }
}

/// Whether the lookup table has been built.
///
/// Starts `false` (with `std`), flips to `true` on the first software-path
/// checksum, and never goes back.
#[inline]
#[must_use]
pub fn table_ready() -> bool {
  #[cfg(feature = "std")]
  {
    TABLE.get().is_some()
  }

  #[cfg(not(feature = "std"))]
  {
    true
  }
}

/// Fold `data` into the raw register `crc` (no init, no final XOR).
#[inline]
#[must_use]
pub const fn update(table: &[u32; 256], mut crc: u32, data: &[u8]) -> u32 {
  let mut i = 0;
  while i < data.len() {
    crc = (crc >> 8) ^ table[(crc as u8 ^ data[i]) as usize];
    i += 1;
  }
  crc
}

/// CRC-32C of `data` using `table`.
///
/// Taking the table by reference is what guarantees it was initialized.
#[inline]
#[must_use]
pub const fn compute_slow(table: &[u32; 256], data: &[u8]) -> u32 {
  update(table, INIT, data) ^ XOROUT
}

const _: () = assert!(compute_slow(&build_table(), b"123456789") == super::CHECK);
const _: () = assert!(compute_slow(&build_table(), b"") == 0);

/// CRC-32C of `data`, building the table if needed.
#[inline]
#[must_use]
pub fn compute(data: &[u8]) -> u32 {
  compute_slow(init_table(), data)
}

#[cfg(test)]
mod tests {
  extern crate std;

  use std::vec;

  use super::*;
  use crate::crc32c::{CHECK, POLYNOMIAL_REFLECTED};

  /// Classic right-shifting construction, for cross-checking.
  fn reflected_table() -> [u32; 256] {
    let mut table = [0u32; 256];
    for (i, entry) in table.iter_mut().enumerate() {
      let mut crc = i as u32;
      for _ in 0..8 {
        crc = if crc & 1 != 0 { (crc >> 1) ^ POLYNOMIAL_REFLECTED } else { crc >> 1 };
      }
      *entry = crc;
    }
    table
  }

  #[test]
  fn test_check_string() {
    assert_eq!(compute(b"123456789"), CHECK);
  }

  #[test]
  fn test_empty() {
    assert_eq!(compute(b""), 0x0000_0000);
    assert_eq!(update(init_table(), INIT, b""), INIT);
  }

  #[test]
  fn test_zeros() {
    assert_eq!(compute(&[0u8; 32]), 0x8A91_36AA);
  }

  #[test]
  fn test_ones() {
    assert_eq!(compute(&[0xFFu8; 32]), 0x62A8_AB43);
  }

  #[test]
  fn test_single_byte() {
    assert_eq!(compute(&[0x00]), 0x527D_5351);
  }

  #[test]
  fn test_const_evaluation() {
    const TABLE: [u32; 256] = build_table();
    const CRC: u32 = compute_slow(&TABLE, b"123456789");
    const RAW: u32 = update(&TABLE, 0, b"123456789");
    assert_eq!(CRC, CHECK);
    assert_eq!(RAW, 0x58E3_FA20);
    assert_eq!(compute_slow(init_table(), b"123456789"), CRC);
  }

  #[test]
  fn test_known_entries() {
    let table = build_table();
    assert_eq!(table[0x00], 0x0000_0000);
    assert_eq!(table[0x01], 0xF26B_8303);
    assert_eq!(table[0x80], 0x82F6_3B78);
    assert_eq!(table[0xFF], 0xAD7D_5351);
  }

  #[test]
  fn test_matches_reflected_construction() {
    assert_eq!(build_table(), reflected_table());
  }

  #[test]
  fn test_build_is_deterministic() {
    assert_eq!(build_table(), build_table());
  }

  #[test]
  fn test_init_is_idempotent() {
    let first = init_table();
    let second = init_table();
    assert!(core::ptr::eq(first, second));
    assert_eq!(*first, build_table());
    assert!(table_ready());
  }

  #[test]
  fn test_table_independent_of_prior_checksums() {
    let _ = compute(b"some unrelated input");
    assert_eq!(*init_table(), build_table());
  }

  #[test]
  fn test_incremental_register() {
    let table = init_table();
    let data = b"hello world, this is a test of incremental CRC";
    let oneshot = compute_slow(table, data);
    for split in 0..data.len() {
      let (a, b) = data.split_at(split);
      let crc = update(table, update(table, INIT, a), b) ^ XOROUT;
      assert_eq!(crc, oneshot, "mismatch at split point {split}");
    }
  }

  #[test]
  fn test_input_untouched() {
    let data = vec![0xA5u8; 64];
    let before = data.clone();
    let _ = compute(&data);
    assert_eq!(data, before);
  }
}

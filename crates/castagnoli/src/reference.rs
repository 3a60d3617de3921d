//! Bitwise reference implementation.
//!
//! Processes one bit at a time straight from the polynomial, with no tables
//! and no hardware. It is the oracle the table-driven and instruction-based
//! engines are checked against, and it is `const`, so the check value is
//! verified at compile time.
//!
//! Intentionally slow (~8 operations per bit). Use for correctness
//! verification and test oracles only.

// SAFETY: All indexing uses bounded loop indices (0..data.len()).
// Clippy cannot prove this in const fn contexts.
#![allow(clippy::indexing_slicing)]

use crate::crc32c::{CHECK, INIT, POLYNOMIAL_REFLECTED, XOROUT};

/// Fold `data` into the raw register `crc`, one bit at a time (LSB-first).
#[must_use]
pub const fn update(mut crc: u32, data: &[u8]) -> u32 {
  let mut i = 0;
  while i < data.len() {
    crc ^= data[i] as u32;
    let mut bit = 0;
    while bit < 8 {
      crc = if crc & 1 != 0 {
        (crc >> 1) ^ POLYNOMIAL_REFLECTED
      } else {
        crc >> 1
      };
      bit += 1;
    }
    i += 1;
  }
  crc
}

/// CRC-32C of `data`.
///
/// ```
/// assert_eq!(castagnoli::reference::crc32c(b"123456789"), 0xE306_9283);
/// ```
#[must_use]
pub const fn crc32c(data: &[u8]) -> u32 {
  update(INIT, data) ^ XOROUT
}

const _: () = assert!(crc32c(b"123456789") == CHECK);
const _: () = assert!(crc32c(b"") == 0);

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_rfc3720_vectors() {
    // iSCSI (RFC 3720, B.4) CRC examples.
    let mut ascending = [0u8; 32];
    let mut descending = [0u8; 32];
    for i in 0..32u8 {
      ascending[i as usize] = i;
      descending[i as usize] = 31 - i;
    }
    assert_eq!(crc32c(&[0u8; 32]), 0x8A91_36AA);
    assert_eq!(crc32c(&[0xFFu8; 32]), 0x62A8_AB43);
    assert_eq!(crc32c(&ascending), 0x46DD_794E);
    assert_eq!(crc32c(&descending), 0x113F_DB5C);
  }

  #[test]
  fn test_agrees_with_table() {
    let table = crate::portable::init_table();
    let data = b"The quick brown fox jumps over the lazy dog";
    assert_eq!(crc32c(data), 0x2262_0404);
    assert_eq!(crate::portable::compute_slow(table, data), crc32c(data));
  }
}

//! Error types for configuration.
//!
//! Checksumming itself cannot fail; only parsing a backend name can.

use core::fmt;

/// An unrecognized backend name.
///
/// # Examples
///
/// ```
/// use castagnoli::{Force, ParseForceError};
///
/// assert_eq!("sse4.2".parse::<Force>(), Ok(Force::Hardware));
/// assert_eq!("avx512".parse::<Force>(), Err(ParseForceError::new()));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub struct ParseForceError;

impl ParseForceError {
  #[inline]
  #[must_use]
  pub const fn new() -> Self {
    Self
  }
}

impl Default for ParseForceError {
  #[inline]
  fn default() -> Self {
    Self::new()
  }
}

impl fmt::Display for ParseForceError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str("unknown CRC-32C backend (expected `auto`, `portable` or `hardware`)")
  }
}

impl core::error::Error for ParseForceError {}

#[cfg(test)]
mod tests {
  extern crate alloc;

  use alloc::string::ToString;

  use super::*;

  #[test]
  fn test_display() {
    let text = ParseForceError::new().to_string();
    assert!(text.contains("auto"));
    assert!(text.contains("portable"));
    assert!(text.contains("hardware"));
  }

  #[test]
  fn test_error_trait() {
    fn assert_error<E: core::error::Error + Send + Sync + 'static>() {}
    assert_error::<ParseForceError>();
  }

  #[test]
  fn test_default() {
    assert_eq!(ParseForceError::default(), ParseForceError::new());
  }
}

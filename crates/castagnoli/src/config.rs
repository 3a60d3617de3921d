//! CRC-32C backend configuration.
//!
//! One knob, set per dispatcher with [`Dispatcher::with_force`]: which backend
//! to use. There is no process-wide override; a dispatcher left at
//! [`Force::Auto`] asks its capability on every call.
//!
//! Forced hardware is always clamped to what the host can actually execute.
//!
//! [`Dispatcher::with_force`]: crate::Dispatcher::with_force

use core::{fmt, str::FromStr};

use crate::{crc32c::Engine, error::ParseForceError};

/// Forced backend selection.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum Force {
  /// Ask the capability detector on every call.
  #[default]
  Auto,
  /// Always use the portable table-driven engine.
  Portable,
  /// Use the CRC instruction whenever the host can execute it, without
  /// consulting the injected capability.
  Hardware,
}

impl Force {
  #[must_use]
  pub const fn as_str(self) -> &'static str {
    match self {
      Self::Auto => "auto",
      Self::Portable => "portable",
      Self::Hardware => "hardware",
    }
  }
}

impl fmt::Display for Force {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

impl FromStr for Force {
  type Err = ParseForceError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    let value = s.trim();

    if value.eq_ignore_ascii_case("auto") {
      return Ok(Self::Auto);
    }
    if value.eq_ignore_ascii_case("portable")
      || value.eq_ignore_ascii_case("software")
      || value.eq_ignore_ascii_case("table")
    {
      return Ok(Self::Portable);
    }
    if value.eq_ignore_ascii_case("hardware")
      || value.eq_ignore_ascii_case("hwcrc")
      || value.eq_ignore_ascii_case("crc32c")
      || value.eq_ignore_ascii_case("sse4.2")
    {
      return Ok(Self::Hardware);
    }

    Err(ParseForceError::new())
  }
}

/// Clamp `requested` to the host: forced hardware without the instruction
/// falls back to auto selection.
#[inline]
#[must_use]
pub fn clamp(requested: Force) -> Force {
  match requested {
    Force::Auto | Force::Portable => requested,
    Force::Hardware => {
      if Engine::get().is_some() {
        Force::Hardware
      } else {
        Force::Auto
      }
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_parse() {
    assert_eq!("auto".parse(), Ok(Force::Auto));
    assert_eq!(" Portable ".parse(), Ok(Force::Portable));
    assert_eq!("TABLE".parse(), Ok(Force::Portable));
    assert_eq!("software".parse(), Ok(Force::Portable));
    assert_eq!("hardware".parse(), Ok(Force::Hardware));
    assert_eq!("hwcrc".parse(), Ok(Force::Hardware));
    assert_eq!("crc32c".parse(), Ok(Force::Hardware));
    assert_eq!("SSE4.2".parse(), Ok(Force::Hardware));
    assert_eq!("".parse::<Force>(), Err(ParseForceError::new()));
    assert_eq!("pclmul".parse::<Force>(), Err(ParseForceError::new()));
  }

  #[test]
  fn test_as_str_round_trips() {
    for force in [Force::Auto, Force::Portable, Force::Hardware] {
      assert_eq!(force.as_str().parse(), Ok(force));
    }
  }

  #[test]
  fn test_default_is_auto() {
    assert_eq!(Force::default(), Force::Auto);
  }

  #[test]
  fn test_clamp() {
    assert_eq!(clamp(Force::Auto), Force::Auto);
    assert_eq!(clamp(Force::Portable), Force::Portable);
    let expected = if Engine::get().is_some() {
      Force::Hardware
    } else {
      Force::Auto
    };
    assert_eq!(clamp(Force::Hardware), expected);
  }
}

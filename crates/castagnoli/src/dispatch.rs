//! Backend selection.
//!
//! Every checksum asks its [`Capability`] afresh; there is no hidden cache.
//! Callers that want the answer remembered say so with [`CachedCapability`].
//!
//! Selection, per call (the force mode is per dispatcher, [`Force::Auto`]
//! unless set with [`Dispatcher::with_force`]):
//!
//! 1. `Force::Portable` → portable.
//! 2. `Force::Hardware` and the host executes the instruction → hardware.
//! 3. Otherwise ask the capability once. Absent → portable. Present → hardware,
//!    provided the host can really execute the instruction (an injected
//!    capability may claim more than the host has), else portable.
//!
//! Both engines compute standard CRC-32C, so the backend never changes the
//! result.

use core::fmt;

use platform::{Capability, Host};

use crate::{
  config::{self, Force},
  crc32c::{Engine, portable},
  diag::{Crc32cSelection, SelectionReason},
};

/// Which engine a call runs on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Backend {
  /// 256-entry table, byte at a time.
  Portable,
  /// CRC instruction, word then byte.
  Hardware,
}

impl Backend {
  #[must_use]
  pub const fn as_str(self) -> &'static str {
    match self {
      Self::Portable => "portable",
      Self::Hardware => "hardware",
    }
  }
}

impl fmt::Display for Backend {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

/// One selection outcome.
#[derive(Clone, Copy, Debug)]
struct Decision {
  requested: Force,
  capability: Option<bool>,
  engine: Option<Engine>,
  reason: SelectionReason,
}

/// CRC-32C dispatcher over an injected [`Capability`].
///
/// # Example
///
/// ```
/// use castagnoli::{Backend, Dispatcher, Fixed};
///
/// // A capability that says "absent" always selects the portable engine.
/// let portable = Dispatcher::new(Fixed(false));
/// assert_eq!(portable.select(), Backend::Portable);
/// assert_eq!(portable.crc32(b"123456789"), 0xE306_9283);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Dispatcher<C = Host> {
  capability: C,
  force: Force,
}

impl Dispatcher<Host> {
  /// Dispatcher over the real processor, in [`Force::Auto`] mode.
  #[inline]
  #[must_use]
  pub const fn host() -> Self {
    Self::new(Host)
  }
}

impl<C> Dispatcher<C> {
  #[inline]
  #[must_use]
  pub const fn new(capability: C) -> Self {
    Self {
      capability,
      force: Force::Auto,
    }
  }

  /// Pin the force mode for this dispatcher.
  #[inline]
  #[must_use]
  pub fn with_force(self, force: Force) -> Self {
    Self {
      capability: self.capability,
      force,
    }
  }

  #[inline]
  #[must_use]
  pub fn force(&self) -> Force {
    self.force
  }

  #[inline]
  #[must_use]
  pub fn capability(&self) -> &C {
    &self.capability
  }

  #[inline]
  #[must_use]
  pub fn into_capability(self) -> C {
    self.capability
  }
}

impl<C: Capability> Dispatcher<C> {
  fn decide(&self) -> Decision {
    let requested = self.force;

    match config::clamp(requested) {
      Force::Portable => Decision {
        requested,
        capability: None,
        engine: None,
        reason: SelectionReason::Forced,
      },
      Force::Hardware => Decision {
        requested,
        capability: None,
        engine: Engine::get(),
        reason: SelectionReason::Forced,
      },
      Force::Auto => {
        let present = self.capability.hw_crc32c();
        let (engine, reason) = if !present {
          (None, SelectionReason::CapabilityAbsent)
        } else {
          match Engine::get() {
            Some(engine) => (Some(engine), SelectionReason::Auto),
            None => (None, SelectionReason::InstructionUnavailable),
          }
        };
        Decision {
          requested,
          capability: Some(present),
          engine,
          reason,
        }
      }
    }
  }

  /// CRC-32C of `data`.
  ///
  /// Any slice is valid, including an empty one (which yields `0`).
  #[inline]
  #[must_use]
  pub fn crc32(&self, data: &[u8]) -> u32 {
    match self.decide().engine {
      Some(engine) => engine.compute_fast(data),
      None => portable::compute_slow(portable::init_table(), data),
    }
  }

  /// The backend a call made now would run on.
  ///
  /// Queries the capability just as a checksum would.
  #[inline]
  #[must_use]
  pub fn select(&self) -> Backend {
    match self.decide().engine {
      Some(_) => Backend::Hardware,
      None => Backend::Portable,
    }
  }

  /// Explain the selection a call made now would make.
  #[must_use]
  pub fn diagnose(&self) -> Crc32cSelection {
    let decision = self.decide();
    let (backend, kernel) = match decision.engine {
      Some(engine) => (Backend::Hardware, engine.name()),
      None => (Backend::Portable, "portable/table"),
    };
    Crc32cSelection {
      requested_force: decision.requested,
      capability: decision.capability,
      instruction_available: Engine::get().is_some(),
      backend,
      reason: decision.reason,
      kernel,
      table_ready: portable::table_ready(),
    }
  }
}

/// CRC-32C of `data` on the host, choosing the backend for this call.
///
/// ```
/// assert_eq!(castagnoli::crc32(b"hello world"), 0xC994_65AA);
/// ```
#[inline]
#[must_use]
pub fn crc32(data: &[u8]) -> u32 {
  Dispatcher::host().crc32(data)
}

/// A [`Capability`] that asks its inner capability once and remembers the
/// answer.
///
/// This is the only cache in the selection path, and it is opt-in:
///
/// ```
/// use castagnoli::{CachedCapability, Dispatcher, Host};
///
/// let dispatcher = Dispatcher::new(CachedCapability::new(Host));
/// assert_eq!(dispatcher.crc32(b"123456789"), 0xE306_9283);
/// assert!(dispatcher.capability().is_cached());
/// ```
#[cfg(feature = "std")]
#[derive(Debug, Default)]
pub struct CachedCapability<C> {
  inner: C,
  answer: std::sync::OnceLock<bool>,
}

#[cfg(feature = "std")]
impl<C> CachedCapability<C> {
  #[inline]
  #[must_use]
  pub const fn new(inner: C) -> Self {
    Self {
      inner,
      answer: std::sync::OnceLock::new(),
    }
  }

  /// Whether the inner capability has been asked yet.
  #[inline]
  #[must_use]
  pub fn is_cached(&self) -> bool {
    self.answer.get().is_some()
  }

  #[inline]
  #[must_use]
  pub fn inner(&self) -> &C {
    &self.inner
  }
}

#[cfg(feature = "std")]
impl<C: Capability> Capability for CachedCapability<C> {
  #[inline]
  fn hw_crc32c(&self) -> bool {
    *self.answer.get_or_init(|| self.inner.hw_crc32c())
  }
}

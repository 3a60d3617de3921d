// ─────────────────────────────────────────────────────────────────────────────
// Capability Detection
// ─────────────────────────────────────────────────────────────────────────────

use crate::cpuid::{Cpuid, LEAF_FEATURES};

/// Whether the hardware CRC-32C instruction is available.
///
/// Implementations must not cache behind the caller's back: every call is a
/// fresh answer. Callers that want a cached answer wrap the capability in an
/// explicit caching type.
pub trait Capability {
  fn hw_crc32c(&self) -> bool;
}

impl<C: Capability + ?Sized> Capability for &C {
  #[inline]
  fn hw_crc32c(&self) -> bool {
    (**self).hw_crc32c()
  }
}

/// The processor this code is running on. See [`detect`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Host;

impl Capability for Host {
  #[inline]
  fn hw_crc32c(&self) -> bool {
    detect()
  }
}

/// A pinned answer, for tests and for hosts whose hardware is known up front.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Fixed(pub bool);

impl Capability for Fixed {
  #[inline]
  fn hw_crc32c(&self) -> bool {
    self.0
  }
}

/// Adapts any [`Cpuid`] source into a [`Capability`] via [`detect_with`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Probe<C>(pub C);

impl<C: Cpuid> Capability for Probe<C> {
  #[inline]
  fn hw_crc32c(&self) -> bool {
    detect_with(&self.0)
  }
}

/// Query leaf 1 of `cpuid` and test the SSE4.2 bit of ECX.
#[inline]
#[must_use]
pub fn detect_with<C: Cpuid + ?Sized>(cpuid: &C) -> bool {
  cpuid.cpuid(LEAF_FEATURES).has_sse42()
}

/// Ask the host processor whether it can execute the CRC-32C instruction.
///
/// One query per call, no side effects.
#[inline]
#[must_use]
pub fn detect() -> bool {
  #[cfg(miri)]
  {
    false
  }

  #[cfg(all(not(miri), any(target_arch = "x86", target_arch = "x86_64")))]
  {
    detect_with(&crate::cpuid::HostCpuid)
  }

  #[cfg(all(not(miri), target_arch = "aarch64", feature = "std"))]
  {
    std::arch::is_aarch64_feature_detected!("crc")
  }

  #[cfg(all(not(miri), target_arch = "aarch64", not(feature = "std")))]
  {
    cfg!(target_feature = "crc")
  }

  #[cfg(all(
    not(miri),
    not(any(target_arch = "x86", target_arch = "x86_64", target_arch = "aarch64"))
  ))]
  {
    false
  }
}

//! CRC-32C engines.
//!
//! The portable engine is always available. The hardware engine is a
//! zero-sized [`Engine`] token that can only be obtained once the host has
//! been confirmed to execute the CRC instruction; every `unsafe` call into the
//! architecture kernels goes through it.

pub mod portable;

#[cfg(target_arch = "aarch64")]
mod aarch64;

#[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
mod x86;

/// CRC-32C polynomial, normal (MSB-first) form.
pub const POLYNOMIAL: u32 = 0x1EDC_6F41;

/// CRC-32C polynomial, reflected (LSB-first) form.
pub const POLYNOMIAL_REFLECTED: u32 = POLYNOMIAL.reverse_bits();

/// Initial register value.
pub const INIT: u32 = 0xFFFF_FFFF;

/// Final XOR applied to the register.
pub const XOROUT: u32 = 0xFFFF_FFFF;

/// CRC-32C of `b"123456789"`.
pub const CHECK: u32 = 0xE306_9283;

#[cfg(any(target_arch = "x86", target_arch = "x86_64", target_arch = "aarch64"))]
type Proof = ();

// No CRC instruction is wired up here: an `Engine` can never exist.
#[cfg(not(any(target_arch = "x86", target_arch = "x86_64", target_arch = "aarch64")))]
type Proof = core::convert::Infallible;

/// Proof that the host can execute the CRC-32C instruction.
///
/// # Thread Safety
///
/// `Engine` is `Copy`, `Send` and `Sync`: the instruction set does not change
/// between threads of one process.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Engine {
  proof: Proof,
}

impl Engine {
  /// Returns an engine if the CRC instruction is usable on this host.
  ///
  /// - x86 / x86_64: SSE4.2
  /// - aarch64: ARMv8 CRC extension
  /// - anything else: never
  ///
  /// With `std` this is the standard library's cached feature check; without
  /// it, only compile-time target features count.
  #[inline]
  #[must_use]
  pub fn get() -> Option<Self> {
    #[cfg(any(target_arch = "x86", target_arch = "x86_64", target_arch = "aarch64"))]
    {
      instruction_available().then_some(Self { proof: () })
    }

    #[cfg(not(any(target_arch = "x86", target_arch = "x86_64", target_arch = "aarch64")))]
    {
      None
    }
  }

  /// Kernel name, for diagnostics.
  #[inline]
  #[must_use]
  pub const fn name(self) -> &'static str {
    #[cfg(target_arch = "x86")]
    {
      let () = self.proof;
      "x86/sse4.2"
    }

    #[cfg(target_arch = "x86_64")]
    {
      let () = self.proof;
      "x86_64/sse4.2"
    }

    #[cfg(target_arch = "aarch64")]
    {
      let () = self.proof;
      "aarch64/crc"
    }

    #[cfg(not(any(target_arch = "x86", target_arch = "x86_64", target_arch = "aarch64")))]
    {
      match self.proof {}
    }
  }

  /// Fold `data` into the raw register `crc` (no init, no final XOR).
  ///
  /// Full 4-byte words are folded in address order with the 32-bit
  /// instruction, then the `len % 4` trailing bytes with the 8-bit one.
  #[inline]
  #[must_use]
  #[allow(unsafe_code)]
  pub fn update(self, crc: u32, data: &[u8]) -> u32 {
    #[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
    {
      let () = self.proof;
      // SAFETY: an `Engine` only exists once SSE4.2 has been confirmed.
      unsafe { x86::update_sse42(crc, data) }
    }

    #[cfg(target_arch = "aarch64")]
    {
      let () = self.proof;
      // SAFETY: an `Engine` only exists once the CRC extension has been confirmed.
      unsafe { aarch64::update_crc(crc, data) }
    }

    #[cfg(not(any(target_arch = "x86", target_arch = "x86_64", target_arch = "aarch64")))]
    {
      let _ = (crc, data);
      match self.proof {}
    }
  }

  /// CRC-32C of `data` using the CRC instruction.
  #[inline]
  #[must_use]
  pub fn compute_fast(self, data: &[u8]) -> u32 {
    self.update(INIT, data) ^ XOROUT
  }
}

#[cfg(any(target_arch = "x86", target_arch = "x86_64", target_arch = "aarch64"))]
#[inline]
fn instruction_available() -> bool {
  #[cfg(miri)]
  {
    false
  }

  #[cfg(all(not(miri), any(target_arch = "x86", target_arch = "x86_64"), feature = "std"))]
  {
    std::arch::is_x86_feature_detected!("sse4.2")
  }

  #[cfg(all(not(miri), any(target_arch = "x86", target_arch = "x86_64"), not(feature = "std")))]
  {
    cfg!(target_feature = "sse4.2")
  }

  #[cfg(all(not(miri), target_arch = "aarch64", feature = "std"))]
  {
    std::arch::is_aarch64_feature_detected!("crc")
  }

  #[cfg(all(not(miri), target_arch = "aarch64", not(feature = "std")))]
  {
    cfg!(target_feature = "crc")
  }
}

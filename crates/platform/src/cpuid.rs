//! CPUID register model and the host query.

/// CPUID leaf 1: processor info and feature bits.
pub const LEAF_FEATURES: u32 = 1;

/// ECX bit 20 of leaf 1: SSE4.2, which carries the `crc32` instruction.
pub const ECX_SSE42: u32 = 1 << 20;

/// The four registers returned by one CPUID query.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Registers {
  pub eax: u32,
  pub ebx: u32,
  pub ecx: u32,
  pub edx: u32,
}

impl Registers {
  #[inline]
  #[must_use]
  pub const fn new(eax: u32, ebx: u32, ecx: u32, edx: u32) -> Self {
    Self { eax, ebx, ecx, edx }
  }

  /// Whether these registers, read as a leaf-1 answer, advertise SSE4.2.
  #[inline]
  #[must_use]
  pub const fn has_sse42(&self) -> bool {
    self.ecx & ECX_SSE42 != 0
  }
}

/// A source of CPUID answers.
pub trait Cpuid {
  /// Query `leaf` (sub-leaf 0).
  fn cpuid(&self, leaf: u32) -> Registers;
}

impl<C: Cpuid + ?Sized> Cpuid for &C {
  #[inline]
  fn cpuid(&self, leaf: u32) -> Registers {
    (**self).cpuid(leaf)
  }
}

/// The real processor.
#[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct HostCpuid;

#[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
impl Cpuid for HostCpuid {
  #[inline]
  #[allow(unsafe_code, unused_unsafe)]
  fn cpuid(&self, leaf: u32) -> Registers {
    #[cfg(target_arch = "x86")]
    use core::arch::x86::__cpuid;
    #[cfg(target_arch = "x86_64")]
    use core::arch::x86_64::__cpuid;

    #[cfg(miri)]
    {
      let _ = leaf;
      Registers::default()
    }

    #[cfg(not(miri))]
    {
      // SAFETY: CPUID exists on every x86_64 CPU and on every 32-bit x86 CPU
      // Rust targets (i586 and later).
      let r = unsafe { __cpuid(leaf) };
      Registers::new(r.eax, r.ebx, r.ecx, r.edx)
    }
  }
}

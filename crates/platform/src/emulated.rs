//! Deterministic CPUID emulation.
//!
//! Replays canned CPUID answers so capability-dependent behavior can be
//! exercised without the matching hardware. Records live in one static table
//! ([`RECORDS`]); each [`Profile`] names a half-open range `[start, stop)` of
//! it.
//!
//! Each query scans forward from the emulator's cursor, wrapping within the
//! active profile's range, until it finds a record for the requested leaf.
//! The cursor stays on the matched record, so a profile holding two records
//! for the same leaf answers differently depending on what was asked in
//! between. If no record in the range matches, the last record visited is
//! returned as-is.
//!
//! ```
//! use platform::{Capability, EmulatedCpuid, Probe};
//!
//! let nehalem = EmulatedCpuid::by_name("Core i7 (Nehalem)").unwrap();
//! assert!(Probe(nehalem).hw_crc32c());
//!
//! let merom = EmulatedCpuid::by_name("Core 2 (Merom)").unwrap();
//! assert!(!Probe(merom).hw_crc32c());
//! ```

use core::sync::atomic::{AtomicUsize, Ordering};

use crate::cpuid::{Cpuid, Registers};

/// One canned CPUID answer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Record {
  pub leaf: u32,
  pub regs: Registers,
}

/// A vendor/model profile: a named range `[start, stop)` of [`RECORDS`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Profile {
  pub vendor: &'static str,
  pub name: &'static str,
  pub start: usize,
  pub stop: usize,
}

impl Profile {
  #[inline]
  #[must_use]
  pub const fn len(&self) -> usize {
    self.stop.saturating_sub(self.start)
  }

  #[inline]
  #[must_use]
  pub const fn is_empty(&self) -> bool {
    self.len() == 0
  }

  /// The records this profile replays.
  #[must_use]
  pub fn records(&self) -> &'static [Record] {
    RECORDS.get(self.start..self.stop).unwrap_or(&[])
  }
}

const fn rec(leaf: u32, eax: u32, ebx: u32, ecx: u32, edx: u32) -> Record {
  Record {
    leaf,
    regs: Registers::new(eax, ebx, ecx, edx),
  }
}

// Leaf 0 / 0x8000_0000 vendor strings, in EBX, ECX, EDX order.
const INTEL: (u32, u32, u32) = (0x756E_6547, 0x6C65_746E, 0x4965_6E69); // "Genu" "ntel" "ineI"
const AMD: (u32, u32, u32) = (0x6874_7541, 0x444D_4163, 0x6974_6E65); // "Auth" "cAMD" "enti"

/// Every canned answer, grouped by profile.
pub static RECORDS: [Record; 18] = [
  // Core 2 (Merom): SSSE3, no SSE4.x.
  rec(0x0, 0x0000_000A, INTEL.0, INTEL.1, INTEL.2),
  rec(0x1, 0x0000_06F6, 0x0002_0800, 0x0000_E3BD, 0xBFEB_FBFF),
  rec(0x8000_0000, 0x8000_0008, 0, 0, 0),
  // Core i7 (Nehalem): first Intel part with SSE4.2.
  rec(0x0, 0x0000_000B, INTEL.0, INTEL.1, INTEL.2),
  rec(0x1, 0x0001_06A5, 0x0010_0800, 0x0098_E3BD, 0xBFEB_FBFF),
  rec(0x8000_0000, 0x8000_0008, 0, 0, 0),
  // Phenom II (K10): SSE4a and POPCNT, no SSE4.2.
  rec(0x0, 0x0000_0005, AMD.0, AMD.1, AMD.2),
  rec(0x1, 0x0010_0F42, 0x0004_0800, 0x0080_2009, 0x178B_FBFF),
  rec(0x8000_0000, 0x8000_001B, AMD.0, AMD.1, AMD.2),
  // Ryzen (Zen 2).
  rec(0x0, 0x0000_0010, AMD.0, AMD.1, AMD.2),
  rec(0x1, 0x0087_0F10, 0x0010_0800, 0x7ED8_320B, 0x178B_FBFF),
  rec(0x8000_0000, 0x8000_0020, AMD.0, AMD.1, AMD.2),
  // Migrating: two leaf-1 answers that disagree on SSE4.2.
  rec(0x0, 0x0000_0016, INTEL.0, INTEL.1, INTEL.2),
  rec(0x1, 0x0009_06EA, 0x0010_0800, 0x7FFA_FBBF, 0xBFEB_FBFF),
  rec(0x0, 0x0000_0016, INTEL.0, INTEL.1, INTEL.2),
  rec(0x1, 0x0000_06F6, 0x0002_0800, 0x0000_E3BD, 0xBFEB_FBFF),
  // Truncated: max leaf 0, no leaf-1 record at all.
  rec(0x0, 0x0000_0000, INTEL.0, INTEL.1, INTEL.2),
  rec(0x8000_0000, 0x8000_0004, 0, 0, 0),
];

/// Every profile.
pub static PROFILES: [Profile; 6] = [
  Profile {
    vendor: "GenuineIntel",
    name: "Core 2 (Merom)",
    start: 0,
    stop: 3,
  },
  Profile {
    vendor: "GenuineIntel",
    name: "Core i7 (Nehalem)",
    start: 3,
    stop: 6,
  },
  Profile {
    vendor: "AuthenticAMD",
    name: "Phenom II (K10)",
    start: 6,
    stop: 9,
  },
  Profile {
    vendor: "AuthenticAMD",
    name: "Ryzen (Zen 2)",
    start: 9,
    stop: 12,
  },
  Profile {
    vendor: "GenuineIntel",
    name: "Migrating (mixed leaf 1)",
    start: 12,
    stop: 16,
  },
  Profile {
    vendor: "GenuineIntel",
    name: "Truncated (no leaf 1)",
    start: 16,
    stop: 18,
  },
];

/// Environment variable naming the profile for [`EmulatedCpuid::from_env`].
pub const PROFILE_ENV: &str = "CASTAGNOLI_CPUID_PROFILE";

/// A CPUID source replaying one [`Profile`].
///
/// The cursor is per-instance and atomic: concurrent queries are safe, and
/// each one observes a whole record.
#[derive(Debug)]
pub struct EmulatedCpuid {
  profile: &'static Profile,
  cursor: AtomicUsize,
}

impl EmulatedCpuid {
  #[inline]
  #[must_use]
  pub const fn new(profile: &'static Profile) -> Self {
    Self {
      profile,
      cursor: AtomicUsize::new(profile.start),
    }
  }

  /// Look up a profile by name (ASCII case-insensitive).
  #[must_use]
  pub fn by_name(name: &str) -> Option<Self> {
    PROFILES
      .iter()
      .find(|p| p.name.eq_ignore_ascii_case(name))
      .map(Self::new)
  }

  /// Select the profile named by `CASTAGNOLI_CPUID_PROFILE`, either by name
  /// or by index into [`PROFILES`].
  #[cfg(feature = "std")]
  #[must_use]
  pub fn from_env() -> Option<Self> {
    let value = std::env::var(PROFILE_ENV).ok()?;
    let value = value.trim();
    if value.is_empty() {
      return None;
    }
    if let Ok(index) = value.parse::<usize>() {
      return PROFILES.get(index).map(Self::new);
    }
    Self::by_name(value)
  }

  #[inline]
  #[must_use]
  pub fn profile(&self) -> &'static Profile {
    self.profile
  }

  /// Absolute index into [`RECORDS`] of the record the next scan starts from.
  #[inline]
  #[must_use]
  pub fn cursor(&self) -> usize {
    self.cursor.load(Ordering::Acquire)
  }

  /// Rewind the cursor to the start of the profile.
  #[inline]
  pub fn reset(&self) {
    self.cursor.store(self.profile.start, Ordering::Release);
  }

  /// Where a scan for `leaf` starting at `current` lands.
  fn scan(&self, current: usize, leaf: u32) -> usize {
    let Profile { start, stop, .. } = *self.profile;

    let mut current = if (start..stop).contains(&current) { current } else { start };
    let mut remaining = self.profile.len().saturating_sub(1);

    while remaining > 0 && RECORDS.get(current).is_some_and(|r| r.leaf != leaf) {
      current += 1;
      if current >= stop {
        current = start;
      }
      remaining -= 1;
    }

    current
  }
}

impl Clone for EmulatedCpuid {
  fn clone(&self) -> Self {
    Self {
      profile: self.profile,
      cursor: AtomicUsize::new(self.cursor()),
    }
  }
}

impl Cpuid for EmulatedCpuid {
  fn cpuid(&self, leaf: u32) -> Registers {
    if self.profile.is_empty() {
      return Registers::default();
    }

    let mut landed = self.profile.start;
    // The closure always returns `Some`, so this cannot fail.
    let _ = self.cursor.fetch_update(Ordering::AcqRel, Ordering::Acquire, |current| {
      landed = self.scan(current, leaf);
      Some(landed)
    });

    RECORDS.get(landed).map(|r| r.regs).unwrap_or_default()
  }
}

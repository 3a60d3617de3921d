//! Emulated profile selection through `CASTAGNOLI_CPUID_PROFILE`.
//!
//! One test per binary: it mutates the process environment.

#![cfg(feature = "std")]
#![allow(unsafe_code)] // `std::env::{set_var, remove_var}`

use platform::{
  Capability, EmulatedCpuid, Probe,
  emulated::{PROFILE_ENV, PROFILES},
};

fn select(value: Option<&str>) -> Option<&'static str> {
  // SAFETY: single-test binary; no other thread reads the environment.
  unsafe {
    match value {
      Some(value) => std::env::set_var(PROFILE_ENV, value),
      None => std::env::remove_var(PROFILE_ENV),
    }
  }
  EmulatedCpuid::from_env().map(|cpuid| cpuid.profile().name)
}

#[test]
fn profile_env_selects_by_name_or_index() {
  assert_eq!(PROFILE_ENV, "CASTAGNOLI_CPUID_PROFILE");

  // Unset, empty and blank all mean "no emulation".
  assert_eq!(select(None), None);
  assert_eq!(select(Some("")), None);
  assert_eq!(select(Some("   ")), None);

  // By name: trimmed, ASCII case-insensitive.
  assert_eq!(select(Some("Ryzen (Zen 2)")), Some("Ryzen (Zen 2)"));
  assert_eq!(select(Some("  phenom ii (k10) ")), Some("Phenom II (K10)"));
  assert_eq!(select(Some("Pentium 4")), None);

  // By index into the profile table.
  for (index, profile) in PROFILES.iter().enumerate() {
    assert_eq!(select(Some(&index.to_string())), Some(profile.name), "index {index}");
  }
  assert_eq!(select(Some(&PROFILES.len().to_string())), None);
  assert_eq!(select(Some("99")), None);
  assert_eq!(select(Some("-1")), None);

  // The selected profile answers with its own records, from its start.
  // SAFETY: as above.
  unsafe { std::env::set_var(PROFILE_ENV, "Core i7 (Nehalem)") };
  let Some(cpuid) = EmulatedCpuid::from_env() else {
    panic!("profile not selected");
  };
  assert_eq!(cpuid.cursor(), cpuid.profile().start);
  assert!(Probe(&cpuid).hw_crc32c());

  // SAFETY: as above.
  unsafe { std::env::set_var(PROFILE_ENV, "0") };
  let Some(cpuid) = EmulatedCpuid::from_env() else {
    panic!("profile not selected");
  };
  assert!(!Probe(&cpuid).hw_crc32c());
}

//! Basic CRC-32C usage: host dispatch, injected capabilities, diagnostics.
//!
//! Run with: `cargo run --example basic -p castagnoli`
//!
//! Set `CASTAGNOLI_CPUID_PROFILE` (a profile name or index) to also dispatch
//! against an emulated processor.

use castagnoli::{CachedCapability, Dispatcher, EmulatedCpuid, Fixed, Host, Probe, emulated::PROFILES};

fn main() {
  println!("=== CRC-32C Basic Examples ===\n");

  one_shot();
  injected();
  emulated();
}

/// One-shot computation on the host.
fn one_shot() {
  println!("--- Host ---\n");

  let crc = castagnoli::crc32(b"123456789");
  println!("CRC-32C(\"123456789\"): 0x{crc:08X}");
  assert_eq!(crc, castagnoli::CHECK);

  println!("{}", castagnoli::diag::crc32c());
  println!();
}

/// The same call with the capability answer supplied by the caller.
fn injected() {
  println!("--- Injected capability ---\n");

  let data = b"hello world";
  let portable = Dispatcher::new(Fixed(false));
  let hardware = Dispatcher::new(Fixed(true));
  let cached = Dispatcher::new(CachedCapability::new(Host));

  for (label, crc, selection) in [
    ("absent", portable.crc32(data), portable.diagnose()),
    ("present", hardware.crc32(data), hardware.diagnose()),
  ] {
    println!("{label:>8}: 0x{crc:08X}  ({selection})");
  }
  println!("  cached: 0x{:08X}", cached.crc32(data));
  println!();
}

/// Dispatch against canned CPUID answers.
fn emulated() {
  println!("--- Emulated processors ---\n");

  for profile in &PROFILES {
    let d = Dispatcher::new(Probe(EmulatedCpuid::new(profile)));
    println!("{:<26} {:<8} 0x{:08X}", profile.name, d.select().as_str(), d.crc32(b"123456789"));
  }

  if let Some(cpuid) = EmulatedCpuid::from_env() {
    let d = Dispatcher::new(Probe(cpuid));
    println!("\nfrom environment: {}", d.diagnose());
  }
}

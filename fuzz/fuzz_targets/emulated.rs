//! Fuzz target for emulated CPUID replay.
//!
//! Drives one profile with an arbitrary sequence of leaf queries and checks:
//! - The cursor never leaves the profile's record range
//! - A query for a leaf the profile has returns that leaf's registers
//! - Dispatch through the emulated capability always checksums correctly

#![no_main]

use arbitrary::Arbitrary;
use castagnoli::{
  CHECK, Cpuid, Dispatcher, EmulatedCpuid, Probe,
  emulated::{PROFILES, RECORDS},
};
use libfuzzer_sys::fuzz_target;

#[derive(Arbitrary, Debug)]
struct Input {
  profile: u8,
  leaves: Vec<u8>,
}

fuzz_target!(|input: Input| {
  let profile = &PROFILES[input.profile as usize % PROFILES.len()];
  let cpuid = EmulatedCpuid::new(profile);
  let dispatcher = Dispatcher::new(Probe(&cpuid));
  let known: Vec<u32> = profile.records().iter().map(|r| r.leaf).collect();

  for &choice in &input.leaves {
    // Mostly leaves the profile knows, sometimes one it does not.
    let leaf = match choice % 4 {
      0 => 0,
      1 => 1,
      2 => 0x8000_0000,
      _ => u32::from(choice),
    };

    let regs = cpuid.cpuid(leaf);
    let cursor = cpuid.cursor();
    assert!(
      (profile.start..profile.stop).contains(&cursor),
      "{}: cursor {cursor} escaped {}..{}",
      profile.name,
      profile.start,
      profile.stop
    );
    if known.contains(&leaf) {
      assert_eq!(RECORDS[cursor].leaf, leaf, "{}: landed on wrong leaf", profile.name);
      assert_eq!(RECORDS[cursor].regs, regs);
    }

    assert_eq!(dispatcher.crc32(b"123456789"), CHECK, "{}", profile.name);
  }
});

//! CPU capability detection for castagnoli.
//!
//! This crate answers exactly one question for the rest of the workspace:
//! can the host execute the hardware CRC-32C instruction?
//!
//! # Core Types
//!
//! - [`Cpuid`]: a source of CPUID answers ([`HostCpuid`] on x86, or the
//!   deterministic [`EmulatedCpuid`] fixture anywhere).
//! - [`Capability`]: the seam the dispatcher consumes. [`Host`] asks the real
//!   processor, [`Fixed`] pins an answer, and any [`Cpuid`] source can be
//!   wrapped in [`Probe`].
//!
//! # Main Entry Point
//!
//! ```
//! // Re-derived on every call; nothing is cached here.
//! let present = platform::detect();
//! # let _ = present;
//! ```
//!
//! # Architecture Support
//!
//! | Architecture | Feature | Mechanism |
//! |--------------|---------|-----------|
//! | x86 / x86_64 | SSE4.2 `crc32` | CPUID leaf 1, ECX bit 20 |
//! | aarch64 | ARMv8 CRC extension | `is_aarch64_feature_detected!` (std) or `target_feature` |
//! | other | none | always `false` |
//!
//! Under Miri, detection always reports `false` so the portable path is the
//! one being interpreted.

#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]
#![no_std]

#[cfg(feature = "std")]
extern crate std;

// ─────────────────────────────────────────────────────────────────────────────
// Core modules
// ─────────────────────────────────────────────────────────────────────────────

pub mod cpuid;
mod detect;
pub mod emulated;

// ─────────────────────────────────────────────────────────────────────────────
// Public API
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
pub use cpuid::HostCpuid;
pub use cpuid::{Cpuid, Registers};
pub use detect::{Capability, Fixed, Host, Probe, detect, detect_with};
pub use emulated::EmulatedCpuid;

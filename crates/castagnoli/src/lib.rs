//! CRC-32C (Castagnoli) with runtime backend selection.
//!
//! One function, [`crc32`], checksums a byte slice. On every call it asks the
//! host whether the hardware CRC-32C instruction is available and routes to
//! either the instruction-based kernel or a portable table-driven one. Both
//! produce the standard CRC-32C (init `0xFFFFFFFF`, reflected, xorout
//! `0xFFFFFFFF`), so callers never need to know which one ran.
//!
//! # Example
//!
//! ```rust
//! assert_eq!(castagnoli::crc32(b"123456789"), 0xE306_9283);
//! assert_eq!(castagnoli::crc32(b""), 0);
//! ```
//!
//! # Backends
//!
//! | Backend | Where | Kernel |
//! |---------|-------|--------|
//! | Hardware | x86 / x86_64 with SSE4.2 | `crc32` on 4-byte words, then 1-byte tail |
//! | Hardware | aarch64 with the CRC extension | `crc32cw` / `crc32cb` |
//! | Portable | everywhere | 256-entry table, one byte per step |
//!
//! # Injecting capabilities
//!
//! [`Dispatcher`] takes any [`Capability`], which makes the selection policy
//! testable without the matching hardware:
//!
//! ```rust
//! use castagnoli::{Backend, Dispatcher, EmulatedCpuid, Probe};
//!
//! let k10 = Dispatcher::new(Probe(EmulatedCpuid::by_name("Phenom II (K10)").unwrap()));
//! assert_eq!(k10.select(), Backend::Portable);
//! assert_eq!(k10.crc32(b"123456789"), 0xE306_9283);
//! ```
//!
//! # no_std Support
//!
//! Disable the `std` feature for embedded use. The lookup table then becomes a
//! compile-time constant, and hardware selection relies on compile-time target
//! features only.
//!
//! # Forcing a backend
//!
//! A dispatcher can be pinned to one backend with
//! [`Dispatcher::with_force`]; see [`config`]. Nothing process-wide can
//! override the per-call capability query of [`crc32`].

#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]
#![no_std]

#[cfg(feature = "std")]
extern crate std;

pub mod config;
mod crc32c;
pub mod diag;
mod dispatch;
mod error;
pub mod reference;

pub use config::Force;
pub use crc32c::{CHECK, Engine, INIT, POLYNOMIAL, POLYNOMIAL_REFLECTED, XOROUT, portable};
#[cfg(feature = "std")]
pub use dispatch::CachedCapability;
pub use dispatch::{Backend, Dispatcher, crc32};
pub use error::ParseForceError;
pub use platform::{Capability, Cpuid, EmulatedCpuid, Fixed, Host, Probe, Registers, emulated};

/// Returns the kernel the host dispatcher would run right now.
///
/// This is intended for diagnostics and benchmarking.
#[doc(hidden)]
#[inline]
#[must_use]
pub fn selected_backend() -> &'static str {
  diag::crc32c().kernel
}

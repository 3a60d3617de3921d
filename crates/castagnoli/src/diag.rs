//! Selection diagnostics.
//!
//! There is no logging in the checksum path. Instead, [`crc32c`] (or
//! [`Dispatcher::diagnose`]) reports what the next call would do and why.
//!
//! ```
//! let selection = castagnoli::diag::crc32c();
//! assert!(!selection.kernel.is_empty());
//! ```

use core::fmt;

use crate::{Backend, Dispatcher, config::Force};

/// Why a backend was chosen.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SelectionReason {
  /// A force mode decided without asking the capability.
  Forced,
  /// The capability reported no hardware CRC-32C.
  CapabilityAbsent,
  /// The capability reported hardware CRC-32C, but this host cannot execute it.
  InstructionUnavailable,
  /// The capability reported hardware CRC-32C and the host agrees.
  Auto,
}

impl SelectionReason {
  #[must_use]
  pub const fn as_str(self) -> &'static str {
    match self {
      Self::Forced => "forced",
      Self::CapabilityAbsent => "capability-absent",
      Self::InstructionUnavailable => "instruction-unavailable",
      Self::Auto => "auto",
    }
  }
}

impl fmt::Display for SelectionReason {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

/// Snapshot of one backend selection.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Crc32cSelection {
  /// Force mode in effect before clamping.
  pub requested_force: Force,
  /// What the capability answered, if it was asked.
  pub capability: Option<bool>,
  /// Whether the host can execute the CRC instruction.
  pub instruction_available: bool,
  pub backend: Backend,
  pub reason: SelectionReason,
  /// Kernel name: `portable/table`, or the hardware engine's name.
  pub kernel: &'static str,
  /// Whether the portable lookup table has been built yet.
  pub table_ready: bool,
}

impl fmt::Display for Crc32cSelection {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(
      f,
      "crc32c: backend={} kernel={} reason={} force={}",
      self.backend, self.kernel, self.reason, self.requested_force
    )?;
    match self.capability {
      Some(present) => write!(f, " capability={present}")?,
      None => f.write_str(" capability=unasked")?,
    }
    write!(
      f,
      " instruction={} table_ready={}",
      self.instruction_available, self.table_ready
    )
  }
}

/// Selection the host dispatcher would make now.
#[must_use]
pub fn crc32c() -> Crc32cSelection {
  Dispatcher::host().diagnose()
}

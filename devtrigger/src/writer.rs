//! Per-path event writes.
//!
//! Writing an action token into a `uevent` control file makes the kernel
//! re-emit the corresponding hotplug event. The write either happens in
//! full, or the attempt is classified into one of two non-success outcomes
//! so the caller can tell a vanished device from a real failure.

use std::fs::OpenOptions;
use std::io::{ErrorKind, Write};
use std::path::Path;

/// Outcome of one write attempt against a uevent control file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WriteOutcome {
    /// The full action token was written.
    Written,

    /// The control file does not exist. A device can vanish between
    /// enumeration and write (hot-unplug), and not every device directory
    /// exposes a uevent file; neither is an error.
    Absent,

    /// The control file could not be opened for a reason other than
    /// absence, or the write did not transfer the full token.
    Failed(String),
}

impl WriteOutcome {
    /// Only `Failed` counts against the run.
    pub fn is_failure(&self) -> bool {
        matches!(self, WriteOutcome::Failed(_))
    }
}

/// Write `action` into the uevent control file at `path`.
///
/// The file is opened write-only and never created; a control file is
/// kernel-backed and must already exist. The token must transfer in a
/// single write call. The handle is dropped on every exit path, so it
/// cannot leak across a failed write.
pub fn write_event(path: &Path, action: &str) -> WriteOutcome {
    let mut file = match OpenOptions::new().write(true).open(path) {
        Ok(file) => file,
        Err(e) if e.kind() == ErrorKind::NotFound => return WriteOutcome::Absent,
        Err(e) => return WriteOutcome::Failed(format!("open failed: {}", e)),
    };

    match file.write(action.as_bytes()) {
        Ok(n) if n == action.len() => WriteOutcome::Written,
        Ok(n) => WriteOutcome::Failed(format!(
            "short write: {} of {} bytes",
            n,
            action.len()
        )),
        Err(e) => WriteOutcome::Failed(format!("write failed: {}", e)),
    }
}

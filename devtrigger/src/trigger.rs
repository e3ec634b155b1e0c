//! Trigger orchestration.
//!
//! One invocation is a linear sweep: resolve the pattern once, attempt a
//! write against every resolved path, aggregate the outcomes. Per-path
//! failures never abort the remaining traversal; the aggregate result is
//! the only failure signal, and detailed attribution lives in the
//! diagnostic stream.

use std::path::PathBuf;

use crate::error::TriggerError;
use crate::layout::SysfsLayout;
use crate::resolve;
use crate::sink::{DiagnosticSink, Severity};
use crate::writer::{self, WriteOutcome};

/// Options threaded through one trigger invocation.
///
/// Action and verbosity are explicit parameters rather than process-global
/// state, so the engine can be driven from tests in isolation.
#[derive(Debug, Clone, Default)]
pub struct TriggerOptions {
    /// Also emit `Written` and `Absent` outcomes as debug-tier diagnostics.
    /// Failures are always emitted.
    pub verbose: bool,
}

/// Aggregate of all write outcomes for one invocation.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct TriggerSummary {
    /// Paths whose control file received the full token.
    pub written: usize,

    /// Paths whose control file no longer existed at write time.
    pub absent: usize,

    /// Paths whose open or write failed.
    pub failed: usize,

    /// Enumeration of one hierarchy hit a real error; the sweep covered
    /// only the paths that could be discovered.
    pub degraded: bool,
}

impl TriggerSummary {
    /// A run succeeds iff no write failed. Absent control files and an
    /// empty match set are expected steady states, not failures.
    pub fn is_success(&self) -> bool {
        self.failed == 0
    }
}

/// Trigger `action` events for every device matching `pattern`.
///
/// Resolution happens exactly once per call; outcomes never cause
/// re-resolution or retry. The only fatal error is an invalid pattern,
/// raised before any write is attempted.
pub fn trigger(
    layout: &SysfsLayout,
    pattern: &str,
    action: &str,
    options: &TriggerOptions,
    sink: &mut dyn DiagnosticSink,
) -> Result<TriggerSummary, TriggerError> {
    let resolution = resolve::resolve(layout, pattern)?;

    if resolution.degraded {
        sink.emit(
            Severity::Warn,
            &format!(
                "device enumeration for pattern {:?} was incomplete; continuing with partial results",
                pattern
            ),
        );
    }

    let mut summary = sweep(&resolution.paths, action, options, sink);
    summary.degraded = resolution.degraded;
    Ok(summary)
}

/// Attempt one write against every path in order, aggregating outcomes.
///
/// Every path is attempted exactly once; a failure never short-circuits
/// the rest of the sweep.
pub fn sweep(
    paths: &[PathBuf],
    action: &str,
    options: &TriggerOptions,
    sink: &mut dyn DiagnosticSink,
) -> TriggerSummary {
    let mut summary = TriggerSummary::default();

    for path in paths {
        match writer::write_event(path, action) {
            WriteOutcome::Written => {
                summary.written += 1;
                if options.verbose {
                    sink.emit(
                        Severity::Debug,
                        &format!("{}: wrote to {}", action, path.display()),
                    );
                }
            }
            WriteOutcome::Absent => {
                summary.absent += 1;
                if options.verbose {
                    sink.emit(
                        Severity::Debug,
                        &format!("{}: no uevent file at {}", action, path.display()),
                    );
                }
            }
            WriteOutcome::Failed(reason) => {
                summary.failed += 1;
                sink.emit(
                    Severity::Error,
                    &format!("{}: {}: {}", action, path.display(), reason),
                );
            }
        }
    }

    summary
}

//! Error types for the trigger engine.

use thiserror::Error;

/// Fatal errors from the trigger engine.
///
/// Per-path write failures and degraded enumeration are reported as values
/// ([`WriteOutcome::Failed`](crate::writer::WriteOutcome) and
/// [`Resolution::degraded`](crate::resolve::Resolution)), not as errors. The
/// only condition that aborts a run is a selection pattern that cannot be
/// formed into a filesystem glob expression, raised before any write.
#[derive(Debug, Error)]
pub enum TriggerError {
    /// The selection pattern cannot be formed into a valid glob expression.
    #[error("invalid selection pattern {pattern:?}: {detail}")]
    PatternInvalid { pattern: String, detail: String },
}

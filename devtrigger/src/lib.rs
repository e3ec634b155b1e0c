//! devtrigger - synthetic hotplug event injection.
//!
//! The kernel delivers hotplug events as devices are enumerated, which at
//! boot happens before the hotplug daemon is ready to receive them. Writing
//! an action token ("add", "remove") into a device's `uevent` control file
//! makes the kernel re-emit the event, so a late-starting consumer can catch
//! up on everything it missed.
//!
//! ## Modules
//!
//! - `layout`: locations of the class and bus hierarchies
//! - `resolve`: selection-pattern expansion into control-file paths
//! - `writer`: per-path write attempts and outcome classification
//! - `trigger`: orchestration and result aggregation
//! - `sink`: diagnostic stream abstraction

pub mod error;
pub mod layout;
pub mod resolve;
pub mod sink;
pub mod trigger;
pub mod writer;

// Re-export commonly used types
pub use error::TriggerError;
pub use layout::SysfsLayout;
pub use resolve::Resolution;
pub use sink::{DiagnosticSink, MemorySink, Severity, TracingSink};
pub use trigger::{sweep, trigger, TriggerOptions, TriggerSummary};
pub use writer::WriteOutcome;

/// Default action token.
pub const ACTION_ADD: &str = "add";

/// Action token for synthetic removal events.
pub const ACTION_REMOVE: &str = "remove";

//! devtrigger - re-announce device presence via sysfs uevents.
//!
//! The kernel sends hotplug events as devices are enumerated, which at boot
//! is usually before the hotplug daemon is ready. Running this afterwards
//! makes the kernel resend the events for everything already present.

use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use tracing::{debug, error};
use tracing_subscriber::EnvFilter;

use devtrigger::{
    trigger, SysfsLayout, TracingSink, TriggerOptions, TriggerSummary, ACTION_ADD, ACTION_REMOVE,
};

#[derive(Debug, Parser)]
#[command(
    name = "devtrigger",
    version,
    about = "Trigger synthetic hotplug events for devices already present"
)]
struct Cli {
    /// Trigger events for this subsystem only (glob; "all" means every subsystem)
    #[arg(short, long, default_value = "*")]
    subsystem: String,

    /// Action token to write ("add", "remove", or any token the kernel accepts)
    #[arg(short, long, default_value = ACTION_ADD, conflicts_with = "remove")]
    action: String,

    /// Trigger remove events rather than add
    #[arg(short, long)]
    remove: bool,

    /// Enable debugging messages
    #[arg(short, long)]
    debug: bool,

    /// Root of the sysfs mount
    #[arg(long, env = "DEVTRIGGER_SYSFS_ROOT", default_value = "/sys")]
    sysfs_root: String,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    init_logging(cli.debug);

    match run(&cli) {
        Ok(summary) => {
            debug!(
                written = summary.written,
                absent = summary.absent,
                failed = summary.failed,
                degraded = summary.degraded,
                "sweep complete"
            );
            if summary.is_success() {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            }
        }
        Err(e) => {
            error!(error = %e, "trigger failed");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<TriggerSummary> {
    let layout = SysfsLayout::rooted_at(&cli.sysfs_root);

    // "all" is the historical spelling of the wildcard
    let pattern = if cli.subsystem == "all" {
        "*"
    } else {
        &cli.subsystem
    };
    let action = if cli.remove { ACTION_REMOVE } else { &cli.action };

    let options = TriggerOptions { verbose: cli.debug };
    let mut sink = TracingSink;
    let summary = trigger(&layout, pattern, action, &options, &mut sink)?;
    Ok(summary)
}

fn init_logging(debug: bool) {
    let default_level = if debug { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .compact()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

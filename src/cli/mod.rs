// Command line
// ------------
// `Args` adds the runner's output file, the request timeout and log
// options to the plugin settings. `run` validates the settings, uploads
// every artifact and writes `UPLOAD_STATUS` for later pipeline steps.

pub mod logging;

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
pub use logging::init_global_subscriber;

use crate::api::ReqwestTransport;
use crate::args::PluginInput;
use crate::observer::TracingObserver;
use crate::output;
use crate::ui::ProgressObserver;
use crate::validate::{self, Prepared};

/// Upload build artifacts to a Nexus repository.
///
/// Every option can also be supplied through the `PLUGIN_*` environment
/// variable shown next to it, which is how CI runners pass step settings.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    #[command(flatten)]
    pub input: PluginInput,

    /// File that receives output variables (`UPLOAD_STATUS`)
    #[arg(long, env = "DRONE_OUTPUT", value_name = "PATH")]
    pub output_file: Option<PathBuf>,

    /// Per-request timeout in seconds
    ///
    /// Without it, the HTTP client's defaults apply.
    #[arg(long, env = "PLUGIN_TIMEOUT", value_name = "SECS")]
    pub timeout: Option<u64>,

    #[command(flatten)]
    pub log: LogArgs,
}

#[derive(Parser, Clone, Debug, Default)]
#[command(next_help_heading = "Log Options")]
pub struct LogArgs {
    /// Increase logging verbosity (-v for DEBUG, -vv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbosity: u8,

    /// Decrease logging verbosity (-q for WARN, -qq for ERROR)
    ///
    /// Takes precedence over every other level setting.
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub quiet: u8,

    /// Log level name, e.g. `debug`; overrides `RUST_LOG` and `-v`
    #[arg(long = "log-level", env = "PLUGIN_LOG_LEVEL", value_name = "LEVEL")]
    pub level: Option<String>,
}

/// Validate the settings, upload every artifact and publish the result.
///
/// `UPLOAD_STATUS` is written whether or not uploads failed; a failure to
/// write it is logged but does not change the outcome.
pub fn run(args: Args) -> anyhow::Result<()> {
    let Args {
        input,
        output_file,
        timeout,
        ..
    } = args;

    let Prepared {
        session,
        mut ledger,
    } = validate::prepare(&input).context("invalid plugin settings")?;
    for rejected in ledger.entries() {
        tracing::warn!(
            file = %rejected.file,
            artifact_id = %rejected.artifact_id,
            "skipping artifact: {}",
            rejected.err
        );
    }

    let transport = ReqwestTransport::new(timeout.map(Duration::from_secs))
        .context("could not set up HTTP client")?;
    let observer = ProgressObserver::new(TracingObserver);

    let result = crate::dispatch(&session, &mut ledger, &transport, &observer);

    match output_file {
        Some(path) => {
            if let Err(e) = output::write_upload_status(&path, &ledger) {
                tracing::warn!("writing output variable {} failed: {}", output::UPLOAD_STATUS, e);
            }
        }
        None => tracing::debug!("no output file configured, not writing {}", output::UPLOAD_STATUS),
    }

    if ledger.is_empty() {
        tracing::info!("All artifacts uploaded successfully");
    }
    result.context("upload failed")
}

// Entrypoint for the plugin binary.
// - Keeps `main` small: parse settings, set up logging, hand over to
//   `cli::run`.
// - Any error (bad settings or failed uploads) becomes a failing exit code
//   so the pipeline step is marked as failed.

use std::process::ExitCode;

use clap::Parser;
use nexus_publish::cli::{self, Args};

fn main() -> ExitCode {
    let args = Args::parse();
    cli::init_global_subscriber(&args.log);

    match cli::run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}

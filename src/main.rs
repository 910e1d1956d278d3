use std::process::ExitCode;

use apk_decompile::cli::Cli;
use apk_decompile::error::FAILURE_EXIT_CODE;
use apk_decompile::{logging, run_decompile_workflow};
use clap::Parser;
use tracing::error;

fn main() -> ExitCode {
    let cli = Cli::parse();
    let cfg = cli.to_config();

    if let Err(err) = logging::init(&cfg) {
        eprintln!("[!]  {err:#}");
        return ExitCode::from(FAILURE_EXIT_CODE);
    }

    match run_decompile_workflow(&cfg) {
        Ok(summary) if summary.all_succeeded() => ExitCode::SUCCESS,
        Ok(_) => ExitCode::from(FAILURE_EXIT_CODE),
        Err(err) => {
            // Validation and launch failures are logged where they happen.
            if !err.is_validation_error() && !err.is_launch_failure() {
                error!("{err}");
            }
            ExitCode::from(FAILURE_EXIT_CODE)
        }
    }
}

//! `docflow` — parses arguments, builds the pipeline's `Services`, runs
//! the input through it, and picks an exit code from the batch report.

use clap::Parser;
use docflow_cli::Cli;
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();

    match docflow_cli::run(&cli) {
        Ok(report) => {
            tracing::info!(
                total = report.total_documents,
                succeeded = report.succeeded,
                failed = report.failed,
                "batch complete"
            );
            if cli.strict && report.failed > 0 {
                std::process::exit(1);
            }
        }
        Err(e) => {
            tracing::error!(error = %e, "docflow failed");
            std::process::exit(1);
        }
    }
}

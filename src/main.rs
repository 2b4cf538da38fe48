use clap::Parser;
use clap::error::ErrorKind;
use tracing_subscriber::EnvFilter;

use primeherd::cli::{Cli, Output};
use primeherd::error::PipelineError;

fn main() {
    // Diagnostics go to stderr so stdout stays clean; spawned cluster ranks
    // inherit stderr, so RUST_LOG reaches every rank.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            // clap's own usage exit code would collide with the input-open
            // category, so map it here: help and version succeed, usage
            // problems exit 1.
            let code = match err.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => 0,
                _ => 1,
            };
            let _ = err.print();
            std::process::exit(code);
        }
    };

    if let Err(err) = cli.run() {
        let code = err
            .downcast_ref::<PipelineError>()
            .map(|e| e.exit_code())
            .unwrap_or(1);
        Output::new(false, false).error(&format!("{err:#}"));
        std::process::exit(code);
    }
}

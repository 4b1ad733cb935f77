//! Shared plumbing for the faqkit command-line tools.

use clap::error::ErrorKind;
use tracing_subscriber::EnvFilter;

/// Initialize tracing for a CLI process.
///
/// Logs go to stderr so stdout stays pure JSON for the commands that
/// print results. `RUST_LOG` overrides the default `info` filter.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();
}

/// Parse CLI arguments, printing clap's usage text and exiting with
/// code 1 when they are invalid. `--help` and `--version` still exit 0.
pub fn parse_or_usage<T: clap::Parser>() -> T {
    match T::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            let code = match err.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => 0,
                _ => 1,
            };
            let _ = err.print();
            std::process::exit(code);
        }
    }
}

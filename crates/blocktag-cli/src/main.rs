use crate::cmd::{run_command_with_args, Cli};
use clap::Parser;
use std::env;
use std::process::exit;
use tracing::trace;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

mod cmd;
mod config;
mod parse;
mod tag;

/// Env var holding log directives, e.g. `BLOCKTAG_LOG=blocktag=trace`.
const LOG_ENV: &str = "BLOCKTAG_LOG";

/// Log filter built from `directives`, logging nothing when absent.
fn log_filter(directives: Option<&str>) -> EnvFilter {
    EnvFilter::builder()
        .with_default_directive(LevelFilter::OFF.into())
        .parse_lossy(directives.unwrap_or_default())
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    // Logs go to stderr so stdout only carries parsed blocks.
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(log_filter(env::var(LOG_ENV).ok().as_deref()))
        .with_writer(std::io::stderr)
        .finish();
    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("failed to set global cli tracing subscriber: {e}");
    }

    trace!("starting cli");

    if let Err(e) = run_command_with_args(Cli::parse()).await {
        eprintln!("failed to run command: {e:?}");
        exit(1)
    }
}

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

#[cfg(test)]
mod testutil;

mod accounts;
mod categorize;
mod cmd;
mod config;
mod filespec;
mod importers;
mod journal;
mod meta;
mod pipeline;
mod refunds;
mod tags;

const DEFAULT_LOG_FILTER: &str = "monzoimport=warn";

#[derive(Debug, Parser)]
/// Converts a Monzo CSV export into categorized Ledger transactions.
struct Command {
    #[command(flatten)]
    cmd: cmd::Cmd,
}

fn setup_logging() {
    // The journal may go to stdout, so logs go to stderr.
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cmd = Command::parse();
    setup_logging();
    cmd.cmd.run()
}

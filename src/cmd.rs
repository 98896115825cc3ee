use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use tracing::debug;

use crate::config::{load_overrides, Config};
use crate::filespec::{self, FileSpec};
use crate::journal;
use crate::pipeline::Pipeline;

#[derive(Debug, Args)]
pub struct Cmd {
    /// The Monzo CSV export to read. "-" reads from stdin.
    input: FileSpec,
    /// The ledger file to write to (overwrites any existing file). "-" writes
    /// to stdout.
    #[arg(short = 'o', long = "output", default_value = "-")]
    output: FileSpec,
    /// RON file of lookup tables and options. Built-in defaults are used
    /// without one.
    #[arg(short = 'c', long = "config")]
    config: Option<PathBuf>,
    /// RON file mapping transaction IDs to accounts. Entries replace any for
    /// the same ID in the config file.
    #[arg(long = "overrides")]
    overrides: Option<PathBuf>,
    /// Account the statement belongs to.
    #[arg(long = "account")]
    account: Option<String>,
    /// Currency for rows that leave the currency column empty.
    #[arg(long = "currency")]
    currency: Option<String>,
}

impl Cmd {
    pub fn run(&self) -> Result<()> {
        let config = self.config()?;
        let trns = Pipeline::from_config(&config).run(&self.input)?;
        debug!(count = trns.len(), output = %self.output, "writing journal");
        filespec::write_file(&self.output, &journal::render(trns))
    }

    fn config(&self) -> Result<Config> {
        let mut config = match &self.config {
            Some(path) => Config::from_path(path)?,
            None => Config::default(),
        };
        if let Some(path) = &self.overrides {
            config.add_overrides(load_overrides(path)?);
        }
        if let Some(account) = &self.account {
            config.account = account.clone();
        }
        if let Some(currency) = &self.currency {
            config.currency = currency.clone();
        }
        Ok(config)
    }
}

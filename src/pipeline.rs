//! Import, categorize, drop refunds and skipped transactions, in that order.

use anyhow::Result;
use itertools::{Either, Itertools};
use ledger_parser::Transaction;
use tracing::{info, warn};

use crate::categorize::{Categorized, Categorizer};
use crate::config::Config;
use crate::filespec::FileSpec;
use crate::importers::monzo_csv::CsvImporter;
use crate::journal::Entry;
use crate::refunds::filter_refunds;
use crate::tags::SKIP_TRANSACTION;

pub struct Pipeline {
    importer: CsvImporter,
    categorizer: Categorizer,
    refund_window_days: i64,
    uncategorized_account: String,
}

impl Pipeline {
    pub fn from_config(config: &Config) -> Self {
        Self {
            importer: config.importer(),
            categorizer: Categorizer::from_config(config),
            refund_window_days: config.refund_window_days,
            uncategorized_account: config.tables.uncategorized_account.clone(),
        }
    }

    /// Reads the statement at `input` and returns the transactions to write.
    pub fn run(&self, input: &FileSpec) -> Result<Vec<Transaction>> {
        let categorized = match input {
            FileSpec::Path(path) => self.importer.extract(path, &self.categorizer)?,
            FileSpec::Stdio => self
                .importer
                .extract_from_reader(std::io::stdin().lock(), &self.categorizer)?,
        };
        Ok(self.finish(categorized))
    }

    #[cfg(test)]
    pub fn run_reader<R: std::io::Read>(&self, reader: R) -> Result<Vec<Transaction>> {
        let categorized = self
            .importer
            .extract_from_reader(reader, &self.categorizer)?;
        Ok(self.finish(categorized))
    }

    fn finish(&self, categorized: Vec<Categorized>) -> Vec<Transaction> {
        let imported = categorized.len();
        let categorized = filter_refunds(categorized, self.refund_window_days);

        let (kept, excluded): (Vec<Transaction>, Vec<Entry>) =
            categorized.into_iter().partition_map(|c| {
                if c.decision.is_excluded() || c.entry.meta().is_flagged(SKIP_TRANSACTION) {
                    Either::Right(c.entry)
                } else {
                    Either::Left(c.entry.trn)
                }
            });
        for entry in &excluded {
            info!(date = %entry.trn.date, payee = entry.payee.as_str(), "skipped transaction");
        }

        let uncategorized = kept
            .iter()
            .filter(|trn| {
                trn.postings
                    .iter()
                    .skip(1)
                    .any(|p| p.account == self.uncategorized_account)
            })
            .count();
        if uncategorized > 0 {
            warn!(
                count = uncategorized,
                account = self.uncategorized_account.as_str(),
                "transactions need manual categorization"
            );
        }
        info!(
            imported,
            written = kept.len(),
            skipped = excluded.len(),
            "finished"
        );
        kept
    }
}

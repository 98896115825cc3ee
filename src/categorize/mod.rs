//! Chooses the account for the offsetting posting of each imported
//! transaction.

use anyhow::{anyhow, Result};
use tracing::debug;

pub mod rule;

use crate::config::{Config, Tables};
use crate::importers::importer::RowCategorizer;
use crate::importers::monzo_csv::{
    BANK_CATEGORY_FIELD, COMMENT_FIELD, PAYEE_FIELD, TRANSACTION_ID_FIELD,
};
use crate::importers::row::Row;
use crate::journal::{self, Entry};
use rule::{Decision, Rule, RuleContext, INCOMING_CHAIN, OUTGOING_CHAIN};

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Options {
    /// Don't fall back to the bank's category for outgoing transactions.
    pub ignore_bank_categories: bool,
}

/// An entry with its offsetting posting, and how it was chosen.
#[derive(Clone, Debug)]
pub struct Categorized {
    pub entry: Entry,
    pub rule: Rule,
    pub decision: Decision,
}

impl AsRef<Entry> for Categorized {
    fn as_ref(&self) -> &Entry {
        &self.entry
    }
}

pub struct Categorizer {
    opts: Options,
    tables: Tables,
}

impl Categorizer {
    pub fn new(opts: Options, tables: Tables) -> Self {
        Self { opts, tables }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            Options {
                ignore_bank_categories: config.ignore_bank_categories,
            },
            config.tables.clone(),
        )
    }

    /// An override for the transaction ID wins outright. Otherwise the first
    /// matching rule of the chain for the transaction's direction decides, or
    /// failing that the uncategorized account.
    pub fn classify(&self, ctx: &RuleContext) -> (Rule, Decision) {
        if let Some(decision) = Rule::TransactionOverride.evaluate(ctx, &self.tables, &self.opts) {
            return (Rule::TransactionOverride, decision);
        }

        let chain = if ctx.outgoing {
            OUTGOING_CHAIN
        } else {
            INCOMING_CHAIN
        };
        chain
            .iter()
            .find_map(|rule| {
                rule.evaluate(ctx, &self.tables, &self.opts)
                    .map(|decision| (*rule, decision))
            })
            .unwrap_or_else(|| {
                (
                    Rule::Uncategorized,
                    Decision::Include(self.tables.uncategorized_account.clone()),
                )
            })
    }

    /// Appends a posting that balances the entry's first posting.
    pub fn categorize(&self, mut entry: Entry, row: &Row) -> Result<Categorized> {
        let amount = journal::first_amount(&entry.trn)
            .ok_or_else(|| anyhow!("line {}: transaction has no amount", row.line()))?
            .clone();

        let ctx = RuleContext {
            transaction_id: row.field(TRANSACTION_ID_FIELD)?,
            payee: row.field(PAYEE_FIELD)?,
            bank_category: row.field(BANK_CATEGORY_FIELD)?,
            comment: row.field(COMMENT_FIELD)?,
            outgoing: journal::is_outgoing(&amount),
        };
        let (rule, decision) = self.classify(&ctx);
        debug!(
            line = row.line(),
            id = ctx.transaction_id,
            payee = ctx.payee,
            comment = ctx.comment,
            ?rule,
            account = decision.account(),
            "categorized"
        );

        entry
            .trn
            .postings
            .push(journal::posting(decision.account(), journal::negate(&amount)));

        Ok(Categorized {
            entry,
            rule,
            decision,
        })
    }
}

impl RowCategorizer for Categorizer {
    type Output = Categorized;

    fn categorize(&self, entry: Entry, row: &Row) -> Result<Categorized> {
        Categorizer::categorize(self, entry, row)
    }
}

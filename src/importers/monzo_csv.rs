//! Reads a bank CSV export with a header row into draft transactions.

use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::str::FromStr;

use anyhow::{Context, Result};
use rust_decimal::Decimal;
use thiserror::Error;
use tracing::debug;

use crate::accounts::{ASSETS_MONZO_CASH, DEFAULT_CURRENCY};
use crate::importers::date::parse_day_first;
use crate::importers::importer::RowCategorizer;
use crate::importers::row::Row;
use crate::journal::{self, Entry};
use crate::meta::Metadata;
use crate::tags;

/// Fields the categorizer reads by position in the Monzo export layout.
pub const TRANSACTION_ID_FIELD: usize = 0;
pub const PAYEE_FIELD: usize = 4;
pub const BANK_CATEGORY_FIELD: usize = 6;
pub const COMMENT_FIELD: usize = 11;

const DATE_COLUMN: &str = "Date";
const NARRATION_COLUMN: &str = "Description";
const AMOUNT_COLUMN: &str = "Amount";
const CURRENCY_COLUMN: &str = "Currency";
const TRANSACTION_ID_COLUMN: &str = "Transaction ID";
const PAYEE_COLUMN: &str = "Name";
const CATEGORY_COLUMN: &str = "Category";
const COMMENT_COLUMN: &str = "Notes and #tags";

#[derive(Debug, Error)]
pub enum ReadError {
    #[error("missing column {column:?} in CSV header")]
    MissingColumn { column: &'static str },
    #[error("column {column:?} is at position {got} in CSV header, want {want}")]
    MisplacedColumn {
        column: &'static str,
        got: usize,
        want: usize,
    },
    #[error("line {line}: missing field {index} (row has {len} fields)")]
    MissingField { line: u64, index: usize, len: usize },
    #[error("line {line}: bad date {value:?}, want a day-first date")]
    BadDate { line: u64, value: String },
    #[error("line {line}: bad amount {value:?}")]
    BadAmount { line: u64, value: String },
}

/// Column positions, resolved against a header row.
#[derive(Debug)]
struct Positions {
    date: usize,
    narration: usize,
    amount: usize,
    currency: Option<usize>,
    transaction_id: Option<usize>,
    payee: Option<usize>,
    category: Option<usize>,
}

impl Positions {
    fn resolve(headers: &csv::StringRecord) -> Result<Self, ReadError> {
        let find = |column: &str| headers.iter().position(|h| h == column);
        let require = |column: &'static str| find(column).ok_or(ReadError::MissingColumn { column });
        // Columns also read by position when categorizing must be where the
        // categorizer expects them.
        let fixed = |column: &'static str, want: usize| match find(column) {
            Some(got) if got != want => Err(ReadError::MisplacedColumn { column, got, want }),
            found => Ok(found),
        };

        fixed(COMMENT_COLUMN, COMMENT_FIELD)?;
        Ok(Self {
            date: require(DATE_COLUMN)?,
            narration: require(NARRATION_COLUMN)?,
            amount: require(AMOUNT_COLUMN)?,
            currency: find(CURRENCY_COLUMN),
            transaction_id: fixed(TRANSACTION_ID_COLUMN, TRANSACTION_ID_FIELD)?,
            payee: fixed(PAYEE_COLUMN, PAYEE_FIELD)?,
            category: fixed(CATEGORY_COLUMN, BANK_CATEGORY_FIELD)?,
        })
    }
}

/// Builds draft entries with a single posting against `account`, and hands
/// each to a `RowCategorizer` to complete.
#[derive(Clone, Debug)]
pub struct CsvImporter {
    pub account: String,
    pub currency: String,
}

impl Default for CsvImporter {
    fn default() -> Self {
        Self {
            account: ASSETS_MONZO_CASH.to_string(),
            currency: DEFAULT_CURRENCY.to_string(),
        }
    }
}

impl CsvImporter {
    pub fn extract<C: RowCategorizer>(
        &self,
        path: &Path,
        categorizer: &C,
    ) -> Result<Vec<C::Output>> {
        let file = File::open(path).with_context(|| format!("opening {:?} for reading", path))?;
        self.extract_from_reader(file, categorizer)
            .with_context(|| format!("importing {:?}", path))
    }

    pub fn extract_from_reader<R: Read, C: RowCategorizer>(
        &self,
        reader: R,
        categorizer: &C,
    ) -> Result<Vec<C::Output>> {
        let reader = encoding_rs_io::DecodeReaderBytesBuilder::new()
            .encoding(Some(encoding_rs::UTF_8))
            .strip_bom(true)
            .build(reader);
        let mut csv_rdr = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(reader);
        let positions = Positions::resolve(csv_rdr.headers()?)?;

        let mut results = Vec::new();
        for record in csv_rdr.records() {
            let record = record?;
            let line = record.position().map(csv::Position::line).unwrap_or(0);
            let row = Row::new(line, record);
            let entry = self.draft_entry(&positions, &row)?;
            results.push(categorizer.categorize(entry, &row)?);
        }
        debug!(count = results.len(), "imported rows");
        Ok(results)
    }

    fn draft_entry(&self, pos: &Positions, row: &Row) -> Result<Entry, ReadError> {
        let date_str = row.field(pos.date)?;
        let date = parse_day_first(date_str).ok_or_else(|| ReadError::BadDate {
            line: row.line(),
            value: date_str.to_string(),
        })?;

        let amount_str = row.field(pos.amount)?;
        let quantity = parse_quantity(amount_str).ok_or_else(|| ReadError::BadAmount {
            line: row.line(),
            value: amount_str.to_string(),
        })?;
        let currency = match opt_field(row, pos.currency)? {
            "" => self.currency.as_str(),
            c => c,
        };

        let mut builder = Entry::builder(date, opt_field(row, pos.payee)?, row.field(pos.narration)?)
            .meta(
                Metadata::builder()
                    .with_nonempty_value(tags::CATEGORY, opt_field(row, pos.category)?)
                    .build(),
            )
            .posting(&self.account, journal::amount(quantity, currency));
        let id = opt_field(row, pos.transaction_id)?;
        if !id.is_empty() {
            builder = builder.code(id);
        }
        Ok(builder.build())
    }
}

/// Reads a column that may be absent from the header as empty.
fn opt_field(row: &Row, index: Option<usize>) -> Result<&str, ReadError> {
    match index {
        Some(index) => row.field(index),
        None => Ok(""),
    }
}

fn parse_quantity(s: &str) -> Option<Decimal> {
    let cleaned: String = s.trim().chars().filter(|c| *c != ',').collect();
    if cleaned.is_empty() {
        return None;
    }
    Decimal::from_str(&cleaned).ok()
}

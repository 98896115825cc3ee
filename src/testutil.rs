use chrono::NaiveDate;
use ledger_parser::Amount;
use rust_decimal::Decimal;

use crate::importers::row::Row;
use crate::journal::{self, Entry};

const MONZO_HEADER: &str = "Transaction ID,Date,Time,Type,Name,Emoji,Category,Amount,Currency,\
    Local amount,Local currency,Notes and #tags,Address,Receipt,Description";

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

pub fn gbp(pence: i64) -> Amount {
    journal::amount(Decimal::new(pence, 2), "GBP")
}

/// An entry as the importer drafts it, before categorization.
pub fn draft(pence: i64) -> Entry {
    Entry::builder(date(2024, 1, 1), "", "")
        .posting("Assets:Monzo:Cash", gbp(pence))
        .build()
}

/// A row in the Monzo export layout with the fields the categorizer reads.
pub fn monzo_row(id: &str, payee: &str, category: &str) -> Row {
    [
        id,
        "01/01/2024",
        "12:00:00",
        "Card payment",
        payee,
        "",
        category,
        "0.00",
        "GBP",
        "0.00",
        "GBP",
        "",
        "",
        "",
        "",
    ]
    .into_iter()
    .collect()
}

/// A Monzo export with the given data rows beneath the usual header.
pub fn monzo_csv(rows: &[&str]) -> String {
    let mut s = format!("{}\n", MONZO_HEADER);
    for row in rows {
        s.push_str(row);
        s.push('\n');
    }
    s
}

/// Strips the common indentation and the leading line break from an inline
/// CSV document.
pub fn dedent_csv(s: &str) -> String {
    textwrap::dedent(s).trim_start_matches('\n').to_string()
}

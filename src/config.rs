//! Lookup tables and options for importing and categorizing, loaded from RON
//! files.

use std::collections::HashMap;
use std::fs::File;
use std::path::Path;

use anyhow::{Context, Result};
use serde_derive::Deserialize;

use crate::accounts::{ASSETS_MONZO_CASH, ASSETS_MONZO_SAVINGS, DEFAULT_CURRENCY, EXPENSES_FIXME};
use crate::importers::monzo_csv::CsvImporter;

const DEFAULT_CATEGORIES: &[(&str, &str)] = &[
    ("Eating out", "Expenses:EatingOut"),
    ("Groceries", "Expenses:Groceries"),
    ("Shopping", "Expenses:Shopping"),
    ("Accommodation", "Expenses:Accommodation"),
    ("Bills", "Expenses:Bills"),
    ("Hobbies", "Expenses:Hobbies"),
    ("Wellness", "Expenses:Wellness"),
    ("Transport", "Expenses:Transport"),
    ("Travel", "Expenses:Travel"),
    ("Entertainment", "Expenses:Entertainment"),
    ("Donations", "Expenses:Donations"),
];

const DEFAULT_SAVINGS_PAYEES: &[&str] = &["Savings Pot", "Savings Monzo Pot"];

const DEFAULT_REFUND_WINDOW_DAYS: i64 = 30;

/// Read-only tables consulted by the categorizer.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct Tables {
    /// Payee name to account, consulted first for outgoing transactions.
    pub payees: HashMap<String, String>,
    /// Bank-supplied category to account.
    pub categories: HashMap<String, String>,
    /// Transaction ID to account. Beats every other rule.
    pub overrides: HashMap<String, String>,
    /// Exact payee labels of transfers in from savings pots.
    pub savings_payees: Vec<String>,
    pub savings_account: String,
    /// Case-insensitive payee substrings of incoming transfers to leave out
    /// of the journal entirely.
    pub skip_payees: Vec<String>,
    /// Where anything unmatched goes.
    pub uncategorized_account: String,
}

impl Default for Tables {
    fn default() -> Self {
        Self {
            payees: HashMap::new(),
            categories: DEFAULT_CATEGORIES
                .iter()
                .map(|(category, account)| (category.to_string(), account.to_string()))
                .collect(),
            overrides: HashMap::new(),
            savings_payees: DEFAULT_SAVINGS_PAYEES
                .iter()
                .map(|s| s.to_string())
                .collect(),
            savings_account: ASSETS_MONZO_SAVINGS.to_string(),
            skip_payees: Vec::new(),
            uncategorized_account: EXPENSES_FIXME.to_string(),
        }
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Skips the bank category fallback for outgoing transactions.
    pub ignore_bank_categories: bool,
    /// Account the statement belongs to.
    pub account: String,
    /// Currency for rows with an empty currency column.
    pub currency: String,
    pub tables: Tables,
    /// Maximum days between a purchase and its refund for the two to be
    /// paired.
    pub refund_window_days: i64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            ignore_bank_categories: false,
            account: ASSETS_MONZO_CASH.to_string(),
            currency: DEFAULT_CURRENCY.to_string(),
            tables: Tables::default(),
            refund_window_days: DEFAULT_REFUND_WINDOW_DAYS,
        }
    }
}

impl Config {
    pub fn from_path(path: &Path) -> Result<Self> {
        ron::de::from_reader(
            File::open(path).with_context(|| format!("opening {:?} for reading", path))?,
        )
        .with_context(|| format!("parsing {:?}", path))
    }

    #[cfg(test)]
    pub fn from_str(s: &str) -> Result<Self> {
        ron::de::from_str(s).map_err(Into::into)
    }

    /// Merges transaction ID overrides over those already configured.
    pub fn add_overrides(&mut self, overrides: HashMap<String, String>) {
        self.tables.overrides.extend(overrides);
    }

    pub fn importer(&self) -> CsvImporter {
        CsvImporter {
            account: self.account.clone(),
            currency: self.currency.clone(),
        }
    }
}

/// Reads a RON file containing a `{ "transaction id": "account" }` map.
pub fn load_overrides(path: &Path) -> Result<HashMap<String, String>> {
    ron::de::from_reader(
        File::open(path).with_context(|| format!("opening {:?} for reading", path))?,
    )
    .with_context(|| format!("parsing {:?}", path))
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use test_case::test_case;

    use super::*;

    #[test]
    fn defaults() {
        let config = Config::default();
        assert!(!config.ignore_bank_categories);
        assert_eq!("Assets:Monzo:Cash", config.account);
        assert_eq!(
            Some(&"Expenses:EatingOut".to_string()),
            config.tables.categories.get("Eating out")
        );
        assert_eq!(11, config.tables.categories.len());
        assert!(config.tables.payees.is_empty());
        assert!(config.tables.overrides.is_empty());
        assert_eq!(
            vec!["Savings Pot".to_string(), "Savings Monzo Pot".to_string()],
            config.tables.savings_payees
        );
    }

    #[test]
    fn minimal_file_is_all_defaults() {
        assert_eq!(
            Config::default(),
            Config::from_str("Config(refund_window_days: 30)").expect("parse")
        );
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let config = Config::from_str(
            r#"Config(
                ignore_bank_categories: true,
                currency: "EUR",
                tables: Tables(
                    payees: { "Tesco": "Expenses:Groceries" },
                    overrides: { "tx_1": "Expenses:Gifts" },
                    skip_payees: ["jane doe"],
                ),
            )"#,
        )
        .expect("parse");

        assert!(config.ignore_bank_categories);
        assert_eq!("EUR", config.currency);
        assert_eq!("Assets:Monzo:Cash", config.account);
        assert_eq!(
            Some(&"Expenses:Groceries".to_string()),
            config.tables.payees.get("Tesco")
        );
        assert_eq!(vec!["jane doe".to_string()], config.tables.skip_payees);
        assert_eq!(11, config.tables.categories.len());
        assert_eq!("Expenses:FIXME", config.tables.uncategorized_account);
    }

    #[test_case("Config(columns: Columns(payee: \"Counterparty\"))"; "column_mapping")]
    #[test_case("Config(tables: Tables(payee: { \"Tesco\": \"Expenses:Groceries\" }))"; "misspelt_table")]
    fn unknown_fields_are_rejected(s: &str) {
        assert!(Config::from_str(s).is_err());
    }

    #[test]
    fn overrides_file_merges() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        write!(file, r#"{{ "tx_2": "Expenses:Rent", "tx_1": "Expenses:Gifts" }}"#)
            .expect("write");

        let mut config = Config::default();
        config
            .tables
            .overrides
            .insert("tx_1".to_string(), "Expenses:Old".to_string());
        config.add_overrides(load_overrides(file.path()).expect("load"));

        assert_eq!(2, config.tables.overrides.len());
        assert_eq!("Expenses:Gifts", config.tables.overrides["tx_1"]);
        assert_eq!("Expenses:Rent", config.tables.overrides["tx_2"]);
    }

    #[test]
    fn missing_file() {
        let err = Config::from_path(Path::new("/nonexistent/config.ron")).expect_err("should fail");
        assert!(err.to_string().starts_with("opening"), "got {}", err);
    }
}

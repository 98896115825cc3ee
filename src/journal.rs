//! Builds Ledger transactions from statement rows, and renders them as a
//! journal.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use ledger_parser::{
    Amount, Commodity, CommodityPosition, Ledger, LedgerItem, Posting, PostingAmount, Reality,
    Transaction,
};
use rust_decimal::Decimal;

use crate::meta::Metadata;

/// An amount with the currency code written after the quantity.
pub fn amount<S: Into<String>>(quantity: Decimal, currency: S) -> Amount {
    Amount {
        quantity,
        commodity: Commodity {
            name: currency.into(),
            position: CommodityPosition::Right,
        },
    }
}

pub fn negate(amount: &Amount) -> Amount {
    Amount {
        // Avoids rendering "-0.00".
        quantity: if amount.quantity.is_zero() {
            amount.quantity
        } else {
            -amount.quantity
        },
        commodity: amount.commodity.clone(),
    }
}

/// True for money leaving the account (or a zero amount).
pub fn is_outgoing(amount: &Amount) -> bool {
    amount.quantity <= Decimal::ZERO
}

pub fn posting<S: Into<String>>(account: S, amount: Amount) -> Posting {
    Posting {
        account: account.into(),
        reality: Reality::Real,
        amount: Some(PostingAmount {
            amount,
            lot_price: None,
            price: None,
        }),
        balance: None,
        status: None,
        comment: None,
    }
}

/// The amount of the posting created from the statement row.
pub fn first_amount(trn: &Transaction) -> Option<&Amount> {
    trn.postings
        .first()
        .and_then(|p| p.amount.as_ref())
        .map(|pa| &pa.amount)
}

/// Returns true if every posting has an amount and they sum to zero in every
/// currency.
pub fn is_balanced(trn: &Transaction) -> bool {
    let mut sums: BTreeMap<&str, Decimal> = BTreeMap::new();
    for post in &trn.postings {
        match &post.amount {
            Some(pa) => {
                *sums.entry(pa.amount.commodity.name.as_str()).or_default() += pa.amount.quantity
            }
            None => return false,
        }
    }
    sums.values().all(Decimal::is_zero)
}

/// Joins payee and narration into a single-line description.
fn description(payee: &str, narration: &str) -> String {
    let payee = payee.trim();
    let narration = narration.trim();
    let description = if payee.is_empty() {
        narration.to_string()
    } else if narration.is_empty() || narration == payee {
        payee.to_string()
    } else {
        format!("{} | {}", payee, narration)
    };
    description.split_whitespace().collect::<Vec<&str>>().join(" ")
}

/// A transaction drafted from one statement row. The payee is kept apart
/// from the description it is rendered into.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Entry {
    pub payee: String,
    pub trn: Transaction,
}

impl Entry {
    pub fn builder<P: Into<String>>(date: NaiveDate, payee: P, narration: &str) -> EntryBuilder {
        let payee = payee.into();
        EntryBuilder {
            entry: Entry {
                trn: Transaction {
                    comment: None,
                    date,
                    effective_date: None,
                    status: None,
                    code: None,
                    description: description(&payee, narration),
                    postings: vec![],
                },
                payee,
            },
        }
    }

    /// Metadata held in the transaction comment.
    pub fn meta(&self) -> Metadata {
        Metadata::from_opt_comment(self.trn.comment.as_deref())
    }
}

impl AsRef<Entry> for Entry {
    fn as_ref(&self) -> &Entry {
        self
    }
}

pub struct EntryBuilder {
    entry: Entry,
}

impl EntryBuilder {
    pub fn code<S: Into<String>>(mut self, code: S) -> Self {
        self.entry.trn.code = Some(code.into());
        self
    }

    pub fn meta(mut self, meta: Metadata) -> Self {
        self.entry.trn.comment = meta.into_opt_comment();
        self
    }

    pub fn posting<S: Into<String>>(mut self, account: S, amount: Amount) -> Self {
        self.entry.trn.postings.push(posting(account, amount));
        self
    }

    pub fn build(self) -> Entry {
        self.entry
    }
}

/// Renders the transactions as a journal, with a blank line between each.
pub fn render(trns: Vec<Transaction>) -> String {
    let mut items = Vec::with_capacity(trns.len() * 2);
    for trn in trns {
        if !items.is_empty() {
            items.push(LedgerItem::EmptyLine);
        }
        items.push(LedgerItem::Transaction(trn));
    }
    format!("{}", Ledger { items })
}

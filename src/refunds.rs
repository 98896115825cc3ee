//! Removes purchases that were later refunded in full, along with their
//! refunds.

use std::cmp::Reverse;

use chrono::Duration;
use tracing::info;

use crate::journal::{self, Entry};

/// Returns `items` without the refund pairs found in them, keeping the order
/// of everything else.
///
/// A refund is an incoming transaction. It pairs with the unpaired outgoing
/// transaction that has the same payee and currency, the exact opposite
/// amount, and a date no later than the refund and at most `window_days`
/// before it. Where several qualify, the closest in date wins, then the
/// latest in input order.
pub fn filter_refunds<T: AsRef<Entry>>(items: Vec<T>, window_days: i64) -> Vec<T> {
    let window = Duration::days(window_days);
    let entries: Vec<&Entry> = items.iter().map(|item| item.as_ref()).collect();
    let mut paired = vec![false; entries.len()];

    for (refund_idx, refund) in entries.iter().enumerate() {
        match journal::first_amount(&refund.trn) {
            Some(amount) if !journal::is_outgoing(amount) => {}
            _ => continue,
        }
        if refund.payee.trim().is_empty() {
            continue;
        }

        let best = entries
            .iter()
            .enumerate()
            .filter(|(idx, _)| !paired[*idx])
            .filter(|(_, orig)| is_refund_of(refund, orig, window))
            .min_by_key(|(idx, orig)| (refund.trn.date - orig.trn.date, Reverse(*idx)))
            .map(|(idx, _)| idx);

        if let Some(orig_idx) = best {
            paired[orig_idx] = true;
            paired[refund_idx] = true;
            info!(
                payee = refund.payee.as_str(),
                purchased = %entries[orig_idx].trn.date,
                refunded = %refund.trn.date,
                "removed refund pair"
            );
        }
    }

    items
        .into_iter()
        .zip(paired)
        .filter(|(_, paired)| !paired)
        .map(|(item, _)| item)
        .collect()
}

fn is_refund_of(refund: &Entry, orig: &Entry, window: Duration) -> bool {
    let (refund_amt, orig_amt) = match (
        journal::first_amount(&refund.trn),
        journal::first_amount(&orig.trn),
    ) {
        (Some(r), Some(o)) => (r, o),
        _ => return false,
    };
    let elapsed = refund.trn.date - orig.trn.date;
    orig_amt.quantity.is_sign_negative()
        && !orig_amt.quantity.is_zero()
        && orig_amt.commodity.name == refund_amt.commodity.name
        && orig_amt.quantity == -refund_amt.quantity
        && orig.payee.trim() == refund.payee.trim()
        && elapsed >= Duration::zero()
        && elapsed <= window
}

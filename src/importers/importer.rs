use anyhow::Result;

use crate::importers::row::Row;
use crate::journal::Entry;

/// Completes a draft entry using the raw fields of the row it came from.
pub trait RowCategorizer {
    type Output;

    fn categorize(&self, entry: Entry, row: &Row) -> Result<Self::Output>;
}

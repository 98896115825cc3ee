/// Asset account that the imported statement belongs to, unless configured
/// otherwise.
pub const ASSETS_MONZO_CASH: &str = "Assets:Monzo:Cash";
/// Destination of transfers into a Monzo savings pot.
pub const ASSETS_MONZO_SAVINGS: &str = "Assets:Monzo:Savings";
/// Marker account for postings that need a human to categorize them.
pub const EXPENSES_FIXME: &str = "Expenses:FIXME";

pub const DEFAULT_CURRENCY: &str = "GBP";

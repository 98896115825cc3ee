/// Bank-supplied category of the transaction.
pub const CATEGORY: &str = "category";
/// Marks a transaction to be dropped before the journal is written. Any
/// truthy value (see `meta::is_truthy`) counts.
pub const SKIP_TRANSACTION: &str = "skip_transaction";

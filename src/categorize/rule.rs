//! The categorization rules, as a decision table evaluated in a fixed order.

use crate::categorize::Options;
use crate::config::Tables;

/// What the categorizer knows about one statement row.
#[derive(Clone, Copy, Debug)]
pub struct RuleContext<'a> {
    pub transaction_id: &'a str,
    pub payee: &'a str,
    pub bank_category: &'a str,
    /// Free-text notes from the row. No rule reads this yet.
    pub comment: &'a str,
    /// True when money left the account (amount <= 0).
    pub outgoing: bool,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Decision {
    /// Balance against the account and keep the transaction.
    Include(String),
    /// Balance against the account, but leave the transaction out of the
    /// journal.
    Exclude(String),
    /// Balance against a manually chosen account.
    Override(String),
}

impl Decision {
    pub fn account(&self) -> &str {
        use Decision::*;
        match self {
            Include(a) | Exclude(a) | Override(a) => a,
        }
    }

    pub fn is_excluded(&self) -> bool {
        matches!(self, Decision::Exclude(_))
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Rule {
    /// Outgoing: payee found in the payee table.
    PayeeAccount,
    /// Outgoing: bank category found in the category table, unless bank
    /// categories are ignored.
    BankCategory,
    /// Incoming: payee contains a skip-payee substring.
    SkipPayee,
    /// Incoming: payee is a savings pot label.
    SavingsTransfer,
    /// Anything: the manual review account. Applies when nothing in the chain
    /// does.
    Uncategorized,
    /// Anything: transaction ID found in the override table.
    TransactionOverride,
}

/// Rules for money leaving the account, first match wins.
pub const OUTGOING_CHAIN: &[Rule] = &[Rule::PayeeAccount, Rule::BankCategory];
/// Rules for money arriving in the account, first match wins.
pub const INCOMING_CHAIN: &[Rule] = &[Rule::SkipPayee, Rule::SavingsTransfer];

impl Rule {
    /// Returns the rule's decision, or `None` if it does not apply.
    pub fn evaluate(self, ctx: &RuleContext, tables: &Tables, opts: &Options) -> Option<Decision> {
        use Rule::*;

        match self {
            PayeeAccount => tables.payees.get(ctx.payee).cloned().map(Decision::Include),
            BankCategory => {
                if opts.ignore_bank_categories {
                    None
                } else {
                    tables
                        .categories
                        .get(ctx.bank_category)
                        .cloned()
                        .map(Decision::Include)
                }
            }
            SkipPayee => {
                let payee = ctx.payee.to_lowercase();
                tables
                    .skip_payees
                    .iter()
                    .map(|s| s.trim().to_lowercase())
                    .filter(|s| !s.is_empty())
                    .any(|s| payee.contains(&s))
                    .then(|| Decision::Exclude(tables.uncategorized_account.clone()))
            }
            SavingsTransfer => tables
                .savings_payees
                .iter()
                .any(|label| label == ctx.payee)
                .then(|| Decision::Include(tables.savings_account.clone())),
            Uncategorized => Some(Decision::Include(tables.uncategorized_account.clone())),
            TransactionOverride => tables
                .overrides
                .get(ctx.transaction_id)
                .cloned()
                .map(Decision::Override),
        }
    }
}

#[cfg(test)]
mod tests {
    use test_case::test_case;

    use super::*;

    fn tables() -> Tables {
        let mut tables = Tables::default();
        tables
            .payees
            .insert("Tesco".to_string(), "Expenses:Groceries".to_string());
        tables
            .overrides
            .insert("tx_special".to_string(), "Expenses:Gifts".to_string());
        tables.skip_payees.push("Jane Doe".to_string());
        tables
    }

    fn ctx<'a>(id: &'a str, payee: &'a str, category: &'a str) -> RuleContext<'a> {
        RuleContext {
            transaction_id: id,
            payee,
            bank_category: category,
            comment: "",
            outgoing: true,
        }
    }

    const USE_CATEGORIES: Options = Options {
        ignore_bank_categories: false,
    };
    const IGNORE_CATEGORIES: Options = Options {
        ignore_bank_categories: true,
    };

    #[test_case(Rule::PayeeAccount, "tx", "Tesco", "" => Some(Decision::Include("Expenses:Groceries".to_string())); "payee_known")]
    #[test_case(Rule::PayeeAccount, "tx", "tesco", "" => None; "payee_is_case_sensitive")]
    #[test_case(Rule::BankCategory, "tx", "", "Bills" => Some(Decision::Include("Expenses:Bills".to_string())); "category_known")]
    #[test_case(Rule::BankCategory, "tx", "", "General" => None; "category_unknown")]
    #[test_case(Rule::SkipPayee, "tx", "MS JANE DOE", "" => Some(Decision::Exclude("Expenses:FIXME".to_string())); "skip_payee_substring")]
    #[test_case(Rule::SkipPayee, "tx", "John Doe", "" => None; "skip_payee_other")]
    #[test_case(Rule::SavingsTransfer, "tx", "Savings Pot", "" => Some(Decision::Include("Assets:Monzo:Savings".to_string())); "savings_pot")]
    #[test_case(Rule::SavingsTransfer, "tx", "Savings Monzo Pot", "" => Some(Decision::Include("Assets:Monzo:Savings".to_string())); "savings_monzo_pot")]
    #[test_case(Rule::SavingsTransfer, "tx", "Savings Pot 2", "" => None; "savings_exact_only")]
    #[test_case(Rule::Uncategorized, "tx", "", "" => Some(Decision::Include("Expenses:FIXME".to_string())); "uncategorized_always")]
    #[test_case(Rule::TransactionOverride, "tx_special", "Tesco", "Bills" => Some(Decision::Override("Expenses:Gifts".to_string())); "override_known")]
    #[test_case(Rule::TransactionOverride, "tx_other", "Tesco", "Bills" => None; "override_unknown")]
    fn evaluate(rule: Rule, id: &str, payee: &str, category: &str) -> Option<Decision> {
        rule.evaluate(&ctx(id, payee, category), &tables(), &USE_CATEGORIES)
    }

    #[test]
    fn ignored_bank_categories() {
        assert_eq!(
            None,
            Rule::BankCategory.evaluate(&ctx("tx", "", "Bills"), &tables(), &IGNORE_CATEGORIES)
        );
    }

    #[test]
    fn blank_skip_payee_matches_nothing() {
        let mut tables = Tables::default();
        tables.skip_payees.push("  ".to_string());
        assert_eq!(
            None,
            Rule::SkipPayee.evaluate(&ctx("tx", "Anyone", ""), &tables, &USE_CATEGORIES)
        );
    }

    #[test]
    fn chains_leave_out_override_and_fallback() {
        for chain in [OUTGOING_CHAIN, INCOMING_CHAIN] {
            assert!(!chain.contains(&Rule::TransactionOverride));
            assert!(!chain.contains(&Rule::Uncategorized));
        }
    }
}

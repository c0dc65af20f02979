//! The choices offered by a filter panel.

use std::collections::HashSet;

use crate::transaction::Transaction;

/// The distinct, non-empty values of `key_fn` over `records`, in order of
/// first occurrence.
pub fn distinct_values<'a, F>(records: &'a [Transaction], key_fn: F) -> Vec<String>
where
    F: Fn(&'a Transaction) -> &'a str,
{
    let mut seen = HashSet::new();

    records
        .iter()
        .map(key_fn)
        .filter(|value| !value.is_empty() && seen.insert(*value))
        .map(str::to_owned)
        .collect()
}

/// The category, budget and recurrence selections that match at least one
/// transaction.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterOptions {
    pub categories: Vec<String>,
    pub budgets: Vec<String>,
    pub recurrences: Vec<String>,
}

impl FilterOptions {
    pub fn from_transactions(records: &[Transaction]) -> Self {
        Self {
            categories: distinct_values(records, |transaction| transaction.category.as_str()),
            budgets: distinct_values(records, Transaction::budget_label),
            recurrences: distinct_values(records, Transaction::recurrence_label),
        }
    }
}

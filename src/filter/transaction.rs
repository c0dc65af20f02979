//! The transaction filter pipeline.

use crate::transaction::Transaction;

/// The selection that disables a category, budget or recurrence stage.
pub const ALL: &str = "all";

/// Criteria for narrowing a list of transactions.
///
/// The stages run in a fixed order: search, category, budget, recurrence,
/// minimum value and maximum value. A stage whose criterion is unset lets every
/// transaction through.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransactionFilter {
    /// Case-insensitive text that the title must contain. Ignored when blank.
    pub search: String,
    /// The exact category to keep, or [ALL].
    pub category: String,
    /// The exact budget label to keep, or [ALL].
    pub budget: String,
    /// The exact recurrence name to keep, e.g. "monthly", or [ALL].
    pub recurrence: String,
    /// Keep transactions with a value of at least this much.
    pub min_value: Option<f64>,
    /// Keep transactions with a value of at most this much.
    pub max_value: Option<f64>,
}

impl TransactionFilter {
    /// Criteria that keep every transaction.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the search text.
    pub fn search(mut self, search: &str) -> Self {
        self.search = search.to_owned();
        self
    }

    /// Set the category selection.
    pub fn category(mut self, category: &str) -> Self {
        self.category = category.to_owned();
        self
    }

    /// Set the budget selection.
    pub fn budget(mut self, budget: &str) -> Self {
        self.budget = budget.to_owned();
        self
    }

    /// Set the recurrence selection.
    pub fn recurrence(mut self, recurrence: &str) -> Self {
        self.recurrence = recurrence.to_owned();
        self
    }

    /// Set the inclusive lower bound on the value.
    pub fn min_value(mut self, min_value: Option<f64>) -> Self {
        self.min_value = min_value;
        self
    }

    /// Set the inclusive upper bound on the value.
    pub fn max_value(mut self, max_value: Option<f64>) -> Self {
        self.max_value = max_value;
        self
    }

    /// Clear every criterion.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Whether no stage would remove anything.
    pub fn is_empty(&self) -> bool {
        self.search.trim().is_empty()
            && !is_selected(&self.category)
            && !is_selected(&self.budget)
            && !is_selected(&self.recurrence)
            && self.min_value.is_none()
            && self.max_value.is_none()
    }

    /// Whether `transaction` passes every stage.
    pub fn matches(&self, transaction: &Transaction) -> bool {
        (self.search.trim().is_empty() || contains_ignore_case(&transaction.title, &self.search))
            && selection_matches(&self.category, &transaction.category)
            && selection_matches(&self.budget, transaction.budget_label())
            && selection_matches(&self.recurrence, transaction.recurrence_label())
            && self.min_value.is_none_or(|min| transaction.value >= min)
            && self.max_value.is_none_or(|max| transaction.value <= max)
    }
}

/// Keep the transactions that pass every stage of `criteria`, in their
/// original order.
///
/// Applying the same criteria to the result again changes nothing.
pub fn apply_filters(records: &[Transaction], criteria: &TransactionFilter) -> Vec<Transaction> {
    records
        .iter()
        .filter(|transaction| criteria.matches(transaction))
        .cloned()
        .collect()
}

/// The unfiltered list, i.e. the result of applying cleared criteria.
pub fn reset_filters(records: &[Transaction]) -> Vec<Transaction> {
    records.to_vec()
}

/// Whether `haystack` contains `needle`, ignoring case.
pub(super) fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

fn is_selected(selection: &str) -> bool {
    !selection.is_empty() && selection != ALL
}

fn selection_matches(selection: &str, value: &str) -> bool {
    !is_selected(selection) || selection == value
}

#[cfg(test)]
mod tests {
    use crate::{
        filter::transaction::{ALL, TransactionFilter, apply_filters, reset_filters},
        test_utils::{create_test_transaction, salary_and_food},
        transaction::{Recurrence, Transaction},
    };

    fn titles(transactions: &[Transaction]) -> Vec<&str> {
        transactions.iter().map(|t| t.title.as_str()).collect()
    }

    fn tagged_transactions() -> Vec<Transaction> {
        let mut transactions = salary_and_food();
        transactions[0].recurrence = Some(Recurrence::Monthly);
        transactions[1].budget = Some("Groceries".to_owned());
        transactions[1].recurrence = Some(Recurrence::Weekly);
        transactions
    }

    #[test]
    fn empty_criteria_keep_everything() {
        let transactions = salary_and_food();

        let got = apply_filters(&transactions, &TransactionFilter::new());

        assert_eq!(got, transactions);
    }

    #[test]
    fn min_value_zero_keeps_income() {
        let transactions = salary_and_food();
        let criteria = TransactionFilter::new().min_value(Some(0.0));

        let got = apply_filters(&transactions, &criteria);

        assert_eq!(titles(&got), vec!["Salary"]);
    }

    #[test]
    fn value_bounds_are_inclusive() {
        let transactions = salary_and_food();
        let criteria = TransactionFilter::new()
            .min_value(Some(-40.0))
            .max_value(Some(-10.0));

        let got = apply_filters(&transactions, &criteria);

        assert_eq!(titles(&got), vec!["Groceries", "Snacks"]);
    }

    #[test]
    fn search_ignores_case() {
        let transactions = salary_and_food();
        let criteria = TransactionFilter::new().search("sNaC");

        let got = apply_filters(&transactions, &criteria);

        assert_eq!(titles(&got), vec!["Snacks"]);
    }

    #[test]
    fn blank_search_is_skipped() {
        let transactions = salary_and_food();
        let criteria = TransactionFilter::new().search("   ");

        let got = apply_filters(&transactions, &criteria);

        assert_eq!(got.len(), 3);
        assert!(criteria.is_empty());
    }

    #[test]
    fn search_is_not_trimmed_when_matching() {
        let transactions = salary_and_food();
        let criteria = TransactionFilter::new().search(" Snacks");

        let got = apply_filters(&transactions, &criteria);

        assert!(got.is_empty());
    }

    #[test]
    fn category_selection_is_exact() {
        let transactions = salary_and_food();

        let got = apply_filters(&transactions, &TransactionFilter::new().category("Food"));
        assert_eq!(titles(&got), vec!["Groceries", "Snacks"]);

        let got = apply_filters(&transactions, &TransactionFilter::new().category("food"));
        assert!(got.is_empty());
    }

    #[test]
    fn all_selection_disables_stage() {
        let transactions = tagged_transactions();
        let criteria = TransactionFilter::new()
            .category(ALL)
            .budget(ALL)
            .recurrence(ALL);

        let got = apply_filters(&transactions, &criteria);

        assert_eq!(got.len(), 3);
        assert!(criteria.is_empty());
    }

    #[test]
    fn budget_selection_excludes_transactions_without_budget() {
        let transactions = tagged_transactions();
        let criteria = TransactionFilter::new().budget("Groceries");

        let got = apply_filters(&transactions, &criteria);

        assert_eq!(titles(&got), vec!["Groceries"]);
    }

    #[test]
    fn recurrence_selection_matches_lowercase_name() {
        let transactions = tagged_transactions();

        let got = apply_filters(&transactions, &TransactionFilter::new().recurrence("monthly"));

        assert_eq!(titles(&got), vec!["Salary"]);
    }

    #[test]
    fn stages_combine() {
        let mut transactions = tagged_transactions();
        transactions.push(create_test_transaction("Grocery refund", 5.0, "Food"));
        let criteria = TransactionFilter::new()
            .search("groc")
            .category("Food")
            .max_value(Some(0.0));

        let got = apply_filters(&transactions, &criteria);

        assert_eq!(titles(&got), vec!["Groceries"]);
    }

    #[test]
    fn applying_twice_changes_nothing() {
        let transactions = tagged_transactions();
        let criteria = TransactionFilter::new()
            .category("Food")
            .min_value(Some(-20.0));

        let once = apply_filters(&transactions, &criteria);
        let twice = apply_filters(&once, &criteria);

        assert_eq!(once, twice);
    }

    #[test]
    fn reset_clears_criteria() {
        let transactions = tagged_transactions();
        let mut criteria = TransactionFilter::new()
            .search("x")
            .category("Food")
            .budget("Groceries")
            .recurrence("weekly")
            .min_value(Some(1.0))
            .max_value(Some(2.0));

        criteria.reset();

        assert_eq!(criteria, TransactionFilter::default());
        assert_eq!(apply_filters(&transactions, &criteria), transactions);
        assert_eq!(reset_filters(&transactions), transactions);
    }
}

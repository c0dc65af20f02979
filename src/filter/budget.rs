//! The budget filter pipeline.

use crate::{budget::Budget, filter::transaction::contains_ignore_case};

/// Criteria for narrowing a list of budgets.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BudgetFilter {
    /// Case-insensitive text that the category must contain. Ignored when
    /// blank.
    pub search: String,
    /// Keep budgets with a limit of at least this much.
    pub min_limit: Option<f64>,
    /// Keep budgets with a limit of at most this much.
    pub max_limit: Option<f64>,
}

impl BudgetFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn search(mut self, search: &str) -> Self {
        self.search = search.to_owned();
        self
    }

    pub fn min_limit(mut self, min_limit: Option<f64>) -> Self {
        self.min_limit = min_limit;
        self
    }

    pub fn max_limit(mut self, max_limit: Option<f64>) -> Self {
        self.max_limit = max_limit;
        self
    }

    /// Clear every criterion.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Whether `budget` passes the search and both limit bounds.
    pub fn matches(&self, budget: &Budget) -> bool {
        let limit = budget.limit.get();

        (self.search.trim().is_empty() || contains_ignore_case(&budget.category, &self.search))
            && self.min_limit.is_none_or(|min| limit >= min)
            && self.max_limit.is_none_or(|max| limit <= max)
    }
}

/// Keep the budgets that pass `criteria`, in their original order.
pub fn apply_budget_filters(budgets: &[Budget], criteria: &BudgetFilter) -> Vec<Budget> {
    budgets
        .iter()
        .filter(|budget| criteria.matches(budget))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use crate::{
        budget::Budget,
        filter::budget::{BudgetFilter, apply_budget_filters},
        test_utils::create_test_budget,
    };

    fn budgets() -> Vec<Budget> {
        vec![
            create_test_budget("Food", 300.0),
            create_test_budget("Fast food", 50.0),
            create_test_budget("Travel", 1000.0),
        ]
    }

    fn categories(budgets: &[Budget]) -> Vec<&str> {
        budgets.iter().map(|b| b.category.as_str()).collect()
    }

    #[test]
    fn empty_criteria_keep_everything() {
        let budgets = budgets();

        assert_eq!(apply_budget_filters(&budgets, &BudgetFilter::new()), budgets);
    }

    #[test]
    fn search_matches_category_substring_ignoring_case() {
        let budgets = budgets();

        let got = apply_budget_filters(&budgets, &BudgetFilter::new().search("FOOD"));

        assert_eq!(categories(&got), vec!["Food", "Fast food"]);
    }

    #[test]
    fn limit_bounds_are_inclusive() {
        let budgets = budgets();
        let criteria = BudgetFilter::new()
            .min_limit(Some(50.0))
            .max_limit(Some(300.0));

        let got = apply_budget_filters(&budgets, &criteria);

        assert_eq!(categories(&got), vec!["Food", "Fast food"]);
    }

    #[test]
    fn reset_clears_criteria() {
        let mut criteria = BudgetFilter::new().search("x").min_limit(Some(1.0));

        criteria.reset();

        assert_eq!(criteria, BudgetFilter::default());
    }
}

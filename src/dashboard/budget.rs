//! Budget progress: how much of each spending limit has been used.

use crate::{budget::Budget, transaction::Transaction};

/// Usage, as a percentage of the limit, at which a budget is flagged.
pub const WARNING_THRESHOLD: f64 = 80.0;

/// Usage, as a percentage of the limit, at which a budget is over its limit.
pub const EXCEEDED_THRESHOLD: f64 = 100.0;

/// The transactions counted against `budget`, i.e. those with the budget's
/// category.
///
/// Matching is exact and case-sensitive. A transaction counts against every
/// budget that shares its category.
pub fn transactions_for_budget<'a>(
    budget: &Budget,
    records: &'a [Transaction],
) -> Vec<&'a Transaction> {
    records
        .iter()
        .filter(|transaction| transaction.category == budget.category)
        .collect()
}

/// The amount spent against `budget`.
///
/// Expenses are negative, so the negated sum is positive when money has been
/// spent. Refunds (positive values) in the category reduce the amount spent.
pub fn budget_spent(budget: &Budget, records: &[Transaction]) -> f64 {
    // Subtract from zero so that no spending is 0.0 rather than -0.0.
    0.0 - transactions_for_budget(budget, records)
        .iter()
        .map(|transaction| transaction.value)
        .sum::<f64>()
}

/// `spent` as a percentage of `limit`, clamped to 0..=100.
///
/// Returns zero when `limit` is not positive or the result is not a number.
pub fn budget_usage(spent: f64, limit: f64) -> f64 {
    if limit > 0.0 {
        // `max` before `min` so that NaN collapses to zero.
        (spent / limit * 100.0).max(0.0).min(EXCEEDED_THRESHOLD)
    } else {
        0.0
    }
}

/// How close a budget is to its limit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UsageLevel {
    /// Below [WARNING_THRESHOLD].
    OnTrack,
    /// At or above [WARNING_THRESHOLD] but below [EXCEEDED_THRESHOLD].
    Warning,
    /// At [EXCEEDED_THRESHOLD], i.e. the limit has been reached.
    Exceeded,
}

impl UsageLevel {
    /// Classify a usage percentage as returned by [budget_usage].
    pub fn from_percent(percent: f64) -> Self {
        if percent >= EXCEEDED_THRESHOLD {
            UsageLevel::Exceeded
        } else if percent >= WARNING_THRESHOLD {
            UsageLevel::Warning
        } else {
            UsageLevel::OnTrack
        }
    }
}

/// The progress of a single budget.
#[derive(Debug, Clone, PartialEq)]
pub struct BudgetProgress {
    pub budget_id: String,
    pub category: String,
    pub spent: f64,
    pub limit: f64,
    /// Usage in the range 0..=100.
    pub percent: f64,
    pub level: UsageLevel,
}

impl BudgetProgress {
    /// Calculate the progress of `budget` given all recorded transactions.
    pub fn new(budget: &Budget, records: &[Transaction]) -> Self {
        let spent = budget_spent(budget, records);
        let limit = budget.limit.get();
        let percent = budget_usage(spent, limit);

        Self {
            budget_id: budget.id.clone(),
            category: budget.category.clone(),
            spent,
            limit,
            percent,
            level: UsageLevel::from_percent(percent),
        }
    }
}

/// Combined usage over all budgets.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OverallUsage {
    /// The sum of the amount spent against each budget.
    pub spent: f64,
    /// The sum of all budget limits.
    pub limit: f64,
    /// Usage in the range 0..=100.
    pub percent: f64,
}

/// The usage over all `budgets`, zero when there are no budgets.
///
/// Transactions in a category shared by several budgets are counted once per
/// budget.
pub fn overall_budget_usage(budgets: &[Budget], records: &[Transaction]) -> OverallUsage {
    let spent = budgets
        .iter()
        .map(|budget| budget_spent(budget, records))
        .sum();
    let limit = budgets.iter().map(|budget| budget.limit.get()).sum();

    OverallUsage {
        spent,
        limit,
        percent: budget_usage(spent, limit),
    }
}

//! Dashboard figures derived from the recorded transactions and budgets.
//!
//! All functions here are pure: they take a snapshot of the records and return
//! freshly computed values.

mod aggregation;
mod budget;
mod summary;

pub use aggregation::{
    FORECAST_PERIODS, GroupTotal, ROLLING_WINDOW, TOP_N, average, budget_totals, category_totals,
    cumulative_series, expense, forecast, group_totals, income, income_expense_split,
    rolling_average, series_labels, top_n_by_magnitude, total,
};
pub use budget::{
    BudgetProgress, EXCEEDED_THRESHOLD, OverallUsage, UsageLevel, WARNING_THRESHOLD,
    budget_spent, budget_usage, overall_budget_usage, transactions_for_budget,
};
pub use summary::{Charts, Summary};

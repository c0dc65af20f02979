//! Predicate pipelines that narrow transaction and budget lists for display.
//!
//! Filtering never modifies the stored records, it returns a filtered copy in
//! the original order.

mod budget;
mod options;
mod transaction;

pub use budget::{BudgetFilter, apply_budget_filters};
pub use options::{FilterOptions, distinct_values};
pub use transaction::{ALL, TransactionFilter, apply_filters, reset_filters};

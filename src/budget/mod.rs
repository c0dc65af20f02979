//! Budgets: spending ceilings per category.

mod record;

pub use record::{Budget, BudgetId, BudgetInput, BudgetLimit};

//! Core budget domain types.

use std::fmt::Display;

use serde::{Deserialize, Serialize};

use crate::Error;

/// The opaque identifier of a budget.
pub type BudgetId = String;

/// A validated budget ceiling: a finite amount greater than zero.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct BudgetLimit(f64);

impl BudgetLimit {
    /// Create a budget limit.
    ///
    /// # Errors
    ///
    /// This function will return an [Error::InvalidBudgetLimit] if `limit` is
    /// zero, negative, NaN or infinite.
    pub fn new(limit: f64) -> Result<Self, Error> {
        if limit.is_finite() && limit > 0.0 {
            Ok(Self(limit))
        } else {
            Err(Error::InvalidBudgetLimit(limit))
        }
    }

    /// The limit as a plain number.
    pub fn get(self) -> f64 {
        self.0
    }
}

impl TryFrom<f64> for BudgetLimit {
    type Error = Error;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        BudgetLimit::new(value)
    }
}

impl From<BudgetLimit> for f64 {
    fn from(value: BudgetLimit) -> Self {
        value.0
    }
}

impl Display for BudgetLimit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A spending ceiling for a category.
///
/// Budgets are matched to transactions by comparing category text, see
/// [transactions_for_budget](crate::transactions_for_budget).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Budget {
    pub id: BudgetId,
    /// The transaction category this budget covers.
    pub category: String,
    pub limit: BudgetLimit,
}

impl Budget {
    /// Create a new budget.
    ///
    /// Shortcut for [BudgetInput] for discoverability. The limit is validated
    /// when the input is added to a store.
    pub fn build(category: &str, limit: f64) -> BudgetInput {
        BudgetInput {
            id: None,
            category: category.to_owned(),
            limit,
        }
    }
}

/// The fields a caller supplies to create or replace a [Budget].
#[derive(Debug, Clone, PartialEq)]
pub struct BudgetInput {
    /// A caller-chosen ID. Must not clash with an existing budget, an empty ID
    /// is replaced with a generated one.
    pub id: Option<BudgetId>,
    pub category: String,
    /// Must be greater than zero.
    pub limit: f64,
}

impl BudgetInput {
    /// Set the ID for the budget.
    pub fn id(mut self, id: &str) -> Self {
        self.id = Some(id.to_owned());
        self
    }
}

//! The figures shown on the dashboard cards and charts.

use crate::{
    dashboard::aggregation::{
        FORECAST_PERIODS, GroupTotal, ROLLING_WINDOW, TOP_N, budget_totals, category_totals,
        cumulative_series, expense, forecast, income, income_expense_split, rolling_average,
        series_labels, top_n_by_magnitude, total,
    },
    transaction::Transaction,
};

/// The headline numbers: balance, income, expenses and the forecast balance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Summary {
    pub total: f64,
    pub income: f64,
    /// Absolute value of the summed expenses.
    pub expenses: f64,
    /// The balance projected [FORECAST_PERIODS] transactions ahead.
    pub forecast: f64,
}

impl Summary {
    pub fn from_transactions(records: &[Transaction]) -> Self {
        Self {
            total: total(records),
            income: income(records),
            expenses: expense(records).abs(),
            forecast: forecast(records, FORECAST_PERIODS),
        }
    }
}

/// Everything the dashboard charts plot, computed from one snapshot of the
/// transactions.
#[derive(Debug, Clone, PartialEq)]
pub struct Charts {
    /// One label per transaction, shared by the balance and rolling average.
    pub labels: Vec<String>,
    pub balance: Vec<f64>,
    pub rolling_average: Vec<f64>,
    pub category_totals: Vec<GroupTotal>,
    pub budget_totals: Vec<GroupTotal>,
    /// Income and absolute expenses.
    pub income_expense: (f64, f64),
    pub top_transactions: Vec<Transaction>,
}

impl Charts {
    pub fn from_transactions(records: &[Transaction]) -> Self {
        let balance = cumulative_series(records);
        let rolling_average = rolling_average(&balance, ROLLING_WINDOW);

        Self {
            labels: series_labels(records),
            balance,
            rolling_average,
            category_totals: category_totals(records),
            budget_totals: budget_totals(records),
            income_expense: income_expense_split(records),
            top_transactions: top_n_by_magnitude(records, TOP_N)
                .into_iter()
                .cloned()
                .collect(),
        }
    }
}

//! Transaction data aggregation for the dashboard cards and charts.
//!
//! Provides functions to total transactions, split income from expenses,
//! calculate running balances and rolling averages, group amounts by category
//! or budget, and rank transactions by size. Every function is pure and
//! returns zero or an empty collection for empty input.

use std::collections::HashMap;

use crate::transaction::Transaction;

/// How many periods ahead the dashboard forecast looks.
pub const FORECAST_PERIODS: u32 = 10;

/// The number of points in the trailing rolling-average window.
pub const ROLLING_WINDOW: usize = 3;

/// How many transactions the "top transactions" chart shows.
pub const TOP_N: usize = 5;

/// The sum of the transaction values for one grouping key.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupTotal {
    /// The category or budget label shared by the grouped transactions.
    pub key: String,
    /// The sum of their values.
    pub total: f64,
}

/// The sum of all transaction values, i.e. the balance.
pub fn total(records: &[Transaction]) -> f64 {
    records.iter().map(|transaction| transaction.value).sum()
}

/// The sum of all positive transaction values.
pub fn income(records: &[Transaction]) -> f64 {
    records
        .iter()
        .filter(|transaction| transaction.is_income())
        .map(|transaction| transaction.value)
        .sum()
}

/// The sum of all negative transaction values.
///
/// The result is zero or negative, take the absolute value for display.
pub fn expense(records: &[Transaction]) -> f64 {
    records
        .iter()
        .filter(|transaction| transaction.is_expense())
        .map(|transaction| transaction.value)
        .sum()
}

/// Income and the absolute value of expenses, in that order.
pub fn income_expense_split(records: &[Transaction]) -> (f64, f64) {
    (income(records), expense(records).abs())
}

/// The mean transaction value, or zero if there are no transactions.
pub fn average(records: &[Transaction]) -> f64 {
    if records.is_empty() {
        0.0
    } else {
        total(records) / records.len() as f64
    }
}

/// Projects the balance `periods` transactions ahead by assuming each future
/// transaction has the current average value.
pub fn forecast(records: &[Transaction], periods: u32) -> f64 {
    total(records) + average(records) * f64::from(periods)
}

/// The running balance after each transaction, in list order.
///
/// The last element equals [total]. The result depends on the order of
/// `records`, so pass them in a meaningful order such as insertion order.
pub fn cumulative_series(records: &[Transaction]) -> Vec<f64> {
    records
        .iter()
        .scan(0.0, |balance, transaction| {
            *balance += transaction.value;
            Some(*balance)
        })
        .collect()
}

/// Smooths `series` with a trailing mean over `window` points.
///
/// # Arguments
/// * `series` - The values to smooth, e.g. the output of [cumulative_series]
/// * `window` - The number of points to average, a window of zero is treated as one
///
/// # Returns
/// A vector the same length as `series` where element `i` is the mean of
/// `series[i + 1 - window..=i]`, with the window shrinking at the start.
pub fn rolling_average(series: &[f64], window: usize) -> Vec<f64> {
    let window = window.max(1);

    (0..series.len())
        .map(|end| {
            let start = (end + 1).saturating_sub(window);
            let slice = &series[start..=end];
            slice.iter().sum::<f64>() / slice.len() as f64
        })
        .collect()
}

/// Sums transaction values per key.
///
/// # Arguments
/// * `records` - The transactions to group
/// * `key_fn` - Returns the grouping key of a transaction, or `None` to leave
///   the transaction out
///
/// # Returns
/// One [GroupTotal] per distinct key, ordered by the first transaction with
/// that key.
pub fn group_totals<'a, F>(records: &'a [Transaction], key_fn: F) -> Vec<GroupTotal>
where
    F: Fn(&'a Transaction) -> Option<&'a str>,
{
    let mut groups: Vec<GroupTotal> = Vec::new();
    let mut index_by_key: HashMap<&str, usize> = HashMap::new();

    for transaction in records {
        let Some(key) = key_fn(transaction) else {
            continue;
        };

        let index = *index_by_key.entry(key).or_insert_with(|| {
            groups.push(GroupTotal {
                key: key.to_owned(),
                total: 0.0,
            });
            groups.len() - 1
        });

        groups[index].total += transaction.value;
    }

    groups
}

/// Sums transaction values per category.
pub fn category_totals(records: &[Transaction]) -> Vec<GroupTotal> {
    group_totals(records, |transaction| Some(transaction.category.as_str()))
}

/// Sums transaction values per budget label, leaving out transactions without
/// a budget.
pub fn budget_totals(records: &[Transaction]) -> Vec<GroupTotal> {
    group_totals(records, |transaction| transaction.budget.as_deref())
}

/// The `n` transactions with the largest absolute value, largest first.
///
/// Transactions of equal magnitude keep their original relative order.
pub fn top_n_by_magnitude(records: &[Transaction], n: usize) -> Vec<&Transaction> {
    let mut ranked: Vec<&Transaction> = records.iter().collect();
    ranked.sort_by(|a, b| b.value.abs().total_cmp(&a.value.abs()));
    ranked.truncate(n);
    ranked
}

/// Labels for the x-axis of per-transaction charts.
///
/// Uses each transaction's title, or "Tx N" (counting from one) when the title
/// is empty.
pub fn series_labels(records: &[Transaction]) -> Vec<String> {
    records
        .iter()
        .enumerate()
        .map(|(index, transaction)| {
            if transaction.title.is_empty() {
                format!("Tx {}", index + 1)
            } else {
                transaction.title.clone()
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use crate::{
        dashboard::aggregation::{
            GroupTotal, average, budget_totals, category_totals, cumulative_series, expense,
            forecast, group_totals, income, income_expense_split, rolling_average,
            series_labels, top_n_by_magnitude, total,
        },
        test_utils::{create_test_transaction, salary_and_food},
        transaction::Transaction,
    };

    fn group(key: &str, total: f64) -> GroupTotal {
        GroupTotal {
            key: key.to_owned(),
            total,
        }
    }

    #[test]
    fn totals_for_salary_and_food() {
        let transactions = salary_and_food();

        assert_eq!(total(&transactions), 50.0);
        assert_eq!(income(&transactions), 100.0);
        assert_eq!(expense(&transactions), -50.0);
        assert_eq!(income_expense_split(&transactions), (100.0, 50.0));
    }

    #[test]
    fn income_plus_expense_equals_total() {
        let transactions = vec![
            create_test_transaction("a", 12.0, "A"),
            create_test_transaction("b", -7.0, "B"),
            create_test_transaction("c", 0.0, "C"),
            create_test_transaction("d", 3.0, "A"),
            create_test_transaction("e", -20.0, "D"),
        ];

        assert_eq!(
            income(&transactions) + expense(&transactions),
            total(&transactions)
        );
    }

    #[test]
    fn empty_input_yields_zero() {
        let transactions: Vec<Transaction> = vec![];

        assert_eq!(total(&transactions), 0.0);
        assert_eq!(income(&transactions), 0.0);
        assert_eq!(expense(&transactions), 0.0);
        assert_eq!(average(&transactions), 0.0);
        assert_eq!(forecast(&transactions, 10), 0.0);
        assert!(cumulative_series(&transactions).is_empty());
        assert!(rolling_average(&[], 3).is_empty());
        assert!(category_totals(&transactions).is_empty());
        assert!(top_n_by_magnitude(&transactions, 5).is_empty());
    }

    #[test]
    fn forecast_extends_total_by_average() {
        let transactions = salary_and_food();

        // total 50, average 50 / 3
        let want = 50.0 + (50.0 / 3.0) * 10.0;

        assert!((forecast(&transactions, 10) - want).abs() < 1e-9);
        assert_eq!(forecast(&transactions, 0), 50.0);
    }

    #[test]
    fn cumulative_series_is_running_balance() {
        let transactions = salary_and_food();

        let series = cumulative_series(&transactions);

        assert_eq!(series, vec![100.0, 60.0, 50.0]);
        assert_eq!(series.last().copied(), Some(total(&transactions)));
    }

    #[test]
    fn rolling_average_shrinks_window_at_start() {
        let series = [3.0, 6.0, 9.0, 12.0];

        let averaged = rolling_average(&series, 3);

        assert_eq!(averaged, vec![3.0, 4.5, 6.0, 9.0]);
    }

    #[test]
    fn rolling_average_of_single_point_is_that_point() {
        assert_eq!(rolling_average(&[42.0], 3), vec![42.0]);
    }

    #[test]
    fn rolling_average_treats_zero_window_as_one() {
        assert_eq!(rolling_average(&[1.0, 2.0], 0), vec![1.0, 2.0]);
    }

    #[test]
    fn category_totals_keep_first_occurrence_order() {
        let transactions = salary_and_food();

        let totals = category_totals(&transactions);

        assert_eq!(totals, vec![group("Income", 100.0), group("Food", -50.0)]);
    }

    #[test]
    fn budget_totals_skip_transactions_without_budget() {
        let mut transactions = salary_and_food();
        transactions[1].budget = Some("Groceries".to_owned());
        transactions[2].budget = Some("Treats".to_owned());

        let totals = budget_totals(&transactions);

        assert_eq!(
            totals,
            vec![group("Groceries", -40.0), group("Treats", -10.0)]
        );
    }

    #[test]
    fn group_totals_with_custom_key() {
        let transactions = salary_and_food();

        let totals = group_totals(&transactions, |transaction| {
            Some(if transaction.is_income() { "in" } else { "out" })
        });

        assert_eq!(totals, vec![group("in", 100.0), group("out", -50.0)]);
    }

    #[test]
    fn top_n_orders_by_magnitude() {
        let transactions = vec![
            create_test_transaction("small", 1.0, ""),
            create_test_transaction("big expense", -90.0, ""),
            create_test_transaction("medium", 30.0, ""),
            create_test_transaction("big income", 80.0, ""),
        ];

        let top = top_n_by_magnitude(&transactions, 3);

        let titles: Vec<&str> = top.iter().map(|t| t.title.as_str()).collect();
        assert_eq!(titles, vec!["big expense", "big income", "medium"]);
    }

    #[test]
    fn top_n_is_stable_on_ties() {
        let transactions = vec![
            create_test_transaction("first", -10.0, ""),
            create_test_transaction("second", 10.0, ""),
            create_test_transaction("third", -10.0, ""),
            create_test_transaction("largest", 50.0, ""),
        ];

        let top = top_n_by_magnitude(&transactions, 5);

        let titles: Vec<&str> = top.iter().map(|t| t.title.as_str()).collect();
        assert_eq!(titles, vec!["largest", "first", "second", "third"]);
    }

    #[test]
    fn top_n_returns_at_most_n() {
        let transactions: Vec<Transaction> = (0..8)
            .map(|i| create_test_transaction(&format!("t{i}"), i as f64, ""))
            .collect();

        assert_eq!(top_n_by_magnitude(&transactions, 5).len(), 5);
        assert_eq!(top_n_by_magnitude(&transactions[..2], 5).len(), 2);
    }

    #[test]
    fn series_labels_fall_back_to_position() {
        let transactions = vec![
            create_test_transaction("Rent", -900.0, ""),
            create_test_transaction("", 20.0, ""),
        ];

        assert_eq!(series_labels(&transactions), vec!["Rent", "Tx 2"]);
    }
}

//! Fixed collaborators and record constructors shared by the unit tests.

use crate::{
    Error,
    budget::{Budget, BudgetLimit},
    clock::Clock,
    id_generator::IdGenerator,
    storage::KeyValueStore,
    transaction::Transaction,
};

/// A clock that is always at the same instant.
#[derive(Debug, Clone, Copy)]
pub(crate) struct FixedClock(pub(crate) &'static str);

impl Clock for FixedClock {
    fn now(&self) -> String {
        self.0.to_owned()
    }
}

/// Generates "id-1", "id-2", ...
#[derive(Debug, Default)]
pub(crate) struct SequentialIds {
    count: u32,
}

impl IdGenerator for SequentialIds {
    fn next_id(&mut self) -> String {
        self.count += 1;
        format!("id-{}", self.count)
    }
}

/// Generates the same ID over and over.
#[derive(Debug)]
pub(crate) struct RepeatingIds(pub(crate) &'static str);

impl IdGenerator for RepeatingIds {
    fn next_id(&mut self) -> String {
        self.0.to_owned()
    }
}

/// Storage that can be neither read nor written.
#[derive(Debug)]
pub(crate) struct FailingStorage;

impl KeyValueStore for FailingStorage {
    fn get(&self, _key: &str) -> Result<Option<String>, Error> {
        Err(Error::Persistence("storage is unavailable".to_owned()))
    }

    fn set(&mut self, _key: &str, _value: &str) -> Result<(), Error> {
        Err(Error::Persistence("quota exceeded".to_owned()))
    }
}

/// A transaction with the given title, value and category, and defaults for
/// everything else.
pub(crate) fn create_test_transaction(title: &str, value: f64, category: &str) -> Transaction {
    Transaction::build(value, category)
        .title(title)
        .finalize(format!("{title}-{value}"), "2025-01-01T00:00:00Z".to_owned())
}

/// The three transactions used throughout the aggregation and filter tests:
/// an income of 100 and two food expenses of 40 and 10.
pub(crate) fn salary_and_food() -> Vec<Transaction> {
    vec![
        create_test_transaction("Salary", 100.0, "Income"),
        create_test_transaction("Groceries", -40.0, "Food"),
        create_test_transaction("Snacks", -10.0, "Food"),
    ]
}

pub(crate) fn create_test_budget(category: &str, limit: f64) -> Budget {
    Budget {
        id: format!("budget-{category}"),
        category: category.to_owned(),
        limit: BudgetLimit::new(limit).expect("test limit must be positive"),
    }
}

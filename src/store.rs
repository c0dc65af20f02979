//! The record store: the single owner of the transaction and budget lists.
//!
//! The store is hydrated from a [KeyValueStore] when it is loaded, and writes
//! the full affected list back after every mutation. Storage failures are
//! logged and kept for the caller to inspect with
//! [RecordStore::take_persistence_error], they never undo the in-memory change.

use std::collections::HashSet;

use serde::{Serialize, de::DeserializeOwned};

use crate::{
    Error,
    budget::{Budget, BudgetInput, BudgetLimit},
    clock::{Clock, SystemClock},
    dashboard::transactions_for_budget,
    id_generator::{IdGenerator, UuidGenerator},
    storage::{BUDGETS_KEY, KeyValueStore, TRANSACTIONS_KEY},
    transaction::{Transaction, TransactionInput},
};

/// How many generated IDs to try before giving up on finding an unused one.
const MAX_ID_ATTEMPTS: usize = 16;

/// Holds the canonical lists of transactions and budgets.
///
/// Pass the store by reference to whatever needs it; all derived figures are
/// computed from [RecordStore::transactions] and [RecordStore::budgets] by the
/// functions in [dashboard](crate::dashboard) and [filter](crate::filter).
#[derive(Debug)]
pub struct RecordStore<S, I = UuidGenerator, C = SystemClock> {
    storage: S,
    id_generator: I,
    clock: C,
    transactions: Vec<Transaction>,
    budgets: Vec<Budget>,
    persistence_error: Option<Error>,
}

impl<S: KeyValueStore> RecordStore<S> {
    /// Load the records in `storage`, generating UUIDs for new records and
    /// dating them with the system clock.
    pub fn load(storage: S) -> Self {
        Self::load_with(storage, UuidGenerator, SystemClock)
    }
}

impl<S, I, C> RecordStore<S, I, C>
where
    S: KeyValueStore,
    I: IdGenerator,
    C: Clock,
{
    /// Load the records in `storage` with explicit collaborators.
    ///
    /// Absent, unreadable or malformed lists load as empty lists. Individual
    /// entries that cannot be parsed, that have a non-positive budget limit or
    /// that repeat an earlier ID are skipped.
    pub fn load_with(storage: S, id_generator: I, clock: C) -> Self {
        let transactions: Vec<Transaction> =
            load_records(&storage, TRANSACTIONS_KEY, |transaction: &Transaction| {
                transaction.id.clone()
            });
        let budgets: Vec<Budget> =
            load_records(&storage, BUDGETS_KEY, |budget: &Budget| budget.id.clone());

        tracing::debug!(
            "Loaded {} transactions and {} budgets from storage",
            transactions.len(),
            budgets.len()
        );

        Self {
            storage,
            id_generator,
            clock,
            transactions,
            budgets,
            persistence_error: None,
        }
    }

    /// All transactions in insertion order.
    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    /// All budgets in insertion order.
    pub fn budgets(&self) -> &[Budget] {
        &self.budgets
    }

    /// The storage backend the store persists to.
    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Retrieve a transaction by its `id`.
    ///
    /// # Errors
    /// Returns an [Error::TransactionNotFound] if no transaction has `id`.
    pub fn get_transaction(&self, id: &str) -> Result<&Transaction, Error> {
        self.transactions
            .iter()
            .find(|transaction| transaction.id == id)
            .ok_or_else(|| Error::TransactionNotFound(id.to_owned()))
    }

    /// Retrieve a budget by its `id`.
    ///
    /// # Errors
    /// Returns an [Error::BudgetNotFound] if no budget has `id`.
    pub fn get_budget(&self, id: &str) -> Result<&Budget, Error> {
        self.budgets
            .iter()
            .find(|budget| budget.id == id)
            .ok_or_else(|| Error::BudgetNotFound(id.to_owned()))
    }

    /// Add a transaction to the end of the list.
    ///
    /// A fresh ID is generated if `input` has none, and missing optional fields
    /// get their defaults.
    ///
    /// # Errors
    /// Returns an [Error::DuplicateId] if `input` carries an ID that is already
    /// in use, or if no unused ID could be generated.
    pub fn add_transaction(&mut self, input: TransactionInput) -> Result<Transaction, Error> {
        let transactions = &self.transactions;
        let id = claim_id(input.id.clone(), &mut self.id_generator, |id| {
            transactions.iter().any(|transaction| transaction.id == id)
        })?;

        let transaction = input.finalize(id, self.clock.now());
        tracing::debug!("Adding transaction {}", transaction.id);
        self.transactions.push(transaction.clone());
        self.persist_transactions();

        Ok(transaction)
    }

    /// Replace the fields of the transaction `id` with `input`.
    ///
    /// The ID and position in the list are preserved, any ID in `input` is
    /// ignored. If `input` has no date the existing date is kept, other unset
    /// optional fields get their defaults.
    ///
    /// # Errors
    /// Returns an [Error::TransactionNotFound] if no transaction has `id`.
    pub fn update_transaction(
        &mut self,
        id: &str,
        input: TransactionInput,
    ) -> Result<Transaction, Error> {
        let index = self
            .transactions
            .iter()
            .position(|transaction| transaction.id == id)
            .ok_or_else(|| Error::TransactionNotFound(id.to_owned()))?;

        let existing = &self.transactions[index];
        let updated = input.finalize(existing.id.clone(), existing.date.clone());
        tracing::debug!("Updating transaction {}", updated.id);
        self.transactions[index] = updated.clone();
        self.persist_transactions();

        Ok(updated)
    }

    /// Remove the transaction `id`, returning whether it existed.
    ///
    /// Removing a transaction that does not exist does nothing.
    pub fn remove_transaction(&mut self, id: &str) -> bool {
        let count_before = self.transactions.len();
        self.transactions.retain(|transaction| transaction.id != id);

        let removed = self.transactions.len() != count_before;
        if removed {
            tracing::debug!("Removed transaction {id}");
            self.persist_transactions();
        }

        removed
    }

    /// Add a budget to the end of the list.
    ///
    /// # Errors
    /// Returns an:
    /// - [Error::InvalidBudgetLimit] if the limit is not greater than zero,
    /// - or [Error::DuplicateId] if `input` carries an ID that is already in use.
    pub fn add_budget(&mut self, input: BudgetInput) -> Result<Budget, Error> {
        let limit = BudgetLimit::new(input.limit)?;
        let budgets = &self.budgets;
        let id = claim_id(input.id, &mut self.id_generator, |id| {
            budgets.iter().any(|budget| budget.id == id)
        })?;

        let budget = Budget {
            id,
            category: input.category,
            limit,
        };
        tracing::debug!("Adding budget {} for \"{}\"", budget.id, budget.category);
        self.budgets.push(budget.clone());
        self.persist_budgets();

        Ok(budget)
    }

    /// Replace the category and limit of the budget `id`.
    ///
    /// # Errors
    /// Returns an:
    /// - [Error::BudgetNotFound] if no budget has `id`,
    /// - or [Error::InvalidBudgetLimit] if the limit is not greater than zero.
    pub fn update_budget(&mut self, id: &str, input: BudgetInput) -> Result<Budget, Error> {
        let index = self
            .budgets
            .iter()
            .position(|budget| budget.id == id)
            .ok_or_else(|| Error::BudgetNotFound(id.to_owned()))?;
        let limit = BudgetLimit::new(input.limit)?;

        let budget = &mut self.budgets[index];
        budget.category = input.category;
        budget.limit = limit;
        let updated = budget.clone();
        tracing::debug!("Updating budget {}", updated.id);
        self.persist_budgets();

        Ok(updated)
    }

    /// Remove the budget `id`, returning whether it existed.
    ///
    /// Transactions in the budget's category are left untouched.
    pub fn remove_budget(&mut self, id: &str) -> bool {
        let count_before = self.budgets.len();
        self.budgets.retain(|budget| budget.id != id);

        let removed = self.budgets.len() != count_before;
        if removed {
            tracing::debug!("Removed budget {id}");
            self.persist_budgets();
        }

        removed
    }

    /// The transactions counted against `budget`.
    pub fn transactions_for_budget(&self, budget: &Budget) -> Vec<&Transaction> {
        transactions_for_budget(budget, &self.transactions)
    }

    /// Take the most recent storage write error, if there has been one since
    /// the last call.
    pub fn take_persistence_error(&mut self) -> Option<Error> {
        self.persistence_error.take()
    }

    fn persist_transactions(&mut self) {
        let result = write_records(&mut self.storage, TRANSACTIONS_KEY, &self.transactions);
        self.record_persistence_result(TRANSACTIONS_KEY, result);
    }

    fn persist_budgets(&mut self) {
        let result = write_records(&mut self.storage, BUDGETS_KEY, &self.budgets);
        self.record_persistence_result(BUDGETS_KEY, result);
    }

    fn record_persistence_result(&mut self, key: &str, result: Result<(), Error>) {
        if let Err(error) = result {
            tracing::error!("Could not save \"{key}\" to storage: {error}");
            self.persistence_error = Some(error);
        }
    }
}

/// Pick the ID for a new record: the caller's if it is free, otherwise the
/// first generated ID that is not taken. An empty requested ID counts as none.
fn claim_id(
    requested: Option<String>,
    id_generator: &mut impl IdGenerator,
    is_taken: impl Fn(&str) -> bool,
) -> Result<String, Error> {
    if let Some(id) = requested.filter(|id| !id.is_empty()) {
        return if is_taken(&id) {
            Err(Error::DuplicateId(id))
        } else {
            Ok(id)
        };
    }

    let mut last_attempt = String::new();
    for _ in 0..MAX_ID_ATTEMPTS {
        let id = id_generator.next_id();
        if !id.is_empty() && !is_taken(&id) {
            return Ok(id);
        }
        last_attempt = id;
    }

    Err(Error::DuplicateId(last_attempt))
}

fn write_records<T: Serialize>(
    storage: &mut impl KeyValueStore,
    key: &str,
    records: &[T],
) -> Result<(), Error> {
    let json = serde_json::to_string(records)?;
    storage.set(key, &json)
}

fn load_records<T, F>(storage: &impl KeyValueStore, key: &str, id_of: F) -> Vec<T>
where
    T: DeserializeOwned,
    F: Fn(&T) -> String,
{
    let raw = match storage.get(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => return Vec::new(),
        Err(error) => {
            tracing::warn!("Could not read \"{key}\" from storage, starting empty: {error}");
            return Vec::new();
        }
    };

    let entries: Vec<serde_json::Value> = match serde_json::from_str(&raw) {
        Ok(entries) => entries,
        Err(error) => {
            tracing::warn!("Stored \"{key}\" is not a JSON list, starting empty: {error}");
            return Vec::new();
        }
    };

    let mut seen_ids = HashSet::new();
    let mut records = Vec::with_capacity(entries.len());

    for (index, entry) in entries.into_iter().enumerate() {
        match serde_json::from_value::<T>(entry) {
            Ok(record) => {
                let id = id_of(&record);
                if seen_ids.insert(id.clone()) {
                    records.push(record);
                } else {
                    tracing::warn!("Skipping stored \"{key}\" entry {index} with duplicate ID {id}");
                }
            }
            Err(error) => {
                tracing::warn!("Skipping malformed stored \"{key}\" entry {index}: {error}");
            }
        }
    }

    records
}

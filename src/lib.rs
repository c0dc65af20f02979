//! MoneyScope is a personal finance tracker for recording transactions and
//! budgets.
//!
//! This library holds the records in a [RecordStore] that is mirrored to a
//! [KeyValueStore] as JSON, derives dashboard figures from them in
//! [dashboard], and narrows them for display in [filter].
//!
//! ```
//! use moneyscope::{Budget, MemoryStorage, RecordStore, Transaction, dashboard};
//!
//! let mut store = RecordStore::load(MemoryStorage::new());
//! store.add_transaction(Transaction::build(100.0, "Income").title("Salary"))?;
//! store.add_transaction(Transaction::build(-40.0, "Food").title("Groceries"))?;
//! let food = store.add_budget(Budget::build("Food", 100.0))?;
//!
//! assert_eq!(dashboard::total(store.transactions()), 60.0);
//! assert_eq!(dashboard::budget_spent(&food, store.transactions()), 40.0);
//! # Ok::<(), moneyscope::Error>(())
//! ```

mod budget;
mod clock;
pub mod dashboard;
pub mod display;
mod error;
pub mod filter;
mod id_generator;
pub mod storage;
mod store;
mod transaction;

#[cfg(test)]
mod test_utils;

pub use budget::{Budget, BudgetId, BudgetInput, BudgetLimit};
pub use clock::{Clock, SystemClock};
pub use dashboard::transactions_for_budget;
pub use error::Error;
pub use id_generator::{IdGenerator, UuidGenerator};
pub use storage::{KeyValueStore, MemoryStorage, SQLiteStorage};
pub use store::RecordStore;
pub use transaction::{
    DEFAULT_COLOR, DEFAULT_EMOJI, DEFAULT_TITLE, Recurrence, Transaction, TransactionId,
    TransactionInput,
};

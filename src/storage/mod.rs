//! Contains the key-value storage trait the record store persists to, and its
//! implementations.

mod memory;
mod sqlite;

pub use memory::MemoryStorage;
pub use sqlite::{SQLiteStorage, create_storage_table};

use crate::Error;

/// The key the transaction list is stored under.
pub const TRANSACTIONS_KEY: &str = "transactions";

/// The key the budget list is stored under.
pub const BUDGETS_KEY: &str = "budgets";

/// A string key-value store, the equivalent of a browser's local storage.
///
/// The record store reads each key once when it is loaded and overwrites the
/// whole value after every mutation.
pub trait KeyValueStore {
    /// Get the value stored under `key`, or `None` if nothing has been stored.
    ///
    /// # Errors
    /// Implementers should return an error if the underlying storage could not
    /// be read.
    fn get(&self, key: &str) -> Result<Option<String>, Error>;

    /// Store `value` under `key`, replacing any existing value.
    ///
    /// # Errors
    /// Implementers should return an error if the underlying storage could not
    /// be written.
    fn set(&mut self, key: &str, value: &str) -> Result<(), Error>;
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for Box<T> {
    fn get(&self, key: &str) -> Result<Option<String>, Error> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), Error> {
        (**self).set(key, value)
    }
}

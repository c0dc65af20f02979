//! Defines the crate level error type.

use crate::{budget::BudgetId, transaction::TransactionId};

/// The errors that may occur when working with the record store and its
/// storage backends.
///
/// The aggregation and filter functions never fail, so none of these come
/// from them.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// Tried to read or update a transaction that is not in the store.
    ///
    /// Removing a missing transaction is not an error.
    #[error("the transaction \"{0}\" could not be found")]
    TransactionNotFound(TransactionId),

    /// Tried to read or update a budget that is not in the store.
    #[error("the budget \"{0}\" could not be found")]
    BudgetNotFound(BudgetId),

    /// A budget limit must be a finite number greater than zero.
    #[error("{0} is not a valid budget limit, the limit must be greater than zero")]
    InvalidBudgetLimit(f64),

    /// A recurrence string was not one of "daily", "weekly", "monthly" or "yearly".
    #[error("\"{0}\" is not a valid recurrence")]
    InvalidRecurrence(String),

    /// The caller supplied an ID that another record already uses.
    #[error("the ID \"{0}\" is already in use")]
    DuplicateId(String),

    /// The key-value storage could not be read from or written to.
    ///
    /// In-memory state stays authoritative when this happens, the error is
    /// only reported.
    #[error("could not access storage: {0}")]
    Persistence(String),

    /// An unhandled/unexpected SQL error.
    #[error("an unexpected SQL error occurred: {0}")]
    SqlError(rusqlite::Error),

    /// An error occurred while serializing records as JSON.
    #[error("could not serialize as JSON: {0}")]
    JSONSerializationError(String),
}

impl From<rusqlite::Error> for Error {
    fn from(value: rusqlite::Error) -> Self {
        tracing::error!("an unhandled SQL error occurred: {}", value);
        Error::SqlError(value)
    }
}

impl From<serde_json::Error> for Error {
    fn from(value: serde_json::Error) -> Self {
        Error::JSONSerializationError(value.to_string())
    }
}

#[cfg(test)]
mod tests {
    use crate::Error;

    #[test]
    fn invalid_limit_message_includes_value() {
        let message = Error::InvalidBudgetLimit(-5.0).to_string();

        assert!(message.contains("-5"), "got {message}");
    }

    #[test]
    fn converts_sql_error() {
        let error: Error = rusqlite::Error::InvalidQuery.into();

        assert_eq!(error, Error::SqlError(rusqlite::Error::InvalidQuery));
    }
}

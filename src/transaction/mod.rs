//! Transactions: the income and expense records at the heart of the app.

mod record;
mod recurrence;

pub use record::{
    DEFAULT_COLOR, DEFAULT_EMOJI, DEFAULT_TITLE, Transaction, TransactionId, TransactionInput,
};
pub use recurrence::Recurrence;

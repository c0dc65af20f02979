//! Defines the core data model for transactions.

use serde::{Deserialize, Deserializer, Serialize};

use super::recurrence::{Recurrence, deserialize_optional_recurrence};

/// The opaque identifier of a transaction.
pub type TransactionId = String;

/// The title given to transactions created without one.
pub const DEFAULT_TITLE: &str = "Untitled";

/// The emoji given to transactions created without one.
pub const DEFAULT_EMOJI: &str = "💰";

/// The display color given to transactions created without one.
pub const DEFAULT_COLOR: &str = "#6366f1";

// ============================================================================
// MODELS
// ============================================================================

/// An expense or income, i.e. an event where money was either spent or earned.
///
/// To create a new `Transaction`, use [Transaction::build] and add the
/// resulting [TransactionInput] to a [RecordStore](crate::RecordStore).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// The ID of the transaction, unique within a store.
    pub id: TransactionId,
    /// A short label for the transaction.
    #[serde(default = "default_title")]
    pub title: String,
    /// The free-text category used for grouping, e.g. "Food".
    #[serde(default)]
    pub category: String,
    #[serde(default = "default_emoji")]
    pub emoji: String,
    #[serde(default = "default_color")]
    pub color: String,
    /// The amount of money earned (positive) or spent (negative).
    pub value: f64,
    /// When the transaction happened as an ISO-8601 string.
    pub date: String,
    /// The label of the budget this transaction is filed under.
    #[serde(
        default,
        deserialize_with = "deserialize_optional_label",
        skip_serializing_if = "Option::is_none"
    )]
    pub budget: Option<String>,
    /// How often the transaction repeats, if at all.
    #[serde(
        default,
        deserialize_with = "deserialize_optional_recurrence",
        skip_serializing_if = "Option::is_none"
    )]
    pub recurrence: Option<Recurrence>,
}

impl Transaction {
    /// Create a new transaction.
    ///
    /// Shortcut for [TransactionInput] for discoverability.
    pub fn build(value: f64, category: &str) -> TransactionInput {
        TransactionInput {
            id: None,
            title: None,
            value,
            category: category.to_owned(),
            date: None,
            emoji: None,
            color: None,
            budget: None,
            recurrence: None,
        }
    }

    /// Whether the transaction earned money.
    pub fn is_income(&self) -> bool {
        self.value > 0.0
    }

    /// Whether the transaction spent money.
    pub fn is_expense(&self) -> bool {
        self.value < 0.0
    }

    /// The budget label, or an empty string when there is none.
    pub fn budget_label(&self) -> &str {
        self.budget.as_deref().unwrap_or_default()
    }

    /// The recurrence name, or an empty string when there is none.
    pub fn recurrence_label(&self) -> &str {
        self.recurrence
            .as_ref()
            .map(Recurrence::as_str)
            .unwrap_or_default()
    }
}

/// The fields a caller supplies to create or replace a [Transaction].
///
/// Optional fields left unset are filled in by the store: a fresh ID, the
/// title [DEFAULT_TITLE], the current time as the date, [DEFAULT_EMOJI] and
/// [DEFAULT_COLOR].
///
/// # Examples
///
/// ```
/// use moneyscope::{Recurrence, Transaction};
///
/// let input = Transaction::build(-1200.0, "Housing")
///     .title("Rent")
///     .recurrence(Some(Recurrence::Monthly));
///
/// assert_eq!(input.title.as_deref(), Some("Rent"));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionInput {
    /// A caller-chosen ID. Must not clash with an existing transaction, an
    /// empty ID is replaced with a generated one.
    pub id: Option<TransactionId>,
    pub title: Option<String>,
    /// Positive values are income, negative values are expenses.
    pub value: f64,
    pub category: String,
    pub date: Option<String>,
    pub emoji: Option<String>,
    pub color: Option<String>,
    /// An empty label is treated the same as no budget.
    pub budget: Option<String>,
    pub recurrence: Option<Recurrence>,
}

impl TransactionInput {
    /// Set the ID for the transaction.
    pub fn id(mut self, id: &str) -> Self {
        self.id = Some(id.to_owned());
        self
    }

    /// Set the title for the transaction.
    pub fn title(mut self, title: &str) -> Self {
        self.title = Some(title.to_owned());
        self
    }

    /// Set the date for the transaction.
    pub fn date(mut self, date: &str) -> Self {
        self.date = Some(date.to_owned());
        self
    }

    /// Set the emoji for the transaction.
    pub fn emoji(mut self, emoji: &str) -> Self {
        self.emoji = Some(emoji.to_owned());
        self
    }

    /// Set the display color for the transaction.
    pub fn color(mut self, color: &str) -> Self {
        self.color = Some(color.to_owned());
        self
    }

    /// Set the budget label for the transaction.
    pub fn budget(mut self, budget: Option<&str>) -> Self {
        self.budget = budget.map(str::to_owned);
        self
    }

    /// Set the recurrence for the transaction.
    pub fn recurrence(mut self, recurrence: Option<Recurrence>) -> Self {
        self.recurrence = recurrence;
        self
    }

    /// Turn the input into a transaction with the given `id`, falling back to
    /// `default_date` when no date was set.
    pub(crate) fn finalize(self, id: TransactionId, default_date: String) -> Transaction {
        Transaction {
            id,
            title: self.title.unwrap_or_else(default_title),
            category: self.category,
            emoji: self.emoji.unwrap_or_else(default_emoji),
            color: self.color.unwrap_or_else(default_color),
            value: self.value,
            date: self.date.unwrap_or(default_date),
            budget: self.budget.filter(|label| !label.is_empty()),
            recurrence: self.recurrence,
        }
    }
}

fn default_title() -> String {
    DEFAULT_TITLE.to_owned()
}

fn default_emoji() -> String {
    DEFAULT_EMOJI.to_owned()
}

fn default_color() -> String {
    DEFAULT_COLOR.to_owned()
}

/// Deserialize an optional label where an empty string means "none".
pub(crate) fn deserialize_optional_label<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;

    Ok(raw.filter(|label| !label.is_empty()))
}

// ============================================================================
// TESTS
// ============================================================================

//! How often a transaction repeats.

use std::{fmt::Display, str::FromStr};

use serde::{Deserialize, Deserializer, Serialize};

use crate::Error;

/// The interval at which a transaction repeats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Recurrence {
    /// Repeats every day.
    Daily,
    /// Repeats every week.
    Weekly,
    /// Repeats every month.
    Monthly,
    /// Repeats every year.
    Yearly,
}

impl Recurrence {
    /// All recurrences, shortest interval first.
    pub const ALL: [Recurrence; 4] = [
        Recurrence::Daily,
        Recurrence::Weekly,
        Recurrence::Monthly,
        Recurrence::Yearly,
    ];

    /// The lowercase name used in storage and in filter selections.
    pub fn as_str(&self) -> &'static str {
        match self {
            Recurrence::Daily => "daily",
            Recurrence::Weekly => "weekly",
            Recurrence::Monthly => "monthly",
            Recurrence::Yearly => "yearly",
        }
    }
}

impl Display for Recurrence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Recurrence {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Recurrence::ALL
            .into_iter()
            .find(|recurrence| recurrence.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| Error::InvalidRecurrence(s.to_owned()))
    }
}

/// Deserialize an optional recurrence where an empty string means "none".
///
/// Stored records written by a form with an empty "None" option carry
/// `"recurrence": ""` rather than omitting the field.
pub(crate) fn deserialize_optional_recurrence<'de, D>(
    deserializer: D,
) -> Result<Option<Recurrence>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;

    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(text) => text.parse().map(Some).map_err(serde::de::Error::custom),
    }
}

#[cfg(test)]
mod tests {
    use crate::{Error, transaction::Recurrence};

    #[test]
    fn parses_case_insensitively() {
        assert_eq!("Monthly".parse(), Ok(Recurrence::Monthly));
        assert_eq!(" weekly ".parse(), Ok(Recurrence::Weekly));
    }

    #[test]
    fn rejects_unknown_recurrence() {
        let result: Result<Recurrence, Error> = "fortnightly".parse();

        assert_eq!(
            result,
            Err(Error::InvalidRecurrence("fortnightly".to_owned()))
        );
    }

    #[test]
    fn serializes_lowercase() {
        let json = serde_json::to_string(&Recurrence::Yearly).unwrap();

        assert_eq!(json, "\"yearly\"");
    }
}

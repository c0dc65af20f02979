//! The source of timestamps for transactions created without a date.

use time::{OffsetDateTime, format_description::well_known::Rfc3339};

/// Supplies the timestamp given to transactions created without a date.
pub trait Clock {
    /// The current time as an ISO-8601 string.
    fn now(&self) -> String;
}

/// Reads the system clock and formats the time as RFC 3339 in UTC.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> String {
        format_timestamp(OffsetDateTime::now_utc())
    }
}

fn format_timestamp(date_time: OffsetDateTime) -> String {
    date_time.format(&Rfc3339).unwrap_or_else(|error| {
        tracing::warn!("could not format {date_time} as RFC 3339: {error}");
        date_time.to_string()
    })
}

#[cfg(test)]
mod tests {
    use time::macros::datetime;

    use crate::clock::{Clock, SystemClock, format_timestamp};

    #[test]
    fn formats_as_rfc3339() {
        let formatted = format_timestamp(datetime!(2025-10-05 13:45:30 UTC));

        assert_eq!(formatted, "2025-10-05T13:45:30Z");
    }

    #[test]
    fn system_clock_is_parseable() {
        let now = SystemClock.now();

        let parsed = time::OffsetDateTime::parse(
            &now,
            &time::format_description::well_known::Rfc3339,
        );

        assert!(parsed.is_ok(), "could not parse {now}");
    }
}

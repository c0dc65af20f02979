//! Text formatting for amounts and titles shown to the user.

use std::sync::OnceLock;

use numfmt::{Formatter, Precision};
use unicode_segmentation::UnicodeSegmentation;

/// The max number of graphemes to display in list rows before truncating and
/// displaying ellipses.
pub const MAX_TITLE_GRAPHEMES: usize = 32;

/// Format `number` as dollars and cents, e.g. "$1,234.50" or "-$12.00".
pub fn format_currency(number: f64) -> String {
    static POSITIVE_FMT: OnceLock<Option<Formatter>> = OnceLock::new();

    let positive_fmt = POSITIVE_FMT.get_or_init(|| {
        Formatter::currency("$")
            .ok()
            .map(|formatter| formatter.precision(Precision::Decimals(2)))
    });

    static NEGATIVE_FMT: OnceLock<Option<Formatter>> = OnceLock::new();

    let negative_fmt = NEGATIVE_FMT.get_or_init(|| {
        Formatter::currency("-$")
            .ok()
            .map(|formatter| formatter.precision(Precision::Decimals(2)))
    });

    let formatted_string = if number < 0.0 {
        match negative_fmt {
            Some(formatter) => formatter.fmt_string(number.abs()),
            None => format!("-${:.2}", number.abs()),
        }
    } else if number > 0.0 {
        match positive_fmt {
            Some(formatter) => formatter.fmt_string(number),
            None => format!("${number:.2}"),
        }
    } else {
        // Zero is hardcoded as "0", so we must specify the formatted string for zero
        return "$0.00".to_owned();
    };

    // numfmt drops trailing zeros, e.g. "12.30" is rendered as "12.3" and
    // "12.00" as "12".
    match formatted_string.rsplit_once('.') {
        Some((_, cents)) if cents.len() == 1 => format!("{formatted_string}0"),
        Some(_) => formatted_string,
        None => format!("{formatted_string}.00"),
    }
}

/// Shorten `title` to at most [MAX_TITLE_GRAPHEMES] graphemes.
///
/// Long titles are cut short and end in "...".
pub fn format_title(title: &str) -> String {
    let title_length = title.graphemes(true).count();

    if title_length <= MAX_TITLE_GRAPHEMES {
        title.to_owned()
    } else {
        let truncated: String = title
            .graphemes(true)
            .take(MAX_TITLE_GRAPHEMES - 3)
            .collect();
        truncated + "..."
    }
}

/// Whether `text` is exactly one user-perceived character, e.g. a single emoji
/// including any skin tone or joiner sequence.
pub fn is_single_grapheme(text: &str) -> bool {
    text.graphemes(true).count() == 1
}

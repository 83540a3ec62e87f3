//! Amount parsing for statement cells such as `"△1,234円"`.

use std::num::ParseIntError;

/// Triangle used in Japanese statements to mark a negative amount.
pub const NEGATIVE_MARKER: char = '△';

/// Parses a value cell, mapping malformed input to `None`.
pub fn parse_value(cell: &str) -> Option<i64> {
    try_parse_value(cell).ok().flatten()
}

/// Parses a value cell.
///
/// The leading run of non-ASCII characters is dropped, then everything but
/// digits and `-`. A cell containing [`NEGATIVE_MARKER`] gets a `-` prefixed
/// even when the digits already carry one, so `"△-5"` fails to parse.
/// `Ok(None)` means nothing numeric was left.
pub fn try_parse_value(cell: &str) -> Result<Option<i64>, ParseIntError> {
    let rest = cell.trim_start_matches(|c: char| !c.is_ascii());

    let mut digits: String = rest.chars().filter_map(ascii_digit_or_minus).collect();

    if cell.contains(NEGATIVE_MARKER) {
        digits.insert(0, '-');
    }

    if digits.is_empty() {
        return Ok(None);
    }

    digits.parse::<i64>().map(Some)
}

// Full-width digits count as digits; they are folded to ASCII.
fn ascii_digit_or_minus(c: char) -> Option<char> {
    match c {
        '0'..='9' | '-' => Some(c),
        '０'..='９' => char::from_digit(c as u32 - '０' as u32, 10),
        _ => None,
    }
}

//! Display formatting for counts, durations, dates, and titles.
//!
//! Every function here is total: malformed input falls back to a
//! printable value instead of an error, so rendering never fails.

use chrono::NaiveDate;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Placeholder for durations and dates that are absent.
pub const UNKNOWN: &str = "Unknown";

/// Marker appended to truncated titles.
pub const ELLIPSIS: &str = "...";

/// Title words must be longer than this many characters to be counted.
pub const MIN_TITLE_WORD_CHARS: usize = 3;

// ---------------------------------------------------------------------------
// Numbers
// ---------------------------------------------------------------------------

/// Format a magnitude for readability: `2.5M`, `1.5K`, `999`, `0`.
///
/// Values below one thousand are truncated to an integer, not rounded.
pub fn format_number(value: f64) -> String {
    if value == 0.0 || !value.is_finite() {
        return "0".to_string();
    }

    if value >= 1_000_000.0 {
        format!("{:.1}M", value / 1_000_000.0)
    } else if value >= 1_000.0 {
        format!("{:.1}K", value / 1_000.0)
    } else {
        format!("{}", value.trunc() as i64)
    }
}

/// [`format_number`] for integer counts.
pub fn format_count(count: u64) -> String {
    format_number(count as f64)
}

/// Format an integer with `,` thousands separators: `1234567` -> `1,234,567`.
pub fn format_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Round to two decimal places.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Format a percentage rate the way it is stored: `10.0`, `3.45`.
///
/// Whole numbers keep one decimal so a rate is never mistaken for a count.
pub fn format_rate(rate: f64) -> String {
    if rate.fract() == 0.0 {
        format!("{rate:.1}")
    } else {
        format!("{rate}")
    }
}

// ---------------------------------------------------------------------------
// Durations
// ---------------------------------------------------------------------------

/// Format a duration in seconds as `HH:MM:SS`.
///
/// Zero or absent durations render as [`UNKNOWN`].
pub fn format_duration(seconds: Option<u64>) -> String {
    match seconds {
        Some(secs) if secs > 0 => format!(
            "{:02}:{:02}:{:02}",
            secs / 3600,
            (secs % 3600) / 60,
            secs % 60
        ),
        _ => UNKNOWN.to_string(),
    }
}

/// Format a (possibly fractional) number of seconds as `M:SS`.
pub fn format_clock(seconds: f64) -> String {
    let total = if seconds.is_finite() && seconds > 0.0 {
        seconds.round() as u64
    } else {
        0
    };
    format!("{}:{:02}", total / 60, total % 60)
}

// ---------------------------------------------------------------------------
// Dates
// ---------------------------------------------------------------------------

/// Parse an exact 8-digit `YYYYMMDD` string.
pub fn parse_compact_date(raw: &str) -> Option<NaiveDate> {
    if raw.len() != 8 || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    NaiveDate::parse_from_str(raw, "%Y%m%d").ok()
}

/// Format an upload date as `YYYY-MM-DD`.
///
/// Empty input renders as [`UNKNOWN`]; anything that is not a valid
/// `YYYYMMDD` date passes through unchanged.
pub fn format_upload_date(raw: &str) -> String {
    if raw.is_empty() {
        return UNKNOWN.to_string();
    }
    match parse_compact_date(raw) {
        Some(date) => date.format("%Y-%m-%d").to_string(),
        None => raw.to_string(),
    }
}

// ---------------------------------------------------------------------------
// Titles
// ---------------------------------------------------------------------------

/// Truncate `title` to `max_chars` characters, appending [`ELLIPSIS`] when
/// anything was cut.
pub fn truncate_title(title: &str, max_chars: usize) -> String {
    if title.chars().count() <= max_chars {
        return title.to_string();
    }
    let mut out: String = title.chars().take(max_chars).collect();
    out.push_str(ELLIPSIS);
    out
}

/// Lowercased whitespace-separated words longer than
/// [`MIN_TITLE_WORD_CHARS`] characters.
pub fn title_words(title: &str) -> Vec<String> {
    title
        .split_whitespace()
        .filter(|w| w.chars().count() > MIN_TITLE_WORD_CHARS)
        .map(|w| w.to_lowercase())
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

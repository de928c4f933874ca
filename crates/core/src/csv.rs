//! Minimal CSV reading and writing.
//!
//! Writing quotes any cell containing a comma, quote, or line break.
//! Reading is line based: quoted fields may contain commas and escaped
//! quotes but not line breaks, which matches analytics exports.

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Writing
// ---------------------------------------------------------------------------

/// Escape a value for CSV: wrap in quotes if it contains a comma, quote,
/// or line break.
pub fn csv_escape(value: &str) -> String {
    if value.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

/// Build a CSV document from a header and data rows. Every line, including
/// the last, ends with `\n`.
pub fn build_csv<I>(header: &[&str], rows: I) -> String
where
    I: IntoIterator<Item = Vec<String>>,
{
    let mut out = String::new();
    let header_parts: Vec<String> = header.iter().map(|h| csv_escape(h)).collect();
    out.push_str(&header_parts.join(","));
    out.push('\n');

    for row in rows {
        let row_parts: Vec<String> = row.iter().map(|v| csv_escape(v)).collect();
        out.push_str(&row_parts.join(","));
        out.push('\n');
    }
    out
}

// ---------------------------------------------------------------------------
// Reading
// ---------------------------------------------------------------------------

/// A parsed CSV document.
#[derive(Debug, Clone, PartialEq)]
pub struct CsvTable {
    pub headers: Vec<String>,
    /// Data rows paired with their 1-based line number in the source.
    pub rows: Vec<(usize, Vec<String>)>,
}

impl CsvTable {
    /// Index of the column named `name` (exact match after trimming).
    pub fn column(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    /// Like [`column`](Self::column), but a missing column is an error.
    pub fn require_column(
        &self,
        source_name: &'static str,
        name: &'static str,
    ) -> Result<usize, CoreError> {
        self.column(name).ok_or(CoreError::MissingColumn {
            source_name,
            column: name,
        })
    }
}

/// Cell `index` of `row`, or `""` when the row is short.
pub fn cell(row: &[String], index: usize) -> &str {
    row.get(index).map(|s| s.as_str()).unwrap_or("")
}

/// Parse CSV text. The first non-empty line is the header; blank lines are
/// skipped. A leading byte-order mark is ignored.
pub fn parse_csv(text: &str) -> Result<CsvTable, CoreError> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    let mut lines = text
        .lines()
        .enumerate()
        .map(|(i, line)| (i + 1, line))
        .filter(|(_, line)| !line.trim().is_empty());

    let (_, header_line) = lines.next().ok_or(CoreError::Parse {
        line: 1,
        message: "CSV is empty".to_string(),
    })?;
    let headers: Vec<String> = parse_csv_line(header_line)
        .into_iter()
        .map(|h| h.trim().to_string())
        .collect();

    let rows = lines
        .map(|(number, line)| (number, parse_csv_line(line)))
        .collect();

    Ok(CsvTable { headers, rows })
}

/// Parse a single CSV line, handling quoted fields.
fn parse_csv_line(line: &str) -> Vec<String> {
    let mut result = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(ch) = chars.next() {
        if in_quotes {
            if ch == '"' {
                if chars.peek() == Some(&'"') {
                    // Escaped quote.
                    current.push('"');
                    chars.next();
                } else {
                    in_quotes = false;
                }
            } else {
                current.push(ch);
            }
        } else if ch == '"' {
            in_quotes = true;
        } else if ch == ',' {
            result.push(std::mem::take(&mut current));
        } else {
            current.push(ch);
        }
    }
    result.push(current);
    result
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

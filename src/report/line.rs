//! Data line parsing.
//!
//! Report rows use standard CSV quoting, e.g. parameterised benchmark names
//! such as `"Sort(n: 10, seed: 3)"` carry commas inside quotes. A row with
//! broken quoting cannot be split reliably and is rejected.

use crate::utils::error::ReportError;

/// Split one data line into its trimmed field values
///
/// # Errors
/// * `ReportError::MalformedLine` - unbalanced quotes, or a closing quote
///   that is not followed by a delimiter
pub fn parse_line(raw: &str) -> Result<Vec<String>, ReportError> {
    check_quoting(raw).map_err(|reason| malformed(raw, reason))?;

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .trim(csv::Trim::All)
        .from_reader(raw.as_bytes());

    match reader.records().next() {
        Some(record) => {
            let record = record.map_err(|e| malformed(raw, e.to_string()))?;
            Ok(record.iter().map(str::to_string).collect())
        }
        // blank line
        None => Ok(Vec::new()),
    }
}

#[derive(Debug, Clone, Copy)]
enum QuoteState {
    FieldStart,
    Unquoted,
    Quoted,
    QuoteInQuoted,
}

/// Walk the line once and reject quoting the CSV reader would silently accept
fn check_quoting(raw: &str) -> Result<(), String> {
    use QuoteState::*;

    let mut state = FieldStart;
    for (position, c) in raw.char_indices() {
        state = match (state, c) {
            (FieldStart, '"') => Quoted,
            (FieldStart | Unquoted, ',') => FieldStart,
            (FieldStart | Unquoted, _) => Unquoted,
            (Quoted, '"') => QuoteInQuoted,
            (Quoted, _) => Quoted,
            (QuoteInQuoted, '"') => Quoted,
            (QuoteInQuoted, ',') => FieldStart,
            (QuoteInQuoted, other) => {
                return Err(format!(
                    "unexpected `{}` after closing quote at byte {}",
                    other, position
                ));
            }
        };
    }

    match state {
        Quoted => Err("unterminated quoted field".to_string()),
        _ => Ok(()),
    }
}

fn malformed(raw: &str, reason: impl Into<String>) -> ReportError {
    ReportError::MalformedLine {
        line: raw.to_string(),
        reason: reason.into(),
    }
}

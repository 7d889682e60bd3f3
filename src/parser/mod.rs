//! Record and order-list parsing.
//!
//! Records arrive as JSON Lines: one object per line with optional
//! `src_ip` / `dst_ip` fields. A single top-level JSON array of objects is
//! accepted as well. Parsing is graceful: a bad line or array element
//! becomes a [`MalformedLine`] and the rest of the input is still read. A
//! badly typed address field only drops that field.

use crate::model::{Address, MalformedLine, ParseError, Record};
use serde_json::Value;
use tracing::warn;

/// Result of parsing a record line with graceful error handling.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseResult {
    /// Successfully parsed a record.
    Valid(Record),
    /// Encountered a line that could not be parsed.
    Malformed(MalformedLine),
}

/// All records parsed from an input, plus the lines that were skipped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedRecords {
    /// Records in input order.
    pub records: Vec<Record>,
    /// Lines that failed to parse.
    pub malformed: Vec<MalformedLine>,
}

/// Parse a single line into a [`Record`].
///
/// # Errors
///
/// Returns `ParseError::InvalidJson` if the line is not valid JSON or not a
/// JSON object.
pub fn parse_record(raw: &str, line_number: usize) -> Result<Record, ParseError> {
    serde_json::from_str(raw).map_err(|e| ParseError::InvalidJson {
        line: line_number,
        message: e.to_string(),
    })
}

/// Parse a single line, never failing.
///
/// # Arguments
///
/// * `raw` - The raw line to parse
/// * `line_number` - The line number (1-indexed) for error reporting
pub fn parse_record_graceful(raw: &str, line_number: usize) -> ParseResult {
    match parse_record(raw, line_number) {
        Ok(record) => ParseResult::Valid(record),
        Err(parse_error) => {
            ParseResult::Malformed(MalformedLine::new(line_number, raw, parse_error.to_string()))
        }
    }
}

/// Parse a whole input into records.
///
/// Blank lines are skipped. If the trimmed input starts with `[` it is
/// first tried as one JSON array; elements that are not objects are
/// reported by their 1-indexed position. Input that is not a valid JSON
/// array falls back to line-by-line parsing.
pub fn parse_records(input: &str) -> ParsedRecords {
    if input.trim_start().starts_with('[') {
        if let Ok(elements) = serde_json::from_str::<Vec<Value>>(input) {
            return parse_array_elements(&elements);
        }
    }

    let mut parsed = ParsedRecords::default();
    for (index, line) in input.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        match parse_record_graceful(line, index + 1) {
            ParseResult::Valid(record) => parsed.records.push(record),
            ParseResult::Malformed(bad) => {
                warn!(
                    line = bad.line_number(),
                    error = bad.error_message(),
                    "Skipping malformed record line"
                );
                parsed.malformed.push(bad);
            }
        }
    }
    parsed
}

fn parse_array_elements(elements: &[Value]) -> ParsedRecords {
    let mut parsed = ParsedRecords::default();
    for (index, element) in elements.iter().enumerate() {
        match Record::from_json_value(element) {
            Some(record) => parsed.records.push(record),
            None => {
                let bad = MalformedLine::new(
                    index + 1,
                    element.to_string(),
                    format!("array element {} is not a JSON object", index + 1),
                );
                warn!(
                    element = bad.line_number(),
                    error = bad.error_message(),
                    "Skipping malformed record element"
                );
                parsed.malformed.push(bad);
            }
        }
    }
    parsed
}

/// Parse a newline-separated address list.
///
/// Surrounding whitespace is trimmed; blank lines and `#` comments are
/// ignored. Duplicates are kept here and resolved during ordering.
pub fn parse_order_list(input: &str) -> Vec<Address> {
    input
        .lines()
        .map(str::trim)
        .filter(|line| !line.starts_with('#'))
        .filter_map(|line| Address::new(line).ok())
        .collect()
}

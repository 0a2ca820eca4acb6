//! Field Record Module
//!
//! Utilities for reading the compact string-keyed wire records that describe
//! processor stages. A record maps field names to raw string values; the
//! helpers here extract required and optional fields and parse the boolean
//! and numeric literal formats the firmware understands.
//!
//! # Numeric literals
//!
//! Reference lists are comma-separated. Each element is classified on its
//! own: a decimal point selects floating-point parsing, anything else is
//! read as an integer. Elements are parsed from their own substring, so a
//! list may freely mix integer and floating-point entries.

use super::error::ConfigError;
use serde_json::Number;
use std::collections::HashMap;

/// A flat string-to-string record, as produced by the external query parser.
pub type FieldRecord = HashMap<String, String>;

/// Extracts a required field from a record.
///
/// # Arguments
/// * `record` - The field record to read.
/// * `key` - The field name to extract.
///
/// # Returns
/// The raw field value, or `ConfigError::MissingRequiredField` if the field
/// is absent.
pub fn require_field<'a>(
    record: &'a FieldRecord,
    key: &'static str,
) -> Result<&'a str, ConfigError> {
    record
        .get(key)
        .map(String::as_str)
        .ok_or(ConfigError::MissingRequiredField(key))
}

/// Extracts an optional field from a record.
pub fn optional_field<'a>(record: &'a FieldRecord, key: &str) -> Option<&'a str> {
    record.get(key).map(String::as_str)
}

/// Parses an optional boolean field, matched case-insensitively.
///
/// The value set is closed: anything other than "true" or "false" is
/// rejected rather than coerced.
pub fn parse_bool_field(
    record: &FieldRecord,
    key: &'static str,
) -> Result<Option<bool>, ConfigError> {
    match optional_field(record, key) {
        None => Ok(None),
        Some(raw) => match raw.to_ascii_lowercase().as_str() {
            "true" => Ok(Some(true)),
            "false" => Ok(Some(false)),
            _ => Err(ConfigError::UnknownEnumValue {
                field: key,
                value: raw.to_string(),
            }),
        },
    }
}

/// Parses a single numeric literal. A decimal point selects floating-point
/// parsing, otherwise the literal is read as an integer.
pub fn parse_numeric_literal(literal: &str) -> Result<Number, ConfigError> {
    if literal.contains('.') {
        let value: f64 = literal
            .parse()
            .map_err(|_| ConfigError::MalformedNumericLiteral(literal.to_string()))?;

        Number::from_f64(value)
            .ok_or_else(|| ConfigError::MalformedNumericLiteral(literal.to_string()))
    } else {
        let value: i64 = literal
            .parse()
            .map_err(|_| ConfigError::MalformedNumericLiteral(literal.to_string()))?;

        Ok(Number::from(value))
    }
}

/// Parses a comma-separated list of numeric literals, each element from its
/// own substring.
pub fn parse_numeric_list(raw: &str) -> Result<Vec<Number>, ConfigError> {
    raw.split(',').map(parse_numeric_literal).collect()
}

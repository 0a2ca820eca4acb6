//! Error types for processor config decoding and construction.

use thiserror::Error;

/// Errors returned while decoding or constructing a processor config.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A required field was absent from the record.
    #[error("missing required field '{0}'")]
    MissingRequiredField(&'static str),
    /// A field value did not match its closed value set.
    #[error("unrecognised value '{value}' for field '{field}'")]
    UnknownEnumValue { field: &'static str, value: String },
    /// A reference entry could not be parsed as its selected numeric kind.
    #[error("malformed numeric literal '{0}' in reference list")]
    MalformedNumericLiteral(String),
    /// A value-based config was constructed with no reference values.
    #[error("reference list requires at least one value")]
    EmptyReferenceList,
    /// A stream-token reference has no field-record representation.
    #[error("a stream token reference cannot be written to a field record")]
    UnserializableReference,
}

use crate::config::{
    ConfigError, FieldRecord, ProcessorConfig, optional_field, parse_bool_field,
    parse_numeric_list, require_field,
};
use crate::core::token::StreamToken;

use serde::{Deserialize, Serialize};
use serde_json::Number;

pub const FIELD_OPERATION: &str = "operation";
pub const FIELD_SIGNED: &str = "signed";
pub const FIELD_REFERENCE: &str = "reference";
pub const FIELD_MODE: &str = "mode";

/// Comparison relations the firmware filter can apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
    /// Equal
    Eq,
    /// Not equal
    Neq,
    /// Less than
    Lt,
    /// Less than or equal to
    Lte,
    /// Greater than
    Gt,
    /// Greater than or equal to
    Gte,
}

impl Operation {
    /// Parse an operation from its record name, case-insensitively
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "eq" => Some(Self::Eq),
            "neq" => Some(Self::Neq),
            "lt" => Some(Self::Lt),
            "lte" => Some(Self::Lte),
            "gt" => Some(Self::Gt),
            "gte" => Some(Self::Gte),
            _ => None,
        }
    }

    /// Convert to the record name
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Eq => "eq",
            Self::Neq => "neq",
            Self::Lt => "lt",
            Self::Lte => "lte",
            Self::Gt => "gt",
            Self::Gte => "gte",
        }
    }
}

/// Output modes for multi-valued comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    /// The input value is returned when the comparison is satisfied
    #[default]
    Absolute,
    /// The reference value satisfying the comparison is returned, no output if none match
    Reference,
    /// The 0-based index of the value satisfying the comparison is returned, n if none match
    Zone,
    /// 0 if the comparison failed, 1 if it passed
    PassFail,
}

impl Mode {
    /// Parse a mode from its record name, case-insensitively
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "absolute" => Some(Self::Absolute),
            "reference" => Some(Self::Reference),
            "zone" => Some(Self::Zone),
            "pass_fail" => Some(Self::PassFail),
            _ => None,
        }
    }

    /// Convert to the record name
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Absolute => "absolute",
            Self::Reference => "reference",
            Self::Zone => "zone",
            Self::PassFail => "pass_fail",
        }
    }
}

/// Reference operand of a comparison: either an explicit list of values, or
/// a handle to another data stream supplying the value at runtime.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Reference {
    /// Literal reference values, at least one
    Values(Vec<Number>),
    /// Live value drawn from another stream
    Token(StreamToken),
}

impl Reference {
    pub fn values(&self) -> Option<&[Number]> {
        match self {
            Reference::Values(values) => Some(values),
            Reference::Token(_) => None,
        }
    }

    pub fn token(&self) -> Option<&StreamToken> {
        match self {
            Reference::Token(token) => Some(token),
            Reference::Values(_) => None,
        }
    }
}

/// Configuration for the comparison data processor.
///
/// The processor filters a numeric stream by comparing each input value
/// against the reference operand and emits an output chosen by [`Mode`].
/// A config is immutable once built: it is constructed either from a wire
/// record via [`Comparison::from_record`], or programmatically through the
/// constructor forms below, and every entry point validates its input before
/// an object exists.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Comparison {
    operation: Operation,
    mode: Mode,
    signed: Option<bool>,
    reference: Reference,
}

impl Comparison {
    /// Scheme name identifying the comparison processor in stage records.
    pub const SCHEME: &'static str = "comparison";

    /// Decodes a comparison config from a wire record.
    ///
    /// `operation` and `reference` are required; `signed` defaults to
    /// unspecified and `mode` to absolute. Enum-valued fields are matched
    /// case-insensitively. The record path carries literal reference values
    /// only; stream-token references are reachable solely through the
    /// programmatic constructors.
    pub fn from_record(record: &FieldRecord) -> Result<Self, ConfigError> {
        let raw_operation = require_field(record, FIELD_OPERATION)?;
        let operation =
            Operation::from_str(raw_operation).ok_or_else(|| ConfigError::UnknownEnumValue {
                field: FIELD_OPERATION,
                value: raw_operation.to_string(),
            })?;

        let signed = parse_bool_field(record, FIELD_SIGNED)?;

        let mode = match optional_field(record, FIELD_MODE) {
            Some(raw) => Mode::from_str(raw).ok_or_else(|| ConfigError::UnknownEnumValue {
                field: FIELD_MODE,
                value: raw.to_string(),
            })?,
            None => Mode::default(),
        };

        let values = parse_numeric_list(require_field(record, FIELD_REFERENCE)?)?;

        Self::new(operation, mode, signed, Reference::Values(values))
    }

    /// Canonical constructor; every other form normalises to this one.
    pub fn new(
        operation: Operation,
        mode: Mode,
        signed: Option<bool>,
        reference: Reference,
    ) -> Result<Self, ConfigError> {
        if let Reference::Values(values) = &reference {
            if values.is_empty() {
                return Err(ConfigError::EmptyReferenceList);
            }
        } else if mode != Mode::Absolute {
            // Firmware behaviour for a token reference outside absolute mode
            // is undocumented; the combination is passed through unchanged.
            tracing::debug!("comparison uses a stream token reference with {:?} mode", mode);
        }

        Ok(Self {
            operation,
            mode,
            signed,
            reference,
        })
    }

    /// Compares against one or more literal values in absolute mode, with
    /// signedness inferred by the firmware.
    pub fn absolute(operation: Operation, values: Vec<Number>) -> Result<Self, ConfigError> {
        Self::new(operation, Mode::Absolute, None, Reference::Values(values))
    }

    /// Compares against literal values with an explicit signed or unsigned
    /// interpretation.
    pub fn absolute_signed(
        operation: Operation,
        values: Vec<Number>,
        signed: bool,
    ) -> Result<Self, ConfigError> {
        Self::new(
            operation,
            Mode::Absolute,
            Some(signed),
            Reference::Values(values),
        )
    }

    /// Compares against literal values under the given output mode.
    pub fn with_mode(
        operation: Operation,
        mode: Mode,
        values: Vec<Number>,
    ) -> Result<Self, ConfigError> {
        Self::new(operation, mode, None, Reference::Values(values))
    }

    /// Compares against literal values with mode and signedness spelled out.
    pub fn with_values(
        operation: Operation,
        mode: Mode,
        signed: Option<bool>,
        values: Vec<Number>,
    ) -> Result<Self, ConfigError> {
        Self::new(operation, mode, signed, Reference::Values(values))
    }

    /// Compares against the live value of another stream, for feedback and
    /// feedforward loops.
    pub fn from_token(operation: Operation, token: StreamToken) -> Self {
        Self {
            operation,
            mode: Mode::Absolute,
            signed: None,
            reference: Reference::Token(token),
        }
    }

    /// Compares against the live value of another stream with an explicit
    /// signed or unsigned interpretation.
    pub fn from_token_signed(operation: Operation, token: StreamToken, signed: bool) -> Self {
        Self {
            operation,
            mode: Mode::Absolute,
            signed: Some(signed),
            reference: Reference::Token(token),
        }
    }

    pub fn operation(&self) -> Operation {
        self.operation
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Signed or unsigned comparison; `None` lets the firmware infer
    /// signedness from context.
    pub fn signed(&self) -> Option<bool> {
        self.signed
    }

    pub fn reference(&self) -> &Reference {
        &self.reference
    }
}

impl ProcessorConfig for Comparison {
    fn scheme(&self) -> &'static str {
        Self::SCHEME
    }

    fn to_record(&self) -> Result<FieldRecord, ConfigError> {
        let values = match &self.reference {
            Reference::Values(values) => values,
            Reference::Token(_) => return Err(ConfigError::UnserializableReference),
        };

        let joined = values
            .iter()
            .map(|value| value.to_string())
            .collect::<Vec<_>>()
            .join(",");

        let mut record = FieldRecord::new();
        record.insert(FIELD_OPERATION.to_string(), self.operation.as_str().to_string());
        record.insert(FIELD_MODE.to_string(), self.mode.as_str().to_string());
        record.insert(FIELD_REFERENCE.to_string(), joined);

        if let Some(signed) = self.signed {
            record.insert(FIELD_SIGNED.to_string(), signed.to_string());
        }

        Ok(record)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if let Reference::Values(values) = &self.reference {
            if values.is_empty() {
                return Err(ConfigError::EmptyReferenceList);
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(fields: &[(&str, &str)]) -> FieldRecord {
        fields
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect()
    }

    #[test]
    fn test_decode_integer_reference_list() {
        let config =
            Comparison::from_record(&record(&[("operation", "eq"), ("reference", "3,7,12")]))
                .unwrap();

        assert_eq!(config.operation(), Operation::Eq);
        assert_eq!(config.mode(), Mode::Absolute);
        assert_eq!(config.signed(), None);
        assert_eq!(
            config.reference().values().unwrap(),
            vec![Number::from(3), Number::from(7), Number::from(12)]
        );
        assert!(config.reference().token().is_none());
    }

    #[test]
    fn test_decode_zone_mode_float_references() {
        let config = Comparison::from_record(&record(&[
            ("operation", "gt"),
            ("reference", "1.5,2.5"),
            ("mode", "zone"),
        ]))
        .unwrap();

        assert_eq!(config.operation(), Operation::Gt);
        assert_eq!(config.mode(), Mode::Zone);
        assert_eq!(
            config.reference().values().unwrap(),
            vec![
                Number::from_f64(1.5).unwrap(),
                Number::from_f64(2.5).unwrap()
            ]
        );
    }

    #[test]
    fn test_decode_signed_flag() {
        let config = Comparison::from_record(&record(&[
            ("operation", "lte"),
            ("reference", "4"),
            ("signed", "true"),
        ]))
        .unwrap();

        assert_eq!(config.signed(), Some(true));
    }

    #[test]
    fn test_decode_is_case_insensitive() {
        let config = Comparison::from_record(&record(&[
            ("operation", "Eq"),
            ("reference", "1"),
            ("signed", "TRUE"),
            ("mode", "Zone"),
        ]))
        .unwrap();

        assert_eq!(config.operation(), Operation::Eq);
        assert_eq!(config.mode(), Mode::Zone);
        assert_eq!(config.signed(), Some(true));
    }

    #[test]
    fn test_decode_ignores_unrecognised_fields() {
        let config = Comparison::from_record(&record(&[
            ("operation", "neq"),
            ("reference", "0"),
            ("comment", "not a field"),
        ]))
        .unwrap();

        assert_eq!(config.operation(), Operation::Neq);
    }

    #[test]
    fn test_missing_operation_field() {
        let result = Comparison::from_record(&record(&[("reference", "1,2")]));
        assert!(matches!(
            result,
            Err(ConfigError::MissingRequiredField("operation"))
        ));
    }

    #[test]
    fn test_missing_reference_field() {
        let result = Comparison::from_record(&record(&[("operation", "lt")]));
        assert!(matches!(
            result,
            Err(ConfigError::MissingRequiredField("reference"))
        ));
    }

    #[test]
    fn test_unknown_operation_rejected() {
        let result =
            Comparison::from_record(&record(&[("operation", "between"), ("reference", "1")]));
        assert!(matches!(
            result,
            Err(ConfigError::UnknownEnumValue {
                field: "operation",
                ..
            })
        ));
    }

    #[test]
    fn test_unknown_mode_rejected() {
        let result = Comparison::from_record(&record(&[
            ("operation", "eq"),
            ("reference", "1"),
            ("mode", "window"),
        ]));
        assert!(matches!(
            result,
            Err(ConfigError::UnknownEnumValue { field: "mode", .. })
        ));
    }

    #[test]
    fn test_junk_signed_value_rejected() {
        let result = Comparison::from_record(&record(&[
            ("operation", "eq"),
            ("reference", "1"),
            ("signed", "maybe"),
        ]));
        assert!(matches!(
            result,
            Err(ConfigError::UnknownEnumValue {
                field: "signed",
                ..
            })
        ));
    }

    #[test]
    fn test_malformed_reference_entry_rejected() {
        let result =
            Comparison::from_record(&record(&[("operation", "eq"), ("reference", "1,x,3")]));
        assert!(matches!(
            result,
            Err(ConfigError::MalformedNumericLiteral(literal)) if literal == "x"
        ));
    }

    #[test]
    fn test_decode_mixed_reference_list_keeps_element_values() {
        // A mixed list must decode element-wise: 1 as an integer, 2.5 as a
        // float, neither collapsing into the other.
        let config =
            Comparison::from_record(&record(&[("operation", "eq"), ("reference", "1,2.5")]))
                .unwrap();

        assert_eq!(
            config.reference().values().unwrap(),
            vec![Number::from(1), Number::from_f64(2.5).unwrap()]
        );
    }

    #[test]
    fn test_record_round_trip() {
        let original = Comparison::from_record(&record(&[
            ("operation", "gte"),
            ("reference", "4,5.5,-6"),
            ("signed", "false"),
            ("mode", "pass_fail"),
        ]))
        .unwrap();

        let encoded = original.to_record().unwrap();
        assert_eq!(encoded.get("operation").unwrap(), "gte");
        assert_eq!(encoded.get("mode").unwrap(), "pass_fail");
        assert_eq!(encoded.get("signed").unwrap(), "false");
        assert_eq!(encoded.get("reference").unwrap(), "4,5.5,-6");

        let decoded = Comparison::from_record(&encoded).unwrap();
        assert_eq!(decoded, original);
    }

    #[test]
    fn test_empty_reference_list_rejected() {
        assert!(matches!(
            Comparison::absolute(Operation::Eq, vec![]),
            Err(ConfigError::EmptyReferenceList)
        ));
        assert!(matches!(
            Comparison::with_values(Operation::Lt, Mode::Zone, Some(true), vec![]),
            Err(ConfigError::EmptyReferenceList)
        ));
    }

    #[test]
    fn test_value_constructors_normalise_defaults() {
        let config = Comparison::absolute(Operation::Lt, vec![Number::from(10)]).unwrap();
        assert_eq!(config.mode(), Mode::Absolute);
        assert_eq!(config.signed(), None);

        let config =
            Comparison::absolute_signed(Operation::Lt, vec![Number::from(10)], false).unwrap();
        assert_eq!(config.signed(), Some(false));

        let config =
            Comparison::with_mode(Operation::Gt, Mode::Reference, vec![Number::from(1)]).unwrap();
        assert_eq!(config.mode(), Mode::Reference);
        assert_eq!(config.signed(), None);
    }

    #[test]
    fn test_token_constructor_defaults() {
        let token = StreamToken::new("accelerometer.x");
        let config = Comparison::from_token(Operation::Gt, token.clone());

        assert_eq!(config.mode(), Mode::Absolute);
        assert_eq!(config.signed(), None);
        assert_eq!(config.reference().token(), Some(&token));
        assert!(config.reference().values().is_none());
    }

    #[test]
    fn test_token_signed_constructor() {
        let token = StreamToken::new("stage.threshold");
        let config = Comparison::from_token_signed(Operation::Neq, token, true);

        assert_eq!(config.signed(), Some(true));
        assert_eq!(config.mode(), Mode::Absolute);
    }

    #[test]
    fn test_canonical_constructor_permits_token_with_any_mode() {
        let token = StreamToken::new("upstream");
        let config = Comparison::new(
            Operation::Eq,
            Mode::Zone,
            None,
            Reference::Token(token),
        )
        .unwrap();

        assert_eq!(config.mode(), Mode::Zone);
    }

    #[test]
    fn test_token_config_has_no_record_form() {
        let config = Comparison::from_token(Operation::Eq, StreamToken::new("upstream"));
        assert!(matches!(
            config.to_record(),
            Err(ConfigError::UnserializableReference)
        ));
    }

    #[test]
    fn test_validate_accepts_built_configs() {
        let config = Comparison::absolute(Operation::Eq, vec![Number::from(1)]).unwrap();
        assert!(config.validate().is_ok());

        let config = Comparison::from_token(Operation::Eq, StreamToken::new("upstream"));
        assert!(config.validate().is_ok());
    }
}

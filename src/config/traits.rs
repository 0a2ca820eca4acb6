use super::error::ConfigError;
use super::record::FieldRecord;

/// Record-facing surface shared by the processor config family. Decoding is
/// an inherent constructor on each config type, so no invalid config can
/// exist to call these on.
pub trait ProcessorConfig {
    /// Scheme name identifying the processor type in a stage record.
    fn scheme(&self) -> &'static str;

    /// Writes the config back into its wire record form.
    fn to_record(&self) -> Result<FieldRecord, ConfigError>;

    fn validate(&self) -> Result<(), ConfigError> {
        Ok(())
    }
}

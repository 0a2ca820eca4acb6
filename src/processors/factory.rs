use super::comparison::Comparison;
use crate::config::{ConfigError, FieldRecord, ProcessorConfig};

use std::collections::HashMap;
use std::sync::Mutex;

/// A type alias for a function that decodes a processor config from a field record.
type ConfigDecoder = fn(&FieldRecord) -> Result<Box<dyn ProcessorConfig>, ConfigError>;

lazy_static::lazy_static! {
    static ref SCHEME_REGISTRY: Mutex<HashMap<String, ConfigDecoder>> = Mutex::new(HashMap::new());
}

/// Registers a config decoder under the given scheme name.
/// # Arguments
/// * `scheme` - The scheme name of the processor type.
/// * `decoder` - A function that decodes the config from a field record.
pub fn register_scheme(scheme: &str, decoder: ConfigDecoder) {
    let mut registry = SCHEME_REGISTRY.lock().unwrap();
    registry.insert(scheme.to_string(), decoder);
}

/// Decodes a field record using the decoder registered for the scheme.
/// # Arguments
/// * `scheme` - The scheme name of the processor type.
/// * `record` - The field record to decode.
/// # Returns
/// * An `Option` containing the decode result, or `None` if no decoder is
///   registered for the scheme.
pub fn decode_record(
    scheme: &str,
    record: &FieldRecord,
) -> Option<Result<Box<dyn ProcessorConfig>, ConfigError>> {
    tracing::debug!("Decoding config record for scheme '{}'", scheme);

    let registry = SCHEME_REGISTRY.lock().unwrap();
    registry.get(scheme).map(|decoder| decoder(record))
}

/// Registers the decoders for the built-in processor schemes.
pub fn register_default_schemes() {
    register_scheme(Comparison::SCHEME, |record| {
        Comparison::from_record(record).map(|config| Box::new(config) as Box<dyn ProcessorConfig>)
    });

    tracing::info!("Default processor schemes registered!");
}

/// Lists the scheme names with a registered decoder.
pub fn list_schemes() -> Vec<String> {
    let registry = SCHEME_REGISTRY.lock().unwrap();
    registry.keys().cloned().collect()
}

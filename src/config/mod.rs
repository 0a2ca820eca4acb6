//! Configuration Module

pub mod error;
pub mod record;
pub mod traits;

pub use error::ConfigError;
pub use traits::ProcessorConfig;

pub use record::{
    FieldRecord, optional_field, parse_bool_field, parse_numeric_list, parse_numeric_literal,
    require_field,
};

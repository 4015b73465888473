//! `string` type

use super::TypeCaster;
use crate::config::CastConfig;
use crate::errors::{CastError, CastResult};
use crate::formats;
use crate::types::Value;

/// `string`: text, optionally checked against a well-known format
///
/// Formats: `default`, `email`, `uri`, `uuid`, `binary` (base64).
#[derive(Debug, Clone, Copy, Default)]
pub struct StringType;

impl TypeCaster for StringType {
    fn type_name(&self) -> &'static str {
        "string"
    }

    fn cast(&self, format: &str, value: &Value, _config: &CastConfig) -> CastResult<Value> {
        let s = value
            .as_str()
            .ok_or_else(|| CastError::invalid("string", format, value))?;

        let valid = match format {
            "default" => true,
            "email" => formats::validate_email(s),
            "uri" => formats::validate_uri(s),
            "uuid" => formats::validate_uuid(s),
            "binary" => formats::validate_binary(s),
            other => return Err(CastError::unsupported_format("string", other)),
        };

        if valid {
            Ok(Value::String(s.to_string()))
        } else {
            Err(CastError::invalid("string", format, s))
        }
    }
}

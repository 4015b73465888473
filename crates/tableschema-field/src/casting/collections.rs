//! `array` and `object` types

use super::{require_default_format, TypeCaster};
use crate::config::CastConfig;
use crate::errors::{CastError, CastResult};
use crate::types::Value;

/// Decode a JSON document held in a string
fn parse_json(s: &str) -> Option<Value> {
    serde_json::from_str::<serde_json::Value>(s).ok().map(Value::from)
}

/// `array`: lists, or strings holding a JSON array
#[derive(Debug, Clone, Copy, Default)]
pub struct ArrayType;

impl TypeCaster for ArrayType {
    fn type_name(&self) -> &'static str {
        "array"
    }

    fn cast(&self, format: &str, value: &Value, _config: &CastConfig) -> CastResult<Value> {
        require_default_format("array", format)?;
        match value {
            Value::List(_) => Ok(value.clone()),
            Value::String(s) => match parse_json(s) {
                Some(list @ Value::List(_)) => Ok(list),
                _ => Err(CastError::invalid("array", format, s)),
            },
            other => Err(CastError::invalid("array", format, other)),
        }
    }
}

/// `object`: objects, or strings holding a JSON object
#[derive(Debug, Clone, Copy, Default)]
pub struct ObjectType;

impl TypeCaster for ObjectType {
    fn type_name(&self) -> &'static str {
        "object"
    }

    fn cast(&self, format: &str, value: &Value, _config: &CastConfig) -> CastResult<Value> {
        require_default_format("object", format)?;
        match value {
            Value::Object(_) => Ok(value.clone()),
            Value::String(s) => match parse_json(s) {
                Some(object @ Value::Object(_)) => Ok(object),
                _ => Err(CastError::invalid("object", format, s)),
            },
            other => Err(CastError::invalid("object", format, other)),
        }
    }
}

//! `boolean` type

use super::{require_default_format, TypeCaster};
use crate::config::CastConfig;
use crate::errors::{CastError, CastResult};
use crate::types::Value;

/// `boolean`: native booleans or the configured true/false literals
#[derive(Debug, Clone, Copy, Default)]
pub struct BooleanType;

impl TypeCaster for BooleanType {
    fn type_name(&self) -> &'static str {
        "boolean"
    }

    fn cast(&self, format: &str, value: &Value, config: &CastConfig) -> CastResult<Value> {
        require_default_format("boolean", format)?;
        match value {
            Value::Bool(b) => Ok(Value::Bool(*b)),
            Value::String(s) if config.true_values.iter().any(|t| t == s) => Ok(Value::Bool(true)),
            Value::String(s) if config.false_values.iter().any(|f| f == s) => Ok(Value::Bool(false)),
            other => Err(CastError::invalid("boolean", format, other)),
        }
    }
}

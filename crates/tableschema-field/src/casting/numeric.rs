//! `integer`, `number` and `year` types

use super::{require_default_format, TypeCaster};
use crate::config::CastConfig;
use crate::errors::{CastError, CastResult};
use crate::types::Value;

/// Normalize a numeric string according to the config
///
/// Removes the group separator, maps the decimal separator to `.` and,
/// when bare numbers are not required, strips surrounding text such as
/// currency symbols or a trailing `%`.
fn normalize_number(s: &str, config: &CastConfig) -> String {
    let mut text = s.trim();
    if !config.bare_number {
        let is_numeric_char =
            |c: char| c.is_ascii_digit() || c == config.decimal_char || Some(c) == config.group_char;
        let start = text
            .find(|c: char| is_numeric_char(c) || c == '-' || c == '+')
            .unwrap_or(text.len());
        let end = text
            .char_indices()
            .rev()
            .find(|&(_, c)| is_numeric_char(c))
            .map_or(start, |(i, c)| i + c.len_utf8());
        text = if start < end { &text[start..end] } else { "" };
    }

    text.chars()
        .filter(|c| Some(*c) != config.group_char)
        .map(|c| if c == config.decimal_char { '.' } else { c })
        .collect()
}

// ============================================================================
// Integer
// ============================================================================

/// `integer`: whole numbers as i64
#[derive(Debug, Clone, Copy, Default)]
pub struct IntegerType;

impl TypeCaster for IntegerType {
    fn type_name(&self) -> &'static str {
        "integer"
    }

    fn cast(&self, format: &str, value: &Value, config: &CastConfig) -> CastResult<Value> {
        require_default_format("integer", format)?;
        match value {
            Value::Int(i) => Ok(Value::Int(*i)),
            Value::Float(f) if f.fract() == 0.0 && (i64::MIN as f64..i64::MAX as f64).contains(f) => {
                Ok(Value::Int(*f as i64))
            }
            Value::String(s) => normalize_number(s, config)
                .parse::<i64>()
                .map(Value::Int)
                .map_err(|_| CastError::invalid("integer", format, s)),
            other => Err(CastError::invalid("integer", format, other)),
        }
    }
}

// ============================================================================
// Number
// ============================================================================

/// `number`: any real number as f64
///
/// Accepts `NaN`, `INF` and `-INF` literals.
#[derive(Debug, Clone, Copy, Default)]
pub struct NumberType;

impl TypeCaster for NumberType {
    fn type_name(&self) -> &'static str {
        "number"
    }

    fn cast(&self, format: &str, value: &Value, config: &CastConfig) -> CastResult<Value> {
        require_default_format("number", format)?;
        match value {
            Value::Int(i) => Ok(Value::Float(*i as f64)),
            Value::Float(f) => Ok(Value::Float(*f)),
            Value::String(s) => {
                let parsed = match s.trim() {
                    "NaN" => Some(f64::NAN),
                    "INF" => Some(f64::INFINITY),
                    "-INF" => Some(f64::NEG_INFINITY),
                    _ => {
                        let text = normalize_number(s, config);
                        // Rust also parses "inf"/"nan" spellings; only plain decimals are numbers here
                        if text.chars().any(|c| c.is_ascii_alphabetic() && c != 'e' && c != 'E') {
                            None
                        } else {
                            text.parse::<f64>().ok()
                        }
                    }
                };
                parsed
                    .map(Value::Float)
                    .ok_or_else(|| CastError::invalid("number", format, s))
            }
            other => Err(CastError::invalid("number", format, other)),
        }
    }
}

// ============================================================================
// Year
// ============================================================================

/// `year`: a calendar year as an integer
#[derive(Debug, Clone, Copy, Default)]
pub struct YearType;

impl TypeCaster for YearType {
    fn type_name(&self) -> &'static str {
        "year"
    }

    fn cast(&self, format: &str, value: &Value, _config: &CastConfig) -> CastResult<Value> {
        require_default_format("year", format)?;
        match value {
            Value::Int(i) if (0..=9999).contains(i) => Ok(Value::Int(*i)),
            Value::String(s) if s.len() == 4 && s.chars().all(|c| c.is_ascii_digit()) => s
                .parse::<i64>()
                .map(Value::Int)
                .map_err(|_| CastError::invalid("year", format, s)),
            other => Err(CastError::invalid("year", format, other)),
        }
    }
}

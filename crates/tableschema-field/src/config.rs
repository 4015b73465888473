//! Configuration options for casting behavior
//!
//! Controls which literals count as missing, true or false, and how
//! numbers written with separators are read.

use crate::types::Value;

/// Literals treated as "no value" by the `required` constraint and by casting
pub const NULL_VALUES: &[&str] = &["", "null", "none", "nil", "nan", "-"];

/// Literals cast to `true` by the boolean type
pub const TRUE_VALUES: &[&str] = &["true", "True", "TRUE", "1"];

/// Literals cast to `false` by the boolean type
pub const FALSE_VALUES: &[&str] = &["false", "False", "FALSE", "0"];

/// Returns true if the value is null or one of the default null literals
pub fn is_null_equivalent(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => NULL_VALUES.contains(&s.as_str()),
        _ => false,
    }
}

// ============================================================================
// Cast Config
// ============================================================================

/// Configuration options for the type dispatcher
#[derive(Debug, Clone)]
pub struct CastConfig {
    /// String literals cast to null before any type caster runs
    pub null_values: Vec<String>,

    /// String literals accepted as `true`
    pub true_values: Vec<String>,

    /// String literals accepted as `false`
    pub false_values: Vec<String>,

    /// Thousands separator stripped from numbers (e.g. `,` in `1,000`)
    pub group_char: Option<char>,

    /// Decimal separator for numbers
    pub decimal_char: char,

    /// When false, numbers may carry leading/trailing non-numeric text
    /// such as currency symbols or percent signs
    pub bare_number: bool,
}

impl Default for CastConfig {
    fn default() -> Self {
        Self {
            null_values: NULL_VALUES.iter().map(|s| s.to_string()).collect(),
            true_values: TRUE_VALUES.iter().map(|s| s.to_string()).collect(),
            false_values: FALSE_VALUES.iter().map(|s| s.to_string()).collect(),
            group_char: None,
            decimal_char: '.',
            bare_number: true,
        }
    }
}

impl CastConfig {
    /// Create a new cast config with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the null literals
    ///
    /// Only casting reads these. The `required` constraint always treats
    /// the fixed [`NULL_VALUES`] as absent, so with `null_values(["NA"])`
    /// a `string` field still fails `required` on `"none"`.
    pub fn null_values<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.null_values = values.into_iter().map(Into::into).collect();
        self
    }

    /// Replace the true literals
    pub fn true_values<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.true_values = values.into_iter().map(Into::into).collect();
        self
    }

    /// Replace the false literals
    pub fn false_values<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.false_values = values.into_iter().map(Into::into).collect();
        self
    }

    /// Set the thousands separator
    pub fn group_char(mut self, group_char: char) -> Self {
        self.group_char = Some(group_char);
        self
    }

    /// Set the decimal separator
    pub fn decimal_char(mut self, decimal_char: char) -> Self {
        self.decimal_char = decimal_char;
        self
    }

    /// Allow or forbid text around numbers
    pub fn bare_number(mut self, bare: bool) -> Self {
        self.bare_number = bare;
        self
    }

    /// Check whether a raw value is missing under this config
    pub fn is_null(&self, value: &Value) -> bool {
        match value {
            Value::Null => true,
            Value::String(s) => self.null_values.iter().any(|n| n == s),
            _ => false,
        }
    }
}

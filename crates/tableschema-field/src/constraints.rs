//! Constraint evaluators
//!
//! Every evaluator has the shape `(field_name, value, arg) -> Ok(true)` and
//! reports failure as an error, never as `Ok(false)`. Evaluators are pure
//! functions; the dispatcher decides which value each one receives (the raw
//! value for `pattern`, the cast value for everything else).

use crate::config::is_null_equivalent;
use crate::errors::{FieldError, FieldResult};
use crate::formats;
use crate::types::Value;
use crate::casting::temporal;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// Signature shared by all constraint evaluators
pub type Evaluator = fn(&str, &Value, &Value) -> FieldResult<bool>;

// ============================================================================
// Constraint Registry
// ============================================================================

/// Constraint names understood by the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Constraint {
    Required,
    MinLength,
    MaxLength,
    Minimum,
    Maximum,
    Pattern,
    Unique,
}

impl Constraint {
    /// All constraints, in documentation order
    pub const ALL: [Constraint; 7] = [
        Constraint::Required,
        Constraint::MinLength,
        Constraint::MaxLength,
        Constraint::Minimum,
        Constraint::Maximum,
        Constraint::Pattern,
        Constraint::Unique,
    ];

    /// Look up a constraint by its descriptor key
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.name() == name)
    }

    /// Descriptor key of the constraint
    pub fn name(&self) -> &'static str {
        match self {
            Self::Required => "required",
            Self::MinLength => "minLength",
            Self::MaxLength => "maxLength",
            Self::Minimum => "minimum",
            Self::Maximum => "maximum",
            Self::Pattern => "pattern",
            Self::Unique => "unique",
        }
    }

    /// Evaluator function for this constraint
    pub fn evaluator(&self) -> Evaluator {
        match self {
            Self::Required => required,
            Self::MinLength => min_length,
            Self::MaxLength => max_length,
            Self::Minimum => minimum,
            Self::Maximum => maximum,
            Self::Pattern => pattern,
            Self::Unique => unique,
        }
    }

    /// Run the evaluator
    pub fn evaluate(&self, name: &str, value: &Value, arg: &Value) -> FieldResult<bool> {
        (self.evaluator())(name, value, arg)
    }

    /// Whether the evaluator receives the raw value instead of the cast one
    pub fn checks_raw_value(&self) -> bool {
        matches!(self, Self::Pattern)
    }

    /// Whether the evaluator runs when the cast value is null
    pub fn applies_to_null(&self) -> bool {
        matches!(self, Self::Required | Self::Unique)
    }
}

impl fmt::Display for Constraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Evaluator registered under a descriptor key
pub fn evaluator(name: &str) -> Option<Evaluator> {
    Constraint::from_name(name).map(|c| c.evaluator())
}

// ============================================================================
// Constraint Set
// ============================================================================

/// Constraint arguments of a descriptor, in declaration order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(
    from = "serde_json::Map<String, serde_json::Value>",
    into = "serde_json::Map<String, serde_json::Value>"
)]
pub struct Constraints {
    entries: Vec<(String, Value)>,
}

impl Constraints {
    /// Create an empty constraint set
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a constraint argument, keeping its original position
    pub fn insert(&mut self, name: impl Into<String>, arg: impl Into<Value>) {
        let name = name.into();
        let arg = arg.into();
        match self.entries.iter_mut().find(|(k, _)| *k == name) {
            Some(entry) => entry.1 = arg,
            None => self.entries.push((name, arg)),
        }
    }

    /// Argument of a constraint
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.entries
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v)
    }

    /// Check whether a constraint is declared
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Iterate over `(name, arg)` pairs in declaration order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Number of declared constraints
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if no constraint is declared
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Whether `required: true` is declared
    pub fn is_required(&self) -> bool {
        matches!(self.get(Constraint::Required.name()), Some(Value::Bool(true)))
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Constraints {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut constraints = Constraints::new();
        for (name, arg) in iter {
            constraints.insert(name, arg);
        }
        constraints
    }
}

impl From<serde_json::Map<String, serde_json::Value>> for Constraints {
    fn from(map: serde_json::Map<String, serde_json::Value>) -> Self {
        map.into_iter().collect()
    }
}

impl From<Constraints> for serde_json::Map<String, serde_json::Value> {
    fn from(constraints: Constraints) -> Self {
        constraints
            .entries
            .into_iter()
            .map(|(k, v)| (k, v.into()))
            .collect()
    }
}

// ============================================================================
// Evaluators
// ============================================================================

/// Required value constraint. Supported types: all.
///
/// Only acts when `arg` is `true`; null and the null-equivalent literals
/// count as absent.
pub fn required(name: &str, value: &Value, arg: &Value) -> FieldResult<bool> {
    if matches!(arg, Value::Bool(true)) && is_null_equivalent(value) {
        return Err(FieldError::FieldRequired {
            name: name.to_string(),
        });
    }
    Ok(true)
}

/// Min length constraint. Supported types: string, array, object.
pub fn min_length(name: &str, value: &Value, arg: &Value) -> FieldResult<bool> {
    let (length, bound) = length_operands(Constraint::MinLength, value, arg)?;
    if length < bound {
        return Err(FieldError::violation(
            Constraint::MinLength,
            format!("The field '{}' must have a minimum length of {}", name, arg),
        ));
    }
    Ok(true)
}

/// Max length constraint. Supported types: string, array, object.
pub fn max_length(name: &str, value: &Value, arg: &Value) -> FieldResult<bool> {
    let (length, bound) = length_operands(Constraint::MaxLength, value, arg)?;
    if length > bound {
        return Err(FieldError::violation(
            Constraint::MaxLength,
            format!("The field '{}' must have a maximum length of {}", name, arg),
        ));
    }
    Ok(true)
}

/// Minimum constraint (inclusive). Supported types: integer, number, date,
/// time, datetime.
pub fn minimum(name: &str, value: &Value, arg: &Value) -> FieldResult<bool> {
    if compare_to_bound(Constraint::Minimum, value, arg)? == Ordering::Less {
        return Err(FieldError::violation(
            Constraint::Minimum,
            format!("The field '{}' must not be less than {}", name, arg),
        ));
    }
    Ok(true)
}

/// Maximum constraint (inclusive). Supported types: integer, number, date,
/// time, datetime.
pub fn maximum(name: &str, value: &Value, arg: &Value) -> FieldResult<bool> {
    if compare_to_bound(Constraint::Maximum, value, arg)? == Ordering::Greater {
        return Err(FieldError::violation(
            Constraint::Maximum,
            format!("The field '{}' must not be more than {}", name, arg),
        ));
    }
    Ok(true)
}

/// Pattern constraint. Supported types: all.
///
/// The value is checked in its default string form, before casting.
pub fn pattern(_name: &str, value: &Value, arg: &Value) -> FieldResult<bool> {
    let pattern = arg.as_str().ok_or_else(|| FieldError::InvalidPattern {
        pattern: arg.to_string(),
        reason: format!("expected a string, got {}", arg.type_name()),
    })?;
    let regex = formats::compile_pattern(pattern).map_err(|reason| FieldError::InvalidPattern {
        pattern: pattern.to_string(),
        reason,
    })?;

    if !regex.is_match(&value.to_string()) {
        return Err(FieldError::violation(
            Constraint::Pattern,
            format!("The value '{}' must match the pattern", pattern),
        ));
    }
    Ok(true)
}

/// Uniqueness needs cross-row state and is never supported at field level.
pub fn unique(_name: &str, _value: &Value, _arg: &Value) -> FieldResult<bool> {
    Err(FieldError::UnsupportedConstraint {
        constraint: Constraint::Unique,
    })
}

// ============================================================================
// Operands
// ============================================================================

fn length_operands(constraint: Constraint, value: &Value, arg: &Value) -> FieldResult<(usize, usize)> {
    let length = value.length().ok_or(FieldError::UnsupportedType {
        constraint,
        value_type: value.type_name(),
    })?;
    let bound = match arg {
        Value::Int(n) if *n >= 0 => *n as usize,
        Value::Float(f) if *f >= 0.0 && f.fract() == 0.0 => *f as usize,
        other => {
            return Err(FieldError::InvalidArgument {
                constraint,
                reason: format!("expected a non-negative integer, got '{}'", other),
            })
        }
    };
    Ok((length, bound))
}

/// Order `value` relative to the bound `arg`
///
/// Numeric values accept numeric bounds (or numeric strings); temporal
/// values accept a bound of the same kind or its ISO string form.
fn compare_to_bound(constraint: Constraint, value: &Value, arg: &Value) -> FieldResult<Ordering> {
    let invalid_bound = || FieldError::InvalidArgument {
        constraint,
        reason: format!("'{}' cannot be compared with a {} value", arg, value.type_name()),
    };

    let bound = if value.is_numeric() {
        match arg {
            Value::String(s) => s.trim().parse::<f64>().map(Value::Float).map_err(|_| invalid_bound())?,
            other => other.clone(),
        }
    } else if value.is_temporal() {
        match arg {
            Value::String(s) => temporal::parse_like(value, s).ok_or_else(invalid_bound)?,
            other => other.clone(),
        }
    } else {
        return Err(FieldError::UnsupportedType {
            constraint,
            value_type: value.type_name(),
        });
    };

    match value.compare(&bound) {
        Some(ordering) => Ok(ordering),
        // NaN is unordered and never falls outside a numeric bound
        None if bound.is_numeric() && value.as_f64().is_some_and(f64::is_nan) => Ok(Ordering::Equal),
        None => Err(invalid_bound()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use serde_json::json;

    fn date(y: i32, m: u32, d: u32) -> Value {
        Value::Date(NaiveDate::from_ymd_opt(y, m, d).unwrap())
    }

    #[test]
    fn test_registry_lookup() {
        for constraint in Constraint::ALL {
            assert_eq!(Constraint::from_name(constraint.name()), Some(constraint));
        }
        assert_eq!(Constraint::from_name("minLength"), Some(Constraint::MinLength));
        assert_eq!(Constraint::from_name("min_length"), None);
        assert!(evaluator("enum").is_none());
        assert!(evaluator("maximum").is_some());
    }

    #[test]
    fn test_required() {
        let err = required("x", &Value::Null, &Value::Bool(true)).unwrap_err();
        assert!(matches!(err, FieldError::FieldRequired { .. }));
        assert!(required("x", &Value::from(""), &Value::Bool(true)).is_err());
        assert!(required("x", &Value::from("null"), &Value::Bool(true)).is_err());
        assert_eq!(required("x", &Value::from("a"), &Value::Bool(true)), Ok(true));
        assert_eq!(required("x", &Value::Null, &Value::Bool(false)), Ok(true));
        assert_eq!(required("x", &Value::Int(0), &Value::Bool(true)), Ok(true));
    }

    #[test]
    fn test_required_only_acts_on_boolean_true() {
        assert_eq!(required("x", &Value::Null, &Value::from("true")), Ok(true));
        assert_eq!(required("x", &Value::Null, &Value::Int(1)), Ok(true));
    }

    #[test]
    fn test_min_length() {
        let list = Value::from(vec![1, 2, 3]);
        assert_eq!(min_length("x", &list, &Value::Int(3)), Ok(true));

        let err = min_length("x", &list, &Value::Int(4)).unwrap_err();
        assert_eq!(err.to_string(), "The field 'x' must have a minimum length of 4");
        assert_eq!(err.constraint(), Some(Constraint::MinLength));
    }

    #[test]
    fn test_max_length() {
        let list = Value::from(vec![1, 2, 3]);
        assert_eq!(max_length("x", &list, &Value::Int(3)), Ok(true));

        let err = max_length("x", &list, &Value::Int(2)).unwrap_err();
        assert_eq!(err.to_string(), "The field 'x' must have a maximum length of 2");
    }

    #[test]
    fn test_length_counts_characters_and_entries() {
        assert_eq!(max_length("x", &Value::from("héllo"), &Value::Int(5)), Ok(true));
        let object = Value::from(json!({"a": 1, "b": 2}));
        assert!(min_length("x", &object, &Value::Int(3)).is_err());
    }

    #[test]
    fn test_length_on_scalar_is_unsupported() {
        let err = min_length("x", &Value::Int(10), &Value::Int(1)).unwrap_err();
        assert!(matches!(
            err,
            FieldError::UnsupportedType { constraint: Constraint::MinLength, value_type: "integer" }
        ));
        assert!(max_length("x", &Value::Bool(true), &Value::Int(1)).is_err());
    }

    #[test]
    fn test_length_rejects_bad_argument() {
        let err = min_length("x", &Value::from("abc"), &Value::Int(-1)).unwrap_err();
        assert!(matches!(err, FieldError::InvalidArgument { .. }));
        assert!(max_length("x", &Value::from("abc"), &Value::from("3")).is_err());
    }

    #[test]
    fn test_minimum_and_maximum_are_inclusive() {
        assert_eq!(minimum("x", &Value::Int(5), &Value::Int(5)), Ok(true));
        assert_eq!(maximum("x", &Value::Int(5), &Value::Int(5)), Ok(true));

        let err = minimum("x", &Value::Int(4), &Value::Int(5)).unwrap_err();
        assert_eq!(err.to_string(), "The field 'x' must not be less than 5");

        let err = maximum("x", &Value::Int(6), &Value::Int(5)).unwrap_err();
        assert_eq!(err.to_string(), "The field 'x' must not be more than 5");
    }

    #[test]
    fn test_minimum_mixed_numeric_kinds() {
        assert_eq!(minimum("x", &Value::Float(5.5), &Value::Int(5)), Ok(true));
        assert!(maximum("x", &Value::Float(5.5), &Value::Int(5)).is_err());
        assert_eq!(minimum("x", &Value::Int(10), &Value::from("9.5")), Ok(true));
        assert!(minimum("x", &Value::Int(10), &Value::from("ten")).is_err());
    }

    #[test]
    fn test_bounds_on_nan_pass() {
        let nan = Value::Float(f64::NAN);
        assert_eq!(minimum("x", &nan, &Value::Int(0)), Ok(true));
        assert_eq!(maximum("x", &nan, &Value::Float(1.5)), Ok(true));
        assert_eq!(minimum("x", &nan, &Value::from("3")), Ok(true));
        assert!(matches!(
            minimum("x", &nan, &Value::from("zero")),
            Err(FieldError::InvalidArgument { .. })
        ));
    }

    #[test]
    fn test_minimum_on_dates_is_chronological() {
        // Lexically "2020-10-01" < "2020-9-30", chronologically it is later
        let value = date(2020, 10, 1);
        assert_eq!(minimum("x", &value, &date(2020, 9, 30)), Ok(true));
        assert_eq!(minimum("x", &value, &Value::from("2020-09-30")), Ok(true));
        assert!(maximum("x", &value, &Value::from("2020-09-30")).is_err());
        assert_eq!(maximum("x", &value, &value), Ok(true));
    }

    #[test]
    fn test_minimum_on_unsupported_value() {
        let err = minimum("x", &Value::Object(vec![]), &Value::Int(5)).unwrap_err();
        assert!(matches!(err, FieldError::UnsupportedType { .. }));
        assert_eq!(err.to_string(), "Unsupported type of value");
        assert!(maximum("x", &Value::from("7"), &Value::Int(5)).is_err());
    }

    #[test]
    fn test_pattern() {
        let arg = Value::from("/^[a-z]+[0-9]+$/");
        assert_eq!(pattern("x", &Value::from("hello123"), &arg), Ok(true));

        let err = pattern("x", &Value::from("???"), &Value::from("/^[a-z]+$/")).unwrap_err();
        assert!(matches!(err, FieldError::ConstraintViolation { .. }));
        assert_eq!(err.to_string(), "The value '/^[a-z]+$/' must match the pattern");
    }

    #[test]
    fn test_pattern_stringifies_value() {
        let arg = Value::from("/^[0-9]{3}$/");
        assert_eq!(pattern("x", &Value::Int(123), &arg), Ok(true));
        assert!(pattern("x", &Value::Int(1234), &arg).is_err());
        assert_eq!(pattern("x", &Value::from("ABC"), &Value::from("/abc/i")), Ok(true));
    }

    #[test]
    fn test_pattern_malformed() {
        let err = pattern("x", &Value::from("abc"), &Value::from("^abc$")).unwrap_err();
        assert!(matches!(err, FieldError::InvalidPattern { .. }));
        let err = pattern("x", &Value::from("abc"), &Value::Int(1)).unwrap_err();
        assert!(matches!(err, FieldError::InvalidPattern { .. }));
    }

    #[test]
    fn test_unique_always_fails() {
        for value in [Value::Null, Value::from("a"), Value::Int(1)] {
            let err = unique("x", &value, &Value::Bool(true)).unwrap_err();
            assert_eq!(err.to_string(), "Unique constraint is not supported");
        }
        assert!(unique("x", &Value::Null, &Value::Bool(false)).is_err());
    }

    #[test]
    fn test_constraints_keep_declaration_order() {
        let constraints: Constraints = serde_json::from_value(json!({
            "pattern": "/^a/",
            "required": true,
            "minLength": 2,
        }))
        .unwrap();
        let names: Vec<_> = constraints.iter().map(|(k, _)| k).collect();
        assert_eq!(names, vec!["pattern", "required", "minLength"]);
        assert!(constraints.is_required());
    }

    #[test]
    fn test_constraints_insert_replaces_in_place() {
        let mut constraints = Constraints::new();
        constraints.insert("minimum", 1);
        constraints.insert("maximum", 9);
        constraints.insert("minimum", 2);
        assert_eq!(constraints.len(), 2);
        assert_eq!(constraints.get("minimum"), Some(&Value::Int(2)));
        assert_eq!(constraints.iter().next().map(|(k, _)| k), Some("minimum"));
    }
}

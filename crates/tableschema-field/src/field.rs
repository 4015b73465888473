//! Field
//!
//! A [`Field`] owns one descriptor and one type dispatcher. It never hands
//! out mutable access to either, so a field built once can validate a whole
//! dataset, from several threads if needed.

use crate::casting::{TypeDispatcher, Types};
use crate::constraints::Constraints;
use crate::descriptor::Descriptor;
use crate::errors::{FieldError, FieldResult};
use crate::types::Value;
use std::str::FromStr;

/// A schema field: descriptor accessors plus cast/test delegation
///
/// # Example
///
/// ```
/// use serde_json::json;
/// use tableschema_field::{Field, Value};
///
/// let field = Field::from_json(&json!({
///     "name": "age",
///     "type": "integer",
///     "constraints": {"minimum": 0}
/// }))
/// .unwrap();
///
/// assert_eq!(field.cast_value("42", false).unwrap(), Value::Int(42));
/// assert!(!field.test_value("-1", false));
/// assert!(field.test_value("-1", true));
/// ```
#[derive(Debug)]
pub struct Field<D: TypeDispatcher = Types> {
    descriptor: Descriptor,
    dispatcher: D,
}

impl Field<Types> {
    /// Create a field with its own default dispatcher
    pub fn new(descriptor: Descriptor) -> Self {
        Self::with_dispatcher(descriptor, Types::new())
    }

    /// Create a field from a JSON descriptor
    pub fn from_json(json: &serde_json::Value) -> FieldResult<Self> {
        Ok(Self::new(Descriptor::from_json(json)?))
    }
}

impl<D: TypeDispatcher> Field<D> {
    /// Create a field that delegates to a custom dispatcher
    pub fn with_dispatcher(descriptor: Descriptor, dispatcher: D) -> Self {
        Self {
            descriptor,
            dispatcher,
        }
    }

    pub fn name(&self) -> Option<&str> {
        self.descriptor.name()
    }

    /// Declared format, `"default"` when absent
    pub fn format(&self) -> &str {
        self.descriptor.format()
    }

    /// Declared constraints, empty when absent
    pub fn constraints(&self) -> &Constraints {
        self.descriptor.constraints()
    }

    /// Declared type, `"string"` when absent
    pub fn type_name(&self) -> &str {
        self.descriptor.type_name()
    }

    pub fn descriptor(&self) -> &Descriptor {
        &self.descriptor
    }

    pub fn dispatcher(&self) -> &D {
        &self.dispatcher
    }

    /// Cast a raw value to the field's type
    ///
    /// With `skip_constraints == false` the cast value is also checked
    /// against every declared constraint. The first failure is returned
    /// unchanged.
    pub fn cast_value(&self, value: impl Into<Value>, skip_constraints: bool) -> FieldResult<Value> {
        self.dispatcher
            .cast(&self.descriptor, &value.into(), skip_constraints)
    }

    /// Cast without checking constraints
    pub fn cast(&self, value: impl Into<Value>) -> FieldResult<Value> {
        self.cast_value(value, true)
    }

    /// Check whether a raw value would cast (and satisfy the constraints
    /// unless skipped); never fails
    pub fn test_value(&self, value: impl Into<Value>, skip_constraints: bool) -> bool {
        self.dispatcher
            .test(&self.descriptor, &value.into(), skip_constraints)
    }
}

impl From<Descriptor> for Field<Types> {
    fn from(descriptor: Descriptor) -> Self {
        Self::new(descriptor)
    }
}

impl FromStr for Field<Types> {
    type Err = FieldError;

    /// Parse a field from a JSON descriptor string
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let json: serde_json::Value = serde_json::from_str(s)?;
        Self::from_json(&json)
    }
}

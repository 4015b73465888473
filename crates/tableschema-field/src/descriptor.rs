//! Field descriptor
//!
//! The declarative description of one field: name, type, format and
//! constraints. Fields are private; a descriptor is built once (from JSON
//! or the builder methods) and only read afterwards.

use crate::constraints::Constraints;
use crate::errors::FieldResult;
use crate::types::Value;
use serde::{Deserialize, Serialize};

pub const DEFAULT_TYPE: &str = "string";
pub const DEFAULT_FORMAT: &str = "default";

fn default_type() -> String {
    DEFAULT_TYPE.to_string()
}

fn default_format() -> String {
    DEFAULT_FORMAT.to_string()
}

/// Descriptor for a single schema field
///
/// # Example
///
/// ```
/// use tableschema_field::Descriptor;
///
/// let descriptor = Descriptor::new("age")
///     .with_type("integer")
///     .with_constraint("minimum", 0);
///
/// assert_eq!(descriptor.name(), Some("age"));
/// assert_eq!(descriptor.format(), "default");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Descriptor {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    name: Option<String>,

    #[serde(rename = "type", default = "default_type")]
    type_name: String,

    #[serde(default = "default_format")]
    format: String,

    #[serde(default, skip_serializing_if = "Constraints::is_empty")]
    constraints: Constraints,
}

impl Descriptor {
    /// Create a `string` descriptor with the given name
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    /// Parse a descriptor from a JSON value
    pub fn from_json(json: &serde_json::Value) -> FieldResult<Self> {
        Ok(Self::deserialize(json)?)
    }

    /// Set the declared type
    pub fn with_type(mut self, type_name: impl Into<String>) -> Self {
        self.type_name = type_name.into();
        self
    }

    /// Set the format
    pub fn with_format(mut self, format: impl Into<String>) -> Self {
        self.format = format.into();
        self
    }

    /// Declare a constraint
    pub fn with_constraint(mut self, name: impl Into<String>, arg: impl Into<Value>) -> Self {
        self.constraints.insert(name, arg);
        self
    }

    /// Replace all constraints
    pub fn with_constraints(mut self, constraints: Constraints) -> Self {
        self.constraints = constraints;
        self
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    pub fn format(&self) -> &str {
        &self.format
    }

    pub fn constraints(&self) -> &Constraints {
        &self.constraints
    }

    /// Serialize back to JSON
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "name": self.name,
            "type": self.type_name,
            "format": self.format,
            "constraints": serde_json::Map::from(self.constraints.clone()),
        })
    }
}

impl Default for Descriptor {
    /// An unnamed `string` field with no constraints
    fn default() -> Self {
        Self {
            name: None,
            type_name: default_type(),
            format: default_format(),
            constraints: Constraints::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_defaults_from_empty_json() {
        let descriptor = Descriptor::from_json(&json!({})).unwrap();
        assert_eq!(descriptor.name(), None);
        assert_eq!(descriptor.type_name(), "string");
        assert_eq!(descriptor.format(), "default");
        assert!(descriptor.constraints().is_empty());
        assert_eq!(descriptor, Descriptor::default());
    }

    #[test]
    fn test_from_json() {
        let descriptor = Descriptor::from_json(&json!({
            "name": "born",
            "type": "date",
            "format": "%d/%m/%Y",
            "constraints": {"required": true, "minimum": "1900-01-01"},
            "title": "Date of birth"
        }))
        .unwrap();
        assert_eq!(descriptor.name(), Some("born"));
        assert_eq!(descriptor.type_name(), "date");
        assert_eq!(descriptor.format(), "%d/%m/%Y");
        assert!(descriptor.constraints().is_required());
        assert_eq!(
            descriptor.constraints().get("minimum"),
            Some(&Value::from("1900-01-01"))
        );
    }

    #[test]
    fn test_from_json_rejects_bad_shapes() {
        assert!(Descriptor::from_json(&json!({"name": 5})).is_err());
        assert!(Descriptor::from_json(&json!({"constraints": []})).is_err());
        assert!(Descriptor::from_json(&json!("name")).is_err());
    }

    #[test]
    fn test_builder_matches_json() {
        let built = Descriptor::new("age")
            .with_type("integer")
            .with_constraint("required", true)
            .with_constraint("maximum", 120);
        let parsed = Descriptor::from_json(&json!({
            "name": "age",
            "type": "integer",
            "constraints": {"required": true, "maximum": 120}
        }))
        .unwrap();
        assert_eq!(built, parsed);
        assert_eq!(Descriptor::from_json(&built.to_json()).unwrap(), built);
    }
}

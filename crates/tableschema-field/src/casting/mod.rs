//! Type dispatcher
//!
//! Casting is a strategy registry: one [`TypeCaster`] per declared type
//! name. The [`Types`] dispatcher looks up the caster for a descriptor,
//! casts the raw value and, unless told to skip them, runs the constraint
//! evaluators against the result.

use crate::config::CastConfig;
use crate::constraints::Constraint;
use crate::descriptor::Descriptor;
use crate::errors::{CastError, CastResult, FieldResult};
use crate::types::Value;
use std::collections::HashMap;
use std::fmt;
use tracing::{debug, trace};

pub mod boolean;
pub mod collections;
pub mod numeric;
pub mod string;
pub mod temporal;

pub use boolean::BooleanType;
pub use collections::{ArrayType, ObjectType};
pub use numeric::{IntegerType, NumberType, YearType};
pub use string::StringType;
pub use temporal::{DateTimeType, DateType, TimeType};

// ============================================================================
// Traits
// ============================================================================

/// Casting strategy for one declared type
///
/// Casters never see null-equivalent input; the dispatcher maps those to
/// [`Value::Null`] first.
pub trait TypeCaster: Send + Sync {
    /// Declared type name handled by this caster (e.g. `"integer"`)
    fn type_name(&self) -> &'static str;

    /// Cast a raw value using the given format
    fn cast(&self, format: &str, value: &Value, config: &CastConfig) -> CastResult<Value>;
}

/// Capability a [`Field`](crate::Field) delegates to
///
/// Implementations must not keep per-call mutable state: a field may be
/// shared between threads and tested concurrently.
pub trait TypeDispatcher: Send + Sync {
    /// Cast `value` to the descriptor's type, then check its constraints
    /// in declaration order unless `skip_constraints` is set
    fn cast(&self, descriptor: &Descriptor, value: &Value, skip_constraints: bool) -> FieldResult<Value>;

    /// Same pipeline as [`cast`](Self::cast), reduced to pass/fail
    fn test(&self, descriptor: &Descriptor, value: &Value, skip_constraints: bool) -> bool {
        match self.cast(descriptor, value, skip_constraints) {
            Ok(_) => true,
            Err(err) => {
                trace!(field = descriptor.name().unwrap_or_default(), error = %err, "value rejected");
                false
            }
        }
    }
}

// ============================================================================
// Default Dispatcher
// ============================================================================

/// Default type dispatcher with the built-in Table Schema types
pub struct Types {
    config: CastConfig,
    casters: HashMap<&'static str, Box<dyn TypeCaster>>,
}

impl Types {
    /// Create a dispatcher with the default config
    pub fn new() -> Self {
        Self::with_config(CastConfig::default())
    }

    /// Create a dispatcher with a custom config
    pub fn with_config(config: CastConfig) -> Self {
        let mut types = Self {
            config,
            casters: HashMap::new(),
        };
        types.register(AnyType);
        types.register(StringType);
        types.register(IntegerType);
        types.register(NumberType);
        types.register(YearType);
        types.register(BooleanType);
        types.register(DateType);
        types.register(TimeType);
        types.register(DateTimeType);
        types.register(ArrayType);
        types.register(ObjectType);
        types
    }

    /// Register a caster, replacing any caster for the same type name
    pub fn register(&mut self, caster: impl TypeCaster + 'static) {
        self.casters.insert(caster.type_name(), Box::new(caster));
    }

    /// Builder form of [`register`](Self::register)
    pub fn with_caster(mut self, caster: impl TypeCaster + 'static) -> Self {
        self.register(caster);
        self
    }

    /// Config used by the casters
    pub fn config(&self) -> &CastConfig {
        &self.config
    }

    /// Check whether a type name has a caster
    pub fn supports(&self, type_name: &str) -> bool {
        self.casters.contains_key(type_name)
    }

    /// Cast without constraint checks
    ///
    /// Null-equivalent input yields [`Value::Null`] for every known type.
    pub fn cast_type(&self, type_name: &str, format: &str, value: &Value) -> CastResult<Value> {
        let caster = self
            .casters
            .get(type_name)
            .ok_or_else(|| CastError::UnknownType(type_name.to_string()))?;

        if self.config.is_null(value) {
            return Ok(Value::Null);
        }
        caster.cast(format, value, &self.config)
    }

    /// Run the descriptor's constraints, stopping at the first failure
    ///
    /// `raw` feeds the `pattern` constraint, `cast` every other one. Only
    /// `required` and `unique` are evaluated against a null value.
    pub fn check_constraints(&self, descriptor: &Descriptor, raw: &Value, cast: &Value) -> FieldResult<()> {
        let name = descriptor.name().unwrap_or_default();

        for (key, arg) in descriptor.constraints().iter() {
            let Some(constraint) = Constraint::from_name(key) else {
                debug!(field = name, constraint = key, "skipping unknown constraint");
                continue;
            };
            if cast.is_null() && !constraint.applies_to_null() {
                continue;
            }

            let subject = if constraint.checks_raw_value() { raw } else { cast };
            if let Err(err) = constraint.evaluate(name, subject, arg) {
                debug!(field = name, constraint = %constraint, error = %err, "constraint failed");
                return Err(err);
            }
        }
        Ok(())
    }
}

impl Default for Types {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Types {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<_> = self.casters.keys().collect();
        names.sort();
        f.debug_struct("Types")
            .field("config", &self.config)
            .field("casters", &names)
            .finish()
    }
}

impl TypeDispatcher for Types {
    fn cast(&self, descriptor: &Descriptor, value: &Value, skip_constraints: bool) -> FieldResult<Value> {
        let cast = self
            .cast_type(descriptor.type_name(), descriptor.format(), value)
            .map_err(|err| {
                debug!(
                    field = descriptor.name().unwrap_or_default(),
                    field_type = descriptor.type_name(),
                    format = descriptor.format(),
                    error = %err,
                    "cast failed"
                );
                err
            })?;

        if !skip_constraints {
            self.check_constraints(descriptor, value, &cast)?;
        }
        Ok(cast)
    }
}

// ============================================================================
// Any Type
// ============================================================================

/// `any`: value passes through unchanged
#[derive(Debug, Clone, Copy, Default)]
pub struct AnyType;

impl TypeCaster for AnyType {
    fn type_name(&self) -> &'static str {
        "any"
    }

    fn cast(&self, _format: &str, value: &Value, _config: &CastConfig) -> CastResult<Value> {
        Ok(value.clone())
    }
}

/// Reject any format other than `default`
pub(crate) fn require_default_format(type_name: &str, format: &str) -> CastResult<()> {
    if format == "default" {
        Ok(())
    } else {
        Err(CastError::unsupported_format(type_name, format))
    }
}

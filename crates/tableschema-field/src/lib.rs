//! Table Schema Field
//!
//! Declarative field validation: a field descriptor (name, type, format,
//! constraints) casts raw input to its declared type and checks the result
//! against its constraints.
//!
//! # Architecture
//!
//! ```text
//! Field ──owns──> Descriptor            (immutable after construction)
//!   │
//!   └──owns──> TypeDispatcher (Types)   cast + constraint pipeline
//!                 ├── TypeCaster per declared type
//!                 └── constraint evaluators (required, minLength, ...)
//! ```
//!
//! - `cast_value` propagates the first cast or constraint error
//! - `test_value` reduces the same pipeline to `true`/`false`
//!
//! # Example
//!
//! ```rust
//! use tableschema_field::{Descriptor, Field, FieldError, Value};
//!
//! let field = Field::new(
//!     Descriptor::new("code")
//!         .with_constraint("required", true)
//!         .with_constraint("pattern", "/^[A-Z]{3}$/"),
//! );
//!
//! assert_eq!(field.cast_value("EUR", false).unwrap(), Value::from("EUR"));
//!
//! let err = field.cast_value("", false).unwrap_err();
//! assert!(matches!(err, FieldError::FieldRequired { .. }));
//! assert!(!field.test_value("eur", false));
//! ```

// Public modules
pub mod casting;
pub mod config;
pub mod constraints;
pub mod descriptor;
pub mod errors;
pub mod field;
pub mod formats;
pub mod types;

// Re-export commonly used types
pub use casting::{TypeCaster, TypeDispatcher, Types};
pub use config::{CastConfig, NULL_VALUES};
pub use constraints::{Constraint, Constraints, Evaluator};
pub use descriptor::Descriptor;
pub use errors::{CastError, CastResult, FieldError, FieldResult};
pub use field::Field;
pub use types::Value;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

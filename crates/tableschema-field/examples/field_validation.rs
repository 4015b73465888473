//! Field Validation Example
//!
//! Casts a few CSV-style cells through typed fields and reports failures.
//!
//! Run with:
//! ```bash
//! cargo run -p tableschema-field --example field_validation
//! ```

use serde_json::json;
use tableschema_field::{Field, FieldError};

fn main() -> Result<(), FieldError> {
    println!("Field Validation Example");
    println!("========================\n");

    let fields = [
        Field::from_json(&json!({
            "name": "id",
            "type": "integer",
            "constraints": {"required": true, "minimum": 1}
        }))?,
        Field::from_json(&json!({
            "name": "email",
            "format": "email",
            "constraints": {"maxLength": 40}
        }))?,
        Field::from_json(&json!({
            "name": "joined",
            "type": "date",
            "format": "%d/%m/%Y",
            "constraints": {"minimum": "2000-01-01"}
        }))?,
    ];

    let rows = [
        ["1", "ada@example.com", "10/12/2015"],
        ["0", "grace@example", "01/01/1999"],
        ["", "", ""],
    ];

    for (i, row) in rows.iter().enumerate() {
        println!("Row {}", i + 1);
        for (field, cell) in fields.iter().zip(row.iter()) {
            let name = field.name().unwrap_or_default();
            match field.cast_value(*cell, false) {
                Ok(value) => println!("  {:<8} {:?}", name, value),
                Err(err) => println!("  {:<8} error: {}", name, err),
            }
        }
        println!();
    }

    Ok(())
}

use jsonschema::Validator;
use serde_json::Value;

use crate::domain::{AppError, DocumentResult};

use super::json::field_from_pointer;

/// Compile a JSON Schema document into a reusable validator.
pub fn compile(label: &str, schema: &Value) -> Result<Validator, AppError> {
    jsonschema::validator_for(schema)
        .map_err(|err| AppError::InvalidSchema { path: label.to_string(), details: err.to_string() })
}

/// Record every schema violation of `instance` as a separate error.
pub fn schema_checks(validator: &Validator, instance: &Value, result: &mut DocumentResult) {
    for error in validator.iter_errors(instance) {
        let field = field_from_pointer(&error.instance_path.to_string());
        result.push_error(field.as_deref(), error.to_string());
    }
}

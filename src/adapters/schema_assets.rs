//! Embedded JSON Schema for configuration documents.
//!
//! The default schema is compiled into the binary; a repository may point at
//! its own schema file instead through configuration.

use std::fs;
use std::path::Path;

use include_dir::{Dir, include_dir};
use serde_json::Value;

use crate::domain::AppError;

static SCHEMAS_DIR: Dir = include_dir!("$CARGO_MANIFEST_DIR/src/assets/schemas");

/// File name of the bundled configuration document schema.
pub const DEFAULT_SCHEMA_FILE: &str = "app-config.schema.json";

/// Read an embedded schema by file name.
pub fn read_schema_asset(name: &str) -> Option<&'static str> {
    SCHEMAS_DIR.get_file(name).and_then(|file| file.contents_utf8())
}

/// Parse the bundled configuration document schema.
pub fn default_schema() -> Result<Value, AppError> {
    let label = format!("embedded://{}", DEFAULT_SCHEMA_FILE);
    let content = read_schema_asset(DEFAULT_SCHEMA_FILE).ok_or_else(|| {
        AppError::InvalidSchema { path: label.clone(), details: "asset missing".to_string() }
    })?;
    parse_schema(&label, content)
}

/// Load and parse a schema file from disk.
pub fn load_schema_file(path: &Path) -> Result<Value, AppError> {
    let label = path.display().to_string();
    let content = fs::read_to_string(path)
        .map_err(|err| AppError::InvalidSchema { path: label.clone(), details: err.to_string() })?;
    parse_schema(&label, &content)
}

fn parse_schema(label: &str, content: &str) -> Result<Value, AppError> {
    match serde_json::from_str::<Value>(content) {
        Ok(value @ Value::Object(_)) => Ok(value),
        Ok(_) => Err(AppError::InvalidSchema {
            path: label.to_string(),
            details: "schema root must be an object".to_string(),
        }),
        Err(err) => {
            Err(AppError::InvalidSchema { path: label.to_string(), details: err.to_string() })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn default_schema_requires_core_fields() {
        let schema = default_schema().unwrap();
        let required: Vec<&str> = schema["required"]
            .as_array()
            .unwrap()
            .iter()
            .filter_map(|value| value.as_str())
            .collect();
        assert_eq!(required, crate::domain::document::REQUIRED_FIELDS);
    }

    #[test]
    fn unknown_asset_returns_none() {
        assert!(read_schema_asset("missing.schema.json").is_none());
    }

    #[test]
    fn schema_file_must_be_json_object() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("schema.json");
        fs::write(&path, "[1, 2]").unwrap();

        let err = load_schema_file(&path).unwrap_err();
        assert!(matches!(err, AppError::InvalidSchema { .. }));
        assert!(err.to_string().contains("must be an object"));
    }

    #[test]
    fn missing_schema_file_is_reported() {
        let dir = TempDir::new().unwrap();
        let err = load_schema_file(&dir.path().join("absent.json")).unwrap_err();
        assert!(matches!(err, AppError::InvalidSchema { .. }));
    }
}

//! Field-level rules the JSON Schema cannot express.
//!
//! Most checks look only at fields that are present with the expected type;
//! absent or mistyped fields are reported by the schema layer when it runs,
//! and by [`check_required_fields`] when it is off. `rotation` is checked for
//! type in every mode.

use serde_json::{Map, Value};
use url::Url;

use crate::domain::DocumentResult;
use crate::domain::document::{
    CHECKSUM_ALGORITHMS, PATH_FIELDS, PATTERN_FIELDS, REQUIRED_FIELDS, RESERVED_NAMES, SourcePlatform,
    is_absolute_path, is_portable_name,
};

use super::json::{get_object, get_str, json_type};

type Document = Map<String, Value>;

/// `name` must equal the file name stem, compared case-sensitively.
///
/// When the schema layer is off, a missing or non-string `name` is reported
/// here so the identity invariant still holds.
pub fn check_name(doc: &Document, expected: &str, schema_enabled: bool, result: &mut DocumentResult) {
    let Some(name) = get_str(doc, "name") else {
        if !schema_enabled {
            result.push_error(
                Some("name"),
                format!("Missing application name; expected '{}'", expected),
            );
        }
        return;
    };

    if name != expected {
        result.push_error(
            Some("name"),
            format!("Name '{}' does not match file name stem '{}'", name, expected),
        );
    }
    if RESERVED_NAMES.contains(&name) {
        result.push_error(Some("name"), format!("Name '{}' is reserved for index metadata", name));
    }
    if !name.is_empty() && !is_portable_name(name) {
        result.push_warning(
            Some("name"),
            format!("Name '{}' contains characters outside [A-Za-z0-9_-]", name),
        );
    }
}

/// Without the schema layer, required fields must still be present non-empty
/// strings, and optional path fields must be strings when given.
///
/// `name` is left to [`check_name`].
pub fn check_required_fields(doc: &Document, schema_enabled: bool, result: &mut DocumentResult) {
    if schema_enabled {
        return;
    }

    for field in REQUIRED_FIELDS.into_iter().filter(|field| *field != "name") {
        match doc.get(field) {
            None => result.push_error(Some(field), "Missing required field"),
            Some(value) => check_string_field(field, value, result),
        }
    }
    for field in PATH_FIELDS.into_iter().filter(|field| !REQUIRED_FIELDS.contains(field)) {
        if let Some(value) = doc.get(field) {
            check_string_field(field, value, result);
        }
    }
}

fn check_string_field(field: &str, value: &Value, result: &mut DocumentResult) {
    match value {
        Value::Null => result.push_error(Some(field), "Field cannot be empty"),
        Value::String(text) if text.is_empty() => {
            result.push_error(Some(field), "Field cannot be empty")
        }
        Value::String(_) => {}
        other => result.push_error(
            Some(field),
            format!("Field must be a string, got {}", json_type(other)),
        ),
    }
}

/// `url` must be an absolute http(s) URL on a supported hosting platform,
/// agreeing with `source_type` when one is declared.
pub fn check_url(doc: &Document, result: &mut DocumentResult) {
    let platform = get_str(doc, "url").and_then(|raw| url_platform(raw, result));

    let Some(source_type) = get_str(doc, "source_type") else {
        return;
    };
    match SourcePlatform::from_source_type(source_type) {
        None => {
            let valid: Vec<_> = SourcePlatform::ALL.iter().map(|p| p.source_type()).collect();
            result.push_error(
                Some("source_type"),
                format!("Invalid source_type '{}'; expected one of {}", source_type, valid.join(", ")),
            );
        }
        Some(declared) => {
            if let Some(actual) = platform
                && actual != declared
            {
                result.push_error(
                    Some("source_type"),
                    format!(
                        "source_type '{}' does not match URL host platform '{}'",
                        declared, actual
                    ),
                );
            }
        }
    }
}

fn url_platform(raw: &str, result: &mut DocumentResult) -> Option<SourcePlatform> {
    let url = match Url::parse(raw) {
        Ok(url) => url,
        Err(err) => {
            result.push_error(Some("url"), format!("Invalid URL '{}': {}", raw, err));
            return None;
        }
    };

    if !matches!(url.scheme(), "http" | "https") {
        result.push_error(
            Some("url"),
            format!("URL must start with http:// or https://, got scheme '{}'", url.scheme()),
        );
        return None;
    }

    let Some(host) = url.host_str() else {
        result.push_error(Some("url"), format!("URL '{}' has no host", raw));
        return None;
    };

    let platform = SourcePlatform::from_host(host);
    if platform.is_none() {
        result.push_error(
            Some("url"),
            format!(
                "Unsupported host '{}'; expected one of {}",
                host,
                SourcePlatform::supported_domains()
            ),
        );
    }
    platform
}

/// `pattern` and `version_pattern` must compile under the `regex` engine.
pub fn check_patterns(doc: &Document, result: &mut DocumentResult) {
    for field in PATTERN_FIELDS {
        if let Some(pattern) = get_str(doc, field)
            && let Err(err) = regex::Regex::new(pattern)
        {
            result.push_error(Some(field), format!("Invalid regex: {}", err));
        }
    }
}

/// Path fields must be relative to the updater's base directory.
pub fn check_paths(doc: &Document, result: &mut DocumentResult) {
    for field in PATH_FIELDS {
        if let Some(value) = get_str(doc, field)
            && is_absolute_path(value)
        {
            result.push_error(
                Some(field),
                format!("Path must be relative, not absolute: '{}'", value),
            );
        }
    }
}

/// `rotation` counts retained downloads: when present it must be a
/// non-negative integer, with or without the schema layer.
pub fn check_rotation(doc: &Document, result: &mut DocumentResult) {
    let Some(value) = doc.get("rotation") else {
        return;
    };
    if value.as_u64().is_none() {
        result.push_error(
            Some("rotation"),
            format!("Rotation must be a non-negative integer, got {}", value),
        );
    }
}

/// The object form of `checksum` may only name a supported algorithm.
pub fn check_checksum(doc: &Document, result: &mut DocumentResult) {
    let Some(algorithm) = get_object(doc, "checksum").and_then(|checksum| get_str(checksum, "algorithm"))
    else {
        return;
    };
    if !CHECKSUM_ALGORITHMS.contains(&algorithm) {
        result.push_error(
            Some("checksum.algorithm"),
            format!(
                "Invalid checksum algorithm '{}'; expected one of {}",
                algorithm,
                CHECKSUM_ALGORITHMS.join(", ")
            ),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn doc(value: Value) -> Document {
        value.as_object().cloned().unwrap()
    }

    fn run<F: Fn(&Document, &mut DocumentResult)>(value: Value, check: F) -> DocumentResult {
        let mut result = DocumentResult::new("App.json");
        check(&doc(value), &mut result);
        result
    }

    #[test]
    fn name_must_match_stem_case_sensitively() {
        let mut result = DocumentResult::new("App.json");
        check_name(&doc(json!({"name": "app"})), "App", true, &mut result);
        assert_eq!(result.errors.len(), 1);
        assert_eq!(result.errors[0].field.as_deref(), Some("name"));
        assert!(result.errors[0].message.contains("does not match"));
    }

    #[test]
    fn missing_name_reported_only_without_schema() {
        let mut with_schema = DocumentResult::new("App.json");
        check_name(&doc(json!({})), "App", true, &mut with_schema);
        assert!(with_schema.errors.is_empty());

        let mut without_schema = DocumentResult::new("App.json");
        check_name(&doc(json!({})), "App", false, &mut without_schema);
        assert_eq!(without_schema.errors.len(), 1);
    }

    #[test]
    fn reserved_names_rejected() {
        let mut result = DocumentResult::new("repo_hash.json");
        check_name(&doc(json!({"name": "repo_hash"})), "repo_hash", true, &mut result);
        assert_eq!(result.errors.len(), 1);
        assert!(result.errors[0].message.contains("reserved"));
    }

    #[test]
    fn unusual_name_characters_only_warn() {
        let mut result = DocumentResult::new("My App.json");
        check_name(&doc(json!({"name": "My App"})), "My App", true, &mut result);
        assert!(result.is_valid());
        assert_eq!(result.warnings.len(), 1);
    }

    #[test]
    fn supported_hosts_pass() {
        for url in [
            "https://github.com/x/a",
            "https://gitlab.com/x/a",
            "https://sourceforge.net/projects/a",
            "http://www.github.com/x/a",
        ] {
            let result = run(json!({ "url": url }), check_url);
            assert!(result.is_valid(), "{url}: {:?}", result.errors);
        }
    }

    #[test]
    fn malformed_and_unsupported_urls_fail() {
        for url in ["github.com/x/a", "ftp://github.com/x/a", "https://example.org/a", ""] {
            let result = run(json!({ "url": url }), check_url);
            assert_eq!(result.errors.len(), 1, "{url}: {:?}", result.errors);
            assert_eq!(result.errors[0].field.as_deref(), Some("url"));
        }
    }

    #[test]
    fn source_type_must_agree_with_host() {
        let result = run(json!({"url": "https://github.com/x/a", "source_type": "gitlab"}), check_url);
        assert_eq!(result.errors.len(), 1);
        assert_eq!(result.errors[0].field.as_deref(), Some("source_type"));

        let result = run(json!({"url": "https://github.com/x/a", "source_type": "direct"}), check_url);
        assert_eq!(result.errors.len(), 1);

        let result = run(json!({"url": "https://github.com/x/a", "source_type": "github"}), check_url);
        assert!(result.is_valid());
    }

    #[test]
    fn invalid_regex_surfaces_engine_message() {
        let result =
            run(json!({"pattern": "App(.*\\.AppImage", "version_pattern": "v[0-9"}), check_patterns);
        assert_eq!(result.errors.len(), 2);
        assert!(result.errors[0].message.starts_with("Invalid regex:"));
        assert_eq!(result.errors[1].field.as_deref(), Some("version_pattern"));
    }

    #[test]
    fn absolute_paths_rejected_per_field() {
        let result =
            run(json!({"download_dir": "/opt/apps", "symlink_dir": "~/bin"}), check_paths);
        assert_eq!(result.errors.len(), 2);

        let result = run(json!({"download_dir": "dl/app", "symlink_dir": "bin"}), check_paths);
        assert!(result.is_valid());
    }

    #[test]
    fn rotation_must_be_a_non_negative_integer() {
        let result = run(json!({"rotation": -1}), check_rotation);
        assert_eq!(result.errors.len(), 1);
        assert!(result.errors[0].message.ends_with("got -1"));

        let result = run(json!({"rotation": 1.5}), check_rotation);
        assert!(result.errors[0].message.ends_with("got 1.5"));

        let result = run(json!({"rotation": "3"}), check_rotation);
        assert_eq!(result.errors[0].field.as_deref(), Some("rotation"));

        assert!(run(json!({"rotation": 0}), check_rotation).is_valid());
        assert!(run(json!({"rotation": 7}), check_rotation).is_valid());
        assert!(run(json!({}), check_rotation).is_valid());
    }

    #[test]
    fn required_fields_checked_only_without_schema() {
        let value = json!({"name": "App", "pattern": "", "download_dir": 3, "symlink_dir": null});

        let mut with_schema = DocumentResult::new("App.json");
        check_required_fields(&doc(value.clone()), true, &mut with_schema);
        assert!(with_schema.is_valid());

        let mut without_schema = DocumentResult::new("App.json");
        check_required_fields(&doc(value), false, &mut without_schema);
        let reported: Vec<_> = without_schema
            .errors
            .iter()
            .map(|error| (error.field.as_deref().unwrap(), error.message.as_str()))
            .collect();
        assert_eq!(
            reported,
            vec![
                ("url", "Missing required field"),
                ("pattern", "Field cannot be empty"),
                ("download_dir", "Field must be a string, got number"),
                ("symlink_dir", "Field cannot be empty"),
            ]
        );
    }

    #[test]
    fn complete_document_passes_required_fields_without_schema() {
        let value = json!({
            "name": "App",
            "url": "https://github.com/x/app",
            "pattern": ".*",
            "download_dir": "dl",
            "symlink_dir": "bin"
        });
        let mut result = DocumentResult::new("App.json");
        check_required_fields(&doc(value), false, &mut result);
        assert!(result.is_valid(), "{:?}", result.errors);
    }

    #[test]
    fn checksum_algorithm_must_be_supported() {
        assert!(run(json!({"checksum": true}), check_checksum).is_valid());
        assert!(run(json!({"checksum": {"algorithm": "sha512"}}), check_checksum).is_valid());

        let result = run(json!({"checksum": {"algorithm": "crc32"}}), check_checksum);
        assert_eq!(result.errors[0].field.as_deref(), Some("checksum.algorithm"));
    }
}

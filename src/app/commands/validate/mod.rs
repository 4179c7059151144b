//! Configuration document validation.

mod json;
mod schema;
mod semantic;

use std::path::{Path, PathBuf};

use jsonschema::Validator;
use serde_json::Value;

use crate::domain::{AppError, DocumentResult, ValidationReport};
use crate::ports::DocumentStore;

pub use schema::compile as compile_schema;

/// Validates one configuration document at a time.
///
/// Holds the compiled JSON Schema when the formal schema layer is enabled;
/// otherwise only the semantic checks run.
pub struct DocumentValidator {
    schema: Option<Validator>,
}

impl DocumentValidator {
    pub fn with_schema(schema: Validator) -> Self {
        Self { schema: Some(schema) }
    }

    pub fn without_schema() -> Self {
        Self { schema: None }
    }

    pub fn schema_enabled(&self) -> bool {
        self.schema.is_some()
    }

    /// Validate a document stored as `file_name`; its stem is the expected name.
    pub fn validate(&self, file_name: &str, content: &[u8]) -> DocumentResult {
        let stem = Path::new(file_name)
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_default();
        self.validate_content(file_name, &stem, content)
    }

    /// Run every applicable check, accumulating errors.
    ///
    /// A document that fails to parse gets a single error and no further checks.
    pub fn validate_content(&self, label: &str, expected_name: &str, content: &[u8]) -> DocumentResult {
        let mut result = DocumentResult::new(label);

        let value: Value = match serde_json::from_slice(content) {
            Ok(value) => value,
            Err(err) => {
                result.push_error(None, format!("Invalid JSON: {}", err));
                return result;
            }
        };
        let Some(doc) = value.as_object() else {
            result.push_error(None, "Document root must be a JSON object");
            return result;
        };

        result.name = json::get_str(doc, "name").map(str::to_string);

        if let Some(schema) = &self.schema {
            schema::schema_checks(schema, &value, &mut result);
        }

        semantic::check_name(doc, expected_name, self.schema_enabled(), &mut result);
        semantic::check_required_fields(doc, self.schema_enabled(), &mut result);
        semantic::check_url(doc, &mut result);
        semantic::check_patterns(doc, &mut result);
        semantic::check_paths(doc, &mut result);
        semantic::check_rotation(doc, &mut result);
        semantic::check_checksum(doc, &mut result);

        result
    }
}

/// A document as read from the store, kept for fingerprinting after validation.
#[derive(Debug, Clone)]
pub struct LoadedDocument {
    pub file: String,
    pub path: PathBuf,
    pub content: Vec<u8>,
}

/// Validation results for a whole store together with the bytes that were checked.
#[derive(Debug, Clone, Default)]
pub struct ValidatedBatch {
    pub report: ValidationReport,
    pub documents: Vec<LoadedDocument>,
}

/// Validate every document in `store`, in enumeration order.
///
/// A failing document never stops evaluation of the others. Read failures
/// abort the run.
pub fn validate_store<D: DocumentStore>(
    store: &D,
    validator: &DocumentValidator,
) -> Result<ValidatedBatch, AppError> {
    let files = store.list_documents()?;
    tracing::info!(
        count = files.len(),
        dir = %store.location().display(),
        schema = validator.schema_enabled(),
        "validating configuration documents"
    );

    let mut batch = ValidatedBatch::default();
    for file in files {
        let content = store.read_document(&file)?;
        let result = validator.validate(&file, &content);
        tracing::debug!(file = %file, errors = result.errors.len(), "validated document");

        batch.documents.push(LoadedDocument { path: store.document_path(&file), file, content });
        batch.report.push(result);
    }
    Ok(batch)
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ValidateOptions {
    /// Treat warnings as failures.
    pub strict: bool,
}

#[derive(Debug, Clone)]
pub struct ValidationOutcome {
    pub report: ValidationReport,
    pub exit_code: i32,
}

/// Process exit code for a finished report: 1 on errors, 2 on warnings under strict.
pub fn exit_code_for(report: &ValidationReport, strict: bool) -> i32 {
    if report.has_failures() {
        1
    } else if strict && report.has_warnings() {
        2
    } else {
        0
    }
}

/// Validate-only mode: check every document, print the report, write nothing.
pub fn execute<D: DocumentStore>(
    store: &D,
    validator: &DocumentValidator,
    options: ValidateOptions,
) -> Result<ValidationOutcome, AppError> {
    let batch = validate_store(store, validator)?;
    let report = batch.report;

    if report.total() == 0 {
        eprintln!("No configuration documents found in {}", store.location().display());
        return Ok(ValidationOutcome { report, exit_code: 0 });
    }

    println!("Validating {} config file(s) in {}...", report.total(), store.location().display());
    report.emit();
    print_summary(&report, options.strict);

    let exit_code = exit_code_for(&report, options.strict);
    Ok(ValidationOutcome { report, exit_code })
}

/// Print the closing summary line shared by validate and generate.
pub fn print_summary(report: &ValidationReport, strict: bool) {
    let errors = report.error_count();
    let warnings = report.warning_count();

    if errors == 0 && warnings == 0 {
        println!("✓ All {} config(s) valid", report.total());
    } else if errors == 0 && !strict {
        eprintln!("✓ All {} config(s) valid with {} warning(s)", report.total(), warnings);
    } else {
        eprintln!(
            "✗ {} of {} config(s) failed: {} error(s), {} warning(s)",
            report.failed_count(),
            report.total(),
            errors,
            warnings
        );
    }
}

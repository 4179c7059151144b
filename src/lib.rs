//! appindex: validate AppImage updater configuration documents and maintain
//! their fingerprinted index.

pub mod adapters;
pub mod app;
pub mod domain;
pub mod ports;

#[cfg(test)]
pub(crate) mod testing;

pub use app::commands::generate::{GenerateMode, GenerateOptions, GenerateOutcome};
pub use app::commands::validate::{DocumentValidator, ValidateOptions, ValidationOutcome};
pub use app::config::{IndexConfig, Overrides, SchemaSource, Settings};
pub use domain::{
    AppError, Diagnostic, DocumentResult, Fingerprint, Manifest, ManifestEntry, SourcePlatform,
    ValidationReport,
};

/// Validate every configuration document under the configured directory.
///
/// Prints the report and returns it with the process exit code; never writes.
pub fn validate(settings: &Settings) -> Result<ValidationOutcome, AppError> {
    app::api::validate(settings)
}

/// Validate every configuration document and, if all pass, atomically
/// replace the index at `settings.index_path`.
///
/// In [`GenerateMode::Check`] the installed index is compared instead of written.
pub fn generate(settings: &Settings, mode: GenerateMode) -> Result<GenerateOutcome, AppError> {
    app::api::generate(settings, mode)
}

/// Validate a single document's content against the embedded schema and all
/// semantic rules. `expected_name` is the document's file name stem.
pub fn validate_document(expected_name: &str, content: &[u8]) -> Result<DocumentResult, AppError> {
    let validator = app::api::build_validator(&SchemaSource::Embedded)?;
    Ok(validator.validate_content(&format!("{expected_name}.json"), expected_name, content))
}

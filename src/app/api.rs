//! Library entry points wiring filesystem adapters to the commands.

use chrono::Utc;

use crate::adapters::schema_assets::{DEFAULT_SCHEMA_FILE, default_schema, load_schema_file};
use crate::adapters::{AtomicManifestFile, DirectoryDocumentStore};
use crate::app::AppContext;
use crate::app::commands::generate::{self, GenerateMode, GenerateOptions, GenerateOutcome};
use crate::app::commands::validate::{
    self, DocumentValidator, ValidateOptions, ValidationOutcome, compile_schema,
};
use crate::app::config::{SchemaSource, Settings};
use crate::domain::AppError;

/// Build the document validator for the configured schema source.
pub fn build_validator(schema: &SchemaSource) -> Result<DocumentValidator, AppError> {
    match schema {
        SchemaSource::Disabled => Ok(DocumentValidator::without_schema()),
        SchemaSource::Embedded => {
            let label = format!("embedded://{}", DEFAULT_SCHEMA_FILE);
            Ok(DocumentValidator::with_schema(compile_schema(&label, &default_schema()?)?))
        }
        SchemaSource::File(path) => {
            let value = load_schema_file(path)?;
            Ok(DocumentValidator::with_schema(compile_schema(&path.display().to_string(), &value)?))
        }
    }
}

/// Validate every configuration document without writing anything.
pub fn validate(settings: &Settings) -> Result<ValidationOutcome, AppError> {
    let validator = build_validator(&settings.schema)?;
    let store = DirectoryDocumentStore::new(&settings.configs_dir);
    validate::execute(&store, &validator, ValidateOptions { strict: settings.strict })
}

/// Validate every document and, if all pass, install a fresh manifest.
pub fn generate(settings: &Settings, mode: GenerateMode) -> Result<GenerateOutcome, AppError> {
    let validator = build_validator(&settings.schema)?;
    let ctx = AppContext::new(
        DirectoryDocumentStore::new(&settings.configs_dir),
        AtomicManifestFile::new(&settings.index_path),
    );
    generate::execute(&ctx, &validator, GenerateOptions { strict: settings.strict, mode }, Utc::now())
}

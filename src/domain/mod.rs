pub mod document;
pub mod error;
pub mod fingerprint;
pub mod manifest;
pub mod validation;

pub use document::SourcePlatform;
pub use error::AppError;
pub use fingerprint::Fingerprint;
pub use manifest::{Manifest, ManifestEntry};
pub use validation::{Diagnostic, DocumentResult, ValidationReport};

mod document_directory;
mod manifest_file;
pub mod schema_assets;

pub use document_directory::DirectoryDocumentStore;
pub use manifest_file::{AtomicManifestFile, StagedManifest};

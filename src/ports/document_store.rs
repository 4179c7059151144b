//! Read-only access to the directory of configuration documents.

use std::path::{Path, PathBuf};

use crate::domain::AppError;

/// Port for enumerating and reading configuration documents.
///
/// Implementations never write to the underlying store.
pub trait DocumentStore {
    /// Location of the store, used for display and relative manifest paths.
    fn location(&self) -> &Path;

    /// File names of every document, in lexicographic order.
    fn list_documents(&self) -> Result<Vec<String>, AppError>;

    /// Exact byte content of a document.
    fn read_document(&self, file_name: &str) -> Result<Vec<u8>, AppError>;

    /// Full path of a document inside the store.
    fn document_path(&self, file_name: &str) -> PathBuf {
        self.location().join(file_name)
    }
}

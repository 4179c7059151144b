use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::domain::AppError;
use crate::ports::DocumentStore;

/// In-memory document store for testing.
#[derive(Debug, Clone)]
pub struct MemoryDocumentStore {
    root: PathBuf,
    documents: BTreeMap<String, Vec<u8>>,
}

impl MemoryDocumentStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into(), documents: BTreeMap::new() }
    }

    pub fn with_document(mut self, file_name: &str, content: impl Into<Vec<u8>>) -> Self {
        self.documents.insert(file_name.to_string(), content.into());
        self
    }
}

impl DocumentStore for MemoryDocumentStore {
    fn location(&self) -> &Path {
        &self.root
    }

    fn list_documents(&self) -> Result<Vec<String>, AppError> {
        Ok(self.documents.keys().cloned().collect())
    }

    fn read_document(&self, file_name: &str) -> Result<Vec<u8>, AppError> {
        self.documents.get(file_name).cloned().ok_or_else(|| {
            AppError::Io(std::io::Error::new(std::io::ErrorKind::NotFound, file_name.to_string()))
        })
    }
}

use std::fs;
use std::path::{Path, PathBuf};

use crate::domain::AppError;
use crate::domain::document::DOCUMENT_EXTENSION;
use crate::ports::DocumentStore;

/// Filesystem-backed document store: every `*.json` file directly inside a directory.
#[derive(Debug, Clone)]
pub struct DirectoryDocumentStore {
    root: PathBuf,
}

impl DirectoryDocumentStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl DocumentStore for DirectoryDocumentStore {
    fn location(&self) -> &Path {
        &self.root
    }

    fn list_documents(&self) -> Result<Vec<String>, AppError> {
        if !self.root.is_dir() {
            return Err(AppError::DocumentsDirNotFound(self.root.display().to_string()));
        }

        let mut names = Vec::new();
        for entry in fs::read_dir(&self.root)? {
            let entry = entry?;
            let path = entry.path();
            if !path.is_file() {
                continue;
            }
            if path.extension().and_then(|ext| ext.to_str()) != Some(DOCUMENT_EXTENSION) {
                continue;
            }
            match entry.file_name().into_string() {
                Ok(name) => names.push(name),
                Err(raw) => {
                    return Err(AppError::config_error(format!(
                        "Document file name is not valid UTF-8: {}",
                        raw.to_string_lossy()
                    )));
                }
            }
        }

        names.sort();
        Ok(names)
    }

    fn read_document(&self, file_name: &str) -> Result<Vec<u8>, AppError> {
        Ok(fs::read(self.document_path(file_name))?)
    }
}

use std::cell::RefCell;
use std::path::{Path, PathBuf};

use crate::domain::AppError;
use crate::ports::ManifestStore;

/// In-memory manifest store for testing, optionally failing on install.
#[derive(Debug, Default)]
pub struct MemoryManifestStore {
    path: PathBuf,
    content: RefCell<Option<Vec<u8>>>,
    installs: RefCell<usize>,
    fail_install: bool,
}

impl MemoryManifestStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into(), ..Self::default() }
    }

    pub fn with_content(self, content: impl Into<Vec<u8>>) -> Self {
        *self.content.borrow_mut() = Some(content.into());
        self
    }

    pub fn failing(mut self) -> Self {
        self.fail_install = true;
        self
    }

    pub fn content(&self) -> Option<Vec<u8>> {
        self.content.borrow().clone()
    }

    pub fn install_count(&self) -> usize {
        *self.installs.borrow()
    }
}

impl ManifestStore for MemoryManifestStore {
    fn location(&self) -> &Path {
        &self.path
    }

    fn read_manifest(&self) -> Result<Option<Vec<u8>>, AppError> {
        Ok(self.content())
    }

    fn install_manifest(&self, content: &[u8]) -> Result<(), AppError> {
        if self.fail_install {
            return Err(AppError::Io(std::io::Error::other("simulated rename failure")));
        }
        *self.content.borrow_mut() = Some(content.to_vec());
        *self.installs.borrow_mut() += 1;
        Ok(())
    }
}

//! Manifest file installed with write-to-temp-then-rename.

use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tempfile::{Builder, NamedTempFile};

use crate::domain::AppError;
use crate::ports::ManifestStore;

/// Manifest stored as a single file, replaced atomically.
#[derive(Debug, Clone)]
pub struct AtomicManifestFile {
    path: PathBuf,
}

impl AtomicManifestFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Write `content` to a fully synced temporary file next to the manifest.
    ///
    /// The installed manifest is untouched until [`StagedManifest::commit`].
    /// Dropping the staged manifest removes the temporary file.
    pub fn stage(&self, content: &[u8]) -> Result<StagedManifest, AppError> {
        let dir = parent_dir(&self.path);
        let mut file = Builder::new().prefix(".appindex-").suffix(".tmp").tempfile_in(dir)?;

        file.write_all(content)?;
        file.flush()?;
        apply_permissions(file.as_file(), &self.path)?;
        file.as_file().sync_all()?;

        Ok(StagedManifest { file, target: self.path.clone() })
    }
}

impl ManifestStore for AtomicManifestFile {
    fn location(&self) -> &Path {
        &self.path
    }

    fn read_manifest(&self) -> Result<Option<Vec<u8>>, AppError> {
        match fs::read(&self.path) {
            Ok(content) => Ok(Some(content)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    fn install_manifest(&self, content: &[u8]) -> Result<(), AppError> {
        self.stage(content)?.commit()
    }
}

/// A fully written manifest waiting to replace the installed one.
#[derive(Debug)]
pub struct StagedManifest {
    file: NamedTempFile,
    target: PathBuf,
}

impl StagedManifest {
    pub fn temp_path(&self) -> &Path {
        self.file.path()
    }

    /// Atomically rename the staged file over the install location.
    pub fn commit(self) -> Result<(), AppError> {
        let target = self.target;
        self.file.persist(&target).map_err(|err| AppError::Io(err.error))?;

        if let Err(err) = sync_dir(parent_dir(&target)) {
            tracing::debug!(path = %target.display(), error = %err, "directory sync after rename failed");
        }
        Ok(())
    }
}

fn parent_dir(path: &Path) -> &Path {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    }
}

#[cfg(unix)]
fn apply_permissions(file: &File, target: &Path) -> io::Result<()> {
    use std::os::unix::fs::PermissionsExt;

    let mode = fs::metadata(target).map(|meta| meta.permissions().mode()).unwrap_or(0o644);
    file.set_permissions(fs::Permissions::from_mode(mode))
}

#[cfg(not(unix))]
fn apply_permissions(_file: &File, _target: &Path) -> io::Result<()> {
    Ok(())
}

#[cfg(unix)]
fn sync_dir(dir: &Path) -> io::Result<()> {
    File::open(dir)?.sync_all()
}

#[cfg(not(unix))]
fn sync_dir(_dir: &Path) -> io::Result<()> {
    Ok(())
}

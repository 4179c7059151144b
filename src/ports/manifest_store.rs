//! Storage for the generated manifest.

use std::path::Path;

use crate::domain::AppError;

/// Port for reading and replacing the installed manifest.
pub trait ManifestStore {
    /// Install location of the manifest.
    fn location(&self) -> &Path;

    /// Current manifest bytes, or `None` when nothing is installed yet.
    fn read_manifest(&self) -> Result<Option<Vec<u8>>, AppError>;

    /// Replace the installed manifest with `content`.
    ///
    /// Readers observe either the previous manifest or `content` in full,
    /// never a partial write. On error the previous manifest is left intact.
    fn install_manifest(&self, content: &[u8]) -> Result<(), AppError>;
}

use crate::ports::{DocumentStore, ManifestStore};

/// Application context holding the stores a command operates on.
pub struct AppContext<D: DocumentStore, M: ManifestStore> {
    documents: D,
    manifest: M,
}

impl<D: DocumentStore, M: ManifestStore> AppContext<D, M> {
    pub fn new(documents: D, manifest: M) -> Self {
        Self { documents, manifest }
    }

    /// The configuration document store.
    pub fn documents(&self) -> &D {
        &self.documents
    }

    /// The manifest install location.
    pub fn manifest(&self) -> &M {
        &self.manifest
    }
}

mod document_store;
mod manifest_store;

pub use document_store::DocumentStore;
pub use manifest_store::ManifestStore;

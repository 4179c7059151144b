mod memory_document_store;
mod memory_manifest_store;

pub use memory_document_store::MemoryDocumentStore;
pub use memory_manifest_store::MemoryManifestStore;

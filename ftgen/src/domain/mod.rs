//! Document-analysis records stored as RedisJSON documents and indexed for search.
//!
//! All of them register under the [`NAMESPACE`] namespace, which is the generator's
//! default.

mod document_chunk;
mod metadata;
mod semantic_cache_entry;

pub use document_chunk::DocumentChunk;
pub use metadata::Metadata;
pub use semantic_cache_entry::SemanticCacheEntry;

pub const NAMESPACE: &str = "document_analysis";

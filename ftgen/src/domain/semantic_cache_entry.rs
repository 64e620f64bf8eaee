use serde::{Deserialize, Serialize};

use crate::SearchIndexed;

/// Cached answer keyed by the embedding of the query that produced it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, SearchIndexed)]
#[search(namespace = "document_analysis")]
pub struct SemanticCacheEntry {
    pub original_query: String,
    pub response: String,
    pub embedding: Vec<f32>,
}

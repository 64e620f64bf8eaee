use serde::{Deserialize, Serialize};

use super::Metadata;
use crate::SearchIndexed;

/// A chunk of an analysed document together with its embedding.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, SearchIndexed)]
#[search(namespace = "document_analysis")]
pub struct DocumentChunk {
    pub doc_id: String,
    pub chunk_id: String,
    pub content: String,
    pub metadata: Metadata,
    pub embedding: Vec<f32>,
}

use serde::{Deserialize, Serialize};

use crate::SearchIndexed;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, SearchIndexed)]
#[search(namespace = "document_analysis")]
pub struct Metadata {
    pub source: String,
    pub page: i32,
    /// Epoch milliseconds.
    pub created_at: i64,
}

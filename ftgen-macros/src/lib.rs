use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

mod parsed;
mod shape;

use parsed::ParsedRecord;

/// Register a record type for search-index migration generation.
///
/// Implements `ftgen::SearchIndexed` and submits the type to the inventory under the
/// namespace given by `#[search(namespace = "...")]`.
///
/// # Example
///
/// ```text
/// #[derive(SearchIndexed)]
/// #[search(namespace = "document_analysis")]
/// struct DocumentChunk {
///     content: String,
///     metadata: Metadata,          // Metadata must also derive SearchIndexed
///     embedding: Vec<f32>,
///     #[search(kind = "scalar")]   // override for types the derive cannot classify
///     status: Status,
/// }
/// ```
#[proc_macro_derive(SearchIndexed, attributes(search))]
pub fn derive_search_indexed(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    match ParsedRecord::from_input(&input) {
        Ok(parsed) => parsed.emit().into(),
        Err(err) => err.to_compile_error().into(),
    }
}

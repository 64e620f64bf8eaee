use std::path::PathBuf;

use ftgen::classifier::AttributeClause;
use ftgen::domain::{DocumentChunk, Metadata, NAMESPACE, SemanticCacheEntry};
use ftgen::{DescriptorSource, RegistrySource, SchemaFragment, SourceScanner, TypeDescriptor, compile};
use serde_json::Value;

fn domain_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("src").join("domain")
}

fn registry_descriptors() -> Vec<TypeDescriptor> {
    RegistrySource.descriptors(NAMESPACE).unwrap()
}

fn fragment(name: &str) -> SchemaFragment {
    let descriptor = registry_descriptors()
        .into_iter()
        .find(|descriptor| descriptor.name == name)
        .expect("descriptor registered");
    SchemaFragment::from_descriptor(&descriptor)
}

/// Follow a `$.a.b` clause path through a JSON document.
fn resolve<'a>(document: &'a Value, path: &str) -> Option<&'a Value> {
    let mut current = document;
    for segment in path.strip_prefix("$.")?.split('.') {
        current = current.get(segment)?;
    }
    Some(current)
}

#[test]
fn registry_lists_domain_records_sorted() {
    let names: Vec<String> = registry_descriptors().into_iter().map(|d| d.name).collect();
    assert_eq!(names, ["DocumentChunk", "Metadata", "SemanticCacheEntry"]);
}

#[test]
fn document_chunk_schema() {
    let fragment = fragment("DocumentChunk");
    assert_eq!(fragment.index_name, "idx:documentchunk");
    assert_eq!(fragment.key_prefix, "documentchunk:");
    assert_eq!(
        fragment.render_schema(),
        "$.doc_id AS doc_id TEXT \
         $.chunk_id AS chunk_id TEXT \
         $.content AS content TEXT \
         $.metadata.source AS metadata_source TEXT \
         $.metadata.page AS metadata_page TEXT \
         $.metadata.created_at AS metadata_created_at TEXT \
         $.embedding AS embedding VECTOR FLAT 6 TYPE FLOAT32 DIM 1536 DISTANCE_METRIC COSINE"
    );
}

#[test]
fn semantic_cache_entry_key_prefix_drops_entry() {
    let fragment = fragment("SemanticCacheEntry");
    assert_eq!(fragment.index_name, "idx:semanticcacheentry");
    assert_eq!(fragment.key_prefix, "semanticcache:");

    let vectors: Vec<&AttributeClause> = fragment.clauses.iter().filter(|c| c.is_vector()).collect();
    assert_eq!(vectors.len(), 1);
    assert_eq!(vectors[0].alias(), "embedding");
}

#[test]
fn compiled_block_pairs_drop_with_create() {
    let block = compile(&registry_descriptors());
    let lines: Vec<String> = block.render_lines("");
    assert_eq!(lines.len(), 6);
    assert_eq!(lines[0], "FT.DROPINDEX idx:documentchunk");
    assert!(lines[1].starts_with("FT.CREATE idx:documentchunk ON JSON PREFIX 1 documentchunk: SCHEMA "));
    assert_eq!(lines[2], "FT.DROPINDEX idx:metadata");
    assert_eq!(
        lines[3],
        "FT.CREATE idx:metadata ON JSON PREFIX 1 metadata: SCHEMA \
         $.source AS source TEXT $.page AS page TEXT $.created_at AS created_at TEXT"
    );
    assert_eq!(lines[4], "FT.DROPINDEX idx:semanticcacheentry");
    assert!(lines[5].starts_with("FT.CREATE idx:semanticcacheentry ON JSON PREFIX 1 semanticcache: SCHEMA "));
}

#[test]
fn scanner_matches_registry_for_domain() {
    let scanned = SourceScanner::new(domain_dir()).descriptors(NAMESPACE).unwrap();
    assert_eq!(scanned, registry_descriptors());
}

#[test]
fn clause_paths_resolve_in_serialized_records() {
    let chunk = DocumentChunk {
        doc_id: "doc-1".to_string(),
        chunk_id: "chunk-7".to_string(),
        content: "Quarterly revenue grew".to_string(),
        metadata: Metadata {
            source: "report.pdf".to_string(),
            page: 3,
            created_at: 1_735_380_000_000,
        },
        embedding: vec![0.25; 8],
    };
    let entry = SemanticCacheEntry {
        original_query: "how did revenue change?".to_string(),
        response: "It grew".to_string(),
        embedding: vec![0.5; 8],
    };

    let records = [
        ("DocumentChunk", serde_json::to_value(&chunk).unwrap()),
        ("Metadata", serde_json::to_value(&chunk.metadata).unwrap()),
        ("SemanticCacheEntry", serde_json::to_value(&entry).unwrap()),
    ];

    for (name, document) in &records {
        for clause in &fragment(name).clauses {
            let value = resolve(document, clause.path())
                .unwrap_or_else(|| panic!("{name}: {} missing from {document}", clause.path()));
            if clause.is_vector() {
                assert!(value.is_array(), "{name}: vector path {} is not an array", clause.path());
            }
        }
    }
}

//! Schema compilation: classified fields plus naming conventions become an ordered
//! block of `FT.DROPINDEX` / `FT.CREATE` commands.

use std::fmt;

use crate::classifier::{AttributeClause, classify};
use crate::types::TypeDescriptor;

const INDEX_NAME_PREFIX: &str = "idx:";
const KEY_PREFIX_STRIP: &str = "entry";

/// `idx:` followed by the lowercased entity name.
pub fn index_name(entity: &str) -> String {
    format!("{INDEX_NAME_PREFIX}{}", entity.to_lowercase())
}

/// Lowercased entity name with every `entry` removed, suffixed with `:`.
pub fn key_prefix(entity: &str) -> String {
    format!("{}:", entity.to_lowercase().replace(KEY_PREFIX_STRIP, ""))
}

/// Index definition for one entity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaFragment {
    pub index_name: String,
    pub key_prefix: String,
    pub clauses: Vec<AttributeClause>,
}

impl SchemaFragment {
    pub fn from_descriptor(descriptor: &TypeDescriptor) -> Self {
        Self {
            index_name: index_name(&descriptor.name),
            key_prefix: key_prefix(&descriptor.name),
            clauses: descriptor.fields.iter().flat_map(classify).collect(),
        }
    }

    /// Clause text following `SCHEMA`.
    pub fn render_schema(&self) -> String {
        self.clauses
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(" ")
            .trim()
            .to_string()
    }
}

/// A single index command, stored without any client invocation prefix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IndexCommand {
    Drop { index_name: String },
    Create(SchemaFragment),
}

impl IndexCommand {
    pub fn index_name(&self) -> &str {
        match self {
            IndexCommand::Drop { index_name } => index_name,
            IndexCommand::Create(fragment) => &fragment.index_name,
        }
    }
}

impl fmt::Display for IndexCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IndexCommand::Drop { index_name } => write!(f, "FT.DROPINDEX {index_name}"),
            IndexCommand::Create(fragment) => write!(
                f,
                "FT.CREATE {} ON JSON PREFIX 1 {} SCHEMA {}",
                fragment.index_name,
                fragment.key_prefix,
                fragment.render_schema()
            ),
        }
    }
}

/// Every command produced in one run, in execution order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandBlock {
    commands: Vec<IndexCommand>,
}

impl CommandBlock {
    /// Append the DROP + CREATE pair for one entity. The drop always comes first so
    /// re-applying the migration is idempotent.
    pub fn push_entity(&mut self, descriptor: &TypeDescriptor) {
        let fragment = SchemaFragment::from_descriptor(descriptor);
        self.commands.push(IndexCommand::Drop {
            index_name: fragment.index_name.clone(),
        });
        self.commands.push(IndexCommand::Create(fragment));
    }

    pub fn commands(&self) -> &[IndexCommand] {
        &self.commands
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Render one command per line, each preceded by `prefix` (which may be empty).
    pub fn render_lines(&self, prefix: &str) -> Vec<String> {
        self.commands.iter().map(|command| format!("{prefix}{command}")).collect()
    }
}

impl fmt::Display for CommandBlock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.render_lines("").join("\n"))
    }
}

/// Compile every descriptor, in discovery order, into one command block.
pub fn compile(descriptors: &[TypeDescriptor]) -> CommandBlock {
    let mut block = CommandBlock::default();
    for descriptor in descriptors {
        block.push_entity(descriptor);
    }
    block
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::FieldKind;

    fn chunk() -> TypeDescriptor {
        TypeDescriptor::new("DocumentChunk")
            .with_field("doc_id", FieldKind::Scalar)
            .with_field("content", FieldKind::Scalar)
            .with_field(
                "metadata",
                FieldKind::nested(
                    "Metadata",
                    vec![
                        crate::types::FieldDescriptor::new("source", FieldKind::Scalar),
                        crate::types::FieldDescriptor::new("page", FieldKind::Scalar),
                    ],
                ),
            )
            .with_field("embedding", FieldKind::Collection)
    }

    #[test]
    fn naming_conventions() {
        assert_eq!(index_name("DocumentChunk"), "idx:documentchunk");
        assert_eq!(key_prefix("DocumentChunk"), "documentchunk:");
        assert_eq!(key_prefix("SemanticCacheEntry"), "semanticcache:");
        assert_eq!(key_prefix("EntryLogEntry"), "log:");
    }

    #[test]
    fn create_command_renders_full_schema() {
        let block = compile(&[chunk()]);
        assert_eq!(
            block.commands()[1].to_string(),
            "FT.CREATE idx:documentchunk ON JSON PREFIX 1 documentchunk: SCHEMA \
             $.doc_id AS doc_id TEXT $.content AS content TEXT \
             $.metadata.source AS metadata_source TEXT $.metadata.page AS metadata_page TEXT \
             $.embedding AS embedding VECTOR FLAT 6 TYPE FLOAT32 DIM 1536 DISTANCE_METRIC COSINE"
        );
    }

    #[test]
    fn drop_precedes_create_for_every_entity() {
        let other = TypeDescriptor::new("Note").with_field("title", FieldKind::Scalar);
        let block = compile(&[chunk(), other]);
        let rendered = block.to_string();

        for index in ["idx:documentchunk", "idx:note"] {
            let drop_at = rendered.find(&format!("FT.DROPINDEX {index}")).expect("drop present");
            let create_at = rendered.find(&format!("FT.CREATE {index} ")).expect("create present");
            assert!(drop_at < create_at, "{index}");
        }
        assert!(rendered.find("idx:documentchunk").unwrap() < rendered.find("idx:note").unwrap());
    }

    #[test]
    fn drop_is_emitted_even_without_indexable_fields() {
        let empty = TypeDescriptor::new("Audit").with_field("events", FieldKind::Collection);
        let block = compile(&[empty]);
        let lines = block.render_lines("");
        assert_eq!(lines[0], "FT.DROPINDEX idx:audit");
        assert_eq!(lines[1], "FT.CREATE idx:audit ON JSON PREFIX 1 audit: SCHEMA ");
    }

    #[test]
    fn render_lines_applies_prefix() {
        let block = compile(&[TypeDescriptor::new("Note").with_field("title", FieldKind::Scalar)]);
        let lines = block.render_lines("redis-cli ");
        assert_eq!(lines[0], "redis-cli FT.DROPINDEX idx:note");
        assert!(lines[1].starts_with("redis-cli FT.CREATE idx:note"));
    }

    #[test]
    fn schema_text_is_stable_across_compilations() {
        let first = compile(&[chunk()]).to_string();
        let second = compile(&[chunk()]).to_string();
        assert_eq!(first, second);
    }
}

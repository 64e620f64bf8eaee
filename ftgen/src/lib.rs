//! ftgen: RediSearch index migration generator.
//!
//! Derives search-index schemas from domain record descriptors and writes versioned,
//! idempotent drop-then-create migration scripts for a Redis Stack container.

extern crate self as ftgen;

pub mod classifier;
pub mod compiler;
pub mod config;
pub mod domain;
pub mod emitter;
pub mod errors;
pub mod generator;
pub mod layout;
pub mod source;
pub mod types;
pub mod version;

pub use classifier::{AttributeClause, VectorParams, classify};
pub use compiler::{CommandBlock, IndexCommand, SchemaFragment, compile};
pub use config::GeneratorConfig;
pub use emitter::{MigrationArtifact, ScriptEmitter, ScriptFormat};
pub use errors::*;
pub use generator::{GenerationReport, Generator, validate_migration_name};
pub use layout::OutputLayout;
pub use source::{
    DescriptorSource, FieldSpec, KindSpec, RegisteredType, RegistrySource, SearchIndexed, SourceScanner,
    StaticSource,
};
pub use types::{FieldDescriptor, FieldKind, NestedType, TypeDescriptor};
pub use version::next_version;

pub use ftgen_macros::SearchIndexed;

// Re-export inventory for auto-registration in the SearchIndexed derive
pub use inventory;

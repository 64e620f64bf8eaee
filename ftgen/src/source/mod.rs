//! Type descriptor sources.
//!
//! This module provides the read-only enumerations the generator consumes:
//! - [`RegistrySource`]: types compiled in with `#[derive(SearchIndexed)]`
//! - [`StaticSource`]: an explicit table of descriptors
//! - [`SourceScanner`]: structs deriving `SearchIndexed` found in Rust sources on disk
//!
//! Every source returns descriptors in a stable order (sorted by type name) so repeated
//! runs over an unchanged entity set produce identical schemas.

mod discovery;
mod parser;
mod registry;
mod shape;

use std::collections::BTreeMap;
use std::path::PathBuf;

pub use discovery::discover_source_files;
pub use parser::{ParsedStruct, parse_source_file};
pub use registry::{FieldSpec, KindSpec, RegisteredType, RegistrySource, SearchIndexed, registered_types};

use crate::errors::GenerateResult;
use crate::types::TypeDescriptor;

/// Read-only enumeration of the record types registered under a namespace.
pub trait DescriptorSource {
    fn descriptors(&self, namespace: &str) -> GenerateResult<Vec<TypeDescriptor>>;

    /// Short human-readable label for progress output.
    fn describe(&self) -> String;
}

/// Explicit descriptor table keyed by namespace.
#[derive(Debug, Clone, Default)]
pub struct StaticSource {
    tables: BTreeMap<String, Vec<TypeDescriptor>>,
}

impl StaticSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_type(mut self, namespace: impl Into<String>, descriptor: TypeDescriptor) -> Self {
        self.tables.entry(namespace.into()).or_default().push(descriptor);
        self
    }
}

impl DescriptorSource for StaticSource {
    fn descriptors(&self, namespace: &str) -> GenerateResult<Vec<TypeDescriptor>> {
        let mut descriptors = self.tables.get(namespace).cloned().unwrap_or_default();
        descriptors.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(descriptors)
    }

    fn describe(&self) -> String {
        "static table".to_string()
    }
}

/// Manifest built by parsing the Rust sources under a directory.
#[derive(Debug, Clone)]
pub struct SourceScanner {
    root: PathBuf,
}

impl SourceScanner {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl DescriptorSource for SourceScanner {
    fn descriptors(&self, namespace: &str) -> GenerateResult<Vec<TypeDescriptor>> {
        let mut structs = Vec::new();
        for file in discover_source_files(&self.root)? {
            structs.extend(parse_source_file(&file.path)?);
        }
        Ok(parser::build_descriptors(&structs, namespace))
    }

    fn describe(&self) -> String {
        format!("sources under {}", self.root.display())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::FieldKind;

    #[test]
    fn static_source_filters_by_namespace_and_sorts() {
        let source = StaticSource::new()
            .with_type("docs", TypeDescriptor::new("Zebra").with_field("a", FieldKind::Scalar))
            .with_type("docs", TypeDescriptor::new("Apple").with_field("b", FieldKind::Scalar))
            .with_type("billing", TypeDescriptor::new("Invoice"));

        let names: Vec<String> = source.descriptors("docs").unwrap().into_iter().map(|d| d.name).collect();
        assert_eq!(names, ["Apple", "Zebra"]);
        assert!(source.descriptors("unknown").unwrap().is_empty());
    }
}

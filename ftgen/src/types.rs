//! Language-neutral descriptions of the records that get indexed.
//!
//! Descriptors are plain data: the classifier never inspects live types. They come from
//! a [`DescriptorSource`](crate::source::DescriptorSource), either compile-time
//! registration, an explicit table, or a scan of Rust sources.

use std::fmt;

/// One domain record to be indexed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeDescriptor {
    pub name: String,
    /// Fields in declaration order. Order is preserved into the generated schema.
    pub fields: Vec<FieldDescriptor>,
}

impl TypeDescriptor {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: Vec::new(),
        }
    }

    pub fn with_field(mut self, name: impl Into<String>, kind: FieldKind) -> Self {
        self.fields.push(FieldDescriptor::new(name, kind));
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDescriptor {
    pub name: String,
    pub kind: FieldKind,
}

impl FieldDescriptor {
    pub fn new(name: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            name: name.into(),
            kind,
        }
    }
}

/// Classification of a field's declared type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldKind {
    /// Primitives and strings.
    Scalar,
    /// Fixed-width numeric arrays such as `[f32; 1536]`.
    Vector,
    /// Bulk or ordered containers: `Vec`, `VecDeque`, sets.
    Collection,
    /// A user-defined composite, carrying that type's own fields.
    Nested(NestedType),
    /// Builtin composites (maps, timestamps, identifiers) that have no index mapping.
    Opaque,
}

impl FieldKind {
    pub fn nested(type_name: impl Into<String>, fields: Vec<FieldDescriptor>) -> Self {
        FieldKind::Nested(NestedType {
            type_name: type_name.into(),
            fields,
        })
    }

    pub fn is_bulk(&self) -> bool {
        matches!(self, FieldKind::Collection | FieldKind::Vector)
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldKind::Scalar => write!(f, "scalar"),
            FieldKind::Vector => write!(f, "vector"),
            FieldKind::Collection => write!(f, "collection"),
            FieldKind::Nested(nested) => write!(f, "nested({})", nested.type_name),
            FieldKind::Opaque => write!(f, "opaque"),
        }
    }
}

/// Nested composite type. Only `fields[*].name` is consulted when flattening;
/// the sub-fields' own kinds are kept for display but never expanded further.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NestedType {
    pub type_name: String,
    pub fields: Vec<FieldDescriptor>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_keeps_declaration_order() {
        let descriptor = TypeDescriptor::new("Note")
            .with_field("title", FieldKind::Scalar)
            .with_field("tags", FieldKind::Collection)
            .with_field("body", FieldKind::Scalar);

        let names: Vec<&str> = descriptor.fields.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, ["title", "tags", "body"]);
    }

    #[test]
    fn kind_display() {
        assert_eq!(FieldKind::Scalar.to_string(), "scalar");
        assert_eq!(FieldKind::nested("Metadata", Vec::new()).to_string(), "nested(Metadata)");
        assert!(FieldKind::Vector.is_bulk());
        assert!(!FieldKind::Opaque.is_bulk());
    }
}

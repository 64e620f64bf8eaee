//! Compile-time type registration via the inventory crate.
//!
//! `#[derive(SearchIndexed)]` implements [`SearchIndexed`] and submits a
//! [`RegisteredType`] to the inventory, so every indexed type linked into the binary can
//! be enumerated without reflection or name-based loading.

use std::fmt;

use crate::errors::GenerateResult;
use crate::source::DescriptorSource;
use crate::types::{FieldDescriptor, FieldKind, TypeDescriptor};

/// Static field description emitted by the derive macro.
#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    pub name: &'static str,
    pub kind: KindSpec,
}

/// Const-constructible counterpart of [`FieldKind`]. Nested types are referenced through a
/// function pointer so self-referential records do not form a const cycle.
#[derive(Clone, Copy)]
pub enum KindSpec {
    Scalar,
    Vector,
    Collection,
    Opaque,
    Nested {
        type_name: &'static str,
        fields: fn() -> &'static [FieldSpec],
    },
}

impl fmt::Debug for KindSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KindSpec::Scalar => write!(f, "Scalar"),
            KindSpec::Vector => write!(f, "Vector"),
            KindSpec::Collection => write!(f, "Collection"),
            KindSpec::Opaque => write!(f, "Opaque"),
            KindSpec::Nested { type_name, .. } => write!(f, "Nested({type_name})"),
        }
    }
}

/// Implemented by `#[derive(SearchIndexed)]`.
pub trait SearchIndexed {
    /// Namespace from `#[search(namespace = "...")]`.
    const NAMESPACE: &'static str;
    const TYPE_NAME: &'static str;

    fn field_specs() -> &'static [FieldSpec];

    fn type_descriptor() -> TypeDescriptor {
        descriptor_from_specs(Self::TYPE_NAME, Self::field_specs())
    }
}

/// Inventory entry submitted for every derived type.
pub struct RegisteredType {
    pub namespace: &'static str,
    pub type_name: &'static str,
    pub fields: fn() -> &'static [FieldSpec],
}

impl RegisteredType {
    pub fn descriptor(&self) -> TypeDescriptor {
        descriptor_from_specs(self.type_name, (self.fields)())
    }
}

inventory::collect!(RegisteredType);

/// All types linked into the current binary.
pub fn registered_types() -> impl Iterator<Item = &'static RegisteredType> {
    inventory::iter::<RegisteredType>()
}

/// Descriptor source backed by the inventory.
#[derive(Debug, Clone, Copy, Default)]
pub struct RegistrySource;

impl DescriptorSource for RegistrySource {
    fn descriptors(&self, namespace: &str) -> GenerateResult<Vec<TypeDescriptor>> {
        let mut registered: Vec<&RegisteredType> = registered_types()
            .filter(|entry| entry.namespace == namespace)
            .collect();
        registered.sort_by_key(|entry| entry.type_name);
        Ok(registered.into_iter().map(RegisteredType::descriptor).collect())
    }

    fn describe(&self) -> String {
        "compiled-in registry".to_string()
    }
}

fn descriptor_from_specs(name: &str, specs: &[FieldSpec]) -> TypeDescriptor {
    TypeDescriptor {
        name: name.to_string(),
        fields: specs.iter().map(|spec| field_from_spec(spec, true)).collect(),
    }
}

// Nested types are expanded once; their own nested fields keep only the type name.
fn field_from_spec(spec: &FieldSpec, expand_nested: bool) -> FieldDescriptor {
    let kind = match spec.kind {
        KindSpec::Scalar => FieldKind::Scalar,
        KindSpec::Vector => FieldKind::Vector,
        KindSpec::Collection => FieldKind::Collection,
        KindSpec::Opaque => FieldKind::Opaque,
        KindSpec::Nested { type_name, fields } => {
            let sub_fields = if expand_nested {
                fields().iter().map(|sub| field_from_spec(sub, false)).collect()
            } else {
                Vec::new()
            };
            FieldKind::nested(type_name, sub_fields)
        }
    };
    FieldDescriptor::new(spec.name, kind)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node_fields() -> &'static [FieldSpec] {
        const FIELDS: &[FieldSpec] = &[
            FieldSpec {
                name: "label",
                kind: KindSpec::Scalar,
            },
            FieldSpec {
                name: "parent",
                kind: KindSpec::Nested {
                    type_name: "Node",
                    fields: node_fields,
                },
            },
        ];
        FIELDS
    }

    #[test]
    fn self_referential_specs_expand_one_level() {
        let descriptor = descriptor_from_specs("Node", node_fields());

        assert_eq!(descriptor.fields.len(), 2);
        let FieldKind::Nested(parent) = &descriptor.fields[1].kind else {
            panic!("parent should be nested");
        };
        assert_eq!(parent.type_name, "Node");
        assert_eq!(parent.fields.len(), 2);
        let FieldKind::Nested(grandparent) = &parent.fields[1].kind else {
            panic!("grandparent should be nested");
        };
        assert!(grandparent.fields.is_empty());
    }

    #[test]
    fn kind_spec_debug_names_nested_type() {
        assert_eq!(format!("{:?}", node_fields()[1].kind), "Nested(Node)");
    }
}

//! Rust source file parser using syn to extract SearchIndexed definitions.

use std::collections::HashMap;
use std::path::Path;

use log::{debug, warn};
use syn::punctuated::Punctuated;
use syn::{Attribute, Fields, Item, LitStr, Token};

use super::shape::{TypeShape, shape_of};
use crate::errors::{GenerateError, GenerateResult};
use crate::types::{FieldDescriptor, FieldKind, TypeDescriptor};

/// A struct with named fields found in a source file. Every struct is kept, not just the
/// derived ones, because nested composites are resolved against all of them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedStruct {
    pub name: String,
    /// `true` when the struct derives `SearchIndexed`.
    pub indexed: bool,
    /// From `#[search(namespace = "...")]`.
    pub namespace: Option<String>,
    pub fields: Vec<ParsedField>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedField {
    pub name: String,
    pub(crate) shape: TypeShape,
}

/// Parse a Rust file and extract every named-field struct, including those in inline modules.
pub fn parse_source_file(path: &Path) -> GenerateResult<Vec<ParsedStruct>> {
    let scan_error = |message: String| GenerateError::Scan {
        path: path.to_path_buf(),
        message,
    };

    let content = std::fs::read_to_string(path).map_err(|err| scan_error(err.to_string()))?;
    let syntax = syn::parse_file(&content).map_err(|err| scan_error(err.to_string()))?;

    let mut structs = Vec::new();
    collect_structs(&syntax.items, &mut structs).map_err(|err| scan_error(err.to_string()))?;
    Ok(structs)
}

fn collect_structs(items: &[Item], out: &mut Vec<ParsedStruct>) -> syn::Result<()> {
    for item in items {
        match item {
            Item::Struct(item_struct) => {
                let Fields::Named(named) = &item_struct.fields else {
                    continue;
                };

                let mut fields = Vec::new();
                for field in &named.named {
                    let Some(ident) = &field.ident else { continue };
                    let shape = match kind_override(&field.attrs)? {
                        Some(shape) => shape,
                        None => shape_of(&field.ty),
                    };
                    fields.push(ParsedField {
                        name: syn::ext::IdentExt::unraw(ident).to_string(),
                        shape,
                    });
                }

                out.push(ParsedStruct {
                    name: item_struct.ident.to_string(),
                    indexed: has_search_indexed_derive(&item_struct.attrs),
                    namespace: namespace_attr(&item_struct.attrs)?,
                    fields,
                });
            }
            Item::Mod(module) => {
                if let Some((_, inner)) = &module.content {
                    collect_structs(inner, out)?;
                }
            }
            _ => {}
        }
    }
    Ok(())
}

/// Check if attributes include derive(SearchIndexed)
fn has_search_indexed_derive(attrs: &[Attribute]) -> bool {
    attrs
        .iter()
        .filter(|attr| attr.path().is_ident("derive"))
        .filter_map(|attr| {
            attr.parse_args_with(Punctuated::<syn::Path, Token![,]>::parse_terminated)
                .ok()
        })
        .any(|paths| {
            paths
                .iter()
                .any(|path| path.segments.last().is_some_and(|segment| segment.ident == "SearchIndexed"))
        })
}

fn namespace_attr(attrs: &[Attribute]) -> syn::Result<Option<String>> {
    let mut namespace = None;
    for attr in attrs.iter().filter(|attr| attr.path().is_ident("search")) {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("namespace") {
                let value: LitStr = meta.value()?.parse()?;
                namespace = Some(value.value());
                Ok(())
            } else {
                Err(meta.error("unknown container attribute, expected `namespace`"))
            }
        })?;
    }
    Ok(namespace)
}

fn kind_override(attrs: &[Attribute]) -> syn::Result<Option<TypeShape>> {
    let mut shape = None;
    for attr in attrs.iter().filter(|attr| attr.path().is_ident("search")) {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("kind") {
                let value: LitStr = meta.value()?.parse()?;
                shape = Some(TypeShape::from_override(&value.value()).ok_or_else(|| {
                    syn::Error::new(
                        value.span(),
                        "unknown kind, expected one of `scalar`, `vector`, `collection`, `opaque`",
                    )
                })?);
                Ok(())
            } else {
                Err(meta.error("unknown field attribute, expected `kind`"))
            }
        })?;
    }
    Ok(shape)
}

/// Build descriptors for the indexed structs in `namespace`, sorted by type name.
pub(crate) fn build_descriptors(structs: &[ParsedStruct], namespace: &str) -> Vec<TypeDescriptor> {
    let mut by_name: HashMap<&str, &ParsedStruct> = HashMap::new();
    for parsed in structs {
        by_name.entry(parsed.name.as_str()).or_insert(parsed);
    }

    let mut indexed: Vec<&ParsedStruct> = structs
        .iter()
        .filter(|parsed| parsed.indexed)
        .filter(|parsed| match &parsed.namespace {
            Some(ns) => ns == namespace,
            None => {
                warn!("{} derives SearchIndexed without a namespace; skipping", parsed.name);
                false
            }
        })
        .collect();
    indexed.sort_by(|a, b| a.name.cmp(&b.name));
    indexed.dedup_by(|a, b| a.name == b.name);

    indexed
        .into_iter()
        .map(|parsed| TypeDescriptor {
            name: parsed.name.clone(),
            fields: parsed
                .fields
                .iter()
                .map(|field| FieldDescriptor::new(&field.name, resolve(&field.shape, &by_name, true)))
                .collect(),
        })
        .collect()
}

fn resolve(shape: &TypeShape, by_name: &HashMap<&str, &ParsedStruct>, expand_nested: bool) -> FieldKind {
    match shape {
        TypeShape::Scalar => FieldKind::Scalar,
        TypeShape::Vector => FieldKind::Vector,
        TypeShape::Collection => FieldKind::Collection,
        TypeShape::Opaque => FieldKind::Opaque,
        TypeShape::Composite(type_name) => match by_name.get(type_name.as_str()) {
            Some(nested) if expand_nested => FieldKind::nested(
                type_name.as_str(),
                nested
                    .fields
                    .iter()
                    .map(|sub| FieldDescriptor::new(&sub.name, resolve(&sub.shape, by_name, false)))
                    .collect(),
            ),
            Some(_) => FieldKind::nested(type_name.as_str(), Vec::new()),
            None => {
                debug!("composite type {type_name} not found in scanned sources; treating as opaque");
                FieldKind::Opaque
            }
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const SOURCE: &str = r#"
        use serde::{Deserialize, Serialize};

        #[derive(Debug, Serialize, Deserialize, ftgen::SearchIndexed)]
        #[search(namespace = "docs")]
        pub struct Article {
            pub title: String,
            pub tags: Vec<String>,
            pub author: Author,
            pub published: Option<chrono::DateTime<chrono::Utc>>,
            pub source: External,
            #[search(kind = "scalar")]
            pub status: Status,
        }

        pub struct Author {
            pub name: String,
            pub address: Address,
        }

        mod inner {
            #[derive(SearchIndexed)]
            #[search(namespace = "other")]
            pub struct Hidden {
                pub x: u32,
            }
        }

        pub struct Tuple(u32);
    "#;

    fn parse(src: &str) -> Vec<ParsedStruct> {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("model.rs");
        std::fs::write(&path, src).unwrap();
        parse_source_file(&path).unwrap()
    }

    #[test]
    fn test_parses_named_structs_including_inline_modules() {
        let structs = parse(SOURCE);
        let names: Vec<&str> = structs.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, ["Article", "Author", "Hidden"]);
        assert!(structs[0].indexed);
        assert!(!structs[1].indexed);
        assert_eq!(structs[0].namespace.as_deref(), Some("docs"));
        assert_eq!(structs[2].namespace.as_deref(), Some("other"));
    }

    #[test]
    fn test_builds_descriptor_with_one_level_nesting() {
        let descriptors = build_descriptors(&parse(SOURCE), "docs");
        assert_eq!(descriptors.len(), 1);

        let article = &descriptors[0];
        let kinds: Vec<String> = article.fields.iter().map(|f| f.kind.to_string()).collect();
        assert_eq!(
            kinds,
            ["scalar", "collection", "nested(Author)", "opaque", "opaque", "scalar"]
        );

        let FieldKind::Nested(author) = &article.fields[2].kind else {
            panic!("author should be nested");
        };
        let sub: Vec<&str> = author.fields.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(sub, ["name", "address"]);
    }

    #[test]
    fn test_namespace_filter() {
        let descriptors = build_descriptors(&parse(SOURCE), "other");
        assert_eq!(descriptors.len(), 1);
        assert_eq!(descriptors[0].name, "Hidden");
        assert!(build_descriptors(&parse(SOURCE), "missing").is_empty());
    }

    #[test]
    fn test_invalid_kind_override_is_scan_error() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("bad.rs");
        std::fs::write(
            &path,
            "#[derive(SearchIndexed)] #[search(namespace = \"d\")] struct A { #[search(kind = \"nested\")] a: B }",
        )
        .unwrap();
        assert!(matches!(parse_source_file(&path), Err(GenerateError::Scan { .. })));
    }

    #[test]
    fn test_syntax_error_is_scan_error() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("broken.rs");
        std::fs::write(&path, "struct {").unwrap();
        assert!(matches!(parse_source_file(&path), Err(GenerateError::Scan { .. })));
    }
}

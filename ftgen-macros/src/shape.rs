use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::{GenericArgument, PathArguments, Type, TypePath};

/// Index type-kind of a field's declared type.
#[derive(Clone)]
pub(crate) enum FieldShape {
    Scalar,
    Vector,
    Collection,
    Opaque,
    /// User composite; its own `SearchIndexed` impl supplies the sub-fields.
    Nested(TypePath),
}

impl FieldShape {
    pub(crate) fn from_override(value: &str) -> Option<Self> {
        match value {
            "scalar" => Some(FieldShape::Scalar),
            "vector" => Some(FieldShape::Vector),
            "collection" => Some(FieldShape::Collection),
            "opaque" => Some(FieldShape::Opaque),
            _ => None,
        }
    }

    pub(crate) fn to_tokens(&self) -> TokenStream2 {
        match self {
            FieldShape::Scalar => quote! { ::ftgen::KindSpec::Scalar },
            FieldShape::Vector => quote! { ::ftgen::KindSpec::Vector },
            FieldShape::Collection => quote! { ::ftgen::KindSpec::Collection },
            FieldShape::Opaque => quote! { ::ftgen::KindSpec::Opaque },
            FieldShape::Nested(path) => {
                let type_name = path
                    .path
                    .segments
                    .last()
                    .map(|segment| segment.ident.to_string())
                    .unwrap_or_default();
                quote! {
                    ::ftgen::KindSpec::Nested {
                        type_name: #type_name,
                        fields: <#path as ::ftgen::SearchIndexed>::field_specs,
                    }
                }
            }
        }
    }
}

const WRAPPERS: &[&str] = &["Option", "Box", "Rc", "Arc", "Cow"];

const SCALARS: &[&str] = &[
    "bool", "char", "i8", "i16", "i32", "i64", "i128", "isize", "u8", "u16", "u32", "u64", "u128", "usize", "f32",
    "f64", "String", "str",
];

const COLLECTIONS: &[&str] = &[
    "Vec",
    "VecDeque",
    "LinkedList",
    "HashSet",
    "BTreeSet",
    "BinaryHeap",
    "IndexSet",
    "SmallVec",
];

const BUILTIN_COMPOSITES: &[&str] = &[
    "HashMap",
    "BTreeMap",
    "IndexMap",
    "DateTime",
    "NaiveDate",
    "NaiveDateTime",
    "NaiveTime",
    "Duration",
    "SystemTime",
    "Instant",
    "Uuid",
    "PathBuf",
    "Path",
    "Value",
    "Url",
    "Decimal",
];

const BUILTIN_ROOTS: &[&str] = &["std", "core", "alloc", "chrono", "serde_json", "uuid", "url"];

pub(crate) fn shape_of(ty: &Type) -> FieldShape {
    match ty {
        Type::Reference(reference) => shape_of(&reference.elem),
        Type::Paren(paren) => shape_of(&paren.elem),
        Type::Group(group) => shape_of(&group.elem),
        Type::Array(array) => {
            if is_numeric(&array.elem) {
                FieldShape::Vector
            } else {
                FieldShape::Collection
            }
        }
        Type::Slice(_) => FieldShape::Collection,
        Type::Path(type_path) if type_path.qself.is_none() => {
            let path = &type_path.path;
            let Some(last) = path.segments.last() else {
                return FieldShape::Opaque;
            };
            let ident = last.ident.to_string();

            if WRAPPERS.contains(&ident.as_str()) {
                return match first_type_argument(&last.arguments) {
                    Some(inner) => shape_of(inner),
                    None => FieldShape::Opaque,
                };
            }
            if SCALARS.contains(&ident.as_str()) {
                return FieldShape::Scalar;
            }
            if COLLECTIONS.contains(&ident.as_str()) {
                return FieldShape::Collection;
            }

            let root_is_builtin = path.segments.len() > 1
                && path
                    .segments
                    .first()
                    .is_some_and(|first| BUILTIN_ROOTS.contains(&first.ident.to_string().as_str()));
            if root_is_builtin || BUILTIN_COMPOSITES.contains(&ident.as_str()) {
                return FieldShape::Opaque;
            }

            FieldShape::Nested(type_path.clone())
        }
        _ => FieldShape::Opaque,
    }
}

fn first_type_argument(arguments: &PathArguments) -> Option<&Type> {
    let PathArguments::AngleBracketed(angle) = arguments else {
        return None;
    };
    angle.args.iter().find_map(|arg| match arg {
        GenericArgument::Type(ty) => Some(ty),
        _ => None,
    })
}

fn is_numeric(ty: &Type) -> bool {
    let Type::Path(type_path) = ty else {
        return false;
    };
    type_path.path.segments.last().is_some_and(|segment| {
        matches!(
            segment.ident.to_string().as_str(),
            "i8" | "i16" | "i32" | "i64" | "u8" | "u16" | "u32" | "u64" | "f32" | "f64"
        )
    })
}

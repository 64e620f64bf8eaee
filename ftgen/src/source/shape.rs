//! Classification of declared Rust types into index type-kinds.

use syn::{GenericArgument, PathArguments, Type};

/// Kind of a declared type before nested composites are resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum TypeShape {
    Scalar,
    Vector,
    Collection,
    Opaque,
    /// User type, identified by the last path segment.
    Composite(String),
}

impl TypeShape {
    /// Parse a `#[search(kind = "...")]` override.
    pub(crate) fn from_override(value: &str) -> Option<Self> {
        match value {
            "scalar" => Some(TypeShape::Scalar),
            "vector" => Some(TypeShape::Vector),
            "collection" => Some(TypeShape::Collection),
            "opaque" => Some(TypeShape::Opaque),
            _ => None,
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

/// Crates whose types are treated as builtin regardless of name.
const BUILTIN_ROOTS: &[&str] = &["std", "core", "alloc", "chrono", "serde_json", "uuid", "url"];

pub(crate) fn shape_of(ty: &Type) -> TypeShape {
    match ty {
        Type::Reference(reference) => shape_of(&reference.elem),
        Type::Paren(paren) => shape_of(&paren.elem),
        Type::Group(group) => shape_of(&group.elem),
        Type::Array(array) => {
            if is_numeric(&array.elem) {
                TypeShape::Vector
            } else {
                TypeShape::Collection
            }
        }
        Type::Slice(_) => TypeShape::Collection,
        Type::Path(type_path) if type_path.qself.is_none() => {
            let path = &type_path.path;
            let Some(last) = path.segments.last() else {
                return TypeShape::Opaque;
            };
            let ident = last.ident.to_string();

            if WRAPPERS.contains(&ident.as_str()) {
                return match first_type_argument(&last.arguments) {
                    Some(inner) => shape_of(inner),
                    None => TypeShape::Opaque,
                };
            }
            if SCALARS.contains(&ident.as_str()) {
                return TypeShape::Scalar;
            }
            if COLLECTIONS.contains(&ident.as_str()) {
                return TypeShape::Collection;
            }

            let root_is_builtin = path.segments.len() > 1
                && path
                    .segments
                    .first()
                    .is_some_and(|first| BUILTIN_ROOTS.contains(&first.ident.to_string().as_str()));
            if root_is_builtin || BUILTIN_COMPOSITES.contains(&ident.as_str()) {
                return TypeShape::Opaque;
            }

            TypeShape::Composite(ident)
        }
        _ => TypeShape::Opaque,
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

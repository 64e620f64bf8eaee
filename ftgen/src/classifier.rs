//! Field classification policy: one field descriptor in, zero or more RediSearch
//! schema clauses out.
//!
//! Rules are evaluated in order and the first match wins:
//!
//! | Rule | Field                                  | Clauses                                   |
//! |------|----------------------------------------|-------------------------------------------|
//! | 1    | named `embedding` (any case)           | one `VECTOR` clause, fixed parameters     |
//! | 2    | collection or vector kind              | none                                      |
//! | 3    | scalar                                 | `$.f AS f TEXT`                           |
//! | 4    | nested composite                       | `$.f.s AS f_s TEXT` per sub-field `s`     |
//! | 5    | anything else                          | none                                      |
//!
//! Collections other than `embedding` are never indexed, and nested composites are
//! flattened exactly one level. Both are deliberate policy.

use std::fmt;

use log::debug;

use crate::types::{FieldDescriptor, FieldKind};

/// Name that triggers the vector clause, compared ignoring ASCII case.
pub const EMBEDDING_FIELD: &str = "embedding";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VectorAlgorithm {
    Flat,
}

impl VectorAlgorithm {
    #[inline]
    pub const fn as_str(self) -> &'static str {
        match self {
            VectorAlgorithm::Flat => "FLAT",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VectorElementType {
    Float32,
}

impl VectorElementType {
    #[inline]
    pub const fn as_str(self) -> &'static str {
        match self {
            VectorElementType::Float32 => "FLOAT32",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DistanceMetric {
    Cosine,
}

impl DistanceMetric {
    #[inline]
    pub const fn as_str(self) -> &'static str {
        match self {
            DistanceMetric::Cosine => "COSINE",
        }
    }
}

/// Parameters of the vector index attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VectorParams {
    pub algorithm: VectorAlgorithm,
    pub element_type: VectorElementType,
    pub dim: u32,
    pub metric: DistanceMetric,
}

impl VectorParams {
    /// The only vector layout the generator emits.
    pub const EMBEDDING: VectorParams = VectorParams {
        algorithm: VectorAlgorithm::Flat,
        element_type: VectorElementType::Float32,
        dim: 1536,
        metric: DistanceMetric::Cosine,
    };

    /// Count of attribute tokens following the algorithm name (`TYPE x DIM y DISTANCE_METRIC z`).
    const ATTRIBUTE_COUNT: usize = 6;
}

impl fmt::Display for VectorParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} TYPE {} DIM {} DISTANCE_METRIC {}",
            self.algorithm.as_str(),
            Self::ATTRIBUTE_COUNT,
            self.element_type.as_str(),
            self.dim,
            self.metric.as_str()
        )
    }
}

/// A single rendered schema-field declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttributeClause {
    Text { path: String, alias: String },
    Vector { path: String, alias: String, params: VectorParams },
}

impl AttributeClause {
    pub fn text(path: impl Into<String>, alias: impl Into<String>) -> Self {
        AttributeClause::Text {
            path: path.into(),
            alias: alias.into(),
        }
    }

    pub fn alias(&self) -> &str {
        match self {
            AttributeClause::Text { alias, .. } | AttributeClause::Vector { alias, .. } => alias,
        }
    }

    pub fn path(&self) -> &str {
        match self {
            AttributeClause::Text { path, .. } | AttributeClause::Vector { path, .. } => path,
        }
    }

    pub fn is_vector(&self) -> bool {
        matches!(self, AttributeClause::Vector { .. })
    }
}

impl fmt::Display for AttributeClause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttributeClause::Text { path, alias } => write!(f, "{path} AS {alias} TEXT"),
            AttributeClause::Vector { path, alias, params } => write!(f, "{path} AS {alias} VECTOR {params}"),
        }
    }
}

/// Map one field to its schema clauses. Never fails; unmatched fields yield nothing.
pub fn classify(field: &FieldDescriptor) -> Vec<AttributeClause> {
    let name = field.name.as_str();

    if name.eq_ignore_ascii_case(EMBEDDING_FIELD) {
        return vec![AttributeClause::Vector {
            path: format!("$.{name}"),
            alias: name.to_string(),
            params: VectorParams::EMBEDDING,
        }];
    }

    match &field.kind {
        kind if kind.is_bulk() => {
            debug!("skipping {kind} field '{name}'");
            Vec::new()
        }
        FieldKind::Scalar => vec![AttributeClause::text(format!("$.{name}"), name)],
        FieldKind::Nested(nested) => nested
            .fields
            .iter()
            .map(|sub| AttributeClause::text(format!("$.{name}.{}", sub.name), format!("{name}_{}", sub.name)))
            .collect(),
        kind => {
            debug!("no index mapping for {kind} field '{name}'");
            Vec::new()
        }
    }
}

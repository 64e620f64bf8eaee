use std::borrow::Cow;
use std::collections::{BTreeMap, HashMap, HashSet, VecDeque};
use std::path::PathBuf;
use std::rc::Rc;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, NaiveDate, Utc};
use ftgen::SearchIndexed;

#[derive(SearchIndexed)]
#[search(namespace = "kind_matrix")]
pub struct Leaf {
    pub code: char,
    pub weight: f64,
}

#[derive(SearchIndexed)]
#[search(namespace = "kind_matrix")]
pub struct Inner {
    pub label: String,
    pub leaf: Leaf,
    pub leaves: Vec<Leaf>,
}

#[derive(SearchIndexed)]
#[search(namespace = "kind_matrix")]
pub struct Outer {
    pub title: String,
    pub subtitle: Option<String>,
    pub boxed: Box<u64>,
    pub shared: Arc<String>,
    pub counted: Rc<i32>,
    pub borrowed: Cow<'static, str>,
    pub literal: &'static str,
    pub flag: bool,
    pub initial: char,
    pub wide: u128,
    pub raw_vector: [f32; 8],
    pub digest: [u8; 16],
    pub labels: [String; 2],
    pub sliced: Box<[f32]>,
    pub embedding: Vec<f32>,
    pub history: VecDeque<String>,
    pub tags: HashSet<String>,
    pub maybe_tags: Option<Vec<String>>,
    pub attributes: HashMap<String, String>,
    pub ordered: BTreeMap<String, u32>,
    pub created_at: DateTime<Utc>,
    pub born_on: NaiveDate,
    pub qualified_time: chrono::DateTime<chrono::Utc>,
    pub payload: serde_json::Value,
    pub location: PathBuf,
    pub ttl: Duration,
    pub peer: std::net::IpAddr,
    pub pair: (u32, u32),
    #[search(kind = "scalar")]
    pub scored: HashMap<String, u8>,
    #[search(kind = "collection")]
    pub grouped: BTreeMap<String, Vec<String>>,
    pub inner: Inner,
    pub maybe_inner: Option<Box<Inner>>,
    pub r#type: String,
}

use std::fmt;
use std::sync::Arc;

/// One step in a response position: a field name or a list index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathSegment {
    Field(String),
    Index(usize),
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathSegment::Field(name) => f.write_str(name),
            PathSegment::Index(index) => write!(f, "{}", index),
        }
    }
}

impl From<&str> for PathSegment {
    fn from(name: &str) -> Self {
        PathSegment::Field(name.to_string())
    }
}

impl From<usize> for PathSegment {
    fn from(index: usize) -> Self {
        PathSegment::Index(index)
    }
}

/// A field's position in the response tree, as a reverse-linked chain.
///
/// The execution engine builds one node per resolved field, pointing at the
/// node of the enclosing field. Nodes are immutable and shared via `Arc`, so
/// sibling fields can hang off the same parent chain while their resolutions
/// interleave.
#[derive(Debug)]
pub struct ResponsePath {
    key: PathSegment,
    prev: Option<Arc<ResponsePath>>,
}

impl ResponsePath {
    /// A root position (no parent).
    pub fn root(key: impl Into<PathSegment>) -> Arc<Self> {
        Arc::new(ResponsePath {
            key: key.into(),
            prev: None,
        })
    }

    /// The position of `key` nested under `self`.
    pub fn child(self: &Arc<Self>, key: impl Into<PathSegment>) -> Arc<Self> {
        Arc::new(ResponsePath {
            key: key.into(),
            prev: Some(self.clone()),
        })
    }

    pub fn key(&self) -> &PathSegment {
        &self.key
    }

    /// Dot-joined segments from root to leaf, e.g. `"parent.name"` or
    /// `"items.0.name"`.
    pub fn field_path(&self) -> String {
        let mut segments = vec![self.key.to_string()];
        let mut current = self.prev.as_deref();
        while let Some(node) = current {
            segments.push(node.key.to_string());
            current = node.prev.as_deref();
        }
        segments.reverse();
        segments.join(".")
    }
}

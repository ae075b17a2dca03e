//! JSON path representation for locating values in nested documents.
//!
//! This module provides [`JsonPath`] and [`PathSegment`]. A path renders as
//! `$`, `$.user`, `$.users[0].email` and is used as the location prefix of
//! every validation message.

use std::fmt::{self, Display};
use std::sync::Arc;

/// A segment of a JSON path.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PathSegment {
    /// An object key access (e.g., `.user`, `.email`)
    Key(String),
    /// An array index access (e.g., `[0]`, `[42]`)
    Index(usize),
}

impl PathSegment {
    /// Creates a new key segment.
    pub fn key(name: impl Into<String>) -> Self {
        PathSegment::Key(name.into())
    }

    /// Creates a new index segment.
    pub fn index(idx: usize) -> Self {
        PathSegment::Index(idx)
    }
}

#[derive(Debug, PartialEq, Eq, Hash)]
struct PathNode {
    parent: JsonPath,
    segment: PathSegment,
}

/// An immutable path to a value in a JSON document.
///
/// Paths are linked lists of segments: extending a path allocates one node
/// and shares the whole prefix with the receiver, so building the path for
/// every level of a recursive walk stays cheap.
///
/// # Example
///
/// ```rust
/// use transposer::JsonPath;
///
/// let path = JsonPath::root()
///     .with_object_key("users")
///     .with_array_key(0)
///     .with_object_key("email");
///
/// assert_eq!(path.to_string(), "$.users[0].email");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct JsonPath {
    node: Option<Arc<PathNode>>,
}

impl JsonPath {
    /// Creates the path of the document root, rendered as `$`.
    pub fn root() -> Self {
        Self::default()
    }

    /// Returns a new path with an object key segment appended.
    ///
    /// The receiver is left untouched.
    pub fn with_object_key(&self, key: impl Into<String>) -> Self {
        self.with_segment(PathSegment::Key(key.into()))
    }

    /// Returns a new path with an array index segment appended.
    ///
    /// The receiver is left untouched.
    pub fn with_array_key(&self, index: usize) -> Self {
        self.with_segment(PathSegment::Index(index))
    }

    fn with_segment(&self, segment: PathSegment) -> Self {
        Self {
            node: Some(Arc::new(PathNode {
                parent: self.clone(),
                segment,
            })),
        }
    }

    /// Returns true if this is the root path (no segments).
    pub fn is_root(&self) -> bool {
        self.node.is_none()
    }

    /// Returns the number of segments in this path.
    pub fn len(&self) -> usize {
        let mut len = 0;
        let mut current = self;
        while let Some(node) = &current.node {
            len += 1;
            current = &node.parent;
        }
        len
    }

    /// Returns true if this path has no segments.
    pub fn is_empty(&self) -> bool {
        self.is_root()
    }

    /// Returns the segments from the root down to the last one.
    pub fn segments(&self) -> Vec<&PathSegment> {
        let mut segments = Vec::with_capacity(self.len());
        let mut current = self;
        while let Some(node) = &current.node {
            segments.push(&node.segment);
            current = &node.parent;
        }
        segments.reverse();
        segments
    }

    /// Returns the parent path, or None if this is root.
    pub fn parent(&self) -> Option<&Self> {
        self.node.as_ref().map(|node| &node.parent)
    }

    /// Returns the last segment, or None if this is root.
    pub fn last(&self) -> Option<&PathSegment> {
        self.node.as_ref().map(|node| &node.segment)
    }
}

impl Display for JsonPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.node {
            None => write!(f, "$"),
            Some(node) => {
                write!(f, "{}", node.parent)?;
                match &node.segment {
                    PathSegment::Key(key) => write!(f, ".{}", key),
                    PathSegment::Index(idx) => write!(f, "[{}]", idx),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_path() {
        let path = JsonPath::root();
        assert!(path.is_root());
        assert!(path.is_empty());
        assert_eq!(path.len(), 0);
        assert_eq!(path.to_string(), "$");
    }

    #[test]
    fn test_single_key() {
        let path = JsonPath::root().with_object_key("user");
        assert_eq!(path.to_string(), "$.user");
        assert_eq!(path.len(), 1);
    }

    #[test]
    fn test_single_index() {
        let path = JsonPath::root().with_array_key(0);
        assert_eq!(path.to_string(), "$[0]");
    }

    #[test]
    fn test_deeply_nested() {
        let path = JsonPath::root()
            .with_object_key("body")
            .with_object_key("data")
            .with_array_key(42)
            .with_object_key("items")
            .with_array_key(0)
            .with_object_key("name");
        assert_eq!(path.to_string(), "$.body.data[42].items[0].name");
        assert_eq!(path.len(), 6);
    }

    #[test]
    fn test_path_immutability() {
        let base = JsonPath::root().with_object_key("users");
        let path_a = base.with_array_key(0);
        let path_b = base.with_array_key(1);

        assert_eq!(base.to_string(), "$.users");
        assert_eq!(path_a.to_string(), "$.users[0]");
        assert_eq!(path_b.to_string(), "$.users[1]");
    }

    #[test]
    fn test_extensions_share_prefix() {
        let base = JsonPath::root().with_object_key("users");
        let child = base.with_array_key(3);
        let shared = child.parent().unwrap();
        assert!(Arc::ptr_eq(
            base.node.as_ref().unwrap(),
            shared.node.as_ref().unwrap()
        ));
        assert_eq!(shared, &base);
    }

    #[test]
    fn test_parent_path() {
        let path = JsonPath::root()
            .with_object_key("users")
            .with_array_key(0)
            .with_object_key("email");

        let parent = path.parent().unwrap();
        assert_eq!(parent.to_string(), "$.users[0]");

        let grandparent = parent.parent().unwrap();
        assert_eq!(grandparent.to_string(), "$.users");

        let root = grandparent.parent().unwrap();
        assert!(root.is_root());
        assert!(root.parent().is_none());
    }

    #[test]
    fn test_last_segment() {
        let path = JsonPath::root().with_object_key("users").with_array_key(0);
        assert_eq!(path.last(), Some(&PathSegment::Index(0)));
        assert_eq!(JsonPath::root().last(), None);
    }

    #[test]
    fn test_segments_in_root_order() {
        let path = JsonPath::root()
            .with_object_key("a")
            .with_array_key(1)
            .with_object_key("b");

        let segments = path.segments();
        assert_eq!(segments.len(), 3);
        assert_eq!(segments[0], &PathSegment::key("a"));
        assert_eq!(segments[1], &PathSegment::index(1));
        assert_eq!(segments[2], &PathSegment::key("b"));
    }

    #[test]
    fn test_equality() {
        let path1 = JsonPath::root().with_object_key("a").with_array_key(0);
        let path2 = JsonPath::root().with_object_key("a").with_array_key(0);
        let path3 = JsonPath::root().with_object_key("a").with_array_key(1);

        assert_eq!(path1, path2);
        assert_ne!(path1, path3);
    }
}

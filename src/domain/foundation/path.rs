//! Location of a value inside a snapshot, used in codec error reports.

use std::fmt;

/// One step into a nested value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathSegment {
    Key(String),
    Index(usize),
}

/// Path from the snapshot root to a nested value.
///
/// Rendered as a JSON-pointer-like string, e.g. `/lre/uia/tags/2`.
/// The root renders as `/`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValuePath(Vec<PathSegment>);

impl ValuePath {
    /// Creates an empty (root) path.
    pub fn root() -> Self {
        Self(Vec::new())
    }

    /// Returns a new path extended with a mapping key.
    pub fn key(&self, key: impl Into<String>) -> Self {
        let mut segments = self.0.clone();
        segments.push(PathSegment::Key(key.into()));
        Self(segments)
    }

    /// Returns a new path extended with a sequence index.
    pub fn index(&self, index: usize) -> Self {
        let mut segments = self.0.clone();
        segments.push(PathSegment::Index(index));
        Self(segments)
    }

    /// Returns `other` re-rooted under this path.
    pub fn join(&self, other: &ValuePath) -> Self {
        let mut segments = self.0.clone();
        segments.extend(other.0.iter().cloned());
        Self(segments)
    }

    pub fn segments(&self) -> &[PathSegment] {
        &self.0
    }

    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for ValuePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return write!(f, "/");
        }
        for segment in &self.0 {
            match segment {
                // JSON pointer escaping
                PathSegment::Key(key) => {
                    write!(f, "/{}", key.replace('~', "~0").replace('/', "~1"))?
                }
                PathSegment::Index(index) => write!(f, "/{}", index)?,
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn root_displays_as_slash() {
        assert_eq!(ValuePath::root().to_string(), "/");
        assert!(ValuePath::root().is_root());
    }

    #[test]
    fn nested_path_displays_keys_and_indices() {
        let path = ValuePath::root().key("lre").key("uia").key("tags").index(2);
        assert_eq!(path.to_string(), "/lre/uia/tags/2");
        assert_eq!(path.segments().len(), 4);
    }

    #[test]
    fn extending_does_not_mutate_parent() {
        let parent = ValuePath::root().key("lui");
        let _child = parent.key("ei");
        assert_eq!(parent.to_string(), "/lui");
    }

    #[test]
    fn join_reroots_relative_path() {
        let base = ValuePath::root().key("lui").key("ei");
        let relative = ValuePath::root().key("plan").index(0);
        assert_eq!(base.join(&relative).to_string(), "/lui/ei/plan/0");
    }

    #[test]
    fn keys_with_slashes_are_escaped() {
        let path = ValuePath::root().key("a/b").key("c~d");
        assert_eq!(path.to_string(), "/a~1b/c~0d");
    }
}

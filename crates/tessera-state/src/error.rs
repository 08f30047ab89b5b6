//! Error types for tessera-state operations.

use crate::{Path, Seg, StateValue};
use thiserror::Error;

/// Result type alias for tessera-state operations.
pub type StateResult<T> = Result<T, StateError>;

/// Errors that can occur while patching a state tree.
#[derive(Debug, Error)]
pub enum StateError {
    /// The target node and the patch do not share a category, or the target
    /// node has no category at all (it is neither text, sequence nor mapping).
    #[error("source and destination types do not match at {path}: cannot patch {target} with {patch}")]
    ShapeMismatch {
        /// The path of the target node.
        path: Path,
        /// Type name of the target node.
        target: &'static str,
        /// Type name of the patch value.
        patch: &'static str,
    },

    /// A path segment cannot address the node it runs into.
    #[error("cannot address segment `{segment}` inside {found} at {path}")]
    PathConflict {
        /// The full path being written.
        path: Path,
        /// The offending segment.
        segment: Seg,
        /// Type name of the node the segment was applied to.
        found: &'static str,
    },

    /// A sequence would grow past the longest length a tree can hold.
    #[error("index {index} is out of range at {path}")]
    IndexOutOfRange {
        /// The path of the sequence, or of the slot being written.
        path: Path,
        /// The requested index or insertion offset.
        index: usize,
    },

    /// An intermediate node is missing and creation was not requested.
    #[error("path not found: {path}")]
    PathNotFound {
        /// The path that was not found.
        path: Path,
    },

    /// Deep copy round trip failed.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl StateError {
    /// Create a shape mismatch error rooted at `path`.
    #[inline]
    pub fn shape_mismatch(path: Path, target: &'static str, patch: &'static str) -> Self {
        StateError::ShapeMismatch {
            path,
            target,
            patch,
        }
    }

    /// Create a path conflict error.
    #[inline]
    pub fn path_conflict(path: Path, segment: Seg, found: &'static str) -> Self {
        StateError::PathConflict {
            path,
            segment,
            found,
        }
    }

    /// Create an index out of range error.
    #[inline]
    pub fn index_out_of_range(path: Path, index: usize) -> Self {
        StateError::IndexOutOfRange { path, index }
    }

    /// Create a path not found error.
    #[inline]
    pub fn path_not_found(path: Path) -> Self {
        StateError::PathNotFound { path }
    }

    /// Add a path prefix to this error.
    ///
    /// The merge primitive reports mismatches relative to the node it was
    /// handed; the path walker re-roots them at the node's full path.
    pub fn with_prefix(self, prefix: &Path) -> Self {
        match self {
            StateError::ShapeMismatch {
                path,
                target,
                patch,
            } => StateError::ShapeMismatch {
                path: prefix.join(&path),
                target,
                patch,
            },
            StateError::PathConflict {
                path,
                segment,
                found,
            } => StateError::PathConflict {
                path: prefix.join(&path),
                segment,
                found,
            },
            StateError::IndexOutOfRange { path, index } => StateError::IndexOutOfRange {
                path: prefix.join(&path),
                index,
            },
            StateError::PathNotFound { path } => StateError::PathNotFound {
                path: prefix.join(&path),
            },
            other => other,
        }
    }
}

/// Get the type name of a state value.
#[inline]
pub fn value_type_name(v: &StateValue) -> &'static str {
    match v {
        StateValue::Null => "null",
        StateValue::Bool(_) => "boolean",
        StateValue::Number(_) => "number",
        StateValue::Text(_) => "string",
        StateValue::Seq(_) => "array",
        StateValue::Map(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::path;

    #[test]
    fn test_error_display() {
        let err = StateError::shape_mismatch(path!("users", 0), "array", "object");
        let message = err.to_string();
        assert!(message.contains("source and destination types do not match"));
        assert!(message.contains("users.0"));
    }

    #[test]
    fn test_with_prefix_reroots_mismatch() {
        let err = StateError::shape_mismatch(Path::root(), "string", "array")
            .with_prefix(&path!("a", "b"));
        match err {
            StateError::ShapeMismatch { path, .. } => assert_eq!(path, path!("a", "b")),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_with_prefix_reroots_index_out_of_range() {
        let err = StateError::index_out_of_range(Path::root(), 7).with_prefix(&path!("list"));
        assert!(matches!(err, StateError::IndexOutOfRange { ref path, index: 7 } if *path == path!("list")));
        assert_eq!(err.to_string(), "index 7 is out of range at list");
    }

    #[test]
    fn test_value_type_name() {
        use serde_json::json;

        let name = |v: serde_json::Value| value_type_name(&StateValue::from(v));
        assert_eq!(name(json!(null)), "null");
        assert_eq!(name(json!(true)), "boolean");
        assert_eq!(name(json!(42)), "number");
        assert_eq!(name(json!("hello")), "string");
        assert_eq!(name(json!([1, 2, 3])), "array");
        assert_eq!(name(json!({"a": 1})), "object");
    }
}

//! Path-walking patch application.
//!
//! `patch_state` merges a patch into the node at a dotted path and returns a
//! new tree. Only the nodes on the root-to-target path are new; every other
//! subtree is shared with the input.

use crate::{
    access::{child, put_child, set_at_path, SetOptions},
    get_at_path, patch_by_type, Category, Path, StateResult, StateValue,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Where and how a patch is applied.
///
/// A bare path converts into options, so `"a.b"`, `String`, [`Path`] and a
/// plain `usize` can all be passed wherever `impl Into<PatchOptions>` is
/// accepted.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PatchOptions {
    /// Target node; `None` (or an empty path) targets the root.
    pub path: Option<Path>,
    /// Insertion offset for text and sequence targets.
    pub at: Option<i64>,
}

impl PatchOptions {
    /// Target the root.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Target `path`.
    #[inline]
    pub fn at_path(path: impl Into<Path>) -> Self {
        Self {
            path: Some(path.into()),
            at: None,
        }
    }

    /// Set the insertion offset (builder pattern).
    #[inline]
    pub fn with_at(mut self, at: i64) -> Self {
        self.at = Some(at);
        self
    }
}

impl From<Path> for PatchOptions {
    fn from(path: Path) -> Self {
        PatchOptions::at_path(path)
    }
}

impl From<&str> for PatchOptions {
    fn from(path: &str) -> Self {
        PatchOptions::at_path(path)
    }
}

impl From<String> for PatchOptions {
    fn from(path: String) -> Self {
        PatchOptions::at_path(path)
    }
}

impl From<usize> for PatchOptions {
    fn from(path: usize) -> Self {
        PatchOptions::at_path(path)
    }
}

/// Apply `patch` to the node addressed by `options` and return the new tree.
///
/// - A `None` patch is a no-op: `state` comes back unchanged, sharing every
///   container with the input.
/// - Missing intermediate nodes are created. Each new node is a sequence if
///   the segment after it is an index, and a mapping otherwise.
/// - A missing target starts as an empty node of the patch's own category
///   (a mapping when the patch is a scalar), then the patch is merged into it
///   with [`patch_by_type`].
/// - `Null` counts as missing, for the root as well when a path is given.
///   With no path the patch merges into `state` itself, so a `Null` or
///   scalar root is a [`crate::StateError::ShapeMismatch`].
///
/// `state` and `patch` are never modified.
///
/// # Errors
///
/// [`crate::StateError::ShapeMismatch`] when the target node or an existing
/// intermediate node cannot be merged with what is written into it. The
/// error carries the path of the offending node.
///
/// # Examples
///
/// ```
/// use tessera_state::{patch_state, StateValue};
/// use serde_json::json;
///
/// let state = StateValue::from(json!({"one": 1}));
/// let patch = StateValue::from(json!({"four": {"five": 4}}));
///
/// let next = patch_state(&state, "two.0.three.1", Some(&patch)).unwrap();
/// let three = next.get_key("two").unwrap().get_index(0).unwrap().get_key("three").unwrap();
/// assert!(three.is_hole_at(0));
/// assert_eq!(three.get_index(1), Some(&patch));
/// assert_eq!(state, StateValue::from(json!({"one": 1})));
/// ```
pub fn patch_state(
    state: &StateValue,
    options: impl Into<PatchOptions>,
    patch: Option<&StateValue>,
) -> StateResult<StateValue> {
    let Some(patch) = patch else {
        return Ok(state.clone());
    };
    let PatchOptions { path, at } = options.into();
    let path = path.unwrap_or_default();

    let Some((leaf, ancestors)) = path.segments().split_last() else {
        return patch_by_type(state, Some(patch), at);
    };

    let mut root = match present(Some(state)) {
        Some(state) => patch_by_type(state, None, None)?,
        None => StateValue::empty_map(),
    };

    // Rebuild the ancestor chain. Each node's shape is decided by the segment
    // that will address into it, one step ahead of the walk.
    let mut cursor = &mut root;
    let mut original = present(Some(state));
    for (i, seg) in ancestors.iter().enumerate() {
        let next = ancestors.get(i + 1).unwrap_or(leaf);
        let existing = present(original.and_then(|node| child(node, seg)));
        let node = match existing {
            Some(node) => patch_by_type(node, None, None)
                .map_err(|err| err.with_prefix(&path.slice(0, i + 1)))?,
            None => Category::implied_by(next).empty(),
        };
        cursor = put_child(cursor, seg, node, &path)?;
        original = existing;
    }

    let current = present(get_at_path(state, &path)).map_or_else(|| empty_like(patch), Clone::clone);
    let merged = patch_by_type(&current, Some(patch), at).map_err(|err| err.with_prefix(&path))?;
    set_at_path(&mut root, &path, merged, SetOptions::create())?;
    Ok(root)
}

/// [`patch_state`] over `serde_json` values.
///
/// Holes produced by the patch come back as `null`.
pub fn patch_state_json(
    state: &Value,
    options: impl Into<PatchOptions>,
    patch: Option<&Value>,
) -> StateResult<Value> {
    let patch = patch.map(StateValue::from);
    patch_state(&StateValue::from(state), options, patch.as_ref()).map(|next| next.to_json())
}

#[inline]
fn present(node: Option<&StateValue>) -> Option<&StateValue> {
    node.filter(|node| !node.is_null())
}

/// Starting point for a target that does not exist yet.
#[inline]
fn empty_like(patch: &StateValue) -> StateValue {
    Category::of(patch).unwrap_or(Category::Mapping).empty()
}

//! Dotted-path reads and writes.
//!
//! Writes are copy-on-write: every container on the written path that is
//! shared with another tree is cloned shallowly before it is changed, so
//! writing into a tree never disturbs the trees it shares nodes with.

use crate::{
    error::{value_type_name, StateError, StateResult},
    value::reserve_slots,
    Category, Path, Seg, StateValue,
};
use std::collections::btree_map::Entry;
use std::sync::Arc;

/// Options for [`set_at_path`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SetOptions {
    /// Create missing intermediate containers.
    pub create: bool,
}

impl SetOptions {
    /// Options that create missing intermediate containers.
    #[inline]
    pub fn create() -> Self {
        Self { create: true }
    }
}

/// Get a reference to the value at a path.
///
/// Holes and missing segments read as `None`.
///
/// # Examples
///
/// ```
/// use tessera_state::{get_at_path, Path, StateValue};
/// use serde_json::json;
///
/// let doc = StateValue::from(json!({"a": [{"b": 42}]}));
/// let value = get_at_path(&doc, &Path::parse("a.0.b"));
/// assert_eq!(value, Some(&StateValue::from(42i64)));
/// ```
pub fn get_at_path<'a>(doc: &'a StateValue, path: &Path) -> Option<&'a StateValue> {
    let mut current = doc;
    for seg in path {
        current = child(current, seg)?;
    }
    Some(current)
}

/// Get the value at a path, or `default` when the path is missing.
pub fn get_or(doc: &StateValue, path: &Path, default: StateValue) -> StateValue {
    get_at_path(doc, path).cloned().unwrap_or(default)
}

/// Write `value` at a path.
///
/// With [`SetOptions::create`], missing (or `Null`) intermediate nodes are
/// created; each is a sequence when the segment after it is an index and a
/// mapping otherwise. Writing past the end of a sequence pads it with holes.
pub fn set_at_path(
    doc: &mut StateValue,
    path: &Path,
    value: StateValue,
    options: SetOptions,
) -> StateResult<()> {
    let Some((leaf, ancestors)) = path.segments().split_last() else {
        *doc = value;
        return Ok(());
    };

    let mut cursor = doc;
    for (i, seg) in ancestors.iter().enumerate() {
        let present = child(cursor, seg).is_some_and(|node| !node.is_null());
        cursor = if present {
            child_mut(cursor, seg).ok_or_else(|| StateError::path_not_found(path.slice(0, i + 1)))?
        } else if options.create {
            let next = ancestors.get(i + 1).unwrap_or(leaf);
            put_child(cursor, seg, Category::implied_by(next).empty(), path)?
        } else {
            return Err(StateError::path_not_found(path.slice(0, i + 1)));
        };
    }

    put_child(cursor, leaf, value, path)?;
    Ok(())
}

/// Read one level down.
pub(crate) fn child<'a>(node: &'a StateValue, seg: &Seg) -> Option<&'a StateValue> {
    match (node, seg) {
        (StateValue::Map(map), seg) => map.get(seg.as_key().as_ref()),
        (StateValue::Seq(items), Seg::Index(i)) => items.get(*i).and_then(Option::as_ref),
        _ => None,
    }
}

fn child_mut<'a>(node: &'a mut StateValue, seg: &Seg) -> Option<&'a mut StateValue> {
    match (node, seg) {
        (StateValue::Map(map), seg) => Arc::make_mut(map).get_mut(seg.as_key().as_ref()),
        (StateValue::Seq(items), Seg::Index(i)) => Arc::make_mut(items)
            .get_mut(*i)
            .and_then(Option::as_mut),
        _ => None,
    }
}

/// Store `value` one level down and return a reference to it.
pub(crate) fn put_child<'a>(
    node: &'a mut StateValue,
    seg: &Seg,
    value: StateValue,
    path: &Path,
) -> StateResult<&'a mut StateValue> {
    match (node, seg) {
        (StateValue::Map(map), seg) => {
            match Arc::make_mut(map).entry(seg.as_key().into_owned()) {
                Entry::Occupied(mut entry) => {
                    entry.insert(value);
                    Ok(entry.into_mut())
                }
                Entry::Vacant(entry) => Ok(entry.insert(value)),
            }
        }
        (StateValue::Seq(items), Seg::Index(i)) => {
            let items = Arc::make_mut(items);
            if *i >= items.len() {
                if !reserve_slots(items, i.saturating_add(1)) {
                    return Err(StateError::index_out_of_range(path.clone(), *i));
                }
                items.resize(*i + 1, None);
            }
            Ok(items[*i].insert(value))
        }
        (other, seg) => Err(StateError::path_conflict(
            path.clone(),
            seg.clone(),
            value_type_name(other),
        )),
    }
}

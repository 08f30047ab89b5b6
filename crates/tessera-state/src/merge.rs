//! The type-polymorphic merge primitive.
//!
//! `patch_by_type` dispatches on the [`Category`] of the source node:
//!
//! | Source   | Destination            | Result                                   |
//! |----------|------------------------|------------------------------------------|
//! | text     | text                   | `source[..at] + dest + source[at..]`     |
//! | sequence | anything (wrapped)     | splice at `at`, holes fill any gap       |
//! | mapping  | mapping                | shallow overwrite, `at` ignored          |
//!
//! With no destination it returns a shallow clone of the source container.

use crate::{
    error::{value_type_name, StateError, StateResult},
    value::reserve_slots,
    Category, Path, Slot, StateMap, StateValue,
};
use std::sync::Arc;

/// Merge `destination` into `source` and return the new node.
///
/// `at` is an insertion offset for text and sequence sources and defaults to
/// the source length (append). Offsets use slice semantics: a negative
/// offset counts back from the end. A sequence offset past the end leaves
/// holes between the old end and the inserted values.
///
/// The destination is deep-copied first, so the result never shares a
/// container with it.
///
/// # Errors
///
/// [`StateError::ShapeMismatch`] when the source has no category, or when the
/// destination's category differs from the source's.
/// [`StateError::IndexOutOfRange`] when a sequence offset would grow the
/// result past `u32::MAX` slots, or the slots cannot be allocated.
///
/// # Examples
///
/// ```
/// use tessera_state::{patch_by_type, StateValue};
/// use serde_json::json;
///
/// let text = StateValue::from("abc");
/// let merged = patch_by_type(&text, Some(&StateValue::from("XY")), Some(1)).unwrap();
/// assert_eq!(merged, StateValue::from("aXYbc"));
///
/// let map = StateValue::from(json!({"a": 1, "b": 2}));
/// let merged = patch_by_type(&map, Some(&StateValue::from(json!({"b": 3, "c": 4}))), None).unwrap();
/// assert_eq!(merged.to_json(), json!({"a": 1, "b": 3, "c": 4}));
/// ```
pub fn patch_by_type(
    source: &StateValue,
    destination: Option<&StateValue>,
    at: Option<i64>,
) -> StateResult<StateValue> {
    let destination = destination.map(StateValue::deep_copy).transpose()?;

    match source {
        StateValue::Text(text) => merge_text(text, destination, at),
        StateValue::Seq(items) => merge_sequence(items, destination, at),
        StateValue::Map(map) => merge_mapping(map, destination),
        other => Err(StateError::shape_mismatch(
            Path::root(),
            value_type_name(other),
            destination.as_ref().map_or("undefined", value_type_name),
        )),
    }
}

fn merge_text(source: &str, destination: Option<StateValue>, at: Option<i64>) -> StateResult<StateValue> {
    let inserted = match destination {
        None => return Ok(StateValue::text(source)),
        Some(StateValue::Text(text)) => text,
        Some(other) => return Err(mismatch(Category::Text, &other)),
    };

    let len = source.chars().count();
    let offset = at.map_or(len, |at| clamp_offset(at, len));
    let split = source
        .char_indices()
        .nth(offset)
        .map_or(source.len(), |(byte, _)| byte);

    let mut out = String::with_capacity(source.len() + inserted.len());
    out.push_str(&source[..split]);
    out.push_str(&inserted);
    out.push_str(&source[split..]);
    Ok(StateValue::text(out))
}

fn merge_sequence(source: &[Slot], destination: Option<StateValue>, at: Option<i64>) -> StateResult<StateValue> {
    let mut inserted: Vec<Slot> = match destination {
        None => Vec::new(),
        Some(StateValue::Seq(items)) => Arc::unwrap_or_clone(items),
        Some(other) => vec![Some(other)],
    };

    let len = source.len();
    let (offset, gap) = match at {
        None => (len, 0),
        Some(at) if at < 0 => (clamp_offset(at, len), 0),
        Some(at) => {
            let at = usize::try_from(at).unwrap_or(usize::MAX);
            (at.min(len), at.saturating_sub(len))
        }
    };

    let mut out = Vec::new();
    let total = len.saturating_add(gap).saturating_add(inserted.len());
    if !reserve_slots(&mut out, total) {
        return Err(StateError::index_out_of_range(Path::root(), offset.saturating_add(gap)));
    }
    out.extend_from_slice(&source[..offset]);
    out.extend(std::iter::repeat(None).take(gap));
    out.append(&mut inserted);
    out.extend_from_slice(&source[offset..]);
    Ok(StateValue::from_slots(out))
}

fn merge_mapping(source: &StateMap, destination: Option<StateValue>) -> StateResult<StateValue> {
    let mut out = source.clone();
    match destination {
        None => {}
        Some(StateValue::Map(entries)) => out.extend(Arc::unwrap_or_clone(entries)),
        Some(other) => return Err(mismatch(Category::Mapping, &other)),
    }
    Ok(StateValue::Map(Arc::new(out)))
}

/// Resolve a slice-style offset against `len`.
fn clamp_offset(at: i64, len: usize) -> usize {
    match usize::try_from(at) {
        Ok(at) => at.min(len),
        Err(_) => {
            let back = usize::try_from(at.unsigned_abs()).unwrap_or(usize::MAX);
            len.saturating_sub(back)
        }
    }
}

#[inline]
fn mismatch(expected: Category, found: &StateValue) -> StateError {
    StateError::shape_mismatch(Path::root(), expected.name(), value_type_name(found))
}

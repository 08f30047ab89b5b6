//! State tree values.
//!
//! Containers are reference counted so a new tree can reuse every subtree an
//! update did not touch. Cloning a `StateValue` never copies a container.

use crate::StateResult;
use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

/// One sequence slot. `None` is a hole.
pub type Slot = Option<StateValue>;

/// Longest sequence a tree can hold: the array length limit of the plain-data
/// documents trees are exchanged as.
pub(crate) const MAX_SEQUENCE_LEN: usize = u32::MAX as usize;

/// Make room for `slots` to reach `len` slots in total.
///
/// Returns false instead of aborting when `len` is past
/// [`MAX_SEQUENCE_LEN`] or the allocation fails.
pub(crate) fn reserve_slots(slots: &mut Vec<Slot>, len: usize) -> bool {
    len <= MAX_SEQUENCE_LEN && slots.try_reserve_exact(len.saturating_sub(slots.len())).is_ok()
}

/// Entries of a mapping node.
pub type StateMap = BTreeMap<String, StateValue>;

/// A node of a state tree.
///
/// `Null` also stands for "absent": an undefined tree or leaf.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum StateValue {
    /// Null or absent.
    #[default]
    Null,
    /// Boolean leaf.
    Bool(bool),
    /// Numeric leaf.
    Number(serde_json::Number),
    /// Text node.
    Text(Arc<str>),
    /// Sequence node; may contain holes.
    Seq(Arc<Vec<Slot>>),
    /// Mapping node.
    Map(Arc<StateMap>),
}

impl StateValue {
    /// Create a text node.
    #[inline]
    pub fn text(s: impl Into<String>) -> Self {
        StateValue::Text(Arc::from(s.into()))
    }

    /// `""`
    #[inline]
    pub fn empty_text() -> Self {
        StateValue::Text(Arc::from(""))
    }

    /// `[]`
    #[inline]
    pub fn empty_seq() -> Self {
        StateValue::Seq(Arc::new(Vec::new()))
    }

    /// `{}`
    #[inline]
    pub fn empty_map() -> Self {
        StateValue::Map(Arc::new(StateMap::new()))
    }

    /// Create a sequence from slots, holes included.
    #[inline]
    pub fn from_slots(slots: Vec<Slot>) -> Self {
        StateValue::Seq(Arc::new(slots))
    }

    /// Create a hole-free sequence.
    pub fn from_values(values: impl IntoIterator<Item = StateValue>) -> Self {
        StateValue::Seq(Arc::new(values.into_iter().map(Some).collect()))
    }

    /// Create a mapping from key/value pairs.
    pub fn from_entries<K, V>(entries: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<StateValue>,
    {
        StateValue::Map(Arc::new(
            entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        ))
    }

    /// Returns true for `Null`.
    #[inline]
    pub fn is_null(&self) -> bool {
        matches!(self, StateValue::Null)
    }

    /// Get the text if this is a text node.
    #[inline]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            StateValue::Text(t) => Some(t),
            _ => None,
        }
    }

    /// Get the slots if this is a sequence node.
    #[inline]
    pub fn as_seq(&self) -> Option<&[Slot]> {
        match self {
            StateValue::Seq(items) => Some(items),
            _ => None,
        }
    }

    /// Get the entries if this is a mapping node.
    #[inline]
    pub fn as_map(&self) -> Option<&StateMap> {
        match self {
            StateValue::Map(map) => Some(map),
            _ => None,
        }
    }

    /// Read a mapping entry.
    #[inline]
    pub fn get_key(&self, key: &str) -> Option<&StateValue> {
        self.as_map().and_then(|map| map.get(key))
    }

    /// Read a sequence slot. Holes read as absent.
    #[inline]
    pub fn get_index(&self, index: usize) -> Option<&StateValue> {
        self.as_seq()
            .and_then(|items| items.get(index))
            .and_then(Option::as_ref)
    }

    /// Returns true if `index` is inside the sequence and holds a hole.
    pub fn is_hole_at(&self, index: usize) -> bool {
        matches!(self.as_seq().and_then(|items| items.get(index)), Some(None))
    }

    /// Reference identity.
    ///
    /// Containers are identical when they are the same allocation; scalars
    /// have no identity of their own and compare by value.
    pub fn same_ref(&self, other: &StateValue) -> bool {
        match (self, other) {
            (StateValue::Text(a), StateValue::Text(b)) => a == b,
            (StateValue::Seq(a), StateValue::Seq(b)) => Arc::ptr_eq(a, b),
            (StateValue::Map(a), StateValue::Map(b)) => Arc::ptr_eq(a, b),
            (a, b) => a == b,
        }
    }

    /// Copy through a serialize/deserialize round trip.
    ///
    /// The copy shares no container with `self`. Like any plain-data round
    /// trip it is lossy: holes come back as `null`.
    pub fn deep_copy(&self) -> StateResult<StateValue> {
        Ok(StateValue::from(serde_json::to_value(self)?))
    }

    /// Convert to a `serde_json::Value`. Holes become `null`.
    pub fn to_json(&self) -> Value {
        match self {
            StateValue::Null => Value::Null,
            StateValue::Bool(b) => Value::Bool(*b),
            StateValue::Number(n) => Value::Number(n.clone()),
            StateValue::Text(t) => Value::String(t.to_string()),
            StateValue::Seq(items) => Value::Array(
                items
                    .iter()
                    .map(|slot| slot.as_ref().map_or(Value::Null, StateValue::to_json))
                    .collect(),
            ),
            StateValue::Map(map) => Value::Object(
                map.iter()
                    .map(|(k, v)| (k.clone(), v.to_json()))
                    .collect(),
            ),
        }
    }
}

impl From<Value> for StateValue {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => StateValue::Null,
            Value::Bool(b) => StateValue::Bool(b),
            Value::Number(n) => StateValue::Number(n),
            Value::String(s) => StateValue::text(s),
            Value::Array(items) => StateValue::from_values(items.into_iter().map(StateValue::from)),
            Value::Object(map) => StateValue::from_entries(map),
        }
    }
}

impl From<&Value> for StateValue {
    fn from(value: &Value) -> Self {
        StateValue::from(value.clone())
    }
}

impl From<&str> for StateValue {
    fn from(s: &str) -> Self {
        StateValue::text(s)
    }
}

impl From<String> for StateValue {
    fn from(s: String) -> Self {
        StateValue::text(s)
    }
}

impl From<bool> for StateValue {
    fn from(b: bool) -> Self {
        StateValue::Bool(b)
    }
}

impl From<i64> for StateValue {
    fn from(n: i64) -> Self {
        StateValue::Number(n.into())
    }
}

impl From<u64> for StateValue {
    fn from(n: u64) -> Self {
        StateValue::Number(n.into())
    }
}

/// Non-finite floats have no plain-data form and become `Null`.
impl From<f64> for StateValue {
    fn from(n: f64) -> Self {
        serde_json::Number::from_f64(n).map_or(StateValue::Null, StateValue::Number)
    }
}

impl Serialize for StateValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            StateValue::Null => serializer.serialize_unit(),
            StateValue::Bool(b) => serializer.serialize_bool(*b),
            StateValue::Number(n) => n.serialize(serializer),
            StateValue::Text(t) => serializer.serialize_str(t),
            StateValue::Seq(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for slot in items.iter() {
                    seq.serialize_element(slot)?;
                }
                seq.end()
            }
            StateValue::Map(map) => {
                let mut out = serializer.serialize_map(Some(map.len()))?;
                for (k, v) in map.iter() {
                    out.serialize_entry(k, v)?;
                }
                out.end()
            }
        }
    }
}

impl<'de> Deserialize<'de> for StateValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Value::deserialize(deserializer).map(StateValue::from)
    }
}

impl fmt::Display for StateValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_json())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_clone_shares_containers() {
        let v = StateValue::from(json!({"a": [1, 2]}));
        let c = v.clone();
        assert!(v.same_ref(&c));
    }

    #[test]
    fn test_equal_but_not_identical() {
        let a = StateValue::from(json!({"a": 1}));
        let b = StateValue::from(json!({"a": 1}));
        assert_eq!(a, b);
        assert!(!a.same_ref(&b));
    }

    #[test]
    fn test_scalars_compare_by_value() {
        assert!(StateValue::from(1i64).same_ref(&StateValue::from(1i64)));
        assert!(StateValue::from("x").same_ref(&StateValue::from("x")));
        assert!(!StateValue::from(true).same_ref(&StateValue::from(false)));
    }

    #[test]
    fn test_deep_copy_is_independent() {
        let v = StateValue::from(json!({"nested": {"list": [1, 2, 3]}}));
        let copy = v.deep_copy().unwrap();
        assert_eq!(copy, v);
        assert!(!copy.same_ref(&v));
        assert!(!copy
            .get_key("nested")
            .unwrap()
            .same_ref(v.get_key("nested").unwrap()));
    }

    #[test]
    fn test_deep_copy_turns_holes_into_null() {
        let v = StateValue::from_slots(vec![Some(1i64.into()), None]);
        let copy = v.deep_copy().unwrap();
        assert!(v.is_hole_at(1));
        assert!(!copy.is_hole_at(1));
        assert_eq!(copy.to_json(), json!([1, null]));
    }

    #[test]
    fn test_non_finite_float_is_null() {
        assert!(StateValue::from(f64::NAN).is_null());
        assert_eq!(StateValue::from(1.5), StateValue::from(json!(1.5)));
    }

    #[test]
    fn test_serde_round_trip() {
        let v: StateValue = serde_json::from_str(r#"{"a":[1,"x",null],"b":true}"#).unwrap();
        assert_eq!(v.get_key("b"), Some(&StateValue::Bool(true)));
        let text = serde_json::to_string(&v).unwrap();
        assert_eq!(text, r#"{"a":[1,"x",null],"b":true}"#);
    }
}

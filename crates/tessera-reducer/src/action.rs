//! Actions dispatched through reducers.

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tessera_state::{get_at_path, Path, StateValue};

/// Reserved action types.
pub struct ActionTypes;

impl ActionTypes {
    /// Dispatched once to collect each reducer's initial state.
    pub const INIT: &'static str = "@@redux/INIT";
    /// Prefix of the random action type used to probe reducers.
    pub const PROBE_UNKNOWN_ACTION: &'static str = "@@redux/PROBE_UNKNOWN_ACTION_";

    /// A fresh random probe action type such as
    /// `@@redux/PROBE_UNKNOWN_ACTION_3.f.9.a.0.c`.
    pub fn probe_unknown_action() -> String {
        let noise = uuid::Uuid::new_v4().simple().to_string();
        let dotted = noise
            .chars()
            .take(6)
            .map(String::from)
            .collect::<Vec<_>>()
            .join(".");
        format!("{}{dotted}", Self::PROBE_UNKNOWN_ACTION)
    }
}

/// An action: any state value, conventionally a mapping with a text `type`.
///
/// # Examples
///
/// ```
/// use tessera_reducer::Action;
///
/// let action = Action::new("ADD_TODO").with("text", "write docs");
/// assert_eq!(action.kind(), Some("ADD_TODO"));
/// ```
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Action(StateValue);

impl Action {
    /// Create an action of the given type.
    pub fn new(kind: impl Into<String>) -> Self {
        Self(StateValue::from_entries([("type", StateValue::text(kind))]))
    }

    /// Add a field (builder pattern). A non-mapping action is replaced by a
    /// mapping holding only the new field.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<StateValue>) -> Self {
        let mut fields = self.0.as_map().cloned().unwrap_or_default();
        fields.insert(key.into(), value.into());
        self.0 = StateValue::Map(Arc::new(fields));
        self
    }

    /// The action type, if the action is a mapping with a text `type`.
    #[inline]
    pub fn kind(&self) -> Option<&str> {
        self.0.get_key("type").and_then(StateValue::as_text)
    }

    /// Read a field by dotted path.
    #[inline]
    pub fn get(&self, path: &Path) -> Option<&StateValue> {
        get_at_path(&self.0, path)
    }

    /// The underlying value.
    #[inline]
    pub fn value(&self) -> &StateValue {
        &self.0
    }

    /// Consume and return the underlying value.
    #[inline]
    pub fn into_value(self) -> StateValue {
        self.0
    }
}

impl From<StateValue> for Action {
    fn from(value: StateValue) -> Self {
        Action(value)
    }
}

impl From<serde_json::Value> for Action {
    fn from(value: serde_json::Value) -> Self {
        Action(StateValue::from(value))
    }
}

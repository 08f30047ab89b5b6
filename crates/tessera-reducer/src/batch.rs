//! Dispatching several actions as one.

use crate::{Action, Reducer, ReducerResult};
use serde::{Deserialize, Serialize};
use tessera_state::{Path, StateValue};

/// Options for [`batched_action_reducer`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BatchedReducerOptions {
    /// Action type that marks a batch.
    #[serde(rename = "type")]
    pub action_type: String,
    /// Where the batched actions live inside the batch action.
    #[serde(rename = "payload")]
    pub payload_path: Path,
}

impl Default for BatchedReducerOptions {
    fn default() -> Self {
        Self {
            action_type: "BATCHED_ACTION".to_owned(),
            payload_path: Path::parse("payload"),
        }
    }
}

impl BatchedReducerOptions {
    /// Set the batch action type (builder pattern).
    #[inline]
    pub fn with_action_type(mut self, action_type: impl Into<String>) -> Self {
        self.action_type = action_type.into();
        self
    }

    /// Set the payload path (builder pattern).
    #[inline]
    pub fn with_payload_path(mut self, path: impl Into<Path>) -> Self {
        self.payload_path = path.into();
        self
    }
}

/// Reducer that unpacks batch actions. Built by [`batched_action_reducer`].
pub struct BatchedActionReducer<R> {
    inner: R,
    options: BatchedReducerOptions,
}

/// Wrap `reducer` so that a batch action applies every action in its payload.
///
/// An action whose type equals `options.action_type` is unpacked: the value
/// at `options.payload_path` (an empty list when missing) is treated as a
/// list of actions, a single non-list payload as a list of one, and
/// `reducer` is folded over them in order. Holes in the list are skipped.
/// Any other action goes straight to `reducer`.
pub fn batched_action_reducer<R: Reducer>(
    reducer: R,
    options: BatchedReducerOptions,
) -> BatchedActionReducer<R> {
    BatchedActionReducer {
        inner: reducer,
        options,
    }
}

impl<R: Reducer> BatchedActionReducer<R> {
    /// The options in effect.
    #[inline]
    pub fn options(&self) -> &BatchedReducerOptions {
        &self.options
    }

    fn unpack(&self, action: &Action) -> Vec<Action> {
        match action.get(&self.options.payload_path) {
            None | Some(StateValue::Null) => Vec::new(),
            Some(StateValue::Seq(items)) => items.iter().flatten().cloned().map(Action::from).collect(),
            Some(single) => vec![Action::from(single.clone())],
        }
    }
}

impl<R: Reducer> Reducer for BatchedActionReducer<R> {
    fn reduce(&self, state: Option<StateValue>, action: &Action) -> ReducerResult<Option<StateValue>> {
        if action.kind() != Some(self.options.action_type.as_str()) {
            return self.inner.reduce(state, action);
        }
        self.unpack(action)
            .iter()
            .try_fold(state, |state, inner| self.inner.reduce(state, inner))
    }
}

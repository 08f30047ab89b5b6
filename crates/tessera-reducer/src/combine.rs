//! Combining keyed reducers into one reducer over a mapping.

use crate::{Action, ActionTypes, BoxedReducer, Reducer, ReducerError, ReducerResult};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::sync::{Mutex, PoisonError};
use tessera_state::{value_type_name, StateMap, StateValue};
use tracing::{error, warn};

/// Options for [`CombineReducers`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CombineOptions {
    /// Drop state keys no reducer owns instead of carrying them over.
    pub ignore_non_reducer_keys: bool,
    /// Log diagnostics about missing reducers and unexpected state shapes.
    pub strict_mode: bool,
}

impl CombineOptions {
    /// Set `ignore_non_reducer_keys` (builder pattern).
    #[inline]
    pub fn with_ignore_non_reducer_keys(mut self, ignore: bool) -> Self {
        self.ignore_non_reducer_keys = ignore;
        self
    }

    /// Set `strict_mode` (builder pattern).
    #[inline]
    pub fn with_strict_mode(mut self, strict: bool) -> Self {
        self.strict_mode = strict;
        self
    }
}

/// Builder for a [`CombinedReducer`].
///
/// # Examples
///
/// ```
/// use tessera_reducer::{reducer_fn, Action, CombineReducers, Reducer};
/// use tessera_state::StateValue;
///
/// let flag = reducer_fn(|state, action| {
///     Ok(Some(match action.kind() {
///         Some("ON") => StateValue::Bool(true),
///         _ => state.unwrap_or(StateValue::Bool(false)),
///     }))
/// });
///
/// let root = CombineReducers::new().reducer("flag", flag).build().unwrap();
/// let next = root.reduce(None, &Action::new("ON")).unwrap().unwrap();
/// assert_eq!(next.get_key("flag"), Some(&StateValue::Bool(true)));
/// ```
#[derive(Default)]
pub struct CombineReducers {
    entries: Vec<(String, Option<BoxedReducer>)>,
    options: CombineOptions,
}

impl CombineReducers {
    /// Start an empty combination.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the options (builder pattern).
    #[inline]
    pub fn with_options(mut self, options: CombineOptions) -> Self {
        self.options = options;
        self
    }

    /// Register the reducer owning `key`. Registering a key twice replaces
    /// the earlier reducer and keeps its position.
    pub fn reducer(self, key: impl Into<String>, reducer: impl Reducer + 'static) -> Self {
        let boxed: BoxedReducer = std::sync::Arc::new(reducer);
        self.entry(key.into(), Some(boxed))
    }

    /// Declare `key` without a reducer. The key is skipped; strict mode
    /// reports it when the combination is built.
    pub fn missing(self, key: impl Into<String>) -> Self {
        self.entry(key.into(), None)
    }

    fn entry(mut self, key: String, reducer: Option<BoxedReducer>) -> Self {
        match self.entries.iter_mut().find(|(existing, _)| *existing == key) {
            Some(slot) => slot.1 = reducer,
            None => self.entries.push((key, reducer)),
        }
        self
    }

    /// Check every reducer's shape and build the combined reducer.
    ///
    /// # Errors
    ///
    /// A reducer that returns no state for the init action, or for a random
    /// unknown action, fails the build.
    pub fn build(self) -> ReducerResult<CombinedReducer> {
        let mut reducers = Vec::with_capacity(self.entries.len());
        for (key, reducer) in self.entries {
            match reducer {
                Some(reducer) => reducers.push((key, reducer)),
                None if self.options.strict_mode => {
                    error!(key = %key, "No reducer provided for key \"{key}\"");
                }
                None => {}
            }
        }

        assert_reducer_shape(&reducers)?;

        Ok(CombinedReducer {
            reducers,
            options: self.options,
            non_reducer_keys: Mutex::new(BTreeSet::new()),
        })
    }
}

/// Combine `(key, reducer)` pairs with the given options.
///
/// Shorthand for [`CombineReducers`].
pub fn combine_reducers<K: Into<String>>(
    reducers: impl IntoIterator<Item = (K, BoxedReducer)>,
    options: CombineOptions,
) -> ReducerResult<CombinedReducer> {
    reducers
        .into_iter()
        .fold(CombineReducers::new().with_options(options), |builder, (key, reducer)| {
            builder.reducer(key, reducer)
        })
        .build()
}

fn assert_reducer_shape(reducers: &[(String, BoxedReducer)]) -> ReducerResult<()> {
    for (key, reducer) in reducers {
        if reducer.reduce(None, &Action::new(ActionTypes::INIT))?.is_none() {
            return Err(ReducerError::undefined_initial_state(key));
        }
        let probe = Action::new(ActionTypes::probe_unknown_action());
        if reducer.reduce(None, &probe)?.is_none() {
            return Err(ReducerError::undefined_probe_state(key));
        }
    }
    Ok(())
}

/// One reducer over a mapping, delegating each key to its own reducer.
///
/// Built by [`CombineReducers::build`] or [`combine_reducers`].
pub struct CombinedReducer {
    reducers: Vec<(String, BoxedReducer)>,
    options: CombineOptions,
    // State keys seen that no reducer owns.
    non_reducer_keys: Mutex<BTreeSet<String>>,
}

impl CombinedReducer {
    /// Keys owned by reducers, in registration order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.reducers.iter().map(|(key, _)| key.as_str())
    }

    fn owns(&self, key: &str) -> bool {
        self.reducers.iter().any(|(owned, _)| owned == key)
    }

    /// Record unknown state keys and describe anything unexpected about the
    /// state's shape. Each unknown key is reported once.
    fn unexpected_state_shape(&self, state: &StateValue, action: &Action) -> Option<String> {
        let argument_name = if action.kind() == Some(ActionTypes::INIT) {
            "preloadedState argument passed to createStore"
        } else {
            "previous state received by the reducer"
        };

        if self.reducers.is_empty() {
            return Some(
                "Store does not have a valid reducer. Make sure the argument passed \
                 to combineReducers is an object whose values are reducers."
                    .to_owned(),
            );
        }

        let reducer_keys = self.keys().collect::<Vec<_>>().join("\", \"");
        let Some(entries) = state.as_map() else {
            return Some(format!(
                "The {argument_name} has unexpected type of \"{}\". \
                 Expected argument to be an object with the following keys: \"{reducer_keys}\"",
                value_type_name(state)
            ));
        };

        let mut seen = self
            .non_reducer_keys
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        let unexpected: Vec<&str> = entries
            .keys()
            .map(String::as_str)
            .filter(|key| !self.owns(key) && !seen.contains(*key))
            .collect();
        if unexpected.is_empty() {
            return None;
        }
        seen.extend(unexpected.iter().map(|key| (*key).to_owned()));

        Some(format!(
            "Unexpected {} \"{}\" found in {argument_name}. \
             Expected to find one of the known reducer keys instead: \"{reducer_keys}\". \
             Unexpected keys will be ignored.",
            if unexpected.len() > 1 { "keys" } else { "key" },
            unexpected.join("\", \""),
        ))
    }
}

impl Reducer for CombinedReducer {
    fn reduce(&self, state: Option<StateValue>, action: &Action) -> ReducerResult<Option<StateValue>> {
        let state = state.unwrap_or_else(StateValue::empty_map);

        if let Some(message) = self.unexpected_state_shape(&state, action) {
            if self.options.strict_mode && self.options.ignore_non_reducer_keys {
                warn!(action = action.kind().unwrap_or_default(), "{message}");
            }
        }

        let mut has_changed = false;
        let mut next = StateMap::new();
        for (key, reducer) in &self.reducers {
            let previous = state.get_key(key).cloned();
            let next_for_key = reducer
                .reduce(previous.clone(), action)?
                .ok_or_else(|| ReducerError::undefined_state(key, action))?;
            has_changed = has_changed || !previous.is_some_and(|previous| previous.same_ref(&next_for_key));
            next.insert(key.clone(), next_for_key);
        }

        if !has_changed {
            return Ok(Some(state));
        }

        if !self.options.ignore_non_reducer_keys {
            let seen = self
                .non_reducer_keys
                .lock()
                .unwrap_or_else(PoisonError::into_inner);
            for key in seen.iter() {
                if let Some(value) = state.get_key(key) {
                    next.insert(key.clone(), value.clone());
                }
            }
        }

        Ok(Some(StateValue::Map(std::sync::Arc::new(next))))
    }
}

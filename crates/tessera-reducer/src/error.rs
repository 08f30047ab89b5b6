//! Error types for reducer plumbing.

use crate::Action;
use tessera_state::StateError;
use thiserror::Error;

/// Result type alias for reducer operations.
pub type ReducerResult<T> = Result<T, ReducerError>;

/// Errors raised by reducers and reducer combinators.
#[derive(Debug, Error)]
pub enum ReducerError {
    /// A child reducer of a combination returned no state.
    #[error(
        "Given action {action}, reducer \"{key}\" returned undefined. \
         To ignore an action, you must explicitly return the previous state. \
         If you want this reducer to hold no value, you can return null instead of undefined."
    )]
    UndefinedState {
        /// Key of the reducer in the combination.
        key: String,
        /// Quoted action type, or `an action`.
        action: String,
    },

    /// A child reducer returned no state for the init action.
    #[error(
        "Reducer \"{key}\" returned undefined during initialization. \
         If the state passed to the reducer is undefined, you must explicitly return the initial state. \
         The initial state may not be undefined. \
         If you don't want to set a value for this reducer, you can use null instead of undefined."
    )]
    UndefinedInitialState {
        /// Key of the reducer in the combination.
        key: String,
    },

    /// A child reducer returned no state for an unknown action.
    #[error(
        "Reducer \"{key}\" returned undefined when probed with a random type. \
         Don't try to handle {init} or other actions in \"redux/*\" namespace. They are considered private. \
         Instead, you must return the current state for any unknown actions, \
         unless it is undefined, in which case you must return the initial state, regardless of the action type. \
         The initial state may not be undefined, but can be null."
    )]
    UndefinedProbeState {
        /// Key of the reducer in the combination.
        key: String,
        /// The reserved init action type.
        init: &'static str,
    },

    /// Patching state failed inside a reducer.
    #[error(transparent)]
    State(#[from] StateError),
}

impl ReducerError {
    /// Create an undefined state error for `key` handling `action`.
    pub fn undefined_state(key: impl Into<String>, action: &Action) -> Self {
        let action = action
            .kind()
            .map_or_else(|| "an action".to_owned(), |kind| format!("\"{kind}\""));
        ReducerError::UndefinedState {
            key: key.into(),
            action,
        }
    }

    /// Create an undefined initial state error.
    #[inline]
    pub fn undefined_initial_state(key: impl Into<String>) -> Self {
        ReducerError::UndefinedInitialState { key: key.into() }
    }

    /// Create an undefined probe state error.
    #[inline]
    pub fn undefined_probe_state(key: impl Into<String>) -> Self {
        ReducerError::UndefinedProbeState {
            key: key.into(),
            init: crate::ActionTypes::INIT,
        }
    }
}

//! Reducer plumbing over `tessera-state` trees.
//!
//! A [`Reducer`] is a pure `(state, action) -> state` function. This crate
//! provides the combinators that assemble an application reducer:
//!
//! - [`combine_reducers`] / [`CombineReducers`]: one reducer per mapping key,
//!   sharing the whole state when nothing changed.
//! - [`compose_reducers`]: thread state through several reducers in order,
//!   starting from a default.
//! - [`batched_action_reducer`]: treat one action as a list of actions.
//!
//! # Example
//!
//! ```
//! use tessera_reducer::{
//!     batched_action_reducer, compose_reducers, reducer_fn, Action, BatchedReducerOptions, Reducer,
//! };
//! use tessera_state::{patch_state, StateValue};
//! use serde_json::json;
//!
//! let add_todo = reducer_fn(|state, action| {
//!     let state = state.unwrap_or_else(StateValue::empty_map);
//!     match action.kind() {
//!         Some("ADD_TODO") => {
//!             let todo = StateValue::from_values([action.value().get_key("text").cloned().unwrap_or_default()]);
//!             Ok(Some(patch_state(&state, "todos", Some(&todo))?))
//!         }
//!         _ => Ok(Some(state)),
//!     }
//! });
//!
//! let root = batched_action_reducer(
//!     compose_reducers([add_todo], Some(StateValue::from(json!({"todos": []})))),
//!     BatchedReducerOptions::default(),
//! );
//!
//! let batch = Action::new("BATCHED_ACTION").with(
//!     "payload",
//!     StateValue::from_values([
//!         Action::new("ADD_TODO").with("text", "a").into_value(),
//!         Action::new("ADD_TODO").with("text", "b").into_value(),
//!     ]),
//! );
//! let next = root.reduce(None, &batch).unwrap().unwrap();
//! assert_eq!(next.to_json(), json!({"todos": ["a", "b"]}));
//! ```

mod action;
mod batch;
mod combine;
mod compose;
mod error;
mod reducer;

pub use action::{Action, ActionTypes};
pub use batch::{batched_action_reducer, BatchedActionReducer, BatchedReducerOptions};
pub use combine::{combine_reducers, CombineOptions, CombineReducers, CombinedReducer};
pub use compose::{compose_reducers, ComposedReducer};
pub use error::{ReducerError, ReducerResult};
pub use reducer::{reducer_fn, BoxedReducer, FnReducer, Reducer};

//! The reducer abstraction.

use crate::{Action, ReducerResult};
use std::sync::Arc;
use tessera_state::StateValue;

/// A pure state transition: `(state, action) -> state`.
///
/// `None` stands for an undefined state, both as input (the reducer should
/// fall back to its initial state) and as output (which combinators reject).
///
/// Closures become reducers through [`reducer_fn`].
pub trait Reducer: Send + Sync {
    /// Compute the next state.
    fn reduce(&self, state: Option<StateValue>, action: &Action) -> ReducerResult<Option<StateValue>>;
}

impl<R: Reducer + ?Sized> Reducer for Arc<R> {
    fn reduce(&self, state: Option<StateValue>, action: &Action) -> ReducerResult<Option<StateValue>> {
        (**self).reduce(state, action)
    }
}

/// Shared, type-erased reducer.
pub type BoxedReducer = Arc<dyn Reducer>;

/// Reducer backed by a closure. Built by [`reducer_fn`].
pub struct FnReducer<F>(F);

impl<F> Reducer for FnReducer<F>
where
    F: Fn(Option<StateValue>, &Action) -> ReducerResult<Option<StateValue>> + Send + Sync,
{
    fn reduce(&self, state: Option<StateValue>, action: &Action) -> ReducerResult<Option<StateValue>> {
        (self.0)(state, action)
    }
}

/// Box a closure as a [`BoxedReducer`], pinning down its signature.
///
/// # Examples
///
/// ```
/// use tessera_reducer::{reducer_fn, Action, Reducer};
/// use tessera_state::StateValue;
///
/// let counter = reducer_fn(|state, action| {
///     let n = state.and_then(|s| s.as_text().map(str::len)).unwrap_or(0);
///     Ok(Some(match action.kind() {
///         Some("GROW") => StateValue::text("x".repeat(n + 1)),
///         _ => StateValue::text("x".repeat(n)),
///     }))
/// });
///
/// let next = counter.reduce(None, &Action::new("GROW")).unwrap();
/// assert_eq!(next, Some(StateValue::text("x")));
/// ```
pub fn reducer_fn<F>(f: F) -> BoxedReducer
where
    F: Fn(Option<StateValue>, &Action) -> ReducerResult<Option<StateValue>> + Send + Sync + 'static,
{
    Arc::new(FnReducer(f))
}

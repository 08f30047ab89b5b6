//! Sequential reducer composition.

use crate::{Action, BoxedReducer, Reducer, ReducerResult};
use tessera_state::StateValue;

/// Reducer that threads state through a list of reducers in order.
///
/// Built by [`compose_reducers`].
pub struct ComposedReducer {
    reducers: Vec<BoxedReducer>,
    default_state: Option<StateValue>,
}

/// Compose reducers left to right.
///
/// The composed reducer replaces an undefined input state with
/// `default_state`, then feeds each reducer the output of the one before it.
/// With no reducers it returns the (defaulted) input.
pub fn compose_reducers(
    reducers: impl IntoIterator<Item = BoxedReducer>,
    default_state: Option<StateValue>,
) -> ComposedReducer {
    ComposedReducer {
        reducers: reducers.into_iter().collect(),
        default_state,
    }
}

impl ComposedReducer {
    /// Number of composed reducers.
    #[inline]
    pub fn len(&self) -> usize {
        self.reducers.len()
    }

    /// Returns true if nothing was composed.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.reducers.is_empty()
    }
}

impl Reducer for ComposedReducer {
    fn reduce(&self, state: Option<StateValue>, action: &Action) -> ReducerResult<Option<StateValue>> {
        let state = state.or_else(|| self.default_state.clone());
        self.reducers
            .iter()
            .try_fold(state, |state, reducer| reducer.reduce(state, action))
    }
}

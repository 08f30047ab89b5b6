//! Behavioural tests for `batched_action_reducer`.

use serde_json::json;
use tessera_reducer::{
    batched_action_reducer, reducer_fn, Action, BatchedReducerOptions, BoxedReducer, Reducer,
};
use tessera_state::{patch_state, StateValue};

fn v(value: serde_json::Value) -> StateValue {
    StateValue::from(value)
}

/// Reducer setting `one`, `two` or `three` for the matching action.
fn numbers() -> BoxedReducer {
    reducer_fn(|state, action| {
        let state = state.unwrap_or_else(StateValue::empty_map);
        let field = match action.kind() {
            Some("ONE") => json!({"one": 1}),
            Some("TWO") => json!({"two": 2}),
            Some("THREE") => json!({"three": 3}),
            _ => return Ok(Some(state)),
        };
        Ok(Some(patch_state(&state, "", Some(&v(field)))?))
    })
}

#[test]
fn test_returns_default_state() {
    let batched = batched_action_reducer(numbers(), BatchedReducerOptions::default());
    let next = batched.reduce(None, &Action::default()).unwrap();
    assert_eq!(next, Some(StateValue::empty_map()));
}

#[test]
fn test_applies_batch_with_default_options() {
    let batched = batched_action_reducer(numbers(), BatchedReducerOptions::default());
    let action = Action::from(json!({
        "type": "BATCHED_ACTION",
        "payload": [{"type": "ONE"}, {"type": "TWO"}]
    }));
    let next = batched.reduce(Some(v(json!({"four": 4}))), &action).unwrap().unwrap();
    assert_eq!(next.to_json(), json!({"four": 4, "one": 1, "two": 2}));
}

#[test]
fn test_applies_batch_with_custom_options() {
    let options = BatchedReducerOptions::default()
        .with_action_type("BATCHED")
        .with_payload_path("data");
    let batched = batched_action_reducer(numbers(), options);
    let action = Action::from(json!({
        "type": "BATCHED",
        "data": [{"type": "ONE"}, {"type": "TWO"}, {"type": "THREE"}]
    }));
    let next = batched.reduce(Some(v(json!({"four": 4}))), &action).unwrap().unwrap();
    assert_eq!(next.to_json(), json!({"one": 1, "two": 2, "three": 3, "four": 4}));
}

#[test]
fn test_nested_payload_path() {
    let options = BatchedReducerOptions::default().with_payload_path("meta.actions");
    let batched = batched_action_reducer(numbers(), options);
    let action = Action::from(json!({
        "type": "BATCHED_ACTION",
        "meta": {"actions": [{"type": "THREE"}]}
    }));
    let next = batched.reduce(None, &action).unwrap().unwrap();
    assert_eq!(next.to_json(), json!({"three": 3}));
}

#[test]
fn test_plain_actions_pass_through() {
    let batched = batched_action_reducer(numbers(), BatchedReducerOptions::default());
    let next = batched.reduce(None, &Action::new("TWO")).unwrap().unwrap();
    assert_eq!(next.to_json(), json!({"two": 2}));
}

#[test]
fn test_batch_type_is_not_forwarded() {
    let seen = reducer_fn(|state, action| {
        assert_ne!(action.kind(), Some("BATCHED_ACTION"));
        Ok(state)
    });
    let batched = batched_action_reducer(seen, BatchedReducerOptions::default());
    let action = Action::from(json!({"type": "BATCHED_ACTION", "payload": [{"type": "ONE"}]}));
    assert_eq!(batched.reduce(None, &action).unwrap(), None);
}

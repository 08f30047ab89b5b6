//! Tests for immutability and structural sharing.
//!
//! These tests verify that:
//! 1. patch_state never mutates the original state or the patch
//! 2. only nodes on the root-to-target path are new allocations
//! 3. repeated patches of the same input give equal results

use serde_json::json;
use tessera_state::{patch_state, Path, PatchOptions, StateValue};

fn wide_state() -> StateValue {
    StateValue::from(json!({
        "users": {"alice": {"roles": ["admin"]}, "bob": {"roles": []}},
        "settings": {"theme": "dark", "layout": {"columns": 3}},
        "log": [{"id": 1}, {"id": 2}, {"id": 3}]
    }))
}

#[test]
fn test_top_level_siblings_are_shared() {
    let state = wide_state();
    let next = patch_state(&state, "settings", Some(&StateValue::from(json!({"theme": "light"})))).unwrap();

    let old = state.as_map().unwrap();
    let new = next.as_map().unwrap();
    for (key, value) in old {
        if key == "settings" {
            assert!(!new[key].same_ref(value));
        } else {
            assert!(new[key].same_ref(value), "sibling {key} was copied");
        }
    }
}

#[test]
fn test_only_path_nodes_are_new() {
    let state = wide_state();
    let path = Path::parse("users.alice.roles");
    let next = patch_state(&state, path, Some(&StateValue::from("editor"))).unwrap();

    let old_users = state.get_key("users").unwrap();
    let new_users = next.get_key("users").unwrap();
    assert!(!new_users.same_ref(old_users));
    assert!(new_users.get_key("bob").unwrap().same_ref(old_users.get_key("bob").unwrap()));
    assert!(!new_users.get_key("alice").unwrap().same_ref(old_users.get_key("alice").unwrap()));
    assert!(next.get_key("settings").unwrap().same_ref(state.get_key("settings").unwrap()));
    assert!(next.get_key("log").unwrap().same_ref(state.get_key("log").unwrap()));

    assert_eq!(
        next.to_json()["users"]["alice"]["roles"],
        json!(["admin", "editor"])
    );
}

#[test]
fn test_untouched_sequence_elements_are_shared() {
    let state = wide_state();
    let next = patch_state(&state, "log.1", Some(&StateValue::from(json!({"seen": true})))).unwrap();

    let old_log = state.get_key("log").unwrap();
    let new_log = next.get_key("log").unwrap();
    assert!(new_log.get_index(0).unwrap().same_ref(old_log.get_index(0).unwrap()));
    assert!(new_log.get_index(2).unwrap().same_ref(old_log.get_index(2).unwrap()));
    assert_eq!(new_log.get_index(1).unwrap().to_json(), json!({"id": 2, "seen": true}));
}

#[test]
fn test_original_and_patch_unchanged() {
    let state = wide_state();
    let patch = StateValue::from(json!({"columns": 4, "rows": 2}));
    let state_before = state.to_json();
    let patch_before = patch.to_json();

    let next = patch_state(&state, "settings.layout", Some(&patch)).unwrap();

    assert_eq!(state.to_json(), state_before);
    assert_eq!(patch.to_json(), patch_before);
    assert_eq!(next.to_json()["settings"]["layout"], json!({"columns": 4, "rows": 2}));
}

#[test]
fn test_deterministic() {
    let state = wide_state();
    let patch = StateValue::from(json!([{"id": 4}]));
    let options = PatchOptions::at_path("log").with_at(0);

    let first = patch_state(&state, options.clone(), Some(&patch)).unwrap();
    let second = patch_state(&state, options, Some(&patch)).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_chained_patches_keep_sharing() {
    let state = wide_state();
    let first = patch_state(&state, "settings.theme", Some(&StateValue::from("-contrast"))).unwrap();
    let second = patch_state(&first, "log", Some(&StateValue::from(json!({"id": 4})))).unwrap();

    assert!(second.get_key("users").unwrap().same_ref(state.get_key("users").unwrap()));
    assert!(second.get_key("settings").unwrap().same_ref(first.get_key("settings").unwrap()));
    assert_eq!(second.to_json()["settings"]["theme"], json!("dark-contrast"));
    assert_eq!(second.to_json()["log"].as_array().map(Vec::len), Some(4));
}

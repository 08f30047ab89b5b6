//! Immutable, path-addressed patching of state trees.
//!
//! `tessera-state` applies partial updates ("patches") to a nested state tree
//! addressed by a dotted path, returning a new tree and leaving the input
//! untouched.
//!
//! # Core Concepts
//!
//! - **StateValue**: a tree node. Text, sequence and mapping nodes are the
//!   patchable [`Category`]s; containers are reference counted.
//! - **Path**: a dotted path such as `"users.0.name"`. Digit segments address
//!   sequence slots, everything else addresses mapping keys.
//! - **patch_by_type**: the merge primitive. Splices text and sequences,
//!   shallow-merges mappings.
//! - **patch_state**: walks to the target node, creating missing levels, and
//!   merges the patch there.
//!
//! # Structural sharing
//!
//! ```text
//! patch_state(S, "a.b", P)  ->  S'
//! ```
//!
//! - `S'.a` and `S'.a.b` are new nodes
//! - every sibling of `a` and of `b` is the same allocation in `S` and `S'`
//! - `S` and `P` are never mutated
//!
//! # Quick Start
//!
//! ```
//! use tessera_state::{patch_state, PatchOptions, StateValue};
//! use serde_json::json;
//!
//! let state = StateValue::from(json!({"todos": [{"id": 1}, {"id": 2}], "filter": {"all": true}}));
//! let patch = StateValue::from(json!({"id": 3}));
//!
//! let next = patch_state(&state, PatchOptions::at_path("todos").with_at(1), Some(&patch)).unwrap();
//!
//! assert_eq!(next.to_json()["todos"], json!([{"id": 1}, {"id": 3}, {"id": 2}]));
//! // Untouched branches are shared, not copied
//! assert!(next.get_key("filter").unwrap().same_ref(state.get_key("filter").unwrap()));
//! // Original unchanged
//! assert_eq!(state.to_json()["todos"], json!([{"id": 1}, {"id": 2}]));
//! ```

mod access;
mod category;
mod error;
mod merge;
mod patch;
mod path;
mod value;

pub use access::{get_at_path, get_or, set_at_path, SetOptions};
pub use category::Category;
pub use error::{value_type_name, StateError, StateResult};
pub use merge::patch_by_type;
pub use patch::{patch_state, patch_state_json, PatchOptions};
pub use path::{Path, Seg};
pub use value::{Slot, StateMap, StateValue};

// Re-export serde_json::Value for convenience
pub use serde_json::Value;

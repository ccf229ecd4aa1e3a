//! # ezstate
//!
//! One aggregate state value in place of many separate `use_state` slots.
//!
//! `use_ez_state` returns `(state, update, reset)`:
//!
//! - `state` — this render's snapshot of the aggregate.
//! - `update` — merges a partial patch (or a patch derived from the latest
//!   state) using the current merge policy.
//! - `reset` — puts back the state captured on the first render.
//!
//! ```rust
//! use ezstate::*;
//! use ezstate_core::render_hook;
//! use serde_json::json;
//!
//! let mut h = render_hook((), |_| {
//!     use_ez_state(object(json!({ "name": "John", "lastName": "Doe" })).unwrap(), None)
//! });
//!
//! h.act(|(_, update, _)| update.merge(object(json!({ "name": "Jane" })).unwrap()));
//! assert_eq!(h.result().0["name"], "Jane");
//! assert_eq!(h.result().0["lastName"], "Doe");
//!
//! h.act(|(_, _, reset)| reset.reset());
//! assert_eq!(h.result().0["name"], "John");
//! ```
//!
//! ## Derived updates
//!
//! `derive` computes the patch from the latest state, so several updates
//! in one tick compose:
//!
//! ```rust
//! use std::collections::BTreeMap;
//! use ezstate::*;
//! use ezstate_core::render_hook;
//!
//! let mut h = render_hook((), |_| {
//!     use_ez_state(BTreeMap::from([("value".to_string(), 2)]), None)
//! });
//! h.act(|(_, update, _)| {
//!     for _ in 0..2 {
//!         update.derive(|s| BTreeMap::from([("value".to_string(), s["value"] + 2)]));
//!     }
//! });
//! assert_eq!(h.result().0["value"], 6);
//! ```
//!
//! ## Merge policies
//!
//! The default policy is a one-level merge: keys in the patch overwrite,
//! other keys are kept. Pass a `MergePolicy` (or any
//! `Fn(&T, T::Patch) -> T` through `use_ez_state_with`) to change it. The
//! policy may change between renders; `update` keeps its identity and
//! always uses the newest one.

pub mod aggregate;
pub mod hook;
pub mod patch;
pub mod policy;
mod tests;

pub use aggregate::*;
pub use hook::*;
pub use patch::*;
pub use policy::*;

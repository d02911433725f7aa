//! Core value model for jsonlight
//!
//! This crate provides a mutable, aliasable view over JSON-shaped data:
//! - `Value`: a detached JSON tree
//! - `JsonArray` / `JsonObject`: handles that either own their container or
//!   are live views of a slot inside another container
//! - `Access`: typed `get_*` accessors and never-failing `opt_*` lookups
//! - `compare`: shallow four-way object diff
//! - `SyncObject`: a lock-guarded object for sharing across threads
//!
//! # Handles and views
//!
//! Navigating into a nested container never copies it. The returned handle
//! remembers where it lives and resolves that location on every call, so
//! writes through it land in the enclosing tree and structural changes to the
//! tree are observed immediately. A view whose slot disappears, or now holds
//! something of another kind, is *expired*: reads fail with
//! [`JsonError::Expired`] and `Display` prints a marker instead of data.
//!
//! ```rust
//! use jsonlight_core::{Access, JsonArray, JsonObject};
//!
//! let doc = JsonObject::from_str(r#"{"items": [[1], [2]]}"#).unwrap();
//! let items = doc.get_array("items").unwrap();
//! let first = items.get_array(0).unwrap();
//!
//! // Moving a handle re-parents it; it keeps tracking its content.
//! let archive = JsonArray::new();
//! archive.push(&first).unwrap();
//! first.push(10).unwrap();
//!
//! assert_eq!(doc.to_string(), r#"{"items":[[2]]}"#);
//! assert_eq!(archive.to_string(), "[[1,10]]");
//! ```

pub use bytes::Bytes;

mod access;
mod array;
pub mod codec;
mod convert;
mod diff;
mod error;
mod item;
mod node;
mod object;
mod slot;
mod sync;
mod value;

pub use access::Access;
pub use array::JsonArray;
pub use convert::{from_value, json_to_value, to_value, value_to_json};
pub use diff::{compare, ObjectDiff};
pub use error::{JsonError, Result};
pub use item::Item;
pub use node::Kind;
pub use object::JsonObject;
pub use slot::Slot;
pub use sync::SyncObject;
pub use value::Value;

//! Slot addressing inside containers.
//!
//! A slot is one step of navigation: a key of an object or an index of an
//! array. A sequence of slots walks from a root value down to a nested
//! container.

use std::fmt;

use crate::value::Value;

/// A single position inside a container.
#[derive(Clone, Debug, Hash, PartialEq, Eq)]
pub enum Slot {
    /// Key of an object.
    Key(String),
    /// Index of an array.
    Index(usize),
}

impl Slot {
    /// The index, if this slot addresses an array element.
    pub fn index(&self) -> Option<usize> {
        match self {
            Slot::Index(i) => Some(*i),
            Slot::Key(_) => None,
        }
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Slot::Key(key) => write!(f, "'{}'", key),
            Slot::Index(index) => write!(f, "[{}]", index),
        }
    }
}

impl From<&str> for Slot {
    fn from(key: &str) -> Self {
        Slot::Key(key.to_string())
    }
}

impl From<String> for Slot {
    fn from(key: String) -> Self {
        Slot::Key(key)
    }
}

impl From<usize> for Slot {
    fn from(index: usize) -> Self {
        Slot::Index(index)
    }
}

/// Get a reference to the value at the given slot path.
///
/// `Key` steps only traverse objects and `Index` steps only traverse arrays.
/// Returns `None` when a step is absent or lands on the wrong container.
pub(crate) fn walk<'a>(tree: &'a Value, path: &[Slot]) -> Option<&'a Value> {
    let mut cursor = tree;
    for slot in path {
        cursor = match (slot, cursor) {
            (Slot::Key(key), Value::Object(map)) => map.get(key)?,
            (Slot::Index(index), Value::Array(arr)) => arr.get(*index)?,
            _ => return None,
        };
    }
    Some(cursor)
}

/// Get a mutable reference to the value at the given slot path.
pub(crate) fn walk_mut<'a>(tree: &'a mut Value, path: &[Slot]) -> Option<&'a mut Value> {
    let mut cursor = tree;
    for slot in path {
        cursor = match (slot, cursor) {
            (Slot::Key(key), Value::Object(map)) => map.get_mut(key)?,
            (Slot::Index(index), Value::Array(arr)) => arr.get_mut(*index)?,
            _ => return None,
        };
    }
    Some(cursor)
}

/// Remove the child at `slot` from a container, shifting later array elements.
pub(crate) fn remove_child(parent: &mut Value, slot: &Slot) -> Option<Value> {
    match (slot, parent) {
        (Slot::Key(key), Value::Object(map)) => map.remove(key),
        (Slot::Index(index), Value::Array(arr)) if *index < arr.len() => Some(arr.remove(*index)),
        _ => None,
    }
}

//! Shallow four-way object diff.

use std::collections::BTreeMap;

use crate::codec;
use crate::error::{JsonError, Result};
use crate::node::Kind;
use crate::object::JsonObject;
use crate::value::Value;

/// Result of [`compare`]. Every field is a new owning object.
#[derive(Clone, Debug)]
pub struct ObjectDiff {
    /// Keys only in the old object, with their old values.
    pub deleted: JsonObject,
    /// Keys only in the new object, with their new values.
    pub created: JsonObject,
    /// Keys in both whose values differ, with the new values.
    pub modified: JsonObject,
    /// Keys in both with identical values.
    pub unchanged: JsonObject,
}

impl ObjectDiff {
    /// True when nothing was deleted, created or modified.
    pub fn is_empty(&self) -> bool {
        self.deleted.is_empty() && self.created.is_empty() && self.modified.is_empty()
    }
}

/// Compare the top-level entries of two objects.
///
/// Values are compared by their compact JSON encoding, so nested containers
/// are equal exactly when they encode to the same text.
pub fn compare(old: &JsonObject, new: &JsonObject) -> Result<ObjectDiff> {
    let old = old.to_value().ok_or(JsonError::expired(Kind::Object))?;
    let new = new.to_value().ok_or(JsonError::expired(Kind::Object))?;
    let (Value::Object(old), Value::Object(mut new)) = (old, new) else {
        return Err(JsonError::expired(Kind::Object));
    };

    let mut deleted = BTreeMap::new();
    let mut modified = BTreeMap::new();
    let mut unchanged = BTreeMap::new();

    for (key, before) in old {
        match new.remove(&key) {
            None => {
                deleted.insert(key, before);
            }
            Some(after) => {
                if codec::encode(&before, None)? == codec::encode(&after, None)? {
                    unchanged.insert(key, after);
                } else {
                    modified.insert(key, after);
                }
            }
        }
    }

    Ok(ObjectDiff {
        deleted: JsonObject::from_map(deleted),
        created: JsonObject::from_map(new),
        modified: JsonObject::from_map(modified),
        unchanged: JsonObject::from_map(unchanged),
    })
}

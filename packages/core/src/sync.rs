//! Mutex-guarded object wrapper.

use std::sync::{Mutex, MutexGuard, PoisonError};

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::access::Access;
use crate::array::JsonArray;
use crate::error::Result;
use crate::item::Item;
use crate::object::JsonObject;
use crate::value::Value;

/// A [`JsonObject`] whose operations are serialized by a lock.
///
/// Each call takes the lock once and releases it before returning. Handles
/// returned by [`get_array`](Access::get_array) and
/// [`get_object`](Access::get_object) are ordinary views and are not covered
/// by the lock.
#[derive(Debug, Default)]
pub struct SyncObject {
    inner: Mutex<JsonObject>,
}

impl SyncObject {
    pub fn new(object: JsonObject) -> Self {
        Self {
            inner: Mutex::new(object),
        }
    }

    fn lock(&self) -> MutexGuard<'_, JsonObject> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Unwrap the guarded object.
    pub fn into_inner(self) -> JsonObject {
        self.inner.into_inner().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn len(&self) -> Option<usize> {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    pub fn keys(&self) -> Vec<String> {
        self.lock().keys()
    }

    pub fn has(&self, key: &str) -> bool {
        self.lock().has(key)
    }

    pub fn put(&self, key: &str, item: impl Into<Item>) -> Result<Option<Value>> {
        self.lock().put(key, item)
    }

    pub fn remove(&self, key: &str) -> Value {
        self.lock().remove(key)
    }

    pub fn rename(&self, old: &str, new: &str) -> bool {
        self.lock().rename(old, new)
    }

    pub fn increment(&self, key: &str) -> Result<i64> {
        self.lock().increment(key)
    }

    pub fn append(&self, key: &str, item: impl Into<Item>) -> Result<JsonArray> {
        self.lock().append(key, item)
    }

    pub fn put_all(&self, other: &JsonObject) -> Result<()> {
        self.lock().put_all(other)
    }

    pub fn to_array(&self, names: &[&str]) -> JsonArray {
        self.lock().to_array(names)
    }

    pub fn to_json(&self, indent: Option<usize>) -> Result<String> {
        self.lock().to_json(indent)
    }

    pub fn to_value(&self) -> Option<Value> {
        self.lock().to_value()
    }

    pub fn fill<T: Serialize + DeserializeOwned>(&self, record: &mut T) -> Result<()> {
        self.lock().fill(record)
    }
}

impl From<JsonObject> for SyncObject {
    fn from(object: JsonObject) -> Self {
        Self::new(object)
    }
}

impl<'k> Access<&'k str> for SyncObject {
    fn lookup(&self, key: &'k str) -> Result<Option<Value>> {
        self.lock().lookup(key)
    }

    fn get_array(&self, key: &'k str) -> Result<JsonArray> {
        self.lock().get_array(key)
    }

    fn get_object(&self, key: &'k str) -> Result<JsonObject> {
        self.lock().get_object(key)
    }
}

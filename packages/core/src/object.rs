//! Object handles.
//!
//! A [`JsonObject`] either owns its entries or is a live view of an object
//! nested inside another container. Writes through a view land in the
//! enclosing tree:
//!
//! ```rust
//! use jsonlight_core::{Access, JsonObject};
//!
//! let root = JsonObject::from_str(r#"{"user": {"name": "ann"}}"#).unwrap();
//! let user = root.get_object("user").unwrap();
//! user.put("age", 31).unwrap();
//!
//! assert_eq!(root.to_string(), r#"{"user":{"age":31,"name":"ann"}}"#);
//! ```

use std::collections::BTreeMap;
use std::fmt;
use std::io::Write;
use std::str::FromStr;

use bytes::Bytes;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::access::{nested, Access};
use crate::array::JsonArray;
use crate::codec;
use crate::convert;
use crate::error::{JsonError, Result};
use crate::item::{Item, Source};
use crate::node::{Kind, Node, Target};
use crate::slot::Slot;
use crate::value::Value;

/// A JSON object handle.
#[derive(Clone)]
pub struct JsonObject {
    pub(crate) node: Node,
}

impl JsonObject {
    /// A new, empty, owning object.
    pub fn new() -> Self {
        Self::from_map(BTreeMap::new())
    }

    /// A new owning object over `entries`.
    pub fn from_map(entries: BTreeMap<String, Value>) -> Self {
        Self {
            node: Node::owned(Kind::Object, Value::Object(entries)),
        }
    }

    pub(crate) fn view(parent: &Node, slot: Slot) -> Self {
        Self {
            node: Node::alias(parent, slot, Kind::Object),
        }
    }

    /// Decode JSON text whose root must be an object.
    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        Self::try_from(codec::decode(bytes)?)
    }

    #[allow(clippy::should_implement_trait)]
    pub fn from_str(text: &str) -> Result<Self> {
        Self::from_slice(text.as_bytes())
    }

    /// Build an owning object from any record that serializes to a map.
    pub fn from_record<T: Serialize + ?Sized>(record: &T) -> Result<Self> {
        Self::try_from(convert::to_value(record)?)
    }

    /// Deserialize the object into a record.
    pub fn to_record<T: DeserializeOwned>(&self) -> Result<T> {
        let value = self.node.read(Value::clone)?;
        convert::from_value(&value)
    }

    /// Overwrite the fields of `record` that this object has keys for.
    ///
    /// Fields without a matching key keep their current value.
    pub fn fill<T: Serialize + DeserializeOwned>(&self, record: &mut T) -> Result<()> {
        let mut merged = match convert::to_value(record)? {
            Value::Object(fields) => fields,
            other => {
                return Err(JsonError::NotAnObject {
                    found: other.type_name(),
                })
            }
        };
        merged.extend(self.node.read(|v| map(v).clone())?);
        *record = convert::from_value(&Value::Object(merged))?;
        Ok(())
    }

    /// Number of entries, `None` when expired.
    pub fn len(&self) -> Option<usize> {
        self.node.read(|v| map(v).len()).ok()
    }

    /// True when the object resolves and holds no entries.
    pub fn is_empty(&self) -> bool {
        self.len() == Some(0)
    }

    pub fn is_expired(&self) -> bool {
        !self.node.resolves()
    }

    pub fn is_owning(&self) -> bool {
        self.node.is_owning()
    }

    /// True when `key` is present, even if it holds null.
    pub fn has(&self, key: &str) -> bool {
        self.node.read(|v| map(v).contains_key(key)).unwrap_or(false)
    }

    /// Keys in sorted order. Empty when expired.
    pub fn keys(&self) -> Vec<String> {
        self.node
            .read(|v| map(v).keys().cloned().collect())
            .unwrap_or_default()
    }

    /// Store `item` under `key`, returning the previous value if any.
    ///
    /// A handle argument is moved here and becomes a view of `key`; it must
    /// not contain this object and must not be expired.
    pub fn put(&self, key: &str, item: impl Into<Item>) -> Result<Option<Value>> {
        let target = Target::At(Slot::from(key));
        match Item::into_source(item.into()) {
            Source::Value(value) => self.node.store(target, value),
            Source::Node(source) => self.node.adopt(target, &source, &[]),
        }
    }

    /// Remove `key`, returning its value. Null when absent or expired.
    pub fn remove(&self, key: &str) -> Value {
        self.node
            .write(|v| match v {
                Value::Object(entries) => entries.remove(key),
                _ => None,
            })
            .ok()
            .flatten()
            .unwrap_or_default()
    }

    /// Turn this view into an owning object, removing it from its parent.
    ///
    /// No-op for an owning object. An expired view becomes an empty owning
    /// object.
    pub fn detach_from_parent(&self) {
        self.node.detach();
    }

    /// Move the value under `old` to `new`. False when `old` is absent.
    pub fn rename(&self, old: &str, new: &str) -> bool {
        self.node
            .write(|v| match v {
                Value::Object(entries) => match entries.remove(old) {
                    Some(value) => {
                        entries.insert(new.to_string(), value);
                        true
                    }
                    None => false,
                },
                _ => false,
            })
            .unwrap_or(false)
    }

    /// Add one to the integer under `key`, starting from 1 when absent.
    pub fn increment(&self, key: &str) -> Result<i64> {
        self.node.write(|v| {
            let Value::Object(entries) = v else {
                return Err(JsonError::expired(Kind::Object));
            };
            let next = match entries.get(key) {
                None => 1,
                Some(Value::Integer(i)) => i
                    .checked_add(1)
                    .ok_or_else(|| JsonError::type_conversion("integer below i64::MAX", "integer"))?,
                Some(other) => return Err(JsonError::type_conversion("integer", other.type_name())),
            };
            entries.insert(key.to_string(), Value::Integer(next));
            Ok(next)
        })?
    }

    /// Append `item` to the array under `key`, creating it when absent.
    ///
    /// Returns a view of that array.
    pub fn append(&self, key: &str, item: impl Into<Item>) -> Result<JsonArray> {
        let item = item.into();
        if let Some(source) = item.node() {
            if source.encloses(&self.node) {
                return Err(JsonError::SelfReference);
            }
            if !source.resolves() {
                return Err(JsonError::ExpiredSource);
            }
        }

        match self.lookup(key)? {
            None => {
                self.node.store(Target::At(Slot::from(key)), Value::array())?;
            }
            Some(Value::Array(_)) => {}
            Some(other) => return Err(JsonError::type_conversion("array", other.type_name())),
        }
        let list = JsonArray::view(&self.node, Slot::from(key));
        list.push(item)?;
        Ok(list)
    }

    /// Copy every entry of `other` into this object.
    ///
    /// Entries are copied as values; handles into `other` stay where they are.
    pub fn put_all(&self, other: &JsonObject) -> Result<()> {
        let entries = other.node.read(|v| map(v).clone())?;
        self.node.write(|v| {
            if let Value::Object(own) = v {
                own.extend(entries);
            }
        })
    }

    /// A new owning array of the values under `names`, null where absent.
    pub fn to_array(&self, names: &[&str]) -> JsonArray {
        names.iter().map(|&name| self.opt(name)).collect()
    }

    /// Snapshot of the entries. Empty when expired.
    pub fn to_map(&self) -> BTreeMap<String, Value> {
        self.node.read(|v| map(v).clone()).unwrap_or_default()
    }

    /// Snapshot of the whole object, `None` when expired.
    pub fn to_value(&self) -> Option<Value> {
        self.node.read(Value::clone).ok()
    }

    /// JSON text, compact or indented by `indent` spaces.
    pub fn to_json(&self, indent: Option<usize>) -> Result<String> {
        let bytes = self.to_bytes(indent)?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }

    pub fn to_bytes(&self, indent: Option<usize>) -> Result<Bytes> {
        let value = self.node.read(Value::clone)?;
        codec::encode(&value, indent)
    }

    /// Write JSON text to `writer`.
    pub fn write_to<W: Write>(&self, mut writer: W, indent: Option<usize>) -> Result<()> {
        let bytes = self.to_bytes(indent)?;
        writer
            .write_all(&bytes)
            .map_err(|e| JsonError::Json(serde_json::Error::io(e)))
    }
}

fn map(value: &Value) -> &BTreeMap<String, Value> {
    static EMPTY: BTreeMap<String, Value> = BTreeMap::new();
    match value {
        Value::Object(entries) => entries,
        _ => &EMPTY,
    }
}

impl Default for JsonObject {
    fn default() -> Self {
        Self::new()
    }
}

impl From<BTreeMap<String, Value>> for JsonObject {
    fn from(entries: BTreeMap<String, Value>) -> Self {
        Self::from_map(entries)
    }
}

impl TryFrom<Value> for JsonObject {
    type Error = JsonError;

    fn try_from(value: Value) -> Result<Self> {
        match value {
            Value::Object(entries) => Ok(Self::from_map(entries)),
            other => Err(JsonError::NotAnObject {
                found: other.type_name(),
            }),
        }
    }
}

impl FromStr for JsonObject {
    type Err = JsonError;

    fn from_str(text: &str) -> Result<Self> {
        Self::from_slice(text.as_bytes())
    }
}

impl<'k> Access<&'k str> for JsonObject {
    fn lookup(&self, key: &'k str) -> Result<Option<Value>> {
        self.node.read(|v| map(v).get(key).cloned())
    }

    fn get_array(&self, key: &'k str) -> Result<JsonArray> {
        self.node
            .read(|v| nested(map(v).get(key), key, Kind::Array))??;
        Ok(JsonArray::view(&self.node, Slot::from(key)))
    }

    fn get_object(&self, key: &'k str) -> Result<JsonObject> {
        self.node
            .read(|v| nested(map(v).get(key), key, Kind::Object))??;
        Ok(JsonObject::view(&self.node, Slot::from(key)))
    }
}

impl fmt::Display for JsonObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.to_value() {
            Some(value) => write!(f, "{}", value),
            None => write!(f, "<EXPIREDOBJECT>"),
        }
    }
}

impl fmt::Debug for JsonObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JsonObject")
            .field("owning", &self.is_owning())
            .field("value", &self.to_value())
            .finish()
    }
}

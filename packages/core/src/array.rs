//! Array handles.

use std::fmt;
use std::io::Write;

use bytes::Bytes;

use crate::access::{nested, Access};
use crate::codec;
use crate::error::{JsonError, Result};
use crate::item::{Item, Source};
use crate::node::{Kind, Node, Target};
use crate::object::JsonObject;
use crate::slot::Slot;
use crate::value::Value;

/// A JSON array handle.
///
/// Owns its elements, or is a live view of an array nested in another
/// container. `Clone` yields another reference to the same handle.
#[derive(Clone)]
pub struct JsonArray {
    pub(crate) node: Node,
}

impl JsonArray {
    /// A new, empty, owning array.
    pub fn new() -> Self {
        Self::from_values(Vec::new())
    }

    /// A new owning array over `values`.
    pub fn from_values(values: Vec<Value>) -> Self {
        Self {
            node: Node::owned(Kind::Array, Value::Array(values)),
        }
    }

    pub(crate) fn view(parent: &Node, slot: Slot) -> Self {
        Self {
            node: Node::alias(parent, slot, Kind::Array),
        }
    }

    /// Number of elements, `None` when expired.
    pub fn len(&self) -> Option<usize> {
        self.node.read(|v| arr(v).len()).ok()
    }

    /// True when the array resolves and holds no elements.
    pub fn is_empty(&self) -> bool {
        self.len() == Some(0)
    }

    pub fn is_expired(&self) -> bool {
        !self.node.resolves()
    }

    pub fn is_owning(&self) -> bool {
        self.node.is_owning()
    }

    /// Replace the element at `index`, returning the previous element.
    ///
    /// Never grows the array: `index` must be below the current length. A
    /// handle argument is moved here and becomes a view of `index`.
    pub fn put(&self, index: usize, item: impl Into<Item>) -> Result<Value> {
        let target = Target::At(Slot::Index(index));
        let previous = match Item::into_source(item.into()) {
            Source::Value(value) => self.node.store(target, value)?,
            Source::Node(source) => self.node.adopt(target, &source, &[])?,
        };
        Ok(previous.unwrap_or_default())
    }

    /// Append items to the tail, in order.
    ///
    /// Every handle argument is checked before anything changes: it must
    /// resolve and must not contain this array. Handles are then moved one by
    /// one; a handle already inside this array leaves its old position first.
    /// When a move takes an element out of an array, every other handle of
    /// the call, placed or still waiting, is shifted to keep designating its
    /// own element.
    pub fn append<I>(&self, items: I) -> Result<&Self>
    where
        I: IntoIterator,
        I::Item: Into<Item>,
    {
        let sources: Vec<Source> = items
            .into_iter()
            .map(|item| Item::into_source(item.into()))
            .collect();
        self.node.read(|_| ())?;
        let handles: Vec<Node> = sources
            .iter()
            .filter_map(|source| match source {
                Source::Node(node) => Some(node.clone()),
                Source::Value(_) => None,
            })
            .collect();
        for handle in &handles {
            if handle.encloses(&self.node) {
                return Err(JsonError::SelfReference);
            }
            if !handle.resolves() {
                return Err(JsonError::ExpiredSource);
            }
        }

        let mut moved = 0;
        for source in sources {
            match source {
                Source::Value(value) => {
                    self.node.store(Target::Tail, value)?;
                }
                Source::Node(node) => {
                    let (placed, rest) = handles.split_at(moved);
                    let followers: Vec<Node> = placed.iter().chain(&rest[1..]).cloned().collect();
                    self.node.adopt(Target::Tail, &node, &followers)?;
                    moved += 1;
                }
            }
        }
        Ok(self)
    }

    /// Append a single item.
    pub fn push(&self, item: impl Into<Item>) -> Result<&Self> {
        self.append([item.into()])
    }

    /// Remove the element at `index`, shifting later elements down.
    ///
    /// `None` when out of range or expired. Views of the removed element and
    /// of later elements expire or move on to other slots.
    pub fn remove(&self, index: usize) -> Option<Value> {
        self.node
            .write(|v| match v {
                Value::Array(items) if index < items.len() => Some(items.remove(index)),
                _ => None,
            })
            .ok()
            .flatten()
    }

    /// Turn this view into an owning array, removing it from its parent.
    ///
    /// No-op for an owning array. An expired view becomes an empty owning
    /// array.
    pub fn detach_from_parent(&self) {
        self.node.detach();
    }

    /// Snapshot of the whole array, `None` when expired.
    pub fn to_value(&self) -> Option<Value> {
        self.node.read(Value::clone).ok()
    }

    /// Snapshot of the elements. Empty when expired.
    pub fn to_vec(&self) -> Vec<Value> {
        match self.to_value() {
            Some(Value::Array(items)) => items,
            _ => Vec::new(),
        }
    }

    /// Elements formatted with `Display` and joined by `sep`.
    pub fn join(&self, sep: &str) -> String {
        self.to_vec()
            .iter()
            .map(Value::to_string)
            .collect::<Vec<_>>()
            .join(sep)
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

fn arr(value: &Value) -> &[Value] {
    match value {
        Value::Array(items) => items,
        _ => &[],
    }
}

impl Default for JsonArray {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Vec<Value>> for JsonArray {
    fn from(values: Vec<Value>) -> Self {
        Self::from_values(values)
    }
}

impl FromIterator<Value> for JsonArray {
    fn from_iter<T: IntoIterator<Item = Value>>(iter: T) -> Self {
        Self::from_values(iter.into_iter().collect())
    }
}

impl Access<usize> for JsonArray {
    fn lookup(&self, index: usize) -> Result<Option<Value>> {
        self.node.read(|v| arr(v).get(index).cloned())
    }

    fn get_array(&self, index: usize) -> Result<JsonArray> {
        self.node
            .read(|v| nested(arr(v).get(index), index, Kind::Array))??;
        Ok(JsonArray::view(&self.node, Slot::Index(index)))
    }

    fn get_object(&self, index: usize) -> Result<JsonObject> {
        self.node
            .read(|v| nested(arr(v).get(index), index, Kind::Object))??;
        Ok(JsonObject::view(&self.node, Slot::Index(index)))
    }
}

impl fmt::Display for JsonArray {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.to_value() {
            Some(value) => write!(f, "{}", value),
            None => write!(f, "<EXPIREDARRAY>"),
        }
    }
}

impl fmt::Debug for JsonArray {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JsonArray")
            .field("owning", &self.is_owning())
            .field("value", &self.to_value())
            .finish()
    }
}

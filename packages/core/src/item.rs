//! Inputs accepted by `put` and `append`.

use std::collections::BTreeMap;

use crate::array::JsonArray;
use crate::node::Node;
use crate::object::JsonObject;
use crate::value::Value;

/// Something that can be stored into a container.
///
/// A plain [`Value`] is copied in. A handle is *moved*: its content leaves
/// its previous home and the handle becomes a view of the new slot.
#[derive(Clone, Debug)]
pub enum Item {
    Value(Value),
    Array(JsonArray),
    Object(JsonObject),
}

impl Item {
    pub(crate) fn into_source(self) -> Source {
        match self {
            Item::Value(value) => Source::Value(value),
            Item::Array(array) => Source::Node(array.node),
            Item::Object(object) => Source::Node(object.node),
        }
    }

    pub(crate) fn node(&self) -> Option<&Node> {
        match self {
            Item::Value(_) => None,
            Item::Array(array) => Some(&array.node),
            Item::Object(object) => Some(&object.node),
        }
    }
}

pub(crate) enum Source {
    Value(Value),
    Node(Node),
}

impl From<Value> for Item {
    fn from(v: Value) -> Self {
        Item::Value(v)
    }
}

impl From<JsonArray> for Item {
    fn from(v: JsonArray) -> Self {
        Item::Array(v)
    }
}

impl From<&JsonArray> for Item {
    fn from(v: &JsonArray) -> Self {
        Item::Array(v.clone())
    }
}

impl From<JsonObject> for Item {
    fn from(v: JsonObject) -> Self {
        Item::Object(v)
    }
}

impl From<&JsonObject> for Item {
    fn from(v: &JsonObject) -> Self {
        Item::Object(v.clone())
    }
}

macro_rules! item_from_value {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Item {
                fn from(v: $t) -> Self {
                    Item::Value(Value::from(v))
                }
            }
        )*
    };
}

item_from_value!(bool, i64, i32, u32, f64, String, &str, BTreeMap<String, Value>);

impl<T: Into<Value>> From<Vec<T>> for Item {
    fn from(v: Vec<T>) -> Self {
        Item::Value(Value::from(v))
    }
}

impl<T: Into<Value>> From<Option<T>> for Item {
    fn from(v: Option<T>) -> Self {
        Item::Value(Value::from(v))
    }
}

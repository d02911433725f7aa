//! Typed accessors shared by arrays, objects and the synchronized wrapper.
//!
//! The `get_*` family fails with a precise error; the `opt_*` family never
//! fails and falls back to a default.
//!
//! Typed getters classify a slot in a fixed order:
//!
//! 1. absent: [`JsonError::NotFound`]
//! 2. present but null: [`JsonError::NilConversion`]
//! 3. present with the wrong shape: [`JsonError::TypeConversion`]
//!
//! An expired handle reports [`JsonError::Expired`] from every getter.
//!
//! # Example
//!
//! ```rust
//! use jsonlight_core::{Access, JsonError, JsonObject};
//!
//! let obj = JsonObject::from_str(r#"{"n": 3, "gone": null}"#).unwrap();
//!
//! assert_eq!(obj.get_long("n").unwrap(), 3);
//! assert_eq!(obj.get_double("n").unwrap(), 3.0);
//! assert!(matches!(obj.get_long("x"), Err(JsonError::NotFound { .. })));
//! assert!(matches!(obj.get_long("gone"), Err(JsonError::NilConversion { .. })));
//! assert_eq!(obj.opt_long_or("x", 7), 7);
//! ```

use crate::array::JsonArray;
use crate::error::{JsonError, Result};
use crate::node::Kind;
use crate::object::JsonObject;
use crate::slot::Slot;
use crate::value::Value;

/// Fetch a slot that must hold a non-null value.
pub(crate) fn required<K, A>(access: &A, key: K) -> Result<Value>
where
    K: Copy + Into<Slot>,
    A: Access<K> + ?Sized,
{
    match access.lookup(key)? {
        None => Err(JsonError::NotFound { slot: key.into() }),
        Some(Value::Null) => Err(JsonError::NilConversion { slot: key.into() }),
        Some(value) => Ok(value),
    }
}

/// Classify the slot `key` of a live container as a nested `kind`, in the
/// same order as [`required`], without copying the nested value.
pub(crate) fn nested(found: Option<&Value>, key: impl Into<Slot>, kind: Kind) -> Result<()> {
    match found {
        None => Err(JsonError::NotFound { slot: key.into() }),
        Some(Value::Null) => Err(JsonError::NilConversion { slot: key.into() }),
        Some(value) if kind.matches(value) => Ok(()),
        Some(other) => Err(JsonError::type_conversion(kind.name(), other.type_name())),
    }
}

/// Keyed read access to a container.
///
/// Implementors supply [`lookup`](Access::lookup) and the two container
/// navigations; every typed and defaulting accessor is derived from those.
pub trait Access<K: Copy + Into<Slot>> {
    /// Snapshot of the value at `key`, `Ok(None)` when absent.
    ///
    /// Fails with [`JsonError::Expired`] when the handle is expired.
    fn lookup(&self, key: K) -> Result<Option<Value>>;

    /// A live view of the array at `key`.
    fn get_array(&self, key: K) -> Result<JsonArray>;

    /// A live view of the object at `key`.
    fn get_object(&self, key: K) -> Result<JsonObject>;

    /// Snapshot of the value at `key`, `None` when absent or expired.
    fn get(&self, key: K) -> Option<Value> {
        self.lookup(key).ok().flatten()
    }

    fn get_bool(&self, key: K) -> Result<bool> {
        match required(self, key)? {
            Value::Bool(b) => Ok(b),
            other => Err(JsonError::type_conversion("bool", other.type_name())),
        }
    }

    fn get_string(&self, key: K) -> Result<String> {
        match required(self, key)? {
            Value::String(s) => Ok(s),
            other => Err(JsonError::type_conversion("string", other.type_name())),
        }
    }

    /// Any number, widened to f64.
    fn get_double(&self, key: K) -> Result<f64> {
        let value = required(self, key)?;
        value
            .as_f64()
            .ok_or_else(|| JsonError::type_conversion("number", value.type_name()))
    }

    /// An integer that fits in 32 bits.
    fn get_int(&self, key: K) -> Result<i32> {
        let long = self.get_long(key)?;
        i32::try_from(long).map_err(|_| JsonError::type_conversion("32-bit integer", "integer"))
    }

    /// An integer. Floats are rejected rather than truncated.
    fn get_long(&self, key: K) -> Result<i64> {
        match required(self, key)? {
            Value::Integer(i) => Ok(i),
            other => Err(JsonError::type_conversion("integer", other.type_name())),
        }
    }

    /// The value at `key`, or null when absent or expired.
    fn opt(&self, key: K) -> Value {
        self.opt_or(key, Value::Null)
    }

    /// The value at `key`, or `default` when absent or expired.
    fn opt_or(&self, key: K, default: Value) -> Value {
        self.get(key).unwrap_or(default)
    }

    fn opt_bool(&self, key: K) -> bool {
        self.opt_bool_or(key, false)
    }

    fn opt_bool_or(&self, key: K, default: bool) -> bool {
        self.get_bool(key).unwrap_or(default)
    }

    fn opt_string(&self, key: K) -> String {
        self.opt_string_or(key, "")
    }

    fn opt_string_or(&self, key: K, default: &str) -> String {
        self.get_string(key).unwrap_or_else(|_| default.to_string())
    }

    fn opt_double(&self, key: K) -> f64 {
        self.opt_double_or(key, 0.0)
    }

    fn opt_double_or(&self, key: K, default: f64) -> f64 {
        self.get_double(key).unwrap_or(default)
    }

    fn opt_int(&self, key: K) -> i32 {
        self.opt_int_or(key, 0)
    }

    fn opt_int_or(&self, key: K, default: i32) -> i32 {
        self.get_int(key).unwrap_or(default)
    }

    fn opt_long(&self, key: K) -> i64 {
        self.opt_long_or(key, 0)
    }

    fn opt_long_or(&self, key: K, default: i64) -> i64 {
        self.get_long(key).unwrap_or(default)
    }

    /// The array view at `key`, or a new empty owning array.
    fn opt_array(&self, key: K) -> JsonArray {
        self.get_array(key).unwrap_or_else(|_| JsonArray::new())
    }

    fn opt_array_or(&self, key: K, default: JsonArray) -> JsonArray {
        self.get_array(key).unwrap_or(default)
    }

    /// The object view at `key`, or a new empty owning object.
    fn opt_object(&self, key: K) -> JsonObject {
        self.get_object(key).unwrap_or_else(|_| JsonObject::new())
    }

    fn opt_object_or(&self, key: K, default: JsonObject) -> JsonObject {
        self.get_object(key).unwrap_or(default)
    }

    /// True when the slot is absent, null, or the handle is expired.
    fn is_null(&self, key: K) -> bool {
        self.get(key).map_or(true, |v| v.is_null())
    }
}

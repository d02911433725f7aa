//! JSON text encoding and decoding.
//!
//! # Example
//!
//! ```rust
//! use jsonlight_core::codec;
//! use jsonlight_core::Value;
//!
//! let value = codec::decode(br#"{"a":[1,2.5,null]}"#).unwrap();
//! let bytes = codec::encode(&value, None).unwrap();
//!
//! assert_eq!(&bytes[..], br#"{"a":[1,2.5,null]}"#);
//! assert_eq!(codec::decode(&bytes).unwrap(), value);
//! ```

use bytes::Bytes;
use serde::Serialize;

use crate::convert::{json_to_value, value_to_json};
use crate::error::Result;
use crate::value::Value;

/// Encode a value as JSON text.
///
/// `None` produces compact output. `Some(n)` pretty-prints with `n` spaces
/// per nesting level. Object keys come out sorted.
pub fn encode(value: &Value, indent: Option<usize>) -> Result<Bytes> {
    let json = value_to_json(value);
    let bytes = match indent {
        None => serde_json::to_vec(&json)?,
        Some(width) => {
            let pad = vec![b' '; width];
            let formatter = serde_json::ser::PrettyFormatter::with_indent(&pad);
            let mut out = Vec::new();
            let mut ser = serde_json::Serializer::with_formatter(&mut out, formatter);
            json.serialize(&mut ser)?;
            out
        }
    };
    Ok(Bytes::from(bytes))
}

/// Decode JSON text into a value.
pub fn decode(bytes: &[u8]) -> Result<Value> {
    let json: serde_json::Value = serde_json::from_slice(bytes)?;
    Ok(json_to_value(json))
}

//! # jsonlight
//!
//! A dynamically-typed, mutable view over JSON-shaped data.
//!
//! ## Crate Organization
//!
//! - [`jsonlight_core`]: `Value`, array/object handles, typed access, diff,
//!   codec and record mapping (re-exported at the root)
//! - [`fetch`]: loading documents from local paths and HTTP(S) URLs
//!   (behind the default `fetch` feature)
//!
//! ## Quick Start
//!
//! ```rust
//! use jsonlight::{Access, JsonObject};
//!
//! let doc = JsonObject::from_str(r#"{"name": "svc", "ports": [80]}"#).unwrap();
//!
//! let ports = doc.get_array("ports").unwrap();
//! ports.push(443).unwrap();
//!
//! assert_eq!(doc.get_string("name").unwrap(), "svc");
//! assert_eq!(doc.opt_int_or("replicas", 1), 1);
//! assert_eq!(doc.to_string(), r#"{"name":"svc","ports":[80,443]}"#);
//! ```
//!
//! ## Records
//!
//! ```rust
//! use jsonlight::JsonObject;
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Debug, Default, PartialEq, Serialize, Deserialize)]
//! struct Limits {
//!     cpu: f64,
//!     memory: i64,
//! }
//!
//! let limits = Limits { cpu: 0.5, memory: 512 };
//! let doc = JsonObject::from_record(&limits).unwrap();
//!
//! let mut restored = Limits::default();
//! doc.fill(&mut restored).unwrap();
//! assert_eq!(restored, limits);
//! ```

pub use jsonlight_core::*;

/// Loading documents from local paths and HTTP(S) URLs.
#[cfg(feature = "fetch")]
pub mod fetch {
    pub use jsonlight_fetch::*;
}

//! format-dispatch
//!
//! Encode and decode serde values as JSON, XML or BSON behind a single
//! format switch.
//!
//! # Features
//!
//! - One entry point per direction, [`encode`] and [`decode`], with a
//!   [`Format`] selector; `Format::Default` is an alias for JSON
//! - BSON output travels as base64 text so every format is text-in/text-out
//! - Absent values and empty text short-circuit instead of failing
//! - Failed decodes fall back to the raw text (for `String` targets) or the
//!   target's default, except for XML documents that parse but do not fit
//!   the target type
//!
//! # Usage
//!
//! ```rust
//! use format_dispatch::{Format, decode, encode};
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Debug, Default, PartialEq, Serialize, Deserialize)]
//! struct Point {
//!     x: i32,
//!     y: i32,
//! }
//!
//! let text = encode(Some(&Point { x: 1, y: 2 }), Format::Bson).unwrap();
//! let point: Point = decode(&text, Format::Bson).unwrap();
//! assert_eq!(point, Point { x: 1, y: 2 });
//!
//! let raw: String = decode("not-json", Format::Json).unwrap();
//! assert_eq!(raw, "not-json");
//! ```

pub mod codec;
pub mod config;
pub mod dispatcher;
pub mod error;
pub mod format;

use serde::Serialize;
use serde::de::DeserializeOwned;

pub use dispatcher::Dispatcher;
pub use error::{DispatchError, Result};
pub use format::Format;

/// Encode a value with a default [`Dispatcher`]
///
/// `None` encodes to an empty string for every format.
pub fn encode<T: Serialize>(value: Option<&T>, format: Format) -> Result<String> {
    Dispatcher::default().encode(value, format)
}

/// Encode a value as JSON with a default [`Dispatcher`]
pub fn encode_default<T: Serialize>(value: Option<&T>) -> Result<String> {
    Dispatcher::default().encode_default(value)
}

/// Decode text with a default [`Dispatcher`]
///
/// Empty text decodes to `T::default()`.
pub fn decode<T>(text: &str, format: Format) -> Result<T>
where
    T: DeserializeOwned + Default + 'static,
{
    Dispatcher::default().decode(text, format)
}

/// Decode JSON text with a default [`Dispatcher`]
pub fn decode_default<T>(text: &str) -> Result<T>
where
    T: DeserializeOwned + Default + 'static,
{
    Dispatcher::default().decode_default(text)
}

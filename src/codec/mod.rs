//! Codec adapters
//!
//! One adapter per wire format, each a thin shim over an external crate:
//! - `JsonCodec` over serde_json
//! - `XmlCodec` over quick-xml's serde support
//! - `BsonCodec` over bson, with base64 carrying the bytes as text
//!
//! # Design
//!
//! Every adapter implements the `Codec` trait so the dispatcher can route to
//! them through one generic path. Adapters never apply fallbacks; they report
//! what went wrong as an `EncodeError` or `DecodeError` and leave policy to
//! the dispatcher.

mod bson;
mod json;
mod xml;

pub use self::bson::BsonCodec;
pub use self::json::JsonCodec;
pub use self::xml::{XML_DECLARATION, XmlCodec, XmlDocument};

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::{DecodeError, EncodeError};
use crate::format::Format;

/// Core trait for a text-in/text-out codec
///
/// Implementations delegate the actual encoding to an external crate.
pub trait Codec {
    /// Format this codec implements
    fn format(&self) -> Format;

    /// Encode a value as text
    ///
    /// # Arguments
    /// * `value` - Value to encode
    ///
    /// # Returns
    /// Encoded text, or the encoder's failure
    fn encode<T: Serialize>(&self, value: &T) -> Result<String, EncodeError>;

    /// Decode text into a value of type `T`
    ///
    /// # Arguments
    /// * `text` - Non-empty encoded text
    ///
    /// # Returns
    /// Decoded value, or the stage that failed
    fn decode<T: DeserializeOwned>(&self, text: &str) -> Result<T, DecodeError>;
}

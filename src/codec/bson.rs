//! BSON adapter
//!
//! The bson crate produces raw bytes; the public contract is text, so the
//! bytes travel as standard padded base64.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde::Serialize;
use serde::de::DeserializeOwned;

use super::Codec;
use crate::error::{DecodeError, EncodeError};
use crate::format::Format;

/// BSON codec. Values must serialize to a document (a struct or a map).
#[derive(Debug, Clone, Copy, Default)]
pub struct BsonCodec;

impl BsonCodec {
    /// Create a new BSON codec
    pub fn new() -> Self {
        Self
    }
}

impl Codec for BsonCodec {
    fn format(&self) -> Format {
        Format::Bson
    }

    fn encode<T: Serialize>(&self, value: &T) -> Result<String, EncodeError> {
        let bytes = ::bson::to_vec(value).map_err(|e| EncodeError::Bson(e.to_string()))?;
        Ok(STANDARD.encode(bytes))
    }

    fn decode<T: DeserializeOwned>(&self, text: &str) -> Result<T, DecodeError> {
        let bytes = STANDARD
            .decode(text.trim())
            .map_err(|e| DecodeError::Base64(e.to_string()))?;
        ::bson::from_slice(&bytes).map_err(|e| DecodeError::Bson(e.to_string()))
    }
}

//! Format dispatcher
//!
//! Routes values and text to the codec chosen by a [`Format`] and applies the
//! call-level policy around it:
//! - Absent values encode to an empty string
//! - Empty text decodes to the target's default
//! - An unknown format encodes to an empty string and decodes to the default
//! - Recoverable decode failures return a fallback value instead of an error
//!
//! # XML asymmetry
//!
//! JSON and BSON decode failures never reach the caller. XML is only guarded
//! while the text is parsed as a document: malformed XML falls back like the
//! other formats, but a well-formed document that cannot be coerced into the
//! target type returns `DecodeError::XmlCoercion`. Callers that want uniform
//! recovery can map that error to a default themselves.
//!
//! XML round trips are also lossier than JSON and BSON for some plain-data
//! shapes:
//! - An empty `Vec` field is written as no element at all, so decoding it
//!   back fails with `DecodeError::XmlCoercion` (missing field) unless the
//!   field carries `#[serde(default)]`
//! - Leading and trailing whitespace in string fields is trimmed on decode

mod fallback;

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, trace};

use crate::codec::{BsonCodec, Codec, JsonCodec, XmlCodec};
use crate::config::CodecConfig;
use crate::error::Result;
use crate::format::Format;

use self::fallback::fallback_value;

/// Stateless format dispatcher
///
/// Holds only output options, so it is `Copy` and can be shared freely
/// across threads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dispatcher {
    /// Indent JSON and XML output
    pretty: bool,

    /// Write the XML declaration before the root element
    xml_declaration: bool,
}

impl Default for Dispatcher {
    fn default() -> Self {
        Self {
            pretty: false,
            xml_declaration: true,
        }
    }
}

impl Dispatcher {
    /// Create a dispatcher with compact output and an XML declaration
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a dispatcher from the `[codec]` configuration section
    pub fn from_config(config: &CodecConfig) -> Self {
        Self {
            pretty: config.pretty,
            xml_declaration: config.xml_declaration,
        }
    }

    /// Enable or disable indented output
    pub fn with_pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    /// Enable or disable the XML declaration
    pub fn with_xml_declaration(mut self, declaration: bool) -> Self {
        self.xml_declaration = declaration;
        self
    }

    fn json(&self) -> JsonCodec {
        if self.pretty {
            JsonCodec::pretty()
        } else {
            JsonCodec::new()
        }
    }

    fn xml(&self) -> XmlCodec {
        XmlCodec::new(self.pretty, self.xml_declaration)
    }

    /// Encode a value in the given format
    ///
    /// # Arguments
    /// * `value` - Value to encode; `None` encodes to an empty string
    /// * `format` - Format selector
    ///
    /// # Returns
    /// * `Result<String>` - Encoded text, or the codec's failure
    pub fn encode<T: Serialize>(&self, value: Option<&T>, format: Format) -> Result<String> {
        let Some(value) = value else {
            trace!("Absent value, encoding as empty text");
            return Ok(String::new());
        };

        match format {
            Format::Default | Format::Json => encode_with(&self.json(), value),
            Format::Xml => encode_with(&self.xml(), value),
            Format::Bson => encode_with(&BsonCodec::new(), value),
            Format::Unknown => {
                debug!("Unknown format selector, encoding as empty text");
                Ok(String::new())
            }
        }
    }

    /// Encode a value as JSON
    pub fn encode_default<T: Serialize>(&self, value: Option<&T>) -> Result<String> {
        self.encode(value, Format::Default)
    }

    /// Decode text in the given format
    ///
    /// # Arguments
    /// * `text` - Encoded text; empty text decodes to `T::default()`
    /// * `format` - Format selector
    ///
    /// # Returns
    /// * `Result<T>` - Decoded value or fallback value. The only error is
    ///   `DecodeError::XmlCoercion`.
    pub fn decode<T>(&self, text: &str, format: Format) -> Result<T>
    where
        T: DeserializeOwned + Default + 'static,
    {
        if text.is_empty() {
            trace!("Empty text, decoding as default value");
            return Ok(T::default());
        }

        match format {
            Format::Default | Format::Json => decode_with(&self.json(), text),
            Format::Xml => decode_with(&self.xml(), text),
            Format::Bson => decode_with(&BsonCodec::new(), text),
            Format::Unknown => {
                debug!("Unknown format selector, decoding as default value");
                Ok(T::default())
            }
        }
    }

    /// Decode JSON text
    pub fn decode_default<T>(&self, text: &str) -> Result<T>
    where
        T: DeserializeOwned + Default + 'static,
    {
        self.decode(text, Format::Default)
    }
}

fn encode_with<C: Codec, T: Serialize>(codec: &C, value: &T) -> Result<String> {
    trace!("Encoding as {}", codec.format());
    Ok(codec.encode(value)?)
}

fn decode_with<C, T>(codec: &C, text: &str) -> Result<T>
where
    C: Codec,
    T: DeserializeOwned + Default + 'static,
{
    trace!("Decoding {} byte(s) as {}", text.len(), codec.format());
    match codec.decode(text) {
        Ok(value) => Ok(value),
        Err(err) if err.is_recoverable() => {
            debug!("Decode as {} failed, using fallback: {}", codec.format(), err);
            Ok(fallback_value(text))
        }
        Err(err) => Err(err.into()),
    }
}

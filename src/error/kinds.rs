use std::{fmt, io};

/// Crate-wide `Result` type using [`DispatchError`] as the error.
///
/// This alias is re-exported by the parent `error` module and is intended
/// to be used throughout the crate for fallible operations.
pub type Result<T> = std::result::Result<T, DispatchError>;

/// Top-level error type for format-dispatch operations.
///
/// This type wraps more specific error kinds and provides a single
/// error type that can be used throughout the crate.
#[derive(Debug)]
pub enum DispatchError {
    /// Encoder failures, propagated unchanged from the codec.
    Encode(EncodeError),

    /// Decoder failures that the fallback policy does not absorb.
    Decode(DecodeError),

    /// Configuration errors.
    Config(ConfigError),

    /// I/O errors.
    Io(io::Error),

    /// Generic error with a free-form message.
    Generic(String),
}

/// Encoder failures, one variant per codec.
#[derive(Debug)]
pub enum EncodeError {
    /// serde_json refused the value.
    Json(String),

    /// quick-xml refused the value.
    Xml(String),

    /// The value is not representable as a BSON document.
    Bson(String),
}

/// Decoder failures, one variant per stage that can fail.
#[derive(Debug)]
pub enum DecodeError {
    /// Text is not valid JSON for the target type.
    Json(String),

    /// Text is not valid base64.
    Base64(String),

    /// Bytes are not a valid BSON document for the target type.
    Bson(String),

    /// Text is not a well-formed XML document.
    XmlMalformed(String),

    /// A well-formed XML document does not fit the target type.
    XmlCoercion(String),
}

/// Configuration-specific errors.
#[derive(Debug)]
pub enum ConfigError {
    /// Config file not found.
    FileNotFound(String),

    /// Invalid config format.
    InvalidFormat(String),

    /// Invalid field value.
    InvalidValue { field: String, value: String },
}

impl DecodeError {
    /// Whether the dispatcher may replace this failure with a fallback value.
    ///
    /// Only the XML coercion stage escapes the fallback policy.
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, DecodeError::XmlCoercion(_))
    }
}

/* ========================= Display & Error impls ========================= */

impl fmt::Display for DispatchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DispatchError::Encode(e) => write!(f, "Encode error: {e}"),
            DispatchError::Decode(e) => write!(f, "Decode error: {e}"),
            DispatchError::Config(e) => write!(f, "Configuration error: {e}"),
            DispatchError::Io(e) => write!(f, "I/O error: {e}"),
            DispatchError::Generic(msg) => write!(f, "{msg}"),
        }
    }
}

impl fmt::Display for EncodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EncodeError::Json(msg) => write!(f, "JSON: {msg}"),
            EncodeError::Xml(msg) => write!(f, "XML: {msg}"),
            EncodeError::Bson(msg) => write!(f, "BSON: {msg}"),
        }
    }
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DecodeError::Json(msg) => write!(f, "JSON: {msg}"),
            DecodeError::Base64(msg) => write!(f, "base64: {msg}"),
            DecodeError::Bson(msg) => write!(f, "BSON: {msg}"),
            DecodeError::XmlMalformed(msg) => write!(f, "malformed XML: {msg}"),
            DecodeError::XmlCoercion(msg) => {
                write!(f, "XML document does not match target type: {msg}")
            }
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::FileNotFound(path) => write!(f, "Config file not found: {path}"),
            ConfigError::InvalidFormat(msg) => write!(f, "Invalid config format: {msg}"),
            ConfigError::InvalidValue { field, value } => {
                write!(f, "Invalid value '{value}' for field '{field}'")
            }
        }
    }
}

impl std::error::Error for DispatchError {}
impl std::error::Error for EncodeError {}
impl std::error::Error for DecodeError {}
impl std::error::Error for ConfigError {}

/* ========================= Conversions to DispatchError ========================= */

impl From<io::Error> for DispatchError {
    fn from(err: io::Error) -> Self {
        DispatchError::Io(err)
    }
}

impl From<EncodeError> for DispatchError {
    fn from(err: EncodeError) -> Self {
        DispatchError::Encode(err)
    }
}

impl From<DecodeError> for DispatchError {
    fn from(err: DecodeError) -> Self {
        DispatchError::Decode(err)
    }
}

impl From<ConfigError> for DispatchError {
    fn from(err: ConfigError) -> Self {
        DispatchError::Config(err)
    }
}

impl From<String> for DispatchError {
    fn from(msg: String) -> Self {
        DispatchError::Generic(msg)
    }
}

impl From<&str> for DispatchError {
    fn from(msg: &str) -> Self {
        DispatchError::Generic(msg.to_owned())
    }
}

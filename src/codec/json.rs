//! JSON adapter over serde_json

use serde::Serialize;
use serde::de::DeserializeOwned;

use super::Codec;
use crate::error::{DecodeError, EncodeError};
use crate::format::Format;

/// JSON codec with optional pretty printing
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonCodec {
    /// Enable pretty printing
    pretty: bool,
}

impl JsonCodec {
    /// Create a compact JSON codec
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a JSON codec that indents its output
    pub fn pretty() -> Self {
        Self { pretty: true }
    }
}

impl Codec for JsonCodec {
    fn format(&self) -> Format {
        Format::Json
    }

    fn encode<T: Serialize>(&self, value: &T) -> Result<String, EncodeError> {
        let encoded = if self.pretty {
            serde_json::to_string_pretty(value)
        } else {
            serde_json::to_string(value)
        };
        encoded.map_err(|e| EncodeError::Json(e.to_string()))
    }

    fn decode<T: DeserializeOwned>(&self, text: &str) -> Result<T, DecodeError> {
        serde_json::from_str(text).map_err(|e| DecodeError::Json(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use std::collections::BTreeMap;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Order {
        id: i64,
        items: Vec<String>,
    }

    #[test]
    fn test_compact_output() {
        let order = Order {
            id: 7,
            items: vec!["tea".into(), "cake".into()],
        };
        let text = JsonCodec::new().encode(&order).unwrap();
        assert_eq!(text, r#"{"id":7,"items":["tea","cake"]}"#);
    }

    #[test]
    fn test_pretty_output_decodes_back() {
        let mut map = BTreeMap::new();
        map.insert("a".to_string(), 1);
        let text = JsonCodec::pretty().encode(&map).unwrap();
        assert!(text.contains('\n'));

        let back: BTreeMap<String, i32> = JsonCodec::new().decode(&text).unwrap();
        assert_eq!(back, map);
    }

    #[test]
    fn test_decode_reports_json_error() {
        let err = JsonCodec::new().decode::<Order>("{\"id\":").unwrap_err();
        assert!(matches!(err, DecodeError::Json(_)));
        assert!(err.is_recoverable());
    }

    #[test]
    fn test_non_string_keys_fail_to_encode() {
        let mut map = BTreeMap::new();
        map.insert(vec![1u8], "x");
        let err = JsonCodec::new().encode(&map).unwrap_err();
        assert!(matches!(err, EncodeError::Json(_)));
    }
}

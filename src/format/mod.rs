//! Format selector
//!
//! A closed set of formats with an explicit `Unknown` branch. Anything that
//! does not name a supported format, whether a numeric code out of range or
//! a misspelled name, lands on `Unknown` and the dispatcher treats it as a
//! silent no-op.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Which codec a call should use
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    /// Alias for [`Format::Json`]
    #[default]
    Default,

    /// JSON text via serde_json
    Json,

    /// XML document via quick-xml
    Xml,

    /// BSON bytes carried as base64 text
    Bson,

    /// Unrecognized selector
    #[serde(other)]
    Unknown,
}

impl Format {
    /// All selectors that route to a codec, `Default` included.
    pub const SUPPORTED: [Format; 4] = [Format::Default, Format::Json, Format::Xml, Format::Bson];

    /// Map a numeric selector to a format.
    ///
    /// `0..=3` are `Default`, `Json`, `Xml` and `Bson`; everything else is
    /// `Unknown`.
    pub fn from_code(code: i64) -> Self {
        match code {
            0 => Format::Default,
            1 => Format::Json,
            2 => Format::Xml,
            3 => Format::Bson,
            _ => Format::Unknown,
        }
    }

    /// Map a format name (case-insensitive) to a format.
    pub fn parse(name: &str) -> Self {
        match name.trim().to_lowercase().as_str() {
            "default" => Format::Default,
            "json" => Format::Json,
            "xml" => Format::Xml,
            "bson" => Format::Bson,
            _ => Format::Unknown,
        }
    }

    /// Concrete format this selector routes to.
    pub fn resolve(self) -> Self {
        match self {
            Format::Default => Format::Json,
            other => other,
        }
    }

    /// Check if the selector routes to a codec
    pub fn is_supported(self) -> bool {
        !matches!(self, Format::Unknown)
    }

    /// Lowercase name, as accepted by [`Format::parse`]
    pub fn name(self) -> &'static str {
        match self {
            Format::Default => "default",
            Format::Json => "json",
            Format::Xml => "xml",
            Format::Bson => "bson",
            Format::Unknown => "unknown",
        }
    }
}

impl From<&str> for Format {
    fn from(name: &str) -> Self {
        Format::parse(name)
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_json_alias() {
        assert_eq!(Format::default(), Format::Default);
        assert_eq!(Format::Default.resolve(), Format::Json);
        assert_eq!(Format::Xml.resolve(), Format::Xml);
        assert_eq!(Format::Unknown.resolve(), Format::Unknown);
    }

    #[test]
    fn test_from_code() {
        assert_eq!(Format::from_code(0), Format::Default);
        assert_eq!(Format::from_code(1), Format::Json);
        assert_eq!(Format::from_code(2), Format::Xml);
        assert_eq!(Format::from_code(3), Format::Bson);
        assert_eq!(Format::from_code(4), Format::Unknown);
        assert_eq!(Format::from_code(-1), Format::Unknown);
    }

    #[test]
    fn test_parse_names() {
        assert_eq!(Format::parse("JSON"), Format::Json);
        assert_eq!(Format::parse(" xml "), Format::Xml);
        assert_eq!(Format::from("bson"), Format::Bson);
        assert_eq!(Format::parse("yaml"), Format::Unknown);
        assert!(!Format::parse("").is_supported());
    }

    #[test]
    fn test_serde_names() {
        #[derive(Deserialize)]
        struct Holder {
            format: Format,
        }

        let holder: Holder = toml::from_str(r#"format = "xml""#).unwrap();
        assert_eq!(holder.format, Format::Xml);

        let holder: Holder = toml::from_str(r#"format = "msgpack""#).unwrap();
        assert_eq!(holder.format, Format::Unknown);

        assert_eq!(serde_json::to_string(&Format::Bson).unwrap(), "\"bson\"");
    }
}

//! XML adapter over quick-xml
//!
//! Decoding happens in two stages. `XmlDocument::parse` walks the text with
//! a streaming reader and only checks that it is a single well-formed
//! document; its failures are `DecodeError::XmlMalformed`. `XmlDocument::coerce`
//! then deserializes the document into the target type; its failures are
//! `DecodeError::XmlCoercion`, which the dispatcher does not recover from.

use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};
use quick_xml::se::Serializer;
use serde::Serialize;
use serde::de::DeserializeOwned;

use super::Codec;
use crate::error::{DecodeError, EncodeError};
use crate::format::Format;

/// Prologue written ahead of the root element
pub const XML_DECLARATION: &str = r#"<?xml version="1.0" encoding="utf-8"?>"#;

/// Root element name used when the type name is not a valid XML name
const FALLBACK_ROOT: &str = "value";

/// XML codec
#[derive(Debug, Clone, Copy)]
pub struct XmlCodec {
    /// Indent nested elements by two spaces
    pretty: bool,

    /// Write `XML_DECLARATION` before the root element
    declaration: bool,
}

impl XmlCodec {
    /// Create a new XML codec
    ///
    /// # Arguments
    /// * `pretty` - Indent nested elements
    /// * `declaration` - Write the XML declaration
    pub fn new(pretty: bool, declaration: bool) -> Self {
        Self {
            pretty,
            declaration,
        }
    }
}

impl Default for XmlCodec {
    fn default() -> Self {
        Self::new(false, true)
    }
}

impl Codec for XmlCodec {
    fn format(&self) -> Format {
        Format::Xml
    }

    fn encode<T: Serialize>(&self, value: &T) -> Result<String, EncodeError> {
        let mut buffer = String::new();
        if self.declaration {
            buffer.push_str(XML_DECLARATION);
            if self.pretty {
                buffer.push('\n');
            }
        }

        let root = root_tag::<T>();
        let mut serializer = Serializer::with_root(&mut buffer, Some(root.as_str()))
            .map_err(|e| EncodeError::Xml(e.to_string()))?;
        if self.pretty {
            serializer.indent(' ', 2);
        }
        value
            .serialize(serializer)
            .map_err(|e| EncodeError::Xml(e.to_string()))?;

        Ok(buffer)
    }

    fn decode<T: DeserializeOwned>(&self, text: &str) -> Result<T, DecodeError> {
        XmlDocument::parse(text)?.coerce()
    }
}

/// A single well-formed XML document, not yet bound to a type
#[derive(Debug, Clone)]
pub struct XmlDocument<'a> {
    text: &'a str,
    root: String,
}

impl<'a> XmlDocument<'a> {
    /// Check that `text` holds exactly one balanced root element
    ///
    /// Declarations, comments, processing instructions and whitespace may
    /// surround the root; text or a second element may not. Entity
    /// references in text and attribute values must resolve, and attributes
    /// must be unique and quoted.
    pub fn parse(text: &'a str) -> Result<Self, DecodeError> {
        let mut reader = Reader::from_str(text);
        reader.config_mut().trim_text(true);

        let mut depth = 0usize;
        let mut root: Option<String> = None;

        loop {
            let event = reader.read_event().map_err(|e| {
                DecodeError::XmlMalformed(format!("{e} at byte {}", reader.buffer_position()))
            })?;

            match event {
                Event::Start(start) => {
                    check_attributes(&start)?;
                    if depth == 0 {
                        claim_root(&mut root, start.name().as_ref())?;
                    }
                    depth += 1;
                }
                Event::Empty(empty) => {
                    check_attributes(&empty)?;
                    if depth == 0 {
                        claim_root(&mut root, empty.name().as_ref())?;
                    }
                }
                Event::End(_) => depth = depth.saturating_sub(1),
                Event::Text(_) | Event::CData(_) if depth == 0 => {
                    return Err(DecodeError::XmlMalformed(
                        "text outside of the root element".to_string(),
                    ));
                }
                Event::Text(content) => {
                    content
                        .unescape()
                        .map_err(|e| DecodeError::XmlMalformed(e.to_string()))?;
                }
                Event::Eof => break,
                _ => {}
            }
        }

        if depth > 0 {
            return Err(DecodeError::XmlMalformed(format!(
                "{depth} element(s) left open at end of input"
            )));
        }

        match root {
            Some(root) => Ok(Self { text, root }),
            None => Err(DecodeError::XmlMalformed("no root element".to_string())),
        }
    }

    /// Name of the root element
    pub fn root(&self) -> &str {
        &self.root
    }

    /// Deserialize the document into `T`
    pub fn coerce<T: DeserializeOwned>(&self) -> Result<T, DecodeError> {
        quick_xml::de::from_str(self.text).map_err(|e| DecodeError::XmlCoercion(e.to_string()))
    }
}

fn check_attributes(element: &BytesStart<'_>) -> Result<(), DecodeError> {
    for attribute in element.attributes().with_checks(true) {
        attribute
            .map_err(|e| DecodeError::XmlMalformed(e.to_string()))?
            .unescape_value()
            .map_err(|e| DecodeError::XmlMalformed(e.to_string()))?;
    }
    Ok(())
}

fn claim_root(root: &mut Option<String>, name: &[u8]) -> Result<(), DecodeError> {
    if let Some(existing) = root {
        return Err(DecodeError::XmlMalformed(format!(
            "second root element after <{existing}>"
        )));
    }
    *root = Some(String::from_utf8_lossy(name).into_owned());
    Ok(())
}

/// Root element name for values of type `T`
///
/// Last path segment of the Rust type name with generics dropped, e.g.
/// `Vec<String>` becomes `Vec`.
fn root_tag<T: ?Sized>() -> String {
    let full = std::any::type_name::<T>();
    let base = full.split('<').next().unwrap_or(full);
    let name = base.rsplit("::").next().unwrap_or(base);

    let valid = name
        .chars()
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.'));

    if valid {
        name.to_string()
    } else {
        FALLBACK_ROOT.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Station {
        code: String,
        elevation: i32,
    }

    #[test]
    fn test_root_tag_names() {
        assert_eq!(root_tag::<Station>(), "Station");
        assert_eq!(root_tag::<Vec<String>>(), "Vec");
        assert_eq!(root_tag::<i32>(), "i32");
        assert_eq!(root_tag::<(i32, i32)>(), "value");
        assert_eq!(root_tag::<[u8]>(), "value");
    }

    #[test]
    fn test_encode_with_declaration() {
        let station = Station {
            code: "KSEA".into(),
            elevation: 131,
        };
        let text = XmlCodec::default().encode(&station).unwrap();
        assert!(text.starts_with(XML_DECLARATION));
        assert!(text.contains("<Station>"));
        assert!(text.contains("<code>KSEA</code>"));
        assert!(text.ends_with("</Station>"));
    }

    #[test]
    fn test_encode_without_declaration() {
        let station = Station {
            code: "EGLL".into(),
            elevation: 25,
        };
        let text = XmlCodec::new(false, false).encode(&station).unwrap();
        assert!(text.starts_with("<Station>"));
    }

    #[test]
    fn test_pretty_output_decodes_back() {
        let station = Station {
            code: "LFPG".into(),
            elevation: 119,
        };
        let codec = XmlCodec::new(true, true);
        let text = codec.encode(&station).unwrap();
        assert!(text.contains("\n  <code>"));

        let back: Station = codec.decode(&text).unwrap();
        assert_eq!(back, station);
    }

    #[test]
    fn test_parse_accepts_prologue_and_comments() {
        let doc = XmlDocument::parse(
            "<?xml version=\"1.0\"?>\n<!-- station -->\n<Station><code>A</code></Station>\n",
        )
        .unwrap();
        assert_eq!(doc.root(), "Station");

        let doc = XmlDocument::parse("<Empty/>").unwrap();
        assert_eq!(doc.root(), "Empty");

        let doc = XmlDocument::parse(r#"<Note lang="en&amp;fr">a &lt; b</Note>"#).unwrap();
        assert_eq!(doc.root(), "Note");
    }

    #[test]
    fn test_parse_rejects_malformed_text() {
        for text in [
            "not-xml",
            "<a><b></a>",
            "<a>",
            "<a></a><b></b>",
            "<a></a>trailing",
            "<a>&bogus;</a>",
            r#"<a x="1" x="2">5</a>"#,
            "<a x=>v</a>",
            r#"<a x="&bogus;"/>"#,
        ] {
            let err = XmlDocument::parse(text).unwrap_err();
            assert!(
                matches!(err, DecodeError::XmlMalformed(_)),
                "expected malformed for {text:?}, got {err:?}"
            );
        }
    }

    #[test]
    fn test_coercion_failure_is_not_recoverable() {
        let err = XmlCodec::default()
            .decode::<Station>("<Station><code>A</code></Station>")
            .unwrap_err();
        assert!(matches!(err, DecodeError::XmlCoercion(_)));
        assert!(!err.is_recoverable());
    }
}

//! Event-loop construction of the element arena.

use std::collections::HashMap;
use std::io::BufRead;
use std::path::Path;

use quick_xml::events::{BytesStart, Event};
use quick_xml::reader::Reader;

use crate::document::{Document, ElementData, ElementId};

/// Error raised while parsing an XML document.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum XmlError {
    /// I/O error reading the source file.
    #[error("I/O error")]
    Io(#[from] std::io::Error),

    /// XML parsing error.
    #[error("XML parse error")]
    Parse(#[from] quick_xml::Error),

    /// Encoding error during XML parsing.
    #[error("encoding error")]
    Encoding(#[from] quick_xml::encoding::EncodingError),

    /// Document contains no root element.
    #[error("document has no root element")]
    NoRoot,

    /// Input ended while elements were still open.
    #[error("unexpected end of document")]
    UnexpectedEof,

    /// Markup found after the root element was closed.
    #[error("content after root element")]
    TrailingContent,
}

impl Document {
    /// Parse a document from a string.
    ///
    /// # Errors
    ///
    /// Returns an error if the input is not well-formed XML or contains no
    /// root element.
    pub fn parse_str(xml: &str) -> Result<Self, XmlError> {
        let mut reader = Reader::from_str(xml);
        reader.config_mut().trim_text(false);
        Self::from_reader(&mut reader)
    }

    /// Parse a document from a file.
    ///
    /// The file is read whole before parsing; index files are small.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or its contents are not
    /// well-formed XML.
    pub fn parse_file(path: &Path) -> Result<Self, XmlError> {
        let xml = std::fs::read_to_string(path)?;
        Self::parse_str(&xml)
    }

    fn from_reader<R: BufRead>(reader: &mut Reader<R>) -> Result<Self, XmlError> {
        let mut elements: Vec<ElementData> = Vec::new();
        let mut stack: Vec<ElementId> = Vec::new();
        let mut root: Option<ElementId> = None;
        let mut buf = Vec::new();

        loop {
            match reader.read_event_into(&mut buf)? {
                Event::Start(e) => {
                    let id = push_element(&mut elements, &stack, &mut root, reader, &e)?;
                    stack.push(id);
                }
                Event::Empty(e) => {
                    push_element(&mut elements, &stack, &mut root, reader, &e)?;
                }
                Event::Text(e) => {
                    if let Some(&current) = stack.last() {
                        let text = reader.decoder().decode(&e)?;
                        elements[current.0].text.push_str(&text);
                    }
                }
                Event::GeneralRef(e) => {
                    // Entity references (e.g., &lt; &gt; &amp;)
                    if let Some(&current) = stack.last() {
                        let entity = reader.decoder().decode(&e)?;
                        elements[current.0].text.push_str(&decode_entity(&entity));
                    }
                }
                Event::CData(e) => {
                    if let Some(&current) = stack.last() {
                        elements[current.0]
                            .text
                            .push_str(&String::from_utf8_lossy(&e));
                    }
                }
                Event::End(_) => {
                    stack.pop();
                }
                Event::Eof => {
                    if !stack.is_empty() {
                        return Err(XmlError::UnexpectedEof);
                    }
                    break;
                }
                Event::Comment(_) | Event::Decl(_) | Event::PI(_) | Event::DocType(_) => {}
            }
            buf.clear();
        }

        let root = root.ok_or(XmlError::NoRoot)?;
        Ok(Self { elements, root })
    }
}

/// Allocate an element and link it under the current parent.
fn push_element<R: BufRead>(
    elements: &mut Vec<ElementData>,
    stack: &[ElementId],
    root: &mut Option<ElementId>,
    reader: &Reader<R>,
    e: &BytesStart,
) -> Result<ElementId, XmlError> {
    let id = ElementId(elements.len());
    elements.push(ElementData {
        name: decode_name(reader, e),
        attrs: decode_attrs(reader, e),
        text: String::new(),
        children: Vec::new(),
    });

    if let Some(&parent) = stack.last() {
        elements[parent.0].children.push(id);
    } else if root.is_some() {
        return Err(XmlError::TrailingContent);
    } else {
        *root = Some(id);
    }

    Ok(id)
}

fn decode_name<R: BufRead>(reader: &Reader<R>, e: &BytesStart) -> String {
    let name = e.name();
    reader.decoder().decode(name.as_ref()).map_or_else(
        |_| String::from_utf8_lossy(name.as_ref()).into_owned(),
        std::borrow::Cow::into_owned,
    )
}

fn decode_attrs<R: BufRead>(reader: &Reader<R>, e: &BytesStart) -> HashMap<String, String> {
    let mut attrs = HashMap::new();
    for attr in e.attributes().flatten() {
        let key = reader.decoder().decode(attr.key.as_ref()).map_or_else(
            |_| String::from_utf8_lossy(attr.key.as_ref()).into_owned(),
            std::borrow::Cow::into_owned,
        );

        // Skip namespace declarations
        if key.starts_with("xmlns") {
            continue;
        }

        let value = attr.unescape_value().map_or_else(
            |_| String::from_utf8_lossy(&attr.value).into_owned(),
            std::borrow::Cow::into_owned,
        );

        attrs.insert(key, value);
    }
    attrs
}

/// Decode XML entity references to their character values.
fn decode_entity(entity: &str) -> String {
    match entity {
        "lt" => "<".to_owned(),
        "gt" => ">".to_owned(),
        "amp" => "&".to_owned(),
        "apos" => "'".to_owned(),
        "quot" => "\"".to_owned(),
        // Numeric character references
        s if s.starts_with('#') => {
            let code = if s.starts_with("#x") || s.starts_with("#X") {
                u32::from_str_radix(&s[2..], 16).ok()
            } else {
                s[1..].parse::<u32>().ok()
            };
            code.and_then(char::from_u32)
                .map_or_else(|| format!("&{entity};"), |c| c.to_string())
        }
        // Unknown entity - preserve as-is
        _ => format!("&{entity};"),
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_parse_simple_element() {
        let doc = Document::parse_str("<p>Hello</p>").unwrap();

        assert_eq!(doc.name(doc.root()), "p");
        assert_eq!(doc.text(doc.root()), "Hello");
        assert!(doc.children(doc.root()).is_empty());
    }

    #[test]
    fn test_parse_nested_elements() {
        let doc = Document::parse_str("<r><a><b/></a></r>").unwrap();

        let a = doc.child_named(doc.root(), "a").unwrap();
        let b = doc.child_named(a, "b").unwrap();
        assert_eq!(doc.name(b), "b");
        assert!(doc.children(b).is_empty());
    }

    #[test]
    fn test_parse_attribute_entities() {
        let doc = Document::parse_str(r#"<k name="A &amp; B"/>"#).unwrap();

        assert_eq!(doc.attr(doc.root(), "name"), Some("A & B"));
    }

    #[test]
    fn test_parse_text_entities() {
        let doc = Document::parse_str("<p>a &lt;b&gt; &#65;</p>").unwrap();

        assert_eq!(doc.text(doc.root()), "a <b> A");
    }

    #[test]
    fn test_parse_unknown_entity_preserved() {
        let doc = Document::parse_str("<p>x &unknown; y</p>").unwrap();

        assert_eq!(doc.text(doc.root()), "x &unknown; y");
    }

    #[test]
    fn test_parse_cdata() {
        let doc = Document::parse_str("<p><![CDATA[<raw>]]></p>").unwrap();

        assert_eq!(doc.text(doc.root()), "<raw>");
    }

    #[test]
    fn test_parse_skips_declaration_and_comments() {
        let doc = Document::parse_str("<?xml version=\"1.0\"?><!-- note --><book/>").unwrap();

        assert_eq!(doc.name(doc.root()), "book");
    }

    #[test]
    fn test_parse_namespace_declarations_skipped() {
        let doc =
            Document::parse_str(r#"<book xmlns="http://example.org/ns" title="X"/>"#).unwrap();

        assert_eq!(doc.attr(doc.root(), "title"), Some("X"));
        assert_eq!(doc.attr(doc.root(), "xmlns"), None);
    }

    #[test]
    fn test_parse_mismatched_tags_is_error() {
        let result = Document::parse_str("<a><b></a>");

        assert!(matches!(result, Err(XmlError::Parse(_))));
    }

    #[test]
    fn test_parse_empty_input_is_no_root() {
        let result = Document::parse_str("");

        assert!(matches!(result, Err(XmlError::NoRoot)));
    }

    #[test]
    fn test_parse_trailing_content_is_error() {
        let result = Document::parse_str("<a/><b/>");

        assert!(matches!(result, Err(XmlError::TrailingContent)));
    }

    #[test]
    fn test_parse_truncated_input_is_error() {
        let result = Document::parse_str("<a><b>");

        assert!(result.is_err());
    }

    #[test]
    fn test_parse_file_reads_document() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("book.xml");
        fs::write(&path, r#"<book title="X"/>"#).unwrap();

        let doc = Document::parse_file(&path).unwrap();

        assert_eq!(doc.attr(doc.root(), "title"), Some("X"));
    }

    #[test]
    fn test_parse_file_missing_is_io_error() {
        let dir = tempfile::tempdir().unwrap();

        let result = Document::parse_file(&dir.path().join("missing.xml"));

        assert!(matches!(result, Err(XmlError::Io(_))));
    }

    #[test]
    fn test_decode_entity_numeric_forms() {
        assert_eq!(decode_entity("#65"), "A");
        assert_eq!(decode_entity("#x41"), "A");
        assert_eq!(decode_entity("#zzz"), "&#zzz;");
    }
}

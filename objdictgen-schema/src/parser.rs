//! Node XML loader.
//!
//! Parses a compact XML description of one node into an in-memory [`Node`]:
//!
//! ```xml
//! <node name="Demo" id="0x01" type="slave" defaultStringSize="10">
//!   <entry index="0x00A0" name="UNS8[0-100]">
//!     <sub index="1" value="0x0005"/>
//!     <sub index="2" value="0"/>
//!     <sub index="3" value="100"/>
//!   </entry>
//! </node>
//! ```

use crate::error::ParseError;
use crate::types::{Entry, Node, Value};
use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

/// Parses a node description from an XML string.
///
/// # Arguments
/// * `xml` - XML node content
///
/// # Returns
/// Parsed node or parse error.
///
/// # Errors
/// Returns `ParseError` if the XML is malformed, an attribute is missing or
/// unparseable, or an index is declared twice.
pub fn parse_node(xml: &str) -> Result<Node, ParseError> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut node: Option<Node> = None;
    let mut current: Option<(u16, Entry)> = None;
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) => handle_element(e, false, &mut node, &mut current)?,
            Ok(Event::Empty(ref e)) => handle_element(e, true, &mut node, &mut current)?,
            Ok(Event::End(ref e)) => {
                if e.name().as_ref() == b"entry" {
                    if let Some((index, entry)) = current.take() {
                        insert_entry(&mut node, index, entry)?;
                    }
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(ParseError::Xml(e)),
            _ => {}
        }
        buf.clear();
    }

    if current.is_some() {
        return Err(ParseError::structure("Unterminated entry element"));
    }

    let node = node.ok_or_else(|| ParseError::structure("No node element found"))?;
    tracing::debug!(node = %node.name, entries = node.len(), "loaded node");
    Ok(node)
}

/// Dispatches a start or empty element.
fn handle_element(
    e: &BytesStart<'_>,
    is_empty: bool,
    node: &mut Option<Node>,
    current: &mut Option<(u16, Entry)>,
) -> Result<(), ParseError> {
    let name_bytes = e.name().as_ref().to_vec();
    let name = std::str::from_utf8(&name_bytes)?;

    match name {
        "node" => {
            if node.is_some() {
                return Err(ParseError::structure("Multiple node elements"));
            }
            *node = Some(parse_node_element(e)?);
        }
        "entry" => {
            if node.is_none() {
                return Err(ParseError::structure("entry outside of node element"));
            }
            if current.is_some() {
                return Err(ParseError::structure("Nested entry elements"));
            }
            let (index, entry) = parse_entry_element(e)?;
            if is_empty {
                insert_entry(node, index, entry)?;
            } else {
                *current = Some((index, entry));
            }
        }
        "sub" => {
            let Some((index, entry)) = current.as_mut() else {
                return Err(ParseError::structure("sub outside of entry element"));
            };
            let (subindex, value) = parse_sub_element(e)?;
            if entry.fields.insert(subindex, value).is_some() {
                return Err(ParseError::structure(format!(
                    "Duplicate subindex 0x{subindex:02X} in entry 0x{index:04X}"
                )));
            }
        }
        _ => {}
    }

    Ok(())
}

/// Adds a finished entry to the node.
fn insert_entry(node: &mut Option<Node>, index: u16, entry: Entry) -> Result<(), ParseError> {
    let node = node
        .as_mut()
        .ok_or_else(|| ParseError::structure("entry outside of node element"))?;
    if node.has_entry(index) {
        return Err(ParseError::DuplicateIndex { index });
    }
    node.insert_entry(index, entry);
    Ok(())
}

/// Parses the node element attributes.
fn parse_node_element(e: &BytesStart<'_>) -> Result<Node, ParseError> {
    let mut name: Option<String> = None;
    let mut id: u8 = 0;
    let mut node_type = None;
    let mut description = None;
    let mut default_string_size = None;

    for attr in e.attributes().flatten() {
        let key = std::str::from_utf8(attr.key.as_ref())?;
        let unescaped = attr.unescape_value()?;
        let value: &str = &unescaped;

        match key {
            "name" => name = Some(value.to_string()),
            "id" => {
                id = parse_integer(value)
                    .and_then(|v| u8::try_from(v).ok())
                    .ok_or_else(|| ParseError::invalid_attr("node", "id", value))?
            }
            "type" => node_type = Some(value.to_string()),
            "description" => description = Some(value.to_string()),
            "defaultStringSize" => {
                default_string_size = Some(
                    value
                        .parse()
                        .map_err(|_| ParseError::invalid_attr("node", "defaultStringSize", value))?,
                )
            }
            _ => {}
        }
    }

    let name = name.ok_or_else(|| ParseError::missing_attr("node", "name"))?;

    let mut node = Node::new(name, id);
    if let Some(node_type) = node_type {
        node.node_type = node_type;
    }
    node.description = description;
    if let Some(size) = default_string_size {
        node.default_string_size = size;
    }

    Ok(node)
}

/// Parses the entry element attributes.
fn parse_entry_element(e: &BytesStart<'_>) -> Result<(u16, Entry), ParseError> {
    let mut index: Option<u16> = None;
    let mut name: Option<String> = None;

    for attr in e.attributes().flatten() {
        let key = std::str::from_utf8(attr.key.as_ref())?;
        let unescaped = attr.unescape_value()?;
        let value: &str = &unescaped;

        match key {
            "index" => {
                index = Some(
                    parse_integer(value)
                        .and_then(|v| u16::try_from(v).ok())
                        .ok_or_else(|| ParseError::invalid_attr("entry", "index", value))?,
                )
            }
            "name" => name = Some(value.to_string()),
            _ => {}
        }
    }

    let index = index.ok_or_else(|| ParseError::missing_attr("entry", "index"))?;
    let name = name.ok_or_else(|| ParseError::missing_attr("entry", "name"))?;

    Ok((index, Entry::new(name)))
}

/// Parses a sub element into its subindex and typed value.
fn parse_sub_element(e: &BytesStart<'_>) -> Result<(u8, Value), ParseError> {
    let mut subindex: Option<u8> = None;
    let mut kind = "integer".to_string();
    let mut raw: Option<String> = None;

    for attr in e.attributes().flatten() {
        let key = std::str::from_utf8(attr.key.as_ref())?;
        let unescaped = attr.unescape_value()?;
        let value: &str = &unescaped;

        match key {
            "index" => {
                subindex = Some(
                    parse_integer(value)
                        .and_then(|v| u8::try_from(v).ok())
                        .ok_or_else(|| ParseError::invalid_attr("sub", "index", value))?,
                )
            }
            "kind" => kind = value.to_string(),
            "value" => raw = Some(value.to_string()),
            _ => {}
        }
    }

    let subindex = subindex.ok_or_else(|| ParseError::missing_attr("sub", "index"))?;
    let raw = raw.ok_or_else(|| ParseError::missing_attr("sub", "value"))?;

    let value = match kind.as_str() {
        "integer" => parse_integer(&raw)
            .map(Value::Integer)
            .ok_or_else(|| ParseError::invalid_attr("sub", "value", &raw))?,
        "real" => raw
            .trim()
            .parse()
            .map(Value::Real)
            .map_err(|_| ParseError::invalid_attr("sub", "value", &raw))?,
        "boolean" => match raw.trim() {
            "true" | "1" => Value::Boolean(true),
            "false" | "0" => Value::Boolean(false),
            _ => return Err(ParseError::invalid_attr("sub", "value", &raw)),
        },
        "string" => Value::Text(raw),
        _ => return Err(ParseError::invalid_attr("sub", "kind", kind.as_str())),
    };

    Ok((subindex, value))
}

/// Parses a decimal or `0x` hexadecimal integer, optionally negative.
///
/// Only one leading `-` is accepted; the digits after it (and after `0x`)
/// must be unsigned.
fn parse_integer(s: &str) -> Option<i128> {
    let s = s.trim();
    let (negative, digits) = match s.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, s),
    };

    let (radix, digits) = match digits
        .strip_prefix("0x")
        .or_else(|| digits.strip_prefix("0X"))
    {
        Some(hex) => (16, hex),
        None => (10, digits),
    };
    if !digits.starts_with(|c: char| c.is_digit(radix)) {
        return None;
    }

    let magnitude = i128::from_str_radix(digits, radix).ok()?;
    if negative {
        magnitude.checked_neg()
    } else {
        Some(magnitude)
    }
}

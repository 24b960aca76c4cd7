//! Markup parsing on top of `quick-xml`
//!
//! Accepts HTML-flavoured fragments: void elements may be left unclosed,
//! mismatched end tags close the nearest matching open element, and a few
//! HTML entities are understood on top of the XML ones.

use super::{Document, ElementNode, NodeId};
use quick_xml::escape::unescape_with;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use std::borrow::Cow;

pub(super) fn parse_into(
    document: &mut Document,
    root: NodeId,
    markup: &str,
) -> Result<(), quick_xml::Error> {
    let mut reader = Reader::from_str(markup);
    let config = reader.config_mut();
    config.check_end_names = false;
    config.allow_unmatched_ends = true;

    // Open elements, root at the bottom
    let mut stack: Vec<NodeId> = vec![root];

    loop {
        let parent = stack.last().copied().unwrap_or(root);
        match reader.read_event()? {
            Event::Start(start) => {
                let element = element_from(&start)?;
                let is_void = element.is_void();
                let id = document.append_element(parent, element);
                if !is_void {
                    stack.push(id);
                }
            }
            Event::Empty(start) => {
                let element = element_from(&start)?;
                document.append_element(parent, element);
            }
            Event::End(end) => {
                let name = String::from_utf8_lossy(end.name().as_ref()).to_ascii_lowercase();
                let open = stack[1..].iter().rposition(|&id| {
                    document.element(id).is_some_and(|element| element.name == name)
                });
                // Stray end tags are dropped
                if let Some(depth) = open {
                    stack.truncate(depth + 1);
                }
            }
            Event::Text(text) => {
                let raw = String::from_utf8_lossy(&text);
                let value = unescape_lenient(&raw);
                if !value.is_empty() {
                    document.append_text(parent, value.into_owned());
                }
            }
            Event::CData(data) => {
                let value = String::from_utf8_lossy(&data).into_owned();
                if !value.is_empty() {
                    document.append_text(parent, value);
                }
            }
            Event::Comment(comment) => {
                let value = String::from_utf8_lossy(&comment).into_owned();
                document.append_comment(parent, value);
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if stack.len() > 1 {
        log::debug!("markup ended with {} unclosed elements", stack.len() - 1);
    }

    Ok(())
}

fn element_from(start: &BytesStart<'_>) -> Result<ElementNode, quick_xml::Error> {
    let name = String::from_utf8_lossy(start.name().as_ref()).into_owned();
    let mut element = ElementNode::new(name);
    for attr in start.html_attributes() {
        let attr = attr?;
        let key = String::from_utf8_lossy(attr.key.as_ref()).to_ascii_lowercase();
        let raw = String::from_utf8_lossy(&attr.value);
        let value = unescape_lenient(&raw).into_owned();
        element.set_attribute(key, value);
    }
    Ok(element)
}

/// Unescape entities, keeping the raw text when an entity is unknown
fn unescape_lenient(raw: &str) -> Cow<'_, str> {
    match unescape_with(raw, resolve_entity) {
        Ok(value) => value,
        Err(err) => {
            log::debug!("keeping raw text after unescape failure: {}", err);
            Cow::Borrowed(raw)
        }
    }
}

fn resolve_entity(entity: &str) -> Option<&'static str> {
    match entity {
        "amp" => Some("&"),
        "lt" => Some("<"),
        "gt" => Some(">"),
        "quot" => Some("\""),
        "apos" => Some("'"),
        "nbsp" => Some("\u{a0}"),
        _ => None,
    }
}

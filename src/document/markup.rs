//! Markup serialization in `innerHTML` form

use super::node::ElementNode;
use quick_xml::escape::{escape, partial_escape};

/// Elements that never carry content or an end tag
const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source",
    "track", "wbr",
];

/// Check whether a (lowercase) tag name is a void element
pub fn is_void_element(name: &str) -> bool {
    VOID_ELEMENTS.contains(&name)
}

/// Append escaped text content
pub fn write_text(out: &mut String, text: &str) {
    out.push_str(&partial_escape(text));
}

/// Append a start tag with its attributes
pub fn write_start_tag(out: &mut String, element: &ElementNode) {
    out.push('<');
    out.push_str(&element.name);
    for attr in &element.attributes {
        out.push(' ');
        out.push_str(&attr.name);
        out.push_str("=\"");
        out.push_str(&escape(attr.value.as_str()));
        out.push('"');
    }
    out.push('>');
}

/// Append an end tag, skipped for void elements
pub fn write_end_tag(out: &mut String, element: &ElementNode) {
    if element.is_void() {
        return;
    }
    out.push_str("</");
    out.push_str(&element.name);
    out.push('>');
}

pub fn write_comment(out: &mut String, comment: &str) {
    out.push_str("<!--");
    out.push_str(comment);
    out.push_str("-->");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_escaping() {
        let mut out = String::new();
        write_text(&mut out, "a < b & c > d");
        assert_eq!(out, "a &lt; b &amp; c &gt; d");
    }

    #[test]
    fn test_void_element_has_no_end_tag() {
        let br = ElementNode::new("br");
        let mut out = String::new();
        write_start_tag(&mut out, &br);
        write_end_tag(&mut out, &br);
        assert_eq!(out, "<br>");
    }

    #[test]
    fn test_attribute_quotes_escaped() {
        let mut link = ElementNode::new("a");
        link.set_attribute("title", "say \"hi\"");
        let mut out = String::new();
        write_start_tag(&mut out, &link);
        assert_eq!(out, "<a title=\"say &quot;hi&quot;\">");
    }
}

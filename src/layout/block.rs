//! Block-level element classification

/// The kind of block a run of text is laid out in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BlockKind {
    /// Regular paragraph
    #[default]
    Paragraph,
    /// Heading with level (1-6)
    Heading { level: u8 },
    /// List item
    ListItem,
    /// Preformatted text, whitespace kept
    Preformatted,
    /// Any other block container
    Generic,
}

impl BlockKind {
    /// Classify a (lowercase) tag name, `None` for inline elements
    pub fn for_element(name: &str) -> Option<Self> {
        let kind = match name {
            "p" => BlockKind::Paragraph,
            "h1" | "h2" | "h3" | "h4" | "h5" | "h6" => BlockKind::Heading {
                level: name.as_bytes()[1] - b'0',
            },
            "li" | "dt" | "dd" => BlockKind::ListItem,
            "pre" => BlockKind::Preformatted,
            "div" | "ul" | "ol" | "dl" | "blockquote" | "section" | "article" | "header"
            | "footer" | "aside" | "nav" | "main" | "figure" | "figcaption" | "table" | "tr"
            | "hr" => BlockKind::Generic,
            _ => return None,
        };
        Some(kind)
    }

    /// Get the line height multiplier for this block kind
    pub fn line_height_multiplier(&self) -> f32 {
        match self {
            BlockKind::Heading { level } => match level {
                1 => 1.5,
                2 => 1.4,
                3 => 1.3,
                _ => 1.2,
            },
            _ => 1.0,
        }
    }

    /// Get the spacing after this block (in line heights)
    pub fn spacing_after(&self) -> f32 {
        match self {
            BlockKind::Paragraph | BlockKind::Preformatted => 1.0,
            BlockKind::Heading { .. } => 0.5,
            BlockKind::ListItem => 0.25,
            BlockKind::Generic => 0.0,
        }
    }

    /// Whether whitespace is kept as written
    pub fn preserves_whitespace(&self) -> bool {
        matches!(self, BlockKind::Preformatted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_block_kind() {
        assert_eq!(BlockKind::for_element("p"), Some(BlockKind::Paragraph));
        assert_eq!(
            BlockKind::for_element("h3"),
            Some(BlockKind::Heading { level: 3 })
        );
        assert_eq!(BlockKind::for_element("span"), None);
        assert!(BlockKind::Preformatted.preserves_whitespace());
    }

    #[test]
    fn test_heading_scaling() {
        assert_eq!(BlockKind::Heading { level: 1 }.line_height_multiplier(), 1.5);
        assert_eq!(BlockKind::Heading { level: 6 }.line_height_multiplier(), 1.2);
        assert_eq!(BlockKind::Paragraph.line_height_multiplier(), 1.0);
    }
}

//! Line breaking algorithm

use crate::layout::font::FontMetrics;
use std::ops::Range;
use unicode_segmentation::UnicodeSegmentation;

/// A wrapped line of a block
#[derive(Debug, Clone, PartialEq)]
pub struct LineLayout {
    /// Byte range within the block text this line covers
    pub byte_range: Range<usize>,
    /// Actual width of content
    pub width: f32,
}

/// Greedy line breaker
#[derive(Debug, Default, Clone, Copy)]
pub struct LineBreaker;

impl LineBreaker {
    pub fn new() -> Self {
        Self
    }

    /// Wrap `text` into lines no wider than `max_width`
    ///
    /// Lines break after whitespace when possible and mid-word otherwise.
    /// `\n` forces a break. Empty text still yields one empty line.
    pub fn break_lines(&self, text: &str, max_width: f32, metrics: &FontMetrics) -> Vec<LineLayout> {
        let mut lines = Vec::new();

        let mut line_start: usize = 0;
        let mut x: f32 = 0.0;
        let mut has_content = false;
        let mut last_break: Option<(usize, f32)> = None;

        for (byte_idx, grapheme) in text.grapheme_indices(true) {
            if grapheme == "\n" || grapheme == "\r\n" {
                lines.push(LineLayout {
                    byte_range: line_start..byte_idx,
                    width: x,
                });
                line_start = byte_idx + grapheme.len();
                x = 0.0;
                has_content = false;
                last_break = None;
                continue;
            }

            let cluster_width = metrics.cluster_width(grapheme);
            let is_space = grapheme.chars().all(char::is_whitespace);

            // Trailing whitespace may hang past the edge
            if !is_space && x + cluster_width > max_width && has_content {
                let (break_offset, break_x) = last_break.unwrap_or((byte_idx, x));
                lines.push(LineLayout {
                    byte_range: line_start..break_offset,
                    width: break_x,
                });
                line_start = break_offset;
                x -= break_x;
                last_break = None;
            }

            if is_space {
                last_break = Some((byte_idx + grapheme.len(), x + cluster_width));
            }

            x += cluster_width;
            has_content = true;
        }

        lines.push(LineLayout {
            byte_range: line_start..text.len(),
            width: x,
        });

        lines
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn metrics() -> FontMetrics {
        FontMetrics::monospace(8.0, 10.0)
    }

    #[test]
    fn test_empty_text() {
        let lines = LineBreaker::new().break_lines("", 100.0, &metrics());
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].byte_range, 0..0);
    }

    #[test]
    fn test_single_line() {
        let lines = LineBreaker::new().break_lines("Hello", 100.0, &metrics());
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].byte_range, 0..5);
        assert_eq!(lines[0].width, 40.0);
    }

    #[test]
    fn test_line_wrap_at_space() {
        // 8px per char, 40px width = 5 chars per line
        let lines = LineBreaker::new().break_lines("Hello World", 40.0, &metrics());
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].byte_range, 0..6);
        assert_eq!(lines[1].byte_range, 6..11);
    }

    #[test]
    fn test_emergency_break_inside_word() {
        let lines = LineBreaker::new().break_lines("abcdefghij", 32.0, &metrics());
        let ranges: Vec<_> = lines.iter().map(|l| l.byte_range.clone()).collect();
        assert_eq!(ranges, vec![0..4, 4..8, 8..10]);
    }

    #[test]
    fn test_explicit_newline() {
        let lines = LineBreaker::new().break_lines("Hello\nWorld", 1000.0, &metrics());
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].byte_range, 0..5);
        assert_eq!(lines[1].byte_range, 6..11);
    }
}

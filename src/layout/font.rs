//! Font metrics for measuring fragments

use rustc_hash::FxHasher;
use serde::Deserialize;
use std::hash::{Hash, Hasher};

/// Metrics needed for text layout
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FontMetrics {
    /// Line height in logical pixels
    pub line_height: f32,
    /// Width of ASCII characters (0-127)
    #[serde(default)]
    pub char_widths: Vec<f32>,
    /// Default width for non-ASCII characters
    pub default_width: f32,
}

impl Default for FontMetrics {
    fn default() -> Self {
        // 14px * 1.2 = 16.8 line height, 8.41px monospace advance
        Self::monospace(8.41, 16.8)
    }
}

impl FontMetrics {
    /// Every character has the same advance
    pub fn monospace(char_width: f32, line_height: f32) -> Self {
        Self {
            line_height,
            char_widths: vec![char_width; 128],
            default_width: char_width,
        }
    }

    /// Get width of a character
    pub fn width(&self, c: char) -> f32 {
        if c.is_ascii() {
            if let Some(w) = self.char_widths.get(c as usize) {
                return *w;
            }
        }
        self.default_width
    }

    /// Width of a grapheme cluster
    pub fn cluster_width(&self, grapheme: &str) -> f32 {
        if grapheme == "\t" {
            self.default_width * 4.0
        } else if grapheme.chars().all(|c| c.is_control()) {
            0.0
        } else {
            // Combining marks ride on the base character
            grapheme.chars().next().map(|c| self.width(c)).unwrap_or(0.0)
        }
    }

    /// Hash of every metric, equal for metrics that measure identically
    pub fn fingerprint(&self) -> u64 {
        let mut hasher = FxHasher::default();
        self.line_height.to_bits().hash(&mut hasher);
        self.default_width.to_bits().hash(&mut hasher);
        for width in &self.char_widths {
            width.to_bits().hash(&mut hasher);
        }
        hasher.finish()
    }
}

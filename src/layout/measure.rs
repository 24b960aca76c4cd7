//! Headless render surface that measures fragments with font metrics

use crate::fragment::{Fragment, FragmentNode};
use crate::layout::block::BlockKind;
use crate::layout::font::FontMetrics;
use crate::layout::line_break::{LineBreaker, LineLayout};
use crate::surface::RenderSurface;
use serde::Deserialize;

/// Size of a page in logical pixels
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Default for Viewport {
    fn default() -> Self {
        // US Letter text area at 96 DPI with 1" margins
        Self {
            width: 624.0,
            height: 864.0,
        }
    }
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// Layout result for a single block
#[derive(Debug, Clone)]
pub struct BlockLayout {
    pub kind: BlockKind,
    /// Whitespace-normalized text of the block
    pub text: String,
    /// Lines produced by line breaking
    pub lines: Vec<LineLayout>,
    /// Height of the lines alone
    pub line_height_total: f32,
}

/// A [`RenderSurface`] that lays fragments out into blocks and lines
#[derive(Debug, Clone)]
pub struct MeasuredSurface {
    viewport: Viewport,
    metrics: FontMetrics,
    line_breaker: LineBreaker,
    blocks: Vec<BlockLayout>,
    content_height: f32,
    markup: String,
    render_count: usize,
}

impl MeasuredSurface {
    pub fn new(viewport: Viewport, metrics: FontMetrics) -> Self {
        Self {
            viewport,
            metrics,
            line_breaker: LineBreaker::new(),
            blocks: Vec::new(),
            content_height: 0.0,
            markup: String::new(),
            render_count: 0,
        }
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn metrics(&self) -> &FontMetrics {
        &self.metrics
    }

    /// Height of the currently rendered content
    pub fn content_height(&self) -> f32 {
        self.content_height
    }

    /// Blocks of the currently rendered content
    pub fn blocks(&self) -> &[BlockLayout] {
        &self.blocks
    }

    /// Markup of the currently rendered content
    pub fn markup(&self) -> &str {
        &self.markup
    }

    /// Number of fragments rendered so far
    pub fn render_count(&self) -> usize {
        self.render_count
    }

    fn layout_blocks(&self, fragment: &Fragment) -> Vec<BlockLayout> {
        let mut collector = BlockCollector::default();
        collector.walk(&fragment.nodes);
        collector.flush();

        collector
            .blocks
            .into_iter()
            .map(|(kind, text)| {
                let lines = self
                    .line_breaker
                    .break_lines(&text, self.viewport.width, &self.metrics);
                let line_height_total =
                    lines.len() as f32 * self.metrics.line_height * kind.line_height_multiplier();
                BlockLayout {
                    kind,
                    text,
                    lines,
                    line_height_total,
                }
            })
            .collect()
    }
}

impl Default for MeasuredSurface {
    fn default() -> Self {
        Self::new(Viewport::default(), FontMetrics::default())
    }
}

impl RenderSurface for MeasuredSurface {
    fn render(&mut self, fragment: &Fragment) {
        self.blocks = self.layout_blocks(fragment);

        // Spacing after the last block falls outside the page
        let spacing: f32 = self
            .blocks
            .iter()
            .rev()
            .skip(1)
            .map(|block| block.kind.spacing_after() * self.metrics.line_height)
            .sum();
        self.content_height =
            self.blocks.iter().map(|b| b.line_height_total).sum::<f32>() + spacing;

        self.markup = fragment.to_markup();
        self.render_count += 1;
    }

    fn overflows(&self) -> bool {
        self.content_height > self.viewport.height
    }

    fn cache_tag(&self) -> Option<String> {
        Some(format!(
            "{}x{}-{:016x}",
            self.viewport.width,
            self.viewport.height,
            self.metrics.fingerprint()
        ))
    }
}

/// Splits a fragment into block-level runs of text
#[derive(Default)]
struct BlockCollector {
    blocks: Vec<(BlockKind, String)>,
    kind: BlockKind,
    text: String,
}

impl BlockCollector {
    fn walk(&mut self, nodes: &[FragmentNode]) {
        for node in nodes {
            match node {
                FragmentNode::Text(text) => self.push_text(text),
                FragmentNode::Element { element, children } => {
                    if element.name == "br" {
                        self.text.push('\n');
                        continue;
                    }
                    match BlockKind::for_element(&element.name) {
                        Some(kind) => {
                            self.flush();
                            let outer = std::mem::replace(&mut self.kind, kind);
                            self.walk(children);
                            self.flush();
                            self.kind = outer;
                        }
                        None => self.walk(children),
                    }
                }
                FragmentNode::Comment(_) => {}
            }
        }
    }

    fn push_text(&mut self, text: &str) {
        if self.kind.preserves_whitespace() {
            self.text.push_str(text);
            return;
        }
        for c in text.chars() {
            if c.is_ascii_whitespace() {
                if !self.text.is_empty() && !self.text.ends_with([' ', '\n']) {
                    self.text.push(' ');
                }
            } else {
                self.text.push(c);
            }
        }
    }

    fn flush(&mut self) {
        let text = std::mem::take(&mut self.text);
        let text = if self.kind.preserves_whitespace() {
            text
        } else {
            text.trim_end_matches(' ').to_string()
        };
        if !text.trim().is_empty() {
            self.blocks.push((self.kind, text));
        }
    }
}

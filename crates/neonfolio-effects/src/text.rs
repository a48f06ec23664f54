//! Terminal text element.

use neonfolio_core::{Glyph, TextTarget, glyphs_to_string, plain_glyphs};
use ratatui::{style::Style, text::Span};

/// A run of glyphs standing in for a page element's text content.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextCell {
    glyphs: Vec<Glyph>,
}

impl TextCell {
    /// Create a cell showing `text`.
    pub fn new(text: &str) -> Self {
        Self {
            glyphs: plain_glyphs(text),
        }
    }

    /// Current glyphs.
    pub fn glyphs(&self) -> &[Glyph] {
        &self.glyphs
    }

    /// Whether any glyph still carries scramble or cursor styling.
    pub fn has_markup(&self) -> bool {
        self.glyphs.iter().any(|g| !matches!(g, Glyph::Plain(_)))
    }

    /// Styled spans, grouping runs of plain text into one span.
    pub fn spans(&self, plain: Style, scrambled: Style) -> Vec<Span<'static>> {
        let mut spans = Vec::new();
        let mut run = String::new();
        for glyph in &self.glyphs {
            match glyph {
                Glyph::Plain(c) => run.push(*c),
                Glyph::Scrambled(c) => {
                    if !run.is_empty() {
                        spans.push(Span::styled(std::mem::take(&mut run), plain));
                    }
                    spans.push(Span::styled(c.to_string(), scrambled));
                }
                Glyph::Cursor => {
                    if !run.is_empty() {
                        spans.push(Span::styled(std::mem::take(&mut run), plain));
                    }
                    spans.push(Span::styled("█", plain));
                }
            }
        }
        if !run.is_empty() {
            spans.push(Span::styled(run, plain));
        }
        spans
    }
}

impl TextTarget for TextCell {
    fn read_text(&self) -> String {
        glyphs_to_string(&self.glyphs)
    }

    fn write_text(&mut self, glyphs: &[Glyph]) {
        self.glyphs.clear();
        self.glyphs.extend_from_slice(glyphs);
    }
}

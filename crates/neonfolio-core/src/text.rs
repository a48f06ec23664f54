//! Text element capability.

/// One displayed character of a text element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Glyph {
    /// A settled character.
    Plain(char),
    /// A placeholder shown while a character scrambles; styled distinctly.
    Scrambled(char),
    /// A typing cursor. Not part of the element's text.
    Cursor,
}

impl Glyph {
    /// The character this glyph contributes to the element's text.
    pub fn as_char(&self) -> Option<char> {
        match self {
            Glyph::Plain(c) | Glyph::Scrambled(c) => Some(*c),
            Glyph::Cursor => None,
        }
    }
}

/// A text-bearing element an effect can read and rewrite.
pub trait TextTarget {
    /// Text as currently displayed, including any in-flight scramble glyphs.
    fn read_text(&self) -> String;

    /// Replace the element's content.
    fn write_text(&mut self, glyphs: &[Glyph]);
}

/// Convert a string to plain glyphs.
pub fn plain_glyphs(text: &str) -> Vec<Glyph> {
    text.chars().map(Glyph::Plain).collect()
}

/// Flatten glyphs back into displayed text.
pub fn glyphs_to_string(glyphs: &[Glyph]) -> String {
    glyphs.iter().filter_map(Glyph::as_char).collect()
}

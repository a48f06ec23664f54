//! Typewriter text effect.

use neonfolio_core::{Deferred, Glyph, TextTarget, TypewriterParams};
use tracing::debug;

/// Types an element's original text back in one character at a time, with a
/// cursor shown until typing finishes.
#[derive(Debug)]
pub struct Typewriter<T> {
    target: T,
    text: Vec<char>,
    typed: usize,
    delay_ms: u64,
    next: Option<Deferred>,
    started: bool,
}

impl<T: TextTarget> Typewriter<T> {
    /// Capture the element's text and blank it until [`start`] is called.
    /// Returns `None` when the element is absent.
    ///
    /// [`start`]: Typewriter::start
    pub fn bind(target: Option<T>, params: TypewriterParams) -> Option<Self> {
        let mut target = target?;
        let text = target.read_text().chars().collect();
        target.write_text(&[]);
        Some(Self {
            target,
            text,
            typed: 0,
            delay_ms: params.char_delay_ms,
            next: None,
            started: false,
        })
    }

    /// Begin typing. Only the first call has any effect.
    pub fn start(&mut self, now_ms: u64) -> bool {
        if self.started {
            return false;
        }
        self.started = true;
        self.next = Some(Deferred::after(now_ms, 0));
        debug!(chars = self.text.len(), "typewriter started");
        self.tick(now_ms);
        true
    }

    /// Type every character whose delay has elapsed.
    pub fn tick(&mut self, now_ms: u64) {
        let mut changed = false;
        while let Some(next) = self.next {
            if !next.is_due(now_ms) {
                break;
            }
            changed = true;
            if self.typed < self.text.len() {
                self.typed += 1;
                self.next = Some(next.then(self.delay_ms));
            } else {
                self.next = None;
            }
        }
        if changed {
            self.write();
        }
    }

    /// Whether characters are still being typed.
    pub fn is_typing(&self) -> bool {
        self.next.is_some()
    }

    /// Whether typing has run to completion.
    pub fn is_done(&self) -> bool {
        self.started && self.next.is_none()
    }

    /// The bound element.
    pub fn target(&self) -> &T {
        &self.target
    }

    fn write(&mut self) {
        let mut glyphs: Vec<Glyph> = self.text[..self.typed]
            .iter()
            .copied()
            .map(Glyph::Plain)
            .collect();
        if self.is_typing() {
            glyphs.push(Glyph::Cursor);
        }
        self.target.write_text(&glyphs);
    }
}

//! Terminal cell grid the rain is drawn onto.

use neonfolio_core::DrawingSurface;
use ratatui::{
    style::{Color, Style},
    text::{Line, Span},
};

use crate::color::lerp_rgb;

/// Cells dimmer than this are treated as fully faded.
const VISIBLE_THRESHOLD: f32 = 0.02;

#[derive(Debug, Clone, Copy, Default, PartialEq)]
struct CanvasCell {
    glyph: char,
    intensity: f32,
}

/// A cell grid implementing [`DrawingSurface`] with one glyph per cell.
///
/// Each cell keeps the last glyph drawn into it and an intensity that the
/// per-frame fade wash decays towards zero, which is what leaves trails.
#[derive(Debug, Clone, Default)]
pub struct RainCanvas {
    width: u32,
    height: u32,
    cells: Vec<CanvasCell>,
}

impl RainCanvas {
    /// Create a blank canvas.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            cells: vec![CanvasCell::default(); (width * height) as usize],
        }
    }

    /// Glyph and intensity at a cell, if anything visible is there.
    pub fn cell(&self, x: u32, y: u32) -> Option<(char, f32)> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let cell = self.cells[(y * self.width + x) as usize];
        (cell.intensity > VISIBLE_THRESHOLD).then_some((cell.glyph, cell.intensity))
    }

    /// Build styled lines blending each glyph from `background` towards
    /// `accent` by its intensity scaled with `opacity`.
    pub fn lines(
        &self,
        background: (u8, u8, u8),
        accent: (u8, u8, u8),
        opacity: f32,
    ) -> Vec<Line<'static>> {
        (0..self.height)
            .map(|y| {
                let spans: Vec<Span> = (0..self.width)
                    .map(|x| match self.cell(x, y) {
                        Some((glyph, intensity)) => {
                            let (r, g, b) = lerp_rgb(background, accent, intensity * opacity);
                            Span::styled(glyph.to_string(), Style::new().fg(Color::Rgb(r, g, b)))
                        }
                        None => Span::raw(" "),
                    })
                    .collect();
                Line::from(spans)
            })
            .collect()
    }
}

impl DrawingSurface for RainCanvas {
    fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn resize(&mut self, width: u32, height: u32) {
        if (width, height) == (self.width, self.height) {
            return;
        }
        let mut cells = vec![CanvasCell::default(); (width * height) as usize];
        for y in 0..height.min(self.height) {
            for x in 0..width.min(self.width) {
                cells[(y * width + x) as usize] = self.cells[(y * self.width + x) as usize];
            }
        }
        self.width = width;
        self.height = height;
        self.cells = cells;
    }

    fn fade(&mut self, alpha: f32) {
        let keep = 1.0 - alpha.clamp(0.0, 1.0);
        for cell in &mut self.cells {
            cell.intensity *= keep;
            if cell.intensity <= VISIBLE_THRESHOLD {
                *cell = CanvasCell::default();
            }
        }
    }

    fn draw_glyph(&mut self, x: u32, y: u32, glyph: char, opacity: f32) {
        if x >= self.width || y >= self.height || opacity <= 0.0 {
            return;
        }
        let cell = &mut self.cells[(y * self.width + x) as usize];
        let opacity = opacity.min(1.0);
        // Source-over: the new glyph covers the old one in proportion to its
        // opacity.
        cell.intensity += (1.0 - cell.intensity) * opacity;
        cell.glyph = glyph;
    }
}

//! Drawing surface capability.

/// A pixel- or cell-addressable area the rain renderer paints into.
///
/// Coordinates are in surface units: pixels on a canvas, cells on a
/// terminal grid.
pub trait DrawingSurface {
    /// Current `(width, height)`.
    fn size(&self) -> (u32, u32);

    /// Resize the surface, keeping whatever still fits.
    fn resize(&mut self, width: u32, height: u32);

    /// Wash the whole surface with the background color at `alpha` opacity.
    fn fade(&mut self, alpha: f32);

    /// Draw one glyph with its top-left corner at `(x, y)`.
    ///
    /// Out-of-bounds draws are ignored.
    fn draw_glyph(&mut self, x: u32, y: u32, glyph: char, opacity: f32);
}

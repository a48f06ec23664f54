//! Matrix rain renderer (stateful).

use neonfolio_core::{DrawingSurface, EffectRng, FrameRequest, FrameScheduler, RainParams, pick};
use rand::Rng;
use tracing::debug;

use crate::chars::RAIN_GLYPHS;

/// Paints columns of falling glyphs onto a drawing surface, one step per
/// frame, for as long as it stays attached.
#[derive(Debug)]
pub struct RainRenderer<S> {
    surface: S,
    params: RainParams,
    /// One drop counter per column, in glyph rows.
    drops: Vec<i32>,
    rng: EffectRng,
    frame_request: Option<FrameRequest>,
}

impl<S: DrawingSurface> RainRenderer<S> {
    /// Attach to a surface, sizing it to the viewport and requesting the
    /// first frame. Returns `None` when there is no surface to draw on.
    pub fn attach(
        surface: Option<S>,
        viewport: (u32, u32),
        params: RainParams,
        rng: EffectRng,
        scheduler: &mut FrameScheduler,
    ) -> Option<Self> {
        let mut surface = surface?;
        surface.resize(viewport.0, viewport.1);

        let mut renderer = Self {
            surface,
            params,
            drops: Vec::new(),
            rng,
            frame_request: None,
        };
        renderer.sync_columns();
        renderer.frame_request = Some(scheduler.request());
        debug!(
            columns = renderer.drops.len(),
            width = viewport.0,
            height = viewport.1,
            "rain attached"
        );
        Some(renderer)
    }

    /// Re-measure the surface after a viewport change.
    ///
    /// Surviving columns keep their drops; columns that no longer fit are
    /// dropped and new ones start off-screen.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.surface.resize(width, height);
        self.sync_columns();
        debug!(columns = self.drops.len(), width, height, "rain resized");
    }

    /// Number of glyph columns the surface currently fits.
    pub fn column_count(&self) -> usize {
        (self.surface.size().0 / self.glyph_size()) as usize
    }

    /// Drop counters, one per column.
    pub fn drops(&self) -> &[i32] {
        &self.drops
    }

    /// The surface being drawn on.
    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Run this frame's step if the renderer's frame request is due.
    ///
    /// Returns whether a step was drawn.
    pub fn tick(&mut self, scheduler: &mut FrameScheduler) -> bool {
        let Some(request) = self.frame_request.take() else {
            return false;
        };
        if !scheduler.fire(request) {
            return false;
        }
        self.step();
        self.frame_request = Some(scheduler.request());
        true
    }

    /// Stop animating and hand the surface back.
    pub fn detach(mut self, scheduler: &mut FrameScheduler) -> S {
        if let Some(request) = self.frame_request.take() {
            scheduler.cancel(request);
        }
        self.surface
    }

    /// Paint one frame.
    pub fn step(&mut self) {
        let glyph_size = self.glyph_size();
        let (_, height) = self.surface.size();

        self.surface.fade(self.params.fade_alpha);

        for (column, drop) in self.drops.iter_mut().enumerate() {
            let glyph = pick(&mut self.rng, RAIN_GLYPHS);
            let x = column as u32 * glyph_size;
            let y = i64::from(*drop) * i64::from(glyph_size);

            // Brighter towards the head, capped at full opacity
            let opacity = (*drop as f32 / self.params.brightness_ramp).min(1.0);
            if y >= 0 && opacity > 0.0 {
                let y = u32::try_from(y).unwrap_or(u32::MAX);
                self.surface.draw_glyph(x, y, glyph, opacity);
            }

            // Restart drops past the bottom at staggered times
            if y > i64::from(height) && self.rng.random_bool(self.params.restart_probability) {
                *drop = 0;
            }
            *drop = drop.saturating_add(1);
        }
    }

    fn glyph_size(&self) -> u32 {
        self.params.glyph_size.max(1)
    }

    fn sync_columns(&mut self) {
        let columns = self.column_count();
        if columns < self.drops.len() {
            self.drops.truncate(columns);
            return;
        }
        let offset = self.params.initial_offset.max(1) as i32;
        while self.drops.len() < columns {
            self.drops.push(-self.rng.random_range(1..=offset));
        }
    }
}

#[cfg(test)]
mod tests {
    use neonfolio_core::seeded_rng;
    use proptest::prelude::*;

    use super::*;

    /// Surface that records every call made to it.
    #[derive(Debug, Default)]
    struct RecordingSurface {
        width: u32,
        height: u32,
        fades: usize,
        draws: Vec<(u32, u32, char, f32)>,
    }

    impl DrawingSurface for RecordingSurface {
        fn size(&self) -> (u32, u32) {
            (self.width, self.height)
        }

        fn resize(&mut self, width: u32, height: u32) {
            self.width = width;
            self.height = height;
        }

        fn fade(&mut self, _alpha: f32) {
            self.fades += 1;
        }

        fn draw_glyph(&mut self, x: u32, y: u32, glyph: char, opacity: f32) {
            self.draws.push((x, y, glyph, opacity));
        }
    }

    fn pixel_params() -> RainParams {
        RainParams {
            glyph_size: 14,
            ..RainParams::default()
        }
    }

    fn attach(
        width: u32,
        height: u32,
        params: RainParams,
    ) -> (RainRenderer<RecordingSurface>, FrameScheduler) {
        let mut scheduler = FrameScheduler::new();
        let renderer = RainRenderer::attach(
            Some(RecordingSurface::default()),
            (width, height),
            params,
            seeded_rng(Some(42)),
            &mut scheduler,
        )
        .unwrap();
        (renderer, scheduler)
    }

    #[test]
    fn absent_surface_never_initializes() {
        let mut scheduler = FrameScheduler::new();
        let renderer = RainRenderer::<RecordingSurface>::attach(
            None,
            (700, 14),
            pixel_params(),
            seeded_rng(Some(1)),
            &mut scheduler,
        );
        assert!(renderer.is_none());
        assert_eq!(scheduler.pending_count(), 0);
    }

    #[test]
    fn fifty_columns_on_a_700px_strip() {
        let (renderer, _) = attach(700, 14, pixel_params());
        assert_eq!(renderer.column_count(), 50);
        assert_eq!(renderer.drops().len(), 50);
    }

    #[test]
    fn drops_start_above_the_surface() {
        let (renderer, _) = attach(700, 500, pixel_params());
        assert!(renderer.drops().iter().all(|d| (-100..0).contains(d)));
    }

    #[test]
    fn shrink_mid_animation() {
        let (mut renderer, mut scheduler) = attach(700, 500, pixel_params());
        for _ in 0..10 {
            scheduler.advance();
            assert!(renderer.tick(&mut scheduler));
        }
        renderer.resize(350, 500);
        assert_eq!(renderer.column_count(), 25);
        assert_eq!(renderer.drops().len(), 25);

        let drawn_before = renderer.surface().draws.len();
        scheduler.advance();
        assert!(renderer.tick(&mut scheduler));
        let after_resize = &renderer.surface().draws[drawn_before..];
        assert!(after_resize.iter().all(|(x, ..)| *x < 350));
    }

    #[test]
    fn grow_appends_seeded_columns() {
        let (mut renderer, _) = attach(350, 500, pixel_params());
        let before = renderer.drops().to_vec();
        renderer.resize(700, 500);
        assert_eq!(renderer.drops().len(), 50);
        assert_eq!(&renderer.drops()[..25], &before[..]);
        assert!(renderer.drops()[25..].iter().all(|d| *d < 0));
    }

    #[test]
    fn every_frame_fades_and_advances_each_column() {
        let (mut renderer, _) = attach(140, 140, pixel_params());
        let before = renderer.drops().to_vec();
        renderer.step();
        assert_eq!(renderer.surface().fades, 1);
        for (old, new) in before.iter().zip(renderer.drops()) {
            assert_eq!(*new, old + 1);
        }
    }

    #[test]
    fn columns_draw_left_to_right_with_ramped_opacity() {
        let params = RainParams {
            glyph_size: 10,
            initial_offset: 1,
            ..RainParams::default()
        };
        // Every drop starts at -1, so the eleventh frame draws each at row 9.
        let (mut renderer, _) = attach(30, 1_000, params);
        for _ in 0..11 {
            renderer.step();
        }
        let draws = &renderer.surface().draws;
        let last: Vec<_> = draws[draws.len() - 3..].to_vec();
        assert_eq!(last.iter().map(|d| d.0).collect::<Vec<_>>(), vec![0, 10, 20]);
        assert!(last.iter().all(|d| d.1 == 90));
        assert!(last.iter().all(|d| (d.3 - 9.0 / 20.0).abs() < f32::EPSILON));
        assert!(last.iter().all(|d| RAIN_GLYPHS.contains(&d.2)));
    }

    #[test]
    fn drops_past_the_bottom_restart() {
        let params = RainParams {
            glyph_size: 10,
            initial_offset: 1,
            restart_probability: 1.0,
            ..RainParams::default()
        };
        let (mut renderer, _) = attach(10, 50, params);
        for _ in 0..7 {
            renderer.step();
        }
        // Row 6 → y = 60 > 50 on the next step, so it restarts at 0 then advances.
        renderer.step();
        assert_eq!(renderer.drops(), &[1]);
    }

    #[test]
    fn drops_never_restart_with_zero_probability() {
        let params = RainParams {
            glyph_size: 10,
            initial_offset: 1,
            restart_probability: 0.0,
            ..RainParams::default()
        };
        let (mut renderer, _) = attach(10, 50, params);
        for _ in 0..200 {
            renderer.step();
        }
        assert_eq!(renderer.drops(), &[199]);
    }

    #[test]
    fn tick_only_runs_when_its_request_fires() {
        let (mut renderer, mut scheduler) = attach(140, 140, pixel_params());
        assert_eq!(scheduler.pending_count(), 1);
        assert!(renderer.tick(&mut scheduler));
        assert_eq!(scheduler.pending_count(), 1);

        let surface = renderer.detach(&mut scheduler);
        assert_eq!(surface.fades, 1);
        assert_eq!(scheduler.pending_count(), 0);
    }

    proptest! {
        #[test]
        fn column_count_tracks_every_resize(
            glyph in 1u32..32,
            sizes in prop::collection::vec((0u32..2_000, 0u32..2_000), 1..8),
        ) {
            let params = RainParams { glyph_size: glyph, ..RainParams::default() };
            let (first_w, first_h) = sizes[0];
            let (mut renderer, _) = attach(first_w, first_h, params);
            prop_assert_eq!(renderer.column_count(), (first_w / glyph) as usize);
            prop_assert_eq!(renderer.drops().len(), renderer.column_count());

            for &(w, h) in &sizes[1..] {
                renderer.step();
                renderer.resize(w, h);
                prop_assert_eq!(renderer.column_count(), (w / glyph) as usize);
                prop_assert_eq!(renderer.drops().len(), renderer.column_count());
            }
        }
    }
}

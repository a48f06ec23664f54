//! Full-screen rain backdrop state.

use neonfolio_core::{ColorTheme, EffectRng, FrameScheduler, RainParams};
use ratatui::{Frame, text::Line, widgets::Paragraph};
use tracing::info;

use crate::{animations::rain::RainRenderer, canvas::RainCanvas};

/// How strongly the rain shows through behind the page.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RainIntensity {
    #[default]
    Normal,
    Dim,
}

impl RainIntensity {
    /// Switch between normal and dim.
    pub fn toggle(self) -> Self {
        match self {
            RainIntensity::Normal => RainIntensity::Dim,
            RainIntensity::Dim => RainIntensity::Normal,
        }
    }

    /// Brightness multiplier applied when blending glyphs.
    pub fn opacity(self) -> f32 {
        match self {
            RainIntensity::Normal => 1.0,
            RainIntensity::Dim => 0.5,
        }
    }
}

/// Rain renderer bound to the terminal viewport.
#[derive(Debug)]
pub struct Backdrop {
    rain: Option<RainRenderer<RainCanvas>>,
    params: RainParams,
    /// Held until the rain attaches on the first viewport sync.
    rng: Option<EffectRng>,
    intensity: RainIntensity,
    /// Last known terminal width.
    last_width: u16,
    /// Last known terminal height.
    last_height: u16,
}

impl Backdrop {
    /// Create a backdrop; the rain starts on the first viewport sync.
    pub fn new(params: RainParams, rng: EffectRng) -> Self {
        Self {
            rain: None,
            params,
            rng: Some(rng),
            intensity: RainIntensity::default(),
            last_width: 0,
            last_height: 0,
        }
    }

    /// Match the rain to the terminal size, attaching it the first time.
    pub fn sync_viewport(&mut self, width: u16, height: u16, scheduler: &mut FrameScheduler) {
        if let Some(rain) = &mut self.rain {
            if (width, height) != (self.last_width, self.last_height) {
                rain.resize(u32::from(width), u32::from(height));
            }
        } else if let Some(rng) = self.rng.take() {
            self.rain = RainRenderer::attach(
                Some(RainCanvas::default()),
                (u32::from(width), u32::from(height)),
                self.params,
                rng,
                scheduler,
            );
        }
        self.last_width = width;
        self.last_height = height;
    }

    /// Advance the rain by one frame if its request is due.
    pub fn tick(&mut self, scheduler: &mut FrameScheduler) {
        if let Some(rain) = &mut self.rain {
            rain.tick(scheduler);
        }
    }

    /// Toggle between normal and dim rain.
    pub fn toggle_intensity(&mut self) -> RainIntensity {
        self.intensity = self.intensity.toggle();
        info!(intensity = ?self.intensity, "rain intensity adjusted");
        self.intensity
    }

    /// Current intensity.
    pub fn intensity(&self) -> RainIntensity {
        self.intensity
    }

    /// Number of rain columns, zero before the first sync.
    pub fn column_count(&self) -> usize {
        self.rain.as_ref().map_or(0, RainRenderer::column_count)
    }

    /// Styled rain lines for the whole viewport.
    pub fn lines(&self, accent: (u8, u8, u8)) -> Vec<Line<'static>> {
        self.rain.as_ref().map_or_else(Vec::new, |rain| {
            rain.surface()
                .lines(ColorTheme::background(), accent, self.intensity.opacity())
        })
    }

    /// Render the rain behind everything else in the frame.
    pub fn render(&self, frame: &mut Frame, accent: (u8, u8, u8)) {
        let area = frame.area();
        frame.render_widget(Paragraph::new(self.lines(accent)), area);
    }
}

//! Binary counter effect for stat numbers.

use neonfolio_core::{
    BinaryCounterParams, EffectRng, FrameRequest, FrameScheduler, Glyph, TextTarget, pick,
    plain_glyphs,
};
use tracing::debug;

use crate::chars::BINARY_GLYPHS;

/// Parse the leading integer of a string, ignoring leading whitespace and
/// anything after the digits (`"10+"` is 10, `"-5 bugs"` is -5).
pub fn parse_leading_int(text: &str) -> Option<i64> {
    let trimmed = text.trim_start();
    let (negative, digits) = match trimmed.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, trimmed.strip_prefix('+').unwrap_or(trimmed)),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    let magnitude: i64 = digits[..end].parse().ok()?;
    Some(if negative { -magnitude } else { magnitude })
}

/// Flickers random bits in place of a stat number for a while, then shows
/// the stat again.
#[derive(Debug)]
pub struct BinaryCounter<T> {
    target: T,
    original: String,
    width: usize,
    duration_ms: u64,
    rng: EffectRng,
    started_at: Option<u64>,
    frame_request: Option<FrameRequest>,
}

impl<T: TextTarget> BinaryCounter<T> {
    /// Bind to a stat element. Returns `None` when the element is absent or
    /// its text does not start with a number.
    pub fn bind(target: Option<T>, params: BinaryCounterParams, rng: EffectRng) -> Option<Self> {
        let target = target?;
        let original = target.read_text();
        let Some(value) = parse_leading_int(&original) else {
            debug!(text = %original, "stat is not numeric, leaving it alone");
            return None;
        };
        Some(Self {
            target,
            width: value.unsigned_abs().to_string().len() * 4,
            original,
            duration_ms: params.duration_ms,
            rng,
            started_at: None,
            frame_request: None,
        })
    }

    /// Start the animation. Only the first call has any effect.
    pub fn start(&mut self, now_ms: u64, scheduler: &mut FrameScheduler) -> bool {
        if self.started_at.is_some() {
            return false;
        }
        self.started_at = Some(now_ms);
        self.frame_request = Some(scheduler.request());
        true
    }

    /// Draw the next frame if this counter's frame request fires.
    pub fn tick(&mut self, now_ms: u64, scheduler: &mut FrameScheduler) -> bool {
        let Some(request) = self.frame_request.take() else {
            return false;
        };
        if !scheduler.fire(request) {
            return false;
        }

        let elapsed = now_ms.saturating_sub(self.started_at.unwrap_or(now_ms));
        if elapsed < self.duration_ms {
            let bits: Vec<Glyph> = (0..self.width)
                .map(|_| Glyph::Plain(pick(&mut self.rng, BINARY_GLYPHS)))
                .collect();
            self.target.write_text(&bits);
            self.frame_request = Some(scheduler.request());
        } else {
            self.target.write_text(&plain_glyphs(&self.original));
        }
        true
    }

    /// Whether the counter is still flickering.
    pub fn is_running(&self) -> bool {
        self.frame_request.is_some()
    }

    /// The bound element.
    pub fn target(&self) -> &T {
        &self.target
    }
}

#[cfg(test)]
mod tests {
    use neonfolio_core::seeded_rng;

    use super::*;
    use crate::text::TextCell;

    fn bind(text: &str) -> Option<BinaryCounter<TextCell>> {
        BinaryCounter::bind(
            Some(TextCell::new(text)),
            BinaryCounterParams { duration_ms: 1_500 },
            seeded_rng(Some(9)),
        )
    }

    #[test]
    fn parses_like_a_lenient_integer_parser() {
        assert_eq!(parse_leading_int("10+"), Some(10));
        assert_eq!(parse_leading_int("  42 projects"), Some(42));
        assert_eq!(parse_leading_int("+7"), Some(7));
        assert_eq!(parse_leading_int("99%"), Some(99));
        assert_eq!(parse_leading_int("-12 days"), Some(-12));
        assert_eq!(parse_leading_int("-"), None);
        assert_eq!(parse_leading_int("n/a"), None);
        assert_eq!(parse_leading_int(""), None);
    }

    #[test]
    fn non_numeric_stats_are_left_alone() {
        assert!(bind("many").is_none());
    }

    #[test]
    fn flickers_bits_then_restores_the_stat() {
        let mut scheduler = FrameScheduler::new();
        let mut counter = bind("150+").unwrap();
        assert!(counter.start(0, &mut scheduler));

        assert!(counter.tick(16, &mut scheduler));
        let bits = counter.target().read_text();
        assert_eq!(bits.len(), 12);
        assert!(bits.chars().all(|c| c == '0' || c == '1'));

        assert!(counter.tick(1_499, &mut scheduler));
        assert!(counter.is_running());

        assert!(counter.tick(1_500, &mut scheduler));
        assert!(!counter.is_running());
        assert_eq!(counter.target().read_text(), "150+");
        assert!(!counter.tick(1_600, &mut scheduler));
    }

    #[test]
    fn negative_stats_flicker_their_magnitude() {
        let mut scheduler = FrameScheduler::new();
        let mut counter = bind("-40%").unwrap();
        assert!(counter.start(0, &mut scheduler));
        assert!(counter.tick(16, &mut scheduler));
        assert_eq!(counter.target().read_text().len(), 8);
        assert!(counter.tick(1_500, &mut scheduler));
        assert_eq!(counter.target().read_text(), "-40%");
    }

    #[test]
    fn runs_only_once() {
        let mut scheduler = FrameScheduler::new();
        let mut counter = bind("3").unwrap();
        assert!(counter.start(0, &mut scheduler));
        assert!(!counter.start(10, &mut scheduler));
        assert_eq!(scheduler.pending_count(), 1);
    }
}

//! Scramble text effect.
//!
//! Each character of the old text holds for a random number of frames, then
//! flickers through placeholder glyphs, then settles on the new character.

use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};

use neonfolio_core::{
    Deferred, EffectRng, FrameRequest, FrameScheduler, Glyph, ScrambleParams, TextTarget, pick,
};
use rand::Rng;
use tracing::{debug, trace};

use crate::chars::SCRAMBLE_GLYPHS;

/// One character's transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueueEntry {
    /// Character shown before scrambling starts, if the old text reached
    /// this far.
    pub from: Option<char>,
    /// Character shown once revealed, if the new text reaches this far.
    pub to: Option<char>,
    /// Frame at which this character starts scrambling.
    pub scramble_start: u32,
    /// Frame at which the final character appears.
    pub reveal_frame: u32,
    /// Placeholder currently shown while scrambling.
    pub glyph: Option<char>,
}

/// Where a scramble invocation ended up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompletionState {
    /// Still animating.
    Pending,
    /// The element shows exactly the requested text.
    Settled,
    /// A newer invocation replaced this one, or the effect was torn down.
    Cancelled,
}

/// Completion signal for one [`ScrambleText::set_text`] call.
#[derive(Debug)]
pub struct Completion {
    rx: Receiver<()>,
    state: CompletionState,
}

impl Completion {
    fn new(rx: Receiver<()>) -> Self {
        Self {
            rx,
            state: CompletionState::Pending,
        }
    }

    /// Check whether the invocation has finished. Once it reports
    /// `Settled` or `Cancelled` it keeps reporting that.
    pub fn poll(&mut self) -> CompletionState {
        if self.state == CompletionState::Pending {
            self.state = match self.rx.try_recv() {
                Ok(()) => CompletionState::Settled,
                Err(TryRecvError::Empty) => CompletionState::Pending,
                Err(TryRecvError::Disconnected) => CompletionState::Cancelled,
            };
        }
        self.state
    }
}

/// Scramble effect bound to a single text element.
#[derive(Debug)]
pub struct ScrambleText<T> {
    target: T,
    params: ScrambleParams,
    rng: EffectRng,
    queue: Vec<QueueEntry>,
    frame: u32,
    frame_request: Option<FrameRequest>,
    completion: Option<Sender<()>>,
}

impl<T: TextTarget> ScrambleText<T> {
    /// Bind the effect to an element. Returns `None` when the element is
    /// absent.
    pub fn bind(target: Option<T>, params: ScrambleParams, rng: EffectRng) -> Option<Self> {
        Some(Self {
            target: target?,
            params,
            rng,
            queue: Vec::new(),
            frame: 0,
            frame_request: None,
            completion: None,
        })
    }

    /// Start animating from the currently displayed text to `text`.
    ///
    /// Any in-flight invocation is cancelled first: its pending frame never
    /// runs and its [`Completion`] reports `Cancelled`. The first frame is
    /// drawn immediately.
    pub fn set_text(&mut self, text: &str, scheduler: &mut FrameScheduler) -> Completion {
        let from: Vec<char> = self.target.read_text().chars().collect();
        let to: Vec<char> = text.chars().collect();
        let length = from.len().max(to.len());
        let start_window = self.params.start_window.max(1);
        let reveal_window = self.params.reveal_window.max(1);

        self.queue = (0..length)
            .map(|i| {
                let scramble_start = self.rng.random_range(0..start_window);
                let reveal_frame =
                    scramble_start.saturating_add(self.rng.random_range(0..reveal_window));
                QueueEntry {
                    from: from.get(i).copied(),
                    to: to.get(i).copied(),
                    scramble_start,
                    reveal_frame,
                    glyph: None,
                }
            })
            .collect();

        if let Some(request) = self.frame_request.take() {
            scheduler.cancel(request);
            debug!("scramble superseded");
        }
        let (tx, rx) = mpsc::channel();
        // Dropping the old sender tells its receiver it was cancelled.
        self.completion = Some(tx);
        self.frame = 0;

        debug!(length, "scramble started");
        self.update(scheduler);
        Completion::new(rx)
    }

    /// Draw the next frame if this effect's frame request fires.
    ///
    /// Returns whether a frame was drawn.
    pub fn tick(&mut self, scheduler: &mut FrameScheduler) -> bool {
        let Some(request) = self.frame_request.take() else {
            return false;
        };
        if !scheduler.fire(request) {
            return false;
        }
        self.update(scheduler);
        true
    }

    /// Stop the in-flight animation, leaving the element as it is.
    pub fn cancel(&mut self, scheduler: &mut FrameScheduler) {
        if let Some(request) = self.frame_request.take() {
            scheduler.cancel(request);
        }
        self.completion = None;
        self.queue.clear();
    }

    /// Whether a frame is scheduled.
    pub fn is_running(&self) -> bool {
        self.frame_request.is_some()
    }

    /// The pending frame request, if any.
    pub fn pending_request(&self) -> Option<FrameRequest> {
        self.frame_request
    }

    /// Transition records for the current invocation.
    pub fn queue(&self) -> &[QueueEntry] {
        &self.queue
    }

    /// The bound element.
    pub fn target(&self) -> &T {
        &self.target
    }

    fn update(&mut self, scheduler: &mut FrameScheduler) {
        let mut output = Vec::with_capacity(self.queue.len());
        let mut complete = 0;

        for entry in &mut self.queue {
            if self.frame >= entry.reveal_frame {
                complete += 1;
                output.extend(entry.to.map(Glyph::Plain));
            } else if self.frame >= entry.scramble_start {
                let glyph = match entry.glyph {
                    Some(glyph) if !self.rng.random_bool(self.params.reseed_probability) => glyph,
                    _ => {
                        let glyph = pick(&mut self.rng, SCRAMBLE_GLYPHS);
                        entry.glyph = Some(glyph);
                        glyph
                    }
                };
                output.push(Glyph::Scrambled(glyph));
            } else {
                output.extend(entry.from.map(Glyph::Plain));
            }
        }

        self.target.write_text(&output);

        if complete == self.queue.len() {
            trace!(frames = self.frame, "scramble settled");
            if let Some(tx) = self.completion.take() {
                // The receiver may already be gone; nobody is waiting then.
                let _ = tx.send(());
            }
        } else {
            self.frame += 1;
            self.frame_request = Some(scheduler.request());
        }
    }
}

/// Scrambles an element back to a fixed text, pausing between runs for as
/// long as it stays active.
#[derive(Debug)]
pub struct RepeatingScramble<T> {
    fx: ScrambleText<T>,
    text: String,
    delay_ms: u64,
    active: bool,
    completion: Option<Completion>,
    pause: Option<Deferred>,
}

impl<T: TextTarget> RepeatingScramble<T> {
    /// Wrap an effect that should keep returning to `text`.
    pub fn new(fx: ScrambleText<T>, text: impl Into<String>, delay_ms: u64) -> Self {
        Self {
            fx,
            text: text.into(),
            delay_ms,
            active: false,
            completion: None,
            pause: None,
        }
    }

    /// Start looping. Runs immediately unless a run is already animating.
    pub fn start(&mut self, scheduler: &mut FrameScheduler) {
        if self.active {
            return;
        }
        self.active = true;
        self.pause = None;
        if self.completion.is_none() {
            self.run(scheduler);
        }
    }

    /// Stop looping. A run in progress still settles.
    pub fn stop(&mut self) {
        self.active = false;
        self.pause = None;
    }

    /// Animate once without starting the loop.
    pub fn play_once(&mut self, scheduler: &mut FrameScheduler) {
        self.run(scheduler);
    }

    /// Advance the animation and the pause timer.
    pub fn tick(&mut self, now_ms: u64, scheduler: &mut FrameScheduler) {
        self.fx.tick(scheduler);

        if let Some(completion) = &mut self.completion {
            match completion.poll() {
                CompletionState::Pending => {}
                CompletionState::Settled => {
                    self.completion = None;
                    if self.active {
                        self.pause = Some(Deferred::after(now_ms, self.delay_ms));
                    }
                }
                CompletionState::Cancelled => self.completion = None,
            }
        }

        let due = self.pause.is_some_and(|pause| pause.is_due(now_ms));
        if due {
            self.pause = None;
            if self.active {
                self.run(scheduler);
            }
        }
    }

    /// Whether the loop is active.
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Whether a run is currently animating.
    pub fn is_animating(&self) -> bool {
        self.fx.is_running()
    }

    /// The bound element.
    pub fn target(&self) -> &T {
        self.fx.target()
    }

    fn run(&mut self, scheduler: &mut FrameScheduler) {
        self.completion = Some(self.fx.set_text(&self.text, scheduler));
    }
}

#[cfg(test)]
mod tests {
    use neonfolio_core::seeded_rng;
    use proptest::prelude::*;

    use super::*;
    use crate::text::TextCell;

    fn bind(text: &str, seed: u64) -> ScrambleText<TextCell> {
        ScrambleText::bind(
            Some(TextCell::new(text)),
            ScrambleParams::default(),
            seeded_rng(Some(seed)),
        )
        .unwrap()
    }

    /// Drive frames until the completion resolves or `limit` frames pass.
    fn run_until_done(
        fx: &mut ScrambleText<TextCell>,
        completion: &mut Completion,
        scheduler: &mut FrameScheduler,
        limit: usize,
    ) -> usize {
        let mut frames = 0;
        while completion.poll() == CompletionState::Pending && frames < limit {
            scheduler.advance();
            fx.tick(scheduler);
            frames += 1;
        }
        frames
    }

    #[test]
    fn absent_element_is_not_bound() {
        let fx = ScrambleText::<TextCell>::bind(
            None,
            ScrambleParams::default(),
            seeded_rng(Some(1)),
        );
        assert!(fx.is_none());
    }

    #[test]
    fn hello_settles_on_world_without_markup() {
        let mut scheduler = FrameScheduler::new();
        let mut fx = bind("HELLO", 3);
        let mut completion = fx.set_text("WORLD", &mut scheduler);

        let frames = run_until_done(&mut fx, &mut completion, &mut scheduler, 100);
        assert!(frames < 80);
        assert_eq!(completion.poll(), CompletionState::Settled);
        assert_eq!(fx.target().read_text(), "WORLD");
        assert!(!fx.target().has_markup());
        assert!(!fx.is_running());
        assert_eq!(scheduler.pending_count(), 0);
    }

    #[test]
    fn scrambled_glyphs_appear_mid_animation() {
        let mut scheduler = FrameScheduler::new();
        let mut fx = bind("abcdefghijklmnop", 5);
        let mut completion = fx.set_text("ponmlkjihgfedcba", &mut scheduler);

        let mut saw_markup = false;
        while completion.poll() == CompletionState::Pending {
            saw_markup |= fx
                .target()
                .glyphs()
                .iter()
                .any(|g| matches!(g, Glyph::Scrambled(c) if SCRAMBLE_GLYPHS.contains(c)));
            scheduler.advance();
            fx.tick(&mut scheduler);
        }
        assert!(saw_markup);
        assert_eq!(fx.target().read_text(), "ponmlkjihgfedcba");
    }

    #[test]
    fn same_text_still_animates() {
        let mut scheduler = FrameScheduler::new();
        let mut fx = bind("neonfolio", 11);
        let mut completion = fx.set_text("neonfolio", &mut scheduler);

        assert_eq!(fx.queue().len(), 9);
        let last_reveal = fx.queue().iter().map(|e| e.reveal_frame).max().unwrap();
        let frames = run_until_done(&mut fx, &mut completion, &mut scheduler, 100);
        assert_eq!(frames as u32, last_reveal);
        assert_eq!(fx.target().read_text(), "neonfolio");
    }

    #[test]
    fn second_invocation_wins() {
        let mut checked = 0;
        for seed in 0..16 {
            let mut scheduler = FrameScheduler::new();
            let mut fx = bind("", seed);

            let mut first = fx.set_text("A", &mut scheduler);
            // A one-character run can settle on its very first frame.
            let Some(first_request) = fx.pending_request() else {
                continue;
            };
            let mut second = fx.set_text("B", &mut scheduler);

            assert!(!scheduler.is_pending(first_request));
            assert_eq!(first.poll(), CompletionState::Cancelled);

            run_until_done(&mut fx, &mut second, &mut scheduler, 100);
            assert_eq!(second.poll(), CompletionState::Settled);
            assert_eq!(first.poll(), CompletionState::Cancelled);
            assert_eq!(fx.target().read_text(), "B");
            checked += 1;
        }
        assert!(checked > 0);
    }

    #[test]
    fn shorter_text_drops_trailing_characters() {
        let mut scheduler = FrameScheduler::new();
        let mut fx = bind("terminal", 17);
        let mut completion = fx.set_text("tty", &mut scheduler);
        assert_eq!(fx.queue().len(), 8);
        assert!(fx.queue()[3..].iter().all(|e| e.to.is_none()));

        run_until_done(&mut fx, &mut completion, &mut scheduler, 100);
        assert_eq!(fx.target().read_text(), "tty");
    }

    #[test]
    fn empty_to_empty_settles_immediately() {
        let mut scheduler = FrameScheduler::new();
        let mut fx = bind("", 19);
        let mut completion = fx.set_text("", &mut scheduler);
        assert_eq!(completion.poll(), CompletionState::Settled);
        assert!(!fx.is_running());
    }

    #[test]
    fn huge_windows_saturate_instead_of_overflowing() {
        let mut scheduler = FrameScheduler::new();
        let params = ScrambleParams {
            start_window: u32::MAX,
            reveal_window: u32::MAX,
            ..ScrambleParams::default()
        };
        let mut fx =
            ScrambleText::bind(Some(TextCell::new("HELLO")), params, seeded_rng(Some(31)))
                .unwrap();
        let mut completion = fx.set_text("WORLD", &mut scheduler);

        assert_eq!(fx.queue().len(), 5);
        assert!(fx.queue().iter().all(|e| e.reveal_frame >= e.scramble_start));
        assert_eq!(completion.poll(), CompletionState::Pending);
    }

    #[test]
    fn cancel_freezes_the_element() {
        let mut scheduler = FrameScheduler::new();
        let mut fx = bind("abc", 23);
        let mut completion = fx.set_text("xyz", &mut scheduler);
        fx.cancel(&mut scheduler);
        let frozen = fx.target().clone();

        scheduler.advance();
        assert!(!fx.tick(&mut scheduler));
        assert_eq!(fx.target(), &frozen);
        assert_eq!(completion.poll(), CompletionState::Cancelled);
    }

    #[test]
    fn repeating_scramble_pauses_between_runs() {
        let mut scheduler = FrameScheduler::new();
        let fx = bind("About", 29);
        let mut looped = RepeatingScramble::new(fx, "About", 3_000);

        looped.start(&mut scheduler);
        assert!(looped.is_animating());

        let mut now = 0;
        while looped.is_animating() {
            now += 16;
            scheduler.advance();
            looped.tick(now, &mut scheduler);
        }
        assert_eq!(looped.target().read_text(), "About");

        // Still inside the pause.
        looped.tick(now + 2_999, &mut scheduler);
        assert!(!looped.is_animating());

        looped.tick(now + 3_000, &mut scheduler);
        assert!(looped.is_animating());

        looped.stop();
        let mut later = now + 3_000;
        while looped.is_animating() {
            later += 16;
            scheduler.advance();
            looped.tick(later, &mut scheduler);
        }
        looped.tick(later + 10_000, &mut scheduler);
        assert!(!looped.is_animating());
        assert!(!looped.is_active());
    }

    proptest! {
        #[test]
        fn queue_timing_is_bounded(
            from in "[a-zA-Z0-9 ]{0,24}",
            to in "[a-zA-Z0-9 ]{0,24}",
            seed in any::<u64>(),
        ) {
            let mut scheduler = FrameScheduler::new();
            let mut fx = bind(&from, seed);
            let mut completion = fx.set_text(&to, &mut scheduler);

            prop_assert_eq!(fx.queue().len(), from.len().max(to.len()));
            for entry in fx.queue() {
                prop_assert!(entry.reveal_frame >= entry.scramble_start);
                prop_assert!(entry.reveal_frame < 80);
            }

            run_until_done(&mut fx, &mut completion, &mut scheduler, 100);
            prop_assert_eq!(completion.poll(), CompletionState::Settled);
            prop_assert_eq!(fx.target().read_text(), to);
        }
    }
}

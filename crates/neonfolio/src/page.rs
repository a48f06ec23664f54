//! The portfolio page: sections, scrolling, navigation highlighting and the
//! effects bound to page elements.

use neonfolio_config::{Config, Profile};
use neonfolio_core::{Deferred, EffectRng, FrameScheduler, ScrambleParams, derive_rng};
use neonfolio_effects::{BinaryCounter, RepeatingScramble, ScrambleText, TextCell, Typewriter};
use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style, Stylize},
    text::{Line, Span},
    widgets::Paragraph,
};
use tracing::debug;

use crate::eggs::hex_label;

/// Rows above a section's top at which it becomes the highlighted one.
pub const HIGHLIGHT_OFFSET: i32 = 3;
/// Rows left above a section heading after jumping to it.
pub const JUMP_OFFSET: u16 = 2;
/// Scroll distance after which the navbar switches to its solid style.
pub const SCROLLED_THRESHOLD: u16 = 5;
/// Fraction of a section that must be on screen before it fades in.
const REVEAL_THRESHOLD: f32 = 0.1;
/// Fraction of skills or stats that must be on screen before they animate.
const ANIMATE_THRESHOLD: f32 = 0.5;
/// Frames a section takes to fade in.
const FADE_FRAMES: u8 = 8;
/// Delay before skill bars start filling.
const BAR_DELAY_MS: u64 = 100;
const BAR_WIDTH: usize = 24;

/// Page sections, top to bottom.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionId {
    Home,
    About,
    Skills,
    Experience,
    Contact,
}

impl SectionId {
    pub const ALL: [SectionId; 5] = [
        SectionId::Home,
        SectionId::About,
        SectionId::Skills,
        SectionId::Experience,
        SectionId::Contact,
    ];

    /// Navigation label.
    pub fn title(self) -> &'static str {
        match self {
            SectionId::Home => "Home",
            SectionId::About => "About",
            SectionId::Skills => "Skills",
            SectionId::Experience => "Experience",
            SectionId::Contact => "Contact",
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

/// Where a section sits on the page, in rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SectionLayout {
    pub id: SectionId,
    pub top: u16,
    pub height: u16,
}

impl SectionLayout {
    /// Fraction of this section inside `rows` rows starting at `scroll`.
    pub fn visible_fraction(&self, scroll: u16, rows: u16) -> f32 {
        if self.height == 0 {
            return 0.0;
        }
        let start = self.top.max(scroll);
        let end = (self.top + self.height).min(scroll.saturating_add(rows));
        f32::from(end.saturating_sub(start)) / f32::from(self.height)
    }
}

/// The section whose highlight band contains `scroll`.
pub fn active_section(layouts: &[SectionLayout], scroll: u16) -> Option<SectionId> {
    let scroll = i32::from(scroll);
    layouts
        .iter()
        .find(|layout| {
            let top = i32::from(layout.top) - HIGHLIGHT_OFFSET;
            scroll > top && scroll <= top + i32::from(layout.height)
        })
        .map(|layout| layout.id)
}

/// Something Tab can move focus to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Title(SectionId),
    Badge(usize),
}

/// Fade-in latch for one section.
#[derive(Debug, Clone, Copy, Default)]
struct Reveal {
    visible: bool,
    frames: u8,
}

impl Reveal {
    fn is_fading(&self) -> bool {
        !self.visible || self.frames < FADE_FRAMES
    }
}

/// A skill bar that fills towards its target once visible.
#[derive(Debug, Clone, Copy)]
struct SkillBar {
    target: f32,
    shown: f32,
    delay: Option<Deferred>,
    filling: bool,
}

impl SkillBar {
    fn new(progress: u8) -> Self {
        Self {
            target: f32::from(progress.min(100)),
            shown: 0.0,
            delay: None,
            filling: false,
        }
    }

    fn start(&mut self, now_ms: u64) {
        if self.delay.is_none() && !self.filling {
            self.delay = Some(Deferred::after(now_ms, BAR_DELAY_MS));
        }
    }

    fn tick(&mut self, now_ms: u64) {
        if self.delay.is_some_and(|delay| delay.is_due(now_ms)) {
            self.delay = None;
            self.filling = true;
        }
        if self.filling {
            self.shown += (self.target - self.shown) * 0.2;
            if (self.target - self.shown).abs() < 0.5 {
                self.shown = self.target;
            }
        }
    }
}

/// A stat card: an animated counter when the value is numeric, plain text
/// otherwise.
#[derive(Debug)]
struct StatCard {
    value: String,
    label: String,
    counter: Option<BinaryCounter<TextCell>>,
}

/// Page content and the effects bound to it.
#[derive(Debug)]
pub struct Page {
    profile: Profile,
    layouts: Vec<SectionLayout>,
    scroll: u16,
    viewport_rows: u16,
    hero: Option<RepeatingScramble<TextCell>>,
    titles: Vec<(SectionId, RepeatingScramble<TextCell>)>,
    stats: Vec<StatCard>,
    commands: Vec<Typewriter<TextCell>>,
    bars: Vec<SkillBar>,
    badge_labels: Vec<Option<String>>,
    reveals: [Reveal; 5],
    focus: Option<usize>,
    rng: EffectRng,
}

impl Page {
    /// Build the page from config, splitting a random stream off `rng` for
    /// every effect.
    pub fn new(config: &Config, rng: &mut EffectRng) -> Self {
        let profile = config.profile.clone();
        let scramble = config.scramble;

        let hero = bind_scramble(&profile.name, scramble, rng);
        let titles = SectionId::ALL[1..]
            .iter()
            .filter_map(|id| bind_scramble(id.title(), scramble, rng).map(|fx| (*id, fx)))
            .collect();
        let stats = profile
            .stats
            .iter()
            .map(|stat| StatCard {
                value: stat.value.clone(),
                label: stat.label.clone(),
                counter: BinaryCounter::bind(
                    Some(TextCell::new(&stat.value)),
                    config.binary_counter,
                    derive_rng(rng),
                ),
            })
            .collect();
        let commands = profile
            .terminal_commands
            .iter()
            .filter_map(|command| Typewriter::bind(Some(TextCell::new(command)), config.typewriter))
            .collect();
        let bars = profile.skills.iter().map(|s| SkillBar::new(s.progress)).collect();
        let badge_labels = vec![None; profile.skills.len()];

        let mut page = Self {
            profile,
            layouts: Vec::new(),
            scroll: 0,
            viewport_rows: 0,
            hero,
            titles,
            stats,
            commands,
            bars,
            badge_labels,
            reveals: [Reveal::default(); 5],
            focus: None,
            rng: derive_rng(rng),
        };
        page.layouts = page.compute_layouts();
        page
    }

    /// Page content.
    pub fn profile(&self) -> &Profile {
        &self.profile
    }

    /// Play the hero name scramble once, as on page load.
    pub fn on_load(&mut self, scheduler: &mut FrameScheduler) {
        if let Some(hero) = &mut self.hero {
            hero.play_once(scheduler);
        }
    }

    /// Set how many rows of page the viewport shows.
    pub fn set_viewport_rows(&mut self, rows: u16) {
        self.viewport_rows = rows;
        self.scroll = self.scroll.min(self.max_scroll());
    }

    /// Scroll by `delta` rows, clamped to the page.
    pub fn scroll_by(&mut self, delta: i32) {
        let target = (i32::from(self.scroll) + delta).clamp(0, i32::from(self.max_scroll()));
        self.scroll = target as u16;
    }

    /// Scroll so the section heading sits just under the navbar.
    pub fn jump_to(&mut self, id: SectionId) {
        if let Some(layout) = self.layouts.iter().find(|l| l.id == id) {
            self.scroll = layout.top.saturating_sub(JUMP_OFFSET).min(self.max_scroll());
            debug!(section = id.title(), scroll = self.scroll, "jumped to section");
        }
    }

    /// Rows of page the viewport shows.
    pub fn viewport_rows(&self) -> u16 {
        self.viewport_rows
    }

    /// Jump to the top of the page.
    pub fn scroll_to_top(&mut self) {
        self.scroll = 0;
    }

    /// Jump to the end of the page.
    pub fn scroll_to_end(&mut self) {
        self.scroll = self.max_scroll();
    }

    /// Section highlighted in the navbar.
    pub fn active_section(&self) -> Option<SectionId> {
        active_section(&self.layouts, self.scroll)
    }

    /// Whether the navbar should use its scrolled style.
    pub fn is_scrolled(&self) -> bool {
        self.scroll > SCROLLED_THRESHOLD
    }

    /// Currently focused element.
    pub fn focus(&self) -> Option<Focus> {
        self.focus.map(|index| self.focusables()[index])
    }

    /// Move focus forward (or backward), wrapping around.
    pub fn cycle_focus(&mut self, forward: bool, scheduler: &mut FrameScheduler) {
        let count = self.focusables().len();
        if count == 0 {
            return;
        }
        let next = match (self.focus, forward) {
            (None, true) => 0,
            (None, false) => count - 1,
            (Some(i), true) => (i + 1) % count,
            (Some(i), false) => (i + count - 1) % count,
        };
        self.set_focus(Some(next), scheduler);
    }

    /// Drop focus.
    pub fn clear_focus(&mut self, scheduler: &mut FrameScheduler) {
        self.set_focus(None, scheduler);
    }

    /// Advance every effect and fire visibility triggers.
    pub fn tick(&mut self, now_ms: u64, scheduler: &mut FrameScheduler) {
        if let Some(hero) = &mut self.hero {
            hero.tick(now_ms, scheduler);
        }
        for (_, title) in &mut self.titles {
            title.tick(now_ms, scheduler);
        }
        for card in &mut self.stats {
            if let Some(counter) = &mut card.counter {
                counter.tick(now_ms, scheduler);
            }
        }
        for command in &mut self.commands {
            command.tick(now_ms);
        }
        for bar in &mut self.bars {
            bar.tick(now_ms);
        }
        self.observe(now_ms, scheduler);
    }

    /// Render the visible slice of the page.
    pub fn render(&self, frame: &mut Frame, area: Rect, accent: Color) {
        let paragraph = Paragraph::new(self.lines(accent)).scroll((self.scroll, 0));
        frame.render_widget(paragraph, area);
    }

    /// Every line of the page, top to bottom.
    pub fn lines(&self, accent: Color) -> Vec<Line<'static>> {
        SectionId::ALL
            .iter()
            .flat_map(|id| {
                let mut lines = self.section_lines(*id, accent);
                if self.reveals[id.index()].is_fading() {
                    for line in &mut lines {
                        dim(line);
                    }
                }
                lines
            })
            .collect()
    }

    fn max_scroll(&self) -> u16 {
        let total = self.layouts.last().map_or(0, |l| l.top + l.height);
        total.saturating_sub(self.viewport_rows)
    }

    fn compute_layouts(&self) -> Vec<SectionLayout> {
        let mut top = 0;
        SectionId::ALL
            .iter()
            .map(|id| {
                let height = self.section_lines(*id, Color::Reset).len() as u16;
                let layout = SectionLayout {
                    id: *id,
                    top,
                    height,
                };
                top += height;
                layout
            })
            .collect()
    }

    fn focusables(&self) -> Vec<Focus> {
        self.titles
            .iter()
            .map(|(id, _)| Focus::Title(*id))
            .chain((0..self.profile.skills.len()).map(Focus::Badge))
            .collect()
    }

    fn set_focus(&mut self, focus: Option<usize>, scheduler: &mut FrameScheduler) {
        if let Some(old) = self.focus() {
            match old {
                Focus::Title(id) => {
                    if let Some((_, title)) = self.titles.iter_mut().find(|(t, _)| *t == id) {
                        title.stop();
                    }
                }
                Focus::Badge(index) => self.badge_labels[index] = None,
            }
        }

        self.focus = focus;

        if let Some(new) = self.focus() {
            match new {
                Focus::Title(id) => {
                    if let Some((_, title)) = self.titles.iter_mut().find(|(t, _)| *t == id) {
                        title.start(scheduler);
                    }
                }
                Focus::Badge(index) => {
                    self.badge_labels[index] = Some(hex_label(&mut self.rng));
                }
            }
        }
    }

    /// Latch reveals and start effects for sections that scrolled into view.
    fn observe(&mut self, now_ms: u64, scheduler: &mut FrameScheduler) {
        if self.viewport_rows == 0 {
            return;
        }
        for layout in &self.layouts {
            let fraction = layout.visible_fraction(self.scroll, self.viewport_rows);
            let reveal = &mut self.reveals[layout.id.index()];
            if reveal.visible {
                reveal.frames = reveal.frames.saturating_add(1);
            } else if fraction >= REVEAL_THRESHOLD {
                reveal.visible = true;
                debug!(section = layout.id.title(), "section revealed");
            }

            match layout.id {
                SectionId::About if fraction >= ANIMATE_THRESHOLD => {
                    for card in &mut self.stats {
                        if let Some(counter) = &mut card.counter {
                            counter.start(now_ms, scheduler);
                        }
                    }
                }
                SectionId::Skills if fraction >= ANIMATE_THRESHOLD => {
                    for bar in &mut self.bars {
                        bar.start(now_ms);
                    }
                }
                SectionId::Contact if fraction > 0.0 => {
                    for command in &mut self.commands {
                        command.start(now_ms);
                    }
                }
                _ => {}
            }
        }
    }

    fn section_lines(&self, id: SectionId, accent: Color) -> Vec<Line<'static>> {
        let text = Style::new().fg(Color::Rgb(226, 232, 240));
        let muted = Style::new().fg(Color::Rgb(148, 163, 184));
        let neon = Style::new().fg(accent).add_modifier(Modifier::BOLD);

        let mut lines = vec![Line::default()];
        match id {
            SectionId::Home => {
                let name = match &self.hero {
                    Some(hero) => hero.target().spans(neon, neon.italic()),
                    None => vec![Span::styled(self.profile.name.clone(), neon)],
                };
                lines.push(Line::from(name).centered());
                lines.push(Line::styled(self.profile.headline.clone(), muted).centered());
            }
            SectionId::About => {
                lines.push(self.title_line(id, neon));
                lines.push(Line::default());
                for line in &self.profile.about {
                    lines.push(Line::styled(format!("  {line}"), text));
                }
                lines.push(Line::default());
                for card in &self.stats {
                    let value = match &card.counter {
                        Some(counter) => counter.target().spans(neon, neon),
                        None => vec![Span::styled(card.value.clone(), neon)],
                    };
                    let mut spans = vec![Span::styled("  ▌ ", Style::new().fg(accent))];
                    spans.extend(value);
                    spans.push(Span::styled(format!("  {}", card.label), muted));
                    lines.push(Line::from(spans));
                }
            }
            SectionId::Skills => {
                lines.push(self.title_line(id, neon));
                lines.push(Line::default());
                for (skill, bar) in self.profile.skills.iter().zip(&self.bars) {
                    let filled = (bar.shown / 100.0 * BAR_WIDTH as f32).round() as usize;
                    lines.push(Line::from(vec![
                        Span::styled(format!("  {:<20}", skill.name), text),
                        Span::styled("█".repeat(filled), Style::new().fg(accent)),
                        Span::styled("░".repeat(BAR_WIDTH - filled.min(BAR_WIDTH)), muted),
                        Span::styled(format!(" {:>3}%", bar.shown.round() as u8), muted),
                    ]));
                }
                lines.push(Line::default());
                let mut badges = vec![Span::raw("  ")];
                for (index, skill) in self.profile.skills.iter().enumerate() {
                    let badge = match &self.badge_labels[index] {
                        Some(label) => Span::styled(format!("[{label}]"), neon.reversed()),
                        None => Span::styled(format!("[{}]", skill.name), text),
                    };
                    badges.push(badge);
                    badges.push(Span::raw(" "));
                }
                lines.push(Line::from(badges));
            }
            SectionId::Experience => {
                lines.push(self.title_line(id, neon));
                lines.push(Line::default());
                for entry in &self.profile.experience {
                    lines.push(Line::from(vec![
                        Span::styled("  ● ", Style::new().fg(accent)),
                        Span::styled(format!("{:<14}", entry.period), muted),
                        Span::styled(entry.role.clone(), text.bold()),
                        Span::styled(format!(" @ {}", entry.company), muted),
                    ]));
                }
            }
            SectionId::Contact => {
                lines.push(self.title_line(id, neon));
                lines.push(Line::default());
                for contact in &self.profile.contact {
                    lines.push(Line::from(vec![
                        Span::styled(format!("  {:<10}", contact.label), muted),
                        Span::styled(contact.value.clone(), text),
                    ]));
                }
                lines.push(Line::default());
                let prompt = Style::new().fg(Color::Rgb(0, 255, 0));
                for command in &self.commands {
                    let mut spans = vec![Span::raw("  ")];
                    spans.extend(command.target().spans(prompt, neon));
                    lines.push(Line::from(spans));
                }
            }
        }
        lines.push(Line::default());
        lines
    }

    fn title_line(&self, id: SectionId, neon: Style) -> Line<'static> {
        let focused = self.focus() == Some(Focus::Title(id));
        let base = if focused { neon.underlined() } else { neon };
        let spans = match self.titles.iter().find(|(t, _)| *t == id) {
            Some((_, title)) => title.target().spans(base, base.italic()),
            None => vec![Span::styled(id.title(), base)],
        };
        let mut line = vec![Span::styled("## ", neon)];
        line.extend(spans);
        Line::from(line)
    }
}

fn bind_scramble(
    text: &str,
    params: ScrambleParams,
    rng: &mut EffectRng,
) -> Option<RepeatingScramble<TextCell>> {
    ScrambleText::bind(Some(TextCell::new(text)), params, derive_rng(rng))
        .map(|fx| RepeatingScramble::new(fx, text, params.repeat_delay_ms))
}

fn dim(line: &mut Line<'static>) {
    for span in &mut line.spans {
        span.style = span.style.fg(Color::DarkGray).add_modifier(Modifier::DIM);
    }
}

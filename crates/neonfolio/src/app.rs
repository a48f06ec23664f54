//! Application state and the main loop.

use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use neonfolio_config::Config;
use neonfolio_core::{ColorTheme, FrameScheduler, derive_rng, seeded_rng};
use neonfolio_effects::Backdrop;
use ratatui::{
    DefaultTerminal, Frame,
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
};
use tracing::info;

use crate::{
    eggs::{Console, ConsoleAction, KonamiDetector, Rainbow},
    page::{Page, SectionId},
};

/// Console lines kept in history.
const CONSOLE_HISTORY: usize = 64;
/// Console lines shown on screen.
const CONSOLE_ROWS: u16 = 5;
/// Page background.
const BACKGROUND: Color = Color::Rgb(15, 23, 42);

/// The main application which holds the state and logic of the application.
#[derive(Debug)]
pub struct App {
    /// Is the application running?
    running: bool,
    /// Current accent theme.
    color_theme: ColorTheme,
    /// Whether scanlines are drawn over the page.
    scanlines: bool,
    /// Time budget for one frame.
    frame_interval: Duration,
    /// When the app started.
    started: Instant,
    /// Milliseconds since start, sampled once per frame.
    now_ms: u64,
    scheduler: FrameScheduler,
    backdrop: Backdrop,
    page: Page,
    konami: KonamiDetector,
    rainbow: Rainbow,
    console: Console,
}

impl App {
    /// Construct a new instance of [`App`].
    pub fn new(config: Config) -> Self {
        let mut rng = seeded_rng(config.seed);
        let backdrop = Backdrop::new(config.rain, derive_rng(&mut rng));
        let page = Page::new(&config, &mut rng);
        let mut console = Console::new(CONSOLE_HISTORY);
        console.greet();

        Self {
            running: false,
            color_theme: config.color_theme,
            scanlines: config.scanlines,
            frame_interval: Duration::from_millis(config.frame_rate.frame_interval_ms()),
            started: Instant::now(),
            now_ms: 0,
            scheduler: FrameScheduler::new(),
            backdrop,
            page,
            konami: KonamiDetector::default(),
            rainbow: Rainbow::default(),
            console,
        }
    }

    /// Run the application's main loop.
    pub fn run(mut self, mut terminal: DefaultTerminal) -> color_eyre::Result<()> {
        self.running = true;
        let size = terminal.size()?;
        self.backdrop
            .sync_viewport(size.width, size.height, &mut self.scheduler);
        self.page.on_load(&mut self.scheduler);
        info!(width = size.width, height = size.height, "page loaded");

        self.tick();
        terminal.draw(|frame| self.render(frame))?;
        let mut last_tick = Instant::now();
        while self.running {
            match until_next_frame(last_tick.elapsed(), self.frame_interval) {
                Some(wait) => self.handle_crossterm_events(wait)?,
                None => {
                    last_tick = Instant::now();
                    self.tick();
                    terminal.draw(|frame| self.render(frame))?;
                }
            }
        }
        Ok(())
    }

    /// Advance every animation by one frame.
    fn tick(&mut self) {
        self.now_ms = self.started.elapsed().as_millis() as u64;
        self.scheduler.advance();
        self.backdrop.tick(&mut self.scheduler);
        self.page.tick(self.now_ms, &mut self.scheduler);
    }

    /// Renders the user interface.
    fn render(&mut self, frame: &mut Frame) {
        let accent_rgb = self.rainbow.accent(self.color_theme.rgb(), self.now_ms);
        let accent = Color::Rgb(accent_rgb.0, accent_rgb.1, accent_rgb.2);

        self.backdrop.render(frame, accent_rgb);

        let chunks = Layout::vertical([
            Constraint::Length(1),                // Navbar
            Constraint::Fill(1),                  // Page
            Constraint::Length(CONSOLE_ROWS + 2), // Console
            Constraint::Length(1),                // Help text
        ])
        .split(frame.area());

        self.render_nav(frame, chunks[0], accent);

        self.page.set_viewport_rows(chunks[1].height);
        self.page.render(frame, chunks[1], accent);

        self.render_console(frame, chunks[2], accent);

        let help = Line::from(vec![
            "q".bold().fg(accent),
            " quit  ".dark_gray(),
            "↑↓".bold().fg(accent),
            " scroll  ".dark_gray(),
            "1-5".bold().fg(accent),
            " jump  ".dark_gray(),
            "tab".bold().fg(accent),
            " focus  ".dark_gray(),
            ":".bold().fg(accent),
            " console  ".dark_gray(),
            "c".bold().fg(accent),
            " cycle color".dark_gray(),
        ])
        .centered();
        frame.render_widget(help, chunks[3]);

        if self.scanlines {
            render_scanlines(frame);
        }
    }

    /// Navbar with the active section highlighted.
    fn render_nav(&self, frame: &mut Frame, area: Rect, accent: Color) {
        let active = self.page.active_section();
        let mut spans = vec![Span::styled(" ◆ neonfolio ", Style::new().fg(accent).bold())];
        for (index, id) in SectionId::ALL.iter().enumerate() {
            let label = format!(" {} {} ", index + 1, id.title());
            let style = if active == Some(*id) {
                Style::new().fg(accent).add_modifier(Modifier::BOLD | Modifier::REVERSED)
            } else {
                Style::new().fg(Color::Rgb(148, 163, 184))
            };
            spans.push(Span::styled(label, style));
        }

        let mut nav = Paragraph::new(Line::from(spans));
        if self.page.is_scrolled() {
            nav = nav.style(Style::new().bg(BACKGROUND));
        }
        frame.render_widget(nav, area);
    }

    /// Console history and prompt.
    fn render_console(&self, frame: &mut Frame, area: Rect, accent: Color) {
        let mut lines: Vec<Line> = self
            .console
            .lines()
            .map(|line| {
                Line::from(vec![
                    Span::styled(format!("[{}] ", line.stamp), Style::new().dark_gray()),
                    Span::styled(line.text.clone(), Style::new().fg(line.color)),
                ])
            })
            .collect();
        if let Some(input) = self.console.input() {
            lines.push(Line::from(vec![
                Span::styled("> ", Style::new().fg(accent).bold()),
                Span::raw(input.to_string()),
                Span::styled("█", Style::new().fg(accent)),
            ]));
        }
        let visible = usize::from(CONSOLE_ROWS);
        let skip = lines.len().saturating_sub(visible);
        let lines: Vec<Line> = lines.into_iter().skip(skip).collect();

        let block = Block::new()
            .borders(Borders::TOP)
            .title(" console ")
            .border_style(Style::new().fg(accent))
            .style(Style::new().bg(BACKGROUND));
        frame.render_widget(Clear, area);
        frame.render_widget(Paragraph::new(lines).block(block), area);
    }

    /// Reads the crossterm events and updates the state of [`App`].
    /// Waits at most `timeout`, the time left until the next frame.
    fn handle_crossterm_events(&mut self, timeout: Duration) -> color_eyre::Result<()> {
        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => self.on_key_event(key),
                Event::Resize(width, height) => {
                    self.backdrop
                        .sync_viewport(width, height, &mut self.scheduler);
                }
                _ => {}
            }
        }
        Ok(())
    }

    /// Handles the key events and updates the state of [`App`].
    fn on_key_event(&mut self, key: KeyEvent) {
        if self.konami.push(key.code) {
            info!("konami code entered");
            self.rainbow.activate(self.now_ms);
        }

        if key.modifiers.contains(KeyModifiers::CONTROL)
            && matches!(key.code, KeyCode::Char('c' | 'C'))
        {
            self.quit();
            return;
        }

        if self.console.is_editing() {
            self.on_console_key(key);
            return;
        }

        match (key.modifiers, key.code) {
            (_, KeyCode::Esc) if self.page.focus().is_some() => {
                self.page.clear_focus(&mut self.scheduler);
            }
            (_, KeyCode::Esc | KeyCode::Char('q')) => self.quit(),
            (KeyModifiers::CONTROL, KeyCode::Char('s')) => self.toggle_scanlines(),
            (_, KeyCode::Char('c')) => self.cycle_color_theme(),
            (_, KeyCode::Char(':')) => self.console.begin_input(),
            (_, KeyCode::Down | KeyCode::Char('j')) => self.page.scroll_by(1),
            (_, KeyCode::Up | KeyCode::Char('k')) => self.page.scroll_by(-1),
            (_, KeyCode::PageDown) => self.page.scroll_by(self.page_step()),
            (_, KeyCode::PageUp) => self.page.scroll_by(-self.page_step()),
            (_, KeyCode::Home) => self.page.scroll_to_top(),
            (_, KeyCode::End) => self.page.scroll_to_end(),
            (_, KeyCode::Char(digit @ '1'..='5')) => {
                let index = digit as usize - '1' as usize;
                self.page.jump_to(SectionId::ALL[index]);
            }
            (_, KeyCode::Tab) => self.page.cycle_focus(true, &mut self.scheduler),
            (_, KeyCode::BackTab) => self.page.cycle_focus(false, &mut self.scheduler),
            _ => {}
        }
    }

    /// Keys while the console prompt is open.
    fn on_console_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Enter => {
                if self.console.submit(self.page.profile()) == ConsoleAction::ToggleRain {
                    self.backdrop.toggle_intensity();
                }
            }
            KeyCode::Esc => self.console.cancel_input(),
            KeyCode::Backspace => self.console.backspace(),
            KeyCode::Char(c) => self.console.push_char(c),
            _ => {}
        }
    }

    /// Rows moved by page up and page down.
    fn page_step(&self) -> i32 {
        i32::from(self.page.viewport_rows().max(1))
    }

    /// Toggle the scanline overlay.
    fn toggle_scanlines(&mut self) {
        self.scanlines = !self.scanlines;
        info!(enabled = self.scanlines, "scanlines toggled");
    }

    /// Cycle through available color themes.
    fn cycle_color_theme(&mut self) {
        self.color_theme = self.color_theme.next();
    }

    /// Set running to false to quit the application.
    fn quit(&mut self) {
        self.running = false;
    }
}

/// Time left before the next frame is due, or `None` when it is due now.
fn until_next_frame(since_last: Duration, interval: Duration) -> Option<Duration> {
    interval
        .checked_sub(since_last)
        .filter(|wait| !wait.is_zero())
}

/// Dim every other row, like an old CRT.
fn render_scanlines(frame: &mut Frame) {
    let area = frame.area();
    let buf = frame.buffer_mut();
    for y in (area.top()..area.bottom()).skip(1).step_by(2) {
        for x in area.left()..area.right() {
            if let Some(cell) = buf.cell_mut((x, y)) {
                cell.set_style(Style::new().add_modifier(Modifier::DIM));
            }
        }
    }
}

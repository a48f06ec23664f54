//! Easter eggs: the Konami code, badge hex labels and the command console.

use std::collections::VecDeque;

use chrono::Local;
use crossterm::event::KeyCode;
use neonfolio_config::Profile;
use neonfolio_core::Deferred;
use neonfolio_effects::hue_rotate;
use rand::Rng;
use ratatui::style::Color;

/// Up, up, down, down, left, right, left, right, B, A.
pub const KONAMI: [KeyCode; 10] = [
    KeyCode::Up,
    KeyCode::Up,
    KeyCode::Down,
    KeyCode::Down,
    KeyCode::Left,
    KeyCode::Right,
    KeyCode::Left,
    KeyCode::Right,
    KeyCode::Char('b'),
    KeyCode::Char('a'),
];

/// How long the rainbow lasts once unlocked.
const RAINBOW_MS: u64 = 5_000;
/// One full hue rotation.
const RAINBOW_PERIOD_MS: u64 = 2_000;

/// Watches the last ten key presses for the Konami code.
#[derive(Debug, Default)]
pub struct KonamiDetector {
    recent: VecDeque<KeyCode>,
}

impl KonamiDetector {
    /// Record a key press. Returns `true` when it completes the code.
    pub fn push(&mut self, code: KeyCode) -> bool {
        self.recent.push_back(code);
        if self.recent.len() > KONAMI.len() {
            self.recent.pop_front();
        }
        self.recent.iter().eq(KONAMI.iter())
    }
}

/// Hue rotation applied to the accent color for a few seconds.
#[derive(Debug, Default)]
pub struct Rainbow {
    started_ms: u64,
    until: Option<Deferred>,
}

impl Rainbow {
    /// Start (or restart) the rainbow.
    pub fn activate(&mut self, now_ms: u64) {
        self.started_ms = now_ms;
        self.until = Some(Deferred::after(now_ms, RAINBOW_MS));
    }

    /// Whether the rainbow is running.
    pub fn is_active(&self, now_ms: u64) -> bool {
        self.until.is_some_and(|until| !until.is_due(now_ms))
    }

    /// The accent to draw with right now.
    pub fn accent(&self, base: (u8, u8, u8), now_ms: u64) -> (u8, u8, u8) {
        if !self.is_active(now_ms) {
            return base;
        }
        let phase = (now_ms - self.started_ms) % RAINBOW_PERIOD_MS;
        hue_rotate(base, phase as f32 / RAINBOW_PERIOD_MS as f32 * 360.0)
    }
}

/// A random `0xHHHHHH` label shown on a focused skill badge.
pub fn hex_label<R: Rng + ?Sized>(rng: &mut R) -> String {
    format!("0x{:06X}", rng.random_range(0..16_777_215u32))
}

/// What the app should do after a console command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsoleAction {
    None,
    ToggleRain,
}

/// A printed console line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsoleLine {
    pub stamp: String,
    pub text: String,
    pub color: Color,
}

const PROMPT: Color = Color::Rgb(0, 255, 0);
const HEADING: Color = Color::Rgb(255, 121, 198);
const INFO: Color = Color::Rgb(139, 233, 253);
const DETAIL: Color = Color::Rgb(241, 250, 140);
const MUTED: Color = Color::Rgb(98, 114, 164);
const CHECK: Color = Color::Rgb(80, 250, 123);

/// Scrolling command console with a one-line prompt.
#[derive(Debug)]
pub struct Console {
    lines: VecDeque<ConsoleLine>,
    capacity: usize,
    input: Option<String>,
}

impl Console {
    /// Create a console keeping the last `capacity` lines.
    pub fn new(capacity: usize) -> Self {
        Self {
            lines: VecDeque::with_capacity(capacity),
            capacity: capacity.max(1),
            input: None,
        }
    }

    /// Print the start-up greeting.
    pub fn greet(&mut self) {
        self.print("👋 Hello! Thanks for checking out the code!", Color::Rgb(139, 92, 246));
        self.print("> System initialized...", PROMPT);
        self.print("> Press : and type help for available commands", MUTED);
    }

    /// Printed lines, oldest first.
    pub fn lines(&self) -> impl Iterator<Item = &ConsoleLine> {
        self.lines.iter()
    }

    /// The prompt's contents while editing.
    pub fn input(&self) -> Option<&str> {
        self.input.as_deref()
    }

    /// Whether the prompt is open.
    pub fn is_editing(&self) -> bool {
        self.input.is_some()
    }

    /// Open the prompt.
    pub fn begin_input(&mut self) {
        self.input = Some(String::new());
    }

    /// Close the prompt without running anything.
    pub fn cancel_input(&mut self) {
        self.input = None;
    }

    /// Type a character into the prompt.
    pub fn push_char(&mut self, c: char) {
        if let Some(input) = &mut self.input {
            input.push(c);
        }
    }

    /// Delete the last prompt character.
    pub fn backspace(&mut self) {
        if let Some(input) = &mut self.input {
            input.pop();
        }
    }

    /// Run whatever is in the prompt and close it.
    pub fn submit(&mut self, profile: &Profile) -> ConsoleAction {
        match self.input.take() {
            Some(command) => self.run(&command, profile),
            None => ConsoleAction::None,
        }
    }

    /// Run a console command.
    pub fn run(&mut self, command: &str, profile: &Profile) -> ConsoleAction {
        let command = command.trim().trim_end_matches("()");
        match command {
            "" => {}
            "help" => {
                self.print("Available Commands:", HEADING);
                self.print("  about       - Display profile information", INFO);
                self.print("  skills      - List technical skills", INFO);
                self.print("  contact     - Get contact information", INFO);
                self.print("  matrix      - Toggle matrix rain intensity", INFO);
                self.print("  clear       - Clear the console", INFO);
            }
            "about" => {
                self.print(format!("> {} - {}", profile.name, profile.headline), PROMPT);
                for line in &profile.about {
                    self.print(format!("> {line}"), DETAIL);
                }
            }
            "skills" => {
                self.print("> Technical Skills:", HEADING);
                for skill in &profile.skills {
                    self.print(format!("  [✓] {}", skill.name), CHECK);
                }
            }
            "contact" => {
                self.print("> Contact Information:", HEADING);
                for contact in &profile.contact {
                    self.print(format!("  {}: {}", contact.label, contact.value), INFO);
                }
            }
            "matrix" => {
                self.print("> Matrix rain intensity adjusted", PROMPT);
                return ConsoleAction::ToggleRain;
            }
            "clear" => self.lines.clear(),
            other => self.print(format!("command not found: {other}"), MUTED),
        }
        ConsoleAction::None
    }

    fn print(&mut self, text: impl Into<String>, color: Color) {
        if self.lines.len() == self.capacity {
            self.lines.pop_front();
        }
        self.lines.push_back(ConsoleLine {
            stamp: Local::now().format("%H:%M:%S").to_string(),
            text: text.into(),
            color,
        });
    }
}

#[cfg(test)]
mod tests {
    use neonfolio_core::seeded_rng;

    use super::*;

    #[test]
    fn konami_code_unlocks_after_noise() {
        let mut detector = KonamiDetector::default();
        assert!(!detector.push(KeyCode::Char('x')));
        assert!(!detector.push(KeyCode::Up));
        let mut unlocked = false;
        for code in KONAMI {
            unlocked = detector.push(code);
        }
        assert!(unlocked);
        assert!(!detector.push(KeyCode::Char('a')));
    }

    #[test]
    fn partial_code_does_not_unlock() {
        let mut detector = KonamiDetector::default();
        for code in &KONAMI[..9] {
            assert!(!detector.push(*code));
        }
        assert!(!detector.push(KeyCode::Char('b')));
    }

    #[test]
    fn rainbow_lasts_five_seconds() {
        let mut rainbow = Rainbow::default();
        let base = (6, 182, 212);
        assert_eq!(rainbow.accent(base, 0), base);

        rainbow.activate(1_000);
        assert!(rainbow.is_active(5_999));
        assert_ne!(rainbow.accent(base, 2_000), base);
        assert!(!rainbow.is_active(6_000));
        assert_eq!(rainbow.accent(base, 6_000), base);
    }

    #[test]
    fn hex_labels_are_six_hex_digits() {
        let mut rng = seeded_rng(Some(3));
        for _ in 0..32 {
            let label = hex_label(&mut rng);
            assert_eq!(label.len(), 8);
            assert!(label.starts_with("0x"));
            assert!(label[2..].chars().all(|c| c.is_ascii_hexdigit()));
        }
    }

    #[test]
    fn console_commands() {
        let profile = Profile::default();
        let mut console = Console::new(50);

        assert_eq!(console.run("skills()", &profile), ConsoleAction::None);
        let printed: Vec<_> = console.lines().map(|l| l.text.clone()).collect();
        assert_eq!(printed[0], "> Technical Skills:");
        assert_eq!(printed.len(), profile.skills.len() + 1);

        assert_eq!(console.run("matrix", &profile), ConsoleAction::ToggleRain);
        console.run("sudo", &profile);
        assert_eq!(
            console.lines().last().map(|l| l.text.as_str()),
            Some("command not found: sudo")
        );

        console.run("clear", &profile);
        assert_eq!(console.lines().count(), 0);
    }

    #[test]
    fn prompt_editing() {
        let profile = Profile::default();
        let mut console = Console::new(4);
        console.begin_input();
        for c in "helpx".chars() {
            console.push_char(c);
        }
        console.backspace();
        assert_eq!(console.input(), Some("help"));
        assert_eq!(console.submit(&profile), ConsoleAction::None);
        assert!(!console.is_editing());
        // Capacity keeps only the newest lines.
        assert_eq!(console.lines().count(), 4);
        assert_eq!(
            console.lines().last().map(|l| l.text.as_str()),
            Some("  clear       - Clear the console")
        );
    }
}

//! Key event to game command mapping
//!
//! One key press produces at most one command; held-key repetition comes
//! from the terminal's own key repeat.

use crate::game::Action;
use crate::settings::Settings;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// A resolved key press: either a game command or a driver-level quit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Input {
    Play(Action),
    Quit,
}

/// Key bindings resolved from settings strings into key codes
#[derive(Debug, Clone)]
pub struct KeyMap {
    move_left: Vec<KeyCode>,
    move_right: Vec<KeyCode>,
    soft_drop: Vec<KeyCode>,
    hard_drop: Vec<KeyCode>,
    rotate: Vec<KeyCode>,
    pause: Vec<KeyCode>,
    start: Vec<KeyCode>,
    restart: Vec<KeyCode>,
    quit: Vec<KeyCode>,
}

impl KeyMap {
    /// Parse a key string into KeyCode
    fn parse_key(s: &str) -> KeyCode {
        match s.to_lowercase().as_str() {
            "left" => KeyCode::Left,
            "right" => KeyCode::Right,
            "up" => KeyCode::Up,
            "down" => KeyCode::Down,
            "space" => KeyCode::Char(' '),
            "enter" => KeyCode::Enter,
            "tab" => KeyCode::Tab,
            "esc" | "escape" => KeyCode::Esc,
            s if s.len() == 1 => KeyCode::Char(s.chars().next().unwrap()),
            _ => KeyCode::Char(' '), // fallback
        }
    }

    /// Parse a list of key strings into KeyCodes
    fn parse_keys(keys: &[String]) -> Vec<KeyCode> {
        keys.iter().map(|s| Self::parse_key(s)).collect()
    }

    /// Create a key map from settings
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            move_left: Self::parse_keys(&settings.keys.move_left),
            move_right: Self::parse_keys(&settings.keys.move_right),
            soft_drop: Self::parse_keys(&settings.keys.soft_drop),
            hard_drop: Self::parse_keys(&settings.keys.hard_drop),
            rotate: Self::parse_keys(&settings.keys.rotate),
            pause: Self::parse_keys(&settings.keys.pause),
            start: Self::parse_keys(&settings.keys.start),
            restart: Self::parse_keys(&settings.keys.restart),
            quit: Self::parse_keys(&settings.keys.quit),
        }
    }

    /// Resolve a key press to an input, if it is bound
    pub fn resolve(&self, key: KeyEvent) -> Option<Input> {
        // Ctrl+C always quits, regardless of bindings
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return Some(Input::Quit);
        }

        let code = normalize_key(key.code);

        if self.move_left.contains(&code) {
            Some(Input::Play(Action::MoveLeft))
        } else if self.move_right.contains(&code) {
            Some(Input::Play(Action::MoveRight))
        } else if self.soft_drop.contains(&code) {
            Some(Input::Play(Action::SoftDrop))
        } else if self.hard_drop.contains(&code) {
            Some(Input::Play(Action::HardDrop))
        } else if self.rotate.contains(&code) {
            Some(Input::Play(Action::Rotate))
        } else if self.pause.contains(&code) {
            Some(Input::Play(Action::TogglePause))
        } else if self.start.contains(&code) {
            Some(Input::Play(Action::Start))
        } else if self.restart.contains(&code) {
            Some(Input::Play(Action::Restart))
        } else if self.quit.contains(&code) {
            Some(Input::Quit)
        } else {
            None
        }
    }
}

impl Default for KeyMap {
    fn default() -> Self {
        Self::from_settings(&Settings::default())
    }
}

/// Normalize key codes for consistent handling
fn normalize_key(code: KeyCode) -> KeyCode {
    match code {
        KeyCode::Char(c) => KeyCode::Char(c.to_ascii_lowercase()),
        other => other,
    }
}

//! Keyboard input: maps terminal key events to game commands.
//!
//! Crouch ends on the key-up of Down and restart fires on the key-up of R.
//! Terminals that cannot report key releases only ever deliver presses; in
//! that mode Down toggles crouching and R restarts on press.

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// UI-agnostic commands produced by the frame loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Jump,        // Space or Up
    CrouchStart, // Down pressed
    CrouchEnd,   // Down released
    Restart,     // R released, only while game over
    Quit,        // Esc, q, Ctrl-C
}

/// Session state the mapping depends on, read fresh for every event.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InputState {
    pub game_over: bool,
    /// Player is currently crouching; drives the press-only toggle.
    pub crouching: bool,
}

/// Key-to-command translator.
#[derive(Debug, Clone)]
pub struct KeyMapper {
    /// Whether the terminal reports key release events.
    release_events: bool,
}

impl KeyMapper {
    pub fn new(release_events: bool) -> Self {
        Self { release_events }
    }

    pub fn release_events(&self) -> bool {
        self.release_events
    }

    /// Translate one terminal event. Anything unrecognized maps to `None`.
    pub fn map(&self, event: &Event, state: InputState) -> Option<Command> {
        match event {
            Event::Key(key) => self.map_key(key, state),
            _ => None,
        }
    }

    fn map_key(&self, key: &KeyEvent, state: InputState) -> Option<Command> {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return (key.kind == KeyEventKind::Press).then_some(Command::Quit);
        }

        match key.kind {
            KeyEventKind::Press => self.map_press(key.code, state),
            KeyEventKind::Release => self.map_release(key.code, state),
            KeyEventKind::Repeat => None,
        }
    }

    fn map_press(&self, code: KeyCode, state: InputState) -> Option<Command> {
        match code {
            KeyCode::Char(' ') | KeyCode::Up => Some(Command::Jump),
            KeyCode::Down if !self.release_events && state.crouching => Some(Command::CrouchEnd),
            KeyCode::Down => Some(Command::CrouchStart),
            KeyCode::Char('r') | KeyCode::Char('R') if state.game_over && !self.release_events => {
                Some(Command::Restart)
            }
            KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('Q') => Some(Command::Quit),
            _ => None,
        }
    }

    fn map_release(&self, code: KeyCode, state: InputState) -> Option<Command> {
        match code {
            KeyCode::Down => Some(Command::CrouchEnd),
            KeyCode::Char('r') | KeyCode::Char('R') if state.game_over => Some(Command::Restart),
            _ => None,
        }
    }
}

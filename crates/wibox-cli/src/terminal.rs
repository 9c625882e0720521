//! Single-keypress input from the controlling terminal.

use std::io;

use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};

/// Source of one keypress.
pub trait KeySource {
    /// Block until one key is pressed. `None` for keys that are not characters.
    fn read_key(&mut self) -> io::Result<Option<char>>;
}

/// Raw mode for as long as the guard lives.
struct RawModeGuard;

impl RawModeGuard {
    fn acquire() -> io::Result<Self> {
        enable_raw_mode()?;
        Ok(Self)
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
    }
}

/// Reads keys from stdin via crossterm.
pub struct TerminalKeys;

impl KeySource for TerminalKeys {
    fn read_key(&mut self) -> io::Result<Option<char>> {
        let _raw = RawModeGuard::acquire()?;

        loop {
            match event::read()? {
                // Windows reports release events too
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    if key.modifiers.contains(KeyModifiers::CONTROL) {
                        return Ok(None);
                    }
                    return Ok(match key.code {
                        KeyCode::Char(c) => Some(c),
                        _ => None,
                    });
                }
                _ => continue,
            }
        }
    }
}

//! The crossterm backed terminal adapter.

use std::io::{self, Stdout, Write};
use std::time::Duration;

use anyhow::Result;
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute, queue,
    style::Print,
    terminal::{self, Clear, ClearType},
};

use baf::devices::{CursorMove, Key, TerminalCommands};

const WRITE_FAILED: &str = "Writing to the terminal failed.";
const READ_FAILED: &str = "Reading from the keyboard failed.";

/// A [`TerminalCommands`] implementation on top of crossterm.
///
/// The terminal stays in raw mode from construction until the adapter is
/// dropped. The platform key mapping lives here: ESC (or CTRL+C) is the
/// stop key, CTRL+L the clear key and F1/F2 move through the history.
pub struct CrosstermTerminal {
    stdout: Stdout,
}

impl CrosstermTerminal {
    /// Puts the terminal into raw mode until the adapter is dropped.
    pub fn new() -> Result<Self> {
        terminal::enable_raw_mode()?;

        Ok(Self {
            stdout: io::stdout(),
        })
    }

    /// Maps a crossterm key event onto the editor's key set.
    fn map_key(event: KeyEvent) -> Option<Key> {
        if event.kind == KeyEventKind::Release {
            return None;
        }

        if event.modifiers.contains(KeyModifiers::CONTROL) {
            return match event.code {
                KeyCode::Char('c') => Some(Key::Stop),
                KeyCode::Char('l') => Some(Key::Clear),
                _ => None,
            };
        }

        let key = match event.code {
            KeyCode::Enter => Key::Enter,
            KeyCode::Esc => Key::Stop,
            KeyCode::Backspace => Key::Backspace,
            KeyCode::Left => Key::Left,
            KeyCode::Right => Key::Right,
            KeyCode::Up => Key::Up,
            KeyCode::Down => Key::Down,
            KeyCode::Home => Key::Home,
            KeyCode::Insert => Key::Insert,
            KeyCode::F(1) => Key::HistoryBack,
            KeyCode::F(2) => Key::HistoryForward,
            KeyCode::Char(character) if (character as u32) <= 0xFF => {
                Key::Char(character as u8)
            }
            _ => return None,
        };
        Some(key)
    }

    /// Queues a single byte without flushing.
    fn put(&mut self, character: u8) {
        if character == b'\n' {
            // raw mode needs the explicit carriage return
            queue!(self.stdout, Print("\r\n")).expect(WRITE_FAILED);
        } else {
            queue!(self.stdout, Print(char::from(character))).expect(WRITE_FAILED);
        }
    }

    fn flush(&mut self) {
        self.stdout.flush().expect(WRITE_FAILED);
    }
}

impl TerminalCommands for CrosstermTerminal {
    fn read_key_blocking(&mut self) -> Key {
        execute!(self.stdout, cursor::Show, cursor::EnableBlinking).expect(WRITE_FAILED);

        let key = loop {
            if let Event::Key(event) = event::read().expect(READ_FAILED) {
                if let Some(key) = Self::map_key(event) {
                    break key;
                }
            }
        };

        execute!(self.stdout, cursor::DisableBlinking).expect(WRITE_FAILED);
        key
    }

    fn read_key_if_ready(&mut self) -> Option<Key> {
        while event::poll(Duration::from_secs(0)).expect(READ_FAILED) {
            if let Event::Key(event) = event::read().expect(READ_FAILED) {
                if let Some(key) = Self::map_key(event) {
                    return Some(key);
                }
            }
        }
        None
    }

    fn write_char(&mut self, character: u8) {
        self.put(character);
        self.flush();
    }

    fn write_str(&mut self, text: &str) {
        for character in text.bytes() {
            self.put(character);
        }
        self.flush();
    }

    fn move_cursor(&mut self, movement: CursorMove, count: usize) {
        if count == 0 {
            return;
        }

        let count = count as u16;
        match movement {
            CursorMove::Left => execute!(self.stdout, cursor::MoveLeft(count)),
            CursorMove::Right => execute!(self.stdout, cursor::MoveRight(count)),
        }
        .expect(WRITE_FAILED);
    }

    fn clear_screen(&mut self) {
        execute!(self.stdout, Clear(ClearType::All), cursor::MoveTo(0, 0)).expect(WRITE_FAILED);
    }

    fn screen_width(&self) -> usize {
        let (width, _height) = terminal::size().expect(READ_FAILED);
        width as usize
    }
}

impl Drop for CrosstermTerminal {
    /// Hands the terminal back the way it was found.
    fn drop(&mut self) {
        let _ = execute!(self.stdout, cursor::Show);
        let _ = terminal::disable_raw_mode();
    }
}

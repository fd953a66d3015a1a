//! The cursor addressable line editor used to read user input.

use crate::{
    definitions::editor,
    devices::{CursorMove, Key, TerminalCommands},
    history::{HistoryRing, Recall},
};

/// Returns whether the given byte is a control character that typed input
/// may not place into the buffer.
fn is_control_character(character: u8) -> bool {
    character < 0x20 || character == 0x7F
}

/// A single line editor with a movable cursor, insertion and history
/// recall.
///
/// The editor owns its buffer, which holds up to 255 bytes of user text;
/// the last byte is reserved for a null terminator. It echoes every
/// change through the terminal itself, including redrawing the line tail
/// after a deletion or insertion.
pub struct LineEditor {
    /// The buffer currently being edited.
    buffer: [u8; editor::CAPACITY],
    /// The location of the user's cursor inside the buffer.
    cursor: usize,
    /// How much of the buffer is taken up by the text typed by the user.
    input_size: usize,
}

impl LineEditor {
    pub fn new() -> Self {
        Self {
            buffer: [0; editor::CAPACITY],
            cursor: 0,
            input_size: 0,
        }
    }

    /// Will read one line of input from the terminal.
    ///
    /// Returns the finalized line, without the terminator. The line is
    /// empty when the user cancelled it with the stop key. Non-empty
    /// lines are saved to the given history on every exit path.
    pub fn edit<T: TerminalCommands>(
        &mut self,
        terminal: &mut T,
        history: &mut HistoryRing,
    ) -> &[u8] {
        self.cursor = 0;
        self.input_size = 0;

        loop {
            match terminal.read_key_blocking() {
                // Finalizes the line.
                Key::Enter => {
                    self.buffer[self.input_size] = 0;
                    terminal.move_cursor(CursorMove::Right, self.input_size - self.cursor);
                    self.cursor = self.input_size;
                    terminal.write_char(b'\n');
                    break;
                }

                // Cancels the line.
                Key::Stop => {
                    self.buffer[0] = 0;
                    self.input_size = 0;
                    terminal.write_char(b'\n');
                    break;
                }

                // Clears the screen together with the line.
                Key::Clear => {
                    self.cursor = 0;
                    self.input_size = 0;
                    terminal.clear_screen();
                }

                Key::Backspace => self.backspace(terminal),

                Key::Left => {
                    if self.cursor > 0 {
                        self.cursor -= 1;
                        terminal.move_cursor(CursorMove::Left, 1);
                    }
                }

                Key::Right => {
                    if self.cursor < self.input_size {
                        self.cursor += 1;
                        terminal.move_cursor(CursorMove::Right, 1);
                    }
                }

                // Navigates to the same column one screen line up, or to
                // the start of the buffer if there is no line there.
                Key::Up => {
                    let width = terminal.screen_width();
                    let new_cursor = self.cursor.saturating_sub(width);
                    terminal.move_cursor(CursorMove::Left, self.cursor - new_cursor);
                    self.cursor = new_cursor;
                }

                // Navigates to the same column one screen line down, or
                // to the end of the filled buffer if there is no line
                // there.
                Key::Down => {
                    let width = terminal.screen_width();
                    let new_cursor = if self.input_size - self.cursor > width {
                        self.cursor + width
                    } else {
                        self.input_size
                    };
                    terminal.move_cursor(CursorMove::Right, new_cursor - self.cursor);
                    self.cursor = new_cursor;
                }

                Key::Home => {
                    terminal.move_cursor(CursorMove::Left, self.cursor);
                    self.cursor = 0;
                }

                Key::Insert => self.insert_space(terminal),

                Key::HistoryBack => self.recall(terminal, history, Recall::Back),
                Key::HistoryForward => self.recall(terminal, history, Recall::Forward),

                // Types a character at the cursor, overwriting or
                // appending.
                Key::Char(character) => {
                    if is_control_character(character) || self.cursor > editor::MAX_INDEX {
                        continue;
                    }

                    if self.cursor == self.input_size {
                        self.input_size += 1;
                    }
                    self.buffer[self.cursor] = character;
                    self.cursor += 1;
                    terminal.write_char(character);
                }
            }
        }

        if self.input_size > 0 {
            history.save(&self.buffer[..self.input_size]);
        }

        &self.buffer[..self.input_size]
    }

    /// Deletes the character left of the cursor and closes the gap.
    fn backspace<T: TerminalCommands>(&mut self, terminal: &mut T) {
        if self.cursor == 0 {
            return;
        }

        self.buffer
            .copy_within(self.cursor..self.input_size, self.cursor - 1);
        self.input_size -= 1;
        self.cursor -= 1;

        // Redraws the shifted tail and blanks the freed character.
        terminal.move_cursor(CursorMove::Left, 1);
        for index in self.cursor..self.input_size {
            terminal.write_char(self.buffer[index]);
        }
        terminal.write_char(b' ');
        terminal.move_cursor(CursorMove::Left, self.input_size - self.cursor + 1);
    }

    /// Opens a gap at the cursor by shifting the tail right and filling
    /// the gap with a space.
    fn insert_space<T: TerminalCommands>(&mut self, terminal: &mut T) {
        if self.input_size > editor::MAX_INDEX || self.cursor == self.input_size {
            return;
        }

        self.buffer
            .copy_within(self.cursor..self.input_size, self.cursor + 1);
        self.buffer[self.cursor] = b' ';
        self.input_size += 1;

        // Redraws from the cursor to the end of the line.
        for index in self.cursor..self.input_size {
            terminal.write_char(self.buffer[index]);
        }
        terminal.move_cursor(CursorMove::Left, self.input_size - self.cursor);
    }

    /// Replaces the line with the previous or next history entry, if
    /// there is one.
    fn recall<T: TerminalCommands>(
        &mut self,
        terminal: &mut T,
        history: &mut HistoryRing,
        direction: Recall,
    ) {
        let entry = match history.recall(direction) {
            Some(entry) => entry,
            None => return,
        };

        // Wipes the visible line.
        terminal.move_cursor(CursorMove::Right, self.input_size - self.cursor);
        terminal.move_cursor(CursorMove::Left, self.input_size);
        for _ in 0..self.input_size {
            terminal.write_char(b' ');
        }
        terminal.move_cursor(CursorMove::Left, self.input_size);

        // Replaces the buffer contents and echoes them.
        self.buffer[..entry.len()].copy_from_slice(&entry);
        self.input_size = entry.len();
        self.cursor = entry.len();
        for &character in entry.iter() {
            terminal.write_char(character);
        }
    }
}

impl Default for LineEditor {
    fn default() -> Self {
        Self::new()
    }
}

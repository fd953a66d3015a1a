//! Hand rolled device adapters shared between the unit tests.

use std::collections::VecDeque;

use crate::devices::{CursorMove, Key, TerminalCommands};

/// A terminal that feeds a canned key script and records everything the
/// code under test writes to the screen.
///
/// Blocking reads take from `keys`, the non-blocking readiness probe
/// takes from `ready`. Running out of scripted keys on a blocking read is
/// a test bug and panics.
pub(crate) struct ScriptedTerminal {
    keys: VecDeque<Key>,
    ready: VecDeque<Key>,
    pub(crate) output: Vec<u8>,
    pub(crate) moves: Vec<(CursorMove, usize)>,
    pub(crate) cleared: usize,
    pub(crate) width: usize,
}

impl ScriptedTerminal {
    pub(crate) fn new() -> Self {
        Self {
            keys: VecDeque::new(),
            ready: VecDeque::new(),
            output: Vec::new(),
            moves: Vec::new(),
            cleared: 0,
            width: 8,
        }
    }

    /// A terminal whose blocking reads run through the given script.
    pub(crate) fn with_keys(keys: Vec<Key>) -> Self {
        Self {
            keys: keys.into(),
            ..Self::new()
        }
    }

    /// A terminal whose readiness probe reports the given keys, one per
    /// probe.
    pub(crate) fn with_ready_keys(ready: Vec<Key>) -> Self {
        Self {
            ready: ready.into(),
            ..Self::new()
        }
    }
}

impl TerminalCommands for ScriptedTerminal {
    fn read_key_blocking(&mut self) -> Key {
        self.keys
            .pop_front()
            .expect("The key script ran out of keys.")
    }

    fn read_key_if_ready(&mut self) -> Option<Key> {
        self.ready.pop_front()
    }

    fn write_char(&mut self, character: u8) {
        self.output.push(character);
    }

    fn move_cursor(&mut self, movement: CursorMove, count: usize) {
        if count > 0 {
            self.moves.push((movement, count));
        }
    }

    fn clear_screen(&mut self) {
        self.cleared += 1;
    }

    fn screen_width(&self) -> usize {
        self.width
    }
}

//! Abstractions over the terminal and the host computer.

use crate::error::HostError;

/// A keypress reported by the terminal, after platform mapping.
///
/// Which physical keys map to the editing commands is up to the terminal
/// implementation; the core only ever sees this set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Enter,
    /// The platform's interrupt key. Cancels the current line or aborts
    /// the running program.
    Stop,
    /// Clears the screen together with the current line.
    Clear,
    Backspace,
    Left,
    Right,
    Up,
    Down,
    Home,
    Insert,
    /// Recalls the previous history entry.
    HistoryBack,
    /// Recalls the next history entry.
    HistoryForward,
    /// A plain text byte.
    Char(u8),
}

/// The direction to move the visible cursor in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CursorMove {
    Left,
    Right,
}

/// The trait responsible for the screen and keyboard based code.
pub trait TerminalCommands {
    /// Will block until a key is pressed. Implementations show a blinking
    /// cursor while waiting.
    fn read_key_blocking(&mut self) -> Key;
    /// Will return a pressed key without blocking, if one is ready.
    fn read_key_if_ready(&mut self) -> Option<Key>;
    /// Will write a single text byte at the cursor.
    fn write_char(&mut self, character: u8);
    /// Will write a string at the cursor.
    fn write_str(&mut self, text: &str) {
        for character in text.bytes() {
            self.write_char(character);
        }
    }
    /// Will move the visible cursor by `count` character positions.
    fn move_cursor(&mut self, movement: CursorMove, count: usize);
    /// Will clear the screen and move the cursor to the top left corner.
    fn clear_screen(&mut self);
    /// The width of the screen in characters.
    fn screen_width(&self) -> usize;
}

/// The A, X and Y register values exchanged with a host subroutine call.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Registers {
    pub a: u8,
    pub x: u8,
    pub y: u8,
}

/// The trait responsible for the host computer's memory and subroutines.
///
/// On a 6502 machine this would be backed by the real address space and a
/// `jsr` through the memory pointer; portable frontends use
/// [`SandboxHost`] instead.
#[cfg_attr(test, mockall::automock)]
pub trait HostCommands {
    /// Reads the byte at the given host memory address.
    fn read(&mut self, address: u16) -> u8;
    /// Writes a byte to the given host memory address.
    fn write(&mut self, address: u16, value: u8);
    /// Runs the host subroutine at the given address and returns the
    /// resulting register values.
    fn call(&mut self, registers: Registers, address: u16) -> Result<Registers, HostError>;
}

/// The type of the installable subroutine hook of a [`SandboxHost`].
pub type CallHook = Box<dyn FnMut(Registers, u16) -> Registers>;

/// A host backed by an owned 64 KiB memory image.
///
/// Peek and poke work against the image, so programs behave the same as
/// on a real machine without touching this process' memory. Subroutine
/// calls fail with [`HostError::Unavailable`] unless a hook was installed
/// with [`SandboxHost::with_hook`].
pub struct SandboxHost {
    memory: Box<[u8]>,
    hook: Option<CallHook>,
}

impl SandboxHost {
    /// Will create a sandbox host without a subroutine hook.
    pub fn new() -> Self {
        Self {
            memory: vec![0; 1 << 16].into_boxed_slice(),
            hook: None,
        }
    }

    /// Will create a sandbox host that runs the given hook on execute.
    pub fn with_hook(hook: CallHook) -> Self {
        Self {
            hook: Some(hook),
            ..Self::new()
        }
    }
}

impl Default for SandboxHost {
    fn default() -> Self {
        Self::new()
    }
}

impl HostCommands for SandboxHost {
    fn read(&mut self, address: u16) -> u8 {
        self.memory[address as usize]
    }

    fn write(&mut self, address: u16, value: u8) {
        self.memory[address as usize] = value;
    }

    fn call(&mut self, registers: Registers, address: u16) -> Result<Registers, HostError> {
        log::debug!("host call at {:#06X}", address);

        match self.hook.as_mut() {
            Some(hook) => Ok(hook(registers, address)),
            None => Err(HostError::Unavailable),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sandbox_memory_round_trip() {
        let mut host = SandboxHost::new();

        assert_eq!(host.read(0x0000), 0);
        assert_eq!(host.read(0xFFFF), 0);

        host.write(0xC000, 0xA9);
        assert_eq!(host.read(0xC000), 0xA9);
        assert_eq!(host.read(0xC001), 0);
    }

    #[test]
    fn test_sandbox_call_without_hook() {
        let mut host = SandboxHost::new();

        assert_eq!(
            host.call(Registers::default(), 0xFFD2),
            Err(HostError::Unavailable)
        );
    }

    #[test]
    fn test_sandbox_call_with_hook() {
        let mut host = SandboxHost::with_hook(Box::new(|registers, address| Registers {
            a: registers.a.wrapping_add(1),
            x: (address >> 8) as u8,
            y: registers.y,
        }));

        let registers = Registers { a: 7, x: 0, y: 3 };
        assert_eq!(
            host.call(registers, 0xFFD2),
            Ok(Registers { a: 8, x: 0xFF, y: 3 })
        );
    }
}

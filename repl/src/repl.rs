//! The read evaluate print loop gluing the editor, compiler and
//! interpreter together.

use std::time::Duration;

use baf::{
    compiler::Compiler,
    devices::{Key, SandboxHost, TerminalCommands},
    editor::LineEditor,
    history::HistoryRing,
    interpreter::Interpreter,
    CompileError, HostError, RuntimeError,
};

use crate::menus;

/// The prompt printed before every line of input.
const PROMPT: &str = "YOUR WILL? ";

/// The session state the REPL carries between lines.
pub struct Repl {
    compiler: Compiler,
    interpreter: Interpreter,
    editor: LineEditor,
    history: HistoryRing,
    host: SandboxHost,
    cells: usize,
}

impl Repl {
    /// Will create a session with the given cell count and history size.
    pub fn new(cells: usize, history_size: usize) -> Self {
        Self {
            compiler: Compiler::new(),
            interpreter: Interpreter::new(cells),
            editor: LineEditor::new(),
            history: HistoryRing::new(history_size),
            host: SandboxHost::new(),
            cells,
        }
    }

    /// Runs the loop until the user exits with `!`.
    pub fn run<T: TerminalCommands>(&mut self, terminal: &mut T) {
        self.banner(terminal);

        loop {
            // Read.
            terminal.write_str(PROMPT);
            let line = self.editor.edit(terminal, &mut self.history).to_vec();

            match line.first().copied() {
                // empty input.
                None => continue,

                Some(b'!') => {
                    terminal.write_str("SO BE IT.\n");
                    break;
                }

                Some(b'?') => {
                    menus::help(terminal);
                    continue;
                }

                Some(b'L') => {
                    menus::license(terminal);
                    continue;
                }

                Some(b'#') => {
                    self.display_bytecode(terminal);
                    continue;
                }

                Some(_) => {}
            }

            // Evaluate.
            if let Err(error) = self.compiler.compile(&line) {
                let message = match error {
                    CompileError::OutOfMemory => "?OUT OF MEMORY\n",
                    CompileError::UnterminatedLoop => "?UNTERMINATED LOOP\n",
                };
                terminal.write_str(message);
                continue;
            }

            let result =
                self.interpreter
                    .run(self.compiler.program_memory(), terminal, &mut self.host);
            if let Err(error) = result {
                let message = match error {
                    RuntimeError::Abort => "?ABORT\n",
                    RuntimeError::OutOfCellRange { .. } => "?EXECUTE OUT OF CELLS\n",
                    RuntimeError::Host(HostError::Unavailable) => "?NO INSTALLED HOST\n",
                };
                terminal.write_str(message);
            }

            log::trace!("{}", self.interpreter);

            // Print. The cell state is worth seeing even after an abort.
            let status = status_line(
                self.interpreter.current_cell(),
                self.interpreter.cell_index(),
                self.interpreter.memory_pointer(),
            );
            terminal.write_str(&status);
        }
    }

    /// Prints the startup banner.
    fn banner<T: TerminalCommands>(&self, terminal: &mut T) {
        terminal.clear_screen();
        terminal.write_str(concat!(
            "BASICfuck REPL ",
            env!("CARGO_PKG_VERSION"),
            "\n\n"
        ));
        terminal.write_str(&format!("{} CELLS FREE\n\n", self.cells));
        terminal.write_str("Enter '?' for HELP\nEnter '!' to EXIT\n\n");
    }

    /// Displays a readout of the bytecode of the last program. Holding
    /// space will slow down the printing.
    fn display_bytecode<T: TerminalCommands>(&mut self, terminal: &mut T) {
        let memory = self.compiler.program_memory();

        // Ideally display 16 bytes at a time, but screen real estate is
        // what it is.
        let width = terminal.screen_width();
        let bytes_per_line = (width.saturating_sub(7) / 3).clamp(1, 16);

        for (index, byte) in memory.iter().enumerate() {
            if index % bytes_per_line == 0 {
                // Slow down while holding space.
                if terminal.read_key_if_ready() == Some(Key::Char(b' ')) {
                    std::thread::sleep(Duration::from_secs(1));
                }

                terminal.write_str(&format!("\n${:04X}:", index));
            }
            terminal.write_str(&format!(" {:02X}", byte));
        }

        terminal.write_char(b'\n');
    }
}

/// Formats the result line printed after every run.
fn status_line(value: u8, cell: usize, memory: u16) -> String {
    format!("{:03} (Cell {:05}, Memory ${:04X})\n", value, cell, memory)
}

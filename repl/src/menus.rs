//! The help and license screens of the REPL.

use baf::devices::TerminalCommands;

/// Clears the screen, shows the given text and waits for any key.
fn screen<T: TerminalCommands>(terminal: &mut T, text: &str) {
    terminal.clear_screen();
    terminal.write_str(text);
    terminal.write_str("\nPress ANY KEY to CONTINUE\n");
    terminal.read_key_blocking();
}

/// Runs the help menu, telling the user about the REPL and its
/// functions.
pub fn help<T: TerminalCommands>(terminal: &mut T) {
    screen(
        terminal,
        "REPL Commands (must be at start of line):\n\
         \n\
         ! - Exits REPL.\n\
         ? - Displays this help menu.\n\
         L - Displays license information.\n\
         # - Displays bytecode of last program.\n\
         \n\
         REPL Controls (Keypress):\n\
         \n\
         ESC - Cancel input and start new line like C-c.\n\
         HOME - Move to start of line.\n\
         CTRL+L - Clear screen and line.\n\
         F1 - Previous history item.\n\
         F2 - Next history item.\n\
         \n\
         ESC - Abort BASICfuck program.\n",
    );

    screen(
        terminal,
        "BASICfuck Instructions (Part 1):\n\
         \n\
         + - Increment cell.\n\
         - - Decrement cell.\n\
         > - Move to next cell.\n\
         < - Move to previous cell.\n\
         . - Display value in cell as character.\n\
         , - Store value of key from keyboard in cell.\n\
         [ - Jump to corresponding ']' if value of cell is 0.\n\
         ] - Jump to corresponding '[' if value of cell is not 0.\n",
    );

    screen(
        terminal,
        "BASICfuck Instructions (Part 2):\n\
         \n\
         ) - Move to next location in computer memory.\n\
         ( - Move to previous location in computer memory.\n\
         @ - Read value from computer memory into cell.\n\
         * - Write value from cell into computer memory.\n\
         % - Execute location in computer memory as subroutine. The \
         values of the current and next two cells will be used for the \
         A, X, and Y registers. Resulting register values will be stored \
         back into the respective cells.\n",
    );

    terminal.clear_screen();
}

/// Runs the license menu.
pub fn license<T: TerminalCommands>(terminal: &mut T) {
    screen(
        terminal,
        concat!(
            "BASICfuck REPL ",
            env!("CARGO_PKG_VERSION"),
            "\n\
             \n\
             This program is free software: you can redistribute it \
             and/or modify it under the terms of the GNU General Public \
             License as published by the Free Software Foundation, \
             either version 3 of the License, or (at your option) any \
             later version.\n\
             \n\
             This program is distributed in the hope that it will be \
             useful, but WITHOUT ANY WARRANTY; without even the implied \
             warranty of MERCHANTABILITY or FITNESS FOR A PARTICULAR \
             PURPOSE. See the GNU General Public License for more \
             details: <https://www.gnu.org/licenses/>.\n"
        ),
    );

    terminal.clear_screen();
}

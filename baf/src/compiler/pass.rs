//! The compiler state and the two compilation passes.

use crate::{
    definitions::program,
    error::CompileError,
    opcode::{self, Opcode, OpcodeClass},
};

/// The bytecode compiler and the program memory it emits into.
///
/// Every compilation rewrites program memory from offset 0. The buffer's
/// last byte is reserved so that a program always fits its terminating
/// halt.
#[derive(Debug, PartialEq)]
pub struct Compiler {
    /// Memory for the compiled bytecode of the entered code.
    pub(super) program: [u8; program::SIZE],
}

impl Compiler {
    pub fn new() -> Self {
        Self {
            program: [0; program::SIZE],
        }
    }

    /// Bytecode compiles the given source, replacing the previous
    /// program.
    ///
    /// The source ends at its first null byte or at the end of the slice,
    /// whichever comes first. Bytes that are not instructions are skipped
    /// as comments.
    ///
    /// # Example
    /// ```rust
    /// # use baf::{compiler::Compiler, opcode::Opcode};
    /// let mut compiler = Compiler::new();
    /// compiler.compile(b"+++").expect("This will work.");
    ///
    /// assert_eq!(
    ///     compiler.program_memory()[..3],
    ///     [Opcode::Increment as u8, 3, Opcode::Halt as u8]
    /// );
    /// ```
    pub fn compile(&mut self, source: &[u8]) -> Result<(), CompileError> {
        self.first_pass(source)?;
        self.second_pass()
    }

    /// A view of the whole program memory, for the interpreter and the
    /// bytecode readout.
    pub fn program_memory(&self) -> &[u8] {
        &self.program
    }

    /// Performs the first pass, converting the text program to opcodes.
    ///
    /// Counted instructions are collapsed: a run of identical characters
    /// becomes (opcode, count) pairs with counts of up to 255. Jump
    /// instructions are emitted with placeholder offsets for the second
    /// pass to patch.
    fn first_pass(&mut self, source: &[u8]) -> Result<(), CompileError> {
        let mut read = 0;
        let mut write = 0;

        loop {
            let instruction = source.get(read).copied().unwrap_or(0);
            let opcode = match Opcode::from_instruction(instruction) {
                Some(opcode) => opcode,
                // Ignores non-instructions.
                None => {
                    read += 1;
                    continue;
                }
            };

            match opcode.class() {
                // End of program.
                OpcodeClass::Halt => {
                    self.program[write] = Opcode::Halt as u8;
                    break;
                }

                // Takes no arguments.
                OpcodeClass::Plain => {
                    if write >= program::LAST {
                        return Err(CompileError::OutOfMemory);
                    }

                    self.program[write] = opcode as u8;
                    write += 1;
                    read += 1;
                }

                // Takes a 16-bit offset into program memory, which will
                // be filled in by the second pass.
                OpcodeClass::Jump => {
                    if write + 2 >= program::LAST {
                        return Err(CompileError::OutOfMemory);
                    }

                    self.program[write] = opcode as u8;
                    opcode::write_jump_target(&mut self.program, write, opcode::JUMP_PLACEHOLDER);
                    write += opcode.size();
                    read += 1;
                }

                // Takes an 8-bit count of how many times to perform the
                // operation.
                OpcodeClass::Counted => {
                    // Count the number of consecutive identical
                    // instructions.
                    let mut count = 0;
                    while source.get(read).copied() == Some(instruction) {
                        count += 1;
                        read += 1;
                    }

                    // Each opcode can only take an 8-bit count, so this
                    // chops the full count up into separate chunks.
                    while count > 0 {
                        if write + 1 >= program::LAST {
                            return Err(CompileError::OutOfMemory);
                        }

                        let chunk = count.min(u8::MAX as usize);
                        self.program[write] = opcode as u8;
                        self.program[write + 1] = chunk as u8;
                        write += opcode.size();

                        count -= chunk;
                    }
                }
            }
        }

        Ok(())
    }

    /// Performs the second pass, linking the loop brackets.
    ///
    /// Every opening jump seeks forward for its partner, tracking the
    /// nesting depth, and both ends are patched with each other's offset.
    /// A closing jump whose offset is still the placeholder was never
    /// matched by an opening one.
    fn second_pass(&mut self) -> Result<(), CompileError> {
        let mut index = 0;

        loop {
            let current = opcode::decode(&self.program, index);

            match current {
                Opcode::Halt => break,

                Opcode::Jeq => {
                    let mut seek = index + current.size();
                    let mut depth = 1_usize;

                    // Finds and links with the accompanying closing jump.
                    loop {
                        let seeked = opcode::decode(&self.program, seek);
                        match seeked {
                            Opcode::Halt => return Err(CompileError::UnterminatedLoop),
                            Opcode::Jeq => depth += 1,
                            Opcode::Jne => depth -= 1,
                            _ => {}
                        }

                        if depth == 0 {
                            break;
                        }
                        seek += seeked.size();
                    }

                    // Sets the opening jump to its partner, and vice
                    // versa.
                    opcode::write_jump_target(&mut self.program, index, seek as u16);
                    opcode::write_jump_target(&mut self.program, seek, index as u16);
                }

                Opcode::Jne => {
                    // The offset should have been set by some preceding
                    // opening jump.
                    if opcode::read_jump_target(&self.program, index) == opcode::JUMP_PLACEHOLDER {
                        return Err(CompileError::UnterminatedLoop);
                    }
                }

                _ => {}
            }

            index += current.size();
        }

        Ok(())
    }
}

impl Default for Compiler {
    fn default() -> Self {
        Self::new()
    }
}

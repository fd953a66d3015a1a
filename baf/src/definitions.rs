/// The definitions

pub mod cells {
    /// The default number of BASICfuck cells the interpreter allocates.
    /// Frontends may pick any other positive cell count at startup.
    pub const SIZE: usize = 30000;
}

/// program memory information
pub mod program {
    /// The size of the bytecode program memory.
    pub const SIZE: usize = 256;
    /// The last location of program memory, reserved for the end of
    /// program halt.
    pub const LAST: usize = SIZE - 1;
}

pub mod history {
    /// The default size, in bytes, of the input history ring.
    pub const SIZE: usize = 2048;
}

/// The definitions needed for the line editor.
pub mod editor {
    /// The full editor buffer, user text plus the reserved null
    /// terminator.
    pub const CAPACITY: usize = 256;
    /// The largest buffer index the user's cursor may write to.
    pub const MAX_INDEX: usize = CAPACITY - 2;
}

use thiserror::Error;

/// The errors that can stop the bytecode compilation of a program.
#[derive(Error, Debug, PartialEq, Eq, Clone, Copy)]
pub enum CompileError {
    #[error("The program exceeded the size of the program memory.")]
    OutOfMemory,
    #[error("The program has an unterminated loop.")]
    UnterminatedLoop,
}

/// The errors that can stop a running program.
#[derive(Error, Debug, PartialEq, Eq, Clone, Copy)]
pub enum RuntimeError {
    #[error("The program was aborted with the stop key.")]
    Abort,
    #[error(
        "Execute needs the three cells starting at {index}, but there are only {size} cells."
    )]
    OutOfCellRange { index: usize, size: usize },
    #[error("Invalid host state '{0}'.")]
    Host(#[from] HostError),
}

/// The errors a host capability can report.
#[derive(Error, Debug, PartialEq, Eq, Clone, Copy)]
pub enum HostError {
    #[error("There is no host subroutine hook installed.")]
    Unavailable,
}

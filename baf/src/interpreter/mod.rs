//! The bytecode interpreter, from the dispatch loop to the host calls.
mod dispatch;
mod print;

/// reexport the interpreter struct for simpler usage
pub use dispatch::*;

/// split up tests into an other file for simpler implementation
#[cfg(test)]
mod tests;

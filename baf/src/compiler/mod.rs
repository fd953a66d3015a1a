//! The two pass BASICfuck bytecode compiler.
//!
//! The first pass lexes the source into opcodes, collapsing runs of
//! counted instructions; the second pass links the loop brackets by
//! patching their jump offsets into each other.

mod pass;

pub use pass::Compiler;

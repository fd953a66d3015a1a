use mockall::predicate::eq;

use super::*;
use crate::{
    compiler::Compiler,
    devices::{Key, MockHostCommands, Registers, SandboxHost},
    error::{HostError, RuntimeError},
    opcode::Opcode,
    testing::ScriptedTerminal,
};

/// will compile the given source for the tests
fn compile(source: &[u8]) -> Compiler {
    let mut compiler = Compiler::new();
    compiler
        .compile(source)
        .expect("The test programs are expected to compile.");
    compiler
}

/// will run the given source on the given interpreter, swallowing output
fn run(interpreter: &mut Interpreter, source: &[u8]) -> Result<(), RuntimeError> {
    let compiler = compile(source);
    let mut terminal = ScriptedTerminal::new();
    let mut host = SandboxHost::new();
    interpreter.run(compiler.program_memory(), &mut terminal, &mut host)
}

#[test]
fn test_increment_accumulates_modulo_256() {
    let mut interpreter = Interpreter::new(256);

    let source = vec![b'+'; 300];
    run(&mut interpreter, &source).expect("Incrementing never fails.");

    assert_eq!(interpreter.current_cell(), 44);
    assert_eq!(interpreter.cell_index(), 0);
}

#[test]
fn test_decrement_wraps_around() {
    let mut interpreter = Interpreter::new(16);

    run(&mut interpreter, b"-").expect("Decrementing never fails.");

    assert_eq!(interpreter.current_cell(), 255);
}

#[test]
fn test_clear_loop_zeroes_any_cell_value() {
    for value in [1_u8, 42, 255] {
        let mut interpreter = Interpreter::new(16);
        interpreter.cells[0] = value;

        run(&mut interpreter, b"[-]").expect("The loop runs down to zero.");

        assert_eq!(interpreter.current_cell(), 0);
    }
}

#[test]
fn test_cell_pointer_saturates_at_zero() {
    let mut interpreter = Interpreter::new(16);

    run(&mut interpreter, b">><<<<<").expect("Pointer moves never fail.");

    assert_eq!(interpreter.cell_index(), 0);
}

#[test]
fn test_cell_pointer_stays_put_past_the_end() {
    let mut interpreter = Interpreter::new(4);

    // The run collapses into a single move of five, which would leave
    // cell memory and so is not taken at all.
    run(&mut interpreter, b">>>>>").expect("Pointer moves never fail.");
    assert_eq!(interpreter.cell_index(), 0);

    // Three single moves land on the last cell, the fourth stays put.
    run(&mut interpreter, b">+>+>+>").expect("Pointer moves never fail.");
    assert_eq!(interpreter.cell_index(), 3);
}

#[test]
fn test_print_writes_the_current_cell() {
    let mut interpreter = Interpreter::new(16);
    interpreter.cells[0] = b'A';

    let compiler = compile(b".");
    let mut terminal = ScriptedTerminal::new();
    let mut host = SandboxHost::new();
    interpreter
        .run(compiler.program_memory(), &mut terminal, &mut host)
        .expect("Printing never fails.");

    assert_eq!(terminal.output, b"A");
}

#[test]
fn test_input_stores_the_key_and_echo_prints_it() {
    let mut interpreter = Interpreter::new(16);

    let compiler = compile(b",.");
    let mut terminal = ScriptedTerminal::with_keys(vec![Key::Char(b'A')]);
    let mut host = SandboxHost::new();
    interpreter
        .run(compiler.program_memory(), &mut terminal, &mut host)
        .expect("Input with a scripted key never fails.");

    assert_eq!(interpreter.current_cell(), 65);
    assert_eq!(terminal.output, b"A");
}

#[test]
fn test_input_ignores_keys_without_a_byte_value() {
    let mut interpreter = Interpreter::new(16);

    let compiler = compile(b",");
    let mut terminal =
        ScriptedTerminal::with_keys(vec![Key::Left, Key::Home, Key::Char(b'x')]);
    let mut host = SandboxHost::new();
    interpreter
        .run(compiler.program_memory(), &mut terminal, &mut host)
        .expect("Input with a scripted key never fails.");

    assert_eq!(interpreter.current_cell(), b'x');
}

#[test]
fn test_stop_during_input_aborts() {
    let mut interpreter = Interpreter::new(16);

    let compiler = compile(b"+,");
    let mut terminal = ScriptedTerminal::with_keys(vec![Key::Stop]);
    let mut host = SandboxHost::new();

    assert_eq!(
        interpreter.run(compiler.program_memory(), &mut terminal, &mut host),
        Err(RuntimeError::Abort)
    );
    // The increment before the input still happened.
    assert_eq!(interpreter.current_cell(), 1);
}

#[test]
fn test_pending_stop_key_aborts_between_steps() {
    let mut interpreter = Interpreter::new(16);

    // An endless loop, cut short by the second readiness probe.
    let compiler = compile(b"+[]");
    let mut terminal = ScriptedTerminal::with_ready_keys(vec![Key::Stop]);
    let mut host = SandboxHost::new();

    assert_eq!(
        interpreter.run(compiler.program_memory(), &mut terminal, &mut host),
        Err(RuntimeError::Abort)
    );
}

#[test]
fn test_pending_other_keys_are_swallowed() {
    let mut interpreter = Interpreter::new(16);

    let compiler = compile(b"++");
    let mut terminal = ScriptedTerminal::with_ready_keys(vec![Key::Char(b'x')]);
    let mut host = SandboxHost::new();

    interpreter
        .run(compiler.program_memory(), &mut terminal, &mut host)
        .expect("A pending non-stop key does not abort.");

    assert_eq!(interpreter.current_cell(), 2);
}

#[test]
fn test_multiplication_loop_prints_h() {
    let mut interpreter = Interpreter::new(256);

    let compiler = compile(b"++++++++[>+++++++++<-]>.");
    let mut terminal = ScriptedTerminal::new();
    let mut host = SandboxHost::new();
    interpreter
        .run(compiler.program_memory(), &mut terminal, &mut host)
        .expect("The loop terminates.");

    assert_eq!(terminal.output, b"H");
    assert_eq!(interpreter.current_cell(), 72);
    assert_eq!(interpreter.cell_index(), 1);
    assert_eq!(interpreter.memory_pointer(), 0);
}

#[test]
fn test_multiplication_loop_prints_five() {
    let mut interpreter = Interpreter::new(256);

    let compiler = compile(b"+++++[>++++++++++<-]>+++.");
    let mut terminal = ScriptedTerminal::new();
    let mut host = SandboxHost::new();
    interpreter
        .run(compiler.program_memory(), &mut terminal, &mut host)
        .expect("The loop terminates.");

    assert_eq!(terminal.output, b"5");
    assert_eq!(interpreter.current_cell(), 53);
    assert_eq!(interpreter.cell_index(), 1);
}

#[test]
fn test_state_persists_across_runs() {
    let mut interpreter = Interpreter::new(16);

    run(&mut interpreter, b"+++>++").expect("Increments never fail.");
    run(&mut interpreter, b"+").expect("Increments never fail.");

    assert_eq!(interpreter.cell_index(), 1);
    assert_eq!(interpreter.current_cell(), 3);
    assert_eq!(interpreter.cells[0], 3);
}

#[test]
fn test_host_memory_round_trip() {
    let mut interpreter = Interpreter::new(16);

    // Writes 3 to host address 0, then reads it back into the next cell.
    run(&mut interpreter, b"+++*>@").expect("The sandbox host never fails peek and poke.");

    assert_eq!(interpreter.cell_index(), 1);
    assert_eq!(interpreter.current_cell(), 3);
}

#[test]
fn test_host_pointer_moves_and_saturates() {
    let mut interpreter = Interpreter::new(16);

    run(&mut interpreter, b"))))").expect("Pointer moves never fail.");
    assert_eq!(interpreter.memory_pointer(), 4);

    run(&mut interpreter, b"((((((").expect("Pointer moves never fail.");
    assert_eq!(interpreter.memory_pointer(), 0);
}

#[test]
fn test_host_pointer_saturates_at_the_top() {
    let mut interpreter = Interpreter::new(16);
    interpreter.memory_pointer = 0xFF00;

    // A raw move of 255 twice, which would overshoot the address space.
    let program = [
        Opcode::CMemRight as u8,
        255,
        Opcode::CMemRight as u8,
        255,
        Opcode::Halt as u8,
    ];
    let mut terminal = ScriptedTerminal::new();
    let mut host = SandboxHost::new();
    interpreter
        .run(&program, &mut terminal, &mut host)
        .expect("Pointer moves never fail.");

    assert_eq!(interpreter.memory_pointer(), 0xFFFF);
}

#[test]
fn test_host_read_goes_to_the_pointed_address() {
    let mut interpreter = Interpreter::new(16);

    let mut host = MockHostCommands::new();
    host.expect_read().with(eq(5)).times(1).return_const(0x42_u8);

    let compiler = compile(b")))))@");
    let mut terminal = ScriptedTerminal::new();
    interpreter
        .run(compiler.program_memory(), &mut terminal, &mut host)
        .expect("A mocked read never fails.");

    assert_eq!(interpreter.current_cell(), 0x42);
}

#[test]
fn test_execute_round_trips_the_registers() {
    let mut interpreter = Interpreter::new(16);
    interpreter.cells[0] = 1;
    interpreter.cells[1] = 2;
    interpreter.cells[2] = 3;
    interpreter.memory_pointer = 0xC000;

    let mut host = SandboxHost::with_hook(Box::new(|registers, address| {
        assert_eq!(address, 0xC000);
        Registers {
            a: registers.a + 10,
            x: registers.x + 10,
            y: registers.y + 10,
        }
    }));

    let compiler = compile(b"%");
    let mut terminal = ScriptedTerminal::new();
    interpreter
        .run(compiler.program_memory(), &mut terminal, &mut host)
        .expect("The hooked execute never fails.");

    assert_eq!(&interpreter.cells[..3], [11, 12, 13]);
}

#[test]
fn test_execute_without_hook_reports_the_host() {
    let mut interpreter = Interpreter::new(16);

    assert_eq!(
        run(&mut interpreter, b"%"),
        Err(RuntimeError::Host(HostError::Unavailable))
    );
}

#[test]
fn test_execute_needs_three_cells() {
    let mut interpreter = Interpreter::new(4);

    assert_eq!(
        run(&mut interpreter, b">>%"),
        Err(RuntimeError::OutOfCellRange { index: 2, size: 4 })
    );
}

//! The execution engine.
//!
//! An [`Interpreter`] owns a 30,000 cell tape, a data pointer clamped to the
//! tape bounds, and the program pointer. Input and output streams are injected
//! at construction; the engine never reaches for process stdio on its own.

use std::fmt;
use std::io::{self, Read, Write};

use crate::jump_table::JumpTable;

/// Number of cells on the tape.
pub const TAPE_SIZE: usize = 30_000;

/// Errors that stop a run.
#[derive(Debug, thiserror::Error)]
pub enum InterpreterError {
    /// A `[` or `]` was reached that has no matching counterpart.
    #[error("unmatched {kind}")]
    UnmatchedBracket { ip: usize, kind: BracketKind },

    /// The input stream could not supply a byte for `,` (including end of stream).
    #[error("failed to read input: {source}")]
    ReadFailure {
        ip: usize,
        #[source]
        source: io::Error,
    },

    /// The output stream rejected a byte written by `.` or a flush.
    #[error("failed to write output: {source}")]
    WriteFailure {
        ip: usize,
        #[source]
        source: io::Error,
    },
}

impl InterpreterError {
    /// Program position at which execution stopped.
    pub fn ip(&self) -> usize {
        match self {
            InterpreterError::UnmatchedBracket { ip, .. }
            | InterpreterError::ReadFailure { ip, .. }
            | InterpreterError::WriteFailure { ip, .. } => *ip,
        }
    }
}

/// Which side of the loop was unmatched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BracketKind {
    Open,
    Close,
}

impl fmt::Display for BracketKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BracketKind::Open => write!(f, "["),
            BracketKind::Close => write!(f, "]"),
        }
    }
}

/// A Brainfuck interpreter over an injected input source and output sink.
///
/// The interpreter maintains:
/// - the program as a sequence of `char`s together with its [`JumpTable`],
/// - a memory tape of [`TAPE_SIZE`] zeroed cells,
/// - a data pointer indexing into that tape,
/// - a program pointer indexing into the program.
///
/// ```
/// use bfi::Interpreter;
///
/// let mut bf = Interpreter::new(",+.", &b"A"[..], Vec::new());
/// bf.run().unwrap();
/// assert_eq!(bf.into_output(), b"B");
/// ```
pub struct Interpreter<R, W> {
    code: Vec<char>,
    jumps: JumpTable,
    memory: Vec<u8>,
    pointer: usize,
    ip: usize,
    input: R,
    output: W,
}

impl<R: Read, W: Write> Interpreter<R, W> {
    /// Create an interpreter for `code`. Never fails, even for unbalanced brackets.
    pub fn new(code: impl Into<String>, input: R, output: W) -> Self {
        let code: Vec<char> = code.into().chars().collect();
        let jumps = JumpTable::build(&code);
        Self {
            code,
            jumps,
            memory: vec![0; TAPE_SIZE],
            pointer: 0,
            ip: 0,
            input,
            output,
        }
    }

    /// Execute the program until the program pointer runs off the end.
    ///
    /// Each run starts from a zeroed tape with both pointers at 0. Output written
    /// before a failure stays written; the sink is flushed either way.
    pub fn run(&mut self) -> Result<(), InterpreterError> {
        self.memory.fill(0);
        self.pointer = 0;
        self.ip = 0;

        let result = self.execute();
        let flushed = self
            .output
            .flush()
            .map_err(|source| InterpreterError::WriteFailure { ip: self.ip, source });
        result.and(flushed)
    }

    /// Consume the interpreter and hand back its output sink.
    pub fn into_output(self) -> W {
        self.output
    }

    fn execute(&mut self) -> Result<(), InterpreterError> {
        while self.ip < self.code.len() {
            match self.code[self.ip] {
                '>' => {
                    if self.pointer < TAPE_SIZE - 1 {
                        self.pointer += 1;
                    }
                }
                '<' => {
                    self.pointer = self.pointer.saturating_sub(1);
                }
                '+' => {
                    self.memory[self.pointer] = self.memory[self.pointer].wrapping_add(1);
                }
                '-' => {
                    self.memory[self.pointer] = self.memory[self.pointer].wrapping_sub(1);
                }
                '.' => {
                    let byte = [self.memory[self.pointer]];
                    self.output
                        .write_all(&byte)
                        .map_err(|source| InterpreterError::WriteFailure { ip: self.ip, source })?;
                }
                ',' => {
                    // Prompts written so far must be visible before blocking.
                    self.output
                        .flush()
                        .map_err(|source| InterpreterError::WriteFailure { ip: self.ip, source })?;
                    let mut buf = [0u8; 1];
                    self.input
                        .read_exact(&mut buf)
                        .map_err(|source| InterpreterError::ReadFailure { ip: self.ip, source })?;
                    self.memory[self.pointer] = buf[0];
                }
                '[' => {
                    let close = self.matching(BracketKind::Open)?;
                    if self.memory[self.pointer] == 0 {
                        self.ip = close;
                    }
                }
                ']' => {
                    let open = self.matching(BracketKind::Close)?;
                    if self.memory[self.pointer] != 0 {
                        // Land on the '[' itself so the condition is re-tested.
                        self.ip = open;
                        continue;
                    }
                }
                _ => {}
            }
            self.ip += 1;
        }

        Ok(())
    }

    fn matching(&self, kind: BracketKind) -> Result<usize, InterpreterError> {
        self.jumps
            .get(self.ip)
            .ok_or(InterpreterError::UnmatchedBracket { ip: self.ip, kind })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Broken;

    impl Read for Broken {
        fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
            Err(io::Error::other("device unplugged"))
        }
    }

    impl Write for Broken {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::other("disk full"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn interpreter(code: &str) -> Interpreter<&'static [u8], Vec<u8>> {
        Interpreter::new(code, &b""[..], Vec::new())
    }

    #[test]
    fn increments_and_decrements_current_cell() {
        let mut bf = interpreter("+++--");
        assert!(bf.run().is_ok());
        assert_eq!(bf.memory[0], 1);
    }

    #[test]
    fn wrapping_subtraction() {
        let mut bf = interpreter("-");
        assert!(bf.run().is_ok());
        assert_eq!(bf.memory[0], 255);
    }

    #[test]
    fn wrapping_addition() {
        let mut bf = interpreter(&"+".repeat(255));
        assert!(bf.run().is_ok());
        assert_eq!(bf.memory[0], 255);

        let mut bf = interpreter(&"+".repeat(256));
        assert!(bf.run().is_ok());
        assert_eq!(bf.memory[0], 0);
    }

    #[test]
    fn left_move_at_cell_zero_is_clamped() {
        let mut bf = interpreter("<<+");
        assert!(bf.run().is_ok());
        assert_eq!(bf.pointer, 0);
        assert_eq!(bf.memory[0], 1);
    }

    #[test]
    fn right_move_at_last_cell_is_clamped() {
        let code = ">".repeat(TAPE_SIZE + 5) + "+";
        let mut bf = interpreter(&code);
        assert!(bf.run().is_ok());
        assert_eq!(bf.pointer, TAPE_SIZE - 1);
        assert_eq!(bf.memory[TAPE_SIZE - 1], 1);
    }

    #[test]
    fn unmatched_open_bracket_returns_error() {
        let mut bf = interpreter("[+");
        let result = bf.run();
        assert!(matches!(
            result,
            Err(InterpreterError::UnmatchedBracket { ip: 0, kind: BracketKind::Open })
        ));
    }

    #[test]
    fn unmatched_close_is_checked_even_when_cell_is_zero() {
        let mut bf = interpreter("+-]");
        let result = bf.run();
        assert!(matches!(
            result,
            Err(InterpreterError::UnmatchedBracket { ip: 2, kind: BracketKind::Close })
        ));
    }

    #[test]
    fn bad_bracket_is_reported_only_when_reached() {
        // Construction succeeds; the read failure comes first.
        let mut bf = interpreter(",]");
        assert!(matches!(bf.run(), Err(InterpreterError::ReadFailure { ip: 0, .. })));

        let mut bf = Interpreter::new(",]", &b"a"[..], Vec::new());
        assert!(matches!(
            bf.run(),
            Err(InterpreterError::UnmatchedBracket { ip: 1, kind: BracketKind::Close })
        ));
    }

    #[test]
    fn error_stops_execution_immediately() {
        let mut bf = interpreter("+.]+.");
        let result = bf.run();
        assert!(matches!(result, Err(InterpreterError::UnmatchedBracket { ip: 2, .. })));
        assert_eq!(bf.memory[0], 1);
        assert_eq!(bf.into_output(), vec![1]);
    }

    #[test]
    fn empty_loop_on_zero_cell_is_ok() {
        let mut bf = interpreter("[]");
        assert!(bf.run().is_ok());
    }

    #[test]
    fn loop_clears_cell() {
        let mut bf = interpreter("+++[-]");
        assert!(bf.run().is_ok());
        assert_eq!(bf.memory[0], 0);
        assert_eq!(bf.ip, 6);
    }

    #[test]
    fn end_of_input_is_a_read_failure() {
        let mut bf = interpreter(",");
        let err = bf.run().unwrap_err();
        match err {
            InterpreterError::ReadFailure { ip, ref source } => {
                assert_eq!(ip, 0);
                assert_eq!(source.kind(), io::ErrorKind::UnexpectedEof);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn broken_input_is_a_read_failure() {
        let mut bf = Interpreter::new("+,", Broken, Vec::new());
        let err = bf.run().unwrap_err();
        assert_eq!(err.ip(), 1);
        assert_eq!(err.to_string(), "failed to read input: device unplugged");
    }

    #[test]
    fn broken_output_is_a_write_failure() {
        let mut bf = Interpreter::new("+.", &b""[..], Broken);
        let err = bf.run().unwrap_err();
        assert!(matches!(err, InterpreterError::WriteFailure { ip: 1, .. }));
        assert_eq!(err.to_string(), "failed to write output: disk full");
    }

    #[test]
    fn each_read_consumes_exactly_one_byte() {
        let mut bf = Interpreter::new(",>,>,", &b"xyz"[..], Vec::new());
        assert!(bf.run().is_ok());
        assert_eq!(&bf.memory[..3], b"xyz");
    }

    #[test]
    fn high_bytes_are_written_raw() {
        let mut bf = interpreter("-.");
        assert!(bf.run().is_ok());
        assert_eq!(bf.into_output(), vec![0xFF]);
    }

    #[test]
    fn rerun_starts_from_fresh_state() {
        let mut bf = interpreter("+>+.");
        assert!(bf.run().is_ok());
        assert!(bf.run().is_ok());
        assert_eq!(bf.memory[0], 1);
        assert_eq!(bf.memory[1], 1);
        assert_eq!(bf.into_output(), vec![1, 1]);
    }

    #[test]
    fn bracket_kind_display() {
        assert_eq!(BracketKind::Open.to_string(), "[");
        assert_eq!(BracketKind::Close.to_string(), "]");
    }
}

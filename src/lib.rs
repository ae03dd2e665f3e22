//! A tiny Brainfuck interpreter library.
//!
//! This crate provides a minimal Brainfuck interpreter that operates on a
//! memory tape of 30,000 cells with a single data pointer.
//!
//! Features and behaviors:
//! - Memory tape initialized to 0; cells wrap modulo 256.
//! - Pointer moves are clamped: `<` at cell 0 and `>` at the last cell do nothing.
//! - Input `,` reads exactly one raw byte; end of input is an error.
//! - Output `.` writes the current cell as one raw byte.
//! - Loops are paired once by a [`JumpTable`] pre-pass. Unmatched brackets are
//!   reported only when execution reaches them.
//! - Any non-Brainfuck character is ignored.
//!
//! Quick start:
//!
//! ```
//! use bfi::Interpreter;
//!
//! let code = "++++++++[>++++[>++>+++>+++>+<<<<-]>+>+>->>+[<]<-]>>.>---.+++++++..+++.>>.<-.<.+++.------.--------.>>+.>++.";
//! let mut bf = Interpreter::new(code, std::io::empty(), Vec::new());
//! bf.run().expect("program should run");
//! assert_eq!(bf.into_output(), b"Hello World!\n");
//! ```

pub mod cli_util;
pub mod interpreter;
pub mod jump_table;

pub use interpreter::{BracketKind, Interpreter, InterpreterError, TAPE_SIZE};
pub use jump_table::JumpTable;

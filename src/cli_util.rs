use std::io::{self, Write};
use crate::InterpreterError;

// Characters shown on either side of the failing instruction.
const WINDOW_CHARS: usize = 32;

/// Pretty-print an [`InterpreterError`] with caret positioning.
/// The first line reads `Error: <message> at instruction <ip>`.
pub fn print_interpreter_error(code: &str, err: &InterpreterError) {
    let prefix = format!("Error: {err}");
    eprint!("{}", render_error_with_context(&prefix, code, err.ip()));
    let _ = io::stderr().flush();
}

/// Render a concise error with instruction index and a caret context window,
/// working with UTF-8 by slicing using char indices.
pub fn render_error_with_context(prefix: &str, code: &str, pos: usize) -> String {
    let total_chars = code.chars().count();
    let start_char = pos.saturating_sub(WINDOW_CHARS);
    let end_char = (pos + WINDOW_CHARS + 1).min(total_chars);

    let start_byte = char_to_byte_index(code, start_char);
    let end_byte = char_to_byte_index(code, end_char);
    let slice = &code[start_byte..end_byte];

    // Caret under the exact position
    let caret_offset_chars = pos.saturating_sub(start_char);
    let underline = format!("{}^", " ".repeat(caret_offset_chars));

    format!("{prefix} at instruction {pos}\n  {slice}\n  {underline}\n")
}

/// Convert a char index into a byte index in the given UTF-8 string.
fn char_to_byte_index(s: &str, char_idx: usize) -> usize {
    s.char_indices()
        .nth(char_idx)
        .map_or(s.len(), |(byte_idx, _)| byte_idx)
}

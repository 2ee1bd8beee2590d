//! Whitespace tokenization of a single input line.
//!
//! There is no quoting or escaping: a delimiter splits the line wherever it
//! appears. Tokens borrow the line's storage, so the caller keeps the line
//! alive for as long as the tokens are in use.

/// Token separators: space, tab, carriage return, backspace and bell.
pub const DELIMITERS: [char; 5] = [' ', '\t', '\r', '\u{0008}', '\u{0007}'];

/// Split `line` into maximal runs of non-delimiter characters.
///
/// Consecutive delimiters collapse, so the result never contains empty
/// tokens; an empty or all-delimiter line yields an empty vector.
pub fn split_line(line: &str) -> Vec<&str> {
    line.split(|c: char| DELIMITERS.contains(&c))
        .filter(|token| !token.is_empty())
        .collect()
}

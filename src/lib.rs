//! A tiny interactive command interpreter.
//!
//! minish reads one line at a time, splits it into whitespace-delimited
//! tokens, and either runs a builtin (`cd`, `help`, `exit`) in-process or
//! spawns an external program and waits for it to finish before prompting
//! again. There is no quoting, redirection, piping or job control.
//!
//! The main entry point is [`Interpreter`], which dispatches a token
//! sequence through an ordered builtin table and falls through to external
//! launch. The [`reader`] module supplies lines from the terminal or from
//! any buffered stream, and [`lexer`] does the splitting.

mod builtin;
pub mod command;
mod external;
mod interpreter;
pub mod lexer;
pub mod reader;

pub use builtin::builtin_names;
pub use command::Flow;
pub use interpreter::{Interpreter, PROMPT};

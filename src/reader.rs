//! Line acquisition for the interpreter loop.
//!
//! Two sources implement [`LineSource`]: an interactive editor backed by
//! [`rustyline`] for terminal sessions, and a plain buffered source for
//! input piped from a stream. Both hand the loop one owned line at a time,
//! without its trailing newline, and report end-of-input explicitly.

use anyhow::{Context, Result};
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use std::io::{BufRead, Write};

/// Outcome of one read from an input source.
pub enum ReadLine {
    /// A complete line, newline stripped.
    Line(String),
    /// The source cannot supply any more input.
    Eof,
}

/// Anything the interpreter loop can pull lines from.
pub trait LineSource {
    /// Display `prompt` and block until a whole line or end-of-input is
    /// available. Errors from this method are fatal to the interpreter.
    fn read_line(&mut self, prompt: &str) -> Result<ReadLine>;
}

/// Interactive source reading from the controlling terminal.
pub struct Editor {
    inner: DefaultEditor,
}

impl Editor {
    pub fn new() -> Result<Self> {
        Ok(Self {
            inner: DefaultEditor::new()
                .with_context(|| format!("{}: failed to open the terminal editor", module_path!()))?,
        })
    }
}

impl LineSource for Editor {
    fn read_line(&mut self, prompt: &str) -> Result<ReadLine> {
        match self.inner.readline(prompt) {
            Ok(line) => Ok(ReadLine::Line(line)),
            // ^C discards the pending line; the loop just prompts again.
            Err(ReadlineError::Interrupted) => Ok(ReadLine::Line(String::new())),
            Err(ReadlineError::Eof) => Ok(ReadLine::Eof),
            Err(err) => {
                Err(err).with_context(|| format!("{}: failed to read a line", module_path!()))
            }
        }
    }
}

/// Non-interactive source reading from any buffered stream.
///
/// The prompt is still written before each read, to `prompt_out`, so piped
/// sessions produce the same transcript shape as interactive ones.
pub struct BufferedSource<R, W> {
    input: R,
    prompt_out: W,
}

impl<R: BufRead, W: Write> BufferedSource<R, W> {
    pub fn new(input: R, prompt_out: W) -> Self {
        Self { input, prompt_out }
    }

    /// Consume the source, returning the prompt sink.
    pub fn into_prompt_out(self) -> W {
        self.prompt_out
    }
}

impl<R: BufRead, W: Write> LineSource for BufferedSource<R, W> {
    fn read_line(&mut self, prompt: &str) -> Result<ReadLine> {
        write!(self.prompt_out, "{prompt}")?;
        self.prompt_out.flush()?;

        // String::read_line grows the buffer on demand; input length is
        // unbounded.
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(ReadLine::Eof);
        }
        if line.ends_with('\n') {
            line.pop();
        }
        Ok(ReadLine::Line(line))
    }
}

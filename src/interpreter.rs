use crate::builtin::default_builtins;
use crate::command::{CommandFactory, Flow};
use crate::external;
use crate::lexer;
use crate::reader::{LineSource, ReadLine};
use anyhow::Result;
use std::io::Write;

/// Prompt written before every read.
pub const PROMPT: &str = "> ";

/// Factory allows creating instances of ExecutableCommand.
///
/// Only supports commands defined in this crate — the builtins.
pub(crate) struct Factory<T> {
    _phantom: std::marker::PhantomData<T>,
}

impl<T> Default for Factory<T> {
    fn default() -> Self {
        Self {
            _phantom: std::marker::PhantomData,
        }
    }
}

/// A minimal shell-like interpreter: builtins executed in-process, anything
/// else launched as an external program and awaited.
///
/// The interpreter owns an ordered table of [`CommandFactory`] objects,
/// built once at construction and never mutated. See [`Default`] for the
/// builtins included out of the box.
///
/// Example
/// ```
/// use minish::{Flow, Interpreter};
/// let mut sh = Interpreter::default();
/// let mut out = Vec::new();
/// let mut err = Vec::new();
/// let flow = sh.execute(&["exit"], &mut out, &mut err).unwrap();
/// assert_eq!(flow, Flow::Stop);
/// ```
pub struct Interpreter {
    builtins: Vec<Box<dyn CommandFactory>>,
}

impl Interpreter {
    /// Create a new interpreter with a custom builtin table.
    pub fn new(builtins: Vec<Box<dyn CommandFactory>>) -> Self {
        Self { builtins }
    }

    /// Execute one tokenized command line and return its continuation
    /// signal.
    ///
    /// An empty token sequence is a no-op that returns [`Flow::Continue`]
    /// without a builtin lookup or a process launch. The first token is
    /// matched against the builtin table in registration order; on a miss
    /// the whole token sequence goes to the external launcher.
    pub fn execute(
        &mut self,
        argv: &[&str],
        stdout: &mut dyn Write,
        stderr: &mut dyn Write,
    ) -> Result<Flow> {
        let Some(name) = argv.first() else {
            return Ok(Flow::Continue);
        };
        for factory in &self.builtins {
            if factory.name() == *name {
                return factory.create(&argv[1..]).execute(stdout, stderr);
            }
        }
        external::launch(argv, stderr)
    }

    /// The read–parse–dispatch–execute loop.
    ///
    /// Runs until a command returns [`Flow::Stop`] or the source reports
    /// end-of-input; both terminate normally. Only read failures and the
    /// fatal launch failures documented in [`crate::external`] return
    /// `Err`.
    pub fn repl(&mut self, source: &mut dyn LineSource) -> Result<()> {
        let mut stdout = std::io::stdout();
        let mut stderr = std::io::stderr();
        loop {
            match source.read_line(PROMPT)? {
                ReadLine::Line(line) => {
                    let argv = lexer::split_line(&line);
                    match self.execute(&argv, &mut stdout, &mut stderr)? {
                        Flow::Continue => {}
                        Flow::Stop => break,
                    }
                }
                ReadLine::Eof => break,
            }
        }
        Ok(())
    }
}

impl Default for Interpreter {
    /// Create an interpreter with the builtins `cd`, `help` and `exit`, in
    /// that order.
    fn default() -> Self {
        Self::new(default_builtins())
    }
}

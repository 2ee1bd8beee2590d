use anyhow::Result;
use std::io::Write;

/// Continuation signal returned by every executed command.
///
/// The main loop keeps prompting while commands return [`Flow::Continue`]
/// and shuts down on the first [`Flow::Stop`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    /// Show another prompt.
    Continue,
    /// Terminate the interpreter loop.
    Stop,
}

/// Object-safe trait for any command the interpreter can execute.
///
/// Implemented by built-ins via a blanket impl in [`crate::builtin`].
pub trait ExecutableCommand {
    /// Executes the command, writing informational output to `stdout` and
    /// diagnostics to `stderr`.
    fn execute(self: Box<Self>, stdout: &mut dyn Write, stderr: &mut dyn Write) -> Result<Flow>;
}

/// Factory for one named builtin.
///
/// The interpreter holds an ordered table of these and matches the first
/// token of a command line against [`CommandFactory::name`]; names that
/// match no factory fall through to external launch.
pub trait CommandFactory {
    /// Canonical name this factory responds to, e.g. "cd".
    fn name(&self) -> &'static str;

    /// Create a command instance for the provided arguments.
    ///
    /// Argument parsing never fails the interpreter: malformed arguments
    /// produce a command that reports the usage error when executed.
    fn create(&self, args: &[&str]) -> Box<dyn ExecutableCommand>;
}

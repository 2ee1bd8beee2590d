//! Launching commands that are not builtins.

use crate::command::Flow;
use anyhow::{Context, Result};
use std::io::{ErrorKind, Write};
use std::process::Command;

/// Spawn `argv[0]` as an external process and block until it terminates.
///
/// The program is resolved through the standard executable search path and
/// receives the remaining tokens as its argument vector. The child inherits
/// the interpreter's standard streams and working directory. Its exit
/// status is deliberately not inspected: a child that ran and failed looks
/// the same to the loop as one that succeeded.
///
/// A program that cannot be started at all (not found, not executable) is
/// reported on `stderr` and the loop continues. Any other spawn failure is
/// resource exhaustion the shell cannot work around, and is fatal.
pub fn launch(argv: &[&str], stderr: &mut dyn Write) -> Result<Flow> {
    let Some((program, args)) = argv.split_first() else {
        return Ok(Flow::Continue);
    };

    match Command::new(program).args(args).spawn() {
        Ok(mut child) => {
            // wait() keeps waiting through stopped states and only returns
            // once the child has exited or been killed by a signal.
            child
                .wait()
                .with_context(|| format!("{}: failed to wait for {program}", module_path!()))?;
            Ok(Flow::Continue)
        }
        Err(err) if matches!(err.kind(), ErrorKind::NotFound | ErrorKind::PermissionDenied) => {
            writeln!(stderr, "minish: {program}: {err}")?;
            Ok(Flow::Continue)
        }
        Err(err) => Err(err).with_context(|| format!("{}: failed to spawn {program}", module_path!())),
    }
}

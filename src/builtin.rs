use crate::command::{CommandFactory, ExecutableCommand, Flow};
use crate::interpreter::Factory;
use anyhow::Result;
use argh::{EarlyExit, FromArgs};
use std::env;
use std::io::Write;

/// Built-in commands known to the shell at compile time.
///
/// Builtins are parsed using the [`argh`] crate (`FromArgs`) and executed
/// directly in-process without spawning a child process.
pub(crate) trait BuiltinCommand: Sized + FromArgs {
    /// Canonical name of the command, e.g. "cd".
    fn name() -> &'static str;

    /// Executes the command using the provided output streams.
    ///
    /// User-level failures are reported on `stderr` and do not become
    /// `Err`; an `Err` return is fatal to the interpreter.
    fn execute(self, stdout: &mut dyn Write, stderr: &mut dyn Write) -> Result<Flow>;
}

impl<T: BuiltinCommand> ExecutableCommand for T {
    fn execute(self: Box<Self>, stdout: &mut dyn Write, stderr: &mut dyn Write) -> Result<Flow> {
        T::execute(*self, stdout, stderr)
    }
}

/// Pre-rendered argh output for argv that did not parse: either a usage
/// error, or help text requested with `--help`.
struct InvalidArgs {
    output: String,
    is_error: bool,
}

impl ExecutableCommand for InvalidArgs {
    fn execute(self: Box<Self>, stdout: &mut dyn Write, stderr: &mut dyn Write) -> Result<Flow> {
        let sink: &mut dyn Write = if self.is_error { stderr } else { stdout };
        sink.write_all(self.output.as_bytes())?;
        if !self.output.ends_with('\n') {
            writeln!(sink)?;
        }
        Ok(Flow::Continue)
    }
}

impl<T: BuiltinCommand + 'static> CommandFactory for Factory<T> {
    fn name(&self) -> &'static str {
        T::name()
    }

    fn create(&self, args: &[&str]) -> Box<dyn ExecutableCommand> {
        match T::from_args(&[T::name()], args) {
            Ok(cmd) => Box::new(cmd),
            Err(EarlyExit { output, status }) => Box::new(InvalidArgs {
                output,
                is_error: status.is_err(),
            }),
        }
    }
}

/// The builtin table, in registration order.
///
/// Dispatch checks these factories in order against the first token, and
/// `help` lists the same table, so the two can never disagree.
pub(crate) fn default_builtins() -> Vec<Box<dyn CommandFactory>> {
    vec![
        Box::new(Factory::<Cd>::default()),
        Box::new(Factory::<Help>::default()),
        Box::new(Factory::<Exit>::default()),
    ]
}

/// Names of all builtins, in registration order.
pub fn builtin_names() -> Vec<&'static str> {
    default_builtins().iter().map(|f| f.name()).collect()
}

#[derive(FromArgs)]
/// Change the current working directory.
pub struct Cd {
    #[argh(positional)]
    /// directory to switch to, absolute or relative to the current directory
    pub target: String,

    #[argh(positional, greedy)]
    /// ignored; only the first directory argument is used
    pub _rest: Vec<String>,
}

impl BuiltinCommand for Cd {
    fn name() -> &'static str {
        "cd"
    }

    fn execute(self, _stdout: &mut dyn Write, stderr: &mut dyn Write) -> Result<Flow> {
        if let Err(err) = env::set_current_dir(&self.target) {
            writeln!(stderr, "cd: {}: {}", self.target, err)?;
        }
        Ok(Flow::Continue)
    }
}

#[derive(FromArgs)]
/// List the commands built into the shell.
pub struct Help {
    #[argh(positional, greedy)]
    /// ignored; help takes no meaningful arguments
    pub _args: Vec<String>,
}

impl BuiltinCommand for Help {
    fn name() -> &'static str {
        "help"
    }

    fn execute(self, stdout: &mut dyn Write, _stderr: &mut dyn Write) -> Result<Flow> {
        writeln!(stdout, "Type program names and arguments, and hit enter.")?;
        writeln!(stdout, "The following are built in:")?;
        for name in builtin_names() {
            writeln!(stdout, "    {name}")?;
        }
        writeln!(stdout, "Use the man command for information on other programs.")?;
        Ok(Flow::Continue)
    }
}

#[derive(FromArgs)]
/// Leave the shell.
pub struct Exit {
    #[argh(positional, greedy)]
    /// ignored; exit never fails and takes no arguments
    pub _args: Vec<String>,
}

impl BuiltinCommand for Exit {
    fn name() -> &'static str {
        "exit"
    }

    fn execute(self, _stdout: &mut dyn Write, _stderr: &mut dyn Write) -> Result<Flow> {
        Ok(Flow::Stop)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env as stdenv;
    use std::fs;
    use std::io;
    use std::path::PathBuf;
    use std::sync::{Mutex, MutexGuard, OnceLock};
    use std::time::{SystemTime, UNIX_EPOCH};

    fn lock_current_dir() -> MutexGuard<'static, ()> {
        static MUTEX: OnceLock<Mutex<()>> = OnceLock::new();
        MUTEX.get_or_init(|| Mutex::new(())).lock().unwrap()
    }

    fn make_unique_temp_dir() -> io::Result<PathBuf> {
        let mut p = stdenv::temp_dir();
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_nanos();
        p.push(format!("minish_test_cd_{}_{}", std::process::id(), nanos));
        fs::create_dir_all(&p)?;
        Ok(p)
    }

    fn run(factory: &dyn CommandFactory, args: &[&str]) -> (Flow, String, String) {
        let mut out = Vec::new();
        let mut err = Vec::new();
        let flow = factory.create(args).execute(&mut out, &mut err).unwrap();
        (
            flow,
            String::from_utf8(out).unwrap(),
            String::from_utf8(err).unwrap(),
        )
    }

    #[test]
    fn test_registration_order() {
        assert_eq!(builtin_names(), vec!["cd", "help", "exit"]);
    }

    #[test]
    fn test_cd_changes_directory() {
        let _lock = lock_current_dir();
        let temp = make_unique_temp_dir().expect("failed to create temp dir");
        let canonical_temp = fs::canonicalize(&temp).expect("canonicalize failed");
        let orig = stdenv::current_dir().unwrap();

        let target = canonical_temp.to_string_lossy().to_string();
        let (flow, out, err) = run(&Factory::<Cd>::default(), &[&target]);

        assert_eq!(flow, Flow::Continue);
        assert!(out.is_empty());
        assert!(err.is_empty());
        let new_cwd = fs::canonicalize(stdenv::current_dir().unwrap()).unwrap();
        assert_eq!(new_cwd, canonical_temp);

        stdenv::set_current_dir(orig).expect("failed to restore cwd");
        let _ = fs::remove_dir_all(&temp);
    }

    #[test]
    fn test_cd_ignores_surplus_arguments() {
        let _lock = lock_current_dir();
        let temp = make_unique_temp_dir().expect("failed to create temp dir");
        let canonical_temp = fs::canonicalize(&temp).expect("canonicalize failed");
        let orig = stdenv::current_dir().unwrap();

        let target = canonical_temp.to_string_lossy().to_string();
        let (flow, out, err) = run(&Factory::<Cd>::default(), &[&target, "extra", "args"]);

        assert_eq!(flow, Flow::Continue);
        assert!(out.is_empty());
        assert!(err.is_empty(), "surplus arguments must not be an error");
        let new_cwd = fs::canonicalize(stdenv::current_dir().unwrap()).unwrap();
        assert_eq!(new_cwd, canonical_temp);

        stdenv::set_current_dir(orig).expect("failed to restore cwd");
        let _ = fs::remove_dir_all(&temp);
    }

    #[test]
    fn test_cd_without_argument_reports_usage() {
        let _lock = lock_current_dir();
        let orig = stdenv::current_dir().unwrap();

        let (flow, out, err) = run(&Factory::<Cd>::default(), &[]);

        assert_eq!(flow, Flow::Continue);
        assert!(out.is_empty());
        assert!(!err.is_empty(), "missing target must produce a usage error");
        assert_eq!(stdenv::current_dir().unwrap(), orig);
    }

    #[test]
    fn test_cd_nonexistent_path_reports_error() {
        let _lock = lock_current_dir();
        let orig = stdenv::current_dir().unwrap();

        let target = format!("/nonexistent-path-{}", std::process::id());
        let (flow, out, err) = run(&Factory::<Cd>::default(), &[&target]);

        assert_eq!(flow, Flow::Continue);
        assert!(out.is_empty());
        assert!(err.starts_with("cd: "));
        assert!(err.contains(&target));
        assert_eq!(stdenv::current_dir().unwrap(), orig);
    }

    #[test]
    fn test_help_lists_builtins_in_order() {
        let (flow, out, err) = run(&Factory::<Help>::default(), &[]);

        assert_eq!(flow, Flow::Continue);
        assert!(err.is_empty());

        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.first(), Some(&"Type program names and arguments, and hit enter."));
        let listed: Vec<&str> = lines
            .iter()
            .filter(|l| l.starts_with("    "))
            .map(|l| l.trim())
            .collect();
        assert_eq!(listed, vec!["cd", "help", "exit"]);
        assert_eq!(
            lines.last(),
            Some(&"Use the man command for information on other programs.")
        );
    }

    #[test]
    fn test_exit_stops_and_ignores_arguments() {
        let (flow, out, err) = run(&Factory::<Exit>::default(), &[]);
        assert_eq!(flow, Flow::Stop);
        assert!(out.is_empty());
        assert!(err.is_empty());

        let (flow, _, _) = run(&Factory::<Exit>::default(), &["now", "--really", "0"]);
        assert_eq!(flow, Flow::Stop);
    }

    #[test]
    fn test_builtin_help_flag_goes_to_stdout() {
        let (flow, out, err) = run(&Factory::<Cd>::default(), &["--help"]);
        assert_eq!(flow, Flow::Continue);
        assert!(err.is_empty());
        assert!(out.contains("Usage"), "expected usage text, got: {out}");
    }
}

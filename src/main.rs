use anyhow::Result;
use minish::Interpreter;
use minish::reader::{BufferedSource, Editor};
use std::io::{self, IsTerminal};

fn main() {
    if let Err(err) = run() {
        eprintln!("minish: fatal: {err:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let stdin = io::stdin();
    if stdin.is_terminal() {
        let mut source = Editor::new()?;
        Interpreter::default().repl(&mut source)
    } else {
        let mut source = BufferedSource::new(stdin.lock(), io::stdout());
        Interpreter::default().repl(&mut source)
    }
}

use std::env;
use std::io::Write;
use std::process;

use tracing::debug;

use crate::core::commands::{Builtins, Dispatch, Outcome};
use crate::core::ShellState;
use crate::highlight::SyntaxHighlighter;
use crate::input::tokenize_with;
use crate::path::{resolve, PathExpander};
use crate::process::{Foreground, ProcessSupervisor};

/// Evaluates one input line at a time against a [`ShellState`].
pub struct Interpreter {
    state: ShellState,
    builtins: Builtins,
    supervisor: ProcessSupervisor,
    expander: PathExpander,
    highlighter: SyntaxHighlighter,
    quiet: bool,
}

impl Interpreter {
    pub fn new(state: ShellState, highlighter: SyntaxHighlighter, quiet: bool) -> Self {
        let supervisor = ProcessSupervisor::new(state.foreground().clone());
        Self {
            state,
            builtins: Builtins::new(),
            supervisor,
            expander: PathExpander::new(),
            highlighter,
            quiet,
        }
    }

    pub fn state(&self) -> &ShellState {
        &self.state
    }

    pub fn builtins(&self) -> &Builtins {
        &self.builtins
    }

    pub fn foreground(&self) -> &Foreground {
        self.supervisor.foreground()
    }

    /// Lexes, expands and runs `line`. Built-in output goes to `out`;
    /// diagnostics go to stderr. Every line leaves a fresh `$?` behind,
    /// except a blank one.
    pub fn execute_line(&mut self, line: &str, out: &mut dyn Write) -> Outcome {
        let last_status = self.state.last_status();
        let tokens = match tokenize_with(line, |name| lookup(name, last_status)) {
            Ok(tokens) => tokens,
            Err(e) => {
                self.report(&e.to_string());
                self.state.set_last_status(2);
                return Outcome::Continue;
            }
        };

        let args: Vec<String> = tokens
            .into_iter()
            .map(|token| self.expander.expand(token))
            .collect();
        if args.is_empty() {
            return Outcome::Continue;
        }

        let (outcome, status) = match self.builtins.dispatch(&mut self.state, &args, out) {
            Dispatch::Ran(Ok(outcome)) => (outcome, 0),
            Dispatch::Ran(Err(e)) => {
                self.report(&e.to_string());
                let outcome = e.exit_code().map_or(Outcome::Continue, Outcome::Exit);
                (outcome, 1)
            }
            Dispatch::NotBuiltin => {
                if let Err(e) = out.flush() {
                    debug!("flushing output before launch: {}", e);
                }
                (Outcome::Continue, self.run_external(&args))
            }
        };

        self.state.set_last_status(status);
        outcome
    }

    /// Runs `lines` in order, stopping at the first `exit`.
    pub fn run_lines<I, S>(&mut self, lines: I, out: &mut dyn Write) -> Outcome
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for line in lines {
            if let Outcome::Exit(code) = self.execute_line(line.as_ref(), out) {
                return Outcome::Exit(code);
            }
        }
        Outcome::Continue
    }

    fn run_external(&self, args: &[String]) -> i32 {
        let command = &args[0];
        let executable = match resolve(command) {
            Ok(path) => path,
            Err(e) => {
                self.report(&e.to_string());
                return e.exit_status();
            }
        };

        match self.supervisor.run_foreground(&executable, args) {
            Ok(termination) => {
                if !self.quiet {
                    if let Some(message) = termination.describe() {
                        self.report(&format!("{}: {}", command, message));
                    }
                }
                termination.exit_status()
            }
            Err(e) => {
                self.report(&e.to_string());
                e.exit_status()
            }
        }
    }

    fn report(&self, message: &str) {
        eprintln!("{}", self.highlighter.highlight_error(message));
    }
}

/// `$?` and `$$` come from the shell; everything else from the process
/// environment.
fn lookup(name: &str, last_status: i32) -> Option<String> {
    match name {
        "?" => Some(last_status.to_string()),
        "$" => Some(process::id().to_string()),
        _ => env::var(name).ok(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::RestoreDir;
    use serial_test::serial;
    use std::path::PathBuf;

    fn interpreter() -> Interpreter {
        Interpreter::new(ShellState::new(), SyntaxHighlighter::plain(), true)
    }

    fn run(interp: &mut Interpreter, line: &str) -> (Outcome, String) {
        let mut out = Vec::new();
        let outcome = interp.execute_line(line, &mut out);
        (outcome, String::from_utf8(out).unwrap())
    }

    #[test]
    #[serial]
    fn test_cd_then_pwd() {
        let _restore = RestoreDir::capture();
        let mut interp = interpreter();

        assert_eq!(run(&mut interp, "cd /tmp").0, Outcome::Continue);
        assert_eq!(interp.state().last_status(), 0);
        assert_eq!(run(&mut interp, "pwd").1, "/tmp\n");
    }

    #[test]
    #[serial]
    fn test_exit_code() {
        let mut interp = interpreter();
        assert_eq!(run(&mut interp, "exit 7").0, Outcome::Exit(7));
    }

    #[test]
    #[serial]
    fn test_non_numeric_exit_ends_with_one() {
        let mut interp = interpreter();
        assert_eq!(run(&mut interp, "exit lots").0, Outcome::Exit(1));
        assert_eq!(interp.state().last_status(), 1);
    }

    #[test]
    #[serial]
    fn test_status_codes() {
        let mut interp = interpreter();

        run(&mut interp, "frobnicate-no-such-command");
        assert_eq!(interp.state().last_status(), 127);

        run(&mut interp, "echo \"unterminated");
        assert_eq!(interp.state().last_status(), 2);

        run(&mut interp, "cd -");
        assert_eq!(interp.state().last_status(), 1);

        run(&mut interp, "true");
        assert_eq!(interp.state().last_status(), 0);

        run(&mut interp, "false");
        assert_eq!(interp.state().last_status(), 1);
    }

    #[test]
    #[serial]
    fn test_last_status_expansion() {
        let mut interp = interpreter();
        run(&mut interp, "false");
        assert_eq!(run(&mut interp, "exit $?").0, Outcome::Exit(1));
    }

    #[test]
    #[serial]
    fn test_blank_line_keeps_status() {
        let mut interp = interpreter();
        run(&mut interp, "false");
        assert_eq!(run(&mut interp, "   ").0, Outcome::Continue);
        assert_eq!(interp.state().last_status(), 1);
    }

    #[test]
    #[serial]
    fn test_run_lines_stops_at_exit() {
        let _restore = RestoreDir::capture();
        let mut interp = interpreter();
        let mut out = Vec::new();

        let outcome = interp.run_lines(["cd /", "exit 4", "cd /tmp"], &mut out);
        assert_eq!(outcome, Outcome::Exit(4));
        assert_eq!(interp.state().current_dir(), PathBuf::from("/"));
    }

    #[test]
    #[serial]
    fn test_foreground_clear_after_external() {
        let mut interp = interpreter();
        run(&mut interp, "true");
        assert_eq!(interp.foreground().current(), None);
    }
}

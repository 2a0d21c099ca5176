use std::io::Write;

use tracing::debug;

use super::{Command, CommandError, Outcome};
use crate::core::state::ShellState;

/// `exit [n]`. The shell loop ends the process with the returned code. A
/// non-numeric `n` is an error whose `exit_code` is 1.
#[derive(Clone, Default)]
pub struct ExitCommand;

impl ExitCommand {
    pub fn new() -> Self {
        Self
    }
}

impl Command for ExitCommand {
    fn execute(
        &self,
        _state: &mut ShellState,
        args: &[String],
        _out: &mut dyn Write,
    ) -> Result<Outcome, CommandError> {
        let code = match args.first() {
            None => 0,
            Some(arg) => arg
                .parse::<i32>()
                .map_err(|_| CommandError::NumericArgument(arg.clone()))?,
        };

        debug!(code, "exit requested");
        Ok(Outcome::Exit(code))
    }
}

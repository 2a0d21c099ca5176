use std::env;
use std::fs;
use std::io::Write;

use super::{Command, CommandError, Outcome};
use crate::core::state::ShellState;

/// `pwd [-L|-P]`.
///
/// `-L` (the default) prints the directory the shell tracks, which can differ
/// from the OS view if something else moved the process. `-P` asks the OS
/// and resolves symlinks.
#[derive(Clone, Default)]
pub struct PwdCommand;

impl PwdCommand {
    pub fn new() -> Self {
        Self
    }
}

impl Command for PwdCommand {
    fn execute(
        &self,
        state: &mut ShellState,
        args: &[String],
        out: &mut dyn Write,
    ) -> Result<Outcome, CommandError> {
        let mut physical = false;

        // only the last character of each flag argument counts
        for arg in args.iter().filter(|arg| arg.starts_with('-')) {
            match arg.chars().last() {
                Some('L') => physical = false,
                Some('P') => physical = true,
                Some(other) => {
                    return Err(CommandError::InvalidOption {
                        builtin: "pwd",
                        option: other,
                    });
                }
                None => {}
            }
        }

        let dir = if physical {
            env::current_dir()
                .and_then(fs::canonicalize)
                .map_err(|source| CommandError::PhysicalResolution {
                    builtin: "pwd",
                    source,
                })?
        } else {
            state.current_dir().to_path_buf()
        };

        writeln!(out, "{}", dir.display()).map_err(|source| CommandError::Output {
            builtin: "pwd",
            source,
        })?;
        Ok(Outcome::Continue)
    }
}

use std::collections::BTreeMap;
use std::io::{self, Write};
use std::path::PathBuf;

use thiserror::Error;
use tracing::debug;

mod cd;
mod exit;
mod pwd;

pub use cd::CdCommand;
pub use exit::ExitCommand;
pub use pwd::PwdCommand;

use super::state::ShellState;

/// Failures of a built-in. Every message starts with the built-in's name.
#[derive(Debug, Error)]
pub enum CommandError {
    #[error("{builtin}: invalid option -- '{option}'")]
    InvalidOption { builtin: &'static str, option: char },
    #[error("cd: OLDPWD not set")]
    NoOldPwd,
    #[error("cd: HOME not set")]
    HomeNotSet,
    #[error("{builtin}: error resolving physical path")]
    PhysicalResolution {
        builtin: &'static str,
        #[source]
        source: io::Error,
    },
    #[error("cd: {}: {}", .path.display(), .source)]
    Resolve {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("cd: {}: {}", .path.display(), .source)]
    Chdir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("{builtin}: write error: {source}")]
    Output {
        builtin: &'static str,
        #[source]
        source: io::Error,
    },
    #[error("exit: {0}: numeric argument required")]
    NumericArgument(String),
}

impl CommandError {
    /// Errors that still end the shell after being reported, with this code.
    pub fn exit_code(&self) -> Option<i32> {
        match self {
            CommandError::NumericArgument(_) => Some(1),
            _ => None,
        }
    }
}

/// What the shell does after a built-in returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Continue,
    Exit(i32),
}

pub trait Command {
    fn execute(
        &self,
        state: &mut ShellState,
        args: &[String],
        out: &mut dyn Write,
    ) -> Result<Outcome, CommandError>;
}

#[derive(Clone)]
enum CommandType {
    Cd(CdCommand),
    Pwd(PwdCommand),
    Exit(ExitCommand),
}

impl Command for CommandType {
    fn execute(
        &self,
        state: &mut ShellState,
        args: &[String],
        out: &mut dyn Write,
    ) -> Result<Outcome, CommandError> {
        match self {
            CommandType::Cd(cmd) => cmd.execute(state, args, out),
            CommandType::Pwd(cmd) => cmd.execute(state, args, out),
            CommandType::Exit(cmd) => cmd.execute(state, args, out),
        }
    }
}

/// Result of offering a command line to the built-ins.
#[derive(Debug)]
pub enum Dispatch {
    /// `args[0]` names no built-in; run it as an external program.
    NotBuiltin,
    Ran(Result<Outcome, CommandError>),
}

#[derive(Clone)]
pub struct Builtins {
    commands: BTreeMap<&'static str, CommandType>,
}

impl Default for Builtins {
    fn default() -> Self {
        Self::new()
    }
}

impl Builtins {
    pub fn new() -> Self {
        let mut commands = BTreeMap::new();
        commands.insert("cd", CommandType::Cd(CdCommand::new()));
        commands.insert("pwd", CommandType::Pwd(PwdCommand::new()));
        commands.insert("exit", CommandType::Exit(ExitCommand::new()));
        Self { commands }
    }

    /// Exact, case-sensitive match on `args[0]`; the built-in gets the rest.
    pub fn dispatch(
        &self,
        state: &mut ShellState,
        args: &[String],
        out: &mut dyn Write,
    ) -> Dispatch {
        let Some((name, rest)) = args.split_first() else {
            return Dispatch::NotBuiltin;
        };

        match self.commands.get(name.as_str()) {
            Some(cmd) => {
                debug!(builtin = %name, "dispatching built-in");
                Dispatch::Ran(cmd.execute(state, rest, out))
            }
            None => Dispatch::NotBuiltin,
        }
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.commands.keys().copied()
    }
}

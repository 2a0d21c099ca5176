use std::path::PathBuf;

use clap::Parser;

/// burrow - an interactive shell
#[derive(Parser, Debug, Clone, Default)]
#[command(name = "burrow", version, about)]
pub struct Flags {
    /// Evaluate COMMAND as one input line and exit
    #[arg(short = 'c', value_name = "COMMAND", conflicts_with = "script")]
    pub command: Option<String>,

    /// Read startup commands from PATH instead of ~/.burrowrc
    #[arg(long, value_name = "PATH", env = "BURROW_RC")]
    pub rcfile: Option<PathBuf>,

    /// Do not read a startup file
    #[arg(long)]
    pub norc: bool,

    /// Do not report non-zero exits of external commands
    #[arg(short, long)]
    pub quiet: bool,

    /// Enable debug logging on stderr
    #[arg(short, long)]
    pub debug: bool,

    /// Evaluate the lines of SCRIPT and exit
    #[arg(value_name = "SCRIPT")]
    pub script: Option<PathBuf>,
}

impl Flags {
    pub fn is_interactive(&self) -> bool {
        self.command.is_none() && self.script.is_none()
    }
}

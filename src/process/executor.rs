use std::io;
use std::os::unix::process::{CommandExt, ExitStatusExt};
use std::path::Path;
use std::process::{Command, ExitStatus, Stdio};

use tracing::debug;

use super::signal::signal_name;
use super::{Foreground, ProcessError};

/// How a foreground child ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Termination {
    Exited(i32),
    Signaled(i32),
}

impl Termination {
    fn from_status(status: ExitStatus) -> Self {
        match (status.code(), status.signal()) {
            (Some(code), _) => Termination::Exited(code),
            (None, Some(signal)) => Termination::Signaled(signal),
            (None, None) => Termination::Exited(1),
        }
    }

    /// The value `$?` takes after this termination.
    pub fn exit_status(&self) -> i32 {
        match *self {
            Termination::Exited(code) => code,
            Termination::Signaled(signal) => 128 + signal,
        }
    }

    /// A line for the user, or `None` for a clean exit.
    pub fn describe(&self) -> Option<String> {
        match *self {
            Termination::Exited(0) => None,
            Termination::Exited(code) => Some(format!("process exited with code {}", code)),
            Termination::Signaled(signal) => Some(format!(
                "process killed by signal {} ({})",
                signal,
                signal_name(signal)
            )),
        }
    }
}

/// Runs external programs in the foreground, one at a time.
#[derive(Clone, Debug)]
pub struct ProcessSupervisor {
    foreground: Foreground,
}

impl ProcessSupervisor {
    pub fn new(foreground: Foreground) -> Self {
        Self { foreground }
    }

    pub fn foreground(&self) -> &Foreground {
        &self.foreground
    }

    /// Starts `executable` with `argv` (argv[0] included) and blocks until it
    /// terminates. The child's pid is the foreground pid for exactly as long
    /// as this call is waiting on it.
    pub fn run_foreground(
        &self,
        executable: &Path,
        argv: &[String],
    ) -> Result<Termination, ProcessError> {
        let mut command = Command::new(executable);
        if let Some((name, args)) = argv.split_first() {
            command.arg0(name).args(args);
        }
        command
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit());

        // SAFETY: only async-signal-safe calls between fork and exec.
        unsafe {
            command.pre_exec(|| {
                for signal in [libc::SIGINT, libc::SIGTSTP] {
                    if libc::signal(signal, libc::SIG_DFL) == libc::SIG_ERR {
                        return Err(io::Error::last_os_error());
                    }
                }
                Ok(())
            });
        }

        let mut child = command.spawn().map_err(|source| ProcessError::Spawn {
            command: executable.display().to_string(),
            source,
        })?;

        let pid = child.id();
        let _guard = self.foreground.hold(pid);
        debug!(pid, executable = %executable.display(), "started foreground process");

        let status = child.wait().map_err(ProcessError::Wait)?;
        let termination = Termination::from_status(status);
        debug!(pid, ?termination, "foreground process finished");

        Ok(termination)
    }
}

use std::io::{self, Write};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use signal_hook::consts::{SIGINT, SIGTSTP};
use signal_hook::iterator::Signals;
use tracing::{debug, warn};

use super::{Foreground, ProcessError};

/// What the relay did with one signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Relayed {
    Forwarded(u32),
    Absorbed,
}

type PromptSource = Arc<dyn Fn() -> String + Send + Sync>;

/// Listens for SIGINT and SIGTSTP for the lifetime of the shell.
///
/// With a foreground process recorded the signal is sent on to that pid.
/// Otherwise the shell keeps it: a newline and a fresh prompt are printed.
#[derive(Clone)]
pub struct SignalRelay {
    foreground: Foreground,
    prompt: PromptSource,
}

impl SignalRelay {
    pub fn new<F>(foreground: Foreground, prompt: F) -> Self
    where
        F: Fn() -> String + Send + Sync + 'static,
    {
        Self {
            foreground,
            prompt: Arc::new(prompt),
        }
    }

    /// Subscribes to the interactive signals and handles them on a detached
    /// thread. The thread never exits on its own; it dies with the process.
    pub fn spawn(self) -> Result<JoinHandle<()>, ProcessError> {
        let mut signals = Signals::new([SIGINT, SIGTSTP]).map_err(ProcessError::SignalSetup)?;

        thread::Builder::new()
            .name("signal-relay".to_string())
            .spawn(move || {
                for signal in signals.forever() {
                    self.handle(signal);
                }
            })
            .map_err(ProcessError::SignalSetup)
    }

    pub fn handle(&self, signal: i32) -> Relayed {
        let relayed = self.foreground.with_current(|pid| match pid {
            Some(pid) => {
                if let Err(e) = forward(pid, signal) {
                    warn!(pid, signal = signal_name(signal), "{}", e);
                    eprintln!("burrow: {}", e);
                }
                Relayed::Forwarded(pid)
            }
            None => Relayed::Absorbed,
        });

        debug!(signal = signal_name(signal), ?relayed, "signal received");

        if relayed == Relayed::Absorbed {
            let mut stdout = io::stdout().lock();
            let _ = write!(stdout, "\n{}", (self.prompt)());
            let _ = stdout.flush();
        }

        relayed
    }
}

fn forward(pid: u32, signal: i32) -> Result<(), ProcessError> {
    let target = libc::pid_t::try_from(pid).map_err(|_| ProcessError::Forward {
        pid,
        signal,
        source: io::Error::from(io::ErrorKind::InvalidInput),
    })?;

    // SAFETY: kill(2) has no memory-safety preconditions.
    if unsafe { libc::kill(target, signal) } == -1 {
        return Err(ProcessError::Forward {
            pid,
            signal,
            source: io::Error::last_os_error(),
        });
    }
    Ok(())
}

pub fn signal_name(signal: i32) -> &'static str {
    match signal {
        libc::SIGHUP => "SIGHUP",
        libc::SIGINT => "SIGINT",
        libc::SIGQUIT => "SIGQUIT",
        libc::SIGILL => "SIGILL",
        libc::SIGTRAP => "SIGTRAP",
        libc::SIGABRT => "SIGABRT",
        libc::SIGBUS => "SIGBUS",
        libc::SIGFPE => "SIGFPE",
        libc::SIGKILL => "SIGKILL",
        libc::SIGUSR1 => "SIGUSR1",
        libc::SIGSEGV => "SIGSEGV",
        libc::SIGUSR2 => "SIGUSR2",
        libc::SIGPIPE => "SIGPIPE",
        libc::SIGALRM => "SIGALRM",
        libc::SIGTERM => "SIGTERM",
        libc::SIGCHLD => "SIGCHLD",
        libc::SIGCONT => "SIGCONT",
        libc::SIGSTOP => "SIGSTOP",
        libc::SIGTSTP => "SIGTSTP",
        libc::SIGTTIN => "SIGTTIN",
        libc::SIGTTOU => "SIGTTOU",
        _ => "unknown signal",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::os::unix::process::ExitStatusExt;
    use std::process::Command;

    #[test]
    fn test_absorbed_without_foreground() {
        let relay = SignalRelay::new(Foreground::new(), || "$ ".to_string());
        assert_eq!(relay.handle(SIGINT), Relayed::Absorbed);
    }

    #[test]
    fn test_forwarded_to_foreground() -> Result<(), Box<dyn std::error::Error>> {
        let foreground = Foreground::new();
        let relay = SignalRelay::new(foreground.clone(), String::new);

        let mut child = Command::new("sleep").arg("10").spawn()?;
        let pid = child.id();
        let guard = foreground.hold(pid);

        assert_eq!(relay.handle(libc::SIGTERM), Relayed::Forwarded(pid));
        let status = child.wait()?;
        drop(guard);

        assert_eq!(status.signal(), Some(libc::SIGTERM));
        Ok(())
    }

    #[test]
    fn test_stop_forwarded_to_foreground() -> Result<(), Box<dyn std::error::Error>> {
        let foreground = Foreground::new();
        let relay = SignalRelay::new(foreground.clone(), String::new);

        let mut child = Command::new("sleep").arg("10").spawn()?;
        let pid = child.id();
        let raw_pid = libc::pid_t::try_from(pid)?;
        let guard = foreground.hold(pid);

        assert_eq!(relay.handle(SIGTSTP), Relayed::Forwarded(pid));

        let mut status = 0;
        // SAFETY: status outlives the call.
        let waited = unsafe { libc::waitpid(raw_pid, &mut status, libc::WUNTRACED) };
        assert_eq!(waited, raw_pid);
        assert!(libc::WIFSTOPPED(status));
        assert_eq!(libc::WSTOPSIG(status), SIGTSTP);

        // SAFETY: kill(2) has no memory-safety preconditions.
        unsafe { libc::kill(raw_pid, libc::SIGCONT) };
        child.kill()?;
        child.wait()?;
        drop(guard);
        Ok(())
    }

    #[test]
    fn test_forward_to_missing_process_reports() {
        let err = forward(u32::MAX, libc::SIGINT).unwrap_err();
        assert!(matches!(err, ProcessError::Forward { .. }));
    }

    #[test]
    fn test_signal_names() {
        assert_eq!(signal_name(libc::SIGINT), "SIGINT");
        assert_eq!(signal_name(libc::SIGTSTP), "SIGTSTP");
        assert_eq!(signal_name(999), "unknown signal");
    }
}

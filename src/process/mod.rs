use std::io;

use thiserror::Error;

pub mod executor;
mod foreground;
pub mod signal;

pub use executor::{ProcessSupervisor, Termination};
pub use foreground::{Foreground, ForegroundGuard};
pub use signal::{Relayed, SignalRelay};

#[derive(Debug, Error)]
pub enum ProcessError {
    #[error("{command}: failed to start: {source}")]
    Spawn {
        command: String,
        #[source]
        source: io::Error,
    },
    #[error("error waiting for process: {0}")]
    Wait(#[source] io::Error),
    #[error("failed to forward signal {signal} to process {pid}: {source}")]
    Forward {
        pid: u32,
        signal: i32,
        #[source]
        source: io::Error,
    },
    #[error("could not install signal relay: {0}")]
    SignalSetup(#[source] io::Error),
}

impl ProcessError {
    pub fn exit_status(&self) -> i32 {
        match self {
            ProcessError::Spawn { .. } => 126,
            _ => 1,
        }
    }
}

use std::env;
use std::ffi::OsStr;
use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ResolveError {
    #[error("{0}: command not found")]
    NotFound(String),
    #[error("{0}: not an executable file")]
    NotExecutable(String),
}

impl ResolveError {
    pub fn exit_status(&self) -> i32 {
        match self {
            ResolveError::NotFound(_) => 127,
            ResolveError::NotExecutable(_) => 126,
        }
    }
}

/// Resolves `command` against the `PATH` of the running process.
pub fn resolve(command: &str) -> Result<PathBuf, ResolveError> {
    resolve_in(command, env::var_os("PATH").as_deref())
}

/// Absolute paths and names starting with `./` or `../` are checked directly.
/// Anything else is searched for in `search_path`, first match wins.
pub fn resolve_in(command: &str, search_path: Option<&OsStr>) -> Result<PathBuf, ResolveError> {
    if is_explicit(command) {
        return if is_executable(Path::new(command)) {
            Ok(PathBuf::from(command))
        } else {
            Err(ResolveError::NotExecutable(command.to_string()))
        };
    }

    let found = search_path
        .into_iter()
        .flat_map(env::split_paths)
        .map(|dir| dir.join(command))
        .find(|candidate| is_executable(candidate));

    match found {
        Some(path) => {
            debug!(command, path = %path.display(), "resolved executable");
            Ok(path)
        }
        None => Err(ResolveError::NotFound(command.to_string())),
    }
}

/// A regular file (after following symlinks) with any execute bit set.
pub fn is_executable(path: &Path) -> bool {
    match fs::metadata(path) {
        Ok(meta) => meta.is_file() && meta.permissions().mode() & 0o111 != 0,
        Err(_) => false,
    }
}

fn is_explicit(command: &str) -> bool {
    Path::new(command).is_absolute() || command.starts_with("./") || command.starts_with("../")
}

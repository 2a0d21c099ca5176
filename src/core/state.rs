use std::env;
use std::path::{Path, PathBuf};
use std::sync::{Arc, PoisonError, RwLock};

use tracing::{debug, warn};

use super::env::EnvVarManager;
use crate::process::Foreground;

/// Everything one running shell owns.
///
/// Only `cd` moves the directories: after a successful change
/// `previous_dir` holds what `current_dir` was just before it.
#[derive(Debug)]
pub struct ShellState {
    current_dir: PathBuf,
    previous_dir: Option<PathBuf>,
    published_dir: DirectoryView,
    environment: EnvVarManager,
    foreground: Foreground,
    last_status: i32,
}

/// Read-only handle on the logical working directory, for code that cannot
/// borrow the state (the signal relay's prompt).
#[derive(Clone, Debug)]
pub struct DirectoryView {
    dir: Arc<RwLock<PathBuf>>,
}

impl DirectoryView {
    fn new(dir: PathBuf) -> Self {
        Self {
            dir: Arc::new(RwLock::new(dir)),
        }
    }

    pub fn get(&self) -> PathBuf {
        self.dir
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn set(&self, dir: PathBuf) {
        *self.dir.write().unwrap_or_else(PoisonError::into_inner) = dir;
    }
}

impl Default for ShellState {
    fn default() -> Self {
        Self::new()
    }
}

impl ShellState {
    pub fn new() -> Self {
        let current_dir = env::current_dir().unwrap_or_else(|_| PathBuf::from("/"));
        Self::with_environment(current_dir, EnvVarManager::from_process())
    }

    pub fn with_environment(current_dir: PathBuf, environment: EnvVarManager) -> Self {
        Self {
            published_dir: DirectoryView::new(current_dir.clone()),
            current_dir,
            previous_dir: None,
            environment,
            foreground: Foreground::new(),
            last_status: 0,
        }
    }

    pub fn current_dir(&self) -> &Path {
        &self.current_dir
    }

    pub fn previous_dir(&self) -> Option<&Path> {
        self.previous_dir.as_deref()
    }

    /// A view that follows every later change of `current_dir`.
    pub fn directory_view(&self) -> DirectoryView {
        self.published_dir.clone()
    }

    pub fn environment(&self) -> &EnvVarManager {
        &self.environment
    }

    pub fn foreground(&self) -> &Foreground {
        &self.foreground
    }

    pub fn last_status(&self) -> i32 {
        self.last_status
    }

    pub fn set_last_status(&mut self, status: i32) {
        self.last_status = status;
    }

    /// Records a directory change the OS has already accepted and mirrors
    /// `OLDPWD`/`PWD` into the process environment.
    pub(crate) fn commit_directory(&mut self, new_dir: PathBuf) {
        let old_dir = std::mem::replace(&mut self.current_dir, new_dir);
        debug!(from = %old_dir.display(), to = %self.current_dir.display(), "directory changed");

        for (name, value) in [("OLDPWD", &old_dir), ("PWD", &self.current_dir)] {
            if let Err(e) = self.environment.export(name, &value.to_string_lossy()) {
                warn!("could not export {}: {}", name, e);
            }
        }

        self.published_dir.set(self.current_dir.clone());
        self.previous_dir = Some(old_dir);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    fn test_initial_state() {
        let state = ShellState::with_environment(PathBuf::from("/srv"), EnvVarManager::default());
        assert_eq!(state.current_dir(), Path::new("/srv"));
        assert_eq!(state.previous_dir(), None);
        assert_eq!(state.last_status(), 0);
        assert_eq!(state.directory_view().get(), PathBuf::from("/srv"));
    }

    #[test]
    #[serial]
    fn test_directory_view_follows_commits() {
        let mut state = ShellState::with_environment(PathBuf::from("/"), EnvVarManager::default());
        let view = state.directory_view();

        state.commit_directory(PathBuf::from("/tmp"));
        assert_eq!(view.get(), PathBuf::from("/tmp"));
        assert_eq!(state.previous_dir(), Some(Path::new("/")));
        assert_eq!(state.environment().get("PWD"), Some("/tmp"));
        assert_eq!(state.environment().get("OLDPWD"), Some("/"));
    }
}

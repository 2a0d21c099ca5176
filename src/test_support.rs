use std::env;
use std::path::PathBuf;

/// Puts the process back in the directory it was in when captured, as long
/// as that directory still exists.
pub(crate) struct RestoreDir(Option<PathBuf>);

impl RestoreDir {
    pub(crate) fn capture() -> Self {
        Self(env::current_dir().ok())
    }
}

impl Drop for RestoreDir {
    fn drop(&mut self) {
        if let Some(dir) = &self.0 {
            let _ = env::set_current_dir(dir);
        }
    }
}

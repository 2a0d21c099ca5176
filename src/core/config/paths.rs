use super::ConfigError;
use std::path::{Path, PathBuf};

const RC_FILE: &str = ".burrowrc";
const HISTORY_FILE: &str = ".burrow_history";

#[derive(Debug, Clone)]
pub struct ConfigPaths {
    pub rc_path: PathBuf,
    pub history_path: PathBuf,
}

impl ConfigPaths {
    pub fn new() -> Result<Self, ConfigError> {
        let home = dirs::home_dir().ok_or(ConfigError::HomeDirNotFound)?;
        Ok(Self::in_home(&home))
    }

    pub fn in_home(home: &Path) -> Self {
        ConfigPaths {
            rc_path: home.join(RC_FILE),
            history_path: home.join(HISTORY_FILE),
        }
    }

    /// Replaces the startup file, e.g. from `--rcfile`.
    pub fn with_rc_path(mut self, rc_path: Option<PathBuf>) -> Self {
        if let Some(path) = rc_path {
            self.rc_path = path;
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paths_in_home() {
        let paths = ConfigPaths::in_home(Path::new("/home/testuser"));

        assert_eq!(paths.rc_path, PathBuf::from("/home/testuser/.burrowrc"));
        assert_eq!(
            paths.history_path,
            PathBuf::from("/home/testuser/.burrow_history")
        );
    }

    #[test]
    fn test_rc_override() {
        let paths = ConfigPaths::in_home(Path::new("/home/testuser"))
            .with_rc_path(Some(PathBuf::from("/etc/burrowrc")));
        assert_eq!(paths.rc_path, PathBuf::from("/etc/burrowrc"));

        let paths = paths.with_rc_path(None);
        assert_eq!(paths.rc_path, PathBuf::from("/etc/burrowrc"));
    }
}

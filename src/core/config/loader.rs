use std::{fs, io, path::Path};

use tracing::debug;

use super::ConfigError;

/// Reads command lines from a startup file or script.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Lines to evaluate from `path`: blank lines and `#` comments are
    /// skipped. A missing file yields no lines.
    pub fn startup_lines(path: &Path) -> Result<Vec<String>, ConfigError> {
        match fs::read_to_string(path) {
            Ok(content) => {
                debug!(path = %path.display(), "loading startup file");
                Ok(command_lines(&content))
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(Vec::new()),
            Err(source) => Err(ConfigError::Read {
                path: path.to_path_buf(),
                source,
            }),
        }
    }

    /// Like `startup_lines`, but the file must exist.
    pub fn script_lines(path: &Path) -> Result<Vec<String>, ConfigError> {
        fs::read_to_string(path)
            .map(|content| command_lines(&content))
            .map_err(|source| ConfigError::Read {
                path: path.to_path_buf(),
                source,
            })
    }
}

fn command_lines(content: &str) -> Vec<String> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(String::from)
        .collect()
}

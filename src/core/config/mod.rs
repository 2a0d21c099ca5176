use std::io;
use std::path::PathBuf;

use thiserror::Error;

mod loader;
mod paths;

pub use loader::ConfigLoader;
pub use paths::ConfigPaths;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("home directory not found")]
    HomeDirNotFound,
    #[error("cannot read {}: {}", .path.display(), .source)]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

use std::path::PathBuf;

/// Replaces a leading `~` with the invoking user's home directory.
#[derive(Clone, Debug, Default)]
pub struct PathExpander {
    home: Option<PathBuf>,
}

impl PathExpander {
    pub fn new() -> Self {
        Self { home: None }
    }

    /// Uses a fixed home directory instead of asking the OS on every call.
    pub fn with_home(home: impl Into<PathBuf>) -> Self {
        Self {
            home: Some(home.into()),
        }
    }

    /// Only the leading `~` is replaced; the rest of the token is appended as-is.
    /// Tokens are returned unchanged when no home directory can be found.
    pub fn expand(&self, token: String) -> String {
        let Some(rest) = token.strip_prefix('~') else {
            return token;
        };

        match self.home_dir() {
            Some(home) if !home.as_os_str().is_empty() => {
                format!("{}{}", home.to_string_lossy(), rest)
            }
            _ => token,
        }
    }

    pub fn home_dir(&self) -> Option<PathBuf> {
        self.home.clone().or_else(dirs::home_dir)
    }
}

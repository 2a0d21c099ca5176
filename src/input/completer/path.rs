use std::fs;
use std::path::{Path, PathBuf};

use rustyline::completion::Pair;

#[derive(Clone, Default)]
pub struct PathCompleter;

impl PathCompleter {
    pub fn new() -> Self {
        Self
    }

    /// Completes the file name part of `incomplete`. With `dirs_only` set,
    /// plain files are left out (used for `cd`).
    pub fn complete_path(&self, incomplete: &str, dirs_only: bool) -> Vec<Pair> {
        let (dir_to_search, prefix) = split_input(incomplete);
        let show_hidden = prefix.starts_with('.');

        let Ok(entries) = fs::read_dir(dir_to_search.as_deref().unwrap_or(Path::new("."))) else {
            return Vec::new();
        };

        let mut matches: Vec<Pair> = entries
            .filter_map(Result::ok)
            .filter_map(|entry| {
                let name = entry.file_name().into_string().ok()?;
                if !name.starts_with(prefix) || (name.starts_with('.') && !show_hidden) {
                    return None;
                }

                let is_dir = entry.path().is_dir();
                if dirs_only && !is_dir {
                    return None;
                }

                let full = match &dir_to_search {
                    Some(dir) => dir.join(&name).to_string_lossy().into_owned(),
                    None => name,
                };
                Some(if is_dir {
                    Pair {
                        display: format!("{full}/"),
                        replacement: format!("{full}/"),
                    }
                } else {
                    Pair {
                        display: full.clone(),
                        replacement: format!("{full} "),
                    }
                })
            })
            .collect();

        matches.sort_by(|a, b| a.display.cmp(&b.display));
        matches
    }
}

/// Splits the word under the cursor into the directory to list and the
/// file name prefix. `None` means the current directory.
fn split_input(incomplete: &str) -> (Option<PathBuf>, &str) {
    match incomplete.rfind('/') {
        Some(0) => (Some(PathBuf::from("/")), &incomplete[1..]),
        Some(idx) => (Some(PathBuf::from(&incomplete[..idx])), &incomplete[idx + 1..]),
        None => (None, incomplete),
    }
}

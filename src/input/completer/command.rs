use std::collections::BTreeSet;
use std::env;
use std::ffi::OsStr;
use std::fs;

use rustyline::completion::Pair;

use crate::path::resolver::is_executable;

/// Names offered for the first word of a line: built-ins plus every
/// executable found on `PATH` when the completer was built.
#[derive(Clone, Default)]
pub struct CommandCompleter {
    commands: BTreeSet<String>,
}

impl CommandCompleter {
    pub fn new<'a>(builtins: impl IntoIterator<Item = &'a str>) -> Self {
        let mut completer = Self::default();
        completer.commands.extend(builtins.into_iter().map(str::to_string));
        completer.add_path_commands(env::var_os("PATH").as_deref());
        completer
    }

    fn add_path_commands(&mut self, search_path: Option<&OsStr>) {
        let Some(search_path) = search_path else {
            return;
        };

        for dir in env::split_paths(search_path) {
            let Ok(entries) = fs::read_dir(&dir) else {
                continue;
            };
            for entry in entries.filter_map(Result::ok) {
                if !is_executable(&entry.path()) {
                    continue;
                }
                if let Some(name) = entry.file_name().to_str() {
                    self.commands.insert(name.to_string());
                }
            }
        }
    }

    pub fn complete_command(&self, prefix: &str) -> Vec<Pair> {
        self.commands
            .iter()
            .filter(|cmd| cmd.starts_with(prefix))
            .map(|cmd| Pair {
                display: cmd.clone(),
                replacement: format!("{cmd} "),
            })
            .collect()
    }
}

use std::env;
use std::fs;
use std::io::Write;
use std::path::{Component, Path, PathBuf};

use tracing::debug;

use super::{Command, CommandError, Outcome};
use crate::core::state::ShellState;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
struct CdOptions {
    physical: bool,
    error_on_physical: bool,
}

/// `cd [-L|-P [-e]] [-@] [dir]` and `cd -`.
#[derive(Clone, Default)]
pub struct CdCommand;

impl CdCommand {
    pub fn new() -> Self {
        Self
    }

    fn change_to_previous(
        &self,
        state: &mut ShellState,
        out: &mut dyn Write,
    ) -> Result<Outcome, CommandError> {
        let target = state
            .previous_dir()
            .map(Path::to_path_buf)
            .ok_or(CommandError::NoOldPwd)?;

        change_dir(&target)?;
        writeln!(out, "{}", target.display()).map_err(|source| CommandError::Output {
            builtin: "cd",
            source,
        })?;

        state.commit_directory(target);
        Ok(Outcome::Continue)
    }
}

impl Command for CdCommand {
    fn execute(
        &self,
        state: &mut ShellState,
        args: &[String],
        out: &mut dyn Write,
    ) -> Result<Outcome, CommandError> {
        if args.first().map(String::as_str) == Some("-") {
            return self.change_to_previous(state, out);
        }

        let (options, operands) = parse_options(args)?;

        let target = match operands.first() {
            Some(dir) => PathBuf::from(dir),
            None => state
                .environment()
                .non_empty("HOME")
                .map(PathBuf::from)
                .ok_or(CommandError::HomeNotSet)?,
        };

        let target = search_cdpath(target, state.environment().non_empty("CDPATH"));
        let logical = absolutize(state.current_dir(), &target);

        let new_dir = if options.physical {
            fs::canonicalize(&logical).map_err(|source| {
                if options.error_on_physical {
                    CommandError::PhysicalResolution {
                        builtin: "cd",
                        source,
                    }
                } else {
                    CommandError::Resolve {
                        path: logical.clone(),
                        source,
                    }
                }
            })?
        } else {
            logical
        };

        change_dir(&new_dir)?;
        state.commit_directory(new_dir);
        Ok(Outcome::Continue)
    }
}

/// Bundled single-letter flags up to the first argument not starting with `-`.
fn parse_options(args: &[String]) -> Result<(CdOptions, &[String]), CommandError> {
    let mut options = CdOptions::default();
    let mut index = 0;

    while let Some(flags) = args.get(index).and_then(|arg| arg.strip_prefix('-')) {
        for flag in flags.chars() {
            match flag {
                'L' => options.physical = false,
                'P' => options.physical = true,
                'e' => options.error_on_physical = true,
                // extended attributes are not supported
                '@' => {}
                other => {
                    return Err(CommandError::InvalidOption {
                        builtin: "cd",
                        option: other,
                    });
                }
            }
        }
        index += 1;
    }

    Ok((options, &args[index..]))
}

/// First `CDPATH` entry that contains `target` wins; otherwise `target` is
/// kept and later resolved against the current directory.
fn search_cdpath(target: PathBuf, cdpath: Option<&str>) -> PathBuf {
    if target.is_absolute() {
        return target;
    }
    let Some(cdpath) = cdpath else {
        return target;
    };

    match env::split_paths(cdpath)
        .map(|dir| dir.join(&target))
        .find(|candidate| candidate.exists())
    {
        Some(found) => {
            debug!(path = %found.display(), "cd target found via CDPATH");
            found
        }
        None => target,
    }
}

fn absolutize(base: &Path, target: &Path) -> PathBuf {
    let joined = if target.is_absolute() {
        target.to_path_buf()
    } else {
        base.join(target)
    };
    normalize(&joined)
}

/// Folds `.` and `..` lexically, without touching the filesystem.
fn normalize(path: &Path) -> PathBuf {
    let mut normal = PathBuf::new();
    for component in path.components() {
        match component {
            Component::Prefix(_) | Component::RootDir => normal.push(component),
            Component::CurDir => {}
            Component::ParentDir => {
                normal.pop();
            }
            Component::Normal(part) => normal.push(part),
        }
    }
    normal
}

fn change_dir(path: &Path) -> Result<(), CommandError> {
    env::set_current_dir(path).map_err(|source| CommandError::Chdir {
        path: path.to_path_buf(),
        source,
    })
}

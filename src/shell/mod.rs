use std::io;
use std::path::{Path, PathBuf};

use rustyline::{config::Configurer, error::ReadlineError, history::FileHistory, Editor};
use tracing::{debug, warn};

mod executor;
pub mod prompt;

pub use executor::Interpreter;

use crate::{
    core::{
        commands::Outcome,
        config::{ConfigLoader, ConfigPaths},
        ShellState,
    },
    error::ShellError,
    flags::Flags,
    highlight::SyntaxHighlighter,
    input::ShellHelper,
    process::SignalRelay,
};

pub struct Shell {
    interpreter: Interpreter,
    highlighter: SyntaxHighlighter,
    paths: Option<ConfigPaths>,
    flags: Flags,
}

impl Shell {
    /// Builds the shell and starts the signal relay. The relay lives until
    /// the process exits.
    pub fn new(flags: Flags) -> Result<Self, ShellError> {
        let highlighter = SyntaxHighlighter::new();
        let interpreter = Interpreter::new(ShellState::new(), highlighter, flags.quiet);

        let paths = match ConfigPaths::new() {
            Ok(paths) => Some(paths.with_rc_path(flags.rcfile.clone())),
            Err(e) => {
                warn!("{}; history and ~/.burrowrc are disabled", e);
                None
            }
        };

        let interactive = flags.is_interactive();
        let cwd = interpreter.state().directory_view();
        SignalRelay::new(interpreter.foreground().clone(), move || {
            if interactive {
                highlighter.highlight_prompt(&prompt::render(&cwd.get()))
            } else {
                String::new()
            }
        })
        .spawn()?;

        Ok(Shell {
            interpreter,
            highlighter,
            paths,
            flags,
        })
    }

    /// Runs the startup file and then whichever mode the flags select.
    /// Returns the code the process should exit with.
    pub fn run(&mut self) -> Result<i32, ShellError> {
        if let Outcome::Exit(code) = self.run_startup_file() {
            return Ok(code);
        }

        if let Some(command) = self.flags.command.clone() {
            return Ok(self.run_command(&command));
        }
        if let Some(script) = self.flags.script.clone() {
            return self.run_script(&script);
        }
        self.run_interactive()
    }

    /// Evaluates a single line, as for `-c`.
    pub fn run_command(&mut self, line: &str) -> i32 {
        match self.interpreter.execute_line(line, &mut io::stdout()) {
            Outcome::Exit(code) => code,
            Outcome::Continue => self.interpreter.state().last_status(),
        }
    }

    pub fn run_script(&mut self, path: &Path) -> Result<i32, ShellError> {
        let lines = ConfigLoader::script_lines(path)?;
        debug!(path = %path.display(), lines = lines.len(), "running script");

        Ok(match self.interpreter.run_lines(lines, &mut io::stdout()) {
            Outcome::Exit(code) => code,
            Outcome::Continue => self.interpreter.state().last_status(),
        })
    }

    fn rc_path(&self) -> Option<PathBuf> {
        if self.flags.norc {
            return None;
        }
        match &self.paths {
            Some(paths) => Some(paths.rc_path.clone()),
            None => self.flags.rcfile.clone(),
        }
    }

    fn run_startup_file(&mut self) -> Outcome {
        let Some(path) = self.rc_path() else {
            return Outcome::Continue;
        };

        match ConfigLoader::startup_lines(&path) {
            Ok(lines) => self.interpreter.run_lines(lines, &mut io::stdout()),
            Err(e) => {
                eprintln!("{}", self.highlighter.highlight_error(&e.to_string()));
                Outcome::Continue
            }
        }
    }

    fn run_interactive(&mut self) -> Result<i32, ShellError> {
        let mut editor = Editor::<ShellHelper, FileHistory>::new()?;
        editor.set_helper(Some(ShellHelper::new(
            self.interpreter.builtins().names(),
            self.highlighter,
        )));
        editor.set_auto_add_history(true);

        let history_path = self.paths.as_ref().map(|paths| paths.history_path.clone());
        if let Some(path) = &history_path {
            if let Err(e) = editor.load_history(path) {
                debug!(path = %path.display(), "no history loaded: {}", e);
            }
        }

        let result = self.read_eval_loop(&mut editor);

        if let Some(path) = &history_path {
            if let Err(e) = editor.save_history(path) {
                warn!(path = %path.display(), "could not save history: {}", e);
            }
        }
        result
    }

    fn read_eval_loop(
        &mut self,
        editor: &mut Editor<ShellHelper, FileHistory>,
    ) -> Result<i32, ShellError> {
        loop {
            let prompt = prompt::render(self.interpreter.state().current_dir());
            match editor.readline(&prompt) {
                Ok(line) => {
                    let outcome = self.interpreter.execute_line(&line, &mut io::stdout());
                    if let Outcome::Exit(code) = outcome {
                        return Ok(code);
                    }
                }
                Err(ReadlineError::Interrupted) => continue,
                Err(ReadlineError::Eof) => {
                    println!("exit");
                    return Ok(0);
                }
                Err(e) => return Err(e.into()),
            }
        }
    }
}

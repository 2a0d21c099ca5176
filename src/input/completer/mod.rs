use std::borrow::Cow;

use rustyline::{
    completion::{Completer, Pair},
    highlight::{CmdKind, Highlighter},
    hint::Hinter,
    validate::Validator,
    Context, Helper,
};

use crate::highlight::SyntaxHighlighter;

mod command;
mod path;

use command::CommandCompleter;
use path::PathCompleter;

/// Line editor helper: completion for the first word and its arguments,
/// plus colouring of the line and the prompt.
#[derive(Clone)]
pub struct ShellHelper {
    command_completer: CommandCompleter,
    path_completer: PathCompleter,
    highlighter: SyntaxHighlighter,
}

impl ShellHelper {
    pub fn new<'a>(
        builtins: impl IntoIterator<Item = &'a str>,
        highlighter: SyntaxHighlighter,
    ) -> Self {
        Self {
            command_completer: CommandCompleter::new(builtins),
            path_completer: PathCompleter::new(),
            highlighter,
        }
    }
}

impl Helper for ShellHelper {}

impl Highlighter for ShellHelper {
    fn highlight<'l>(&self, line: &'l str, _pos: usize) -> Cow<'l, str> {
        Cow::Owned(self.highlighter.highlight_command(line))
    }

    fn highlight_prompt<'b, 's: 'b, 'p: 'b>(
        &'s self,
        prompt: &'p str,
        default: bool,
    ) -> Cow<'b, str> {
        if default {
            Cow::Owned(self.highlighter.highlight_prompt(prompt))
        } else {
            Cow::Borrowed(prompt)
        }
    }

    fn highlight_char(&self, _line: &str, _pos: usize, _kind: CmdKind) -> bool {
        true
    }
}

impl Hinter for ShellHelper {
    type Hint = String;
}

impl Validator for ShellHelper {}

impl Completer for ShellHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let before_cursor = &line[..pos];
        let start = word_start(before_cursor);
        let word = &before_cursor[start..];

        let mut preceding = before_cursor[..start].split_whitespace();
        let matches = match preceding.next() {
            None => self.command_completer.complete_command(word),
            Some(cmd) => self.path_completer.complete_path(word, cmd == "cd"),
        };

        Ok((start, matches))
    }
}

fn word_start(before_cursor: &str) -> usize {
    before_cursor
        .char_indices()
        .rev()
        .find(|(_, c)| c.is_whitespace())
        .map_or(0, |(idx, c)| idx + c.len_utf8())
}

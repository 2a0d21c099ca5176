mod completer;
pub mod lexer;

pub use completer::ShellHelper;
pub use lexer::{tokenize, tokenize_with, LexError};

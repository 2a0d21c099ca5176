//! Splits a raw input line into argument tokens.
//!
//! Quoting and escaping are resolved in a single left-to-right scan, then every
//! token containing `$` goes through variable expansion. Expansion is applied
//! uniformly, so `'$HOME'` expands just like `"$HOME"` does.

use std::env;

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LexError {
    #[error("unbalanced quotes in input")]
    UnbalancedQuotes,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Quote {
    None,
    Single,
    Double,
}

/// Tokenizes `input`, expanding variables from the process environment.
pub fn tokenize(input: &str) -> Result<Vec<String>, LexError> {
    tokenize_with(input, |name| env::var(name).ok())
}

/// Tokenizes `input`, resolving `$NAME` references through `lookup`.
///
/// Unset variables expand to the empty string, and tokens left empty by
/// expansion are dropped.
pub fn tokenize_with<F>(input: &str, lookup: F) -> Result<Vec<String>, LexError>
where
    F: Fn(&str) -> Option<String>,
{
    let tokens = split(input)?;

    Ok(tokens
        .into_iter()
        .map(|token| {
            if token.contains('$') {
                expand_variables(&token, &lookup)
            } else {
                token
            }
        })
        .filter(|token| !token.is_empty())
        .collect())
}

fn split(input: &str) -> Result<Vec<String>, LexError> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut quote = Quote::None;
    let mut escape_next = false;

    for c in input.chars() {
        if escape_next {
            current.push(c);
            escape_next = false;
            continue;
        }

        match (c, quote) {
            ('\\', Quote::None | Quote::Double) => escape_next = true,
            ('\'', Quote::None) => quote = Quote::Single,
            ('\'', Quote::Single) => quote = Quote::None,
            ('"', Quote::None) => quote = Quote::Double,
            ('"', Quote::Double) => quote = Quote::None,
            (c, Quote::None) if c.is_whitespace() => {
                if !current.is_empty() {
                    tokens.push(std::mem::take(&mut current));
                }
            }
            (c, _) => current.push(c),
        }
    }

    if quote != Quote::None {
        return Err(LexError::UnbalancedQuotes);
    }

    if !current.is_empty() {
        tokens.push(current);
    }

    Ok(tokens)
}

enum VarName<'a> {
    /// A name and the number of bytes it occupies after the `$`.
    Valid(&'a str, usize),
    /// Bad `${...}` syntax; the given number of bytes is dropped.
    Malformed(usize),
    /// `$` not followed by a name; kept literally.
    Missing,
}

/// Replaces `$NAME`, `${NAME}` and single-character special references.
pub fn expand_variables<F>(token: &str, lookup: &F) -> String
where
    F: Fn(&str) -> Option<String>,
{
    let mut expanded = String::with_capacity(token.len());
    let mut rest = token;

    while let Some(dollar) = rest.find('$') {
        expanded.push_str(&rest[..dollar]);
        let after = &rest[dollar + 1..];

        rest = match variable_name(after) {
            VarName::Valid(name, width) => {
                expanded.push_str(&lookup(name).unwrap_or_default());
                &after[width..]
            }
            VarName::Malformed(width) => &after[width..],
            VarName::Missing => {
                expanded.push('$');
                after
            }
        };
    }

    expanded.push_str(rest);
    expanded
}

fn is_special(b: u8) -> bool {
    matches!(b, b'*' | b'#' | b'$' | b'@' | b'!' | b'?' | b'-') || b.is_ascii_digit()
}

fn variable_name(s: &str) -> VarName<'_> {
    let bytes = s.as_bytes();
    let Some(&first) = bytes.first() else {
        return VarName::Missing;
    };

    if first == b'{' {
        if bytes.len() > 2 && is_special(bytes[1]) && bytes[2] == b'}' {
            return VarName::Valid(&s[1..2], 3);
        }
        return match s[1..].find('}') {
            Some(0) => VarName::Malformed(2),
            Some(close) => VarName::Valid(&s[1..=close], close + 2),
            None => VarName::Malformed(1),
        };
    }

    if is_special(first) {
        return VarName::Valid(&s[..1], 1);
    }

    let end = s
        .find(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
        .unwrap_or(s.len());
    if end == 0 {
        VarName::Missing
    } else {
        VarName::Valid(&s[..end], end)
    }
}

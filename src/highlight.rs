use inksac::prelude::*;

#[derive(Debug, Clone, Copy)]
pub struct SyntaxHighlighter {
    color_support: ColorSupport,
}

impl Default for SyntaxHighlighter {
    fn default() -> Self {
        Self::new()
    }
}

impl SyntaxHighlighter {
    pub fn new() -> Self {
        let support = check_color_support().unwrap_or(ColorSupport::NoColor);
        Self {
            color_support: support,
        }
    }

    pub fn plain() -> Self {
        Self {
            color_support: ColorSupport::NoColor,
        }
    }

    fn enabled(&self) -> bool {
        !matches!(self.color_support, ColorSupport::NoColor)
    }

    /// Colours the command word, `-flags` and `$VAR` words. Whitespace is
    /// kept byte for byte so the editor's cursor stays in place.
    pub fn highlight_command(&self, input: &str) -> String {
        if !self.enabled() {
            return input.to_string();
        }

        let command_style = Style::builder().foreground(Color::Cyan).bold().build();
        let flag_style = Style::builder().foreground(Color::Yellow).build();
        let variable_style = Style::builder().foreground(Color::Magenta).build();

        let mut highlighted = String::with_capacity(input.len() * 2);
        let mut seen_command = false;

        for (segment, is_word) in segments(input) {
            if !is_word {
                highlighted.push_str(segment);
            } else if !seen_command {
                seen_command = true;
                highlighted.push_str(&segment.style(command_style).to_string());
            } else if segment.starts_with('-') {
                highlighted.push_str(&segment.style(flag_style).to_string());
            } else if segment.contains('$') {
                highlighted.push_str(&segment.style(variable_style).to_string());
            } else {
                highlighted.push_str(segment);
            }
        }

        highlighted
    }

    pub fn highlight_error(&self, error: &str) -> String {
        if !self.enabled() {
            return error.to_string();
        }

        let error_style = Style::builder().foreground(Color::Red).bold().build();
        error.style(error_style).to_string()
    }

    pub fn highlight_prompt(&self, prompt: &str) -> String {
        if !self.enabled() {
            return prompt.to_string();
        }

        let prompt_style = Style::builder().foreground(Color::Green).bold().build();
        prompt.style(prompt_style).to_string()
    }
}

/// Splits `input` into alternating runs of whitespace and non-whitespace.
fn segments(input: &str) -> Vec<(&str, bool)> {
    let mut segments = Vec::new();
    let mut start = 0;
    let mut in_word = None;

    for (i, c) in input.char_indices() {
        let is_word = !c.is_whitespace();
        match in_word {
            Some(current) if current != is_word => {
                segments.push((&input[start..i], current));
                start = i;
            }
            _ => {}
        }
        in_word = Some(is_word);
    }

    if let Some(current) = in_word {
        segments.push((&input[start..], current));
    }
    segments
}

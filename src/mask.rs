//! Masking scanner for SQL string literals and comments.
//!
//! `mask_sql` blanks out everything inside quoted literals and comments so
//! keyword scans over the result cannot match quoted or commented text.
//! The output has the same character count as the input and keeps every
//! newline, so line/column math over the masked text stays aligned with
//! the source.

#[derive(Clone, Copy)]
enum Mode {
    Code,
    SingleQuote,
    DoubleQuote,
    Backtick,
    Bracket,
    LineComment,
    BlockComment,
}

impl Mode {
    /// Closing character for quoted modes; `None` for code and comments.
    fn closer(self) -> Option<char> {
        match self {
            Mode::SingleQuote => Some('\''),
            Mode::DoubleQuote => Some('"'),
            Mode::Backtick => Some('`'),
            Mode::Bracket => Some(']'),
            _ => None,
        }
    }
}

/// Replace string-literal and comment content with spaces.
///
/// Doubled closers (`''`, `""`, `]]`) are the usual SQL escapes: both
/// characters are masked and the quoted mode stays open. Newlines pass
/// through literally in every mode.
pub fn mask_sql(source: &str) -> String {
    let chars: Vec<char> = source.chars().collect();
    let mut out = String::with_capacity(source.len());
    let mut mode = Mode::Code;
    let mut i = 0usize;
    while i < chars.len() {
        let c = chars[i];
        let next = chars.get(i + 1).copied();

        if let Some(closer) = mode.closer() {
            if c == '\n' {
                out.push('\n');
                i += 1;
                continue;
            }
            if c == closer {
                if next == Some(closer) {
                    out.push_str("  ");
                    i += 2;
                    continue;
                }
                mode = Mode::Code;
            }
            out.push(' ');
            i += 1;
            continue;
        }

        match mode {
            Mode::LineComment => {
                if c == '\n' {
                    mode = Mode::Code;
                    out.push('\n');
                } else {
                    out.push(' ');
                }
            }
            Mode::BlockComment => {
                if c == '*' && next == Some('/') {
                    mode = Mode::Code;
                    out.push_str("  ");
                    i += 2;
                    continue;
                }
                if c == '\n' {
                    out.push('\n');
                } else {
                    out.push(' ');
                }
            }
            _ => match c {
                '\'' => {
                    mode = Mode::SingleQuote;
                    out.push(' ');
                }
                '"' => {
                    mode = Mode::DoubleQuote;
                    out.push(' ');
                }
                '`' => {
                    mode = Mode::Backtick;
                    out.push(' ');
                }
                '[' => {
                    mode = Mode::Bracket;
                    out.push(' ');
                }
                '-' if next == Some('-') => {
                    mode = Mode::LineComment;
                    out.push_str("  ");
                    i += 2;
                    continue;
                }
                '/' if next == Some('*') => {
                    mode = Mode::BlockComment;
                    out.push_str("  ");
                    i += 2;
                    continue;
                }
                _ => out.push(c),
            },
        }
        i += 1;
    }
    out
}

//! Comment stripping for JS/TS source lines.
//!
//! A two-state automaton (in block comment / in code) that runs over each
//! physical line and carries the block-comment state to the next line.
//! Comment characters are replaced with spaces so that byte offsets and
//! columns of the remaining code match the original line. A line comment
//! drops the rest of the line.
//!
//! Quote characters are tracked within a line so that `//` inside a string
//! literal (`"https://example.com"`) is kept as code. A quote only opens a
//! string where an expression can start (after an operator, an opening
//! bracket or a keyword such as `return`), so apostrophes in JSX text
//! (`<p>Don't</p>`) and quotes inside regex literals (`/'/g`) are plain
//! characters. String state does not carry across lines.

/// Stateful per-line comment stripper.
#[derive(Debug, Default)]
pub struct CommentStripper {
    in_block_comment: bool,
}

impl CommentStripper {
    pub fn new() -> Self {
        Self::default()
    }

    /// True while inside an unterminated `/* ... */` comment.
    pub fn in_block_comment(&self) -> bool {
        self.in_block_comment
    }

    /// Return the code region of `line`, with comment characters blanked.
    pub fn strip_line(&mut self, line: &str) -> String {
        let chars: Vec<char> = line.chars().collect();
        let mut code = String::with_capacity(line.len());
        let mut quote: Option<char> = None;
        let mut i = 0;

        while i < chars.len() {
            let c = chars[i];
            let next = chars.get(i + 1).copied();

            if self.in_block_comment {
                if c == '*' && next == Some('/') {
                    self.in_block_comment = false;
                    code.push_str("  ");
                    i += 2;
                } else {
                    push_blank(&mut code, c);
                    i += 1;
                }
                continue;
            }

            if let Some(q) = quote {
                code.push(c);
                if c == '\\' {
                    if let Some(escaped) = next {
                        code.push(escaped);
                        i += 2;
                        continue;
                    }
                } else if c == q {
                    quote = None;
                }
                i += 1;
                continue;
            }

            match (c, next) {
                ('/', Some('*')) => {
                    self.in_block_comment = true;
                    code.push_str("  ");
                    i += 2;
                }
                ('/', Some('/')) => break,
                ('\'' | '"' | '`', _) if can_open_string(&code) => {
                    quote = Some(c);
                    code.push(c);
                    i += 1;
                }
                _ => {
                    code.push(c);
                    i += 1;
                }
            }
        }

        code
    }
}

const EXPRESSION_OPENERS: &[char] = &[
    '=', '(', '{', '[', ',', ':', '?', '!', '&', '|', '+', '-', '*', '%', '<', ';', '~', '^',
];

const EXPRESSION_KEYWORDS: &[&str] = &[
    "return", "case", "typeof", "in", "of", "yield", "await", "from", "import", "export",
    "default", "else", "void", "delete", "throw", "new",
];

/// True when the code before a quote ends where a string literal may begin.
fn can_open_string(code_before: &str) -> bool {
    let before = code_before.trim_end();
    let Some(last) = before.chars().last() else {
        return true;
    };
    if EXPRESSION_OPENERS.contains(&last) || before.ends_with("=>") {
        return true;
    }
    let rest = before.trim_end_matches(|c: char| c.is_alphanumeric() || c == '_' || c == '$');
    let word = &before[rest.len()..];
    EXPRESSION_KEYWORDS.contains(&word) && !rest.ends_with('.')
}

// Keep byte offsets stable: a multi-byte char becomes as many spaces as it has bytes.
fn push_blank(code: &mut String, c: char) {
    for _ in 0..c.len_utf8() {
        code.push(' ');
    }
}

/// Strip comments from every line of `content`.
///
/// The result has one entry per line of `content.lines()`.
pub fn strip_comments(content: &str) -> Vec<String> {
    let mut stripper = CommentStripper::new();
    content.lines().map(|l| stripper.strip_line(l)).collect()
}

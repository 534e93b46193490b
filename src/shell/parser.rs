use crate::shell::alias::AliasTable;

/// The whitespace classes a command line is trimmed of.
pub const WHITESPACE: &[char] = &[' ', '\t', '\n', '\r', '\x0c', '\x0b'];

/// A command line after trimming, background-marker stripping and alias expansion.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedLine {
    pub text: String,
    pub head: String,
    pub background: bool,
}

impl NormalizedLine {
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

pub fn trim(s: &str) -> &str {
    s.trim_matches(WHITESPACE)
}

/// Removes a trailing `&` when it is the last non-whitespace character.
pub fn strip_background(line: &str) -> (&str, bool) {
    let trimmed = trim(line);
    match trimmed.strip_suffix('&') {
        Some(rest) if !rest.ends_with('\\') => (trim(rest), true),
        _ => (trimmed, false),
    }
}

/// First whitespace-delimited token of the line.
pub fn head_of(line: &str) -> &str {
    line.split(WHITESPACE).find(|t| !t.is_empty()).unwrap_or("")
}

/// Trims, strips the background marker and expands an alias in head position.
///
/// Expansion is a single pass: a value whose own head names another alias is
/// left as is. The marker is looked for again afterwards, since an alias value
/// may itself end in `&`.
pub fn normalize(raw: &str, aliases: &AliasTable) -> NormalizedLine {
    let (stripped, mut background) = strip_background(raw);
    let mut text = stripped.to_string();

    let head = head_of(&text);
    if let Some(value) = aliases.get(head) {
        let expanded = format!("{}{}", value, &text[head.len()..]);
        let (again, marked) = strip_background(&expanded);
        background |= marked;
        text = again.to_string();
    }

    let head = head_of(&text).to_string();
    NormalizedLine { text, head, background }
}

/// Byte offset of the first `target` that is neither quoted nor backslash-escaped.
pub fn find_unescaped(line: &str, target: char) -> Option<usize> {
    let mut in_single_quote = false;
    let mut in_double_quote = false;
    let mut escaped = false;

    for (idx, c) in line.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match c {
            '\\' if !in_single_quote => escaped = true,
            '\'' if !in_double_quote => in_single_quote = !in_single_quote,
            '"' if !in_single_quote => in_double_quote = !in_double_quote,
            _ if c == target && !in_single_quote && !in_double_quote => return Some(idx),
            _ => {}
        }
    }
    None
}

/// Splits a command line into arguments using shell-word rules.
/// Unbalanced quotes fall back to plain whitespace splitting.
pub fn split_args(line: &str) -> Vec<String> {
    shell_words::split(line).unwrap_or_else(|_| {
        line.split(WHITESPACE)
            .filter(|t| !t.is_empty())
            .map(str::to_string)
            .collect()
    })
}

/// Lines with wildcards are handed to bash instead of being exec'd directly.
pub fn is_complex(line: &str) -> bool {
    line.contains(['*', '?'])
}

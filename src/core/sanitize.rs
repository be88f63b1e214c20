// src/core/sanitize.rs
use crate::config::consts::MISSING;

/// Collapse every whitespace run (newlines, tabs, nbsp) to one space and trim.
pub fn normalize_ws(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_space = false;
    for ch in s.chars() {
        if ch.is_whitespace() {
            if !prev_space { out.push(' '); prev_space = true; }
        } else { out.push(ch); prev_space = false; }
    }
    out.trim().to_string()
}

/// Remove every `[ ... ]` footnote marker (e.g. `[a]`, `[12]`, `[citation needed]`).
/// Non-greedy, no nesting. An unclosed `[` is kept as text.
pub fn strip_brackets(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut rest = s;
    while let Some(open) = rest.find('[') {
        match rest[open..].find(']') {
            Some(close_rel) => {
                out.push_str(&rest[..open]);
                rest = &rest[open + close_rel + 1..];
            }
            None => break,
        }
    }
    out.push_str(rest);
    out
}

/// Footnotes out, whitespace collapsed, trimmed. Used for header labels.
pub fn clean_text(s: &str) -> String {
    normalize_ws(&strip_brackets(s))
}

/// Like `clean_text`, but an empty result becomes the missing sentinel.
pub fn clean_cell(s: &str) -> String {
    let t = clean_text(s);
    if t.is_empty() { s!(MISSING) } else { t }
}

pub fn is_missing(cell: &str) -> bool {
    cell == MISSING
}

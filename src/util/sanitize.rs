use regex::Regex;
use std::sync::LazyLock;

// CSI sequences (ESC [ ... cmd), the ones used for styling and cursor movement.
static CSI: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"\x1B\[[0-9;?]*[ -/]*[@-~]").ok());

// Remove ANSI escape sequences and non-printable control chars from text the
// API hands back. Line breaks and tabs become a single space each so a story
// stays on one line; everything else, spacing and length included, is kept.
pub fn strip_controls(s: &str) -> String {
    let no_ansi = match CSI.as_ref() {
        Some(r) => r.replace_all(s, "").into_owned(),
        None => s.to_string(),
    };

    no_ansi
        .chars()
        .filter_map(|ch| match ch {
            '\n' | '\r' | '\t' => Some(' '),
            c if c.is_control() => None,
            c => Some(c),
        })
        .collect()
}

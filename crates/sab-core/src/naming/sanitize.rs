//! Turn raw model output into a string that is safe as a file or folder name.

use std::sync::OnceLock;

use regex::Regex;

/// Longest generated file name (extension not included), in code points.
pub const FILE_NAME_MAX_LEN: usize = 50;
/// Longest generated folder name, in code points.
pub const FOLDER_NAME_MAX_LEN: usize = 30;

const QUOTES: [char; 3] = ['"', '\'', '`'];

static RESERVED_RE: OnceLock<Regex> = OnceLock::new();
static SEPARATOR_RE: OnceLock<Regex> = OnceLock::new();

fn reserved_re() -> &'static Regex {
    RESERVED_RE.get_or_init(|| Regex::new(r#"[<>:"/\\|?*]"#).expect("valid regex"))
}

fn separator_re() -> &'static Regex {
    SEPARATOR_RE.get_or_init(|| Regex::new(r"[\s_]+").expect("valid regex"))
}

/// Sanitize `raw` into a name of at most `max_len` code points.
///
/// Steps, in order: strip surrounding quotes and whitespace, replace
/// `< > : " / \ | ? *` with `_`, collapse whitespace/underscore runs into a
/// single `_`, trim edge underscores, truncate by code point.
///
/// The result may be empty, meaning the model gave nothing usable. Applying
/// this to its own output is a no-op.
pub fn sanitize_name(raw: &str, max_len: usize) -> String {
    let stripped = raw.trim_matches(|c: char| is_quote(c) || c.is_whitespace());
    let replaced = reserved_re().replace_all(stripped, "_");
    let collapsed = separator_re().replace_all(&replaced, "_");
    let trimmed = trim_edges(&collapsed);

    // A cut can land right after a separator; trim again so the output is a
    // fixed point.
    trim_edges(truncate_chars(trimmed, max_len)).to_string()
}

/// Longest prefix of `s` holding at most `max_chars` code points.
pub fn truncate_chars(s: &str, max_chars: usize) -> &str {
    match s.char_indices().nth(max_chars) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

fn trim_edges(s: &str) -> &str {
    s.trim_matches(|c: char| c == '_' || is_quote(c))
}

fn is_quote(c: char) -> bool {
    QUOTES.contains(&c)
}

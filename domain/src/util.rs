//! Shared text helpers.

/// Truncate a string to at most `max_bytes` without splitting a UTF-8
/// character.
pub fn truncate_str(s: &str, max_bytes: usize) -> &str {
    if s.len() <= max_bytes {
        return s;
    }
    let mut end = max_bytes;
    while end > 0 && !s.is_char_boundary(end) {
        end -= 1;
    }
    &s[..end]
}

/// Collapse all whitespace runs to single spaces and cut to `max_bytes`,
/// appending `...` when anything was dropped. Used for one-line previews of
/// questions and feedback in logs and history tables.
pub fn preview(s: &str, max_bytes: usize) -> String {
    let collapsed = s.split_whitespace().collect::<Vec<_>>().join(" ");
    let cut = truncate_str(&collapsed, max_bytes);
    if cut.len() < collapsed.len() {
        format!("{}...", cut.trim_end())
    } else {
        collapsed
    }
}

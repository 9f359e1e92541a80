//! Keeps player-typed text (pet names, and the messages that embed them) on a
//! single log line.

use std::fmt::Write;

/// Longest preview written to the log before truncating.
pub const MAX_PREVIEW: usize = 120;

/// Escape a string for single-line logging, truncated at [`MAX_PREVIEW`] chars.
pub fn escape_log(s: &str) -> String {
    escape_log_capped(s, MAX_PREVIEW)
}

/// Like [`escape_log`] with an explicit cap; anything past `max_chars` becomes `…`.
pub fn escape_log_capped(s: &str, max_chars: usize) -> String {
    let mut chars = s.chars();
    let mut out = chars
        .by_ref()
        .take(max_chars)
        .fold(String::with_capacity(s.len().min(max_chars)), |mut out, ch| {
            push_escaped(&mut out, ch);
            out
        });
    if chars.next().is_some() {
        out.push('…');
    }
    out
}

fn push_escaped(out: &mut String, ch: char) {
    match ch {
        '\\' | '\n' | '\r' | '\t' => out.extend(ch.escape_default()),
        c if c.is_control() => {
            let _ = write!(out, "\\x{:02X}", c as u32);
        }
        c => out.push(c),
    }
}

//! Log-file helpers: where run logs live, plain-text rendering, timestamps.
use std::path::PathBuf;

/// Timestamp written in the run header of each log file.
pub(super) const HEADER_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Timestamp prefixed to each log line.
pub(super) const LINE_TIME_FORMAT: &str = "%H:%M:%S";

/// Current UTC time rendered with a `chrono` format string.
pub(super) fn utc_now(format: &str) -> String {
    chrono::Utc::now().format(format).to_string()
}

/// Remove terminal escape sequences (`ESC [ ... final-byte`) from `s`.
pub(super) fn strip_ansi(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars().peekable();
    while let Some(c) = chars.next() {
        if c != '\x1b' {
            out.push(c);
            continue;
        }
        if chars.next_if_eq(&'[').is_some() {
            // take_while also consumes the final byte.
            chars
                .by_ref()
                .take_while(|b| !('@'..='~').contains(b))
                .for_each(drop);
        }
    }
    out
}

/// Log directory for this tool: `$XDG_CACHE_HOME/dotfiles`, falling back to
/// `~/.cache/dotfiles`.
fn log_dir() -> Option<PathBuf> {
    let cache = std::env::var_os("XDG_CACHE_HOME")
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
        .or_else(|| std::env::var_os("HOME").map(|home| PathBuf::from(home).join(".cache")))?;
    Some(cache.join("dotfiles"))
}

/// Path of the log file for `command`, creating its directory. `None` when
/// no cache location is known or it cannot be created.
pub(super) fn log_file_path(command: &str) -> Option<PathBuf> {
    let dir = log_dir()?;
    std::fs::create_dir_all(&dir).ok()?;
    Some(dir.join(format!("{command}.log")))
}

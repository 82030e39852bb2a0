// src/utils.rs
use std::path::{Path, PathBuf};

/// Lowercased extension of a file name, if it has one
pub fn file_extension(file_name: &str) -> Option<String> {
    Path::new(file_name)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase)
}

/// Case-insensitive extension check against a list like `["pdf", "docx"]`
pub fn has_extension(file_name: &str, allowed: &[&str]) -> bool {
    file_extension(file_name).is_some_and(|ext| allowed.contains(&ext.as_str()))
}

/// Shorten text to `max_chars` characters, appending an ellipsis when cut
pub fn truncate(text: &str, max_chars: usize) -> String {
    let single_line = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if single_line.chars().count() <= max_chars {
        return single_line;
    }

    let cut: String = single_line.chars().take(max_chars.saturating_sub(1)).collect();
    format!("{}…", cut.trim_end())
}

/// Turn text pasted by a file drop into a path.
///
/// Terminals paste dropped files as plain paths, sometimes quoted,
/// shell-escaped or as `file://` URIs. Only the first line is used.
pub fn parse_dropped_path(pasted: &str) -> Option<PathBuf> {
    let line = pasted.lines().map(str::trim).find(|l| !l.is_empty())?;

    let unquoted = line
        .strip_prefix('\'')
        .and_then(|l| l.strip_suffix('\''))
        .or_else(|| line.strip_prefix('"').and_then(|l| l.strip_suffix('"')))
        .unwrap_or(line);

    let without_scheme = unquoted.strip_prefix("file://").unwrap_or(unquoted);

    let mut path = String::with_capacity(without_scheme.len());
    let mut chars = without_scheme.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '\\' if chars.peek().is_some() => {
                if let Some(next) = chars.next() {
                    path.push(next);
                }
            }
            '%' => {
                let hex: String = chars.clone().take(2).collect();
                let decoded = (hex.len() == 2 && hex.chars().all(|c| c.is_ascii_hexdigit()))
                    .then(|| u8::from_str_radix(&hex, 16).ok())
                    .flatten();
                match decoded {
                    Some(byte) if byte.is_ascii() => {
                        path.push(byte as char);
                        chars.next();
                        chars.next();
                    }
                    _ => path.push('%'),
                }
            }
            _ => path.push(c),
        }
    }

    if path.is_empty() {
        None
    } else {
        Some(PathBuf::from(path))
    }
}

pub mod http;

use anyhow::{Context, Result};
use std::path::PathBuf;

pub fn ensure_dir(path: impl AsRef<std::path::Path>) -> Result<PathBuf> {
    let path = path.as_ref();
    std::fs::create_dir_all(path)
        .with_context(|| format!("Failed to create directory: {}", path.display()))?;
    Ok(path.to_path_buf())
}

pub fn get_gateway_home() -> Result<PathBuf> {
    if let Some(home) = std::env::var_os("SEJM_MCP_HOME") {
        return Ok(PathBuf::from(home));
    }
    Ok(dirs::home_dir()
        .context("Could not determine home directory")?
        .join(".sejm-gateway"))
}

/// Truncate a string to at most `max_chars` characters, appending `suffix`
/// (e.g. `"..."`) if truncated. Safe for multi-byte UTF-8.
pub fn truncate_chars(s: &str, max_chars: usize, suffix: &str) -> String {
    if s.chars().count() <= max_chars {
        return s.to_string();
    }
    match s.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => format!("{}{}", &s[..byte_idx], suffix),
        None => s.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_chars_leaves_short_strings_untouched() {
        assert_eq!(truncate_chars("hello", 10, "..."), "hello");
    }

    #[test]
    fn truncate_chars_appends_suffix_on_overflow() {
        assert_eq!(truncate_chars("hello world", 5, "..."), "hello...");
    }

    #[test]
    fn truncate_chars_is_utf8_safe() {
        let s = "ąćęłńóśźż".repeat(3);
        let truncated = truncate_chars(&s, 5, "...");
        assert!(truncated.ends_with("..."));
    }
}

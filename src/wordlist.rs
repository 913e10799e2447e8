// src/wordlist.rs
// =============================================================================
// Loads the wordlist file.
//
// Format: one path per line. Line endings (\n or \r\n) are stripped, blank
// lines are skipped, order and duplicates are preserved. Entries are used
// verbatim, we don't touch leading slashes or spaces inside a line.
// =============================================================================

use anyhow::{Context, Result};
use std::path::Path;

pub async fn read_wordlist(path: &Path) -> Result<Vec<String>> {
    let contents = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Could not read wordlist {}", path.display()))?;

    Ok(parse_wordlist(&contents))
}

pub fn parse_wordlist(contents: &str) -> Vec<String> {
    contents
        .lines()
        .map(|line| line.trim_end_matches('\r'))
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_strips_line_endings() {
        let words = parse_wordlist("admin\r\nlogin\nxyz123");
        assert_eq!(words, vec!["admin", "login", "xyz123"]);
    }

    #[test]
    fn test_parse_skips_blank_lines_and_keeps_order() {
        let words = parse_wordlist("b\n\na\n\nb\n");
        assert_eq!(words, vec!["b", "a", "b"]);
    }

    #[tokio::test]
    async fn test_read_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("words.txt");
        std::fs::write(&path, "admin\nlogin\n").unwrap();

        let words = read_wordlist(&path).await.unwrap();
        assert_eq!(words, vec!["admin", "login"]);
    }

    #[tokio::test]
    async fn test_missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = read_wordlist(&dir.path().join("nope.txt")).await.unwrap_err();
        assert!(err.to_string().contains("Could not read wordlist"));
    }
}

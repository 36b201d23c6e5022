//! Utility functions for string truncation, date formatting, and file system checks.

use chrono::{Datelike, NaiveDate};
use std::error::Error;
use std::fs as stdfs;
use tokio::fs;
use tracing::{info, instrument};

/// Spanish month names, indexed by `month - 1`.
const MONTHS: [&str; 12] = [
    "enero",
    "febrero",
    "marzo",
    "abril",
    "mayo",
    "junio",
    "julio",
    "agosto",
    "septiembre",
    "octubre",
    "noviembre",
    "diciembre",
];

/// Format a date as a long Spanish date for the page header.
///
/// # Examples
///
/// ```ignore
/// let date = NaiveDate::from_ymd_opt(2026, 8, 8).unwrap();
/// assert_eq!(format_long_date(date), "08 de agosto de 2026");
/// ```
pub fn format_long_date(date: NaiveDate) -> String {
    format!(
        "{:02} de {} de {}",
        date.day(),
        MONTHS[date.month0() as usize],
        date.year()
    )
}

/// Truncate a string to at most `max` characters, appending `"..."` only
/// when something was actually cut.
///
/// Counts Unicode scalar values, not bytes, so accented Spanish text is
/// never split mid-character. The ellipsis does not count against `max`.
pub fn truncate_chars(s: &str, max: usize) -> String {
    let mut chars = s.char_indices();
    match chars.nth(max) {
        None => s.to_string(),
        Some((cut, _)) => format!("{}...", &s[..cut]),
    }
}

/// Truncate a string for logging purposes.
///
/// Long strings are cut at `max` bytes with a byte count indicator appended.
pub fn truncate_for_log(s: &str, max: usize) -> String {
    if s.len() <= max {
        s.to_string()
    } else {
        format!("{}…(+{} bytes)", &s[..max], s.len() - max)
    }
}

/// Ensure a directory exists and is writable.
///
/// Creates the directory if needed, then performs a write test by creating
/// and immediately deleting a probe file.
///
/// # Errors
///
/// Returns an error if the directory cannot be created or is not writable
/// (permission denied, read-only filesystem, etc.).
#[instrument(level = "info", skip_all, fields(path = %path))]
pub async fn ensure_writable_dir(path: &str) -> Result<(), Box<dyn Error>> {
    if let Err(e) = fs::create_dir_all(path).await {
        return Err(Box::new(e));
    }
    // Small sync write using std fs (simpler error surface)
    let probe_path = format!("{}/..__probe_write__", path.trim_end_matches('/'));
    match stdfs::File::create(&probe_path) {
        Ok(_) => {
            let _ = stdfs::remove_file(&probe_path);
            info!("Output directory is writable");
            Ok(())
        }
        Err(e) => Err(Box::new(e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_long_date() {
        let date = NaiveDate::from_ymd_opt(2026, 8, 8).unwrap();
        assert_eq!(format_long_date(date), "08 de agosto de 2026");

        let date = NaiveDate::from_ymd_opt(2025, 12, 31).unwrap();
        assert_eq!(format_long_date(date), "31 de diciembre de 2025");

        let date = NaiveDate::from_ymd_opt(2026, 1, 1).unwrap();
        assert_eq!(format_long_date(date), "01 de enero de 2026");
    }

    #[test]
    fn test_truncate_chars_short_string() {
        assert_eq!(truncate_chars("hola", 10), "hola");
    }

    #[test]
    fn test_truncate_chars_exact_length() {
        assert_eq!(truncate_chars("abcde", 5), "abcde");
    }

    #[test]
    fn test_truncate_chars_long_string() {
        assert_eq!(truncate_chars("abcdefgh", 5), "abcde...");
    }

    #[test]
    fn test_truncate_chars_counts_characters_not_bytes() {
        // Each 'á' is two bytes; the cut must land on a char boundary.
        let s = "áááááá";
        assert_eq!(truncate_chars(s, 4), "áááá...");
        assert_eq!(truncate_chars(s, 6), s);
    }

    #[test]
    fn test_truncate_for_log_short_string() {
        assert_eq!(truncate_for_log("Hello, world!", 100), "Hello, world!");
    }

    #[test]
    fn test_truncate_for_log_long_string() {
        let s = "a".repeat(500);
        let result = truncate_for_log(&s, 100);
        assert!(result.starts_with(&"a".repeat(100)));
        assert!(result.contains("…(+400 bytes)"));
    }

    #[tokio::test]
    async fn test_ensure_writable_dir_creates_missing_dir() {
        let tmp = tempfile::tempdir().unwrap();
        let nested = tmp.path().join("a/b/c");
        ensure_writable_dir(nested.to_str().unwrap()).await.unwrap();
        assert!(nested.is_dir());
    }
}

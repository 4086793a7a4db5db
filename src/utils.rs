//! Utility functions for text handling and file system checks.
//!
//! This module provides helper functions used throughout the application:
//! - HTML escaping for text interpolated into the landing page
//! - Order-preserving deduplication of source names
//! - Decimal parsing that accepts full-width digits
//! - String truncation for logging
//! - File system validation for the output location

use itertools::Itertools;
use std::borrow::Cow;
use std::error::Error;
use std::fs as stdfs;
use std::path::Path;
use std::str::FromStr;
use tokio::fs;
use tracing::{info, instrument};

/// Escape text for safe interpolation into HTML element content or
/// attribute values.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(escape_html("A & B"), "A &amp; B");
/// assert_eq!(escape_html("plain"), "plain");
/// ```
pub fn escape_html(text: &str) -> Cow<'_, str> {
    quick_xml::escape::escape(text)
}

/// Remove repeated entries while keeping the first occurrence of each, in
/// their original order.
pub fn dedupe_preserving_order<I>(items: I) -> Vec<String>
where
    I: IntoIterator<Item = String>,
{
    items.into_iter().unique().collect()
}

/// Parse a run of ASCII (`0-9`) or full-width (`０-９`) decimal digits.
///
/// Patterns that capture counts and dates use `[0-9０-９]`, so every capture
/// they produce is accepted here unless it overflows `T`.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(parse_decimal::<u32>("１２"), Some(12));
/// assert_eq!(parse_decimal::<u8>("300"), None);
/// ```
pub fn parse_decimal<T: FromStr>(digits: &str) -> Option<T> {
    let ascii: String = digits
        .chars()
        .map(|c| match c {
            '０'..='９' => char::from(b'0' + (c as u32 - '０' as u32) as u8),
            _ => c,
        })
        .collect();
    if ascii.is_empty() || !ascii.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    ascii.parse().ok()
}

/// Truncate a string for logging purposes.
///
/// Long strings are cut at the last character boundary at or before `max`
/// bytes, with an ellipsis and byte count indicator appended.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(truncate_for_log("short", 100), "short");
/// assert_eq!(truncate_for_log(&"a".repeat(500), 10), "aaaaaaaaaa…(+490 bytes)");
/// ```
pub fn truncate_for_log(s: &str, max: usize) -> String {
    if s.len() <= max {
        return s.to_string();
    }
    let mut cut = max;
    while !s.is_char_boundary(cut) {
        cut -= 1;
    }
    format!("{}…(+{} bytes)", &s[..cut], s.len() - cut)
}

/// Ensure a directory exists and is writable.
///
/// This function creates the directory if it doesn't exist, then performs
/// a write test by creating and immediately deleting a scratch file.
///
/// # Errors
///
/// Returns an error if:
/// - The directory cannot be created
/// - The directory is not writable (permission denied, read-only filesystem, etc.)
#[instrument(level = "info", skip_all, fields(path = %path.display()))]
pub async fn ensure_writable_dir(path: &Path) -> Result<(), Box<dyn Error>> {
    fs::create_dir_all(path).await?;
    // Plain std fs for the write test; the error surface is simpler
    let scratch_path = path.join("..__write_test__");
    match stdfs::File::create(&scratch_path) {
        Ok(_) => {
            let _ = stdfs::remove_file(&scratch_path);
            info!("Output directory is writable");
            Ok(())
        }
        Err(e) => Err(Box::new(e)),
    }
}

//! Markdown post parser.
//!
//! Posts are the Markdown sources that issue pages are rendered from. A post
//! opens with a date line and a source summary, then lists articles as
//! `**source:title**` headings:
//!
//! ```text
//! 📅 **日期**:2025年5月6日
//! 📰 **来源**:3个公众号,共12篇文章
//!
//! ### **机器之心:大模型周报**
//! ```
//!
//! The card links to the rendered page `{YYYY-MM-DD}.html`, so a post is only
//! indexed once that page exists in the site directory.

use super::{IssueParser, ParseError, file_name_of, has_extension};
use crate::models::{Issue, IssueDate, SourceFormat};
use crate::utils::{dedupe_preserving_order, parse_decimal};
use once_cell::sync::Lazy;
use regex::Regex;
use std::path::{Path, PathBuf};
use tracing::debug;

static DATE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"📅 \*\*日期\*\*[:：]\s*([0-9０-９]{4})年([0-9０-９]{1,2})月([0-9０-９]{1,2})日")
        .unwrap()
});
static SUMMARY_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"📰 \*\*来源\*\*[:：]\s*([0-9０-９]+)个公众号[,，]\s*共([0-9０-９]+)篇文章").unwrap()
});
static SOURCE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\*\*([^:*]+):[^*]+?\*\*").unwrap());

/// Source names this long or longer are headings, not account names.
const MAX_SOURCE_NAME_CHARS: usize = 30;

/// Number of source tags shown on a Markdown issue card.
pub const MAX_PREVIEW_SOURCES: usize = 6;

/// Parser for Markdown posts (`*.md`).
#[derive(Debug, Clone)]
pub struct MarkdownIssueParser {
    /// Directory holding the rendered issue pages.
    site_dir: PathBuf,
}

impl MarkdownIssueParser {
    pub fn new(site_dir: impl Into<PathBuf>) -> Self {
        Self {
            site_dir: site_dir.into(),
        }
    }
}

impl IssueParser for MarkdownIssueParser {
    fn format(&self) -> SourceFormat {
        SourceFormat::Markdown
    }

    fn accepts(&self, path: &Path) -> bool {
        has_extension(path, "md")
    }

    fn parse(&self, path: &Path, content: &str) -> Result<Issue, ParseError> {
        let date = extract_date(content)?;

        let file_name = format!("{}.html", date.iso());
        if !self.site_dir.join(&file_name).is_file() {
            return Err(ParseError::IssuePageMissing { file_name });
        }

        let (source_count, article_count) = extract_summary(content)?.unwrap_or_else(|| {
            debug!(post = %file_name_of(path), "No source summary line; counting zero articles");
            (0, 0)
        });
        let sources = extract_sources(content);

        Ok(Issue {
            file_name,
            weekday: date.weekday_label().to_string(),
            date,
            article_count,
            source_count,
            sources,
            format: SourceFormat::Markdown,
        })
    }
}

fn extract_date(content: &str) -> Result<IssueDate, ParseError> {
    let caps = DATE_RE.captures(content).ok_or(ParseError::MissingDate)?;
    // At most four digits per field, so these never overflow.
    let year: i32 = parse_decimal(&caps[1]).ok_or(ParseError::MissingDate)?;
    let month: u32 = parse_decimal(&caps[2]).ok_or(ParseError::MissingDate)?;
    let day: u32 = parse_decimal(&caps[3]).ok_or(ParseError::MissingDate)?;
    IssueDate::from_ymd(year, month, day).ok_or(ParseError::InvalidDate { year, month, day })
}

/// Read `(source_count, article_count)` from the summary line.
///
/// Returns `Ok(None)` when the post has no summary line and an error when the
/// line is there but a count does not fit in `usize`.
fn extract_summary(content: &str) -> Result<Option<(usize, usize)>, ParseError> {
    let Some(caps) = SUMMARY_RE.captures(content) else {
        return Ok(None);
    };
    let invalid = || ParseError::InvalidSourceSummary {
        line: caps[0].to_string(),
    };
    let sources = parse_decimal(&caps[1]).ok_or_else(invalid)?;
    let articles = parse_decimal(&caps[2]).ok_or_else(invalid)?;
    Ok(Some((sources, articles)))
}

fn extract_sources(content: &str) -> Vec<String> {
    let names = SOURCE_RE
        .captures_iter(content)
        .map(|caps| caps[1].trim().to_string())
        .filter(|name| !name.is_empty() && name.chars().count() < MAX_SOURCE_NAME_CHARS);
    let mut sources = dedupe_preserving_order(names);
    sources.truncate(MAX_PREVIEW_SOURCES);
    sources
}

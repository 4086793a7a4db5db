//! Data models for digest issues and the landing page summary.
//!
//! This module defines the core data structures used throughout the application:
//! - [`Issue`]: Metadata recovered from one published digest document
//! - [`IssueDate`]: Calendar date of an issue with its Chinese display form
//! - [`SourceFormat`]: Whether an issue was read from HTML or Markdown
//! - [`IndexSummary`]: Aggregate statistics shown in the stats bar
//!
//! Issues are rebuilt from disk on every run and only live for one rendering
//! pass.

use chrono::{Datelike, NaiveDate, Weekday};
use serde::Serialize;
use std::fmt;

/// Chinese weekday characters, Monday first.
const WEEKDAY_LABELS: [&str; 7] = ["一", "二", "三", "四", "五", "六", "日"];

/// The kind of document an issue was parsed from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceFormat {
    /// A rendered issue page (`2025-05-06.html`).
    Html,
    /// A Markdown post whose rendered page lives in the site directory.
    Markdown,
}

impl fmt::Display for SourceFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceFormat::Html => write!(f, "html"),
            SourceFormat::Markdown => write!(f, "markdown"),
        }
    }
}

/// Publish date of an issue.
///
/// Displays as `2025年5月6日` (no zero padding) and orders chronologically,
/// so `2025年10月1日` sorts after `2025年9月30日`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct IssueDate(NaiveDate);

impl IssueDate {
    /// Build a date from its year, month and day, or `None` if the calendar
    /// has no such day.
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, day).map(IssueDate)
    }

    /// ISO form (`2025-05-06`), used for issue page file names.
    pub fn iso(&self) -> String {
        self.0.format("%Y-%m-%d").to_string()
    }

    /// Single-character Chinese weekday label (`一` for Monday ... `日` for Sunday).
    pub fn weekday_label(&self) -> &'static str {
        weekday_label(self.0.weekday())
    }
}

impl fmt::Display for IssueDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}年{}月{}日", self.0.year(), self.0.month(), self.0.day())
    }
}

/// Map a [`Weekday`] to its Chinese label.
pub fn weekday_label(weekday: Weekday) -> &'static str {
    WEEKDAY_LABELS[weekday.num_days_from_monday() as usize]
}

/// Metadata for one published digest issue.
///
/// One `Issue` becomes one card on the landing page.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Issue {
    /// File name of the issue page, relative to the index page.
    pub file_name: String,
    /// The publish date.
    pub date: IssueDate,
    /// Chinese weekday character, without the `星期` prefix.
    pub weekday: String,
    /// Number of articles collected in this issue.
    pub article_count: usize,
    /// Number of distinct sources the issue draws from.
    pub source_count: usize,
    /// Distinct source names in first-seen order.
    pub sources: Vec<String>,
    /// The document kind the issue was parsed from.
    pub format: SourceFormat,
}

/// Aggregate statistics shown at the top of the landing page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct IndexSummary {
    /// Number of issues on the page.
    pub total_issues: usize,
    /// Sum of article counts across all issues.
    pub total_articles: usize,
}

impl IndexSummary {
    pub fn from_issues(issues: &[Issue]) -> Self {
        Self {
            total_issues: issues.len(),
            total_articles: issues.iter().map(|i| i.article_count).sum(),
        }
    }
}

/// Sort issues newest first.
///
/// The sort is stable, so issues sharing a date keep their discovery order.
pub fn sort_newest_first(issues: &mut [Issue]) {
    issues.sort_by(|a, b| b.date.cmp(&a.date));
}

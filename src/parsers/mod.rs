//! Issue parsers for recovering metadata from digest documents.
//!
//! This module contains one submodule per document kind. Each parser follows
//! the same two-phase pattern:
//!
//! 1. **Discovery**: List the documents in a directory that the parser accepts
//! 2. **Extraction**: Read each document and pull out an [`Issue`]
//!
//! # Supported Formats
//!
//! | Format | Module | Input | Notes |
//! |--------|--------|-------|-------|
//! | HTML | [`html`] | Rendered issue pages | Date and weekday read from the `.date` block |
//! | Markdown | [`markdown`] | Markdown posts | Counts read from the header; page must already be rendered |
//!
//! # Failure Handling
//!
//! A document that cannot be read or does not carry the expected fields is
//! logged and skipped. One bad file never aborts the batch.

use crate::models::{Issue, SourceFormat};
use futures::stream::{self, StreamExt};
use std::error::Error;
use std::fmt;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, info, instrument, warn};

pub mod html;
pub mod markdown;

/// Reasons a document could not be turned into an [`Issue`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// No publish date in the expected form.
    MissingDate,
    /// A publish date was found but names a day the calendar does not have.
    InvalidDate { year: i32, month: u32, day: u32 },
    /// The date was found but its weekday marker was not.
    MissingWeekday,
    /// A Markdown source summary line is present but its counts do not fit.
    InvalidSourceSummary { line: String },
    /// The rendered page for a Markdown post is not in the site directory.
    IssuePageMissing { file_name: String },
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::MissingDate => write!(f, "no publish date found"),
            ParseError::InvalidDate { year, month, day } => {
                write!(f, "invalid publish date {}-{}-{}", year, month, day)
            }
            ParseError::MissingWeekday => write!(f, "no weekday found next to the publish date"),
            ParseError::InvalidSourceSummary { line } => {
                write!(f, "unreadable counts in source summary {:?}", line)
            }
            ParseError::IssuePageMissing { file_name } => {
                write!(f, "issue page {} has not been generated", file_name)
            }
        }
    }
}

impl Error for ParseError {}

/// A parser that turns one kind of digest document into an [`Issue`].
pub trait IssueParser {
    /// The document kind this parser reads.
    fn format(&self) -> SourceFormat;

    /// Whether the file at `path` is a document this parser should read.
    fn accepts(&self, path: &Path) -> bool;

    /// Extract issue metadata from a document's contents.
    ///
    /// # Arguments
    ///
    /// * `path` - Location of the document, used for the issue file name
    /// * `content` - The full text of the document
    fn parse(&self, path: &Path, content: &str) -> Result<Issue, ParseError>;
}

/// Return the file name component of `path` as an owned string.
pub(crate) fn file_name_of(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Whether `path` has the extension `ext` (case-insensitive).
pub(crate) fn has_extension(path: &Path, ext: &str) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case(ext))
}

/// List the documents in `dir` that `parser` accepts.
///
/// Only regular files directly inside `dir` are considered. The result is
/// sorted by path so runs are reproducible.
///
/// # Errors
///
/// Returns an error if `dir` cannot be read.
#[instrument(level = "info", skip_all, fields(dir = %dir.display(), format = %parser.format()))]
pub async fn discover(
    dir: &Path,
    parser: &dyn IssueParser,
) -> Result<Vec<PathBuf>, Box<dyn Error>> {
    let mut entries = fs::read_dir(dir).await?;
    let mut paths = Vec::new();

    while let Some(entry) = entries.next_entry().await? {
        let path = entry.path();
        if !entry.file_type().await?.is_file() {
            continue;
        }
        if parser.accepts(&path) {
            paths.push(path);
        }
    }
    paths.sort();

    info!(count = paths.len(), "Discovered issue documents");
    debug!(paths = ?paths, "Issue documents");
    Ok(paths)
}

/// Read and parse every document in `paths`, one after another.
///
/// Documents that cannot be read or parsed are logged and skipped.
///
/// # Returns
///
/// The successfully parsed issues, in the order of `paths`.
#[instrument(level = "info", skip_all, fields(format = %parser.format()))]
pub async fn parse_files(paths: &[PathBuf], parser: &dyn IssueParser) -> Vec<Issue> {
    let issues: Vec<Issue> = stream::iter(paths)
        .then(|path| async move {
            info!(file = %file_name_of(path), "Parsing issue");
            match parse_file(path, parser).await {
                Ok(issue) => {
                    debug!(file = %issue.file_name, date = %issue.date, "Parsed issue");
                    Some(issue)
                }
                Err(e) => {
                    warn!(
                        path = %path.display(),
                        error = %e,
                        "Skipping unparseable issue document"
                    );
                    None
                }
            }
        })
        .filter_map(std::future::ready)
        .collect()
        .await;

    info!(
        parsed = issues.len(),
        skipped = paths.len() - issues.len(),
        "Finished parsing issue documents"
    );
    issues
}

/// Read a single document and hand it to `parser`.
async fn parse_file(path: &Path, parser: &dyn IssueParser) -> Result<Issue, Box<dyn Error>> {
    let content = fs::read_to_string(path).await?;
    Ok(parser.parse(path, &content)?)
}

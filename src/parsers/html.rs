//! Rendered HTML issue parser.
//!
//! Issue pages are the published digests themselves. Each carries a date
//! block, one card per article, and a source label on every card:
//!
//! ```html
//! <div class="date">2025年5月6日 星期二</div>
//! <div class="article-card">
//!     ...
//!     <span>📱 机器之心</span>
//! </div>
//! ```
//!
//! The landing page lives next to the issue pages, so `index.html` is never
//! treated as an issue.

use super::{IssueParser, ParseError, file_name_of, has_extension};
use crate::models::{Issue, IssueDate, SourceFormat};
use crate::utils::{dedupe_preserving_order, parse_decimal, truncate_for_log};
use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use std::path::Path;
use tracing::{debug, warn};

static DATE_SELECTOR: Lazy<Selector> = Lazy::new(|| Selector::parse("div.date").unwrap());
static ARTICLE_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("div.article-card").unwrap());
static SPAN_SELECTOR: Lazy<Selector> = Lazy::new(|| Selector::parse("span").unwrap());

static DATE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"([0-9０-９]{4})年([0-9０-９]{1,2})月([0-9０-９]{1,2})日(?:\s+星期([一二三四五六日]))?")
        .unwrap()
});

/// Marker that prefixes a source name in an article card.
const SOURCE_MARKER: &str = "📱 ";

/// Parser for rendered issue pages (`*.html`).
#[derive(Debug, Default, Clone, Copy)]
pub struct HtmlIssueParser;

impl IssueParser for HtmlIssueParser {
    fn format(&self) -> SourceFormat {
        SourceFormat::Html
    }

    fn accepts(&self, path: &Path) -> bool {
        has_extension(path, "html") && !file_name_of(path).eq_ignore_ascii_case("index.html")
    }

    fn parse(&self, path: &Path, content: &str) -> Result<Issue, ParseError> {
        let document = Html::parse_document(content);
        let (date, weekday) = extract_date(&document)?;

        if weekday != date.weekday_label() {
            warn!(
                file = %file_name_of(path),
                %date,
                weekday = %weekday,
                expected = date.weekday_label(),
                "Weekday label does not match the publish date; keeping the page's label"
            );
        }

        let article_count = document.select(&ARTICLE_SELECTOR).count();
        let sources = extract_sources(&document);
        debug!(article_count, sources = ?sources, "Extracted issue fields");

        Ok(Issue {
            file_name: file_name_of(path),
            date,
            weekday,
            article_count,
            source_count: sources.len(),
            sources,
            format: SourceFormat::Html,
        })
    }
}

/// Find the first `.date` block that holds a well-formed date and weekday.
fn extract_date(document: &Html) -> Result<(IssueDate, String), ParseError> {
    for element in document.select(&DATE_SELECTOR) {
        let text = element_text(&element);
        let Some(caps) = DATE_RE.captures(&text) else {
            debug!(text = %truncate_for_log(&text, 80), "Date block did not match");
            continue;
        };

        // At most four digits per field, so these never overflow.
        let year: i32 = parse_decimal(&caps[1]).ok_or(ParseError::MissingDate)?;
        let month: u32 = parse_decimal(&caps[2]).ok_or(ParseError::MissingDate)?;
        let day: u32 = parse_decimal(&caps[3]).ok_or(ParseError::MissingDate)?;

        let date = IssueDate::from_ymd(year, month, day)
            .ok_or(ParseError::InvalidDate { year, month, day })?;
        let weekday = caps
            .get(4)
            .map(|m| m.as_str().to_string())
            .ok_or(ParseError::MissingWeekday)?;
        return Ok((date, weekday));
    }
    Err(ParseError::MissingDate)
}

/// Collect source names from bare `<span>📱 name</span>` labels.
///
/// Spans carrying attributes (such as the landing page's preview tags) are
/// ignored.
fn extract_sources(document: &Html) -> Vec<String> {
    let names = document
        .select(&SPAN_SELECTOR)
        .filter(|span| span.value().attrs().next().is_none())
        .filter_map(|span| {
            let text = element_text(&span);
            text.strip_prefix(SOURCE_MARKER)
                .map(|name| name.trim().to_string())
        })
        .filter(|name| !name.is_empty());
    dedupe_preserving_order(names)
}

fn element_text(element: &ElementRef<'_>) -> String {
    element.text().collect::<String>()
}

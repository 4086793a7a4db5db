//! The end-to-end index build: discover, parse, sort, render, write.
//!
//! [`generate_index`] stitches together the high-level steps. Each step logs
//! what it did; conditions that leave nothing to index end the run early
//! without touching the output file.

use crate::cli::{Cli, InputFormat};
use crate::config::SiteConfig;
use crate::models::{IndexSummary, sort_newest_first};
use crate::outputs::{index_page, json};
use crate::parsers::html::HtmlIssueParser;
use crate::parsers::markdown::MarkdownIssueParser;
use crate::parsers::{self, IssueParser};
use std::error::Error;
use tracing::{error, info, instrument, warn};

/// Why a run finished without writing anything.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Skipped {
    /// The input directory does not exist.
    MissingInputDir,
    /// The input directory holds no documents of the chosen kind.
    NoDocuments,
    /// Documents were found but none of them parsed.
    NothingParsed,
}

/// Result of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The landing page was written.
    Written(IndexSummary),
    /// Nothing was written.
    Skipped(Skipped),
}

/// Build the landing page described by `args`.
///
/// # Errors
///
/// Returns an error if the arguments are inconsistent, the configuration
/// cannot be loaded, the input directory cannot be listed, or an output file
/// cannot be written. Individual documents that fail to parse are skipped.
#[instrument(level = "info", skip_all, fields(site_dir = %args.site_dir.display(), format = ?args.format))]
pub async fn generate_index(args: &Cli) -> Result<Outcome, Box<dyn Error>> {
    let config = SiteConfig::load(args.config.as_deref()).await?;

    let Some(input_dir) = args.input_dir() else {
        error!("Markdown input needs a posts directory (--posts-dir)");
        return Err("--posts-dir is required with --format markdown".into());
    };

    let parser: Box<dyn IssueParser> = match args.format {
        InputFormat::Html => Box::new(HtmlIssueParser),
        InputFormat::Markdown => Box::new(MarkdownIssueParser::new(&args.site_dir)),
    };

    if !input_dir.is_dir() {
        error!(dir = %input_dir.display(), "Input directory does not exist");
        return Ok(Outcome::Skipped(Skipped::MissingInputDir));
    }

    let paths = parsers::discover(&input_dir, parser.as_ref()).await?;
    if paths.is_empty() {
        warn!(dir = %input_dir.display(), "No issue documents found");
        return Ok(Outcome::Skipped(Skipped::NoDocuments));
    }
    info!(count = paths.len(), "Found issue documents, parsing");

    let mut issues = parsers::parse_files(&paths, parser.as_ref()).await;
    if issues.is_empty() {
        warn!(found = paths.len(), "No issue document could be parsed");
        return Ok(Outcome::Skipped(Skipped::NothingParsed));
    }

    sort_newest_first(&mut issues);
    let summary = IndexSummary::from_issues(&issues);
    info!(
        issues = summary.total_issues,
        articles = summary.total_articles,
        "Parsed issues"
    );

    let html = index_page::render_index(&issues, &config)?;
    let output_path = args.output_path();
    index_page::write_index_page(&output_path, &html).await?;
    info!(path = %output_path.display(), "Generated landing page");

    if let Some(json_path) = &args.json_output {
        json::write_manifest(&issues, json_path).await?;
    }

    for issue in &issues {
        info!(
            date = %issue.date,
            weekday = %issue.weekday,
            articles = issue.article_count,
            file = %issue.file_name,
            "Indexed issue"
        );
    }

    Ok(Outcome::Written(summary))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use std::path::Path;

    fn issue_page(date: &str, weekday: &str, sources: &[&str]) -> String {
        let cards: String = sources
            .iter()
            .map(|s| format!("<div class=\"article-card\"><span>📱 {}</span></div>\n", s))
            .collect();
        format!(
            "<html><body><div class=\"date\">{} 星期{}</div>\n{}</body></html>",
            date, weekday, cards
        )
    }

    fn cli(args: &[&str]) -> Cli {
        let mut full = vec!["digest_index"];
        full.extend_from_slice(args);
        Cli::parse_from(full)
    }

    fn site_arg(dir: &Path) -> String {
        dir.to_string_lossy().into_owned()
    }

    #[tokio::test]
    async fn test_html_site_end_to_end() {
        let tmp = tempfile::tempdir().unwrap();
        let site = tmp.path();
        std::fs::write(
            site.join("2025-09-30.html"),
            issue_page("2025年9月30日", "二", &["机器之心", "量子位", "机器之心"]),
        )
        .unwrap();
        std::fs::write(
            site.join("2025-10-01.html"),
            issue_page("2025年10月1日", "三", &["新智元"]),
        )
        .unwrap();
        std::fs::write(site.join("broken.html"), "<html>draft</html>").unwrap();
        std::fs::write(site.join("index.html"), "stale").unwrap();

        let json_path = site.join("issues.json");
        let args = cli(&["-s", &site_arg(site), "--json-output", &site_arg(&json_path)]);
        let outcome = generate_index(&args).await.unwrap();

        assert_eq!(
            outcome,
            Outcome::Written(IndexSummary { total_issues: 2, total_articles: 4 })
        );

        let html = std::fs::read_to_string(site.join("index.html")).unwrap();
        assert_eq!(html.matches("class=\"daily-card\"").count(), 2);
        let newer = html.find("href=\"2025-10-01.html\"").unwrap();
        let older = html.find("href=\"2025-09-30.html\"").unwrap();
        assert!(newer < older);
        assert!(!html.contains("broken.html"));

        let manifest: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&json_path).unwrap()).unwrap();
        assert_eq!(manifest["issues"][0]["file_name"], "2025-10-01.html");
        assert_eq!(manifest["issues"][1]["source_count"], 2);
    }

    #[tokio::test]
    async fn test_markdown_posts_end_to_end() {
        let tmp = tempfile::tempdir().unwrap();
        let site = tmp.path().join("site");
        let posts = tmp.path().join("posts");
        std::fs::create_dir_all(&site).unwrap();
        std::fs::create_dir_all(&posts).unwrap();
        std::fs::write(site.join("2025-05-06.html"), "<html></html>").unwrap();
        std::fs::write(
            posts.join("a.md"),
            "📅 **日期**:2025年5月6日\n📰 **来源**:2个公众号,共9篇文章\n**量子位:标题**\n",
        )
        .unwrap();
        // rendered page not generated yet
        std::fs::write(
            posts.join("b.md"),
            "📅 **日期**:2025年5月7日\n📰 **来源**:1个公众号,共3篇文章\n",
        )
        .unwrap();

        let args = cli(&[
            "-s",
            &site_arg(&site),
            "-f",
            "markdown",
            "-p",
            &site_arg(&posts),
        ]);
        let outcome = generate_index(&args).await.unwrap();
        assert_eq!(
            outcome,
            Outcome::Written(IndexSummary { total_issues: 1, total_articles: 9 })
        );

        let html = std::fs::read_to_string(site.join("index.html")).unwrap();
        assert!(html.contains("<div class=\"daily-weekday\">星期二</div>"));
        assert!(html.contains("📱 量子位"));
    }

    #[tokio::test]
    async fn test_no_documents_writes_nothing() {
        let tmp = tempfile::tempdir().unwrap();
        std::fs::write(tmp.path().join("index.html"), "stale").unwrap();

        let args = cli(&["-s", &site_arg(tmp.path())]);
        let outcome = generate_index(&args).await.unwrap();

        assert_eq!(outcome, Outcome::Skipped(Skipped::NoDocuments));
        assert_eq!(std::fs::read_to_string(tmp.path().join("index.html")).unwrap(), "stale");
    }

    #[tokio::test]
    async fn test_nothing_parsed_writes_nothing() {
        let tmp = tempfile::tempdir().unwrap();
        std::fs::write(tmp.path().join("draft.html"), "<p>no date</p>").unwrap();

        let args = cli(&["-s", &site_arg(tmp.path())]);
        let outcome = generate_index(&args).await.unwrap();

        assert_eq!(outcome, Outcome::Skipped(Skipped::NothingParsed));
        assert!(!tmp.path().join("index.html").exists());
    }

    #[tokio::test]
    async fn test_missing_site_dir() {
        let tmp = tempfile::tempdir().unwrap();
        let args = cli(&["-s", &site_arg(&tmp.path().join("missing"))]);
        let outcome = generate_index(&args).await.unwrap();
        assert_eq!(outcome, Outcome::Skipped(Skipped::MissingInputDir));
    }

    #[tokio::test]
    async fn test_markdown_missing_posts_dir() {
        let tmp = tempfile::tempdir().unwrap();
        let posts = tmp.path().join("posts");
        let args = cli(&[
            "-s",
            &site_arg(tmp.path()),
            "-f",
            "markdown",
            "-p",
            &site_arg(&posts),
        ]);

        let outcome = generate_index(&args).await.unwrap();

        assert_eq!(outcome, Outcome::Skipped(Skipped::MissingInputDir));
        assert!(!tmp.path().join("index.html").exists());
    }

    #[tokio::test]
    async fn test_markdown_posts_dir_without_posts() {
        let tmp = tempfile::tempdir().unwrap();
        let posts = tmp.path().join("posts");
        std::fs::create_dir_all(&posts).unwrap();
        // rendered pages are not posts
        std::fs::write(posts.join("2025-05-06.html"), "<html></html>").unwrap();
        std::fs::write(tmp.path().join("2025-05-06.html"), "<html></html>").unwrap();
        let args = cli(&[
            "-s",
            &site_arg(tmp.path()),
            "-f",
            "markdown",
            "-p",
            &site_arg(&posts),
        ]);

        let outcome = generate_index(&args).await.unwrap();

        assert_eq!(outcome, Outcome::Skipped(Skipped::NoDocuments));
        assert!(!tmp.path().join("index.html").exists());
    }

    #[tokio::test]
    async fn test_markdown_without_posts_dir_is_error() {
        let tmp = tempfile::tempdir().unwrap();
        let args = cli(&["-s", &site_arg(tmp.path()), "-f", "markdown"]);
        assert!(generate_index(&args).await.is_err());
    }
}

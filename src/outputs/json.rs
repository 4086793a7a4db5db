//! JSON manifest of the indexed issues.
//!
//! The manifest mirrors the landing page: the same summary numbers and the
//! same issues in the same order, for consumers that want the data without
//! scraping the page.
//!
//! ```json
//! {
//!   "summary": { "total_issues": 2, "total_articles": 7 },
//!   "issues": [ { "file_name": "2025-05-07.html", "date": "2025-05-07", ... } ]
//! }
//! ```

use crate::models::{IndexSummary, Issue};
use serde::Serialize;
use std::error::Error;
use std::path::Path;
use tokio::fs;
use tracing::{error, info, instrument};

#[derive(Debug, Serialize)]
struct Manifest<'a> {
    summary: IndexSummary,
    issues: &'a [Issue],
}

/// Serialize `issues` and their summary as pretty-printed JSON.
pub fn manifest_json(issues: &[Issue]) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&Manifest {
        summary: IndexSummary::from_issues(issues),
        issues,
    })
}

/// Write the manifest for `issues` to `path`.
///
/// The parent directory is created if it doesn't exist.
#[instrument(level = "info", skip_all, fields(path = %path.display()))]
pub async fn write_manifest(issues: &[Issue], path: &Path) -> Result<(), Box<dyn Error>> {
    let json = manifest_json(issues)?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        if let Err(e) = fs::create_dir_all(parent).await {
            error!(dir = %parent.display(), error = %e, "Failed to create manifest dir");
            return Err(e.into());
        }
    }

    fs::write(path, json).await?;
    info!(count = issues.len(), "Wrote JSON manifest");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{IssueDate, SourceFormat};

    fn sample() -> Vec<Issue> {
        let date = IssueDate::from_ymd(2025, 5, 6).unwrap();
        vec![Issue {
            file_name: "2025-05-06.html".to_string(),
            date,
            weekday: "二".to_string(),
            article_count: 12,
            source_count: 1,
            sources: vec!["机器之心".to_string()],
            format: SourceFormat::Markdown,
        }]
    }

    #[test]
    fn test_manifest_shape() {
        let json = manifest_json(&sample()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["summary"]["total_issues"], 1);
        assert_eq!(value["summary"]["total_articles"], 12);
        assert_eq!(value["issues"][0]["date"], "2025-05-06");
        assert_eq!(value["issues"][0]["weekday"], "二");
        assert_eq!(value["issues"][0]["format"], "markdown");
        assert_eq!(value["issues"][0]["sources"][0], "机器之心");
    }

    #[tokio::test]
    async fn test_write_manifest() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("api").join("issues.json");
        write_manifest(&sample(), &path).await.unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.contains("\"total_articles\": 12"));
    }
}

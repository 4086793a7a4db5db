//! Landing page rendering.
//!
//! The landing page is a single self-contained HTML document:
//!
//! - a header with the site title and subtitle
//! - a stats bar with the number of issues and the total article count
//! - one card per issue, newest first, linking to the issue page
//! - a footer
//!
//! The stylesheet lives in `index.css` and is embedded at compile time.

use crate::config::SiteConfig;
use crate::models::{IndexSummary, Issue};
use crate::utils::{ensure_writable_dir, escape_html};
use std::error::Error;
use std::fmt::{self, Write};
use std::path::Path;
use tokio::fs;
use tracing::{info, instrument};

const STYLESHEET: &str = include_str!("index.css");

/// Render the complete landing page for `issues`.
///
/// Issues are rendered in the order given; callers sort them beforehand.
///
/// # Arguments
///
/// * `issues` - The parsed issues, newest first
/// * `config` - Site title, labels and footer text
pub fn render_index(issues: &[Issue], config: &SiteConfig) -> Result<String, fmt::Error> {
    let summary = IndexSummary::from_issues(issues);
    let mut html = String::new();

    write_head(&mut html, config)?;
    write_header(&mut html, config)?;

    writeln!(html, "    <div class=\"container\">")?;
    write_stats_bar(&mut html, &summary, config)?;
    writeln!(
        html,
        "        <div class=\"section-title\">{}</div>\n",
        escape_html(&config.section_title)
    )?;

    for (i, issue) in issues.iter().enumerate() {
        if i > 0 {
            writeln!(html)?;
        }
        write_card(&mut html, issue)?;
    }

    writeln!(html, "    </div>\n")?;
    writeln!(html, "    <div class=\"footer\">")?;
    writeln!(html, "        <p>{}</p>", escape_html(&config.footer))?;
    writeln!(html, "    </div>")?;
    writeln!(html, "</body>")?;
    write!(html, "</html>")?;

    Ok(html)
}

fn write_head(html: &mut String, config: &SiteConfig) -> fmt::Result {
    writeln!(html, "<!DOCTYPE html>")?;
    writeln!(html, "<html lang=\"{}\">", escape_html(&config.lang))?;
    writeln!(html, "<head>")?;
    writeln!(html, "    <meta charset=\"UTF-8\">")?;
    writeln!(
        html,
        "    <meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">"
    )?;
    writeln!(html, "    <title>{} - 首页</title>", escape_html(&config.title))?;
    writeln!(html, "    <style>")?;
    for line in STYLESHEET.lines() {
        if line.is_empty() {
            writeln!(html)?;
        } else {
            writeln!(html, "        {}", line)?;
        }
    }
    writeln!(html, "    </style>")?;
    writeln!(html, "</head>")?;
    writeln!(html, "<body>")
}

fn write_header(html: &mut String, config: &SiteConfig) -> fmt::Result {
    writeln!(html, "    <div class=\"header\">")?;
    writeln!(html, "        <div class=\"header-content\">")?;
    writeln!(html, "            <h1>📰 {}</h1>", escape_html(&config.title))?;
    writeln!(
        html,
        "            <div class=\"subtitle\">{}</div>",
        escape_html(&config.subtitle)
    )?;
    writeln!(html, "        </div>")?;
    writeln!(html, "    </div>\n")
}

fn write_stats_bar(html: &mut String, summary: &IndexSummary, config: &SiteConfig) -> fmt::Result {
    writeln!(html, "        <div class=\"stats-bar\">")?;
    write_stat(html, &summary.total_issues.to_string(), "已发布期数")?;
    write_stat(html, &summary.total_articles.to_string(), "精选文章")?;
    write_stat(html, &escape_html(&config.status_text), "更新状态")?;
    writeln!(html, "        </div>\n")
}

fn write_stat(html: &mut String, value: &str, label: &str) -> fmt::Result {
    writeln!(html, "            <div class=\"stat-item\">")?;
    writeln!(html, "                <div class=\"stat-number\">{}</div>", value)?;
    writeln!(html, "                <div class=\"stat-label\">{}</div>", label)?;
    writeln!(html, "            </div>")
}

/// Render one issue card.
fn write_card(html: &mut String, issue: &Issue) -> fmt::Result {
    let href = urlencoding::encode(&issue.file_name);
    let tags: String = issue
        .sources
        .iter()
        .map(|source| format!("<span class=\"preview-tag\">📱 {}</span>", escape_html(source)))
        .collect();

    writeln!(html, "        <a href=\"{}\" class=\"daily-card\">", href)?;
    writeln!(html, "            <div class=\"daily-header\">")?;
    writeln!(html, "                <div class=\"daily-date\">")?;
    writeln!(html, "                    <span class=\"icon\">📅</span>")?;
    writeln!(html, "                    <span>{}</span>", issue.date)?;
    writeln!(html, "                </div>")?;
    writeln!(
        html,
        "                <div class=\"daily-weekday\">星期{}</div>",
        escape_html(&issue.weekday)
    )?;
    writeln!(html, "            </div>")?;
    writeln!(html, "            <div class=\"daily-meta\">")?;
    writeln!(html, "                <div class=\"meta-item\">")?;
    writeln!(html, "                    <span class=\"emoji\">📝</span>")?;
    writeln!(
        html,
        "                    <span>共 <span class=\"number\">{}</span> 篇文章</span>",
        issue.article_count
    )?;
    writeln!(html, "                </div>")?;
    writeln!(html, "                <div class=\"meta-item\">")?;
    writeln!(html, "                    <span class=\"emoji\">🏢</span>")?;
    writeln!(html, "                    <span>{} 个公众号</span>", issue.source_count)?;
    writeln!(html, "                </div>")?;
    writeln!(html, "            </div>")?;
    writeln!(html, "            <div class=\"daily-preview\">")?;
    writeln!(html, "                {}", tags)?;
    writeln!(html, "            </div>")?;
    writeln!(html, "            <div class=\"daily-footer\">")?;
    writeln!(html, "                <span class=\"read-btn\">查看本期日报</span>")?;
    writeln!(html, "            </div>")?;
    writeln!(html, "        </a>")
}

/// Write the rendered page to `path`, creating its directory if needed.
#[instrument(level = "info", skip_all, fields(path = %path.display()))]
pub async fn write_index_page(path: &Path, html: &str) -> Result<(), Box<dyn Error>> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        ensure_writable_dir(parent).await?;
    }
    fs::write(path, html).await?;
    info!(bytes = html.len(), "Wrote index page");
    Ok(())
}

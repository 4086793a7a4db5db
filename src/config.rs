//! Site configuration for the landing page.
//!
//! Every field has a default, so the configuration file is optional and may
//! override only the strings it cares about:
//!
//! ```yaml
//! title: "AI 公众号日报"
//! footer: "© 2025 AI 公众号日报"
//! ```

use serde::Deserialize;
use std::error::Error;
use std::path::Path;
use tokio::fs;
use tracing::{info, instrument};

/// Text shown on the landing page around the issue cards.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// `lang` attribute of the `<html>` element.
    pub lang: String,
    /// Page title, used for `<title>` and the header.
    pub title: String,
    /// Line under the header title.
    pub subtitle: String,
    /// Heading above the list of issues.
    pub section_title: String,
    /// Value of the third stats-bar cell.
    pub status_text: String,
    /// Footer line.
    pub footer: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            lang: "zh-CN".to_string(),
            title: "蹊涯AI：公众号日报".to_string(),
            subtitle: "精选优质公众号文章，每日为您呈现".to_string(),
            section_title: "最新日报".to_string(),
            status_text: "持续更新".to_string(),
            footer: "蹊涯AI：公众号日报 © 2025 - 精选优质内容，分享知识价值".to_string(),
        }
    }
}

impl SiteConfig {
    /// Parse a configuration from YAML text.
    pub fn from_yaml(text: &str) -> Result<Self, serde_yaml::Error> {
        // An empty document deserializes as unit, not as a map
        if text.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(text)
    }

    /// Load the configuration at `path`, or the defaults when no path is given.
    #[instrument(level = "info", skip_all)]
    pub async fn load(path: Option<&Path>) -> Result<Self, Box<dyn Error>> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let text = fs::read_to_string(path).await?;
        let config = Self::from_yaml(&text)?;
        info!(path = %path.display(), title = %config.title, "Loaded site configuration");
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_override_keeps_defaults() {
        let config = SiteConfig::from_yaml("title: Weekly Digest\nlang: en\n").unwrap();
        assert_eq!(config.title, "Weekly Digest");
        assert_eq!(config.lang, "en");
        assert_eq!(config.section_title, SiteConfig::default().section_title);
    }

    #[test]
    fn test_empty_document_is_default() {
        assert_eq!(SiteConfig::from_yaml("").unwrap(), SiteConfig::default());
        assert_eq!(SiteConfig::from_yaml("  \n").unwrap(), SiteConfig::default());
    }

    #[test]
    fn test_unknown_key_is_rejected() {
        assert!(SiteConfig::from_yaml("titel: typo\n").is_err());
    }

    #[tokio::test]
    async fn test_load_without_path() {
        assert_eq!(SiteConfig::load(None).await.unwrap(), SiteConfig::default());
    }

    #[tokio::test]
    async fn test_load_from_file() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("site.yaml");
        std::fs::write(&path, "footer: \"© 2026\"\n").unwrap();
        let config = SiteConfig::load(Some(&path)).await.unwrap();
        assert_eq!(config.footer, "© 2026");
    }

    #[tokio::test]
    async fn test_load_missing_file_is_error() {
        let tmp = tempfile::tempdir().unwrap();
        assert!(SiteConfig::load(Some(&tmp.path().join("missing.yaml"))).await.is_err());
    }
}

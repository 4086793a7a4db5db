//! Command-line interface definitions for the digest index generator.
//!
//! This module defines the CLI arguments and options using the `clap` crate.
//! Every option has a default or can be provided via an environment variable,
//! so running the binary with no arguments indexes `./src`.

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Which kind of document to read issues from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum InputFormat {
    /// Rendered issue pages in the site directory
    Html,
    /// Markdown posts in `--posts-dir`, linked to their rendered pages
    Markdown,
}

/// Command-line arguments for the digest index generator.
///
/// # Examples
///
/// ```sh
/// # Index the rendered pages in ./src and write ./src/index.html
/// digest_index
///
/// # Index Markdown posts, linking to pages already rendered into ./site
/// digest_index -s ./site -f markdown -p ./posts_content
///
/// # Custom titles and a JSON manifest
/// digest_index -c site.yaml --json-output ./site/issues.json
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Directory holding the issue pages; the index is written here
    #[arg(short, long, env = "DIGEST_SITE_DIR", default_value = "src")]
    pub site_dir: PathBuf,

    /// Kind of document to read issues from
    #[arg(short, long, env = "DIGEST_FORMAT", value_enum, default_value_t = InputFormat::Html)]
    pub format: InputFormat,

    /// Directory of Markdown posts (required with `--format markdown`)
    #[arg(short, long, env = "DIGEST_POSTS_DIR")]
    pub posts_dir: Option<PathBuf>,

    /// Output path for the landing page (defaults to `<site-dir>/index.html`)
    #[arg(short, long, env = "DIGEST_OUTPUT")]
    pub output: Option<PathBuf>,

    /// Optional path to a YAML site configuration
    #[arg(short, long, env = "DIGEST_CONFIG")]
    pub config: Option<PathBuf>,

    /// Also write a JSON manifest of the issues to this path
    #[arg(long, env = "DIGEST_JSON_OUTPUT")]
    pub json_output: Option<PathBuf>,
}

impl Cli {
    /// Where the landing page is written.
    pub fn output_path(&self) -> PathBuf {
        self.output
            .clone()
            .unwrap_or_else(|| self.site_dir.join("index.html"))
    }

    /// Directory the issue documents are read from.
    ///
    /// Returns `None` for Markdown input without a posts directory.
    pub fn input_dir(&self) -> Option<PathBuf> {
        match self.format {
            InputFormat::Html => Some(self.site_dir.clone()),
            InputFormat::Markdown => self.posts_dir.clone(),
        }
    }
}

//! Shared test utilities for the blogsmith test suite.
//!
//! Provides a fixed build date, fixture writers, and a metadata constructor
//! for tests that exercise the index and sitemap without parsing files.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let tmp = setup_site(&[("hello.md", "---\ntitle: Hello\n---\nBody")]);
//! let article = write_article(&tmp.path().join("articles"), "more.md", "text");
//!
//! let mut articles = vec![meta("a", "2024-01-01"), meta("b", "2024-02-01")];
//! ```

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use crate::config::SiteConfig;
use crate::dates::ArticleDate;
use crate::types::ArticleMetadata;
use chrono::NaiveDate;

// =========================================================================
// Fixture setup
// =========================================================================

/// The build date every test pretends it is: 2024-01-15.
pub fn fixed_today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, 15).unwrap()
}

/// Write a Markdown file into `dir` (created if needed) and return its path.
pub fn write_article(dir: &Path, name: &str, content: &str) -> PathBuf {
    fs::create_dir_all(dir).unwrap();
    let path = dir.join(name);
    fs::write(&path, content).unwrap();
    path
}

/// A temp project root with the given files in `articles/`.
pub fn setup_site(articles: &[(&str, &str)]) -> TempDir {
    let tmp = TempDir::new().unwrap();
    let dir = tmp.path().join("articles");
    fs::create_dir_all(&dir).unwrap();
    for (name, content) in articles {
        write_article(&dir, name, content);
    }
    tmp
}

// =========================================================================
// Metadata
// =========================================================================

/// Metadata with `title == slug` and every other field at its default.
pub fn meta(slug: &str, date: &str) -> ArticleMetadata {
    ArticleMetadata {
        slug: slug.to_string(),
        title: slug.to_string(),
        description: String::new(),
        date: ArticleDate::parse(date).unwrap(),
        author: SiteConfig::default().author,
        tags: Vec::new(),
        image: None,
        source: PathBuf::from(format!("{slug}.md")),
    }
}

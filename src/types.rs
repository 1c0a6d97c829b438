//! Types shared between the article, index and sitemap builders.

use crate::dates::ArticleDate;
use std::path::PathBuf;

/// Metadata of one built article.
///
/// Produced by [`ArticleBuilder::build_one`](crate::article::ArticleBuilder::build_one)
/// with all defaults applied; consumed by the index and sitemap builders.
#[derive(Debug, Clone, PartialEq)]
pub struct ArticleMetadata {
    /// Output file stem and URL segment: `articles/<slug>.html`.
    pub slug: String,
    pub title: String,
    pub description: String,
    pub date: ArticleDate,
    pub author: String,
    pub tags: Vec<String>,
    /// Site-relative image path, e.g. `Photo/cover.jpg`.
    pub image: Option<String>,
    /// Markdown file the article was built from.
    pub source: PathBuf,
}

//! Sitemap generation.
//!
//! ```xml
//! <?xml version="1.0" encoding="UTF-8"?>
//! <urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
//!   <url>
//!     <loc>https://example.com/</loc>
//!     <lastmod>2025-01-01</lastmod>
//!     <changefreq>monthly</changefreq>
//!     <priority>1.0</priority>
//!   </url>
//! </urlset>
//! ```
//!
//! The site root and the blog index come first, then one entry per article
//! in the order given. Article URLs are built from slugs as they are; no URL
//! escaping is applied.

use crate::config::SiteConfig;
use crate::types::ArticleMetadata;
use chrono::NaiveDate;
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

const SITEMAP_NS: &str = "http://www.sitemaps.org/schemas/sitemap/0.9";

#[derive(Error, Debug)]
#[error("failed to write sitemap {path}: {source}")]
pub struct SitemapError {
    pub path: PathBuf,
    pub source: io::Error,
}

/// `<changefreq>` values from the sitemap protocol.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeFreq {
    Always,
    Hourly,
    Daily,
    Weekly,
    Monthly,
    Yearly,
    Never,
}

impl ChangeFreq {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Always => "always",
            Self::Hourly => "hourly",
            Self::Daily => "daily",
            Self::Weekly => "weekly",
            Self::Monthly => "monthly",
            Self::Yearly => "yearly",
            Self::Never => "never",
        }
    }
}

impl fmt::Display for ChangeFreq {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Single `<url>` entry.
#[derive(Debug, Clone, PartialEq)]
pub struct UrlEntry {
    pub loc: String,
    pub lastmod: String,
    pub changefreq: ChangeFreq,
    /// Between 0.0 and 1.0.
    pub priority: f32,
}

/// Entries for the whole site: two fixed pages plus every article.
///
/// `today` is the `lastmod` of the fixed pages.
pub fn url_entries(
    config: &SiteConfig,
    articles: &[ArticleMetadata],
    today: NaiveDate,
) -> Vec<UrlEntry> {
    let today = today.format("%Y-%m-%d").to_string();

    let mut urls = Vec::with_capacity(articles.len() + 2);
    urls.push(UrlEntry {
        loc: format!("{}/", config.base_url),
        lastmod: today.clone(),
        changefreq: ChangeFreq::Monthly,
        priority: 1.0,
    });
    urls.push(UrlEntry {
        loc: format!("{}/{}", config.base_url, config.index_href()),
        lastmod: today,
        changefreq: ChangeFreq::Weekly,
        priority: 0.8,
    });
    urls.extend(articles.iter().map(|article| UrlEntry {
        loc: config.article_url(&article.slug),
        lastmod: article.date.raw.clone(),
        changefreq: ChangeFreq::Monthly,
        priority: 0.7,
    }));
    urls
}

/// Serialize entries as a sitemap `urlset` document.
pub fn to_xml(urls: &[UrlEntry]) -> String {
    let entries = urls
        .iter()
        .map(|url| {
            format!(
                "  <url>\n    <loc>{}</loc>\n    <lastmod>{}</lastmod>\n    <changefreq>{}</changefreq>\n    <priority>{:.1}</priority>\n  </url>",
                url.loc, url.lastmod, url.changefreq, url.priority
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<urlset xmlns=\"{SITEMAP_NS}\">\n{entries}\n</urlset>"
    )
}

/// Write the sitemap for `articles` to `path`, replacing any previous file.
pub fn build_sitemap(
    config: &SiteConfig,
    articles: &[ArticleMetadata],
    today: NaiveDate,
    path: &Path,
) -> Result<usize, SitemapError> {
    let urls = url_entries(config, articles, today);
    fs::write(path, to_xml(&urls)).map_err(|source| SitemapError {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(urls.len())
}

//! Site configuration.
//!
//! Settings live in an optional `blog.toml` in the working directory. The
//! file is sparse: its values are merged on top of the stock defaults, so a
//! blog only spells out what differs.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! base_url = "https://zxinnattapat3.github.io"
//! author = "Nattapat Phungphugdee"   # Used when an article has no author
//! locale = "th"                      # Date display locale: "th" or "en"
//! default_og_image = "Photo/DSCF2374.jpg"
//! read_more_label = "อ่านต่อ →"
//!
//! [paths]
//! articles_dir = "articles"          # Markdown sources
//! output_dir = "articles"            # Rendered article pages
//! template_dir = "templates"         # article.html, blog-index.html
//! index_file = "blog.html"
//! sitemap_file = "sitemap.xml"
//!
//! [images]
//! photo_dir = "Photo"                # Source tree for --optimize-images
//! optimized_dir = "optimized"        # Subdirectory of photo_dir
//! quality = 80                       # 1-100
//! max_width = 1920
//! max_height = 1920
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use crate::dates::DisplayLocale;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Component, Path, PathBuf};
use thiserror::Error;

/// File name looked up in the project root.
pub const CONFIG_FILENAME: &str = "blog.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Blog configuration loaded from `blog.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// Absolute site URL without trailing slash.
    pub base_url: String,
    /// Author used when front matter has none.
    pub author: String,
    /// Locale for human-readable dates.
    pub locale: DisplayLocale,
    /// Open-graph image (relative to `base_url`) for articles without one.
    pub default_og_image: String,
    /// Link label at the bottom of every index preview.
    pub read_more_label: String,
    pub paths: PathsConfig,
    pub images: ImagesConfig,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            base_url: "https://zxinnattapat3.github.io".to_string(),
            author: "Nattapat Phungphugdee".to_string(),
            locale: DisplayLocale::Th,
            default_og_image: "Photo/DSCF2374.jpg".to_string(),
            read_more_label: "อ่านต่อ →".to_string(),
            paths: PathsConfig::default(),
            images: ImagesConfig::default(),
        }
    }
}

impl SiteConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.base_url.is_empty() {
            return Err(ConfigError::Validation("base_url must not be empty".into()));
        }
        if self.base_url.ends_with('/') {
            return Err(ConfigError::Validation(
                "base_url must not end with '/'".into(),
            ));
        }
        if !(1..=100).contains(&self.images.quality) {
            return Err(ConfigError::Validation(
                "images.quality must be 1-100".into(),
            ));
        }
        if self.images.max_width == 0 || self.images.max_height == 0 {
            return Err(ConfigError::Validation(
                "images.max_width and images.max_height must be non-zero".into(),
            ));
        }
        for (name, path) in [
            ("paths.output_dir", &self.paths.output_dir),
            ("paths.index_file", &self.paths.index_file),
        ] {
            if path
                .components()
                .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir))
            {
                return Err(ConfigError::Validation(format!(
                    "{name} must be a relative path inside the project root"
                )));
            }
        }
        if self.images.optimized_dir.is_empty() {
            return Err(ConfigError::Validation(
                "images.optimized_dir must not be empty".into(),
            ));
        }
        Ok(())
    }

    /// Root-relative link to a rendered article, e.g. `articles/hello.html`.
    pub fn article_href(&self, slug: &str) -> String {
        let dir = url_path(&self.paths.output_dir);
        if dir.is_empty() {
            format!("{slug}.html")
        } else {
            format!("{dir}/{slug}.html")
        }
    }

    /// Root-relative link to the blog index.
    pub fn index_href(&self) -> String {
        url_path(&self.paths.index_file)
    }

    /// Canonical URL of a rendered article.
    pub fn article_url(&self, slug: &str) -> String {
        format!("{}/{}", self.base_url, self.article_href(slug))
    }

    /// Prefix that leads from an article page back to the site root.
    pub fn article_root_prefix(&self) -> String {
        root_prefix(&self.paths.output_dir)
    }

    /// Prefix that leads from the index page back to the site root.
    pub fn index_root_prefix(&self) -> String {
        root_prefix(self.paths.index_file.parent().unwrap_or(Path::new("")))
    }
}

/// Join the normal components of a relative path with `/`.
///
/// `.` segments vanish, so `./posts/` becomes `posts`.
fn url_path(path: &Path) -> String {
    path.components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part.to_string_lossy()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}

/// One `../` per directory level of `dir`.
fn root_prefix(dir: &Path) -> String {
    dir.components()
        .filter(|c| matches!(c, Component::Normal(_)))
        .map(|_| "../")
        .collect()
}

/// Input and output locations, relative to the project root.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PathsConfig {
    pub articles_dir: PathBuf,
    pub output_dir: PathBuf,
    pub template_dir: PathBuf,
    pub index_file: PathBuf,
    pub sitemap_file: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            articles_dir: "articles".into(),
            output_dir: "articles".into(),
            template_dir: "templates".into(),
            index_file: "blog.html".into(),
            sitemap_file: "sitemap.xml".into(),
        }
    }
}

/// Settings for the `--optimize-images` mode.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ImagesConfig {
    pub photo_dir: PathBuf,
    /// Output subtree, created inside `photo_dir` and skipped when walking it.
    pub optimized_dir: String,
    pub quality: u32,
    pub max_width: u32,
    pub max_height: u32,
}

impl Default for ImagesConfig {
    fn default() -> Self {
        Self {
            photo_dir: "Photo".into(),
            optimized_dir: "optimized".to_string(),
            quality: 80,
            max_width: 1920,
            max_height: 1920,
        }
    }
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
fn stock_defaults_value() -> Result<toml::Value, ConfigError> {
    toml::Value::try_from(SiteConfig::default())
        .map_err(|e| ConfigError::Validation(format!("default config must serialize: {e}")))
}

/// Recursively merge `overlay` on top of `base`.
///
/// Tables merge key by key; any other overlay value replaces the base value.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Parse config text and merge it over the defaults.
pub fn parse_config(content: &str) -> Result<SiteConfig, ConfigError> {
    let overlay: toml::Value = toml::from_str(content)?;
    let merged = merge_toml(stock_defaults_value()?, overlay);
    let config: SiteConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load `blog.toml` from `root`, or the defaults when it does not exist.
pub fn load_config(root: &Path) -> Result<SiteConfig, ConfigError> {
    let config_path = root.join(CONFIG_FILENAME);
    if !config_path.exists() {
        return Ok(SiteConfig::default());
    }
    let content = fs::read_to_string(&config_path)?;
    parse_config(&content)
}

//! Article pages.
//!
//! One Markdown file becomes one `<output_dir>/<slug>.html`. Building is two
//! steps so the orchestrator can reject a duplicate slug before anything is
//! overwritten:
//!
//! 1. [`ArticleBuilder::parse`]: read, split front matter, apply defaults.
//! 2. [`ArticleBuilder::write`]: render Markdown, fill the `article`
//!    template, write the page.
//!
//! [`ArticleBuilder::build_one`] runs both.
//!
//! ## Defaults
//!
//! | Key | Default |
//! |---|---|
//! | `title` | `Untitled` |
//! | `description` | empty |
//! | `date` | build date |
//! | `author` | `SiteConfig::author` |
//! | `tags` | none |
//! | `image` | none |
//! | `slug` | filename stem |

use crate::config::SiteConfig;
use crate::dates::ArticleDate;
use crate::frontmatter::{self, FrontMatterError};
use crate::markdown;
use crate::template::{self, TemplateError, TemplateStore, escape_html, tag_badges};
use crate::types::ArticleMetadata;
use chrono::NaiveDate;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const DEFAULT_TITLE: &str = "Untitled";

#[derive(Error, Debug)]
pub enum ArticleError {
    #[error("failed to read {path}: {source}")]
    Read { path: PathBuf, source: io::Error },
    #[error("invalid front matter in {path}: {source}")]
    FrontMatter {
        path: PathBuf,
        source: FrontMatterError,
    },
    #[error("invalid date '{value}' in {path}")]
    InvalidDate { path: PathBuf, value: String },
    #[error("cannot derive a slug from {0}")]
    NoSlug(PathBuf),
    #[error("slug '{slug}' in {path} must be a plain file name")]
    InvalidSlug { path: PathBuf, slug: String },
    #[error(transparent)]
    Template(#[from] TemplateError),
    #[error("failed to write {path}: {source}")]
    Write { path: PathBuf, source: io::Error },
}

/// A parsed article waiting to be rendered.
#[derive(Debug, Clone)]
pub struct Article {
    pub meta: ArticleMetadata,
    pub body: String,
}

/// Builds article pages into one output directory.
pub struct ArticleBuilder<'a> {
    config: &'a SiteConfig,
    output_dir: &'a Path,
    today: NaiveDate,
}

impl<'a> ArticleBuilder<'a> {
    /// `today` is the date given to articles without one.
    pub fn new(config: &'a SiteConfig, output_dir: &'a Path, today: NaiveDate) -> Self {
        Self {
            config,
            output_dir,
            today,
        }
    }

    /// Parse, render and write one article.
    pub fn build_one(
        &self,
        templates: &mut TemplateStore,
        path: &Path,
    ) -> Result<ArticleMetadata, ArticleError> {
        let article = self.parse(path)?;
        self.write(templates, &article)?;
        Ok(article.meta)
    }

    /// Read a Markdown file and resolve its metadata.
    pub fn parse(&self, path: &Path) -> Result<Article, ArticleError> {
        let content = fs::read_to_string(path).map_err(|source| ArticleError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let doc = frontmatter::parse(&content).map_err(|source| ArticleError::FrontMatter {
            path: path.to_path_buf(),
            source,
        })?;
        let fm = doc.front_matter;

        let date = match fm.date {
            Some(value) => {
                ArticleDate::parse(&value).ok_or_else(|| ArticleError::InvalidDate {
                    path: path.to_path_buf(),
                    value,
                })?
            }
            None => ArticleDate::from_date(self.today),
        };

        let slug = match fm.slug {
            Some(slug) => slug,
            None => path
                .file_stem()
                .map(|s| s.to_string_lossy().to_string())
                .filter(|s| !s.is_empty())
                .ok_or_else(|| ArticleError::NoSlug(path.to_path_buf()))?,
        };
        if !is_plain_slug(&slug) {
            return Err(ArticleError::InvalidSlug {
                path: path.to_path_buf(),
                slug,
            });
        }

        Ok(Article {
            meta: ArticleMetadata {
                slug,
                title: fm.title.unwrap_or_else(|| DEFAULT_TITLE.to_string()),
                description: fm.description.unwrap_or_default(),
                date,
                author: fm.author.unwrap_or_else(|| self.config.author.clone()),
                tags: fm.tags,
                image: fm.image,
                source: path.to_path_buf(),
            },
            body: doc.body,
        })
    }

    /// Render `article` and write it to `<output_dir>/<slug>.html`.
    ///
    /// Returns the written path.
    pub fn write(
        &self,
        templates: &mut TemplateStore,
        article: &Article,
    ) -> Result<PathBuf, ArticleError> {
        let html = self.render(templates, article)?;
        let path = self.output_path(&article.meta.slug);
        fs::write(&path, html).map_err(|source| ArticleError::Write {
            path: path.clone(),
            source,
        })?;
        Ok(path)
    }

    pub fn output_path(&self, slug: &str) -> PathBuf {
        self.output_dir.join(format!("{slug}.html"))
    }

    /// Fill the `article` template for one article.
    pub fn render(
        &self,
        templates: &mut TemplateStore,
        article: &Article,
    ) -> Result<String, ArticleError> {
        let meta = &article.meta;
        let content = markdown::render(&article.body);
        let template = templates.get_or_default(template::ARTICLE, template::DEFAULT_ARTICLE)?;

        let title = escape_html(&meta.title);
        let image_html = match &meta.image {
            Some(image) => format!(
                r#"<img src="{}{}" alt="{}" class="article-image">"#,
                self.config.article_root_prefix(),
                escape_html(image),
                title
            ),
            None => String::new(),
        };
        let og_image = format!(
            "{}/{}",
            self.config.base_url,
            escape_html(meta.image.as_deref().unwrap_or(&self.config.default_og_image))
        );
        let canonical = self.config.article_url(&meta.slug);

        Ok(template.render(&[
            ("title", title.as_str()),
            ("description", escape_html(&meta.description).as_str()),
            ("date", meta.date.display(self.config.locale).as_str()),
            ("author", escape_html(&meta.author).as_str()),
            ("tags", tag_badges(&meta.tags).as_str()),
            ("image", image_html.as_str()),
            ("ogImage", og_image.as_str()),
            ("content", content.as_str()),
            ("slug", escape_html(&meta.slug).as_str()),
            ("canonical", escape_html(&canonical).as_str()),
        ]))
    }
}

/// A slug names one file inside the output directory and nothing else.
fn is_plain_slug(slug: &str) -> bool {
    !slug.trim().is_empty()
        && slug != "."
        && slug != ".."
        && !slug.contains(['/', '\\'])
}

//! Blog index page.
//!
//! Lists every article newest first inside the `blog-index` template's
//! `{{articles}}` slot. Articles with the same date keep their input order.

use crate::config::SiteConfig;
use crate::template::{self, TemplateError, TemplateStore, escape_html, tag_badges};
use crate::types::ArticleMetadata;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum IndexError {
    #[error(transparent)]
    Template(#[from] TemplateError),
    #[error("failed to write {path}: {source}")]
    Write { path: PathBuf, source: io::Error },
}

/// Stable sort, newest first. Sorts in place.
pub fn sort_newest_first(articles: &mut [ArticleMetadata]) {
    articles.sort_by(|a, b| b.date.date.cmp(&a.date.date));
}

/// One `<article class="article-preview">` block.
///
/// Links are relative to the index page, wherever `paths.index_file` puts it.
fn render_preview(config: &SiteConfig, article: &ArticleMetadata) -> String {
    let title = escape_html(&article.title);
    let to_root = config.index_root_prefix();
    let href = escape_html(&format!("{to_root}{}", config.article_href(&article.slug)));
    let image = match &article.image {
        Some(src) => format!(
            r#"<img src="{to_root}{}" alt="{}" class="preview-image">"#,
            escape_html(src),
            title
        ),
        None => String::new(),
    };

    format!(
        r#"
    <article class="article-preview">
      <h2><a href="{href}">{title}</a></h2>
      <div class="article-meta">
        <span class="date">{date}</span>
        <span class="author">{author}</span>
      </div>
      {image}
      <p class="description">{description}</p>
      <div class="tags">{tags}</div>
      <a href="{href}" class="read-more">{read_more}</a>
    </article>
  "#,
        date = article.date.display(config.locale),
        author = escape_html(&article.author),
        description = escape_html(&article.description),
        tags = tag_badges(&article.tags),
        read_more = escape_html(&config.read_more_label),
    )
}

/// Sort `articles` and render the full index page.
pub fn render_index(
    config: &SiteConfig,
    templates: &mut TemplateStore,
    articles: &mut [ArticleMetadata],
) -> Result<String, IndexError> {
    sort_newest_first(articles);
    let list = articles
        .iter()
        .map(|a| render_preview(config, a))
        .collect::<Vec<_>>()
        .join("\n");
    let template = templates.get_or_default(template::BLOG_INDEX, template::DEFAULT_BLOG_INDEX)?;
    Ok(template.render(&[("articles", list.as_str())]))
}

/// Render the index and write it to `path`, replacing any previous file.
pub fn build_index(
    config: &SiteConfig,
    templates: &mut TemplateStore,
    articles: &mut [ArticleMetadata],
    path: &Path,
) -> Result<(), IndexError> {
    let html = render_index(config, templates, articles)?;
    fs::write(path, html).map_err(|source| IndexError::Write {
        path: path.to_path_buf(),
        source,
    })
}

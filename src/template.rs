//! HTML templates with `{{name}}` placeholders.
//!
//! Templates are read from `<template_dir>/<name>.html`. When a file is
//! missing the caller falls back to one of the defaults embedded at compile
//! time from `static/`. A [`TemplateStore`] memoizes every template it loads:
//! once a name resolves, later lookups return the same content without
//! touching the filesystem, even if the file changes on disk.
//!
//! Substitution is a single literal pass. Values are never re-scanned, so an
//! article whose text contains `{{title}}` renders that text verbatim.

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const ARTICLE: &str = "article";
pub const BLOG_INDEX: &str = "blog-index";

pub const DEFAULT_ARTICLE: &str = include_str!("../static/article.html");
pub const DEFAULT_BLOG_INDEX: &str = include_str!("../static/blog-index.html");

#[derive(Error, Debug)]
pub enum TemplateError {
    #[error("failed to read template {path}: {source}")]
    Read { path: PathBuf, source: io::Error },
}

/// Template text containing `{{name}}` tokens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template(String);

impl Template {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Replace every `{{name}}` whose name appears in `values`.
    ///
    /// Tokens without a value are left untouched.
    pub fn render(&self, values: &[(&str, &str)]) -> String {
        let src = self.0.as_str();
        let mut out = String::with_capacity(src.len() + values.iter().map(|(_, v)| v.len()).sum::<usize>());
        let mut rest = src;

        while let Some(start) = rest.find("{{") {
            out.push_str(&rest[..start]);
            let after_open = &rest[start + 2..];
            match after_open.find("}}") {
                Some(end) => {
                    let name = &after_open[..end];
                    match values.iter().find(|(key, _)| *key == name) {
                        Some((_, value)) => out.push_str(value),
                        None => out.push_str(&rest[start..start + 2 + end + 2]),
                    }
                    rest = &after_open[end + 2..];
                }
                None => {
                    out.push_str(&rest[start..]);
                    rest = "";
                }
            }
        }
        out.push_str(rest);
        out
    }
}

/// Loads templates by name and caches them for the store's lifetime.
#[derive(Debug)]
pub struct TemplateStore {
    dir: PathBuf,
    cache: HashMap<String, Template>,
}

impl TemplateStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            cache: HashMap::new(),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Look up `<name>.html`.
    ///
    /// `Ok(None)` when the file does not exist; an error when it exists but
    /// cannot be read.
    pub fn get(&mut self, name: &str) -> Result<Option<Template>, TemplateError> {
        if let Some(cached) = self.cache.get(name) {
            return Ok(Some(cached.clone()));
        }

        let path = self.dir.join(format!("{name}.html"));
        let text = match fs::read_to_string(&path) {
            Ok(text) => text,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(source) => return Err(TemplateError::Read { path, source }),
        };

        let template = Template::new(text);
        self.cache.insert(name.to_string(), template.clone());
        Ok(Some(template))
    }

    /// Like [`get`](Self::get) but falls back to `default` for a missing file.
    pub fn get_or_default(&mut self, name: &str, default: &str) -> Result<Template, TemplateError> {
        Ok(self.get(name)?.unwrap_or_else(|| Template::new(default)))
    }

    /// Forget every cached template.
    pub fn clear(&mut self) {
        self.cache.clear();
    }
}

/// Escape the five HTML-reserved characters.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#039;"),
            _ => out.push(c),
        }
    }
    out
}

/// `<span class="tag">` badges, concatenated without separators.
pub fn tag_badges(tags: &[String]) -> String {
    tags.iter()
        .map(|tag| format!(r#"<span class="tag">{}</span>"#, escape_html(tag)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn render_replaces_every_occurrence() {
        let t = Template::new("<h1>{{title}}</h1><title>{{title}}</title>");
        assert_eq!(
            t.render(&[("title", "Hi")]),
            "<h1>Hi</h1><title>Hi</title>"
        );
    }

    #[test]
    fn render_is_literal() {
        // `$1` and regex metacharacters must come through unchanged.
        let t = Template::new("{{content}}");
        assert_eq!(t.render(&[("content", "$1 .* \\d")]), "$1 .* \\d");
    }

    #[test]
    fn render_does_not_rescan_values() {
        let t = Template::new("{{content}} by {{author}}");
        let out = t.render(&[("content", "literally {{author}}"), ("author", "Jane")]);
        assert_eq!(out, "literally {{author}} by Jane");
    }

    #[test]
    fn unknown_tokens_are_kept() {
        let t = Template::new("{{known}} {{unknown}} {{");
        assert_eq!(t.render(&[("known", "k")]), "k {{unknown}} {{");
    }

    #[test]
    fn store_returns_none_for_missing_file() {
        let tmp = TempDir::new().unwrap();
        let mut store = TemplateStore::new(tmp.path());
        assert!(store.get(ARTICLE).unwrap().is_none());
    }

    #[test]
    fn store_caches_first_read() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("article.html");
        fs::write(&path, "first {{title}}").unwrap();

        let mut store = TemplateStore::new(tmp.path());
        let first = store.get(ARTICLE).unwrap().unwrap();

        fs::write(&path, "second {{title}}").unwrap();
        let again = store.get(ARTICLE).unwrap().unwrap();
        assert_eq!(first, again);
        assert_eq!(again.as_str(), "first {{title}}");

        // Survives deletion too: the cache never looks back at disk.
        fs::remove_file(&path).unwrap();
        assert!(store.get(ARTICLE).unwrap().is_some());
    }

    #[test]
    fn clear_forces_reload() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("article.html");
        fs::write(&path, "first").unwrap();

        let mut store = TemplateStore::new(tmp.path());
        store.get(ARTICLE).unwrap();
        fs::write(&path, "second").unwrap();
        store.clear();
        assert_eq!(store.get(ARTICLE).unwrap().unwrap().as_str(), "second");
    }

    #[test]
    fn unreadable_template_is_an_error() {
        let tmp = TempDir::new().unwrap();
        // A directory where a file is expected cannot be read as text.
        fs::create_dir(tmp.path().join("article.html")).unwrap();
        let mut store = TemplateStore::new(tmp.path());
        let err = store.get(ARTICLE).unwrap_err();
        assert!(matches!(err, TemplateError::Read { .. }));
    }

    #[test]
    fn get_or_default_falls_back() {
        let tmp = TempDir::new().unwrap();
        let mut store = TemplateStore::new(tmp.path());
        let t = store.get_or_default(BLOG_INDEX, DEFAULT_BLOG_INDEX).unwrap();
        assert!(t.as_str().contains("{{articles}}"));
    }

    #[test]
    fn embedded_article_template_has_every_token() {
        for token in [
            "{{title}}",
            "{{description}}",
            "{{date}}",
            "{{author}}",
            "{{tags}}",
            "{{image}}",
            "{{ogImage}}",
            "{{content}}",
            "{{slug}}",
            "{{canonical}}",
        ] {
            assert!(DEFAULT_ARTICLE.contains(token), "missing {token}");
        }
    }

    #[test]
    fn escape_html_covers_reserved_characters() {
        assert_eq!(
            escape_html(r#"<a href="x">Tom & 'Jerry'</a>"#),
            "&lt;a href=&quot;x&quot;&gt;Tom &amp; &#039;Jerry&#039;&lt;/a&gt;"
        );
        assert_eq!(escape_html("ภาษาไทย"), "ภาษาไทย");
    }

    #[test]
    fn tag_badges_escape_and_concatenate() {
        let tags = vec!["rust".to_string(), "<b>".to_string()];
        assert_eq!(
            tag_badges(&tags),
            r#"<span class="tag">rust</span><span class="tag">&lt;b&gt;</span>"#
        );
    }
}

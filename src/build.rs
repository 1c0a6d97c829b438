//! Whole-site builds.
//!
//! A [`Site`] owns the configuration and the template cache for one project
//! root. [`Site::build_once`] runs the full pipeline:
//!
//! ```text
//! articles/*.md ──► parse all ──► reject duplicate slugs ──► write pages
//!                                                              │
//!                               blog.html ◄── sort ◄───────────┤
//!                             sitemap.xml ◄────────────────────┘
//! ```
//!
//! Every article is parsed before any page is written, so malformed input or
//! a slug collision aborts the build with the previous output still intact.

use crate::article::{ArticleBuilder, ArticleError};
use crate::config::{self, ConfigError, SiteConfig};
use crate::dates;
use crate::index::{self, IndexError};
use crate::optimize::{BatchReport, ImageOptimizer, OptimizeOptions, optimize_tree};
use crate::sitemap::{self, SitemapError};
use crate::template::TemplateStore;
use crate::types::ArticleMetadata;
use chrono::NaiveDate;
use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use thiserror::Error;
use tracing::{debug, info, warn};

#[derive(Error, Debug)]
pub enum BuildError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Article(#[from] ArticleError),
    #[error(transparent)]
    Index(#[from] IndexError),
    #[error(transparent)]
    Sitemap(#[from] SitemapError),
    #[error("IO error on {path}: {source}")]
    Io { path: PathBuf, source: io::Error },
    #[error("duplicate slug '{slug}': {first} and {second}")]
    DuplicateSlug {
        slug: String,
        first: PathBuf,
        second: PathBuf,
    },
}

/// One written article page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuiltPage {
    pub slug: String,
    pub title: String,
    pub path: PathBuf,
}

/// Outcome of one successful build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildReport {
    /// Article pages in source order.
    pub pages: Vec<BuiltPage>,
    /// `<url>` entries in the sitemap; zero when nothing was written.
    pub sitemap_entries: usize,
    /// `None` when there were no articles and the index was left alone.
    pub index_path: Option<PathBuf>,
    pub sitemap_path: Option<PathBuf>,
    pub elapsed: Duration,
}

impl BuildReport {
    pub fn article_count(&self) -> usize {
        self.pages.len()
    }
}

/// A blog project rooted at one directory.
#[derive(Debug)]
pub struct Site {
    root: PathBuf,
    config: SiteConfig,
    templates: TemplateStore,
    /// Fixed build date; the local date when `None`.
    today: Option<NaiveDate>,
}

impl Site {
    pub fn new(root: impl Into<PathBuf>, config: SiteConfig) -> Self {
        let root = root.into();
        let templates = TemplateStore::new(root.join(&config.paths.template_dir));
        Self {
            root,
            config,
            templates,
            today: None,
        }
    }

    /// Load `blog.toml` (if any) from `root`.
    pub fn load(root: impl Into<PathBuf>) -> Result<Self, BuildError> {
        let root = root.into();
        let config = config::load_config(&root)?;
        Ok(Self::new(root, config))
    }

    /// Pin the build date used for undated articles and sitemap `lastmod`.
    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.today = Some(today);
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn config(&self) -> &SiteConfig {
        &self.config
    }

    pub fn articles_dir(&self) -> PathBuf {
        self.root.join(&self.config.paths.articles_dir)
    }

    pub fn output_dir(&self) -> PathBuf {
        self.root.join(&self.config.paths.output_dir)
    }

    pub fn index_path(&self) -> PathBuf {
        self.root.join(&self.config.paths.index_file)
    }

    pub fn sitemap_path(&self) -> PathBuf {
        self.root.join(&self.config.paths.sitemap_file)
    }

    /// Drop cached templates so the next build rereads them from disk.
    pub fn clear_templates(&mut self) {
        self.templates.clear();
    }

    fn today(&self) -> NaiveDate {
        self.today.unwrap_or_else(dates::today)
    }

    // =========================================================================
    // One-shot build
    // =========================================================================

    /// Build every article, then the index and the sitemap.
    pub fn build_once(&mut self) -> Result<BuildReport, BuildError> {
        let started = Instant::now();
        let articles_dir = self.articles_dir();
        let output_dir = self.output_dir();
        ensure_dir(&articles_dir)?;
        ensure_dir(&output_dir)?;

        let sources = discover_markdown(&articles_dir)?;
        if sources.is_empty() {
            warn!(dir = %articles_dir.display(), "no markdown files found, nothing to build");
            return Ok(BuildReport {
                pages: Vec::new(),
                sitemap_entries: 0,
                index_path: None,
                sitemap_path: None,
                elapsed: started.elapsed(),
            });
        }
        info!(count = sources.len(), dir = %articles_dir.display(), "building articles");

        let today = self.today();
        let builder = ArticleBuilder::new(&self.config, &output_dir, today);

        let mut parsed = Vec::with_capacity(sources.len());
        let mut seen: HashMap<String, PathBuf> = HashMap::new();
        for path in &sources {
            let article = builder.parse(path)?;
            if let Some(first) = seen.get(&article.meta.slug) {
                return Err(BuildError::DuplicateSlug {
                    slug: article.meta.slug,
                    first: first.clone(),
                    second: path.clone(),
                });
            }
            seen.insert(article.meta.slug.clone(), path.clone());
            parsed.push(article);
        }

        let mut pages = Vec::with_capacity(parsed.len());
        let mut articles: Vec<ArticleMetadata> = Vec::with_capacity(parsed.len());
        for article in parsed {
            let path = builder.write(&mut self.templates, &article)?;
            debug!(slug = %article.meta.slug, path = %path.display(), "wrote article");
            pages.push(BuiltPage {
                slug: article.meta.slug.clone(),
                title: article.meta.title.clone(),
                path,
            });
            articles.push(article.meta);
        }

        let index_path = self.index_path();
        index::build_index(&self.config, &mut self.templates, &mut articles, &index_path)?;

        // Same newest-first order as the index.
        let sitemap_path = self.sitemap_path();
        let sitemap_entries = sitemap::build_sitemap(&self.config, &articles, today, &sitemap_path)?;

        Ok(BuildReport {
            pages,
            sitemap_entries,
            index_path: Some(index_path),
            sitemap_path: Some(sitemap_path),
            elapsed: started.elapsed(),
        })
    }

    // =========================================================================
    // Image optimization
    // =========================================================================

    /// Optimize `<photo_dir>` into `<photo_dir>/<optimized_dir>`.
    pub fn optimize_images(&self, optimizer: &dyn ImageOptimizer) -> BatchReport {
        let source_root = self.root.join(&self.config.images.photo_dir);
        let dest_root = source_root.join(&self.config.images.optimized_dir);
        let options = OptimizeOptions::from_config(&self.config.images);
        info!(
            source = %source_root.display(),
            dest = %dest_root.display(),
            "optimizing images"
        );
        optimize_tree(optimizer, &source_root, &dest_root, &options)
    }
}

fn ensure_dir(path: &Path) -> Result<(), BuildError> {
    fs::create_dir_all(path).map_err(|source| BuildError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// `*.md` files directly inside `dir`, sorted by file name.
pub fn discover_markdown(dir: &Path) -> Result<Vec<PathBuf>, BuildError> {
    let io_err = |source| BuildError::Io {
        path: dir.to_path_buf(),
        source,
    };
    let mut files = Vec::new();
    for entry in fs::read_dir(dir).map_err(io_err)? {
        let path = entry.map_err(io_err)?.path();
        if path.is_file() && path.extension().is_some_and(|ext| ext == "md") {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::optimize::OptimizeOutcome;
    use crate::test_helpers::{fixed_today, setup_site, write_article};
    use tempfile::TempDir;

    fn site(tmp: &TempDir) -> Site {
        Site::new(tmp.path(), SiteConfig::default()).with_today(fixed_today())
    }

    #[test]
    fn discovers_only_top_level_markdown_sorted() {
        let tmp = setup_site(&[("b.md", ""), ("a.md", ""), ("notes.txt", "")]);
        let dir = tmp.path().join("articles");
        write_article(&dir.join("drafts"), "c.md", "");

        let found = discover_markdown(&dir).unwrap();
        assert_eq!(found, vec![dir.join("a.md"), dir.join("b.md")]);
    }

    #[test]
    fn builds_pages_index_and_sitemap() {
        let tmp = setup_site(&[
            ("one.md", "---\ntitle: One\ndate: 2024-01-01\n---\nfirst"),
            ("two.md", "---\ntitle: Two\ndate: 2024-02-01\n---\nsecond"),
        ]);
        let report = site(&tmp).build_once().unwrap();

        assert_eq!(report.article_count(), 2);
        assert_eq!(report.sitemap_entries, 4);
        assert!(tmp.path().join("articles/one.html").exists());
        assert!(tmp.path().join("articles/two.html").exists());

        let sitemap = fs::read_to_string(tmp.path().join("sitemap.xml")).unwrap();
        let two = sitemap.find("articles/two.html").unwrap();
        let one = sitemap.find("articles/one.html").unwrap();
        assert!(two < one, "sitemap follows index order");
    }

    #[test]
    fn zero_markdown_files_writes_nothing() {
        let tmp = TempDir::new().unwrap();
        let report = site(&tmp).build_once().unwrap();

        assert_eq!(report.article_count(), 0);
        assert_eq!(report.index_path, None);
        assert!(tmp.path().join("articles").is_dir());
        assert!(!tmp.path().join("blog.html").exists());
        assert!(!tmp.path().join("sitemap.xml").exists());
    }

    #[test]
    fn duplicate_slug_names_both_sources() {
        let tmp = setup_site(&[
            ("a.md", "---\nslug: same\n---\n"),
            ("b.md", "---\nslug: same\n---\n"),
        ]);
        let err = site(&tmp).build_once().unwrap_err();
        match err {
            BuildError::DuplicateSlug {
                slug,
                first,
                second,
            } => {
                assert_eq!(slug, "same");
                assert!(first.ends_with("a.md"));
                assert!(second.ends_with("b.md"));
            }
            other => panic!("expected DuplicateSlug, got {other:?}"),
        }
        assert!(!tmp.path().join("articles/same.html").exists());
        assert!(!tmp.path().join("blog.html").exists());
    }

    #[test]
    fn malformed_article_aborts_before_index() {
        let tmp = setup_site(&[
            ("good.md", "---\ntitle: Good\n---\n"),
            ("bad.md", "---\ntitle: [unclosed\n---\n"),
        ]);
        let err = site(&tmp).build_once().unwrap_err();
        assert!(matches!(err, BuildError::Article(_)));
        assert!(!tmp.path().join("blog.html").exists());
        assert!(!tmp.path().join("sitemap.xml").exists());
    }

    #[test]
    fn template_cache_survives_until_cleared() {
        let tmp = setup_site(&[("a.md", "---\ntitle: A\n---\n")]);
        let tpl_dir = tmp.path().join("templates");
        fs::create_dir_all(&tpl_dir).unwrap();
        fs::write(tpl_dir.join("article.html"), "v1 {{title}}").unwrap();

        let mut site = site(&tmp);
        site.build_once().unwrap();
        fs::write(tpl_dir.join("article.html"), "v2 {{title}}").unwrap();

        site.build_once().unwrap();
        let page = tmp.path().join("articles/a.html");
        assert_eq!(fs::read_to_string(&page).unwrap(), "v1 A");

        site.clear_templates();
        site.build_once().unwrap();
        assert_eq!(fs::read_to_string(&page).unwrap(), "v2 A");
    }

    #[test]
    fn configured_paths_are_respected() {
        let tmp = setup_site(&[]);
        write_article(&tmp.path().join("posts"), "x.md", "---\ntitle: X\n---\n");
        let mut config = SiteConfig::default();
        config.paths.articles_dir = "posts".into();
        config.paths.output_dir = "public/articles".into();
        config.paths.index_file = "public/index.html".into();
        fs::create_dir_all(tmp.path().join("public")).unwrap();

        let report = Site::new(tmp.path(), config)
            .with_today(fixed_today())
            .build_once()
            .unwrap();
        assert_eq!(report.article_count(), 1);
        assert!(tmp.path().join("public/articles/x.html").exists());

        let index = fs::read_to_string(tmp.path().join("public/index.html")).unwrap();
        assert!(index.contains(r#"href="../public/articles/x.html""#));
        let sitemap = fs::read_to_string(tmp.path().join("sitemap.xml")).unwrap();
        assert!(sitemap.contains("<loc>https://zxinnattapat3.github.io/public/articles/x.html</loc>"));
        assert!(sitemap.contains("<loc>https://zxinnattapat3.github.io/public/index.html</loc>"));
    }

    #[test]
    fn optimize_images_targets_photo_subtree() {
        use crate::optimize::{OptimizeOptions, OptimizeStats};
        use std::cell::RefCell;

        struct Recorder(RefCell<Vec<PathBuf>>);
        impl ImageOptimizer for Recorder {
            fn is_available(&self) -> bool {
                true
            }
            fn optimize(&self, _input: &Path, output: &Path, _o: &OptimizeOptions) -> OptimizeOutcome {
                self.0.borrow_mut().push(output.to_path_buf());
                OptimizeOutcome::Optimized(OptimizeStats {
                    original_size: 10,
                    optimized_size: 5,
                    savings_percent: 50.0,
                    format: crate::optimize::OutputFormat::Jpeg,
                    output: output.to_path_buf(),
                    width: 1,
                    height: 1,
                    resized: false,
                })
            }
        }

        let tmp = TempDir::new().unwrap();
        write_article(&tmp.path().join("Photo"), "a.jpg", "x");
        let recorder = Recorder(RefCell::new(Vec::new()));
        let report = site(&tmp).optimize_images(&recorder);

        assert_eq!(report.processed, 1);
        assert_eq!(
            recorder.0.borrow().as_slice(),
            &[tmp.path().join("Photo/optimized/a.jpg")]
        );
    }
}

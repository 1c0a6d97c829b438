//! # blogsmith
//!
//! A static blog generator. Markdown files with YAML front matter become
//! standalone HTML pages; the set of pages becomes a blog index and a
//! sitemap. Everything is plain files on disk: no server, no database.
//!
//! # Pipeline
//!
//! ```text
//! articles/*.md ─► front matter + body ─► Markdown ─► article template ─► articles/<slug>.html
//!                        │
//!                        └─► ArticleMetadata[] ─► blog.html (newest first)
//!                                             └─► sitemap.xml
//! ```
//!
//! Builds are sequential and deterministic: the same inputs on the same day
//! produce byte-identical output.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`build`] | [`Site`](build::Site): discovers sources, drives the builders, reports |
//! | [`article`] | One Markdown file → one HTML page + metadata |
//! | [`index`] | Newest-first blog index page |
//! | [`sitemap`] | `sitemap.xml` URL set |
//! | [`template`] | `{{token}}` templates, memoizing store, HTML escaping |
//! | [`frontmatter`] | `---` YAML block splitting and field extraction |
//! | [`markdown`] | Markdown → HTML fragment |
//! | [`dates`] | Front-matter date parsing and Thai/English long dates |
//! | [`config`] | Optional `blog.toml` merged over stock defaults |
//! | [`optimize`] | `--optimize-images`: bounded re-encoding of the photo tree |
//! | [`watch`] | `--watch`: single-flight rebuilds on Markdown changes |
//! | [`i18n`] | English/Thai UI text for the static pages |
//! | [`output`] | CLI output formatting |
//! | [`types`] | [`ArticleMetadata`](types::ArticleMetadata), shared by the builders |
//!
//! # Design Decisions
//!
//! ## String Templates
//!
//! Pages are rendered from plain HTML files with `{{name}}` placeholders,
//! so the site owner can restyle without touching Rust. Substitution is a
//! single literal pass: values are never re-scanned, and every text value is
//! HTML-escaped before insertion. Only the rendered Markdown goes in raw.
//!
//! ## Fail Before Writing
//!
//! All articles are parsed before any page is written. A malformed file or
//! two files claiming the same slug abort the build and leave the previous
//! index and sitemap untouched.
//!
//! ## Optional Image Codec
//!
//! Image optimization sits behind the
//! [`ImageOptimizer`](optimize::ImageOptimizer) trait. With the
//! `image-optimization` feature disabled the binary still builds the blog;
//! `--optimize-images` then reports every image as skipped.

pub mod article;
pub mod build;
pub mod config;
pub mod dates;
pub mod frontmatter;
pub mod i18n;
pub mod index;
pub mod markdown;
pub mod optimize;
pub mod output;
pub mod sitemap;
pub mod template;
pub mod types;
pub mod watch;

#[cfg(test)]
pub(crate) mod test_helpers;

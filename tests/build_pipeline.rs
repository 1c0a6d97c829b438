//! End-to-end builds over the fixture site in `fixtures/site/`.
//!
//! Every test copies the fixture into a temp directory, builds it through
//! the public `Site` API, and inspects the files on disk.

use blogsmith::build::{BuildError, Site};
use chrono::NaiveDate;
use std::fs;
use std::path::Path;
use std::time::SystemTime;
use tempfile::TempDir;

fn copy_dir_recursive(src: &Path, dst: &Path) -> std::io::Result<()> {
    for entry in fs::read_dir(src)? {
        let entry = entry?;
        let src_path = entry.path();
        let dst_path = dst.join(entry.file_name());
        if src_path.is_dir() {
            fs::create_dir_all(&dst_path)?;
            copy_dir_recursive(&src_path, &dst_path)?;
        } else {
            fs::copy(&src_path, &dst_path)?;
        }
    }
    Ok(())
}

fn setup_fixture() -> TempDir {
    let tmp = TempDir::new().unwrap();
    let fixture = Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures/site");
    copy_dir_recursive(&fixture, tmp.path()).unwrap();
    tmp
}

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 4, 1).unwrap()
}

fn build(root: &Path) -> Result<blogsmith::build::BuildReport, BuildError> {
    Site::load(root)?.with_today(today()).build_once()
}

fn read(root: &Path, rel: &str) -> String {
    fs::read_to_string(root.join(rel)).unwrap()
}

fn mtime(path: &Path) -> SystemTime {
    fs::metadata(path).unwrap().modified().unwrap()
}

// =========================================================================
// Whole-site output
// =========================================================================

#[test]
fn fixture_builds_every_page() {
    let tmp = setup_fixture();
    let report = build(tmp.path()).unwrap();

    assert_eq!(report.article_count(), 3);
    assert_eq!(report.sitemap_entries, 5);
    for page in ["first-steps", "spring-trip", "notes-feb"] {
        let html = read(tmp.path(), &format!("articles/{page}.html"));
        assert!(!html.contains("{{"), "{page}: unresolved token");
        assert!(html.contains(&format!(
            "https://blog.example.com/articles/{page}.html"
        )));
    }
}

#[test]
fn config_from_blog_toml_is_applied() {
    let tmp = setup_fixture();
    build(tmp.path()).unwrap();

    let html = read(tmp.path(), "articles/first-steps.html");
    assert!(html.contains("January 1, 2024"), "English dates from locale = \"en\"");
    assert!(html.contains("https://blog.example.com/Photo/DSCF2374.jpg"));
    assert!(html.contains("Nattapat Phungphugdee"), "default author");
}

#[test]
fn markdown_extensions_render() {
    let tmp = setup_fixture();
    build(tmp.path()).unwrap();

    let trip = read(tmp.path(), "articles/spring-trip.html");
    assert!(trip.contains("<table>"));
    assert!(trip.contains(r#"type="checkbox""#));
    assert!(trip.contains(r#"<span class="tag">travel</span><span class="tag">photo</span>"#));
    assert!(trip.contains("Guest Writer"));

    let notes = read(tmp.path(), "articles/notes-feb.html");
    assert!(notes.contains("<del>old</del>"));
    assert!(notes.contains("Short notes &amp; links"));
}

#[test]
fn index_lists_newest_first() {
    let tmp = setup_fixture();
    build(tmp.path()).unwrap();

    let index = read(tmp.path(), "blog.html");
    let pos = |slug: &str| index.find(&format!("articles/{slug}.html")).unwrap();
    assert!(pos("spring-trip") < pos("notes-feb"));
    assert!(pos("notes-feb") < pos("first-steps"));
    assert!(index.contains(r#"<img src="Photo/spring/cover.jpg" alt="Spring Trip" class="preview-image">"#));
}

#[test]
fn sitemap_has_fixed_pages_then_articles() {
    let tmp = setup_fixture();
    build(tmp.path()).unwrap();

    let xml = read(tmp.path(), "sitemap.xml");
    assert_eq!(xml.matches("<url>").count(), 2 + 3);
    assert!(xml.contains("<loc>https://blog.example.com/</loc>"));
    assert!(xml.contains("<loc>https://blog.example.com/blog.html</loc>"));
    assert!(xml.contains("<lastmod>2024-04-01</lastmod>"));
    assert!(xml.contains("<lastmod>2024-03-01</lastmod>"));
    assert_eq!(xml.matches("<priority>0.7</priority>").count(), 3);
}

// =========================================================================
// Determinism and edge cases
// =========================================================================

#[test]
fn rebuilding_unchanged_inputs_is_byte_identical() {
    let tmp = setup_fixture();
    build(tmp.path()).unwrap();
    let files = [
        "articles/first-steps.html",
        "articles/spring-trip.html",
        "articles/notes-feb.html",
        "blog.html",
        "sitemap.xml",
    ];
    let first: Vec<String> = files.iter().map(|f| read(tmp.path(), f)).collect();

    build(tmp.path()).unwrap();
    let second: Vec<String> = files.iter().map(|f| read(tmp.path(), f)).collect();
    assert_eq!(first, second);
}

#[test]
fn script_in_title_is_escaped_everywhere() {
    let tmp = setup_fixture();
    fs::write(
        tmp.path().join("articles/xss.md"),
        "---\ntitle: \"<script>alert('x')</script>\"\ndate: 2024-05-01\n---\nbody\n",
    )
    .unwrap();
    build(tmp.path()).unwrap();

    let escaped = "&lt;script&gt;alert(&#039;x&#039;)&lt;/script&gt;";
    let page = read(tmp.path(), "articles/xss.html");
    let index = read(tmp.path(), "blog.html");
    assert!(page.contains(escaped));
    assert!(index.contains(escaped));
    assert!(!page.contains("<script>"));
    assert!(!index.contains("<script>"));
}

#[test]
fn no_markdown_leaves_index_and_sitemap_untouched() {
    let tmp = TempDir::new().unwrap();
    fs::create_dir_all(tmp.path().join("articles")).unwrap();
    fs::write(tmp.path().join("blog.html"), "previous index").unwrap();
    fs::write(tmp.path().join("sitemap.xml"), "previous sitemap").unwrap();
    let before = (
        mtime(&tmp.path().join("blog.html")),
        mtime(&tmp.path().join("sitemap.xml")),
    );

    let report = build(tmp.path()).unwrap();

    assert_eq!(report.article_count(), 0);
    assert_eq!(read(tmp.path(), "blog.html"), "previous index");
    assert_eq!(read(tmp.path(), "sitemap.xml"), "previous sitemap");
    assert_eq!(
        before,
        (
            mtime(&tmp.path().join("blog.html")),
            mtime(&tmp.path().join("sitemap.xml")),
        )
    );
}

#[test]
fn missing_articles_dir_is_created() {
    let tmp = TempDir::new().unwrap();
    let report = build(tmp.path()).unwrap();
    assert_eq!(report.article_count(), 0);
    assert!(tmp.path().join("articles").is_dir());
    assert!(!tmp.path().join("blog.html").exists());
}

#[test]
fn duplicate_slug_fails_without_touching_outputs() {
    let tmp = setup_fixture();
    build(tmp.path()).unwrap();
    let index_before = read(tmp.path(), "blog.html");

    fs::write(
        tmp.path().join("articles/zz-copy.md"),
        "---\ntitle: Copy\nslug: first-steps\n---\n",
    )
    .unwrap();
    let err = build(tmp.path()).unwrap_err();

    match err {
        BuildError::DuplicateSlug { slug, first, second } => {
            assert_eq!(slug, "first-steps");
            assert!(first.ends_with("first-steps.md"));
            assert!(second.ends_with("zz-copy.md"));
        }
        other => panic!("expected DuplicateSlug, got {other}"),
    }
    assert_eq!(read(tmp.path(), "blog.html"), index_before);
}

#[test]
fn custom_templates_override_defaults() {
    let tmp = setup_fixture();
    let templates = tmp.path().join("templates");
    fs::create_dir_all(&templates).unwrap();
    fs::write(
        templates.join("blog-index.html"),
        "<main>{{articles}}</main>",
    )
    .unwrap();
    build(tmp.path()).unwrap();

    let index = read(tmp.path(), "blog.html");
    assert!(index.starts_with("<main>"));
    assert!(index.ends_with("</main>"));
    // The article template was not overridden.
    assert!(read(tmp.path(), "articles/first-steps.html").starts_with("<!DOCTYPE html>"));
}

#[test]
fn links_follow_configured_output_dir() {
    let tmp = setup_fixture();
    fs::write(
        tmp.path().join("blog.toml"),
        "base_url = \"https://blog.example.com\"\nlocale = \"en\"\n\n[paths]\noutput_dir = \"posts\"\n",
    )
    .unwrap();
    build(tmp.path()).unwrap();

    assert!(tmp.path().join("posts/first-steps.html").exists());
    assert!(!tmp.path().join("articles/first-steps.html").exists());

    let index = read(tmp.path(), "blog.html");
    assert!(index.contains(r#"<a href="posts/first-steps.html">"#));
    assert!(!index.contains("articles/first-steps.html"));

    let xml = read(tmp.path(), "sitemap.xml");
    assert!(xml.contains("<loc>https://blog.example.com/posts/first-steps.html</loc>"));

    let page = read(tmp.path(), "posts/first-steps.html");
    assert!(page.contains("https://blog.example.com/posts/first-steps.html"));
    assert!(!page.contains("https://blog.example.com/articles/"));
}

#[test]
fn invalid_config_is_reported() {
    let tmp = setup_fixture();
    fs::write(tmp.path().join("blog.toml"), "base_url = \"https://x.test/\"\n").unwrap();
    assert!(matches!(
        Site::load(tmp.path()).unwrap_err(),
        BuildError::Config(_)
    ));
}

//! CLI output formatting for builds and image optimization.
//!
//! # Output Format
//!
//! ## Build
//!
//! ```text
//! 001 Hello World → articles/hello-world.html
//! 002 Untitled → articles/notes.html
//! Index → blog.html
//! Sitemap → sitemap.xml (4 URLs)
//!
//! Built 2 articles in 0.03s
//! ```
//!
//! ## Optimize
//!
//! ```text
//! Optimized 12 images (1 failed)
//!     4.2 MB → 1.3 MB (69.0% saved)
//! ```
//!
//! # Architecture
//!
//! Each report has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format
//! functions are pure: no I/O, no side effects.

use crate::build::BuildReport;
use crate::optimize::BatchReport;
use std::path::Path;

// ============================================================================
// Helpers
// ============================================================================

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// `path` relative to `root` when it lies inside it.
fn display_path(path: &Path, root: &Path) -> String {
    path.strip_prefix(root).unwrap_or(path).display().to_string()
}

fn plural(n: usize, word: &str) -> String {
    if n == 1 {
        format!("{n} {word}")
    } else {
        format!("{n} {word}s")
    }
}

/// Human-readable byte count (binary units, one decimal).
pub fn format_bytes(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["KB", "MB", "GB", "TB"];
    if bytes < 1024 {
        return format!("{bytes} B");
    }
    let mut value = bytes as f64 / 1024.0;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    format!("{value:.1} {}", UNITS[unit])
}

// ============================================================================
// Build output
// ============================================================================

/// Format a build report: one line per page, then the index and sitemap.
///
/// Paths are shown relative to `root`.
pub fn format_build_report(report: &BuildReport, root: &Path) -> Vec<String> {
    if report.pages.is_empty() {
        return vec!["No articles found, nothing written".to_string()];
    }

    let mut lines: Vec<String> = report
        .pages
        .iter()
        .enumerate()
        .map(|(i, page)| {
            format!(
                "{} {} \u{2192} {}",
                format_index(i + 1),
                page.title,
                display_path(&page.path, root)
            )
        })
        .collect();

    if let Some(index) = &report.index_path {
        lines.push(format!("Index \u{2192} {}", display_path(index, root)));
    }
    if let Some(sitemap) = &report.sitemap_path {
        lines.push(format!(
            "Sitemap \u{2192} {} ({})",
            display_path(sitemap, root),
            plural(report.sitemap_entries, "URL")
        ));
    }

    lines.push(String::new());
    lines.push(format!(
        "Built {} in {:.2}s",
        plural(report.article_count(), "article"),
        report.elapsed.as_secs_f64()
    ));
    lines
}

/// Print build output to stdout.
pub fn print_build_report(report: &BuildReport, root: &Path) {
    for line in format_build_report(report, root) {
        println!("{}", line);
    }
}

// ============================================================================
// Optimize output
// ============================================================================

/// Format the aggregate result of an `--optimize-images` run.
pub fn format_batch_report(report: &BatchReport) -> Vec<String> {
    if report.processed == 0 && report.failed == 0 {
        return vec!["No images found".to_string()];
    }

    let mut header = format!("Optimized {}", plural(report.processed, "image"));
    if report.failed > 0 {
        header.push_str(&format!(" ({} failed)", report.failed));
    }

    let mut lines = vec![header];
    if report.processed > 0 {
        lines.push(format!(
            "    {} \u{2192} {} ({:.1}% saved)",
            format_bytes(report.total_original),
            format_bytes(report.total_optimized),
            report.savings_percent()
        ));
    }
    lines
}

/// Print optimize output to stdout.
pub fn print_batch_report(report: &BatchReport) {
    for line in format_batch_report(report) {
        println!("{}", line);
    }
}

//! Whole-tree optimization for `--optimize-images`.
//!
//! Walks the photo directory, skips the output subtree, and mirrors every
//! supported image into it. One bad image never stops the run.

use super::backend::{ImageOptimizer, OptimizeOutcome};
use super::params::{OptimizeOptions, output_path};
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use walkdir::WalkDir;

/// Extensions picked up by the walker (case-insensitive).
pub const SUPPORTED_EXTENSIONS: &[&str] = &[
    "jpg", "jpeg", "png", "webp", "gif", "bmp", "tif", "tiff",
];

/// Aggregate result of [`optimize_tree`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchReport {
    pub processed: usize,
    pub failed: usize,
    /// Bytes of successfully optimized sources.
    pub total_original: u64,
    pub total_optimized: u64,
}

impl BatchReport {
    pub fn savings_percent(&self) -> f64 {
        super::calculations::savings_percent(self.total_original, self.total_optimized)
    }

    fn record(&mut self, source: &Path, outcome: OptimizeOutcome) {
        match outcome {
            OptimizeOutcome::Optimized(stats) => {
                info!(
                    file = %source.display(),
                    output = %stats.output.display(),
                    original = stats.original_size,
                    optimized = stats.optimized_size,
                    "optimized image ({:.1}% saved)",
                    stats.savings_percent
                );
                self.processed += 1;
                self.total_original += stats.original_size;
                self.total_optimized += stats.optimized_size;
            }
            OptimizeOutcome::Failed { error } => {
                warn!(file = %source.display(), "image optimization failed: {error}");
                self.failed += 1;
            }
        }
    }
}

pub fn is_supported_image(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| SUPPORTED_EXTENSIONS.contains(&e.to_ascii_lowercase().as_str()))
        .unwrap_or(false)
}

/// Supported images under `source_root`, sorted, excluding `dest_root`.
fn collect_images(source_root: &Path, dest_root: &Path) -> Vec<PathBuf> {
    WalkDir::new(source_root)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| e.path() != dest_root)
        .filter_map(Result::ok)
        .filter(|e| e.file_type().is_file())
        .map(walkdir::DirEntry::into_path)
        .filter(|p| is_supported_image(p))
        .collect()
}

/// Optimize every supported image below `source_root` into `dest_root`.
///
/// Relative paths are preserved. A missing `source_root` yields an empty
/// report.
pub fn optimize_tree(
    optimizer: &dyn ImageOptimizer,
    source_root: &Path,
    dest_root: &Path,
    options: &OptimizeOptions,
) -> BatchReport {
    let mut report = BatchReport::default();
    if !source_root.is_dir() {
        warn!(dir = %source_root.display(), "photo directory not found, nothing to optimize");
        return report;
    }
    if !optimizer.is_available() {
        warn!("image optimization is unavailable in this build, every image will be skipped");
    }

    for source in collect_images(source_root, dest_root) {
        let Ok(relative) = source.strip_prefix(source_root) else {
            continue;
        };
        let output = output_path(dest_root, relative);
        let outcome = optimizer.optimize(&source, &output, options);
        report.record(&source, outcome);
    }
    report
}

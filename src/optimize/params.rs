//! Parameter types for image optimization.
//!
//! These describe *what* to produce. The backend decides *how*.
//!
//! - [`Quality`]: lossy encoding quality (1–100, default 80). Clamped on construction.
//! - [`OptimizeOptions`]: quality plus the bounding box an image must fit in.
//! - [`OutputFormat`]: encoder family chosen from the source format.

use crate::config::ImagesConfig;
use std::path::{Path, PathBuf};

/// Quality setting for lossy image encoding (1-100).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quality(u32);

impl Quality {
    pub fn new(value: u32) -> Self {
        Self(value.clamp(1, 100))
    }

    pub fn value(self) -> u32 {
        self.0
    }

    /// Encoder-facing byte value.
    pub fn as_u8(self) -> u8 {
        self.0 as u8
    }
}

impl Default for Quality {
    fn default() -> Self {
        Self(80)
    }
}

/// How one image is re-encoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OptimizeOptions {
    pub quality: Quality,
    pub max_width: u32,
    pub max_height: u32,
}

impl Default for OptimizeOptions {
    fn default() -> Self {
        Self {
            quality: Quality::default(),
            max_width: 1920,
            max_height: 1920,
        }
    }
}

impl OptimizeOptions {
    pub fn from_config(config: &ImagesConfig) -> Self {
        Self {
            quality: Quality::new(config.quality),
            max_width: config.max_width,
            max_height: config.max_height,
        }
    }
}

/// Encoder family of an optimized image.
///
/// JPEG, PNG and WebP sources keep their family; everything else is
/// re-encoded as JPEG.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Jpeg,
    Png,
    WebP,
}

impl OutputFormat {
    /// Pick the output family from a file extension.
    pub fn for_extension(ext: &str) -> Self {
        match ext.to_ascii_lowercase().as_str() {
            "png" => Self::Png,
            "webp" => Self::WebP,
            _ => Self::Jpeg,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Jpeg => "jpeg",
            Self::Png => "png",
            Self::WebP => "webp",
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            Self::Jpeg => "jpg",
            Self::Png => "png",
            Self::WebP => "webp",
        }
    }

    /// Whether `ext` already names this family.
    fn matches_extension(self, ext: &str) -> bool {
        let ext = ext.to_ascii_lowercase();
        match self {
            Self::Jpeg => ext == "jpg" || ext == "jpeg",
            Self::Png => ext == "png",
            Self::WebP => ext == "webp",
        }
    }

    /// `path`, with its extension swapped when it does not name this family.
    pub fn destination(self, path: &Path) -> PathBuf {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or_default();
        let mut out = path.to_path_buf();
        if !self.matches_extension(ext) {
            out.set_extension(self.extension());
        }
        out
    }
}

/// Destination path for `relative` under `dest_root`, judged by extension.
///
/// Keeps the relative path; swaps the extension to `.jpg` when the source
/// format falls back to JPEG. The optimizer may still correct it once the
/// content has been probed.
pub fn output_path(dest_root: &Path, relative: &Path) -> PathBuf {
    let ext = relative
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or_default();
    OutputFormat::for_extension(ext).destination(&dest_root.join(relative))
}

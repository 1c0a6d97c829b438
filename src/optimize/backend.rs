//! The [`ImageOptimizer`] capability and its outcome types.
//!
//! Call sites depend only on this trait. The codec-backed implementation
//! ([`CodecOptimizer`](super::codec::CodecOptimizer)) exists when the
//! `image-optimization` feature is enabled; otherwise [`NullOptimizer`] is
//! selected at startup and every call reports a non-fatal failure.

use super::params::{OptimizeOptions, OutputFormat};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum OptimizeError {
    #[error("IO error on {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Processing failed: {0}")]
    ProcessingFailed(String),
    #[error("image optimization is unavailable in this build")]
    Unavailable,
}

/// Sizes and format of one successfully optimized image.
#[derive(Debug, Clone, PartialEq)]
pub struct OptimizeStats {
    pub original_size: u64,
    pub optimized_size: u64,
    pub savings_percent: f64,
    pub format: OutputFormat,
    /// Where the image was written; its extension always names `format`.
    pub output: PathBuf,
    /// Output dimensions.
    pub width: u32,
    pub height: u32,
    pub resized: bool,
}

/// Result of a single optimization attempt. Never fatal to the caller.
#[derive(Debug, Clone, PartialEq)]
pub enum OptimizeOutcome {
    Optimized(OptimizeStats),
    Failed { error: String },
}

impl OptimizeOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Optimized(_))
    }
}

impl From<Result<OptimizeStats, OptimizeError>> for OptimizeOutcome {
    fn from(result: Result<OptimizeStats, OptimizeError>) -> Self {
        match result {
            Ok(stats) => Self::Optimized(stats),
            Err(e) => Self::Failed {
                error: e.to_string(),
            },
        }
    }
}

/// Re-encodes one image into a bounded, recompressed copy.
pub trait ImageOptimizer {
    /// Whether calls can ever succeed.
    fn is_available(&self) -> bool;

    /// Optimize `input` into `output`, creating parent directories.
    ///
    /// When the encoder family differs from `output`'s extension the file is
    /// written under the family's extension instead; see
    /// [`OptimizeStats::output`].
    fn optimize(&self, input: &Path, output: &Path, options: &OptimizeOptions) -> OptimizeOutcome;
}

/// Stand-in when no codec is compiled in.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullOptimizer;

impl ImageOptimizer for NullOptimizer {
    fn is_available(&self) -> bool {
        false
    }

    fn optimize(&self, _input: &Path, _output: &Path, _options: &OptimizeOptions) -> OptimizeOutcome {
        Err(OptimizeError::Unavailable).into()
    }
}

/// The best optimizer this build supports.
pub fn default_optimizer() -> Box<dyn ImageOptimizer> {
    #[cfg(feature = "image-optimization")]
    {
        Box::new(super::codec::CodecOptimizer::new())
    }
    #[cfg(not(feature = "image-optimization"))]
    {
        Box::new(NullOptimizer)
    }
}

//! Photo optimization for `--optimize-images`.
//!
//! Every image under the photo directory is re-encoded into a bounded copy
//! inside its `optimized/` subtree:
//!
//! | Step | Behavior |
//! |---|---|
//! | **Fit** | Scale down into `max_width` x `max_height`, never up |
//! | **Encode** | JPEG, PNG and WebP keep their family; other formats become JPEG |
//! | **Report** | Per-file savings, then an aggregate [`BatchReport`] |
//!
//! The module is split into:
//! - **Calculations**: pure dimension and savings math
//! - **Parameters**: [`OptimizeOptions`], [`Quality`], [`OutputFormat`]
//! - **Backend**: the [`ImageOptimizer`] trait, [`NullOptimizer`], and the
//!   `image`-crate codec behind the `image-optimization` feature
//! - **Batch**: [`optimize_tree`], the directory walk

mod backend;
pub mod batch;
mod calculations;
#[cfg(feature = "image-optimization")]
pub mod codec;
mod params;

pub use backend::{
    ImageOptimizer, NullOptimizer, OptimizeError, OptimizeOutcome, OptimizeStats,
    default_optimizer,
};
pub use batch::{BatchReport, optimize_tree};
pub use calculations::{fit_within, savings_percent};
#[cfg(feature = "image-optimization")]
pub use codec::CodecOptimizer;
pub use params::{OptimizeOptions, OutputFormat, Quality, output_path};

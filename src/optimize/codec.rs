//! Codec-backed optimizer using the `image` crate.
//!
//! | Operation | Crate / function |
//! |---|---|
//! | Probe format | `ImageReader::with_guessed_format` |
//! | Decode (JPEG, PNG, WebP, GIF, BMP, TIFF) | `image` crate decoders |
//! | Resize | `DynamicImage::resize_exact` with `Lanczos3` |
//! | Encode JPEG | `JpegEncoder::new_with_quality` |
//! | Encode PNG | `PngEncoder` with best compression (lossless, quality ignored) |
//! | Encode WebP | `WebPEncoder::new_lossless` (the crate has no lossy WebP encoder) |

use super::backend::{ImageOptimizer, OptimizeError, OptimizeOutcome, OptimizeStats};
use super::calculations::{fit_within, needs_resize, savings_percent};
use super::params::{OptimizeOptions, OutputFormat};
use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::{CompressionType, FilterType as PngFilter, PngEncoder};
use image::codecs::webp::WebPEncoder;
use image::imageops::FilterType;
use image::{DynamicImage, ImageFormat, ImageReader};
use std::fs::{self, File};
use std::io::BufWriter;
use std::path::Path;

/// Pure Rust optimizer on top of the `image` crate.
#[derive(Debug, Default, Clone, Copy)]
pub struct CodecOptimizer;

impl CodecOptimizer {
    pub fn new() -> Self {
        Self
    }

    fn run(
        &self,
        input: &Path,
        output: &Path,
        options: &OptimizeOptions,
    ) -> Result<OptimizeStats, OptimizeError> {
        let io_err = |path: &Path| {
            let path = path.to_path_buf();
            move |source| OptimizeError::Io { path, source }
        };

        let original_size = fs::metadata(input).map_err(io_err(input))?.len();

        let reader = ImageReader::open(input)
            .map_err(io_err(input))?
            .with_guessed_format()
            .map_err(io_err(input))?;
        let format = output_format(reader.format(), input);
        let output = format.destination(output);
        let img = reader.decode().map_err(|e| {
            OptimizeError::ProcessingFailed(format!("Failed to decode {}: {}", input.display(), e))
        })?;

        let source_dims = (img.width(), img.height());
        let bounds = (options.max_width, options.max_height);
        let resized = needs_resize(source_dims, bounds);
        let (width, height) = fit_within(source_dims, bounds);
        let img = if resized {
            img.resize_exact(width, height, FilterType::Lanczos3)
        } else {
            img
        };

        if let Some(parent) = output.parent() {
            fs::create_dir_all(parent).map_err(io_err(parent))?;
        }
        encode(&img, &output, format, options)?;

        let optimized_size = fs::metadata(&output).map_err(io_err(output.as_path()))?.len();
        Ok(OptimizeStats {
            original_size,
            optimized_size,
            savings_percent: savings_percent(original_size, optimized_size),
            format,
            output,
            width,
            height,
            resized,
        })
    }
}

impl ImageOptimizer for CodecOptimizer {
    fn is_available(&self) -> bool {
        true
    }

    fn optimize(&self, input: &Path, output: &Path, options: &OptimizeOptions) -> OptimizeOutcome {
        self.run(input, output, options).into()
    }
}

/// Output family from the probed format, or from the extension when the
/// content could not be identified.
fn output_format(probed: Option<ImageFormat>, path: &Path) -> OutputFormat {
    match probed {
        Some(ImageFormat::Jpeg) => OutputFormat::Jpeg,
        Some(ImageFormat::Png) => OutputFormat::Png,
        Some(ImageFormat::WebP) => OutputFormat::WebP,
        Some(_) => OutputFormat::Jpeg,
        None => OutputFormat::for_extension(
            path.extension()
                .and_then(|e| e.to_str())
                .unwrap_or_default(),
        ),
    }
}

fn encode(
    img: &DynamicImage,
    path: &Path,
    format: OutputFormat,
    options: &OptimizeOptions,
) -> Result<(), OptimizeError> {
    let file = File::create(path).map_err(|source| OptimizeError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let writer = BufWriter::new(file);
    let encode_err =
        |e: image::ImageError| OptimizeError::ProcessingFailed(format!("{} encode failed: {e}", format.name()));

    match format {
        OutputFormat::Jpeg => {
            // JPEG has no alpha channel.
            let rgb = DynamicImage::ImageRgb8(img.to_rgb8());
            rgb.write_with_encoder(JpegEncoder::new_with_quality(writer, options.quality.as_u8()))
                .map_err(encode_err)
        }
        OutputFormat::Png => img
            .write_with_encoder(PngEncoder::new_with_quality(
                writer,
                CompressionType::Best,
                PngFilter::Adaptive,
            ))
            .map_err(encode_err),
        OutputFormat::WebP => {
            let rgba = DynamicImage::ImageRgba8(img.to_rgba8());
            rgba.write_with_encoder(WebPEncoder::new_lossless(writer))
                .map_err(encode_err)
        }
    }
}

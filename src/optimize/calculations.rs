//! Pure calculation functions for image dimensions.
//!
//! All functions here are pure and testable without any I/O or images.

/// Fit `source` inside a `max` bounding box, preserving aspect ratio.
///
/// Images already inside the box are returned unchanged; nothing is ever
/// enlarged. Neither output edge drops below one pixel, even for a zero box.
///
/// # Examples
/// ```
/// # use blogsmith::optimize::fit_within;
/// // 4000x3000 into 1920x1920 → width-bound
/// assert_eq!(fit_within((4000, 3000), (1920, 1920)), (1920, 1440));
///
/// // Already small enough → untouched
/// assert_eq!(fit_within((800, 600), (1920, 1920)), (800, 600));
/// ```
pub fn fit_within(source: (u32, u32), max: (u32, u32)) -> (u32, u32) {
    let (src_w, src_h) = source;
    let (max_w, max_h) = (max.0.max(1), max.1.max(1));

    if src_w <= max_w && src_h <= max_h {
        return source;
    }

    let scale = (max_w as f64 / src_w as f64).min(max_h as f64 / src_h as f64);
    let w = ((src_w as f64 * scale).round() as u32).clamp(1, max_w);
    let h = ((src_h as f64 * scale).round() as u32).clamp(1, max_h);
    (w, h)
}

/// Whether `fit_within` would change `source`.
pub fn needs_resize(source: (u32, u32), max: (u32, u32)) -> bool {
    source.0 > max.0 || source.1 > max.1
}

/// Byte savings as a percentage of the original size.
///
/// Negative when the output grew. Zero for an empty original.
pub fn savings_percent(original: u64, optimized: u64) -> f64 {
    if original == 0 {
        return 0.0;
    }
    (original as f64 - optimized as f64) / original as f64 * 100.0
}

//! Text coverage sampling.
//!
//! A string is rasterized, centered, into a [`CoverageMask`] the size of the
//! output region, and a regular grid over that mask is scanned for cells
//! whose coverage clears a threshold. The surviving cells are shuffled and
//! truncated (or padded with jittered copies) to exactly the requested point
//! count. The shuffle means two calls with identical input return different
//! orderings; only coverage is stable.

mod font;
#[cfg(test)]
pub(crate) mod testing;

pub use font::FontRasterizer;
use glam::Vec2;
use rand::seq::SliceRandom;
use rand::Rng;

use crate::options::SamplerOptions;

/// Renders strings into coverage masks.
///
/// The sampler only needs width measurement and centered alpha coverage,
/// which keeps glyph rendering swappable (a real font stack in production,
/// a block face in tests).
pub trait Rasterizer {
    /// Whether the configured face is available. Sampling against a
    /// fallback face mis-measures widths, so the engine waits for this.
    fn is_ready(&self) -> bool;

    /// Rendered width of `text` at `font_size`, in pixels.
    fn measure(&mut self, text: &str, font_size: f32) -> f32;

    /// Draw `text` at `font_size`, centered in `mask`, accumulating glyph
    /// coverage.
    fn rasterize(&mut self, text: &str, font_size: f32, mask: &mut CoverageMask);
}

/// One alpha byte per pixel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoverageMask {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl CoverageMask {
    /// Create an empty (fully transparent) mask.
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            data: vec![0; width as usize * height as usize],
        }
    }

    /// Mask width in pixels.
    #[must_use]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Mask height in pixels.
    #[must_use]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Coverage at `(x, y)`; zero outside the mask.
    #[must_use]
    pub fn alpha(&self, x: u32, y: u32) -> u8 {
        if x >= self.width || y >= self.height {
            return 0;
        }
        self.data[y as usize * self.width as usize + x as usize]
    }

    /// Raise coverage over a rectangle to at least `alpha`, clipping to the
    /// mask bounds.
    pub fn fill_rect(&mut self, x: i32, y: i32, w: u32, h: u32, alpha: u8) {
        let x0 = (x.max(0) as u32).min(self.width);
        let y0 = (y.max(0) as u32).min(self.height);
        let x1 = (i64::from(x) + i64::from(w)).clamp(0, i64::from(self.width)) as u32;
        let y1 = (i64::from(y) + i64::from(h)).clamp(0, i64::from(self.height)) as u32;
        let stride = self.width as usize;
        for row in y0..y1 {
            let start = row as usize * stride;
            for px in &mut self.data[start + x0 as usize..start + x1.max(x0) as usize] {
                *px = (*px).max(alpha);
            }
        }
    }

    /// Number of pixels with non-zero coverage.
    #[must_use]
    pub fn covered(&self) -> usize {
        self.data.iter().filter(|&&a| a > 0).count()
    }
}

/// Font size that fits `text` inside a `width` x `height` region.
///
/// Starts from a fraction of the height (capped), shrinks proportionally if
/// the rendered width exceeds the allowed fill, then applies the floor.
pub fn fit_font_size(
    rasterizer: &mut dyn Rasterizer,
    text: &str,
    width: f32,
    height: f32,
    opts: &SamplerOptions,
) -> f32 {
    let mut size = (height * opts.height_ratio).min(opts.max_font_size);
    let measured = rasterizer.measure(text, size.round());
    let allowed = width * opts.width_fill;
    if measured > allowed {
        size *= allowed / measured;
    }
    size.max(opts.min_font_size).round()
}

/// Grid spacing giving roughly `oversample * count` cells over the region.
#[must_use]
pub fn grid_step(width: u32, height: u32, count: usize, oversample: f32) -> u32 {
    let cells = count as f32 * oversample;
    if cells <= 0.0 {
        return 1;
    }
    let area = width as f32 * height as f32;
    ((area / cells).sqrt().round() as u32).max(1)
}

/// Sample exactly `count` glyph-coverage points for `text`.
///
/// Returns an empty set when the text is empty, the region is smaller than
/// [`SamplerOptions::min_region`] on either side, or nothing rendered above
/// the coverage threshold.
pub fn sample_text<R: Rng + ?Sized>(
    rasterizer: &mut dyn Rasterizer,
    text: &str,
    width: f32,
    height: f32,
    count: usize,
    opts: &SamplerOptions,
    rng: &mut R,
) -> Vec<Vec2> {
    if text.is_empty()
        || count == 0
        || width < opts.min_region
        || height < opts.min_region
    {
        return Vec::new();
    }

    let cw = width.round() as u32;
    let ch = height.round() as u32;
    let font_size = fit_font_size(rasterizer, text, cw as f32, ch as f32, opts);

    let mut mask = CoverageMask::new(cw, ch);
    rasterizer.rasterize(text, font_size, &mut mask);

    let step = grid_step(cw, ch, count, opts.oversample);
    let mut hits = Vec::new();
    for y in (0..ch).step_by(step as usize) {
        for x in (0..cw).step_by(step as usize) {
            if mask.alpha(x, y) > opts.alpha_threshold {
                hits.push(Vec2::new(x as f32, y as f32));
            }
        }
    }

    if hits.is_empty() {
        log::debug!("sampler: {text:?} produced no coverage at {font_size}px");
        return Vec::new();
    }

    hits.shuffle(rng);
    let found = hits.len();
    log::debug!(
        "sampler: {text:?} at {font_size}px, step {step}: {found} hits for {count} points"
    );

    if found >= count {
        hits.truncate(count);
        return hits;
    }

    let jitter = opts.pad_jitter;
    for i in found..count {
        let base = hits[i % found];
        let offset = if jitter > 0.0 {
            Vec2::new(
                rng.random_range(-jitter..jitter),
                rng.random_range(-jitter..jitter),
            )
        } else {
            Vec2::ZERO
        };
        hits.push(base + offset);
    }
    hits
}

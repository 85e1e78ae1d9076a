//! Font-free rasterizer for tests.

use super::{CoverageMask, Rasterizer};

/// Advance per character as a fraction of the font size.
const ADVANCE: f32 = 0.6;
/// Filled cell width as a fraction of the font size.
const CELL_WIDTH: f32 = 0.5;
/// Filled cell height as a fraction of the font size.
const CELL_HEIGHT: f32 = 0.7;

/// Draws every non-whitespace character as a solid block.
#[derive(Debug, Clone)]
pub(crate) struct BlockRasterizer {
    pub(crate) ready: bool,
    pub(crate) measure_calls: usize,
    pub(crate) rasterize_calls: usize,
}

impl BlockRasterizer {
    pub(crate) fn new() -> Self {
        Self {
            ready: true,
            measure_calls: 0,
            rasterize_calls: 0,
        }
    }

    pub(crate) fn pending() -> Self {
        Self {
            ready: false,
            ..Self::new()
        }
    }
}

impl Rasterizer for BlockRasterizer {
    fn is_ready(&self) -> bool {
        self.ready
    }

    fn measure(&mut self, text: &str, font_size: f32) -> f32 {
        self.measure_calls += 1;
        text.chars().count() as f32 * font_size * ADVANCE
    }

    fn rasterize(&mut self, text: &str, font_size: f32, mask: &mut CoverageMask) {
        self.rasterize_calls += 1;
        let advance = font_size * ADVANCE;
        let total = text.chars().count() as f32 * advance;
        let left = (mask.width() as f32 - total) / 2.0;
        let top = (mask.height() as f32 - font_size * CELL_HEIGHT) / 2.0;
        let w = (font_size * CELL_WIDTH).round() as u32;
        let h = (font_size * CELL_HEIGHT).round() as u32;
        for (i, ch) in text.chars().enumerate() {
            if ch.is_whitespace() {
                continue;
            }
            let x = left + i as f32 * advance;
            mask.fill_rect(x.round() as i32, top.round() as i32, w, h, 255);
        }
    }
}

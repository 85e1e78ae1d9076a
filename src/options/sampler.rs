use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Text rasterization and coverage sampling parameters.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Sampler", inline)]
#[serde(default)]
pub struct SamplerOptions {
    /// Font family used for rasterization (rendered bold).
    #[schemars(title = "Font Family")]
    pub font_family: String,
    /// Regions narrower or shorter than this yield no samples.
    #[schemars(skip)]
    pub min_region: f32,
    /// Initial font size as a fraction of region height.
    #[schemars(skip)]
    pub height_ratio: f32,
    /// Upper bound on the font size.
    #[schemars(title = "Max Font Size", range(min = 8.0, max = 400.0))]
    pub max_font_size: f32,
    /// Lower bound on the font size, applied after width fitting.
    #[schemars(title = "Min Font Size", range(min = 4.0, max = 100.0))]
    pub min_font_size: f32,
    /// Fraction of region width the rendered string may occupy.
    #[schemars(title = "Width Fill", range(min = 0.1, max = 1.0), extend("step" = 0.01))]
    pub width_fill: f32,
    /// Grid oversampling factor relative to the requested point count.
    #[schemars(skip)]
    pub oversample: f32,
    /// Coverage (0..=255) a grid cell must exceed to count as glyph.
    #[schemars(skip)]
    pub alpha_threshold: u8,
    /// Half-width of the random offset applied to padding points.
    #[schemars(skip)]
    pub pad_jitter: f32,
}

impl Default for SamplerOptions {
    fn default() -> Self {
        Self {
            font_family: "Crimson Pro".to_owned(),
            min_region: 10.0,
            height_ratio: 0.38,
            max_font_size: 80.0,
            min_font_size: 14.0,
            width_fill: 0.85,
            oversample: 6.0,
            alpha_threshold: 80,
            pad_jitter: 1.5,
        }
    }
}

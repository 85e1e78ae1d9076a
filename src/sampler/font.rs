//! `cosmic-text` backed rasterizer.

use cosmic_text::{
    fontdb, Attrs, Buffer, Color, Family, FontSystem, Metrics, Shaping,
    SwashCache, Weight,
};

use super::{CoverageMask, Rasterizer};

/// Line height as a multiple of the font size.
const LINE_HEIGHT: f32 = 1.2;

/// Shapes and rasterizes text with a bold face of one font family.
///
/// When the family is missing from the font database, text falls back to the
/// generic serif family. [`is_ready`](Rasterizer::is_ready) reports whether
/// the named family has been loaded, unless fallback is explicitly accepted.
pub struct FontRasterizer {
    font_system: FontSystem,
    swash_cache: SwashCache,
    family: String,
    accept_fallback: bool,
}

impl FontRasterizer {
    /// Rasterizer over the system font database.
    ///
    /// Not ready until a face of `family` is in the database; opt into the
    /// serif fallback with [`accepting_fallback`](Self::accepting_fallback).
    #[must_use]
    pub fn new(family: impl Into<String>) -> Self {
        Self {
            font_system: FontSystem::new(),
            swash_cache: SwashCache::new(),
            family: family.into(),
            accept_fallback: false,
        }
    }

    /// Rasterizer with an empty font database. Faces are added with
    /// [`load_font_data`](Self::load_font_data).
    #[must_use]
    pub fn without_system_fonts(family: impl Into<String>) -> Self {
        let font_system = FontSystem::new_with_locale_and_db(
            "en-US".to_owned(),
            fontdb::Database::new(),
        );
        Self {
            font_system,
            swash_cache: SwashCache::new(),
            family: family.into(),
            accept_fallback: false,
        }
    }

    /// Whether a fallback face counts as ready.
    #[must_use]
    pub fn accepting_fallback(mut self, accept: bool) -> Self {
        self.accept_fallback = accept;
        self
    }

    /// Add a font file (TTF/OTF bytes) to the database.
    pub fn load_font_data(&mut self, data: Vec<u8>) {
        self.font_system.db_mut().load_font_data(data);
        log::debug!(
            "font database now holds {} faces",
            self.font_system.db().len()
        );
    }

    /// Configured family name.
    #[must_use]
    pub fn family(&self) -> &str {
        &self.family
    }

    /// Whether a face of the configured family is in the database.
    #[must_use]
    pub fn has_family(&self) -> bool {
        self.font_system.db().faces().any(|face| {
            face.families
                .iter()
                .any(|(name, _)| name.eq_ignore_ascii_case(&self.family))
        })
    }

    fn shape(&mut self, text: &str, font_size: f32) -> Buffer {
        let metrics = Metrics::new(font_size, font_size * LINE_HEIGHT);
        let mut buffer = Buffer::new(&mut self.font_system, metrics);
        buffer.set_size(&mut self.font_system, None, None);

        let family = if self.has_family() {
            Family::Name(&self.family)
        } else {
            Family::Serif
        };
        let attrs = Attrs::new().family(family).weight(Weight::BOLD);
        buffer.set_text(&mut self.font_system, text, &attrs, Shaping::Advanced);
        buffer.shape_until_scroll(&mut self.font_system, false);
        buffer
    }
}

/// Widest line and total height of a shaped buffer.
fn extent(buffer: &Buffer, font_size: f32) -> (f32, f32) {
    let mut width = 0.0_f32;
    let mut lines = 0_u32;
    for run in buffer.layout_runs() {
        width = width.max(run.line_w);
        lines += 1;
    }
    (width, lines as f32 * font_size * LINE_HEIGHT)
}

impl Rasterizer for FontRasterizer {
    fn is_ready(&self) -> bool {
        self.has_family()
            || (self.accept_fallback && !self.font_system.db().is_empty())
    }

    fn measure(&mut self, text: &str, font_size: f32) -> f32 {
        let buffer = self.shape(text, font_size);
        extent(&buffer, font_size).0
    }

    fn rasterize(&mut self, text: &str, font_size: f32, mask: &mut CoverageMask) {
        let buffer = self.shape(text, font_size);
        let (width, height) = extent(&buffer, font_size);
        let dx = ((mask.width() as f32 - width) / 2.0).round() as i32;
        let dy = ((mask.height() as f32 - height) / 2.0).round() as i32;

        buffer.draw(
            &mut self.font_system,
            &mut self.swash_cache,
            Color::rgb(0xFF, 0xFF, 0xFF),
            |x, y, w, h, color| {
                mask.fill_rect(x + dx, y + dy, w, h, color.a());
            },
        );
    }
}

impl std::fmt::Debug for FontRasterizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FontRasterizer")
            .field("family", &self.family)
            .field("accept_fallback", &self.accept_fallback)
            .field("faces", &self.font_system.db().len())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;
    use crate::options::SamplerOptions;
    use crate::sampler::sample_text;

    /// Strict rasterizer over an installed family, preferring common text
    /// faces. `None` on hosts without fonts.
    fn installed() -> Option<FontRasterizer> {
        let probe = FontRasterizer::new("");
        let names: Vec<String> = probe
            .font_system
            .db()
            .faces()
            .flat_map(|face| face.families.iter().map(|(name, _)| name.clone()))
            .collect();
        let family = names
            .iter()
            .find(|name| name.contains("DejaVu") || name.contains("Liberation"))
            .or_else(|| names.iter().find(|name| name.contains("Serif")))
            .or_else(|| names.first())?
            .clone();
        Some(FontRasterizer {
            family,
            ..probe
        })
    }

    /// Bounding box `(min, max)` of covered pixels.
    fn coverage_bounds(mask: &CoverageMask) -> Option<((u32, u32), (u32, u32))> {
        let mut bounds: Option<((u32, u32), (u32, u32))> = None;
        for y in 0..mask.height() {
            for x in 0..mask.width() {
                if mask.alpha(x, y) == 0 {
                    continue;
                }
                let ((x0, y0), (x1, y1)) = bounds.unwrap_or(((x, y), (x, y)));
                bounds = Some(((x0.min(x), y0.min(y)), (x1.max(x), y1.max(y))));
            }
        }
        bounds
    }

    #[test]
    fn missing_family_is_not_ready_without_opt_in() {
        let raster = FontRasterizer::new("No Such Family 7f3a");
        assert!(!raster.has_family());
        assert!(!raster.is_ready());

        let faces = raster.font_system.db().len();
        let raster = raster.accepting_fallback(true);
        assert_eq!(raster.is_ready(), faces > 0);
    }

    #[test]
    fn installed_face_rasterizes_centered_cat() {
        let Some(mut raster) = installed() else {
            return;
        };
        assert!(raster.is_ready());
        assert!(raster.measure("cat", 40.0) > 0.0);

        let mut mask = CoverageMask::new(400, 200);
        raster.rasterize("cat", 76.0, &mut mask);
        let ((x0, y0), (x1, y1)) = coverage_bounds(&mask).expect("glyph coverage");
        assert!(x1 < 400 && y1 < 200);
        let cx = (x0 + x1) as f32 / 2.0;
        let cy = (y0 + y1) as f32 / 2.0;
        assert!((cx - 200.0).abs() < 20.0, "horizontal center {cx}");
        assert!((cy - 100.0).abs() < 30.0, "vertical center {cy}");
    }

    #[test]
    fn installed_face_samples_cat_in_bounds() {
        let Some(mut raster) = installed() else {
            return;
        };
        let mut rng = StdRng::seed_from_u64(9);
        let points = sample_text(
            &mut raster,
            "cat",
            400.0,
            200.0,
            900,
            &SamplerOptions::default(),
            &mut rng,
        );
        assert_eq!(points.len(), 900);
        assert!(points
            .iter()
            .all(|p| (0.0..400.0).contains(&p.x) && (0.0..200.0).contains(&p.y)));
    }

    #[test]
    fn empty_database_is_not_ready() {
        let raster = FontRasterizer::without_system_fonts("Crimson Pro");
        assert!(!raster.is_ready());
        assert!(!raster.has_family());
        assert_eq!(raster.family(), "Crimson Pro");
    }

    #[test]
    fn fallback_still_needs_some_face() {
        let raster = FontRasterizer::without_system_fonts("Crimson Pro")
            .accepting_fallback(true);
        assert!(!raster.is_ready());
    }
}

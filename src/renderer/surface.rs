//! Transparent backing pixmap for the particle overlay.

use glam::Vec2;
use tiny_skia::{Color, Pixmap, Transform};

use crate::error::MorphError;

/// Physical pixel size for a logical size at `scale`.
fn physical_size(logical: Vec2, scale: f32) -> (u32, u32) {
    let w = (logical.x * scale).round().max(0.0) as u32;
    let h = (logical.y * scale).round().max(0.0) as u32;
    (w, h)
}

/// Pixel surface drawn in logical units.
///
/// The pixmap tracks `logical size * scale`; drawing goes through
/// [`transform`](Self::transform) so callers never see physical pixels.
#[derive(Debug, Clone)]
pub struct Surface {
    pixmap: Pixmap,
    logical: Vec2,
    scale: f32,
}

impl Surface {
    /// Allocate a transparent surface.
    pub fn new(logical: Vec2, scale: f32) -> Result<Self, MorphError> {
        let (width, height) = physical_size(logical, scale);
        let pixmap =
            Pixmap::new(width, height).ok_or(MorphError::Surface { width, height })?;
        log::debug!(
            "surface: {width}x{height} px for {}x{} at {scale}x",
            logical.x,
            logical.y
        );
        Ok(Self {
            pixmap,
            logical,
            scale,
        })
    }

    /// Match a new logical size / pixel density.
    ///
    /// Reallocates only when the physical size changes and returns whether it
    /// did. Contents are undefined after a reallocation until the next clear.
    pub fn resize(&mut self, logical: Vec2, scale: f32) -> Result<bool, MorphError> {
        let reallocate = physical_size(logical, scale)
            != (self.pixmap.width(), self.pixmap.height());
        if reallocate {
            *self = Self::new(logical, scale)?;
        } else {
            self.logical = logical;
            self.scale = scale;
        }
        Ok(reallocate)
    }

    /// Clear to fully transparent.
    pub fn clear(&mut self) {
        self.pixmap.fill(Color::TRANSPARENT);
    }

    /// Logical-to-physical transform.
    #[must_use]
    pub fn transform(&self) -> Transform {
        Transform::from_scale(self.scale, self.scale)
    }

    /// Logical size.
    #[must_use]
    pub fn logical_size(&self) -> Vec2 {
        self.logical
    }

    /// Pixel density.
    #[must_use]
    pub fn scale(&self) -> f32 {
        self.scale
    }

    /// Rendered pixels (premultiplied RGBA).
    #[must_use]
    pub fn pixmap(&self) -> &Pixmap {
        &self.pixmap
    }

    pub(crate) fn pixmap_mut(&mut self) -> &mut Pixmap {
        &mut self.pixmap
    }

    /// Number of pixels with non-zero alpha.
    #[must_use]
    pub fn painted_pixels(&self) -> usize {
        self.pixmap.pixels().iter().filter(|p| p.alpha() > 0).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn physical_size_follows_density() {
        let surface = Surface::new(Vec2::new(400.0, 200.0), 2.0).unwrap();
        assert_eq!(surface.pixmap().width(), 800);
        assert_eq!(surface.pixmap().height(), 400);
        assert_eq!(surface.painted_pixels(), 0);
    }

    #[test]
    fn zero_area_is_an_error() {
        let err = Surface::new(Vec2::new(0.0, 200.0), 1.0).unwrap_err();
        assert!(matches!(err, MorphError::Surface { width: 0, height: 200 }));
    }

    #[test]
    fn resize_reallocates_only_on_physical_change() {
        let mut surface = Surface::new(Vec2::new(100.0, 50.0), 1.0).unwrap();
        assert!(!surface.resize(Vec2::new(100.2, 50.0), 1.0).unwrap());
        assert!(surface.resize(Vec2::new(100.0, 50.0), 1.5).unwrap());
        assert_eq!(surface.pixmap().width(), 150);
        assert_eq!(surface.scale(), 1.5);
    }
}

//! Random waypoint clouds around the region center.

use std::f32::consts::TAU;

use glam::Vec2;
use rand::Rng;

use crate::options::{StyleOptions, VisualStyle};

/// Directional drift added on top of the isotropic scatter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScatterBias {
    /// Purely radial.
    None,
    /// Rises and spreads sideways, like smoke.
    Rise,
    /// Sinks, like droplets.
    Fall,
}

impl ScatterBias {
    /// Bias used when `style` scatters.
    #[must_use]
    pub fn for_style(style: VisualStyle) -> Self {
        match style {
            VisualStyle::Diffuse => Self::Rise,
            VisualStyle::Liquid => Self::Fall,
            VisualStyle::Granular | VisualStyle::Disabled => Self::None,
        }
    }

    fn offset<R: Rng + ?Sized>(self, rng: &mut R) -> Vec2 {
        match self {
            Self::None => Vec2::ZERO,
            Self::Rise => Vec2::new(
                (rng.random::<f32>() - 0.5) * 100.0,
                -(40.0 + rng.random::<f32>() * 60.0),
            ),
            Self::Fall => Vec2::new(0.0, 20.0 + rng.random::<f32>() * 50.0),
        }
    }
}

/// An annulus around a center point, optionally drifted by a bias.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScatterCloud {
    /// Annulus center.
    pub center: Vec2,
    /// Inner radius.
    pub inner: f32,
    /// Outer radius.
    pub outer: f32,
    /// Drift applied after the radial placement.
    pub bias: ScatterBias,
}

impl ScatterCloud {
    /// Unbiased ring with radius band `[min, max]`.
    #[must_use]
    pub fn ring(center: Vec2, band: [f32; 2]) -> Self {
        Self {
            center,
            inner: band[0],
            outer: band[1],
            bias: ScatterBias::None,
        }
    }

    /// Mid-transition cloud for `style` over a region of `size`.
    ///
    /// Distance runs from `scatter_base` out to `scatter_base +
    /// scatter_spread * min(width, height)`.
    #[must_use]
    pub fn for_style(style: VisualStyle, size: Vec2, styles: &StyleOptions) -> Self {
        let reach = styles.scatter_spread * size.x.min(size.y);
        Self {
            center: size / 2.0,
            inner: styles.scatter_base,
            outer: styles.scatter_base + reach,
            bias: ScatterBias::for_style(style),
        }
    }

    /// Draw one point from the cloud.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec2 {
        let angle = rng.random::<f32>() * TAU;
        let dist = self.inner + rng.random::<f32>() * (self.outer - self.inner);
        self.center + Vec2::from_angle(angle) * dist + self.bias.offset(rng)
    }
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;

    #[test]
    fn ring_points_stay_in_band() {
        let mut rng = StdRng::seed_from_u64(4);
        let center = Vec2::new(200.0, 100.0);
        let ring = ScatterCloud::ring(center, [50.0, 150.0]);
        for _ in 0..500 {
            let d = ring.sample(&mut rng).distance(center);
            assert!((50.0 - 1e-3..=150.0 + 1e-3).contains(&d), "distance {d}");
        }
    }

    #[test]
    fn default_style_reach_scales_with_short_side() {
        let styles = StyleOptions::default();
        let cloud = ScatterCloud::for_style(
            VisualStyle::Granular,
            Vec2::new(400.0, 200.0),
            &styles,
        );
        assert_eq!(cloud.center, Vec2::new(200.0, 100.0));
        assert_eq!(cloud.inner, 30.0);
        assert!((cloud.outer - (30.0 + 0.35 * 200.0)).abs() < 1e-4);
        assert_eq!(cloud.bias, ScatterBias::None);
    }

    #[test]
    fn biases_push_rise_up_and_fall_down() {
        let mut rng = StdRng::seed_from_u64(9);
        let styles = StyleOptions::default();
        let size = Vec2::new(400.0, 200.0);
        let rise = ScatterCloud::for_style(VisualStyle::Diffuse, size, &styles);
        let fall = ScatterCloud::for_style(VisualStyle::Liquid, size, &styles);

        let n = 400;
        let mean_rise: f32 =
            (0..n).map(|_| rise.sample(&mut rng).y).sum::<f32>() / n as f32;
        let mean_fall: f32 =
            (0..n).map(|_| fall.sample(&mut rng).y).sum::<f32>() / n as f32;
        assert!(mean_rise < 100.0 - 40.0, "rise mean {mean_rise}");
        assert!(mean_fall > 100.0 + 20.0, "fall mean {mean_fall}");
    }
}

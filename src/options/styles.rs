use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Visual treatment applied to the particle cloud.
#[derive(
    Debug,
    Clone,
    Copy,
    Serialize,
    Deserialize,
    PartialEq,
    Eq,
    Hash,
    Default,
    JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum VisualStyle {
    /// Rotating square grains.
    #[default]
    Granular,
    /// Soft circles that swell mid-transition.
    Diffuse,
    /// Circles with a faint outline ring.
    Liquid,
    /// No sampling, no particles, nothing drawn.
    Disabled,
}

impl VisualStyle {
    /// Whether this style skips all engine work.
    #[must_use]
    pub fn is_disabled(self) -> bool {
        matches!(self, Self::Disabled)
    }
}

/// Particle count and size range for one style.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(inline)]
pub struct StyleProfile {
    /// Number of particles (and sample points) in the pool.
    #[schemars(title = "Particles", range(min = 1, max = 5000))]
    pub particle_count: usize,
    /// Inclusive size range (side length or radius) in logical units.
    #[schemars(skip)]
    pub size_range: [f32; 2],
}

/// Per-style profiles plus the geometry of spawn and scatter clouds.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Styles", inline)]
#[serde(default)]
pub struct StyleOptions {
    /// Profile for [`VisualStyle::Granular`].
    #[schemars(title = "Granular")]
    pub granular: StyleProfile,
    /// Profile for [`VisualStyle::Diffuse`].
    #[schemars(title = "Diffuse")]
    pub diffuse: StyleProfile,
    /// Profile for [`VisualStyle::Liquid`].
    #[schemars(title = "Liquid")]
    pub liquid: StyleProfile,
    /// Radius band (min, max) of the ring new pools spawn on.
    #[schemars(skip)]
    pub spawn_ring: [f32; 2],
    /// Radius band (min, max) of the cloud a text change snaps through.
    #[schemars(skip)]
    pub retarget_ring: [f32; 2],
    /// Minimum scatter distance from the region center.
    #[schemars(skip)]
    pub scatter_base: f32,
    /// Extra scatter distance as a fraction of the shorter region side.
    #[schemars(title = "Scatter Spread", range(min = 0.0, max = 1.0), extend("step" = 0.01))]
    pub scatter_spread: f32,
}

impl StyleOptions {
    /// Profile for `style`, or `None` when the style is disabled.
    #[must_use]
    pub fn profile(&self, style: VisualStyle) -> Option<&StyleProfile> {
        match style {
            VisualStyle::Granular => Some(&self.granular),
            VisualStyle::Diffuse => Some(&self.diffuse),
            VisualStyle::Liquid => Some(&self.liquid),
            VisualStyle::Disabled => None,
        }
    }
}

impl Default for StyleOptions {
    fn default() -> Self {
        Self {
            granular: StyleProfile {
                particle_count: 900,
                size_range: [1.5, 3.5],
            },
            diffuse: StyleProfile {
                particle_count: 550,
                size_range: [4.0, 10.0],
            },
            liquid: StyleProfile {
                particle_count: 750,
                size_range: [2.0, 5.0],
            },
            spawn_ring: [50.0, 150.0],
            retarget_ring: [40.0, 120.0],
            scatter_base: 30.0,
            scatter_spread: 0.35,
        }
    }
}

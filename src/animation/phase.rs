//! Observable transition phase and per-frame draw parameters.

use web_time::Duration;

use crate::color::Rgb;

/// Where the controller is in its cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TransitionPhase {
    /// Settled on the home glyph, wobbling in place.
    #[default]
    Idle,
    /// Dissolving from origins toward the scatter cloud.
    Scattering,
    /// Reforming from the scatter cloud onto the homes.
    Converging,
    /// Fully dissolved (single-text hide); nothing is drawn.
    Hidden,
}

impl TransitionPhase {
    /// Whether a timed transition is running.
    #[must_use]
    pub fn is_transitioning(self) -> bool {
        matches!(self, Self::Scattering | Self::Converging)
    }
}

/// Uniform draw parameters for one frame.
///
/// Color and opacity apply to the whole pool; only rotation varies per
/// particle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameState {
    /// Phase after this frame's update.
    pub phase: TransitionPhase,
    /// Pool-wide opacity before style scaling.
    pub opacity: f32,
    /// Pool-wide fill color.
    pub color: Rgb,
    /// Time since the (possibly backdated) transition start; zero when idle.
    pub elapsed: Duration,
    /// `elapsed` over the full transition length, in `0.0..=1.0`.
    pub progress: f32,
}

impl FrameState {
    pub(crate) fn idle(color: Rgb) -> Self {
        Self {
            phase: TransitionPhase::Idle,
            opacity: 1.0,
            color,
            elapsed: Duration::ZERO,
            progress: 0.0,
        }
    }

    pub(crate) fn hidden(color: Rgb) -> Self {
        Self {
            phase: TransitionPhase::Hidden,
            opacity: 0.0,
            color,
            elapsed: Duration::ZERO,
            progress: 0.0,
        }
    }

    /// Whether anything should be drawn this frame.
    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.phase != TransitionPhase::Hidden && self.opacity > 0.0
    }
}

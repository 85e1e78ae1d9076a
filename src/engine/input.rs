//! Per-frame values supplied by the host.

use glam::Vec2;

use crate::animation::TransitionPhase;
use crate::color::Rgb;
use crate::options::VisualStyle;

/// One of the two textual states being alternated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Side {
    /// The original form (also "shown" in single-text mode).
    #[default]
    Source,
    /// The alternate form (also "hidden" in single-text mode).
    Target,
}

impl Side {
    /// The other side.
    #[must_use]
    pub fn flip(self) -> Self {
        match self {
            Self::Source => Self::Target,
            Self::Target => Self::Source,
        }
    }

    pub(crate) fn index(self) -> usize {
        match self {
            Self::Source => 0,
            Self::Target => 1,
        }
    }
}

/// How many texts the engine alternates between.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SideMode {
    /// One text that is revealed ([`Side::Source`]) or dissolved away
    /// ([`Side::Target`]).
    Single,
    /// Two texts morphing into each other.
    #[default]
    Pair,
}

impl SideMode {
    /// Sides that carry text in this mode.
    #[must_use]
    pub fn sides(self) -> &'static [Side] {
        match self {
            Self::Single => &[Side::Source],
            Self::Pair => &[Side::Source, Side::Target],
        }
    }
}

/// Host state read once per frame.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameInput {
    /// Text of [`Side::Source`].
    pub source_text: String,
    /// Text of [`Side::Target`]; ignored in [`SideMode::Single`].
    pub target_text: String,
    /// Side the particles should currently form.
    pub active_side: Side,
    /// Paint color of [`Side::Source`].
    pub source_color: Rgb,
    /// Paint color of [`Side::Target`].
    pub target_color: Rgb,
    /// Visual treatment.
    pub style: VisualStyle,
}

impl FrameInput {
    /// Two-sided input with white source and target.
    #[must_use]
    pub fn pair(source: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            source_text: source.into(),
            target_text: target.into(),
            active_side: Side::Source,
            source_color: [1.0; 3],
            target_color: [1.0; 3],
            style: VisualStyle::default(),
        }
    }

    /// Text for `side`.
    #[must_use]
    pub fn text(&self, side: Side) -> &str {
        match side {
            Side::Source => &self.source_text,
            Side::Target => &self.target_text,
        }
    }

    /// Color for `side`.
    #[must_use]
    pub fn color(&self, side: Side) -> Rgb {
        match side {
            Side::Source => self.source_color,
            Side::Target => self.target_color,
        }
    }
}

/// On-screen size of the overlay and the host's pixel density.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    /// Logical width.
    pub width: f32,
    /// Logical height.
    pub height: f32,
    /// Physical pixels per logical unit.
    pub scale: f32,
}

impl Viewport {
    /// Viewport at 1x density.
    #[must_use]
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            scale: 1.0,
        }
    }

    /// Same viewport at a different density.
    #[must_use]
    pub fn with_scale(mut self, scale: f32) -> Self {
        self.scale = scale;
        self
    }

    /// Logical size as a vector.
    #[must_use]
    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }

    /// Whether there is anything to draw into.
    #[must_use]
    pub fn is_drawable(&self) -> bool {
        self.width > 0.0 && self.height > 0.0 && self.scale > 0.0
    }
}

/// What one engine frame did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameOutcome {
    /// Style is disabled: no sampling, no particle work; the surface is
    /// left cleared.
    Disabled,
    /// The text face is not loaded yet; nothing was sampled.
    AwaitingFace,
    /// Degenerate viewport or surface; retried next frame.
    Skipped,
    /// The surface was redrawn.
    Drawn {
        /// Particles painted (zero while hidden or before the pool exists).
        particles: usize,
        /// Controller phase after this frame.
        phase: TransitionPhase,
    },
}

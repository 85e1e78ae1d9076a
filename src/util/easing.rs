//! Easing functions for transition interpolation.
//!
//! The scatter leg accelerates away from the glyph ([`EasingFunction::QuadraticIn`])
//! and the converge leg decelerates into it ([`EasingFunction::CubicOut`]).

/// Easing function variants for animation curves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EasingFunction {
    /// Quadratic ease-in (slow start, fast end).
    QuadraticIn,
    /// Cubic ease-out (fast start, slow end).
    CubicOut,
}

impl EasingFunction {
    /// Evaluate the easing function at time t.
    ///
    /// Input t is clamped to [0.0, 1.0].
    /// Returns the eased value, also in [0.0, 1.0].
    #[inline]
    #[must_use]
    pub fn evaluate(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);

        match self {
            EasingFunction::QuadraticIn => t * t,
            EasingFunction::CubicOut => {
                let omt = 1.0 - t;
                1.0 - omt * omt * omt
            }
        }
    }
}

/// Linear interpolation between `a` and `b`.
#[inline]
#[must_use]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a * (1.0 - t) + b * t
}

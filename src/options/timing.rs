use web_time::Duration;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Phase durations and idle motion parameters.
///
/// Durations are shared by every visual style: a full transition always
/// lasts `scatter_ms + converge_ms`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Timing", inline)]
#[serde(default)]
pub struct TimingOptions {
    /// Length of the dissolve leg in milliseconds.
    #[schemars(title = "Scatter (ms)", range(min = 0, max = 3000))]
    pub scatter_ms: u64,
    /// Length of the reform leg in milliseconds.
    #[schemars(title = "Converge (ms)", range(min = 0, max = 3000))]
    pub converge_ms: u64,
    /// Opacity reached at the scatter/converge boundary.
    #[schemars(title = "Opacity Floor", range(min = 0.0, max = 1.0), extend("step" = 0.01))]
    pub opacity_floor: f32,
    /// Idle oscillation amplitude (x, y) in logical units.
    #[schemars(skip)]
    pub wobble_amplitude: [f32; 2],
    /// Idle oscillation angular frequency (x, y) in radians per second.
    #[schemars(skip)]
    pub wobble_frequency: [f32; 2],
}

impl TimingOptions {
    /// Dissolve leg as a [`Duration`].
    #[must_use]
    pub fn scatter(&self) -> Duration {
        Duration::from_millis(self.scatter_ms)
    }

    /// Reform leg as a [`Duration`].
    #[must_use]
    pub fn converge(&self) -> Duration {
        Duration::from_millis(self.converge_ms)
    }

    /// Full transition length (scatter + converge).
    #[must_use]
    pub fn total(&self) -> Duration {
        self.scatter() + self.converge()
    }

    /// Largest distance a wobbling particle can drift from its home.
    #[must_use]
    pub fn wobble_reach(&self) -> f32 {
        let [ax, ay] = self.wobble_amplitude;
        ax.hypot(ay)
    }
}

impl Default for TimingOptions {
    fn default() -> Self {
        Self {
            scatter_ms: 480,
            converge_ms: 580,
            opacity_floor: 0.35,
            wobble_amplitude: [1.2, 1.0],
            wobble_frequency: [0.8, 0.6],
        }
    }
}

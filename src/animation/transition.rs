//! Scatter → converge transition state machine.
//!
//! ```text
//! Idle --(side toggled)--> Scattering --> Converging --> Idle
//! Idle --(text changed)--> Converging (backdated, scatter skipped) --> Idle
//! Idle --(hide)--> Scattering (fade to 0) --> Hidden --(reveal)--> Converging
//! ```
//!
//! Every entry point first brings particle positions up to date at `now`, so
//! a transition started mid-flight departs from where particles are actually
//! drawn rather than from their stale homes.

use glam::Vec2;
use rand::Rng;
use web_time::{Duration, Instant};

use super::phase::{FrameState, TransitionPhase};
use crate::color::Rgb;
use crate::options::TimingOptions;
use crate::particles::{ParticlePool, ScatterCloud};
use crate::util::easing::{lerp, EasingFunction};

/// Easing of the dissolve leg.
const SCATTER_EASING: EasingFunction = EasingFunction::QuadraticIn;
/// Easing of the reform leg.
const CONVERGE_EASING: EasingFunction = EasingFunction::CubicOut;
/// Phase multiplier decorrelating the vertical wobble from the horizontal.
const WOBBLE_PHASE_SKEW: f32 = 1.3;

/// What a running transition ends in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TransitionKind {
    /// Scatter then converge onto the homes.
    Morph,
    /// Scatter while fading out, then hold hidden.
    Dissolve,
}

#[derive(Debug, Clone, Copy)]
struct Running {
    start: Instant,
    /// Time already considered elapsed at `start` (backdating).
    skip: Duration,
    kind: TransitionKind,
}

/// Normalized progress through a leg of length `duration`.
fn fraction(elapsed: Duration, duration: Duration) -> f32 {
    if duration.is_zero() {
        1.0
    } else {
        (elapsed.as_secs_f32() / duration.as_secs_f32()).min(1.0)
    }
}

/// Drives a [`ParticlePool`] through timed transitions.
#[derive(Debug, Clone)]
pub struct TransitionController {
    timing: TimingOptions,
    /// Time base of the idle wobble.
    epoch: Instant,
    running: Option<Running>,
    hidden: bool,
    from_color: Rgb,
    to_color: Rgb,
}

impl TransitionController {
    /// Idle controller. `epoch` anchors the idle wobble clock.
    #[must_use]
    pub fn new(timing: TimingOptions, epoch: Instant) -> Self {
        Self {
            timing,
            epoch,
            running: None,
            hidden: false,
            from_color: [1.0; 3],
            to_color: [1.0; 3],
        }
    }

    /// Timing this controller was built with.
    #[must_use]
    pub fn timing(&self) -> &TimingOptions {
        &self.timing
    }

    /// Full length of a scatter + converge cycle.
    #[must_use]
    pub fn total_duration(&self) -> Duration {
        self.timing.total()
    }

    /// Colors of the current (or last) transition's two legs.
    #[must_use]
    pub fn colors(&self) -> (Rgb, Rgb) {
        (self.from_color, self.to_color)
    }

    /// Time into the running transition, including any backdating.
    #[must_use]
    pub fn elapsed(&self, now: Instant) -> Option<Duration> {
        self.running
            .map(|r| now.saturating_duration_since(r.start) + r.skip)
    }

    /// Phase at `now` without advancing particles.
    #[must_use]
    pub fn phase(&self, now: Instant) -> TransitionPhase {
        let Some(running) = self.running else {
            return if self.hidden {
                TransitionPhase::Hidden
            } else {
                TransitionPhase::Idle
            };
        };
        let elapsed = now.saturating_duration_since(running.start) + running.skip;
        match running.kind {
            TransitionKind::Morph if elapsed >= self.timing.total() => {
                TransitionPhase::Idle
            }
            TransitionKind::Dissolve if elapsed >= self.timing.scatter() => {
                TransitionPhase::Hidden
            }
            _ if elapsed < self.timing.scatter() => TransitionPhase::Scattering,
            _ => TransitionPhase::Converging,
        }
    }

    /// Enter the converge leg directly, backdated past the scatter leg.
    ///
    /// Used on first appearance, where particles travel from their spawn
    /// waypoint onto the glyph without replaying a dissolve.
    pub fn appear(&mut self, now: Instant, color: Rgb) {
        self.running = Some(Running {
            start: now,
            skip: self.timing.scatter(),
            kind: TransitionKind::Morph,
        });
        self.hidden = false;
        self.from_color = color;
        self.to_color = color;
    }

    /// Full scatter-then-converge morph onto `samples`.
    ///
    /// A no-op returning `false` when `samples` is empty: the target side
    /// has nothing to show yet.
    pub fn morph<R: Rng + ?Sized>(
        &mut self,
        pool: &mut ParticlePool,
        samples: &[Vec2],
        cloud: &ScatterCloud,
        colors: (Rgb, Rgb),
        now: Instant,
        rng: &mut R,
    ) -> bool {
        if samples.is_empty() {
            return false;
        }
        let _ = self.update(pool, now, self.to_color);
        pool.begin_morph(samples, cloud, rng);
        self.running = Some(Running {
            start: now,
            skip: Duration::ZERO,
            kind: TransitionKind::Morph,
        });
        self.hidden = false;
        (self.from_color, self.to_color) = colors;
        log::debug!(
            "morph: {} particles over {:?}",
            pool.len(),
            self.timing.total()
        );
        true
    }

    /// Snap onto new text: rebind homes and enter the converge leg directly.
    pub fn retarget<R: Rng + ?Sized>(
        &mut self,
        pool: &mut ParticlePool,
        samples: &[Vec2],
        ring: &ScatterCloud,
        color: Rgb,
        now: Instant,
        rng: &mut R,
    ) {
        let _ = self.update(pool, now, self.to_color);
        pool.retarget(samples, ring, rng);
        self.appear(now, color);
        log::debug!("retarget: {} particles onto {} samples", pool.len(), samples.len());
    }

    /// Scatter while fading to nothing, then hold [`TransitionPhase::Hidden`].
    ///
    /// Returns `false` if already hidden.
    pub fn dissolve<R: Rng + ?Sized>(
        &mut self,
        pool: &mut ParticlePool,
        cloud: &ScatterCloud,
        color: Rgb,
        now: Instant,
        rng: &mut R,
    ) -> bool {
        if self.hidden {
            return false;
        }
        let _ = self.update(pool, now, self.to_color);
        pool.begin_dissolve(cloud, rng);
        self.running = Some(Running {
            start: now,
            skip: Duration::ZERO,
            kind: TransitionKind::Dissolve,
        });
        self.from_color = color;
        self.to_color = color;
        true
    }

    /// Advance particles to `now` and report this frame's draw parameters.
    ///
    /// `idle_color` is used whenever no transition is running, so a host
    /// recoloring the active side takes effect immediately.
    pub fn update(
        &mut self,
        pool: &mut ParticlePool,
        now: Instant,
        idle_color: Rgb,
    ) -> FrameState {
        let Some(running) = self.running else {
            if self.hidden {
                return FrameState::hidden(idle_color);
            }
            self.wobble(pool, now);
            return FrameState::idle(idle_color);
        };

        let elapsed = now.saturating_duration_since(running.start) + running.skip;
        let scatter = self.timing.scatter();
        let total = self.timing.total();
        let floor = self.timing.opacity_floor;
        let progress = fraction(elapsed, total);

        match running.kind {
            TransitionKind::Morph if elapsed >= total => {
                for p in pool.iter_mut() {
                    p.position = p.home;
                }
                self.running = None;
                FrameState::idle(idle_color)
            }
            TransitionKind::Dissolve if elapsed >= scatter => {
                self.running = None;
                self.hidden = true;
                FrameState::hidden(idle_color)
            }
            kind if elapsed < scatter => {
                let t = SCATTER_EASING.evaluate(fraction(elapsed, scatter));
                for p in pool.iter_mut() {
                    p.position = p.origin.lerp(p.scatter, t);
                }
                let end = if kind == TransitionKind::Dissolve { 0.0 } else { floor };
                FrameState {
                    phase: TransitionPhase::Scattering,
                    opacity: lerp(1.0, end, t),
                    color: self.from_color,
                    elapsed,
                    progress,
                }
            }
            _ => {
                let leg = elapsed.saturating_sub(scatter);
                let t = CONVERGE_EASING.evaluate(fraction(leg, self.timing.converge()));
                for p in pool.iter_mut() {
                    p.position = p.scatter.lerp(p.home, t);
                }
                FrameState {
                    phase: TransitionPhase::Converging,
                    opacity: lerp(floor, 1.0, t),
                    color: self.to_color,
                    elapsed,
                    progress,
                }
            }
        }
    }

    fn wobble(&self, pool: &mut ParticlePool, now: Instant) {
        let time = now.saturating_duration_since(self.epoch).as_secs_f32();
        let [ax, ay] = self.timing.wobble_amplitude;
        let [fx, fy] = self.timing.wobble_frequency;
        for p in pool.iter_mut() {
            let dx = (time * fx + p.wobble_phase).sin() * ax;
            let dy = (time * fy + p.wobble_phase * WOBBLE_PHASE_SKEW).cos() * ay;
            p.position = p.home + Vec2::new(dx, dy);
        }
    }
}

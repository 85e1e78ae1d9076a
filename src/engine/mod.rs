//! Frame-driven orchestration of sampling, transitions and drawing.
//!
//! [`MorphEngine::frame`] is called once per display frame with the host's
//! current [`FrameInput`]. It compares the input against what it saw last
//! frame and decides what to do:
//!
//! - a text or size change resamples the affected sides,
//! - the first frame with any usable samples creates the pool,
//! - a text change on a live pool retargets it (converge only),
//! - a side toggle alone runs a full morph (or a dissolve / reveal in
//!   [`SideMode::Single`]),
//!
//! and then advances the controller and redraws the surface.

pub mod frame_loop;
mod input;

use glam::Vec2;
use rand::rngs::StdRng;
use rand::SeedableRng;
use web_time::Instant;

pub use frame_loop::{FrameHandle, FrameLoop, FrameScheduler, ManualScheduler};
pub use input::{FrameInput, FrameOutcome, Side, SideMode, Viewport};

use crate::animation::{TransitionController, TransitionPhase};
use crate::color::Rgb;
use crate::error::MorphError;
use crate::options::{Options, VisualStyle};
use crate::particles::{Particle, ParticlePool, ScatterCloud};
use crate::renderer::{render_frame, DrawTreatment, Surface};
use crate::sampler::{sample_text, Rasterizer};

/// What the previous frame was computed from.
#[derive(Debug, Clone, Default)]
struct FrameCache {
    texts: [Option<String>; 2],
    size: Option<Vec2>,
    side: Option<Side>,
}

/// Particle morph engine over a text rasterizer `R`.
pub struct MorphEngine<R: Rasterizer> {
    options: Options,
    mode: SideMode,
    rasterizer: R,
    rng: StdRng,
    /// Latched once the rasterizer reports its face loaded.
    face_ready: bool,
    controller: TransitionController,
    pool: Option<ParticlePool>,
    samples: [Vec<Vec2>; 2],
    cache: FrameCache,
    surface: Option<Surface>,
}

impl<R: Rasterizer> MorphEngine<R> {
    /// Engine in `mode`. `epoch` anchors the idle wobble clock.
    ///
    /// Randomness is seeded from [`Options::seed`] when set, otherwise from
    /// the thread RNG.
    pub fn new(
        options: Options,
        mode: SideMode,
        rasterizer: R,
        epoch: Instant,
    ) -> Self {
        let rng = match options.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_rng(&mut rand::rng()),
        };
        let controller = TransitionController::new(options.timing.clone(), epoch);
        Self {
            options,
            mode,
            rasterizer,
            rng,
            face_ready: false,
            controller,
            pool: None,
            samples: [Vec::new(), Vec::new()],
            cache: FrameCache::default(),
            surface: None,
        }
    }

    /// Run one frame.
    pub fn frame(
        &mut self,
        now: Instant,
        input: &FrameInput,
        viewport: Viewport,
    ) -> FrameOutcome {
        let style = input.style;
        if style.is_disabled() {
            if let Some(surface) = self.surface.as_mut() {
                surface.clear();
            }
            return FrameOutcome::Disabled;
        }

        if !self.face_ready {
            if !self.rasterizer.is_ready() {
                return FrameOutcome::AwaitingFace;
            }
            log::info!("text face ready, sampling enabled");
            self.face_ready = true;
        }

        if !viewport.is_drawable() {
            return FrameOutcome::Skipped;
        }
        let size = viewport.size();
        if let Err(err) = self.ensure_surface(viewport) {
            log::warn!("skipping frame: {err}");
            return FrameOutcome::Skipped;
        }

        let resized = self.cache.size != Some(size);
        if resized {
            self.cache.size = Some(size);
        }
        let mut text_changed = false;
        for &side in self.mode.sides() {
            let text = input.text(side);
            let slot = &mut self.cache.texts[side.index()];
            let changed = slot.as_deref() != Some(text);
            if changed {
                *slot = Some(text.to_owned());
                text_changed = true;
            }
            if changed || resized {
                self.resample(side, text, size, style);
            }
        }

        let side = input.active_side;
        let created = self.pool.is_none() && self.create_pool(side, size, style, input, now);

        if !created {
            if let Some(mut pool) = self.pool.take() {
                let handled =
                    text_changed && self.on_text_change(&mut pool, side, size, input, now);
                if !handled && self.cache.side.is_some_and(|prev| prev != side) {
                    self.on_side_toggle(&mut pool, side, size, style, input, now);
                }
                self.pool = Some(pool);
            } else if self.cache.side.is_none() {
                self.cache.side = Some(side);
            }
        }

        self.draw(now, style, input.color(self.display_side(side)))
    }

    /// Controller phase at `now`, without advancing anything.
    #[must_use]
    pub fn phase(&self, now: Instant) -> TransitionPhase {
        self.controller.phase(now)
    }

    /// Live particles; empty before the pool is created.
    #[must_use]
    pub fn particles(&self) -> &[Particle] {
        self.pool.as_ref().map_or(&[], ParticlePool::particles)
    }

    /// Current sample set of `side`.
    #[must_use]
    pub fn sample_set(&self, side: Side) -> &[Vec2] {
        &self.samples[side.index()]
    }

    /// Surface painted by the last drawn frame.
    #[must_use]
    pub fn surface(&self) -> Option<&Surface> {
        self.surface.as_ref()
    }

    /// Whether the particle pool exists.
    #[must_use]
    pub fn is_started(&self) -> bool {
        self.pool.is_some()
    }

    /// Whether the rasterizer's face has been seen ready.
    #[must_use]
    pub fn is_face_ready(&self) -> bool {
        self.face_ready
    }

    /// Options the engine runs with.
    #[must_use]
    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Side mode the engine was built with.
    #[must_use]
    pub fn mode(&self) -> SideMode {
        self.mode
    }

    /// The text rasterizer.
    #[must_use]
    pub fn rasterizer(&self) -> &R {
        &self.rasterizer
    }

    /// Mutable access to the rasterizer, e.g. to load font data.
    pub fn rasterizer_mut(&mut self) -> &mut R {
        &mut self.rasterizer
    }

    fn ensure_surface(&mut self, viewport: Viewport) -> Result<(), MorphError> {
        match &mut self.surface {
            Some(surface) => {
                let _ = surface.resize(viewport.size(), viewport.scale)?;
            }
            None => {
                self.surface = Some(Surface::new(viewport.size(), viewport.scale)?);
            }
        }
        Ok(())
    }

    fn resample(&mut self, side: Side, text: &str, size: Vec2, style: VisualStyle) {
        let count = match (&self.pool, self.options.styles.profile(style)) {
            (Some(pool), _) => pool.len(),
            (None, Some(profile)) => profile.particle_count,
            (None, None) => 0,
        };
        self.samples[side.index()] = sample_text(
            &mut self.rasterizer,
            text,
            size.x,
            size.y,
            count,
            &self.options.sampler,
            &mut self.rng,
        );
    }

    /// Create the pool homed on the active side. Returns whether it did.
    fn create_pool(
        &mut self,
        side: Side,
        size: Vec2,
        style: VisualStyle,
        input: &FrameInput,
        now: Instant,
    ) -> bool {
        if self.mode == SideMode::Single && side == Side::Target {
            return false;
        }
        if self.samples.iter().all(Vec::is_empty) {
            return false;
        }
        let Some(count) = self.options.styles.profile(style).map(|p| p.particle_count) else {
            return false;
        };
        // Samples taken under another style's count would misalign indices.
        for &s in self.mode.sides() {
            let len = self.samples[s.index()].len();
            if len != 0 && len != count {
                self.resample(s, input.text(s), size, style);
            }
        }
        let Some(profile) = self.options.styles.profile(style) else {
            return false;
        };
        let spawn = ScatterCloud::ring(size / 2.0, self.options.styles.spawn_ring);
        let pool = ParticlePool::create(
            &self.samples[side.index()],
            size,
            profile,
            &spawn,
            &mut self.rng,
        );
        log::info!("particle pool created: {} particles ({style:?})", pool.len());
        self.controller.appear(now, input.color(side));
        self.pool = Some(pool);
        self.cache.side = Some(side);
        true
    }

    /// Retarget onto changed text. Returns `false` when the change should
    /// wait for a reveal instead.
    fn on_text_change(
        &mut self,
        pool: &mut ParticlePool,
        side: Side,
        size: Vec2,
        input: &FrameInput,
        now: Instant,
    ) -> bool {
        if self.mode == SideMode::Single
            && (side == Side::Target
                || self.controller.phase(now) == TransitionPhase::Hidden)
        {
            // Hidden text rebinds on reveal.
            return false;
        }
        self.cache.side = Some(side);
        let ring = ScatterCloud::ring(size / 2.0, self.options.styles.retarget_ring);
        self.controller.retarget(
            pool,
            &self.samples[side.index()],
            &ring,
            input.color(side),
            now,
            &mut self.rng,
        );
        true
    }

    fn on_side_toggle(
        &mut self,
        pool: &mut ParticlePool,
        side: Side,
        size: Vec2,
        style: VisualStyle,
        input: &FrameInput,
        now: Instant,
    ) {
        let cloud = ScatterCloud::for_style(style, size, &self.options.styles);
        let samples = &self.samples[side.index()];
        let consumed = match (self.mode, side) {
            (SideMode::Pair, _) => self.controller.morph(
                pool,
                samples,
                &cloud,
                (input.color(side.flip()), input.color(side)),
                now,
                &mut self.rng,
            ),
            (SideMode::Single, Side::Target) => {
                let _ = self.controller.dissolve(
                    pool,
                    &cloud,
                    input.color(Side::Source),
                    now,
                    &mut self.rng,
                );
                true
            }
            (SideMode::Single, Side::Source) => {
                if samples.is_empty() {
                    false
                } else {
                    let band = self.options.styles.retarget_ring;
                    let ring = ScatterCloud::ring(size / 2.0, band);
                    self.controller.retarget(
                        pool,
                        samples,
                        &ring,
                        input.color(side),
                        now,
                        &mut self.rng,
                    );
                    true
                }
            }
        };
        // An unconsumed toggle is retried until the side has samples.
        if consumed {
            self.cache.side = Some(side);
        }
    }

    /// Side whose color paints idle frames.
    fn display_side(&self, side: Side) -> Side {
        match self.mode {
            SideMode::Single => Side::Source,
            SideMode::Pair => self.cache.side.unwrap_or(side),
        }
    }

    fn draw(&mut self, now: Instant, style: VisualStyle, idle_color: Rgb) -> FrameOutcome {
        let Some(surface) = self.surface.as_mut() else {
            return FrameOutcome::Skipped;
        };
        let treatment = DrawTreatment::for_style(style);
        let (Some(pool), Some(treatment)) = (self.pool.as_mut(), treatment) else {
            surface.clear();
            return FrameOutcome::Drawn {
                particles: 0,
                phase: self.controller.phase(now),
            };
        };
        let state = self.controller.update(pool, now, idle_color);
        let particles = render_frame(surface, treatment, pool.particles(), &state);
        FrameOutcome::Drawn {
            particles,
            phase: state.phase,
        }
    }
}

impl<R: Rasterizer + std::fmt::Debug> std::fmt::Debug for MorphEngine<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MorphEngine")
            .field("mode", &self.mode)
            .field("rasterizer", &self.rasterizer)
            .field("face_ready", &self.face_ready)
            .field("particles", &self.pool.as_ref().map(ParticlePool::len))
            .field("controller", &self.controller)
            .finish_non_exhaustive()
    }
}

//! Particle records and the fixed-size pool bound to a sample set.
//!
//! Particle `i` always takes its home from index `i` of whichever sample set
//! is active. A particle without a sample point (the set is shorter than the
//! pool) is homed at the region center instead.

mod cloud;

use std::f32::consts::TAU;

pub use cloud::{ScatterBias, ScatterCloud};
use glam::Vec2;
use rand::Rng;

use crate::options::StyleProfile;

/// Maximum rotation speed magnitude, in radians per 100 ms of transition.
const MAX_ROTATION_SPEED: f32 = 0.02;

/// One point of the cloud.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    /// Last rendered position.
    pub position: Vec2,
    /// Position captured when the current transition started.
    pub origin: Vec2,
    /// Glyph coordinate this particle settles on.
    pub home: Vec2,
    /// Mid-transition waypoint.
    pub scatter: Vec2,
    /// Side length (squares) or radius (circles).
    pub size: f32,
    /// Base rotation in radians.
    pub angle: f32,
    /// Rotation rate applied while a transition runs.
    pub rotation_speed: f32,
    /// Per-particle phase offset of the idle wobble.
    pub wobble_phase: f32,
}

/// Home for index `i`, falling back to `center` past the end of `samples`.
fn home_at(samples: &[Vec2], i: usize, center: Vec2) -> Vec2 {
    samples.get(i).copied().unwrap_or(center)
}

/// Fixed-size particle pool.
#[derive(Debug, Clone, Default)]
pub struct ParticlePool {
    particles: Vec<Particle>,
}

impl ParticlePool {
    /// Allocate `profile.particle_count` particles spawned on `spawn` and
    /// homed on `samples` over a region of `size`.
    pub fn create<R: Rng + ?Sized>(
        samples: &[Vec2],
        size: Vec2,
        profile: &StyleProfile,
        spawn: &ScatterCloud,
        rng: &mut R,
    ) -> Self {
        let center = size / 2.0;
        let [min_size, max_size] = profile.size_range;
        let particles = (0..profile.particle_count)
            .map(|i| {
                let start = spawn.sample(rng);
                Particle {
                    position: start,
                    origin: start,
                    home: home_at(samples, i, center),
                    scatter: start,
                    size: min_size + rng.random::<f32>() * (max_size - min_size),
                    angle: rng.random::<f32>() * TAU,
                    rotation_speed: (rng.random::<f32>() - 0.5)
                        * 2.0
                        * MAX_ROTATION_SPEED,
                    wobble_phase: rng.random::<f32>() * TAU,
                }
            })
            .collect();
        Self { particles }
    }

    /// Rebind every particle to `samples` for a text change.
    ///
    /// Origins are taken from the live rendered position (never the old
    /// home) and each particle gets a fresh waypoint from `cloud`. Particles
    /// past the end of `samples` are homed at the cloud's center, which is
    /// the region center.
    pub fn retarget<R: Rng + ?Sized>(
        &mut self,
        samples: &[Vec2],
        cloud: &ScatterCloud,
        rng: &mut R,
    ) {
        for (i, p) in self.particles.iter_mut().enumerate() {
            p.origin = p.position;
            p.home = home_at(samples, i, cloud.center);
            p.scatter = cloud.sample(rng);
        }
    }

    /// Prepare a scatter-then-converge morph onto `samples`.
    pub fn begin_morph<R: Rng + ?Sized>(
        &mut self,
        samples: &[Vec2],
        cloud: &ScatterCloud,
        rng: &mut R,
    ) {
        // Same bookkeeping as a retarget; only the controller's timing differs.
        self.retarget(samples, cloud, rng);
    }

    /// Prepare a dissolve: capture origins and pick waypoints, keeping homes.
    pub fn begin_dissolve<R: Rng + ?Sized>(
        &mut self,
        cloud: &ScatterCloud,
        rng: &mut R,
    ) {
        for p in &mut self.particles {
            p.origin = p.position;
            p.scatter = cloud.sample(rng);
        }
    }

    /// Number of particles.
    #[must_use]
    pub fn len(&self) -> usize {
        self.particles.len()
    }

    /// Whether the pool has no particles.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    /// Read-only view of the particles.
    #[must_use]
    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// Mutable iterator over the particles.
    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, Particle> {
        self.particles.iter_mut()
    }
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;
    use crate::options::StyleOptions;

    fn profile(count: usize) -> StyleProfile {
        StyleProfile {
            particle_count: count,
            size_range: [1.5, 3.5],
        }
    }

    fn grid(n: usize) -> Vec<Vec2> {
        (0..n).map(|i| Vec2::new(i as f32, 2.0 * i as f32)).collect()
    }

    #[test]
    fn create_binds_by_index_and_centers_the_rest() {
        let mut rng = StdRng::seed_from_u64(1);
        let size = Vec2::new(400.0, 200.0);
        let spawn = ScatterCloud::ring(size / 2.0, StyleOptions::default().spawn_ring);
        let samples = grid(5);
        let pool = ParticlePool::create(&samples, size, &profile(8), &spawn, &mut rng);

        assert_eq!(pool.len(), 8);
        for (i, p) in pool.particles().iter().enumerate() {
            if i < 5 {
                assert_eq!(p.home, samples[i]);
            } else {
                assert_eq!(p.home, Vec2::new(200.0, 100.0));
            }
            assert!((1.5..=3.5).contains(&p.size));
            assert!(p.rotation_speed.abs() <= MAX_ROTATION_SPEED);
            assert_eq!(p.position, p.origin);
            assert_eq!(p.position, p.scatter);
            let d = p.origin.distance(Vec2::new(200.0, 100.0));
            assert!((50.0 - 1e-3..=150.0 + 1e-3).contains(&d));
        }
    }

    #[test]
    fn retarget_captures_live_position_not_home() {
        let mut rng = StdRng::seed_from_u64(2);
        let size = Vec2::new(400.0, 200.0);
        let ring = ScatterCloud::ring(size / 2.0, [40.0, 120.0]);
        let mut pool =
            ParticlePool::create(&grid(4), size, &profile(4), &ring, &mut rng);

        let live = Vec2::new(-7.0, 3.0);
        for p in pool.iter_mut() {
            p.position = live;
        }
        let next = vec![Vec2::splat(9.0); 4];
        pool.retarget(&next, &ring, &mut rng);

        for p in pool.particles() {
            assert_eq!(p.origin, live);
            assert_eq!(p.home, Vec2::splat(9.0));
        }
    }

    #[test]
    fn dissolve_keeps_homes() {
        let mut rng = StdRng::seed_from_u64(3);
        let size = Vec2::new(100.0, 100.0);
        let ring = ScatterCloud::ring(size / 2.0, [40.0, 120.0]);
        let samples = grid(3);
        let mut pool =
            ParticlePool::create(&samples, size, &profile(3), &ring, &mut rng);
        pool.begin_dissolve(&ring, &mut rng);
        for (p, s) in pool.particles().iter().zip(&samples) {
            assert_eq!(p.home, *s);
        }
    }

    #[test]
    fn empty_profile_makes_empty_pool() {
        let mut rng = StdRng::seed_from_u64(0);
        let ring = ScatterCloud::ring(Vec2::ZERO, [1.0, 2.0]);
        let pool = ParticlePool::create(&[], Vec2::ZERO, &profile(0), &ring, &mut rng);
        assert!(pool.is_empty());
    }
}

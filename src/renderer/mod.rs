//! Per-frame particle drawing onto a transparent overlay surface.
//!
//! Each frame clears the [`Surface`] and paints the whole pool with one
//! [`DrawTreatment`]; color and opacity are uniform across the pool.

pub mod surface;
pub mod treatment;

pub use surface::Surface;
pub use treatment::DrawTreatment;

use crate::animation::FrameState;
use crate::particles::Particle;

/// Clear `surface` and paint `particles`. Returns how many were drawn.
pub fn render_frame(
    surface: &mut Surface,
    treatment: DrawTreatment,
    particles: &[Particle],
    frame: &FrameState,
) -> usize {
    surface.clear();
    let base = surface.transform();
    treatment.draw(surface.pixmap_mut(), base, particles, frame)
}

#[cfg(test)]
mod tests {
    use glam::Vec2;
    use web_time::Duration;

    use super::*;
    use crate::animation::TransitionPhase;

    #[test]
    fn render_clears_previous_frame_and_applies_density() {
        let mut surface = Surface::new(Vec2::new(50.0, 50.0), 2.0).unwrap();
        let at = Vec2::new(10.0, 10.0);
        let particle = Particle {
            position: at,
            origin: at,
            home: at,
            scatter: at,
            size: 4.0,
            angle: 0.0,
            rotation_speed: 0.0,
            wobble_phase: 0.0,
        };
        let frame = FrameState {
            phase: TransitionPhase::Idle,
            opacity: 1.0,
            color: [0.2, 0.4, 0.6],
            elapsed: Duration::ZERO,
            progress: 0.0,
        };

        let drawn = render_frame(&mut surface, DrawTreatment::Granular, &[particle], &frame);
        assert_eq!(drawn, 1);
        // 4x4 logical square at 2x density, plus any edge antialiasing
        let painted = surface.painted_pixels();
        assert!((64..=100).contains(&painted), "painted {painted}");
        assert!(surface.pixmap().pixel(20, 20).is_some_and(|p| p.alpha() == 255));

        let moved = Particle {
            position: Vec2::new(40.0, 40.0),
            ..particle
        };
        let _ = render_frame(&mut surface, DrawTreatment::Granular, &[moved], &frame);
        assert!(surface.pixmap().pixel(20, 20).is_some_and(|p| p.alpha() == 0));
        assert_eq!(surface.painted_pixels(), painted);
    }
}

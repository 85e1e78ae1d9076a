//! Per-style particle draw treatments.

use std::f32::consts::PI;

use tiny_skia::{Color, FillRule, Paint, PathBuilder, Pixmap, Rect, Stroke, Transform};

use crate::animation::FrameState;
use crate::color::Rgb;
use crate::options::VisualStyle;
use crate::particles::Particle;

/// Rotation applied per millisecond of transition, times the particle's speed.
const ROTATION_PER_MS: f32 = 0.01;
/// Peak extra radius of diffuse particles at mid-transition.
const DIFFUSE_BULGE: f32 = 0.6;
/// Opacity scale of diffuse particles.
const DIFFUSE_OPACITY: f32 = 0.7;
/// Opacity scale of the liquid core fill.
const LIQUID_FILL_OPACITY: f32 = 0.85;
/// Opacity scale of the liquid outline ring.
const LIQUID_RING_OPACITY: f32 = 0.25;
/// Outline ring stroke width.
const LIQUID_RING_WIDTH: f32 = 0.7;
/// Gap between a liquid particle's edge and its ring.
const LIQUID_RING_GAP: f32 = 1.2;

/// How each particle is painted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawTreatment {
    /// Filled square, spinning while a transition runs.
    Granular,
    /// Filled circle that swells toward mid-transition.
    Diffuse,
    /// Filled circle with a faint outline ring.
    Liquid,
}

impl DrawTreatment {
    /// Treatment for `style`; `None` for the disabled style.
    #[must_use]
    pub fn for_style(style: VisualStyle) -> Option<Self> {
        match style {
            VisualStyle::Granular => Some(Self::Granular),
            VisualStyle::Diffuse => Some(Self::Diffuse),
            VisualStyle::Liquid => Some(Self::Liquid),
            VisualStyle::Disabled => None,
        }
    }

    /// Paint every particle into `pixmap`. Returns how many were drawn.
    pub fn draw(
        self,
        pixmap: &mut Pixmap,
        base: Transform,
        particles: &[Particle],
        frame: &FrameState,
    ) -> usize {
        if !frame.is_visible() {
            return 0;
        }
        match self {
            Self::Granular => draw_granular(pixmap, base, particles, frame),
            Self::Diffuse => draw_diffuse(pixmap, base, particles, frame),
            Self::Liquid => draw_liquid(pixmap, base, particles, frame),
        }
    }
}

fn paint(color: Rgb, alpha: f32) -> Paint<'static> {
    let [r, g, b] = color.map(|c| c.clamp(0.0, 1.0));
    let mut paint = Paint::default();
    paint.set_color(
        Color::from_rgba(r, g, b, alpha.clamp(0.0, 1.0)).unwrap_or(Color::TRANSPARENT),
    );
    paint.anti_alias = true;
    paint
}

fn draw_granular(
    pixmap: &mut Pixmap,
    base: Transform,
    particles: &[Particle],
    frame: &FrameState,
) -> usize {
    let paint = paint(frame.color, frame.opacity);
    let spin = frame.phase.is_transitioning();
    let elapsed_ms = frame.elapsed.as_secs_f32() * 1000.0;
    let mut drawn = 0;
    for p in particles {
        let half = p.size / 2.0;
        let Some(rect) = Rect::from_xywh(-half, -half, p.size, p.size) else {
            continue;
        };
        let angle = if spin {
            p.angle + elapsed_ms * p.rotation_speed * ROTATION_PER_MS
        } else {
            p.angle
        };
        let transform = base
            .pre_concat(Transform::from_translate(p.position.x, p.position.y))
            .pre_concat(Transform::from_rotate(angle.to_degrees()));
        pixmap.fill_rect(rect, &paint, transform, None);
        drawn += 1;
    }
    drawn
}

/// Radius multiplier peaking at the transition midpoint.
fn bulge(frame: &FrameState) -> f32 {
    if frame.phase.is_transitioning() {
        1.0 + (frame.progress * PI).sin() * DIFFUSE_BULGE
    } else {
        1.0
    }
}

fn draw_diffuse(
    pixmap: &mut Pixmap,
    base: Transform,
    particles: &[Particle],
    frame: &FrameState,
) -> usize {
    let paint = paint(frame.color, frame.opacity * DIFFUSE_OPACITY);
    let grow = bulge(frame);
    let mut drawn = 0;
    for p in particles {
        let Some(circle) = PathBuilder::from_circle(p.position.x, p.position.y, p.size * grow)
        else {
            continue;
        };
        pixmap.fill_path(&circle, &paint, FillRule::Winding, base, None);
        drawn += 1;
    }
    drawn
}

fn draw_liquid(
    pixmap: &mut Pixmap,
    base: Transform,
    particles: &[Particle],
    frame: &FrameState,
) -> usize {
    let fill = paint(frame.color, frame.opacity * LIQUID_FILL_OPACITY);
    let ring = paint(frame.color, frame.opacity * LIQUID_RING_OPACITY);
    let stroke = Stroke {
        width: LIQUID_RING_WIDTH,
        ..Stroke::default()
    };
    let mut drawn = 0;
    for p in particles {
        let (x, y) = (p.position.x, p.position.y);
        let Some(core) = PathBuilder::from_circle(x, y, p.size) else {
            continue;
        };
        pixmap.fill_path(&core, &fill, FillRule::Winding, base, None);
        if let Some(outline) = PathBuilder::from_circle(x, y, p.size + LIQUID_RING_GAP) {
            pixmap.stroke_path(&outline, &ring, &stroke, base, None);
        }
        drawn += 1;
    }
    drawn
}

#[cfg(test)]
mod tests {
    use glam::Vec2;
    use web_time::Duration;

    use super::*;
    use crate::animation::TransitionPhase;

    const WHITE: Rgb = [1.0, 1.0, 1.0];

    fn particle(x: f32, y: f32, size: f32) -> Particle {
        let at = Vec2::new(x, y);
        Particle {
            position: at,
            origin: at,
            home: at,
            scatter: at,
            size,
            angle: 0.0,
            rotation_speed: 0.01,
            wobble_phase: 0.0,
        }
    }

    fn frame(phase: TransitionPhase, opacity: f32, progress: f32) -> FrameState {
        FrameState {
            phase,
            opacity,
            color: WHITE,
            elapsed: Duration::from_millis(500),
            progress,
        }
    }

    fn alpha_at(pixmap: &Pixmap, x: u32, y: u32) -> u8 {
        pixmap.pixel(x, y).map_or(0, |p| p.alpha())
    }

    #[test]
    fn disabled_style_has_no_treatment() {
        assert_eq!(DrawTreatment::for_style(VisualStyle::Disabled), None);
        assert_eq!(
            DrawTreatment::for_style(VisualStyle::Liquid),
            Some(DrawTreatment::Liquid)
        );
    }

    #[test]
    fn granular_paints_square_at_particle() {
        let mut pixmap = Pixmap::new(40, 40).unwrap();
        let ps = [particle(20.0, 20.0, 6.0)];
        let drawn = DrawTreatment::Granular.draw(
            &mut pixmap,
            Transform::identity(),
            &ps,
            &frame(TransitionPhase::Idle, 1.0, 0.0),
        );
        assert_eq!(drawn, 1);
        assert_eq!(alpha_at(&pixmap, 20, 20), 255);
        assert_eq!(alpha_at(&pixmap, 2, 2), 0);
    }

    #[test]
    fn opacity_scales_alpha() {
        let mut pixmap = Pixmap::new(40, 40).unwrap();
        let ps = [particle(20.0, 20.0, 8.0)];
        let _ = DrawTreatment::Diffuse.draw(
            &mut pixmap,
            Transform::identity(),
            &ps,
            &frame(TransitionPhase::Idle, 1.0, 0.0),
        );
        let a = alpha_at(&pixmap, 20, 20);
        // 0.7 diffuse scale
        assert!((170..=185).contains(&a), "alpha {a}");
    }

    #[test]
    fn diffuse_swells_mid_transition() {
        let ps = [particle(50.0, 50.0, 10.0)];
        let mut idle = Pixmap::new(100, 100).unwrap();
        let mut mid = Pixmap::new(100, 100).unwrap();
        let _ = DrawTreatment::Diffuse.draw(
            &mut idle,
            Transform::identity(),
            &ps,
            &frame(TransitionPhase::Idle, 1.0, 0.0),
        );
        let _ = DrawTreatment::Diffuse.draw(
            &mut mid,
            Transform::identity(),
            &ps,
            &frame(TransitionPhase::Converging, 1.0, 0.5),
        );
        // Radius 10 at idle, 16 at the midpoint.
        assert_eq!(alpha_at(&idle, 50 + 13, 50), 0);
        assert!(alpha_at(&mid, 50 + 13, 50) > 0);
    }

    #[test]
    fn liquid_draws_ring_outside_core() {
        let mut pixmap = Pixmap::new(60, 60).unwrap();
        let ps = [particle(30.0, 30.0, 8.0)];
        let _ = DrawTreatment::Liquid.draw(
            &mut pixmap,
            Transform::identity(),
            &ps,
            &frame(TransitionPhase::Idle, 1.0, 0.0),
        );
        let core = alpha_at(&pixmap, 30, 30);
        let ring = alpha_at(&pixmap, 30 + 9, 30);
        let outside = alpha_at(&pixmap, 30 + 14, 30);
        assert!(core > ring);
        assert!(ring > 0);
        assert_eq!(outside, 0);
    }

    #[test]
    fn hidden_frame_draws_nothing() {
        let mut pixmap = Pixmap::new(40, 40).unwrap();
        let ps = [particle(20.0, 20.0, 6.0)];
        let drawn = DrawTreatment::Granular.draw(
            &mut pixmap,
            Transform::identity(),
            &ps,
            &FrameState::hidden(WHITE),
        );
        assert_eq!(drawn, 0);
        assert!(pixmap.pixels().iter().all(|p| p.alpha() == 0));
    }

    #[test]
    fn bulge_is_flat_when_idle() {
        assert_eq!(bulge(&frame(TransitionPhase::Idle, 1.0, 0.5)), 1.0);
        let peak = bulge(&frame(TransitionPhase::Scattering, 1.0, 0.5));
        assert!((peak - 1.6).abs() < 1e-5);
    }
}

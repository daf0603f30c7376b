//! Signed distance field for the repeated box-frame lattice.

use glam::{vec3, Vec3};

use crate::clock::SceneClock;
use crate::math::floor_mod;

/// Box-frame half extents of a single cell.
const FRAME_EXTENTS: Vec3 = Vec3::new(1.0, 0.5, 1.0);
/// Chamfer width of the frame edges.
const FRAME_CHAMFER: f32 = 0.125;
/// Edge rounding radius.
const FRAME_ROUNDING: f32 = 0.075;

/// Per-frame snapshot of the time-dependent field parameters.
///
/// Cheap to build and immutable afterwards, so a single instance is shared by
/// every ray of a frame.
#[derive(Clone, Copy, Debug)]
pub struct DistanceField {
    /// Lattice cell spacing; breathes between 14 and 16 units.
    spread: Vec3,
    /// Anisotropic scale applied to each cell before the frame is evaluated.
    wobble: Vec3,
    /// Frequency of the sinusoidal displacement, `11 * rhythm`.
    amplitude: f32,
}

impl DistanceField {
    pub fn new(clock: &SceneClock) -> Self {
        let breathe = 0.5 + 0.5 * -clock.envelope_phase().cos();
        let pulse = 0.5 * clock.wobble_phase().sin() + 0.5;

        Self {
            spread: Vec3::splat(14.0 + 2.0 * breathe),
            wobble: Vec3::ONE + vec3(-0.05, 0.05, -0.05) * pulse,
            amplitude: 11.0 * clock.rhythm(),
        }
    }

    /// Signed distance from `p` to the nearest frame surface in the infinite
    /// lattice.
    pub fn distance(&self, p: Vec3) -> f32 {
        let cell = floor_mod(p + 0.5 * self.spread, self.spread) - 0.5 * self.spread;
        self.cell_distance(cell)
    }

    /// Lattice cell spacing for this frame.
    pub fn spread(&self) -> Vec3 {
        self.spread
    }

    fn cell_distance(&self, p: Vec3) -> f32 {
        let p = p * self.wobble;
        let frame = box_frame(p, FRAME_EXTENTS, FRAME_CHAMFER, FRAME_ROUNDING);

        frame + displacement(p, self.amplitude)
    }
}

/// Exact distance to the chamfered wireframe edges of a box, rounded by `r`.
pub fn box_frame(p: Vec3, b: Vec3, e: f32, r: f32) -> f32 {
    let p = p.abs() - b;
    let q = (p + Vec3::splat(e)).abs() - Vec3::splat(e);

    let x = vec3(p.x, q.y, q.z).max(Vec3::ZERO).length() + p.x.max(q.y.max(q.z)).min(0.0);
    let y = vec3(q.x, p.y, q.z).max(Vec3::ZERO).length() + q.x.max(p.y.max(q.z)).min(0.0);
    let z = vec3(q.x, q.y, p.z).max(Vec3::ZERO).length() + q.x.max(q.y.max(p.z)).min(0.0);

    (x - r).min(y - r).min(z - r)
}

/// Additive displacement `sin(vx) * sin(vy) * sin(vz)`.
pub fn displacement(p: Vec3, v: f32) -> f32 {
    (v * p.x).sin() * (v * p.y).sin() * (v * p.z).sin()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn box_frame_is_positive_in_the_hollow_center() {
        let d = box_frame(Vec3::ZERO, FRAME_EXTENTS, FRAME_CHAMFER, FRAME_ROUNDING);
        assert!((d - 0.715_569).abs() < 1e-4);
    }

    #[test]
    fn box_frame_corner_sits_at_negative_rounding_radius() {
        let d = box_frame(FRAME_EXTENTS, FRAME_EXTENTS, FRAME_CHAMFER, FRAME_ROUNDING);
        assert!((d + FRAME_ROUNDING).abs() < 1e-6);
    }

    #[test]
    fn displacement_vanishes_at_zero_amplitude() {
        assert_eq!(displacement(vec3(1.3, -0.4, 2.2), 0.0), 0.0);
        assert_eq!(displacement(Vec3::ZERO, 7.0), 0.0);
    }

    #[test]
    fn spread_breathes_within_bounds() {
        for i in 0..200 {
            let field = DistanceField::new(&SceneClock::new(i as f32 * 0.11));
            let spread = field.spread().x;
            assert!((14.0..=16.0).contains(&spread));
        }
    }

    #[test]
    fn spread_varies_continuously_in_time() {
        let dt = 1e-3;
        for i in 0..100 {
            let t = i as f32 * 0.37;
            let a = DistanceField::new(&SceneClock::new(t)).spread().x;
            let b = DistanceField::new(&SceneClock::new(t + dt)).spread().x;
            assert!((a - b).abs() < 0.01, "spread jumped between t={t} and t={}", t + dt);
        }
    }

    #[test]
    fn spread_matches_reference_at_start() {
        let field = DistanceField::new(&SceneClock::new(0.0));
        assert!((field.spread().x - 14.189_037).abs() < 1e-4);
    }

    #[test]
    fn distance_is_periodic_across_cells() {
        let field = DistanceField::new(&SceneClock::new(1.7));
        let spread = field.spread();
        let p = vec3(0.3, -0.9, 1.4);
        let d0 = field.distance(p);
        let d1 = field.distance(p + spread);
        let d2 = field.distance(p - 2.0 * spread);
        assert!((d0 - d1).abs() < 1e-3);
        assert!((d0 - d2).abs() < 1e-3);
    }

    #[test]
    fn distance_is_large_at_the_cell_gap_corner() {
        let field = DistanceField::new(&SceneClock::new(0.0));
        let corner = 0.5 * field.spread();
        assert!(field.distance(corner) > 5.0);
    }
}

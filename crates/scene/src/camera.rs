//! Camera placement and per-pixel ray construction.
//!
//! The pointer-vs-autonomous behaviour is resolved once per frame into a
//! [`CameraAngles`] pair, so the ray construction itself never branches on
//! input mode: with an active pointer the angles are a pure function of the
//! pointer position, without one they are a pure function of time.

use std::f32::consts::{PI, TAU};

use glam::{Vec2, Vec3};

use crate::clock::SceneClock;

/// Rest position of the camera before the orbit rotations are applied.
const REST_ORIGIN: Vec3 = Vec3::new(0.0, 3.0, -6.0);
/// Distance from the camera pinhole to the image plane.
const FOCAL_LENGTH: f32 = 1.0;

/// Latest pointer sample in output-pixel space (bottom-left origin).
///
/// The origin doubles as the "no pointer" sentinel: a sample with `x == 0`
/// means no pointer is active and the camera orbits on its own.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PointerInput {
    Inactive,
    Active(Vec2),
}

impl PointerInput {
    /// Classifies a raw pixel-space sample, treating `x == 0` as absent.
    pub fn from_pixels(sample: Vec2) -> Self {
        if sample.x == 0.0 {
            Self::Inactive
        } else {
            Self::Active(sample)
        }
    }
}

/// Resolved orbit rotations: pitch acts on (y, z), yaw on (x, z).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CameraAngles {
    pub pitch: f32,
    pub yaw: f32,
}

impl CameraAngles {
    pub fn resolve(pointer: &PointerInput, resolution: Vec2, clock: &SceneClock) -> Self {
        match pointer {
            PointerInput::Inactive => {
                let drift = clock.drift_phase();
                Self {
                    pitch: drift.cos(),
                    yaw: -drift,
                }
            }
            PointerInput::Active(sample) => {
                let m = *sample / resolution;
                Self {
                    pitch: 1.0 - m.y * PI,
                    yaw: -m.x * TAU,
                }
            }
        }
    }
}

/// Per-frame camera basis: orbit origin plus a look-at frame toward the
/// scene center.
#[derive(Clone, Copy, Debug)]
pub struct CameraRig {
    origin: Vec3,
    forward: Vec3,
    right: Vec3,
    up: Vec3,
}

impl CameraRig {
    pub fn new(angles: &CameraAngles) -> Self {
        let mut origin = REST_ORIGIN;
        (origin.y, origin.z) = rotate(origin.y, origin.z, angles.pitch);
        (origin.x, origin.z) = rotate(origin.x, origin.z, angles.yaw);

        let forward = (-origin).normalize();
        let right = Vec3::Y.cross(forward).normalize();
        let up = forward.cross(right);

        Self {
            origin,
            forward,
            right,
            up,
        }
    }

    pub fn origin(&self) -> Vec3 {
        self.origin
    }

    pub fn forward(&self) -> Vec3 {
        self.forward
    }

    /// Ray through the image-plane point `uv` (centered, aspect-corrected).
    pub fn ray_direction(&self, uv: Vec2) -> Vec3 {
        (self.forward * FOCAL_LENGTH + uv.x * self.right + uv.y * self.up).normalize()
    }
}

/// Planar rotation matching GLSL `v *= mat2(c, -s, s, c)`.
fn rotate(a: f32, b: f32, angle: f32) -> (f32, f32) {
    let (s, c) = angle.sin_cos();
    (a * c - b * s, a * s + b * c)
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::vec2;

    const RES: Vec2 = Vec2::new(800.0, 600.0);

    #[test]
    fn pointer_origin_is_the_inactive_sentinel() {
        assert_eq!(PointerInput::from_pixels(Vec2::ZERO), PointerInput::Inactive);
        assert_eq!(
            PointerInput::from_pixels(vec2(0.0, 120.0)),
            PointerInput::Inactive
        );
        assert_eq!(
            PointerInput::from_pixels(vec2(64.0, 120.0)),
            PointerInput::Active(vec2(64.0, 120.0))
        );
    }

    #[test]
    fn pointer_angles_ignore_the_clock() {
        let pointer = PointerInput::Active(vec2(200.0, 150.0));
        let a = CameraAngles::resolve(&pointer, RES, &SceneClock::new(1.0));
        let b = CameraAngles::resolve(&pointer, RES, &SceneClock::new(42.5));
        assert_eq!(a, b);
    }

    #[test]
    fn autonomous_angles_follow_the_clock() {
        let a = CameraAngles::resolve(&PointerInput::Inactive, RES, &SceneClock::new(1.0));
        let b = CameraAngles::resolve(&PointerInput::Inactive, RES, &SceneClock::new(9.0));
        assert_ne!(a.yaw, b.yaw);
    }

    #[test]
    fn pointer_angles_map_screen_extents_to_full_turns() {
        let full = CameraAngles::resolve(
            &PointerInput::Active(vec2(800.0, 600.0)),
            RES,
            &SceneClock::new(0.0),
        );
        assert!((full.yaw + TAU).abs() < 1e-6);
        assert!((full.pitch - (1.0 - PI)).abs() < 1e-6);
    }

    #[test]
    fn center_ray_is_the_forward_vector() {
        let angles = CameraAngles::resolve(&PointerInput::Inactive, RES, &SceneClock::new(3.2));
        let rig = CameraRig::new(&angles);
        let rd = rig.ray_direction(Vec2::ZERO);
        assert!((rd - rig.forward()).length() < 1e-6);
    }

    #[test]
    fn orbit_preserves_the_camera_distance() {
        for i in 0..20 {
            let angles = CameraAngles::resolve(
                &PointerInput::Inactive,
                RES,
                &SceneClock::new(i as f32 * 0.7),
            );
            let rig = CameraRig::new(&angles);
            assert!((rig.origin().length() - REST_ORIGIN.length()).abs() < 1e-4);
        }
    }

    #[test]
    fn ray_basis_is_orthonormal() {
        let angles = CameraAngles::resolve(
            &PointerInput::Active(vec2(321.0, 111.0)),
            RES,
            &SceneClock::new(0.0),
        );
        let rig = CameraRig::new(&angles);
        let rd = rig.ray_direction(vec2(0.4, -0.3));
        assert!((rd.length() - 1.0).abs() < 1e-5);
    }
}

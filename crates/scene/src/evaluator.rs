//! Per-frame scene evaluator: pixel coordinate in, clamped RGB out.

use glam::{Vec2, Vec3};

use crate::camera::{CameraAngles, CameraRig};
use crate::clock::SceneClock;
use crate::field::DistanceField;
use crate::math::{mix, reflect, smoothstep, smoothstep01};
use crate::{FrameInput, MAX_DIST, MAX_STEPS, SURF_DIST};

/// Warm white used by the directional sun highlights.
const SUNLIGHT: Vec3 = Vec3::new(1.0, 0.95, 0.9);
/// Finite-difference step for normal estimation.
const NORMAL_EPSILON: f32 = 0.01;

/// Immutable per-frame state for shading pixels.
///
/// Construction snapshots everything time- and pointer-dependent (camera
/// basis, lattice parameters, rhythm, zoom denominator); [`shade`] is then a
/// pure function of the pixel coordinate, so any number of pixels may be
/// evaluated concurrently from one evaluator.
///
/// [`shade`]: SceneEvaluator::shade
#[derive(Clone, Copy, Debug)]
pub struct SceneEvaluator {
    resolution: Vec2,
    /// Denominator of the aspect-corrected pixel mapping; oscillates between
    /// the short and long screen axis to produce the slow zoom pulse.
    zoom_span: f32,
    camera: CameraRig,
    field: DistanceField,
    rhythm: f32,
}

impl SceneEvaluator {
    pub fn new(input: &FrameInput) -> Self {
        let clock = SceneClock::new(input.time);
        let drift = clock.drift_phase();

        let mn = input.resolution.x.min(input.resolution.y);
        let mx = input.resolution.x.max(input.resolution.y);
        let zoom_span = mix(mn, mx, 0.5 + 0.5 * drift.sin());

        let angles = CameraAngles::resolve(&input.pointer, input.resolution, &clock);

        Self {
            resolution: input.resolution,
            zoom_span,
            camera: CameraRig::new(&angles),
            field: DistanceField::new(&clock),
            rhythm: clock.rhythm(),
        }
    }

    /// Color for the pixel at `frag_coord` (bottom-left origin, pixel
    /// centers at half offsets). Every channel of the result is in `[0, 1]`.
    pub fn shade(&self, frag_coord: Vec2) -> Vec3 {
        let uv = self.normalized_coord(frag_coord);

        let mut ro = self.camera.origin();
        let mut rd = self.camera.ray_direction(uv);

        let mut col = self.trace(&mut ro, &mut rd);
        col += self.trace(&mut ro, &mut rd);

        // Directional sun off the implicit floor, using the post-bounce ray:
        // a wide low-power halo plus a tight high-power core.
        let sun = rd
            .normalize()
            .dot(reflect(rd, Vec3::Y))
            .clamp(0.0, 1.0);
        col += 0.2 * SUNLIGHT * sun.powf(8.0);
        col += 0.5 * SUNLIGHT * sun.powf(256.0);

        let tint = Vec3::new(0.5 - self.rhythm, self.rhythm, 0.5 - self.rhythm);
        smoothstep01(6.0 * tint * col.clamp(Vec3::ZERO, Vec3::ONE))
    }

    /// Sphere-traces from `ro` along `rd`, returning the travelled distance.
    ///
    /// The result exceeds [`MAX_DIST`] for misses; callers treat those rays
    /// as background.
    pub fn march(&self, ro: Vec3, rd: Vec3) -> f32 {
        let mut travelled = 0.0;

        for _ in 0..MAX_STEPS {
            let p = ro + rd * travelled;
            let step = self.field.distance(p);

            travelled += step;

            if travelled > MAX_DIST || step.abs() < SURF_DIST {
                break;
            }
        }

        travelled
    }

    /// Maps a pixel coordinate into the centered, zoom-pulsed image plane.
    fn normalized_coord(&self, frag_coord: Vec2) -> Vec2 {
        ((2.0 * frag_coord - self.resolution) / self.zoom_span) * 0.5
    }

    /// One raymarch pass with surface shading.
    ///
    /// On a hit the ray is moved just off the surface and reflected in place,
    /// so calling this twice in a row evaluates the primary ray and its
    /// single bounce. Misses leave the ray untouched and shade to black.
    fn trace(&self, ro: &mut Vec3, rd: &mut Vec3) -> Vec3 {
        let d = self.march(*ro, *rd);

        let mut col = Vec3::ZERO;

        if d < MAX_DIST {
            let p = *ro + *rd * d;
            let n = self.normal(p);
            let r = reflect(*rd, n);

            let diffuse = n.dot(ro.normalize()) * 0.5 + 0.5;
            let spot = r.normalize().dot(n).clamp(0.0, 1.0);

            col = Vec3::splat(0.05 * diffuse);
            col += Vec3::splat(spot.powf(16.0));

            *ro = p + n * (SURF_DIST * 3.0);
            *rd = r;
        }

        col.lerp(Vec3::ZERO, smoothstep(0.0, MAX_DIST, d))
    }

    /// One-sided finite-difference normal of the distance field at `p`.
    fn normal(&self, p: Vec3) -> Vec3 {
        let d = self.field.distance(p);
        let e = NORMAL_EPSILON;

        Vec3::new(
            d - self.field.distance(p - Vec3::new(e, 0.0, 0.0)),
            d - self.field.distance(p - Vec3::new(0.0, e, 0.0)),
            d - self.field.distance(p - Vec3::new(0.0, 0.0, e)),
        )
        .normalize()
    }
}

//! GLSL-flavoured scalar/vector helpers the evaluator leans on.

use glam::Vec3;

pub(crate) fn mix(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

pub(crate) fn smoothstep(edge0: f32, edge1: f32, x: f32) -> f32 {
    let t = ((x - edge0) / (edge1 - edge0)).clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

/// Componentwise `smoothstep(0, 1, v)`.
pub(crate) fn smoothstep01(v: Vec3) -> Vec3 {
    Vec3::new(
        smoothstep(0.0, 1.0, v.x),
        smoothstep(0.0, 1.0, v.y),
        smoothstep(0.0, 1.0, v.z),
    )
}

pub(crate) fn reflect(incident: Vec3, normal: Vec3) -> Vec3 {
    incident - 2.0 * normal.dot(incident) * normal
}

/// GLSL `mod`: floored remainder, non-negative for positive divisors.
pub(crate) fn floor_mod(x: Vec3, y: Vec3) -> Vec3 {
    x - y * (x / y).floor()
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::vec3;

    #[test]
    fn floor_mod_wraps_negative_coordinates() {
        let wrapped = floor_mod(vec3(-1.0, -15.0, 31.0), Vec3::splat(14.0));
        assert!((wrapped.x - 13.0).abs() < 1e-6);
        assert!((wrapped.y - 13.0).abs() < 1e-6);
        assert!((wrapped.z - 3.0).abs() < 1e-6);
    }

    #[test]
    fn smoothstep_saturates_outside_edges() {
        assert_eq!(smoothstep(0.0, 1.0, -2.0), 0.0);
        assert_eq!(smoothstep(0.0, 1.0, 3.0), 1.0);
        assert_eq!(smoothstep(0.0, 1.0, 0.5), 0.5);
    }

    #[test]
    fn reflect_flips_the_normal_component() {
        let r = reflect(vec3(1.0, -1.0, 0.0), vec3(0.0, 1.0, 0.0));
        assert!((r - vec3(1.0, 1.0, 0.0)).length() < 1e-6);
    }
}

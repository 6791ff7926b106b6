//! Uniform sampling helpers driven by an injected random source.
//!
//! Every random draw in the renderer goes through [`gen_f32`], so swapping the
//! `RngCore` passed in is enough to make a render fully deterministic.

use lumen_math::Vec3;
use rand::RngCore;

/// Scale mapping the top 24 bits of a `u32` onto [0, 1).
const F32_UNIT_SCALE: f32 = 1.0 / (1u32 << 24) as f32;

/// Draw a uniform f32 in [0, 1).
#[inline]
pub fn gen_f32(rng: &mut dyn RngCore) -> f32 {
    (rng.next_u32() >> 8) as f32 * F32_UNIT_SCALE
}

/// Random point inside the unit ball, by rejection sampling the [-1, 1] cube.
pub fn random_in_unit_sphere(rng: &mut dyn RngCore) -> Vec3 {
    loop {
        let p = 2.0 * Vec3::new(gen_f32(rng), gen_f32(rng), gen_f32(rng)) - Vec3::ONE;
        if p.length_squared() < 1.0 {
            return p;
        }
    }
}

/// Random point inside the unit disk in the z = 0 plane.
pub fn random_in_unit_disk(rng: &mut dyn RngCore) -> Vec3 {
    loop {
        let p = 2.0 * Vec3::new(gen_f32(rng), gen_f32(rng), 0.0) - Vec3::new(1.0, 1.0, 0.0);
        if p.length_squared() < 1.0 {
            return p;
        }
    }
}


#[cfg(test)]
mod tests {
    use super::test_rng::SequenceRng;
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_gen_f32_range() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..10_000 {
            let x = gen_f32(&mut rng);
            assert!((0.0..1.0).contains(&x));
        }
    }

    #[test]
    fn test_sequence_rng_replays_values() {
        let mut rng = SequenceRng::new(&[0.25, 0.5, 0.75]);
        assert_eq!(gen_f32(&mut rng), 0.25);
        assert_eq!(gen_f32(&mut rng), 0.5);
        assert_eq!(gen_f32(&mut rng), 0.75);
        assert_eq!(gen_f32(&mut rng), 0.25);
    }

    #[test]
    fn test_unit_sphere_rejects_outside_points() {
        // (0.0, 0.0, 0.0) maps to the cube corner (-1, -1, -1) and is rejected,
        // the next triple maps to (0, 0.5, 0)
        let mut rng = SequenceRng::new(&[0.0, 0.0, 0.0, 0.5, 0.75, 0.5]);
        let p = random_in_unit_sphere(&mut rng);
        assert_eq!(p, Vec3::new(0.0, 0.5, 0.0));
    }

    #[test]
    fn test_unit_sphere_samples_inside() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..1000 {
            assert!(random_in_unit_sphere(&mut rng).length_squared() < 1.0);
        }
    }

    #[test]
    fn test_unit_disk_samples_inside() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..1000 {
            let p = random_in_unit_disk(&mut rng);
            assert_eq!(p.z, 0.0);
            assert!(p.length_squared() < 1.0);
        }
    }
}

//! Coherent noise used to vary the field frequency across the plate.
//!
//! The evaluator only needs a smooth, deterministic 3D function with range
//! roughly [-1, 1]; anything implementing [`CoherentNoise`] qualifies.

use glam::DVec3;
use noise::{NoiseFn, OpenSimplex, Perlin};

/// Smooth, deterministic scalar field over 3D space
pub trait CoherentNoise {
    /// Sample the field; values lie approximately in [-1, 1]
    fn sample(&self, position: DVec3) -> f64;
}

impl<F> CoherentNoise for F
where
    F: Fn(DVec3) -> f64,
{
    fn sample(&self, position: DVec3) -> f64 {
        self(position)
    }
}

/// Gradient noise flavour backing a [`NoiseGenerator`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NoiseKind {
    #[default]
    OpenSimplex,
    Perlin,
}

enum Source {
    OpenSimplex(OpenSimplex),
    Perlin(Perlin),
}

/// Seeded noise generator for plate frequency variation
pub struct NoiseGenerator {
    source: Source,
}

impl NoiseGenerator {
    /// Create new noise generator with seed
    pub fn new(kind: NoiseKind, seed: u32) -> Self {
        let source = match kind {
            NoiseKind::OpenSimplex => Source::OpenSimplex(OpenSimplex::new(seed)),
            NoiseKind::Perlin => Source::Perlin(Perlin::new(seed)),
        };
        Self { source }
    }
}

impl CoherentNoise for NoiseGenerator {
    fn sample(&self, position: DVec3) -> f64 {
        let point = position.to_array();
        match &self.source {
            Source::OpenSimplex(simplex) => simplex.get(point),
            Source::Perlin(perlin) => perlin.get(point),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_noise_is_deterministic() {
        let a = NoiseGenerator::new(NoiseKind::OpenSimplex, 42);
        let b = NoiseGenerator::new(NoiseKind::OpenSimplex, 42);
        let p = DVec3::new(0.37, -1.2, 0.0);
        assert_eq!(a.sample(p), b.sample(p));
    }

    #[test]
    fn test_noise_range_and_continuity() {
        for kind in [NoiseKind::OpenSimplex, NoiseKind::Perlin] {
            let noise = NoiseGenerator::new(kind, 42);
            let mut prev = noise.sample(DVec3::ZERO);
            for i in 1..2000 {
                let p = DVec3::new(i as f64 * 0.001, i as f64 * 0.0007, 0.0);
                let value = noise.sample(p);
                assert!(value.abs() <= 1.05, "{:?} out of range: {}", kind, value);
                // Tiny steps must not jump
                assert!((value - prev).abs() < 0.05);
                prev = value;
            }
        }
    }

    #[test]
    fn test_closure_noise() {
        let constant = |_: DVec3| 0.5;
        assert_eq!(constant.sample(DVec3::ONE), 0.5);
    }
}

//! Chaos-game sampling of iterated function system attractors.
//!
//! A running point is pushed through randomly chosen maps of an
//! [`AffineTransformSet`]; after a few iterations it lands on the attractor and
//! stays there, so the trail of visited points samples the fractal.
//!
//! Randomness comes from a [`SmallRng`] seeded with the caller's seed and owned
//! by the call, so identical inputs give bit-identical output (for a given
//! `rand` release and pointer width) and concurrent calls never share state.

use geo_types::Point;
use log::debug;
use rand::distributions::WeightedIndex;
use rand::prelude::*;
use rand::rngs::SmallRng;

use crate::errors::{FractalError, Result};
use crate::generation::{FractalGenerator, GenerationResult, ResultKind};

pub mod transform;
pub use transform::*;

/// Upper bound on the number of points a single sampling call may produce.
pub const MAX_SAMPLE_COUNT: i64 = 10_000_000;

/// Number of leading points that are usually still converging onto the
/// attractor. [`ChaosGame`] only drops them when asked via
/// [`ChaosGame::burn_in`].
pub const DEFAULT_BURN_IN: usize = 20;

/// Upper bound on discarded leading iterations.
pub const MAX_BURN_IN: usize = MAX_SAMPLE_COUNT as usize;

/// Validate a signed point count, returning it as a usize.
pub(crate) fn validate_count(count: i64) -> Result<usize> {
    if count < 1 {
        return Err(FractalError::invalid(format!(
            "point count must be >= 1, got {}",
            count
        )));
    }
    if count > MAX_SAMPLE_COUNT {
        return Err(FractalError::invalid(format!(
            "point count must be <= {}, got {}",
            MAX_SAMPLE_COUNT, count
        )));
    }
    Ok(count as usize)
}

/// Chaos game over a weighted transform set.
///
/// ```
/// use aoer_fractals::ifs::{barnsley_fern, ChaosGame};
/// use aoer_fractals::generation::FractalGenerator;
///
/// let fern = ChaosGame::new(barnsley_fern(), 1000, 7)
///     .burn_in(20)
///     .generate()
///     .unwrap();
/// assert_eq!(fern.len(), 1000);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ChaosGame {
    transforms: AffineTransformSet,
    count: i64,
    seed: u64,
    burn_in: usize,
    start: Point<f64>,
}

impl ChaosGame {
    /// Sample `count` points starting from the origin, keeping every point.
    pub fn new(transforms: AffineTransformSet, count: i64, seed: u64) -> ChaosGame {
        ChaosGame {
            transforms,
            count,
            seed,
            burn_in: 0,
            start: Point::new(0.0, 0.0),
        }
    }

    /// Run `burn_in` extra iterations first and throw their points away.
    /// The result still holds exactly `count` points.
    pub fn burn_in(self, burn_in: usize) -> Self {
        ChaosGame { burn_in, ..self }
    }

    /// Where the running point starts. Only the transient points depend on it.
    pub fn start(self, start: Point<f64>) -> Self {
        ChaosGame { start, ..self }
    }

    pub fn transforms(&self) -> &AffineTransformSet {
        &self.transforms
    }
}

impl FractalGenerator for ChaosGame {
    fn name(&self) -> &'static str {
        "ifs"
    }

    fn generate(&self) -> Result<GenerationResult> {
        let count = validate_count(self.count)?;
        if self.burn_in > MAX_BURN_IN {
            return Err(FractalError::invalid(format!(
                "burn-in must be <= {}, got {}",
                MAX_BURN_IN, self.burn_in
            )));
        }
        self.transforms.validate()?;
        let dist = WeightedIndex::new(self.transforms.weights())
            .map_err(|e| FractalError::invalid(format!("transform weights: {}", e)))?;
        let maps = self.transforms.transforms();
        let mut rng = SmallRng::seed_from_u64(self.seed);

        let mut current = self.start;
        for _ in 0..self.burn_in {
            current = maps[dist.sample(&mut rng)].apply(current);
        }
        let mut points = Vec::with_capacity(count);
        for _ in 0..count {
            current = maps[dist.sample(&mut rng)].apply(current);
            points.push(current);
        }
        debug!(
            "chaos game: {} points from {} maps (seed {}, burn-in {})",
            points.len(),
            maps.len(),
            self.seed,
            self.burn_in
        );
        Ok(GenerationResult::new(ResultKind::Cloud, points))
    }
}

/// Sample `n` points of the attractor of `transform_set`, starting from the
/// origin and keeping every point.
///
/// Fails with [`FractalError::InvalidParameter`] when `n` is outside
/// `1..=MAX_SAMPLE_COUNT` or the set is empty or not normalised.
pub fn generate(transform_set: &AffineTransformSet, n: i64, seed: u64) -> Result<GenerationResult> {
    ChaosGame::new(transform_set.clone(), n, seed).generate()
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_deterministic() {
        let a = generate(&barnsley_fern(), 5000, 1234).unwrap();
        let b = generate(&barnsley_fern(), 5000, 1234).unwrap();
        assert_eq!(a.len(), 5000);
        assert_eq!(a.kind(), ResultKind::Cloud);
        for (p, q) in a.iter().zip(b.iter()) {
            assert_eq!(p.x().to_bits(), q.x().to_bits());
            assert_eq!(p.y().to_bits(), q.y().to_bits());
        }
        let c = generate(&barnsley_fern(), 5000, 4321).unwrap();
        assert_ne!(a, c);
    }

    #[test]
    fn test_rejects_unnormalised_weights() {
        let set = AffineTransformSet::new_unchecked(vec![
            AffineTransform::new(0.5, 0.0, 0.0, 0.5, 0.0, 0.0, 0.25),
            AffineTransform::new(0.5, 0.0, 0.0, 0.5, 0.5, 0.0, 0.25),
        ]);
        assert!(matches!(
            generate(&set, 100, 1),
            Err(FractalError::InvalidParameter(_))
        ));
    }

    #[test]
    fn test_rejects_bad_counts() {
        for n in [0, -1, -1000, MAX_SAMPLE_COUNT + 1] {
            assert!(matches!(
                generate(&barnsley_fern(), n, 1),
                Err(FractalError::InvalidParameter(_))
            ));
        }
        let empty = AffineTransformSet::new_unchecked(vec![]);
        assert!(generate(&empty, 10, 1).is_err());
    }

    #[test]
    fn test_fern_stays_in_bounds() {
        let fern = generate(&barnsley_fern(), 50_000, 42).unwrap();
        let settled: Vec<_> = fern.iter().skip(DEFAULT_BURN_IN).collect();
        let inside = settled
            .iter()
            .filter(|p| (-3.0..=3.0).contains(&p.x()) && (0.0..=10.0).contains(&p.y()))
            .count();
        assert!(inside as f64 >= 0.99 * settled.len() as f64);
    }

    #[test]
    fn test_burn_in_shifts_the_stream() {
        let plain = generate(&barnsley_fern(), 100, 9).unwrap();
        let burned = ChaosGame::new(barnsley_fern(), 80, 9)
            .burn_in(20)
            .generate()
            .unwrap();
        assert_eq!(burned.len(), 80);
        assert_eq!(&plain.points()[20..], burned.points());
    }

    #[test]
    fn test_rejects_oversized_burn_in() {
        for burn_in in [MAX_BURN_IN + 1, usize::MAX] {
            assert!(matches!(
                ChaosGame::new(barnsley_fern(), 1, 0).burn_in(burn_in).generate(),
                Err(FractalError::InvalidParameter(_))
            ));
        }
        assert!(ChaosGame::new(barnsley_fern(), 1, 0)
            .burn_in(MAX_BURN_IN)
            .generate()
            .is_ok());
    }

    #[test]
    fn test_single_map_converges_to_fixed_point() {
        // p -> p/2 + (1, 1) has its fixed point at (2, 2).
        let set = AffineTransformSet::new(vec![AffineTransform::new(
            0.5, 0.0, 0.0, 0.5, 1.0, 1.0, 1.0,
        )])
        .unwrap();
        let out = generate(&set, 64, 0).unwrap();
        let last = out.points()[63];
        assert!((last.x() - 2.0).abs() < 1e-12);
        assert!((last.y() - 2.0).abs() < 1e-12);
    }
}

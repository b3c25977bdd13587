use geo_types::Point;
use nalgebra::{Affine2, Matrix3};
use serde::{Deserialize, Serialize};

use crate::errors::{FractalError, Result};

/// Allowed slack when checking that a set's weights sum to one.
pub const WEIGHT_TOLERANCE: f64 = 1e-6;

/// One weighted map of an iterated function system:
/// `(x, y) -> (a*x + b*y + e, c*x + d*y + f)`, picked with probability `p`.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct AffineTransform {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub d: f64,
    pub e: f64,
    pub f: f64,
    pub p: f64,
}

impl AffineTransform {
    pub const fn new(a: f64, b: f64, c: f64, d: f64, e: f64, f: f64, p: f64) -> AffineTransform {
        AffineTransform { a, b, c, d, e, f, p }
    }

    /// Contraction halfway toward `vertex`, `p -> (p + vertex) / 2`.
    pub fn halfway_to(vertex: Point<f64>, p: f64) -> AffineTransform {
        AffineTransform::new(0.5, 0.0, 0.0, 0.5, vertex.x() / 2.0, vertex.y() / 2.0, p)
    }

    pub fn apply(&self, point: Point<f64>) -> Point<f64> {
        let (x, y) = point.x_y();
        Point::new(
            self.a * x + self.b * y + self.e,
            self.c * x + self.d * y + self.f,
        )
    }

    /// The same map as an nalgebra matrix, for composing with other affines.
    pub fn to_matrix(&self) -> Affine2<f64> {
        Affine2::from_matrix_unchecked(Matrix3::new(
            self.a, self.b, self.e, self.c, self.d, self.f, 0.0, 0.0, 1.0,
        ))
    }

    fn is_finite(&self) -> bool {
        [self.a, self.b, self.c, self.d, self.e, self.f, self.p]
            .iter()
            .all(|v| v.is_finite())
    }
}

/// An ordered, weighted set of [`AffineTransform`]s.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct AffineTransformSet {
    transforms: Vec<AffineTransform>,
}

impl AffineTransformSet {
    /// Builds a set, rejecting it unless it is non-empty, every coefficient is
    /// finite, no weight is negative, and the weights sum to one.
    pub fn new(transforms: Vec<AffineTransform>) -> Result<AffineTransformSet> {
        let set = AffineTransformSet { transforms };
        set.validate()?;
        Ok(set)
    }

    /// Builds a set without checking it. [`crate::ifs::generate`] still
    /// validates before sampling.
    pub fn new_unchecked(transforms: Vec<AffineTransform>) -> AffineTransformSet {
        AffineTransformSet { transforms }
    }

    pub fn validate(&self) -> Result<()> {
        if self.transforms.is_empty() {
            return Err(FractalError::invalid("transform set is empty"));
        }
        if let Some(i) = self.transforms.iter().position(|t| !t.is_finite()) {
            return Err(FractalError::invalid(format!(
                "transform {} has a non-finite coefficient or weight",
                i
            )));
        }
        if let Some(i) = self.transforms.iter().position(|t| t.p < 0.0) {
            return Err(FractalError::invalid(format!(
                "transform {} has negative weight {}",
                i, self.transforms[i].p
            )));
        }
        let total = self.weight_sum();
        if (total - 1.0).abs() > WEIGHT_TOLERANCE {
            return Err(FractalError::invalid(format!(
                "transform weights sum to {}, expected 1.0",
                total
            )));
        }
        Ok(())
    }

    pub fn weight_sum(&self) -> f64 {
        self.transforms.iter().map(|t| t.p).sum()
    }

    pub fn weights(&self) -> Vec<f64> {
        self.transforms.iter().map(|t| t.p).collect()
    }

    pub fn transforms(&self) -> &[AffineTransform] {
        &self.transforms
    }

    pub fn len(&self) -> usize {
        self.transforms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transforms.is_empty()
    }
}

/// The four maps of Barnsley's fern, as published:
///
/// | map  | a     | b     | c     | d    | e | f    | p    |
/// |------|-------|-------|-------|------|---|------|------|
/// | stem | 0     | 0     | 0     | 0.16 | 0 | 0    | 0.01 |
/// | leaf | 0.85  | 0.04  | -0.04 | 0.85 | 0 | 1.6  | 0.85 |
/// | left | 0.2   | -0.26 | 0.23  | 0.22 | 0 | 1.6  | 0.07 |
/// | right| -0.15 | 0.28  | 0.26  | 0.24 | 0 | 0.44 | 0.07 |
pub fn barnsley_fern() -> AffineTransformSet {
    AffineTransformSet::new_unchecked(vec![
        AffineTransform::new(0.0, 0.0, 0.0, 0.16, 0.0, 0.0, 0.01),
        AffineTransform::new(0.85, 0.04, -0.04, 0.85, 0.0, 1.6, 0.85),
        AffineTransform::new(0.2, -0.26, 0.23, 0.22, 0.0, 1.6, 0.07),
        AffineTransform::new(-0.15, 0.28, 0.26, 0.24, 0.0, 0.44, 0.07),
    ])
}

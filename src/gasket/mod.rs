//! Sierpinski triangle, either by exact subdivision or by the chaos game.

use std::fmt::{self, Display};
use std::str::FromStr;

use geo_types::Point;
use log::debug;
use serde::{Deserialize, Serialize};

use crate::errors::{FractalError, Result};
use crate::generation::{FractalGenerator, GenerationResult, ResultKind};
use crate::ifs::{validate_count, AffineTransform, AffineTransformSet, ChaosGame};

/// Deepest subdivision accepted; depth `d` yields `3^(d+1)` vertices.
pub const MAX_GASKET_DEPTH: i64 = 12;

/// How the gasket is produced.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum GasketMode {
    /// Deterministic removal of the central sub-triangle at every level.
    Recursive,
    /// Random midpoint jumps toward the corners. Needs a seed.
    Chaos,
}

impl FromStr for GasketMode {
    type Err = FractalError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "recursive" => Ok(GasketMode::Recursive),
            "chaos" | "stochastic" => Ok(GasketMode::Chaos),
            other => Err(FractalError::invalid(format!(
                "unknown gasket mode '{}', expected 'recursive' or 'chaos'",
                other
            ))),
        }
    }
}

impl Display for GasketMode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            GasketMode::Recursive => write!(f, "recursive"),
            GasketMode::Chaos => write!(f, "chaos"),
        }
    }
}

/// Corners of the unit equilateral triangle resting on the x axis.
pub fn unit_triangle() -> [Point<f64>; 3] {
    [
        Point::new(0.0, 0.0),
        Point::new(1.0, 0.0),
        Point::new(0.5, 3f64.sqrt() / 2.0),
    ]
}

fn midpoint(a: Point<f64>, b: Point<f64>) -> Point<f64> {
    Point::new((a.x() + b.x()) / 2.0, (a.y() + b.y()) / 2.0)
}

fn subdivide(tri: [Point<f64>; 3], depth: u32, out: &mut Vec<Point<f64>>) {
    if depth == 0 {
        out.extend_from_slice(&tri);
        return;
    }
    let [v0, v1, v2] = tri;
    let m01 = midpoint(v0, v1);
    let m12 = midpoint(v1, v2);
    let m20 = midpoint(v2, v0);
    // (m01, m12, m20) is the central triangle, and is never visited.
    subdivide([v0, m01, m20], depth - 1, out);
    subdivide([m01, v1, m12], depth - 1, out);
    subdivide([m20, m12, v2], depth - 1, out);
}

/// Sierpinski gasket generator. `depth_or_count` is the subdivision depth in
/// [`GasketMode::Recursive`] and the number of sampled points in
/// [`GasketMode::Chaos`].
#[derive(Debug, Clone, PartialEq)]
pub struct SierpinskiGasket {
    mode: GasketMode,
    depth_or_count: i64,
    seed: Option<u64>,
    triangle: [Point<f64>; 3],
}

impl SierpinskiGasket {
    pub fn new(mode: GasketMode, depth_or_count: i64, seed: Option<u64>) -> SierpinskiGasket {
        SierpinskiGasket {
            mode,
            depth_or_count,
            seed,
            triangle: unit_triangle(),
        }
    }

    pub fn with_triangle(self, triangle: [Point<f64>; 3]) -> Self {
        SierpinskiGasket { triangle, ..self }
    }

    fn recursive(&self) -> Result<GenerationResult> {
        let depth = self.depth_or_count;
        if depth < 0 {
            return Err(FractalError::invalid(format!(
                "gasket depth must be >= 0, got {}",
                depth
            )));
        }
        if depth > MAX_GASKET_DEPTH {
            return Err(FractalError::invalid(format!(
                "gasket depth must be <= {}, got {}",
                MAX_GASKET_DEPTH, depth
            )));
        }
        let depth = depth as u32;
        let mut points = Vec::with_capacity(3usize.pow(depth + 1));
        subdivide(self.triangle, depth, &mut points);
        debug!("gasket: depth {} -> {} triangles", depth, points.len() / 3);
        Ok(GenerationResult::new(ResultKind::Triangles, points))
    }

    fn chaos(&self) -> Result<GenerationResult> {
        let count = validate_count(self.depth_or_count)?;
        let seed = self
            .seed
            .ok_or_else(|| FractalError::invalid("chaos mode requires a seed"))?;
        let [v0, v1, v2] = self.triangle;
        let third = 1.0 / 3.0;
        let maps = AffineTransformSet::new_unchecked(vec![
            AffineTransform::halfway_to(v0, third),
            AffineTransform::halfway_to(v1, third),
            AffineTransform::halfway_to(v2, third),
        ]);
        let centroid = Point::new(
            (v0.x() + v1.x() + v2.x()) / 3.0,
            (v0.y() + v1.y() + v2.y()) / 3.0,
        );
        ChaosGame::new(maps, count as i64, seed)
            .start(centroid)
            .generate()
    }
}

impl FractalGenerator for SierpinskiGasket {
    fn name(&self) -> &'static str {
        "gasket"
    }

    fn generate(&self) -> Result<GenerationResult> {
        if let Some(corner) = self
            .triangle
            .iter()
            .find(|p| !(p.x().is_finite() && p.y().is_finite()))
        {
            return Err(FractalError::invalid(format!(
                "gasket corners must be finite, got {:?}",
                corner
            )));
        }
        match self.mode {
            GasketMode::Recursive => self.recursive(),
            GasketMode::Chaos => self.chaos(),
        }
    }
}

/// Generate a gasket by mode name (`"recursive"` or `"chaos"`). The seed is
/// only read, and then required, in chaos mode.
pub fn generate(mode: &str, depth_or_count: i64, seed: Option<u64>) -> Result<GenerationResult> {
    let mode = mode.parse::<GasketMode>()?;
    SierpinskiGasket::new(mode, depth_or_count, seed).generate()
}

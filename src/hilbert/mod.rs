//! Hilbert curve by recursive quadrant subdivision.
//!
//! The curve is first built on the integer lattice `[0, 2^order)^2`, where
//! every order-`k` curve starts at cell `(0, 0)` and ends at `(2^k - 1, 0)`.
//! An order-`k` curve is four order-`k-1` curves, one per quadrant, each
//! placed with a fixed orientation so the end of one quadrant sits next to
//! the start of the next. Lattice cells are then mapped onto the centres of
//! the caller's square.

use log::debug;

use crate::errors::{FractalError, Result};
use crate::generation::{FractalGenerator, GenerationResult, ResultKind};
use crate::geo_types::matrix::{lattice_matrix, xform_point};
use crate::l_system::LSystem;
use crate::turtle::GridTurtle;
use geo_types::Point;

/// Deepest order accepted; `4^10` is about a million vertices.
pub const MAX_HILBERT_ORDER: i32 = 10;

/// Quadrants in the order the curve visits them, and how the sub-curve is
/// oriented inside each one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Quadrant {
    /// Transposed, so it leaves through its upper edge.
    LowerLeft,
    UpperLeft,
    UpperRight,
    /// Anti-transposed, so it enters from above and ends on the bottom row.
    LowerRight,
}

impl Quadrant {
    const VISIT_ORDER: [Quadrant; 4] = [
        Quadrant::LowerLeft,
        Quadrant::UpperLeft,
        Quadrant::UpperRight,
        Quadrant::LowerRight,
    ];

    /// Move a cell of a `half` x `half` sub-curve into this quadrant of the
    /// `2 * half` lattice.
    fn place(self, (x, y): (u32, u32), half: u32) -> (u32, u32) {
        match self {
            Quadrant::LowerLeft => (y, x),
            Quadrant::UpperLeft => (x, y + half),
            Quadrant::UpperRight => (x + half, y + half),
            Quadrant::LowerRight => (2 * half - 1 - y, half - 1 - x),
        }
    }
}

/// Visit order of the lattice cells of an order-`order` curve.
fn lattice_cells(order: u32) -> Vec<(u32, u32)> {
    if order == 0 {
        return vec![(0, 0)];
    }
    let sub = lattice_cells(order - 1);
    let half = 1u32 << (order - 1);
    let mut cells = Vec::with_capacity(sub.len() * 4);
    for quadrant in Quadrant::VISIT_ORDER {
        cells.extend(sub.iter().map(|cell| quadrant.place(*cell, half)));
    }
    cells
}

fn validate(order: i32, size: f64) -> Result<u32> {
    if order < 0 {
        return Err(FractalError::invalid(format!(
            "hilbert order must be >= 0, got {}",
            order
        )));
    }
    if order > MAX_HILBERT_ORDER {
        return Err(FractalError::invalid(format!(
            "hilbert order must be <= {}, got {}",
            MAX_HILBERT_ORDER, order
        )));
    }
    if !size.is_finite() || size <= 0.0 {
        return Err(FractalError::invalid(format!(
            "hilbert size must be a positive finite number, got {}",
            size
        )));
    }
    Ok(order as u32)
}

fn to_result(cells: impl Iterator<Item = (f64, f64)>, order: u32, size: f64) -> GenerationResult {
    let to_square = lattice_matrix(size, (1u64 << order) as f64);
    let points = cells
        .map(|(x, y)| xform_point(&Point::new(x, y), &to_square))
        .collect();
    GenerationResult::new(ResultKind::Path, points)
}

/// The order-`order` Hilbert curve inscribed in the square `[0, size]^2`.
/// Returns `4^order` cell centres, one grid step (`size / 2^order`) apart.
pub fn generate(order: i32, size: f64) -> Result<GenerationResult> {
    let order = validate(order, size)?;
    let cells = lattice_cells(order);
    debug!("hilbert: order {} -> {} vertices", order, cells.len());
    Ok(to_result(
        cells.into_iter().map(|(x, y)| (x as f64, y as f64)),
        order,
        size,
    ))
}

/// The same curve family drawn by walking the Hilbert L-system with a grid
/// turtle. The walk is shifted onto the `[0, 2^order)^2` lattice before it is
/// scaled, so it covers exactly the cells [`generate`] covers, though its
/// orientation can differ.
pub fn lsystem_curve(order: i32, size: f64) -> Result<GenerationResult> {
    let order = validate(order, size)?;
    let lpath = LSystem::hilbert().expand(order);
    let trail = GridTurtle::with_capacity(1usize << (2 * order))
        .walk_lpath(&lpath)
        .into_trail();
    let min_x = trail.iter().map(|c| c.0).min().unwrap_or(0);
    let min_y = trail.iter().map(|c| c.1).min().unwrap_or(0);
    Ok(to_result(
        trail
            .into_iter()
            .map(|(x, y)| ((x - min_x) as f64, (y - min_y) as f64)),
        order,
        size,
    ))
}

/// Parameters for [`generate`], as a reusable [`FractalGenerator`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HilbertCurve {
    pub order: i32,
    pub size: f64,
}

impl HilbertCurve {
    pub fn new(order: i32, size: f64) -> HilbertCurve {
        HilbertCurve { order, size }
    }
}

impl FractalGenerator for HilbertCurve {
    fn name(&self) -> &'static str {
        "hilbert"
    }

    fn generate(&self) -> Result<GenerationResult> {
        generate(self.order, self.size)
    }
}

//! Heighway dragon curve from its paper-folding turn sequence.
//!
//! The order-`k` sequence is the order `k-1` sequence, a fixed right turn,
//! then the order `k-1` sequence reversed with every turn flipped:
//!
//! ```text
//! S(0) = []
//! S(k) = S(k-1) + [R] + reverse(complement(S(k-1)))
//! ```
//!
//! A grid turtle starting at the origin and facing north applies each turn
//! and then steps one unit, so the order-`k` curve has `2^k` vertices and the
//! order `k` curve is a prefix of the order `k+1` curve.
//!
//! On the lattice the curve touches itself at many corners, which reads as
//! crossings once plotted. [`rounded_path`] cuts every corner back by
//! [`CORNER_RATIO`] so the folds stay visibly apart.

use std::ops::Index;

use geo_types::Point;
use log::debug;

use crate::errors::{FractalError, Result};
use crate::generation::{FractalGenerator, GenerationResult, ResultKind};
use crate::turtle::{GridTurtle, Heading, Turn};

/// Deepest order accepted; `2^20` vertices.
pub const MAX_DRAGON_ORDER: i32 = 20;

/// The turn placed between the two halves at every level.
pub const FOLD_TURN: Turn = Turn::Right;

/// Direction the turtle faces before the first turn.
pub const START_HEADING: Heading = Heading::North;

/// Ordered quarter turns of a dragon curve. Holds `2^k - 1` turns at order `k`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TurnSequence(Vec<Turn>);

impl TurnSequence {
    /// Builds the order-`order` sequence by repeated unfolding.
    pub fn dragon(order: u32) -> TurnSequence {
        let mut turns: Vec<Turn> = Vec::with_capacity((1usize << order) - 1);
        for _ in 0..order {
            let tail: Vec<Turn> = turns.iter().rev().map(|t| t.complement()).collect();
            turns.push(FOLD_TURN);
            turns.extend(tail);
        }
        TurnSequence(turns)
    }

    /// Closed form of [`TurnSequence::dragon`]: write the 1-based index as
    /// `2^m * q` with `q` odd; the turn is the fold turn when `q % 4 == 1`
    /// and its complement when `q % 4 == 3`.
    pub fn dragon_from_bits(order: u32) -> TurnSequence {
        let len = (1u64 << order) - 1;
        TurnSequence(
            (1..=len)
                .map(|i| {
                    let q = i >> i.trailing_zeros();
                    if q & 0b10 == 0 {
                        FOLD_TURN
                    } else {
                        FOLD_TURN.complement()
                    }
                })
                .collect(),
        )
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Turn> {
        self.0.iter()
    }

    /// Reversed, with every turn flipped.
    pub fn reversed_complement(&self) -> TurnSequence {
        TurnSequence(self.0.iter().rev().map(|t| t.complement()).collect())
    }
}

impl Index<usize> for TurnSequence {
    type Output = Turn;

    fn index(&self, index: usize) -> &Turn {
        &self.0[index]
    }
}

impl<'a> IntoIterator for &'a TurnSequence {
    type Item = &'a Turn;
    type IntoIter = std::slice::Iter<'a, Turn>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl From<Vec<Turn>> for TurnSequence {
    fn from(turns: Vec<Turn>) -> Self {
        TurnSequence(turns)
    }
}

/// The order-`order` dragon curve as `2^order` unit-spaced lattice points,
/// starting at the origin.
pub fn generate(order: i32) -> Result<GenerationResult> {
    if order < 0 {
        return Err(FractalError::invalid(format!(
            "dragon order must be >= 0, got {}",
            order
        )));
    }
    if order > MAX_DRAGON_ORDER {
        return Err(FractalError::invalid(format!(
            "dragon order must be <= {}, got {}",
            MAX_DRAGON_ORDER, order
        )));
    }
    let turns = TurnSequence::dragon(order as u32);
    let turtle = GridTurtle::with_capacity(turns.len() + 1)
        .heading(START_HEADING)
        .walk_turns(&turns);
    let points: Vec<Point<f64>> = turtle.to_points(1.0);
    debug!("dragon: order {} -> {} vertices", order, points.len());
    Ok(GenerationResult::new(ResultKind::Path, points))
}

/// How far along each segment a corner is cut, `1 / (2 + sqrt(2))`. With unit
/// segments this makes the diagonal cut as long as what is left of each
/// straight run.
pub const CORNER_RATIO: f64 = 1.0 / (2.0 + std::f64::consts::SQRT_2);

/// Replace every interior vertex of a path with two points, one `ratio` of
/// the way toward each neighbour. The endpoints stay where they are, so an
/// `n` point path (n >= 2) becomes `2n - 2` points.
pub fn rounded_path(path: &GenerationResult, ratio: f64) -> GenerationResult {
    let points = path.points();
    if points.len() < 3 {
        return GenerationResult::new(path.kind(), points.to_vec());
    }
    let toward = |from: Point<f64>, to: Point<f64>| from + (to - from) * ratio;
    let mut out = Vec::with_capacity(2 * points.len() - 2);
    out.push(points[0]);
    for w in points.windows(3) {
        out.push(toward(w[1], w[0]));
        out.push(toward(w[1], w[2]));
    }
    out.push(points[points.len() - 1]);
    GenerationResult::new(path.kind(), out)
}

/// Parameters for [`generate`], as a reusable [`FractalGenerator`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DragonCurve {
    pub order: i32,
    pub rounded: bool,
}

impl DragonCurve {
    pub fn new(order: i32) -> DragonCurve {
        DragonCurve {
            order,
            rounded: false,
        }
    }

    /// Cut the corners with [`rounded_path`] at [`CORNER_RATIO`].
    pub fn rounded(self, rounded: bool) -> Self {
        DragonCurve { rounded, ..self }
    }
}

impl FractalGenerator for DragonCurve {
    fn name(&self) -> &'static str {
        "dragon"
    }

    fn generate(&self) -> Result<GenerationResult> {
        let path = generate(self.order)?;
        if self.rounded {
            Ok(rounded_path(&path, CORNER_RATIO))
        } else {
            Ok(path)
        }
    }
}

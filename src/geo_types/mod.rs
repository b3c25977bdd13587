use geo_types::{CoordNum, Point};
use num_traits::real::Real;

/// Affine matrix helpers (nalgebra) for moving generated geometry between
/// lattice space and caller space.
pub mod matrix;

/// Trait that implements distance functions between two [`geo_types::Point`] structs.
/// Also includes a length function which returns the length of a [`geo_types::Point`]
/// as if it were a Vector.
pub trait PointDistance<T: CoordNum> {
    /// Return the scalar (Euclidean) distance between two [`geo_types::Point`]s.
    fn distance(&self, other: &Point<T>) -> T;

    /// Chessboard distance, the larger of the per-axis differences.
    fn chebyshev(&self, other: &Point<T>) -> T;

    /// Treat a [`geo_types::Point`] as a Vector and return its scalar length.
    fn length(&self) -> T;
}

impl<T> PointDistance<T> for Point<T>
where
    T: CoordNum,
    T: Real,
{
    fn distance(&self, other: &Point<T>) -> T {
        let p = *self - *other;
        p.length()
    }

    fn chebyshev(&self, other: &Point<T>) -> T {
        let p = *self - *other;
        p.x().abs().max(p.y().abs())
    }

    fn length(&self) -> T {
        (self.x().powi(2) + self.y().powi(2)).sqrt()
    }
}

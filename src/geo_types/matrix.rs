use geo_types::Point;
use nalgebra::Matrix3;
use nalgebra::{Affine2, Point2 as NPoint2, RealField};
use num_traits::Float;

/// Helper to create a scaling matrix
pub fn scale_matrix<T>(sx: T, sy: T) -> Affine2<T>
where
    T: RealField,
    T: Float,
{
    Affine2::from_matrix_unchecked(Matrix3::<T>::new(
        sx,
        T::zero(),
        T::zero(),
        T::zero(),
        sy,
        T::zero(),
        T::zero(),
        T::zero(),
        T::one(),
    ))
}

/// Helper to create a translation matrix
pub fn translate_matrix<T>(tx: T, ty: T) -> Affine2<T>
where
    T: RealField,
    T: Float,
{
    Affine2::from_matrix_unchecked(Matrix3::<T>::new(
        T::one(),
        T::zero(),
        tx,
        T::zero(),
        T::one(),
        ty,
        T::zero(),
        T::zero(),
        T::one(),
    ))
}

/// Maps integer lattice cells onto the centres of a `size` x `size` square
/// cut into `cells` x `cells` squares.
pub fn lattice_matrix(size: f64, cells: f64) -> Affine2<f64> {
    let step = size / cells;
    scale_matrix(step, step) * translate_matrix(0.5, 0.5)
}

/// Run a single point through an affine matrix.
pub fn xform_point(point: &Point<f64>, affine: &Affine2<f64>) -> Point<f64> {
    let out = affine * NPoint2::new(point.x(), point.y());
    Point::new(out.x, out.y)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geo_types::PointDistance;

    #[test]
    fn test_translate() {
        let tx = translate_matrix(10., 5.);
        let out = xform_point(&Point::new(25., 25.), &tx);
        assert!(out.distance(&Point::new(35., 30.)) < 1e-8);
    }

    #[test]
    fn test_scale_then_translate() {
        let m = scale_matrix(2., 3.) * translate_matrix(1., 1.);
        let out = xform_point(&Point::new(1., 2.), &m);
        assert!(out.distance(&Point::new(4., 9.)) < 1e-8);
    }

    #[test]
    fn test_lattice_centres() {
        let m = lattice_matrix(8.0, 4.0);
        assert_eq!(xform_point(&Point::new(0., 0.), &m), Point::new(1., 1.));
        assert_eq!(xform_point(&Point::new(3., 2.), &m), Point::new(7., 5.));
    }
}

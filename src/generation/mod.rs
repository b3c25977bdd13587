//! The shared output contract of every generator: an ordered run of points,
//! tagged with how a plotting surface should read them.

use std::fmt::Debug;

use geo::BoundingRect;
use geo_types::{Geometry, LineString, MultiPoint, MultiPolygon, Point, Polygon, Rect};
use nalgebra::Affine2;
use serde::{Deserialize, Serialize};

use crate::errors::Result;
use crate::geo_types::matrix::xform_point;

/// How the points of a [`GenerationResult`] relate to each other.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResultKind {
    /// Consecutive points are joined; the order is the curve.
    Path,
    /// A point cloud. The order is deterministic but carries no meaning.
    Cloud,
    /// Every consecutive triple is the corner set of one filled triangle.
    Triangles,
}

/// The ordered points produced by a single generation call. The caller owns
/// it; nothing in here is shared with the generator that built it.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct GenerationResult {
    kind: ResultKind,
    points: Vec<Point<f64>>,
}

impl GenerationResult {
    pub fn new(kind: ResultKind, points: Vec<Point<f64>>) -> GenerationResult {
        GenerationResult { kind, points }
    }

    pub fn kind(&self) -> ResultKind {
        self.kind
    }

    pub fn points(&self) -> &[Point<f64>] {
        &self.points
    }

    pub fn into_points(self) -> Vec<Point<f64>> {
        self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Point<f64>> {
        self.points.iter()
    }

    /// Axis aligned bounds of every point, `None` when there are no points.
    pub fn bounds(&self) -> Option<Rect<f64>> {
        MultiPoint::from(self.points.clone()).bounding_rect()
    }

    /// Returns a copy with every point run through `transformation`.
    pub fn transformed(&self, transformation: &Affine2<f64>) -> GenerationResult {
        GenerationResult {
            kind: self.kind,
            points: self
                .points
                .iter()
                .map(|p| xform_point(p, transformation))
                .collect(),
        }
    }

    /// Converts into the geo_types geometry a plotting surface expects:
    /// paths become a [`LineString`], clouds a [`MultiPoint`], and triangle
    /// runs a [`MultiPolygon`] of closed triangles.
    pub fn to_geometry(&self) -> Geometry<f64> {
        match self.kind {
            ResultKind::Path => Geometry::LineString(LineString::from(self.points.clone())),
            ResultKind::Cloud => Geometry::MultiPoint(MultiPoint::from(self.points.clone())),
            ResultKind::Triangles => Geometry::MultiPolygon(MultiPolygon::new(
                self.points
                    .chunks_exact(3)
                    .map(|tri| {
                        Polygon::new(
                            LineString::from(vec![tri[0], tri[1], tri[2], tri[0]]),
                            vec![],
                        )
                    })
                    .collect(),
            )),
        }
    }
}

impl<'a> IntoIterator for &'a GenerationResult {
    type Item = &'a Point<f64>;
    type IntoIter = std::slice::Iter<'a, Point<f64>>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}

/// Implemented by every fractal generator. A generator holds only its
/// parameters; each `generate` call validates them and builds a fresh result.
pub trait FractalGenerator: Debug + Send + Sync {
    /// Short, stable name of the fractal family.
    fn name(&self) -> &'static str;

    fn generate(&self) -> Result<GenerationResult>;
}

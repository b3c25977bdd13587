//! ArmyOfEvilRobots fractal generators for pen-plotter art
//!
//! Point and path data for four classic fractals: Barnsley's fern (an
//! iterated function system sampled with the chaos game), the Hilbert curve,
//! the Sierpinski triangle and the Heighway dragon. Every generator returns a
//! [`generation::GenerationResult`], an ordered run of
//! `geo_types::Point`s that converts straight into geo_types geometry for
//! whatever is doing the drawing.
//!
//! Generation is pure and deterministic. The stochastic generators take an
//! explicit seed and build their own RNG per call, so nothing is shared
//! between calls and they can run side by side (see [`gallery`]).
//!
//! ```
//! use aoer_fractals::prelude::*;
//!
//! let curve = hilbert::generate(3, 100.0).unwrap();
//! assert_eq!(curve.len(), 64);
//! let fern = ifs::generate(&barnsley_fern(), 10_000, 42).unwrap();
//! assert_eq!(fern.len(), 10_000);
//! ```

/// The one error type generators return.
pub mod errors;

/// Extensions/Traits for geo_types geometry, plus nalgebra affine helpers.
pub mod geo_types;

/// The shared result type and the [`generation::FractalGenerator`] trait.
pub mod generation;

/// Integer lattice turtle, for walking turn sequences and L-system paths.
pub mod turtle;

/// L-system implementation, with expansion/recursion
pub mod l_system;

/// Weighted affine transforms and the chaos-game sampler (Barnsley fern).
pub mod ifs;

/// Hilbert curve.
pub mod hilbert;

/// Sierpinski triangle.
pub mod gasket;

/// Dragon curve.
pub mod dragon;

/// RON configuration of generation requests.
pub mod config;

/// Run several requests in parallel.
pub mod gallery;

/// Make your life easy! Just import prelude::* and get going.
pub mod prelude {
    pub use crate::config::{FractalConfig, GalleryConfig};
    pub use crate::dragon::{self, DragonCurve, TurnSequence};
    pub use crate::errors::FractalError;
    pub use crate::gasket::{self, GasketMode, SierpinskiGasket};
    pub use crate::generation::{FractalGenerator, GenerationResult, ResultKind};
    pub use crate::geo_types::PointDistance;
    pub use crate::hilbert::{self, HilbertCurve};
    pub use crate::ifs::{self, barnsley_fern, AffineTransform, AffineTransformSet, ChaosGame};
    pub use crate::l_system::LSystem;
    pub use crate::turtle::{GridTurtle, Heading, Turn};
}

//! RON descriptions of generation requests, for callers that would rather
//! keep their parameters in a file than in code.
//!
//! ```ron
//! GalleryConfig(fractals: [
//!     Fern(count: 50000, seed: 42, burn_in: 20),
//!     Hilbert(order: 6, size: 1.0),
//!     Gasket(mode: "recursive", depth_or_count: 6),
//!     Dragon(order: 12),
//! ])
//! ```

use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};
use ron::ser::PrettyConfig;
use serde::{Deserialize, Serialize};

use crate::dragon::{self, DragonCurve};
use crate::errors;
use crate::gasket;
use crate::generation::{FractalGenerator, GenerationResult};
use crate::hilbert;
use crate::ifs::{barnsley_fern, ChaosGame};

fn default_size() -> f64 {
    1.0
}

/// A single generation request. Values are kept exactly as written so that
/// range checking happens in the generators, not in the parser.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub enum FractalConfig {
    Fern {
        count: i64,
        seed: u64,
        #[serde(default)]
        burn_in: usize,
    },
    Hilbert {
        order: i32,
        #[serde(default = "default_size")]
        size: f64,
    },
    Gasket {
        mode: String,
        depth_or_count: i64,
        #[serde(default)]
        seed: Option<u64>,
    },
    Dragon {
        order: i32,
        #[serde(default)]
        rounded: bool,
    },
}

impl FractalConfig {
    pub fn name(&self) -> &'static str {
        match self {
            FractalConfig::Fern { .. } => "fern",
            FractalConfig::Hilbert { .. } => "hilbert",
            FractalConfig::Gasket { .. } => "gasket",
            FractalConfig::Dragon { .. } => "dragon",
        }
    }

    pub fn generate(&self) -> errors::Result<GenerationResult> {
        match self {
            FractalConfig::Fern {
                count,
                seed,
                burn_in,
            } => ChaosGame::new(barnsley_fern(), *count, *seed)
                .burn_in(*burn_in)
                .generate(),
            FractalConfig::Hilbert { order, size } => hilbert::generate(*order, *size),
            FractalConfig::Gasket {
                mode,
                depth_or_count,
                seed,
            } => gasket::generate(mode, *depth_or_count, *seed),
            FractalConfig::Dragon { order, rounded } => {
                DragonCurve::new(*order).rounded(*rounded).generate()
            }
        }
    }
}

/// A batch of requests, see [`crate::gallery::render_all`].
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct GalleryConfig {
    pub fractals: Vec<FractalConfig>,
}

impl Default for GalleryConfig {
    fn default() -> Self {
        GalleryConfig {
            fractals: vec![
                FractalConfig::Fern {
                    count: 50_000,
                    seed: 42,
                    burn_in: 20,
                },
                FractalConfig::Hilbert {
                    order: 6,
                    size: 1.0,
                },
                FractalConfig::Gasket {
                    mode: "recursive".to_string(),
                    depth_or_count: 6,
                    seed: None,
                },
                FractalConfig::Dragon {
                    order: 12,
                    rounded: false,
                },
            ],
        }
    }
}

impl GalleryConfig {
    pub fn from_ron_str(data: &str) -> Result<GalleryConfig> {
        let gallery = ron::from_str(data).context("Failed to parse gallery config")?;
        Ok(gallery)
    }

    pub fn to_ron_string(&self) -> Result<String> {
        Ok(ron::ser::to_string_pretty(self, PrettyConfig::default())?)
    }

    pub fn from_file(path: &Path) -> Result<GalleryConfig> {
        let mut reader = std::fs::File::open(path)
            .with_context(|| format!("Failed to open gallery config {}", path.display()))?;
        let mut data = String::new();
        reader.read_to_string(&mut data)?;
        GalleryConfig::from_ron_str(&data)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::errors::FractalError;

    #[test]
    fn test_parse_with_defaults() {
        let gallery = GalleryConfig::from_ron_str(
            r#"GalleryConfig(fractals: [
                Fern(count: 10, seed: 3),
                Hilbert(order: 2),
                Gasket(mode: "chaos", depth_or_count: 5, seed: Some(1)),
                Dragon(order: 4),
            ])"#,
        )
        .unwrap();
        assert_eq!(
            gallery.fractals[0],
            FractalConfig::Fern {
                count: 10,
                seed: 3,
                burn_in: 0
            }
        );
        assert_eq!(
            gallery.fractals[1],
            FractalConfig::Hilbert {
                order: 2,
                size: 1.0
            }
        );
        let names: Vec<&str> = gallery.fractals.iter().map(|f| f.name()).collect();
        assert_eq!(names, vec!["fern", "hilbert", "gasket", "dragon"]);
    }

    #[test]
    fn test_round_trip() {
        let gallery = GalleryConfig::default();
        let text = gallery.to_ron_string().unwrap();
        assert_eq!(GalleryConfig::from_ron_str(&text).unwrap(), gallery);
    }

    #[test]
    fn test_dispatch_matches_direct_calls() {
        let hilbert = FractalConfig::Hilbert {
            order: 3,
            size: 2.0,
        };
        assert_eq!(hilbert.generate().unwrap(), hilbert::generate(3, 2.0).unwrap());
        let dragon = FractalConfig::Dragon {
            order: 5,
            rounded: false,
        };
        assert_eq!(dragon.generate().unwrap(), dragon::generate(5).unwrap());
        let fern = FractalConfig::Fern {
            count: 100,
            seed: 8,
            burn_in: 0,
        };
        assert_eq!(
            fern.generate().unwrap(),
            crate::ifs::generate(&barnsley_fern(), 100, 8).unwrap()
        );
    }

    #[test]
    fn test_rounded_dragon() {
        let gallery =
            GalleryConfig::from_ron_str("GalleryConfig(fractals: [Dragon(order: 3, rounded: true)])")
                .unwrap();
        let result = gallery.fractals[0].generate().unwrap();
        assert_eq!(
            result,
            dragon::rounded_path(&dragon::generate(3).unwrap(), dragon::CORNER_RATIO)
        );
    }

    #[test]
    fn test_oversized_burn_in_is_rejected() {
        let gallery = GalleryConfig::from_ron_str(
            "GalleryConfig(fractals: [Fern(count: 1, seed: 0, burn_in: 18446744073709551615)])",
        )
        .unwrap();
        assert!(matches!(
            gallery.fractals[0].generate(),
            Err(FractalError::InvalidParameter(_))
        ));
    }

    #[test]
    fn test_invalid_values_reach_generators() {
        let gallery = GalleryConfig::from_ron_str(
            r#"GalleryConfig(fractals: [
                Hilbert(order: -1),
                Gasket(mode: "spiral", depth_or_count: 2),
                Dragon(order: -4),
                Fern(count: -10, seed: 0),
            ])"#,
        )
        .unwrap();
        for fractal in gallery.fractals {
            assert!(matches!(
                fractal.generate(),
                Err(FractalError::InvalidParameter(_))
            ));
        }
    }

    #[test]
    fn test_garbage_is_an_error() {
        assert!(GalleryConfig::from_ron_str("GalleryConfig(fractals: [Koch(order: 2)])").is_err());
    }
}

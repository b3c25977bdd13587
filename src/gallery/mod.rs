use log::debug;
use rayon::prelude::*;

use crate::config::FractalConfig;
use crate::errors::Result;
use crate::generation::GenerationResult;

/// The outcome of one request in a gallery run.
#[derive(Debug)]
pub struct GalleryEntry {
    pub name: &'static str,
    pub result: Result<GenerationResult>,
}

/// Generate every request on the rayon pool. Requests share nothing, so no
/// coordination is needed; entries come back in input order and a failing
/// request does not affect the others.
pub fn render_all(configs: &[FractalConfig]) -> Vec<GalleryEntry> {
    debug!("gallery: rendering {} fractals", configs.len());
    configs
        .par_iter()
        .map(|config| GalleryEntry {
            name: config.name(),
            result: config.generate(),
        })
        .collect()
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::config::GalleryConfig;

    #[test]
    fn test_default_gallery() {
        let gallery = GalleryConfig::default();
        let entries = render_all(&gallery.fractals);
        let names: Vec<&str> = entries.iter().map(|e| e.name).collect();
        assert_eq!(names, vec!["fern", "hilbert", "gasket", "dragon"]);
        for entry in &entries {
            assert!(entry.result.is_ok());
        }
        assert_eq!(entries[1].result.as_ref().unwrap().len(), 4096);
        assert_eq!(entries[3].result.as_ref().unwrap().len(), 4096);
    }

    #[test]
    fn test_matches_sequential_and_isolates_failures() {
        let configs = vec![
            FractalConfig::Fern {
                count: 500,
                seed: 1,
                burn_in: 0,
            },
            FractalConfig::Dragon {
                order: -1,
                rounded: false,
            },
            FractalConfig::Fern {
                count: 500,
                seed: 2,
                burn_in: 0,
            },
        ];
        let entries = render_all(&configs);
        assert!(entries[1].result.is_err());
        for (entry, config) in entries.iter().zip(&configs) {
            if let Ok(result) = &entry.result {
                assert_eq!(result, &config.generate().unwrap());
            }
        }
    }
}

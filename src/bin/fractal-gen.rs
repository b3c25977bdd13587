use std::fs;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use env_logger::Env;
use log::{error, info};

use aoer_fractals::config::GalleryConfig;
use aoer_fractals::gallery::render_all;
use aoer_fractals::prelude::*;

#[derive(Parser)]
#[command(name = "fractal-gen")]
#[command(about = "Generate fractal point and path data for plotting", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format for point data
    #[arg(short, long, global = true, default_value = "csv")]
    format: OutputFormat,

    /// Enable debug logging (overridden by RUST_LOG)
    #[arg(long, global = true)]
    debug: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Barnsley fern via the chaos game
    Fern {
        /// Number of points to produce
        #[arg(short = 'n', long, default_value_t = 50_000, allow_negative_numbers = true)]
        count: i64,

        /// Random seed
        #[arg(short, long, default_value_t = 42)]
        seed: u64,

        /// Leading iterations to discard before recording points
        #[arg(long, default_value_t = 0)]
        burn_in: usize,
    },

    /// Hilbert curve
    Hilbert {
        /// Recursion depth
        #[arg(short, long, allow_negative_numbers = true)]
        order: i32,

        /// Side length of the bounding square
        #[arg(long, default_value_t = 1.0)]
        size: f64,
    },

    /// Sierpinski triangle
    Gasket {
        /// "recursive" or "chaos"
        #[arg(short, long, default_value = "recursive")]
        mode: String,

        /// Subdivision depth (recursive) or point count (chaos)
        #[arg(short, long, allow_negative_numbers = true)]
        depth_or_count: i64,

        /// Random seed, required in chaos mode
        #[arg(short, long)]
        seed: Option<u64>,
    },

    /// Dragon curve
    Dragon {
        /// Recursion depth
        #[arg(short, long, allow_negative_numbers = true)]
        order: i32,

        /// Cut every corner so touching folds stay apart when drawn
        #[arg(long)]
        rounded: bool,
    },

    /// Generate every fractal listed in a RON gallery file
    Gallery {
        /// Gallery config; the built-in gallery is used when omitted
        #[arg(value_hint = clap::ValueHint::FilePath)]
        file: Option<PathBuf>,

        /// Write one point file per entry into this directory
        #[arg(long)]
        out_dir: Option<PathBuf>,
    },
}

#[derive(ValueEnum, Debug, Clone, Copy)]
enum OutputFormat {
    Csv,
    Ron,
}

impl OutputFormat {
    fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Csv => "csv",
            OutputFormat::Ron => "ron",
        }
    }
}

impl Commands {
    /// Build the requested fractal. `None` for commands that are not a
    /// single generation request.
    fn generate(&self) -> Option<aoer_fractals::errors::Result<GenerationResult>> {
        match self {
            Commands::Fern {
                count,
                seed,
                burn_in,
            } => Some(
                ChaosGame::new(barnsley_fern(), *count, *seed)
                    .burn_in(*burn_in)
                    .generate(),
            ),
            Commands::Hilbert { order, size } => Some(hilbert::generate(*order, *size)),
            Commands::Gasket {
                mode,
                depth_or_count,
                seed,
            } => Some(gasket::generate(mode, *depth_or_count, *seed)),
            Commands::Dragon { order, rounded } => {
                Some(DragonCurve::new(*order).rounded(*rounded).generate())
            }
            Commands::Gallery { .. } => None,
        }
    }
}

fn write_result<W: Write>(
    out: &mut W,
    result: &GenerationResult,
    format: OutputFormat,
) -> Result<()> {
    match format {
        OutputFormat::Csv => {
            writeln!(out, "x,y")?;
            for p in result {
                writeln!(out, "{},{}", p.x(), p.y())?;
            }
        }
        OutputFormat::Ron => {
            let text = ron::ser::to_string_pretty(result, ron::ser::PrettyConfig::default())?;
            writeln!(out, "{}", text)?;
        }
    }
    Ok(())
}

fn run_gallery(file: Option<&Path>, out_dir: Option<&Path>, format: OutputFormat) -> Result<()> {
    let gallery = match file {
        Some(path) => GalleryConfig::from_file(path)?,
        None => GalleryConfig::default(),
    };
    if let Some(dir) = out_dir {
        fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create output directory {}", dir.display()))?;
    }
    let entries = render_all(&gallery.fractals);
    let mut failures = 0;
    for (i, entry) in entries.iter().enumerate() {
        match &entry.result {
            Ok(result) => {
                info!("{} #{}: {} points", entry.name, i, result.len());
                if let Some(dir) = out_dir {
                    let path = dir.join(format!("{:02}-{}.{}", i, entry.name, format.extension()));
                    let mut writer = BufWriter::new(
                        fs::File::create(&path)
                            .with_context(|| format!("Failed to create {}", path.display()))?,
                    );
                    write_result(&mut writer, result, format)?;
                    writer
                        .flush()
                        .with_context(|| format!("Failed to write {}", path.display()))?;
                } else {
                    println!(
                        "{:02} {:8} {:?} {} points",
                        i,
                        entry.name,
                        result.kind(),
                        result.len()
                    );
                }
            }
            Err(err) => {
                failures += 1;
                error!("{} #{}: {}", entry.name, i, err);
            }
        }
    }
    if failures > 0 {
        anyhow::bail!("{} of {} gallery entries failed", failures, entries.len());
    }
    Ok(())
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    let env = if cli.debug {
        Env::default().default_filter_or("debug")
    } else {
        Env::default().default_filter_or("error")
    };
    env_logger::Builder::from_env(env).init();

    if let Commands::Gallery { file, out_dir } = &cli.command {
        return run_gallery(file.as_deref(), out_dir.as_deref(), cli.format);
    }
    let result = match cli.command.generate() {
        Some(result) => result?,
        None => anyhow::bail!("Nothing to generate"),
    };

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    write_result(&mut out, &result, cli.format)?;
    out.flush()?;
    Ok(())
}

fn main() {
    if let Err(err) = run() {
        eprintln!("Error: {:#}", err);
        std::process::exit(1);
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use aoer_fractals::errors::FractalError;

    #[test]
    fn test_negative_order_reaches_generator() {
        let cli = Cli::try_parse_from(["fractal-gen", "dragon", "--order", "-1"]).unwrap();
        assert!(matches!(
            cli.command.generate(),
            Some(Err(FractalError::InvalidParameter(_)))
        ));
    }

    #[test]
    fn test_negative_counts_parse() {
        for args in [
            vec!["fractal-gen", "hilbert", "--order", "-2"],
            vec!["fractal-gen", "fern", "-n", "-10"],
            vec!["fractal-gen", "gasket", "--depth-or-count", "-3"],
        ] {
            let cli = Cli::try_parse_from(args).unwrap();
            assert!(matches!(
                cli.command.generate(),
                Some(Err(FractalError::InvalidParameter(_)))
            ));
        }
    }

    #[test]
    fn test_dragon_args() {
        let cli = Cli::try_parse_from(["fractal-gen", "dragon", "-o", "3", "--rounded"]).unwrap();
        let result = cli.command.generate().unwrap().unwrap();
        assert_eq!(result.len(), 2 * 8 - 2);
        let gallery = Cli::try_parse_from(["fractal-gen", "gallery"]).unwrap();
        assert!(gallery.command.generate().is_none());
    }

    #[test]
    fn test_write_csv() {
        let result = dragon::generate(2).unwrap();
        let mut out: Vec<u8> = vec![];
        write_result(&mut out, &result, OutputFormat::Csv).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "x,y\n0,0\n1,0\n1,-1\n2,-1\n");
    }

    #[test]
    fn test_write_ron() {
        let result = hilbert::generate(1, 2.0).unwrap();
        let mut out: Vec<u8> = vec![];
        write_result(&mut out, &result, OutputFormat::Ron).unwrap();
        let parsed: GenerationResult =
            ron::from_str(&String::from_utf8(out).unwrap()).unwrap();
        assert_eq!(parsed, result);
    }
}

//! Command-line argument parsing.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::noise::NoiseKind;
use crate::params::{Axis, ExportConfig, FieldModel, FieldParameters, GridParameters};

/// Field revision selectable from the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ModelArg {
    Classic,
    Extended,
}

/// Planar axis selectable from the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum AxisArg {
    X,
    Y,
}

/// Noise flavour selectable from the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum NoiseArg {
    Opensimplex,
    Perlin,
}

/// Command line arguments
#[derive(Parser, Debug)]
#[command(name = "chladni")]
#[command(about = "Generate a Chladni plate mesh", long_about = None)]
pub struct Args {
    /// Grid cells along X
    #[arg(long, default_value_t = 20, value_parser = clap::value_parser!(u32).range(10..))]
    pub subdivisions_x: u32,

    /// Grid cells along Y
    #[arg(long, default_value_t = 20, value_parser = clap::value_parser!(u32).range(10..))]
    pub subdivisions_y: u32,

    /// Plate edge length
    #[arg(long, default_value_t = 1.0)]
    pub size: f64,

    /// Scale factor along the length axis
    #[arg(long, default_value_t = 1.0)]
    pub length: f64,

    /// Axis stretched by --length
    #[arg(long, value_enum, default_value_t = AxisArg::Y)]
    pub length_axis: AxisArg,

    /// Keep the length scale as a pending transform, baked after displacement
    #[arg(long)]
    pub no_apply: bool,

    /// First base frequency (random in [1.5, 4.5] when omitted)
    #[arg(long)]
    pub frequency_a: Option<f64>,

    /// Second base frequency (random in [1.5, 4.5] when omitted)
    #[arg(long)]
    pub frequency_b: Option<f64>,

    #[arg(long, default_value_t = 0.1)]
    pub amplitude_a: f64,

    #[arg(long, default_value_t = 0.1)]
    pub amplitude_b: f64,

    /// Pattern stretch along X
    #[arg(long, default_value_t = 1.0)]
    pub anisotropy_x: f64,

    /// Pattern stretch along Y
    #[arg(long, default_value_t = 1.0)]
    pub anisotropy_y: f64,

    /// Noise weight on the effective frequencies
    #[arg(long, default_value_t = 0.3)]
    pub frequency_variation: f64,

    /// Swirl strength; negative swirls the other way
    #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
    pub swirl: f64,

    /// Field revision
    #[arg(long, value_enum, default_value_t = ModelArg::Extended)]
    pub model: ModelArg,

    /// Coherent noise flavour
    #[arg(long, value_enum, default_value_t = NoiseArg::Opensimplex)]
    pub noise: NoiseArg,

    /// Noise seed
    #[arg(long, default_value_t = 42)]
    pub noise_seed: u32,

    /// RNG seed for default frequencies (fresh random pair when omitted)
    #[arg(long)]
    pub seed: Option<u64>,

    /// OBJ output path (defaults to <plate name>.obj)
    #[arg(long, short)]
    pub output: Option<PathBuf>,

    /// Also write a grayscale PNG heightmap
    #[arg(long, value_name = "PNG")]
    pub heightmap: Option<PathBuf>,

    /// Heightmap resolution (width = height)
    #[arg(long, default_value_t = 256, value_parser = clap::value_parser!(u32).range(1..=8192))]
    pub heightmap_size: u32,

    /// Also write raw f32 vertex heights
    #[arg(long, value_name = "FILE")]
    pub raw: Option<PathBuf>,

    /// Replace existing output files
    #[arg(long)]
    pub force: bool,
}

impl Args {
    /// Grid parameters from command-line arguments
    pub fn grid_parameters(&self) -> GridParameters {
        GridParameters {
            subdivisions_x: self.subdivisions_x,
            subdivisions_y: self.subdivisions_y,
            size: self.size,
            length: self.length,
            length_axis: match self.length_axis {
                AxisArg::X => Axis::X,
                AxisArg::Y => Axis::Y,
            },
            apply: !self.no_apply,
        }
    }

    /// Field parameters, drawing fresh default frequencies for this invocation
    pub fn field_parameters(&self) -> FieldParameters {
        let base = match self.seed {
            Some(seed) => FieldParameters::with_random_frequencies(&mut StdRng::seed_from_u64(seed)),
            None => FieldParameters::with_random_frequencies(&mut rand::thread_rng()),
        };

        FieldParameters {
            model: match self.model {
                ModelArg::Classic => FieldModel::Classic,
                ModelArg::Extended => FieldModel::Extended,
            },
            frequency_a: self.frequency_a.unwrap_or(base.frequency_a),
            frequency_b: self.frequency_b.unwrap_or(base.frequency_b),
            amplitude_a: self.amplitude_a,
            amplitude_b: self.amplitude_b,
            anisotropy_x: self.anisotropy_x,
            anisotropy_y: self.anisotropy_y,
            frequency_variation: self.frequency_variation,
            swirl_strength: self.swirl,
        }
    }

    pub fn noise_kind(&self) -> NoiseKind {
        match self.noise {
            NoiseArg::Opensimplex => NoiseKind::OpenSimplex,
            NoiseArg::Perlin => NoiseKind::Perlin,
        }
    }

    /// Export configuration; the OBJ path defaults to the plate name
    pub fn export_config(&self, plate_name: &str) -> ExportConfig {
        let obj_path = self
            .output
            .clone()
            .unwrap_or_else(|| PathBuf::from(format!("{}.obj", plate_name)));

        ExportConfig {
            heightmap_path: self.heightmap.clone(),
            heightmap_size: self.heightmap_size,
            raw_path: self.raw.clone(),
            overwrite: self.force,
            ..ExportConfig::new(obj_path)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Args {
        Args::try_parse_from(std::iter::once("chladni").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_defaults() {
        let args = parse(&[]);
        let grid = args.grid_parameters();
        assert_eq!(grid, GridParameters::default());

        let field = args.field_parameters();
        assert!((1.5..=4.5).contains(&field.frequency_a));
        assert!((1.5..=4.5).contains(&field.frequency_b));
        assert_eq!(field.frequency_variation, 0.3);
        assert_eq!(args.noise_kind(), NoiseKind::OpenSimplex);
    }

    #[test]
    fn test_explicit_frequencies_override_draw() {
        let args = parse(&["--frequency-a", "2.5", "--frequency-b", "3.75", "--swirl", "-2"]);
        let field = args.field_parameters();
        assert_eq!(field.frequency_a, 2.5);
        assert_eq!(field.frequency_b, 3.75);
        assert_eq!(field.swirl_strength, -2.0);

        let export = args.export_config(&field.plate_name());
        assert_eq!(export.obj_path, PathBuf::from("chladni_plate_2.50_3.75.obj"));
    }

    #[test]
    fn test_seeded_defaults_repeat() {
        let args = parse(&["--seed", "5"]);
        assert_eq!(args.field_parameters(), args.field_parameters());
    }

    #[test]
    fn test_subdivision_minimum_enforced() {
        let result = Args::try_parse_from(["chladni", "--subdivisions-x", "4"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_heightmap_size_bounded() {
        assert!(Args::try_parse_from(["chladni", "--heightmap-size", "65536"]).is_err());
        assert!(Args::try_parse_from(["chladni", "--heightmap-size", "0"]).is_err());
        assert_eq!(parse(&["--heightmap-size", "8192"]).heightmap_size, 8192);
    }

    #[test]
    fn test_no_apply_and_model() {
        let args = parse(&[
            "--no-apply",
            "--model",
            "classic",
            "--noise",
            "perlin",
            "--length-axis",
            "x",
        ]);
        assert!(!args.grid_parameters().apply);
        assert_eq!(args.grid_parameters().length_axis, Axis::X);
        assert_eq!(args.field_parameters().model, FieldModel::Classic);
        assert_eq!(args.noise_kind(), NoiseKind::Perlin);
    }
}

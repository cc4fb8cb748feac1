//! Command line interface definitions.

use clap::{Parser, ValueEnum};
use log::LevelFilter;

/// Custom enum for log levels that can be used with clap's ValueEnum
#[derive(Debug, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Convert our custom LogLevel enum to log crate's LevelFilter
impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

/// The scenes that can be rendered from the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ScenePreset {
    /// Two touching spheres filling a wide field of view
    WideAngle,
    /// Lambertian, glass and metal feature spheres over a ground sphere
    Glass,
    /// A field of small random spheres around three large ones
    Cover,
}

/// Command line arguments structure using clap derive macros
#[derive(Parser)]
#[command(name = "lumipath")]
#[command(about = "A simple path tracer in Rust")]
pub struct Args {
    /// Image width in pixels
    #[arg(long, default_value = "400", help = "Image width in pixels")]
    pub width: u32,

    /// Image aspect ratio (width over height)
    #[arg(long, default_value_t = 16.0 / 9.0, help = "Image aspect ratio (width over height)")]
    pub aspect_ratio: f32,

    /// Number of samples per pixel
    #[arg(long, short = 's', default_value = "100", help = "Number of samples per pixel")]
    pub samples_per_pixel: u32,

    /// Maximum number of ray bounces per sample
    #[arg(long, default_value = "50", help = "Maximum number of ray bounces per sample")]
    pub max_depth: u32,

    /// Scene to render
    #[arg(long, value_enum, default_value = "cover", help = "Scene to render")]
    pub scene: ScenePreset,

    /// Override the scene's vertical field of view in degrees
    #[arg(long, help = "Override the scene's vertical field of view in degrees")]
    pub vfov: Option<f32>,

    /// Seed for the random generator (runs without one differ from each other)
    #[arg(long, help = "Seed for the random generator")]
    pub seed: Option<u64>,

    /// Output destination: '-' streams PPM to stdout, otherwise a .ppm or .png path
    #[arg(
        long,
        short = 'o',
        default_value = "-",
        help = "Output destination: '-' for stdout (PPM), or a .ppm/.png path"
    )]
    pub output: String,

    /// Set the logging level (defaults to "info")
    #[arg(long, default_value = "info", help = "Set the logging level")]
    pub debug_level: LogLevel,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn the_argument_definitions_are_consistent() {
        Args::command().debug_assert();
    }

    #[test]
    fn defaults_describe_the_standard_render() {
        let args = Args::try_parse_from(["lumipath"]).unwrap();
        assert_eq!(args.width, 400);
        assert_eq!(args.samples_per_pixel, 100);
        assert_eq!(args.max_depth, 50);
        assert_eq!(args.scene, ScenePreset::Cover);
        assert_eq!(args.output, "-");
        assert!(args.seed.is_none());
        assert!(args.vfov.is_none());
    }

    #[test]
    fn scene_and_seed_parse_from_flags() {
        let args =
            Args::try_parse_from(["lumipath", "--scene", "wide-angle", "--seed", "7"]).unwrap();
        assert_eq!(args.scene, ScenePreset::WideAngle);
        assert_eq!(args.seed, Some(7));
    }

    #[test]
    fn log_levels_map_onto_level_filters() {
        assert_eq!(LevelFilter::from(LogLevel::Error), LevelFilter::Error);
        assert_eq!(LevelFilter::from(LogLevel::Trace), LevelFilter::Trace);
    }
}

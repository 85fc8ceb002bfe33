use clap::{Parser, ValueEnum};
use log::LevelFilter;
use std::path::PathBuf;

use crate::scenes::SceneKind;

/// Log levels selectable from the command line
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

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

/// Command line arguments
#[derive(Debug, Parser)]
#[command(name = "prism")]
#[command(about = "Render spheres with a Monte Carlo path tracer into a plain PPM image")]
pub struct Args {
    /// Built-in scene to render
    #[arg(long, value_enum, default_value = "materials")]
    pub scene: SceneKind,

    /// JSON settings file with optional "render" and "camera" objects
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Image width in pixels
    #[arg(long)]
    pub width: Option<u32>,

    /// Image height in pixels (derived from width and aspect ratio when omitted)
    #[arg(long)]
    pub height: Option<u32>,

    /// Number of samples per pixel
    #[arg(short, long)]
    pub samples: Option<u32>,

    /// Maximum number of ray bounces
    #[arg(long)]
    pub max_depth: Option<u32>,

    /// Seed for scene generation and pixel sampling
    #[arg(long)]
    pub seed: Option<u64>,

    /// Output PPM path (writes to stdout when omitted)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Render on the calling thread only
    #[arg(long)]
    pub single_threaded: bool,

    /// Logging level (RUST_LOG still applies per module)
    #[arg(long, value_enum, default_value = "info")]
    pub log_level: LogLevel,
}

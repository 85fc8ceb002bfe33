use anyhow::{Context, Result};
use clap::Parser;
use log::{info, LevelFilter};
use prism_renderer::{render, render_parallel, write_ppm, Camera};
use std::fs::File;
use std::io::{self, BufWriter};
use std::time::Instant;

mod cli;
mod config;
mod scenes;

use cli::Args;

/// Initialize the logger with the specified level.
///
/// Records go to stderr so they never mix with a PPM written to stdout.
fn init_logger(level: LevelFilter) {
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logger(args.log_level.into());

    info!("Starting Prism");

    let file = args
        .config
        .as_deref()
        .map(config::load_settings_file)
        .transpose()?;
    let settings = config::resolve(&args, args.scene.default_camera(), file.as_ref())?;

    // Build the scene
    let start = Instant::now();
    let scene = args.scene.build(settings.render.seed);
    info!(
        "Scene '{}' built in {:?}: {} objects, {} materials",
        args.scene.name(),
        start.elapsed(),
        scene.object_count(),
        scene.material_count()
    );

    let camera = Camera::new(&settings.camera);

    info!(
        "Rendering {}x{} @ {} spp, max depth {}...",
        settings.render.image_width,
        settings.render.image_height,
        settings.render.samples_per_pixel,
        settings.render.max_depth
    );

    let start = Instant::now();
    let image = if args.single_threaded {
        render(&camera, &scene, &settings.render)?
    } else {
        render_parallel(&camera, &scene, &settings.render)?
    };
    info!("Rendered in {:?}", start.elapsed());

    match &args.output {
        Some(path) => {
            let file = File::create(path).with_context(|| format!("Failed to create {}", path.display()))?;
            let mut writer = BufWriter::new(file);
            write_ppm(&image, &mut writer).with_context(|| format!("Failed to write {}", path.display()))?;
            info!("Saved to {}", path.display());
        }
        None => {
            let mut writer = BufWriter::new(io::stdout().lock());
            write_ppm(&image, &mut writer).context("Failed to write image to stdout")?;
        }
    }

    info!("Done.");
    Ok(())
}

use std::path::Path;

use anyhow::{Context, Result};
use clap::Parser;
use log::LevelFilter;
use tess_scene::SceneDescription;

mod cli;

use cli::Args;

fn init_logger(level: LevelFilter) {
    env_logger::Builder::from_default_env()
        .filter_level(level)
        .init();
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logger(args.log_level.into());

    let (mut description, base_dir) = match &args.scene {
        Some(path) => {
            log::info!("Loading scene from {:?}", path);
            let description = SceneDescription::from_path(path)
                .with_context(|| format!("Failed to load scene {}", path.display()))?;
            let base_dir = path.parent().unwrap_or(Path::new(".")).to_path_buf();
            (description, base_dir)
        }
        None => {
            log::info!("No scene given, rendering the demo scene");
            (SceneDescription::demo(), Path::new(".").to_path_buf())
        }
    };
    args.apply_overrides(&mut description);

    let scene = description
        .build(&base_dir)
        .context("Failed to build scene")?;
    let (renderer, camera) = scene.into_renderer()?;

    let stats = renderer.render(&camera).context("Render failed")?;
    log::info!(
        "{} tiles, {} pixels, {} samples in {:?}",
        stats.tiles,
        stats.pixels,
        stats.samples,
        stats.elapsed
    );

    renderer
        .save(&args.output)
        .with_context(|| format!("Failed to write {}", args.output.display()))?;
    log::info!("Saved to {}", args.output.display());

    Ok(())
}

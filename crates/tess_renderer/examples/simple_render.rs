//! Simple render example.
//!
//! Renders a few spheres on a ground plane and saves the result as TGA.

use std::sync::Arc;

use tess_renderer::{Color, Material, PinholeCamera, Plane, RenderConfig, Renderer, Sphere, Vec3};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    let (width, height) = (640, 360);
    let config = RenderConfig::default().with_samples(8).with_jitter(true);
    let mut renderer = Renderer::with_config(width, height, config)?;

    // Ground
    renderer.add_renderable(Arc::new(Plane::new(
        Vec3::new(0.0, -1.0, 0.0),
        Vec3::Y,
        Material::new(Color::new(0.5, 0.5, 0.5)),
    )));

    // Three main spheres
    for (x, color) in [
        (-2.2, Color::new(0.9, 0.3, 0.2)),
        (0.0, Color::new(0.3, 0.8, 0.3)),
        (2.2, Color::new(0.2, 0.4, 0.9)),
    ] {
        renderer.add_renderable(Arc::new(Sphere::new(
            Vec3::new(x, 0.0, -5.0),
            1.0,
            Material::new(color),
        )));
    }

    let camera = PinholeCamera::new(width, height)
        .with_position(Vec3::new(0.0, 1.0, 2.0), Vec3::new(0.0, 0.0, -5.0), Vec3::Y)
        .with_fov(50.0);

    let stats = renderer.render(&camera)?;
    println!(
        "Rendered {} tiles in {:?} ({:.2} samples per pixel)",
        stats.tiles,
        stats.elapsed,
        stats.samples_per_pixel()
    );

    let filename = "output.tga";
    renderer.save(filename)?;
    println!("Saved to {}", filename);

    Ok(())
}

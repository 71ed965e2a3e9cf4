//! Falling Shapes headless runner
//!
//! Drives the controller at 60 Hz over an in-memory scene and prints every
//! notification as a JSON line.
//!
//! Usage: `falling-shapes [config.json] [seconds]`

use falling_shapes::GameConfig;
use falling_shapes::renderer::MeshFactory;
use falling_shapes::sim::{Game, Observable, Scene};

/// Host frame time
const FRAME_MS: f64 = 1000.0 / 60.0;
const VIEWPORT_WIDTH: f32 = 800.0;
const VIEWPORT_HEIGHT: f32 = 600.0;
const DEFAULT_SECONDS: f64 = 3.0;
/// Scene scale for the host-side fall step
const PIXELS_PER_METER: f32 = 100.0;

fn main() {
    env_logger::init();
    log::info!("Falling Shapes (headless) starting...");

    if let Err(e) = run() {
        log::error!("{e}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), falling_shapes::GameError> {
    let mut args = std::env::args().skip(1);
    let config = match args.next() {
        Some(path) => GameConfig::load(path)?,
        None => GameConfig::default(),
    };
    let seconds = args
        .next()
        .and_then(|s| s.parse::<f64>().ok())
        .unwrap_or(DEFAULT_SECONDS);

    let mut game: Game<Scene<MeshFactory>> = Game::new(config)?;
    game.subscribe_all(|event| match serde_json::to_string(event) {
        Ok(line) => println!("{line}"),
        Err(e) => log::warn!("Failed to encode event: {e}"),
    });

    let scene = Scene::new(VIEWPORT_WIDTH, MeshFactory::default());
    game.bind_world(scene)?;

    let frames = (seconds * 1000.0 / FRAME_MS).round() as u64;
    let dt = (FRAME_MS / 1000.0) as f32;
    let mut batches = 0;
    let mut fallen = 0;
    for _ in 0..frames {
        batches += game.update(FRAME_MS);

        let gravity = game.gravity_force();
        if let Some(scene) = game.world_mut() {
            for entry in scene.entries_mut() {
                let shape = &mut entry.shape;
                shape.velocity_y += gravity * dt;
                let dy = shape.velocity_y * dt * PIXELS_PER_METER;
                shape.position.y += dy;
                for p in &mut shape.points {
                    p.y += dy;
                }
            }
        }
        fallen += game.remove_where(|s| s.position.y - s.radius > VIEWPORT_HEIGHT);
    }
    game.stop_spawning();

    if let Some(oldest) = game.world().and_then(|scene| scene.first_handle()) {
        game.remove_shape(oldest);
    }

    let triangles: usize = game
        .world()
        .map(|scene| {
            scene
                .entries()
                .iter()
                .map(|e| e.drawable.triangle_count())
                .sum()
        })
        .unwrap_or(0);

    log::info!(
        "{} timed batches, {} fell out, {} live shapes, total area {:.1}, {} triangles",
        batches,
        fallen,
        game.shape_count(),
        game.total_area(),
        triangles
    );
    Ok(())
}

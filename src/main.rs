//! Demo binary driving the furniture plugin through a scripted session.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use bevy_app::App;
use bevy_ecs::prelude::{Event, On};
use bevy_time::Time;
use bevy_transform::components::Transform;
use clap::Parser;
use furnish::init_logging;
use furnish::prelude::*;
use furnish::vector_math::horizontal;
use glam::{Vec2, Vec3};
use log::info;

/// Headless walkthrough of AR furniture placement on a simulated floor
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Catalog JSON file; the bundled demo catalog is used when omitted
    #[arg(short, long)]
    catalog: Option<PathBuf>,
    /// Frames to simulate after the scripted edits
    #[arg(short, long, default_value_t = 120)]
    frames: u32,
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

const DEMO_CATALOG: &str = include_str!("../assets/catalog.json");
const FRAME: Duration = Duration::from_micros(16_667);

#[expect(
    clippy::needless_pass_by_value,
    reason = "Observer systems must accept On<T> by value."
)]
fn report_spawn(event: On<FurnitureSpawned>) {
    let spawned = event.event();
    info!(
        "spawned {:?} (item {}) at {}",
        spawned.entity, spawned.catalog_index, spawned.position
    );
}

#[expect(
    clippy::needless_pass_by_value,
    reason = "Observer systems must accept On<T> by value."
)]
fn report_rejection(event: On<PlacementRejected>) {
    let rejected = event.event();
    info!(
        "item {} not placed: {:?}",
        rejected.catalog_index, rejected.reason
    );
}

fn load_catalog(path: Option<&PathBuf>) -> Result<FurnitureCatalog> {
    match path {
        Some(path) => FurnitureCatalog::load(path)
            .with_context(|| format!("loading catalog from {}", path.display())),
        None => FurnitureCatalog::from_json(DEMO_CATALOG).context("parsing bundled catalog"),
    }
}

/// Triggers `event` and applies what its observers queued, as a frame would.
fn request<'a, E: Event<Trigger<'a>: Default>>(app: &mut App, event: E) {
    let world = app.world_mut();
    world.trigger(event);
    world.flush();
}

fn tap_at(app: &mut App, point: Vec3) {
    let camera = app.world().resource::<ViewCamera>().clone();
    let screen = camera.world_to_screen(point).truncate();
    request(app, Tap { screen });
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let catalog = load_catalog(args.catalog.as_ref())?;
    info!("catalog loaded with {} items", catalog.len());
    for (index, item) in catalog.iter().enumerate() {
        info!("  {index}: {}", item.name);
    }
    let item_count = catalog.len();

    let mut floor = PlaneSet::default();
    floor.add(DetectedPlane::floor(Vec3::ZERO, Vec2::splat(8.0)));
    info!("{} plane(s) detected", floor.len());
    let mut app = App::new();
    app.insert_resource(catalog)
        .insert_resource(SurfaceServices::default().with_planes(floor))
        .add_plugins(FurniturePlugin)
        .add_observer(report_spawn)
        .add_observer(report_rejection);

    request(&mut app, SelectFurniture { index: 0 });
    tap_at(&mut app, Vec3::new(0.0, 0.0, -2.0));
    // A second tap on the same spot selects the item just placed.
    tap_at(&mut app, Vec3::new(0.0, 0.0, -2.0));

    if item_count > 2 {
        request(&mut app, SelectFurniture { index: 1 });
        tap_at(&mut app, Vec3::new(1.3, 0.0, -2.5));
        request(&mut app, SelectFurniture { index: 2 });
        tap_at(&mut app, Vec3::new(1.3, 0.0, -1.95));
    }

    request(
        &mut app,
        DragSelected {
            to: Vec2::new(-1.2, -2.6),
        },
    );
    request(&mut app, RotateSelected { degrees: 90.0 });
    request(&mut app, ScaleSelected { delta: 0.25 });

    for _ in 0..args.frames {
        app.world_mut().resource_mut::<Time>().advance_by(FRAME);
        app.update();
    }

    let world = app.world_mut();
    let mut placed = world.query::<(&Furniture, &Transform, &Tint)>();
    for (furniture, transform, tint) in placed.iter(world) {
        info!(
            "item {} stands at {} height {:.3} with scale {} and colour {:?}",
            furniture.catalog_index,
            horizontal(transform.translation),
            transform.translation.y,
            transform.scale,
            tint.0.components()
        );
    }
    Ok(())
}

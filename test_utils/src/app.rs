//! Headless app fixtures and frame driving.

use std::time::Duration;

use bevy_app::App;
use bevy_ecs::prelude::{Entity, Event, On, ResMut, Resource};
use bevy_time::Time;
use bevy_transform::components::Transform;
use furnish::catalog::{ColliderSpec, FurnitureCatalog, FurnitureItem, MaterialSpec, Rgba};
use furnish::placement::Tap;
use furnish::{Furniture, FurniturePlugin, SurfaceServices, ViewCamera};
use glam::{Vec2, Vec3};

use crate::surfaces::ScriptedFloor;

/// Duration of one simulated frame.
pub const FRAME: Duration = Duration::from_micros(16_667);

/// Two-item catalog: a one-metre `"Crate"` with a collider resting on its
/// origin, and a `"Lamp"` without one.
pub fn test_catalog() -> FurnitureCatalog {
    let crate_item = FurnitureItem {
        name: "Crate".into(),
        collider: Some(ColliderSpec {
            center: [0.0, 0.5, 0.0],
            size: [1.0, 1.0, 1.0],
        }),
        materials: vec![MaterialSpec {
            name: "Pine".into(),
            color: Rgba([0.8, 0.7, 0.5, 1.0]),
        }],
        thumbnail: None,
    };
    let lamp = FurnitureItem {
        name: "Lamp".into(),
        collider: None,
        materials: Vec::new(),
        thumbnail: None,
    };
    FurnitureCatalog::new(vec![crate_item, lamp]).expect("test catalog is valid")
}

/// App with the furniture plugin, [`test_catalog`] and a scripted floor at
/// height zero. The returned floor handle moves the floor under the app.
pub fn flat_floor_app() -> (App, ScriptedFloor) {
    let floor = ScriptedFloor::at(0.0);
    let mut app = App::new();
    app.insert_resource(test_catalog())
        .insert_resource(SurfaceServices::default().with_planes(floor.clone()))
        .add_plugins(FurniturePlugin);
    (app, floor)
}

/// Advances the clock by [`FRAME`] and runs one update, `frames` times.
pub fn advance_frames(app: &mut App, frames: u32) {
    for _ in 0..frames {
        app.world_mut().resource_mut::<Time>().advance_by(FRAME);
        app.update();
    }
}

/// Screen position at which the app's camera sees `point`.
pub fn screen_point(app: &App, point: Vec3) -> Vec2 {
    app.world()
        .resource::<ViewCamera>()
        .world_to_screen(point)
        .truncate()
}

/// Triggers `event` and applies the commands its observers queued, as a host
/// does between frames.
pub fn request<'a, E: Event<Trigger<'a>: Default>>(app: &mut App, event: E) {
    let world = app.world_mut();
    world.trigger(event);
    world.flush();
}

/// Taps the screen where the camera sees `point` and applies the result.
pub fn tap_world(app: &mut App, point: Vec3) {
    let screen = screen_point(app, point);
    request(app, Tap { screen });
}

/// Every placed item with its transform.
pub fn placed_furniture(app: &mut App) -> Vec<(Entity, Furniture, Transform)> {
    let world = app.world_mut();
    let mut query = world.query::<(Entity, &Furniture, &Transform)>();
    query
        .iter(world)
        .map(|(entity, furniture, transform)| (entity, *furniture, *transform))
        .collect()
}

/// Events of type `E` seen since [`capture`] was called.
#[derive(Resource, Debug)]
pub struct Captured<E: Send + Sync + 'static>(pub Vec<E>);

impl<E: Send + Sync + 'static> Default for Captured<E> {
    fn default() -> Self {
        Self(Vec::new())
    }
}

/// Records every `E` the app triggers into [`Captured<E>`].
pub fn capture<E: Event + Clone>(app: &mut App) {
    app.init_resource::<Captured<E>>();
    app.add_observer(|event: On<E>, mut captured: ResMut<Captured<E>>| {
        captured.0.push(event.event().clone());
    });
}

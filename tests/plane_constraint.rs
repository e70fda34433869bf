//! Items placed in plane-constraint mode hold the height they were placed at.

use bevy_app::App;
use bevy_ecs::prelude::Entity;
use bevy_transform::components::Transform;
use furnish::constraint::ConstraintState;
use furnish::placement::{DragSelected, SelectFurniture, VerticalMode};
use furnish::{
    FurniturePlugin, FurnitureSettings, PlaneConstraint, SessionState, SurfaceServices,
    SurfaceTracker, BASELINE_TOLERANCE,
};
use glam::{Vec2, Vec3};
use rstest::{fixture, rstest};
use test_utils::{advance_frames, request, tap_world, test_catalog, ScriptedFloor};

fn set_height(app: &mut App, entity: Entity, height: f32) {
    app.world_mut()
        .get_mut::<Transform>(entity)
        .expect("placed item")
        .translation
        .y = height;
}

fn height(app: &App, entity: Entity) -> f32 {
    app.world()
        .get::<Transform>(entity)
        .expect("placed item")
        .translation
        .y
}

#[fixture]
fn constrained() -> (App, Entity) {
    let mut app = App::new();
    app.insert_resource(test_catalog())
        .insert_resource(FurnitureSettings {
            vertical_mode: VerticalMode::PlaneConstraint,
        })
        .insert_resource(SurfaceServices::default().with_planes(ScriptedFloor::at(0.0)))
        .add_plugins(FurniturePlugin);
    request(&mut app, SelectFurniture { index: 0 });
    tap_world(&mut app, Vec3::new(0.0, 0.0, -2.0));
    let entity = app
        .world()
        .resource::<SessionState>()
        .selected_object()
        .expect("placing selects the new item");
    // The first frame records the baseline.
    advance_frames(&mut app, 1);
    (app, entity)
}

#[rstest]
fn spawns_with_constraint_instead_of_tracker(constrained: (App, Entity)) {
    let (app, entity) = constrained;
    let world = app.world();
    assert!(world.get::<SurfaceTracker>(entity).is_none());
    let constraint = world.get::<PlaneConstraint>(entity).expect("constrained");
    assert!(matches!(constraint.state(), ConstraintState::Initialized { .. }));
}

#[rstest]
fn lifted_item_returns_to_baseline(constrained: (App, Entity)) {
    let (mut app, entity) = constrained;
    let baseline = height(&app, entity);
    set_height(&mut app, entity, baseline + 0.5);
    advance_frames(&mut app, 90);
    assert!((height(&app, entity) - baseline).abs() <= BASELINE_TOLERANCE);
}

#[rstest]
fn dragging_stays_on_the_baseline(constrained: (App, Entity)) {
    let (mut app, entity) = constrained;
    let baseline = height(&app, entity);
    request(
        &mut app,
        DragSelected {
            to: Vec2::new(-1.0, -2.5),
        },
    );
    set_height(&mut app, entity, baseline - 0.3);
    advance_frames(&mut app, 90);
    let translation = app
        .world()
        .get::<Transform>(entity)
        .expect("placed item")
        .translation;
    assert_eq!((translation.x, translation.z), (-1.0, -2.5));
    assert!((translation.y - baseline).abs() <= BASELINE_TOLERANCE);
}

#[rstest]
fn disabled_constraint_leaves_drift(constrained: (App, Entity)) {
    let (mut app, entity) = constrained;
    let baseline = height(&app, entity);
    app.world_mut()
        .get_mut::<PlaneConstraint>(entity)
        .expect("constrained")
        .set_enabled(false);
    set_height(&mut app, entity, baseline + 0.4);
    advance_frames(&mut app, 60);
    assert_eq!(height(&app, entity), baseline + 0.4);
}

//! Behaviour-driven tests for tap placement using rust-rspec.
//!
//! A headless app stands on a flat floor with a one-metre crate in the
//! catalog. Taps either place furniture, select furniture already under the
//! finger, or are rejected because the spot is taken.

use bevy_app::App;
use furnish::occupancy::Footprint;
use furnish::placement::{
    FurnitureSpawned, ObjectSelected, PlacementRejected, RejectReason, SelectFurniture, Tap,
};
use furnish::{Furniture, SessionState};
use glam::Vec3;
use rspec::block::Context as Scenario;
use test_utils::{
    advance_frames, capture, flat_floor_app, lock_app, placed_furniture, request, run_serial,
    screen_point, share, tap_world, Captured, SharedApp, ThreadSafeApp,
};

const CRATE_SPOT: Vec3 = Vec3::new(0.0, 0.0, -2.0);
// Lamp footprint reaches into the crate's box, but the tap ray passes in
// front of it.
const BESIDE_CRATE: Vec3 = Vec3::new(0.7, 0.0, -1.4);
const CLEAR_SPOT: Vec3 = Vec3::new(1.5, 0.0, -1.0);
const CRATE: usize = 0;
const LAMP: usize = 1;

#[derive(Debug, Clone)]
struct PlacementFixture {
    app: SharedApp,
}

impl PlacementFixture {
    fn new() -> Self {
        Self {
            app: share(App::new()),
        }
    }

    fn reset(&self) {
        let (mut app, _floor) = flat_floor_app();
        capture::<FurnitureSpawned>(&mut app);
        capture::<PlacementRejected>(&mut app);
        capture::<ObjectSelected>(&mut app);
        request(&mut app, SelectFurniture { index: CRATE });
        *lock_app(&self.app) = ThreadSafeApp(app);
    }

    fn select_item(&self, index: usize) {
        request(&mut lock_app(&self.app).0, SelectFurniture { index });
    }

    fn tap(&self, point: Vec3) {
        tap_world(&mut lock_app(&self.app).0, point);
    }

    fn placed(&self) -> Vec<(Furniture, Vec3)> {
        placed_furniture(&mut lock_app(&self.app).0)
            .into_iter()
            .map(|(_, furniture, transform)| (furniture, transform.translation))
            .collect()
    }

    fn captured<E: Clone + Send + Sync + 'static>(&self) -> Vec<E> {
        lock_app(&self.app)
            .world()
            .resource::<Captured<E>>()
            .0
            .clone()
    }

    fn session(&self) -> SessionState {
        lock_app(&self.app).world().resource::<SessionState>().clone()
    }
}

#[test]
fn tapping_places_selects_and_rejects() {
    run_serial(&rspec::given(
        "a flat floor with the crate selected in the catalog",
        PlacementFixture::new(),
        |scenario: &mut Scenario<PlacementFixture>| {
            scenario.before_each(|fixture| fixture.reset());

            scenario.when("the empty floor is tapped", |scenario| {
                scenario.before_each(|fixture| fixture.tap(CRATE_SPOT));

                scenario.then("one crate is spawned at the hit point", |fixture| {
                    let placed = fixture.placed();
                    assert_eq!(placed.len(), 1);
                    let (furniture, position) = placed.first().copied().expect("one item");
                    assert_eq!(furniture.catalog_index, CRATE);
                    assert!(position.distance(CRATE_SPOT) < 1e-3, "placed at {position}");
                });

                scenario.then("the spawn is announced and the crate selected", |fixture| {
                    let spawned = fixture.captured::<FurnitureSpawned>();
                    let event = spawned.first().expect("spawn notification");
                    assert_eq!(fixture.session().selected_object(), Some(event.entity));
                });

                scenario.when("the crate itself is tapped", |scenario| {
                    scenario.before_each(|fixture| fixture.tap(CRATE_SPOT));

                    scenario.then("it is selected instead of a second one spawning", |fixture| {
                        assert_eq!(fixture.placed().len(), 1);
                        let selected = fixture.captured::<ObjectSelected>();
                        assert_eq!(selected.len(), 1);
                        assert!(fixture.captured::<PlacementRejected>().is_empty());
                    });
                });

                scenario.when("a lamp is tapped right beside it", |scenario| {
                    scenario.before_each(|fixture| {
                        fixture.select_item(LAMP);
                        fixture.tap(BESIDE_CRATE);
                    });

                    scenario.then("the placement is rejected as occupied", |fixture| {
                        assert_eq!(fixture.placed().len(), 1);
                        let spawned = fixture.captured::<FurnitureSpawned>();
                        let crate_entity = spawned.first().expect("crate spawned").entity;
                        let rejected = fixture.captured::<PlacementRejected>();
                        let rejection = rejected.first().expect("rejection notification");
                        assert_eq!(rejection.catalog_index, LAMP);
                        assert!(matches!(
                            rejection.reason,
                            RejectReason::Occupied { blocked_by, .. } if blocked_by == crate_entity
                        ));
                    });
                });

                scenario.when("a lamp is tapped well clear of it", |scenario| {
                    scenario.before_each(|fixture| {
                        fixture.select_item(LAMP);
                        fixture.tap(CLEAR_SPOT);
                    });

                    scenario.then("the lamp is placed next to the crate", |fixture| {
                        let placed = fixture.placed();
                        assert_eq!(placed.len(), 2);
                        assert!(placed
                            .iter()
                            .any(|(furniture, position)| furniture.catalog_index == LAMP
                                && position.distance(CLEAR_SPOT) < 1e-3));
                    });
                });
            });

            scenario.when("a tap misses every surface", |scenario| {
                scenario.before_each(|fixture| {
                    // Above the horizon, so the ray climbs away from the floor.
                    fixture.tap(Vec3::new(0.0, 3.0, -2.0));
                });

                scenario.then("nothing is placed and the miss is reported", |fixture| {
                    assert!(fixture.placed().is_empty());
                    let rejected = fixture.captured::<PlacementRejected>();
                    assert_eq!(
                        rejected.first().map(|r| r.reason),
                        Some(RejectReason::NoSurface)
                    );
                });
            });
        },
    ));
}

#[test]
fn spawned_items_carry_their_footprint() {
    let (mut app, _floor) = flat_floor_app();
    request(&mut app, SelectFurniture { index: LAMP });
    tap_world(&mut app, CLEAR_SPOT);
    let world = app.world_mut();
    let mut footprints = world.query::<(&Furniture, &Footprint)>();
    let (furniture, footprint) = footprints.single(world).expect("one lamp");
    assert_eq!(furniture.catalog_index, LAMP);
    assert_eq!(*footprint, Footprint::Radius(furnish::FALLBACK_OCCUPANCY_RADIUS));
}

#[test]
fn taps_before_the_next_frame_see_queued_placements() {
    let (mut app, _floor) = flat_floor_app();
    capture::<ObjectSelected>(&mut app);
    request(&mut app, SelectFurniture { index: CRATE });
    let screen = screen_point(&app, CRATE_SPOT);
    // Neither tap's commands are applied until the frame runs.
    app.world_mut().trigger(Tap { screen });
    app.world_mut().trigger(Tap { screen });
    advance_frames(&mut app, 1);

    let placed = placed_furniture(&mut app);
    assert_eq!(placed.len(), 1, "second tap must not stack a crate");
    let crate_entity = placed.first().map(|(entity, _, _)| *entity);
    let selected = &app.world().resource::<Captured<ObjectSelected>>().0;
    assert_eq!(selected.first().map(|s| s.entity), crate_entity);
    let state = app.world().resource::<SessionState>();
    assert_eq!(state.selected_object(), crate_entity);
}

//! Bevy plugin wiring placement, tracking and constraint into an app.

use bevy_app::{App, Plugin, Update};
use bevy_ecs::prelude::*;
use bevy_time::Time;
use log::warn;

use super::edit;
use super::events::FurnitureError;
use super::settings::FurnitureSettings;
use super::tap::{handle_tap, PendingPlacements};
use crate::camera::ViewCamera;
use crate::catalog::FurnitureCatalog;
use crate::constraint::{constrain_to_plane_system, PlaneConstraintSettings};
use crate::occupancy::OccupancySettings;
use crate::session::SessionState;
use crate::surface::SurfaceServices;
use crate::tracking::{track_surfaces_system, SurfaceTrackerSettings};

#[expect(
    clippy::needless_pass_by_value,
    reason = "Observer systems must accept On<T> by value."
)]
fn log_furniture_error(event: On<FurnitureError>) {
    let FurnitureError { context, detail } = event.event();
    warn!("furniture request failed during {context:?}: {detail}");
}

/// Installs the furniture placement observers and per-frame systems.
///
/// Resources the host has already inserted are kept; anything missing is
/// initialised with its default. `Time` is initialised too, so the plugin
/// runs in a bare headless `App` where tests advance the clock by hand.
#[derive(Default)]
pub struct FurniturePlugin;

impl Plugin for FurniturePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<Time>()
            .init_resource::<ViewCamera>()
            .init_resource::<SurfaceServices>()
            .init_resource::<FurnitureCatalog>()
            .init_resource::<FurnitureSettings>()
            .init_resource::<OccupancySettings>()
            .init_resource::<SurfaceTrackerSettings>()
            .init_resource::<PlaneConstraintSettings>()
            .init_resource::<SessionState>()
            .init_resource::<PendingPlacements>();

        app.add_observer(log_furniture_error)
            .add_observer(handle_tap)
            .add_observer(edit::select_furniture)
            .add_observer(edit::select_placed)
            .add_observer(edit::register_placed)
            .add_observer(edit::recolor_selected)
            .add_observer(edit::drag_selected)
            .add_observer(edit::rotate_selected)
            .add_observer(edit::scale_selected)
            .add_observer(edit::delete_selected)
            .add_observer(edit::clear_all)
            .add_observer(edit::toggle_ui);

        app.add_systems(
            Update,
            (
                (track_surfaces_system, constrain_to_plane_system).chain(),
                edit::forget_removed_furniture,
            ),
        );
    }
}

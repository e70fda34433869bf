//! Observers applying selection and edit requests.
//!
//! Requests that cannot be carried out raise a [`FurnitureError`] and leave
//! the world untouched.

use bevy_ecs::prelude::{Commands, Entity, On, Query, RemovedComponents, Res, ResMut, With};
use bevy_transform::components::Transform;
use glam::Vec3;
use log::{debug, info};

use super::events::{
    ClearAll, DeleteSelected, DragSelected, FurnitureError, FurnitureErrorContext,
    ObjectDeleted, ObjectSelected, RecolorSelected, RegisterPlaced, RotateSelected,
    ScaleSelected, SelectFurniture, SelectPlaced, ToggleUi,
};
use crate::catalog::FurnitureCatalog;
use crate::components::{Furniture, Tint};
use crate::occupancy::{Footprint, OccupancySettings};
use crate::session::SessionState;
use crate::vector_math::with_horizontal;
use crate::{MAX_ITEM_SCALE, MIN_ITEM_SCALE};

/// Uniform scale after adding `delta`, clamped per component.
#[must_use]
pub fn scaled(scale: Vec3, delta: f32) -> Vec3 {
    (scale + Vec3::splat(delta)).clamp(Vec3::splat(MIN_ITEM_SCALE), Vec3::splat(MAX_ITEM_SCALE))
}

fn selected_or_report(
    session: &SessionState,
    context: FurnitureErrorContext,
    commands: &mut Commands,
) -> Option<Entity> {
    match session.require_object(context) {
        Ok(entity) => Some(entity),
        Err(err) => {
            commands.trigger(err);
            None
        }
    }
}

fn missing(context: FurnitureErrorContext, entity: Entity) -> FurnitureError {
    FurnitureError::new(context, format!("{entity:?} is not placed furniture"))
}

#[expect(
    clippy::needless_pass_by_value,
    reason = "Observer systems must accept On<T> by value."
)]
pub(crate) fn select_furniture(
    event: On<SelectFurniture>,
    mut commands: Commands,
    catalog: Res<FurnitureCatalog>,
    mut session: ResMut<SessionState>,
) {
    let index = event.event().index;
    match session.select_item(index, &catalog) {
        Ok(()) => debug!("catalog item {index} selected"),
        Err(err) => commands.trigger(err),
    }
}

#[expect(
    clippy::needless_pass_by_value,
    reason = "Observer systems must accept On<T> by value."
)]
pub(crate) fn select_placed(
    event: On<SelectPlaced>,
    mut commands: Commands,
    mut session: ResMut<SessionState>,
    furniture: Query<&Furniture>,
) {
    let entity = event.event().entity;
    let Ok(&Furniture { catalog_index }) = furniture.get(entity) else {
        commands.trigger(missing(FurnitureErrorContext::Select, entity));
        return;
    };
    session.select_object(entity, catalog_index);
    commands.trigger(ObjectSelected {
        entity,
        catalog_index,
    });
}

#[expect(
    clippy::needless_pass_by_value,
    reason = "Observer systems must accept On<T> by value."
)]
pub(crate) fn register_placed(
    event: On<RegisterPlaced>,
    mut commands: Commands,
    catalog: Res<FurnitureCatalog>,
    occupancy: Res<OccupancySettings>,
    candidates: Query<Option<&Furniture>, With<Transform>>,
) {
    let RegisterPlaced {
        entity,
        catalog_index,
    } = *event.event();
    let Some(item) = catalog.get(catalog_index) else {
        commands.trigger(FurnitureError::new(
            FurnitureErrorContext::Register,
            format!("catalog index {catalog_index} out of range (len {})", catalog.len()),
        ));
        return;
    };
    match candidates.get(entity) {
        Err(_) => commands.trigger(FurnitureError::new(
            FurnitureErrorContext::Register,
            format!("{entity:?} has no Transform"),
        )),
        Ok(Some(_)) => debug!("{entity:?} is already registered"),
        Ok(None) => {
            commands.entity(entity).insert((
                Furniture { catalog_index },
                Footprint::for_item(item, &occupancy),
                Tint(item.default_color()),
            ));
            info!("registered {entity:?} as {}", item.name);
        }
    }
}

#[expect(
    clippy::needless_pass_by_value,
    reason = "Observer systems must accept On<T> by value."
)]
pub(crate) fn recolor_selected(
    event: On<RecolorSelected>,
    mut commands: Commands,
    session: Res<SessionState>,
    mut tints: Query<&mut Tint, With<Furniture>>,
) {
    let Some(entity) = selected_or_report(&session, FurnitureErrorContext::Recolor, &mut commands)
    else {
        return;
    };
    match tints.get_mut(entity) {
        Ok(mut tint) => tint.0 = event.event().color,
        Err(_) => commands.trigger(missing(FurnitureErrorContext::Recolor, entity)),
    }
}

#[expect(
    clippy::needless_pass_by_value,
    reason = "Observer systems must accept On<T> by value."
)]
pub(crate) fn drag_selected(
    event: On<DragSelected>,
    mut commands: Commands,
    session: Res<SessionState>,
    mut transforms: Query<&mut Transform, With<Furniture>>,
) {
    let Some(entity) =
        selected_or_report(&session, FurnitureErrorContext::Manipulate, &mut commands)
    else {
        return;
    };
    match transforms.get_mut(entity) {
        Ok(mut transform) => {
            transform.translation = with_horizontal(transform.translation, event.event().to);
        }
        Err(_) => commands.trigger(missing(FurnitureErrorContext::Manipulate, entity)),
    }
}

#[expect(
    clippy::needless_pass_by_value,
    reason = "Observer systems must accept On<T> by value."
)]
pub(crate) fn rotate_selected(
    event: On<RotateSelected>,
    mut commands: Commands,
    session: Res<SessionState>,
    mut transforms: Query<&mut Transform, With<Furniture>>,
) {
    let Some(entity) =
        selected_or_report(&session, FurnitureErrorContext::Manipulate, &mut commands)
    else {
        return;
    };
    match transforms.get_mut(entity) {
        Ok(mut transform) => transform.rotate_y(event.event().degrees.to_radians()),
        Err(_) => commands.trigger(missing(FurnitureErrorContext::Manipulate, entity)),
    }
}

#[expect(
    clippy::needless_pass_by_value,
    reason = "Observer systems must accept On<T> by value."
)]
pub(crate) fn scale_selected(
    event: On<ScaleSelected>,
    mut commands: Commands,
    session: Res<SessionState>,
    mut transforms: Query<&mut Transform, With<Furniture>>,
) {
    let Some(entity) =
        selected_or_report(&session, FurnitureErrorContext::Manipulate, &mut commands)
    else {
        return;
    };
    match transforms.get_mut(entity) {
        Ok(mut transform) => transform.scale = scaled(transform.scale, event.event().delta),
        Err(_) => commands.trigger(missing(FurnitureErrorContext::Manipulate, entity)),
    }
}

#[expect(
    clippy::needless_pass_by_value,
    reason = "Observer systems must accept On<T> by value."
)]
pub(crate) fn delete_selected(
    _event: On<DeleteSelected>,
    mut commands: Commands,
    mut session: ResMut<SessionState>,
    furniture: Query<(), With<Furniture>>,
) {
    let Some(entity) = selected_or_report(&session, FurnitureErrorContext::Delete, &mut commands)
    else {
        return;
    };
    if !furniture.contains(entity) {
        commands.trigger(missing(FurnitureErrorContext::Delete, entity));
        return;
    }
    session.clear_selection();
    commands.entity(entity).despawn();
    info!("deleted {entity:?}");
    commands.trigger(ObjectDeleted { entity });
}

#[expect(
    clippy::needless_pass_by_value,
    reason = "Observer systems must accept On<T> by value."
)]
pub(crate) fn clear_all(
    _event: On<ClearAll>,
    mut commands: Commands,
    mut session: ResMut<SessionState>,
    furniture: Query<Entity, With<Furniture>>,
) {
    let removed = furniture.iter().count();
    for entity in &furniture {
        commands.entity(entity).despawn();
    }
    session.clear_object();
    info!("cleared {removed} placed items");
}

#[expect(
    clippy::needless_pass_by_value,
    reason = "Observer systems must accept On<T> by value."
)]
pub(crate) fn toggle_ui(_event: On<ToggleUi>, mut session: ResMut<SessionState>) {
    let visible = session.toggle_ui();
    debug!("catalog UI {}", if visible { "shown" } else { "hidden" });
}

/// Drops the selection when the selected item is despawned elsewhere.
pub fn forget_removed_furniture(
    mut removed: RemovedComponents<Furniture>,
    mut session: ResMut<SessionState>,
) {
    for entity in removed.read() {
        session.forget(entity);
    }
}

//! Requests accepted by the furniture plugin and notifications it raises.
//!
//! Hosts trigger request events (usually from UI or input handling) and
//! register observers for the notification events they care about. Observers
//! are entities, so despawning one deregisters it.

use bevy_ecs::prelude::{Entity, Event};
use glam::{Vec2, Vec3};
use thiserror::Error;

use crate::catalog::Rgba;

/// A touch or click on the screen, in pixels from the bottom-left corner.
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct Tap {
    /// Screen position of the tap.
    pub screen: Vec2,
}

/// Chooses the catalog item that taps will place.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectFurniture {
    /// Catalog index.
    pub index: usize,
}

/// Selects an already placed item.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectPlaced {
    /// Placed furniture entity.
    pub entity: Entity,
}

/// Adopts an entity spawned elsewhere into the set of placed furniture.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegisterPlaced {
    /// Entity to adopt; it must have a `Transform`.
    pub entity: Entity,
    /// Catalog item the entity represents.
    pub catalog_index: usize,
}

/// Recolours the selected item.
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct RecolorSelected {
    /// New colour.
    pub color: Rgba,
}

/// Moves the selected item across the floor, keeping its height.
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct DragSelected {
    /// New X/Z position.
    pub to: Vec2,
}

/// Turns the selected item about the world up axis.
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct RotateSelected {
    /// Angle in degrees; positive turns counter-clockwise seen from above.
    pub degrees: f32,
}

/// Grows or shrinks the selected item uniformly.
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct ScaleSelected {
    /// Amount added to each scale component before clamping.
    pub delta: f32,
}

/// Removes the selected item.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DeleteSelected;

/// Removes every placed item.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ClearAll;

/// Shows or hides the catalog UI.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ToggleUi;

/// Raised after a tap placed a new item.
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct FurnitureSpawned {
    /// The new entity.
    pub entity: Entity,
    /// Catalog item it was made from.
    pub catalog_index: usize,
    /// Surface point it was placed at.
    pub position: Vec3,
}

/// Why a tap did not place anything.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RejectReason {
    /// The surface point is taken by another item.
    Occupied {
        /// Surface point that was hit.
        position: Vec3,
        /// Item in the way.
        blocked_by: Entity,
    },
    /// The tap did not hit any surface.
    NoSurface,
}

/// Raised when a tap with a selected catalog item placed nothing.
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct PlacementRejected {
    /// Catalog item that would have been placed.
    pub catalog_index: usize,
    /// What stopped the placement.
    pub reason: RejectReason,
}

/// Raised when a placed item becomes the selection.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct ObjectSelected {
    /// Selected entity.
    pub entity: Entity,
    /// Catalog item it was made from.
    pub catalog_index: usize,
}

/// Raised after the selected item was removed.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct ObjectDeleted {
    /// Entity that was despawned.
    pub entity: Entity,
}

/// Operation during which a [`FurnitureError`] arose.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FurnitureErrorContext {
    /// Selecting a catalog item or placed object.
    Select,
    /// Adopting an externally spawned entity.
    Register,
    /// Changing the colour of the selection.
    Recolor,
    /// Moving, turning or scaling the selection.
    Manipulate,
    /// Deleting the selection.
    Delete,
}

/// Event raised when a request cannot be carried out.
///
/// None of these are fatal; the plugin logs them and the request is dropped.
#[derive(Event, Debug, Clone, Error, PartialEq, Eq)]
#[error("{context:?}: {detail}")]
pub struct FurnitureError {
    /// Where the failure occurred.
    pub context: FurnitureErrorContext,
    /// Description of what went wrong.
    pub detail: String,
}

impl FurnitureError {
    /// Convenience constructor used by observers to emit error events.
    #[must_use]
    pub fn new(context: FurnitureErrorContext, detail: impl Into<String>) -> Self {
        Self {
            context,
            detail: detail.into(),
        }
    }
}

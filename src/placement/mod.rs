//! Tap-driven placement and editing of furniture.
//!
//! Everything here is driven by events: hosts trigger requests such as
//! [`Tap`] or [`DeleteSelected`] on the world and observe the notifications
//! the plugin raises in return.

mod edit;
mod events;
mod plugin;
mod settings;
mod tap;

pub use edit::{forget_removed_furniture, scaled};
pub use events::{
    ClearAll, DeleteSelected, DragSelected, FurnitureError, FurnitureErrorContext,
    FurnitureSpawned, ObjectDeleted, ObjectSelected, PlacementRejected, RecolorSelected,
    RegisterPlaced, RejectReason, RotateSelected, ScaleSelected, SelectFurniture, SelectPlaced,
    Tap, ToggleUi,
};
pub use plugin::FurniturePlugin;
pub use settings::{FurnitureSettings, VerticalMode};
pub use tap::{
    find_surface, pick_nearest, PendingPlacement, PendingPlacements, PlacementContext, TapOutcome,
};

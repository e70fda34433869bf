//! Plugin-level placement configuration.

use bevy_ecs::prelude::Resource;

/// How newly placed items keep their height while being moved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VerticalMode {
    /// Follow the detected surface below the item.
    #[default]
    SurfaceTracking,
    /// Hold the height the item was placed at.
    PlaneConstraint,
    /// Leave the height to the host.
    Free,
}

/// Placement configuration used when spawning furniture.
#[derive(Resource, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FurnitureSettings {
    /// Height component attached to new items.
    pub vertical_mode: VerticalMode,
}

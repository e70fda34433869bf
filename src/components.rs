//! ECS components attached to placed furniture.
//! Marks catalog membership and the colour currently applied to an item.
use bevy_ecs::prelude::Component;

use crate::catalog::Rgba;

/// Marks a placed catalog item.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Furniture {
    /// Index of the item in the catalog.
    pub catalog_index: usize,
}

/// Colour currently applied to a placed item.
#[derive(Component, Debug, Clone, Copy, PartialEq, Default)]
pub struct Tint(pub Rgba);

//! Furniture catalog loaded from a designer-edited JSON document.
//!
//! The catalog is read-only at runtime. Each item names a piece of furniture,
//! optionally describes its collider in item-local space, and lists the
//! materials a user can pick from. The first material is applied on spawn.
//!
//! ```json
//! {
//!   "items": [
//!     {
//!       "name": "Armchair",
//!       "collider": { "center": [0.0, 0.45, 0.0], "size": [0.8, 0.9, 0.8] },
//!       "materials": [{ "name": "Oak", "color": [0.55, 0.4, 0.25, 1.0] }],
//!       "thumbnail": "thumbs/armchair.png"
//!     }
//!   ]
//! }
//! ```

use std::fs;
use std::path::Path;

use bevy_ecs::prelude::Resource;
use glam::Vec3;
use hashbrown::HashMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::geometry::Aabb;

/// Errors raised while loading a catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The catalog file could not be read.
    #[error("failed to read catalog {path}: {source}")]
    Io {
        /// Path that was being read.
        path: String,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },
    /// The catalog document is not valid JSON for this schema.
    #[error("malformed catalog: {0}")]
    Parse(#[from] serde_json::Error),
    /// The catalog contains no items.
    #[error("catalog has no items")]
    Empty,
    /// Two items share a name.
    #[error("catalog item name `{0}` appears more than once")]
    DuplicateName(String),
}

/// RGBA colour with components in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rgba(pub [f32; 4]);

impl Rgba {
    /// Opaque white, used when an item lists no materials.
    pub const WHITE: Self = Self([1.0, 1.0, 1.0, 1.0]);

    /// Red, green, blue and alpha components.
    #[must_use]
    pub const fn components(self) -> [f32; 4] {
        self.0
    }
}

impl Default for Rgba {
    fn default() -> Self {
        Self::WHITE
    }
}

/// Collider box in item-local space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ColliderSpec {
    /// Offset of the box centre from the item origin.
    pub center: [f32; 3],
    /// Full size of the box.
    pub size: [f32; 3],
}

impl ColliderSpec {
    /// Local-space bounding box described by this collider.
    #[must_use]
    pub fn local_bounds(&self) -> Aabb {
        Aabb::from_center_size(Vec3::from_array(self.center), Vec3::from_array(self.size))
    }
}

/// Named colour option for an item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaterialSpec {
    /// Display name.
    pub name: String,
    /// Base colour.
    pub color: Rgba,
}

/// One entry of the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FurnitureItem {
    /// Display name, unique within the catalog.
    pub name: String,
    /// Collider used for occupancy checks; absent items use a radius.
    #[serde(default)]
    pub collider: Option<ColliderSpec>,
    /// Selectable materials; the first is applied on spawn.
    #[serde(default)]
    pub materials: Vec<MaterialSpec>,
    /// Thumbnail asset path for menus.
    #[serde(default)]
    pub thumbnail: Option<String>,
}

impl FurnitureItem {
    /// Colour applied when the item is first placed.
    #[must_use]
    pub fn default_color(&self) -> Rgba {
        self.materials
            .first()
            .map_or(Rgba::WHITE, |material| material.color)
    }
}

#[derive(Deserialize)]
struct CatalogDocument {
    items: Vec<FurnitureItem>,
}

/// Validated, indexed list of furniture items.
#[derive(Resource, Debug, Clone, Default)]
pub struct FurnitureCatalog {
    items: Vec<FurnitureItem>,
    by_name: HashMap<String, usize>,
}

impl FurnitureCatalog {
    /// Builds a catalog, rejecting empty lists and duplicate names.
    ///
    /// # Errors
    /// Returns [`CatalogError::Empty`] or [`CatalogError::DuplicateName`].
    pub fn new(items: Vec<FurnitureItem>) -> Result<Self, CatalogError> {
        if items.is_empty() {
            return Err(CatalogError::Empty);
        }
        let mut by_name = HashMap::with_capacity(items.len());
        for (index, item) in items.iter().enumerate() {
            if by_name.insert(item.name.clone(), index).is_some() {
                return Err(CatalogError::DuplicateName(item.name.clone()));
            }
        }
        Ok(Self { items, by_name })
    }

    /// Parses a catalog from its JSON text.
    ///
    /// # Errors
    /// Returns a parse error for malformed JSON, or any error from [`Self::new`].
    pub fn from_json(text: &str) -> Result<Self, CatalogError> {
        let document: CatalogDocument = serde_json::from_str(text)?;
        Self::new(document.items)
    }

    /// Reads and parses a catalog file.
    ///
    /// # Errors
    /// Returns [`CatalogError::Io`] when the file cannot be read, or any
    /// error from [`Self::from_json`].
    pub fn load(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&text)
    }

    /// Item at `index`.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&FurnitureItem> {
        self.items.get(index)
    }

    /// Index of the item called `name`.
    #[must_use]
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.by_name.get(name).copied()
    }

    /// Number of items.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the catalog has no items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Items in catalog order.
    #[must_use]
    pub fn iter(&self) -> impl Iterator<Item = &FurnitureItem> {
        self.items.iter()
    }
}

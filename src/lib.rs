#![cfg_attr(docsrs, feature(doc_cfg))]
//! Headless core of an augmented-reality furniture placement app.
//!
//! Users pick an item from a catalog, tap a detected floor to place it, then
//! select, recolour, move, turn, scale or delete placed items. Placed items
//! follow the real surface beneath them, or hold a fixed height, while they
//! are dragged. Rendering, AR session management and input devices belong to
//! the host; it supplies raycasting services and a camera as resources.
pub mod camera;
pub mod catalog;
pub mod components;
pub mod constants;
pub mod constraint;
pub mod geometry;
pub mod logging;
pub mod numeric;
pub mod occupancy;
pub mod placement;
pub mod planes;
pub mod session;
pub mod surface;
pub mod tracking;
pub mod vector_math;
pub use constants::*;

// Re-export commonly used items
pub use camera::ViewCamera;
pub use catalog::{CatalogError, FurnitureCatalog, FurnitureItem, Rgba};
pub use components::{Furniture, Tint};
pub use constraint::{constrain_to_plane_system, PlaneConstraint, PlaneConstraintSettings};
pub use logging::init as init_logging;
pub use occupancy::{check_placement, Footprint, OccupancySettings, PlacementCheck};
pub use placement::{FurnitureError, FurnitureErrorContext, FurniturePlugin, FurnitureSettings};
pub use session::SessionState;
pub use surface::{ColliderRaycaster, PlaneRaycaster, SurfaceHit, SurfaceServices};
pub use tracking::{track_surfaces_system, SurfaceTracker, SurfaceTrackerSettings};

pub mod prelude {
    //! Prelude exports used in documentation examples.
    //!
    //! ```rust,no_run
    //! use furnish::prelude::*;
    //! ```

    pub use crate::placement::{
        ClearAll, DeleteSelected, DragSelected, FurnitureSpawned, ObjectDeleted, ObjectSelected,
        PlacementRejected, RecolorSelected, RejectReason, RotateSelected, ScaleSelected,
        SelectFurniture, SelectPlaced, Tap, ToggleUi, VerticalMode,
    };
    pub use crate::planes::{ColliderSet, DetectedPlane, PlaneSet};
    pub use crate::{
        Furniture, FurnitureCatalog, FurniturePlugin, FurnitureSettings, PlaneConstraint,
        SessionState, SurfaceServices, SurfaceTracker, Tint, ViewCamera,
    };
}

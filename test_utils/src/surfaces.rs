//! Scripted stand-ins for the AR plane service.

use std::sync::{Arc, PoisonError, RwLock};

use furnish::geometry::Ray;
use furnish::surface::{PlaneAlignment, PlaneRaycaster, SurfaceHit};
use glam::Vec3;

/// Unbounded horizontal floor whose height a test can move, or remove, while
/// the app is running.
///
/// Clones share the same height, so a test keeps one clone and hands the
/// other to `SurfaceServices`.
#[derive(Clone, Debug, Default)]
pub struct ScriptedFloor {
    height: Arc<RwLock<Option<f32>>>,
}

impl ScriptedFloor {
    /// Floor at `height`.
    pub fn at(height: f32) -> Self {
        Self {
            height: Arc::new(RwLock::new(Some(height))),
        }
    }

    /// Moves the floor; `None` makes every raycast miss.
    pub fn set_height(&self, height: Option<f32>) {
        *self.height.write().unwrap_or_else(PoisonError::into_inner) = height;
    }

    fn height(&self) -> Option<f32> {
        *self.height.read().unwrap_or_else(PoisonError::into_inner)
    }
}

impl PlaneRaycaster for ScriptedFloor {
    fn raycast(&self, ray: &Ray) -> Option<SurfaceHit> {
        let height = self.height()?;
        if ray.direction.y.abs() <= f32::EPSILON {
            return None;
        }
        let distance = (height - ray.origin.y) / ray.direction.y;
        (distance >= 0.0).then(|| SurfaceHit {
            point: ray.at(distance),
            normal: Vec3::Y,
            distance,
            alignment: PlaneAlignment::HorizontalUp,
        })
    }
}

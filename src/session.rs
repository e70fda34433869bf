//! Single owner of what the user currently has selected.
//!
//! Two selections coexist: the catalog item new taps will place, and the
//! placed object that recolour, drag, rotate, scale and delete act on.
//! Selecting a placed object also selects its catalog item, so a following
//! tap on empty floor places another one of the same kind.

use bevy_ecs::prelude::{Entity, Resource};

use crate::catalog::FurnitureCatalog;
use crate::placement::{FurnitureError, FurnitureErrorContext};

/// Selection and UI state of the current session.
#[derive(Resource, Debug, Clone, PartialEq, Eq)]
pub struct SessionState {
    selected_item: Option<usize>,
    selected_object: Option<Entity>,
    ui_visible: bool,
}

impl Default for SessionState {
    fn default() -> Self {
        Self {
            selected_item: None,
            selected_object: None,
            ui_visible: true,
        }
    }
}

impl SessionState {
    /// Catalog index new taps will place.
    #[must_use]
    pub const fn selected_item(&self) -> Option<usize> {
        self.selected_item
    }

    /// Placed object edits act on.
    #[must_use]
    pub const fn selected_object(&self) -> Option<Entity> {
        self.selected_object
    }

    /// Whether the catalog UI is showing.
    #[must_use]
    pub const fn ui_visible(&self) -> bool {
        self.ui_visible
    }

    /// Selects the catalog item at `index`.
    ///
    /// The placed-object selection is kept so several items can be placed in
    /// a row.
    ///
    /// # Errors
    /// Returns an error when `index` is outside the catalog.
    pub fn select_item(
        &mut self,
        index: usize,
        catalog: &FurnitureCatalog,
    ) -> Result<(), FurnitureError> {
        if catalog.get(index).is_none() {
            return Err(FurnitureError::new(
                FurnitureErrorContext::Select,
                format!("catalog index {index} out of range (len {})", catalog.len()),
            ));
        }
        self.selected_item = Some(index);
        Ok(())
    }

    /// Selects a placed object and the catalog item it was made from.
    pub fn select_object(&mut self, entity: Entity, catalog_index: usize) {
        self.selected_object = Some(entity);
        self.selected_item = Some(catalog_index);
    }

    /// Placed object an edit should act on.
    ///
    /// # Errors
    /// Returns an error tagged with `context` when nothing is selected.
    pub fn require_object(&self, context: FurnitureErrorContext) -> Result<Entity, FurnitureError> {
        self.selected_object
            .ok_or_else(|| FurnitureError::new(context, "no object selected"))
    }

    /// Clears both selections, as after deleting the selected object.
    pub fn clear_selection(&mut self) {
        self.selected_object = None;
        self.selected_item = None;
    }

    /// Drops the object selection if it refers to `entity`.
    pub fn forget(&mut self, entity: Entity) {
        if self.selected_object == Some(entity) {
            self.selected_object = None;
        }
    }

    /// Drops the object selection, keeping the catalog selection.
    pub fn clear_object(&mut self) {
        self.selected_object = None;
    }

    /// Flips UI visibility and returns the new value.
    pub fn toggle_ui(&mut self) -> bool {
        self.ui_visible = !self.ui_visible;
        self.ui_visible
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::FurnitureItem;
    use bevy_ecs::world::World;
    use rstest::{fixture, rstest};

    #[fixture]
    fn catalog() -> FurnitureCatalog {
        let item = |name: &str| FurnitureItem {
            name: name.into(),
            collider: None,
            materials: Vec::new(),
            thumbnail: None,
        };
        FurnitureCatalog::new(vec![item("Chair"), item("Table")]).expect("valid catalog")
    }

    #[fixture]
    fn entity() -> Entity {
        World::new().spawn_empty().id()
    }

    #[rstest]
    fn selecting_valid_item(catalog: FurnitureCatalog) {
        let mut session = SessionState::default();
        session.select_item(1, &catalog).expect("index in range");
        assert_eq!(session.selected_item(), Some(1));
    }

    #[rstest]
    fn selecting_out_of_range_item_keeps_state(catalog: FurnitureCatalog) {
        let mut session = SessionState::default();
        session.select_item(0, &catalog).expect("index in range");
        let err = session.select_item(7, &catalog).expect_err("out of range");
        assert_eq!(err.context, FurnitureErrorContext::Select);
        assert_eq!(session.selected_item(), Some(0));
    }

    #[rstest]
    fn clearing_drops_both_selections(entity: Entity) {
        let mut session = SessionState::default();
        session.select_object(entity, 1);
        session.clear_selection();
        assert_eq!(session.selected_object(), None);
        assert_eq!(session.selected_item(), None);
    }

    #[test]
    fn edits_without_selection_are_errors() {
        let session = SessionState::default();
        let err = session
            .require_object(FurnitureErrorContext::Delete)
            .expect_err("nothing selected");
        assert_eq!(err.context, FurnitureErrorContext::Delete);
    }

    #[rstest]
    fn forget_only_drops_matching_entity(entity: Entity) {
        let mut session = SessionState::default();
        session.select_object(entity, 0);
        session.forget(Entity::PLACEHOLDER);
        assert_eq!(session.selected_object(), Some(entity));
        session.forget(entity);
        assert_eq!(session.selected_object(), None);
        assert_eq!(session.selected_item(), Some(0));
    }

    #[test]
    fn ui_toggles() {
        let mut session = SessionState::default();
        assert!(session.ui_visible());
        assert!(!session.toggle_ui());
        assert!(session.toggle_ui());
    }
}

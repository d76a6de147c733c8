use std::collections::HashMap;
use std::sync::Arc;

use log::debug;

use crate::LaymentError;
use crate::entities::{CatalogItem, PlacedContour, PlacementId};
use crate::geometry::geo_traits::Rescalable;
use crate::geometry::primitives::{Point, Rect};
use crate::geometry::{Rotation, WorkspaceScale};

/// Owns every [`PlacedContour`] together with the catalog metadata of each placement.
#[derive(Clone, Debug, Default)]
pub struct PlacementRegistry {
    /// Placed contours, in order of placement
    contours: Vec<PlacedContour>,
    /// Catalog metadata, keyed by placement id
    metadata: HashMap<PlacementId, Arc<CatalogItem>>,
    next_id: u64,
    /// The most recently placed contour
    active: Option<PlacementId>,
}

impl PlacementRegistry {
    /// Places `item` with its top-left corner at `position`.
    /// The new placement gets a fresh id, no rotation and the item's scale override.
    pub fn place(&mut self, item: Arc<CatalogItem>, position: Point) -> PlacementId {
        let id = PlacementId(self.next_id);
        let scale_override = item.scale_override;
        self.insert(id, item, position, Rotation::Deg0, scale_override);
        id
    }

    /// Reinstates a placement with a known id. The id counter is moved past `id` but never lowered.
    pub fn place_with_id(
        &mut self,
        id: PlacementId,
        item: Arc<CatalogItem>,
        position: Point,
        rotation: Rotation,
        scale_override: f32,
    ) {
        self.insert(id, item, position, rotation, scale_override);
    }

    fn insert(
        &mut self,
        id: PlacementId,
        item: Arc<CatalogItem>,
        position: Point,
        rotation: Rotation,
        scale_override: f32,
    ) {
        debug_assert!(self.get(id).is_none(), "placement id {id} reused");
        let contour = PlacedContour::new(id, &item, position, rotation, scale_override);
        debug!("[PR] placed {} as {id}", item.id);
        self.contours.push(contour);
        self.metadata.insert(id, item);
        self.next_id = u64::max(self.next_id, id.0 + 1);
        self.active = Some(id);
    }

    /// Sets the rotation to `angle`, which must be one of the `allowed` rotations.
    /// Returns `false` and leaves the contour untouched otherwise.
    pub fn rotate(
        &mut self,
        id: PlacementId,
        angle: f32,
        allowed: &[Rotation],
        scale: WorkspaceScale,
    ) -> Result<bool, LaymentError> {
        let contour = self.get_mut(id)?;
        match Rotation::from_degrees(angle).filter(|r| allowed.contains(r)) {
            Some(rotation) => {
                contour.set_rotation(rotation, scale);
                Ok(true)
            }
            None => {
                debug!("[PR] ignored rotation of {id} to {angle}");
                Ok(false)
            }
        }
    }

    /// Rotates to the next allowed orientation, clockwise.
    pub fn rotate_step(
        &mut self,
        id: PlacementId,
        allowed: &[Rotation],
        scale: WorkspaceScale,
    ) -> Result<Rotation, LaymentError> {
        let contour = self.get_mut(id)?;
        let next = contour.rotation.next_allowed(allowed);
        contour.set_rotation(next, scale);
        Ok(next)
    }

    /// Replaces an arbitrary observed angle by the nearest allowed rotation.
    pub fn snap_angle(
        &mut self,
        id: PlacementId,
        observed: f32,
        allowed: &[Rotation],
        scale: WorkspaceScale,
    ) -> Result<Rotation, LaymentError> {
        let contour = self.get_mut(id)?;
        let snapped = Rotation::snap(observed, allowed);
        contour.set_rotation(snapped, scale);
        Ok(snapped)
    }

    /// Removes the contour and its metadata. Dependent labels are left to the caller.
    pub fn remove(&mut self, id: PlacementId) -> Result<PlacedContour, LaymentError> {
        let idx = self
            .contours
            .iter()
            .position(|c| c.id == id)
            .ok_or(LaymentError::UnknownPlacement(id))?;
        self.metadata.remove(&id);
        if self.active == Some(id) {
            self.active = None;
        }
        Ok(self.contours.remove(idx))
    }

    /// Translates the contour and returns the applied delta, for dependents to follow.
    pub fn move_by(
        &mut self,
        id: PlacementId,
        dx: f32,
        dy: f32,
    ) -> Result<(f32, f32), LaymentError> {
        let contour = self.get_mut(id)?;
        contour.translate(dx, dy);
        Ok(contour.last_delta())
    }

    pub fn bbox(&self, id: PlacementId, scale: WorkspaceScale) -> Result<Rect, LaymentError> {
        self.get(id)
            .map(|c| c.bbox(scale))
            .ok_or(LaymentError::UnknownPlacement(id))
    }

    pub fn get(&self, id: PlacementId) -> Option<&PlacedContour> {
        self.contours.iter().find(|c| c.id == id)
    }

    fn get_mut(&mut self, id: PlacementId) -> Result<&mut PlacedContour, LaymentError> {
        self.contours
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or(LaymentError::UnknownPlacement(id))
    }

    pub fn metadata(&self, id: PlacementId) -> Option<&Arc<CatalogItem>> {
        self.metadata.get(&id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &PlacedContour> {
        self.contours.iter()
    }

    /// Contours paired with their catalog metadata
    pub fn iter_with_metadata(&self) -> impl Iterator<Item = (&PlacedContour, &CatalogItem)> {
        self.contours
            .iter()
            .filter_map(|c| self.metadata.get(&c.id).map(|m| (c, m.as_ref())))
    }

    pub(crate) fn iter_mut(&mut self) -> impl Iterator<Item = &mut PlacedContour> {
        self.contours.iter_mut()
    }

    pub fn len(&self) -> usize {
        self.contours.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contours.is_empty()
    }

    pub fn active(&self) -> Option<PlacementId> {
        self.active
    }

    /// The id the next placement will receive
    pub fn next_id(&self) -> PlacementId {
        PlacementId(self.next_id)
    }

    /// Sum of the catalog cutting lengths of all placed contours, in metres.
    pub fn total_cutting_length(&self) -> f32 {
        self.metadata.values().map(|m| m.cutting_length_meters).sum()
    }

    /// Removes all contours. The id counter keeps its value.
    pub fn clear(&mut self) {
        self.contours.clear();
        self.metadata.clear();
        self.active = None;
    }
}

impl Rescalable for PlacementRegistry {
    fn rescale(&mut self, ratio: f32) {
        self.contours.iter_mut().for_each(|c| c.rescale(ratio));
    }
}

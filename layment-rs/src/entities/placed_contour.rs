use std::fmt::Display;

use serde::{Deserialize, Serialize};

use crate::entities::CatalogItem;
use crate::geometry::geo_traits::{Bounded, Rescalable};
use crate::geometry::primitives::{Point, Rect, Silhouette};
use crate::geometry::scale::to_workspace;
use crate::geometry::{Rotation, Transformation, WorkspaceScale};

/// Stable identifier of a placement, never reused within a session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlacementId(pub u64);

impl Display for PlacementId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// An instance of a [`CatalogItem`] placed on the layment.
#[derive(Clone, Debug, PartialEq)]
pub struct PlacedContour {
    pub id: PlacementId,
    pub catalog_id: String,
    /// Top-left corner of the rotated bounding box, in workspace units
    pub position: Point,
    pub rotation: Rotation,
    pub scale_override: f32,
    /// Position before the most recent move
    pub last_position: Point,
    /// Marked as violating a layout rule during the last validation
    pub highlighted: bool,
    /// Unrotated width and height in mm, scale override included
    footprint: (f32, f32),
}

impl PlacedContour {
    pub fn new(
        id: PlacementId,
        item: &CatalogItem,
        position: Point,
        rotation: Rotation,
        scale_override: f32,
    ) -> Self {
        PlacedContour {
            id,
            catalog_id: item.id.clone(),
            position,
            rotation,
            scale_override,
            last_position: position,
            highlighted: false,
            footprint: item.footprint(scale_override),
        }
    }

    /// Rotated width and height in workspace units
    pub fn size(&self, scale: WorkspaceScale) -> (f32, f32) {
        let (w, h) = self.footprint;
        let (w, h) = match self.rotation.is_sideways() {
            true => (h, w),
            false => (w, h),
        };
        (to_workspace(w, scale), to_workspace(h, scale))
    }

    /// Axis-aligned bounding box after rotation, in workspace units
    pub fn bbox(&self, scale: WorkspaceScale) -> Rect {
        let (w, h) = self.size(scale);
        Rect::from_top_left(self.position, w, h)
    }

    /// Translates the contour, remembering where it came from.
    pub fn translate(&mut self, dx: f32, dy: f32) {
        self.last_position = self.position;
        self.position = self.position.translate(dx, dy);
    }

    /// Delta of the most recent move
    pub fn last_delta(&self) -> (f32, f32) {
        let d = self.position - self.last_position;
        (d.x(), d.y())
    }

    /// Changes the rotation while keeping the centre of the bounding box in place.
    pub fn set_rotation(&mut self, rotation: Rotation, scale: WorkspaceScale) {
        let centre = self.bbox(scale).centroid();
        self.rotation = rotation;
        let (w, h) = self.size(scale);
        self.position = Point(centre.x() - w / 2.0, centre.y() - h / 2.0);
    }

    /// Transformation mapping the local silhouette coordinates onto the workspace.
    pub fn transformation(&self, silhouette: &Silhouette, scale: WorkspaceScale) -> Transformation {
        let local_centre = silhouette.bbox().centroid();
        let placed_centre = self.bbox(scale).centroid();
        Transformation::empty()
            .translate((-local_centre.x(), -local_centre.y()))
            .rotate(self.rotation)
            .scale(self.scale_override * scale.value())
            .translate(placed_centre.into())
    }
}

impl Rescalable for PlacedContour {
    fn rescale(&mut self, ratio: f32) {
        self.position.rescale(ratio);
        self.last_position.rescale(ratio);
    }
}

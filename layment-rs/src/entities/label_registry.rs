use itertools::Itertools;
use log::debug;
use slotmap::SlotMap;

use crate::LaymentError;
use crate::entities::{Label, LabelKey, PlacementId, PlacementRegistry};
use crate::geometry::WorkspaceScale;
use crate::geometry::geo_traits::Rescalable;
use crate::geometry::primitives::{Point, Rect};
use crate::geometry::scale::to_workspace;
use crate::util::EngineConfig;

/// Owns every [`Label`] and keeps each of them inside the padded bounding box of its contour.
///
/// Edits that would push a label outside are corrected by translating it back, never rejected.
#[derive(Clone, Debug, Default)]
pub struct LabelRegistry {
    labels: SlotMap<LabelKey, Label>,
}

impl LabelRegistry {
    /// Attaches a label to `owner`, `offset` (mm) away from the owner's top-right corner.
    /// Without an offset, the configured default is used.
    pub fn attach(
        &mut self,
        owner: PlacementId,
        text: String,
        offset: Option<(f32, f32)>,
        contours: &PlacementRegistry,
        scale: WorkspaceScale,
        cfg: &EngineConfig,
    ) -> Result<LabelKey, LaymentError> {
        let owner_bbox = contours.bbox(owner, scale)?;
        let (ox, oy) = offset.unwrap_or(cfg.labels.default_offset);
        let position = Point(
            owner_bbox.x_max + to_workspace(ox, scale),
            owner_bbox.y_min + to_workspace(oy, scale),
        );
        let key = self.labels.insert(Label {
            placement_id: owner,
            text,
            position,
            font_size_mm: cfg.labels.font_size_mm,
        });
        self.clamp_to_owner(key, contours, scale, cfg)?;
        Ok(key)
    }

    /// Inserts a label as is, e.g. when restoring a workspace. The caller clamps it afterwards.
    pub(crate) fn insert(&mut self, label: Label) -> LabelKey {
        self.labels.insert(label)
    }

    pub fn set_text(
        &mut self,
        key: LabelKey,
        text: String,
        contours: &PlacementRegistry,
        scale: WorkspaceScale,
        cfg: &EngineConfig,
    ) -> Result<(), LaymentError> {
        self.get_mut(key)?.text = text;
        self.clamp_to_owner(key, contours, scale, cfg)
    }

    /// Drags a single label, clamping it afterwards.
    pub fn move_by(
        &mut self,
        key: LabelKey,
        dx: f32,
        dy: f32,
        contours: &PlacementRegistry,
        scale: WorkspaceScale,
        cfg: &EngineConfig,
    ) -> Result<(), LaymentError> {
        self.get_mut(key)?.translate(dx, dy);
        self.clamp_to_owner(key, contours, scale, cfg)
    }

    /// Translates every label of `owner` by the delta of its contour, then clamps them.
    pub fn on_contour_moved(
        &mut self,
        owner: PlacementId,
        (dx, dy): (f32, f32),
        contours: &PlacementRegistry,
        scale: WorkspaceScale,
        cfg: &EngineConfig,
    ) -> Result<(), LaymentError> {
        self.labels
            .values_mut()
            .filter(|l| l.placement_id == owner)
            .for_each(|l| l.translate(dx, dy));
        self.clamp_all_for(owner, contours, scale, cfg)
    }

    /// Moves the label the minimum distance needed to bring it back inside its allowed rectangle.
    /// A label larger than the allowed rectangle is aligned to its left and top edges.
    pub fn clamp_to_owner(
        &mut self,
        key: LabelKey,
        contours: &PlacementRegistry,
        scale: WorkspaceScale,
        cfg: &EngineConfig,
    ) -> Result<(), LaymentError> {
        let label = self.labels.get_mut(key).ok_or(LaymentError::UnknownLabel)?;
        let allowed = allowed_rect(label.placement_id, contours, scale, cfg)?;
        let (dx, dy) = allowed.clamp_translation(&label.bbox(&cfg.labels, scale));
        if dx != 0.0 || dy != 0.0 {
            debug!("[LR] clamped label of {} by ({dx}, {dy})", label.placement_id);
            label.translate(dx, dy);
        }
        Ok(())
    }

    /// Clamps every label of `owner`, e.g. after it was rotated.
    pub fn clamp_all_for(
        &mut self,
        owner: PlacementId,
        contours: &PlacementRegistry,
        scale: WorkspaceScale,
        cfg: &EngineConfig,
    ) -> Result<(), LaymentError> {
        let keys = self.keys_for(owner);
        for key in keys {
            self.clamp_to_owner(key, contours, scale, cfg)?;
        }
        Ok(())
    }

    /// Removes every label of `owner`.
    pub fn detach_all(&mut self, owner: PlacementId) -> Vec<Label> {
        self.keys_for(owner)
            .into_iter()
            .filter_map(|k| self.labels.remove(k))
            .collect()
    }

    pub fn remove(&mut self, key: LabelKey) -> Result<Label, LaymentError> {
        self.labels.remove(key).ok_or(LaymentError::UnknownLabel)
    }

    /// The first label attached to `owner`
    pub fn label_for(&self, owner: PlacementId) -> Option<(LabelKey, &Label)> {
        self.labels.iter().find(|(_, l)| l.placement_id == owner)
    }

    fn keys_for(&self, owner: PlacementId) -> Vec<LabelKey> {
        self.labels
            .iter()
            .filter(|(_, l)| l.placement_id == owner)
            .map(|(k, _)| k)
            .collect_vec()
    }

    pub fn get(&self, key: LabelKey) -> Option<&Label> {
        self.labels.get(key)
    }

    fn get_mut(&mut self, key: LabelKey) -> Result<&mut Label, LaymentError> {
        self.labels.get_mut(key).ok_or(LaymentError::UnknownLabel)
    }

    pub fn iter(&self) -> impl Iterator<Item = (LabelKey, &Label)> {
        self.labels.iter()
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Removes every label. New labels are iterated in insertion order again.
    pub fn clear(&mut self) {
        self.labels = SlotMap::with_key();
    }
}

/// The owner's bounding box grown by the label padding
pub fn allowed_rect(
    owner: PlacementId,
    contours: &PlacementRegistry,
    scale: WorkspaceScale,
    cfg: &EngineConfig,
) -> Result<Rect, LaymentError> {
    let bbox = contours.bbox(owner, scale)?;
    Ok(bbox.inflate(to_workspace(cfg.label_padding(), scale)))
}

impl Rescalable for LabelRegistry {
    fn rescale(&mut self, ratio: f32) {
        self.labels.values_mut().for_each(|l| l.rescale(ratio));
    }
}

use log::{debug, error, info};

use crate::LaymentError;
use crate::collision_detection::{Rasterizer, ValidationReport, validate};
use crate::entities::{
    Catalog, Command, CommandOutcome, EntityRef, LabelKey, LabelRegistry, Layment, PlacedContour,
    PlacementId, PlacementRegistry, PrimitiveKey, PrimitiveRegistry, PrimitiveShape,
    ResizeOutcome,
};
use crate::geometry::geo_traits::Rescalable;
use crate::geometry::primitives::Point;
use crate::geometry::scale::to_workspace;
use crate::geometry::{Rotation, WorkspaceScale};
use crate::io::export;
use crate::io::ext_repr::{ExtExportDocument, ExtWorkspace};
use crate::io::svg::{SvgDrawOptions, layout_to_svg};
use crate::util::{EngineConfig, assertions};

/// A [`Layout`] is the editable arrangement of contours, primitives and labels on a [`Layment`].
///
/// All positions and sizes are held in workspace units at the current [`WorkspaceScale`].
/// Changing the scale rescales every entity in one go, so the real-millimetre geometry never drifts.
#[derive(Clone, Debug)]
pub struct Layout {
    pub(crate) layment: Layment,
    pub(crate) contours: PlacementRegistry,
    pub(crate) primitives: PrimitiveRegistry,
    pub(crate) labels: LabelRegistry,
    scale: WorkspaceScale,
    /// Colour of the foam, carried along to the exported order
    pub base_material_color: String,
}

pub const DEFAULT_MATERIAL_COLOR: &str = "black";

impl Layout {
    pub fn new(layment: Layment) -> Self {
        Layout {
            layment,
            contours: PlacementRegistry::default(),
            primitives: PrimitiveRegistry::default(),
            labels: LabelRegistry::default(),
            scale: WorkspaceScale::UNIT,
            base_material_color: DEFAULT_MATERIAL_COLOR.to_string(),
        }
    }

    pub fn layment(&self) -> &Layment {
        &self.layment
    }

    pub fn contours(&self) -> &PlacementRegistry {
        &self.contours
    }

    pub fn primitives(&self) -> &PrimitiveRegistry {
        &self.primitives
    }

    pub fn labels(&self) -> &LabelRegistry {
        &self.labels
    }

    pub fn scale(&self) -> WorkspaceScale {
        self.scale
    }

    /// True if nothing is placed on the layment
    pub fn is_empty(&self) -> bool {
        self.contours.is_empty() && self.primitives.is_empty()
    }

    /// Changes the zoom factor, rescaling every entity in lockstep.
    pub fn set_scale(&mut self, scale: f32, cfg: &EngineConfig) -> Result<(), LaymentError> {
        let (min, max) = (cfg.scale.min, cfg.scale.max);
        match WorkspaceScale::new(scale) {
            Some(s) if (min..=max).contains(&scale) => {
                self.rescale_all(s);
                Ok(())
            }
            _ => Err(LaymentError::ScaleOutOfRange { scale, min, max }),
        }
    }

    fn rescale_all(&mut self, target: WorkspaceScale) {
        if target == self.scale {
            return;
        }
        let ratio = self.scale.ratio_to(target);
        self.contours.rescale(ratio);
        self.primitives.rescale(ratio);
        self.labels.rescale(ratio);
        self.scale = target;
        debug!("[LAYOUT] rescaled to {target} (ratio {ratio})");
    }

    /// Runs `action` with the layout temporarily at scale 1.0, restoring the current scale afterwards.
    pub fn with_scale_one<T>(&mut self, action: impl FnOnce(&mut Layout) -> T) -> T {
        let saved = self.scale;
        self.rescale_all(WorkspaceScale::UNIT);
        let result = action(self);
        self.rescale_all(saved);
        result
    }

    /// Places a catalog item with the top-left of its bounding box at `position`,
    /// or centred on the layment when no position is given.
    pub fn place_contour(
        &mut self,
        catalog: &Catalog,
        catalog_id: &str,
        position: Option<Point>,
    ) -> Result<PlacementId, LaymentError> {
        let item = catalog.resolve(catalog_id)?;
        let position = position.unwrap_or_else(|| {
            let (w, h) = item.footprint(item.scale_override);
            let centre = self.layment.rect(self.scale).centroid();
            centre.translate(
                -to_workspace(w, self.scale) / 2.0,
                -to_workspace(h, self.scale) / 2.0,
            )
        });
        let id = self.contours.place(item, position);
        debug_assert!(assertions::placement_ids_unique(self));
        Ok(id)
    }

    /// Moves a contour together with its labels.
    pub fn move_contour(
        &mut self,
        id: PlacementId,
        dx: f32,
        dy: f32,
        cfg: &EngineConfig,
    ) -> Result<(), LaymentError> {
        let delta = self.contours.move_by(id, dx, dy)?;
        self.labels
            .on_contour_moved(id, delta, &self.contours, self.scale, cfg)?;
        debug_assert!(assertions::labels_within_owners(self, cfg));
        Ok(())
    }

    /// Rotates a contour to one of the allowed angles. Returns `false` if the angle was refused.
    pub fn rotate_contour(
        &mut self,
        id: PlacementId,
        angle: f32,
        cfg: &EngineConfig,
    ) -> Result<bool, LaymentError> {
        let applied = self
            .contours
            .rotate(id, angle, &cfg.allowed_rotations, self.scale)?;
        if applied {
            self.after_rotation(id, cfg)?;
        }
        Ok(applied)
    }

    pub fn rotate_contour_step(
        &mut self,
        id: PlacementId,
        cfg: &EngineConfig,
    ) -> Result<Rotation, LaymentError> {
        let rotation = self
            .contours
            .rotate_step(id, &cfg.allowed_rotations, self.scale)?;
        self.after_rotation(id, cfg)?;
        Ok(rotation)
    }

    pub fn snap_contour_angle(
        &mut self,
        id: PlacementId,
        observed: f32,
        cfg: &EngineConfig,
    ) -> Result<Rotation, LaymentError> {
        let rotation = self
            .contours
            .snap_angle(id, observed, &cfg.allowed_rotations, self.scale)?;
        self.after_rotation(id, cfg)?;
        Ok(rotation)
    }

    fn after_rotation(&mut self, id: PlacementId, cfg: &EngineConfig) -> Result<(), LaymentError> {
        self.labels
            .clamp_all_for(id, &self.contours, self.scale, cfg)?;
        debug_assert!(assertions::rotations_allowed(self, cfg));
        debug_assert!(assertions::labels_within_owners(self, cfg));
        Ok(())
    }

    /// Removes a contour and every label attached to it.
    pub fn remove_contour(&mut self, id: PlacementId) -> Result<PlacedContour, LaymentError> {
        let contour = self.contours.remove(id)?;
        let detached = self.labels.detach_all(id);
        debug!("[LAYOUT] removed {id} and {} label(s)", detached.len());
        Ok(contour)
    }

    /// Adds a primitive, `shape` in millimetres. Without a position, it is centred on the layment.
    pub fn add_primitive(
        &mut self,
        shape: PrimitiveShape,
        position: Option<Point>,
        cfg: &EngineConfig,
    ) -> PrimitiveKey {
        let position = position.unwrap_or_else(|| {
            let centre = self.layment.rect(self.scale).centroid();
            match shape.clamped(&cfg.primitives) {
                PrimitiveShape::Rect { width, height } => centre.translate(
                    -to_workspace(width, self.scale) / 2.0,
                    -to_workspace(height, self.scale) / 2.0,
                ),
                PrimitiveShape::Circle { .. } => centre,
            }
        });
        self.primitives
            .add(shape, position, self.scale, &cfg.primitives)
    }

    /// Resizes a primitive, `size` in workspace units.
    pub fn resize_primitive(
        &mut self,
        key: PrimitiveKey,
        size: PrimitiveShape,
        cfg: &EngineConfig,
    ) -> Result<ResizeOutcome, LaymentError> {
        self.primitives
            .resize(key, size, self.scale, &cfg.primitives)
    }

    pub fn attach_label(
        &mut self,
        owner: PlacementId,
        text: String,
        offset: Option<(f32, f32)>,
        cfg: &EngineConfig,
    ) -> Result<LabelKey, LaymentError> {
        let key = self
            .labels
            .attach(owner, text, offset, &self.contours, self.scale, cfg)?;
        debug_assert!(assertions::labels_within_owners(self, cfg));
        Ok(key)
    }

    pub fn set_label_text(
        &mut self,
        key: LabelKey,
        text: String,
        cfg: &EngineConfig,
    ) -> Result<(), LaymentError> {
        self.labels
            .set_text(key, text, &self.contours, self.scale, cfg)?;
        debug_assert!(assertions::labels_within_owners(self, cfg));
        Ok(())
    }

    /// Moves any kind of entity by `(dx, dy)` workspace units.
    pub fn move_entity(
        &mut self,
        target: EntityRef,
        dx: f32,
        dy: f32,
        cfg: &EngineConfig,
    ) -> Result<(), LaymentError> {
        match target {
            EntityRef::Contour(id) => self.move_contour(id, dx, dy, cfg),
            EntityRef::Primitive(key) => self.primitives.move_by(key, dx, dy),
            EntityRef::Label(key) => self
                .labels
                .move_by(key, dx, dy, &self.contours, self.scale, cfg),
        }
    }

    pub fn delete_entity(&mut self, target: EntityRef) -> Result<(), LaymentError> {
        match target {
            EntityRef::Contour(id) => self.remove_contour(id).map(|_| ()),
            EntityRef::Primitive(key) => self.primitives.remove(key).map(|_| ()),
            EntityRef::Label(key) => self.labels.remove(key).map(|_| ()),
        }
    }

    /// Replaces the layment by one with new dimensions. Placed entities are left untouched.
    pub fn resize_layment(&mut self, width: f32, height: f32, cfg: &EngineConfig) {
        self.layment = self.layment.resized(width, height, &cfg.layment);
    }

    pub fn apply_preset(&mut self, name: &str, cfg: &EngineConfig) -> Result<(), LaymentError> {
        let preset = Layment::from_preset(name, &cfg.layment)?;
        self.resize_layment(preset.width, preset.height, cfg);
        Ok(())
    }

    /// Removes every contour, primitive and label. Placement ids are not reset.
    pub fn clear(&mut self) {
        self.contours.clear();
        self.primitives.clear();
        self.labels.clear();
    }

    /// Applies a [`Command`], the single entry point for interactive edits.
    pub fn apply(
        &mut self,
        command: Command,
        catalog: &Catalog,
        cfg: &EngineConfig,
    ) -> Result<CommandOutcome, LaymentError> {
        let outcome = match command {
            Command::PlaceContour {
                catalog_id,
                position,
            } => {
                let id = self.place_contour(catalog, &catalog_id, position)?;
                CommandOutcome::created(EntityRef::Contour(id))
            }
            Command::Move { target, dx, dy } => {
                self.move_entity(target, dx, dy, cfg)?;
                CommandOutcome::persist()
            }
            Command::Rotate { id, angle } => match self.rotate_contour(id, angle, cfg)? {
                true => CommandOutcome::persist(),
                false => CommandOutcome::unchanged(),
            },
            Command::RotateStep { id } => {
                self.rotate_contour_step(id, cfg)?;
                CommandOutcome::persist()
            }
            Command::SnapAngle { id, observed } => {
                self.snap_contour_angle(id, observed, cfg)?;
                CommandOutcome::persist()
            }
            Command::AddPrimitive { shape, position } => {
                let key = self.add_primitive(shape, position, cfg);
                CommandOutcome::created(EntityRef::Primitive(key))
            }
            Command::ResizePrimitive { key, size } => {
                match self.resize_primitive(key, size, cfg)? {
                    ResizeOutcome::Applied(_) => CommandOutcome::persist(),
                    ResizeOutcome::NotApplied => CommandOutcome::unchanged(),
                }
            }
            Command::Delete { target } => {
                self.delete_entity(target)?;
                CommandOutcome::persist()
            }
            Command::AttachLabel {
                owner,
                text,
                offset,
            } => {
                let key = self.attach_label(owner, text, offset, cfg)?;
                CommandOutcome::created(EntityRef::Label(key))
            }
            Command::SetLabelText { key, text } => {
                self.set_label_text(key, text, cfg)?;
                CommandOutcome::persist()
            }
            Command::SetScale { scale } => {
                self.set_scale(scale, cfg)?;
                CommandOutcome::unchanged()
            }
            Command::ResizeLayment { width, height } => {
                self.resize_layment(width, height, cfg);
                CommandOutcome::persist()
            }
            Command::ApplyPreset { name } => {
                self.apply_preset(&name, cfg)?;
                CommandOutcome::persist()
            }
        };
        Ok(outcome)
    }

    /// Validates the layout and highlights every offending entity.
    /// Highlights of previous runs are cleared first.
    ///
    /// Fails with [`LaymentError::ScaleNotUnit`] unless the layout is at scale 1.0,
    /// see [`Layout::check`] for a version that takes care of the scale.
    pub fn validate(
        &mut self,
        rasterizer: &impl Rasterizer,
        cfg: &EngineConfig,
    ) -> Result<ValidationReport, LaymentError> {
        let report = validate(self, rasterizer, cfg)?;

        let offenders = report.offending_contours();
        self.contours
            .iter_mut()
            .for_each(|c| c.highlighted = offenders.contains(&c.id));
        self.primitives
            .iter_mut()
            .for_each(|(k, p)| p.highlighted = report.out_of_bounds_primitives.contains(&k));

        Ok(report)
    }

    /// Validates the layout at scale 1.0, restoring the current scale afterwards.
    pub fn check(
        &mut self,
        rasterizer: &impl Rasterizer,
        cfg: &EngineConfig,
    ) -> Result<ValidationReport, LaymentError> {
        self.with_scale_one(|layout| layout.validate(rasterizer, cfg))
    }

    /// Creates a workspace document of the current state.
    pub fn save(&self) -> ExtWorkspace {
        export::workspace_document(self)
    }

    /// Validates the layout and builds the order document.
    /// Fails with [`LaymentError::InvalidLayout`] if the layout is not producible.
    pub fn export(
        &mut self,
        rasterizer: &impl Rasterizer,
        cfg: &EngineConfig,
    ) -> Result<ExtExportDocument, LaymentError> {
        self.with_scale_one(|layout| {
            let report = layout.validate(rasterizer, cfg)?;
            if !report.is_ok() {
                let issues = report.issues();
                error!("[LAYOUT] export refused: {issues:?}");
                return Err(LaymentError::InvalidLayout(issues));
            }
            let svg = layout_to_svg(layout, cfg, SvgDrawOptions::default(), "order preview");
            let document = export::export_document(layout, cfg, Some(svg.to_string()));
            info!(
                "[LAYOUT] exported {} contour(s), {} primitive(s), total price {}",
                document.contours.len(),
                document.primitives.len(),
                document.order_meta.price_preview.total
            );
            Ok(document)
        })
    }
}

impl Default for Layout {
    fn default() -> Self {
        Layout::new(Layment::default())
    }
}

use log::debug;
use slotmap::SlotMap;

use crate::LaymentError;
use crate::entities::{Primitive, PrimitiveKey, PrimitiveShape};
use crate::geometry::WorkspaceScale;
use crate::geometry::geo_traits::{Bounded, Rescalable};
use crate::geometry::primitives::{Point, Rect};
use crate::util::PrimitiveLimits;

/// Result of a [`PrimitiveRegistry::resize`] request.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ResizeOutcome {
    /// The primitive now has this (clamped) shape, in workspace units
    Applied(PrimitiveShape),
    /// The clamped size equals the current one, nothing changed
    NotApplied,
}

/// Owns every [`Primitive`] and keeps their sizes within the configured limits.
#[derive(Clone, Debug, Default)]
pub struct PrimitiveRegistry {
    primitives: SlotMap<PrimitiveKey, Primitive>,
}

impl PrimitiveRegistry {
    /// Adds a primitive. `shape` is given in real millimetres and clamped into `limits`.
    pub fn add(
        &mut self,
        shape: PrimitiveShape,
        position: Point,
        scale: WorkspaceScale,
        limits: &PrimitiveLimits,
    ) -> PrimitiveKey {
        let clamped = shape.clamped(limits);
        if clamped != shape {
            debug!("[PrR] clamped new primitive from {shape:?} to {clamped:?}");
        }
        let primitive = Primitive::new(clamped.scaled(scale.value()), position);
        self.primitives.insert(primitive)
    }

    /// Resizes a primitive to `new_size` (workspace units).
    ///
    /// The size is converted to millimetres, clamped into `limits` and converted back.
    /// Requests that end up (almost) equal to the current size are not applied.
    pub fn resize(
        &mut self,
        key: PrimitiveKey,
        new_size: PrimitiveShape,
        scale: WorkspaceScale,
        limits: &PrimitiveLimits,
    ) -> Result<ResizeOutcome, LaymentError> {
        let primitive = self
            .primitives
            .get_mut(key)
            .ok_or(LaymentError::UnknownPrimitive)?;
        if new_size.kind() != primitive.kind() {
            return Err(LaymentError::InvalidShape(format!(
                "cannot resize a {:?} primitive into a {:?}",
                primitive.kind(),
                new_size.kind()
            )));
        }
        let target = new_size
            .scaled(1.0 / scale.value())
            .clamped(limits)
            .scaled(scale.value());
        match target.almost_eq(&primitive.shape) {
            true => Ok(ResizeOutcome::NotApplied),
            false => {
                primitive.shape = target;
                Ok(ResizeOutcome::Applied(target))
            }
        }
    }

    pub fn remove(&mut self, key: PrimitiveKey) -> Result<Primitive, LaymentError> {
        self.primitives
            .remove(key)
            .ok_or(LaymentError::UnknownPrimitive)
    }

    pub fn move_by(&mut self, key: PrimitiveKey, dx: f32, dy: f32) -> Result<(), LaymentError> {
        let primitive = self
            .primitives
            .get_mut(key)
            .ok_or(LaymentError::UnknownPrimitive)?;
        primitive.translate(dx, dy);
        Ok(())
    }

    pub fn bbox(&self, key: PrimitiveKey) -> Result<Rect, LaymentError> {
        self.primitives
            .get(key)
            .map(|p| p.bbox())
            .ok_or(LaymentError::UnknownPrimitive)
    }

    pub fn get(&self, key: PrimitiveKey) -> Option<&Primitive> {
        self.primitives.get(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (PrimitiveKey, &Primitive)> {
        self.primitives.iter()
    }

    pub(crate) fn iter_mut(&mut self) -> impl Iterator<Item = (PrimitiveKey, &mut Primitive)> {
        self.primitives.iter_mut()
    }

    pub fn len(&self) -> usize {
        self.primitives.len()
    }

    pub fn is_empty(&self) -> bool {
        self.primitives.is_empty()
    }

    /// Removes every primitive. New primitives are iterated in insertion order again.
    pub fn clear(&mut self) {
        // SlotMap::clear keeps the freed slots, which are then reused last-freed-first
        self.primitives = SlotMap::with_key();
    }
}

impl Rescalable for PrimitiveRegistry {
    fn rescale(&mut self, ratio: f32) {
        self.primitives.values_mut().for_each(|p| p.rescale(ratio));
    }
}

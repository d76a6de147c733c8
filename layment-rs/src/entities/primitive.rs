use serde::{Deserialize, Serialize};

use crate::geometry::geo_traits::{Bounded, Rescalable};
use crate::geometry::primitives::{Point, Rect};
use crate::util::{FPA, PrimitiveLimits, clamp};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PrimitiveKind {
    Rect,
    Circle,
}

/// Size of a parametric cut-out.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum PrimitiveShape {
    Rect { width: f32, height: f32 },
    Circle { radius: f32 },
}

impl PrimitiveShape {
    pub fn kind(&self) -> PrimitiveKind {
        match self {
            PrimitiveShape::Rect { .. } => PrimitiveKind::Rect,
            PrimitiveShape::Circle { .. } => PrimitiveKind::Circle,
        }
    }

    /// Every dimension multiplied by `factor`
    pub fn scaled(self, factor: f32) -> Self {
        match self {
            PrimitiveShape::Rect { width, height } => PrimitiveShape::Rect {
                width: width * factor,
                height: height * factor,
            },
            PrimitiveShape::Circle { radius } => PrimitiveShape::Circle {
                radius: radius * factor,
            },
        }
    }

    /// Clamps a size in real millimetres into the configured limits.
    pub fn clamped(self, limits: &PrimitiveLimits) -> Self {
        match self {
            PrimitiveShape::Rect { width, height } => PrimitiveShape::Rect {
                width: clamp(width, limits.rect_min_width, limits.rect_max_width),
                height: clamp(height, limits.rect_min_height, limits.rect_max_height),
            },
            PrimitiveShape::Circle { radius } => PrimitiveShape::Circle {
                radius: clamp(radius, limits.circle_min_radius, limits.circle_max_radius),
            },
        }
    }

    /// True if both shapes are of the same kind and their dimensions agree within tolerance.
    pub fn almost_eq(&self, other: &Self) -> bool {
        match (self, other) {
            (
                PrimitiveShape::Rect { width, height },
                PrimitiveShape::Rect {
                    width: w,
                    height: h,
                },
            ) => FPA(*width) == FPA(*w) && FPA(*height) == FPA(*h),
            (PrimitiveShape::Circle { radius }, PrimitiveShape::Circle { radius: r }) => {
                FPA(*radius) == FPA(*r)
            }
            _ => false,
        }
    }
}

/// A rectangle or circle cut-out, independent of the catalog.
///
/// The position of a rectangle is its top-left corner, that of a circle its centre.
/// Both position and shape are expressed in workspace units.
#[derive(Clone, Debug, PartialEq)]
pub struct Primitive {
    pub shape: PrimitiveShape,
    pub position: Point,
    pub highlighted: bool,
}

impl Primitive {
    pub fn new(shape: PrimitiveShape, position: Point) -> Self {
        Primitive {
            shape,
            position,
            highlighted: false,
        }
    }

    pub fn kind(&self) -> PrimitiveKind {
        self.shape.kind()
    }

    pub fn translate(&mut self, dx: f32, dy: f32) {
        self.position = self.position.translate(dx, dy);
    }
}

impl Bounded for Primitive {
    fn bbox(&self) -> Rect {
        match self.shape {
            PrimitiveShape::Rect { width, height } => {
                Rect::from_top_left(self.position, width, height)
            }
            PrimitiveShape::Circle { radius } => Rect::from_top_left(
                self.position.translate(-radius, -radius),
                2.0 * radius,
                2.0 * radius,
            ),
        }
    }
}

impl Rescalable for Primitive {
    fn rescale(&mut self, ratio: f32) {
        self.position.rescale(ratio);
        self.shape = self.shape.scaled(ratio);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamps_into_limits() {
        let limits = PrimitiveLimits::default();
        let r = PrimitiveShape::Rect {
            width: 2.0,
            height: 1000.0,
        };
        assert_eq!(
            r.clamped(&limits),
            PrimitiveShape::Rect {
                width: 8.0,
                height: 400.0
            }
        );
        let c = PrimitiveShape::Circle { radius: 300.0 };
        assert_eq!(c.clamped(&limits), PrimitiveShape::Circle { radius: 200.0 });
    }

    #[test]
    fn inverted_limits_do_not_panic() {
        let limits: PrimitiveLimits =
            serde_json::from_str(r#"{"rect_max_width": 5.0}"#).unwrap();
        let r = PrimitiveShape::Rect {
            width: 10.0,
            height: 10.0,
        };
        assert_eq!(
            r.clamped(&limits),
            PrimitiveShape::Rect {
                width: 5.0,
                height: 10.0
            }
        );
    }

    #[test]
    fn circle_bbox_is_centred() {
        let p = Primitive::new(PrimitiveShape::Circle { radius: 5.0 }, Point(20.0, 30.0));
        assert_eq!(p.bbox(), Rect::try_new(15.0, 25.0, 25.0, 35.0).unwrap());
    }
}

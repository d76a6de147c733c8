use crate::geometry::geo_traits::{AlmostCollidesWith, CollidesWith};
use crate::geometry::primitives::Point;
use crate::util::FPA;
use anyhow::Result;
use anyhow::ensure;

/// Axis-aligned rectangle, `y` grows downwards (screen convention).
#[derive(Clone, Debug, PartialEq, Copy)]
pub struct Rect {
    pub x_min: f32,
    pub y_min: f32,
    pub x_max: f32,
    pub y_max: f32,
}

impl Rect {
    pub fn try_new(x_min: f32, y_min: f32, x_max: f32, y_max: f32) -> Result<Self> {
        ensure!(
            x_min < x_max && y_min < y_max,
            "invalid rectangle, x_min: {x_min}, x_max: {x_max}, y_min: {y_min}, y_max: {y_max}"
        );
        Ok(Rect {
            x_min,
            y_min,
            x_max,
            y_max,
        })
    }

    /// Rectangle with its top-left corner at `top_left` spanning `width` by `height`.
    pub fn from_top_left(top_left: Point, width: f32, height: f32) -> Self {
        Rect {
            x_min: top_left.x(),
            y_min: top_left.y(),
            x_max: top_left.x() + width,
            y_max: top_left.y() + height,
        }
    }

    pub fn top_left(&self) -> Point {
        Point(self.x_min, self.y_min)
    }

    pub fn width(&self) -> f32 {
        self.x_max - self.x_min
    }

    pub fn height(&self) -> f32 {
        self.y_max - self.y_min
    }

    pub fn centroid(&self) -> Point {
        Point(
            (self.x_min + self.x_max) / 2.0,
            (self.y_min + self.y_max) / 2.0,
        )
    }

    pub fn area(&self) -> f32 {
        self.width() * self.height()
    }

    pub fn translate(self, dx: f32, dy: f32) -> Self {
        Rect {
            x_min: self.x_min + dx,
            y_min: self.y_min + dy,
            x_max: self.x_max + dx,
            y_max: self.y_max + dy,
        }
    }

    /// Returns a new rectangle grown by `d` on every side (shrunk if `d` is negative).
    /// If shrinking would invert the rectangle, it collapses onto its centroid instead.
    pub fn inflate(self, d: f32) -> Self {
        let Point(cx, cy) = self.centroid();
        Rect {
            x_min: f32::min(self.x_min - d, cx),
            y_min: f32::min(self.y_min - d, cy),
            x_max: f32::max(self.x_max + d, cx),
            y_max: f32::max(self.y_max + d, cy),
        }
    }

    /// Returns a new rectangle with all coordinates multiplied by `factor`.
    pub fn scale(self, factor: f32) -> Self {
        Rect {
            x_min: self.x_min * factor,
            y_min: self.y_min * factor,
            x_max: self.x_max * factor,
            y_max: self.y_max * factor,
        }
    }

    /// Returns the largest rectangle that is contained in both `a` and `b`.
    /// Rectangles that merely touch do not have an intersection.
    pub fn intersection(a: Rect, b: Rect) -> Option<Rect> {
        let x_min = f32::max(a.x_min, b.x_min);
        let y_min = f32::max(a.y_min, b.y_min);
        let x_max = f32::min(a.x_max, b.x_max);
        let y_max = f32::min(a.y_max, b.y_max);
        if x_min < x_max && y_min < y_max {
            Some(Rect {
                x_min,
                y_min,
                x_max,
                y_max,
            })
        } else {
            None
        }
    }

    /// Returns the smallest rectangle that contains both `a` and `b`.
    pub fn bounding_rect(a: Rect, b: Rect) -> Rect {
        Rect {
            x_min: f32::min(a.x_min, b.x_min),
            y_min: f32::min(a.y_min, b.y_min),
            x_max: f32::max(a.x_max, b.x_max),
            y_max: f32::max(a.y_max, b.y_max),
        }
    }

    /// True if `other` lies completely inside `self`, boundaries included.
    /// Coordinates within floating point tolerance of an edge count as on the edge.
    pub fn almost_contains(&self, other: &Rect) -> bool {
        FPA(self.x_min) <= FPA(other.x_min)
            && FPA(self.y_min) <= FPA(other.y_min)
            && FPA(self.x_max) >= FPA(other.x_max)
            && FPA(self.y_max) >= FPA(other.y_max)
    }

    /// Smallest translation `(dx, dy)` that moves `inner` inside `self`.
    /// When `inner` is wider (or taller) than `self`, it is aligned to the left (or top) edge.
    pub fn clamp_translation(&self, inner: &Rect) -> (f32, f32) {
        let axis = |lo: f32, hi: f32, in_lo: f32, in_hi: f32| -> f32 {
            if in_hi - in_lo > hi - lo || in_lo < lo {
                lo - in_lo
            } else if in_hi > hi {
                hi - in_hi
            } else {
                0.0
            }
        };
        (
            axis(self.x_min, self.x_max, inner.x_min, inner.x_max),
            axis(self.y_min, self.y_max, inner.y_min, inner.y_max),
        )
    }
}

impl CollidesWith<Rect> for Rect {
    #[inline(always)]
    fn collides_with(&self, other: &Rect) -> bool {
        f32::max(self.x_min, other.x_min) <= f32::min(self.x_max, other.x_max)
            && f32::max(self.y_min, other.y_min) <= f32::min(self.y_max, other.y_max)
    }
}

impl AlmostCollidesWith<Rect> for Rect {
    #[inline(always)]
    fn almost_collides_with(&self, other: &Rect) -> bool {
        FPA(f32::max(self.x_min, other.x_min)) <= FPA(f32::min(self.x_max, other.x_max))
            && FPA(f32::max(self.y_min, other.y_min)) <= FPA(f32::min(self.y_max, other.y_max))
    }
}

impl CollidesWith<Point> for Rect {
    #[inline(always)]
    fn collides_with(&self, point: &Point) -> bool {
        let Point(x, y) = *point;
        x >= self.x_min && x <= self.x_max && y >= self.y_min && y <= self.y_max
    }
}

use anyhow::{Result, ensure};
use itertools::Itertools;

use crate::geometry::Transformation;
use crate::geometry::geo_traits::{Bounded, Transformable};
use crate::geometry::primitives::{Point, Rect};

/// The true cut-out shape of a catalog contour.
///
/// One or more closed outlines, filled with the non-zero winding rule, expressed in the
/// contour's local millimetre coordinates. Holes are ordinary outlines with opposite winding.
#[derive(Clone, Debug, PartialEq)]
pub struct Silhouette {
    outlines: Vec<Vec<Point>>,
    bbox: Rect,
}

impl Silhouette {
    pub fn try_new(outlines: Vec<Vec<Point>>) -> Result<Self> {
        ensure!(!outlines.is_empty(), "silhouette needs at least one outline");
        ensure!(
            outlines.iter().all(|o| o.len() >= 3),
            "every outline needs at least three points"
        );
        ensure!(
            outlines
                .iter()
                .flatten()
                .all(|p| p.x().is_finite() && p.y().is_finite()),
            "silhouette contains non-finite coordinates"
        );
        let bbox = Self::compute_bbox(&outlines);
        ensure!(
            bbox.width() > 0.0 && bbox.height() > 0.0,
            "silhouette has a degenerate bounding box: {bbox:?}"
        );
        Ok(Silhouette { outlines, bbox })
    }

    pub fn from_rect(rect: Rect) -> Self {
        let Rect {
            x_min,
            y_min,
            x_max,
            y_max,
        } = rect;
        Silhouette {
            outlines: vec![vec![
                Point(x_min, y_min),
                Point(x_max, y_min),
                Point(x_max, y_max),
                Point(x_min, y_max),
            ]],
            bbox: rect,
        }
    }

    pub fn outlines(&self) -> &[Vec<Point>] {
        &self.outlines
    }

    pub fn width(&self) -> f32 {
        self.bbox.width()
    }

    pub fn height(&self) -> f32 {
        self.bbox.height()
    }

    fn compute_bbox(outlines: &[Vec<Point>]) -> Rect {
        let (x_min, x_max) = outlines
            .iter()
            .flatten()
            .map(|p| p.x())
            .minmax_by(|a, b| a.total_cmp(b))
            .into_option()
            .unwrap_or((0.0, 0.0));
        let (y_min, y_max) = outlines
            .iter()
            .flatten()
            .map(|p| p.y())
            .minmax_by(|a, b| a.total_cmp(b))
            .into_option()
            .unwrap_or((0.0, 0.0));
        Rect {
            x_min,
            y_min,
            x_max,
            y_max,
        }
    }
}

impl Bounded for Silhouette {
    fn bbox(&self) -> Rect {
        self.bbox
    }
}

impl Transformable for Silhouette {
    fn transform(&mut self, t: &Transformation) -> &mut Self {
        self.outlines
            .iter_mut()
            .flatten()
            .for_each(|p| {
                p.transform(t);
            });
        self.bbox = Self::compute_bbox(&self.outlines);
        self
    }
}

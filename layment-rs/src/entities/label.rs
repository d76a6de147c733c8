use crate::entities::PlacementId;
use crate::geometry::WorkspaceScale;
use crate::geometry::geo_traits::Rescalable;
use crate::geometry::primitives::{Point, Rect};
use crate::geometry::scale::to_workspace;
use crate::util::LabelConfig;

/// Free text attached to a placed contour.
///
/// Labels never rotate. The font size is expressed in real millimetres and does not follow the zoom.
#[derive(Clone, Debug, PartialEq)]
pub struct Label {
    pub placement_id: PlacementId,
    pub text: String,
    /// Top-left corner, in workspace units
    pub position: Point,
    pub font_size_mm: f32,
}

impl Label {
    /// Width and height of the text block in millimetres.
    pub fn size_mm(&self, cfg: &LabelConfig) -> (f32, f32) {
        let lines = self.text.lines().count().max(1);
        let longest = self
            .text
            .lines()
            .map(|l| l.chars().count())
            .max()
            .unwrap_or(0);
        (
            longest as f32 * self.font_size_mm * cfg.advance_ratio,
            lines as f32 * self.font_size_mm * cfg.line_height,
        )
    }

    pub fn bbox(&self, cfg: &LabelConfig, scale: WorkspaceScale) -> Rect {
        let (w, h) = self.size_mm(cfg);
        Rect::from_top_left(
            self.position,
            to_workspace(w, scale),
            to_workspace(h, scale),
        )
    }

    pub fn translate(&mut self, dx: f32, dy: f32) {
        self.position = self.position.translate(dx, dy);
    }
}

impl Rescalable for Label {
    fn rescale(&mut self, ratio: f32) {
        self.position.rescale(ratio);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn size_follows_longest_line() {
        let cfg = LabelConfig::default();
        let label = Label {
            placement_id: PlacementId(0),
            text: "abc\nabcdefghij".into(),
            position: Point(0.0, 0.0),
            font_size_mm: 5.0,
        };
        let (w, h) = label.size_mm(&cfg);
        assert!((w - 30.0).abs() < 1e-4);
        assert!((h - 11.6).abs() < 1e-4);
        let bbox = label.bbox(&cfg, WorkspaceScale::new(2.0).unwrap());
        assert!((bbox.width() - 60.0).abs() < 1e-4);
    }
}

use serde::{Deserialize, Serialize};

use crate::LaymentError;
use crate::geometry::WorkspaceScale;
use crate::geometry::primitives::{Point, Rect};
use crate::geometry::scale::to_workspace;
use crate::util::LaymentConfig;

/// The rectangular work surface everything is placed on.
///
/// Dimensions are stored in real millimetres. The workspace rectangle is derived from
/// the current [`WorkspaceScale`], so the layment follows every zoom change without
/// being rescaled itself.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Layment {
    pub width: f32,
    pub height: f32,
    /// Distance of the top-left corner from the workspace origin, along both axes
    pub offset: f32,
}

impl Layment {
    /// Creates a layment, enlarging sides below the configured minimum.
    pub fn new(width: f32, height: f32, cfg: &LaymentConfig) -> Self {
        Layment {
            width: f32::max(width, cfg.min_size),
            height: f32::max(height, cfg.min_size),
            offset: cfg.offset,
        }
    }

    pub fn from_preset(name: &str, cfg: &LaymentConfig) -> Result<Self, LaymentError> {
        cfg.presets
            .get(name)
            .map(|size| Layment::new(size.width, size.height, cfg))
            .ok_or_else(|| LaymentError::UnknownPreset(name.to_string()))
    }

    /// The layment replaced by one with new dimensions, keeping its offset.
    pub fn resized(&self, width: f32, height: f32, cfg: &LaymentConfig) -> Self {
        Layment {
            offset: self.offset,
            ..Layment::new(width, height, cfg)
        }
    }

    /// Top-left corner in workspace units
    pub fn origin(&self, scale: WorkspaceScale) -> Point {
        let o = to_workspace(self.offset, scale);
        Point(o, o)
    }

    /// The layment rectangle in workspace units
    pub fn rect(&self, scale: WorkspaceScale) -> Rect {
        Rect::from_top_left(
            self.origin(scale),
            to_workspace(self.width, scale),
            to_workspace(self.height, scale),
        )
    }

    /// The layment rectangle shrunk by `padding` (mm) on every side, in workspace units.
    pub fn safe_area(&self, padding: f32, scale: WorkspaceScale) -> Rect {
        self.rect(scale).inflate(-to_workspace(padding, scale))
    }

    pub fn area_m2(&self) -> f32 {
        self.width * self.height / 1_000_000.0
    }

    pub fn perimeter_m(&self) -> f32 {
        2.0 * (self.width + self.height) / 1000.0
    }

    /// Name of the preset matching the current dimensions, if any.
    pub fn matching_preset<'a>(&self, cfg: &'a LaymentConfig) -> Option<&'a str> {
        cfg.presets
            .iter()
            .find(|(_, s)| s.width == self.width && s.height == self.height)
            .map(|(name, _)| name.as_str())
    }
}

impl Default for Layment {
    fn default() -> Self {
        let cfg = LaymentConfig::default();
        Layment::new(cfg.default_width, cfg.default_height, &cfg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn enforces_minimum_size() {
        let cfg = LaymentConfig::default();
        let l = Layment::new(20.0, 400.0, &cfg);
        assert_eq!((l.width, l.height), (100.0, 400.0));
    }

    #[test]
    fn presets() {
        let cfg = LaymentConfig::default();
        let l = Layment::from_preset("MEDIUM", &cfg).unwrap();
        assert_eq!((l.width, l.height), (380.0, 375.0));
        assert_eq!(l.matching_preset(&cfg), Some("MEDIUM"));
        assert!(matches!(
            Layment::from_preset("HUGE", &cfg),
            Err(LaymentError::UnknownPreset(_))
        ));
    }

    #[test]
    fn workspace_rect_follows_scale() {
        let l = Layment::default();
        let s = WorkspaceScale::new(2.0).unwrap();
        assert_eq!(l.rect(s), Rect::try_new(40.0, 40.0, 1170.0, 790.0).unwrap());
        let safe = l.safe_area(8.0, WorkspaceScale::UNIT);
        assert_eq!(safe, Rect::try_new(28.0, 28.0, 577.0, 387.0).unwrap());
    }
}

use std::fmt::Display;

use serde::{Deserialize, Serialize};

use crate::util::FPA;

/// Converts a length in workspace units to real millimetres.
#[inline(always)]
pub fn to_real(px: f32, scale: WorkspaceScale) -> f32 {
    px / scale.value()
}

/// Converts a length in real millimetres to workspace units.
#[inline(always)]
pub fn to_workspace(mm: f32, scale: WorkspaceScale) -> f32 {
    mm * scale.value()
}

/// The zoom factor of the workspace: one real millimetre spans `scale` workspace units.
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WorkspaceScale(f32);

impl WorkspaceScale {
    pub const UNIT: WorkspaceScale = WorkspaceScale(1.0);

    /// Returns `None` for non-finite or non-positive factors.
    pub fn new(value: f32) -> Option<Self> {
        (value.is_finite() && value > 0.0).then_some(WorkspaceScale(value))
    }

    pub fn value(self) -> f32 {
        self.0
    }

    /// True if one workspace unit equals one millimetre (within floating point tolerance).
    pub fn is_unit(self) -> bool {
        FPA(self.0) == FPA(1.0)
    }

    /// Factor to multiply workspace coordinates with when switching from `self` to `target`.
    pub fn ratio_to(self, target: WorkspaceScale) -> f32 {
        target.0 / self.0
    }
}

impl Default for WorkspaceScale {
    fn default() -> Self {
        WorkspaceScale::UNIT
    }
}

impl Display for WorkspaceScale {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.0}%", self.0 * 100.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn conversions_are_inverse() {
        let s = WorkspaceScale::new(2.5).unwrap();
        assert_eq!(to_workspace(10.0, s), 25.0);
        assert_eq!(to_real(to_workspace(10.0, s), s), 10.0);
    }

    #[test]
    fn rejects_invalid_factors() {
        assert!(WorkspaceScale::new(0.0).is_none());
        assert!(WorkspaceScale::new(-1.0).is_none());
        assert!(WorkspaceScale::new(f32::INFINITY).is_none());
    }
}

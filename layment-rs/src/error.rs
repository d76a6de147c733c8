use thiserror::Error;

use crate::collision_detection::LayoutIssues;
use crate::entities::PlacementId;
use crate::geometry::WorkspaceScale;

/// Failures reported by the engine.
///
/// Constraint violations (oversized primitives, drifting labels) never show up here,
/// they are corrected by clamping.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LaymentError {
    #[error("catalog item `{0}` not found")]
    CatalogItemNotFound(String),
    #[error("no contour placed with id {0}")]
    UnknownPlacement(PlacementId),
    #[error("primitive no longer exists")]
    UnknownPrimitive,
    #[error("label no longer exists")]
    UnknownLabel,
    #[error("cannot validate at workspace scale {scale}, the layout must be at 100%")]
    ScaleNotUnit { scale: WorkspaceScale },
    #[error("workspace scale {scale} outside of allowed range [{min}, {max}]")]
    ScaleOutOfRange { scale: f32, min: f32, max: f32 },
    #[error("workspace schema version {found} is not supported (expected {expected})")]
    SchemaVersionMismatch { found: u32, expected: u32 },
    #[error("layout is not producible: {}", .0.message())]
    InvalidLayout(LayoutIssues),
    #[error("unsupported rotation angle: {0}")]
    UnsupportedAngle(f32),
    #[error("unknown layment preset `{0}`")]
    UnknownPreset(String),
    #[error("invalid shape: {0}")]
    InvalidShape(String),
}

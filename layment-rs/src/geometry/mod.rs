mod rotation;
mod transformation;

/// Traits shared by the geometric primitives
pub mod geo_traits;

/// Geometric primitives: points, rectangles and silhouettes
pub mod primitives;

/// Conversions between real millimetres and workspace units
pub mod scale;

#[doc(inline)]
pub use rotation::Rotation;
#[doc(inline)]
pub use scale::WorkspaceScale;
#[doc(inline)]
pub use transformation::Transformation;

#![doc = document_features::document_features!()]
//! Layout and validation engine for arranging catalog contours and parametric primitives
//! on a rectangular layment, validating the arrangement and exporting it in millimetres.

/// Boundary and clearance-aware collision validation
pub mod collision_detection;

/// Entities placed on the layment and the registries owning them
pub mod entities;

/// Geometric primitives, workspace scale and transformations
pub mod geometry;

/// Persisting workspaces, importing manifests and exporting orders
pub mod io;

/// Price preview of a layout
pub mod pricing;

/// Editing session combining a layout, a catalog and debounced persistence
pub mod session;

/// Helper functions which do not belong to any specific module
pub mod util;

mod error;

#[doc(inline)]
pub use error::LaymentError;

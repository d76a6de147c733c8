mod catalog;
mod command;
mod label;
mod label_registry;
mod layment;
mod layout;
mod placed_contour;
mod placement_registry;
mod primitive;
mod primitive_registry;

use slotmap::new_key_type;

#[doc(inline)]
pub use catalog::{Catalog, CatalogAssets, CatalogItem};
#[doc(inline)]
pub use command::{Capabilities, Command, CommandOutcome, EntityRef};
#[doc(inline)]
pub use label::Label;
#[doc(inline)]
pub use label_registry::{LabelRegistry, allowed_rect};
#[doc(inline)]
pub use layment::Layment;
#[doc(inline)]
pub use layout::Layout;
#[doc(inline)]
pub use placed_contour::{PlacedContour, PlacementId};
#[doc(inline)]
pub use placement_registry::PlacementRegistry;
#[doc(inline)]
pub use primitive::{Primitive, PrimitiveKind, PrimitiveShape};
#[doc(inline)]
pub use primitive_registry::{PrimitiveRegistry, ResizeOutcome};

new_key_type! {
    /// Unique key of a [`Primitive`] in its registry
    pub struct PrimitiveKey;
    /// Unique key of a [`Label`] in its registry
    pub struct LabelKey;
}

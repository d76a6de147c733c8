mod point;
mod rect;
mod silhouette;

#[doc(inline)]
pub use point::Point;
#[doc(inline)]
pub use rect::Rect;
#[doc(inline)]
pub use silhouette::Silhouette;

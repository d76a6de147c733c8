/// External (serializable) representations of catalogs, workspaces and orders.
pub mod ext_repr;

/// All logic for converting external representations into internal ones
pub mod import;

/// All logic for exporting internal representations into external ones
pub mod export;

/// Rendering layouts as SVG previews
pub mod svg;

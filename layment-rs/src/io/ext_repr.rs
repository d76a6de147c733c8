use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::pricing::PricePreview;

/// Version of the workspace document this engine reads and writes.
pub const SCHEMA_VERSION: u32 = 1;

/// External representation of a [`Catalog`](crate::entities::Catalog): the catalog manifest.
#[derive(Serialize, Deserialize, Clone, Debug, Default)]
pub struct ExtManifest {
    #[serde(default)]
    pub items: Vec<ExtCatalogItem>,
    /// Display names of the categories, keyed by category
    #[serde(default)]
    pub categories: BTreeMap<String, String>,
}

/// External representation of a [`CatalogItem`](crate::entities::CatalogItem).
#[derive(Serialize, Deserialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct ExtCatalogItem {
    /// Unique identifier of the item
    pub id: String,
    #[serde(default)]
    pub article: String,
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default = "enabled_by_default")]
    pub enabled: bool,
    /// Length of the cut path in metres
    #[serde(default)]
    pub cutting_length_meters: f32,
    /// Multiplicative scale, 1 if not specified
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scale_override: Option<f32>,
    #[serde(default)]
    pub assets: ExtAssets,
    /// Outline of the contour in millimetres, already extracted from its drawing
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shape: Option<ExtShape>,
    /// Width (mm) of contours without a shape
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<f32>,
    /// Height (mm) of contours without a shape
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<f32>,
}

fn enabled_by_default() -> bool {
    true
}

#[derive(Serialize, Deserialize, Clone, Debug, Default)]
pub struct ExtAssets {
    /// Drawing of the contour
    #[serde(default)]
    pub svg: String,
    /// Preview image
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preview: Option<String>,
}

/// Various ways to represent the outline of a contour
#[derive(Serialize, Deserialize, Clone, Debug)]
#[serde(tag = "type", content = "data")]
#[serde(rename_all = "snake_case")]
pub enum ExtShape {
    /// Axis-aligned rectangle with its top-left corner at (x_min, y_min), a width and height
    Rectangle {
        x_min: f32,
        y_min: f32,
        width: f32,
        height: f32,
    },
    /// A single closed outline
    SimplePolygon(ExtSPolygon),
    /// Several closed outlines filled with the non-zero rule, holes wind the other way
    MultiPolygon(Vec<ExtSPolygon>),
}

/// A closed outline as a list of vertices.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct ExtSPolygon(pub Vec<(f32, f32)>);

/// Persisted editing session, all coordinates in millimetres relative to the top-left of the layment.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ExtWorkspace {
    pub schema_version: u32,
    /// Moment of saving, as an RFC 3339 timestamp
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub saved_at: Option<String>,
    pub layment: ExtLayment,
    /// Always 1, coordinates are stored in real millimetres
    pub workspace_scale: f32,
    pub base_material_color: String,
    #[serde(default)]
    pub contours: Vec<ExtContour>,
    #[serde(default)]
    pub primitives: Vec<ExtPrimitive>,
    #[serde(default)]
    pub labels: Vec<ExtLabel>,
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
pub struct ExtLayment {
    pub width: f32,
    pub height: f32,
    pub offset: f32,
}

/// External representation of a [`PlacedContour`](crate::entities::PlacedContour).
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ExtContour {
    pub placement_id: u64,
    /// Catalog id
    pub id: String,
    pub article: String,
    /// Top-left of the rotated bounding box
    pub x: f32,
    pub y: f32,
    /// Rotation in degrees
    pub angle: f32,
    pub scale_override: f32,
}

/// External representation of a [`Primitive`](crate::entities::Primitive).
/// Rectangles are positioned by their top-left corner, circles by their centre.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ExtPrimitive {
    Rect {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
    },
    Circle {
        x: f32,
        y: f32,
        radius: f32,
    },
}

/// External representation of a [`Label`](crate::entities::Label).
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ExtLabel {
    pub placement_id: u64,
    pub text: String,
    pub x: f32,
    pub y: f32,
    pub font_size_mm: f32,
}

/// Order document submitted for production.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ExtExportDocument {
    pub order_meta: ExtOrderMeta,
    /// SVG preview of the layout
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub layout_svg: Option<String>,
    pub contours: Vec<ExtContour>,
    pub primitives: Vec<ExtPrimitive>,
    pub labels: Vec<ExtLabel>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ExtOrderMeta {
    pub width: f32,
    pub height: f32,
    /// Always `mm`
    pub units: String,
    /// Always `origin-top-left`
    pub coordinate_system: String,
    pub base_material_color: String,
    pub layment_type: LaymentType,
    pub price_preview: PricePreview,
    /// The full workspace, for traceability
    pub workspace_snapshot: ExtWorkspace,
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum LaymentType {
    /// Nothing is cut out
    Empty,
    WithTools,
}

/// Response of the order service to a submitted [`ExtExportDocument`].
#[derive(Serialize, Deserialize, Clone, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct ExtOrderResponse {
    #[serde(default)]
    pub order_id: Option<String>,
    #[serde(default)]
    pub price_preview: Option<ExtResponsePrice>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default)]
pub struct ExtResponsePrice {
    #[serde(default)]
    pub total: Option<i64>,
}

use crate::entities::{Layout, PrimitiveShape};
use crate::geometry::primitives::Point;
use crate::geometry::scale::to_real;
use crate::io::ext_repr::{
    ExtContour, ExtExportDocument, ExtLabel, ExtLayment, ExtOrderMeta, ExtOrderResponse,
    ExtPrimitive, ExtWorkspace, LaymentType, SCHEMA_VERSION,
};
use crate::pricing::PricePreview;
use crate::util::EngineConfig;

/// Converts a workspace position into whole millimetres relative to the top-left of the layment.
pub fn to_layment_mm(p: Point, layout: &Layout) -> (f32, f32) {
    let scale = layout.scale();
    let rel = p - layout.layment().origin(scale);
    (
        to_real(rel.x(), scale).round(),
        to_real(rel.y(), scale).round(),
    )
}

pub fn ext_contours(layout: &Layout) -> Vec<ExtContour> {
    layout
        .contours()
        .iter_with_metadata()
        .map(|(c, meta)| {
            let (x, y) = to_layment_mm(c.position, layout);
            ExtContour {
                placement_id: c.id.0,
                id: c.catalog_id.clone(),
                article: meta.article.clone(),
                x,
                y,
                angle: c.rotation.into(),
                scale_override: c.scale_override,
            }
        })
        .collect()
}

pub fn ext_primitives(layout: &Layout) -> Vec<ExtPrimitive> {
    let scale = layout.scale();
    layout
        .primitives()
        .iter()
        .map(|(_, p)| {
            let (x, y) = to_layment_mm(p.position, layout);
            match p.shape {
                PrimitiveShape::Rect { width, height } => ExtPrimitive::Rect {
                    x,
                    y,
                    width: to_real(width, scale).round(),
                    height: to_real(height, scale).round(),
                },
                PrimitiveShape::Circle { radius } => ExtPrimitive::Circle {
                    x,
                    y,
                    radius: to_real(radius, scale).round(),
                },
            }
        })
        .collect()
}

pub fn ext_labels(layout: &Layout) -> Vec<ExtLabel> {
    layout
        .labels()
        .iter()
        .map(|(_, l)| {
            let (x, y) = to_layment_mm(l.position, layout);
            ExtLabel {
                placement_id: l.placement_id.0,
                text: l.text.clone(),
                x,
                y,
                font_size_mm: l.font_size_mm,
            }
        })
        .collect()
}

/// Creates the round-trippable workspace document of `layout`.
pub fn workspace_document(layout: &Layout) -> ExtWorkspace {
    let layment = layout.layment();
    ExtWorkspace {
        schema_version: SCHEMA_VERSION,
        saved_at: None,
        layment: ExtLayment {
            width: layment.width.round(),
            height: layment.height.round(),
            offset: layment.offset,
        },
        workspace_scale: 1.0,
        base_material_color: layout.base_material_color.clone(),
        contours: ext_contours(layout),
        primitives: ext_primitives(layout),
        labels: ext_labels(layout),
    }
}

/// Creates the order document of `layout`. Does not validate, see [`Layout::export`].
pub fn export_document(
    layout: &Layout,
    cfg: &EngineConfig,
    layout_svg: Option<String>,
) -> ExtExportDocument {
    let workspace = workspace_document(layout);
    let ExtLayment { width, height, .. } = workspace.layment;

    let contour_lengths = layout
        .contours()
        .iter_with_metadata()
        .map(|(c, meta)| (c.catalog_id.as_str(), Some(meta.cutting_length_meters)));
    let price_preview = PricePreview::compute(
        width,
        height,
        contour_lengths,
        &workspace.primitives,
        &cfg.pricing,
    );
    let layment_type = match layout.is_empty() {
        true => LaymentType::Empty,
        false => LaymentType::WithTools,
    };

    ExtExportDocument {
        order_meta: ExtOrderMeta {
            width,
            height,
            units: "mm".to_string(),
            coordinate_system: "origin-top-left".to_string(),
            base_material_color: layout.base_material_color.clone(),
            layment_type,
            price_preview,
            workspace_snapshot: workspace.clone(),
        },
        layout_svg,
        contours: workspace.contours,
        primitives: workspace.primitives,
        labels: workspace.labels,
    }
}

/// What the user is shown after an order was accepted.
#[derive(Clone, Debug, PartialEq)]
pub struct OrderReceipt {
    pub order_id: Option<String>,
    pub width: f32,
    pub height: f32,
    /// Price confirmed by the order service, or the preview if it did not return one
    pub total: i64,
}

impl OrderReceipt {
    pub fn from_response(response: &ExtOrderResponse, submitted: &ExtExportDocument) -> Self {
        let meta = &submitted.order_meta;
        let total = response
            .price_preview
            .as_ref()
            .and_then(|p| p.total)
            .unwrap_or(meta.price_preview.total);
        OrderReceipt {
            order_id: response.order_id.clone(),
            width: meta.width,
            height: meta.height,
            total,
        }
    }
}

/// Bounding box of a primitive in layment millimetres, as exported.
pub fn primitive_extent(p: &ExtPrimitive) -> (f32, f32, f32, f32) {
    match *p {
        ExtPrimitive::Rect {
            x,
            y,
            width,
            height,
        } => (x, y, x + width, y + height),
        ExtPrimitive::Circle { x, y, radius } => (x - radius, y - radius, x + radius, y + radius),
    }
}

use std::f64::consts::PI;

use serde::{Deserialize, Serialize};

use crate::entities::Catalog;
use crate::io::ext_repr::{ExtExportDocument, ExtPrimitive};
use crate::util::PricingConfig;

/// Estimated price of a layment, as shown before ordering.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PricePreview {
    pub material: i64,
    pub cutting: i64,
    pub total: i64,
    /// Total length of all cut paths, in metres
    pub cutting_meters: f64,
    pub area_m2: f64,
    /// Contours whose cutting length is unknown, left out of the price
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub missing_contour_ids: Vec<String>,
}

impl PricePreview {
    /// Computes the price of a `width` by `height` (mm) layment.
    ///
    /// * `contours` - catalog id of every placed contour with its cutting length (m), if known
    /// * `primitives` - the primitives, in millimetres
    pub fn compute<'a>(
        width: f32,
        height: f32,
        contours: impl IntoIterator<Item = (&'a str, Option<f32>)>,
        primitives: &[ExtPrimitive],
        cfg: &PricingConfig,
    ) -> Self {
        let (width, height) = (width as f64, height as f64);
        let area_m2 = width * height / 1_000_000.0;
        let material = (area_m2 * cfg.waste_k as f64 * cfg.material_price_per_m2 as f64).round();

        let perimeter_m = 2.0 * (width + height) / 1000.0;
        let mut missing_contour_ids = vec![];
        let mut contour_meters = 0.0;
        for (id, length) in contours {
            match length {
                Some(l) => contour_meters += l as f64,
                None => missing_contour_ids.push(id.to_string()),
            }
        }
        let tool = cfg.tool_diameter_mm as f64;
        let primitive_meters: f64 = primitives
            .iter()
            .map(|p| match *p {
                ExtPrimitive::Rect { width, height, .. } => {
                    rect_toolpath_meters(width as f64, height as f64, tool)
                }
                ExtPrimitive::Circle { radius, .. } => circle_toolpath_meters(radius as f64, tool),
            })
            .sum();

        let cutting_meters =
            cfg.layment_passes as f64 * perimeter_m + contour_meters + primitive_meters;
        let cutting = (cutting_meters * cfg.cutting_price_per_meter as f64).round();
        let total = ((material + cutting) * cfg.rrc_multiplier as f64).round();

        PricePreview {
            material: material as i64,
            cutting: cutting as i64,
            total: total as i64,
            cutting_meters,
            area_m2,
            missing_contour_ids,
        }
    }

    /// Recomputes the price of a submitted order, looking up cutting lengths in `catalog`.
    pub fn for_document(doc: &ExtExportDocument, catalog: &Catalog, cfg: &PricingConfig) -> Self {
        let contours = doc.contours.iter().map(|c| {
            let length = catalog.get(&c.id).map(|i| i.cutting_length_meters);
            (c.id.as_str(), length)
        });
        PricePreview::compute(
            doc.order_meta.width,
            doc.order_meta.height,
            contours,
            &doc.primitives,
            cfg,
        )
    }
}

/// Length (m) of the pocketing toolpath of a rectangle: shrinking roughing loops plus a finishing pass.
pub fn rect_toolpath_meters(width: f64, height: f64, tool_diameter: f64) -> f64 {
    let half_tool = tool_diameter / 2.0;
    if width <= 0.0 || height <= 0.0 || !(half_tool > 0.0) {
        return 0.0;
    }
    let step = half_tool;
    let rough_offset = half_tool + 1.0;

    let (mut x_min, mut y_min) = (rough_offset, rough_offset);
    let (mut x_max, mut y_max) = (width - rough_offset, height - rough_offset);
    let mut total = 0.0;
    while x_min < x_max && y_min < y_max {
        total += 2.0 * ((x_max - x_min) + (y_max - y_min)) / 1000.0;
        x_min += step;
        y_min += step;
        x_max -= step;
        y_max -= step;
    }

    let (finish_w, finish_h) = (width - 2.0 * half_tool, height - 2.0 * half_tool);
    if finish_w > 0.0 && finish_h > 0.0 {
        total += 2.0 * (finish_w + finish_h) / 1000.0;
    }
    total
}

/// Length (m) of the pocketing toolpath of a circle: growing roughing rings plus a finishing ring.
pub fn circle_toolpath_meters(radius: f64, tool_diameter: f64) -> f64 {
    let half_tool = tool_diameter / 2.0;
    let finish_radius = radius - half_tool;
    if radius <= 0.0 || finish_radius <= 0.0 || !(half_tool > 0.0) {
        return 0.0;
    }
    let rough_limit = radius - 3.0;
    let mut total = 0.0;
    let mut r = half_tool;
    while r <= rough_limit && r <= finish_radius {
        total += 2.0 * PI * r / 1000.0;
        r += half_tool;
    }
    total + 2.0 * PI * finish_radius / 1000.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rect_pocket_length() {
        // 7 roughing loops of 168..24 mm plus a 44x44 finishing pass
        let m = rect_toolpath_meters(50.0, 50.0, 6.0);
        assert!((m - 0.848).abs() < 1e-9);
        assert_eq!(rect_toolpath_meters(0.0, 50.0, 6.0), 0.0);
    }

    #[test]
    fn circle_pocket_length() {
        // roughing rings at r = 3, 6, .., 21 and a finishing ring at r = 22
        let expected = 2.0 * PI * (84.0 + 22.0) / 1000.0;
        assert!((circle_toolpath_meters(25.0, 6.0) - expected).abs() < 1e-9);
        assert_eq!(circle_toolpath_meters(2.0, 6.0), 0.0);
    }

    #[test]
    fn degenerate_tool_has_no_toolpath() {
        assert_eq!(rect_toolpath_meters(50.0, 50.0, 0.0), 0.0);
        assert_eq!(rect_toolpath_meters(50.0, 50.0, -6.0), 0.0);
        assert_eq!(circle_toolpath_meters(25.0, 0.0), 0.0);
        assert_eq!(circle_toolpath_meters(25.0, f64::NAN), 0.0);
    }

    #[test]
    fn empty_layment_price() {
        let cfg = PricingConfig::default();
        let p = PricePreview::compute(565.0, 375.0, [], &[], &cfg);
        assert_eq!((p.material, p.cutting, p.total), (636, 85, 1082));
    }

    #[test]
    fn unknown_contours_are_listed() {
        let cfg = PricingConfig::default();
        let contours = [("a", Some(1.0)), ("ghost", None)];
        let with = PricePreview::compute(565.0, 375.0, contours, &[], &cfg);
        let without = PricePreview::compute(565.0, 375.0, [], &[], &cfg);
        assert_eq!(with.missing_contour_ids, vec!["ghost".to_string()]);
        assert!((with.cutting_meters - without.cutting_meters - 1.0).abs() < 1e-6);
    }
}

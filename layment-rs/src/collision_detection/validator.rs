use itertools::Itertools;
use log::{error, info, trace, warn};

use crate::LaymentError;
use crate::collision_detection::{Rasterizer, ValidationReport};
use crate::entities::{Layout, PlacedContour, PlacementId};
use crate::geometry::geo_traits::{Bounded, CollidesWith};
use crate::geometry::primitives::Rect;
use crate::geometry::scale::to_workspace;
use crate::util::EngineConfig;

/// Checks whether `layout` can be produced.
///
/// * every contour and primitive must lie inside the safe area of the layment (touching its edge is fine)
/// * the silhouettes of every two contours must stay at least the clearance apart
///
/// Contour pairs whose bounding boxes, grown by the clearance, do not even overlap are skipped.
/// Remaining pairs are rendered by `rasterizer`, each silhouette dilated by half the clearance,
/// and collide when any pixel carries ink in both renders.
/// Primitives are only checked against the boundary.
///
/// Refuses to run unless the layout is at scale 1.0.
pub fn validate(
    layout: &Layout,
    rasterizer: &impl Rasterizer,
    cfg: &EngineConfig,
) -> Result<ValidationReport, LaymentError> {
    let scale = layout.scale();
    if !scale.is_unit() {
        error!("[VAL] refusing to validate at workspace scale {scale}");
        return Err(LaymentError::ScaleNotUnit { scale });
    }

    let safe_area = layout.layment().safe_area(cfg.layment.padding, scale);
    let clearance = to_workspace(cfg.clearance, scale);
    let mut report = ValidationReport::default();

    // boundary phase
    let placed = layout
        .contours()
        .iter()
        .map(|c| (c, c.bbox(scale)))
        .collect_vec();
    report.out_of_bounds_contours = placed
        .iter()
        .filter(|(_, bbox)| !safe_area.almost_contains(bbox))
        .map(|(c, _)| c.id)
        .collect();
    report.out_of_bounds_primitives = layout
        .primitives()
        .iter()
        .filter(|(_, p)| !safe_area.almost_contains(&p.bbox()))
        .map(|(k, _)| k)
        .collect();

    // broad phase
    for ((a, bbox_a), (b, bbox_b)) in placed.iter().tuple_combinations() {
        let grown_a = bbox_a.inflate(clearance);
        let grown_b = bbox_b.inflate(clearance);
        if !grown_a.collides_with(&grown_b) {
            continue;
        }
        let Some(region) = Rect::intersection(grown_a, grown_b) else {
            trace!("[VAL] {} and {} only touch", a.id, b.id);
            continue;
        };

        // narrow phase
        match silhouettes_collide(layout, a, b, region, rasterizer, cfg) {
            Ok(true) => {
                trace!("[VAL] {} and {} are too close", a.id, b.id);
                report.colliding_pairs.push((a.id, b.id));
            }
            Ok(false) => trace!("[VAL] {} and {} keep their distance", a.id, b.id),
            Err(unchecked) => {
                if !report.unchecked_contours.contains(&unchecked) {
                    report.unchecked_contours.push(unchecked);
                }
            }
        }
    }

    info!(
        "[VAL] {} contour(s), {} primitive(s): {:?}",
        placed.len(),
        layout.primitives().len(),
        report.issues()
    );
    Ok(report)
}

/// Renders both dilated silhouettes into `region` and compares them pixel by pixel.
/// Returns the id of a contour that could not be rendered as error.
fn silhouettes_collide(
    layout: &Layout,
    a: &PlacedContour,
    b: &PlacedContour,
    region: Rect,
    rasterizer: &impl Rasterizer,
    cfg: &EngineConfig,
) -> Result<bool, PlacementId> {
    let scale = layout.scale();
    let dilation = to_workspace(cfg.clearance, scale) / 2.0;

    let render = |c: &PlacedContour| {
        let silhouette = layout
            .contours()
            .metadata(c.id)
            .and_then(|m| m.silhouette.as_ref());
        let Some(silhouette) = silhouette else {
            warn!("[VAL] {} ({}) has no geometry, skipping", c.id, c.catalog_id);
            return Err(c.id);
        };
        let transform = c.transformation(silhouette, scale);
        rasterizer
            .render_dilated_silhouette(silhouette, &transform, dilation, region)
            .ok_or_else(|| {
                warn!("[VAL] could not rasterize {}, skipping", c.id);
                c.id
            })
    };

    let bitmap_a = render(a)?;
    let bitmap_b = render(b)?;
    Ok(bitmap_a.overlaps(&bitmap_b, cfg.raster.alpha_threshold))
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;
    use crate::collision_detection::Bitmap;
    use crate::entities::{Catalog, CatalogAssets, CatalogItem};
    use crate::geometry::Transformation;
    use crate::geometry::primitives::{Point, Silhouette};

    /// Inks the whole viewport and counts its invocations
    #[derive(Default)]
    struct FloodRasterizer {
        calls: Cell<usize>,
    }

    impl Rasterizer for FloodRasterizer {
        fn render_dilated_silhouette(
            &self,
            _silhouette: &Silhouette,
            _transform: &Transformation,
            _dilation: f32,
            viewport: Rect,
        ) -> Option<Bitmap> {
            self.calls.set(self.calls.get() + 1);
            let (w, h) = Bitmap::dimensions_for(&viewport);
            Bitmap::new(w, h, vec![255; (w * h) as usize])
        }
    }

    fn catalog() -> Catalog {
        let square = Rect::try_new(0.0, 0.0, 50.0, 50.0).unwrap();
        let item = |id: &str, silhouette: Option<Silhouette>| CatalogItem {
            id: id.into(),
            article: id.into(),
            name: id.into(),
            category: None,
            enabled: true,
            cutting_length_meters: 0.2,
            scale_override: 1.0,
            assets: CatalogAssets::default(),
            silhouette,
            size: (50.0, 50.0),
        };
        Catalog::new([
            item("square", Some(Silhouette::from_rect(square))),
            item("blank", None),
        ])
    }

    #[test]
    fn far_apart_pairs_are_never_rasterized() {
        let cfg = EngineConfig::default();
        let catalog = catalog();
        let mut layout = Layout::default();
        layout.place_contour(&catalog, "square", Some(Point(50.0, 50.0))).unwrap();
        layout.place_contour(&catalog, "square", Some(Point(200.0, 50.0))).unwrap();

        let rasterizer = FloodRasterizer::default();
        let report = validate(&layout, &rasterizer, &cfg).unwrap();
        assert_eq!(rasterizer.calls.get(), 0);
        assert!(report.is_ok());
    }

    #[test]
    fn touching_grown_boxes_short_circuit() {
        let cfg = EngineConfig::default();
        let catalog = catalog();
        let mut layout = Layout::default();
        // gap of exactly two clearances: grown boxes share an edge only
        layout.place_contour(&catalog, "square", Some(Point(50.0, 50.0))).unwrap();
        layout.place_contour(&catalog, "square", Some(Point(112.0, 50.0))).unwrap();

        let rasterizer = FloodRasterizer::default();
        let report = validate(&layout, &rasterizer, &cfg).unwrap();
        assert_eq!(rasterizer.calls.get(), 0);
        assert!(report.colliding_pairs.is_empty());
    }

    #[test]
    fn close_pairs_go_through_the_rasterizer() {
        let cfg = EngineConfig::default();
        let catalog = catalog();
        let mut layout = Layout::default();
        let a = layout.place_contour(&catalog, "square", Some(Point(50.0, 50.0))).unwrap();
        let b = layout.place_contour(&catalog, "square", Some(Point(105.0, 50.0))).unwrap();

        let rasterizer = FloodRasterizer::default();
        let report = validate(&layout, &rasterizer, &cfg).unwrap();
        assert_eq!(rasterizer.calls.get(), 2);
        assert_eq!(report.colliding_pairs, vec![(a, b)]);
        assert_eq!(report.issues().collision_contours, 2);
    }

    #[test]
    fn contours_without_geometry_are_skipped() {
        let cfg = EngineConfig::default();
        let catalog = catalog();
        let mut layout = Layout::default();
        layout.place_contour(&catalog, "square", Some(Point(50.0, 50.0))).unwrap();
        let blank = layout.place_contour(&catalog, "blank", Some(Point(60.0, 60.0))).unwrap();

        let report = validate(&layout, &FloodRasterizer::default(), &cfg).unwrap();
        assert!(report.colliding_pairs.is_empty());
        assert_eq!(report.unchecked_contours, vec![blank]);
    }

    #[test]
    fn refuses_non_unit_scale() {
        let cfg = EngineConfig::default();
        let mut layout = Layout::default();
        layout.set_scale(2.0, &cfg).unwrap();
        let rasterizer = FloodRasterizer::default();
        assert!(matches!(
            validate(&layout, &rasterizer, &cfg),
            Err(LaymentError::ScaleNotUnit { .. })
        ));
        // check() takes care of the scale itself
        assert!(layout.check(&rasterizer, &cfg).is_ok());
        assert_eq!(layout.scale().value(), 2.0);
    }
}

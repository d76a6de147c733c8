use std::collections::HashSet;

use anyhow::{Result, bail, ensure};
use float_cmp::approx_eq;
use itertools::Itertools;
use log::{info, warn};

use crate::LaymentError;
use crate::entities::{
    Catalog, CatalogAssets, CatalogItem, Label, Layment, Layout, PlacementId, PrimitiveShape,
};
use crate::geometry::Rotation;
use crate::geometry::primitives::{Point, Rect, Silhouette};
use crate::io::ext_repr::{
    ExtCatalogItem, ExtManifest, ExtPrimitive, ExtSPolygon, ExtShape, ExtWorkspace,
    SCHEMA_VERSION,
};
use crate::util::EngineConfig;

/// Converts the external representation of a catalog item into an internal one.
pub fn import_catalog_item(ext_item: &ExtCatalogItem) -> Result<CatalogItem> {
    let silhouette = match &ext_item.shape {
        Some(ExtShape::Rectangle {
            x_min,
            y_min,
            width,
            height,
        }) => {
            let rect = Rect::try_new(*x_min, *y_min, x_min + width, y_min + height)?;
            Some(Silhouette::from_rect(rect))
        }
        Some(ExtShape::SimplePolygon(esp)) => Some(Silhouette::try_new(vec![
            import_simple_polygon(esp)?,
        ])?),
        Some(ExtShape::MultiPolygon(esps)) => {
            let outlines = esps
                .iter()
                .map(import_simple_polygon)
                .collect::<Result<Vec<_>>>()?;
            Some(Silhouette::try_new(outlines)?)
        }
        None => None,
    };

    let size = match (&silhouette, ext_item.width, ext_item.height) {
        (Some(s), _, _) => (s.width(), s.height()),
        (None, Some(w), Some(h)) => {
            ensure!(
                w > 0.0 && h > 0.0,
                "item {} has a non-positive size: {w} x {h}",
                ext_item.id
            );
            (w, h)
        }
        (None, _, _) => bail!("item {} has neither a shape nor a size", ext_item.id),
    };

    let scale_override = ext_item.scale_override.unwrap_or(1.0);
    ensure!(
        scale_override.is_finite() && scale_override > 0.0,
        "item {} has an invalid scale override: {scale_override}",
        ext_item.id
    );

    Ok(CatalogItem {
        id: ext_item.id.clone(),
        article: ext_item.article.clone(),
        name: ext_item.name.clone(),
        category: ext_item.category.clone(),
        enabled: ext_item.enabled,
        cutting_length_meters: ext_item.cutting_length_meters,
        scale_override,
        assets: CatalogAssets {
            svg: ext_item.assets.svg.clone(),
            preview: ext_item.assets.preview.clone(),
        },
        silhouette,
        size,
    })
}

/// Builds a [`Catalog`] from a manifest. Items that cannot be imported are logged and left out.
pub fn import_manifest(manifest: &ExtManifest) -> Catalog {
    let items = manifest
        .items
        .iter()
        .filter_map(|ext_item| match import_catalog_item(ext_item) {
            Ok(item) => Some(item),
            Err(e) => {
                warn!("[IMPORT] skipping catalog item {}: {e}", ext_item.id);
                None
            }
        })
        .collect_vec();
    let mut catalog = Catalog::new(items);
    catalog.categories = manifest.categories.clone();
    info!(
        "[IMPORT] catalog with {} item(s) ({} enabled)",
        catalog.len(),
        catalog.enabled().count()
    );
    catalog
}

pub fn import_simple_polygon(sp: &ExtSPolygon) -> Result<Vec<Point>> {
    let mut points = sp.0.iter().map(|(x, y)| Point(*x, *y)).collect_vec();
    //Strip the last vertex if it is the same as the first one
    if points.len() > 1 && points[0] == points[points.len() - 1] {
        points.pop();
    }
    //Remove duplicates that are consecutive (e.g. [1, 2, 2, 3] -> [1, 2, 3])
    points.dedup_by(|a, b| approx_eq!(f32, a.0, b.0) && approx_eq!(f32, a.1, b.1));
    ensure!(
        points.len() >= 3,
        "outline has fewer than three distinct vertices"
    );
    Ok(points)
}

/// What [`restore`] reinstated and what it had to leave out.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RestoreSummary {
    pub contours: usize,
    pub primitives: usize,
    pub labels: usize,
    /// Catalog ids that could not be resolved
    pub unknown_catalog_ids: Vec<String>,
    /// Placements left out because their id or angle was invalid
    pub rejected_placements: Vec<PlacementId>,
    /// Labels whose contour was not restored
    pub orphaned_labels: usize,
}

impl RestoreSummary {
    pub fn is_complete(&self) -> bool {
        self.unknown_catalog_ids.is_empty()
            && self.rejected_placements.is_empty()
            && self.orphaned_labels == 0
    }
}

/// Replaces the contents of `layout` by the workspace document `doc`.
///
/// Documents of another schema version are refused before anything is touched.
/// Contours of unknown catalog items and labels without a contour are skipped with a warning.
/// Placement ids are reinstated and the id counter never goes down.
pub fn restore(
    layout: &mut Layout,
    doc: &ExtWorkspace,
    catalog: &Catalog,
    cfg: &EngineConfig,
) -> Result<RestoreSummary, LaymentError> {
    if doc.schema_version != SCHEMA_VERSION {
        return Err(LaymentError::SchemaVersionMismatch {
            found: doc.schema_version,
            expected: SCHEMA_VERSION,
        });
    }
    if doc.workspace_scale != 1.0 {
        warn!(
            "[IMPORT] workspace saved at scale {}, coordinates are read as millimetres",
            doc.workspace_scale
        );
    }

    let summary = layout.with_scale_one(|layout| {
        let mut summary = RestoreSummary::default();
        layout.clear();
        layout.layment = Layment {
            offset: doc.layment.offset,
            ..Layment::new(doc.layment.width, doc.layment.height, &cfg.layment)
        };
        layout.base_material_color = doc.base_material_color.clone();
        let scale = layout.scale();
        let origin = layout.layment.origin(scale);

        let mut seen = HashSet::new();
        for ext in &doc.contours {
            let id = PlacementId(ext.placement_id);
            let Some(item) = catalog.get(&ext.id) else {
                warn!("[IMPORT] unknown catalog id {:?} for {id}, skipping", ext.id);
                summary.unknown_catalog_ids.push(ext.id.clone());
                continue;
            };
            if !seen.insert(id) {
                warn!("[IMPORT] duplicate placement id {id}, skipping");
                summary.rejected_placements.push(id);
                continue;
            }
            let Some(rotation) = Rotation::normalize(ext.angle) else {
                warn!("[IMPORT] unsupported angle {} for {id}, skipping", ext.angle);
                summary.rejected_placements.push(id);
                continue;
            };
            let scale_override = match ext.scale_override > 0.0 {
                true => ext.scale_override,
                false => item.scale_override,
            };
            layout.contours.place_with_id(
                id,
                item.clone(),
                origin.translate(ext.x, ext.y),
                rotation,
                scale_override,
            );
            summary.contours += 1;
        }

        for ext in &doc.primitives {
            let (shape, position) = match *ext {
                ExtPrimitive::Rect {
                    x,
                    y,
                    width,
                    height,
                } => (PrimitiveShape::Rect { width, height }, origin.translate(x, y)),
                ExtPrimitive::Circle { x, y, radius } => {
                    (PrimitiveShape::Circle { radius }, origin.translate(x, y))
                }
            };
            layout
                .primitives
                .add(shape, position, scale, &cfg.primitives);
            summary.primitives += 1;
        }

        for ext in &doc.labels {
            let owner = PlacementId(ext.placement_id);
            if layout.contours.get(owner).is_none() {
                warn!("[IMPORT] label {:?} refers to missing {owner}, skipping", ext.text);
                summary.orphaned_labels += 1;
                continue;
            }
            let key = layout.labels.insert(Label {
                placement_id: owner,
                text: ext.text.clone(),
                position: origin.translate(ext.x, ext.y),
                font_size_mm: ext.font_size_mm,
            });
            layout
                .labels
                .clamp_to_owner(key, &layout.contours, scale, cfg)?;
            summary.labels += 1;
        }
        Ok::<_, LaymentError>(summary)
    })?;

    info!(
        "[IMPORT] restored {} contour(s), {} primitive(s), {} label(s)",
        summary.contours, summary.primitives, summary.labels
    );
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::ext_repr::{ExtAssets, ExtContour, ExtLabel, ExtLayment};

    fn ext_item(id: &str, shape: Option<ExtShape>, size: Option<(f32, f32)>) -> ExtCatalogItem {
        ExtCatalogItem {
            id: id.into(),
            article: format!("ART-{id}"),
            name: id.into(),
            category: None,
            enabled: true,
            cutting_length_meters: 0.5,
            scale_override: None,
            assets: ExtAssets::default(),
            shape,
            width: size.map(|s| s.0),
            height: size.map(|s| s.1),
        }
    }

    #[test]
    fn items_need_a_shape_or_a_size() {
        let polygon = ExtShape::SimplePolygon(ExtSPolygon(vec![
            (0.0, 0.0),
            (40.0, 0.0),
            (40.0, 40.0),
            (40.0, 40.0),
            (0.0, 0.0),
        ]));
        let item = import_catalog_item(&ext_item("tri", Some(polygon), None)).unwrap();
        assert_eq!(item.size, (40.0, 40.0));
        assert_eq!(item.silhouette.unwrap().outlines()[0].len(), 3);

        let boxed = import_catalog_item(&ext_item("box", None, Some((30.0, 20.0)))).unwrap();
        assert!(boxed.silhouette.is_none());
        assert_eq!(boxed.footprint(1.0), (30.0, 20.0));

        assert!(import_catalog_item(&ext_item("void", None, None)).is_err());
    }

    #[test]
    fn manifest_skips_broken_items() {
        let manifest = ExtManifest {
            items: vec![
                ext_item("ok", None, Some((10.0, 10.0))),
                ext_item("broken", None, None),
            ],
            categories: [("hand".to_string(), "Hand tools".to_string())].into(),
        };
        let catalog = import_manifest(&manifest);
        assert_eq!(catalog.len(), 1);
        assert!(catalog.get("ok").is_some());
        assert_eq!(catalog.categories["hand"], "Hand tools");
    }

    fn document(contours: Vec<ExtContour>, labels: Vec<ExtLabel>) -> ExtWorkspace {
        ExtWorkspace {
            schema_version: SCHEMA_VERSION,
            saved_at: None,
            layment: ExtLayment {
                width: 400.0,
                height: 300.0,
                offset: 20.0,
            },
            workspace_scale: 1.0,
            base_material_color: "blue".into(),
            contours,
            primitives: vec![ExtPrimitive::Rect {
                x: 10.0,
                y: 10.0,
                width: 2.0,
                height: 50.0,
            }],
            labels,
        }
    }

    fn contour(placement_id: u64, id: &str, angle: f32) -> ExtContour {
        ExtContour {
            placement_id,
            id: id.into(),
            article: String::new(),
            x: 30.0,
            y: 40.0,
            angle,
            scale_override: 1.0,
        }
    }

    #[test]
    fn restore_skips_what_it_cannot_resolve() {
        let catalog = Catalog::new([import_catalog_item(&ext_item("ok", None, Some((50.0, 20.0)))).unwrap()]);
        let doc = document(
            vec![
                contour(7, "ok", -90.0),
                contour(8, "gone", 0.0),
                contour(9, "ok", 45.0),
            ],
            vec![
                ExtLabel {
                    placement_id: 7,
                    text: "A".into(),
                    x: 85.0,
                    y: 40.0,
                    font_size_mm: 5.0,
                },
                ExtLabel {
                    placement_id: 8,
                    text: "B".into(),
                    x: 0.0,
                    y: 0.0,
                    font_size_mm: 5.0,
                },
            ],
        );
        let mut layout = Layout::default();
        let summary = restore(&mut layout, &doc, &catalog, &EngineConfig::default()).unwrap();

        assert_eq!(summary.contours, 1);
        assert_eq!(summary.unknown_catalog_ids, vec!["gone".to_string()]);
        assert_eq!(summary.rejected_placements, vec![PlacementId(9)]);
        assert_eq!(summary.orphaned_labels, 1);
        assert!(!summary.is_complete());

        let restored = layout.contours().get(PlacementId(7)).unwrap();
        assert_eq!(restored.rotation, Rotation::Deg270);
        assert_eq!(restored.position, Point(50.0, 60.0));
        assert_eq!(layout.contours().next_id(), PlacementId(8));
        assert_eq!(layout.base_material_color, "blue");
        // rectangle width clamped to the minimum
        let (_, primitive) = layout.primitives().iter().next().unwrap();
        assert_eq!(primitive.shape, PrimitiveShape::Rect { width: 8.0, height: 50.0 });
    }

    #[test]
    fn schema_mismatch_leaves_layout_untouched() {
        let catalog = Catalog::default();
        let mut doc = document(vec![], vec![]);
        doc.schema_version = 2;
        let mut layout = Layout::default();
        layout.add_primitive(
            PrimitiveShape::Circle { radius: 10.0 },
            None,
            &EngineConfig::default(),
        );
        let err = restore(&mut layout, &doc, &catalog, &EngineConfig::default());
        assert_eq!(
            err,
            Err(LaymentError::SchemaVersionMismatch {
                found: 2,
                expected: 1
            })
        );
        assert_eq!(layout.primitives().len(), 1);
        assert_eq!(layout.layment().width, 565.0);
    }

    #[test]
    fn restore_never_lowers_the_id_counter() {
        let catalog = Catalog::new([import_catalog_item(&ext_item("ok", None, Some((50.0, 20.0)))).unwrap()]);
        let mut layout = Layout::default();
        for _ in 0..12 {
            layout.place_contour(&catalog, "ok", None).unwrap();
        }
        let doc = document(vec![contour(3, "ok", 0.0)], vec![]);
        restore(&mut layout, &doc, &catalog, &EngineConfig::default()).unwrap();
        assert_eq!(layout.contours().next_id(), PlacementId(12));
        let id = layout.place_contour(&catalog, "ok", None).unwrap();
        assert_eq!(id, PlacementId(12));
    }
}

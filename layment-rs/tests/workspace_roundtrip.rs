#![cfg(feature = "raster")]

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use layment_rs::collision_detection::TinySkiaRasterizer;
use layment_rs::entities::{Catalog, Command, EntityRef, Layout, PlacementId};
use layment_rs::geometry::Rotation;
use layment_rs::geometry::primitives::Point;
use layment_rs::io::export::OrderReceipt;
use layment_rs::io::ext_repr::{
    ExtExportDocument, ExtManifest, ExtOrderResponse, ExtWorkspace, LaymentType,
};
use layment_rs::io::import::{import_manifest, restore};
use layment_rs::pricing::PricePreview;
use layment_rs::util::EngineConfig;
use serde::de::DeserializeOwned;
use test_case::test_case;

fn read_json<T: DeserializeOwned>(path: &str) -> T {
    let file = File::open(Path::new(path)).unwrap();
    serde_json::from_reader(BufReader::new(file)).unwrap()
}

fn catalog() -> Catalog {
    let manifest: ExtManifest = read_json("../assets/manifest.json");
    import_manifest(&manifest)
}

#[test]
fn manifest_fixture() {
    let catalog = catalog();
    // the item without geometry nor size is left out
    assert_eq!(catalog.len(), 4);
    assert!(catalog.get("mystery-tool").is_none());
    assert_eq!(catalog.enabled().count(), 3);
    let pliers = catalog.get("pliers-200").unwrap();
    assert_eq!(pliers.silhouette.as_ref().unwrap().outlines().len(), 2);
    assert_eq!(catalog.categories.len(), 4);
}

#[test_case("../assets/workspace_valid.json"; "valid")]
#[test_case("../assets/workspace_collision.json"; "collision")]
fn restore_then_save_is_lossless(path: &str) {
    let cfg = EngineConfig::default();
    let catalog = catalog();
    let doc: ExtWorkspace = read_json(path);

    let mut layout = Layout::default();
    let summary = restore(&mut layout, &doc, &catalog, &cfg).unwrap();
    assert!(summary.is_complete());
    assert_eq!(layout.save(), doc);

    // the document survives a zoom
    layout.set_scale(3.7, &cfg).unwrap();
    assert_eq!(layout.save(), doc);

    let json = serde_json::to_string(&doc).unwrap();
    let reparsed: ExtWorkspace = serde_json::from_str(&json).unwrap();
    assert_eq!(reparsed, doc);
}

#[test]
fn edits_survive_a_save_restore_cycle() {
    let cfg = EngineConfig::default();
    let catalog = catalog();
    let mut layout = Layout::default();

    let wrench = layout
        .place_contour(&catalog, "wrench-17", Some(Point(40.0, 40.0)))
        .unwrap();
    let screwdriver = layout
        .place_contour(&catalog, "screwdriver-ph2", Some(Point(300.0, 60.0)))
        .unwrap();
    assert!(!layout.rotate_contour(screwdriver, -90.0, &cfg).unwrap());
    assert!(layout.rotate_contour(screwdriver, 270.0, &cfg).unwrap());
    layout.attach_label(wrench, "WR-17".into(), None, &cfg).unwrap();
    layout
        .apply(
            Command::Move {
                target: EntityRef::Contour(wrench),
                dx: 10.0,
                dy: 5.0,
            },
            &catalog,
            &cfg,
        )
        .unwrap();
    layout.set_scale(1.5, &cfg).unwrap();

    let saved = layout.save();
    let mut restored = Layout::default();
    restore(&mut restored, &saved, &catalog, &cfg).unwrap();

    assert_eq!(restored.save(), saved);
    assert_eq!(
        restored.contours().get(screwdriver).unwrap().rotation,
        Rotation::Deg270
    );
    let (_, label) = restored.labels().label_for(wrench).unwrap();
    assert_eq!(label.text, "WR-17");
    // ids keep counting from where the document left off
    let next = restored
        .place_contour(&catalog, "wrench-17", None)
        .unwrap();
    assert_eq!(next, PlacementId(2));
}

#[test]
fn disabled_items_still_restore() {
    let cfg = EngineConfig::default();
    let catalog = catalog();
    let mut doc: ExtWorkspace = read_json("../assets/workspace_valid.json");
    doc.contours[0].id = "tape-measure".into();
    let mut layout = Layout::default();
    let summary = restore(&mut layout, &doc, &catalog, &cfg).unwrap();
    assert_eq!(summary.contours, 3);
    assert!(layout.contours().get(PlacementId(0)).is_some());
}

#[test]
fn export_of_the_valid_fixture() {
    let cfg = EngineConfig::default();
    let catalog = catalog();
    let doc: ExtWorkspace = read_json("../assets/workspace_valid.json");
    let mut layout = Layout::default();
    restore(&mut layout, &doc, &catalog, &cfg).unwrap();

    let rasterizer = TinySkiaRasterizer::new(&cfg.raster);
    let export = layout.export(&rasterizer, &cfg).unwrap();
    let meta = &export.order_meta;
    assert_eq!((meta.width, meta.height), (565.0, 375.0));
    assert_eq!(meta.units, "mm");
    assert_eq!(meta.coordinate_system, "origin-top-left");
    assert_eq!(meta.layment_type, LaymentType::WithTools);
    assert_eq!(meta.workspace_snapshot, doc);
    assert_eq!(export.contours, doc.contours);
    assert!(meta.price_preview.missing_contour_ids.is_empty());

    // the order service recomputes the same price from the catalog
    let json = serde_json::to_string(&export).unwrap();
    let received: ExtExportDocument = serde_json::from_str(&json).unwrap();
    let recomputed = PricePreview::for_document(&received, &catalog, &cfg.pricing);
    assert_eq!(recomputed.total, meta.price_preview.total);

    let response: ExtOrderResponse =
        serde_json::from_str(r#"{"orderId": "L-1042", "pricePreview": {"total": 4990}}"#).unwrap();
    let receipt = OrderReceipt::from_response(&response, &received);
    assert_eq!(receipt.order_id.as_deref(), Some("L-1042"));
    assert_eq!(receipt.total, 4990);
}

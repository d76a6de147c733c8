#![cfg(feature = "raster")]

use layment_rs::LaymentError;
use layment_rs::collision_detection::{TinySkiaRasterizer, ValidationReport};
use layment_rs::entities::{
    Catalog, CatalogAssets, CatalogItem, Layout, PlacementId, PrimitiveShape,
};
use layment_rs::geometry::primitives::{Point, Rect, Silhouette};
use layment_rs::util::EngineConfig;
use test_case::test_case;

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn item(id: &str, silhouette: Silhouette) -> CatalogItem {
    CatalogItem {
        id: id.into(),
        article: id.to_uppercase(),
        name: id.into(),
        category: None,
        enabled: true,
        cutting_length_meters: 0.3,
        scale_override: 1.0,
        assets: CatalogAssets::default(),
        size: (silhouette.width(), silhouette.height()),
        silhouette: Some(silhouette),
    }
}

fn triangle(a: (f32, f32), b: (f32, f32), c: (f32, f32)) -> Silhouette {
    Silhouette::try_new(vec![vec![a.into(), b.into(), c.into()]]).unwrap()
}

fn catalog() -> Catalog {
    let square = Rect::try_new(0.0, 0.0, 50.0, 50.0).unwrap();
    Catalog::new([
        item("square", Silhouette::from_rect(square)),
        // upper-left half of a 100 x 100 square
        item(
            "upper-triangle",
            triangle((0.0, 0.0), (100.0, 0.0), (0.0, 100.0)),
        ),
        // 60 x 60 lower-right corner of a 100 x 100 square
        item(
            "lower-triangle",
            triangle((100.0, 100.0), (40.0, 100.0), (100.0, 40.0)),
        ),
    ])
}

fn validate(layout: &mut Layout) -> ValidationReport {
    layout
        .validate(&TinySkiaRasterizer::default(), &EngineConfig::default())
        .unwrap()
}

#[test_case(10.0, false; "gap above the clearance")]
#[test_case(7.0, false; "gap just above the clearance")]
#[test_case(2.0, true; "gap below the clearance")]
#[test_case(0.0, true; "touching")]
#[test_case(-5.0, true; "overlapping")]
fn clearance_between_squares(gap: f32, collides: bool) {
    init_logger();
    let catalog = catalog();
    let mut layout = Layout::default();
    let a = layout
        .place_contour(&catalog, "square", Some(Point(60.0, 60.0)))
        .unwrap();
    let b = layout
        .place_contour(&catalog, "square", Some(Point(110.0 + gap, 60.0)))
        .unwrap();

    let report = validate(&mut layout);
    assert!(report.out_of_bounds_contours.is_empty());
    match collides {
        true => {
            assert_eq!(report.colliding_pairs, vec![(a, b)]);
            assert_eq!(report.issues().collision_contours, 2);
            assert!(layout.contours().iter().all(|c| c.highlighted));
        }
        false => {
            assert!(report.is_ok());
            assert!(layout.contours().iter().all(|c| !c.highlighted));
        }
    }
}

#[test_case(100.0, false; "bounding boxes overlap, silhouettes far apart")]
#[test_case(82.0, true; "silhouettes closer than the clearance")]
fn triangles_are_checked_on_their_silhouette(offset: f32, collides: bool) {
    init_logger();
    let catalog = catalog();
    let mut layout = Layout::default();
    layout
        .place_contour(&catalog, "upper-triangle", Some(Point(60.0, 60.0)))
        .unwrap();
    layout
        .place_contour(&catalog, "lower-triangle", Some(Point(offset, offset)))
        .unwrap();

    let report = validate(&mut layout);
    assert_eq!(report.issues().collision_contours > 0, collides);
}

#[test_case(Point(28.0, 28.0), true; "touching the safe area")]
#[test_case(Point(527.0, 337.0), true; "touching the far corner")]
#[test_case(Point(27.0, 28.0), false; "one millimetre to the left")]
#[test_case(Point(28.0, 338.0), false; "one millimetre below")]
fn boundary_of_the_safe_area(position: Point, inside: bool) {
    let catalog = catalog();
    let mut layout = Layout::default();
    let id = layout
        .place_contour(&catalog, "square", Some(position))
        .unwrap();
    let report = validate(&mut layout);
    match inside {
        true => assert!(report.is_ok()),
        false => {
            assert_eq!(report.out_of_bounds_contours, vec![id]);
            assert!(layout.contours().get(id).unwrap().highlighted);
        }
    }
}

#[test]
fn oversized_primitive_is_out_of_bounds() {
    let cfg = EngineConfig::default();
    let mut layout = Layout::default();
    let key = layout.add_primitive(
        PrimitiveShape::Rect {
            width: 800.0,
            height: 50.0,
        },
        Some(Point(28.0, 100.0)),
        &cfg,
    );
    layout.add_primitive(
        PrimitiveShape::Circle { radius: 30.0 },
        Some(Point(300.0, 250.0)),
        &cfg,
    );
    let report = validate(&mut layout);
    assert_eq!(report.out_of_bounds_primitives, vec![key]);
    assert_eq!(report.issues().out_of_bounds_primitives, 1);
    assert_eq!(report.issues().collision_contours, 0);
    assert!(layout.primitives().get(key).unwrap().highlighted);
    assert_eq!(
        report.issues().message(),
        "An element is outside the layment bounds"
    );
}

#[test]
fn validation_is_deterministic() {
    let catalog = catalog();
    let mut layout = Layout::default();
    for (i, x) in [60.0, 112.0, 200.0, 240.0].into_iter().enumerate() {
        layout
            .place_contour(&catalog, "square", Some(Point(x, 60.0 + 20.0 * i as f32)))
            .unwrap();
    }
    let first = validate(&mut layout);
    let second = validate(&mut layout);
    assert_eq!(first, second);
    assert!(!first.is_ok());
}

#[test]
fn highlights_are_reset_between_runs() {
    let catalog = catalog();
    let mut layout = Layout::default();
    let a = layout
        .place_contour(&catalog, "square", Some(Point(60.0, 60.0)))
        .unwrap();
    layout
        .place_contour(&catalog, "square", Some(Point(112.0, 60.0)))
        .unwrap();
    assert!(!validate(&mut layout).is_ok());

    layout
        .move_contour(a, 0.0, 100.0, &EngineConfig::default())
        .unwrap();
    assert!(validate(&mut layout).is_ok());
    assert!(layout.contours().iter().all(|c| !c.highlighted));
}

#[test]
fn validation_requires_unit_scale() {
    let cfg = EngineConfig::default();
    let catalog = catalog();
    let mut layout = Layout::default();
    layout
        .place_contour(&catalog, "square", Some(Point(60.0, 60.0)))
        .unwrap();
    layout.set_scale(2.0, &cfg).unwrap();

    let rasterizer = TinySkiaRasterizer::default();
    let refused = layout.validate(&rasterizer, &cfg);
    assert!(matches!(refused, Err(LaymentError::ScaleNotUnit { .. })));

    let report = layout.check(&rasterizer, &cfg).unwrap();
    assert!(report.is_ok());
    assert_eq!(layout.scale().value(), 2.0);
}

#[test]
fn export_refuses_invalid_layouts() {
    let cfg = EngineConfig::default();
    let catalog = catalog();
    let mut layout = Layout::default();
    layout
        .place_contour(&catalog, "square", Some(Point(0.0, 0.0)))
        .unwrap();
    let rasterizer = TinySkiaRasterizer::default();
    match layout.export(&rasterizer, &cfg) {
        Err(LaymentError::InvalidLayout(issues)) => assert_eq!(issues.out_of_bounds_contours, 1),
        other => panic!("expected an invalid layout, got {other:?}"),
    }

    layout
        .move_contour(PlacementId(0), 100.0, 100.0, &cfg)
        .unwrap();
    let document = layout.export(&rasterizer, &cfg).unwrap();
    assert_eq!(document.contours.len(), 1);
    assert!(document.layout_svg.is_some());
}

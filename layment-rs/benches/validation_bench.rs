use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use layment_rs::collision_detection::{TinySkiaRasterizer, validate};
use layment_rs::entities::{Catalog, CatalogAssets, CatalogItem, Layout};
use layment_rs::geometry::primitives::{Point, Silhouette};
use layment_rs::util::EngineConfig;

criterion_main!(benches);
criterion_group!(benches, validation_bench);

/// Number of contours per row and column of the grid
const GRID_SIZES: [usize; 3] = [2, 4, 6];

/// Gap (mm) between neighbouring contours, close enough for every neighbour pair to reach the narrow phase
const GAP: f32 = 8.0;

fn catalog() -> Catalog {
    // a wrench-like outline, 60 x 24 mm
    let outline = vec![
        Point(0.0, 6.0),
        Point(10.0, 0.0),
        Point(50.0, 7.0),
        Point(60.0, 0.0),
        Point(60.0, 24.0),
        Point(50.0, 17.0),
        Point(10.0, 24.0),
        Point(0.0, 18.0),
    ];
    let silhouette = Silhouette::try_new(vec![outline]).unwrap();
    Catalog::new([CatalogItem {
        id: "wrench".into(),
        article: "WR".into(),
        name: "Wrench".into(),
        category: None,
        enabled: true,
        cutting_length_meters: 0.2,
        scale_override: 1.0,
        assets: CatalogAssets::default(),
        size: (silhouette.width(), silhouette.height()),
        silhouette: Some(silhouette),
    }])
}

fn grid_layout(catalog: &Catalog, n: usize) -> Layout {
    let mut layout = Layout::default();
    for i in 0..n {
        for j in 0..n {
            let position = Point(
                40.0 + i as f32 * (60.0 + GAP),
                40.0 + j as f32 * (24.0 + GAP),
            );
            layout
                .place_contour(catalog, "wrench", Some(position))
                .unwrap();
        }
    }
    layout
}

fn validation_bench(c: &mut Criterion) {
    let cfg = EngineConfig::default();
    let catalog = catalog();
    let rasterizer = TinySkiaRasterizer::new(&cfg.raster);

    let mut group = c.benchmark_group("validation");
    for n in GRID_SIZES {
        let layout = grid_layout(&catalog, n);
        group.bench_with_input(BenchmarkId::from_parameter(n * n), &layout, |b, layout| {
            b.iter(|| validate(layout, &rasterizer, &cfg).unwrap())
        });
    }
    group.finish();
}

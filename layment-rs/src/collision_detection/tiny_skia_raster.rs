use log::warn;
use tiny_skia::{FillRule, LineCap, LineJoin, Paint, PathBuilder, Pixmap, Stroke, Transform};

use crate::collision_detection::{Bitmap, Rasterizer};
use crate::geometry::Transformation;
use crate::geometry::geo_traits::Transformable;
use crate::geometry::primitives::{Rect, Silhouette};
use crate::util::RasterConfig;

/// [`Rasterizer`] backed by `tiny-skia`.
///
/// The silhouette is filled with the non-zero rule and stroked with round joins and caps
/// at twice the dilation, so the ink covers the shape grown by `dilation` in every direction.
#[derive(Clone, Copy, Debug)]
pub struct TinySkiaRasterizer {
    pub anti_alias: bool,
}

impl TinySkiaRasterizer {
    pub fn new(cfg: &RasterConfig) -> Self {
        Self {
            anti_alias: cfg.anti_alias,
        }
    }
}

impl Default for TinySkiaRasterizer {
    fn default() -> Self {
        Self::new(&RasterConfig::default())
    }
}

impl Rasterizer for TinySkiaRasterizer {
    fn render_dilated_silhouette(
        &self,
        silhouette: &Silhouette,
        transform: &Transformation,
        dilation: f32,
        viewport: Rect,
    ) -> Option<Bitmap> {
        let (width, height) = Bitmap::dimensions_for(&viewport);
        let Some(mut pixmap) = Pixmap::new(width, height) else {
            warn!("[RAST] could not allocate a {width}x{height} pixmap");
            return None;
        };

        // silhouette coordinates relative to the top-left of the viewport
        let to_viewport = transform
            .clone()
            .translate((-viewport.x_min, -viewport.y_min));
        let placed = silhouette.transform_clone(&to_viewport);

        let mut pb = PathBuilder::new();
        for outline in placed.outlines() {
            let (first, rest) = outline.split_first()?;
            pb.move_to(first.x(), first.y());
            for p in rest {
                pb.line_to(p.x(), p.y());
            }
            pb.close();
        }
        let path = pb.finish()?;

        let mut paint = Paint::default();
        paint.set_color_rgba8(0, 0, 0, 255);
        paint.anti_alias = self.anti_alias;

        pixmap.fill_path(&path, &paint, FillRule::Winding, Transform::identity(), None);
        if dilation > 0.0 {
            let stroke = Stroke {
                width: 2.0 * dilation,
                line_cap: LineCap::Round,
                line_join: LineJoin::Round,
                ..Stroke::default()
            };
            pixmap.stroke_path(&path, &paint, &stroke, Transform::identity(), None);
        }

        let alpha = pixmap.pixels().iter().map(|p| p.alpha()).collect();
        Bitmap::new(width, height, alpha)
    }
}

use crate::geometry::Transformation;
use crate::geometry::primitives::{Rect, Silhouette};

/// Offscreen rendering backend used by the narrow phase of the validator.
pub trait Rasterizer {
    /// Renders `silhouette`, mapped onto the workspace by `transform` and grown outwards by
    /// `dilation` on every side, into a bitmap covering `viewport`.
    ///
    /// Pixel `(0, 0)` of the bitmap corresponds to the top-left corner of the viewport,
    /// one pixel spans one workspace unit.
    /// Returns `None` if nothing could be rendered.
    fn render_dilated_silhouette(
        &self,
        silhouette: &Silhouette,
        transform: &Transformation,
        dilation: f32,
        viewport: Rect,
    ) -> Option<Bitmap>;
}

impl<R: Rasterizer + ?Sized> Rasterizer for &R {
    fn render_dilated_silhouette(
        &self,
        silhouette: &Silhouette,
        transform: &Transformation,
        dilation: f32,
        viewport: Rect,
    ) -> Option<Bitmap> {
        (**self).render_dilated_silhouette(silhouette, transform, dilation, viewport)
    }
}

/// Alpha mask produced by a [`Rasterizer`], stored row by row.
#[derive(Clone, Debug, PartialEq)]
pub struct Bitmap {
    width: u32,
    height: u32,
    alpha: Vec<u8>,
}

impl Bitmap {
    /// Returns `None` if the number of values does not match the dimensions.
    pub fn new(width: u32, height: u32, alpha: Vec<u8>) -> Option<Self> {
        (alpha.len() == width as usize * height as usize).then_some(Bitmap {
            width,
            height,
            alpha,
        })
    }

    /// Pixel dimensions needed to cover `viewport` at one pixel per workspace unit
    pub fn dimensions_for(viewport: &Rect) -> (u32, u32) {
        (
            viewport.width().ceil().max(1.0) as u32,
            viewport.height().ceil().max(1.0) as u32,
        )
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn alpha(&self, x: u32, y: u32) -> Option<u8> {
        (x < self.width && y < self.height)
            .then(|| self.alpha[(y * self.width + x) as usize])
    }

    /// Number of pixels with an alpha above `threshold`
    pub fn ink_count(&self, threshold: u8) -> usize {
        self.alpha.iter().filter(|a| **a > threshold).count()
    }

    /// True if any pixel has an alpha above `threshold` in both bitmaps.
    /// Bitmaps of different dimensions never overlap.
    pub fn overlaps(&self, other: &Bitmap, threshold: u8) -> bool {
        if (self.width, self.height) != (other.width, other.height) {
            return false;
        }
        self.alpha
            .iter()
            .zip(other.alpha.iter())
            .any(|(a, b)| *a > threshold && *b > threshold)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overlap_requires_ink_in_both() {
        let a = Bitmap::new(2, 2, vec![255, 0, 30, 0]).unwrap();
        let b = Bitmap::new(2, 2, vec![0, 255, 255, 0]).unwrap();
        assert!(!a.overlaps(&b, 64));
        assert!(a.overlaps(&b, 16));
    }

    #[test]
    fn rejects_mismatched_buffers() {
        assert!(Bitmap::new(3, 3, vec![0; 8]).is_none());
    }
}

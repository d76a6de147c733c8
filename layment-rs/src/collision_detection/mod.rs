mod raster;
mod report;
#[cfg(feature = "raster")]
mod tiny_skia_raster;
mod validator;

#[doc(inline)]
pub use raster::Bitmap;
#[doc(inline)]
pub use raster::Rasterizer;
#[doc(inline)]
pub use report::LayoutIssues;
#[doc(inline)]
pub use report::ValidationReport;
#[cfg(feature = "raster")]
#[doc(inline)]
pub use tiny_skia_raster::TinySkiaRasterizer;
#[doc(inline)]
pub use validator::validate;

/// Set of functions used throughout assure the correctness of the library.
pub mod assertions;

mod config;
mod debounce;
mod fpa;

#[doc(inline)]
pub use config::EngineConfig;
#[doc(inline)]
pub use config::LabelConfig;
#[doc(inline)]
pub use config::LaymentConfig;
#[doc(inline)]
pub use config::LaymentSize;
#[doc(inline)]
pub use config::PricingConfig;
#[doc(inline)]
pub use config::PrimitiveLimits;
#[doc(inline)]
pub use config::RasterConfig;
#[doc(inline)]
pub use config::ScaleConfig;
#[doc(inline)]
pub use debounce::PersistDebouncer;
#[doc(inline)]
pub use fpa::FPA;

/// Like [`f32::clamp`], but the upper bound wins when the bounds are inverted instead of panicking.
pub fn clamp(value: f32, min: f32, max: f32) -> f32 {
    f32::min(f32::max(value, min), max)
}

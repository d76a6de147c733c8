use std::collections::BTreeMap;
use std::time::Duration;

use anyhow::{Result, ensure};
use serde::{Deserialize, Serialize};

use crate::geometry::Rotation;

/// Configuration of the engine, constructed once per session and passed by reference
/// to the registries, the validator and the serializer.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct EngineConfig {
    pub layment: LaymentConfig,
    pub scale: ScaleConfig,
    /// Minimum gap (mm) required between any two distinct cut paths
    pub clearance: f32,
    pub labels: LabelConfig,
    pub primitives: PrimitiveLimits,
    /// Orientations a contour may take
    pub allowed_rotations: Vec<Rotation>,
    pub raster: RasterConfig,
    pub pricing: PricingConfig,
    /// Delay (ms) without edits after which a pending workspace save is flushed
    pub autosave_delay_ms: u64,
}

impl EngineConfig {
    /// Padding (mm) around a contour inside which its labels must stay.
    pub fn label_padding(&self) -> f32 {
        self.labels.bounds_padding.unwrap_or(self.clearance)
    }

    pub fn autosave_delay(&self) -> Duration {
        Duration::from_millis(self.autosave_delay_ms)
    }

    /// Checks the bounds a (partial) configuration file may have inverted or zeroed.
    pub fn validate(&self) -> Result<()> {
        let l = &self.layment;
        ensure!(l.min_size > 0.0, "layment.min_size must be positive: {}", l.min_size);
        ensure!(
            l.offset >= 0.0 && l.padding >= 0.0,
            "layment offset and padding cannot be negative: {} / {}",
            l.offset,
            l.padding
        );

        let s = &self.scale;
        ensure!(
            0.0 < s.min && s.min <= s.default && s.default <= s.max,
            "scale bounds must satisfy 0 < min <= default <= max: {} / {} / {}",
            s.min,
            s.default,
            s.max
        );
        ensure!(
            s.step > 0.0 && s.coarse_step > 0.0,
            "zoom steps must be positive"
        );

        ensure!(
            self.clearance.is_finite() && self.clearance >= 0.0,
            "clearance cannot be negative: {}",
            self.clearance
        );
        ensure!(
            !self.allowed_rotations.is_empty(),
            "at least one rotation must be allowed"
        );

        let lb = &self.labels;
        ensure!(
            lb.font_size_mm > 0.0 && lb.advance_ratio > 0.0 && lb.line_height > 0.0,
            "label font size, advance ratio and line height must be positive"
        );
        ensure!(
            lb.bounds_padding.is_none_or(|p| p >= 0.0),
            "labels.bounds_padding cannot be negative"
        );

        let p = &self.primitives;
        for (name, min, max) in [
            ("rect width", p.rect_min_width, p.rect_max_width),
            ("rect height", p.rect_min_height, p.rect_max_height),
            ("circle radius", p.circle_min_radius, p.circle_max_radius),
        ] {
            ensure!(
                0.0 < min && min <= max,
                "{name} limits must satisfy 0 < min <= max: {min} / {max}"
            );
        }

        ensure!(
            self.pricing.tool_diameter_mm > 0.0,
            "pricing.tool_diameter_mm must be positive: {}",
            self.pricing.tool_diameter_mm
        );
        Ok(())
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            layment: LaymentConfig::default(),
            scale: ScaleConfig::default(),
            clearance: 6.0,
            labels: LabelConfig::default(),
            primitives: PrimitiveLimits::default(),
            allowed_rotations: Rotation::ALL.to_vec(),
            raster: RasterConfig::default(),
            pricing: PricingConfig::default(),
            autosave_delay_ms: 400,
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct LaymentConfig {
    pub default_width: f32,
    pub default_height: f32,
    /// Neither side of the layment can be smaller than this (mm)
    pub min_size: f32,
    /// Distance (mm) of the layment's top-left corner from the workspace origin
    pub offset: f32,
    /// Margin (mm) along the layment edges that entities must keep clear of
    pub padding: f32,
    pub presets: BTreeMap<String, LaymentSize>,
}

impl Default for LaymentConfig {
    fn default() -> Self {
        let presets = [("SMALL", 190.0), ("MEDIUM", 380.0), ("LARGE", 565.0)]
            .into_iter()
            .map(|(name, width)| {
                let size = LaymentSize {
                    width,
                    height: 375.0,
                };
                (name.to_string(), size)
            })
            .collect();
        Self {
            default_width: 565.0,
            default_height: 375.0,
            min_size: 100.0,
            offset: 20.0,
            padding: 8.0,
            presets,
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
pub struct LaymentSize {
    pub width: f32,
    pub height: f32,
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
#[serde(default)]
pub struct ScaleConfig {
    pub default: f32,
    pub min: f32,
    pub max: f32,
    /// Zoom increment of a regular zoom step
    pub step: f32,
    /// Zoom increment of a coarse zoom step
    pub coarse_step: f32,
}

impl Default for ScaleConfig {
    fn default() -> Self {
        Self {
            default: 1.0,
            min: 0.5,
            max: 10.0,
            step: 0.1,
            coarse_step: 0.2,
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
#[serde(default)]
pub struct LabelConfig {
    pub font_size_mm: f32,
    /// Offset (mm) of a new label from the top-right corner of its contour
    pub default_offset: (f32, f32),
    /// Padding (mm) around the owning contour; the clearance is used when undefined
    pub bounds_padding: Option<f32>,
    /// Average glyph advance as a fraction of the font size
    pub advance_ratio: f32,
    /// Line height as a multiple of the font size
    pub line_height: f32,
}

impl Default for LabelConfig {
    fn default() -> Self {
        Self {
            font_size_mm: 5.0,
            default_offset: (6.0, 0.0),
            bounds_padding: None,
            advance_ratio: 0.6,
            line_height: 1.16,
        }
    }
}

/// Size limits (mm) of the parametric primitives.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
#[serde(default)]
pub struct PrimitiveLimits {
    pub rect_min_width: f32,
    pub rect_max_width: f32,
    pub rect_min_height: f32,
    pub rect_max_height: f32,
    pub circle_min_radius: f32,
    pub circle_max_radius: f32,
}

impl Default for PrimitiveLimits {
    fn default() -> Self {
        Self {
            rect_min_width: 8.0,
            rect_max_width: 800.0,
            rect_min_height: 8.0,
            rect_max_height: 400.0,
            circle_min_radius: 4.0,
            circle_max_radius: 200.0,
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
#[serde(default)]
pub struct RasterConfig {
    /// Pixels with an alpha above this value count as ink during silhouette overlap tests
    pub alpha_threshold: u8,
    /// Render silhouettes with anti-aliasing
    pub anti_alias: bool,
}

impl Default for RasterConfig {
    fn default() -> Self {
        Self {
            alpha_threshold: 64,
            anti_alias: true,
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
#[serde(default)]
pub struct PricingConfig {
    /// Material overhead coefficient for offcuts
    pub waste_k: f32,
    pub material_price_per_m2: f32,
    pub cutting_price_per_meter: f32,
    /// Multiplier from cost to recommended retail price
    pub rrc_multiplier: f32,
    /// Number of passes along the outer perimeter of the layment
    pub layment_passes: u32,
    /// Diameter (mm) of the milling tool used for pockets
    pub tool_diameter_mm: f32,
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            waste_k: 1.2,
            material_price_per_m2: 2500.0,
            cutting_price_per_meter: 15.0,
            rrc_multiplier: 1.5,
            layment_passes: 3,
            tool_diameter_mm: 6.0,
        }
    }
}

use serde::{Deserialize, Serialize};

use crate::error::RenderError;

/// Every drawn segment uses this stroke width, in pixels.
pub const STROKE_WIDTH: u32 = 1;
/// Segments are half transparent so overlapping edges accumulate visually.
pub const STROKE_OPACITY: f64 = 0.5;

pub const DEFAULT_WIDTH: u32 = 800;
pub const DEFAULT_HEIGHT: u32 = 600;

/// Colour saturation points. Values beyond them render at full intensity.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NormalizationBounds {
    pub min: f64,
    pub max: f64,
}

impl NormalizationBounds {
    pub const fn new(min: f64, max: f64) -> Self {
        NormalizationBounds { min, max }
    }

    /// Folds `values` into the tightest bounds that also contain zero.
    pub fn from_values<I: IntoIterator<Item = f64>>(values: I) -> Self {
        values
            .into_iter()
            .fold(NormalizationBounds::new(0.0, 0.0), |acc, v| {
                NormalizationBounds::new(acc.min.min(v), acc.max.max(v))
            })
    }
}

/// Where the colour scale's bounds come from.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum BoundsMode {
    /// Traverse every value first and use the observed extremes.
    ComputeBounds,
    /// Skip the traversal and trust bounds from an earlier pre-run.
    UseSuppliedBounds(NormalizationBounds),
}

/// Options for a single render call.
///
/// # Fields
/// - `width`, `height` — canvas size in pixels
/// - `threshold`       — a value is drawn only when `|value| > threshold`
/// - `bounds`          — colour-scale normalisation source
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderConfig {
    pub width: u32,
    pub height: u32,
    pub threshold: f64,
    pub bounds: BoundsMode,
}

impl RenderConfig {
    /// Weight rendering: 800×600, threshold 1, bounds ±3.
    pub fn for_parameters() -> Self {
        RenderConfig {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            threshold: 1.0,
            bounds: BoundsMode::UseSuppliedBounds(NormalizationBounds::new(-3.0, 3.0)),
        }
    }

    /// Activation rendering: 800×600, threshold 0.3, bounds ±10.
    pub fn for_state() -> Self {
        RenderConfig {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            threshold: 0.3,
            bounds: BoundsMode::UseSuppliedBounds(NormalizationBounds::new(-10.0, 10.0)),
        }
    }

    pub fn validate(&self) -> Result<(), RenderError> {
        if self.width == 0 || self.height == 0 {
            return Err(RenderError::InvalidConfig(format!(
                "canvas must be non-empty, got {}x{}",
                self.width, self.height
            )));
        }
        if !self.threshold.is_finite() || self.threshold < 0.0 {
            return Err(RenderError::InvalidConfig(format!(
                "threshold must be a finite non-negative number, got {}",
                self.threshold
            )));
        }
        if let BoundsMode::UseSuppliedBounds(b) = self.bounds {
            if !b.min.is_finite() || !b.max.is_finite() || b.min > b.max {
                return Err(RenderError::InvalidConfig(format!(
                    "bounds must be finite with min <= max, got [{}, {}]",
                    b.min, b.max
                )));
            }
        }
        Ok(())
    }

    /// Serializes the config to a pretty-printed JSON file.
    pub fn save_json(&self, path: &str) -> std::io::Result<()> {
        let file = std::fs::File::create(path)?;
        let writer = std::io::BufWriter::new(file);
        serde_json::to_writer_pretty(writer, self)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))
    }

    /// Deserializes a `RenderConfig` from a JSON file.
    pub fn load_json(path: &str) -> std::io::Result<RenderConfig> {
        let file = std::fs::File::open(path)?;
        let reader = std::io::BufReader::new(file);
        serde_json::from_reader(reader)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))
    }
}

impl Default for RenderConfig {
    fn default() -> Self {
        RenderConfig::for_parameters()
    }
}

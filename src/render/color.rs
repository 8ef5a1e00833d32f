use std::fmt;

use crate::render::render_config::{NormalizationBounds, STROKE_OPACITY};

/// 8-bit RGB stroke colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const WHITE: Rgb = Rgb { r: 255, g: 255, b: 255 };
}

impl fmt::Display for Rgb {
    /// CSS `rgba(...)` with the fixed stroke opacity.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgba({},{},{},{})", self.r, self.g, self.b, STROKE_OPACITY)
    }
}

/// Diverging scale: positive values fade white towards blue, negative ones
/// towards red, saturating at the matching bound.
pub fn diverging(value: f64, bounds: NormalizationBounds) -> Rgb {
    if value > 0.0 {
        let c = channel(fade(value, bounds.max));
        Rgb { r: c, g: c, b: 255 }
    } else if value < 0.0 {
        let c = channel(fade(value, bounds.min));
        Rgb { r: 255, g: c, b: c }
    } else {
        Rgb::WHITE
    }
}

// `value` and `bound` share a sign; a zero bound saturates
fn fade(value: f64, bound: f64) -> f64 {
    if bound == 0.0 || value.signum() != bound.signum() {
        return 1.0;
    }
    (value / bound).min(1.0)
}

fn channel(fade: f64) -> u8 {
    (255.0 - fade * 255.0).floor().clamp(0.0, 255.0) as u8
}

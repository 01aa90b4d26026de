//! Progress colorization for the agent marker.
//!
//! The agent fades red through yellow to green as the route completes.
//! Colors are memoized at one-percent granularity since the scroll handler
//! asks for one on every animation frame.

use std::collections::HashMap;

/// An RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    /// CSS `rgb(...)` form for the rendering layer.
    pub fn css(&self) -> String {
        format!("rgb({},{},{})", self.r, self.g, self.b)
    }
}

/// Red-to-green ramp over normalized progress, memoized per percent.
#[derive(Debug, Default)]
pub struct ColorRamp {
    cache: HashMap<u8, Rgb>,
}

impl ColorRamp {
    pub fn new() -> Self {
        Self::default()
    }

    /// Color for a completion fraction, clamped to `[0, 1]`.
    pub fn color_at(&mut self, progress: f64) -> Rgb {
        let progress = if progress.is_finite() {
            progress.clamp(0.0, 1.0)
        } else {
            0.0
        };
        let key = (progress * 100.0).round() as u8;
        *self.cache.entry(key).or_insert_with(|| ramp(progress))
    }
}

fn ramp(progress: f64) -> Rgb {
    if progress >= 0.99 {
        return Rgb { r: 0, g: 255, b: 0 };
    }

    let green = (progress * 510.0).min(255.0) as u8;
    let red = if progress >= 0.49 {
        (255.0 - (progress - 0.49) * 510.0).max(0.0) as u8
    } else {
        255
    };

    Rgb { r: red, g: green, b: 0 }
}

//! Pastel colors for the blobs.
//!
//! Base blobs draw from a soft pink / blue / beige / lavender / mint set with
//! their opacity baked into the alpha channel; highlights use near-white tints
//! with lower alpha so they read as light once overlay-blended.

use std::fmt;

use rand::Rng;

use crate::blob::BlobKind;

/// 8-bit RGB with a floating-point alpha in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f64,
}

impl Rgba {
    pub const fn new(r: u8, g: u8, b: u8, a: f64) -> Self {
        Self { r, g, b, a }
    }

    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 1.0)
    }

    /// Same color with alpha replaced, clamped into `[0, 1]`.
    pub fn with_alpha(self, alpha: f64) -> Self {
        let a = if alpha.is_finite() { alpha.clamp(0.0, 1.0) } else { 0.0 };
        Self { a, ..self }
    }

    /// Same color with alpha multiplied by `factor`.
    pub fn scale_alpha(self, factor: f64) -> Self {
        self.with_alpha(self.a * factor)
    }

    /// CSS color string accepted by canvas fill styles and gradient stops.
    pub fn css(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
    }
}

pub const BASE_PALETTE: [Rgba; 10] = [
    Rgba::new(255, 181, 216, 0.75), // pink
    Rgba::new(255, 201, 224, 0.70), // light pink
    Rgba::new(181, 216, 255, 0.75), // blue
    Rgba::new(197, 224, 255, 0.70), // light blue
    Rgba::new(245, 230, 211, 0.65), // beige
    Rgba::new(255, 228, 196, 0.65), // light beige
    Rgba::new(229, 212, 255, 0.75), // lavender
    Rgba::new(217, 197, 255, 0.70), // light lavender
    Rgba::new(197, 255, 229, 0.70), // mint
    Rgba::new(212, 255, 237, 0.65), // light mint
];

pub const HIGHLIGHT_PALETTE: [Rgba; 4] = [
    Rgba::new(255, 255, 255, 0.45),
    Rgba::new(255, 240, 248, 0.40),
    Rgba::new(240, 248, 255, 0.40),
    Rgba::new(250, 245, 255, 0.35),
];

pub fn palette(kind: BlobKind) -> &'static [Rgba] {
    match kind {
        BlobKind::Base => &BASE_PALETTE,
        BlobKind::Highlight => &HIGHLIGHT_PALETTE,
    }
}

/// Uniformly random color from the palette belonging to `kind`.
pub fn pick<R: Rng + ?Sized>(kind: BlobKind, rng: &mut R) -> Rgba {
    let colors = palette(kind);
    colors[rng.gen_range(0..colors.len())]
}

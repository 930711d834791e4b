//! Drawing surface abstraction.
//!
//! The render pipeline only talks to [`Surface`]; the browser build backs it
//! with a `CanvasRenderingContext2d`, tests back it with a recorder.

use std::fmt;

use glam::DVec2;

use crate::error::Result;
use crate::palette::Rgba;

/// Composite operation used when new pixels land on the surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BlendMode {
    #[default]
    SourceOver,
    Screen,
    Overlay,
}

impl BlendMode {
    /// Name understood by `globalCompositeOperation`.
    pub fn as_str(self) -> &'static str {
        match self {
            BlendMode::SourceOver => "source-over",
            BlendMode::Screen => "screen",
            BlendMode::Overlay => "overlay",
        }
    }
}

impl fmt::Display for BlendMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FilterOp {
    /// Gaussian blur radius in pixels.
    Blur(f64),
    /// Brightness ratio, 1.0 is identity.
    Brightness(f64),
    /// Saturation in percent, 100.0 is identity.
    Saturate(f64),
}

impl fmt::Display for FilterOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FilterOp::Blur(px) => write!(f, "blur({px}px)"),
            FilterOp::Brightness(ratio) => write!(f, "brightness({ratio})"),
            FilterOp::Saturate(percent) => write!(f, "saturate({percent}%)"),
        }
    }
}

/// Ordered chain of post-process filters; empty means `none`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Filter {
    ops: Vec<FilterOp>,
}

impl Filter {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn blur(mut self, px: f64) -> Self {
        self.ops.push(FilterOp::Blur(px));
        self
    }

    pub fn brightness(mut self, ratio: f64) -> Self {
        self.ops.push(FilterOp::Brightness(ratio));
        self
    }

    pub fn saturate(mut self, percent: f64) -> Self {
        self.ops.push(FilterOp::Saturate(percent));
        self
    }

}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.ops.is_empty() {
            return f.write_str("none");
        }
        for (i, op) in self.ops.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{op}")?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorStop {
    /// Position along the gradient in `[0, 1]`.
    pub offset: f64,
    pub color: Rgba,
}

impl ColorStop {
    pub fn new(offset: f64, color: Rgba) -> Self {
        Self { offset, color }
    }
}

/// Fill style for rectangles and circles.
#[derive(Debug, Clone, PartialEq)]
pub enum Paint {
    Solid(Rgba),
    Linear {
        from: DVec2,
        to: DVec2,
        stops: Vec<ColorStop>,
    },
    /// Radial gradient from a point at `center` out to `radius`.
    Radial {
        center: DVec2,
        radius: f64,
        stops: Vec<ColorStop>,
    },
}

/// A 2D raster target with canvas-like state (blend mode, filter, scale).
///
/// State set through `set_blend`, `set_filter` and `set_scale` persists until
/// changed again, the same way a canvas context behaves.
pub trait Surface {
    /// Backing store size in pixels.
    fn size(&self) -> (u32, u32);

    /// Resizes the backing store. Implementations may drop their contents.
    fn set_size(&mut self, width: u32, height: u32) -> Result<()>;

    fn clear(&mut self) -> Result<()>;

    /// Uniform scale applied to all subsequent drawing coordinates.
    fn set_scale(&mut self, scale: f64) -> Result<()>;

    fn set_blend(&mut self, mode: BlendMode) -> Result<()>;

    fn set_filter(&mut self, filter: &Filter) -> Result<()>;

    fn fill_rect(&mut self, origin: DVec2, extent: DVec2, paint: &Paint) -> Result<()>;

    fn fill_circle(&mut self, center: DVec2, radius: f64, paint: &Paint) -> Result<()>;

    /// Copies all of `source` into the rectangle `origin..origin + extent`,
    /// scaling as needed and honouring the current filter and blend mode.
    fn draw_surface(&mut self, source: &Self, origin: DVec2, extent: DVec2) -> Result<()>;
}

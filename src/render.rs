//! Frame compositing.
//!
//! Two strategies produce the same soft look:
//!
//! * **Buffered** draws every blob into a small working surface and lets one
//!   blur + saturate filter soften it while it is upscaled onto the output.
//!   Blur cost scales with pixel count, so blurring the small buffer is cheap.
//! * **Layered** draws straight onto the output several times: one blurred
//!   source-over pass for every kind, then screen-blended passes with wider
//!   blur for the glow.

use glam::DVec2;
use rand::Rng;

use crate::config::RenderMode;
use crate::error::Result;
use crate::palette::Rgba;
use crate::simulation::{Simulation, Viewport};
use crate::surface::{BlendMode, ColorStop, Filter, Paint, Surface};

/// Flat fill of the working surface in buffered mode.
pub const BASE_FILL: Rgba = Rgba::opaque(255, 245, 247);

/// Diagonal background gradient used by the layered mode.
pub const BACKGROUND: [(f64, Rgba); 3] = [
    (0.0, Rgba::opaque(255, 245, 247)),
    (0.5, Rgba::opaque(250, 240, 230)),
    (1.0, Rgba::opaque(240, 230, 246)),
];

/// Glow passes of the layered mode as `(blur multiplier, brightness)`.
const GLOW_PASSES: [(f64, f64); 2] = [(1.5, 1.1), (2.5, 1.05)];

pub struct Pipeline<S> {
    working: S,
}

impl<S: Surface> Pipeline<S> {
    pub fn new(working: S) -> Self {
        Self { working }
    }

    pub fn working(&self) -> &S {
        &self.working
    }

    /// Composites one frame of `sim` onto `output`.
    pub fn render<R: Rng>(&mut self, sim: &Simulation<R>, output: &mut S) -> Result<()> {
        match sim.config().render_mode {
            RenderMode::Buffered => self.render_buffered(sim, output),
            RenderMode::Layered => render_layered(sim, output),
        }
    }

    fn render_buffered<R: Rng>(&mut self, sim: &Simulation<R>, output: &mut S) -> Result<()> {
        let config = sim.config();
        let viewport = sim.viewport();
        let scale = config.buffer_scale;
        let (width, height) = working_size(viewport, scale);

        let working = &mut self.working;
        if working.size() != (width, height) {
            working.set_size(width, height)?;
        }
        working.set_filter(&Filter::none())?;
        working.set_scale(scale)?;
        working.fill_rect(DVec2::ZERO, viewport.extent(), &Paint::Solid(BASE_FILL))?;
        for blob in sim.blobs() {
            blob.draw(working, blob.kind.blend())?;
        }
        working.set_scale(1.0)?;

        output.clear()?;
        output.set_filter(&Filter::none().blur(config.blur).saturate(config.saturate))?;
        output.draw_surface(&self.working, DVec2::ZERO, viewport.extent())?;
        output.set_filter(&Filter::none())?;
        output.set_blend(BlendMode::SourceOver)
    }
}

/// Working surface size for a viewport, never smaller than one pixel.
pub fn working_size(viewport: Viewport, scale: f64) -> (u32, u32) {
    let side = |v: f64| ((v * scale).ceil() as u32).max(1);
    (side(viewport.width), side(viewport.height))
}

pub fn draw_background<S: Surface>(surface: &mut S, viewport: Viewport) -> Result<()> {
    let paint = Paint::Linear {
        from: DVec2::ZERO,
        to: viewport.extent(),
        stops: BACKGROUND
            .iter()
            .map(|&(offset, color)| ColorStop::new(offset, color))
            .collect(),
    };
    surface.fill_rect(DVec2::ZERO, viewport.extent(), &paint)
}

fn render_layered<S: Surface, R: Rng>(sim: &Simulation<R>, output: &mut S) -> Result<()> {
    let blur = sim.config().blur;
    let viewport = sim.viewport();

    output.set_filter(&Filter::none())?;
    output.set_blend(BlendMode::SourceOver)?;
    draw_background(output, viewport)?;

    output.set_filter(&Filter::none().blur(blur))?;
    for blob in sim.blobs() {
        blob.draw(output, BlendMode::SourceOver)?;
    }

    for (spread, brightness) in GLOW_PASSES {
        output.set_filter(&Filter::none().blur(blur * spread).brightness(brightness))?;
        for blob in sim.blobs() {
            blob.draw(output, BlendMode::Screen)?;
        }
    }

    output.set_filter(&Filter::none())?;
    output.set_blend(BlendMode::SourceOver)
}

use std::f64::consts::TAU;

use glam::DVec2;
use wasm_bindgen::JsCast;
use web_sys::{CanvasGradient, CanvasRenderingContext2d, Document, HtmlCanvasElement};

use crate::error::{LampError, Result};
use crate::surface::{BlendMode, ColorStop, Filter, Paint, Surface};

/// [`Surface`] backed by a `<canvas>` 2D context.
pub struct CanvasSurface {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    scale: f64,
}

impl CanvasSurface {
    pub fn new(canvas: HtmlCanvasElement) -> Result<Self> {
        let ctx = canvas
            .get_context("2d")?
            .ok_or_else(|| LampError::Js("2D canvas not supported".into()))?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| LampError::Js("context is not a CanvasRenderingContext2d".into()))?;
        Ok(Self {
            canvas,
            ctx,
            scale: 1.0,
        })
    }

    /// Detached canvas used as a working surface.
    pub fn offscreen(document: &Document) -> Result<Self> {
        let canvas = document
            .create_element("canvas")?
            .dyn_into::<HtmlCanvasElement>()
            .map_err(|_| LampError::Js("created element is not a canvas".into()))?;
        Self::new(canvas)
    }

    pub fn canvas(&self) -> &HtmlCanvasElement {
        &self.canvas
    }

    fn apply_paint(&self, paint: &Paint) -> Result<()> {
        match paint {
            Paint::Solid(color) => self.ctx.set_fill_style_str(&color.css()),
            Paint::Linear { from, to, stops } => {
                let gradient = self.ctx.create_linear_gradient(from.x, from.y, to.x, to.y);
                add_stops(&gradient, stops)?;
                self.ctx.set_fill_style_canvas_gradient(&gradient);
            }
            Paint::Radial {
                center,
                radius,
                stops,
            } => {
                let gradient = self
                    .ctx
                    .create_radial_gradient(center.x, center.y, 0.0, center.x, center.y, *radius)?;
                add_stops(&gradient, stops)?;
                self.ctx.set_fill_style_canvas_gradient(&gradient);
            }
        }
        Ok(())
    }
}

fn add_stops(gradient: &CanvasGradient, stops: &[ColorStop]) -> Result<()> {
    for stop in stops {
        gradient.add_color_stop(stop.offset as f32, &stop.color.css())?;
    }
    Ok(())
}

impl Surface for CanvasSurface {
    fn size(&self) -> (u32, u32) {
        (self.canvas.width(), self.canvas.height())
    }

    fn set_size(&mut self, width: u32, height: u32) -> Result<()> {
        // Assigning either dimension resets the whole context state.
        self.canvas.set_width(width);
        self.canvas.set_height(height);
        self.scale = 1.0;
        Ok(())
    }

    fn clear(&mut self) -> Result<()> {
        let (width, height) = self.size();
        self.ctx.set_transform(1.0, 0.0, 0.0, 1.0, 0.0, 0.0)?;
        self.ctx.clear_rect(0.0, 0.0, f64::from(width), f64::from(height));
        self.ctx.set_transform(self.scale, 0.0, 0.0, self.scale, 0.0, 0.0)?;
        Ok(())
    }

    fn set_scale(&mut self, scale: f64) -> Result<()> {
        self.ctx.set_transform(scale, 0.0, 0.0, scale, 0.0, 0.0)?;
        self.scale = scale;
        Ok(())
    }

    fn set_blend(&mut self, mode: BlendMode) -> Result<()> {
        self.ctx.set_global_composite_operation(mode.as_str())?;
        Ok(())
    }

    fn set_filter(&mut self, filter: &Filter) -> Result<()> {
        self.ctx.set_filter(&filter.to_string());
        Ok(())
    }

    fn fill_rect(&mut self, origin: DVec2, extent: DVec2, paint: &Paint) -> Result<()> {
        self.apply_paint(paint)?;
        self.ctx.fill_rect(origin.x, origin.y, extent.x, extent.y);
        Ok(())
    }

    fn fill_circle(&mut self, center: DVec2, radius: f64, paint: &Paint) -> Result<()> {
        self.apply_paint(paint)?;
        self.ctx.begin_path();
        self.ctx.arc(center.x, center.y, radius, 0.0, TAU)?;
        self.ctx.fill();
        Ok(())
    }

    fn draw_surface(&mut self, source: &Self, origin: DVec2, extent: DVec2) -> Result<()> {
        self.ctx.draw_image_with_html_canvas_element_and_dw_and_dh(
            &source.canvas,
            origin.x,
            origin.y,
            extent.x,
            extent.y,
        )?;
        Ok(())
    }
}

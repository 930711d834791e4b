#![allow(dead_code)]

use glam::DVec2;
use lava_wasm::surface::{BlendMode, Filter, Paint, Surface};
use lava_wasm::{Config, Result};
use rand::rngs::StdRng;
use rand::SeedableRng;

#[derive(Debug, Clone, PartialEq)]
pub enum Op {
    SetSize(u32, u32),
    Clear,
    Scale(f64),
    Blend(BlendMode),
    Filter(String),
    FillRect {
        origin: DVec2,
        extent: DVec2,
        paint: Paint,
    },
    FillCircle {
        center: DVec2,
        radius: f64,
        paint: Paint,
        blend: BlendMode,
        filter: String,
    },
    DrawSurface {
        source_size: (u32, u32),
        origin: DVec2,
        extent: DVec2,
        filter: String,
        blend: BlendMode,
    },
}

/// Surface that remembers every call instead of drawing.
pub struct RecordingSurface {
    pub width: u32,
    pub height: u32,
    pub ops: Vec<Op>,
    pub blend: BlendMode,
    pub filter: String,
    pub scale: f64,
}

impl RecordingSurface {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            ops: Vec::new(),
            blend: BlendMode::SourceOver,
            filter: Filter::none().to_string(),
            scale: 1.0,
        }
    }

    pub fn circles(&self) -> Vec<&Op> {
        self.ops
            .iter()
            .filter(|op| matches!(op, Op::FillCircle { .. }))
            .collect()
    }

    pub fn reset(&mut self) {
        self.ops.clear();
    }
}

impl Surface for RecordingSurface {
    fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn set_size(&mut self, width: u32, height: u32) -> Result<()> {
        self.width = width;
        self.height = height;
        self.ops.push(Op::SetSize(width, height));
        Ok(())
    }

    fn clear(&mut self) -> Result<()> {
        self.ops.push(Op::Clear);
        Ok(())
    }

    fn set_scale(&mut self, scale: f64) -> Result<()> {
        self.scale = scale;
        self.ops.push(Op::Scale(scale));
        Ok(())
    }

    fn set_blend(&mut self, mode: BlendMode) -> Result<()> {
        self.blend = mode;
        self.ops.push(Op::Blend(mode));
        Ok(())
    }

    fn set_filter(&mut self, filter: &Filter) -> Result<()> {
        self.filter = filter.to_string();
        self.ops.push(Op::Filter(self.filter.clone()));
        Ok(())
    }

    fn fill_rect(&mut self, origin: DVec2, extent: DVec2, paint: &Paint) -> Result<()> {
        self.ops.push(Op::FillRect {
            origin,
            extent,
            paint: paint.clone(),
        });
        Ok(())
    }

    fn fill_circle(&mut self, center: DVec2, radius: f64, paint: &Paint) -> Result<()> {
        self.ops.push(Op::FillCircle {
            center,
            radius,
            paint: paint.clone(),
            blend: self.blend,
            filter: self.filter.clone(),
        });
        Ok(())
    }

    fn draw_surface(&mut self, source: &Self, origin: DVec2, extent: DVec2) -> Result<()> {
        self.ops.push(Op::DrawSurface {
            source_size: source.size(),
            origin,
            extent,
            filter: self.filter.clone(),
            blend: self.blend,
        });
        Ok(())
    }
}

pub fn rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

pub fn config_with(base: usize, highlight: usize) -> Config {
    Config {
        base_blobs: base,
        highlight_blobs: highlight,
        ..Config::default()
    }
}

pub fn quiet_config(base: usize, highlight: usize) -> Config {
    let mut config = config_with(base, highlight);
    config.mouse_interaction.enabled = false;
    config
}

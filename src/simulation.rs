//! Blob set plus everything needed to advance it.

use glam::DVec2;
use log::debug;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::blob::{Blob, BlobKind};
use crate::config::Config;
use crate::error::Result;
use crate::interaction;

/// Drawable area in CSS pixels. Both sides are at least one pixel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub fn new(width: f64, height: f64) -> Self {
        let side = |v: f64| if v.is_finite() { v.max(1.0) } else { 1.0 };
        Self {
            width: side(width),
            height: side(height),
        }
    }

    pub fn min_extent(&self) -> f64 {
        self.width.min(self.height)
    }

    pub fn extent(&self) -> DVec2 {
        DVec2::new(self.width, self.height)
    }

    /// Half-open containment, `[0, width) x [0, height)`.
    pub fn contains(&self, point: DVec2) -> bool {
        (0.0..self.width).contains(&point.x) && (0.0..self.height).contains(&point.y)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Running,
    Reinitializing,
}

pub struct Simulation<R = SmallRng> {
    config: Config,
    viewport: Viewport,
    blobs: Vec<Blob>,
    clock: u64,
    phase: Phase,
    rng: R,
}

impl Simulation<SmallRng> {
    /// Simulation seeded from OS / browser entropy.
    pub fn new(config: Config, viewport: Viewport) -> Self {
        Self::with_rng(config, viewport, SmallRng::from_entropy())
    }
}

impl<R: Rng> Simulation<R> {
    pub fn with_rng(config: Config, viewport: Viewport, rng: R) -> Self {
        let mut sim = Self {
            config,
            viewport,
            blobs: Vec::new(),
            clock: 0,
            phase: Phase::Reinitializing,
            rng,
        };
        sim.reinitialize("startup");
        sim
    }

    /// Throws the blob set away and builds a fresh one from the current
    /// config and viewport.
    pub fn reinitialize(&mut self, reason: &str) {
        self.phase = Phase::Reinitializing;
        let viewport = self.viewport;
        let rng = &mut self.rng;
        let blobs = std::iter::repeat(BlobKind::Base)
            .take(self.config.base_blobs)
            .chain(std::iter::repeat(BlobKind::Highlight).take(self.config.highlight_blobs))
            .map(|kind| Blob::spawn(kind, viewport, &mut *rng))
            .collect();
        self.blobs = blobs;
        self.phase = Phase::Running;
        debug!(
            "blob set rebuilt ({reason}): {} base + {} highlight in {}x{}",
            self.config.base_blobs, self.config.highlight_blobs, viewport.width, viewport.height
        );
    }

    /// Returns whether the blob set was rebuilt.
    pub fn resize(&mut self, width: f64, height: f64) -> bool {
        let next = Viewport::new(width, height);
        if next == self.viewport {
            return false;
        }
        self.viewport = next;
        self.reinitialize("resize");
        true
    }

    /// Replaces the config wholesale. An invalid config leaves state as is.
    pub fn load_config(&mut self, config: Config) -> Result<()> {
        config.validate()?;
        self.config = config;
        self.reinitialize("config load");
        Ok(())
    }

    pub fn set_blob_counts(&mut self, base: usize, highlight: usize) -> Result<()> {
        let config = Config {
            base_blobs: base,
            highlight_blobs: highlight,
            ..self.config.clone()
        };
        config.validate()?;
        self.config = config;
        self.reinitialize("blob count change");
        Ok(())
    }

    /// Advances every blob by one frame.
    pub fn step(&mut self) {
        self.clock += 1;
        let policy = self.config.effective_boundary();
        for blob in &mut self.blobs {
            blob.update(self.clock, self.viewport, policy, &mut self.rng);
        }
    }

    /// Pushes blobs away from the pointer. Returns how many were pushed.
    pub fn pointer_moved(&mut self, pointer: DVec2) -> usize {
        interaction::repel(&mut self.blobs, pointer, &self.config.mouse_interaction)
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn blobs(&self) -> &[Blob] {
        &self.blobs
    }

    pub fn blobs_mut(&mut self) -> &mut [Blob] {
        &mut self.blobs
    }

    pub fn clock(&self) -> u64 {
        self.clock
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }
}

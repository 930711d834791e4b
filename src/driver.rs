//! Per-frame driver: one simulation step, then one composited frame.
//!
//! The host owns scheduling (for the browser, `requestAnimationFrame`) and
//! forwards resize, pointer and config events. Every event mutates state
//! synchronously, so the next `tick` always sees a complete blob set.

use glam::DVec2;
use log::{debug, info};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::config::Config;
use crate::error::Result;
use crate::render::Pipeline;
use crate::simulation::{Simulation, Viewport};
use crate::surface::Surface;

pub struct AnimationDriver<S, R = SmallRng> {
    sim: Simulation<R>,
    pipeline: Pipeline<S>,
    output: S,
    startup_config: Config,
    frames: u64,
}

impl<S: Surface> AnimationDriver<S, SmallRng> {
    pub fn new(output: S, working: S, config: Config) -> Result<Self> {
        Self::with_rng(output, working, config, SmallRng::from_entropy())
    }
}

impl<S: Surface, R: Rng> AnimationDriver<S, R> {
    /// Builds the driver around an output surface sized to the viewport.
    /// Fails when `config` does not validate.
    pub fn with_rng(output: S, working: S, config: Config, rng: R) -> Result<Self> {
        config.validate()?;
        let (width, height) = output.size();
        let viewport = Viewport::new(f64::from(width), f64::from(height));
        info!(
            "lamp starting at {}x{} with {} blobs",
            viewport.width,
            viewport.height,
            config.total_blobs()
        );
        Ok(Self {
            sim: Simulation::with_rng(config.clone(), viewport, rng),
            pipeline: Pipeline::new(working),
            output,
            startup_config: config,
            frames: 0,
        })
    }

    /// One animation frame.
    pub fn tick(&mut self) -> Result<()> {
        self.sim.step();
        self.pipeline.render(&self.sim, &mut self.output)?;
        self.frames += 1;
        Ok(())
    }

    /// Resizes the output surface and rebuilds the blob set for the new size.
    pub fn resize(&mut self, width: u32, height: u32) -> Result<()> {
        if self.output.size() != (width, height) {
            self.output.set_size(width, height)?;
        }
        if self.sim.resize(f64::from(width), f64::from(height)) {
            debug!("viewport now {width}x{height}");
        }
        Ok(())
    }

    /// Pointer position in viewport coordinates.
    pub fn pointer_moved(&mut self, x: f64, y: f64) -> usize {
        self.sim.pointer_moved(DVec2::new(x, y))
    }

    /// Replaces the config from a JSON document.
    pub fn load_config(&mut self, json: &str) -> Result<()> {
        let config = Config::from_json(json)?;
        self.apply_config(config)
    }

    pub fn apply_config(&mut self, config: Config) -> Result<()> {
        self.sim.load_config(config)?;
        info!("config loaded, {} blobs", self.sim.blobs().len());
        Ok(())
    }

    /// Goes back to the config the driver was started with.
    pub fn reset_config(&mut self) -> Result<()> {
        self.apply_config(self.startup_config.clone())
    }

    pub fn set_blob_counts(&mut self, base: usize, highlight: usize) -> Result<()> {
        self.sim.set_blob_counts(base, highlight)
    }

    /// Current config as a JSON document.
    pub fn export_config(&self) -> Result<String> {
        self.sim.config().to_json()
    }

    pub fn simulation(&self) -> &Simulation<R> {
        &self.sim
    }

    pub fn output(&self) -> &S {
        &self.output
    }

    pub fn pipeline(&self) -> &Pipeline<S> {
        &self.pipeline
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }
}

/// Collapses a run of failing frames into occasional log lines.
///
/// A new error message is always reported; a repeated one is reported again
/// each time its run length reaches a power of two.
#[derive(Debug, Default)]
pub struct FrameFailures {
    last: Option<String>,
    run: u64,
}

impl FrameFailures {
    /// Records a failed frame. Returns the line to log, if any.
    pub fn failed(&mut self, message: String) -> Option<String> {
        if self.last.as_deref() == Some(message.as_str()) {
            self.run += 1;
            return self
                .run
                .is_power_of_two()
                .then(|| format!("frame failed {} times in a row: {message}", self.run));
        }
        self.run = 1;
        let line = format!("frame failed: {message}");
        self.last = Some(message);
        Some(line)
    }

    /// Records a good frame. Returns a recovery line after a failing run.
    pub fn succeeded(&mut self) -> Option<String> {
        let message = self.last.take()?;
        let run = std::mem::take(&mut self.run);
        Some(format!("frames recovered after {run} failures ({message})"))
    }

    /// Length of the current failing run.
    pub fn run(&self) -> u64 {
        self.run
    }
}

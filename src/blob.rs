//! A single soft, pulsating blob.

use std::f64::consts::TAU;

use glam::DVec2;
use rand::Rng;

use crate::config::BoundaryPolicy;
use crate::error::Result;
use crate::palette::{self, Rgba};
use crate::simulation::Viewport;
use crate::surface::{BlendMode, ColorStop, Paint, Surface};

/// Smallest base radius a blob may get, whatever the viewport size.
pub const MIN_BASE_RADIUS: f64 = 1.0;

/// Alpha falloff of the radial gradient as `(offset, alpha factor)` pairs.
/// Ends fully transparent so no blob ever shows a hard edge.
pub const FALLOFF: [(f64, f64); 4] = [(0.0, 1.0), (0.4, 0.7), (0.7, 0.3), (1.0, 0.0)];

/// How far past an edge (as a fraction of radius) soft bounce kicks in.
const BOUNCE_MARGIN: f64 = 0.5;
/// Velocity added per frame while a blob sits beyond the bounce margin.
const BOUNCE_ACCEL: f64 = 0.05;
/// Per-frame decay applied while a blob moves faster than its cruise speed.
const DRAG: f64 = 0.97;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlobKind {
    Base,
    Highlight,
}

/// Per-kind tuning.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KindParams {
    /// Base radius range as a fraction of the viewport's shorter side.
    pub radius: (f64, f64),
    /// Half-range of the initial velocity on each axis.
    pub drift: DVec2,
    pub max_speed: f64,
    /// Pulse amplitude as a fraction of the base radius, below 1.
    pub pulse_amplitude: f64,
    pub pulse_speed: (f64, f64),
    pub blend: BlendMode,
}

const BASE_PARAMS: KindParams = KindParams {
    radius: (0.10, 0.28),
    drift: DVec2::new(0.25, 0.4),
    max_speed: 1.2,
    pulse_amplitude: 0.12,
    pulse_speed: (0.01, 0.03),
    blend: BlendMode::SourceOver,
};

const HIGHLIGHT_PARAMS: KindParams = KindParams {
    radius: (0.04, 0.10),
    drift: DVec2::new(0.6, 0.9),
    max_speed: 2.4,
    pulse_amplitude: 0.2,
    pulse_speed: (0.02, 0.05),
    blend: BlendMode::Overlay,
};

impl BlobKind {
    pub fn params(self) -> &'static KindParams {
        match self {
            BlobKind::Base => &BASE_PARAMS,
            BlobKind::Highlight => &HIGHLIGHT_PARAMS,
        }
    }

    pub fn blend(self) -> BlendMode {
        self.params().blend
    }

    pub fn max_speed(self) -> f64 {
        self.params().max_speed
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Blob {
    pub kind: BlobKind,
    pub position: DVec2,
    pub velocity: DVec2,
    pub radius: f64,
    pub base_radius: f64,
    /// Fixed for the blob's lifetime; alpha doubles as its opacity.
    pub color: Rgba,
    pub phase: f64,
    pub pulse_speed: f64,
}

impl Blob {
    /// Creates a blob of `kind` at a random spot inside `viewport`.
    pub fn spawn<R: Rng + ?Sized>(kind: BlobKind, viewport: Viewport, rng: &mut R) -> Self {
        let params = kind.params();
        let base_radius = (rng.gen_range(params.radius.0..params.radius.1)
            * viewport.min_extent())
        .max(MIN_BASE_RADIUS);
        let position = DVec2::new(
            rng.gen_range(0.0..viewport.width),
            rng.gen_range(0.0..viewport.height),
        );
        let velocity = DVec2::new(
            rng.gen_range(-params.drift.x..=params.drift.x),
            rng.gen_range(-params.drift.y..=params.drift.y),
        );
        let color = palette::pick(kind, rng);
        let phase = rng.gen_range(0.0..TAU);
        let pulse_speed = rng.gen_range(params.pulse_speed.0..params.pulse_speed.1);

        Self {
            kind,
            position,
            velocity,
            radius: base_radius,
            base_radius,
            color,
            phase,
            pulse_speed,
        }
    }

    pub fn opacity(&self) -> f64 {
        self.color.a
    }

    pub fn amplitude(&self) -> f64 {
        self.base_radius * self.kind.params().pulse_amplitude
    }

    pub fn speed(&self) -> f64 {
        self.velocity.length()
    }

    /// Advances the blob by one frame at simulation time `clock`.
    pub fn update<R: Rng + ?Sized>(
        &mut self,
        clock: u64,
        viewport: Viewport,
        policy: BoundaryPolicy,
        rng: &mut R,
    ) {
        let params = self.kind.params();

        self.relax(params.drift.length());
        if policy == BoundaryPolicy::SoftBounce {
            self.steer_inward(viewport);
        }
        self.clamp_speed(params.max_speed);

        self.position += self.velocity;
        self.radius =
            self.base_radius + self.amplitude() * (clock as f64 * self.pulse_speed + self.phase).sin();

        if policy == BoundaryPolicy::Wrap {
            self.wrap(viewport, rng);
        }
    }

    /// Bleeds off speed picked up above `cruise`, never dropping below it.
    fn relax(&mut self, cruise: f64) {
        let speed = self.speed();
        if speed > cruise {
            let target = (speed * DRAG).max(cruise);
            self.velocity *= target / speed;
        }
    }

    fn steer_inward(&mut self, viewport: Viewport) {
        let margin = self.radius * BOUNCE_MARGIN;
        if self.position.x < -margin {
            self.velocity.x += BOUNCE_ACCEL;
        } else if self.position.x > viewport.width + margin {
            self.velocity.x -= BOUNCE_ACCEL;
        }
        if self.position.y < -margin {
            self.velocity.y += BOUNCE_ACCEL;
        } else if self.position.y > viewport.height + margin {
            self.velocity.y -= BOUNCE_ACCEL;
        }
    }

    fn clamp_speed(&mut self, max_speed: f64) {
        self.velocity = self.velocity.clamp_length_max(max_speed);
    }

    /// Moves a blob that fully left the viewport, heading outward, to the
    /// opposite edge, just out of sight at its largest pulsed radius.
    fn wrap<R: Rng + ?Sized>(&mut self, viewport: Viewport, rng: &mut R) {
        let r = self.radius;
        let entry = self.base_radius + self.amplitude();
        if self.position.y - r > viewport.height && self.velocity.y > 0.0 {
            self.position.y = -entry;
            self.position.x = rng.gen_range(0.0..viewport.width);
        } else if self.position.y + r < 0.0 && self.velocity.y < 0.0 {
            self.position.y = viewport.height + entry;
            self.position.x = rng.gen_range(0.0..viewport.width);
        }
        if self.position.x - r > viewport.width && self.velocity.x > 0.0 {
            self.position.x = -entry;
            self.position.y = rng.gen_range(0.0..viewport.height);
        } else if self.position.x + r < 0.0 && self.velocity.x < 0.0 {
            self.position.x = viewport.width + entry;
            self.position.y = rng.gen_range(0.0..viewport.height);
        }
    }

    /// Radial gradient paint for the blob's current position and radius.
    pub fn paint(&self) -> Paint {
        Paint::Radial {
            center: self.position,
            radius: self.radius,
            stops: FALLOFF
                .iter()
                .map(|&(offset, factor)| ColorStop::new(offset, self.color.scale_alpha(factor)))
                .collect(),
        }
    }

    /// Fills the blob with `blend`, then puts the surface back on source-over.
    pub fn draw<S: Surface>(&self, surface: &mut S, blend: BlendMode) -> Result<()> {
        surface.set_blend(blend)?;
        surface.fill_circle(self.position, self.radius, &self.paint())?;
        surface.set_blend(BlendMode::SourceOver)
    }
}

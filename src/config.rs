//! Lamp configuration document.
//!
//! The JSON shape is
//!
//! ```json
//! {
//!   "blur": 40.0,
//!   "saturate": 140.0,
//!   "base_blobs": 8,
//!   "highlight_blobs": 4,
//!   "mouse_interaction": { "enabled": true, "distance": 150.0, "force": 0.6 }
//! }
//! ```
//!
//! `boundary`, `render_mode` and `buffer_scale` are optional and fall back to
//! soft bounce, buffered rendering and a quarter-size working surface.

use serde::{Deserialize, Serialize};

use crate::error::{LampError, Result};

/// Upper bound on either blob count; keeps a typo from freezing the tab.
pub const MAX_BLOBS: usize = 512;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BoundaryPolicy {
    /// Nudge blobs back inward once they drift past the edge.
    #[default]
    SoftBounce,
    /// Teleport blobs that fully left the viewport to the opposite edge.
    Wrap,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RenderMode {
    /// Draw into a low-resolution working surface, then blur while upscaling.
    #[default]
    Buffered,
    /// Draw at full resolution in several blurred, screen-blended passes.
    Layered,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MouseInteraction {
    pub enabled: bool,
    /// Radius around the pointer inside which blobs get pushed.
    pub distance: f64,
    /// Impulse at zero distance; falls off linearly to nothing at `distance`.
    pub force: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Blur radius in output pixels.
    pub blur: f64,
    /// Saturation in percent.
    pub saturate: f64,
    pub base_blobs: usize,
    pub highlight_blobs: usize,
    pub mouse_interaction: MouseInteraction,
    #[serde(default)]
    pub boundary: BoundaryPolicy,
    #[serde(default)]
    pub render_mode: RenderMode,
    #[serde(default = "default_buffer_scale")]
    pub buffer_scale: f64,
}

fn default_buffer_scale() -> f64 {
    0.25
}

impl Default for Config {
    fn default() -> Self {
        Self {
            blur: 40.0,
            saturate: 140.0,
            base_blobs: 8,
            highlight_blobs: 4,
            mouse_interaction: MouseInteraction {
                enabled: true,
                distance: 150.0,
                force: 0.6,
            },
            boundary: BoundaryPolicy::default(),
            render_mode: RenderMode::default(),
            buffer_scale: default_buffer_scale(),
        }
    }
}

impl Config {
    /// Parses and validates a JSON document.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Config = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Pretty JSON suitable for saving back to `config.json`.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<()> {
        non_negative("blur", self.blur)?;
        non_negative("saturate", self.saturate)?;
        if self.base_blobs > MAX_BLOBS || self.highlight_blobs > MAX_BLOBS {
            return Err(LampError::InvalidConfig(format!(
                "blob counts must not exceed {MAX_BLOBS} (got {} base, {} highlight)",
                self.base_blobs, self.highlight_blobs
            )));
        }
        if !(self.buffer_scale.is_finite() && self.buffer_scale > 0.0 && self.buffer_scale <= 1.0) {
            return Err(LampError::InvalidConfig(format!(
                "buffer_scale must be in (0, 1], got {}",
                self.buffer_scale
            )));
        }
        let mouse = &self.mouse_interaction;
        non_negative("mouse_interaction.force", mouse.force)?;
        if mouse.enabled && !(mouse.distance.is_finite() && mouse.distance > 0.0) {
            return Err(LampError::InvalidConfig(format!(
                "mouse_interaction.distance must be positive, got {}",
                mouse.distance
            )));
        }
        Ok(())
    }

    pub fn total_blobs(&self) -> usize {
        self.base_blobs + self.highlight_blobs
    }

    /// Boundary policy actually in force. Pointer pushes need soft bounce so
    /// shoved blobs drift back instead of reappearing elsewhere.
    pub fn effective_boundary(&self) -> BoundaryPolicy {
        if self.mouse_interaction.enabled {
            BoundaryPolicy::SoftBounce
        } else {
            self.boundary
        }
    }
}

fn non_negative(field: &str, value: f64) -> Result<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(LampError::InvalidConfig(format!(
            "{field} must be a non-negative number, got {value}"
        )))
    }
}

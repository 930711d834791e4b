//! Lava lamp canvas animation.
//!
//! Soft, pulsating pastel blobs drift across a canvas and are composited with
//! blur, saturation and blend modes. The simulation and render pipeline are
//! platform-agnostic; the `wasm` module binds them to a browser canvas.

pub mod blob;
pub mod config;
pub mod driver;
pub mod error;
pub mod interaction;
pub mod palette;
pub mod render;
pub mod simulation;
pub mod surface;

pub use blob::{Blob, BlobKind};
pub use config::{BoundaryPolicy, Config, MouseInteraction, RenderMode};
pub use driver::AnimationDriver;
pub use error::{LampError, Result};
pub use simulation::{Simulation, Viewport};
pub use surface::{BlendMode, Filter, Paint, Surface};

// Browser bindings only exist when targeting wasm32.
#[cfg(target_arch = "wasm32")]
pub mod wasm {
    use wasm_bindgen::prelude::*;

    pub mod canvas;
    mod render;

    pub use canvas::CanvasSurface;
    pub use render::LavaLamp;

    #[wasm_bindgen(start)]
    pub fn start() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).ok();
        log::info!("lava_wasm loaded");
        Ok(())
    }
}

use std::cell::RefCell;
use std::rc::Rc;

use log::{error, info, warn};
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{window, HtmlCanvasElement, MouseEvent, Response, Window};

use super::canvas::CanvasSurface;
use crate::config::Config;
use crate::driver::{AnimationDriver, FrameFailures};
use crate::error::LampError;

type SharedDriver = Rc<RefCell<AnimationDriver<CanvasSurface>>>;

/// Handle returned to JavaScript once the lamp is running.
///
/// Control panels call the config methods between frames; all of them run on
/// the page's main thread, so they never interleave with a tick.
#[wasm_bindgen]
pub struct LavaLamp {
    driver: SharedDriver,
}

#[wasm_bindgen]
impl LavaLamp {
    /// Fetches the config at `config_url`, sizes the canvas `canvas_id` to
    /// the window and starts the animation loop. A missing or malformed
    /// config rejects and nothing is drawn.
    pub async fn mount(canvas_id: String, config_url: String) -> Result<LavaLamp, JsValue> {
        let window = window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;
        let canvas = document
            .get_element_by_id(&canvas_id)
            .ok_or("canvas not found")?
            .dyn_into::<HtmlCanvasElement>()?;

        let config = match fetch_text(&window, &config_url).await.and_then(|json| Config::from_json(&json)) {
            Ok(config) => config,
            Err(err) => {
                error!("cannot start without a config: {err}");
                return Err(err.into());
            }
        };

        let (width, height) = viewport_size(&window);
        canvas.set_width(width);
        canvas.set_height(height);

        let output = CanvasSurface::new(canvas.clone())?;
        let working = CanvasSurface::offscreen(&document)?;
        let driver: SharedDriver = Rc::new(RefCell::new(AnimationDriver::new(output, working, config)?));

        listen_resize(&window, &driver)?;
        listen_pointer(&window, &canvas, &driver)?;
        start_loop(driver.clone())?;
        info!("lamp mounted on #{canvas_id}");

        Ok(LavaLamp { driver })
    }

    /// Replaces the config from a JSON string and rebuilds every blob.
    pub fn load_config(&self, json: &str) -> Result<(), JsValue> {
        Ok(self.driver.borrow_mut().load_config(json)?)
    }

    /// Restores the config the lamp was mounted with.
    pub fn reset_config(&self) -> Result<(), JsValue> {
        Ok(self.driver.borrow_mut().reset_config()?)
    }

    pub fn export_config(&self) -> Result<String, JsValue> {
        Ok(self.driver.borrow().export_config()?)
    }

    pub fn set_blob_counts(&self, base: u32, highlight: u32) -> Result<(), JsValue> {
        Ok(self
            .driver
            .borrow_mut()
            .set_blob_counts(base as usize, highlight as usize)?)
    }

    pub fn blob_count(&self) -> u32 {
        self.driver.borrow().simulation().blobs().len() as u32
    }
}

async fn fetch_text(window: &Window, url: &str) -> Result<String, LampError> {
    let response: Response = JsFuture::from(window.fetch_with_str(url))
        .await
        .map_err(|err| LampError::ConfigFetch(format!("{url}: {err:?}")))?
        .dyn_into()
        .map_err(|_| LampError::ConfigFetch(format!("{url}: not a fetch response")))?;
    if !response.ok() {
        return Err(LampError::ConfigFetch(format!("{url}: HTTP {}", response.status())));
    }
    let body = JsFuture::from(response.text()?).await?;
    body.as_string()
        .ok_or_else(|| LampError::ConfigFetch(format!("{url}: body is not text")))
}

fn viewport_size(window: &Window) -> (u32, u32) {
    let side = |value: Result<JsValue, JsValue>| {
        value.ok().and_then(|v| v.as_f64()).unwrap_or(0.0).max(0.0) as u32
    };
    (side(window.inner_width()), side(window.inner_height()))
}

fn listen_resize(window: &Window, driver: &SharedDriver) -> Result<(), JsValue> {
    let resize_closure = {
        let driver = driver.clone();
        Closure::wrap(Box::new(move || {
            let Some(window) = web_sys::window() else {
                return;
            };
            let (width, height) = viewport_size(&window);
            if let Err(err) = driver.borrow_mut().resize(width, height) {
                warn!("resize to {width}x{height} failed: {err}");
            }
        }) as Box<dyn FnMut()>)
    };
    window.add_event_listener_with_callback("resize", resize_closure.as_ref().unchecked_ref())?;
    resize_closure.forget();
    Ok(())
}

fn listen_pointer(
    window: &Window,
    canvas: &HtmlCanvasElement,
    driver: &SharedDriver,
) -> Result<(), JsValue> {
    let pointer_closure = {
        let driver = driver.clone();
        let canvas = canvas.clone();
        Closure::wrap(Box::new(move |event: MouseEvent| {
            let rect = canvas.get_bounding_client_rect();
            let x = f64::from(event.client_x()) - rect.left();
            let y = f64::from(event.client_y()) - rect.top();
            driver.borrow_mut().pointer_moved(x, y);
        }) as Box<dyn FnMut(MouseEvent)>)
    };
    window.add_event_listener_with_callback("pointermove", pointer_closure.as_ref().unchecked_ref())?;
    pointer_closure.forget();
    Ok(())
}

fn request_frame(callback: &Closure<dyn FnMut()>) -> Result<i32, JsValue> {
    window()
        .ok_or("no window")?
        .request_animation_frame(callback.as_ref().unchecked_ref())
}

/// Ticks the driver once per display refresh, forever.
fn start_loop(driver: SharedDriver) -> Result<(), JsValue> {
    // `f` holds the animation-frame closure so that it can keep requesting
    // itself. Storing it inside an `Option` allows the `Closure` to be created
    // first and then reached from within its own body.
    let f: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let g = f.clone();
    let mut failures = FrameFailures::default();
    *g.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        let result = driver.borrow_mut().tick();
        match result {
            Ok(()) => {
                if let Some(line) = failures.succeeded() {
                    info!("{line}");
                }
            }
            Err(err) => {
                if let Some(line) = failures.failed(err.to_string()) {
                    error!("{line}");
                }
            }
        }

        // schedule next
        if let Some(callback) = f.borrow().as_ref() {
            if let Err(err) = request_frame(callback) {
                error!("requestAnimationFrame failed: {err:?}");
            }
        }
    }) as Box<dyn FnMut()>));

    let first = g.borrow();
    request_frame(first.as_ref().ok_or("animation callback missing")?)?;
    Ok(())
}

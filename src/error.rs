use thiserror::Error;

/// Everything that can go wrong while loading or driving the lamp.
#[derive(Debug, Error)]
pub enum LampError {
    #[error("config fetch failed: {0}")]
    ConfigFetch(String),

    #[error("config is not valid JSON: {0}")]
    ConfigParse(#[from] serde_json::Error),

    #[error("invalid config: {0}")]
    InvalidConfig(String),

    #[error("browser call failed: {0}")]
    Js(String),
}

pub type Result<T> = std::result::Result<T, LampError>;

impl From<wasm_bindgen::JsValue> for LampError {
    fn from(value: wasm_bindgen::JsValue) -> Self {
        match value.as_string() {
            Some(message) => LampError::Js(message),
            None => LampError::Js(format!("{value:?}")),
        }
    }
}

#[cfg(target_arch = "wasm32")]
impl From<LampError> for wasm_bindgen::JsValue {
    fn from(err: LampError) -> Self {
        js_sys::Error::new(&err.to_string()).into()
    }
}

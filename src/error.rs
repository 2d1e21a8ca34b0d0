//! Error type shared by the initializers and the native tooling.

/// Result alias that carries [`FxError`].
pub type Result<T> = std::result::Result<T, FxError>;

/// Failures that disable a single feature. None of them is surfaced to the
/// visitor; callers log them and move on to the next feature.
#[derive(Debug, thiserror::Error)]
pub enum FxError {
    /// An element required by the markup contract is not in the document.
    #[error("missing element: {0}")]
    MissingElement(String),
    /// The preference store could not be read or written.
    #[error("preference storage unavailable: {0}")]
    Storage(String),
    /// The JSON configuration could not be parsed.
    #[error("invalid configuration: {0}")]
    Config(#[from] serde_json::Error),
    /// Wrapper around standard IO errors.
    #[error("{0}")]
    Io(#[from] std::io::Error),
    /// A frame could not be rasterized or encoded.
    #[error("export failed: {0}")]
    Export(String),
    /// A browser API call threw.
    #[cfg(target_arch = "wasm32")]
    #[error("browser call failed: {0}")]
    Js(String),
}

impl FxError {
    /// Shorthand for [`FxError::MissingElement`].
    pub fn missing<T: Into<String>>(what: T) -> Self {
        Self::MissingElement(what.into())
    }
}

#[cfg(target_arch = "wasm32")]
impl From<wasm_bindgen::JsValue> for FxError {
    fn from(value: wasm_bindgen::JsValue) -> Self {
        use wasm_bindgen::JsCast;
        let message = match value.dyn_ref::<js_sys::Error>() {
            Some(error) => String::from(error.message()),
            None => value.as_string().unwrap_or_else(|| format!("{value:?}")),
        };
        Self::Js(message)
    }
}

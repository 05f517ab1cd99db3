//! Errors raised while binding a carousel to the page.

use slidekit_core::CarouselError;
use wasm_bindgen::JsValue;

#[derive(thiserror::Error, Debug)]
#[non_exhaustive]
pub enum MountError {
    /// A required element is missing under the carousel root
    #[error("missing {anchor} (selector `{selector}`)")]
    MissingAnchor {
        anchor: &'static str,
        selector: String,
    },

    /// The browser rejected a selector or DOM call
    #[error("DOM error: {0}")]
    Dom(String),

    /// The root is already bound by an earlier mount
    #[error("carousel root is already mounted")]
    AlreadyMounted,

    /// No window/document (e.g. running in a worker)
    #[error("no browser window available")]
    NoWindow,

    #[error(transparent)]
    Carousel(#[from] CarouselError),

    /// Options passed from JS could not be decoded
    #[error("options error: {0}")]
    Options(String),
}

impl From<JsValue> for MountError {
    fn from(value: JsValue) -> Self {
        MountError::Dom(value.as_string().unwrap_or_else(|| format!("{value:?}")))
    }
}

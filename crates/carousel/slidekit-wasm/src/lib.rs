//! wasm-bindgen surface for SlideKit.
//!
//! Two entry points:
//! - [`mount_carousels`] binds every matching root in the document and drives
//!   the DOM directly.
//! - [`SlideKitCarousel`] is a headless controller: JS feeds it inputs and
//!   applies the returned effects itself.

use std::cell::RefCell;
use std::rc::Rc;

use js_sys::Function;
use log::{debug, info, warn};
use serde_wasm_bindgen as swb;
use wasm_bindgen::prelude::*;

use slidekit_core::{Carousel, CarouselConfig, Outputs, PointerInput, TimerToken, Viewport};

pub mod dom;
pub mod error;
pub mod logging;
pub mod normalize;
pub mod options;
pub mod platform;

pub use dom::DomCarousel;
pub use error::MountError;
pub use options::{MountOptions, Selectors};

thread_local! {
    static MOUNTS: RefCell<Vec<Rc<DomCarousel>>> = const { RefCell::new(Vec::new()) };
}

fn jsvalue_is_undefined_or_null(v: &JsValue) -> bool {
    v.is_undefined() || v.is_null()
}

fn decode_or_default<T>(value: JsValue, what: &str) -> Result<T, JsError>
where
    T: Default + serde::de::DeserializeOwned,
{
    if jsvalue_is_undefined_or_null(&value) {
        Ok(T::default())
    } else {
        swb::from_value(value).map_err(|e| JsError::new(&format!("{what} error: {e}")))
    }
}

fn decode_mount_options(value: JsValue) -> Result<MountOptions, MountError> {
    let options: MountOptions = if jsvalue_is_undefined_or_null(&value) {
        MountOptions::default()
    } else {
        swb::from_value(value).map_err(|e| MountError::Options(e.to_string()))?
    };
    options.config.validate()?;
    Ok(options)
}

/// Install the console logger. `level` is a `log` level name; defaults to `warn`.
#[wasm_bindgen]
pub fn init_logging(level: Option<String>) {
    logging::init(logging::parse_level(level.as_deref()));
}

/// Bind every carousel root in the document. Roots that fail to bind are
/// logged and skipped. Returns the number of carousels mounted by this call.
#[wasm_bindgen]
pub fn mount_carousels(options: JsValue) -> Result<u32, JsError> {
    console_error_panic_hook::set_once();
    let options = decode_mount_options(options).map_err(|e| JsError::new(&e.to_string()))?;

    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| JsError::new(&MountError::NoWindow.to_string()))?;
    let roots = document
        .query_selector_all(&options.selectors.root)
        .map_err(|e| JsError::new(&MountError::from(e).to_string()))?;

    let mut mounted = 0u32;
    for i in 0..roots.length() {
        let Some(root) = roots.get(i).and_then(|n| n.dyn_into::<web_sys::Element>().ok()) else {
            continue;
        };
        match DomCarousel::mount(&root, &options) {
            Ok(view) => {
                MOUNTS.with(|m| m.borrow_mut().push(view));
                mounted += 1;
            }
            Err(MountError::AlreadyMounted) => debug!("carousel {i} already mounted"),
            Err(err) => warn!("carousel {i} skipped: {err}"),
        }
    }
    info!("mounted {mounted} carousel(s)");
    Ok(mounted)
}

/// Tear down every carousel mounted by [`mount_carousels`].
#[wasm_bindgen]
pub fn unmount_carousels() -> u32 {
    let views: Vec<Rc<DomCarousel>> = MOUNTS.with(|m| m.borrow_mut().drain(..).collect());
    for view in &views {
        view.teardown();
    }
    views.len() as u32
}

/// Numeric ABI version for compatibility checks at init.
#[wasm_bindgen]
pub fn abi_version() -> u32 {
    1
}

/// Headless controller. Every method returns the `Outputs` of that call as a
/// plain JS object (`{ effects, events }`).
#[wasm_bindgen]
pub struct SlideKitCarousel {
    core: Carousel,
    on_event: Option<Function>,
}

#[wasm_bindgen]
impl SlideKitCarousel {
    /// `viewport` is `{ width, container_width }`; `config` may be undefined.
    #[wasm_bindgen(constructor)]
    pub fn new(
        slide_count: u32,
        viewport: JsValue,
        config: JsValue,
    ) -> Result<SlideKitCarousel, JsError> {
        console_error_panic_hook::set_once();
        let viewport: Viewport = swb::from_value(viewport)
            .map_err(|e| JsError::new(&format!("viewport error: {e}")))?;
        let config: CarouselConfig = decode_or_default(config, "config")?;
        let core = Carousel::new(config, slide_count as usize, viewport)
            .map_err(|e| JsError::new(&e.to_string()))?;
        Ok(SlideKitCarousel {
            core,
            on_event: None,
        })
    }

    /// Register a callback invoked once per emitted event. Pass undefined to clear.
    #[wasm_bindgen(js_name = on_event)]
    pub fn on_event(&mut self, callback: JsValue) {
        self.on_event = callback.dyn_into::<Function>().ok();
    }

    pub fn mount(&mut self) -> Result<JsValue, JsError> {
        let out = self.core.mount().clone();
        self.finish(out)
    }

    /// Navigate to `slot`; out-of-range slots clamp or wrap per mode.
    #[wasm_bindgen(js_name = go_to_page)]
    pub fn go_to_page(&mut self, slot: i32) -> Result<JsValue, JsError> {
        let out = self.core.go_to_page(i64::from(slot)).clone();
        self.finish(out)
    }

    pub fn next(&mut self) -> Result<JsValue, JsError> {
        let out = self.core.next().clone();
        self.finish(out)
    }

    pub fn prev(&mut self) -> Result<JsValue, JsError> {
        let out = self.core.prev().clone();
        self.finish(out)
    }

    #[wasm_bindgen(js_name = activate_indicator)]
    pub fn activate_indicator(&mut self, page: u32) -> Result<JsValue, JsError> {
        let out = self.core.activate_indicator(page as usize).clone();
        self.finish(out)
    }

    pub fn resize(&mut self, viewport: JsValue) -> Result<JsValue, JsError> {
        let viewport: Viewport = swb::from_value(viewport)
            .map_err(|e| JsError::new(&format!("viewport error: {e}")))?;
        viewport.validate().map_err(|e| JsError::new(&e.to_string()))?;
        let out = self.core.resize(viewport).clone();
        self.finish(out)
    }

    /// `input` is `{ kind: "down" | "move" | "up" | "cancel", x, y }`.
    pub fn pointer(&mut self, input: JsValue) -> Result<JsValue, JsError> {
        let input: PointerInput = swb::from_value(input)
            .map_err(|e| JsError::new(&format!("pointer error: {e}")))?;
        let out = self.core.pointer(input).clone();
        self.finish(out)
    }

    #[wasm_bindgen(js_name = timer_fired)]
    pub fn timer_fired(&mut self, token: u32) -> Result<JsValue, JsError> {
        let out = self.core.timer_fired(TimerToken(token)).clone();
        self.finish(out)
    }

    pub fn destroy(&mut self) -> Result<JsValue, JsError> {
        let out = self.core.destroy().clone();
        self.finish(out)
    }

    /// Snapshot of the controller state.
    pub fn state(&self) -> Result<JsValue, JsError> {
        swb::to_value(&self.core.state()).map_err(|e| JsError::new(&format!("state error: {e}")))
    }
}

impl SlideKitCarousel {
    fn finish(&self, out: Outputs) -> Result<JsValue, JsError> {
        if let Some(callback) = &self.on_event {
            for event in &out.events {
                let value = swb::to_value(event)
                    .map_err(|e| JsError::new(&format!("event error: {e}")))?;
                if let Err(err) = callback.call1(&JsValue::UNDEFINED, &value) {
                    warn!("on_event callback threw: {err:?}");
                }
            }
        }
        swb::to_value(&out).map_err(|e| JsError::new(&format!("outputs error: {e}")))
    }
}

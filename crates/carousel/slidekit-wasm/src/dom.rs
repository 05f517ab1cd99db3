//! DOM host: binds one carousel root to a core [`Carousel`].
//!
//! Listeners and timers only hold `Weak` references to the mount, so once the
//! mount is dropped any late callback is a no-op.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use gloo::events::{EventListener, EventListenerOptions, EventListenerPhase};
use gloo::timers::callback::Timeout;
use hashbrown::HashMap;
use log::{debug, trace, warn};
use slidekit_core::{
    Carousel, CarouselEvent, ClonePlan, Effect, IndicatorPatch, IndicatorSet, Outputs,
    TimerToken,
};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{
    CustomEvent, CustomEventInit, Document, Element, Event, HtmlElement, Node, Window,
};

use crate::error::MountError;
use crate::normalize::{pointer_from_event, POINTER_EVENTS};
use crate::options::{MountOptions, Selectors};
use crate::platform;

const NON_PASSIVE: EventListenerOptions = EventListenerOptions {
    phase: EventListenerPhase::Bubble,
    passive: false,
};

/// Set on a root while it is bound, so a second scan leaves it alone.
pub const MOUNTED_ATTR: &str = "data-slidekit-mounted";

const PASSIVE: EventListenerOptions = EventListenerOptions {
    phase: EventListenerPhase::Bubble,
    passive: true,
};

struct Parts {
    root: HtmlElement,
    track: HtmlElement,
    slides: Vec<HtmlElement>,
    dots: Element,
    arrow_left: Option<Element>,
    arrow_right: Option<Element>,
}

struct IndicatorButton {
    element: HtmlElement,
    _click: EventListener,
}

pub struct DomCarousel {
    core: RefCell<Carousel>,
    parts: Parts,
    selectors: Selectors,
    transition: String,
    emit_dom_events: bool,
    window: Window,
    document: Document,
    clones: RefCell<Vec<HtmlElement>>,
    indicators: RefCell<Vec<IndicatorButton>>,
    timers: RefCell<HashMap<TimerToken, Timeout>>,
    listeners: RefCell<Vec<EventListener>>,
}

fn find(parent: &Element, selector: &str) -> Result<Option<Element>, MountError> {
    Ok(parent.query_selector(selector)?)
}

fn require(parent: &Element, selector: &str, anchor: &'static str) -> Result<Element, MountError> {
    find(parent, selector)?.ok_or_else(|| MountError::MissingAnchor {
        anchor,
        selector: selector.to_string(),
    })
}

fn as_html(element: Element, anchor: &'static str, selector: &str) -> Result<HtmlElement, MountError> {
    element
        .dyn_into::<HtmlElement>()
        .map_err(|_| MountError::MissingAnchor {
            anchor,
            selector: selector.to_string(),
        })
}

fn set_style(element: &HtmlElement, property: &str, value: &str) {
    if let Err(err) = element.style().set_property(property, value) {
        trace!("style {property} rejected: {err:?}");
    }
}

fn clear_style(element: &HtmlElement, property: &str) {
    let _ = element.style().remove_property(property);
}

impl Parts {
    fn locate(root: &Element, selectors: &Selectors) -> Result<Self, MountError> {
        let track = require(root, &selectors.track, "track")?;
        let slides_list = track.query_selector_all(&selectors.slide)?;
        let slides: Vec<HtmlElement> = (0..slides_list.length())
            .filter_map(|i| slides_list.get(i))
            .filter_map(|node| node.dyn_into::<HtmlElement>().ok())
            .filter(|slide| !slide.class_list().contains(&selectors.clone_class))
            .collect();
        if slides.is_empty() {
            return Err(MountError::MissingAnchor {
                anchor: "slides",
                selector: selectors.slide.clone(),
            });
        }

        let controls = find(root, &selectors.controls)?;
        let scope = controls.as_ref().unwrap_or(root);
        let dots = require(scope, &selectors.dots, "indicator container")?;
        let arrow_left = find(scope, &selectors.arrow_left)?;
        let arrow_right = find(scope, &selectors.arrow_right)?;

        Ok(Parts {
            root: as_html(root.clone(), "root", &selectors.root)?,
            track: as_html(track, "track", &selectors.track)?,
            slides,
            dots,
            arrow_left,
            arrow_right,
        })
    }
}

impl DomCarousel {
    /// Bind `root`, install listeners and perform the initial settle.
    pub fn mount(root: &Element, options: &MountOptions) -> Result<Rc<Self>, MountError> {
        if root.has_attribute(MOUNTED_ATTR) {
            return Err(MountError::AlreadyMounted);
        }
        let window = web_sys::window().ok_or(MountError::NoWindow)?;
        let document = window.document().ok_or(MountError::NoWindow)?;
        let parts = Parts::locate(root, &options.selectors)?;

        let mut config = options.config.clone();
        if let Some(exclusion) = &options.gesture_exclusion {
            if root.closest(exclusion)?.is_some() {
                debug!("gestures disabled for root inside `{exclusion}`");
                config.gestures_enabled = false;
            }
        }

        let viewport = platform::measure(&window, &parts.root);
        let transition = config.transition.clone();
        let core = Carousel::new(config, parts.slides.len(), viewport)?;

        let view = Rc::new(DomCarousel {
            core: RefCell::new(core),
            parts,
            selectors: options.selectors.clone(),
            transition,
            emit_dom_events: options.emit_dom_events,
            window,
            document,
            clones: RefCell::new(Vec::new()),
            indicators: RefCell::new(Vec::new()),
            timers: RefCell::new(HashMap::new()),
            listeners: RefCell::new(Vec::new()),
        });
        root.set_attribute(MOUNTED_ATTR, "")?;
        view.install_listeners();
        view.dispatch(None, |c| c.mount().clone());
        Ok(view)
    }

    /// Cancel timers, drop listeners, remove generated nodes and inline styles.
    pub fn teardown(self: &Rc<Self>) {
        self.dispatch(None, |c| c.destroy().clone());
        self.listeners.borrow_mut().clear();
        self.timers.borrow_mut().clear();
        for button in self.indicators.borrow_mut().drain(..) {
            button.element.remove();
        }
        self.reset_to_grid();
        clear_style(&self.parts.track, "transform");
        clear_style(&self.parts.track, "transition");
        clear_style(&self.parts.root, "touch-action");
        let _ = self.parts.root.remove_attribute(MOUNTED_ATTR);
    }

    /// Refresh measurements, run `op` on the core, then apply its outputs.
    fn dispatch<F>(self: &Rc<Self>, event: Option<&Event>, op: F)
    where
        F: FnOnce(&mut Carousel) -> Outputs,
    {
        let viewport = platform::measure(&self.window, &self.parts.root);
        let outputs = {
            let mut core = self.core.borrow_mut();
            if let Err(err) = core.observe_viewport(viewport) {
                warn!("stale measurements kept: {err}");
            }
            op(&mut core)
        };
        self.apply(&outputs, event);
    }

    fn apply(self: &Rc<Self>, outputs: &Outputs, event: Option<&Event>) {
        for effect in &outputs.effects {
            match effect {
                Effect::SizeSlides { sizing } => {
                    let flex = sizing.flex_css();
                    let max_width = sizing.max_width_css();
                    for slide in self.all_slides() {
                        set_style(&slide, "flex", &flex);
                        set_style(&slide, "max-width", &max_width);
                    }
                    set_style(&self.parts.track, "width", "100%");
                }
                Effect::SpliceClones { plan } => self.splice_clones(plan),
                Effect::Translate { offset } => {
                    set_style(&self.parts.track, "transform", &offset.to_css());
                }
                Effect::SetTransition { enabled } => {
                    let value = if *enabled { self.transition.as_str() } else { "none" };
                    set_style(&self.parts.track, "transition", value);
                }
                Effect::SetGrabbing { grabbing } => {
                    if *grabbing {
                        set_style(&self.parts.track, "cursor", "grabbing");
                    } else {
                        clear_style(&self.parts.track, "cursor");
                    }
                }
                Effect::PreventDefault => {
                    if let Some(event) = event {
                        event.prevent_default();
                    }
                }
                Effect::FitHeight { slide } => {
                    if let Some(slide) = self.parts.slides.get(*slide) {
                        let height = format!("{}px", slide.offset_height());
                        set_style(&self.parts.track, "height", &height);
                    }
                }
                Effect::Indicators { patch } => self.patch_indicators(patch),
                Effect::ResetToGrid => self.reset_to_grid(),
                Effect::ScheduleTimer {
                    token, delay_ms, ..
                } => self.schedule(*token, *delay_ms),
                Effect::CancelTimer { token } => {
                    self.timers.borrow_mut().remove(token);
                }
            }
        }
        if self.emit_dom_events {
            for event in &outputs.events {
                self.emit(event);
            }
        }
    }

    fn all_slides(&self) -> Vec<HtmlElement> {
        self.parts
            .slides
            .iter()
            .cloned()
            .chain(self.clones.borrow().iter().cloned())
            .collect()
    }

    fn remove_clones(&self) {
        for clone in self.clones.borrow_mut().drain(..) {
            clone.remove();
        }
    }

    fn clone_slide(&self, index: usize) -> Option<HtmlElement> {
        let source = self.parts.slides.get(index)?;
        let copy = source
            .clone_node_with_deep(true)
            .ok()?
            .dyn_into::<HtmlElement>()
            .ok()?;
        let _ = copy.class_list().add_1(&self.selectors.clone_class);
        let _ = copy.set_attribute("aria-hidden", "true");
        Some(copy)
    }

    fn splice_clones(&self, plan: &ClonePlan) {
        self.remove_clones();
        let Some(first) = self.parts.slides.first() else {
            return;
        };
        let first: &Node = first;
        let mut clones = Vec::with_capacity(plan.leading.len() + plan.trailing.len());
        for index in plan.leading.clone() {
            if let Some(copy) = self.clone_slide(index) {
                if self.parts.track.insert_before(&copy, Some(first)).is_ok() {
                    clones.push(copy);
                }
            }
        }
        for index in plan.trailing.clone() {
            if let Some(copy) = self.clone_slide(index) {
                if self.parts.track.append_child(&copy).is_ok() {
                    clones.push(copy);
                }
            }
        }
        *self.clones.borrow_mut() = clones;
    }

    fn reset_to_grid(&self) {
        self.remove_clones();
        let track = &self.parts.track;
        set_style(track, "transform", "none");
        set_style(track, "transition", "none");
        clear_style(track, "height");
        clear_style(track, "width");
        clear_style(track, "cursor");
        for slide in &self.parts.slides {
            clear_style(slide, "flex");
            clear_style(slide, "max-width");
        }
    }

    fn patch_indicators(self: &Rc<Self>, patch: &IndicatorPatch) {
        match patch {
            IndicatorPatch::Unchanged => {}
            IndicatorPatch::SetActive { previous, current } => {
                let buttons = self.indicators.borrow();
                let active = &self.selectors.active_class;
                if let Some(prev) = previous.and_then(|p| buttons.get(p)) {
                    let _ = prev.element.class_list().remove_1(active);
                }
                if let Some(cur) = buttons.get(*current) {
                    let _ = cur.element.class_list().add_1(active);
                }
            }
            IndicatorPatch::Rebuild(set) => self.rebuild_indicators(set),
        }
    }

    fn rebuild_indicators(self: &Rc<Self>, set: &IndicatorSet) {
        self.indicators.borrow_mut().clear();
        self.parts.dots.set_inner_html("");

        let mut buttons = Vec::with_capacity(set.len());
        for indicator in &set.indicators {
            let element = match self
                .document
                .create_element("button")
                .map(|e| e.dyn_into::<HtmlElement>())
            {
                Ok(Ok(element)) => element,
                _ => {
                    warn!("could not create indicator button");
                    return;
                }
            };
            element.set_class_name(&self.selectors.indicator_class);
            let _ = element.set_attribute("type", "button");
            let _ = element.set_attribute("aria-label", &indicator.label);
            if indicator.active {
                let _ = element.class_list().add_1(&self.selectors.active_class);
            }

            let weak = Rc::downgrade(self);
            let page = indicator.page;
            let click = EventListener::new(&element, "click", move |_event| {
                if let Some(view) = weak.upgrade() {
                    view.dispatch(None, |c| c.activate_indicator(page).clone());
                }
            });
            if self.parts.dots.append_child(&element).is_ok() {
                buttons.push(IndicatorButton {
                    element,
                    _click: click,
                });
            }
        }
        *self.indicators.borrow_mut() = buttons;
    }

    fn schedule(self: &Rc<Self>, token: TimerToken, delay_ms: u32) {
        let weak: Weak<Self> = Rc::downgrade(self);
        let timeout = Timeout::new(delay_ms, move || {
            let Some(view) = weak.upgrade() else {
                return;
            };
            let handle = view.timers.borrow_mut().remove(&token);
            view.dispatch(None, |c| c.timer_fired(token).clone());
            drop(handle);
        });
        self.timers.borrow_mut().insert(token, timeout);
    }

    fn emit(&self, event: &CarouselEvent) {
        let name = match event {
            CarouselEvent::PageChanged { .. } => "pagechange",
            CarouselEvent::SnapCompleted { .. } => "snapend",
            CarouselEvent::SwipeCommitted { .. } => "swipe",
            CarouselEvent::Parked => "park",
            _ => return,
        };
        let detail = serde_wasm_bindgen::to_value(event).unwrap_or(JsValue::NULL);
        let init = CustomEventInit::new();
        init.set_detail(&detail);
        match CustomEvent::new_with_event_init_dict(&format!("slidekit:{name}"), &init) {
            Ok(custom) => {
                let _ = self.parts.root.dispatch_event(&custom);
            }
            Err(err) => trace!("could not build slidekit:{name}: {err:?}"),
        }
    }

    fn install_listeners(self: &Rc<Self>) {
        let mut listeners = Vec::new();
        let root = self.parts.root.clone();
        let ios = platform::is_ios(&self.window);

        let _ = root.style().set_property("touch-action", "pan-y");

        for event_type in POINTER_EVENTS {
            // iOS only honours preventDefault on a non-passive touchmove; a
            // passive touchstart keeps scrolling responsive there.
            let options = if ios && event_type != "touchmove" && event_type.starts_with("touch") {
                PASSIVE
            } else {
                NON_PASSIVE
            };
            let weak = Rc::downgrade(self);
            listeners.push(EventListener::new_with_options(
                &root,
                event_type,
                options,
                move |event: &Event| {
                    let Some(view) = weak.upgrade() else {
                        return;
                    };
                    if let Some(input) = pointer_from_event(event) {
                        view.dispatch(Some(event), |c| c.pointer(input).clone());
                    }
                },
            ));
        }

        if ios {
            for event_type in ["gesturestart", "gesturechange", "gestureend"] {
                listeners.push(EventListener::new_with_options(
                    &root,
                    event_type,
                    NON_PASSIVE,
                    |event: &Event| event.prevent_default(),
                ));
            }
        }

        let weak = Rc::downgrade(self);
        listeners.push(EventListener::new_with_options(
            &root,
            "contextmenu",
            NON_PASSIVE,
            move |event: &Event| {
                if let Some(view) = weak.upgrade() {
                    if view.core.borrow().is_mobile() {
                        event.prevent_default();
                    }
                }
            },
        ));

        for (arrow, forward) in [(&self.parts.arrow_left, false), (&self.parts.arrow_right, true)] {
            let Some(arrow) = arrow else {
                continue;
            };
            let weak = Rc::downgrade(self);
            listeners.push(EventListener::new(arrow, "click", move |_event| {
                if let Some(view) = weak.upgrade() {
                    if forward {
                        view.dispatch(None, |c| c.next().clone());
                    } else {
                        view.dispatch(None, |c| c.prev().clone());
                    }
                }
            }));
        }

        let weak = Rc::downgrade(self);
        listeners.push(EventListener::new(&self.window, "resize", move |_event| {
            if let Some(view) = weak.upgrade() {
                let viewport = platform::measure(&view.window, &view.parts.root);
                view.dispatch(None, |c| c.resize(viewport).clone());
            }
        }));

        *self.listeners.borrow_mut() = listeners;
    }
}

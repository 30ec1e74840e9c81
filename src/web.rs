//! Browser bindings.
//!
//! Exposes the typewriter to JavaScript as a `Typewriter` class plus the
//! `initTypewritersFromDOM` / `initTypewriters` discovery entry points.
//! Nothing runs at load time: the host calls one of the entry points once.
//!
//! ```js
//! import init, { Typewriter, initTypewriters, injectCursorStyles } from "typewriter_core";
//!
//! await init();
//! injectCursorStyles();
//! const instances = await initTypewriters();
//! const hero = new Typewriter("#hero", { texts: ["Fast", "Small"], loop: false });
//! ```

use std::cell::RefCell;
use std::rc::Rc;

use js_sys::{Array, Function, JsString, Promise, Reflect};
use tracing::{error, warn};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Document, DocumentReadyState, Element, HtmlElement};

use crate::animation::{Schedule, Typewriter, TypewriterHooks};
use crate::config::{DEFAULT_CURSOR_CHAR, DEFAULT_DELETE_SPEED, DEFAULT_INTER_TEXT_PAUSE};
use crate::config::{DEFAULT_PAUSE_TIME, DEFAULT_TYPE_SPEED};
use crate::discovery::{discover, AttributeSource, DiscoveryHost, MARKER_ATTR};
use crate::driver::PendingKind;
use crate::jitter::{Jitter, MAX_JITTER_MS};
use crate::surface::web::{ElementSurface, SelectorResolver};
use crate::surface::{cursor_stylesheet, TargetResolver};
use crate::{LoopMode, TypewriterError, TypewriterOptions};

const STYLE_ELEMENT_ID: &str = "typewriter-cursor-styles";

/// Jitter from `Math.random`.
#[derive(Clone, Copy, Debug, Default)]
pub struct MathRandomJitter;

impl Jitter for MathRandomJitter {
    fn jitter_ms(&mut self) -> u32 {
        let jitter = (js_sys::Math::random() * f64::from(MAX_JITTER_MS)) as u32;
        jitter.min(MAX_JITTER_MS - 1)
    }
}

fn document() -> Result<Document, JsValue> {
    let window = web_sys::window().ok_or("No window available")?;
    Ok(window.document().ok_or("No document available")?)
}

impl AttributeSource for Element {
    fn attribute(&self, name: &str) -> Option<String> {
        self.get_attribute(name)
    }
}

/// Scans a document for `[data-typewriter]` elements.
#[derive(Clone, Debug)]
pub struct DomDiscovery {
    document: Document,
}

impl DomDiscovery {
    pub fn new(document: Document) -> Self {
        Self { document }
    }
}

impl DiscoveryHost for DomDiscovery {
    type Element = Element;
    type Surface = ElementSurface;

    fn marked_elements(&self) -> Vec<Element> {
        let selector = format!("[{MARKER_ATTR}]");
        let Ok(nodes) = self.document.query_selector_all(&selector) else {
            return Vec::new();
        };
        (0..nodes.length())
            .filter_map(|i| nodes.item(i))
            .filter_map(|node| node.dyn_into::<Element>().ok())
            .collect()
    }

    fn surface(&self, element: &Element) -> Result<ElementSurface, TypewriterError> {
        ElementSurface::from_element(element.clone())
    }
}

/// JavaScript callbacks from the options object.
#[derive(Clone, Debug, Default)]
struct JsHooks {
    on_type: Option<Function>,
    on_delete: Option<Function>,
    on_complete: Option<Function>,
}

/// Hook invocations recorded during a tick, dispatched once no borrow is held.
#[derive(Debug)]
enum HookEvent {
    Type(String),
    Delete(String),
    Complete,
}

type EventQueue = Rc<RefCell<Vec<HookEvent>>>;

impl JsHooks {
    /// Rust hooks that only record events; JS runs after the tick returns so
    /// a callback may safely call back into the instance.
    fn queueing(&self, queue: &EventQueue) -> TypewriterHooks {
        let mut hooks = TypewriterHooks::new();
        if self.on_type.is_some() {
            let queue = queue.clone();
            hooks = hooks.on_type(move |text| {
                queue.borrow_mut().push(HookEvent::Type(text.to_string()));
            });
        }
        if self.on_delete.is_some() {
            let queue = queue.clone();
            hooks = hooks.on_delete(move |text| {
                queue.borrow_mut().push(HookEvent::Delete(text.to_string()));
            });
        }
        if self.on_complete.is_some() {
            let queue = queue.clone();
            hooks = hooks.on_complete(move || queue.borrow_mut().push(HookEvent::Complete));
        }
        hooks
    }

    fn dispatch(&self, events: Vec<HookEvent>) {
        for event in events {
            let result = match &event {
                HookEvent::Type(text) => self
                    .on_type
                    .as_ref()
                    .map(|f| f.call1(&JsValue::NULL, &JsValue::from_str(text))),
                HookEvent::Delete(text) => self
                    .on_delete
                    .as_ref()
                    .map(|f| f.call1(&JsValue::NULL, &JsValue::from_str(text))),
                HookEvent::Complete => self.on_complete.as_ref().map(|f| f.call0(&JsValue::NULL)),
            };
            if let Some(Err(err)) = result {
                warn!(?event, ?err, "typewriter callback threw");
            }
        }
    }
}

fn prop(options: &JsValue, key: &str) -> Option<JsValue> {
    Reflect::get(options, &JsValue::from_str(key))
        .ok()
        .filter(|v| !v.is_undefined() && !v.is_null())
}

fn ms_prop(options: &JsValue, key: &str, default: u32) -> u32 {
    prop(options, key)
        .and_then(|v| v.as_f64())
        .filter(|ms| ms.is_finite() && *ms >= 0.0)
        .map(|ms| ms.min(f64::from(u32::MAX)) as u32)
        .unwrap_or(default)
}

/// Absent flags default to `true`; any present value, `null` included, is
/// read for its truthiness.
fn flag_prop(options: &JsValue, key: &str) -> bool {
    match Reflect::get(options, &JsValue::from_str(key)) {
        Ok(value) if !value.is_undefined() => value.is_truthy(),
        _ => true,
    }
}

/// Every entry converted the way `String(value)` does.
fn strings(array: &Array) -> Vec<String> {
    array
        .iter()
        .map(|value| match value.as_string() {
            Some(text) => text,
            None => String::from(JsString::from("").concat(&value)),
        })
        .collect()
}

/// Read an options object; unknown keys are ignored and bad values default.
fn read_options(options: &JsValue) -> (TypewriterOptions, JsHooks) {
    if options.is_undefined() || options.is_null() {
        return (TypewriterOptions::default(), JsHooks::default());
    }

    let defaults = TypewriterOptions::default();
    let texts = prop(options, "texts")
        .and_then(|v| v.dyn_into::<Array>().ok())
        .map(|a| strings(&a))
        .unwrap_or(defaults.texts);
    let cursor_char = prop(options, "cursorChar")
        .and_then(|v| v.as_string())
        .filter(|glyph| !glyph.is_empty())
        .unwrap_or_else(|| DEFAULT_CURSOR_CHAR.to_string());

    let parsed = TypewriterOptions {
        texts,
        type_speed: ms_prop(options, "typeSpeed", DEFAULT_TYPE_SPEED),
        delete_speed: ms_prop(options, "deleteSpeed", DEFAULT_DELETE_SPEED),
        pause_time: ms_prop(options, "pauseTime", DEFAULT_PAUSE_TIME),
        inter_text_pause: ms_prop(options, "interTextPause", DEFAULT_INTER_TEXT_PAUSE),
        loop_mode: LoopMode::from(flag_prop(options, "loop")),
        cursor: flag_prop(options, "cursor"),
        cursor_char,
        start_delay: ms_prop(options, "startDelay", 0),
    };

    let callback = |key| prop(options, key).and_then(|v| v.dyn_into::<Function>().ok());
    let hooks = JsHooks {
        on_type: callback("onType"),
        on_delete: callback("onDelete"),
        on_complete: callback("onComplete"),
    };

    (parsed, hooks)
}

/// A target given either as a selector string or as an element.
fn resolve_target(target: &JsValue) -> Option<ElementSurface> {
    if let Some(selector) = target.as_string() {
        let document = document().ok()?;
        return SelectorResolver::new(document).resolve(&selector);
    }
    target.clone().dyn_into::<HtmlElement>().ok().map(ElementSurface::new)
}

struct Inner {
    typewriter: Typewriter<ElementSurface>,
    hooks: JsHooks,
    events: EventQueue,
    /// Handle of the pending `setTimeout`, cleared to cancel
    timeout: Option<i32>,
    pending: PendingKind,
    /// Strong self-reference held while a timer is pending, so an instance
    /// JS no longer references keeps animating
    keep_alive: Option<Shared>,
    /// Set while JS callbacks run
    dispatching: bool,
    callback: Option<Closure<dyn FnMut()>>,
}

impl Inner {
    fn cancel(&mut self) {
        if let Some(handle) = self.timeout.take() {
            if let Some(window) = web_sys::window() {
                window.clear_timeout_with_handle(handle);
            }
        }
        self.keep_alive = None;
    }
}

impl Drop for Inner {
    fn drop(&mut self) {
        self.cancel();
    }
}

type Shared = Rc<RefCell<Inner>>;

fn on_timer(shared: &Shared) {
    let kind = {
        let mut inner = shared.borrow_mut();
        inner.timeout = None;
        inner.keep_alive = None;
        inner.pending
    };
    match kind {
        PendingKind::Start => start(shared),
        PendingKind::Tick => tick(shared),
    }
}

fn start(shared: &Shared) {
    let (schedule, dispatching) = {
        let mut inner = shared.borrow_mut();
        (inner.typewriter.start(), inner.dispatching)
    };
    match schedule {
        // From inside a callback the first tick goes through the timer, so a
        // restart from `onComplete` cannot recurse.
        Schedule::Tick { after_ms: 0 } if !dispatching => tick(shared),
        Schedule::Idle => {}
        schedule => schedule_next(shared, schedule),
    }
}

fn tick(shared: &Shared) {
    let schedule = shared.borrow_mut().typewriter.tick();
    schedule_next(shared, schedule);
    dispatch_hooks(shared);
}

fn dispatch_hooks(shared: &Shared) {
    let (events, hooks, outer) = {
        let mut inner = shared.borrow_mut();
        let events = std::mem::take(&mut *inner.events.borrow_mut());
        let outer = std::mem::replace(&mut inner.dispatching, true);
        (events, inner.hooks.clone(), outer)
    };
    if !events.is_empty() {
        hooks.dispatch(events);
    }
    shared.borrow_mut().dispatching = outer;
}

fn schedule_next(shared: &Shared, schedule: Schedule) {
    let mut inner = shared.borrow_mut();
    inner.cancel();

    let (kind, after_ms) = match schedule {
        Schedule::Start { after_ms } => (PendingKind::Start, after_ms),
        Schedule::Tick { after_ms } => (PendingKind::Tick, after_ms),
        Schedule::Idle => return,
    };
    let Some(window) = web_sys::window() else {
        return;
    };
    let Some(callback) = inner.callback.as_ref() else {
        return;
    };

    let timeout = i32::try_from(after_ms).unwrap_or(i32::MAX);
    let scheduled = window.set_timeout_with_callback_and_timeout_and_arguments_0(
        callback.as_ref().unchecked_ref(),
        timeout,
    );
    match scheduled {
        Ok(handle) => {
            inner.timeout = Some(handle);
            inner.pending = kind;
            inner.keep_alive = Some(Rc::clone(shared));
        }
        Err(err) => warn!(?err, "failed to schedule typewriter timer"),
    }
}

/// Typewriter animation bound to a DOM element.
///
/// A running instance stays alive while it has a timer pending, whether or
/// not JS keeps a reference. Call `destroy()` or `stop()` to end it.
#[wasm_bindgen(js_name = Typewriter)]
pub struct WebTypewriter {
    shared: Shared,
}

#[wasm_bindgen(js_class = Typewriter)]
impl WebTypewriter {
    /// `new Typewriter(target, options)`.
    ///
    /// `target` is a selector or an element. An unresolved target logs an
    /// error and produces an instance that never starts.
    #[wasm_bindgen(constructor)]
    pub fn new(target: JsValue, options: JsValue) -> WebTypewriter {
        let (options, hooks) = read_options(&options);
        let typewriter = match resolve_target(&target) {
            Some(surface) => Typewriter::new(surface, options),
            None => {
                web_sys::console::error_1(&JsValue::from_str("Typewriter: Element not found"));
                error!(lookup = ?target, "typewriter: element not found");
                Typewriter::inert(options)
            }
        };
        let instance = Self::from_typewriter(typewriter, hooks);
        instance.init();
        instance
    }

    /// Start or resume. No-op while running or when the target is missing.
    pub fn start(&self) {
        start(&self.shared);
    }

    /// Stop and cancel the pending timer; the text stays on display.
    pub fn stop(&self) {
        let mut inner = self.shared.borrow_mut();
        inner.typewriter.stop();
        inner.cancel();
    }

    /// Replace the texts and restart from the first one.
    #[wasm_bindgen(js_name = updateTexts)]
    pub fn update_texts(&self, texts: Array) -> Result<(), JsValue> {
        self.shared
            .borrow_mut()
            .typewriter
            .update_texts(strings(&texts))
            .map_err(|e| JsError::new(&e.to_string()).into())
    }

    /// Stop, clear the text and remove the cursor.
    pub fn destroy(&self) {
        let mut inner = self.shared.borrow_mut();
        inner.cancel();
        inner.typewriter.destroy();
    }

    #[wasm_bindgen(getter, js_name = isRunning)]
    pub fn is_running(&self) -> bool {
        self.shared.borrow().typewriter.is_running()
    }

    #[wasm_bindgen(getter, js_name = isDeleting)]
    pub fn is_deleting(&self) -> bool {
        self.shared.borrow().typewriter.is_deleting()
    }

    #[wasm_bindgen(getter, js_name = currentText)]
    pub fn current_text(&self) -> String {
        self.shared.borrow().typewriter.current_text().to_string()
    }

    #[wasm_bindgen(getter, js_name = textIndex)]
    pub fn text_index(&self) -> usize {
        self.shared.borrow().typewriter.text_index()
    }

    #[wasm_bindgen(getter, js_name = charIndex)]
    pub fn char_index(&self) -> usize {
        self.shared.borrow().typewriter.char_index()
    }
}

impl WebTypewriter {
    fn from_typewriter(typewriter: Typewriter<ElementSurface>, hooks: JsHooks) -> Self {
        let events = EventQueue::default();
        let typewriter = typewriter
            .with_hooks(hooks.queueing(&events))
            .with_jitter(MathRandomJitter);
        let shared = Rc::new(RefCell::new(Inner {
            typewriter,
            hooks,
            events,
            timeout: None,
            pending: PendingKind::Tick,
            keep_alive: None,
            dispatching: false,
            callback: None,
        }));

        let weak = Rc::downgrade(&shared);
        let callback = Closure::<dyn FnMut()>::new(move || {
            let Some(shared) = weak.upgrade() else {
                return;
            };
            on_timer(&shared);
            if Rc::strong_count(&shared) == 1 {
                // `Inner` owns this closure: release it after the call returns.
                wasm_bindgen_futures::spawn_local(async move { drop(shared) });
            }
        });
        shared.borrow_mut().callback = Some(callback);

        Self { shared }
    }

    fn init(&self) {
        let schedule = self.shared.borrow_mut().typewriter.init();
        match schedule {
            Schedule::Start { after_ms: 0 } => start(&self.shared),
            schedule => schedule_next(&self.shared, schedule),
        }
    }
}

/// Start a typewriter for every `[data-typewriter]` element, in document order.
///
/// Returns the instances; keep them to control or destroy the animations.
#[wasm_bindgen(js_name = initTypewritersFromDOM)]
pub fn init_from_dom() -> Result<Array, JsValue> {
    let host = DomDiscovery::new(document()?);
    let instances = Array::new();
    for typewriter in discover(&host) {
        let instance = WebTypewriter::from_typewriter(typewriter, JsHooks::default());
        instance.init();
        instances.push(&JsValue::from(instance));
    }
    Ok(instances)
}

/// Like [`init_from_dom`], but waits for `DOMContentLoaded` while the
/// document is still loading.
#[wasm_bindgen(js_name = initTypewriters)]
pub fn init_when_ready() -> Promise {
    wasm_bindgen_futures::future_to_promise(async move {
        dom_ready().await?;
        init_from_dom().map(JsValue::from)
    })
}

async fn dom_ready() -> Result<(), JsValue> {
    let document = document()?;
    if document.ready_state() != DocumentReadyState::Loading {
        return Ok(());
    }
    let promise = Promise::new(&mut |resolve, _| {
        if document
            .add_event_listener_with_callback("DOMContentLoaded", &resolve)
            .is_err()
        {
            let _ = resolve.call0(&JsValue::NULL);
        }
    });
    JsFuture::from(promise).await?;
    Ok(())
}

/// Add the cursor stylesheet to `<head>` once.
#[wasm_bindgen(js_name = injectCursorStyles)]
pub fn inject_cursor_styles() -> Result<(), JsValue> {
    let document = document()?;
    if document.get_element_by_id(STYLE_ELEMENT_ID).is_some() {
        return Ok(());
    }
    let head = document.head().ok_or("No head element")?;
    let style = document.create_element("style")?;
    style.set_id(STYLE_ELEMENT_ID);
    style.set_text_content(Some(&cursor_stylesheet()));
    head.append_child(&style)?;
    Ok(())
}

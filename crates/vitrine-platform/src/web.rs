//! Web runner (wasm32).
//!
//! Each frame's markup replaces the content of a mount element. Input is
//! delegated: one listener per event type on the mount resolves the target's
//! `data-vid` to a hit region of the last frame.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, Event, HtmlElement, HtmlSelectElement, KeyboardEvent, Storage};
use web_time::{Duration, Instant};

use vitrine_core::*;
use vitrine_navigation::{back, follow};
use vitrine_ui::paint;

/// How long frames keep coming after input so transitions can finish.
const ANIMATION_TAIL: Duration = Duration::from_millis(1500);

const DARK_QUERY: &str = "(prefers-color-scheme: dark)";

#[derive(Clone, Debug)]
pub struct WebOptions {
    /// Id of the element the app renders into.
    pub mount_id: String,
    pub log_level: log::Level,
}

impl Default for WebOptions {
    fn default() -> Self {
        Self {
            mount_id: "app".to_string(),
            log_level: log::Level::Info,
        }
    }
}

fn js_reason(e: JsValue) -> String {
    e.as_string().unwrap_or_else(|| format!("{e:?}"))
}

/// `window.localStorage`.
pub struct LocalStorageStore;

impl LocalStorageStore {
    fn storage() -> Result<Storage, StorageError> {
        let window = web_sys::window().ok_or_else(|| StorageError::Unavailable("no window".into()))?;
        window
            .local_storage()
            .map_err(|e| StorageError::Unavailable(js_reason(e)))?
            .ok_or_else(|| StorageError::Unavailable("localStorage is disabled".into()))
    }
}

impl PreferenceStore for LocalStorageStore {
    fn load(&self, key: &str) -> Result<Option<String>, StorageError> {
        Self::storage()?.get_item(key).map_err(|e| StorageError::Read {
            key: key.to_string(),
            reason: js_reason(e),
        })
    }

    fn store(&self, key: &str, value: &str) -> Result<(), StorageError> {
        Self::storage()?.set_item(key, value).map_err(|e| StorageError::Write {
            key: key.to_string(),
            reason: js_reason(e),
        })
    }
}

/// `matchMedia("(prefers-color-scheme: dark)")`, evaluated on each call.
pub struct MediaQueryScheme;

impl ColorSchemeQuery for MediaQueryScheme {
    fn prefers_dark(&self) -> bool {
        web_sys::window()
            .and_then(|w| w.match_media(DARK_QUERY).ok().flatten())
            .is_some_and(|mql| mql.matches())
    }
}

/// Toggles the `dark` class on `document.documentElement`.
pub struct DocumentRoot;

impl StylingRoot for DocumentRoot {
    fn apply_mode(&self, mode: ThemeMode) {
        let Some(root) = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.document_element())
        else {
            log::warn!("theme: no document element to style");
            return;
        };
        let classes = root.class_list();
        let _ = classes.toggle_with_force("dark", mode.is_dark());
        let _ = classes.toggle_with_force("light", !mode.is_dark());
    }
}

/// `setInterval` / `clearInterval`. Callbacks are kept alive until cleared.
#[derive(Default)]
pub struct BrowserTimers {
    callbacks: RefCell<HashMap<i32, Closure<dyn FnMut()>>>,
}

impl TimerHost for BrowserTimers {
    fn set_interval(&self, period: Duration, mut tick: Box<dyn FnMut()>) -> TimerId {
        let Some(window) = web_sys::window() else {
            log::error!("setInterval without a window; timer will not run");
            return TimerId(u64::MAX);
        };
        let cb = Closure::<dyn FnMut()>::new(move || tick());
        let ms = i32::try_from(period.as_millis()).unwrap_or(i32::MAX).max(1);
        match window.set_interval_with_callback_and_timeout_and_arguments_0(cb.as_ref().unchecked_ref(), ms) {
            Ok(handle) => {
                self.callbacks.borrow_mut().insert(handle, cb);
                TimerId(handle as u64)
            }
            Err(e) => {
                log::error!("setInterval failed: {}", js_reason(e));
                TimerId(u64::MAX)
            }
        }
    }

    fn clear_interval(&self, id: TimerId) {
        let Ok(handle) = i32::try_from(id.0) else { return };
        if let Some(window) = web_sys::window() {
            window.clear_interval_with_handle(handle);
        }
        self.callbacks.borrow_mut().remove(&handle);
    }
}

struct WebApp {
    root: Box<dyn FnMut(&mut Scheduler) -> View>,
    sched: Scheduler,
    frame: Frame,
    theme: ThemePreference,
    document: Document,
    mount: Element,
    frame_pending: Cell<bool>,
    animate_until: Cell<Instant>,
}

type Shared = Rc<RefCell<WebApp>>;

fn render(app: &Shared) {
    let mut guard = app.borrow_mut();
    let a = &mut *guard;
    let theme = a.theme.clone();
    let root = &mut a.root;
    a.frame = a.sched.compose(|s| theme.provide(|| root(s)), paint);
    take_frame_request();

    a.mount.set_inner_html(&a.frame.scene.markup);

    let meta = document();
    if let Some(html) = a.document.document_element() {
        let _ = html.set_attribute("lang", &meta.lang);
        let _ = html.set_attribute("dir", meta.dir.as_str());
    }
    if !meta.title.is_empty() {
        a.document.set_title(&meta.title);
    }

    if let Some(id) = a.sched.focused {
        let selector = format!("[data-vid=\"{id}\"]");
        if let Ok(Some(el)) = a.mount.query_selector(&selector)
            && let Ok(el) = el.dyn_into::<HtmlElement>()
        {
            let _ = el.focus();
        }
    }
}

/// Renders on the next animation frame, and keeps rendering until the
/// animation tail after the latest input has passed.
fn schedule(app: &Shared) {
    {
        let a = app.borrow();
        if a.frame_pending.replace(true) {
            return;
        }
    }
    let next = app.clone();
    let cb = Closure::once_into_js(move || {
        next.borrow().frame_pending.set(false);
        render(&next);
        let more = now() < next.borrow().animate_until.get();
        if more {
            schedule(&next);
        }
    });
    if let Some(window) = web_sys::window() {
        let _ = window.request_animation_frame(cb.unchecked_ref());
    }
}

fn poke(app: &Shared) {
    app.borrow().animate_until.set(now() + ANIMATION_TAIL);
    schedule(app);
}

/// The hit region under the event target, from the last frame.
fn target_hit(app: &Shared, ev: &Event) -> Option<HitRegion> {
    let el = ev.target()?.dyn_into::<Element>().ok()?;
    let id: u64 = el.closest("[data-vid]").ok()??.get_attribute("data-vid")?.parse().ok()?;
    let a = app.borrow();
    // Innermost interactive region containing the target.
    a.frame
        .hit_regions
        .iter()
        .filter(|h| h.contains(id))
        .max_by_key(|h| h.id)
        .cloned()
}

fn push_history(href: &str) {
    if let Some(history) = web_sys::window().and_then(|w| w.history().ok()) {
        let _ = history.push_state_with_url(&JsValue::NULL, "", Some(href));
    }
}

fn on_click(app: &Shared, ev: Event) {
    let Some(hit) = target_hit(app, &ev) else { return };
    if hit.focusable {
        app.borrow_mut().sched.focused = Some(hit.id);
    }
    if let Some(f) = &hit.on_click {
        f();
    }
    if let Some(href) = &hit.href
        && follow(href)
    {
        ev.prevent_default();
        push_history(href);
    }
    poke(app);
}

fn on_change(app: &Shared, ev: Event) {
    let Some(hit) = target_hit(app, &ev) else { return };
    let Some(select) = ev
        .target()
        .and_then(|t| t.dyn_into::<HtmlSelectElement>().ok())
    else {
        return;
    };
    if let Some(f) = &hit.on_change {
        f(select.value());
    }
    poke(app);
}

fn on_keydown(app: &Shared, ev: KeyboardEvent) {
    let Some(key) = Key::from_dom(&ev.key()) else { return };
    let event = KeyEvent {
        key,
        modifiers: Modifiers {
            shift: ev.shift_key(),
            ctrl: ev.ctrl_key(),
            alt: ev.alt_key(),
            meta: ev.meta_key(),
        },
        is_repeat: ev.repeat(),
    };

    if event.key == Key::Tab {
        ev.prevent_default();
        let mut a = app.borrow_mut();
        let next = a.frame.next_focus(a.sched.focused, event.modifiers.shift);
        a.sched.focused = next;
        drop(a);
        poke(app);
        return;
    }

    let handlers: Vec<HitRegion> = {
        let a = app.borrow();
        let mut hs: Vec<HitRegion> = match a.sched.focused {
            Some(id) => a
                .frame
                .hit_regions
                .iter()
                .filter(|h| h.on_key.is_some() && h.contains(id))
                .cloned()
                .collect(),
            None => Vec::new(),
        };
        hs.sort_by_key(|h| std::cmp::Reverse(h.id));
        hs
    };
    let handled = handlers
        .iter()
        .any(|h| h.on_key.as_ref().is_some_and(|f| f(&event)))
        || (event.key == Key::Escape && back::handle());
    if handled {
        ev.prevent_default();
        poke(app);
    }
}

fn on_focusin(app: &Shared, ev: Event) {
    if let Some(hit) = target_hit(app, &ev)
        && hit.focusable
    {
        app.borrow_mut().sched.focused = Some(hit.id);
    }
}

fn listen<E: JsCast + 'static>(target: &web_sys::EventTarget, name: &str, app: &Shared, f: fn(&Shared, E)) {
    let app = app.clone();
    let cb = Closure::<dyn FnMut(Event)>::new(move |ev: Event| {
        if let Ok(ev) = ev.dyn_into::<E>() {
            f(&app, ev);
        }
    });
    if let Err(e) = target.add_event_listener_with_callback(name, cb.as_ref().unchecked_ref()) {
        log::error!("failed to listen for {name}: {}", js_reason(e));
    }
    cb.forget();
}

/// Mounts `root` into the element `options.mount_id` and runs it.
pub fn run_web_app(
    root: impl FnMut(&mut Scheduler) -> View + 'static,
    options: WebOptions,
) -> Result<(), JsValue> {
    std::panic::set_hook(Box::new(console_error_panic_hook::hook));
    let _ = console_log::init_with_level(options.log_level);

    set_clock(Rc::new(SystemClock));
    set_timer_host(Rc::new(BrowserTimers::default()));

    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))?;
    let mount = document
        .get_element_by_id(&options.mount_id)
        .ok_or_else(|| JsValue::from_str(&format!("no element #{}", options.mount_id)))?;

    let theme = ThemePreference::initialize(
        Rc::new(LocalStorageStore),
        &MediaQueryScheme,
        Rc::new(DocumentRoot),
    );

    let app: Shared = Rc::new(RefCell::new(WebApp {
        root: Box::new(root),
        sched: Scheduler::new(),
        frame: Frame::default(),
        theme,
        document,
        mount: mount.clone(),
        frame_pending: Cell::new(false),
        animate_until: Cell::new(now()),
    }));

    {
        let app = app.clone();
        set_frame_requester(move || poke(&app));
    }

    let target: &web_sys::EventTarget = mount.as_ref();
    listen::<Event>(target, "click", &app, on_click);
    listen::<Event>(target, "change", &app, on_change);
    listen::<KeyboardEvent>(target, "keydown", &app, on_keydown);
    listen::<Event>(target, "focusin", &app, on_focusin);

    {
        let app = app.clone();
        let cb = Closure::<dyn FnMut(Event)>::new(move |_: Event| {
            if back::handle() {
                poke(&app);
            }
        });
        window.add_event_listener_with_callback("popstate", cb.as_ref().unchecked_ref())?;
        cb.forget();
    }

    log::info!("vitrine: mounted into #{}", options.mount_id);
    render(&app);
    poke(&app);
    Ok(())
}

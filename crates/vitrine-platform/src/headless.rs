//! Headless runner.
//!
//! Composes the app into HTML without a browser. Time is fully manual: the
//! animation clock is a `TestClock` and timers run on `ManualTimers`, so a
//! caller decides exactly when showcases rotate and entrances finish. Input
//! is dispatched by semantics label (clicks) or as key events against the
//! focus chain of the last frame.

use std::cmp::Reverse;
use std::fmt::Write as _;
use std::path::PathBuf;
use std::rc::Rc;

use anyhow::{Context, anyhow};
use vitrine_core::*;
use vitrine_navigation::{back, follow};
use vitrine_ui::{escape, paint};
use web_time::Duration;

use crate::store::{EnvColorScheme, JsonFileStore};

/// Directory holding `preferences.json`; unset keeps preferences in memory.
pub const STATE_DIR_VAR: &str = "VITRINE_STATE_DIR";

#[derive(Clone, Debug)]
pub struct HeadlessOptions {
    pub state_dir: Option<PathBuf>,
    /// Overrides `VITRINE_COLOR_SCHEME` when set.
    pub prefers_dark: Option<bool>,
    /// Clock advance applied by `settle` so entrance animations finish.
    pub settle: Duration,
    /// Stylesheet linked from every document.
    pub stylesheet: Option<String>,
}

impl Default for HeadlessOptions {
    fn default() -> Self {
        Self {
            state_dir: None,
            prefers_dark: None,
            settle: Duration::from_secs(3),
            stylesheet: Some("/styles.css".to_string()),
        }
    }
}

impl HeadlessOptions {
    /// Defaults, with `state_dir` taken from `VITRINE_STATE_DIR`.
    pub fn from_env() -> Self {
        Self {
            state_dir: std::env::var_os(STATE_DIR_VAR).map(PathBuf::from),
            ..Self::default()
        }
    }
}

pub struct Headless {
    root: Box<dyn FnMut(&mut Scheduler) -> View>,
    sched: Scheduler,
    frame: Frame,
    timers: Rc<ManualTimers>,
    clock: TestClock,
    theme: ThemePreference,
    styling: Rc<RootFlag>,
    options: HeadlessOptions,
    external: Vec<String>,
}

impl Headless {
    /// Installs a fresh composer, clock and timer host on this thread,
    /// resolves the theme preference, and composes the first frame.
    pub fn new(options: HeadlessOptions, root: impl FnMut(&mut Scheduler) -> View + 'static) -> Self {
        reset_composer();
        let clock = TestClock::install();
        let timers = Rc::new(ManualTimers::new());
        set_timer_host(timers.clone());

        let store: Rc<dyn PreferenceStore> = match &options.state_dir {
            Some(dir) => Rc::new(JsonFileStore::in_dir(dir)),
            None => Rc::new(MemoryStore::new()),
        };
        let styling = Rc::new(RootFlag::new());
        let theme = match options.prefers_dark {
            Some(dark) => ThemePreference::initialize(store, &FixedColorScheme(dark), styling.clone()),
            None => ThemePreference::initialize(store, &EnvColorScheme::from_env(), styling.clone()),
        };

        let mut this = Self {
            root: Box::new(root),
            sched: Scheduler::new(),
            frame: Frame::default(),
            timers,
            clock,
            theme,
            styling,
            options,
            external: Vec::new(),
        };
        this.compose();
        this
    }

    /// Composes and paints a new frame.
    pub fn compose(&mut self) -> &Frame {
        let theme = self.theme.clone();
        let root = &mut self.root;
        let before = self.sched.focused;
        self.frame = self.sched.compose(|s| theme.provide(|| root(s)), paint);
        take_frame_request();

        // Focus may point at a view that is gone.
        if let Some(id) = self.sched.focused
            && !self.frame.focus_chain.contains(&id)
        {
            self.sched.focused = None;
        }
        if before != self.sched.focused {
            log::debug!("focus: {:?}", self.focused_label());
        }
        &self.frame
    }

    pub fn frame(&self) -> &Frame {
        &self.frame
    }

    pub fn theme(&self) -> &ThemePreference {
        &self.theme
    }

    pub fn timers(&self) -> &ManualTimers {
        &self.timers
    }

    pub fn focused(&self) -> Option<u64> {
        self.sched.focused
    }

    pub fn focused_label(&self) -> Option<String> {
        let id = self.sched.focused?;
        self.frame
            .semantics_nodes
            .iter()
            .find(|n| n.id == id)
            .and_then(|n| n.label.clone())
    }

    /// Links that no in-app handler took, in click order.
    pub fn external_links(&self) -> &[String] {
        &self.external
    }

    fn id_of(&self, role: Role, label: &str) -> anyhow::Result<u64> {
        self.frame
            .find(role, label)
            .map(|n| n.id)
            .ok_or_else(|| anyhow!("no {role:?} labeled '{label}' in the current frame"))
    }

    /// Clicks the element with the given role and label.
    pub fn click(&mut self, role: Role, label: &str) -> anyhow::Result<()> {
        let id = self.id_of(role, label)?;
        self.click_id(id)
    }

    pub fn click_id(&mut self, id: u64) -> anyhow::Result<()> {
        let hit = self
            .frame
            .hit(id)
            .cloned()
            .with_context(|| format!("view {id} is not interactive"))?;
        if hit.focusable {
            self.sched.focused = Some(id);
        }
        self.activate(&hit);
        self.compose();
        Ok(())
    }

    /// Picks `value` in the select labeled `label`.
    pub fn choose(&mut self, label: &str, value: &str) -> anyhow::Result<()> {
        let id = self.id_of(Role::ComboBox, label)?;
        let on_change = self
            .frame
            .hit(id)
            .and_then(|h| h.on_change.clone())
            .with_context(|| format!("'{label}' has no change handler"))?;
        self.sched.focused = Some(id);
        on_change(value.to_string());
        self.compose();
        Ok(())
    }

    fn activate(&mut self, hit: &HitRegion) {
        if let Some(f) = &hit.on_click {
            f();
        }
        if let Some(href) = &hit.href
            && !follow(href)
        {
            log::info!("leaving the app for {href}");
            self.external.push(href.clone());
        }
    }

    /// Delivers a key press. Returns whether anything handled it.
    ///
    /// Tab and Shift+Tab move focus (wrapping inside focus traps). Other keys
    /// go to `on_key` handlers from the focused view outwards; Enter (and
    /// Space on buttons) activate the focused element; an unhandled Escape
    /// goes to the back handler.
    pub fn key(&mut self, ev: KeyEvent) -> bool {
        if ev.key == Key::Tab {
            self.sched.focused = self.frame.next_focus(self.sched.focused, ev.modifiers.shift);
            self.compose();
            return true;
        }

        let focused = self.sched.focused;
        let mut handlers: Vec<HitRegion> = match focused {
            Some(id) => self
                .frame
                .hit_regions
                .iter()
                .filter(|h| h.on_key.is_some() && h.contains(id))
                .cloned()
                .collect(),
            None => Vec::new(),
        };
        handlers.sort_by_key(|h| Reverse(h.id));
        let mut handled = handlers
            .iter()
            .any(|h| h.on_key.as_ref().is_some_and(|f| f(&ev)));

        if !handled {
            let target = focused.and_then(|id| self.frame.hit(id).cloned());
            handled = match (&ev.key, target) {
                (Key::Enter, Some(hit)) if hit.on_click.is_some() || hit.href.is_some() => {
                    self.activate(&hit);
                    true
                }
                (Key::Space, Some(hit)) if hit.on_click.is_some() && hit.href.is_none() => {
                    self.activate(&hit);
                    true
                }
                (Key::Escape, _) => back::handle(),
                _ => false,
            };
        }
        if handled {
            self.compose();
        }
        handled
    }

    /// Moves the clock and the timers forward together. Recomposes when a
    /// timer fired or a frame was requested; returns the number of ticks.
    pub fn advance(&mut self, by: Duration) -> usize {
        self.clock.advance(by);
        let fired = self.timers.advance(by);
        if take_frame_request() || fired > 0 {
            self.compose();
        }
        fired
    }

    /// Lets entrance and transition animations finish without firing timers.
    pub fn settle(&mut self) -> &Frame {
        self.clock.advance(self.options.settle);
        self.compose()
    }

    /// Follows an in-app link as if it had been clicked.
    pub fn navigate(&mut self, href: &str) -> bool {
        let followed = follow(href);
        if followed {
            self.compose();
        }
        followed
    }

    /// The last frame as a complete HTML document.
    pub fn html(&self) -> String {
        let meta = document();
        let mode = self.styling.current().unwrap_or_else(|| self.theme.mode());

        let mut out = String::new();
        let _ = writeln!(out, "<!DOCTYPE html>");
        let _ = writeln!(
            out,
            "<html lang=\"{}\" dir=\"{}\" class=\"{}\">",
            escape(&meta.lang),
            meta.dir.as_str(),
            mode
        );
        out.push_str("<head>\n<meta charset=\"utf-8\">\n");
        out.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n");
        if !meta.title.is_empty() {
            let _ = writeln!(out, "<title>{}</title>", escape(&meta.title));
        }
        if let Some(href) = &self.options.stylesheet {
            let _ = writeln!(out, "<link rel=\"stylesheet\" href=\"{}\">", escape(href));
        }
        let _ = writeln!(
            out,
            "<style>:root{{{}}}:root.dark{{{}}}</style>",
            Palette::light().css_vars(),
            Palette::dark().css_vars()
        );
        out.push_str("</head>\n<body class=\"min-h-screen\">\n");
        out.push_str(&self.frame.scene.markup);
        out.push_str("\n</body>\n</html>\n");
        out
    }

    /// Disposes every scope; timers started by the app stop.
    pub fn shutdown(&mut self) {
        self.sched.shutdown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use vitrine_i18n::{Locale, Messages, provide_locale};
    use vitrine_navigation::{
        EntryScope, InstallLinkHandler, NavDisplay, NavTransition, Navigator, remember_back_stack,
        renderer,
    };
    use vitrine_ui::*;

    const THEME: &str = r#"{"Theme": {
        "toggle": "Toggle theme (currently {mode})",
        "switchTo": "Switch to {mode} mode",
        "light": "light",
        "dark": "dark"
    }}"#;

    fn demo(_: &mut Scheduler) -> View {
        set_document(DocumentMeta {
            lang: "ar".into(),
            dir: TextDirection::Rtl,
            title: "Demo <1>".into(),
        });
        let messages = Messages::from_json(Locale::En, THEME).unwrap();
        provide_locale(Locale::En, messages, || {
            let drawer = DrawerState::remembered("menu");
            Column(Modifier::new()).child((
                ThemeSwitcher(ThemeSwitcherVariant::Mobile),
                MenuButton(&drawer, "Menu", Modifier::new()),
                Drawer(
                    &drawer,
                    "Navigation",
                    Modifier::new(),
                    vec![
                        Link("/a", Modifier::new()).child(Text("A")),
                        Link("/b", Modifier::new()).child(Text("B")),
                    ],
                ),
                Showcase(
                    "quotes",
                    vec!["first", "second"],
                    Duration::from_millis(4000),
                    Modifier::new(),
                    |s: &&str| Paragraph(*s).semantics(Semantics::new(Role::Text).label(*s)),
                ),
            ))
        })
    }

    fn options(dark: bool) -> HeadlessOptions {
        HeadlessOptions {
            prefers_dark: Some(dark),
            stylesheet: None,
            ..HeadlessOptions::default()
        }
    }

    fn showing(h: &Headless, quote: &str) -> bool {
        h.frame().find(Role::Text, quote).is_some()
    }

    #[test]
    fn document_carries_lang_dir_and_mode() {
        let h = Headless::new(options(true), demo);
        let html = h.html();
        assert!(html.starts_with("<!DOCTYPE html>\n<html lang=\"ar\" dir=\"rtl\" class=\"dark\">"));
        assert!(html.contains("<title>Demo &lt;1&gt;</title>"));
        assert!(html.contains(":root.dark{--color-background:"));
    }

    #[test]
    fn theme_toggle_persists_across_runs() {
        let dir = std::env::temp_dir().join(format!("vitrine-headless-{}", std::process::id()));
        let _ = std::fs::remove_dir_all(&dir);
        let opts = HeadlessOptions {
            state_dir: Some(dir.clone()),
            ..options(true)
        };

        let mut h = Headless::new(opts.clone(), demo);
        assert_eq!(h.theme().mode(), ThemeMode::Dark);
        h.click(Role::Button, "Toggle theme (currently dark)").unwrap();
        assert_eq!(h.theme().mode(), ThemeMode::Light);
        assert!(h.html().contains("class=\"light\""));
        drop(h);

        let h = Headless::new(opts, demo);
        assert_eq!(h.theme().mode(), ThemeMode::Light);
        let _ = std::fs::remove_dir_all(dir);
    }

    #[test]
    fn drawer_traps_tab_and_escape_returns_focus() {
        let mut h = Headless::new(options(false), demo);
        h.click(Role::Button, "Menu").unwrap();
        assert_eq!(h.focused_label().as_deref(), Some("A"));

        assert!(h.key(KeyEvent::new(Key::Tab)));
        assert_eq!(h.focused_label().as_deref(), Some("B"));
        assert!(h.key(KeyEvent::new(Key::Tab)));
        assert_eq!(h.focused_label().as_deref(), Some("A"));
        assert!(h.key(KeyEvent::new(Key::Tab).shifted()));
        assert_eq!(h.focused_label().as_deref(), Some("B"));

        assert!(h.key(KeyEvent::new(Key::Escape)));
        assert!(h.frame().find(Role::Dialog, "Navigation").is_none());
        assert_eq!(h.focused_label().as_deref(), Some("Menu"));
    }

    #[test]
    fn enter_activates_focused_button() {
        let mut h = Headless::new(options(false), demo);
        assert!(h.key(KeyEvent::new(Key::Tab)));
        assert_eq!(
            h.focused_label().as_deref(),
            Some("Toggle theme (currently light)")
        );
        assert!(h.key(KeyEvent::new(Key::Enter)));
        assert_eq!(h.theme().mode(), ThemeMode::Dark);
    }

    #[test]
    fn showcase_rotates_only_when_time_advances() {
        let mut h = Headless::new(options(false), demo);
        h.settle();
        assert!(showing(&h, "first"));
        assert!(!showing(&h, "second"));

        assert_eq!(h.advance(Duration::from_millis(3999)), 0);
        assert!(showing(&h, "first"));
        assert_eq!(h.advance(Duration::from_millis(1)), 1);
        assert!(showing(&h, "second"));
        assert!(!showing(&h, "first"));

        h.shutdown();
        assert_eq!(h.timers().active_count(), 0);
    }

    #[test]
    fn unhandled_links_are_external_and_escape_goes_back() {
        let popped = Rc::new(Cell::new(false));
        let p = popped.clone();
        let mut h = Headless::new(options(false), move |_| {
            let p = p.clone();
            back::set(Some(Rc::new(move || {
                p.set(true);
                true
            })));
            Column(Modifier::new())
                .child(Link("https://example.com", Modifier::new()).child(Text("Elsewhere")))
        });
        h.click(Role::Link, "Elsewhere").unwrap();
        assert_eq!(h.external_links(), ["https://example.com".to_string()]);
        assert!(h.key(KeyEvent::new(Key::Escape)));
        assert!(popped.get());
        back::set(None);
    }

    #[test]
    fn in_app_links_navigate() {
        let mut h = Headless::new(options(false), |_| {
            let stack = remember_back_stack("/".to_string());
            let nav = Navigator::new((*stack).clone());
            disposable_effect("links", (), move || {
                InstallLinkHandler(nav, |href| href.starts_with('/').then(|| href.to_string()))
            });
            let here = stack.top_key().unwrap_or_default();
            Column(Modifier::new()).child((
                Text(format!("at {here}")),
                Link("/blog", Modifier::new()).child(Text("Blog")),
            ))
        });
        h.click(Role::Link, "Blog").unwrap();
        assert!(h.frame().scene.markup.contains("at /blog"));
        assert!(h.external_links().is_empty());
    }

    /// One navigation entry showing a rotating pair of quotes; `released`
    /// is set when the entry's scope is disposed.
    fn paged(released: Rc<Cell<bool>>) -> impl FnMut(&mut Scheduler) -> View {
        move |_| {
            let stack = remember_back_stack("/".to_string());
            let released = released.clone();
            NavDisplay(
                &stack,
                renderer(move |_: &EntryScope<String>| {
                    let released = released.clone();
                    disposable_effect("entry", (), move || on_unmount(move || released.set(true)));
                    Showcase(
                        "entry-quotes",
                        vec!["one", "two"],
                        Duration::from_millis(4000),
                        Modifier::new(),
                        |s: &&str| Text(*s),
                    )
                }),
                NavTransition::default(),
            )
        }
    }

    #[test]
    fn shutdown_disposes_navigation_entries() {
        let released = Rc::new(Cell::new(false));
        let mut h = Headless::new(options(false), paged(released.clone()));
        assert_eq!(h.timers().active_count(), 1);
        assert!(!released.get());

        h.shutdown();
        assert!(released.get());
        assert_eq!(h.timers().active_count(), 0);
    }

    #[test]
    fn dropping_the_runner_disposes_navigation_entries() {
        let released = Rc::new(Cell::new(false));
        let h = Headless::new(options(false), paged(released.clone()));
        let timers = h.timers.clone();
        drop(h);
        assert!(released.get());
        assert_eq!(timers.active_count(), 0);
    }

    #[test]
    fn documents_render_one_after_another_on_one_thread() {
        let mut pages = Vec::new();
        for _ in 0..2 {
            let released = Rc::new(Cell::new(false));
            let mut h = Headless::new(options(false), paged(released.clone()));
            h.settle();
            pages.push(h.html());
            h.shutdown();
            assert!(released.get());
        }
        assert_eq!(pages[0], pages[1]);
        assert!(pages[0].contains("one"));
    }
}


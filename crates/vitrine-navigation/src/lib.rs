#![allow(non_snake_case)]
//! Typed back stack with per-entry scopes.
//!
//! Every entry owns a `Scope`; the entry's view is composed inside it, so
//! effects and timers started by a page are torn down when the entry leaves
//! the stack. Entry scopes are children of the scope that was current when
//! the stack was created, so disposing that scope (a runner shutting down)
//! tears down every entry too.

pub mod links;

use std::{cell::RefCell, fmt::Debug, rc::Rc};

use serde::{Deserialize, Serialize};
use vitrine_core::*;
use vitrine_ui::{Box as VBox, Stack, ViewExt, animate_f32_from};

pub use links::{InstallLinkHandler, NavLink, follow, is_active};

pub trait NavKey: Clone + Debug + 'static + Serialize + for<'de> Deserialize<'de> {}
impl<T> NavKey for T where T: Clone + Debug + 'static + Serialize + for<'de> Deserialize<'de> {}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum TransitionDir {
    None,
    Push,
    Pop,
}

struct Entry<K: NavKey> {
    id: u64,
    key: K,
    /// Disposed when the entry is popped, replaced or covered by a push.
    scope: Scope,
}

struct BackState<K: NavKey> {
    entries: Vec<Entry<K>>,
    next_id: u64,
    last_dir: TransitionDir,
    owner: Option<Scope>,
}

impl<K: NavKey> BackState<K> {
    fn scope(&self) -> Scope {
        match &self.owner {
            Some(owner) => owner.child(),
            None => Scope::new(),
        }
    }

    fn entry(&mut self, key: K) -> Entry<K> {
        let id = self.next_id;
        self.next_id += 1;
        Entry {
            id,
            key,
            scope: self.scope(),
        }
    }
}

#[derive(Clone)]
pub struct NavBackStack<K: NavKey> {
    inner: Rc<RefCell<BackState<K>>>,
    version: Signal<u64>,
}

impl<K: NavKey> NavBackStack<K> {
    /// A stack holding `start`, owned by the current scope if there is one.
    pub fn new(start: K) -> Self {
        let mut state = BackState {
            entries: Vec::new(),
            next_id: 1,
            last_dir: TransitionDir::None,
            owner: current_scope(),
        };
        let first = state.entry(start);
        state.entries.push(first);
        Self {
            inner: Rc::new(RefCell::new(state)),
            version: signal(0),
        }
    }

    pub fn top(&self) -> Option<(u64, K, Scope)> {
        let s = self.inner.borrow();
        s.entries
            .last()
            .map(|e| (e.id, e.key.clone(), e.scope.clone()))
    }

    pub fn top_key(&self) -> Option<K> {
        self.inner.borrow().entries.last().map(|e| e.key.clone())
    }

    pub fn size(&self) -> usize {
        self.inner.borrow().entries.len()
    }

    pub fn last_dir(&self) -> TransitionDir {
        self.inner.borrow().last_dir
    }

    /// Bumped on every change; subscribe to re-render.
    pub fn version(&self) -> Signal<u64> {
        self.version.clone()
    }

    fn bump(&self) {
        self.version.update(|v| *v = v.wrapping_add(1));
    }

    /// Pushes `key`. The covered entry leaves the composition: its scope is
    /// disposed and swapped for a fresh one, so its effects and timers stop
    /// while remembered state survives until it is shown again.
    fn push_inner(&self, key: K) {
        let covered = {
            let mut s = self.inner.borrow_mut();
            let fresh = s.scope();
            let covered = s
                .entries
                .last_mut()
                .map(|e| std::mem::replace(&mut e.scope, fresh));
            let entry = s.entry(key);
            s.entries.push(entry);
            s.last_dir = TransitionDir::Push;
            covered
        };
        if let Some(scope) = covered {
            scope.dispose();
        }
    }

    /// Pops the top entry (if any) and disposes its scope.
    fn pop_inner(&self) -> bool {
        let entry = {
            let mut s = self.inner.borrow_mut();
            s.last_dir = TransitionDir::Pop;
            s.entries.pop()
        };

        match entry {
            Some(e) => {
                log::debug!("nav: disposing entry {} ({:?})", e.id, e.key);
                e.scope.dispose();
                true
            }
            None => false,
        }
    }

    fn replace_inner(&self, key: K) {
        let old = {
            let mut s = self.inner.borrow_mut();
            let entry = s.entry(key);
            s.last_dir = TransitionDir::Push;
            match s.entries.last_mut() {
                Some(last) => Some(std::mem::replace(last, entry)),
                None => {
                    s.entries.push(entry);
                    None
                }
            }
        };
        if let Some(e) = old {
            e.scope.dispose();
        }
    }

    pub fn to_json(&self) -> String {
        let s = self.inner.borrow();
        let keys: Vec<&K> = s.entries.iter().map(|e| &e.key).collect();
        serde_json::to_string(&keys).unwrap_or_else(|_| "[]".into())
    }

    /// Replaces the whole stack with the keys in `json`. Malformed or empty
    /// input leaves the stack untouched and returns `false`.
    pub fn from_json(&self, json: &str) -> bool {
        let keys = match serde_json::from_str::<Vec<K>>(json) {
            Ok(keys) if !keys.is_empty() => keys,
            Ok(_) => return false,
            Err(e) => {
                log::warn!("nav: ignoring saved back stack: {e}");
                return false;
            }
        };
        let old_entries = std::mem::take(&mut self.inner.borrow_mut().entries);
        for e in old_entries {
            e.scope.dispose();
        }

        {
            let mut s = self.inner.borrow_mut();
            for k in keys {
                let entry = s.entry(k);
                s.entries.push(entry);
            }
            s.last_dir = TransitionDir::None;
        }
        self.bump();
        true
    }
}

#[derive(Clone)]
pub struct Navigator<K: NavKey> {
    pub stack: NavBackStack<K>,
}

impl<K: NavKey> Navigator<K> {
    pub fn new(stack: NavBackStack<K>) -> Self {
        Self { stack }
    }

    pub fn push(&self, k: K) {
        self.stack.push_inner(k);
        self.stack.bump();
    }

    pub fn replace(&self, k: K) {
        self.stack.replace_inner(k);
        self.stack.bump();
    }

    /// Pops unless only the root entry is left.
    pub fn pop(&self) -> bool {
        if self.stack.size() <= 1 {
            return false;
        }
        let ok = self.stack.pop_inner();
        if ok {
            self.stack.bump();
        }
        ok
    }
}

/// The back stack remembered for this composition, created with `start`.
pub fn remember_back_stack<K: NavKey>(start: K) -> Rc<NavBackStack<K>> {
    remember_with_key("nav:stack", || NavBackStack::new(start))
}

/// What a page renderer sees of its entry.
pub struct EntryScope<K: NavKey> {
    id: u64,
    key: K,
}

impl<K: NavKey> EntryScope<K> {
    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn key(&self) -> &K {
        &self.key
    }
}

pub type EntryRenderer<K> = Rc<dyn Fn(&EntryScope<K>) -> View>;

pub fn renderer<K: NavKey>(f: impl Fn(&EntryScope<K>) -> View + 'static) -> EntryRenderer<K> {
    Rc::new(f)
}

#[derive(Clone, Copy)]
pub struct NavTransition {
    pub slide_px: f32,
    pub fade: bool,
    pub spec: AnimationSpec,
}

impl Default for NavTransition {
    fn default() -> Self {
        Self {
            slide_px: 60.0,
            fade: true,
            spec: AnimationSpec::fast(),
        }
    }
}

/// Composes the top entry inside its own scope, sliding it in after a push
/// or pop.
pub fn NavDisplay<K: NavKey>(
    stack: &NavBackStack<K>,
    make_view: EntryRenderer<K>,
    transition: NavTransition,
) -> View {
    let Some((id, key, entry_scope)) = stack.top() else {
        return VBox(Modifier::new());
    };
    let scope = EntryScope { id, key };

    let dir = stack.last_dir();
    entry_scope.run(|| {
        let v = (make_view)(&scope);
        if dir == TransitionDir::None {
            return v;
        }

        let t = animate_f32_from(format!("nav:{id}"), 0.0, 1.0, transition.spec);
        if t >= 1.0 {
            return v;
        }
        let sign = match dir {
            TransitionDir::Push => 1.0,
            _ => -1.0,
        };
        let rtl = if text_direction().is_rtl() { -1.0 } else { 1.0 };
        let dx = (1.0 - t) * transition.slide_px * sign * rtl;
        let alpha = if transition.fade { 0.75 + 0.25 * t } else { 1.0 };

        Stack(Modifier::new().class("nav-display")).child(
            VBox(Modifier::new()
                .translate(Length::Px(dx), Length::Px(0.0))
                .alpha(alpha))
            .child(v),
        )
    })
}

/// Back dispatcher.
///
/// The runner calls `handle()` for a back gesture (browser history, Escape
/// outside any handler); the app installs the handler during composition.
pub mod back {
    use std::{cell::RefCell, rc::Rc};

    type Handler = Rc<dyn Fn() -> bool>;

    thread_local! {
        static H: RefCell<Option<Handler>> = const { RefCell::new(None) };
    }

    /// Ignored once the thread is shutting down.
    pub fn set(handler: Option<Handler>) {
        let _ = H.try_with(|h| *h.borrow_mut() = handler);
    }

    pub fn handle() -> bool {
        let handler = H.with(|h| h.borrow().clone());
        match handler {
            Some(handler) => handler(),
            None => false,
        }
    }
}

/// Installs the back handler for the displayed stack; the returned
/// `Dispose` removes it.
pub fn InstallBackHandler<K: NavKey>(stack: NavBackStack<K>) -> Dispose {
    let nav = Navigator::new(stack);
    back::set(Some(Rc::new(move || nav.pop())));
    on_unmount(|| back::set(None))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use vitrine_ui::{Showcase, Text};
    use web_time::Duration;

    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    enum Page {
        Home,
        Post(String),
    }

    fn reset() {
        COMPOSER.with(|c| c.borrow_mut().keyed_slots.clear());
        TestClock::install();
    }

    #[test]
    fn push_pop_and_root_is_kept() {
        reset();
        let stack = NavBackStack::new(Page::Home);
        let nav = Navigator::new(stack.clone());

        nav.push(Page::Post("a".into()));
        assert_eq!(stack.size(), 2);
        assert_eq!(stack.last_dir(), TransitionDir::Push);
        assert_eq!(stack.top_key(), Some(Page::Post("a".into())));

        assert!(nav.pop());
        assert_eq!(stack.last_dir(), TransitionDir::Pop);
        assert!(!nav.pop());
        assert_eq!(stack.top_key(), Some(Page::Home));
        assert_eq!(stack.version().get(), 2);
    }

    #[test]
    fn pop_disposes_entry_scope() {
        reset();
        let stack = NavBackStack::new(Page::Home);
        let nav = Navigator::new(stack.clone());
        nav.push(Page::Post("a".into()));

        let cleaned = Rc::new(Cell::new(false));
        let c = cleaned.clone();
        let render = renderer(move |_: &EntryScope<Page>| {
            let c = c.clone();
            if let Some(scope) = current_scope() {
                scope.add_disposer(move || c.set(true));
            }
            Text("page")
        });
        let _ = NavDisplay(&stack, render, NavTransition::default());
        assert!(!cleaned.get());
        nav.pop();
        assert!(cleaned.get());
    }

    #[test]
    fn disposing_the_owner_disposes_every_entry() {
        reset();
        let timers = Rc::new(ManualTimers::new());
        set_timer_host(timers.clone());

        let owner = Scope::new();
        let stack = owner.run(|| NavBackStack::new(Page::Home));
        let nav = Navigator::new(stack.clone());
        nav.push(Page::Post("reviews".into()));

        let render = renderer(|_: &EntryScope<Page>| {
            Showcase(
                "owned",
                vec!["A", "B"],
                Duration::from_millis(4000),
                Modifier::new(),
                |s: &&str| Text(*s),
            )
        });
        let _ = NavDisplay(&stack, render.clone(), NavTransition::default());
        let (_, _, post) = stack.top().unwrap();
        assert_eq!(timers.active_count(), 1);

        owner.dispose();
        assert!(post.is_disposed());
        assert_eq!(timers.active_count(), 0);

        // The covered entry went with its owner; showing it starts nothing.
        assert!(nav.pop());
        let (_, _, home) = stack.top().unwrap();
        assert!(home.is_disposed());
        let _ = NavDisplay(&stack, render, NavTransition::default());
        assert_eq!(timers.active_count(), 0);
    }

    #[test]
    fn replace_disposes_previous_top() {
        reset();
        let stack = NavBackStack::new(Page::Home);
        let (_, _, scope) = stack.top().unwrap();
        Navigator::new(stack.clone()).replace(Page::Post("b".into()));
        assert!(scope.is_disposed());
        assert_eq!(stack.size(), 1);
    }

    #[test]
    fn popping_a_page_cancels_its_showcase_timer() {
        reset();
        let timers = Rc::new(ManualTimers::new());
        set_timer_host(timers.clone());

        let stack = NavBackStack::new(Page::Home);
        let nav = Navigator::new(stack.clone());
        nav.push(Page::Post("reviews".into()));

        let render = renderer(|entry: &EntryScope<Page>| match entry.key() {
            Page::Home => Text("home"),
            Page::Post(_) => Showcase(
                "reviews",
                vec!["A", "B", "C"],
                Duration::from_millis(4000),
                Modifier::new(),
                |s: &&str| Text(*s),
            ),
        });
        let _ = NavDisplay(&stack, render.clone(), NavTransition::default());
        assert_eq!(timers.active_count(), 1);

        nav.pop();
        assert_eq!(timers.active_count(), 0);
        let _ = NavDisplay(&stack, render, NavTransition::default());
        assert_eq!(timers.advance(Duration::from_millis(8000)), 0);
    }

    #[test]
    fn covered_page_stops_its_timer_and_restarts_when_shown() {
        reset();
        let timers = Rc::new(ManualTimers::new());
        set_timer_host(timers.clone());

        let stack = NavBackStack::new(Page::Home);
        let nav = Navigator::new(stack.clone());
        let render = renderer(|entry: &EntryScope<Page>| match entry.key() {
            Page::Home => Showcase(
                "home-reviews",
                vec!["A", "B"],
                Duration::from_millis(4000),
                Modifier::new(),
                |s: &&str| Text(*s),
            ),
            Page::Post(p) => Text(p.clone()),
        });
        let _ = NavDisplay(&stack, render.clone(), NavTransition::default());
        assert_eq!(timers.active_count(), 1);

        nav.push(Page::Post("a".into()));
        assert_eq!(timers.active_count(), 0);

        nav.pop();
        let _ = NavDisplay(&stack, render, NavTransition::default());
        assert_eq!(timers.active_count(), 1);
    }

    #[test]
    fn push_slides_in_then_settles() {
        reset();
        let clock = TestClock::install();
        let stack = NavBackStack::new(Page::Home);
        Navigator::new(stack.clone()).push(Page::Post("a".into()));
        let render = renderer(|_: &EntryScope<Page>| Text("page"));

        let v = NavDisplay(&stack, render.clone(), NavTransition::default());
        assert!(v.modifier.has_class("nav-display"));
        assert_eq!(v.children[0].modifier.alpha, Some(0.75));

        clock.advance(Duration::from_millis(1000));
        let v = NavDisplay(&stack, render, NavTransition::default());
        assert!(matches!(v.kind, ViewKind::Text { .. }));
    }

    #[test]
    fn json_round_trip_restores_stack() {
        reset();
        let stack = NavBackStack::new(Page::Home);
        Navigator::new(stack.clone()).push(Page::Post("a".into()));
        let saved = stack.to_json();

        let restored = NavBackStack::new(Page::Home);
        assert!(restored.from_json(&saved));
        assert_eq!(restored.size(), 2);
        assert_eq!(restored.last_dir(), TransitionDir::None);
        assert!(!restored.from_json("{not json"));
        assert!(!restored.from_json("[]"));
        assert_eq!(restored.size(), 2);
    }

    #[test]
    fn back_handler_pops_until_root() {
        reset();
        let stack = NavBackStack::new(Page::Home);
        Navigator::new(stack.clone()).push(Page::Post("a".into()));
        let d = InstallBackHandler(stack.clone());
        assert!(back::handle());
        assert!(!back::handle());
        d.run();
        assert!(!back::handle());
    }
}

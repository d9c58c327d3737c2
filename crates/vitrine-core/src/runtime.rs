use std::any::Any;
use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

use crate::scope::Scope;
use crate::{KeyEvent, Scene, View, semantics::Role};

thread_local! {
    pub static COMPOSER: RefCell<Composer> = RefCell::new(Composer::default());
}

#[derive(Default)]
pub struct Composer {
    pub slots: Vec<Box<dyn Any>>,
    pub cursor: usize,
    pub keyed_slots: HashMap<String, Box<dyn Any>>,
}

/// Marks the start of a composition pass; resets the slot cursor.
pub struct ComposeGuard {
    _private: (),
}

impl ComposeGuard {
    pub fn begin() -> Self {
        COMPOSER.with(|c| c.borrow_mut().cursor = 0);
        ComposeGuard { _private: () }
    }
}

/// Slot-based remember (sequential composition only)
pub fn remember<T: 'static>(init: impl FnOnce() -> T) -> Rc<T> {
    COMPOSER.with(|c| {
        let mut c = c.borrow_mut();
        let cursor = c.cursor;
        c.cursor += 1;

        if cursor >= c.slots.len() {
            let rc: Rc<T> = Rc::new(init());
            c.slots.push(Box::new(rc.clone()));
            return rc;
        }

        if let Some(rc) = c.slots[cursor].downcast_ref::<Rc<T>>() {
            rc.clone()
        } else {
            log::warn!(
                "remember: slot {} type changed; replacing. \
                 If this is due to conditional composition, prefer remember_with_key.",
                cursor
            );
            let rc: Rc<T> = Rc::new(init());
            c.slots[cursor] = Box::new(rc.clone());
            rc
        }
    })
}

/// Key-based remember
pub fn remember_with_key<T: 'static>(key: impl Into<String>, init: impl FnOnce() -> T) -> Rc<T> {
    let key = key.into();
    let existing = COMPOSER.with(|c| {
        let c = c.borrow();
        match c.keyed_slots.get(&key) {
            Some(existing) => match existing.downcast_ref::<Rc<T>>() {
                Some(rc) => Some(rc.clone()),
                None => {
                    log::warn!(
                        "remember_with_key: key '{}' reused with a different type; replacing.",
                        key
                    );
                    None
                }
            },
            None => None,
        }
    });
    if let Some(rc) = existing {
        return rc;
    }

    // `init` runs without the composer borrowed so it may remember too.
    let rc: Rc<T> = Rc::new(init());
    COMPOSER.with(|c| {
        c.borrow_mut().keyed_slots.insert(key, Box::new(rc.clone()));
    });
    rc
}

/// Drops a keyed slot; the next `remember_with_key` for it starts fresh.
///
/// Disposers call this, so it is a no-op while the composer is borrowed or
/// already torn down. The slot value is dropped after the borrow ends.
pub fn forget_with_key(key: &str) -> bool {
    let removed = COMPOSER
        .try_with(|c| {
            c.try_borrow_mut()
                .ok()
                .and_then(|mut c| c.keyed_slots.remove(key))
        })
        .ok()
        .flatten();
    removed.is_some()
}

/// Replaces this thread's composer with an empty one.
///
/// The old slots are dropped once the composer is released, so disposers
/// they own may still remember and forget.
pub fn reset_composer() {
    let old = COMPOSER.with(|c| std::mem::take(&mut *c.borrow_mut()));
    drop(old);
}

pub fn remember_state<T: 'static>(init: impl FnOnce() -> T) -> Rc<RefCell<T>> {
    remember(|| RefCell::new(init()))
}

pub fn remember_state_with_key<T: 'static>(
    key: impl Into<String>,
    init: impl FnOnce() -> T,
) -> Rc<RefCell<T>> {
    remember_with_key(key, || RefCell::new(init()))
}

thread_local! {
    static FOCUS_REQUEST: RefCell<Option<String>> = const { RefCell::new(None) };
}

/// Asks the runner to focus the view whose `Modifier::key` is `key` once the
/// current frame has been painted. The latest request wins.
pub fn request_focus(key: impl Into<String>) {
    let key = key.into();
    FOCUS_REQUEST.with(|r| *r.borrow_mut() = Some(key));
}

fn take_focus_request() -> Option<String> {
    FOCUS_REQUEST.with(|r| r.borrow_mut().take())
}

thread_local! {
    static FRAME_REQUESTED: Cell<bool> = const { Cell::new(false) };
    static FRAME_REQUESTER: RefCell<Option<Rc<dyn Fn()>>> = const { RefCell::new(None) };
}

/// Marks the page as needing a new frame (state changed outside an input
/// handler, e.g. from a timer) and notifies the installed requester.
pub fn request_frame() {
    FRAME_REQUESTED.with(|r| r.set(true));
    let requester = FRAME_REQUESTER.with(|r| r.borrow().clone());
    if let Some(f) = requester {
        f();
    }
}

/// Installs the runner callback invoked by `request_frame`.
pub fn set_frame_requester(f: impl Fn() + 'static) {
    FRAME_REQUESTER.with(|r| *r.borrow_mut() = Some(Rc::new(f)));
}

/// Returns and clears the pending frame request.
pub fn take_frame_request() -> bool {
    FRAME_REQUESTED.with(|r| r.replace(false))
}

/// Output of composition for a tick: markup + input/semantics.
#[derive(Default)]
pub struct Frame {
    pub scene: Scene,
    pub hit_regions: Vec<HitRegion>,
    pub semantics_nodes: Vec<SemNode>,
    pub focus_chain: Vec<u64>,
    /// `Modifier::key` values and the ids they were painted with.
    pub keyed: Vec<(String, u64)>,
    /// Id ranges (root id, last descendant id) that keep Tab focus inside.
    pub focus_traps: Vec<(u64, u64)>,
}

impl Frame {
    pub fn hit(&self, id: u64) -> Option<&HitRegion> {
        self.hit_regions.iter().find(|h| h.id == id)
    }

    /// First node with the given role and label, if any.
    pub fn find(&self, role: Role, label: &str) -> Option<&SemNode> {
        self.semantics_nodes
            .iter()
            .find(|n| n.role == role && n.label.as_deref() == Some(label))
    }

    pub fn id_for_key(&self, key: &str) -> Option<u64> {
        self.keyed.iter().find(|(k, _)| k == key).map(|(_, id)| *id)
    }

    /// Innermost focus trap containing `id`.
    pub fn trap_for(&self, id: u64) -> Option<(u64, u64)> {
        self.focus_traps
            .iter()
            .filter(|(start, end)| *start <= id && id <= *end)
            .max_by_key(|(start, _)| *start)
            .copied()
    }

    /// Next focus target for Tab (`backward` for Shift+Tab), wrapping inside
    /// the trap that holds the current focus, or the whole chain otherwise.
    pub fn next_focus(&self, current: Option<u64>, backward: bool) -> Option<u64> {
        let chain: Vec<u64> = match current.and_then(|id| self.trap_for(id)) {
            Some((start, end)) => self
                .focus_chain
                .iter()
                .copied()
                .filter(|id| start <= *id && *id <= end)
                .collect(),
            None => self.focus_chain.clone(),
        };
        if chain.is_empty() {
            return None;
        }
        let pos = current.and_then(|id| chain.iter().position(|c| *c == id));
        let n = chain.len();
        let next = match (pos, backward) {
            (None, false) => 0,
            (None, true) => n - 1,
            (Some(i), false) => (i + 1) % n,
            (Some(i), true) => (i + n - 1) % n,
        };
        Some(chain[next])
    }
}

#[derive(Clone)]
pub struct HitRegion {
    pub id: u64,
    /// Id of the last descendant; descendants are painted with ids in
    /// `id + 1..=subtree_end`.
    pub subtree_end: u64,
    pub on_click: Option<Rc<dyn Fn()>>,
    pub on_change: Option<Rc<dyn Fn(String)>>,
    /// Key handler for this node and its descendants; returns `true` when the
    /// key was consumed.
    pub on_key: Option<Rc<dyn Fn(&KeyEvent) -> bool>>,
    /// Link target, when the region is an anchor.
    pub href: Option<String>,
    pub focusable: bool,
}

impl HitRegion {
    pub fn contains(&self, id: u64) -> bool {
        self.id <= id && id <= self.subtree_end
    }
}

/// Flattened semantics node produced by the painter.
#[derive(Clone, Debug)]
pub struct SemNode {
    pub id: u64,
    pub role: Role,
    pub label: Option<String>,
    pub focused: bool,
    pub enabled: bool,
}

/// What a painter hands back for one frame.
#[derive(Default)]
pub struct PaintOutput {
    pub scene: Scene,
    pub hit_regions: Vec<HitRegion>,
    pub semantics_nodes: Vec<SemNode>,
    pub keyed: Vec<(String, u64)>,
    pub focus_traps: Vec<(u64, u64)>,
}

pub struct Scheduler {
    pub focused: Option<u64>,
    frames: u64,
    root_scope: Scope,
}

impl Default for Scheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl Scheduler {
    pub fn new() -> Self {
        Self {
            focused: None,
            frames: 0,
            root_scope: Scope::new(),
        }
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Scope that lives as long as the scheduler; page-level effects land
    /// here unless a navigation entry installs its own.
    pub fn root_scope(&self) -> &Scope {
        &self.root_scope
    }

    pub fn compose<F>(&mut self, mut build_root: F, paint: impl Fn(&View, Option<u64>) -> PaintOutput) -> Frame
    where
        F: FnMut(&mut Scheduler) -> View,
    {
        let _guard = ComposeGuard::begin();
        let scope = self.root_scope.clone();
        let root = scope.run(|| build_root(self));
        let out = paint(&root, self.focused);
        self.frames += 1;

        let focus_chain: Vec<u64> = out
            .hit_regions
            .iter()
            .filter(|h| h.focusable)
            .map(|h| h.id)
            .collect();

        let frame = Frame {
            scene: out.scene,
            hit_regions: out.hit_regions,
            semantics_nodes: out.semantics_nodes,
            focus_chain,
            keyed: out.keyed,
            focus_traps: out.focus_traps,
        };

        if let Some(key) = take_focus_request() {
            match frame.id_for_key(&key) {
                Some(id) => self.focused = Some(id),
                None => log::debug!("focus request for '{key}' matched no view"),
            }
        }
        frame
    }

    /// Disposes the root scope; every timer and effect started under it stops.
    pub fn shutdown(&mut self) {
        self.root_scope.dispose();
        self.root_scope = Scope::new();
    }
}

impl Drop for Scheduler {
    fn drop(&mut self) {
        self.root_scope.dispose();
    }
}

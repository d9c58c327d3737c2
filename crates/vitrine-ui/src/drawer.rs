//! Focus-trapped navigation drawer.
//!
//! While open, Tab and Shift+Tab cycle inside the panel, Escape closes it and
//! focus returns to the menu button that opened it.

use std::rc::Rc;

use vitrine_core::*;

use crate::{Box, Button, Empty, ViewExt};

/// Open/closed state of one drawer, shared by its menu button and panel.
#[derive(Clone)]
pub struct DrawerState {
    open: Signal<bool>,
    key: Rc<str>,
}

impl DrawerState {
    /// The drawer state remembered under `key` for the current composition.
    pub fn remembered(key: &str) -> Self {
        let open = remember_with_key(format!("drawer:{key}:open"), || signal(false));
        Self {
            open: (*open).clone(),
            key: Rc::from(key),
        }
    }

    pub fn is_open(&self) -> bool {
        self.open.get()
    }

    /// Opens the drawer and moves focus to its first focusable element.
    pub fn open(&self) {
        if !self.open.get() {
            self.open.set(true);
            request_focus(self.first_key());
        }
    }

    /// Closes the drawer and returns focus to the menu button.
    pub fn close(&self) {
        if self.open.get() {
            self.open.set(false);
            request_focus(self.toggle_key());
        }
    }

    pub fn toggle(&self) {
        if self.is_open() { self.close() } else { self.open() }
    }

    pub fn toggle_key(&self) -> String {
        format!("{}:toggle", self.key)
    }

    fn first_key(&self) -> String {
        format!("{}:first", self.key)
    }

    fn panel_key(&self) -> String {
        format!("{}:panel", self.key)
    }
}

/// Button that opens and closes the drawer.
pub fn MenuButton(state: &DrawerState, label: impl Into<String>, modifier: Modifier) -> View {
    let label = label.into();
    let open = state.is_open();
    let s = state.clone();
    Button(
        modifier
            .key(state.toggle_key())
            .class("menu-button")
            .class_if(open, "is-open")
            .aria_label(label.clone())
            .attr("aria-expanded", if open { "true" } else { "false" }),
        move || s.toggle(),
    )
    .semantics(Semantics::new(Role::Button).label(label))
    .child((
        Box(Modifier::new().class("menu-button__bar").class_if(open, "rotate-45 translate-y-2")),
        Box(Modifier::new().class("menu-button__bar").class_if(open, "opacity-0")),
        Box(Modifier::new().class("menu-button__bar").class_if(open, "-rotate-45 -translate-y-2")),
    ))
}

/// Gives the first link, button or select in `views` the focus key, unless
/// one already has a key of its own.
fn key_first_focusable(views: &mut [View], key: &str) -> bool {
    for v in views {
        if matches!(
            v.kind,
            ViewKind::Link { .. } | ViewKind::Button { .. } | ViewKind::Select { .. }
        ) || v.modifier.focusable
        {
            if v.modifier.key.is_none() {
                v.modifier.key = Some(key.to_string());
            }
            return true;
        }
        if key_first_focusable(&mut v.children, key) {
            return true;
        }
    }
    false
}

/// The drawer panel; renders nothing while closed.
pub fn Drawer(state: &DrawerState, label: impl Into<String>, modifier: Modifier, mut content: Vec<View>) -> View {
    if !state.is_open() {
        return Empty();
    }
    key_first_focusable(&mut content, &state.first_key());
    let s = state.clone();
    Box(modifier
        .class("drawer")
        .key(state.panel_key())
        .focus_trap(true)
        .on_key(move |ev| {
            if ev.key == Key::Escape {
                s.close();
                true
            } else {
                false
            }
        }))
    .semantics(Semantics::new(Role::Dialog).label(label))
    .with_children(content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Column, Link, LinkExt, Text, paint};

    fn page(sched: &mut Scheduler) -> Frame {
        sched.compose(
            |_| {
                let state = DrawerState::remembered("nav");
                let close = state.clone();
                Column(Modifier::new()).child((
                    MenuButton(&state, "Toggle menu", Modifier::new()),
                    Drawer(
                        &state,
                        "Navigation",
                        Modifier::new(),
                        vec![
                            Link("/en", Modifier::new()).child(Text("Home")),
                            Link("/en/blog", Modifier::new())
                                .child(Text("Blog"))
                                .on_click(move || close.close()),
                        ],
                    ),
                    Link("/en/contact", Modifier::new()).child(Text("Contact")),
                ))
            },
            paint,
        )
    }

    fn press(frame: &Frame, focused: Option<u64>, ev: &KeyEvent) -> bool {
        let Some(focused) = focused else { return false };
        let mut handlers: Vec<&HitRegion> = frame
            .hit_regions
            .iter()
            .filter(|h| h.on_key.is_some() && h.contains(focused))
            .collect();
        handlers.sort_by_key(|h| std::cmp::Reverse(h.id));
        handlers
            .into_iter()
            .any(|h| h.on_key.as_ref().is_some_and(|f| f(ev)))
    }

    fn labeled(frame: &Frame, role: Role, label: &str) -> u64 {
        frame.find(role, label).map(|n| n.id).unwrap_or_default()
    }

    #[test]
    fn tab_wraps_inside_open_drawer_and_escape_restores_focus() {
        COMPOSER.with(|c| c.borrow_mut().keyed_slots.clear());
        let mut sched = Scheduler::new();

        let frame = page(&mut sched);
        let toggle = labeled(&frame, Role::Button, "Toggle menu");
        assert!(frame.find(Role::Dialog, "Navigation").is_none());
        if let Some(f) = frame.hit(toggle).and_then(|h| h.on_click.clone()) {
            f();
        }

        let frame = page(&mut sched);
        let home = labeled(&frame, Role::Link, "Home");
        let blog = labeled(&frame, Role::Link, "Blog");
        assert_eq!(sched.focused, Some(home));

        assert_eq!(frame.next_focus(Some(home), false), Some(blog));
        assert_eq!(frame.next_focus(Some(blog), false), Some(home));
        assert_eq!(frame.next_focus(Some(home), true), Some(blog));

        assert!(press(&frame, sched.focused, &KeyEvent::new(Key::Escape)));
        let frame = page(&mut sched);
        assert!(frame.find(Role::Dialog, "Navigation").is_none());
        assert_eq!(sched.focused, Some(toggle));
        assert_eq!(frame.id_for_key("nav:toggle"), Some(toggle));
    }

    #[test]
    fn choosing_a_link_closes_the_drawer() {
        COMPOSER.with(|c| c.borrow_mut().keyed_slots.clear());
        let mut sched = Scheduler::new();
        DrawerState::remembered("nav").open();

        let frame = page(&mut sched);
        let blog = labeled(&frame, Role::Link, "Blog");
        if let Some(f) = frame.hit(blog).and_then(|h| h.on_click.clone()) {
            f();
        }
        let frame = page(&mut sched);
        assert!(frame.find(Role::Dialog, "Navigation").is_none());
    }

    #[test]
    fn focus_outside_any_trap_walks_the_whole_page() {
        COMPOSER.with(|c| c.borrow_mut().keyed_slots.clear());
        let mut sched = Scheduler::new();
        let frame = page(&mut sched);
        let toggle = labeled(&frame, Role::Button, "Toggle menu");
        let contact = labeled(&frame, Role::Link, "Contact");
        assert_eq!(frame.next_focus(Some(toggle), false), Some(contact));
        assert_eq!(frame.next_focus(Some(contact), false), Some(toggle));
    }
}

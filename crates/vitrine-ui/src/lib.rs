#![allow(non_snake_case)]
//! Widgets, motion and interactive components.
//!
//! Widgets are plain functions returning a `View`; ids are assigned by the
//! painter, so constructors always pass `0`. Styling is class based: the
//! `Modifier` carries utility classes and the painter writes them out.

pub mod anim;
pub mod boundary;
pub mod drawer;
pub mod motion;
pub mod render;
pub mod showcase;
pub mod theme_switcher;

use std::rc::Rc;

use vitrine_core::*;

pub use anim::{animate_f32, animate_f32_from};
pub use boundary::{ErrorBoundary, ErrorInfo};
pub use drawer::{Drawer, DrawerState, MenuButton};
pub use motion::{Enter, Motion};
pub use render::{escape, paint};
pub use showcase::{
    Direction, ItemPhase, RotatingShowcase, Showcase, ShowcaseState, Transition, advance_once,
    direction, transition,
};
pub use theme_switcher::{ThemeSwitcher, ThemeSwitcherVariant};

pub fn Surface(modifier: Modifier, child: View) -> View {
    let mut v = View::new(0, ViewKind::Surface).modifier(modifier);
    v.children = vec![child];
    v
}

pub fn Box(modifier: Modifier) -> View {
    View::new(0, ViewKind::Container(Tag::Div)).modifier(modifier)
}

/// Horizontal flex container; reversed under RTL.
pub fn Row(modifier: Modifier) -> View {
    let dir = if text_direction().is_rtl() {
        "flex flex-row-reverse"
    } else {
        "flex flex-row"
    };
    View::new(0, ViewKind::Container(Tag::Div)).modifier(modifier.class(dir))
}

pub fn Column(modifier: Modifier) -> View {
    View::new(0, ViewKind::Container(Tag::Div)).modifier(modifier.class("flex flex-col"))
}

/// Children overlap in one grid cell.
pub fn Stack(modifier: Modifier) -> View {
    View::new(0, ViewKind::Container(Tag::Div)).modifier(modifier.class("grid stack"))
}

pub fn Container(tag: Tag, modifier: Modifier) -> View {
    View::new(0, ViewKind::Container(tag)).modifier(modifier)
}

pub fn Section(modifier: Modifier) -> View {
    Container(Tag::Section, modifier)
}

/// Renders nothing.
pub fn Empty() -> View {
    View::new(0, ViewKind::Empty)
}

pub fn Text(text: impl Into<String>) -> View {
    View::new(
        0,
        ViewKind::Text {
            text: text.into(),
            tag: Tag::Span,
        },
    )
}

pub fn Paragraph(text: impl Into<String>) -> View {
    Text(text).tag(Tag::P)
}

pub fn Heading(level: u8, text: impl Into<String>) -> View {
    let text = text.into();
    Text(text.clone())
        .tag(Tag::Heading(level.clamp(1, 6)))
        .semantics(Semantics::new(Role::Heading).label(text))
}

pub fn Link(href: impl Into<String>, modifier: Modifier) -> View {
    View::new(
        0,
        ViewKind::Link {
            href: href.into(),
            download: false,
            on_click: None,
        },
    )
    .modifier(modifier)
    .semantics(Semantics::new(Role::Link))
}

/// Link that asks the browser to save the target.
pub fn Download(href: impl Into<String>, modifier: Modifier) -> View {
    View::new(
        0,
        ViewKind::Link {
            href: href.into(),
            download: true,
            on_click: None,
        },
    )
    .modifier(modifier)
    .semantics(Semantics::new(Role::Link))
}

pub fn Button(modifier: Modifier, on_click: impl Fn() + 'static) -> View {
    View::new(
        0,
        ViewKind::Button {
            on_click: Some(Rc::new(on_click)),
        },
    )
    .modifier(modifier)
    .semantics(Semantics::new(Role::Button))
}

pub fn Image(src: impl Into<String>, alt: impl Into<String>, modifier: Modifier) -> View {
    let alt = alt.into();
    View::new(
        0,
        ViewKind::Image {
            src: src.into(),
            alt: alt.clone(),
            width: None,
            height: None,
        },
    )
    .modifier(modifier)
    .semantics(Semantics::new(Role::Image).label(alt))
}

/// Decorative glyph from the site icon sprite.
pub fn Icon(name: &'static str, modifier: Modifier) -> View {
    View::new(0, ViewKind::Icon { name }).modifier(modifier)
}

/// Native select; `options` are `(value, label)` pairs.
pub fn Select(
    value: impl Into<String>,
    options: Vec<(String, String)>,
    modifier: Modifier,
    on_change: impl Fn(String) + 'static,
) -> View {
    View::new(
        0,
        ViewKind::Select {
            value: value.into(),
            options,
            on_change: Some(Rc::new(on_change)),
        },
    )
    .modifier(modifier)
    .semantics(Semantics::new(Role::ComboBox))
}

/// `<ul>` with one `<li>` per item.
pub fn List(modifier: Modifier, items: impl IntoIterator<Item = View>) -> View {
    Container(Tag::Ul, modifier).with_children(
        items
            .into_iter()
            .map(|item| Container(Tag::Li, Modifier::new()).child(item))
            .collect(),
    )
}

/// Extension trait for child building
pub trait ViewExt: Sized {
    fn child(self, children: impl IntoChildren) -> Self;
}

impl ViewExt for View {
    fn child(mut self, children: impl IntoChildren) -> Self {
        self.children.extend(children.into_children());
        self
    }
}

pub trait IntoChildren {
    fn into_children(self) -> Vec<View>;
}

impl IntoChildren for View {
    fn into_children(self) -> Vec<View> {
        vec![self]
    }
}

impl IntoChildren for Vec<View> {
    fn into_children(self) -> Vec<View> {
        self
    }
}

impl IntoChildren for Option<View> {
    fn into_children(self) -> Vec<View> {
        self.into_iter().collect()
    }
}

impl<const N: usize> IntoChildren for [View; N] {
    fn into_children(self) -> Vec<View> {
        self.into()
    }
}

// Tuple implementations
macro_rules! impl_into_children_tuple {
    ($($idx:tt $t:ident),+) => {
        impl<$($t: IntoChildren),+> IntoChildren for ($($t,)+) {
            fn into_children(self) -> Vec<View> {
                let mut v = Vec::new();
                $(v.extend(self.$idx.into_children());)+
                v
            }
        }
    };
}

impl_into_children_tuple!(0 A, 1 B);
impl_into_children_tuple!(0 A, 1 B, 2 C);
impl_into_children_tuple!(0 A, 1 B, 2 C, 3 D);
impl_into_children_tuple!(0 A, 1 B, 2 C, 3 D, 4 E);
impl_into_children_tuple!(0 A, 1 B, 2 C, 3 D, 4 E, 5 F);
impl_into_children_tuple!(0 A, 1 B, 2 C, 3 D, 4 E, 5 F, 6 G);
impl_into_children_tuple!(0 A, 1 B, 2 C, 3 D, 4 E, 5 F, 6 G, 7 H);

/// Method styling
pub trait TextStyle {
    /// Element the text is written as (`p`, `h2`, `blockquote`...).
    fn tag(self, tag: Tag) -> View;
}

impl TextStyle for View {
    fn tag(mut self, new_tag: Tag) -> View {
        if let ViewKind::Text { tag, .. } = &mut self.kind {
            *tag = new_tag;
        }
        self
    }
}

pub trait LinkExt {
    /// Runs `f` when the link is activated, before navigation.
    fn on_click(self, f: impl Fn() + 'static) -> View;
}

impl LinkExt for View {
    fn on_click(mut self, f: impl Fn() + 'static) -> View {
        match &mut self.kind {
            ViewKind::Link { on_click, .. } | ViewKind::Button { on_click } => {
                *on_click = Some(Rc::new(f));
            }
            _ => log::debug!("on_click ignored on a view that is neither a link nor a button"),
        }
        self
    }
}

pub trait ImageExt {
    fn size(self, width: u32, height: u32) -> View;
}

impl ImageExt for View {
    fn size(mut self, w: u32, h: u32) -> View {
        if let ViewKind::Image { width, height, .. } = &mut self.kind {
            *width = Some(w);
            *height = Some(h);
        }
        self
    }
}

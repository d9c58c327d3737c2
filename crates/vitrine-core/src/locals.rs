//! # Composition locals
//!
//! Values that a whole subtree reads without threading them through every
//! view constructor:
//!
//! - `Palette`: colors for the active display mode.
//! - `TextDirection`: LTR or RTL, derived from the page locale.
//! - any `Clone + 'static` value via `with_local` / `local` (the theme
//!   preference handle, the message bundle, the current route).
//!
//! Overrides nest: the innermost `with_*` wins, and the frame is popped when
//! the closure returns (or unwinds).
//!
//! ```rust
//! use vitrine_core::*;
//!
//! with_palette(Palette::dark(), || {
//!     assert_eq!(palette().background, Palette::dark().background);
//! });
//! ```

use std::any::{Any, TypeId};
use std::cell::RefCell;
use std::collections::HashMap;

use crate::Color;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum TextDirection {
    #[default]
    Ltr,
    Rtl,
}

impl TextDirection {
    pub fn as_str(self) -> &'static str {
        match self {
            TextDirection::Ltr => "ltr",
            TextDirection::Rtl => "rtl",
        }
    }

    pub fn is_rtl(self) -> bool {
        self == TextDirection::Rtl
    }
}

thread_local! {
    static LOCALS_STACK: RefCell<Vec<HashMap<TypeId, Box<dyn Any>>>> = RefCell::new(Vec::new());
}

fn with_locals_frame<R>(f: impl FnOnce() -> R) -> R {
    // Non-panicking frame guard (ensures pop on unwind)
    struct Guard;
    impl Drop for Guard {
        fn drop(&mut self) {
            let _ = LOCALS_STACK.try_with(|st| {
                st.borrow_mut().pop();
            });
        }
    }
    LOCALS_STACK.with(|st| st.borrow_mut().push(HashMap::new()));
    let _guard = Guard;
    f()
}

fn set_local_boxed(t: TypeId, v: Box<dyn Any>) {
    LOCALS_STACK.with(|st| {
        if let Some(top) = st.borrow_mut().last_mut() {
            top.insert(t, v);
        }
    });
}

/// Provides `value` to everything composed inside `f`.
pub fn with_local<T: Clone + 'static, R>(value: T, f: impl FnOnce() -> R) -> R {
    with_locals_frame(|| {
        set_local_boxed(TypeId::of::<T>(), Box::new(value));
        f()
    })
}

/// Innermost provided value of type `T`, if any.
pub fn local<T: Clone + 'static>() -> Option<T> {
    LOCALS_STACK.with(|st| {
        st.borrow()
            .iter()
            .rev()
            .find_map(|frame| frame.get(&TypeId::of::<T>()))
            .and_then(|v| v.downcast_ref::<T>())
            .cloned()
    })
}

/// Page colors for one display mode.
///
/// Emitted as CSS custom properties on the document root; views refer to
/// them through utility classes rather than inline colors.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Palette {
    /// Page background.
    pub background: Color,
    /// Cards, drawers, the header bar.
    pub surface: Color,
    pub on_surface: Color,
    /// Secondary text (roles, dates, captions).
    pub muted: Color,
    pub primary: Color,
    /// Highlight for the active theme button and focus rings.
    pub accent: Color,
    pub outline: Color,
}

impl Palette {
    pub fn light() -> Self {
        Self {
            background: Color::from_hex("#FAF8F2"),
            surface: Color::WHITE,
            on_surface: Color::from_hex("#0F172A"),
            muted: Color::from_hex("#475569"),
            primary: Color::from_hex("#1E3A8A"),
            accent: Color::from_hex("#B8860B"),
            outline: Color::from_hex("#E2E8F0"),
        }
    }

    pub fn dark() -> Self {
        Self {
            background: Color::from_hex("#1C1C1E"),
            surface: Color::from_hex("#1E293B"),
            on_surface: Color::from_hex("#F8FAFC"),
            muted: Color::from_hex("#CBD5E1"),
            primary: Color::from_hex("#60A5FA"),
            accent: Color::from_hex("#006C35"),
            outline: Color::from_hex("#334155"),
        }
    }

    /// CSS custom property declarations, e.g. `--color-background:#faf8f2;`.
    pub fn css_vars(&self) -> String {
        [
            ("background", self.background),
            ("surface", self.surface),
            ("on-surface", self.on_surface),
            ("muted", self.muted),
            ("primary", self.primary),
            ("accent", self.accent),
            ("outline", self.outline),
        ]
        .iter()
        .map(|(name, c)| format!("--color-{name}:{};", c.to_css()))
        .collect()
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::light()
    }
}

pub fn with_palette<R>(palette: Palette, f: impl FnOnce() -> R) -> R {
    with_local(palette, f)
}

pub fn palette() -> Palette {
    local::<Palette>().unwrap_or_default()
}

pub fn with_text_direction<R>(dir: TextDirection, f: impl FnOnce() -> R) -> R {
    with_local(dir, f)
}

pub fn text_direction() -> TextDirection {
    local::<TextDirection>().unwrap_or_default()
}

use std::rc::Rc;

use smallvec::SmallVec;

use crate::KeyEvent;

/// Length used by translations: absolute pixels or percent of own size.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Length {
    Px(f32),
    Percent(f32),
}

impl Length {
    pub fn css(self) -> String {
        match self {
            Length::Px(v) => format!("{}px", trim_float(v)),
            Length::Percent(v) => format!("{}%", trim_float(v)),
        }
    }

    pub fn is_zero(self) -> bool {
        match self {
            Length::Px(v) | Length::Percent(v) => v.abs() < 0.005,
        }
    }
}

fn trim_float(v: f32) -> String {
    let rounded = (v * 100.0).round() / 100.0;
    if rounded.fract() == 0.0 {
        format!("{}", rounded as i64)
    } else {
        format!("{rounded}")
    }
}

#[derive(Clone, Default)]
pub struct Modifier {
    pub classes: SmallVec<[String; 4]>,
    pub id: Option<String>,
    pub key: Option<String>,
    pub attrs: Vec<(String, String)>,
    pub aria_label: Option<String>,
    pub title: Option<String>,
    pub alpha: Option<f32>,
    pub translate: Option<(Length, Length)>,
    pub scale: Option<f32>,
    pub hidden: bool,
    pub focusable: bool,
    pub focus_trap: bool,
    pub on_key: Option<Rc<dyn Fn(&KeyEvent) -> bool>>,
    pub semantics: Option<crate::Semantics>,
}

impl std::fmt::Debug for Modifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Modifier")
            .field("classes", &self.classes)
            .field("id", &self.id)
            .field("key", &self.key)
            .field("attrs", &self.attrs)
            .field("aria_label", &self.aria_label)
            .field("title", &self.title)
            .field("alpha", &self.alpha)
            .field("translate", &self.translate)
            .field("scale", &self.scale)
            .field("hidden", &self.hidden)
            .field("focusable", &self.focusable)
            .field("focus_trap", &self.focus_trap)
            .field("on_key", &self.on_key.as_ref().map(|_| "..."))
            .finish()
    }
}

impl Modifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends whitespace separated classes; empty strings are ignored.
    pub fn class(mut self, classes: impl AsRef<str>) -> Self {
        self.classes
            .extend(classes.as_ref().split_whitespace().map(str::to_string));
        self
    }

    /// Appends `classes` only when `cond` holds.
    pub fn class_if(self, cond: bool, classes: impl AsRef<str>) -> Self {
        if cond { self.class(classes) } else { self }
    }

    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Stable identity for remembered per-view state (animations).
    pub fn key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }

    pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attrs.push((name.into(), value.into()));
        self
    }

    pub fn aria_label(mut self, label: impl Into<String>) -> Self {
        self.aria_label = Some(label.into());
        self
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn alpha(mut self, a: f32) -> Self {
        self.alpha = Some(a.clamp(0.0, 1.0));
        self
    }

    pub fn translate(mut self, x: Length, y: Length) -> Self {
        self.translate = Some((x, y));
        self
    }

    pub fn scale(mut self, s: f32) -> Self {
        self.scale = Some(s);
        self
    }

    /// Keeps the node in the tree but out of sight and out of the
    /// accessibility tree.
    pub fn hidden(mut self, hidden: bool) -> Self {
        self.hidden = hidden;
        self
    }

    pub fn focusable(mut self, f: bool) -> Self {
        self.focusable = f;
        self
    }

    /// Tab and Shift+Tab cycle through focusable descendants only.
    pub fn focus_trap(mut self, trap: bool) -> Self {
        self.focus_trap = trap;
        self
    }

    pub fn on_key(mut self, f: impl Fn(&KeyEvent) -> bool + 'static) -> Self {
        self.on_key = Some(Rc::new(f));
        self
    }

    pub fn semantics(mut self, s: crate::Semantics) -> Self {
        self.semantics = Some(s);
        self
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    /// Inline style for the visual transform fields, if any are set.
    pub fn style(&self) -> Option<String> {
        let mut parts: Vec<String> = Vec::new();
        if let Some(a) = self.alpha {
            parts.push(format!("opacity:{}", trim_float(a)));
        }
        let mut transforms: Vec<String> = Vec::new();
        if let Some((x, y)) = self.translate
            && !(x.is_zero() && y.is_zero())
        {
            transforms.push(format!("translate({},{})", x.css(), y.css()));
        }
        if let Some(s) = self.scale
            && (s - 1.0).abs() > 0.005
        {
            transforms.push(format!("scale({})", trim_float(s)));
        }
        if !transforms.is_empty() {
            parts.push(format!("transform:{}", transforms.join(" ")));
        }
        if parts.is_empty() {
            None
        } else {
            Some(parts.join(";"))
        }
    }
}

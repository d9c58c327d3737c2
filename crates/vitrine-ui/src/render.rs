//! HTML painter.
//!
//! Turns a composed `View` tree into markup plus the input and semantics
//! tables the runners dispatch against. Ids are stamped in pre-order, so a
//! view's descendants occupy the id range right after it.

use std::fmt::Write as _;

use smallvec::SmallVec;
use vitrine_core::*;

/// Escapes text for use in element content and quoted attribute values.
pub fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}

fn stamp(mut v: View, id: &mut u64) -> View {
    v.id = *id;
    *id += 1;
    v.children = v.children.into_iter().map(|c| stamp(c, id)).collect();
    v
}

fn last_id(v: &View) -> u64 {
    v.children.last().map(last_id).unwrap_or(v.id)
}

struct Painter {
    markup: String,
    out: PaintOutput,
    focused: Option<u64>,
}

pub fn paint(root: &View, focused: Option<u64>) -> PaintOutput {
    let mut id = 1u64;
    let root = stamp(root.clone(), &mut id);

    let mut p = Painter {
        markup: String::new(),
        out: PaintOutput::default(),
        focused,
    };
    p.node(&root, false);
    p.out.scene = Scene { markup: p.markup };
    p.out
}

impl Painter {
    fn attr(&mut self, name: &str, value: &str) {
        let _ = write!(self.markup, " {name}=\"{}\"", escape(value));
    }

    fn flag(&mut self, name: &str) {
        let _ = write!(self.markup, " {name}");
    }

    fn node(&mut self, v: &View, hidden_above: bool) {
        if v.is_empty() {
            return;
        }
        let m = &v.modifier;
        let hidden = hidden_above || m.hidden;

        let tag = match &v.kind {
            ViewKind::Empty => return,
            ViewKind::Surface => "div",
            ViewKind::Container(tag) => tag.name(),
            ViewKind::Text { tag, .. } => tag.name(),
            ViewKind::Link { .. } => "a",
            ViewKind::Button { .. } => "button",
            ViewKind::Image { .. } => "img",
            ViewKind::Icon { .. } => "svg",
            ViewKind::Select { .. } => "select",
        };

        let _ = write!(self.markup, "<{tag} data-vid=\"{}\"", v.id);
        if let Some(id) = &m.id {
            self.attr("id", id);
        }

        let mut classes: SmallVec<[&str; 8]> = SmallVec::new();
        match &v.kind {
            ViewKind::Surface => classes.push("surface"),
            ViewKind::Icon { .. } => classes.push("icon"),
            _ => {}
        }
        classes.extend(m.classes.iter().map(String::as_str));
        if !classes.is_empty() {
            self.attr("class", &classes.join(" "));
        }
        if let Some(style) = m.style() {
            self.attr("style", &style);
        }

        let semantics = v.semantics.as_ref().or(m.semantics.as_ref());
        if let Some(role) = semantics.and_then(|s| s.role.aria()) {
            self.attr("role", role);
        }
        if let Some(label) = &m.aria_label {
            self.attr("aria-label", label);
        }
        if let Some(title) = &m.title {
            self.attr("title", title);
        }

        match &v.kind {
            ViewKind::Link { href, download, .. } => {
                self.attr("href", href);
                if *download {
                    self.flag("download");
                }
            }
            ViewKind::Button { .. } => self.attr("type", "button"),
            ViewKind::Image {
                src,
                alt,
                width,
                height,
            } => {
                self.attr("src", src);
                self.attr("alt", alt);
                if let Some(w) = width {
                    self.attr("width", &w.to_string());
                }
                if let Some(h) = height {
                    self.attr("height", &h.to_string());
                }
            }
            ViewKind::Icon { .. } => self.attr("aria-hidden", "true"),
            _ => {}
        }

        let natively_focusable = matches!(
            v.kind,
            ViewKind::Link { .. } | ViewKind::Button { .. } | ViewKind::Select { .. }
        );
        if m.focusable && !natively_focusable {
            self.attr("tabindex", "0");
        }
        if m.hidden {
            self.attr("aria-hidden", "true");
            self.flag("inert");
        }
        if self.focused == Some(v.id) {
            self.attr("data-focused", "true");
        }
        for (name, value) in &m.attrs {
            self.attr(name, value);
        }

        self.markup.push('>');
        if !hidden {
            self.record(v, semantics);
        }
        // <img> is a void element.
        if matches!(v.kind, ViewKind::Image { .. }) {
            return;
        }

        match &v.kind {
            ViewKind::Text { text, .. } => self.markup.push_str(&escape(text)),
            ViewKind::Icon { name } => {
                let _ = write!(self.markup, "<use href=\"#icon-{name}\"></use>");
            }
            ViewKind::Select { value, options, .. } => {
                for (opt, label) in options {
                    let _ = write!(self.markup, "<option value=\"{}\"", escape(opt));
                    if opt == value {
                        self.flag("selected");
                    }
                    let _ = write!(self.markup, ">{}</option>", escape(label));
                }
            }
            _ => {}
        }
        for c in &v.children {
            self.node(c, hidden);
        }
        let _ = write!(self.markup, "</{tag}>");
    }

    fn record(&mut self, v: &View, semantics: Option<&Semantics>) {
        let m = &v.modifier;

        if let Some(key) = &m.key {
            self.out.keyed.push((key.clone(), v.id));
        }
        if m.focus_trap {
            self.out.focus_traps.push((v.id, last_id(v)));
        }

        let (on_click, on_change, href, focusable) = match &v.kind {
            ViewKind::Button { on_click } => (on_click.clone(), None, None, true),
            ViewKind::Link { href, on_click, .. } => {
                (on_click.clone(), None, Some(href.clone()), true)
            }
            ViewKind::Select { on_change, .. } => (None, on_change.clone(), None, true),
            _ => (None, None, None, m.focusable),
        };
        if on_click.is_some()
            || on_change.is_some()
            || href.is_some()
            || m.on_key.is_some()
            || focusable
        {
            self.out.hit_regions.push(HitRegion {
                id: v.id,
                subtree_end: last_id(v),
                on_click,
                on_change,
                on_key: m.on_key.clone(),
                href,
                focusable,
            });
        }

        if let Some(s) = semantics {
            let label = s
                .label
                .clone()
                .or_else(|| m.aria_label.clone())
                .or_else(|| {
                    let text = v.text_content();
                    (!text.is_empty()).then_some(text)
                });
            self.out.semantics_nodes.push(SemNode {
                id: v.id,
                role: s.role,
                label,
                focused: self.focused == Some(v.id),
                enabled: s.enabled,
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::*;
    use std::cell::Cell;
    use std::rc::Rc;

    #[test]
    fn escapes_text_and_attributes() {
        let v = Box(Modifier::new().title("a \"b\"")).child(Text("<script>&"));
        let out = paint(&v, None);
        assert_eq!(
            out.scene.markup,
            "<div data-vid=\"1\" title=\"a &quot;b&quot;\"><span data-vid=\"2\">&lt;script&gt;&amp;</span></div>"
        );
    }

    #[test]
    fn empty_renders_nothing() {
        let v = Column(Modifier::new()).child((Empty(), Text("x")));
        let out = paint(&v, None);
        assert!(!out.scene.markup.contains("data-vid=\"2\""));
        assert!(out.scene.markup.contains("<span data-vid=\"3\">x</span>"));
    }

    #[test]
    fn buttons_and_links_become_focusable_hit_regions() {
        let clicks = Rc::new(Cell::new(0));
        let c = clicks.clone();
        let v = Row(Modifier::new()).child((
            Button(Modifier::new().aria_label("Go"), move || c.set(c.get() + 1)),
            Link("/en/blog", Modifier::new()).child(Text("Blog")),
            Text("plain"),
        ));
        let out = paint(&v, Some(2));

        assert_eq!(out.hit_regions.len(), 2);
        let button = &out.hit_regions[0];
        assert!(button.focusable);
        if let Some(f) = &button.on_click {
            f();
        }
        assert_eq!(clicks.get(), 1);
        assert_eq!(out.hit_regions[1].href.as_deref(), Some("/en/blog"));

        let link = out
            .semantics_nodes
            .iter()
            .find(|n| n.role == Role::Link)
            .unwrap();
        assert_eq!(link.label.as_deref(), Some("Blog"));
        let button = out
            .semantics_nodes
            .iter()
            .find(|n| n.role == Role::Button)
            .unwrap();
        assert_eq!(button.label.as_deref(), Some("Go"));
        assert!(button.focused);
    }

    #[test]
    fn hidden_subtrees_are_inert() {
        let v = Box(Modifier::new()).child((
            Box(Modifier::new().hidden(true)).child(Button(Modifier::new(), || {})),
            Button(Modifier::new(), || {}),
        ));
        let out = paint(&v, None);
        assert_eq!(out.hit_regions.len(), 1);
        assert_eq!(out.hit_regions[0].id, 4);
        assert!(out.scene.markup.contains("aria-hidden=\"true\" inert"));
    }

    #[test]
    fn traps_and_keys_cover_subtree() {
        let v = Box(Modifier::new()).child(
            Box(Modifier::new().focus_trap(true).key("drawer")).child((
                Link("/a", Modifier::new()),
                Link("/b", Modifier::new()),
            )),
        );
        let out = paint(&v, None);
        assert_eq!(out.focus_traps, vec![(2, 4)]);
        assert_eq!(out.keyed, vec![("drawer".to_string(), 2)]);
    }

    #[test]
    fn select_marks_current_option() {
        let v = Select(
            "ar",
            vec![
                ("en".into(), "English".into()),
                ("ar".into(), "العربية".into()),
            ],
            Modifier::new().aria_label("Language"),
            |_| {},
        );
        let markup = paint(&v, None).scene.markup;
        assert!(markup.contains("<option value=\"ar\" selected>العربية</option>"));
        assert!(markup.contains("<option value=\"en\">English</option>"));
    }
}

use crate::Modifier;
use std::rc::Rc;

pub type ViewId = u64;

pub type Callback = Rc<dyn Fn()>;
pub type ChangeCallback = Rc<dyn Fn(String)>;

/// Element used for a container or a text node.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tag {
    Div,
    Span,
    Section,
    Article,
    Header,
    Nav,
    Main,
    Footer,
    Ul,
    Li,
    Blockquote,
    P,
    Heading(u8),
}

impl Tag {
    pub fn name(self) -> &'static str {
        match self {
            Tag::Div => "div",
            Tag::Span => "span",
            Tag::Section => "section",
            Tag::Article => "article",
            Tag::Header => "header",
            Tag::Nav => "nav",
            Tag::Main => "main",
            Tag::Footer => "footer",
            Tag::Ul => "ul",
            Tag::Li => "li",
            Tag::Blockquote => "blockquote",
            Tag::P => "p",
            Tag::Heading(1) => "h1",
            Tag::Heading(2) => "h2",
            Tag::Heading(3) => "h3",
            Tag::Heading(4) => "h4",
            Tag::Heading(5) => "h5",
            Tag::Heading(_) => "h6",
        }
    }
}

#[derive(Clone)]
pub enum ViewKind {
    /// Renders nothing, children included.
    Empty,
    Surface,
    Container(Tag),
    Text {
        text: String,
        tag: Tag,
    },
    Link {
        href: String,
        download: bool,
        on_click: Option<Callback>,
    },
    Button {
        on_click: Option<Callback>,
    },
    Image {
        src: String,
        alt: String,
        width: Option<u32>,
        height: Option<u32>,
    },
    Icon {
        name: &'static str,
    },
    Select {
        value: String,
        options: Vec<(String, String)>,
        on_change: Option<ChangeCallback>,
    },
}

impl std::fmt::Debug for ViewKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ViewKind::Empty => write!(f, "Empty"),
            ViewKind::Surface => write!(f, "Surface"),
            ViewKind::Container(tag) => write!(f, "Container({})", tag.name()),
            ViewKind::Text { text, tag } => f
                .debug_struct("Text")
                .field("text", text)
                .field("tag", tag)
                .finish(),
            ViewKind::Link { href, download, .. } => f
                .debug_struct("Link")
                .field("href", href)
                .field("download", download)
                .finish(),
            ViewKind::Button { on_click } => f
                .debug_struct("Button")
                .field("on_click", &on_click.as_ref().map(|_| "<callback>"))
                .finish(),
            ViewKind::Image {
                src,
                alt,
                width,
                height,
            } => f
                .debug_struct("Image")
                .field("src", src)
                .field("alt", alt)
                .field("width", width)
                .field("height", height)
                .finish(),
            ViewKind::Icon { name } => f.debug_struct("Icon").field("name", name).finish(),
            ViewKind::Select { value, options, .. } => f
                .debug_struct("Select")
                .field("value", value)
                .field("options", options)
                .finish(),
        }
    }
}

#[derive(Clone, Debug)]
pub struct View {
    pub id: ViewId,
    pub kind: ViewKind,
    pub modifier: Modifier,
    pub children: Vec<View>,
    pub semantics: Option<crate::semantics::Semantics>,
}

impl View {
    pub fn new(id: ViewId, kind: ViewKind) -> Self {
        View {
            id,
            kind,
            modifier: Modifier::default(),
            children: vec![],
            semantics: None,
        }
    }
    pub fn modifier(mut self, m: Modifier) -> Self {
        self.modifier = m;
        self
    }
    pub fn with_children(mut self, kids: Vec<View>) -> Self {
        self.children = kids;
        self
    }
    pub fn semantics(mut self, s: crate::semantics::Semantics) -> Self {
        self.semantics = Some(s);
        self
    }

    pub fn is_empty(&self) -> bool {
        matches!(self.kind, ViewKind::Empty)
    }

    /// Depth-first search for the first view whose semantics label matches.
    pub fn find_labeled(&self, label: &str) -> Option<&View> {
        if self
            .semantics
            .as_ref()
            .and_then(|s| s.label.as_deref())
            .is_some_and(|l| l == label)
        {
            return Some(self);
        }
        self.children.iter().find_map(|c| c.find_labeled(label))
    }

    /// Concatenated text of this view and its descendants.
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        fn walk(v: &View, out: &mut String) {
            if v.is_empty() {
                return;
            }
            if let ViewKind::Text { text, .. } = &v.kind {
                if !out.is_empty() {
                    out.push(' ');
                }
                out.push_str(text);
            }
            for c in &v.children {
                walk(c, out);
            }
        }
        walk(self, &mut out);
        out
    }
}

/// Painted output of a frame.
#[derive(Clone, Debug, Default)]
pub struct Scene {
    pub markup: String,
}

/// High‑level semantic role of a view, similar to ARIA roles.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Role {
    Text,
    Heading,
    Button,
    Link,
    Image,
    ComboBox,
    Dialog,
    Article,
}

impl Role {
    /// ARIA role attribute for nodes whose element does not imply it.
    pub fn aria(self) -> Option<&'static str> {
        match self {
            Role::Dialog => Some("dialog"),
            _ => None,
        }
    }
}

/// Semantics attached to a `View`, used to build the accessibility tree.
#[derive(Clone, Debug)]
pub struct Semantics {
    pub role: Role,
    /// Human‑readable name announced by screen readers.
    pub label: Option<String>,
    pub focused: bool,
    /// Disabled nodes remain in the tree but are marked not enabled.
    pub enabled: bool,
}

impl Semantics {
    pub fn new(role: Role) -> Self {
        Self {
            role,
            label: None,
            focused: false,
            enabled: true,
        }
    }

    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }
}

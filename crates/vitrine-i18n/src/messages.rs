use std::collections::BTreeMap;
use std::rc::Rc;

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::{Locale, MessagesError};

/// One locale's message bundle.
///
/// Keys are dotted paths into nested JSON objects (`Hero.name`,
/// `BlogPosts.binary.content.intro`). Lookups that miss the bundle retry in
/// the fallback bundle, if one is attached.
#[derive(Clone, Debug)]
pub struct Messages {
    locale: Locale,
    root: Rc<Value>,
    fallback: Option<Rc<Value>>,
}

impl Messages {
    pub fn from_json(locale: Locale, json: &str) -> Result<Self, MessagesError> {
        let root: Value =
            serde_json::from_str(json).map_err(|source| MessagesError::Parse { locale, source })?;
        Self::from_value(locale, root)
    }

    pub fn from_value(locale: Locale, root: Value) -> Result<Self, MessagesError> {
        if !root.is_object() {
            return Err(MessagesError::NotAnObject(locale));
        }
        Ok(Self {
            locale,
            root: Rc::new(root),
            fallback: None,
        })
    }

    pub fn empty(locale: Locale) -> Self {
        Self {
            locale,
            root: Rc::new(Value::Object(Default::default())),
            fallback: None,
        }
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    fn with_fallback(mut self, fallback: &Messages) -> Self {
        if !Rc::ptr_eq(&self.root, &fallback.root) {
            self.fallback = Some(fallback.root.clone());
        }
        self
    }

    /// Raw value at `path`, if present.
    pub fn lookup(&self, path: &str) -> Option<&Value> {
        walk(&self.root, path).or_else(|| self.fallback.as_deref().and_then(|f| walk(f, path)))
    }

    /// String at `path`. Non-string values count as missing.
    pub fn get(&self, path: &str) -> Option<&str> {
        self.lookup(path).and_then(Value::as_str)
    }

    /// String at `path`, or the path itself when missing.
    pub fn t(&self, path: &str) -> String {
        match self.get(path) {
            Some(s) => s.to_string(),
            None => {
                log::warn!("[{}] missing message '{path}'", self.locale);
                path.to_string()
            }
        }
    }

    /// `t` with `{name}` placeholders replaced from `args`.
    pub fn t_with(&self, path: &str, args: &[(&str, &str)]) -> String {
        interpolate(&self.t(path), args)
    }

    /// Deserializes the structured value at `path` (a list of reviews, a
    /// skill category).
    pub fn raw<T: DeserializeOwned>(&self, path: &str) -> Option<T> {
        let value = self.lookup(path)?;
        match serde_json::from_value(value.clone()) {
            Ok(v) => Some(v),
            Err(e) => {
                log::warn!("[{}] message '{path}' has an unexpected shape: {e}", self.locale);
                None
            }
        }
    }

    pub fn namespace(&self, namespace: &str) -> Translator {
        Translator {
            messages: self.clone(),
            namespace: namespace.to_string(),
        }
    }
}

fn walk<'a>(root: &'a Value, path: &str) -> Option<&'a Value> {
    path.split('.')
        .filter(|seg| !seg.is_empty())
        .try_fold(root, |v, seg| match v {
            Value::Object(map) => map.get(seg),
            Value::Array(items) => seg.parse::<usize>().ok().and_then(|i| items.get(i)),
            _ => None,
        })
}

/// Replaces `{name}` placeholders. Unknown placeholders are left as is.
pub fn interpolate(template: &str, args: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        match after.find('}') {
            Some(close) => {
                let name = &after[..close];
                match args.iter().find(|(k, _)| *k == name) {
                    Some((_, v)) => out.push_str(v),
                    None => {
                        out.push('{');
                        out.push_str(name);
                        out.push('}');
                    }
                }
                rest = &after[close + 1..];
            }
            None => {
                out.push_str(&rest[open..]);
                rest = "";
            }
        }
    }
    out.push_str(rest);
    out
}

/// Messages scoped to one namespace, e.g. `Hero`.
#[derive(Clone, Debug)]
pub struct Translator {
    messages: Messages,
    namespace: String,
}

impl Translator {
    fn path(&self, key: &str) -> String {
        if self.namespace.is_empty() {
            key.to_string()
        } else {
            format!("{}.{key}", self.namespace)
        }
    }

    pub fn locale(&self) -> Locale {
        self.messages.locale()
    }

    pub fn get(&self, key: &str) -> Option<String> {
        self.messages.get(&self.path(key)).map(str::to_string)
    }

    pub fn t(&self, key: &str) -> String {
        self.messages.t(&self.path(key))
    }

    pub fn t_with(&self, key: &str, args: &[(&str, &str)]) -> String {
        self.messages.t_with(&self.path(key), args)
    }

    pub fn raw<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        self.messages.raw(&self.path(key))
    }
}

/// Bundles for every locale the site ships.
#[derive(Clone, Debug, Default)]
pub struct Catalog {
    bundles: BTreeMap<Locale, Messages>,
    fallback: Locale,
}

impl Catalog {
    pub fn new(fallback: Locale) -> Self {
        Self {
            bundles: BTreeMap::new(),
            fallback,
        }
    }

    pub fn insert_json(&mut self, locale: Locale, json: &str) -> Result<(), MessagesError> {
        let messages = Messages::from_json(locale, json)?;
        self.bundles.insert(locale, messages);
        Ok(())
    }

    pub fn locales(&self) -> impl Iterator<Item = Locale> + '_ {
        self.bundles.keys().copied()
    }

    /// Bundle for `locale` with the fallback bundle attached.
    pub fn messages(&self, locale: Locale) -> Result<Messages, MessagesError> {
        let primary = self
            .bundles
            .get(&locale)
            .cloned()
            .ok_or(MessagesError::Missing(locale))?;
        Ok(match self.bundles.get(&self.fallback) {
            Some(fallback) => primary.with_fallback(fallback),
            None => primary,
        })
    }
}

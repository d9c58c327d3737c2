//! Light/dark display mode.
//!
//! The mode is page-wide state with a single writer (the toggle handler) and
//! many readers (every themed view). It is a presentation switch only; no
//! access control or business decision may depend on it.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;
use std::str::FromStr;

use crate::{Palette, ParseModeError, Signal, StorageError, SubId, local, signal, with_local};

/// Storage key holding the persisted mode.
pub const THEME_STORAGE_KEY: &str = "theme";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Hash)]
pub enum ThemeMode {
    #[default]
    Light,
    Dark,
}

impl ThemeMode {
    pub fn as_str(self) -> &'static str {
        match self {
            ThemeMode::Light => "light",
            ThemeMode::Dark => "dark",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            ThemeMode::Light => ThemeMode::Dark,
            ThemeMode::Dark => ThemeMode::Light,
        }
    }

    pub fn is_dark(self) -> bool {
        self == ThemeMode::Dark
    }

    pub fn palette(self) -> Palette {
        match self {
            ThemeMode::Light => Palette::light(),
            ThemeMode::Dark => Palette::dark(),
        }
    }
}

impl fmt::Display for ThemeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ThemeMode {
    type Err = ParseModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "light" => Ok(ThemeMode::Light),
            "dark" => Ok(ThemeMode::Dark),
            other => Err(ParseModeError(other.to_string())),
        }
    }
}

/// Durable string key-value store (browser local storage, a file).
pub trait PreferenceStore {
    fn load(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn store(&self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// Host signal: does the environment prefer a dark color scheme.
pub trait ColorSchemeQuery {
    fn prefers_dark(&self) -> bool;
}

/// One-way write of the mode flag to the document root.
pub trait StylingRoot {
    fn apply_mode(&self, mode: ThemeMode);
}

/// Session-only store.
#[derive(Default)]
pub struct MemoryStore {
    values: RefCell<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_value(key: &str, value: &str) -> Self {
        let store = Self::new();
        store
            .values
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        store
    }

    pub fn get(&self, key: &str) -> Option<String> {
        self.values.borrow().get(key).cloned()
    }
}

impl PreferenceStore for MemoryStore {
    fn load(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.get(key))
    }

    fn store(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.values
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[derive(Clone, Copy, Debug)]
pub struct FixedColorScheme(pub bool);

impl ColorSchemeQuery for FixedColorScheme {
    fn prefers_dark(&self) -> bool {
        self.0
    }
}

/// Styling root that just remembers the last applied mode; the headless
/// runner reads it back when writing the `<html>` element.
#[derive(Default)]
pub struct RootFlag {
    mode: Cell<Option<ThemeMode>>,
    writes: Cell<u32>,
}

impl RootFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Option<ThemeMode> {
        self.mode.get()
    }

    pub fn writes(&self) -> u32 {
        self.writes.get()
    }
}

impl StylingRoot for RootFlag {
    fn apply_mode(&self, mode: ThemeMode) {
        self.mode.set(Some(mode));
        self.writes.set(self.writes.get() + 1);
    }
}

/// Shared handle to the page's display mode.
///
/// Created once per page load by `initialize`; afterwards only `toggle`
/// (and `select`, which toggles when needed) change it.
#[derive(Clone)]
pub struct ThemePreference {
    mode: Signal<ThemeMode>,
    generation: Rc<Cell<u64>>,
    store: Rc<dyn PreferenceStore>,
    root: Rc<dyn StylingRoot>,
}

impl ThemePreference {
    /// Resolves the initial mode and applies it to `root`.
    ///
    /// A readable stored value wins; otherwise the system signal decides.
    pub fn initialize(
        store: Rc<dyn PreferenceStore>,
        system: &dyn ColorSchemeQuery,
        root: Rc<dyn StylingRoot>,
    ) -> Self {
        let stored = read_stored(store.as_ref());
        let mode = match stored {
            Some(mode) => {
                log::debug!("theme: using stored preference '{mode}'");
                mode
            }
            None => {
                let mode = resolve(None, system.prefers_dark());
                log::debug!("theme: no stored preference, system signal gives '{mode}'");
                mode
            }
        };
        root.apply_mode(mode);
        Self {
            mode: signal(mode),
            generation: Rc::new(Cell::new(0)),
            store,
            root,
        }
    }

    pub fn mode(&self) -> ThemeMode {
        self.mode.get()
    }

    pub fn signal(&self) -> Signal<ThemeMode> {
        self.mode.clone()
    }

    /// Number of toggles since initialization.
    pub fn generation(&self) -> u64 {
        self.generation.get()
    }

    /// Flips the mode, applies it to the root and persists it. A failed
    /// write only costs persistence across reloads.
    pub fn toggle(&self) -> ThemeMode {
        let next = self.mode.get().toggled();
        self.root.apply_mode(next);
        if let Err(e) = self.store.store(THEME_STORAGE_KEY, next.as_str()) {
            log::warn!("theme: {e}; '{next}' will only last this session");
        }
        self.generation.set(self.generation.get() + 1);
        self.mode.set(next);
        next
    }

    /// Switches to `target` if it is not already active. Returns whether a
    /// toggle happened.
    pub fn select(&self, target: ThemeMode) -> bool {
        if self.mode.get() == target {
            return false;
        }
        self.toggle();
        true
    }

    pub fn subscribe(&self, f: impl Fn(&ThemeMode) + 'static) -> SubId {
        self.mode.subscribe(f)
    }

    /// Provides this preference, its mode and palette to everything composed
    /// inside `f`.
    pub fn provide<R>(&self, f: impl FnOnce() -> R) -> R {
        let mode = self.mode();
        with_local(self.clone(), || {
            with_local(mode, || crate::with_palette(mode.palette(), f))
        })
    }
}

/// Pure resolution rule: stored value first, then the system signal.
pub fn resolve(stored: Option<ThemeMode>, prefers_dark: bool) -> ThemeMode {
    stored.unwrap_or(if prefers_dark {
        ThemeMode::Dark
    } else {
        ThemeMode::Light
    })
}

fn read_stored(store: &dyn PreferenceStore) -> Option<ThemeMode> {
    match store.load(THEME_STORAGE_KEY) {
        Ok(Some(raw)) => match raw.parse() {
            Ok(mode) => Some(mode),
            Err(e) => {
                log::warn!("theme: ignoring stored value: {e}");
                None
            }
        },
        Ok(None) => None,
        Err(e) => {
            log::warn!("theme: {e}; treating preference as absent");
            None
        }
    }
}

/// The preference provided by an enclosing `ThemePreference::provide`.
pub fn theme_preference() -> Option<ThemePreference> {
    local::<ThemePreference>()
}

/// Mode of the enclosing provider, light when none.
pub fn theme_mode() -> ThemeMode {
    local::<ThemeMode>().unwrap_or_default()
}

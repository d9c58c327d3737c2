//! Localization for Vitrine pages.
//!
//! - `Locale`: the supported page locales and their text direction.
//! - `Messages`: a JSON bundle with dotted-path lookup, `{arg}`
//!   interpolation and typed extraction of structured values.
//! - `Catalog`: all bundles, with fallback to the default locale.
//!
//! Bundles reach views as composition locals:
//!
//! ```rust
//! use vitrine_i18n::*;
//!
//! let en = Messages::from_json(Locale::En, r#"{"Hero":{"name":"Yusif"}}"#).unwrap();
//! provide_locale(Locale::En, en, || {
//!     assert_eq!(translations("Hero").t("name"), "Yusif");
//! });
//! ```

mod error;
mod locale;
mod messages;

pub use error::MessagesError;
pub use locale::Locale;
pub use messages::{Catalog, Messages, Translator, interpolate};

use vitrine_core::{local, with_local, with_text_direction};

/// Provides the locale, its text direction and its bundle to `f`.
pub fn provide_locale<R>(locale: Locale, messages: Messages, f: impl FnOnce() -> R) -> R {
    with_local(locale, || {
        with_text_direction(locale.direction(), || with_local(messages, f))
    })
}

/// Locale of the enclosing provider, the default locale when none.
pub fn current_locale() -> Locale {
    local::<Locale>().unwrap_or_default()
}

/// Bundle of the enclosing provider; an empty bundle when none.
pub fn messages() -> Messages {
    local::<Messages>().unwrap_or_else(|| Messages::empty(current_locale()))
}

/// Namespaced view of the current bundle.
pub fn translations(namespace: &str) -> Translator {
    messages().namespace(namespace)
}

#[cfg(test)]
mod tests {
    use super::*;
    use vitrine_core::{TextDirection, text_direction};

    #[test]
    fn provide_sets_direction_and_bundle() {
        let ar = Messages::from_json(Locale::Ar, r#"{"Hero":{"name":"يوسف"}}"#).unwrap();
        provide_locale(Locale::Ar, ar, || {
            assert_eq!(current_locale(), Locale::Ar);
            assert_eq!(text_direction(), TextDirection::Rtl);
            assert_eq!(translations("Hero").t("name"), "يوسف");
        });
        assert_eq!(current_locale(), Locale::En);
        assert_eq!(text_direction(), TextDirection::Ltr);
    }

    #[test]
    fn no_provider_renders_key_paths() {
        assert_eq!(translations("Hero").t("name"), "Hero.name");
    }
}

use std::fmt;

use serde::{Deserialize, Serialize};
use vitrine_core::TextDirection;

/// Page locales. Serialized as their code, so saved back stacks read
/// `"en"` / `"ar"`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    En,
    Ar,
}

impl Locale {
    pub const ALL: [Locale; 2] = [Locale::En, Locale::Ar];

    /// BCP 47 language subtag, also the URL prefix.
    pub fn code(self) -> &'static str {
        match self {
            Locale::En => "en",
            Locale::Ar => "ar",
        }
    }

    pub fn direction(self) -> TextDirection {
        match self {
            Locale::Ar => TextDirection::Rtl,
            Locale::En => TextDirection::Ltr,
        }
    }

    /// Name shown in the language selector.
    pub fn native_name(self) -> &'static str {
        match self {
            Locale::En => "English",
            Locale::Ar => "العربية",
        }
    }

    /// Parses a locale tag such as `ar`, `ar-EG` or `en_US.UTF-8`.
    ///
    /// Only the language subtag is considered; unsupported languages give
    /// `None`.
    pub fn parse(tag: &str) -> Option<Locale> {
        let tag = tag.trim();
        let tag = tag.split('.').next().unwrap_or(tag);
        let tag = tag.split('@').next().unwrap_or(tag);
        let lang = tag
            .split(['-', '_'])
            .next()
            .unwrap_or("")
            .to_ascii_lowercase();
        Self::ALL.into_iter().find(|l| l.code() == lang)
    }

    /// Like `parse`, falling back to the default locale.
    pub fn normalize(tag: &str) -> Locale {
        Self::parse(tag).unwrap_or_else(|| {
            if !tag.is_empty() {
                log::debug!("unsupported locale '{tag}', using '{}'", Locale::default());
            }
            Locale::default()
        })
    }

    /// Splits a path like `/ar/blog` into its locale and the rest (`/blog`).
    ///
    /// Returns `None` when the first segment is not a supported locale.
    pub fn split_path(path: &str) -> Option<(Locale, &str)> {
        let trimmed = path.strip_prefix('/').unwrap_or(path);
        let (first, rest) = match trimmed.find('/') {
            Some(i) => (&trimmed[..i], &trimmed[i..]),
            None => (trimmed, ""),
        };
        let locale = Self::ALL.into_iter().find(|l| l.code() == first)?;
        Some((locale, rest))
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

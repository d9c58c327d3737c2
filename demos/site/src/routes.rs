//! Typed routes. Every page lives under a locale prefix: `/en/blog`,
//! `/ar/blog/{slug}`.

use serde::{Deserialize, Serialize};
use vitrine_i18n::Locale;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Route {
    Home,
    Projects,
    Blog,
    BlogPost(String),
    Services,
    Contact,
    NotFound,
}

impl Route {
    /// Parses the part of a path after the locale prefix.
    pub fn parse(rest: &str) -> Route {
        let segments: Vec<&str> = rest.split('/').filter(|s| !s.is_empty()).collect();
        match segments.as_slice() {
            [] => Route::Home,
            ["projects"] => Route::Projects,
            ["blog"] => Route::Blog,
            ["blog", slug] => Route::BlogPost((*slug).to_string()),
            ["services"] => Route::Services,
            ["contact"] => Route::Contact,
            _ => Route::NotFound,
        }
    }

    /// Path below the locale prefix; empty for the home page.
    pub fn path(&self) -> String {
        match self {
            Route::Home => String::new(),
            Route::Projects => "/projects".into(),
            Route::Blog => "/blog".into(),
            Route::BlogPost(slug) => format!("/blog/{slug}"),
            Route::Services => "/services".into(),
            Route::Contact => "/contact".into(),
            Route::NotFound => "/404".into(),
        }
    }

    /// Key of the page under `Pages` in the message bundles.
    pub fn message_key(&self) -> &'static str {
        match self {
            Route::Home => "home",
            Route::Projects => "projects",
            Route::Blog | Route::BlogPost(_) => "blog",
            Route::Services => "services",
            Route::Contact => "contact",
            Route::NotFound => "notFound",
        }
    }
}

/// A route in a locale; the navigation key of the site.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page {
    pub locale: Locale,
    pub route: Route,
}

impl Page {
    pub fn new(locale: Locale, route: Route) -> Self {
        Self { locale, route }
    }

    pub fn home(locale: Locale) -> Self {
        Self::new(locale, Route::Home)
    }

    /// In-app page for a link target. Hrefs without a locale prefix (files,
    /// other sites) are not pages.
    pub fn from_href(href: &str) -> Option<Page> {
        if !href.starts_with('/') {
            return None;
        }
        let path = href.split(['?', '#']).next().unwrap_or(href);
        let (locale, rest) = Locale::split_path(path)?;
        Some(Page::new(locale, Route::parse(rest)))
    }

    /// Page for the location the site was loaded at. Paths without a known
    /// locale prefix are read in the default locale.
    pub fn resolve(path: &str) -> Page {
        if let Some(page) = Self::from_href(path) {
            return page;
        }
        let trimmed = path.trim_start_matches('/');
        let (first, rest) = trimmed.split_once('/').unwrap_or((trimmed, ""));
        // Regional tags such as `/en-US/blog` keep their language.
        let page = match Locale::parse(first) {
            Some(locale) => Page::new(locale, Route::parse(rest)),
            None => Page::new(Locale::default(), Route::parse(path)),
        };
        log::debug!("'{path}' has no locale prefix; showing {:?} in '{}'", page.route, page.locale);
        page
    }

    pub fn href(&self) -> String {
        format!("/{}{}", self.locale.code(), self.route.path())
    }

    /// Where the static export writes this page, relative to the output
    /// directory.
    pub fn file_path(&self) -> String {
        match &self.route {
            Route::NotFound => format!("{}/404.html", self.locale.code()),
            _ => format!("{}/index.html", self.href().trim_start_matches('/')),
        }
    }
}

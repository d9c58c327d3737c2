#![allow(non_snake_case)]
//! Site header: brand, navigation, language selector and theme switcher,
//! collapsing into a drawer on small screens.

use vitrine_core::*;
use vitrine_i18n::{Locale, translations};
use vitrine_navigation::{NavLink, follow, is_active};
use vitrine_ui::*;

use crate::routes::{Page, Route};

/// Header entries, in display order, with their `Navigation` message keys.
pub const NAV_ITEMS: [(&str, Route); 5] = [
    ("home", Route::Home),
    ("projects", Route::Projects),
    ("blog", Route::Blog),
    ("services", Route::Services),
    ("contact", Route::Contact),
];

const MENU: &str = "site-menu";

fn nav_links(page: &Page, drawer: Option<&DrawerState>) -> Vec<View> {
    let t = translations("Navigation");
    let pathname = page.href();
    let code = page.locale.code();
    NAV_ITEMS
        .iter()
        .map(|(key, route)| {
            let href = Page::new(page.locale, route.clone()).href();
            let active = is_active(&pathname, &href, code);
            let link = NavLink(
                &href,
                t.t(key),
                active,
                Modifier::new().class("px-3 py-2 rounded-lg text-sm font-medium"),
            );
            match drawer {
                // Choosing a page from the drawer also closes it.
                Some(d) => {
                    let d = d.clone();
                    link.on_click(move || d.close())
                }
                None => link,
            }
        })
        .collect()
}

/// Locale picker; choosing a language opens that locale's home page.
pub fn LanguageSelector(current: Locale) -> View {
    let t = translations("HomePage");
    let options = Locale::ALL
        .iter()
        .map(|l| (l.code().to_string(), l.native_name().to_string()))
        .collect();
    Row(Modifier::new().class("language-selector items-center gap-2")).child((
        Text(t.t("description")).modifier(Modifier::new().class("sr-only")),
        Select(
            current.code(),
            options,
            Modifier::new()
                .class("rounded-lg border px-2 py-1 text-sm bg-transparent")
                .aria_label(t.t("selectLanguage")),
            |code| {
                let href = format!("/{code}");
                if !follow(&href) {
                    log::warn!("language '{code}' has no page at {href}");
                }
            },
        ),
    ))
}

pub fn Header(page: &Page) -> View {
    let t = translations("Navigation");
    let drawer = DrawerState::remembered(MENU);
    let brand = Link(
        Page::home(page.locale).href(),
        Modifier::new().class("font-serif text-xl font-bold"),
    )
    .child(Text(t.t("brand")));

    Container(
        Tag::Header,
        Modifier::new().class(
            "sticky top-0 z-50 backdrop-blur-md bg-white/70 dark:bg-slate-900/70 border-b \
             border-slate-200/50 dark:border-slate-700/50",
        ),
    )
    .child((
        Row(Modifier::new().class("container mx-auto px-4 h-16 items-center justify-between")).child((
            brand,
            Container(
                Tag::Nav,
                Modifier::new()
                    .class("hidden md:flex gap-1")
                    .aria_label(t.t("label")),
            )
            .with_children(nav_links(page, None)),
            Row(Modifier::new().class("hidden md:flex items-center gap-3")).child((
                LanguageSelector(page.locale),
                ThemeSwitcher(ThemeSwitcherVariant::Desktop),
            )),
            MenuButton(&drawer, t.t("toggleMenu"), Modifier::new().class("md:hidden p-2")),
        )),
        Drawer(
            &drawer,
            t.t("label"),
            Modifier::new().class("md:hidden border-t px-4 py-4"),
            vec![
                Container(Tag::Nav, Modifier::new().class("flex flex-col gap-1"))
                    .with_children(nav_links(page, Some(&drawer))),
                Row(Modifier::new().class("items-center justify-between pt-4")).child((
                    LanguageSelector(page.locale),
                    ThemeSwitcher(ThemeSwitcherVariant::Mobile),
                )),
            ],
        ),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use vitrine_i18n::{Messages, provide_locale};

    const EN: &str = r#"{"Navigation": {
        "brand": "Yusif Ayman", "label": "Main", "toggleMenu": "Toggle menu",
        "home": "Home", "projects": "Projects", "blog": "Blog",
        "services": "Services", "contact": "Contact"
    }}"#;

    fn links(page: &Page) -> Vec<View> {
        let m = Messages::from_json(Locale::En, EN).unwrap();
        provide_locale(Locale::En, m, || nav_links(page, None))
    }

    #[test]
    fn only_the_current_section_is_active() {
        let post = Page::new(Locale::En, Route::BlogPost("x".into()));
        let active: Vec<String> = links(&post)
            .iter()
            .filter(|v| v.modifier.has_class("is-active"))
            .map(View::text_content)
            .collect();
        assert_eq!(active, ["Blog"]);

        let home = Page::home(Locale::En);
        let active: Vec<String> = links(&home)
            .iter()
            .filter(|v| v.modifier.has_class("is-active"))
            .map(View::text_content)
            .collect();
        assert_eq!(active, ["Home"]);
    }

    #[test]
    fn links_carry_the_locale_prefix() {
        let hrefs: Vec<String> = links(&Page::home(Locale::Ar))
            .iter()
            .filter_map(|v| match &v.kind {
                ViewKind::Link { href, .. } => Some(href.clone()),
                _ => None,
            })
            .collect();
        assert_eq!(hrefs, ["/ar", "/ar/projects", "/ar/blog", "/ar/services", "/ar/contact"]);
    }
}

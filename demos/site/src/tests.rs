use std::rc::Rc;

use vitrine_core::*;
use vitrine_i18n::{Catalog, Locale};
use vitrine_platform::{Headless, HeadlessOptions};

use crate::content::Testimonial;
use crate::sections::ROTATION;
use crate::*;

const NAMESPACES: [&str; 12] = [
    "Navigation",
    "HomePage",
    "Hero",
    "Skills",
    "Testimonials",
    "Experience",
    "Education",
    "Blog",
    "BlogPosts",
    "Pages",
    "NotFound",
    "Theme",
];

fn options() -> HeadlessOptions {
    HeadlessOptions {
        prefers_dark: Some(false),
        stylesheet: None,
        ..HeadlessOptions::default()
    }
}

fn open_with(page: Page, catalog: Catalog) -> Headless {
    let mut h = Headless::new(options(), app(page, Rc::new(catalog)));
    h.settle();
    h
}

fn open(page: Page) -> Headless {
    open_with(page, catalog().unwrap())
}

fn has_heading(h: &Headless, text: &str) -> bool {
    h.frame().find(Role::Heading, text).is_some()
}

fn showing_review(h: &Headless, name: &str) -> bool {
    h.frame().find(Role::Article, name).is_some()
}

#[test]
fn bundles_have_the_same_keys() {
    fn paths(v: &serde_json::Value, prefix: &str, out: &mut Vec<String>) {
        if let serde_json::Value::Object(map) = v {
            for (k, child) in map {
                let p = format!("{prefix}.{k}");
                paths(child, &p, out);
                out.push(p);
            }
        }
    }
    let en: serde_json::Value = serde_json::from_str(include_str!("../messages/en.json")).unwrap();
    let ar: serde_json::Value = serde_json::from_str(include_str!("../messages/ar.json")).unwrap();
    let (mut en_paths, mut ar_paths) = (Vec::new(), Vec::new());
    paths(&en, "", &mut en_paths);
    paths(&ar, "", &mut ar_paths);
    en_paths.sort();
    ar_paths.sort();
    assert_eq!(en_paths, ar_paths);

    let catalog = catalog().unwrap();
    for locale in Locale::ALL {
        let m = catalog.messages(locale).unwrap();
        for ns in NAMESPACES {
            assert!(m.lookup(ns).is_some(), "{locale} lacks {ns}");
        }
        let reviews: Vec<Testimonial> = m.raw("Testimonials.reviews").unwrap();
        assert_eq!(reviews.len(), 3);
    }
}

#[test]
fn english_home_is_ltr() {
    let h = open(Page::home(Locale::En));
    let html = h.html();
    assert!(html.contains("<html lang=\"en\" dir=\"ltr\" class=\"light\">"));
    assert!(html.contains("<title>Yusif Ayman | Front-end Developer</title>"));
    assert!(has_heading(&h, "Yusif Ayman"));
    assert!(has_heading(&h, "Skills"));
    assert!(has_heading(&h, "Experience"));
    assert!(has_heading(&h, "Education"));
}

#[test]
fn arabic_home_is_rtl() {
    let h = open(Page::home(Locale::Ar));
    assert!(h.html().contains("<html lang=\"ar\" dir=\"rtl\" class=\"light\">"));
    assert!(has_heading(&h, "يوسف أيمن"));
}

#[test]
fn testimonials_rotate_every_four_seconds() {
    let mut h = open(Page::home(Locale::En));
    assert!(showing_review(&h, "Sara Mahmoud"));
    assert!(!showing_review(&h, "Omar Khaled"));

    assert_eq!(h.advance(ROTATION), 1);
    assert!(showing_review(&h, "Omar Khaled"));
    assert!(!showing_review(&h, "Sara Mahmoud"));

    h.advance(ROTATION * 2);
    assert!(showing_review(&h, "Sara Mahmoud"));
}

#[test]
fn header_links_navigate_and_escape_goes_back() {
    let mut h = open(Page::home(Locale::En));
    assert_eq!(h.timers().active_count(), 1);

    h.click(Role::Link, "Blog").unwrap();
    assert!(has_heading(&h, "Blog"));
    assert_eq!(document().title, "Blog | Yusif Ayman");
    // The covered home page no longer rotates.
    assert_eq!(h.timers().active_count(), 0);

    assert!(h.key(KeyEvent::new(Key::Escape)));
    assert!(has_heading(&h, "Yusif Ayman"));
    assert_eq!(h.timers().active_count(), 1);
}

#[test]
fn shutdown_stops_the_testimonials_timer() {
    let mut h = open(Page::home(Locale::En));
    assert_eq!(h.timers().active_count(), 1);
    h.shutdown();
    assert_eq!(h.timers().active_count(), 0);
}

#[test]
fn documents_render_one_after_another() {
    let catalog = Rc::new(catalog().unwrap());
    let home = Page::home(Locale::En);
    let first = render_document(&home, catalog.clone(), options());
    let second = render_document(&home, catalog.clone(), options());
    assert_eq!(first, second);

    let arabic = render_document(&Page::home(Locale::Ar), catalog, options());
    assert!(arabic.contains("<html lang=\"ar\" dir=\"rtl\""));
}

#[test]
fn language_selector_switches_locale() {
    let mut h = open(Page::home(Locale::En));
    h.choose("Select language", "ar").unwrap();
    h.settle();
    assert_eq!(document().lang, "ar");
    assert_eq!(document().dir, TextDirection::Rtl);
    assert!(has_heading(&h, "يوسف أيمن"));
}

#[test]
fn only_locale_prefixed_links_stay_in_the_app() {
    let mut h = open(Page::home(Locale::En));
    assert!(!h.navigate("/cv.pdf"));
    assert!(h.navigate("/ar/blog"));
    assert_eq!(document().dir, TextDirection::Rtl);
    assert_eq!(document().lang, "ar");
}

#[test]
fn drawer_link_closes_menu_and_navigates() {
    let mut h = open(Page::home(Locale::En));
    h.click(Role::Button, "Toggle menu").unwrap();
    assert!(h.frame().find(Role::Dialog, "Main navigation").is_some());
    assert_eq!(h.focused_label().as_deref(), Some("Home"));

    assert!(h.key(KeyEvent::new(Key::Tab)));
    assert_eq!(h.focused_label().as_deref(), Some("Projects"));
    assert!(h.key(KeyEvent::new(Key::Enter)));

    assert!(h.frame().find(Role::Dialog, "Main navigation").is_none());
    assert!(has_heading(&h, "Projects"));
    assert_eq!(h.focused_label().as_deref(), Some("Toggle menu"));
}

#[test]
fn theme_switch_flags_the_document() {
    let mut h = open(Page::home(Locale::En));
    h.click(Role::Button, "Switch to dark mode").unwrap();
    assert_eq!(h.theme().mode(), ThemeMode::Dark);
    assert!(h.html().contains("class=\"dark\""));
}

#[test]
fn blog_post_shows_meta_and_share_link() {
    let mut h = open(Page::new(Locale::En, Route::BlogPost("how-computers-store-data".into())));
    assert!(has_heading(&h, "How Computers Store Everything in Ones and Zeros"));
    assert!(has_heading(&h, "Binary in RAM"));
    let markup = h.frame().scene.markup.clone();
    assert!(markup.contains("Published on March 15, 2024"));
    assert!(markup.contains("8 min read"));

    h.click(Role::Button, "Share article").unwrap();
    assert!(h.frame().scene.markup.contains("Link to share: /en/blog/how-computers-store-data"));

    h.click(Role::Link, "← Back to blog").unwrap();
    assert!(has_heading(&h, "Blog"));
}

#[test]
fn unknown_post_is_not_found() {
    let h = open(Page::new(Locale::En, Route::BlogPost("no-such-post".into())));
    assert!(has_heading(&h, "Page not found"));
    assert_eq!(document().title, "Page not found | Yusif Ayman");
}

#[test]
fn cv_download_leaves_the_app() {
    let mut h = open(Page::home(Locale::En));
    h.click(Role::Link, "Download CV").unwrap();
    assert_eq!(h.external_links(), ["/cv.pdf".to_string()]);
    assert!(has_heading(&h, "Yusif Ayman"));
}

#[test]
fn malformed_reviews_render_nothing_and_start_no_timer() {
    let mut bundle: serde_json::Value =
        serde_json::from_str(include_str!("../messages/en.json")).unwrap();
    bundle["Testimonials"]["reviews"] = serde_json::json!("not a list");
    let mut catalog = Catalog::new(Locale::En);
    catalog.insert_json(Locale::En, &bundle.to_string()).unwrap();

    let h = open_with(Page::home(Locale::En), catalog);
    assert_eq!(h.timers().active_count(), 0);
    assert!(!h.frame().scene.markup.contains("showcase-item"));
    assert!(has_heading(&h, "Experience"));
}

#[test]
fn every_exported_page_is_fully_translated() {
    let catalog = Rc::new(catalog().unwrap());
    let pages = export_pages();
    assert_eq!(pages.len(), Locale::ALL.len() * 7);

    for page in pages {
        let html = render_document(&page, catalog.clone(), options());
        let lang = format!("<html lang=\"{}\"", page.locale.code());
        assert!(html.contains(&lang), "{} has the wrong lang", page.href());
        for ns in NAMESPACES {
            assert!(
                !html.contains(&format!("{ns}.")),
                "{} shows a missing {ns} message",
                page.href()
            );
        }
    }
}

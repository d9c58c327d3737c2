//! Site root: the page stack, its locale and document metadata, the header.

use std::rc::Rc;

use vitrine_core::*;
use vitrine_i18n::{Catalog, Messages, provide_locale, translations};
use vitrine_navigation::{
    EntryScope, InstallBackHandler, InstallLinkHandler, NavDisplay, NavTransition, Navigator,
    remember_back_stack, renderer,
};
use vitrine_platform::{Headless, HeadlessOptions};
use vitrine_ui::*;

use crate::content;
use crate::header::Header;
use crate::pages;
use crate::routes::{Page, Route};

pub fn screen(page: &Page) -> View {
    match &page.route {
        Route::Home => pages::home::screen(),
        Route::Projects => pages::projects::screen(),
        Route::Blog => pages::blog::screen(),
        Route::BlogPost(slug) => pages::blog_post::screen(slug),
        Route::Services => pages::services::screen(),
        Route::Contact => pages::contact::screen(),
        Route::NotFound => pages::not_found::screen(),
    }
}

/// Document title of `page` in the current locale.
pub fn title(page: &Page) -> String {
    let t = translations("Pages");
    let name = match &page.route {
        Route::Home => return t.t("home.title"),
        Route::BlogPost(slug) => match content::post(slug) {
            Some(post) => translations("BlogPosts").t(&format!("{}.title", post.content_key)),
            None => t.t("notFound.title"),
        },
        route => t.t(&format!("{}.title", route.message_key())),
    };
    format!("{name} | {}", translations("Navigation").t("brand"))
}

fn Footer() -> View {
    Container(
        Tag::Footer,
        Modifier::new().class("border-t border-slate-200/50 dark:border-slate-700/50 py-8 text-center text-sm"),
    )
    .child(Paragraph(translations("Navigation").t("footer")))
}

/// The site, starting at `start`. Every page is composed inside its own
/// navigation entry, so leaving a page stops its timers.
pub fn app(start: Page, catalog: Rc<Catalog>) -> impl FnMut(&mut Scheduler) -> View + 'static {
    move |_s| {
        let stack = remember_back_stack(start.clone());
        let page = stack.top_key().unwrap_or_else(|| start.clone());
        let messages = catalog.messages(page.locale).unwrap_or_else(|e| {
            log::warn!("{e}");
            Messages::empty(page.locale)
        });

        provide_locale(page.locale, messages, || {
            set_document(DocumentMeta {
                lang: page.locale.code().to_string(),
                dir: page.locale.direction(),
                title: title(&page),
            });

            let nav = Navigator::new((*stack).clone());
            disposable_effect("site:links", (), move || InstallLinkHandler(nav, Page::from_href));
            let back = (*stack).clone();
            disposable_effect("site:back", (), move || InstallBackHandler(back));

            Column(Modifier::new().class("min-h-screen bg-background text-foreground")).child((
                Header(&page),
                Container(Tag::Main, Modifier::new().class("flex-1")).child(NavDisplay(
                    &stack,
                    renderer(|entry: &EntryScope<Page>| screen(entry.key())),
                    NavTransition::default(),
                )),
                Footer(),
            ))
        })
    }
}

/// `page` as a complete HTML document, entrance animations settled.
pub fn render_document(page: &Page, catalog: Rc<Catalog>, options: HeadlessOptions) -> String {
    let mut h = Headless::new(options, app(page.clone(), catalog));
    h.settle();
    let html = h.html();
    h.shutdown();
    html
}

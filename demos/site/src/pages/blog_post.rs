use vitrine_core::*;
use vitrine_i18n::{Translator, current_locale, translations};
use vitrine_ui::*;

use crate::content::{BlogPost, POST_SECTIONS, format_date, post};
use crate::ui::IconLabel;

fn Illustration(src: &str, alt: String) -> View {
    Box(Modifier::new().class("relative rounded-xl overflow-hidden shadow-lg mb-8 bg-gradient-to-br from-slate-100 to-slate-200 dark:from-slate-800 dark:to-slate-700"))
        .child(Image(src, alt, Modifier::new().class("object-contain p-4 h-64 md:h-80 w-full")))
}

fn ContentSection(posts: &Translator, post: &BlogPost, key: &str, illustration: Option<usize>) -> View {
    let base = format!("{}.content.{key}", post.content_key);
    let title = posts.t(&format!("{base}.title"));
    vitrine_ui::Section(Modifier::new().class("mb-12")).child((
        Heading(2, title.clone()).modifier(Modifier::new().class("text-2xl md:text-3xl font-bold mb-4")),
        Paragraph(posts.t(&format!("{base}.text"))).modifier(Modifier::new().class("text-lg leading-relaxed mb-6")),
        illustration
            .and_then(|i| post.illustrations.get(i))
            .map(|src| Illustration(src, title)),
    ))
}

/// Share footer. The button reveals the article's address for copying.
fn ShareFooter(post: &BlogPost) -> View {
    let t = translations("Blog");
    let shared = remember_with_key(format!("blog:{}:shared", post.slug), || signal(false));
    let href = format!("/{}/blog/{}", current_locale(), post.slug);

    let share = {
        let shared = (*shared).clone();
        Button(
            Modifier::new().class(
                "flex items-center gap-2 px-4 py-2 bg-gradient-to-r from-blue-900 to-slate-700 text-white rounded-lg",
            ),
            move || shared.set(true),
        )
        .child((Icon("share", Modifier::new().class("w-4 h-4")), Text(t.t("shareArticle"))))
        .semantics(Semantics::new(Role::Button).label(t.t("shareArticle")))
    };

    Container(Tag::Footer, Modifier::new().class("border-t border-gray-200 dark:border-slate-700 pt-8 mt-12"))
        .child((
            Row(Modifier::new().class("items-center justify-between")).child((
                Row(Modifier::new().class("items-center gap-4")).child((
                    Image(post.author.avatar, post.author.name, Modifier::new().class("rounded-full"))
                        .size(48, 48),
                    Column(Modifier::new()).child((
                        Paragraph(post.author.name).modifier(Modifier::new().class("font-medium")),
                        Paragraph(t.t("authorRole")).modifier(Modifier::new().class("text-sm")),
                    )),
                )),
                share,
            )),
            shared.get().then(|| {
                Paragraph(t.t_with("linkReady", &[("url", href.as_str())]))
                    .modifier(Modifier::new().class("mt-4 text-sm").attr("role", "status"))
            }),
        ))
        .enter(format!("post:{}:share", post.slug), Motion::fade_up(20.0, 800).delay_ms(600))
}

/// A post; unknown slugs get the not-found page.
pub fn screen(slug: &str) -> View {
    let Some(post) = post(slug) else {
        log::info!("no blog post '{slug}'");
        return super::not_found::screen();
    };
    let t = translations("Blog");
    let posts = translations("BlogPosts");
    let title = posts.t(&format!("{}.title", post.content_key));
    let date = format_date(post.date).unwrap_or_else(|| post.date.to_string());
    let minutes = post.read_time.to_string();
    let back_offset = if text_direction().is_rtl() { 20.0 } else { -20.0 };

    Container(Tag::Article, Modifier::new().class("container mx-auto px-4 py-16 md:py-24")).child((
        Box(Modifier::new().class("mb-8"))
            .child(
                Link(
                    format!("/{}/blog", current_locale()),
                    Modifier::new().class("inline-flex items-center gap-2 text-blue-900 dark:text-blue-400"),
                )
                .child(Text(t.t("backToBlog"))),
            )
            .enter(format!("post:{slug}:back"), Motion::fade_slide(back_offset, 500)),
        Container(Tag::Header, Modifier::new().class("mb-12"))
            .child((
                Row(Modifier::new().class("flex-wrap gap-2 mb-4")).with_children(
                    post.tags
                        .iter()
                        .map(|tag| {
                            Text(*tag).modifier(Modifier::new().class(
                                "px-3 py-1 text-sm font-medium rounded-lg border border-gray-200 dark:border-slate-600",
                            ))
                        })
                        .collect(),
                ),
                Heading(1, title.clone()).modifier(Modifier::new().class("text-3xl md:text-5xl font-bold mb-6 leading-tight")),
                Row(Modifier::new().class("flex-wrap items-center gap-6 mb-6")).child((
                    IconLabel("user", t.t_with("byAuthor", &[("author", post.author.name)])),
                    IconLabel("calendar", t.t_with("publishedOn", &[("date", date.as_str())])),
                    IconLabel("clock", t.t_with("readTime", &[("minutes", minutes.as_str())])),
                )),
                Paragraph(posts.t(&format!("{}.description", post.content_key)))
                    .modifier(Modifier::new().class("text-xl leading-relaxed")),
            ))
            .enter(format!("post:{slug}:header"), Motion::fade_up(30.0, 800)),
        Box(Modifier::new().class("relative mb-12 rounded-2xl overflow-hidden shadow-2xl"))
            .child(Image(post.cover_image, title, Modifier::new().class("object-cover h-64 md:h-96 w-full")))
            .enter(format!("post:{slug}:cover"), Motion::fade_up(30.0, 800).delay_ms(200)),
        Box(Modifier::new().class("prose prose-lg dark:prose-invert max-w-4xl mx-auto"))
            .child((
                Paragraph(posts.t(&format!("{}.content.intro", post.content_key)))
                    .modifier(Modifier::new().class("text-lg leading-relaxed mb-8")),
                POST_SECTIONS
                    .iter()
                    .map(|(key, illustration)| ContentSection(&posts, post, key, *illustration))
                    .collect::<Vec<_>>(),
            ))
            .enter(format!("post:{slug}:content"), Motion::fade_up(30.0, 800).delay_ms(400)),
        ShareFooter(post),
    ))
}

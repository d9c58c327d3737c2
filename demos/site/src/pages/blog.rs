use vitrine_core::*;
use vitrine_i18n::{current_locale, translations};
use vitrine_ui::*;

use crate::content::{BlogPost, POSTS, format_date};
use crate::ui::{ArticleCard, IconLabel};

fn PostCard(index: usize, post: &BlogPost) -> View {
    let t = translations("Blog");
    let posts = translations("BlogPosts");
    let title = posts.t(&format!("{}.title", post.content_key));
    let href = format!("/{}/blog/{}", current_locale(), post.slug);
    let date = format_date(post.date).unwrap_or_else(|| post.date.to_string());
    let minutes = post.read_time.to_string();

    ArticleCard(Modifier::new().class("flex flex-col gap-4"))
        .child((
            Image(post.cover_image, title.clone(), Modifier::new().class("rounded-xl object-cover h-48 w-full")),
            Row(Modifier::new().class("flex-wrap gap-4 text-sm text-slate-600 dark:text-slate-300")).child((
                IconLabel("calendar", date),
                IconLabel("clock", t.t_with("readTime", &[("minutes", minutes.as_str())])),
            )),
            Heading(2, title).modifier(Modifier::new().class("text-2xl font-bold")),
            Paragraph(posts.t(&format!("{}.description", post.content_key))),
            Link(href, Modifier::new().class("font-medium text-blue-900 dark:text-blue-400"))
                .child(Text(t.t("readMore"))),
        ))
        .enter(
            format!("blog:{}", post.slug),
            Motion::fade_up(30.0, 800).delay_ms(index as u64 * 200),
        )
}

/// Index of all posts, newest first.
pub fn screen() -> View {
    let t = translations("Blog");
    let mut posts: Vec<&BlogPost> = POSTS.iter().collect();
    posts.sort_by(|a, b| b.date.cmp(a.date));

    Column(Modifier::new().class("container mx-auto px-4 py-16 md:py-24 gap-12")).child((
        Column(Modifier::new().class("text-center gap-4"))
            .child((
                Heading(1, t.t("title")).modifier(Modifier::new().class("font-serif text-4xl font-bold")),
                Paragraph(t.t("description")).modifier(Modifier::new().class("text-lg")),
            ))
            .enter("blog:header", Motion::fade_up(30.0, 800)),
        Box(Modifier::new().class("grid md:grid-cols-2 gap-8")).with_children(
            posts.iter().enumerate().map(|(i, p)| PostCard(i, p)).collect(),
        ),
    ))
}

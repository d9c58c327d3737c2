#![allow(non_snake_case)]

use vitrine_core::*;
use vitrine_i18n::translations;
use vitrine_ui::*;

/// A titled page section: serif heading, accent rule, then `body`.
pub fn Section(key: &str, title: impl Into<String>, body: View) -> View {
    vitrine_ui::Section(Modifier::new().class("py-16 sm:py-20 relative overflow-hidden").id(key)).child(
        Box(Modifier::new().class("container mx-auto px-4 relative z-10")).child((
            Column(Modifier::new().class("text-center mb-16 items-center"))
                .child((
                    Heading(2, title).modifier(
                        Modifier::new().class("font-serif text-3xl sm:text-4xl font-bold mb-4"),
                    ),
                    Rule(),
                ))
                .enter(format!("{key}:title"), Motion::fade_up(30.0, 800)),
            body,
        )),
    )
}

/// Page heading and lead paragraph from `Pages.{key}`, followed by `body`.
pub fn PageIntro(key: &str, body: View) -> View {
    let t = translations(&format!("Pages.{key}"));
    Column(Modifier::new().class("container mx-auto px-4 py-16 md:py-24 gap-12")).child((
        Column(Modifier::new().class("text-center items-center gap-4"))
            .child((
                Heading(1, t.t("title")).modifier(Modifier::new().class("font-serif text-4xl font-bold")),
                Rule(),
                Paragraph(t.t("description")).modifier(Modifier::new().class("max-w-2xl text-lg")),
            ))
            .enter(format!("{key}:intro"), Motion::fade_up(30.0, 800)),
        body,
    ))
}

/// Short gradient bar under section titles.
pub fn Rule() -> View {
    Box(Modifier::new().class("w-24 h-1 bg-gradient-to-r from-slate-600 to-slate-800 mx-auto rounded-full"))
}

const CARD: &str = "bg-white/80 dark:bg-slate-800/80 backdrop-blur-sm border border-slate-200/50 \
                    dark:border-slate-700/50 rounded-2xl p-6 shadow-xl shadow-slate-900/10";

/// Frosted card used by every section.
pub fn Card(modifier: Modifier) -> View {
    Box(modifier.class(CARD))
}

/// `Card` as an `<article>`.
pub fn ArticleCard(modifier: Modifier) -> View {
    Container(Tag::Article, modifier.class(CARD))
}

/// Line of metadata joined with ` | `, empty parts skipped.
pub fn MetaLine(parts: &[&str]) -> View {
    let text = parts
        .iter()
        .map(|p| p.trim())
        .filter(|p| !p.is_empty())
        .collect::<Vec<_>>()
        .join(" | ");
    Paragraph(text).modifier(Modifier::new().class("text-sm text-slate-600 dark:text-slate-300"))
}

/// Icon followed by a label.
pub fn IconLabel(icon: &'static str, label: impl Into<String>) -> View {
    Row(Modifier::new().class("items-center gap-2")).child((
        Icon(icon, Modifier::new().class("w-5 h-5")),
        Text(label),
    ))
}

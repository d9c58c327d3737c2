use vitrine_core::*;
use vitrine_i18n::{current_locale, translations};
use vitrine_ui::*;

pub fn screen() -> View {
    let t = translations("NotFound");
    Column(Modifier::new().class("container mx-auto px-4 py-24 items-center text-center gap-6"))
        .child((
            Text("404").modifier(Modifier::new().class("font-serif text-7xl font-bold opacity-20")),
            Heading(1, t.t("title")).modifier(Modifier::new().class("text-3xl font-bold")),
            Paragraph(t.t("description")),
            Link(
                format!("/{}", current_locale()),
                Modifier::new().class("px-6 py-3 rounded-xl bg-gradient-to-r from-blue-900 to-slate-700 text-white"),
            )
            .child(Text(t.t("backHome"))),
        ))
        .enter("not-found", Motion::fade_up(20.0, 600))
}

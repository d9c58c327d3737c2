use vitrine_core::*;
use vitrine_i18n::{current_locale, translations};
use vitrine_ui::*;

pub fn Hero() -> View {
    let t = translations("Hero");
    let locale = current_locale();

    let cta = |href: String, key: &str, primary: bool| {
        let label = t.t(key);
        Link(
            href,
            Modifier::new()
                .class("px-6 py-3 rounded-xl font-medium transition-all duration-200")
                .class_if(primary, "bg-gradient-to-r from-blue-900 to-slate-700 text-white")
                .class_if(!primary, "border border-slate-300 dark:border-slate-600")
                .aria_label(label.clone()),
        )
        .child(Text(label))
    };

    vitrine_ui::Section(Modifier::new().class("hero py-16 sm:py-24").id("hero")).child(
        Column(Modifier::new().class("container mx-auto px-4 items-center text-center gap-6"))
            .child((
                Image("/yusif.jpg", t.t("imageAlt"), Modifier::new().class("rounded-full object-cover shadow-xl"))
                    .size(160, 160)
                    .enter("hero:avatar", Motion::fade_scale(0.8, 800).delay_ms(200)),
                Heading(1, t.t("name")).modifier(
                    Modifier::new().class("font-serif text-4xl sm:text-5xl font-bold"),
                ),
                Paragraph(t.t("summary")).modifier(
                    Modifier::new().class("max-w-2xl text-lg text-slate-600 dark:text-slate-300"),
                ),
                Row(Modifier::new().class("flex-wrap justify-center gap-4")).child((
                    cta(format!("/{locale}/projects"), "viewProjects", true),
                    Download(
                        "/cv.pdf",
                        Modifier::new()
                            .class("px-6 py-3 rounded-xl font-medium border border-slate-300 dark:border-slate-600")
                            .aria_label(t.t("downloadCV")),
                    )
                    .child(Text(t.t("downloadCV"))),
                    cta(format!("/{locale}/contact"), "contact", false),
                )),
            ))
            .enter("hero", Motion::fade_up(20.0, 800)),
    )
}

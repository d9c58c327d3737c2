use serde::Deserialize;
use vitrine_core::*;
use vitrine_i18n::translations;
use vitrine_ui::*;

use crate::ui::{Card, PageIntro};

#[derive(Clone, Debug, Deserialize)]
struct Service {
    icon: String,
    title: String,
    description: String,
}

fn icon_name(name: &str) -> &'static str {
    match name {
        "code" => "code",
        "zap" => "zap",
        "workflow" => "workflow",
        _ => "sparkles",
    }
}

pub fn screen() -> View {
    let t = translations("Pages.services");
    let services: Vec<Service> = t.raw("items").unwrap_or_default();
    PageIntro(
        "services",
        Box(Modifier::new().class("grid md:grid-cols-3 gap-8")).with_children(
            services
                .iter()
                .enumerate()
                .map(|(i, s)| {
                    Card(Modifier::new().class("flex flex-col gap-4"))
                        .child((
                            Icon(icon_name(&s.icon), Modifier::new().class("w-8 h-8")),
                            Heading(2, s.title.clone()).modifier(Modifier::new().class("text-xl font-bold")),
                            Paragraph(s.description.clone()),
                        ))
                        .enter(
                            format!("services:{i}"),
                            Motion::fade_up(30.0, 800).delay_ms(i as u64 * 200),
                        )
                })
                .collect(),
        ),
    )
}

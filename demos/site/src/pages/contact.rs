use serde::Deserialize;
use vitrine_core::*;
use vitrine_i18n::translations;
use vitrine_ui::*;

use crate::ui::{Card, IconLabel, PageIntro};

#[derive(Clone, Debug, Deserialize)]
struct Channel {
    icon: String,
    label: String,
    href: String,
}

fn icon_name(name: &str) -> &'static str {
    match name {
        "mail" => "mail",
        "github" => "github",
        "linkedin" => "linkedin",
        _ => "link",
    }
}

pub fn screen() -> View {
    let t = translations("Pages.contact");
    let channels: Vec<Channel> = t.raw("channels").unwrap_or_default();
    PageIntro(
        "contact",
        Card(Modifier::new().class("max-w-xl mx-auto flex flex-col gap-4")).with_children(
            channels
                .iter()
                .map(|c| {
                    Link(c.href.clone(), Modifier::new().class("rounded-lg p-3 hover:bg-slate-100 dark:hover:bg-slate-700"))
                        .child(IconLabel(icon_name(&c.icon), c.label.clone()))
                })
                .collect(),
        ),
    )
}

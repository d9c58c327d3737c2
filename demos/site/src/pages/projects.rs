use serde::Deserialize;
use vitrine_core::*;
use vitrine_i18n::translations;
use vitrine_ui::*;

use crate::ui::{Card, PageIntro};

#[derive(Clone, Debug, Deserialize)]
struct Project {
    name: String,
    description: String,
    #[serde(default)]
    tags: Vec<String>,
    #[serde(default)]
    href: Option<String>,
}

fn ProjectCard(index: usize, project: &Project) -> View {
    let t = translations("Pages.projects");
    Card(Modifier::new().class("flex flex-col gap-4"))
        .child((
            Heading(2, project.name.clone()).modifier(Modifier::new().class("text-xl font-bold")),
            Paragraph(project.description.clone()),
            Row(Modifier::new().class("flex-wrap gap-2")).with_children(
                project
                    .tags
                    .iter()
                    .map(|tag| Text(tag.clone()).modifier(Modifier::new().class("px-2 py-1 text-xs rounded-full border")))
                    .collect(),
            ),
            project.href.as_ref().map(|href| {
                Link(href.clone(), Modifier::new().class("font-medium text-blue-900 dark:text-blue-400"))
                    .child(Text(t.t("viewSource")))
            }),
        ))
        .enter(
            format!("projects:{index}"),
            Motion::fade_up(30.0, 800).delay_ms(index as u64 * 200),
        )
}

pub fn screen() -> View {
    let t = translations("Pages.projects");
    let projects: Vec<Project> = t.raw("items").unwrap_or_default();
    PageIntro(
        "projects",
        Box(Modifier::new().class("grid md:grid-cols-2 gap-8")).with_children(
            projects.iter().enumerate().map(|(i, p)| ProjectCard(i, p)).collect(),
        ),
    )
}

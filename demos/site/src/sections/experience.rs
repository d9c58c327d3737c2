use vitrine_core::*;
use vitrine_i18n::translations;
use vitrine_ui::*;

use crate::content::{EXPERIENCE, Job};
use crate::ui::{ArticleCard, MetaLine, Section};

fn JobCard(index: usize, key: &str, job: &Job) -> View {
    let title_id = format!("{key}-title");
    ArticleCard(Modifier::new().attr("aria-labelledby", title_id.clone()))
        .child((
            Heading(3, job.title.clone()).modifier(
                Modifier::new().id(title_id).class("font-serif text-xl font-bold mb-1"),
            ),
            MetaLine(&[job.company.as_str(), job.duration.as_str(), job.location.as_str()]),
            List(
                Modifier::new().class("list-disc ps-5 mt-4 space-y-2"),
                job.details.iter().map(|d| Text(d.clone())),
            ),
        ))
        .enter(
            format!("experience:{key}"),
            Motion::fade_up(30.0, 800).delay_ms(index as u64 * 200),
        )
}

pub fn Experience() -> View {
    let t = translations("Experience");
    let jobs: Vec<View> = EXPERIENCE
        .iter()
        .enumerate()
        .filter_map(|(i, key)| {
            let job: Job = t.raw(key)?;
            Some(JobCard(i, key, &job))
        })
        .collect();
    Section(
        "experience",
        t.t("title"),
        Column(Modifier::new().class("max-w-3xl mx-auto gap-8")).with_children(jobs),
    )
}

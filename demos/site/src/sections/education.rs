use vitrine_core::*;
use vitrine_i18n::translations;
use vitrine_ui::*;

use crate::content::{EDUCATION, Study};
use crate::ui::{ArticleCard, MetaLine, Section};

fn StudyCard(index: usize, key: &str, study: &Study) -> View {
    let title_id = format!("education-{key}-title");
    ArticleCard(Modifier::new().attr("aria-labelledby", title_id.clone()))
        .child((
            Heading(3, study.degree.clone()).modifier(
                Modifier::new().id(title_id).class("font-serif text-xl font-bold mb-1"),
            ),
            MetaLine(&[study.institution.as_str(), study.duration.as_str()]),
            (!study.details.is_empty()).then(|| {
                Paragraph(study.details.clone())
                    .modifier(Modifier::new().class("mt-4 leading-relaxed"))
            }),
        ))
        .enter(
            format!("education:{key}"),
            Motion::fade_up(30.0, 800).delay_ms(index as u64 * 200),
        )
}

pub fn Education() -> View {
    let t = translations("Education");
    let studies: Vec<View> = EDUCATION
        .iter()
        .enumerate()
        .filter_map(|(i, key)| {
            let study: Study = t.raw(key)?;
            Some(StudyCard(i, key, &study))
        })
        .collect();
    Section(
        "education",
        t.t("title"),
        Column(Modifier::new().class("max-w-3xl mx-auto gap-8")).with_children(studies),
    )
}

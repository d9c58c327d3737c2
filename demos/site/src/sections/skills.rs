use vitrine_core::*;
use vitrine_i18n::translations;
use vitrine_ui::*;

use crate::content::{CategoryStyle, SKILL_CATEGORIES, Skill, SkillCategory, SkillLevel};
use crate::ui::{Card, Section};

fn SkillRow(category: usize, index: usize, skill: &Skill) -> View {
    let level = SkillLevel::from_label(&skill.level);
    Row(Modifier::new().class(
        "items-center justify-between p-3 bg-slate-50/50 dark:bg-slate-700/30 rounded-lg \
         border border-slate-200/30 dark:border-slate-600/30",
    ))
    .child((
        Text(skill.name.clone()).modifier(Modifier::new().class("text-sm font-medium")),
        Text(skill.level.clone()).modifier(
            Modifier::new()
                .class("px-2 py-1 text-xs font-medium rounded-full")
                .class(level.badge_class()),
        ),
    ))
    .enter(
        format!("skills:{category}:{index}"),
        Motion::fade_up(10.0, 600).delay_ms(category as u64 * 200 + index as u64 * 100),
    )
}

fn CategoryCard(index: usize, style: &CategoryStyle, data: &SkillCategory) -> View {
    Card(Modifier::new().class("h-full"))
        .child((
            Row(Modifier::new().class("items-center gap-4 mb-6")).child((
                Box(Modifier::new()
                    .class("flex-shrink-0 w-12 h-12 bg-gradient-to-r rounded-xl flex items-center justify-center shadow-lg")
                    .class(style.gradient))
                .child(Icon(style.icon, Modifier::new().class("w-6 h-6 text-white"))),
                Heading(3, data.title.clone())
                    .modifier(Modifier::new().class("font-serif text-xl font-bold")),
            )),
            Column(Modifier::new().class("gap-3")).with_children(
                data.skills
                    .iter()
                    .enumerate()
                    .map(|(i, s)| SkillRow(index, i, s))
                    .collect(),
            ),
        ))
        .enter(
            format!("skills:{}", style.key),
            Motion::fade_up(30.0, 800).delay_ms(index as u64 * 200),
        )
}

pub fn Skills() -> View {
    let t = translations("Skills");
    let cards: Vec<View> = SKILL_CATEGORIES
        .iter()
        .enumerate()
        .filter_map(|(i, style)| {
            let data: SkillCategory = t.raw(style.key)?;
            Some(CategoryCard(i, style, &data))
        })
        .collect();

    Section(
        "skills",
        t.t("title"),
        Box(Modifier::new().class("grid md:grid-cols-2 lg:grid-cols-3 gap-8")).with_children(cards),
    )
}

use vitrine_core::*;
use vitrine_i18n::translations;
use vitrine_ui::*;
use web_time::Duration;

use crate::content::Testimonial;
use crate::ui::Card;

/// Time each review stays on screen.
pub const ROTATION: Duration = Duration::from_millis(4000);

fn ReviewCard(review: &Testimonial) -> View {
    Card(Modifier::new().class("max-w-md mx-auto w-full p-4 sm:p-6"))
        .semantics(Semantics::new(Role::Article).label(review.name.clone()))
        .child((
            Container(Tag::Blockquote, Modifier::new()).child(
                Paragraph(format!("\"{}\"", review.opinion))
                    .modifier(Modifier::new().class("italic text-sm sm:text-base leading-6")),
            ),
            Row(Modifier::new().class("items-center gap-3 mt-4")).child((
                Image(review.avatar.clone(), review.name.clone(), Modifier::new().class("rounded-full object-cover"))
                    .size(40, 40),
                Column(Modifier::new()).child((
                    Text(review.name.clone()).modifier(Modifier::new().class("font-medium")),
                    Paragraph(review.role.clone()).modifier(Modifier::new().class("text-sm")),
                )),
            )),
        ))
}

pub fn Testimonials() -> View {
    let t = translations("Testimonials");
    // A malformed list reads as empty: nothing rendered, no timer.
    let reviews: Vec<Testimonial> = t.raw("reviews").unwrap_or_default();

    vitrine_ui::Section(Modifier::new().class("py-14 relative overflow-hidden").id("testimonials")).child((
        Column(Modifier::new().class("text-center gap-4 max-w-2xl mx-auto px-4")).child((
            Paragraph(t.t("title"))
                .modifier(Modifier::new().class("font-bold uppercase tracking-wider text-sm"))
                .enter("testimonials:title", Motion::fade_up(20.0, 600)),
            Paragraph(t.t("description"))
                .modifier(Modifier::new().class("text-base md:text-lg tracking-tight"))
                .enter("testimonials:description", Motion::fade_up(20.0, 600).delay_ms(400)),
        )),
        Box(Modifier::new().class("mt-12 max-w-3xl mx-auto px-4")).child(ErrorBoundary(
            "Testimonials",
            |_| Empty(),
            move || {
                Showcase(
                    "testimonials",
                    reviews,
                    ROTATION,
                    Modifier::new().class("relative min-h-[200px] sm:min-h-[250px]"),
                    ReviewCard,
                )
            },
        )),
    ))
}

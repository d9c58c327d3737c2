use vitrine_core::*;
use vitrine_ui::*;

use crate::sections::{Education, Experience, Hero, Skills, Testimonials};

pub fn screen() -> View {
    Column(Modifier::new()).child((
        Hero(),
        Box(Modifier::new().class("container mx-auto")).child((
            Skills(),
            Testimonials(),
            Experience(),
            Education(),
        )),
    ))
}

use std::cell::Cell;

use vitrine_core::*;
use vitrine_i18n::{Translator, translations};
use web_time::{Duration, Instant};

use crate::{Box, Button, Empty, Icon, Row, ViewExt};

/// How long the switcher pulses after a toggle.
const PULSE: Duration = Duration::from_millis(300);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ThemeSwitcherVariant {
    /// One button per mode; the active one is highlighted.
    Desktop,
    /// A single button showing the current mode.
    Mobile,
}

impl ThemeSwitcherVariant {
    fn name(self) -> &'static str {
        match self {
            ThemeSwitcherVariant::Desktop => "desktop",
            ThemeSwitcherVariant::Mobile => "mobile",
        }
    }
}

fn icon_for(mode: ThemeMode) -> &'static str {
    match mode {
        ThemeMode::Light => "sun",
        ThemeMode::Dark => "moon",
    }
}

/// True while the pulse that follows the latest toggle is running.
fn pulsing(variant: ThemeSwitcherVariant, generation: u64) -> bool {
    let seen = remember_with_key(format!("theme-switcher:{}:pulse", variant.name()), || {
        Cell::new((generation, None::<Instant>))
    });
    let (last, started) = seen.get();
    let started = if last != generation {
        let t = now();
        seen.set((generation, Some(t)));
        Some(t)
    } else {
        started
    };
    started.is_some_and(|t| now().saturating_duration_since(t) < PULSE)
}

/// Light/dark switch bound to the `ThemePreference` provided by the page.
pub fn ThemeSwitcher(variant: ThemeSwitcherVariant) -> View {
    let Some(pref) = theme_preference() else {
        log::debug!("ThemeSwitcher composed without a ThemePreference; rendering nothing");
        return Empty();
    };
    let t = translations("Theme");
    let mode = pref.mode();
    let pulse = pulsing(variant, pref.generation());

    match variant {
        ThemeSwitcherVariant::Desktop => Box(Modifier::new()
            .class("theme-switcher theme-switcher--desktop hidden sm:flex relative"))
        .child((
            Row(Modifier::new().class("theme-switcher__track items-center p-1 rounded-xl")).child((
                mode_button(&pref, &t, ThemeMode::Light, mode, pulse),
                mode_button(&pref, &t, ThemeMode::Dark, mode, pulse),
            )),
            Box(Modifier::new()
                .class("theme-switcher__dot absolute rounded-full")
                .class(format!("theme-switcher__dot--{mode}"))
                .class_if(pulse, "animate-bounce")),
        )),
        ThemeSwitcherVariant::Mobile => {
            let current_name = t.t(mode.as_str());
            let other_name = t.t(mode.toggled().as_str());
            let label = t.t_with("toggle", &[("mode", current_name.as_str())]);
            let title = t.t_with("switchTo", &[("mode", other_name.as_str())]);
            let pref = pref.clone();
            Box(Modifier::new().class("theme-switcher theme-switcher--mobile flex sm:hidden")).child(
                Button(
                    Modifier::new()
                        .class("theme-switcher__toggle relative rounded-xl")
                        .class(format!("theme-switcher__toggle--{mode}"))
                        .class_if(pulse, "animate-pulse")
                        .aria_label(label.clone())
                        .title(title),
                    move || {
                        pref.toggle();
                    },
                )
                .semantics(Semantics::new(Role::Button).label(label))
                .child((
                    Icon(icon_for(mode), Modifier::new().class("w-6 h-6")),
                    Box(Modifier::new()
                        .class("theme-switcher__glow absolute inset-0 rounded-xl")
                        .class_if(pulse, "animate-ping")),
                    Box(Modifier::new()
                        .class("theme-switcher__dot absolute rounded-full")
                        .class(format!("theme-switcher__dot--{mode}"))
                        .class_if(pulse, "animate-bounce")),
                )),
            )
        }
    }
}

fn mode_button(
    pref: &ThemePreference,
    t: &Translator,
    target: ThemeMode,
    current: ThemeMode,
    pulse: bool,
) -> View {
    let active = target == current;
    let label = t.t(&format!("{target}Label"));
    let title = t.t(&format!("{target}Title"));
    let pref = pref.clone();
    Button(
        Modifier::new()
            .class("theme-switcher__button relative flex items-center justify-center rounded-lg")
            .class_if(active, "is-active scale-105")
            .class_if(pulse, "animate-pulse")
            .aria_label(label.clone())
            .title(title)
            .attr("aria-pressed", if active { "true" } else { "false" }),
        move || {
            pref.select(target);
        },
    )
    .semantics(Semantics::new(Role::Button).label(label))
    .child((
        Icon(icon_for(target), Modifier::new().class("w-4 h-4")),
        active.then(|| Box(Modifier::new().class("theme-switcher__ping absolute inset-0 rounded-lg animate-ping"))),
    ))
}

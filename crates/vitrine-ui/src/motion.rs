//! Entrance motion.
//!
//! An entrance animates a view from an offset state (faded, shifted, scaled)
//! to its resting state the first time it is composed under a scope.

use vitrine_core::{AnimationSpec, Length, Modifier, View};

use crate::animate_f32_from;

/// Offsets a view starts from when it enters.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Motion {
    pub alpha: f32,
    pub offset_x: f32,
    pub offset_y: f32,
    pub scale: f32,
    pub spec: AnimationSpec,
}

impl Motion {
    /// Fades in while rising `distance` px.
    pub fn fade_up(distance: f32, duration_ms: u64) -> Self {
        Self {
            alpha: 0.0,
            offset_x: 0.0,
            offset_y: distance,
            scale: 1.0,
            spec: AnimationSpec::ease_out_ms(duration_ms),
        }
    }

    /// Fades in while growing from `scale`.
    pub fn fade_scale(scale: f32, duration_ms: u64) -> Self {
        Self {
            alpha: 0.0,
            offset_x: 0.0,
            offset_y: 0.0,
            scale,
            spec: AnimationSpec::ease_out_ms(duration_ms),
        }
    }

    /// Fades in while sliding horizontally from `offset` px.
    pub fn fade_slide(offset: f32, duration_ms: u64) -> Self {
        Self {
            alpha: 0.0,
            offset_x: offset,
            offset_y: 0.0,
            scale: 1.0,
            spec: AnimationSpec::ease_out_ms(duration_ms),
        }
    }

    pub fn delay_ms(mut self, ms: u64) -> Self {
        self.spec = self.spec.with_delay_ms(ms);
        self
    }

    /// Modifier for entrance progress `p` in `0..=1`.
    pub fn apply(&self, p: f32, m: Modifier) -> Modifier {
        if p >= 1.0 {
            return m;
        }
        let rest = 1.0 - p;
        m.alpha(self.alpha + (1.0 - self.alpha) * p)
            .translate(
                Length::Px(self.offset_x * rest),
                Length::Px(self.offset_y * rest),
            )
            .scale(self.scale + (1.0 - self.scale) * p)
    }
}

pub trait Enter {
    /// Plays `motion` the first time this view is composed. `key` must be
    /// unique on the page.
    fn enter(self, key: impl Into<String>, motion: Motion) -> View;
}

impl Enter for View {
    fn enter(mut self, key: impl Into<String>, motion: Motion) -> View {
        let p = animate_f32_from(format!("enter:{}", key.into()), 0.0, 1.0, motion.spec);
        self.modifier = motion.apply(p, std::mem::take(&mut self.modifier));
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vitrine_core::{COMPOSER, TestClock};
    use web_time::Duration;

    #[test]
    fn starts_offset_and_settles() {
        COMPOSER.with(|c| c.borrow_mut().keyed_slots.clear());
        let clock = TestClock::install();
        let motion = Motion::fade_up(20.0, 800).delay_ms(200);

        let v = crate::Text("hi").enter("t", motion);
        assert_eq!(v.modifier.alpha, Some(0.0));
        assert_eq!(
            v.modifier.style().as_deref(),
            Some("opacity:0;transform:translate(0px,20px)")
        );

        clock.advance(Duration::from_millis(1000));
        let v = crate::Text("hi").enter("t", motion);
        assert_eq!(v.modifier.style(), None);
    }

    #[test]
    fn scale_entrance() {
        let m = Motion::fade_scale(0.8, 800).apply(0.5, Modifier::new());
        assert!((m.scale.unwrap_or_default() - 0.9).abs() < 1e-4);
        assert_eq!(m.alpha, Some(0.5));
    }
}

//! Everything a page module usually needs.

pub use crate::animation::{AnimatedValue, AnimationSpec, Easing, TestClock, now, set_clock};
pub use crate::color::Color;
pub use crate::effects::{Dispose, effect, on_unmount};
pub use crate::effects_ext::disposable_effect;
pub use crate::error::{ParseModeError, StorageError};
pub use crate::input::{Key, KeyEvent, Modifiers};
pub use crate::locals::{
    Palette, TextDirection, local, palette, text_direction, with_local, with_palette,
    with_text_direction,
};
pub use crate::modifier::{Length, Modifier};
pub use crate::runtime::{
    ComposeGuard, Frame, HitRegion, PaintOutput, Scheduler, SemNode, remember, remember_state,
    remember_state_with_key, remember_with_key, request_focus, request_frame,
};
pub use crate::scope::{Scope, current_scope};
pub use crate::semantics::{Role, Semantics};
pub use crate::signal::{Signal, signal};
pub use crate::theme::{ThemeMode, ThemePreference, theme_mode, theme_preference};
pub use crate::timer::{Interval, ManualTimers, set_interval};
pub use crate::view::{Scene, Tag, View, ViewId, ViewKind};

use std::cell::RefCell;

use vitrine_core::{
    animation::{AnimatedValue, AnimationSpec},
    current_scope, forget_with_key, remember_with_key,
};

/// Animate f32 to the given target; returns the current value each frame.
pub fn animate_f32(key: impl Into<String>, target: f32, spec: AnimationSpec) -> f32 {
    let key = key.into();
    let anim = remember_with_key(format!("anim:f32:{key}"), || {
        RefCell::new(AnimatedValue::new(target, spec))
    });
    let mut a = anim.borrow_mut();
    if *a.target() != target {
        a.set_target(target);
    }
    a.update();
    *a.get()
}

/// Like `animate_f32`, but the first composition starts at `initial` and
/// animates toward `target`. Entrance effects use this.
///
/// The animation state belongs to the current scope: once that scope is
/// disposed, composing the same key again replays from `initial`.
pub fn animate_f32_from(
    key: impl Into<String>,
    initial: f32,
    target: f32,
    spec: AnimationSpec,
) -> f32 {
    let slot = format!("anim:f32:{}", key.into());
    let anim = remember_with_key(slot.clone(), || {
        if let Some(scope) = current_scope() {
            scope.add_disposer(move || {
                forget_with_key(&slot);
            });
        }
        let mut a = AnimatedValue::new(initial, spec);
        a.set_target(target);
        RefCell::new(a)
    });
    let mut a = anim.borrow_mut();
    if *a.target() != target {
        a.set_target(target);
    }
    a.update();
    *a.get()
}

use crate::{Dispose, current_scope, remember_with_key};
use std::cell::RefCell;
use std::rc::Rc;

struct EffectSlot<K> {
    last_key: Option<K>,
    cleanup: Option<Dispose>,
    owner: Option<usize>,
}

impl<K> EffectSlot<K> {
    fn reset(&mut self) -> Option<Dispose> {
        self.last_key = None;
        self.owner = None;
        self.cleanup.take()
    }
}

/// Runs `effect` when `key` changes and cleans up on key change or when the
/// owning scope is disposed.
///
/// `slot` names the call site; it must be unique among effects that are
/// alive at the same time. After the owning scope is disposed the slot is
/// reset, so composing it again under a new scope runs `effect` afresh.
pub fn disposable_effect<K: PartialEq + Clone + 'static>(
    slot: impl Into<String>,
    key: K,
    effect: impl FnOnce() -> Dispose,
) {
    let slot = slot.into();
    let state: Rc<RefCell<EffectSlot<K>>> = remember_with_key(format!("effect:{slot}"), || {
        RefCell::new(EffectSlot {
            last_key: None,
            cleanup: None,
            owner: None,
        })
    });

    let scope = current_scope();
    if scope.as_ref().is_some_and(|s| s.is_disposed()) {
        log::debug!("disposable_effect '{slot}' under a disposed scope; not started");
        return;
    }
    let scope_id = scope.as_ref().map(|s| s.id());

    // Owner changed: the previous owner is still alive (otherwise the slot
    // would have been reset), so release what it started.
    let stale = {
        let s = state.borrow();
        s.owner.is_some() && s.owner != scope_id
    };
    if stale {
        let old = state.borrow_mut().reset();
        if let Some(d) = old {
            d.run();
        }
    }

    if state.borrow().owner.is_none() {
        state.borrow_mut().owner = scope_id;
        match &scope {
            Some(scope) => {
                let state = state.clone();
                scope.add_disposer(move || {
                    let cleanup = state.borrow_mut().reset();
                    if let Some(d) = cleanup {
                        d.run();
                    }
                });
            }
            None => log::debug!("disposable_effect '{slot}' has no owning scope"),
        }
    }

    let changed = state.borrow().last_key.as_ref() != Some(&key);
    if changed {
        let previous = {
            let mut s = state.borrow_mut();
            s.last_key = Some(key);
            s.cleanup.take()
        };
        if let Some(d) = previous {
            d.run();
        }

        let d = effect();
        state.borrow_mut().cleanup = Some(d);
    }
}

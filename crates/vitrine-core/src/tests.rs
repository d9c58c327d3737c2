#[cfg(test)]
mod tests {
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    use crate::COMPOSER;
    use crate::animation::*;
    use crate::scope::*;
    use crate::signal::*;
    use crate::timer::*;
    use crate::{
        Color, Dispose, disposable_effect, forget_with_key, on_unmount, remember_with_key,
        reset_composer,
    };
    use web_time::Duration;

    fn clear_keyed() {
        COMPOSER.with(|c| c.borrow_mut().keyed_slots.clear());
    }

    #[test]
    fn test_signal_basic() {
        let sig = signal(42);
        assert_eq!(sig.get(), 42);

        sig.set(100);
        assert_eq!(sig.get(), 100);

        sig.update(|v| *v += 1);
        assert_eq!(sig.get(), 101);
    }

    #[test]
    fn test_signal_subscription_reads_back() {
        let sig = signal(0);
        let seen = Rc::new(Cell::new(0));

        let s = seen.clone();
        let sig2 = sig.clone();
        sig.subscribe(move |v| {
            // Reading inside a subscriber is allowed.
            assert_eq!(*v, sig2.get());
            s.set(*v);
        });

        sig.set(42);
        assert_eq!(seen.get(), 42);
    }

    #[test]
    fn test_signal_unsubscribe() {
        let sig = signal(0);
        let hits = Rc::new(Cell::new(0));
        let h = hits.clone();
        let id = sig.subscribe(move |_| h.set(h.get() + 1));
        sig.set(1);
        sig.unsubscribe(id);
        sig.set(2);
        assert_eq!(hits.get(), 1);
    }

    #[test]
    fn test_scope_explicit_dispose() {
        let cleaned_up = Rc::new(Cell::new(false));

        let scope = Scope::new();
        let c = cleaned_up.clone();
        scope.add_disposer(move || c.set(true));

        assert!(!cleaned_up.get());
        scope.dispose();
        assert!(cleaned_up.get());
        assert!(scope.is_disposed());
    }

    #[test]
    fn test_scope_dispose_runs_once_children_first() {
        let order = Rc::new(RefCell::new(Vec::new()));
        let parent = Scope::new();
        let child = parent.child();

        let o = order.clone();
        parent.add_disposer(move || o.borrow_mut().push("parent"));
        let o = order.clone();
        child.add_disposer(move || o.borrow_mut().push("child"));

        parent.dispose();
        parent.dispose();
        assert_eq!(*order.borrow(), vec!["child", "parent"]);
        assert!(child.is_disposed());
    }

    #[test]
    fn test_disposer_on_disposed_scope_runs_immediately() {
        let scope = Scope::new();
        scope.dispose();
        let ran = Rc::new(Cell::new(false));
        let r = ran.clone();
        scope.add_disposer(move || r.set(true));
        assert!(ran.get());
    }

    #[test]
    fn test_scope_dropped_disposes() {
        let ran = Rc::new(Cell::new(false));
        {
            let scope = Scope::new();
            let r = ran.clone();
            scope.add_disposer(move || r.set(true));
        }
        assert!(ran.get());
    }

    #[test]
    fn test_key_based_remember() {
        clear_keyed();

        let val1 = remember_with_key("test", || 42);
        let val2 = remember_with_key("test", || 100);

        assert_eq!(*val1, 42);
        assert_eq!(*val2, 42);

        assert!(forget_with_key("test"));
        let val3 = remember_with_key("test", || 7);
        assert_eq!(*val3, 7);
    }

    #[test]
    fn test_disposable_effect_reruns_on_key_change() {
        clear_keyed();
        let starts = Rc::new(Cell::new(0));
        let stops = Rc::new(Cell::new(0));
        let scope = Scope::new();

        let run = |key: usize| {
            let (s, t) = (starts.clone(), stops.clone());
            scope.run(|| {
                disposable_effect("counter", key, move || {
                    s.set(s.get() + 1);
                    on_unmount(move || t.set(t.get() + 1))
                })
            });
        };

        run(1);
        run(1);
        assert_eq!((starts.get(), stops.get()), (1, 0));
        run(2);
        assert_eq!((starts.get(), stops.get()), (2, 1));
        scope.dispose();
        assert_eq!((starts.get(), stops.get()), (2, 2));
    }

    #[test]
    fn test_disposable_effect_restarts_under_new_scope() {
        clear_keyed();
        let starts = Rc::new(Cell::new(0));

        for _ in 0..2 {
            let scope = Scope::new();
            let s = starts.clone();
            scope.run(|| {
                disposable_effect("page", (), move || {
                    s.set(s.get() + 1);
                    Dispose::noop()
                })
            });
            scope.dispose();
        }
        assert_eq!(starts.get(), 2);
    }

    #[test]
    fn test_interval_cancelled_with_scope() {
        let timers = Rc::new(ManualTimers::new());
        let ticks = Rc::new(Cell::new(0));
        let scope = Scope::new();

        let t = ticks.clone();
        let interval = Interval::start(timers.clone(), Duration::from_millis(100), move || {
            t.set(t.get() + 1)
        });
        scope.add_disposer(move || interval.cancel());

        assert_eq!(timers.advance(Duration::from_millis(250)), 2);
        scope.dispose();
        assert_eq!(timers.active_count(), 0);
        timers.advance(Duration::from_millis(1000));
        assert_eq!(ticks.get(), 2);
    }

    #[test]
    fn test_tick_may_cancel_its_own_timer() {
        let timers = Rc::new(ManualTimers::new());
        let slot: Rc<RefCell<Option<Interval>>> = Rc::new(RefCell::new(None));

        let s = slot.clone();
        let interval = Interval::start(timers.clone(), Duration::from_millis(10), move || {
            if let Some(i) = s.borrow_mut().take() {
                i.cancel();
            }
        });
        *slot.borrow_mut() = Some(interval);

        assert_eq!(timers.advance(Duration::from_millis(100)), 1);
        assert_eq!(timers.active_count(), 0);
    }

    #[test]
    fn test_color_from_hex() {
        let c = Color::from_hex("#FF5733");
        assert_eq!(c, Color(255, 87, 51, 255));

        let c_alpha = Color::from_hex("#FF5733AA");
        assert_eq!(c_alpha, Color(255, 87, 51, 170));
        assert_eq!(c.to_css(), "#ff5733");
    }

    #[test]
    fn test_animation_deterministic() {
        let clock = TestClock::install();

        let mut a = AnimatedValue::new(
            0.0f32,
            AnimationSpec::tween(Duration::from_millis(1000), Easing::Linear),
        );
        a.set_target(10.0);
        clock.advance(Duration::from_millis(250));
        assert!(a.update());
        assert!((*a.get() - 2.5).abs() < 0.01);

        clock.advance(Duration::from_millis(750));
        let cont = a.update();
        assert!(!cont);
        assert!((*a.get() - 10.0).abs() < 0.001);
    }

    #[test]
    fn test_animation_waits_for_delay() {
        let clock = TestClock::install();
        let mut a = AnimatedValue::new(
            0.0f32,
            AnimationSpec::tween(Duration::from_millis(100), Easing::Linear).with_delay_ms(200),
        );
        a.set_target(1.0);
        clock.advance(Duration::from_millis(150));
        assert!(a.update());
        assert_eq!(*a.get(), 0.0);
        clock.advance(Duration::from_millis(200));
        assert!(!a.update());
        assert_eq!(*a.get(), 1.0);
    }

    #[test]
    fn test_reset_composer_drops_slots_outside_the_borrow() {
        clear_keyed();
        let forgot = Rc::new(Cell::new(None));
        let owner = remember_with_key("owner", Scope::new);
        let f = forgot.clone();
        owner.add_disposer(move || f.set(Some(forget_with_key("other"))));
        drop(owner);

        reset_composer();
        // The disposer ran against the fresh, empty composer.
        assert_eq!(forgot.get(), Some(false));
    }

    #[test]
    fn test_child_of_disposed_scope_is_disposed() {
        let parent = Scope::new();
        let first = parent.child();
        parent.dispose();
        assert!(first.is_disposed());
        assert!(parent.child().is_disposed());
    }

    #[test]
    fn test_effect_under_disposed_scope_does_not_start() {
        clear_keyed();
        let started = Rc::new(Cell::new(false));
        let scope = Scope::new();
        scope.dispose();
        let s = started.clone();
        scope.run(|| {
            disposable_effect("late", (), move || {
                s.set(true);
                Dispose::noop()
            })
        });
        assert!(!started.get());
    }

    #[test]
    fn test_thread_exit_with_live_scope_in_composer() {
        let exited = std::thread::spawn(|| {
            let owner = remember_with_key("owner", Scope::new);
            owner.add_disposer(|| {
                forget_with_key("anything");
                let _ = timer_host();
            });
            remember_with_key("other", || 1u8);
        })
        .join();
        assert!(exited.is_ok());
    }
}

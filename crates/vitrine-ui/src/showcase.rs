//! Rotating showcase: a fixed list of items, one visible at a time, advanced
//! by a recurring timer.
//!
//! The index logic lives in `RotatingShowcase`; `Showcase` is the view that
//! mounts one under the current scope and slides items in and out.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use vitrine_core::*;
use web_time::Duration;

use crate::{Box, Empty, Stack, ViewExt};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ShowcaseState {
    /// No items, or disposed.
    Idle,
    Rotating(usize),
}

/// Side an item rests on (and slides from) while it is not active.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    FromPrevious,
    FromNext,
}

impl Direction {
    /// Horizontal resting offset in percent of the item width.
    pub fn offset_percent(self) -> f32 {
        match self {
            Direction::FromPrevious => -100.0,
            Direction::FromNext => 100.0,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ItemPhase {
    Active,
    /// Active before the last advance; animating out.
    Exiting,
    Hidden,
}

/// One advance: which item leaves, which arrives.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Transition {
    pub exiting: usize,
    pub exit_toward: Direction,
    pub entering: usize,
    pub enter_from: Direction,
}

/// `(index + 1) mod count`; `0` when there is nothing to rotate.
pub fn advance_once(index: usize, count: usize) -> usize {
    if count == 0 { 0 } else { (index + 1) % count }
}

/// Side of `item` relative to `active` in cyclic order: the nearer half
/// behind the active item is `FromPrevious`, the rest `FromNext`. The item
/// right before the active one is always behind it.
pub fn direction(item: usize, active: usize, count: usize) -> Direction {
    if count == 0 {
        return Direction::FromNext;
    }
    let offset = (item % count + count - active % count) % count;
    if offset > (count - 1) / 2 {
        Direction::FromPrevious
    } else {
        Direction::FromNext
    }
}

/// The presentation of moving from `previous` to `next`. `None` when nothing
/// moves.
pub fn transition(previous: usize, next: usize, count: usize) -> Option<Transition> {
    if count <= 1 || previous == next {
        return None;
    }
    Some(Transition {
        exiting: previous,
        exit_toward: Direction::FromPrevious,
        entering: next,
        enter_from: Direction::FromNext,
    })
}

/// Active index and timer for an ordered, fixed list of items.
///
/// The timer is an owned `Interval`: `stop`, `dispose` and dropping the
/// showcase all cancel it.
pub struct RotatingShowcase<T> {
    items: Rc<[T]>,
    state: Signal<ShowcaseState>,
    previous: Rc<Cell<Option<usize>>>,
    timer: RefCell<Option<Interval>>,
}

impl<T> RotatingShowcase<T> {
    /// Mounts on `items`: `Rotating(0)` when there is at least one item,
    /// `Idle` otherwise. No timer runs until `start`.
    pub fn new(items: impl Into<Rc<[T]>>) -> Self {
        let items = items.into();
        let state = if items.is_empty() {
            ShowcaseState::Idle
        } else {
            ShowcaseState::Rotating(0)
        };
        Self {
            items,
            state: signal(state),
            previous: Rc::new(Cell::new(None)),
            timer: RefCell::new(None),
        }
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn state(&self) -> ShowcaseState {
        self.state.get()
    }

    pub fn signal(&self) -> Signal<ShowcaseState> {
        self.state.clone()
    }

    pub fn active_index(&self) -> Option<usize> {
        match self.state.get() {
            ShowcaseState::Rotating(i) => Some(i),
            ShowcaseState::Idle => None,
        }
    }

    /// Index that was active before the last advance.
    pub fn previous_index(&self) -> Option<usize> {
        self.previous.get()
    }

    pub fn active_item(&self) -> Option<&T> {
        self.active_index().and_then(|i| self.items.get(i))
    }

    /// Starts rotating on the current timer host.
    pub fn start(&self, period: Duration) -> bool {
        self.start_on(timer_host(), period)
    }

    /// Starts a recurring advance every `period`. With fewer than two items
    /// or a zero period nothing is scheduled and `false` is returned. A
    /// running timer is replaced.
    pub fn start_on(&self, host: Rc<dyn TimerHost>, period: Duration) -> bool {
        self.stop();
        let count = self.items.len();
        if count <= 1 || period.is_zero() {
            log::debug!("showcase: {count} item(s), not rotating");
            return false;
        }

        let state = self.state.clone();
        let previous = self.previous.clone();
        let interval = Interval::start(host, period, move || {
            step(&state, &previous, count);
            request_frame();
        });
        *self.timer.borrow_mut() = Some(interval);
        true
    }

    /// Cancels the timer. Safe to call repeatedly and before `start`.
    pub fn stop(&self) {
        if let Some(interval) = self.timer.borrow_mut().take() {
            interval.cancel();
        }
    }

    pub fn is_running(&self) -> bool {
        self.timer.borrow().as_ref().is_some_and(Interval::is_active)
    }

    /// Advances once, as a timer tick would.
    pub fn advance(&self) {
        step(&self.state, &self.previous, self.items.len());
    }

    /// Stops the timer and returns to `Idle`.
    pub fn dispose(&self) {
        self.stop();
        self.previous.set(None);
        if self.state.get() != ShowcaseState::Idle {
            self.state.set(ShowcaseState::Idle);
        }
    }

    pub fn item_phase(&self, index: usize) -> ItemPhase {
        match self.active_index() {
            Some(active) if active == index => ItemPhase::Active,
            Some(_) if self.previous.get() == Some(index) => ItemPhase::Exiting,
            _ => ItemPhase::Hidden,
        }
    }

    /// Resting side of a non-active item; `None` for the active item.
    pub fn direction_of(&self, index: usize) -> Option<Direction> {
        let active = self.active_index()?;
        (active != index).then(|| direction(index, active, self.items.len()))
    }

    /// The transition produced by the last advance, if any.
    pub fn last_transition(&self) -> Option<Transition> {
        transition(self.previous.get()?, self.active_index()?, self.items.len())
    }
}

fn step(state: &Signal<ShowcaseState>, previous: &Cell<Option<usize>>, count: usize) {
    if count <= 1 {
        return;
    }
    if let ShowcaseState::Rotating(i) = state.get() {
        let next = advance_once(i, count);
        log::trace!("showcase: {i} -> {next}");
        previous.set(Some(i));
        state.set(ShowcaseState::Rotating(next));
    }
}

impl<T> Drop for RotatingShowcase<T> {
    fn drop(&mut self) {
        self.stop();
    }
}

const SLIDE_MS: u64 = 700;

struct Slide {
    x: AnimatedValue<f32>,
    alpha: AnimatedValue<f32>,
}

impl Slide {
    fn resting(x: f32, alpha: f32) -> Self {
        let spec = AnimationSpec::ease_in_out_ms(SLIDE_MS);
        Self {
            x: AnimatedValue::new(x, spec),
            alpha: AnimatedValue::new(alpha, spec),
        }
    }
}

/// Shows `items` one at a time, advancing every `period`.
///
/// The showcase is mounted through a disposable effect keyed on the item
/// count, so the timer stops when the enclosing scope is disposed and
/// restarts when the number of items changes. `key` must be unique on the
/// page. Empty lists render nothing; a single item renders statically.
pub fn Showcase<T: Clone + 'static>(
    key: &str,
    items: Vec<T>,
    period: Duration,
    modifier: Modifier,
    render_item: impl Fn(&T) -> View,
) -> View {
    let count = items.len();
    let holder: Rc<RefCell<Option<Rc<RotatingShowcase<T>>>>> =
        remember_with_key(format!("showcase:{key}:instance"), || RefCell::new(None));
    let slides_key = format!("showcase:{key}:slides");

    {
        let holder = holder.clone();
        let items = items.clone();
        let slides_key = slides_key.clone();
        disposable_effect(format!("showcase:{key}"), count, move || {
            let showcase = Rc::new(RotatingShowcase::new(items));
            showcase.start(period);
            *holder.borrow_mut() = Some(showcase.clone());
            on_unmount(move || {
                showcase.dispose();
                holder.borrow_mut().take();
                forget_with_key(&slides_key);
            })
        });
    }

    if count == 0 {
        return Empty();
    }
    if count == 1 {
        return Box(modifier).child(render_item(&items[0]));
    }

    let Some(showcase) = holder.borrow().clone() else {
        return Box(modifier).child(render_item(&items[0]));
    };

    let slides: Rc<RefCell<Vec<Slide>>> = remember_with_key(slides_key, || {
        RefCell::new(
            (0..count)
                .map(|i| match showcase.direction_of(i) {
                    None => Slide::resting(0.0, 1.0),
                    Some(d) => Slide::resting(d.offset_percent(), 0.0),
                })
                .collect(),
        )
    });
    let mut slides = slides.borrow_mut();

    let children: Vec<View> = items
        .iter()
        .enumerate()
        .map(|(i, item)| {
            let phase = showcase.item_phase(i);
            let Some(slide) = slides.get_mut(i) else {
                return Empty();
            };
            match phase {
                ItemPhase::Active => {
                    if *slide.x.target() != 0.0 {
                        slide.x.set_target(0.0);
                        slide.x.restart_from(Direction::FromNext.offset_percent());
                        slide.alpha.set_target(1.0);
                    }
                }
                ItemPhase::Exiting => {
                    let side = Direction::FromPrevious.offset_percent();
                    if *slide.x.target() != side {
                        slide.x.set_target(side);
                        slide.alpha.set_target(0.0);
                    }
                }
                ItemPhase::Hidden => {
                    let side = showcase
                        .direction_of(i)
                        .unwrap_or(Direction::FromNext)
                        .offset_percent();
                    *slide = Slide::resting(side, 0.0);
                }
            }
            slide.x.update();
            slide.alpha.update();

            Box(Modifier::new()
                .class("showcase-item")
                .translate(Length::Percent(*slide.x.get()), Length::Px(0.0))
                .alpha(*slide.alpha.get())
                .hidden(phase != ItemPhase::Active))
            .child(render_item(item))
        })
        .collect();

    Stack(modifier.class("showcase")).with_children(children)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn abc() -> RotatingShowcase<&'static str> {
        RotatingShowcase::new(vec!["A", "B", "C"])
    }

    #[test]
    fn advance_once_visits_every_index_per_period() {
        for n in 1..6 {
            let mut seen = vec![false; n];
            let mut i = 0;
            for _ in 0..n {
                seen[i] = true;
                i = advance_once(i, n);
            }
            assert!(seen.iter().all(|s| *s));
            assert_eq!(i, 0);
        }
        assert_eq!(advance_once(0, 0), 0);
    }

    #[test]
    fn three_items_rotate_every_period() {
        let timers = Rc::new(ManualTimers::new());
        let showcase = abc();
        assert_eq!(showcase.state(), ShowcaseState::Rotating(0));
        assert!(showcase.start_on(timers.clone(), Duration::from_millis(4000)));

        timers.advance(Duration::from_millis(3999));
        assert_eq!(showcase.active_index(), Some(0));
        timers.advance(Duration::from_millis(1));
        assert_eq!(showcase.active_index(), Some(1));

        assert_eq!(showcase.item_phase(0), ItemPhase::Exiting);
        assert_eq!(showcase.item_phase(1), ItemPhase::Active);
        assert_eq!(showcase.item_phase(2), ItemPhase::Hidden);
        assert_eq!(
            showcase.last_transition(),
            Some(Transition {
                exiting: 0,
                exit_toward: Direction::FromPrevious,
                entering: 1,
                enter_from: Direction::FromNext,
            })
        );
        assert_eq!(showcase.direction_of(0), Some(Direction::FromPrevious));
        assert_eq!(showcase.direction_of(2), Some(Direction::FromNext));

        timers.advance(Duration::from_millis(8000));
        assert_eq!(showcase.active_index(), Some(0));
        assert_eq!(showcase.item_phase(2), ItemPhase::Exiting);
    }

    #[test]
    fn short_lists_never_start_a_timer() {
        let timers = Rc::new(ManualTimers::new());

        let empty: RotatingShowcase<u8> = RotatingShowcase::new(Vec::new());
        assert_eq!(empty.state(), ShowcaseState::Idle);
        assert!(!empty.start_on(timers.clone(), Duration::from_millis(4000)));

        let single = RotatingShowcase::new(vec!["only"]);
        assert!(!single.start_on(timers.clone(), Duration::from_millis(4000)));
        single.advance();
        assert_eq!(timers.active_count(), 0);
        assert_eq!(single.active_index(), Some(0));
    }

    #[test]
    fn zero_period_does_not_rotate() {
        let timers = Rc::new(ManualTimers::new());
        assert!(!abc().start_on(timers.clone(), Duration::ZERO));
        assert_eq!(timers.active_count(), 0);
    }

    #[test]
    fn stop_is_idempotent_and_safe_before_start() {
        let timers = Rc::new(ManualTimers::new());
        let showcase = abc();
        showcase.stop();
        assert!(showcase.start_on(timers.clone(), Duration::from_millis(10)));
        showcase.stop();
        showcase.stop();
        assert!(!showcase.is_running());
        timers.advance(Duration::from_millis(100));
        assert_eq!(showcase.active_index(), Some(0));
    }

    #[test]
    fn dispose_and_drop_cancel_the_timer() {
        let timers = Rc::new(ManualTimers::new());
        let showcase = abc();
        showcase.start_on(timers.clone(), Duration::from_millis(10));
        showcase.dispose();
        assert_eq!(showcase.state(), ShowcaseState::Idle);
        assert_eq!(timers.active_count(), 0);

        let showcase = abc();
        showcase.start_on(timers.clone(), Duration::from_millis(10));
        assert_eq!(timers.active_count(), 1);
        drop(showcase);
        assert_eq!(timers.active_count(), 0);
    }

    #[test]
    fn restart_replaces_the_timer() {
        let timers = Rc::new(ManualTimers::new());
        let showcase = abc();
        showcase.start_on(timers.clone(), Duration::from_millis(10));
        showcase.start_on(timers.clone(), Duration::from_millis(10));
        assert_eq!(timers.active_count(), 1);
        timers.advance(Duration::from_millis(10));
        assert_eq!(showcase.active_index(), Some(1));
    }

    #[test]
    fn two_items_keep_the_left_item_behind() {
        assert_eq!(direction(0, 1, 2), Direction::FromPrevious);
        assert_eq!(direction(1, 0, 2), Direction::FromPrevious);
        assert_eq!(direction(1, 0, 4), Direction::FromNext);
        assert_eq!(direction(3, 0, 4), Direction::FromPrevious);
        assert_eq!(transition(1, 1, 3), None);
        assert_eq!(transition(0, 1, 1), None);
    }

    #[test]
    fn view_is_torn_down_with_its_scope() {
        COMPOSER.with(|c| c.borrow_mut().keyed_slots.clear());
        let timers = Rc::new(ManualTimers::new());
        set_timer_host(timers.clone());
        TestClock::install();

        let scope = Scope::new();
        let compose = || {
            scope.run(|| {
                Showcase(
                    "reviews",
                    vec!["A", "B", "C"],
                    Duration::from_millis(4000),
                    Modifier::new(),
                    |s| crate::Text(*s),
                )
            })
        };

        let v = compose();
        assert_eq!(timers.active_count(), 1);
        let visible: Vec<_> = v.children.iter().filter(|c| !c.modifier.hidden).collect();
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].text_content(), "A");

        timers.advance(Duration::from_millis(4000));
        let v = compose();
        let visible: Vec<_> = v.children.iter().filter(|c| !c.modifier.hidden).collect();
        assert_eq!(visible[0].text_content(), "B");
        assert_eq!(timers.active_count(), 1);

        scope.dispose();
        assert_eq!(timers.active_count(), 0);
    }

    #[test]
    fn empty_and_single_render_statically() {
        COMPOSER.with(|c| c.borrow_mut().keyed_slots.clear());
        let timers = Rc::new(ManualTimers::new());
        set_timer_host(timers.clone());
        let scope = Scope::new();

        let v = scope.run(|| {
            Showcase("none", Vec::<&str>::new(), Duration::from_millis(4000), Modifier::new(), |s| {
                crate::Text(*s)
            })
        });
        assert!(v.is_empty());

        let v = scope.run(|| {
            Showcase("one", vec!["solo"], Duration::from_millis(4000), Modifier::new(), |s| {
                crate::Text(*s)
            })
        });
        assert_eq!(v.text_content(), "solo");
        assert_eq!(timers.active_count(), 0);
    }
}

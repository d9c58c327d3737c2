//! Owned recurring timers.
//!
//! A `TimerHost` schedules callbacks; an `Interval` is the owning handle for
//! one schedule. Dropping or cancelling the handle clears the schedule, so a
//! timer can never outlive the component that created it.
//!
//! Ticks run on the UI thread, one at a time, each to completion.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use slotmap::{Key as _, KeyData, SlotMap, new_key_type};
use web_time::Duration;

/// Host-assigned timer identifier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TimerId(pub u64);

pub trait TimerHost {
    fn set_interval(&self, period: Duration, tick: Box<dyn FnMut()>) -> TimerId;
    fn clear_interval(&self, id: TimerId);
}

/// Owning handle for a recurring timer.
#[must_use = "dropping an Interval cancels it"]
pub struct Interval {
    host: Rc<dyn TimerHost>,
    id: Cell<Option<TimerId>>,
}

impl Interval {
    pub fn start(host: Rc<dyn TimerHost>, period: Duration, tick: impl FnMut() + 'static) -> Self {
        let id = host.set_interval(period, Box::new(tick));
        Self {
            host,
            id: Cell::new(Some(id)),
        }
    }

    /// Cancels the timer; later calls do nothing.
    pub fn cancel(&self) {
        if let Some(id) = self.id.take() {
            self.host.clear_interval(id);
        }
    }

    pub fn is_active(&self) -> bool {
        self.id.get().is_some()
    }
}

impl Drop for Interval {
    fn drop(&mut self) {
        self.cancel();
    }
}

impl std::fmt::Debug for Interval {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Interval").field("id", &self.id.get()).finish()
    }
}

new_key_type! {
    struct TimerKey;
}

struct Entry {
    period: Duration,
    next_due: Duration,
    seq: u64,
    tick: Rc<RefCell<Box<dyn FnMut()>>>,
}

/// Deterministic timer host driven by `advance`.
///
/// Used by the headless runner and by tests; nothing fires until time is
/// advanced explicitly.
#[derive(Default)]
pub struct ManualTimers {
    entries: RefCell<SlotMap<TimerKey, Entry>>,
    now: Cell<Duration>,
    seq: Cell<u64>,
}

impl ManualTimers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Time elapsed since the host was created.
    pub fn elapsed(&self) -> Duration {
        self.now.get()
    }

    pub fn active_count(&self) -> usize {
        self.entries.borrow().len()
    }

    /// Moves time forward by `by`, firing every tick that falls due in order
    /// of due time. Returns the number of ticks fired.
    pub fn advance(&self, by: Duration) -> usize {
        let target = self.now.get() + by;
        let mut fired = 0;
        loop {
            let next = {
                let entries = self.entries.borrow();
                entries
                    .iter()
                    .filter(|(_, e)| e.next_due <= target)
                    .min_by_key(|(_, e)| (e.next_due, e.seq))
                    .map(|(k, e)| (k, e.next_due))
            };
            let Some((key, due)) = next else { break };

            self.now.set(due);
            let tick = {
                let mut entries = self.entries.borrow_mut();
                let Some(entry) = entries.get_mut(key) else {
                    continue;
                };
                entry.next_due = due + entry.period;
                entry.tick.clone()
            };
            // No borrow held: the tick may cancel or start timers.
            {
                let mut f = tick.borrow_mut();
                (&mut **f)();
            }
            fired += 1;
        }
        self.now.set(target);
        fired
    }
}

impl TimerHost for ManualTimers {
    fn set_interval(&self, period: Duration, tick: Box<dyn FnMut()>) -> TimerId {
        // A zero period would fire forever within one advance.
        let period = period.max(Duration::from_millis(1));
        let seq = self.seq.get();
        self.seq.set(seq + 1);
        let key = self.entries.borrow_mut().insert(Entry {
            period,
            next_due: self.now.get() + period,
            seq,
            tick: Rc::new(RefCell::new(tick)),
        });
        TimerId(key.data().as_ffi())
    }

    fn clear_interval(&self, id: TimerId) {
        let key = TimerKey::from(KeyData::from_ffi(id.0));
        self.entries.borrow_mut().remove(key);
    }
}

thread_local! {
    static HOST: RefCell<Option<Rc<dyn TimerHost>>> = const { RefCell::new(None) };
}

/// Installs the timer host used by `set_interval` on this thread.
pub fn set_timer_host(host: Rc<dyn TimerHost>) {
    HOST.with(|h| *h.borrow_mut() = Some(host));
}

/// Current timer host. Falls back to an inert `ManualTimers` that is never
/// advanced, also while the thread is shutting down.
pub fn timer_host() -> Rc<dyn TimerHost> {
    HOST.try_with(|h| {
        h.borrow_mut()
            .get_or_insert_with(|| {
                log::debug!("no timer host installed; timers will not fire");
                Rc::new(ManualTimers::new()) as Rc<dyn TimerHost>
            })
            .clone()
    })
    .unwrap_or_else(|_| Rc::new(ManualTimers::new()))
}

/// Starts a recurring timer on the current host.
pub fn set_interval(period: Duration, tick: impl FnMut() + 'static) -> Interval {
    Interval::start(timer_host(), period, tick)
}

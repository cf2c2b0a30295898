//! The timer port and a deterministic manual driver.
//!
//! Deferred execution in the rate controllers comes exclusively from a
//! host-provided timer facility, abstracted as [`TimerPort`]:
//! schedule-after-delay and cancel-scheduled, nothing more. The controllers
//! never block; a scheduled callback runs whenever the host fires it.
//!
//! [`ManualTimer`] is the in-crate driver: time only moves when
//! [`advance`](ManualTimer::advance) is called, which makes controller
//! behavior fully deterministic. The `async` feature adds a tokio-backed
//! adapter in [`tokio_timer`](super::tokio_timer).

use std::cell::{Cell, RefCell};
use std::time::Duration;

use crate::error::CallFailure;

/// A scheduled callback.
///
/// The callback reports failures explicitly; they propagate to whatever
/// invoked it (for [`ManualTimer`], the `advance` caller).
pub type TimerCallback = Box<dyn FnOnce() -> Result<(), CallFailure>>;

/// Identifies one scheduled timer within its port.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerHandle(pub(crate) u64);

/// The host's deferred-execution facility.
///
/// A port owns every timer scheduled through it: dropping the scheduler
/// (e.g. a rate controller) does not cancel its outstanding timer — the
/// timer stays with the port until it fires or [`cancel`](Self::cancel) is
/// called with its handle.
pub trait TimerPort {
    /// Schedules `callback` to run once, `delay` from now.
    fn schedule_after(&self, delay: Duration, callback: TimerCallback) -> TimerHandle;

    /// Cancels a scheduled timer. Unknown or already-fired handles are
    /// ignored.
    fn cancel(&self, handle: TimerHandle);
}

struct ScheduledEntry {
    id: u64,
    due: u64,
    callback: TimerCallback,
}

/// A deterministic, manually driven timer port.
///
/// Time is a millisecond counter that only moves through
/// [`advance`](Self::advance). Due callbacks fire in (deadline, scheduling
/// order); a callback may itself schedule or cancel timers on the same
/// port.
///
/// # Examples
///
/// ```rust
/// use std::cell::Cell;
/// use std::rc::Rc;
/// use std::time::Duration;
/// use lodars::control::{ManualTimer, TimerPort};
///
/// let timer = ManualTimer::new();
/// let fired = Rc::new(Cell::new(false));
/// let observed = Rc::clone(&fired);
///
/// timer.schedule_after(
///     Duration::from_millis(100),
///     Box::new(move || {
///         observed.set(true);
///         Ok(())
///     }),
/// );
///
/// timer.advance(99).unwrap();
/// assert!(!fired.get());
/// timer.advance(1).unwrap();
/// assert!(fired.get());
/// ```
#[derive(Default)]
pub struct ManualTimer {
    now: Cell<u64>,
    next_id: Cell<u64>,
    entries: RefCell<Vec<ScheduledEntry>>,
}

impl ManualTimer {
    /// Creates a timer at time zero with nothing scheduled.
    pub fn new() -> Self {
        Self::default()
    }

    /// The current time in milliseconds.
    #[inline]
    pub fn now_millis(&self) -> u64 {
        self.now.get()
    }

    /// The number of scheduled, not-yet-fired timers.
    #[inline]
    pub fn pending(&self) -> usize {
        self.entries.borrow().len()
    }

    /// Moves time forward by `millis`, firing due callbacks in (deadline,
    /// scheduling order). Callbacks scheduled while advancing fire within
    /// the same call if they fall due before the target time.
    ///
    /// # Errors
    ///
    /// The first callback failure stops the advance: the clock rests at the
    /// failing deadline and later entries stay scheduled, so the caller can
    /// observe the failure and advance again.
    pub fn advance(&self, millis: u64) -> Result<(), CallFailure> {
        let target = self.now.get().saturating_add(millis);
        loop {
            let next = {
                let entries = self.entries.borrow();
                entries
                    .iter()
                    .enumerate()
                    .filter(|(_, entry)| entry.due <= target)
                    .min_by_key(|(_, entry)| (entry.due, entry.id))
                    .map(|(index, _)| index)
            };
            let Some(index) = next else {
                break;
            };
            // Detach the entry before running it so the callback may freely
            // schedule or cancel on this port.
            let entry = self.entries.borrow_mut().remove(index);
            self.now.set(self.now.get().max(entry.due));
            (entry.callback)()?;
        }
        self.now.set(target);
        Ok(())
    }
}

impl TimerPort for ManualTimer {
    fn schedule_after(&self, delay: Duration, callback: TimerCallback) -> TimerHandle {
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        #[allow(clippy::cast_possible_truncation)]
        let due = self.now.get().saturating_add(delay.as_millis() as u64);
        self.entries
            .borrow_mut()
            .push(ScheduledEntry { id, due, callback });
        TimerHandle(id)
    }

    fn cancel(&self, handle: TimerHandle) {
        self.entries.borrow_mut().retain(|entry| entry.id != handle.0);
    }
}

//! A tokio-backed timer port.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::time::Duration;

use tokio::task::JoinHandle;

use crate::error::CallFailure;

use super::timer::{TimerCallback, TimerHandle, TimerPort};

/// A [`TimerPort`] driven by the tokio runtime.
///
/// Each scheduled timer becomes a task spawned with
/// `tokio::task::spawn_local` that sleeps for the delay and then runs the
/// callback; `cancel` aborts the task. Timer callbacks are not `Send`, so
/// scheduling must happen inside a `tokio::task::LocalSet` on a
/// current-thread runtime — the same cooperative, single-threaded model
/// the controllers assume.
///
/// A deferred callback's failure is surfaced through the task's join
/// handle and otherwise discarded; error policy for fired timers belongs
/// to the host.
///
/// # Panics
///
/// `schedule_after` panics if called outside a `LocalSet` context, as
/// `spawn_local` does.
///
/// # Examples
///
/// ```rust,no_run
/// use std::rc::Rc;
/// use std::time::Duration;
/// use lodars::control::{DebounceOptions, TokioTimer, debounce};
/// use lodars::Value;
///
/// # async fn inside_a_local_set() {
/// let timer = Rc::new(TokioTimer::new());
/// let target = Value::function(0, |_, _| Ok(Value::Nil));
/// let controlled = debounce(
///     timer,
///     &target,
///     Duration::from_millis(200),
///     DebounceOptions::default(),
/// )
/// .unwrap();
///
/// controlled.call(&[]).unwrap();
/// tokio::time::sleep(Duration::from_millis(250)).await; // trailing fires
/// # }
/// ```
#[derive(Default)]
pub struct TokioTimer {
    next_id: Cell<u64>,
    tasks: RefCell<HashMap<u64, JoinHandle<Result<(), CallFailure>>>>,
}

impl TokioTimer {
    /// Creates a timer port with nothing scheduled.
    pub fn new() -> Self {
        Self::default()
    }

    /// The number of scheduled, not-yet-finished timers.
    pub fn pending(&self) -> usize {
        self.tasks
            .borrow()
            .values()
            .filter(|task| !task.is_finished())
            .count()
    }
}

impl TimerPort for TokioTimer {
    fn schedule_after(&self, delay: Duration, callback: TimerCallback) -> TimerHandle {
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        let task = tokio::task::spawn_local(async move {
            tokio::time::sleep(delay).await;
            callback()
        });
        let mut tasks = self.tasks.borrow_mut();
        tasks.retain(|_, task| !task.is_finished());
        tasks.insert(id, task);
        TimerHandle(id)
    }

    fn cancel(&self, handle: TimerHandle) {
        if let Some(task) = self.tasks.borrow_mut().remove(&handle.0) {
            task.abort();
        }
    }
}

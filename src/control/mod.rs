//! Time-based call-rate controllers.
//!
//! This module wraps function values in single-timer state machines that
//! decide whether and when the underlying function actually executes:
//!
//! - [`debounce`]: collapse a burst of calls; every call resets the
//!   countdown, and the wrapped function fires at the burst's edges
//! - [`throttle`]: at most one leading and one trailing invocation per
//!   fixed-length window
//! - [`TimerPort`]: the host's schedule-after-delay / cancel facility,
//!   with [`ManualTimer`] as a deterministic in-crate driver (and a
//!   tokio-backed adapter behind the `async` feature)
//!
//! Both controllers share the same state-machine shape: `Idle` with no
//! timer scheduled, `Pending` with exactly one. A call in `Idle` may fire
//! the leading edge synchronously; a call in `Pending` refreshes the owed
//! trailing data (and, for debounce only, the deadline); the timer firing
//! may run the trailing edge and returns the machine to `Idle`. At most
//! one timer is ever alive per instance, so invocations of the wrapped
//! target are strictly ordered — leading then trailing within a burst,
//! call order across bursts — and never overlap.
//!
//! Everything here is single-threaded and cooperative: `call` always
//! returns synchronously (possibly after running the wrapped function
//! inline), and deferred execution happens only when the host fires a
//! scheduled callback.
//!
//! # Examples
//!
//! ```rust
//! use std::cell::RefCell;
//! use std::rc::Rc;
//! use std::time::Duration;
//! use lodars::control::{ManualTimer, ThrottleOptions, throttle};
//! use lodars::Value;
//!
//! let timer = Rc::new(ManualTimer::new());
//! let seen = Rc::new(RefCell::new(Vec::new()));
//! let sink = Rc::clone(&seen);
//! let target = Value::function(1, move |_, args| {
//!     sink.borrow_mut().push(args[0].clone());
//!     Ok(Value::Nil)
//! });
//!
//! let controlled = throttle(
//!     timer.clone(),
//!     &target,
//!     Duration::from_millis(100),
//!     ThrottleOptions::default(),
//! )
//! .unwrap();
//!
//! for n in 0..10 {
//!     controlled.call(&[Value::number(f64::from(n))]).unwrap();
//! }
//! timer.advance(100).unwrap();
//!
//! // Leading edge with the first call's data, trailing with the last's.
//! assert_eq!(*seen.borrow(), vec![Value::number(0.0), Value::number(9.0)]);
//! ```

mod debounce;
mod throttle;
mod timer;

#[cfg(feature = "async")]
mod tokio_timer;

pub use debounce::{DebounceOptions, Debounced, debounce};
pub use throttle::{Throttled, ThrottleOptions, throttle};
pub use timer::{ManualTimer, TimerCallback, TimerHandle, TimerPort};

#[cfg(feature = "async")]
pub use tokio_timer::TokioTimer;

use crate::value::Value;

/// The most recent call's context and arguments, kept while a trailing
/// invocation is owed and cleared when it fires.
pub(crate) struct PendingCall {
    pub(crate) context: Value,
    pub(crate) arguments: Vec<Value>,
}

impl PendingCall {
    pub(crate) fn new(context: &Value, arguments: &[Value]) -> Self {
        Self {
            context: context.clone(),
            arguments: arguments.to_vec(),
        }
    }
}

//! Debouncing: collapse a burst of calls into at most a leading and a
//! trailing invocation.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use crate::error::{CallFailure, OperatorError};
use crate::value::{NativeFunction, Value};

use super::PendingCall;
use super::timer::{TimerHandle, TimerPort};

/// Edge options for [`debounce`].
///
/// Defaults to `{leading: false, trailing: true}`: nothing fires until a
/// burst goes quiet for the wait duration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DebounceOptions {
    /// Invoke synchronously on the first call of a burst.
    pub leading: bool,
    /// Invoke with the last call's data when the burst goes quiet.
    pub trailing: bool,
}

impl Default for DebounceOptions {
    fn default() -> Self {
        Self {
            leading: false,
            trailing: true,
        }
    }
}

#[derive(Default)]
struct BurstState {
    timer_handle: Option<TimerHandle>,
    owed: Option<PendingCall>,
}

struct Inner {
    function: Rc<NativeFunction>,
    timer: Rc<dyn TimerPort>,
    wait: Duration,
    leading: bool,
    trailing: bool,
    state: RefCell<BurstState>,
}

impl Inner {
    /// The burst's timer elapsed: fire the owed trailing invocation, if
    /// any, and return to idle.
    fn fire(inner: &Rc<Self>) -> Result<(), CallFailure> {
        let owed = {
            let mut state = inner.state.borrow_mut();
            state.timer_handle = None;
            state.owed.take()
        };
        match owed {
            Some(call) => inner
                .function
                .call(&call.context, &call.arguments)
                .map(drop),
            None => Ok(()),
        }
    }
}

/// A debounced wrapper around a function value.
///
/// One instance owns one timer slot and one owed-call slot; the state
/// machine is `Idle` (no timer) or `Pending` (timer scheduled, inside a
/// burst). Dropping the wrapper does not cancel an outstanding timer: the
/// timer port owns it until it fires, and the scheduled callback keeps the
/// wrapper's internal state alive.
pub struct Debounced {
    inner: Rc<Inner>,
}

/// Wraps `function` so calls are debounced over `timer`.
///
/// Every call (re)schedules the burst timer `wait` from now — the classic
/// debounce reset. At the leading edge the wrapped function runs
/// synchronously with the triggering call's context and arguments; at the
/// trailing edge with the burst's most recent ones.
///
/// # Errors
///
/// [`OperatorError::NotCallable`] when `function` is not callable.
///
/// # Examples
///
/// ```rust
/// use std::rc::Rc;
/// use std::time::Duration;
/// use lodars::control::{DebounceOptions, ManualTimer, debounce};
/// use lodars::Value;
///
/// let timer = Rc::new(ManualTimer::new());
/// let target = Value::function(1, |_, args| Ok(args[0].clone()));
/// let controlled = debounce(
///     timer.clone(),
///     &target,
///     Duration::from_millis(200),
///     DebounceOptions::default(),
/// )
/// .unwrap();
///
/// controlled.call(&[Value::number(1.0)]).unwrap();
/// controlled.call(&[Value::number(2.0)]).unwrap();
/// assert!(controlled.is_pending());
///
/// // The burst goes quiet: the trailing invocation fires on the timer.
/// timer.advance(200).unwrap();
/// assert!(!controlled.is_pending());
/// ```
pub fn debounce(
    timer: Rc<dyn TimerPort>,
    function: &Value,
    wait: Duration,
    options: DebounceOptions,
) -> Result<Debounced, OperatorError> {
    let Some(native) = function.as_function() else {
        return Err(OperatorError::NotCallable {
            found: function.kind(),
        });
    };
    Ok(Debounced {
        inner: Rc::new(Inner {
            function: Rc::clone(native),
            timer,
            wait,
            leading: options.leading,
            trailing: options.trailing,
            state: RefCell::new(BurstState::default()),
        }),
    })
}

impl Debounced {
    /// Calls the controlled function with a `Nil` context.
    ///
    /// # Errors
    ///
    /// Propagates a [`CallFailure`] from a synchronous leading invocation.
    pub fn call(&self, arguments: &[Value]) -> Result<Option<Value>, CallFailure> {
        self.call_with(&Value::Nil, arguments)
    }

    /// Calls the controlled function with an explicit invocation context.
    ///
    /// Returns `Some(result)` when this call fired the leading edge
    /// synchronously, `None` otherwise. A trailing invocation, when owed,
    /// runs later from the timer callback and reports its failure there.
    ///
    /// # Errors
    ///
    /// Propagates a [`CallFailure`] from a synchronous leading invocation.
    pub fn call_with(
        &self,
        context: &Value,
        arguments: &[Value],
    ) -> Result<Option<Value>, CallFailure> {
        let inner = &self.inner;
        let (fire_leading, previous) = {
            let mut state = inner.state.borrow_mut();
            let in_burst = state.timer_handle.is_some();
            // The leading edge fires only on the first call after idle.
            let fire_leading = !in_burst && inner.leading;
            if !fire_leading && inner.trailing {
                state.owed = Some(PendingCall::new(context, arguments));
            }
            (fire_leading, state.timer_handle.take())
        };

        // Every call resets the countdown.
        if let Some(handle) = previous {
            inner.timer.cancel(handle);
        }
        let scheduled = Rc::clone(inner);
        let handle = inner
            .timer
            .schedule_after(inner.wait, Box::new(move || Inner::fire(&scheduled)));
        inner.state.borrow_mut().timer_handle = Some(handle);

        if fire_leading {
            return inner.function.call(context, arguments).map(Some);
        }
        Ok(None)
    }

    /// Whether a burst is in progress (a timer is scheduled).
    pub fn is_pending(&self) -> bool {
        self.inner.state.borrow().timer_handle.is_some()
    }
}

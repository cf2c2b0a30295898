//! Throttling: at most one leading and one trailing invocation per window.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use crate::error::{CallFailure, OperatorError};
use crate::value::{NativeFunction, Value};

use super::PendingCall;
use super::timer::{TimerHandle, TimerPort};

/// Edge options for [`throttle`].
///
/// Defaults to `{leading: true, trailing: true}`: the first call of a
/// window fires immediately and the window's last coalesced call fires
/// when the window closes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThrottleOptions {
    /// Invoke synchronously when a call arrives outside any window.
    pub leading: bool,
    /// Invoke with the window's last coalesced call when it closes.
    pub trailing: bool,
}

impl Default for ThrottleOptions {
    fn default() -> Self {
        Self {
            leading: true,
            trailing: true,
        }
    }
}

#[derive(Default)]
struct WindowState {
    timer_handle: Option<TimerHandle>,
    owed: Option<PendingCall>,
}

struct Inner {
    function: Rc<NativeFunction>,
    timer: Rc<dyn TimerPort>,
    wait: Duration,
    leading: bool,
    trailing: bool,
    state: RefCell<WindowState>,
}

impl Inner {
    /// The window closed: fire the owed trailing invocation, if any, and
    /// return to idle so the next call is leading-eligible again.
    fn close_window(inner: &Rc<Self>) -> Result<(), CallFailure> {
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

/// A throttled wrapper around a function value.
///
/// One instance owns one window timer and one owed-call slot. Unlike
/// debounce, calls inside a window never extend its deadline — they only
/// overwrite the owed trailing data. Dropping the wrapper leaves an
/// outstanding window timer with the timer port until it fires.
pub struct Throttled {
    inner: Rc<Inner>,
}

/// Wraps `function` so calls are throttled to one window of `wait` at a
/// time over `timer`.
///
/// A burst of N calls inside one window produces exactly two invocations
/// with the default options: the first call's data at the leading edge and
/// the last call's data when the window closes. A `wait` of zero
/// degenerates to invoking every call immediately, never owing anything.
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
/// use lodars::control::{ManualTimer, ThrottleOptions, throttle};
/// use lodars::Value;
///
/// let timer = Rc::new(ManualTimer::new());
/// let target = Value::function(1, |_, args| Ok(args[0].clone()));
/// let controlled = throttle(
///     timer.clone(),
///     &target,
///     Duration::from_millis(100),
///     ThrottleOptions::default(),
/// )
/// .unwrap();
///
/// // Leading edge: fires immediately.
/// let first = controlled.call(&[Value::number(1.0)]).unwrap();
/// assert_eq!(first, Some(Value::number(1.0)));
///
/// // Coalesced inside the window.
/// assert_eq!(controlled.call(&[Value::number(2.0)]).unwrap(), None);
///
/// timer.advance(100).unwrap(); // trailing fires with the last call's data
/// assert!(!controlled.is_pending());
/// ```
pub fn throttle(
    timer: Rc<dyn TimerPort>,
    function: &Value,
    wait: Duration,
    options: ThrottleOptions,
) -> Result<Throttled, OperatorError> {
    let Some(native) = function.as_function() else {
        return Err(OperatorError::NotCallable {
            found: function.kind(),
        });
    };
    Ok(Throttled {
        inner: Rc::new(Inner {
            function: Rc::clone(native),
            timer,
            wait,
            leading: options.leading,
            trailing: options.trailing,
            state: RefCell::new(WindowState::default()),
        }),
    })
}

impl Throttled {
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
    /// Returns `Some(result)` when this call invoked the wrapped function
    /// synchronously (the leading edge, or any call with a zero wait),
    /// `None` when the call was coalesced into the window.
    ///
    /// # Errors
    ///
    /// Propagates a [`CallFailure`] from a synchronous invocation.
    pub fn call_with(
        &self,
        context: &Value,
        arguments: &[Value],
    ) -> Result<Option<Value>, CallFailure> {
        let inner = &self.inner;
        if inner.wait.is_zero() {
            return inner.function.call(context, arguments).map(Some);
        }

        {
            let mut state = inner.state.borrow_mut();
            if state.timer_handle.is_some() {
                // Inside the window: coalesce, never extend the deadline.
                if inner.trailing {
                    state.owed = Some(PendingCall::new(context, arguments));
                }
                return Ok(None);
            }
            if !inner.leading && inner.trailing {
                state.owed = Some(PendingCall::new(context, arguments));
            }
        }

        let scheduled = Rc::clone(inner);
        let handle = inner
            .timer
            .schedule_after(inner.wait, Box::new(move || Inner::close_window(&scheduled)));
        inner.state.borrow_mut().timer_handle = Some(handle);

        if inner.leading {
            return inner.function.call(context, arguments).map(Some);
        }
        Ok(None)
    }

    /// Whether a window is currently open (a timer is scheduled).
    pub fn is_pending(&self) -> bool {
        self.inner.state.borrow().timer_handle.is_some()
    }
}

//! Value-level currying.
//!
//! A curried function accumulates arguments across applications: the shared
//! wrapped function and the arguments taken so far live behind `Rc`, so a
//! partial application can be reused and applied with any grouping of the
//! remaining arguments.

use std::rc::Rc;

use smallvec::SmallVec;

use crate::error::OperatorError;
use crate::value::{NativeFunction, Value};

type TakenArguments = SmallVec<[Value; 4]>;

/// Converts a function value into curried form.
///
/// The wrapped function is applied as soon as at least its declared arity
/// worth of arguments has accumulated; until then each application returns
/// a new function value carrying the arguments taken so far. Partial
/// applications are reusable. A zero-arity function is invoked immediately
/// and its result returned (a failure is substituted as a
/// [`Value::Failure`], consistent with `map`).
///
/// # Errors
///
/// [`OperatorError::NotCallable`] when `function` is not callable.
///
/// # Examples
///
/// ```rust
/// use lodars::compose::curry;
/// use lodars::Value;
///
/// let add3 = Value::function(3, |_, args| {
///     let sum: f64 = args.iter().filter_map(Value::as_number).sum();
///     Ok(Value::number(sum))
/// });
/// let curried = curry(&add3).unwrap();
///
/// // Any grouping works: (1, 2)(3) here.
/// let partial = curried
///     .as_function()
///     .unwrap()
///     .call(&Value::Nil, &[Value::number(1.0), Value::number(2.0)])
///     .unwrap();
/// let result = partial
///     .as_function()
///     .unwrap()
///     .call(&Value::Nil, &[Value::number(3.0)])
///     .unwrap();
/// assert_eq!(result, Value::number(6.0));
/// ```
pub fn curry(function: &Value) -> Result<Value, OperatorError> {
    let Some(native) = function.as_function() else {
        return Err(OperatorError::NotCallable {
            found: function.kind(),
        });
    };
    let native = Rc::clone(native);
    if native.arity() == 0 {
        return Ok(match native.call(&Value::Nil, &[]) {
            Ok(value) => value,
            Err(failure) => Value::failure(failure),
        });
    }
    Ok(curried_step(native, Rc::new(TakenArguments::new())))
}

fn curried_step(function: Rc<NativeFunction>, taken: Rc<TakenArguments>) -> Value {
    let arity = function.arity();
    let remaining = arity.saturating_sub(taken.len());
    Value::function(remaining, move |context, arguments| {
        let mut combined = (*taken).clone();
        combined.extend(arguments.iter().cloned());
        if combined.len() >= arity {
            function.call(context, &combined)
        } else {
            Ok(curried_step(Rc::clone(&function), Rc::new(combined)))
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CallFailure;

    fn apply(function: &Value, arguments: &[Value]) -> Value {
        function
            .as_function()
            .expect("expected a callable")
            .call(&Value::Nil, arguments)
            .expect("call should succeed")
    }

    fn add3() -> Value {
        Value::function(3, |_, args| {
            let sum: f64 = args.iter().filter_map(Value::as_number).sum();
            Ok(Value::number(sum))
        })
    }

    #[test]
    fn test_curry_one_at_a_time() {
        let curried = curry(&add3()).unwrap();
        let step1 = apply(&curried, &[Value::number(1.0)]);
        let step2 = apply(&step1, &[Value::number(2.0)]);
        assert_eq!(apply(&step2, &[Value::number(3.0)]), Value::number(6.0));
    }

    #[test]
    fn test_curry_groupings() {
        let curried = curry(&add3()).unwrap();

        let grouped = apply(&curried, &[Value::number(1.0), Value::number(2.0)]);
        assert_eq!(apply(&grouped, &[Value::number(3.0)]), Value::number(6.0));

        let head = apply(&curried, &[Value::number(1.0)]);
        assert_eq!(
            apply(&head, &[Value::number(2.0), Value::number(3.0)]),
            Value::number(6.0)
        );

        assert_eq!(
            apply(
                &curried,
                &[Value::number(1.0), Value::number(2.0), Value::number(3.0)]
            ),
            Value::number(6.0)
        );
    }

    #[test]
    fn test_partial_application_is_reusable() {
        let curried = curry(&add3()).unwrap();
        let partial = apply(&curried, &[Value::number(10.0), Value::number(20.0)]);

        assert_eq!(apply(&partial, &[Value::number(1.0)]), Value::number(31.0));
        assert_eq!(apply(&partial, &[Value::number(2.0)]), Value::number(32.0));
    }

    #[test]
    fn test_curry_zero_arity_invokes_immediately() {
        let constant = Value::function(0, |_, _| Ok(Value::number(42.0)));
        assert_eq!(curry(&constant).unwrap(), Value::number(42.0));
    }

    #[test]
    fn test_curry_zero_arity_failure_is_substituted() {
        let failing = Value::function(0, |_, _| Err(CallFailure::new("boom")));
        assert!(curry(&failing).unwrap().is_failure());
    }

    #[test]
    fn test_curry_rejects_non_callables() {
        assert_eq!(
            curry(&Value::text("not a function")),
            Err(OperatorError::NotCallable { found: "string" })
        );
    }

    #[test]
    fn test_remaining_arity_is_reported() {
        let curried = curry(&add3()).unwrap();
        assert_eq!(curried.as_function().unwrap().arity(), 3);
        let partial = apply(&curried, &[Value::number(1.0)]);
        assert_eq!(partial.as_function().unwrap().arity(), 2);
    }
}

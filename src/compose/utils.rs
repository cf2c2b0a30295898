//! Helper combinators as function values.
//!
//! - [`identity`]: returns its argument unchanged (I combinator)
//! - [`constant`]: always returns the same value (K combinator)
//! - [`flip`]: swaps the first two arguments of a function value (C combinator)

use std::rc::Rc;

use smallvec::SmallVec;

use crate::error::OperatorError;
use crate::value::Value;

/// A function value that returns its first argument unchanged (`Nil` when
/// called with no arguments).
///
/// # Examples
///
/// ```rust
/// use lodars::compose::identity;
/// use lodars::Value;
///
/// let id = identity();
/// let result = id
///     .as_function()
///     .unwrap()
///     .call(&Value::Nil, &[Value::number(42.0)])
///     .unwrap();
/// assert_eq!(result, Value::number(42.0));
/// ```
pub fn identity() -> Value {
    Value::function(1, |_, arguments| {
        Ok(arguments.first().cloned().unwrap_or(Value::Nil))
    })
}

/// A function value that ignores its input and always returns `value`.
///
/// # Examples
///
/// ```rust
/// use lodars::compose::constant;
/// use lodars::Value;
///
/// let always_five = constant(Value::number(5.0));
/// let result = always_five
///     .as_function()
///     .unwrap()
///     .call(&Value::Nil, &[Value::text("ignored")])
///     .unwrap();
/// assert_eq!(result, Value::number(5.0));
/// ```
pub fn constant(value: Value) -> Value {
    Value::function(1, move |_, _| Ok(value.clone()))
}

/// Swaps the first two arguments of a function value.
///
/// Arguments past the second are forwarded unchanged; so is the invocation
/// context.
///
/// # Errors
///
/// [`OperatorError::NotCallable`] when `function` is not callable.
///
/// # Examples
///
/// ```rust
/// use lodars::compose::flip;
/// use lodars::Value;
///
/// let subtract = Value::function(2, |_, args| {
///     let a = args[0].as_number().unwrap_or(0.0);
///     let b = args[1].as_number().unwrap_or(0.0);
///     Ok(Value::number(a - b))
/// });
///
/// let flipped = flip(&subtract).unwrap();
/// let result = flipped
///     .as_function()
///     .unwrap()
///     .call(&Value::Nil, &[Value::number(3.0), Value::number(10.0)])
///     .unwrap();
/// assert_eq!(result, Value::number(7.0));
/// ```
pub fn flip(function: &Value) -> Result<Value, OperatorError> {
    let Some(native) = function.as_function() else {
        return Err(OperatorError::NotCallable {
            found: function.kind(),
        });
    };
    let native = Rc::clone(native);
    Ok(Value::function(native.arity(), move |context, arguments| {
        let mut swapped: SmallVec<[Value; 4]> = SmallVec::from(arguments);
        if swapped.len() >= 2 {
            swapped.swap(0, 1);
        }
        native.call(context, &swapped)
    }))
}

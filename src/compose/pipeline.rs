//! Right-to-left and left-to-right composition of function values.

use std::rc::Rc;

use crate::error::OperatorError;
use crate::value::{NativeFunction, Value};

fn collect_callables(functions: &[Value]) -> Result<Vec<Rc<NativeFunction>>, OperatorError> {
    functions
        .iter()
        .map(|function| {
            function
                .as_function()
                .map(Rc::clone)
                .ok_or(OperatorError::NotCallable {
                    found: function.kind(),
                })
        })
        .collect()
}

fn thread(callables: Vec<Rc<NativeFunction>>, arity: usize) -> Value {
    Value::function(arity, move |context, arguments| {
        let mut iterator = callables.iter();
        let mut current = match iterator.next() {
            Some(first) => first.call(context, arguments)?,
            None => arguments.first().cloned().unwrap_or(Value::Nil),
        };
        for function in iterator {
            current = function.call(context, std::slice::from_ref(&current))?;
        }
        Ok(current)
    })
}

/// Composes function values right-to-left: `compose([f, g])` applies `g`
/// first, then `f`.
///
/// The rightmost function receives the full argument list (and determines
/// the declared arity of the composition); each remaining function receives
/// the single threaded value. The caller's invocation context is forwarded
/// to every step. A step failure aborts the composition and propagates.
///
/// An empty slice composes to the identity on the first argument.
///
/// # Errors
///
/// [`OperatorError::NotCallable`] when any entry is not callable.
pub fn compose(functions: &[Value]) -> Result<Value, OperatorError> {
    let mut callables = collect_callables(functions)?;
    callables.reverse();
    let arity = callables.first().map_or(1, |first| first.arity());
    Ok(thread(callables, arity))
}

/// Composes function values left-to-right: `pipe([f, g])` applies `f`
/// first, then `g`.
///
/// The leftmost function receives the full argument list; the rest receive
/// the threaded value. See [`compose`] for the shared details.
///
/// # Errors
///
/// [`OperatorError::NotCallable`] when any entry is not callable.
pub fn pipe(functions: &[Value]) -> Result<Value, OperatorError> {
    let callables = collect_callables(functions)?;
    let arity = callables.first().map_or(1, |first| first.arity());
    Ok(thread(callables, arity))
}

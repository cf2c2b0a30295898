//! Collection operators: `map`, `filter`, `reduce`.
//!
//! All three operate on sequences (lists, text viewed as characters, or
//! array-like records) and take their callback as a first-class [`Value`].
//! A non-callable callback degrades per operator instead of erroring:
//! `map` returns a copy, `filter` returns an empty list, `reduce` returns
//! the initial value.
//!
//! Per-element failures are explicit [`CallFailure`](crate::error::CallFailure)
//! outcomes, never
//! unwinding, and each operator decides what a failure means:
//!
//! - `map` substitutes the failure into the output position
//! - `filter` excludes the element
//! - `reduce` aborts the fold early and returns the accumulator so far
//!
//! Callbacks are invoked with a `Nil` context and the arguments
//! `(element, index, collection)` (`reduce` prepends the accumulator).
//!
//! # Examples
//!
//! ```rust
//! use lodars::collection::map;
//! use lodars::{Value, list};
//!
//! let double = Value::function(1, |_, args| {
//!     let n = args[0].as_number().unwrap_or(0.0);
//!     Ok(Value::number(n * 2.0))
//! });
//!
//! assert_eq!(map(&list![1, 2, 3], &double).unwrap(), list![2, 4, 6]);
//! ```

use crate::error::OperatorError;
use crate::value::Value;

#[allow(clippy::cast_precision_loss)]
fn index_value(index: usize) -> Value {
    Value::number(index as f64)
}

fn sequence_length(collection: &Value) -> Result<usize, OperatorError> {
    collection
        .sequence_length()
        .ok_or(OperatorError::NotCollection {
            found: collection.kind(),
        })
}

/// Maps `iteratee` over every element of `collection`.
///
/// The output always has the same length as the input. A non-callable
/// `iteratee` returns a copy of the collection's present elements; an
/// element whose callback fails contributes a [`Value::Failure`] at its
/// position.
///
/// # Errors
///
/// [`OperatorError::NotCollection`] when `collection` is not a sequence.
///
/// # Examples
///
/// ```rust
/// use lodars::collection::map;
/// use lodars::{Value, list};
///
/// // Non-callable iteratees degrade to a copy.
/// let copy = map(&list![1, 2], &Value::text("not a function")).unwrap();
/// assert_eq!(copy, list![1, 2]);
/// ```
pub fn map(collection: &Value, iteratee: &Value) -> Result<Value, OperatorError> {
    let length = sequence_length(collection)?;
    let Some(function) = iteratee.as_function() else {
        return Ok(Value::list(collection.to_items().unwrap_or_default()));
    };

    let mut result = Vec::with_capacity(length);
    for index in 0..length {
        let element = collection.element_at(index);
        let arguments = [element, index_value(index), collection.clone()];
        let output = match function.call(&Value::Nil, &arguments) {
            Ok(value) => value,
            Err(failure) => Value::failure(failure),
        };
        result.push(output);
    }
    Ok(Value::list(result))
}

/// Keeps the elements of `collection` for which `predicate` answers truthy.
///
/// A non-callable `predicate` yields an empty list. An element whose
/// predicate fails is excluded.
///
/// # Errors
///
/// [`OperatorError::NotCollection`] when `collection` is not a sequence.
///
/// # Examples
///
/// ```rust
/// use lodars::collection::filter;
/// use lodars::{Value, list};
///
/// let even = Value::function(1, |_, args| {
///     let n = args[0].as_number().unwrap_or(0.0);
///     Ok(Value::bool(n % 2.0 == 0.0))
/// });
///
/// assert_eq!(filter(&list![1, 2, 3, 4], &even).unwrap(), list![2, 4]);
/// ```
pub fn filter(collection: &Value, predicate: &Value) -> Result<Value, OperatorError> {
    let length = sequence_length(collection)?;
    let Some(function) = predicate.as_function() else {
        return Ok(Value::list(Vec::new()));
    };

    let mut result = Vec::new();
    for index in 0..length {
        let element = collection.element_at(index);
        let arguments = [element.clone(), index_value(index), collection.clone()];
        if let Ok(verdict) = function.call(&Value::Nil, &arguments) {
            if verdict.is_truthy() {
                result.push(element);
            }
        }
    }
    Ok(Value::list(result))
}

/// Folds `collection` with `reducer`, seeded by `initial`.
///
/// With no `initial`, the first element seeds the fold. A non-callable
/// `reducer` returns the initial value (`Nil` when absent). A failing
/// reducer step aborts the fold early and returns the accumulator built so
/// far.
///
/// # Errors
///
/// - [`OperatorError::NotCollection`] when `collection` is not a sequence.
/// - [`OperatorError::EmptyReduceNoInitial`] when the sequence is empty and
///   no initial value was given.
///
/// # Examples
///
/// ```rust
/// use lodars::collection::reduce;
/// use lodars::{Value, list};
///
/// let add = Value::function(2, |_, args| {
///     let a = args[0].as_number().unwrap_or(0.0);
///     let b = args[1].as_number().unwrap_or(0.0);
///     Ok(Value::number(a + b))
/// });
///
/// let sum = reduce(&list![1, 2, 3, 4], &add, Some(Value::number(0.0))).unwrap();
/// assert_eq!(sum, Value::number(10.0));
///
/// // First element seeds the fold when no initial value is given.
/// let sum = reduce(&list![1, 2, 3], &add, None).unwrap();
/// assert_eq!(sum, Value::number(6.0));
/// ```
pub fn reduce(
    collection: &Value,
    reducer: &Value,
    initial: Option<Value>,
) -> Result<Value, OperatorError> {
    let length = sequence_length(collection)?;
    let Some(function) = reducer.as_function() else {
        return Ok(initial.unwrap_or(Value::Nil));
    };

    let (mut accumulator, start) = match initial {
        Some(seed) => (seed, 0),
        None if length == 0 => return Err(OperatorError::EmptyReduceNoInitial),
        None => (collection.element_at(0), 1),
    };

    for index in start..length {
        let element = collection.element_at(index);
        let arguments = [
            accumulator.clone(),
            element,
            index_value(index),
            collection.clone(),
        ];
        match function.call(&Value::Nil, &arguments) {
            Ok(next) => accumulator = next,
            Err(_) => break,
        }
    }
    Ok(accumulator)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CallFailure;
    use crate::{list, record};
    use std::cell::Cell;
    use std::rc::Rc;

    fn double() -> Value {
        Value::function(1, |_, args| {
            let n = args[0].as_number().unwrap_or(0.0);
            Ok(Value::number(n * 2.0))
        })
    }

    fn failing(message: &'static str) -> Value {
        Value::function(1, move |_, _| Err(CallFailure::new(message)))
    }

    #[test]
    fn test_map_passes_element_index_and_collection() {
        let seen = Rc::new(Cell::new(0));
        let observed = Rc::clone(&seen);
        let numbers = list![10, 20];
        let probe_target = numbers.clone();
        let probe = Value::function(3, move |context, args| {
            assert_eq!(*context, Value::Nil);
            assert!(args[2].shares_identity(&probe_target));
            observed.set(observed.get() + 1);
            Ok(args[1].clone())
        });

        assert_eq!(map(&numbers, &probe).unwrap(), list![0, 1]);
        assert_eq!(seen.get(), 2);
    }

    #[test]
    fn test_map_rejects_non_collections() {
        assert_eq!(
            map(&Value::Nil, &double()),
            Err(OperatorError::NotCollection { found: "nil" })
        );
        assert_eq!(
            map(&Value::number(3.0), &double()),
            Err(OperatorError::NotCollection { found: "number" })
        );
    }

    #[test]
    fn test_map_substitutes_failures() {
        let result = map(&list![1, 2], &failing("boom")).unwrap();
        let items = result.as_list().unwrap().borrow().clone();
        assert_eq!(items.len(), 2);
        assert!(items.iter().all(Value::is_failure));
    }

    #[test]
    fn test_map_over_array_like_holes_sees_nil() {
        let array_like = record! {"length" => 2, "0" => 1};
        let kinds = Value::function(1, |_, args| Ok(Value::text(args[0].kind())));
        assert_eq!(map(&array_like, &kinds).unwrap(), list!["number", "nil"]);
    }

    #[test]
    fn test_filter_uses_truthiness() {
        let identity = Value::function(1, |_, args| Ok(args[0].clone()));
        let mixed = list![0, 1, "", "x", false, true];
        assert_eq!(filter(&mixed, &identity).unwrap(), list![1, "x", true]);
    }

    #[test]
    fn test_filter_excludes_failing_elements() {
        let flaky = Value::function(1, |_, args| {
            let n = args[0].as_number().unwrap_or(0.0);
            if n == 2.0 {
                Err(CallFailure::new("no twos"))
            } else {
                Ok(Value::bool(true))
            }
        });
        assert_eq!(filter(&list![1, 2, 3], &flaky).unwrap(), list![1, 3]);
    }

    #[test]
    fn test_filter_non_callable_predicate_is_empty() {
        assert_eq!(
            filter(&list![1, 2], &Value::number(1.0)).unwrap(),
            list![]
        );
    }

    #[test]
    fn test_reduce_aborts_on_failure_keeping_accumulator() {
        let counting = Value::function(2, |_, args| {
            let accumulator = args[0].as_number().unwrap_or(0.0);
            let element = args[1].as_number().unwrap_or(0.0);
            if element > 2.0 {
                Err(CallFailure::new("too big"))
            } else {
                Ok(Value::number(accumulator + element))
            }
        });
        let result = reduce(&list![1, 2, 3, 4], &counting, Some(Value::number(0.0))).unwrap();
        assert_eq!(result, Value::number(3.0));
    }

    #[test]
    fn test_reduce_empty_without_initial() {
        let add = double();
        assert_eq!(
            reduce(&list![], &add, None),
            Err(OperatorError::EmptyReduceNoInitial)
        );
    }

    #[test]
    fn test_reduce_non_callable_reducer_returns_initial() {
        assert_eq!(
            reduce(&list![1, 2], &Value::Nil, Some(Value::number(9.0))).unwrap(),
            Value::number(9.0)
        );
        assert_eq!(reduce(&list![1, 2], &Value::Nil, None).unwrap(), Value::Nil);
    }

    #[test]
    fn test_operators_accept_text() {
        let identity = Value::function(1, |_, args| Ok(args[0].clone()));
        assert_eq!(map(&Value::text("ab"), &identity).unwrap(), list!["a", "b"]);
    }
}

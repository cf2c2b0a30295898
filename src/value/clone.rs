//! Deep, cycle-preserving structural copy.
//!
//! [`deep_clone`] produces an independent copy of a value: mutating the
//! original afterwards never affects the copy. Scalars, text and functions
//! pass through by reference (they are immutable or carry identity on
//! purpose); lists and records are copied element by element.
//!
//! Self-referential structures are handled with an "already copied" map
//! keyed by the original allocation's address. The copy is registered in
//! the map *before* its children are cloned, so a cycle resolves to the
//! copy's own handle instead of recursing forever, and the copy preserves
//! the cycle's shape.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::collections::HashMap;
use std::rc::Rc;

use super::{Value, array_like_length};

/// Deep-copies a value, preserving reference cycles.
///
/// Array-like records (records with an integral `"length"` field) are
/// normalized to lists of their present elements, mirroring how the
/// sequence snapshot treats them.
///
/// # Examples
///
/// ```rust
/// use lodars::value::deep_clone;
/// use lodars::{Value, list};
///
/// let original = list![1, 2];
/// let copy = deep_clone(&original);
///
/// original.as_list().unwrap().borrow_mut().push(Value::number(3.0));
/// assert_eq!(copy.sequence_length(), Some(2));
/// ```
///
/// ## Cycles
///
/// ```rust
/// use lodars::value::deep_clone;
/// use lodars::Value;
///
/// let cyclic = Value::record(std::iter::empty());
/// cyclic
///     .as_record()
///     .unwrap()
///     .borrow_mut()
///     .insert("self".to_string(), cyclic.clone());
///
/// let copy = deep_clone(&cyclic);
/// let inner = copy.as_record().unwrap().borrow()["self"].clone();
/// assert!(inner.shares_identity(&copy));
/// assert!(!copy.shares_identity(&cyclic));
/// ```
pub fn deep_clone(value: &Value) -> Value {
    clone_value(value, &mut HashMap::new())
}

fn clone_value(value: &Value, copied: &mut HashMap<usize, Value>) -> Value {
    match value {
        Value::Nil
        | Value::Bool(_)
        | Value::Number(_)
        | Value::Text(_)
        | Value::Function(_)
        | Value::Failure(_) => value.clone(),
        Value::List(items) => {
            let identity = Rc::as_ptr(items) as usize;
            if let Some(existing) = copied.get(&identity) {
                return existing.clone();
            }
            let copy = Rc::new(RefCell::new(Vec::with_capacity(items.borrow().len())));
            copied.insert(identity, Value::List(Rc::clone(&copy)));
            for element in items.borrow().iter() {
                let cloned = clone_value(element, copied);
                copy.borrow_mut().push(cloned);
            }
            Value::List(copy)
        }
        Value::Record(fields) => {
            let identity = Rc::as_ptr(fields) as usize;
            if let Some(existing) = copied.get(&identity) {
                return existing.clone();
            }
            let borrowed = fields.borrow();
            if let Some(length) = array_like_length(&borrowed) {
                // Array-likes come out as lists, present elements only.
                let copy = Rc::new(RefCell::new(Vec::with_capacity(length)));
                copied.insert(identity, Value::List(Rc::clone(&copy)));
                for index in 0..length {
                    if let Some(element) = borrowed.get(&index.to_string()) {
                        let cloned = clone_value(element, copied);
                        copy.borrow_mut().push(cloned);
                    }
                }
                Value::List(copy)
            } else {
                let copy = Rc::new(RefCell::new(BTreeMap::new()));
                copied.insert(identity, Value::Record(Rc::clone(&copy)));
                for (key, element) in borrowed.iter() {
                    let cloned = clone_value(element, copied);
                    copy.borrow_mut().insert(key.clone(), cloned);
                }
                Value::Record(copy)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{list, record};

    #[test]
    fn test_scalars_pass_through() {
        assert_eq!(deep_clone(&Value::Nil), Value::Nil);
        assert_eq!(deep_clone(&Value::number(1.5)), Value::number(1.5));
        assert_eq!(deep_clone(&Value::text("a")), Value::text("a"));
    }

    #[test]
    fn test_functions_pass_through_by_reference() {
        let function = Value::function(1, |_, args| Ok(args[0].clone()));
        let copy = deep_clone(&function);
        assert!(copy.shares_identity(&function));
    }

    #[test]
    fn test_nested_copy_is_independent() {
        let inner = list![1];
        let outer = Value::list(vec![inner.clone()]);
        let copy = deep_clone(&outer);

        inner.as_list().unwrap().borrow_mut().push(Value::number(2.0));
        assert_eq!(copy, Value::list(vec![list![1]]));
    }

    #[test]
    fn test_shared_substructure_stays_shared() {
        let shared = list![1];
        let outer = Value::list(vec![shared.clone(), shared]);
        let copy = deep_clone(&outer);

        let items = copy.as_list().unwrap().borrow();
        assert!(items[0].shares_identity(&items[1]));
        assert!(!items[0].shares_identity(&outer.as_list().unwrap().borrow()[0]));
    }

    #[test]
    fn test_array_like_record_becomes_list() {
        let array_like = record! {"length" => 3, "0" => "a", "2" => "c"};
        let copy = deep_clone(&array_like);
        assert_eq!(copy, list!["a", "c"]);
    }

    #[test]
    fn test_self_referential_list() {
        let cyclic = Value::list(Vec::new());
        cyclic.as_list().unwrap().borrow_mut().push(cyclic.clone());

        let copy = deep_clone(&cyclic);
        let inner = copy.as_list().unwrap().borrow()[0].clone();
        assert!(inner.shares_identity(&copy));
        assert!(!copy.shares_identity(&cyclic));
    }
}

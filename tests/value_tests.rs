//! Integration tests for the value model and deep copy.

use lodars::value::deep_clone;
use lodars::{Value, list, record};

// =============================================================================
// Deep copy
// =============================================================================

mod deep_copy_tests {
    use super::*;

    #[test]
    fn test_copy_is_independent_of_the_original() {
        let original = list![1, 2, 3];
        let copy = deep_clone(&original);

        original
            .as_list()
            .unwrap()
            .borrow_mut()
            .push(Value::number(4.0));

        assert_eq!(copy, list![1, 2, 3]);
        assert_eq!(original, list![1, 2, 3, 4]);
    }

    #[test]
    fn test_nested_structures_are_copied_recursively() {
        let inner = record! {"a" => 1};
        let original = Value::list(vec![inner.clone(), list![2]]);
        let copy = deep_clone(&original);

        inner
            .as_record()
            .unwrap()
            .borrow_mut()
            .insert("a".to_string(), Value::number(99.0));

        let copied_inner = copy.as_list().unwrap().borrow()[0].clone();
        assert_eq!(copied_inner, record! {"a" => 1});
    }

    #[test]
    fn test_functions_keep_their_identity() {
        let function = Value::function(1, |_, args| Ok(args[0].clone()));
        let original = Value::list(vec![function.clone()]);
        let copy = deep_clone(&original);

        let copied = copy.as_list().unwrap().borrow()[0].clone();
        assert!(copied.shares_identity(&function));
    }

    #[test]
    fn test_self_referential_record_does_not_hang() {
        let cyclic = Value::record(std::iter::empty());
        cyclic
            .as_record()
            .unwrap()
            .borrow_mut()
            .insert("self".to_string(), cyclic.clone());

        let copy = deep_clone(&cyclic);

        let inner = copy.as_record().unwrap().borrow()["self"].clone();
        assert!(inner.shares_identity(&copy));
        assert!(!copy.shares_identity(&cyclic));
        assert_eq!(copy, cyclic);
    }

    #[test]
    fn test_mutual_cycle_preserves_shape() {
        let first = Value::record(std::iter::empty());
        let second = Value::record(std::iter::empty());
        first
            .as_record()
            .unwrap()
            .borrow_mut()
            .insert("other".to_string(), second.clone());
        second
            .as_record()
            .unwrap()
            .borrow_mut()
            .insert("other".to_string(), first.clone());

        let copy = deep_clone(&first);

        let copied_second = copy.as_record().unwrap().borrow()["other"].clone();
        let back = copied_second.as_record().unwrap().borrow()["other"].clone();
        assert!(back.shares_identity(&copy));
    }
}

// =============================================================================
// Sequence views
// =============================================================================

mod sequence_tests {
    use super::*;

    #[test]
    fn test_list_text_and_array_like_are_sequences() {
        assert!(list![1].is_sequence());
        assert!(Value::text("ab").is_sequence());
        assert!(record! {"length" => 1, "0" => "a"}.is_sequence());
        assert!(!Value::Nil.is_sequence());
        assert!(!record! {"a" => 1}.is_sequence());
    }

    #[test]
    fn test_array_like_iteration_and_snapshot_disagree_on_holes() {
        let holes = record! {"length" => 3, "0" => 1, "2" => 3};
        assert_eq!(holes.element_at(1), Value::Nil);
        assert_eq!(holes.to_items().unwrap().len(), 2);
    }
}

// =============================================================================
// Equality and formatting
// =============================================================================

mod equality_tests {
    use super::*;

    #[test]
    fn test_heterogeneous_lists_compare_structurally() {
        assert_eq!(list![1, "a", true], list![1, "a", true]);
        assert_ne!(list![1, "a", true], list![1, "a", false]);
    }

    #[test]
    fn test_cyclic_values_compare_without_hanging() {
        let make_cycle = || {
            let value = Value::list(Vec::new());
            value.as_list().unwrap().borrow_mut().push(value.clone());
            value
        };
        assert_eq!(make_cycle(), make_cycle());
    }

    #[test]
    fn test_debug_output_is_cycle_safe() {
        let cyclic = Value::list(Vec::new());
        cyclic.as_list().unwrap().borrow_mut().push(cyclic.clone());
        cyclic
            .as_list()
            .unwrap()
            .borrow_mut()
            .push(Value::number(2.0));

        assert_eq!(format!("{cyclic:?}"), "[<cycle>, 2.0]");
    }
}

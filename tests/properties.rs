//! Property tests comparing `Stack` against a plain `Vec` model.

use lifo::Stack;
use proptest::prelude::*;

fn arb_values() -> impl Strategy<Value = Vec<i32>> {
    prop::collection::vec(-50..50i32, 0..64)
}

fn arb_capacity() -> impl Strategy<Value = usize> {
    0..8usize
}

#[derive(Debug, Clone)]
enum Op {
    Push(i32),
    Pop,
    PopMultiple(usize),
    Clear,
    Reverse,
}

fn arb_op() -> impl Strategy<Value = Op> {
    prop_oneof![
        4 => (-50..50i32).prop_map(Op::Push),
        2 => Just(Op::Pop),
        1 => (0..5usize).prop_map(Op::PopMultiple),
        1 => Just(Op::Clear),
        1 => Just(Op::Reverse),
    ]
}

proptest! {
    #[test]
    fn pops_reverse_pushes(values in arb_values(), capacity in arb_capacity()) {
        let mut stack = Stack::with_capacity(capacity);
        stack.push_multiple(values.iter().copied());

        prop_assert_eq!(stack.len(), values.len());
        prop_assert_eq!(stack.top().ok(), values.last());

        let mut popped = Vec::new();
        while let Ok(value) = stack.pop() {
            popped.push(value);
        }

        let expected: Vec<i32> = values.iter().rev().copied().collect();
        prop_assert_eq!(popped, expected);
    }

    #[test]
    fn growth_is_transparent(capacity in 1..16usize) {
        let mut stack = Stack::with_capacity(capacity);
        stack.push_multiple(0..capacity);

        let before = stack.capacity();
        stack.push(capacity);

        prop_assert!(stack.capacity() > before);
        prop_assert!(stack.len() <= stack.capacity());

        let popped: Vec<usize> = stack.into_iter().collect();
        let expected: Vec<usize> = (0..=capacity).rev().collect();
        prop_assert_eq!(popped, expected);
    }

    #[test]
    fn pop_into_round_trip(values in arb_values()) {
        let mut stack = Stack::new();
        stack.push_multiple(values.iter().copied());

        let mut out = vec![0; values.len()];
        prop_assert_eq!(stack.pop_into(&mut out), values.len());
        prop_assert!(stack.is_empty());

        let expected: Vec<i32> = values.iter().rev().copied().collect();
        prop_assert_eq!(out, expected);
    }

    #[test]
    fn find_matches_nearest_to_top(values in arb_values(), needle in -50..50i32) {
        let stack: Stack<i32> = values.iter().copied().collect();
        let expected = values.iter().rev().position(|value| *value == needle);

        prop_assert_eq!(stack.find(&needle), expected);
    }

    #[test]
    fn copies_never_alias(values in arb_values(), extra in any::<i32>()) {
        let original: Stack<i32> = values.iter().copied().collect();
        let mut copy = original.clone();
        copy.push(extra);
        copy.reverse();

        prop_assert_eq!(original.len(), values.len());
        prop_assert_eq!(original.iter().rev().copied().collect::<Vec<_>>(), values);
    }

    #[test]
    fn matches_vec_model(capacity in arb_capacity(), ops in prop::collection::vec(arb_op(), 0..128)) {
        let mut stack = Stack::with_capacity(capacity);
        let mut model: Vec<i32> = Vec::new();
        let mut last_capacity = stack.capacity();

        for op in ops {
            match op {
                Op::Push(value) => {
                    stack.push(value);
                    model.push(value);
                }
                Op::Pop => {
                    prop_assert_eq!(stack.pop().ok(), model.pop());
                }
                Op::PopMultiple(count) => {
                    let expected = count.min(model.len());
                    model.truncate(model.len() - expected);
                    prop_assert_eq!(stack.pop_multiple(count), expected);
                }
                Op::Clear => {
                    stack.clear();
                    model.clear();
                }
                Op::Reverse => {
                    stack.reverse();
                    model.reverse();
                }
            }

            prop_assert!(stack.capacity() >= last_capacity);
            last_capacity = stack.capacity();

            prop_assert_eq!(stack.len(), model.len());
            prop_assert_eq!(stack.is_empty(), model.is_empty());
            prop_assert_eq!(stack.top().ok(), model.last());
        }
    }
}

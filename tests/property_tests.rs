//! Property tests for the algebraic laws predicates must uphold.

use proptest::prelude::*;

use obscura::{Compare, Predicate, Value};

fn arb_comparable() -> impl Strategy<Value = Value> {
    prop_oneof![
        any::<i64>().prop_map(Value::Int),
        any::<f64>().prop_map(|f| Value::Float(if f.is_nan() { 0.0 } else { f })),
    ]
}

fn arb_compare_op() -> impl Strategy<Value = Compare> {
    prop_oneof![
        Just(Compare::Eq),
        Just(Compare::Neq),
        Just(Compare::Lt),
        Just(Compare::Lte),
        Just(Compare::Gt),
        Just(Compare::Gte),
    ]
}

fn comparison(op: Compare, reference: Value) -> Predicate {
    match op {
        Compare::Eq => Predicate::eq(reference),
        Compare::Neq => Predicate::neq(reference),
        Compare::Lt => Predicate::lt(reference),
        Compare::Lte => Predicate::lte(reference),
        Compare::Gt => Predicate::gt(reference),
        Compare::Gte => Predicate::gte(reference),
    }
}

proptest! {
    #[test]
    fn prop_negation_complements_comparison_truth(
        op in arb_compare_op(),
        reference in arb_comparable(),
        candidate in arb_comparable(),
    ) {
        let mut predicate = comparison(op, reference.clone());
        let mut negated = predicate.negated();
        prop_assert_eq!(
            negated.test(&candidate).unwrap(),
            !predicate.test(&candidate).unwrap()
        );
    }

    #[test]
    fn prop_double_negation_is_identity(
        op in arb_compare_op(),
        reference in arb_comparable(),
    ) {
        let predicate = comparison(op, reference);
        prop_assert_eq!(predicate.negated().negated(), predicate);
    }

    #[test]
    fn prop_within_without_partition(
        set in prop::collection::vec(any::<i64>(), 1..8),
        candidate in any::<i64>(),
    ) {
        let mut within = Predicate::within(set.clone());
        let mut without = Predicate::without(set.clone());
        let member = set.contains(&candidate);
        prop_assert_eq!(within.test(&Value::Int(candidate)).unwrap(), member);
        prop_assert_eq!(without.test(&Value::Int(candidate)).unwrap(), !member);
        prop_assert_eq!(Predicate::without(set.clone()).negated(), Predicate::within(set));
    }

    #[test]
    fn prop_membership_equality_is_insertion_order_free(
        set in prop::collection::vec(any::<i64>(), 2..8),
    ) {
        let mut reversed = set.clone();
        reversed.reverse();
        let a = Predicate::within(set);
        let b = Predicate::within(reversed);
        prop_assert_eq!(a.hash_code(), b.hash_code());
        prop_assert_eq!(a, b);
    }

    #[test]
    fn prop_between_bounds(low in -1000i64..1000, span in 1i64..1000, candidate in -2000i64..2000) {
        let high = low + span;
        let mut between = Predicate::between(low, high);
        let expected = candidate >= low && candidate < high;
        prop_assert_eq!(between.test(&Value::Int(candidate)).unwrap(), expected);
        // Endpoints: low-inclusive, high-exclusive.
        prop_assert!(between.test(&Value::Int(low)).unwrap());
        prop_assert!(!between.test(&Value::Int(high)).unwrap());
    }

    #[test]
    fn prop_inside_is_strictly_open(low in -1000i64..1000, span in 1i64..1000, candidate in -2000i64..2000) {
        let high = low + span;
        let mut inside = Predicate::inside(low, high);
        let expected = candidate > low && candidate < high;
        prop_assert_eq!(inside.test(&Value::Int(candidate)).unwrap(), expected);
        prop_assert!(!inside.test(&Value::Int(low)).unwrap());
        prop_assert!(!inside.test(&Value::Int(high)).unwrap());
    }

    #[test]
    fn prop_outside_complements_inside_off_the_endpoints(
        low in -1000i64..1000,
        span in 1i64..1000,
        candidate in -2000i64..2000,
    ) {
        let high = low + span;
        prop_assume!(candidate != low && candidate != high);
        let mut inside = Predicate::inside(low, high);
        let mut outside = Predicate::outside(low, high);
        prop_assert_eq!(
            outside.test(&Value::Int(candidate)).unwrap(),
            !inside.test(&Value::Int(candidate)).unwrap()
        );
    }

    #[test]
    fn prop_conjunction_truth_is_order_independent(
        a_op in arb_compare_op(),
        a_ref in any::<i64>(),
        b_op in arb_compare_op(),
        b_ref in any::<i64>(),
        candidate in any::<i64>(),
    ) {
        let a = comparison(a_op, Value::Int(a_ref));
        let b = comparison(b_op, Value::Int(b_ref));
        let mut forward = a.clone().and(b.clone());
        let mut backward = b.clone().or(a.clone()); // mixed connectives kept distinct
        let mut forward_or = a.clone().or(b.clone());
        let mut backward_and = b.and(a);
        let v = Value::Int(candidate);
        prop_assert_eq!(forward.test(&v).unwrap(), backward_and.test(&v).unwrap());
        prop_assert_eq!(forward_or.test(&v).unwrap(), backward.test(&v).unwrap());
    }

    #[test]
    fn prop_de_morgan_over_conjunctions(
        a_op in arb_compare_op(),
        a_ref in any::<i64>(),
        b_op in arb_compare_op(),
        b_ref in any::<i64>(),
        candidate in any::<i64>(),
    ) {
        let a = comparison(a_op, Value::Int(a_ref));
        let b = comparison(b_op, Value::Int(b_ref));
        let v = Value::Int(candidate);

        let mut tree = a.clone().and(b.clone());
        let mut negated = tree.negated();
        prop_assert_eq!(negated.test(&v).unwrap(), !tree.test(&v).unwrap());

        let mut in_place = a.or(b);
        let expected = !in_place.test(&v).unwrap();
        in_place.negate_in_place();
        prop_assert_eq!(in_place.test(&v).unwrap(), expected);
    }

    #[test]
    fn prop_equal_predicates_hash_alike(
        op in arb_compare_op(),
        reference in arb_comparable(),
    ) {
        let a = comparison(op, reference.clone());
        let b = comparison(op, reference);
        prop_assert_eq!(a.hash_code(), b.hash_code());
        prop_assert_eq!(a, b);
    }
}

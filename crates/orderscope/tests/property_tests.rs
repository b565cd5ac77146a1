//! Property-based tests for the Orderscope engine.
//!
//! These tests use proptest to generate random order collections and
//! verify that thresholds and segments keep their invariants.
//!
//! # Testing Philosophy
//!
//! Property-based tests verify:
//! 1. **No panics**: the engine never crashes on any collection
//! 2. **Determinism**: same input always produces same output
//! 3. **Order independence**: thresholds ignore record order
//! 4. **Invariants**: fence and segment properties always hold
//!
//! # Running Property Tests
//!
//! ```bash
//! # Run all property tests
//! cargo test -p orderscope --test property_tests
//!
//! # Run with more cases (slower but more thorough)
//! PROPTEST_CASES=10000 cargo test -p orderscope --test property_tests
//! ```

use proptest::prelude::*;

use orderscope::{
    OrderRecord, Segment, ThresholdSet, classify, compute_thresholds, count_by_risk_band,
    monthly_lead_times,
};

// =============================================================================
// Test Strategies
// =============================================================================

/// A delivered order with both metrics present.
fn complete_order() -> impl Strategy<Value = OrderRecord> {
    ("[a-f0-9]{8}", 0i64..120, 0.0f64..500.0).prop_map(|(id, days, freight)| {
        OrderRecord::new(id)
            .with_delivery_days(days)
            .with_freight(freight)
    })
}

/// A non-empty collection of complete orders.
fn collection() -> impl Strategy<Value = Vec<OrderRecord>> {
    prop::collection::vec(complete_order(), 1..60)
}

/// An order that may lack either metric.
fn partial_order() -> impl Strategy<Value = OrderRecord> {
    (
        "[a-f0-9]{8}",
        prop::option::of(0i64..120),
        prop::option::of(0.0f64..500.0),
    )
        .prop_map(|(id, days, freight)| {
            let mut order = OrderRecord::new(id);
            if let Some(days) = days {
                order = order.with_delivery_days(days);
            }
            if let Some(freight) = freight {
                order = order.with_freight(freight);
            }
            order
        })
}

fn thresholds_of(orders: &[OrderRecord]) -> ThresholdSet {
    compute_thresholds(orders).expect("non-empty collection")
}

// =============================================================================
// Threshold Properties
// =============================================================================

proptest! {
    #[test]
    fn warning_is_fixed_ratio_of_limit(orders in collection()) {
        let t = thresholds_of(&orders);
        prop_assert_eq!(t.freight.warning, 0.8 * t.freight.limit);
        prop_assert_eq!(t.delivery.warning, 0.8 * t.delivery.limit);
    }

    #[test]
    fn limit_is_not_below_upper_quartile(orders in collection()) {
        let t = thresholds_of(&orders);
        prop_assert!(t.freight.limit >= t.freight.q3);
        prop_assert!(t.delivery.limit >= t.delivery.q3);
        prop_assert!(t.freight.q3 >= t.freight.q1);
        prop_assert!(t.delivery.q3 >= t.delivery.q1);
    }

    #[test]
    fn thresholds_are_deterministic(orders in collection()) {
        let first = thresholds_of(&orders);
        let second = thresholds_of(&orders);
        prop_assert_eq!(first, second);
    }

    #[test]
    fn thresholds_ignore_record_order(orders in collection()) {
        let mut reversed = orders.clone();
        reversed.reverse();
        prop_assert_eq!(thresholds_of(&orders), thresholds_of(&reversed));
    }

    #[test]
    fn partial_collections_never_panic(orders in prop::collection::vec(partial_order(), 0..40)) {
        // Either a threshold set or an EmptyInput error; never a panic.
        if let Ok(t) = compute_thresholds(&orders) {
            for order in &orders {
                let _ = classify(order, &t);
            }
            let _ = count_by_risk_band(&orders, &t);
        }
    }
}

// =============================================================================
// Segment Properties
// =============================================================================

proptest! {
    #[test]
    fn every_complete_order_gets_one_segment(orders in collection()) {
        let t = thresholds_of(&orders);
        for order in &orders {
            let segment = classify(order, &t).expect("complete order");
            prop_assert!(Segment::ALL.contains(&segment));
        }
    }

    #[test]
    fn far_below_warning_is_normal(orders in collection()) {
        let t = thresholds_of(&orders);
        prop_assume!(t.freight.warning > 1.0 && t.delivery.warning > 1.0);

        let calm = OrderRecord::new("calm").with_delivery_days(0).with_freight(0.0);
        prop_assert_eq!(classify(&calm, &t).unwrap(), Segment::Normal);
    }

    #[test]
    fn above_both_limits_is_worst_case(orders in collection()) {
        let t = thresholds_of(&orders);
        let days = t.delivery.limit.floor() as i64 + 1;
        let extreme = OrderRecord::new("extreme")
            .with_delivery_days(days)
            .with_freight(t.freight.limit + 1.0);
        prop_assert_eq!(classify(&extreme, &t).unwrap(), Segment::WorstCase);
    }

    #[test]
    fn worst_case_count_matches_segment(orders in collection()) {
        let t = thresholds_of(&orders);
        let bands = count_by_risk_band(&orders, &t);
        let worst = orders
            .iter()
            .filter(|o| classify(o, &t).unwrap() == Segment::WorstCase)
            .count();
        prop_assert_eq!(bands.worst_case, worst);
    }
}

// =============================================================================
// Lead Time Properties
// =============================================================================

proptest! {
    #[test]
    fn lead_times_skip_incomplete_orders(orders in collection()) {
        // Generated orders carry no timestamps at all.
        prop_assert!(monthly_lead_times(&orders).is_empty());
    }
}

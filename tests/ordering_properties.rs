//! Property-based tests for the row ordering pipeline.
//!
//! Tests validate:
//! 1. The order is exactly the set of observed addresses, without duplicates
//! 2. Evenly assigned positions are spaced by exactly one row gap
//! 3. The canvas height has a floor and covers every row
//! 4. Re-running on an applied layout reproduces it exactly
//! 5. An external order wins over a reusable prior layout

use arcrows::layout::{
    apply_to_state, compute_ordering, LayoutState, OrderSource, OrderingConfig, MIN_CANVAS_HEIGHT,
};
use arcrows::model::{Address, Record};
use proptest::prelude::*;
use std::collections::HashSet;

// ===== Arbitrary Strategies =====

/// Strategy for an optional address field: mostly small-pool hosts, sometimes empty or missing.
fn arb_field() -> impl Strategy<Value = Option<String>> {
    prop_oneof![
        6 => (0u8..12).prop_map(|n| Some(format!("10.0.0.{n}"))),
        1 => Just(Some(String::new())),
        1 => Just(None::<String>),
    ]
}

fn arb_record() -> impl Strategy<Value = Record> {
    (arb_field(), arb_field()).prop_map(|(src_ip, dst_ip)| Record { src_ip, dst_ip })
}

fn arb_records() -> impl Strategy<Value = Vec<Record>> {
    prop::collection::vec(arb_record(), 0..40)
}

/// Integer-valued pixel amounts keep the float arithmetic exact.
fn arb_pixels() -> impl Strategy<Value = f64> {
    (0u32..200).prop_map(f64::from)
}

fn arb_external_order() -> impl Strategy<Value = Vec<Address>> {
    prop::collection::vec(
        (0u8..16).prop_map(|n| Address::new(format!("10.0.0.{n}")).unwrap()),
        1..10,
    )
}

fn observed(records: &[Record]) -> HashSet<Address> {
    records
        .iter()
        .flat_map(|r| [r.source(), r.destination()])
        .flatten()
        .collect()
}

// ===== Property 1: Order covers the universe exactly once =====

proptest! {
    #[test]
    fn order_is_unique_and_matches_observed(records in arb_records()) {
        let result = compute_ordering(&records, &OrderingConfig::new());

        let as_set: HashSet<Address> = result.order.iter().cloned().collect();
        prop_assert_eq!(as_set.len(), result.order.len(), "order has duplicates");
        prop_assert_eq!(as_set, observed(&records));
        prop_assert_eq!(result.positions.len(), result.order.len());
        for addr in &result.order {
            prop_assert!(result.positions.contains_key(addr));
        }
    }

    #[test]
    fn external_order_still_covers_universe(
        records in arb_records(),
        external in arb_external_order(),
    ) {
        let config = OrderingConfig::new().with_external_order(&external);
        let result = compute_ordering(&records, &config);

        let as_set: HashSet<Address> = result.order.iter().cloned().collect();
        prop_assert_eq!(as_set.len(), result.order.len());
        prop_assert_eq!(as_set, observed(&records));
    }
}

// ===== Property 2: Position spacing =====

proptest! {
    #[test]
    fn positions_are_spaced_by_row_gap(
        records in arb_records(),
        row_gap in arb_pixels(),
        top_padding in arb_pixels(),
    ) {
        let config = OrderingConfig::new()
            .with_row_gap(row_gap)
            .with_top_padding(top_padding);
        let result = compute_ordering(&records, &config);

        for (i, addr) in result.order.iter().enumerate() {
            prop_assert_eq!(result.positions[addr], top_padding + row_gap * i as f64);
        }
        for pair in result.order.windows(2) {
            prop_assert!(result.positions[&pair[0]] <= result.positions[&pair[1]]);
        }
    }

    #[test]
    fn sorted_order_ranks_by_count_then_address(records in arb_records()) {
        let result = compute_ordering(&records, &OrderingConfig::new());
        prop_assert_eq!(result.source, OrderSource::Sorted);

        for pair in result.order.windows(2) {
            let (a, b) = (&pair[0], &pair[1]);
            let (ca, cb) = (result.counts.get(a.as_str()), result.counts.get(b.as_str()));
            prop_assert!(ca > cb || (ca == cb && a < b), "{} ({}) before {} ({})", a, ca, b, cb);
        }
    }
}

// ===== Property 3: Canvas height =====

proptest! {
    #[test]
    fn canvas_height_has_floor_and_covers_rows(
        records in arb_records(),
        row_gap in arb_pixels(),
        top_padding in arb_pixels(),
        marker_radius in arb_pixels(),
    ) {
        let config = OrderingConfig::new()
            .with_row_gap(row_gap)
            .with_top_padding(top_padding)
            .with_marker_radius(marker_radius);
        let result = compute_ordering(&records, &config);

        prop_assert!(result.canvas_height >= MIN_CANVAS_HEIGHT);
        if !result.order.is_empty() {
            let needed = result.extent.max + row_gap + marker_radius + top_padding;
            prop_assert!(result.canvas_height >= needed);
        }
    }
}

// ===== Property 4: Reuse is idempotent =====

proptest! {
    #[test]
    fn applied_layout_is_reproduced(records in arb_records()) {
        let mut state = LayoutState::default();
        let first = compute_ordering(&records, &OrderingConfig::new().with_state(&state));
        apply_to_state(&mut state, &first);

        let second = compute_ordering(&records, &OrderingConfig::new().with_state(&state));
        prop_assert_eq!(&second.order, &first.order);
        prop_assert_eq!(&second.positions, &first.positions);
        prop_assert_eq!(second.canvas_height, first.canvas_height);

        apply_to_state(&mut state, &second);
        let third = compute_ordering(&records, &OrderingConfig::new().with_state(&state));
        prop_assert_eq!(&third.order, &first.order);
    }
}

// ===== Property 5: External order beats a reusable prior layout =====

proptest! {
    #[test]
    fn external_order_wins_over_prior_layout(
        records in arb_records(),
        external in arb_external_order(),
    ) {
        let mut state = LayoutState::default();
        let prior = compute_ordering(&records, &OrderingConfig::new());
        apply_to_state(&mut state, &prior);

        let config = OrderingConfig::new()
            .with_state(&state)
            .with_external_order(&external);
        let result = compute_ordering(&records, &config);
        prop_assert_eq!(result.source, OrderSource::External);

        // Filtered external order comes first, in its own relative order
        let universe = observed(&records);
        let mut expected: Vec<Address> = Vec::new();
        for addr in &external {
            if universe.contains(addr) && !expected.contains(addr) {
                expected.push(addr.clone());
            }
        }
        prop_assert_eq!(&result.order[..expected.len()], &expected[..]);
    }
}

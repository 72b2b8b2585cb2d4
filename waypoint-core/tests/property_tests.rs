//! Property-based tests for the route store and the suggestion list.
//!
//! # Invariants tested
//!
//! - **Uniqueness:** re-adding any address already in the route fails and
//!   leaves the route unchanged.
//! - **Swap is a permutation:** a swap exchanges exactly two elements and
//!   applying it twice restores the original order.
//! - **Candidate cap:** admissible results are kept in provider order and
//!   truncated to the cap.
//! - **Mode filtering:** city lists hold only localities and provinces.
//! - **Highlight bounds:** arrow keys keep the highlight within the list or
//!   on "nothing highlighted".

use proptest::prelude::*;
use waypoint_core::test_support::geo_result;
use waypoint_core::{
    ActiveField, CandidateListController, CoordinatePair, DEFAULT_CANDIDATE_CAP, GeoKind,
    GeoResult, RouteStore, Waypoint,
};

const KINDS: [GeoKind; 5] = [
    GeoKind::Locality,
    GeoKind::Province,
    GeoKind::Street,
    GeoKind::House,
    GeoKind::Country,
];

fn route_of(count: usize) -> RouteStore {
    let mut route = RouteStore::default();
    for i in 0..count {
        let lon = f64::from(u32::try_from(i).unwrap_or(u32::MAX));
        route
            .add(Waypoint::new(
                CoordinatePair::new(lon, 50.0),
                format!("Street {i}"),
            ))
            .unwrap_or_else(|err| panic!("generated addresses are unique: {err}"));
    }
    route
}

fn results_of(kinds: &[usize]) -> Vec<GeoResult> {
    kinds
        .iter()
        .enumerate()
        .map(|(i, kind)| {
            let name = format!("result {i}");
            geo_result(&name, &name, KINDS[kind % KINDS.len()], 37.6)
        })
        .collect()
}

fn accept(field: ActiveField, results: Vec<GeoResult>) -> CandidateListController {
    let mut controller = CandidateListController::default();
    let (ticket, _) = controller.issue_query(field, "query", None);
    assert!(controller.accept_response(ticket, results, field, "query"));
    controller
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Property: adding any existing address fails and changes nothing.
    #[test]
    fn duplicate_add_never_grows_route(count in 1_usize..12, pick in any::<prop::sample::Index>()) {
        let mut route = route_of(count);
        let before = route.snapshot();
        let existing = before.waypoints()[pick.index(count)].clone();

        let err = route.add(existing.clone()).expect_err("duplicate must fail");

        prop_assert_eq!(err.address, existing.address);
        prop_assert_eq!(route.snapshot().len(), count);
        prop_assert!(route.snapshot().same_identity(&before));
    }

    /// Property: a swap exchanges exactly the two positions and is an
    /// involution.
    #[test]
    fn swap_is_an_involutive_permutation(
        count in 2_usize..12,
        first in any::<prop::sample::Index>(),
        second in any::<prop::sample::Index>(),
    ) {
        let (i, j) = (first.index(count), second.index(count));
        let mut route = route_of(count);
        let original = route.snapshot();

        let swapped = original.swapped(i, j).expect("indices in range");
        route.reorder(swapped).expect("swap keeps addresses unique");
        let once = route.snapshot();
        for (k, waypoint) in once.waypoints().iter().enumerate() {
            let source = if k == i { j } else if k == j { i } else { k };
            prop_assert_eq!(waypoint, &original.waypoints()[source]);
        }

        let back = once.swapped(i, j).expect("indices in range");
        route.reorder(back).expect("swap keeps addresses unique");
        let twice = route.snapshot();
        prop_assert_eq!(twice.waypoints(), original.waypoints());
    }

    /// Property: address lists keep every result in order up to the cap.
    #[test]
    fn address_list_is_truncated_prefix(kinds in prop::collection::vec(0_usize..5, 0..40)) {
        let results = results_of(&kinds);
        let controller = accept(ActiveField::Address, results.clone());
        let names: Vec<&str> = controller
            .list()
            .entries()
            .iter()
            .map(|candidate| candidate.name.as_str())
            .collect();
        let expected: Vec<&str> = results
            .iter()
            .take(DEFAULT_CANDIDATE_CAP)
            .map(|result| result.name.as_str())
            .collect();
        prop_assert_eq!(names, expected);
    }

    /// Property: city lists hold only admissible kinds, in provider order.
    #[test]
    fn city_list_is_filtered_then_truncated(kinds in prop::collection::vec(0_usize..5, 0..40)) {
        let results = results_of(&kinds);
        let controller = accept(ActiveField::City, results.clone());
        let expected: Vec<String> = results
            .into_iter()
            .filter(|result| matches!(result.kind, GeoKind::Locality | GeoKind::Province))
            .take(DEFAULT_CANDIDATE_CAP)
            .map(|result| result.name)
            .collect();
        let names: Vec<String> = controller
            .list()
            .entries()
            .iter()
            .map(|candidate| candidate.name.clone())
            .collect();
        prop_assert_eq!(names, expected);
    }

    /// Property: any sequence of arrow moves keeps the highlight in bounds.
    #[test]
    fn highlight_stays_in_bounds(
        len in 0_usize..15,
        moves in prop::collection::vec(any::<bool>(), 0..60),
    ) {
        let mut controller = accept(ActiveField::Address, results_of(&vec![2; len]));
        let shown = controller.list().len();
        for down in moves {
            if down {
                controller.move_down();
            } else {
                controller.move_up();
            }
            if let Some(index) = controller.list().highlight() {
                prop_assert!(index < shown);
            }
        }
    }
}

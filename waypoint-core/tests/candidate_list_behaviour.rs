#![expect(
    clippy::expect_used,
    reason = "behaviour tests use expect for readable failures"
)]

//! Behavioural tests for the suggestion list: staleness, filtering,
//! truncation and keyboard navigation.

use std::cell::RefCell;

use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use waypoint_core::test_support::geo_result;
use waypoint_core::{
    ActiveField, AddressBar, BarEffect, GeoKind, GeoResult, Key, KeyEvent, QueryTicket,
    RouteStore,
};

/// World state for suggestion-list scenarios.
#[derive(Debug, Default)]
struct ListWorld {
    bar: RefCell<AddressBar>,
    route: RefCell<RouteStore>,
    tickets: RefCell<Vec<QueryTicket>>,
}

#[fixture]
fn world() -> ListWorld {
    ListWorld::default()
}

fn press(world: &ListWorld, field: ActiveField, key: Key, text: &str) -> Option<BarEffect> {
    world
        .bar
        .borrow_mut()
        .handle_key(
            &KeyEvent::new(field, key, text),
            &mut world.route.borrow_mut(),
        )
        .expect("key handled")
}

fn query(world: &ListWorld, field: ActiveField, text: &str) {
    match press(world, field, Key::Other, text) {
        Some(BarEffect::Query(ticket, _)) => world.tickets.borrow_mut().push(ticket),
        other => panic!("expected a query, got {other:?}"),
    }
}

fn ticket(world: &ListWorld, position: usize) -> QueryTicket {
    *world
        .tickets
        .borrow()
        .get(position)
        .expect("query was issued")
}

fn streets(count: usize) -> Vec<GeoResult> {
    (0..count)
        .map(|i| {
            let name = format!("result {i}");
            geo_result(&name, &format!("Russia, {name}"), GeoKind::Street, 37.6)
        })
        .collect()
}

fn respond(world: &ListWorld, position: usize, results: Vec<GeoResult>) {
    let ticket = ticket(world, position);
    world.bar.borrow_mut().apply_response(ticket, Ok(results));
}

// --- Given steps ---

#[given("an address query for Stre")]
fn address_query(world: &ListWorld) {
    query(world, ActiveField::Address, "Stre");
}

#[given("a newer address query for Street")]
fn newer_address_query(world: &ListWorld) {
    query(world, ActiveField::Address, "Street");
}

#[given("the address field is emptied with Backspace")]
fn emptied_address(world: &ListWorld) {
    assert!(press(world, ActiveField::Address, Key::Backspace, "").is_none());
}

#[given("a city query for Mos")]
fn city_query(world: &ListWorld) {
    query(world, ActiveField::City, "Mos");
}

#[given("three address suggestions")]
fn three_suggestions(world: &ListWorld) {
    query(world, ActiveField::Address, "Stre");
    respond(world, 0, streets(3));
}

#[given("a confirmed city Germany, Berlin")]
fn confirmed_city(world: &ListWorld) {
    query(world, ActiveField::City, "Berl");
    let berlin = geo_result("Berlin", "Germany, Berlin", GeoKind::Locality, 13.4);
    respond(world, 0, vec![berlin]);
    let effect = world.bar.borrow_mut().confirm(0);
    assert!(matches!(effect, Some(BarEffect::ScopeChanged(Some(_)))));
}

#[given("city suggestions for Bern")]
fn bern_suggestions(world: &ListWorld) {
    query(world, ActiveField::City, "Bern");
    let bern = geo_result("Bern", "Switzerland, Bern", GeoKind::Locality, 7.4);
    let latest = world.tickets.borrow().len() - 1;
    respond(world, latest, vec![bern]);
}

// --- When steps ---

#[when("the response to the first query arrives")]
fn first_response(world: &ListWorld) {
    respond(world, 0, streets(3));
}

#[when("the response to the second query arrives")]
fn second_response(world: &ListWorld) {
    respond(world, 1, streets(3));
}

#[when("a mixed response arrives for the first query")]
fn mixed_response(world: &ListWorld) {
    respond(
        world,
        0,
        vec![
            geo_result("Moscow", "Russia, Moscow", GeoKind::Locality, 37.6),
            geo_result("Mosfilmovskaya", "Russia, Moscow, Mosfilmovskaya", GeoKind::Street, 37.5),
            geo_result("Moscow Oblast", "Russia, Moscow Oblast", GeoKind::Province, 37.4),
        ],
    );
}

#[when("a response of 15 results arrives for the first query")]
fn long_response(world: &ListWorld) {
    respond(world, 0, streets(15));
}

#[when("ArrowDown is pressed five times")]
fn arrow_down(world: &ListWorld) {
    for _ in 0..5 {
        press(world, ActiveField::Address, Key::ArrowDown, "Stre");
    }
}

#[when("ArrowUp is pressed five times")]
fn arrow_up(world: &ListWorld) {
    for _ in 0..5 {
        press(world, ActiveField::Address, Key::ArrowUp, "Stre");
    }
}

#[when("Escape is pressed in the city field")]
fn escape_city(world: &ListWorld) {
    let text = world.bar.borrow().input().text(ActiveField::City).to_owned();
    press(world, ActiveField::City, Key::Escape, &text);
}

// --- Then steps ---

#[then("the suggestion list is empty")]
fn list_empty(world: &ListWorld) {
    assert!(world.bar.borrow().candidates().is_empty());
}

#[then("the suggestion list holds 3 entries")]
fn list_holds_three(world: &ListWorld) {
    assert_eq!(world.bar.borrow().candidates().len(), 3);
}

#[then("the suggestion list holds 2 entries")]
fn list_holds_two(world: &ListWorld) {
    let bar = world.bar.borrow();
    let names: Vec<&str> = bar
        .candidates()
        .entries()
        .iter()
        .map(|candidate| candidate.name.as_str())
        .collect();
    assert_eq!(names, ["Moscow", "Moscow Oblast"]);
}

#[then("the suggestion list holds 10 entries")]
fn list_holds_ten(world: &ListWorld) {
    assert_eq!(world.bar.borrow().candidates().len(), 10);
}

#[then("the last entry is result 9")]
fn last_entry(world: &ListWorld) {
    let bar = world.bar.borrow();
    let last = bar.candidates().entries().last().expect("non-empty list");
    assert_eq!(last.name, "result 9");
}

#[then("row 2 is highlighted")]
fn row_two(world: &ListWorld) {
    assert_eq!(world.bar.borrow().candidates().highlight(), Some(2));
}

#[then("nothing is highlighted")]
fn nothing_highlighted(world: &ListWorld) {
    assert_eq!(world.bar.borrow().candidates().highlight(), None);
}

#[then("the city field shows Bern")]
fn city_shows_bern(world: &ListWorld) {
    assert_eq!(world.bar.borrow().input().text(ActiveField::City), "Bern");
}

#[then("the city field shows Germany, Berlin")]
fn city_shows_berlin(world: &ListWorld) {
    assert_eq!(
        world.bar.borrow().input().text(ActiveField::City),
        "Germany, Berlin"
    );
}

// --- Scenario registrations ---

macro_rules! register_scenario {
    ($fn_name:ident, $title:literal) => {
        #[scenario(path = "tests/features/candidate_list.feature", name = $title)]
        fn $fn_name(world: ListWorld) {
            let _ = world;
        }
    };
}

register_scenario!(superseded_response, "a superseded response is discarded");
register_scenario!(
    emptied_field_response,
    "a response for an emptied field is discarded"
);
register_scenario!(
    city_kind_filter,
    "city suggestions keep only localities and provinces"
);
register_scenario!(address_keeps_all, "address suggestions keep every kind");
register_scenario!(long_responses_truncated, "long responses are truncated");
register_scenario!(arrows_stay_in_list, "arrows stay within the list");
register_scenario!(escape_two_steps, "escape collapses before reverting");

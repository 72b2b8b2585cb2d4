//! Focused unit tests covering replay configuration and script loading.

use super::helpers::write_utf8;
use super::*;
use crate::geocoder::block_on;
use crate::replay::{
    ARG_REPLAY_SCRIPT, ENV_REPLAY_SCRIPT, ReplayArgs, ReplayConfig, load_engine_config,
    load_script, replay,
};
use camino::Utf8PathBuf;
use rstest::rstest;
use tempfile::TempDir;
use waypoint_core::test_support::{StubGeocoder, StubReverseGeocoder, geo_result};
use waypoint_core::{
    ActiveField, DEFAULT_CITY_PAGE_SIZE, EngineConfig, GeoKind, Key, KeyEvent,
    ReverseGeocodeResult, UiEvent,
};

/// Helper to set up a temporary directory and script path.
fn setup_script_test() -> (TempDir, Utf8PathBuf) {
    let tmp = TempDir::new().expect("tempdir");
    let root = Utf8PathBuf::from_path_buf(tmp.path().to_path_buf()).expect("utf-8 workspace");
    let script_path = root.join("session.json");
    (tmp, script_path)
}

#[rstest]
fn converting_replay_without_script_errors() {
    let err = ReplayConfig::try_from(ReplayArgs::default()).expect_err("missing script");
    match err {
        CliError::MissingArgument { field, env } => {
            assert_eq!(field, ARG_REPLAY_SCRIPT);
            assert_eq!(env, ENV_REPLAY_SCRIPT);
        }
        other => panic!("expected MissingArgument, found {other:?}"),
    }
}

#[rstest]
fn load_script_decodes_events() {
    let (_tmp, script_path) = setup_script_test();
    write_utf8(
        &script_path,
        br#"[
            { "type": "key", "field": "city", "key": "other", "text": "Berl" },
            { "type": "confirm_candidate", "index": 0 },
            { "type": "focus_waypoint", "index": null },
            { "type": "marker_drag_end", "index": 0, "lat": 30.0, "lon": 40.0 }
        ]"#,
    );

    let events = load_script(&script_path).expect("script should decode");

    assert_eq!(
        events,
        [
            UiEvent::Key(KeyEvent::new(ActiveField::City, Key::Other, "Berl")),
            UiEvent::ConfirmCandidate { index: 0 },
            UiEvent::FocusWaypoint { index: None },
            UiEvent::MarkerDragEnd {
                index: 0,
                lat: 30.0,
                lon: 40.0,
            },
        ]
    );
}

#[rstest]
fn load_script_rejects_unknown_events() {
    let (_tmp, script_path) = setup_script_test();
    write_utf8(&script_path, br#"[{ "type": "double_click" }]"#);

    let err = load_script(&script_path).expect_err("unknown event should error");
    match err {
        CliError::ParseScript { path, .. } => assert_eq!(path, script_path),
        other => panic!("unexpected error {other:?}"),
    }
}

#[rstest]
fn load_script_io_error_returns_open_error() {
    let (_tmp, script_path) = setup_script_test();

    let err = load_script(&script_path).expect_err("missing script should error");
    match err {
        CliError::OpenScript { path, .. } => assert_eq!(path, script_path),
        other => panic!("expected OpenScript, found {other:?}"),
    }
}

#[rstest]
fn empty_script_draws_an_empty_map() {
    let report = block_on(replay(
        StubGeocoder::default(),
        StubReverseGeocoder::default(),
        &EngineConfig::default(),
        Vec::new(),
    ))
    .expect("runtime should start")
    .expect("replay should succeed");

    assert!(report.route.is_empty());
    assert!(report.rejected.is_empty());
    let map = report.map.expect("map attached");
    assert!(map.markers().is_empty());
    assert_eq!(map.renders(), 1);
}

#[rstest]
fn rejected_commit_is_reported_with_its_message() {
    let report = block_on(replay(
        StubGeocoder::default(),
        StubReverseGeocoder::default(),
        &EngineConfig::default(),
        vec![UiEvent::CommitAddress],
    ))
    .expect("runtime should start")
    .expect("replay should succeed");

    assert_eq!(report.rejected.len(), 1);
    assert_eq!(report.rejected[0].index, 0);
    assert_eq!(report.rejected[0].message, "please enter an address");
    let error = report.field_error.expect("error shown in the address bar");
    assert_eq!(error.field, ActiveField::Address);
}

fn street_geocoder() -> StubGeocoder {
    StubGeocoder::default().with_results(
        "Street",
        vec![
            geo_result("Street 1", "Russia, Street 1", GeoKind::Street, 37.60),
            geo_result("Street 2", "Russia, Street 2", GeoKind::Street, 37.62),
            geo_result("Street 3", "Russia, Street 3", GeoKind::Street, 37.64),
        ],
    )
}

fn add_street(index: usize) -> [UiEvent; 3] {
    [
        UiEvent::Key(KeyEvent::new(ActiveField::Address, Key::Other, "Street")),
        UiEvent::ConfirmCandidate { index },
        UiEvent::CommitAddress,
    ]
}

#[rstest]
fn engine_config_file_keeps_defaults_for_absent_keys() {
    let (_tmp, script_path) = setup_script_test();
    let config_path = script_path.with_file_name("engine.json");
    write_utf8(&config_path, br#"{ "candidate_cap": 2 }"#);

    let config = load_engine_config(&config_path).expect("config should decode");

    assert_eq!(config.candidate_cap, 2);
    assert_eq!(config.city_page_size, DEFAULT_CITY_PAGE_SIZE);
}

#[rstest]
fn engine_config_io_error_returns_open_error() {
    let (_tmp, script_path) = setup_script_test();

    let err = load_engine_config(&script_path).expect_err("missing config should error");
    match err {
        CliError::OpenEngineConfig { path, .. } => assert_eq!(path, script_path),
        other => panic!("expected OpenEngineConfig, found {other:?}"),
    }
}

#[rstest]
fn replay_applies_engine_candidate_cap() {
    let engine = EngineConfig::default().with_candidate_cap(2);
    let events = vec![UiEvent::Key(KeyEvent::new(
        ActiveField::Address,
        Key::Other,
        "Street",
    ))];

    let report = block_on(replay(
        street_geocoder(),
        StubReverseGeocoder::default(),
        &engine,
        events,
    ))
    .expect("runtime should start")
    .expect("replay should succeed");

    assert_eq!(report.candidates.len(), 2);
}

#[rstest]
fn relocation_onto_existing_address_is_reported() {
    let reverse = StubReverseGeocoder::default().with_result(ReverseGeocodeResult {
        country: "Russia".to_owned(),
        address_line: "Street 2".to_owned(),
    });
    let mut events: Vec<UiEvent> = add_street(0).into_iter().chain(add_street(1)).collect();
    events.push(UiEvent::MarkerDragEnd {
        index: 0,
        lat: 30.0,
        lon: 40.0,
    });

    let report = block_on(replay(
        street_geocoder(),
        reverse,
        &EngineConfig::default(),
        events,
    ))
    .expect("runtime should start")
    .expect("replay should succeed");

    assert_eq!(report.rejected.len(), 1);
    assert_eq!(report.rejected[0].index, 6);
    assert_eq!(
        report.rejected[0].message,
        "\"Russia, Street 2\" is already in your route."
    );
    assert_eq!(report.route[0].address, "Russia, Street 1");
}

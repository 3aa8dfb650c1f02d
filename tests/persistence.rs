use timeline_select::persistence::{
    load_state_from_path, save_state_to_path, state_from_json, state_to_json, SelectionSerde,
    ViewStateSerde,
};
use timeline_select::selection::SelectionKind;
use timeline_select::selector::TimeSelector;

fn selector() -> TimeSelector {
    let mut sel = TimeSelector::new();
    sel.add_time_layer("alpha", vec![1_000, 2_000, 3_000, 4_000, 5_000]);
    sel.add_time_layer("beta", vec![2_000, 8_000, 10_000]);
    sel.set_layout(608, 100);
    sel
}

#[test]
fn view_state_round_trips_through_json() {
    let mut source = selector();
    source.zoom_in(1, 5_000);
    source.select_time(2_050, 0);

    let state = ViewStateSerde::from(&source);
    let json = state_to_json(&state).expect("serialize");
    let restored_state = state_from_json(&json).expect("parse");

    let mut target = selector();
    restored_state.apply_to(&mut target);
    assert_eq!(target.current_min_time(), source.current_min_time());
    assert_eq!(target.current_max_time(), source.current_max_time());
    assert!(!target.viewport().is_default_zoom());
    assert_eq!(target.selection_kind(), SelectionKind::SingleValue);
    assert_eq!(target.selected_time(), Some(2_000));
}

#[test]
fn interval_selection_round_trips() {
    let mut source = selector();
    source.select_time_interval(2_000, 9_000);

    let state = ViewStateSerde::from(&source);
    let mut target = selector();
    state.apply_to(&mut target);
    assert_eq!(target.selection_kind(), SelectionKind::Interval);
    assert_eq!(target.selected_interval(), Some((2_000, 9_000)));
    assert_eq!(target.selected_layer_band(), Some((0, 1)));
}

#[test]
fn stale_state_degrades_through_live_validation() {
    let mut source = selector();
    source.zoom_in(1, 5_000);
    source.select_time(10_000, 1);
    let state = ViewStateSerde::from(&source);

    // the target has less data than the saved state assumed
    let mut target = TimeSelector::new();
    target.add_time_layer("alpha", vec![1_000, 2_000]);
    target.set_layout(608, 100);
    state.apply_to(&mut target);

    // visible range re-clamped into the smaller extent
    assert!(target.current_max_time() <= 2_000);
    assert!(target.current_min_time() >= 0);
    // the saved point no longer exists anywhere near: snapping rejects it
    assert_eq!(target.selection_kind(), SelectionKind::None);
}

#[test]
fn stale_interval_is_clamped_not_dropped() {
    let mut source = selector();
    source.select_time_interval(2_000, 9_500);
    let state = ViewStateSerde::from(&source);

    let mut target = TimeSelector::new();
    target.add_time_layer("alpha", vec![1_000, 4_000]);
    target.set_layout(608, 100);
    state.apply_to(&mut target);

    assert_eq!(target.selection_kind(), SelectionKind::Interval);
    assert_eq!(target.selected_interval(), Some((2_000, 4_000)));
}

#[test]
fn none_selection_serializes_and_clears_on_apply() {
    let source = selector();
    let state = ViewStateSerde::from(&source);
    assert!(matches!(state.selection, SelectionSerde::None));

    let mut target = selector();
    target.select_time(2_000, 0);
    ViewStateSerde::from(&source).apply_to(&mut target);
    assert_eq!(target.selection_kind(), SelectionKind::None);
}

#[test]
fn state_survives_a_file_round_trip() {
    let mut source = selector();
    source.zoom_in(2, 4_000);
    source.select_time_interval(3_000, 6_000);
    let state = ViewStateSerde::from(&source);

    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("view_state.json");
    save_state_to_path(&state, &path).expect("save");
    let loaded = load_state_from_path(&path).expect("load");

    let mut target = selector();
    loaded.apply_to(&mut target);
    assert_eq!(target.current_min_time(), source.current_min_time());
    assert_eq!(target.current_max_time(), source.current_max_time());
    assert_eq!(target.selected_interval(), Some((3_000, 6_000)));
}

#[test]
fn load_from_missing_path_reports_an_error() {
    let dir = tempfile::tempdir().expect("tempdir");
    let missing = dir.path().join("nope.json");
    assert!(load_state_from_path(&missing).is_err());
    assert!(state_from_json("not json").is_err());
}

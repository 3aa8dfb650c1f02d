use timeline_select::config::TimelineConfig;
use timeline_select::viewport::VisibleArea;

fn area_with_extent(max_time: i64) -> VisibleArea {
    let mut area = VisibleArea::new();
    area.update_extent(max_time);
    area
}

fn assert_ordering(area: &VisibleArea) {
    assert!(area.min_time() <= area.current_min_time());
    assert!(area.current_min_time() <= area.current_max_time());
    assert!(area.current_max_time() <= area.max_time());
}

#[test]
fn default_state_tracks_full_extent() {
    let area = area_with_extent(10_000);
    assert!(area.is_default_zoom());
    assert_eq!(area.current_min_time(), 0);
    assert_eq!(area.current_max_time(), 10_000);
}

#[test]
fn zoom_in_shrinks_around_center() {
    let config = TimelineConfig::default();
    let mut area = area_with_extent(10_000);
    area.zoom_in(1, 5_000, &config);
    assert!(!area.is_default_zoom());
    assert_eq!(area.current_min_time(), 1_000);
    assert_eq!(area.current_max_time(), 9_000);
}

#[test]
fn zoom_out_overshoot_snaps_back_to_default() {
    let config = TimelineConfig::default();
    let mut area = area_with_extent(10_000);
    area.zoom_in(1, 5_000, &config);
    for _ in 0..3 {
        area.zoom_out(1, 5_000, &config);
    }
    assert!(area.is_default_zoom());
    assert_eq!(area.current_min_time(), 0);
    assert_eq!(area.current_max_time(), 10_000);
}

#[test]
fn ordering_invariant_survives_arbitrary_zoom_sequences() {
    let config = TimelineConfig::default();
    let mut area = area_with_extent(100_000);
    let steps: [(bool, u32, i64); 8] = [
        (true, 3, 50_000),
        (false, 1, 10_000),
        (true, 5, 99_000),
        (false, 2, 99_000),
        (true, 1, 0),
        (false, 10, 50_000),
        (true, 4, 25_000),
        (false, 1, 25_000),
    ];
    for (zoom_in, times, center) in steps {
        if zoom_in {
            area.zoom_in(times, center, &config);
        } else {
            area.zoom_out(times, center, &config);
        }
        assert_ordering(&area);
    }
}

#[test]
fn pan_preserves_window_width_and_clamps() {
    let config = TimelineConfig::default();
    let mut area = area_with_extent(10_000);
    area.zoom_in(1, 5_000, &config); // (1000, 9000)
    let width = area.current_max_time() - area.current_min_time();

    area.move_visible_area(5_000);
    assert_eq!(area.current_max_time(), 10_000);
    assert_eq!(area.current_max_time() - area.current_min_time(), width);

    area.move_visible_area(-1_000_000);
    assert_eq!(area.current_min_time(), 0);
    assert_eq!(area.current_max_time() - area.current_min_time(), width);

    area.move_visible_area(500);
    assert_eq!(area.current_min_time(), 500);
    assert_eq!(area.current_max_time() - area.current_min_time(), width);
    assert_ordering(&area);
}

#[test]
fn pan_of_default_view_is_a_no_op() {
    let mut area = area_with_extent(10_000);
    area.move_visible_area(3_000);
    assert_eq!(area.current_min_time(), 0);
    assert_eq!(area.current_max_time(), 10_000);
}

#[test]
fn contains_is_inclusive() {
    let config = TimelineConfig::default();
    let mut area = area_with_extent(10_000);
    area.zoom_in(1, 5_000, &config); // (1000, 9000)
    assert!(area.contains(1_000));
    assert!(area.contains(9_000));
    assert!(!area.contains(999));
    assert!(!area.contains(9_001));
}

#[test]
fn extent_update_reclamps_a_zoomed_view() {
    let config = TimelineConfig::default();
    let mut area = area_with_extent(10_000);
    area.zoom_in(1, 9_000, &config); // (1800, 9800)
    assert_eq!(area.current_min_time(), 1_800);
    assert_eq!(area.current_max_time(), 9_800);

    area.update_extent(5_000);
    assert!(!area.is_default_zoom());
    assert_eq!(area.current_min_time(), 1_800);
    assert_eq!(area.current_max_time(), 5_000);

    // shrinking below the zoomed window collapses back to the default
    area.update_extent(1_000);
    assert!(area.is_default_zoom());
    assert_eq!(area.current_min_time(), 0);
    assert_eq!(area.current_max_time(), 1_000);
}

#[test]
fn extent_update_in_default_state_follows_extent() {
    let mut area = area_with_extent(10_000);
    area.update_extent(20_000);
    assert!(area.is_default_zoom());
    assert_eq!(area.current_max_time(), 20_000);
}

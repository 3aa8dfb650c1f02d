use timeline_select::config::TimelineConfig;
use timeline_select::geometry::{LabelSpan, RectangleGuides, TimelineGeometry};
use timeline_select::viewport::VisibleArea;

fn area_with_extent(max_time: i64) -> VisibleArea {
    let mut area = VisibleArea::new();
    area.update_extent(max_time);
    area
}

/// Geometry with a 500 px strip after a 100 px legend.
fn geometry() -> TimelineGeometry {
    let config = TimelineConfig::default();
    let geometry = TimelineGeometry::from_layout(608, 100, &config);
    assert_eq!(geometry.timeline_width, 500);
    geometry
}

#[test]
fn layout_reserves_legend_and_trailing_space() {
    let config = TimelineConfig::default();
    let geometry = TimelineGeometry::from_layout(800, 120, &config);
    assert_eq!(geometry.timeline_width, 800 - 120 - 5 - 3);
    // a degenerate layout never goes negative
    let tiny = TimelineGeometry::from_layout(50, 120, &config);
    assert_eq!(tiny.timeline_width, 0);
}

#[test]
fn time_and_pixel_conversion_roundtrip() {
    let geometry = geometry();
    let area = area_with_extent(1_000);
    assert_eq!(geometry.time_at(100, &area), 0);
    assert_eq!(geometry.time_at(350, &area), 500);
    assert_eq!(geometry.time_at(600, &area), 1_000);
    assert_eq!(geometry.x_at(0, &area), 100);
    assert_eq!(geometry.x_at(500, &area), 350);
    assert_eq!(geometry.x_at(1_000, &area), 600);
    for x in [100, 223, 350, 461, 600] {
        let t = geometry.time_at(x, &area);
        assert_eq!(geometry.x_at(t, &area), x, "roundtrip through x = {}", x);
    }
}

#[test]
fn time_distance_scales_with_zoom() {
    let config = TimelineConfig::default();
    let geometry = geometry();
    let mut area = area_with_extent(1_000);
    assert_eq!(geometry.time_distance(250, &area), 500);
    area.zoom_in(1, 500, &config); // (100, 900): 800 units over 500 px
    assert_eq!(geometry.time_distance(250, &area), 400);
}

#[test]
fn degenerate_geometry_stays_finite() {
    let config = TimelineConfig::default();
    let geometry = TimelineGeometry::from_layout(50, 120, &config);
    let area = area_with_extent(1_000);
    assert_eq!(geometry.time_at(40, &area), 0);
    assert_eq!(geometry.time_distance(10, &area), 0);
    // zero-width extent maps everything onto the legend edge
    let geometry = self::geometry();
    let empty = VisibleArea::new();
    assert_eq!(geometry.x_at(123, &empty), 100);
}

#[test]
fn point_label_sits_right_of_the_line() {
    let config = TimelineConfig::default();
    let geometry = geometry();
    let span = geometry.place_point_label(200, 50, &config);
    assert_eq!(span, LabelSpan { x1: 205, x2: 255 });
}

#[test]
fn point_label_flips_left_at_the_component_edge() {
    let config = TimelineConfig::default();
    let geometry = geometry();
    // 560 + 50 + 10 > 608, so the label moves left of the line
    let span = geometry.place_point_label(560, 50, &config);
    assert_eq!(span, LabelSpan { x1: 505, x2: 555 });
}

#[test]
fn interval_labels_flank_their_edges() {
    let config = TimelineConfig::default();
    let geometry = geometry();
    let (left, right) = geometry.place_interval_labels(150, 400, 50, 50, true, true, &config);
    assert_eq!(left, LabelSpan { x1: 155, x2: 205 });
    assert_eq!(right, LabelSpan { x1: 405, x2: 455 });
}

#[test]
fn left_interval_label_flips_when_crossing_the_right_edge_line() {
    let config = TimelineConfig::default();
    let geometry = geometry();
    let (left, _right) = geometry.place_interval_labels(150, 180, 50, 50, true, true, &config);
    assert_eq!(left, LabelSpan { x1: 95, x2: 145 });
}

#[test]
fn right_interval_label_folds_inside_at_the_component_edge() {
    let config = TimelineConfig::default();
    let geometry = geometry();
    let (left, right) = geometry.place_interval_labels(150, 590, 50, 50, true, true, &config);
    assert_eq!(left, LabelSpan { x1: 155, x2: 205 });
    // 595 + 50 overruns 603, and the inside position clears the left label
    assert_eq!(right, LabelSpan { x1: 535, x2: 585 });
}

#[test]
fn right_interval_label_keeps_overrun_when_folding_would_collide() {
    let config = TimelineConfig::default();
    let geometry = geometry();
    // left label spans (505, 555); folding right inside would start at 535
    let (left, right) = geometry.place_interval_labels(500, 590, 50, 50, true, true, &config);
    assert_eq!(left, LabelSpan { x1: 505, x2: 555 });
    assert_eq!(right, LabelSpan { x1: 595, x2: 645 });
}

#[test]
fn label_span_overlap_is_half_open() {
    let span = LabelSpan { x1: 100, x2: 150 };
    assert!(span.overlaps(120, 200));
    assert!(!span.overlaps(150, 200));
    assert!(!span.overlaps(0, 100));
    assert_eq!(span.width(), 50);
}

#[test]
fn guides_order_and_clamp_the_drag_span() {
    let mut guides = RectangleGuides::default();
    assert!(!guides.visible());
    guides.drag(300, 120);
    assert!(guides.visible());
    assert_eq!(guides.clamped_span(100, 600), (120, 300));
    assert_eq!(guides.clamped_span(150, 250), (150, 250));
    guides.hide();
    assert!(!guides.visible());
}

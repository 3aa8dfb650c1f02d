//! Engine tuning knobs shared by the viewport, selection and geometry code.

/// Numeric parameters of the timeline engine.
///
/// Embedders that want a different feel (stronger zoom steps, looser
/// snapping) override individual fields and pass the config to
/// [`TimeSelector::with_config`](crate::selector::TimeSelector::with_config).
#[derive(Clone, Debug)]
pub struct TimelineConfig {
    /// Shrink factor applied to the visible range per zoom-in step; zoom-out
    /// uses its inverse. Default: `0.8`.
    pub zoom_ratio: f64,
    /// Time units panned per wheel-scroll step (see `TimeSelector::scroll_by`).
    /// Default: `200`.
    pub scroll_ratio: i64,
    /// Maximum distance (time units) between a click and the nearest data
    /// point for the click to select it. At or beyond this distance the click
    /// deselects instead. Default: `150`.
    pub selection_threshold: i64,
    /// Row height in pixels for a time-entry layer. Default: `30`.
    pub entry_row_height: i32,
    /// Row height in pixels for a graph layer. Default: `60`.
    pub graph_row_height: i32,
    /// Padding in pixels between labels, lines and component edges. Default: `5`.
    pub padding: i32,
    /// Radius in pixels of a drawn data point. Default: `3`.
    pub point_radius: i32,
    /// Blank band in pixels above the first layer row. Default: `10`.
    pub top_padding: i32,
    /// Horizontal drag distance in pixels below which a drag-pan is ignored.
    /// Default: `10`.
    pub min_drag_px: i32,
    /// Clamp for wheel-rotation zoom steps, compensating the very different
    /// step sizes of mouse wheels and trackpads. Default: `3`.
    pub max_wheel_steps: i32,
}

impl Default for TimelineConfig {
    fn default() -> Self {
        Self {
            zoom_ratio: 0.8,
            scroll_ratio: 200,
            selection_threshold: 150,
            entry_row_height: 30,
            graph_row_height: 60,
            padding: 5,
            point_radius: 3,
            top_padding: 10,
            min_drag_px: 10,
            max_wheel_steps: 3,
        }
    }
}

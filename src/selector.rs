//! The engine facade: one owner for layers, viewport and selection state.
//!
//! [`TimeSelector`] is what an embedding widget talks to. The excluded UI
//! layer forwards pixel coordinates and gesture state in; the excluded
//! renderer feeds the layout once per pass and queries positions, labels and
//! collision checks back out. Every mutating call returns whether it changed
//! anything visible, and a matching [`TimelineEvent`] goes out through the
//! [`EventController`] when it did — the caller decides what to do with the
//! return value, subscribers learn about the change either way.

use tracing::debug;

use crate::config::TimelineConfig;
use crate::data::layer::Layer;
use crate::data::registry::LayerRegistry;
use crate::error::TimelineError;
use crate::events::{EventController, EventKind, LayerMeta, SelectionMeta, TimelineEvent, ViewMeta};
use crate::format::TimeFormatter;
use crate::geometry::{LabelSpan, RectangleGuides, TimelineGeometry};
use crate::selection::{IntervalSelection, SelectionKind, TimeSelection};
use crate::viewport::VisibleArea;

/// The timeline engine.
pub struct TimeSelector {
    config: TimelineConfig,
    registry: LayerRegistry,
    viewport: VisibleArea,
    geometry: TimelineGeometry,
    time_selection: TimeSelection,
    interval_selection: IntervalSelection,
    guides: RectangleGuides,
    formatter: TimeFormatter,
    events: EventController,
}

impl Default for TimeSelector {
    fn default() -> Self {
        Self::new()
    }
}

impl TimeSelector {
    pub fn new() -> Self {
        Self::with_config(TimelineConfig::default())
    }

    pub fn with_config(config: TimelineConfig) -> Self {
        Self {
            config,
            registry: LayerRegistry::new(),
            viewport: VisibleArea::new(),
            geometry: TimelineGeometry::default(),
            time_selection: TimeSelection::default(),
            interval_selection: IntervalSelection::default(),
            guides: RectangleGuides::default(),
            formatter: TimeFormatter::default(),
            events: EventController::new(),
        }
    }

    // ── Accessors ────────────────────────────────────────────────────────────

    pub fn config(&self) -> &TimelineConfig {
        &self.config
    }

    pub fn registry(&self) -> &LayerRegistry {
        &self.registry
    }

    pub fn viewport(&self) -> &VisibleArea {
        &self.viewport
    }

    pub fn geometry(&self) -> &TimelineGeometry {
        &self.geometry
    }

    pub fn time_selection(&self) -> &TimeSelection {
        &self.time_selection
    }

    pub fn interval_selection(&self) -> &IntervalSelection {
        &self.interval_selection
    }

    pub fn guides(&self) -> &RectangleGuides {
        &self.guides
    }

    pub fn guides_mut(&mut self) -> &mut RectangleGuides {
        &mut self.guides
    }

    pub fn formatter(&self) -> &TimeFormatter {
        &self.formatter
    }

    /// Set how time values are rendered as label text. Does not trigger a
    /// notification; the caller repaints when it sees fit.
    pub fn set_formatter(&mut self, formatter: TimeFormatter) {
        self.formatter = formatter;
    }

    /// A handle for subscribing to change events; cloning shares the
    /// subscriber list.
    pub fn events(&self) -> EventController {
        self.events.clone()
    }

    pub fn is_empty(&self) -> bool {
        self.registry.is_empty()
    }

    /// Smallest data time across all layers; fails on an empty registry.
    pub fn min_time(&self) -> Result<i64, TimelineError> {
        self.registry.min_time()
    }

    /// Largest data time across all layers; fails on an empty registry.
    pub fn max_time(&self) -> Result<i64, TimelineError> {
        self.registry.max_time()
    }

    // ── Layout & coordinate conversion ───────────────────────────────────────

    /// Feed the layout for the current pass: total component width and the
    /// measured width of the legend column.
    pub fn set_layout(&mut self, component_width: i32, legend_width: i32) {
        self.geometry = TimelineGeometry::from_layout(component_width, legend_width, &self.config);
    }

    /// Time value under the absolute x pixel.
    pub fn time_for_x(&self, x: i32) -> i64 {
        self.geometry.time_at(x, &self.viewport)
    }

    /// Absolute x pixel of a time value.
    pub fn x_for_time(&self, time: i64) -> i32 {
        self.geometry.x_at(time, &self.viewport)
    }

    /// Convert a pixel span into a time span at the current zoom.
    pub fn time_distance(&self, px: i32) -> i64 {
        self.geometry.time_distance(px, &self.viewport)
    }

    // ── Layer mutation ───────────────────────────────────────────────────────

    /// Add a layer of discrete time entries. `times` must be sorted
    /// non-decreasing.
    pub fn add_time_layer(&mut self, name: impl Into<String>, times: Vec<i64>) {
        self.add_layer(Layer::time_entries(name, times));
    }

    /// Add a graph layer. `times` must be sorted non-decreasing and parallel
    /// to `values`.
    pub fn add_graph_layer(
        &mut self,
        name: impl Into<String>,
        times: Vec<i64>,
        values: Vec<f64>,
    ) {
        self.add_layer(Layer::graph(name, times, values));
    }

    pub fn add_layer(&mut self, layer: Layer) {
        let name = layer.name().to_string();
        self.registry.add_layer(layer);
        let view_changed = self.refresh_extent();
        let mut kinds = EventKind::LAYER_ADDED;
        if view_changed {
            kinds |= EventKind::EXTENT_CHANGED;
        }
        let mut event = TimelineEvent::new(kinds);
        event.layer = Some(LayerMeta { name });
        event.view = Some(self.view_meta());
        self.events.emit(event);
    }

    /// Remove the first layer with the given name; unknown names are a no-op.
    /// The extent is recomputed and an out-of-range selection is reconciled.
    /// Returns `true` when a layer was removed.
    pub fn remove_layer(&mut self, name: &str) -> bool {
        if !self.registry.remove_layer(name) {
            return false;
        }
        let view_changed = self.refresh_extent();
        let selection_changed = self.reconcile_selection();
        let mut kinds = EventKind::LAYER_REMOVED;
        if view_changed {
            kinds |= EventKind::EXTENT_CHANGED;
        }
        if selection_changed {
            kinds |= self.selection_event_kind();
        }
        let mut event = TimelineEvent::new(kinds);
        event.layer = Some(LayerMeta {
            name: name.to_string(),
        });
        event.view = Some(self.view_meta());
        if selection_changed {
            event.selection = Some(self.selection_meta());
        }
        self.events.emit(event);
        true
    }

    /// Drop every layer. An active selection is cleared and the viewport
    /// falls back to the empty default. Returns `true` when the call changed
    /// anything visible.
    pub fn remove_all_layers(&mut self) -> bool {
        let had_layers = !self.registry.is_empty();
        self.registry.remove_all_layers();
        let view_changed = self.refresh_extent();
        let selection_changed = self.reconcile_selection();
        if !(had_layers || selection_changed) {
            return false;
        }
        let mut kinds = EventKind::LAYERS_CLEARED;
        if view_changed {
            kinds |= EventKind::EXTENT_CHANGED;
        }
        if selection_changed {
            kinds |= EventKind::SELECTION_CLEARED;
        }
        let mut event = TimelineEvent::new(kinds);
        event.view = Some(self.view_meta());
        if selection_changed {
            event.selection = Some(self.selection_meta());
        }
        self.events.emit(event);
        true
    }

    // ── Viewport control ─────────────────────────────────────────────────────

    pub fn current_min_time(&self) -> i64 {
        self.viewport.current_min_time()
    }

    pub fn current_max_time(&self) -> i64 {
        self.viewport.current_max_time()
    }

    /// Zoom in `steps` times around the time `center`. Returns whether the
    /// visible range changed.
    pub fn zoom_in(&mut self, steps: u32, center: i64) -> bool {
        let before = self.viewport.clone();
        self.viewport.zoom_in(steps, center, &self.config);
        self.emit_view_change(before, EventKind::ZOOM)
    }

    /// Zoom out `steps` times around the time `center`; overshooting the
    /// extent snaps back to the default view. Returns whether the visible
    /// range changed.
    pub fn zoom_out(&mut self, steps: u32, center: i64) -> bool {
        let before = self.viewport.clone();
        self.viewport.zoom_out(steps, center, &self.config);
        self.emit_view_change(before, EventKind::ZOOM)
    }

    /// Pan the visible window by `offset` time units, clamped to the extent.
    /// Returns whether the visible range changed.
    pub fn move_visible_area(&mut self, offset: i64) -> bool {
        let before = self.viewport.clone();
        self.viewport.move_visible_area(offset);
        self.emit_view_change(before, EventKind::PAN)
    }

    /// Wheel-style pan: `steps` wheel notches, each worth
    /// `config.scroll_ratio` time units.
    pub fn scroll_by(&mut self, steps: i64) -> bool {
        self.move_visible_area(steps * self.config.scroll_ratio)
    }

    /// Drag-pan by a horizontal pixel distance. Drags shorter than
    /// `config.min_drag_px` are ignored; dragging right moves the window
    /// left. Returns whether the visible range changed.
    pub fn drag_by(&mut self, dx_px: i32) -> bool {
        if dx_px.abs() < self.config.min_drag_px {
            return false;
        }
        let time = self.geometry.time_distance(dx_px.abs(), &self.viewport);
        self.move_visible_area(-time * i64::from(dx_px.signum()))
    }

    /// Wheel-rotation zoom at the pointer position `x`. The rotation is
    /// scaled and clamped to `config.max_wheel_steps` to even out mouse
    /// wheels and trackpads; negative rotation zooms in. Ignored when the
    /// pointer is outside the visible range.
    pub fn wheel_zoom(&mut self, precise_rotation: f64, x: i32) -> bool {
        let steps = ((precise_rotation * 4.0).round() as i32)
            .clamp(-self.config.max_wheel_steps, self.config.max_wheel_steps);
        if steps == 0 {
            return false;
        }
        let time = self.time_for_x(x);
        if !self.viewport.contains(time) {
            return false;
        }
        if steps < 0 {
            self.zoom_in(steps.unsigned_abs(), time)
        } else {
            self.zoom_out(steps as u32, time)
        }
    }

    // ── Selection control ────────────────────────────────────────────────────

    /// Select the data point on `layer` closest to `time`, when within the
    /// snap threshold; a click far from every point deselects. Any interval
    /// selection is cleared. Returns whether the logical selection changed.
    pub fn select_time(&mut self, time: i64, layer: usize) -> bool {
        let cleared = self.interval_selection.clear();
        let changed = self
            .time_selection
            .select(time, layer, &self.registry, &self.config);
        let any = cleared || changed;
        if any {
            self.emit_selection(self.selection_event_kind());
        }
        any
    }

    /// Click-path selection: derive the layer from the y pixel and the time
    /// from the x pixel, then snap like [`Self::select_time`].
    pub fn select_at(&mut self, x: i32, y: i32) -> bool {
        let Some(layer) = self.registry.layer_index_at_y(y, &self.config) else {
            return self.clear_selection();
        };
        let time = self.time_for_x(x);
        self.select_time(time, layer)
    }

    /// Commit a drag-rectangle interval selection from its pixel bounds; see
    /// [`IntervalSelection::select_area`] for the snapping rules. Any point
    /// selection is cleared. Returns whether the logical selection changed.
    pub fn select_interval(&mut self, left: i32, right: i32, top: i32, bottom: i32) -> bool {
        let cleared = self.time_selection.clear();
        let changed = self.interval_selection.select_area(
            left,
            right,
            top,
            bottom,
            &self.registry,
            &self.viewport,
            &self.geometry,
            &self.config,
        );
        let any = cleared || changed;
        if any {
            self.emit_selection(self.selection_event_kind());
        }
        any
    }

    /// Programmatic interval selection spanning all layers; edge times are
    /// taken as given (no snapping).
    pub fn select_time_interval(&mut self, from: i64, to: i64) -> bool {
        let cleared = self.time_selection.clear();
        let changed = self
            .interval_selection
            .select_times(from, to, &self.registry);
        let any = cleared || changed;
        if any {
            self.emit_selection(EventKind::INTERVAL_SELECTED);
        }
        any
    }

    /// Drop whatever is selected. Returns whether anything changed.
    pub fn clear_selection(&mut self) -> bool {
        let a = self.time_selection.clear();
        let b = self.interval_selection.clear();
        if a || b {
            debug!("selection cleared");
            self.emit_selection(EventKind::SELECTION_CLEARED);
        }
        a || b
    }

    pub fn selection_kind(&self) -> SelectionKind {
        if self.time_selection.has_selection() {
            SelectionKind::SingleValue
        } else if self.interval_selection.has_selection() {
            SelectionKind::Interval
        } else {
            SelectionKind::None
        }
    }

    pub fn has_selection(&self) -> bool {
        self.selection_kind() != SelectionKind::None
    }

    /// Time of the point selection, if one is active.
    pub fn selected_time(&self) -> Option<i64> {
        self.time_selection.selected().map(|(time, _)| time)
    }

    /// Layer of the point selection, if one is active.
    pub fn selected_layer(&self) -> Option<usize> {
        self.time_selection.selected().map(|(_, layer)| layer)
    }

    /// `(from, to)` of the interval selection, if one is active.
    pub fn selected_interval(&self) -> Option<(i64, i64)> {
        self.interval_selection.interval()
    }

    /// Inclusive layer band of the interval selection, if one is active.
    pub fn selected_layer_band(&self) -> Option<(usize, usize)> {
        self.interval_selection.layer_band()
    }

    // ── Label plumbing for the renderer ──────────────────────────────────────

    /// Where the point-selection cursor line sits, when the selection exists
    /// and is inside the visible range.
    pub fn point_label_anchor(&self) -> Option<i32> {
        let (time, _) = self.time_selection.selected()?;
        if !self.viewport.contains(time) {
            return None;
        }
        Some(self.x_for_time(time))
    }

    /// Record where the renderer drew the point-selection label.
    pub fn record_point_label(&mut self, span: LabelSpan) {
        self.time_selection.set_label(span);
    }

    /// Record where the renderer drew the interval edge labels and which
    /// edges were visible.
    pub fn record_interval_labels(
        &mut self,
        left: LabelSpan,
        right: LabelSpan,
        left_drawn: bool,
        right_drawn: bool,
    ) {
        self.interval_selection
            .set_labels(left, right, left_drawn, right_drawn);
    }

    /// Would a new label spanning `[a, b)` overlap any label drawn for the
    /// current selection? Consulted before drawing the from/to extent labels
    /// at the ends of the timeline.
    pub fn labels_collision(&self, a: i32, b: i32) -> bool {
        self.time_selection.label_collision(a, b) || self.interval_selection.labels_collision(a, b)
    }

    // ── Internal ─────────────────────────────────────────────────────────────

    /// Recompute the extent from the registry (empty registry degrades to the
    /// `[0, 0]` default view). Returns whether the viewport changed.
    fn refresh_extent(&mut self) -> bool {
        let before = self.viewport.clone();
        let max = self.registry.max_time().unwrap_or(0).max(0);
        self.viewport.update_extent(max);
        before != self.viewport
    }

    pub(crate) fn reconcile_selection(&mut self) -> bool {
        let a = self
            .time_selection
            .check_bounds(&self.registry, &self.config);
        let b = self.interval_selection.check_bounds(&self.registry);
        a || b
    }

    pub(crate) fn restore_view_state(&mut self, current_min: i64, current_max: i64, no_zoom: bool) {
        self.viewport.restore(current_min, current_max, no_zoom);
    }

    pub(crate) fn restore_interval(
        &mut self,
        from: i64,
        to: i64,
        from_layer: usize,
        to_layer: usize,
    ) -> bool {
        let last = self.registry.len().saturating_sub(1);
        let cleared = self.time_selection.clear();
        let changed =
            self.interval_selection
                .set(from, to, from_layer.min(last), to_layer.min(last));
        let reconciled = self.reconcile_selection();
        let any = cleared || changed || reconciled;
        if any {
            self.emit_selection(self.selection_event_kind());
        }
        any
    }

    fn selection_event_kind(&self) -> EventKind {
        match self.selection_kind() {
            SelectionKind::SingleValue => EventKind::TIME_SELECTED,
            SelectionKind::Interval => EventKind::INTERVAL_SELECTED,
            SelectionKind::None => EventKind::SELECTION_CLEARED,
        }
    }

    fn selection_meta(&self) -> SelectionMeta {
        SelectionMeta {
            kind: self.selection_kind(),
            time: self.selected_time(),
            layer: self.selected_layer(),
            interval: self.selected_interval(),
            layer_band: self.selected_layer_band(),
        }
    }

    fn view_meta(&self) -> ViewMeta {
        ViewMeta {
            visible: (
                self.viewport.current_min_time(),
                self.viewport.current_max_time(),
            ),
            default_zoom: self.viewport.is_default_zoom(),
        }
    }

    fn emit_selection(&self, kinds: EventKind) {
        let mut event = TimelineEvent::new(kinds);
        event.selection = Some(self.selection_meta());
        self.events.emit(event);
    }

    fn emit_view_change(&self, before: VisibleArea, kind: EventKind) -> bool {
        if before == self.viewport {
            return false;
        }
        debug!(
            current_min = self.viewport.current_min_time(),
            current_max = self.viewport.current_max_time(),
            "view changed"
        );
        let mut event = TimelineEvent::new(kind);
        event.view = Some(self.view_meta());
        self.events.emit(event);
        true
    }
}

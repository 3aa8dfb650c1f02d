//! Point and interval selection with snap-to-data.
//!
//! The two selection shapes are tracked by separate managers; their mutual
//! exclusion (setting one clears the other) is enforced by the facade in
//! [`crate::selector`]. Both managers borrow the registry and viewport per
//! call instead of holding references, so there is exactly one owner of every
//! piece of state.

use tracing::debug;

use crate::config::TimelineConfig;
use crate::data::registry::LayerRegistry;
use crate::geometry::{LabelSpan, TimelineGeometry};
use crate::viewport::VisibleArea;

/// Which of the mutually exclusive selection shapes is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionKind {
    None,
    SingleValue,
    Interval,
}

// ─────────────────────────────────────────────────────────────────────────────
// TimeSelection – a single snapped time on a single layer
// ─────────────────────────────────────────────────────────────────────────────

/// Point selection: one data time on one layer, plus the pixel extent of the
/// label drawn for it last repaint (transient state consulted by the
/// label-collision check, not part of the logical selection).
#[derive(Debug, Clone, Default)]
pub struct TimeSelection {
    selected_time: i64,
    selected_layer: usize,
    has_selection: bool,
    label: LabelSpan,
}

impl TimeSelection {
    /// Snap `time` to the closest data point on `layer` and select it.
    ///
    /// A click at or beyond `config.selection_threshold` from every data
    /// point of the layer deselects instead of selecting a distant point;
    /// the same happens for an empty layer or an out-of-range index.
    /// Returns whether the logical selection changed.
    pub fn select(
        &mut self,
        time: i64,
        layer: usize,
        registry: &LayerRegistry,
        config: &TimelineConfig,
    ) -> bool {
        let before = self.snapshot();
        match registry.closest_time(time, layer) {
            Some(closest) if (closest - time).abs() < config.selection_threshold => {
                self.has_selection = true;
                self.selected_time = closest;
                self.selected_layer = layer;
            }
            _ => {
                self.has_selection = false;
            }
        }
        let changed = self.snapshot() != before;
        if changed {
            debug!(time = self.selected_time, layer = self.selected_layer, selected = self.has_selection, "time selection");
        }
        changed
    }

    fn snapshot(&self) -> (bool, i64, usize) {
        (self.has_selection, self.selected_time, self.selected_layer)
    }

    pub fn has_selection(&self) -> bool {
        self.has_selection
    }

    /// The selected `(time, layer)` pair, if any.
    pub fn selected(&self) -> Option<(i64, usize)> {
        self.has_selection
            .then_some((self.selected_time, self.selected_layer))
    }

    /// Drop the selection. Returns whether anything changed.
    pub fn clear(&mut self) -> bool {
        if !self.has_selection {
            return false;
        }
        self.has_selection = false;
        self.selected_time = 0;
        true
    }

    /// Re-validate the selection after the data extent changed. An empty
    /// registry clears it; an out-of-range time re-selects at the minimum
    /// (which may itself fail the snap threshold and clear). Returns whether
    /// a visible change occurred.
    pub fn check_bounds(&mut self, registry: &LayerRegistry, config: &TimelineConfig) -> bool {
        if !self.has_selection {
            return false;
        }
        let (Ok(min), Ok(max)) = (registry.min_time(), registry.max_time()) else {
            self.clear();
            return true;
        };
        if self.selected_time < min || self.selected_time > max {
            self.select(min, 0, registry, config);
            return true;
        }
        false
    }

    /// Record where the renderer drew the selection label this repaint.
    pub fn set_label(&mut self, span: LabelSpan) {
        self.label = span;
    }

    /// Would a new label spanning `[a, b)` overlap the drawn selection label?
    pub fn label_collision(&self, a: i32, b: i32) -> bool {
        self.has_selection && self.label.overlaps(a, b)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// IntervalSelection – a time range across a band of layers
// ─────────────────────────────────────────────────────────────────────────────

/// Interval selection: a `[from_time, to_time]` range across an inclusive
/// band of layer rows, with the pixel extents of the two edge labels.
#[derive(Debug, Clone, Default)]
pub struct IntervalSelection {
    from_time: i64,
    to_time: i64,
    from_layer: usize,
    to_layer: usize,
    has_selection: bool,
    left_label: LabelSpan,
    right_label: LabelSpan,
    left_drawn: bool,
    right_drawn: bool,
}

impl IntervalSelection {
    /// Commit a drag-rectangle selection given its pixel bounds.
    ///
    /// The y bounds are clamped into the layer-row band and mapped to the
    /// inclusive layer range; the x bounds are mapped to times clamped into
    /// the visible range. Each edge snaps independently to the closest data
    /// time across the layer band when that time is within
    /// `config.selection_threshold`; otherwise the raw edge time is kept, so
    /// an interval may be "loose" on either side. Returns whether the
    /// logical selection changed.
    #[allow(clippy::too_many_arguments)]
    pub fn select_area(
        &mut self,
        left: i32,
        right: i32,
        top: i32,
        bottom: i32,
        registry: &LayerRegistry,
        area: &VisibleArea,
        geometry: &TimelineGeometry,
        config: &TimelineConfig,
    ) -> bool {
        let Some(from_layer) = registry.layer_index_at_y(top.min(bottom), config) else {
            return self.clear();
        };
        let to_layer = registry
            .layer_index_at_y(top.max(bottom), config)
            .unwrap_or(from_layer);

        let raw_from = geometry
            .time_at(left.min(right), area)
            .max(area.current_min_time());
        let raw_to = geometry
            .time_at(left.max(right), area)
            .min(area.current_max_time());

        let from_time = snap_edge(raw_from, from_layer, to_layer, registry, config);
        let to_time = snap_edge(raw_to, from_layer, to_layer, registry, config);

        self.set(from_time, to_time, from_layer, to_layer)
    }

    /// Programmatic selection of a time range, spanning all layers.
    pub fn select_times(&mut self, from: i64, to: i64, registry: &LayerRegistry) -> bool {
        let last = registry.len().saturating_sub(1);
        self.set(from.min(to), from.max(to), 0, last)
    }

    pub(crate) fn set(
        &mut self,
        from_time: i64,
        to_time: i64,
        from_layer: usize,
        to_layer: usize,
    ) -> bool {
        let before = self.snapshot();
        self.has_selection = true;
        self.from_time = from_time;
        self.to_time = to_time;
        self.from_layer = from_layer;
        self.to_layer = to_layer;
        let changed = self.snapshot() != before;
        if changed {
            debug!(from = from_time, to = to_time, from_layer, to_layer, "interval selection");
        }
        changed
    }

    fn snapshot(&self) -> (bool, i64, i64, usize, usize) {
        (
            self.has_selection,
            self.from_time,
            self.to_time,
            self.from_layer,
            self.to_layer,
        )
    }

    pub fn has_selection(&self) -> bool {
        self.has_selection
    }

    /// The selected `(from_time, to_time)` range, if any.
    pub fn interval(&self) -> Option<(i64, i64)> {
        self.has_selection.then_some((self.from_time, self.to_time))
    }

    /// The inclusive `(from_layer, to_layer)` band, if any.
    pub fn layer_band(&self) -> Option<(usize, usize)> {
        self.has_selection
            .then_some((self.from_layer, self.to_layer))
    }

    /// Drop the selection. Returns whether anything changed.
    pub fn clear(&mut self) -> bool {
        if !self.has_selection {
            return false;
        }
        self.has_selection = false;
        true
    }

    /// Re-validate against the data extent: an empty registry clears the
    /// selection, out-of-extent edges are clamped. Returns whether a visible
    /// change occurred.
    pub fn check_bounds(&mut self, registry: &LayerRegistry) -> bool {
        if !self.has_selection {
            return false;
        }
        let (Ok(min), Ok(max)) = (registry.min_time(), registry.max_time()) else {
            self.clear();
            return true;
        };
        let mut changed = false;
        if self.from_time < min {
            self.from_time = min;
            changed = true;
        }
        if self.to_time > max {
            self.to_time = max;
            changed = true;
        }
        changed
    }

    /// Which of the two edges fall inside the visible range (and so will be
    /// drawn by the renderer).
    pub fn visible_edges(&self, area: &VisibleArea) -> (bool, bool) {
        if !self.has_selection {
            return (false, false);
        }
        (area.contains(self.from_time), area.contains(self.to_time))
    }

    /// Record where the renderer drew the two edge labels this repaint and
    /// which edges were actually drawn.
    pub fn set_labels(
        &mut self,
        left: LabelSpan,
        right: LabelSpan,
        left_drawn: bool,
        right_drawn: bool,
    ) {
        self.left_label = left;
        self.right_label = right;
        self.left_drawn = left_drawn;
        self.right_drawn = right_drawn;
    }

    /// Would a new label spanning `[a, b)` overlap either drawn edge label?
    pub fn labels_collision(&self, a: i32, b: i32) -> bool {
        self.has_selection
            && (self.left_label.overlaps(a, b) && self.left_drawn
                || self.right_label.overlaps(a, b) && self.right_drawn)
    }
}

fn snap_edge(
    raw: i64,
    from_layer: usize,
    to_layer: usize,
    registry: &LayerRegistry,
    config: &TimelineConfig,
) -> i64 {
    match registry.closest_time_in_band(raw, from_layer, to_layer) {
        Some(closest) if (closest - raw).abs() < config.selection_threshold => closest,
        _ => raw,
    }
}

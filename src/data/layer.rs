//! Layers: the named rows of the timeline, each owning a sorted time sequence.

use crate::config::TimelineConfig;
use crate::search;

/// Kind-specific payload of a timeline row.
///
/// The renderer dispatches on the kind to decide how a row is drawn; the
/// search and selection code only ever touches the sorted `times`.
#[derive(Debug, Clone, PartialEq)]
pub enum LayerKind {
    /// Discrete events: one timestamp per entry.
    TimeEntries { times: Vec<i64> },
    /// A sampled curve: timestamps with one sample value each.
    Graph { times: Vec<i64>, values: Vec<f64> },
}

/// One named row of the timeline.
///
/// Layers are immutable once added: to change a layer's data, remove it by
/// name and add a replacement. `times` must be sorted non-decreasing; that is
/// a precondition of every query on the layer.
#[derive(Debug, Clone, PartialEq)]
pub struct Layer {
    name: String,
    kind: LayerKind,
}

impl Layer {
    /// A layer of discrete time entries.
    pub fn time_entries(name: impl Into<String>, times: Vec<i64>) -> Self {
        Self {
            name: name.into(),
            kind: LayerKind::TimeEntries { times },
        }
    }

    /// A graph layer: `times` and `values` run in parallel.
    pub fn graph(name: impl Into<String>, times: Vec<i64>, values: Vec<f64>) -> Self {
        Self {
            name: name.into(),
            kind: LayerKind::Graph { times, values },
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> &LayerKind {
        &self.kind
    }

    /// The sorted time sequence of this layer, regardless of kind.
    pub fn times(&self) -> &[i64] {
        match &self.kind {
            LayerKind::TimeEntries { times } => times,
            LayerKind::Graph { times, .. } => times,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.times().is_empty()
    }

    /// Smallest time value, or `i64::MAX` for an empty layer so that empty
    /// layers never win a min-reduction across the registry.
    pub fn min_time(&self) -> i64 {
        self.times().first().copied().unwrap_or(i64::MAX)
    }

    /// Largest time value, or `i64::MIN` for an empty layer.
    pub fn max_time(&self) -> i64 {
        self.times().last().copied().unwrap_or(i64::MIN)
    }

    /// Pixel height of this layer's row.
    pub fn row_height(&self, config: &TimelineConfig) -> i32 {
        match &self.kind {
            LayerKind::TimeEntries { .. } => config.entry_row_height,
            LayerKind::Graph { .. } => config.graph_row_height,
        }
    }

    /// Inclusive index span of the points inside the time window
    /// `[from, to]`, or `None` when no point falls inside it. This is what a
    /// renderer iterates when drawing the visible part of the row.
    pub fn visible_range(&self, from: i64, to: i64) -> Option<(usize, usize)> {
        let times = self.times();
        let lower = search::first_greater_or_equal(times, from)?;
        let upper = search::last_less_or_equal(times, to)?;
        if lower > upper || times[lower] > to || times[upper] < from {
            return None;
        }
        Some((lower, upper))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_layer_extent_sentinels() {
        let layer = Layer::time_entries("empty", vec![]);
        assert_eq!(layer.min_time(), i64::MAX);
        assert_eq!(layer.max_time(), i64::MIN);
        assert!(layer.is_empty());
    }

    #[test]
    fn visible_range_inside_window() {
        let layer = Layer::time_entries("a", vec![10, 20, 30, 40]);
        assert_eq!(layer.visible_range(15, 35), Some((1, 2)));
        assert_eq!(layer.visible_range(10, 40), Some((0, 3)));
    }

    #[test]
    fn visible_range_outside_window() {
        let layer = Layer::time_entries("a", vec![10, 20, 30]);
        assert_eq!(layer.visible_range(31, 99), None);
        assert_eq!(layer.visible_range(-5, 9), None);
        assert_eq!(Layer::time_entries("e", vec![]).visible_range(0, 10), None);
    }

    #[test]
    fn graph_layer_shares_time_queries() {
        let layer = Layer::graph("g", vec![1, 2, 3], vec![0.5, 1.5, 2.5]);
        assert_eq!(layer.min_time(), 1);
        assert_eq!(layer.max_time(), 3);
        assert_eq!(layer.visible_range(2, 3), Some((1, 2)));
    }
}

//! The layer registry: owns every layer and answers cross-layer queries.

use crate::config::TimelineConfig;
use crate::data::layer::Layer;
use crate::error::TimelineError;
use crate::search;

/// Ordered collection of the timeline's layers.
///
/// Layer order is display order: index 0 is the topmost row. Names identify
/// layers for removal; adding a second layer with an existing name is
/// allowed, and removal takes the first match.
#[derive(Debug, Clone, Default)]
pub struct LayerRegistry {
    layers: Vec<Layer>,
}

impl LayerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_layer(&mut self, layer: Layer) {
        self.layers.push(layer);
    }

    /// Remove the first layer with the given name. Returns `true` when a
    /// layer was removed; unknown names are a no-op.
    pub fn remove_layer(&mut self, name: &str) -> bool {
        match self.layers.iter().position(|l| l.name() == name) {
            Some(index) => {
                self.layers.remove(index);
                true
            }
            None => false,
        }
    }

    pub fn remove_all_layers(&mut self) {
        self.layers.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    pub fn len(&self) -> usize {
        self.layers.len()
    }

    pub fn get(&self, index: usize) -> Option<&Layer> {
        self.layers.get(index)
    }

    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    /// Smallest time value across all layers.
    ///
    /// Empty layers contribute nothing; with only empty layers the result is
    /// the `i64::MAX` sentinel. Fails when there are no layers at all.
    pub fn min_time(&self) -> Result<i64, TimelineError> {
        self.layers
            .iter()
            .map(Layer::min_time)
            .min()
            .ok_or(TimelineError::NoLayers)
    }

    /// Largest time value across all layers; see [`Self::min_time`].
    pub fn max_time(&self) -> Result<i64, TimelineError> {
        self.layers
            .iter()
            .map(Layer::max_time)
            .max()
            .ok_or(TimelineError::NoLayers)
    }

    /// The data time on `layer_index` closest to `time`, leftmost on ties.
    /// `None` for an empty layer or an out-of-range index.
    pub fn closest_time(&self, time: i64, layer_index: usize) -> Option<i64> {
        let times = self.layers.get(layer_index)?.times();
        search::index_of_closest(times, time).map(|i| times[i])
    }

    /// The data time closest to `time` across the inclusive layer band
    /// `[from_layer, to_layer]` (order-insensitive, clamped to valid rows).
    ///
    /// Computes the per-layer closest candidate, sorts the candidates and
    /// picks the closest among them — so on equal distances the numerically
    /// smaller candidate time wins, regardless of which layer carried it.
    pub fn closest_time_in_band(
        &self,
        time: i64,
        from_layer: usize,
        to_layer: usize,
    ) -> Option<i64> {
        if self.layers.is_empty() {
            return None;
        }
        let lo = from_layer.min(to_layer).min(self.layers.len() - 1);
        let hi = from_layer.max(to_layer).min(self.layers.len() - 1);
        let mut candidates: Vec<i64> = Vec::with_capacity(hi - lo + 1);
        for layer in &self.layers[lo..=hi] {
            if let Some(i) = search::index_of_closest(layer.times(), time) {
                candidates.push(layer.times()[i]);
            }
        }
        candidates.sort_unstable();
        search::index_of_closest(&candidates, time).map(|i| candidates[i])
    }

    /// Total pixel height of all layer rows.
    pub fn rows_height(&self, config: &TimelineConfig) -> i32 {
        self.layers.iter().map(|l| l.row_height(config)).sum()
    }

    /// Pixel span `(top, bottom)` of the row at `index`.
    pub fn row_span(&self, index: usize, config: &TimelineConfig) -> Option<(i32, i32)> {
        let mut top = config.top_padding;
        for (i, layer) in self.layers.iter().enumerate() {
            let bottom = top + layer.row_height(config);
            if i == index {
                return Some((top, bottom));
            }
            top = bottom;
        }
        None
    }

    /// Row index under the y pixel, clamped into the layer band: coordinates
    /// above the first row map to row 0, below the last row to the last row.
    /// `None` only when there are no layers.
    pub fn layer_index_at_y(&self, y: i32, config: &TimelineConfig) -> Option<usize> {
        if self.layers.is_empty() {
            return None;
        }
        let mut top = config.top_padding;
        if y < top {
            return Some(0);
        }
        for (i, layer) in self.layers.iter().enumerate() {
            let bottom = top + layer.row_height(config);
            if y < bottom {
                return Some(i);
            }
            top = bottom;
        }
        Some(self.layers.len() - 1)
    }
}

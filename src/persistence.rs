//! View-state persistence: the visible range and the selection, as JSON.
//!
//! Layer data is never persisted — the embedder owns it. Only the view
//! (zoom + selection) survives a save/load cycle, and a restored state is
//! re-validated against the layers present at load time through the same
//! clamping and snapping paths a live mutation takes.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::selector::TimeSelector;

// ---------- Serializable mirror types ----------

/// Serializable version of the logical selection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum SelectionSerde {
    None,
    SingleValue {
        time: i64,
        layer: usize,
    },
    Interval {
        from: i64,
        to: i64,
        from_layer: usize,
        to_layer: usize,
    },
}

/// Serializable snapshot of the view state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ViewStateSerde {
    pub current_min: i64,
    pub current_max: i64,
    pub default_zoom: bool,
    pub selection: SelectionSerde,
}

impl From<&TimeSelector> for ViewStateSerde {
    fn from(selector: &TimeSelector) -> Self {
        let selection = if let Some((time, layer)) = selector
            .selected_time()
            .zip(selector.selected_layer())
        {
            SelectionSerde::SingleValue { time, layer }
        } else if let Some(((from, to), (from_layer, to_layer))) = selector
            .selected_interval()
            .zip(selector.selected_layer_band())
        {
            SelectionSerde::Interval {
                from,
                to,
                from_layer,
                to_layer,
            }
        } else {
            SelectionSerde::None
        };
        Self {
            current_min: selector.current_min_time(),
            current_max: selector.current_max_time(),
            default_zoom: selector.viewport().is_default_zoom(),
            selection,
        }
    }
}

impl ViewStateSerde {
    /// Apply the stored view state to a selector.
    ///
    /// The visible range is re-clamped into the current extent and the
    /// selection goes through the live snapping/clamping paths, so stale
    /// state (layers removed since the save) degrades instead of breaking
    /// invariants.
    pub fn apply_to(self, selector: &mut TimeSelector) {
        selector.restore_view_state(self.current_min, self.current_max, self.default_zoom);
        match self.selection {
            SelectionSerde::None => {
                selector.clear_selection();
            }
            SelectionSerde::SingleValue { time, layer } => {
                selector.select_time(time, layer);
            }
            SelectionSerde::Interval {
                from,
                to,
                from_layer,
                to_layer,
            } => {
                selector.restore_interval(from, to, from_layer, to_layer);
            }
        }
    }
}

// ---------- Public API ----------

/// Serialize the view state as pretty JSON.
pub fn state_to_json(state: &ViewStateSerde) -> Result<String, String> {
    serde_json::to_string_pretty(state).map_err(|e| e.to_string())
}

/// Deserialize view state from JSON.
pub fn state_from_json(json: &str) -> Result<ViewStateSerde, String> {
    serde_json::from_str(json).map_err(|e| e.to_string())
}

/// Save the view state to a JSON file at the given path.
pub fn save_state_to_path(state: &ViewStateSerde, path: &Path) -> Result<(), String> {
    let txt = state_to_json(state)?;
    std::fs::write(path, txt).map_err(|e| e.to_string())
}

/// Load the view state from a JSON file at the given path.
pub fn load_state_from_path(path: &Path) -> Result<ViewStateSerde, String> {
    let txt = std::fs::read_to_string(path).map_err(|e| e.to_string())?;
    state_from_json(&txt)
}

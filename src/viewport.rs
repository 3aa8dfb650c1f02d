//! The visible sub-range of the timeline and its zoom/pan rules.

use tracing::trace;

use crate::config::TimelineConfig;

/// Zoomable, pannable window into the full time extent.
///
/// Invariant after every operation: `min_time <= current_min <= current_max
/// <= max_time`. In the default (unzoomed) state the visible range equals the
/// full extent and `is_default_zoom` reports `true`; any zoom-in leaves the
/// default state, and a zoom-out that would overshoot the extent on either
/// side snaps back to it.
///
/// Zoom arithmetic runs in `f64` and truncates to integer time units after
/// each step, so a zoom-in followed by an equal zoom-out need not restore the
/// previous bounds exactly. That is accepted behaviour, not something to
/// compensate for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VisibleArea {
    min_time: i64,
    max_time: i64,
    current_min: i64,
    current_max: i64,
    no_zoom: bool,
}

impl Default for VisibleArea {
    fn default() -> Self {
        Self {
            min_time: 0,
            max_time: 0,
            current_min: 0,
            current_max: 0,
            no_zoom: true,
        }
    }
}

impl VisibleArea {
    pub fn new() -> Self {
        Self::default()
    }

    /// Recompute the full extent as `[0, new_max_time]`. In the default state
    /// the visible range follows the extent; otherwise the existing visible
    /// range is re-clamped into it, collapsing back to the default when
    /// clamping would invert the range.
    pub fn update_extent(&mut self, new_max_time: i64) {
        self.min_time = 0;
        self.max_time = new_max_time;
        if self.no_zoom {
            self.set_default_zoom();
        } else {
            self.trim_zoom();
        }
    }

    pub fn min_time(&self) -> i64 {
        self.min_time
    }

    pub fn max_time(&self) -> i64 {
        self.max_time
    }

    pub fn current_min_time(&self) -> i64 {
        self.current_min
    }

    pub fn current_max_time(&self) -> i64 {
        self.current_max
    }

    /// `true` while the visible range tracks the full extent.
    pub fn is_default_zoom(&self) -> bool {
        self.no_zoom
    }

    /// Shrink the visible range around `center`, `times` steps of
    /// `config.zoom_ratio` each.
    pub fn zoom_in(&mut self, times: u32, center: i64, config: &TimelineConfig) {
        self.no_zoom = false;
        for _ in 0..times {
            self.scale_around(center, config.zoom_ratio);
        }
        trace!(current_min = self.current_min, current_max = self.current_max, "zoom in");
    }

    /// Grow the visible range around `center`. Overshooting the extent on
    /// either side snaps back to the full-extent default instead of leaving
    /// an inconsistent range.
    pub fn zoom_out(&mut self, times: u32, center: i64, config: &TimelineConfig) {
        for _ in 0..times {
            self.scale_around(center, 1.0 / config.zoom_ratio);
        }
        if self.current_max > self.max_time || self.current_min < self.min_time {
            self.set_default_zoom();
        }
        trace!(current_min = self.current_min, current_max = self.current_max, "zoom out");
    }

    fn scale_around(&mut self, center: i64, ratio: f64) {
        self.current_min = (center as f64 - (center - self.current_min) as f64 * ratio) as i64;
        self.current_max = (center as f64 + (self.current_max - center) as f64 * ratio) as i64;
    }

    /// Pan the visible window by `offset` time units. The offset is first
    /// reduced to the largest amount that keeps both edges inside the extent,
    /// then applied to both edges, so the window width never changes.
    pub fn move_visible_area(&mut self, offset: i64) {
        let mut offset = offset;
        if self.current_min + offset < self.min_time {
            offset = self.min_time - self.current_min;
        }
        if self.current_max + offset > self.max_time {
            offset = self.max_time - self.current_max;
        }
        self.current_min += offset;
        self.current_max += offset;
    }

    /// Inclusive membership test against the visible range.
    pub fn contains(&self, time: i64) -> bool {
        time >= self.current_min && time <= self.current_max
    }

    fn set_default_zoom(&mut self) {
        self.no_zoom = true;
        self.current_min = self.min_time;
        self.current_max = self.max_time;
    }

    fn trim_zoom(&mut self) {
        self.current_max = self.current_max.min(self.max_time);
        self.current_min = self.current_min.max(self.min_time);
        if self.current_max <= self.current_min {
            self.set_default_zoom();
        }
    }

    /// Restore a persisted visible range, re-validating it against the
    /// current extent exactly like a live zoom would be.
    pub(crate) fn restore(&mut self, current_min: i64, current_max: i64, no_zoom: bool) {
        if no_zoom {
            self.set_default_zoom();
            return;
        }
        self.no_zoom = false;
        self.current_min = current_min;
        self.current_max = current_max;
        self.trim_zoom();
    }
}

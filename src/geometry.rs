//! Pixel↔time mapping and label geometry.
//!
//! The engine draws nothing itself. Once per layout pass the renderer
//! reports the component width and the width of the legend column (layer
//! names), and afterwards asks this module for positions: where a time value
//! sits in pixels, which time a pixel corresponds to, and where a text label
//! of a measured width may be placed without running off the component.

use crate::config::TimelineConfig;
use crate::interval;
use crate::viewport::VisibleArea;

/// Layout of the timeline strip within the component.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TimelineGeometry {
    /// Width of the legend column on the left, in pixels.
    pub legend_width: i32,
    /// Width of the strip where points are drawn.
    pub timeline_width: i32,
    /// Total component width.
    pub component_width: i32,
}

impl TimelineGeometry {
    /// Derive the strip width from the component and legend widths, leaving
    /// room for the trailing padding and point radius.
    pub fn from_layout(component_width: i32, legend_width: i32, config: &TimelineConfig) -> Self {
        let timeline_width = component_width - legend_width - config.padding - config.point_radius;
        Self {
            legend_width,
            timeline_width: timeline_width.max(0),
            component_width,
        }
    }

    /// Time value under the absolute x pixel, interpolated across the visible
    /// range and rounded to the nearest time unit.
    pub fn time_at(&self, x: i32, area: &VisibleArea) -> i64 {
        if self.timeline_width <= 0 {
            return area.current_min_time();
        }
        let span = (area.current_max_time() - area.current_min_time()) as f64;
        let rel = (x - self.legend_width) as f64;
        area.current_min_time() + (span * rel / self.timeline_width as f64).round() as i64
    }

    /// Absolute x pixel of a time value, rounded to the nearest pixel.
    /// Inverse of [`Self::time_at`] up to rounding.
    pub fn x_at(&self, time: i64, area: &VisibleArea) -> i32 {
        let span = (area.current_max_time() - area.current_min_time()) as f64;
        if span <= 0.0 {
            return self.legend_width;
        }
        let percent = (time - area.current_min_time()) as f64 / span;
        self.legend_width + (percent * self.timeline_width as f64).round() as i32
    }

    /// Convert a pixel span to a time span at the current zoom.
    pub fn time_distance(&self, px: i32, area: &VisibleArea) -> i64 {
        if self.timeline_width <= 0 {
            return 0;
        }
        let span = (area.current_max_time() - area.current_min_time()) as f64;
        (span * px as f64 / self.timeline_width as f64).round() as i64
    }

    /// Place the point-selection label next to the cursor line at `x`.
    ///
    /// The label normally sits right of the line; when it would overrun the
    /// component edge it flips to the left side.
    pub fn place_point_label(&self, x: i32, text_width: i32, config: &TimelineConfig) -> LabelSpan {
        let x1 = if x + text_width + 2 * config.padding > self.component_width {
            x - config.padding - text_width
        } else {
            x + config.padding
        };
        LabelSpan {
            x1,
            x2: x1 + text_width,
        }
    }

    /// Place the from/to labels of an interval selection whose edge lines sit
    /// at `x1 <= x2`.
    ///
    /// The left label prefers the right side of its line but flips outward
    /// when it would cross the right line (if that line is drawn) or the
    /// component edge. The right label prefers the right side of its line and
    /// folds inside only when it overruns the edge *and* the inside position
    /// does not collide with the placed left label; otherwise the overrun
    /// position is kept and the renderer clips it.
    pub fn place_interval_labels(
        &self,
        x1: i32,
        x2: i32,
        left_width: i32,
        right_width: i32,
        left_drawn: bool,
        right_drawn: bool,
        config: &TimelineConfig,
    ) -> (LabelSpan, LabelSpan) {
        let pad = config.padding;
        let max_x = self.component_width - pad;

        let mut left = LabelSpan {
            x1: x1 + pad,
            x2: x1 + pad + left_width,
        };
        if (right_drawn && left.x2 > x2) || left.x2 > max_x {
            left = LabelSpan {
                x1: x1 - pad - left_width,
                x2: x1 - pad,
            };
        }

        let mut right = LabelSpan {
            x1: x2 + pad,
            x2: x2 + pad + right_width,
        };
        if right.x2 > max_x {
            let alt = LabelSpan {
                x1: x2 - pad - right_width,
                x2: x2 - pad,
            };
            if !left_drawn || alt.x1 > left.x2 {
                right = alt;
            }
        }
        (left, right)
    }
}

/// Horizontal extent of a rendered text label.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LabelSpan {
    pub x1: i32,
    pub x2: i32,
}

impl LabelSpan {
    pub fn width(&self) -> i32 {
        self.x2 - self.x1
    }

    /// Half-open overlap with the pixel span `[a, b)`.
    pub fn overlaps(&self, a: i32, b: i32) -> bool {
        interval::collision(self.x1, self.x2, a, b)
    }
}

/// The drag rectangle shown while an interval selection is in progress,
/// before release commits it.
#[derive(Debug, Clone, Copy, Default)]
pub struct RectangleGuides {
    visible: bool,
    x1: i32,
    x2: i32,
}

impl RectangleGuides {
    /// Update the guide from the drag anchor and the current pointer x; the
    /// stored span is always ordered.
    pub fn drag(&mut self, anchor_x: i32, x: i32) {
        self.visible = true;
        self.x1 = anchor_x.min(x);
        self.x2 = anchor_x.max(x);
    }

    pub fn hide(&mut self) {
        self.visible = false;
    }

    pub fn visible(&self) -> bool {
        self.visible
    }

    /// The guide span clamped into `[min_x, max_x]` for drawing.
    pub fn clamped_span(&self, min_x: i32, max_x: i32) -> (i32, i32) {
        (self.x1.clamp(min_x, max_x), self.x2.clamp(min_x, max_x))
    }
}

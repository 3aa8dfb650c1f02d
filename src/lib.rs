//! Timeline selection engine: sorted-time search, a zoomable viewport and
//! snap-to-data selection for an interactive timeline widget.
//!
//! The crate contains no drawing or toolkit code. An embedding widget owns a
//! [`TimeSelector`], forwards pixel coordinates from its input events and
//! re-queries positions, labels and the current selection when it paints:
//!
//! - `search`: duplicate-aware binary-search primitives over sorted arrays
//! - `data`: layers and the registry answering cross-layer time queries
//! - `viewport`: the visible sub-range with zoom/pan clamping
//! - `geometry`: pixel↔time conversion and label placement
//! - `selection`: the point/interval selection state machine
//! - `selector`: the facade tying everything together
//! - `events`: filtered change subscriptions
//! - `format` / `persistence`: label text and view-state snapshots

pub mod config;
pub mod data;
pub mod error;
pub mod events;
pub mod format;
pub mod geometry;
pub mod interval;
pub mod persistence;
pub mod search;
pub mod selection;
pub mod selector;
pub mod viewport;

// Public re-exports for a compact external API
pub use config::TimelineConfig;
pub use data::layer::{Layer, LayerKind};
pub use data::registry::LayerRegistry;
pub use error::TimelineError;
pub use events::{EventController, EventFilter, EventKind, TimelineEvent};
pub use format::{EpochUnit, TimeFormatter};
pub use geometry::{LabelSpan, RectangleGuides, TimelineGeometry};
pub use selection::SelectionKind;
pub use selector::TimeSelector;
pub use viewport::VisibleArea;

//! Change notification for the timeline engine.
//!
//! Consumers subscribe to [`EventController`] with an [`EventFilter`] and
//! receive [`TimelineEvent`]s on an `mpsc` channel whenever a mutation
//! actually changed something. Each event carries a set of [`EventKind`]
//! flags (bitflags-style) so that a single occurrence can match multiple
//! categories.
//!
//! Delivery is by channel, not by callback: a subscriber drains its receiver
//! at its own pace and can never re-enter the engine in the middle of a
//! notification. Subscribers receive events in registration order.

use std::sync::mpsc::{Receiver, Sender};
use std::sync::{Arc, Mutex};

use crate::selection::SelectionKind;

// ─────────────────────────────────────────────────────────────────────────────
// EventKind – bitflags
// ─────────────────────────────────────────────────────────────────────────────

/// Bitflags describing the categories an event belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EventKind(pub u32);

impl EventKind {
    /// A single time value was selected.
    pub const TIME_SELECTED: Self = Self(1 << 0);
    /// A time interval was selected.
    pub const INTERVAL_SELECTED: Self = Self(1 << 1);
    /// The selection was cleared (explicitly, by a rejected click, or by
    /// layer removal pruning it).
    pub const SELECTION_CLEARED: Self = Self(1 << 2);
    /// The visible range was zoomed.
    pub const ZOOM: Self = Self(1 << 3);
    /// The visible range was panned.
    pub const PAN: Self = Self(1 << 4);
    /// The full data extent changed.
    pub const EXTENT_CHANGED: Self = Self(1 << 5);
    /// A layer was added.
    pub const LAYER_ADDED: Self = Self(1 << 6);
    /// A layer was removed.
    pub const LAYER_REMOVED: Self = Self(1 << 7);
    /// All layers were removed at once.
    pub const LAYERS_CLEARED: Self = Self(1 << 8);

    /// Any change to the logical selection.
    pub const SELECTION: Self = Self(
        Self::TIME_SELECTED.0 | Self::INTERVAL_SELECTED.0 | Self::SELECTION_CLEARED.0,
    );

    /// Wildcard: matches every event kind.
    pub const ALL: Self = Self(u32::MAX);

    /// Check whether `self` contains all bits in `other`.
    #[inline]
    pub const fn contains(self, other: Self) -> bool {
        (self.0 & other.0) == other.0
    }

    /// Check whether `self` intersects with `other` (at least one bit in common).
    #[inline]
    pub const fn intersects(self, other: Self) -> bool {
        (self.0 & other.0) != 0
    }

    /// Returns `true` if no bits are set.
    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl std::ops::BitOr for EventKind {
    type Output = Self;
    #[inline]
    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl std::ops::BitOrAssign for EventKind {
    #[inline]
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl std::ops::BitAnd for EventKind {
    type Output = Self;
    #[inline]
    fn bitand(self, rhs: Self) -> Self {
        Self(self.0 & rhs.0)
    }
}

impl std::fmt::Display for EventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_empty() {
            return write!(f, "EMPTY");
        }
        if *self == EventKind::ALL {
            return write!(f, "ALL");
        }

        let pairs: &[(EventKind, &str)] = &[
            (EventKind::TIME_SELECTED, "TIME_SELECTED"),
            (EventKind::INTERVAL_SELECTED, "INTERVAL_SELECTED"),
            (EventKind::SELECTION_CLEARED, "SELECTION_CLEARED"),
            (EventKind::ZOOM, "ZOOM"),
            (EventKind::PAN, "PAN"),
            (EventKind::EXTENT_CHANGED, "EXTENT_CHANGED"),
            (EventKind::LAYER_ADDED, "LAYER_ADDED"),
            (EventKind::LAYER_REMOVED, "LAYER_REMOVED"),
            (EventKind::LAYERS_CLEARED, "LAYERS_CLEARED"),
        ];

        let mut names = Vec::new();
        let mut known_bits: u32 = 0;
        for (kind, name) in pairs {
            known_bits |= kind.0;
            if self.contains(*kind) {
                names.push((*name).to_string());
            }
        }
        let extra = self.0 & !known_bits;
        if extra != 0 {
            names.push(format!("0x{:x}", extra));
        }
        write!(f, "{}", names.join("|"))
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Metadata – per-event-type payloads
// ─────────────────────────────────────────────────────────────────────────────

/// Metadata attached to selection events.
#[derive(Debug, Clone)]
pub struct SelectionMeta {
    /// Shape of the selection after the change.
    pub kind: SelectionKind,
    /// Selected time for a single-value selection.
    pub time: Option<i64>,
    /// Layer of a single-value selection.
    pub layer: Option<usize>,
    /// Selected range for an interval selection.
    pub interval: Option<(i64, i64)>,
    /// Inclusive layer band of an interval selection.
    pub layer_band: Option<(usize, usize)>,
}

/// Metadata for zoom/pan/extent events.
#[derive(Debug, Clone, Copy)]
pub struct ViewMeta {
    /// Visible range after the change.
    pub visible: (i64, i64),
    /// Whether the view is back in the full-extent default state.
    pub default_zoom: bool,
}

/// Metadata for layer add/remove events.
#[derive(Debug, Clone)]
pub struct LayerMeta {
    /// Name of the layer that changed.
    pub name: String,
}

/// An event emitted by the engine after a mutation changed something.
///
/// `kinds` is a bitflag set of [`EventKind`] categories; the `Option` fields
/// carry the metadata relevant to the kinds that are set. The selection
/// accessors on the facade remain the source of truth — an event tells a
/// consumer *that* it should re-query, the metadata is a convenience.
#[derive(Debug, Clone)]
pub struct TimelineEvent {
    pub kinds: EventKind,
    /// Seconds since the controller was created.
    pub timestamp: f64,
    pub selection: Option<SelectionMeta>,
    pub view: Option<ViewMeta>,
    pub layer: Option<LayerMeta>,
}

impl TimelineEvent {
    /// Create a new event with the given kinds; the timestamp is set on emit.
    pub fn new(kinds: EventKind) -> Self {
        Self {
            kinds,
            timestamp: 0.0,
            selection: None,
            view: None,
            layer: None,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// EventFilter
// ─────────────────────────────────────────────────────────────────────────────

/// Selects which event categories a subscriber receives.
///
/// The filter is an OR-mask: an event is delivered when
/// `event.kinds.intersects(filter.mask)`.
#[derive(Debug, Clone, Copy)]
pub struct EventFilter {
    pub mask: EventKind,
}

impl EventFilter {
    /// Accept all events.
    pub const fn all() -> Self {
        Self {
            mask: EventKind::ALL,
        }
    }

    /// Accept only the specified event kinds.
    pub const fn only(mask: EventKind) -> Self {
        Self { mask }
    }

    /// Check whether an event passes this filter.
    #[inline]
    pub fn matches(&self, event: &TimelineEvent) -> bool {
        event.kinds.intersects(self.mask)
    }
}

impl Default for EventFilter {
    fn default() -> Self {
        Self::all()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// EventController
// ─────────────────────────────────────────────────────────────────────────────

struct Subscriber {
    filter: EventFilter,
    sender: Sender<TimelineEvent>,
}

/// Collects and distributes engine events to subscribers.
///
/// Cloning the controller shares the subscriber list; the facade holds one
/// clone and hands out others via [`crate::selector::TimeSelector::events`].
#[derive(Clone)]
pub struct EventController {
    inner: Arc<Mutex<EventCtrlInner>>,
}

struct EventCtrlInner {
    subscribers: Vec<Subscriber>,
    start_instant: std::time::Instant,
}

impl EventController {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(EventCtrlInner {
                subscribers: Vec::new(),
                start_instant: std::time::Instant::now(),
            })),
        }
    }

    /// Subscribe to events matching the given filter.
    pub fn subscribe(&self, filter: EventFilter) -> Receiver<TimelineEvent> {
        let (tx, rx) = std::sync::mpsc::channel();
        let mut inner = self.inner.lock().unwrap();
        inner.subscribers.push(Subscriber { filter, sender: tx });
        rx
    }

    /// Subscribe to every event (no filtering).
    pub fn subscribe_all(&self) -> Receiver<TimelineEvent> {
        self.subscribe(EventFilter::all())
    }

    /// Emit an event to all matching subscribers. Subscribers whose receiver
    /// was dropped are pruned.
    ///
    /// Called by the facade after a successful mutation; it is public so
    /// embedding code can inject synthetic events.
    pub fn emit(&self, mut event: TimelineEvent) {
        let mut inner = self.inner.lock().unwrap();
        event.timestamp = inner.start_instant.elapsed().as_secs_f64();
        inner.subscribers.retain(|sub| {
            if sub.filter.matches(&event) {
                sub.sender.send(event.clone()).is_ok()
            } else {
                true
            }
        });
    }
}

impl Default for EventController {
    fn default() -> Self {
        Self::new()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Unit tests
// ─────────────────────────────────────────────────────────────────────────────

//! Domain events emitted by the anchor group manager.
//!
//! Events are purely observational: the manager behaves identically whether
//! or not a sink is attached. Per-tick refreshes are not evented (they happen
//! every tracking cycle and would swamp any log); they are traced instead.

use chrono::{DateTime, Utc};

use super::marker::{MarkerId, TemplateRef};

/// Observable lifecycle events for anchor groups.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AnchorEvent {
    /// A new group finished creation (possibly partial, see `placed`).
    GroupCreated {
        /// Marker the group is anchored to.
        marker_id: MarkerId,
        /// Number of objects actually placed (equals arity unless creation
        /// failed partway).
        placed: usize,
        /// Configured group arity.
        arity: usize,
        /// When the group was created.
        timestamp: DateTime<Utc>,
    },

    /// The placement backend failed while instantiating or repositioning.
    PlacementFailed {
        /// Marker whose group was being processed.
        marker_id: MarkerId,
        /// Slot index at which the failure occurred.
        slot_index: usize,
        /// Template the slot was configured with.
        template: TemplateRef,
        /// Backend error description.
        reason: String,
        /// When the failure occurred.
        timestamp: DateTime<Utc>,
    },

    /// A group was removed via the release hook.
    GroupReleased {
        /// Marker whose group was released.
        marker_id: MarkerId,
        /// Number of handles handed back to the caller.
        released: usize,
        /// When the release happened.
        timestamp: DateTime<Utc>,
    },
}

impl AnchorEvent {
    /// Get the timestamp of the event.
    pub fn timestamp(&self) -> DateTime<Utc> {
        match self {
            Self::GroupCreated { timestamp, .. } => *timestamp,
            Self::PlacementFailed { timestamp, .. } => *timestamp,
            Self::GroupReleased { timestamp, .. } => *timestamp,
        }
    }

    /// Get the event type name.
    pub fn event_type(&self) -> &'static str {
        match self {
            Self::GroupCreated { .. } => "GroupCreated",
            Self::PlacementFailed { .. } => "PlacementFailed",
            Self::GroupReleased { .. } => "GroupReleased",
        }
    }

    /// Get the marker ID associated with this event.
    pub fn marker_id(&self) -> &MarkerId {
        match self {
            Self::GroupCreated { marker_id, .. } => marker_id,
            Self::PlacementFailed { marker_id, .. } => marker_id,
            Self::GroupReleased { marker_id, .. } => marker_id,
        }
    }
}

/// Sink for anchor lifecycle events.
pub trait AnchorEventSink: Send + Sync {
    /// Record one event.
    fn record(&self, event: AnchorEvent);
}

/// In-memory event log implementation.
#[derive(Debug, Default)]
pub struct MemoryEventLog {
    events: parking_lot::RwLock<Vec<AnchorEvent>>,
}

impl MemoryEventLog {
    /// Create a new empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get all recorded events.
    pub fn all(&self) -> Vec<AnchorEvent> {
        self.events.read().clone()
    }

    /// Get events at or after a timestamp.
    pub fn since(&self, timestamp: DateTime<Utc>) -> Vec<AnchorEvent> {
        self.events
            .read()
            .iter()
            .filter(|e| e.timestamp() >= timestamp)
            .cloned()
            .collect()
    }

    /// Get events for a specific marker.
    pub fn for_marker(&self, marker_id: &MarkerId) -> Vec<AnchorEvent> {
        self.events
            .read()
            .iter()
            .filter(|e| e.marker_id() == marker_id)
            .cloned()
            .collect()
    }

    /// Number of recorded events.
    pub fn len(&self) -> usize {
        self.events.read().len()
    }

    /// True if nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.events.read().is_empty()
    }
}

impl AnchorEventSink for MemoryEventLog {
    fn record(&self, event: AnchorEvent) {
        self.events.write().push(event);
    }
}

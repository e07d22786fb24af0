//! AnchorGroupManager: the component that keeps per-marker object groups
//! instantiated and positioned.
//!
//! Consumes batched add/update events from a marker-tracking source and
//! drives the placement backend per batch: every `added` marker gets a
//! fixed-arity group created in slot order, every `updated` marker gets its
//! existing group snapped to the latest pose. All processing is synchronous
//! within the delivering call.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::Utc;

use super::{group::AnchorGroup, slots::SlotSpec};
use crate::domain::{AnchorEvent, AnchorEventSink, MarkerId, Pose};
use crate::placement::{PlacementBackend, PlacementError};
use crate::{AnchorError, Result};

/// Summary of what happened during one tracking batch.
///
/// Placement failures are surfaced here rather than aborting the batch: one
/// marker's failure never blocks the markers after it.
#[derive(Debug, Default)]
pub struct BatchSummary {
    /// Markers for which a new group was allocated this batch (including
    /// partially created groups; those also appear in `failures`).
    pub created: Vec<MarkerId>,
    /// Markers whose existing groups were repositioned.
    pub refreshed: Vec<MarkerId>,
    /// `added` entries ignored because a group already existed.
    pub duplicate_adds: Vec<MarkerId>,
    /// `updated` entries ignored because no group exists for the marker.
    pub orphan_updates: Vec<MarkerId>,
    /// Placement backend failures, per marker.
    pub failures: Vec<(MarkerId, PlacementError)>,
}

impl BatchSummary {
    /// True if the batch completed without placement failures.
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Manages the mapping from tracked markers to their anchored object groups.
///
/// Lifecycle: `configure` once at startup, `activate` to start consuming
/// batches, `deactivate` to stop. Deactivation only stops event intake; it
/// neither destroys placed objects nor clears the registry.
pub struct AnchorGroupManager {
    backend: Arc<dyn PlacementBackend>,
    sink: Option<Arc<dyn AnchorEventSink>>,
    slot_spec: SlotSpec,
    configured: bool,
    registry: HashMap<MarkerId, AnchorGroup>,
    active: bool,
    /// Set on first activation and never cleared; the slot spec is immutable
    /// from that point on, even across deactivation.
    ever_activated: bool,
}

impl AnchorGroupManager {
    /// Create a manager driving the given placement backend.
    pub fn new(backend: Arc<dyn PlacementBackend>) -> Self {
        Self {
            backend,
            sink: None,
            slot_spec: SlotSpec::empty(),
            configured: false,
            registry: HashMap::new(),
            active: false,
            ever_activated: false,
        }
    }

    /// Attach an observational event sink.
    pub fn with_event_sink(mut self, sink: Arc<dyn AnchorEventSink>) -> Self {
        self.sink = Some(sink);
        self
    }

    /// Set the per-slot templates and offsets.
    ///
    /// Must be called before activation; re-calling before the first
    /// activation replaces the spec, but once `activate` has ever run the
    /// spec is immutable and this returns a configuration error. An empty
    /// spec is valid (arity 0, every batch is a no-op).
    pub fn configure(&mut self, slot_spec: SlotSpec) -> Result<()> {
        if self.ever_activated {
            return Err(AnchorError::Config(
                "slot spec is immutable once the manager has been activated".into(),
            ));
        }
        if let Err(index) = slot_spec.validate() {
            return Err(AnchorError::Config(format!(
                "slot {index} has an empty template key"
            )));
        }
        self.slot_spec = slot_spec;
        self.configured = true;
        Ok(())
    }

    /// Begin consuming tracking batches. Idempotent.
    pub fn activate(&mut self) -> Result<()> {
        if !self.configured {
            return Err(AnchorError::Config(
                "activate called before configure".into(),
            ));
        }
        if self.active {
            return Ok(());
        }
        self.active = true;
        self.ever_activated = true;
        tracing::debug!(arity = self.slot_spec.arity(), "anchor manager activated");
        Ok(())
    }

    /// Stop consuming tracking batches. Idempotent; keeps all placed objects
    /// and the registry intact.
    pub fn deactivate(&mut self) {
        if self.active {
            self.active = false;
            tracing::debug!(
                tracked = self.registry.len(),
                "anchor manager deactivated"
            );
        }
    }

    /// True while subscribed to the tracking source.
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// The configured slot spec.
    pub fn slot_spec(&self) -> &SlotSpec {
        &self.slot_spec
    }

    /// The group anchored to a marker, if tracked.
    pub fn group(&self, marker_id: &MarkerId) -> Option<&AnchorGroup> {
        self.registry.get(marker_id)
    }

    /// Number of markers currently tracked.
    pub fn tracked_count(&self) -> usize {
        self.registry.len()
    }

    /// Entry point invoked by the tracking source once per cycle.
    ///
    /// All of `added` is processed before any of `updated`, so a marker
    /// appearing in both lists within one batch is created first and then
    /// snapped to its updated pose. Batches delivered while deactivated are
    /// dropped (the manager is unsubscribed) and yield an empty summary.
    pub fn on_trackables_changed(
        &mut self,
        added: &[(MarkerId, Pose)],
        updated: &[(MarkerId, Pose)],
    ) -> BatchSummary {
        let mut summary = BatchSummary::default();
        if !self.active {
            return summary;
        }

        for (marker_id, pose) in added {
            self.create_group(marker_id, pose, &mut summary);
        }
        for (marker_id, pose) in updated {
            self.refresh_group(marker_id, pose, &mut summary);
        }

        summary
    }

    /// Remove a marker's group from the registry without touching the
    /// backend.
    ///
    /// Removal hook for hosts that do receive marker-removed notifications:
    /// the handles are handed back so the caller can decide whether to
    /// despawn them or let the backend's parent hierarchy tear them down.
    pub fn release_marker(&mut self, marker_id: &MarkerId) -> Option<AnchorGroup> {
        let group = self.registry.remove(marker_id)?;
        tracing::debug!(marker_id = %marker_id, released = group.len(), "group released");
        self.emit(AnchorEvent::GroupReleased {
            marker_id: marker_id.clone(),
            released: group.len(),
            timestamp: Utc::now(),
        });
        Some(group)
    }

    /// Create the fixed-arity group for a newly added marker.
    ///
    /// A duplicate add leaves the existing group untouched. A placement
    /// failure aborts the remaining slots for this marker only; the partial
    /// group is retained, not rolled back.
    fn create_group(&mut self, marker_id: &MarkerId, pose: &Pose, summary: &mut BatchSummary) {
        if self.registry.contains_key(marker_id) {
            tracing::warn!(marker_id = %marker_id, "duplicate add ignored, group kept");
            summary.duplicate_adds.push(marker_id.clone());
            return;
        }

        self.registry.insert(marker_id.clone(), AnchorGroup::new());
        let spec = self.slot_spec.clone();

        for (index, slot) in spec.iter().enumerate() {
            let position = pose.anchored_position(slot.offset);
            match self
                .backend
                .instantiate(&slot.template, position, pose.rotation, marker_id)
            {
                Ok(handle) => {
                    if let Some(group) = self.registry.get_mut(marker_id) {
                        group.push(handle);
                    }
                }
                Err(err) => {
                    tracing::warn!(
                        marker_id = %marker_id,
                        slot = index,
                        template = %slot.template,
                        error = %err,
                        "instantiate failed, remaining slots skipped"
                    );
                    self.emit(AnchorEvent::PlacementFailed {
                        marker_id: marker_id.clone(),
                        slot_index: index,
                        template: slot.template.clone(),
                        reason: err.to_string(),
                        timestamp: Utc::now(),
                    });
                    summary.failures.push((marker_id.clone(), err));
                    break;
                }
            }
        }

        let placed = self.registry.get(marker_id).map_or(0, AnchorGroup::len);
        tracing::debug!(
            marker_id = %marker_id,
            placed,
            arity = spec.arity(),
            "group created"
        );
        self.emit(AnchorEvent::GroupCreated {
            marker_id: marker_id.clone(),
            placed,
            arity: spec.arity(),
            timestamp: Utc::now(),
        });
        summary.created.push(marker_id.clone());
    }

    /// Snap an existing group to the marker's latest pose.
    ///
    /// Unknown markers are ignored (tracking sources may emit an update
    /// before the consumer saw the add in rare orderings). No interpolation:
    /// the group overwrites to exactly the source's pose every tick.
    fn refresh_group(&self, marker_id: &MarkerId, pose: &Pose, summary: &mut BatchSummary) {
        let Some(group) = self.registry.get(marker_id) else {
            tracing::trace!(marker_id = %marker_id, "update for unknown marker ignored");
            summary.orphan_updates.push(marker_id.clone());
            return;
        };

        for (index, handle) in group.iter().enumerate() {
            // Groups are never longer than the spec, so the slot exists.
            let Some(slot) = self.slot_spec.get(index) else {
                break;
            };
            let position = pose.anchored_position(slot.offset);
            if let Err(err) = self.backend.set_transform(handle, position, pose.rotation) {
                tracing::warn!(
                    marker_id = %marker_id,
                    slot = index,
                    error = %err,
                    "reposition failed, remaining slots skipped"
                );
                self.emit(AnchorEvent::PlacementFailed {
                    marker_id: marker_id.clone(),
                    slot_index: index,
                    template: slot.template.clone(),
                    reason: err.to_string(),
                    timestamp: Utc::now(),
                });
                summary.failures.push((marker_id.clone(), err));
                break;
            }
        }

        tracing::trace!(marker_id = %marker_id, "group refreshed");
        summary.refreshed.push(marker_id.clone());
    }

    fn emit(&self, event: AnchorEvent) {
        if let Some(sink) = &self.sink {
            sink.record(event);
        }
    }
}

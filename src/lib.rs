//! # artrack-anchors
//!
//! Anchor group management for image-marker AR tracking sessions.
//!
//! An external tracking source continuously estimates the pose of physical
//! image markers and delivers batched add/update events, one batch per
//! tracking cycle. This crate keeps each tracked marker paired with a
//! fixed-arity group of virtual objects placed at constant offsets from the
//! marker, creating the group when the marker first appears and snapping it
//! to the latest pose on every update.
//!
//! Detection, pose estimation, rendering, and asset loading stay outside:
//! the crate consumes poses as given and talks to the host's object system
//! only through the [`PlacementBackend`] seam.
//!
//! ## Example
//!
//! ```rust
//! use std::sync::Arc;
//! use artrack_anchors::{
//!     AnchorGroupManager, MarkerId, MemoryBackend, Pose, SlotDef, SlotSpec, Vec3,
//! };
//!
//! fn main() -> artrack_anchors::Result<()> {
//!     let backend = Arc::new(MemoryBackend::new());
//!     let mut manager = AnchorGroupManager::new(backend.clone());
//!
//!     manager.configure(SlotSpec::new(vec![
//!         SlotDef::new("dragon", Vec3::new(0.0, 1.0, 0.0)),
//!         SlotDef::new("castle", Vec3::new(0.0, 0.0, 1.0)),
//!     ]))?;
//!     manager.activate()?;
//!
//!     // One tracking cycle: a marker appeared.
//!     let batch = manager.on_trackables_changed(
//!         &[(MarkerId::new("target-01"), Pose::at(10.0, 0.0, 0.0))],
//!         &[],
//!     );
//!     assert_eq!(batch.created.len(), 1);
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod anchoring;
pub mod domain;
pub mod placement;

// Re-export main types
pub use anchoring::{AnchorGroup, AnchorGroupManager, BatchSummary, SlotDef, SlotSpec};
pub use domain::{
    events::{AnchorEvent, AnchorEventSink, MemoryEventLog},
    marker::{MarkerId, TemplateRef},
    pose::{Pose, Rotation, Vec3},
};
pub use placement::{MemoryBackend, ObjectHandle, PlacedObject, PlacementBackend, PlacementError};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Common result type for anchor operations
pub type Result<T> = std::result::Result<T, AnchorError>;

/// Unified error type for anchor operations
#[derive(Debug, thiserror::Error)]
pub enum AnchorError {
    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),

    /// Placement backend error
    #[error("placement error: {0}")]
    Placement(#[from] PlacementError),
}

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        AnchorError, Result,
        // Core component
        AnchorGroup, AnchorGroupManager, BatchSummary,
        // Configuration
        SlotDef, SlotSpec,
        // Domain types
        MarkerId, Pose, Rotation, TemplateRef, Vec3,
        // Placement seam
        MemoryBackend, ObjectHandle, PlacementBackend, PlacementError,
        // Events
        AnchorEvent, AnchorEventSink, MemoryEventLog,
    };
}

//! Domain value types shared across the crate.

pub mod events;
pub mod marker;
pub mod pose;

pub use events::{AnchorEvent, AnchorEventSink, MemoryEventLog};
pub use marker::{MarkerId, TemplateRef};
pub use pose::{Pose, Rotation, Vec3};

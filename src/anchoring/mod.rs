//! Anchor group lifecycle: slot configuration, per-marker groups, and the
//! manager that keeps them synchronized with the tracking source.

pub mod group;
pub mod manager;
pub mod slots;

pub use group::AnchorGroup;
pub use manager::{AnchorGroupManager, BatchSummary};
pub use slots::{SlotDef, SlotSpec};

//! Slot configuration: the ordered (template, offset) pairs that define a
//! group's arity and per-slot placement.

use crate::domain::{TemplateRef, Vec3};

/// One slot of the fixed-arity group: an object template plus the constant
/// local offset it is anchored at.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SlotDef {
    /// Template to instantiate for this slot.
    pub template: TemplateRef,
    /// Fixed offset from the marker position (added unrotated).
    pub offset: Vec3,
}

impl SlotDef {
    /// Create a slot definition.
    pub fn new(template: impl Into<TemplateRef>, offset: Vec3) -> Self {
        Self {
            template: template.into(),
            offset,
        }
    }
}

/// Ordered, immutable slot list. Group arity equals its length; an empty
/// spec is a valid no-op configuration (arity 0).
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SlotSpec {
    slots: Vec<SlotDef>,
}

impl SlotSpec {
    /// Create a spec from an ordered slot list.
    pub fn new(slots: Vec<SlotDef>) -> Self {
        Self { slots }
    }

    /// Empty spec (arity 0).
    pub fn empty() -> Self {
        Self::default()
    }

    /// Group arity.
    pub fn arity(&self) -> usize {
        self.slots.len()
    }

    /// True for the degenerate arity-0 spec.
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Slot definition at `index`, if within arity.
    pub fn get(&self, index: usize) -> Option<&SlotDef> {
        self.slots.get(index)
    }

    /// Iterate slots in order.
    pub fn iter(&self) -> impl Iterator<Item = &SlotDef> {
        self.slots.iter()
    }

    /// Check every entry is well formed.
    ///
    /// Returns the index of the first malformed slot (currently: an empty
    /// template key), or `Ok` if the spec is usable.
    pub fn validate(&self) -> Result<(), usize> {
        match self.slots.iter().position(|s| s.template.is_empty()) {
            Some(index) => Err(index),
            None => Ok(()),
        }
    }
}

impl FromIterator<SlotDef> for SlotSpec {
    fn from_iter<I: IntoIterator<Item = SlotDef>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

//! Per-marker anchor group: the ordered handles placed for one marker.

use crate::placement::ObjectHandle;

/// The set of objects anchored to one marker, index-aligned with the slot
/// spec the manager was configured with.
///
/// A group normally holds exactly `arity` handles. It holds fewer only when
/// creation failed partway: the already-placed prefix is retained as-is and
/// never rolled back.
#[derive(Debug, Clone, Default)]
pub struct AnchorGroup {
    handles: Vec<ObjectHandle>,
}

impl AnchorGroup {
    /// Create an empty group.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append the handle for the next slot. Slots are always filled in
    /// order, so the handle's index is the slot index.
    pub(crate) fn push(&mut self, handle: ObjectHandle) {
        self.handles.push(handle);
    }

    /// Handle at slot `index`, if that slot was placed.
    pub fn handle_at(&self, index: usize) -> Option<&ObjectHandle> {
        self.handles.get(index)
    }

    /// Number of placed slots (≤ configured arity).
    pub fn len(&self) -> usize {
        self.handles.len()
    }

    /// True if no slot was placed.
    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }

    /// True once every configured slot was placed.
    pub fn is_complete(&self, arity: usize) -> bool {
        self.handles.len() == arity
    }

    /// Iterate placed handles in slot order.
    pub fn iter(&self) -> impl Iterator<Item = &ObjectHandle> {
        self.handles.iter()
    }

    /// Consume the group, yielding its handles in slot order.
    pub fn into_handles(self) -> Vec<ObjectHandle> {
        self.handles
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slot_order_preserved() {
        let mut group = AnchorGroup::new();
        let a = ObjectHandle::new();
        let b = ObjectHandle::new();
        group.push(a.clone());
        group.push(b.clone());

        assert_eq!(group.len(), 2);
        assert_eq!(group.handle_at(0), Some(&a));
        assert_eq!(group.handle_at(1), Some(&b));
        assert!(group.handle_at(2).is_none());
        assert!(group.is_complete(2));
        assert!(!group.is_complete(3));
    }
}

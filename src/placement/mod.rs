//! Placement backend seam: the outbound interface to the host environment's
//! object-instantiation system.
//!
//! The manager only ever asks the backend to create objects and rewrite
//! their transforms. It never issues destroy calls; parenting is a weak
//! structural relation the backend tracks for its own hierarchy, while the
//! manager's registry remains the authoritative record of which handles
//! belong to which marker.

use uuid::Uuid;

use crate::domain::{MarkerId, Rotation, TemplateRef, Vec3};

/// Opaque handle to an object placed by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ObjectHandle(Uuid);

impl ObjectHandle {
    /// Mint a new handle. Backends call this when instantiating.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Borrow the inner UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for ObjectHandle {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for ObjectHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Error type for placement backend operations.
#[derive(Debug, Clone, thiserror::Error)]
pub enum PlacementError {
    /// The template key did not resolve to a known template.
    #[error("template not found: {0}")]
    TemplateMissing(TemplateRef),

    /// The handle does not refer to a live placed object.
    #[error("unknown object handle: {0}")]
    UnknownHandle(ObjectHandle),

    /// Backend-specific failure.
    #[error("placement backend error: {0}")]
    Backend(String),
}

/// Host-environment seam for creating and repositioning placed objects.
pub trait PlacementBackend: Send + Sync {
    /// Instantiate `template` at a world transform, parented to the tracking
    /// anchor of `parent`.
    fn instantiate(
        &self,
        template: &TemplateRef,
        position: Vec3,
        rotation: Rotation,
        parent: &MarkerId,
    ) -> Result<ObjectHandle, PlacementError>;

    /// Overwrite the world transform of an existing object.
    fn set_transform(
        &self,
        handle: &ObjectHandle,
        position: Vec3,
        rotation: Rotation,
    ) -> Result<(), PlacementError>;
}

/// Snapshot of one object held by the in-memory backend.
#[derive(Debug, Clone)]
pub struct PlacedObject {
    /// Template the object was instantiated from.
    pub template: TemplateRef,
    /// Current world position.
    pub position: Vec3,
    /// Current world rotation.
    pub rotation: Rotation,
    /// Marker anchor the object is parented to.
    pub parent: MarkerId,
}

/// In-memory placement backend.
///
/// Reference implementation used by tests and demos: keeps placed objects in
/// a map, records parent links, and optionally restricts instantiation to a
/// registered template set so failure paths can be exercised
/// deterministically.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    objects: parking_lot::RwLock<std::collections::HashMap<ObjectHandle, PlacedObject>>,
    /// When `Some`, instantiate only succeeds for these templates.
    templates: Option<std::collections::HashSet<TemplateRef>>,
}

impl MemoryBackend {
    /// Create a backend that accepts any template key.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a backend that only resolves the given templates.
    pub fn with_templates<I>(templates: I) -> Self
    where
        I: IntoIterator<Item = TemplateRef>,
    {
        Self {
            objects: parking_lot::RwLock::new(std::collections::HashMap::new()),
            templates: Some(templates.into_iter().collect()),
        }
    }

    /// Snapshot one placed object.
    pub fn object(&self, handle: &ObjectHandle) -> Option<PlacedObject> {
        self.objects.read().get(handle).cloned()
    }

    /// Number of live placed objects.
    pub fn object_count(&self) -> usize {
        self.objects.read().len()
    }

    /// Handles of all objects parented to a marker's anchor.
    pub fn children_of(&self, marker_id: &MarkerId) -> Vec<ObjectHandle> {
        self.objects
            .read()
            .iter()
            .filter(|(_, obj)| &obj.parent == marker_id)
            .map(|(h, _)| h.clone())
            .collect()
    }
}

impl PlacementBackend for MemoryBackend {
    fn instantiate(
        &self,
        template: &TemplateRef,
        position: Vec3,
        rotation: Rotation,
        parent: &MarkerId,
    ) -> Result<ObjectHandle, PlacementError> {
        if let Some(known) = &self.templates {
            if !known.contains(template) {
                return Err(PlacementError::TemplateMissing(template.clone()));
            }
        }

        let handle = ObjectHandle::new();
        self.objects.write().insert(
            handle.clone(),
            PlacedObject {
                template: template.clone(),
                position,
                rotation,
                parent: parent.clone(),
            },
        );
        Ok(handle)
    }

    fn set_transform(
        &self,
        handle: &ObjectHandle,
        position: Vec3,
        rotation: Rotation,
    ) -> Result<(), PlacementError> {
        let mut objects = self.objects.write();
        let obj = objects
            .get_mut(handle)
            .ok_or_else(|| PlacementError::UnknownHandle(handle.clone()))?;
        obj.position = position;
        obj.rotation = rotation;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_instantiate_and_move() {
        let backend = MemoryBackend::new();
        let marker = MarkerId::new("m1");

        let handle = backend
            .instantiate(
                &TemplateRef::new("dragon"),
                Vec3::new(1.0, 2.0, 3.0),
                Rotation::IDENTITY,
                &marker,
            )
            .unwrap();

        let obj = backend.object(&handle).unwrap();
        assert_eq!(obj.position, Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(obj.parent, marker);

        backend
            .set_transform(&handle, Vec3::new(4.0, 5.0, 6.0), Rotation::IDENTITY)
            .unwrap();
        let obj = backend.object(&handle).unwrap();
        assert_eq!(obj.position, Vec3::new(4.0, 5.0, 6.0));
    }

    #[test]
    fn test_restricted_templates() {
        let backend = MemoryBackend::with_templates([TemplateRef::new("dragon")]);
        let marker = MarkerId::new("m1");

        let err = backend
            .instantiate(
                &TemplateRef::new("castle"),
                Vec3::ZERO,
                Rotation::IDENTITY,
                &marker,
            )
            .unwrap_err();
        assert!(matches!(err, PlacementError::TemplateMissing(_)));
        assert_eq!(backend.object_count(), 0);
    }

    #[test]
    fn test_set_transform_unknown_handle() {
        let backend = MemoryBackend::new();
        let err = backend
            .set_transform(&ObjectHandle::new(), Vec3::ZERO, Rotation::IDENTITY)
            .unwrap_err();
        assert!(matches!(err, PlacementError::UnknownHandle(_)));
    }

    #[test]
    fn test_children_of_tracks_parenting() {
        let backend = MemoryBackend::new();
        let m1 = MarkerId::new("m1");
        let m2 = MarkerId::new("m2");

        backend
            .instantiate(&TemplateRef::new("a"), Vec3::ZERO, Rotation::IDENTITY, &m1)
            .unwrap();
        backend
            .instantiate(&TemplateRef::new("b"), Vec3::ZERO, Rotation::IDENTITY, &m1)
            .unwrap();
        backend
            .instantiate(&TemplateRef::new("c"), Vec3::ZERO, Rotation::IDENTITY, &m2)
            .unwrap();

        assert_eq!(backend.children_of(&m1).len(), 2);
        assert_eq!(backend.children_of(&m2).len(), 1);
    }
}

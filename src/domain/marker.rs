//! Identity types for tracked markers and object templates.

/// Stable identifier for a physical marker tracked by the external source.
///
/// The tracking source owns this identity for the lifetime of the tracked
/// instance; the manager never mints one itself.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MarkerId(String);

impl MarkerId {
    /// Wrap a source-supplied identity.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow the inner identity string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for MarkerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for MarkerId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// Key identifying an object template in the placement backend.
///
/// The backend resolves the key to whatever asset representation it uses;
/// an empty key is malformed configuration.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TemplateRef(String);

impl TemplateRef {
    /// Wrap a template key.
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// Borrow the inner key.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True if the key is empty and cannot resolve to a template.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl std::fmt::Display for TemplateRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for TemplateRef {
    fn from(key: &str) -> Self {
        Self::new(key)
    }
}

impl From<String> for TemplateRef {
    fn from(key: String) -> Self {
        Self::new(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_marker_id_equality() {
        let a = MarkerId::new("target-07");
        let b = MarkerId::from("target-07");
        let c = MarkerId::new("target-08");

        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_eq!(a.as_str(), "target-07");
    }

    #[test]
    fn test_template_ref_empty_detection() {
        assert!(TemplateRef::new("").is_empty());
        assert!(!TemplateRef::new("dragon").is_empty());
    }
}

//! Scene-world transform value types for marker poses and anchored objects.

/// 3D vector in scene-world space (meters).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Vec3 {
    /// X component
    pub x: f64,
    /// Y component
    pub y: f64,
    /// Z component
    pub z: f64,
}

impl Vec3 {
    /// Zero vector.
    pub const ZERO: Vec3 = Vec3 { x: 0.0, y: 0.0, z: 0.0 };

    /// Create a vector from components.
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Euclidean distance to another point.
    pub fn distance_to(&self, other: &Vec3) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        let dz = self.z - other.z;
        (dx * dx + dy * dy + dz * dz).sqrt()
    }

    /// Componentwise approximate equality within `eps`.
    pub fn approx_eq(&self, other: &Vec3, eps: f64) -> bool {
        (self.x - other.x).abs() <= eps
            && (self.y - other.y).abs() <= eps
            && (self.z - other.z).abs() <= eps
    }
}

impl std::ops::Add for Vec3 {
    type Output = Vec3;

    fn add(self, rhs: Vec3) -> Vec3 {
        Vec3::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl std::ops::Sub for Vec3 {
    type Output = Vec3;

    fn sub(self, rhs: Vec3) -> Vec3 {
        Vec3::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

/// Rotation as a unit quaternion (x, y, z, w), scene-world space.
///
/// The manager treats rotation as opaque data: it is copied from the marker
/// pose onto anchored objects verbatim and never composed or interpolated.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rotation {
    /// X component
    pub x: f64,
    /// Y component
    pub y: f64,
    /// Z component
    pub z: f64,
    /// W (scalar) component
    pub w: f64,
}

impl Rotation {
    /// Identity rotation.
    pub const IDENTITY: Rotation = Rotation { x: 0.0, y: 0.0, z: 0.0, w: 1.0 };

    /// Create a rotation from raw quaternion components.
    pub fn new(x: f64, y: f64, z: f64, w: f64) -> Self {
        Self { x, y, z, w }
    }

    /// Componentwise approximate equality within `eps`.
    pub fn approx_eq(&self, other: &Rotation, eps: f64) -> bool {
        (self.x - other.x).abs() <= eps
            && (self.y - other.y).abs() <= eps
            && (self.z - other.z).abs() <= eps
            && (self.w - other.w).abs() <= eps
    }
}

impl Default for Rotation {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// A tracked marker's current transform: position plus rotation.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Pose {
    /// Position in scene-world space.
    pub position: Vec3,
    /// Rotation in scene-world space.
    pub rotation: Rotation,
}

impl Pose {
    /// Create a pose from position and rotation.
    pub fn new(position: Vec3, rotation: Rotation) -> Self {
        Self { position, rotation }
    }

    /// Pose at a position with identity rotation.
    pub fn at(x: f64, y: f64, z: f64) -> Self {
        Self {
            position: Vec3::new(x, y, z),
            rotation: Rotation::IDENTITY,
        }
    }

    /// World position of a slot anchored at `offset` from this pose.
    ///
    /// The offset is added unrotated: anchoring snaps objects to a fixed
    /// additive displacement from the marker, not a rotated local frame.
    pub fn anchored_position(&self, offset: Vec3) -> Vec3 {
        self.position + offset
    }
}

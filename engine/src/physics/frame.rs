//! Position and orientation frame with local/world transforms

use glam::{Mat3, Quat, Vec3};

/// A position plus orientation in world space
///
/// The rotation matrices are derived from `orientation` and are only valid
/// after [`ReferenceFrame::update_matrices`] has run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReferenceFrame {
    /// Position in world space
    pub position: Vec3,
    /// Orientation as a (nominally unit) quaternion
    pub orientation: Quat,
    /// Local to world rotation
    matrix: Mat3,
    /// World to local rotation
    matrix_inverse: Mat3,
}

impl Default for ReferenceFrame {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            orientation: Quat::IDENTITY,
            matrix: Mat3::IDENTITY,
            matrix_inverse: Mat3::IDENTITY,
        }
    }
}

impl ReferenceFrame {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a frame at the given position and orientation with fresh matrices
    pub fn from_position_orientation(position: Vec3, orientation: Quat) -> Self {
        let mut frame = Self {
            position,
            orientation,
            ..Default::default()
        };
        frame.update_matrices();
        frame
    }

    /// Re-normalize the orientation and rebuild both rotation matrices
    pub fn update_matrices(&mut self) {
        self.orientation = self.orientation.normalize();
        self.matrix = Mat3::from_quat(self.orientation);
        // Rotations are orthogonal
        self.matrix_inverse = self.matrix.transpose();
    }

    pub fn matrix(&self) -> Mat3 {
        self.matrix
    }

    pub fn matrix_inverse(&self) -> Mat3 {
        self.matrix_inverse
    }

    /// Rotate a free vector from local into world axes
    pub fn local_to_world_vector(&self, vector: Vec3) -> Vec3 {
        self.matrix * vector
    }

    /// Rotate a free vector from world into local axes
    pub fn world_to_local_vector(&self, vector: Vec3) -> Vec3 {
        self.matrix_inverse * vector
    }

    /// Map a local point into world space
    pub fn local_to_world_point(&self, point: Vec3) -> Vec3 {
        self.matrix * point + self.position
    }

    /// Map a world point into local space
    pub fn world_to_local_point(&self, point: Vec3) -> Vec3 {
        self.matrix_inverse * (point - self.position)
    }
}

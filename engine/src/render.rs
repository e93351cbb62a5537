//! Render-facing data built from interpolated body state
//!
//! These structures are laid out for direct upload into a GPU instance or
//! uniform buffer by an external renderer.

use crate::physics::BodyState;
use bytemuck::{Pod, Zeroable};
use glam::Mat4;

/// Per-body instance data
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct RenderInstance {
    /// Model matrix for world transformation
    pub model: [[f32; 4]; 4],
}

impl RenderInstance {
    /// Build instance data from an interpolated state
    ///
    /// Blended orientations are not unit length, so they are normalized here.
    pub fn from_state(state: &BodyState) -> Self {
        let model = Mat4::from_rotation_translation(state.orientation.normalize(), state.position);
        Self {
            model: model.to_cols_array_2d(),
        }
    }

    pub fn model_matrix(&self) -> Mat4 {
        Mat4::from_cols_array_2d(&self.model)
    }
}

impl Default for RenderInstance {
    fn default() -> Self {
        Self {
            model: Mat4::IDENTITY.to_cols_array_2d(),
        }
    }
}

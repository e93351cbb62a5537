//! Configuration types for the simulation

use crate::physics::SimError;
use glam::Vec3;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

/// Configuration for a fixed-step simulation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Fixed integration step in seconds
    pub fixed_timestep: f32,
    /// Uniform gravitational acceleration
    pub gravity: Vec3,
    /// Largest frame delta accepted by a single tick, in seconds
    pub max_frame_delta: f32,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            fixed_timestep: 1.0 / 60.0,
            gravity: Vec3::new(0.0, 0.0, -9.81),
            // Cap to 10 FPS
            max_frame_delta: 0.1,
        }
    }
}

impl SimConfig {
    /// Default configuration with a custom timestep
    pub fn with_timestep(fixed_timestep: f32) -> Self {
        Self {
            fixed_timestep,
            ..Default::default()
        }
    }

    /// Parse a configuration from JSON, filling missing fields with defaults
    pub fn from_json_str(json: &str) -> Result<Self, SimError> {
        let config: SimConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a configuration from a JSON file
    pub fn load(path: &Path) -> Result<Self, SimError> {
        debug!(path = ?path, "Loading SimConfig");
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Check that the timestep and frame clamp are usable
    pub fn validate(&self) -> Result<(), SimError> {
        if !(self.fixed_timestep > 0.0 && self.fixed_timestep.is_finite()) {
            return Err(SimError::InvalidConfiguration(format!(
                "fixed_timestep must be positive and finite, got {}",
                self.fixed_timestep
            )));
        }
        if !(self.max_frame_delta > 0.0 && self.max_frame_delta.is_finite()) {
            return Err(SimError::InvalidConfiguration(format!(
                "max_frame_delta must be positive and finite, got {}",
                self.max_frame_delta
            )));
        }
        if !self.gravity.is_finite() {
            return Err(SimError::InvalidConfiguration(format!(
                "gravity must be finite, got {}",
                self.gravity
            )));
        }
        Ok(())
    }
}

//! Capability traits for objects registered with the simulation
//!
//! Every dynamic object must be able to advance by a timestep. Recording
//! pre-step history and producing interpolated render state are optional
//! capabilities exposed through the `as_*` queries, so the simulation can
//! hold a heterogeneous registry and dispatch on what each object supports.

use crate::physics::rigid_body::BodyState;
use glam::Vec3;
use std::cell::RefCell;
use std::rc::Rc;

/// Per-step environment handed to every dynamic object
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepEnv {
    /// Uniform gravitational acceleration
    pub gravity: Vec3,
}

/// An object advanced by the fixed-step loop
pub trait DynamicObject {
    /// Advance the object by `delta` seconds
    fn tick(&mut self, delta: f32, env: &StepEnv);

    /// Access the history-recording capability, if supported
    fn as_recordable(&mut self) -> Option<&mut dyn StateRecordable> {
        None
    }

    /// Access the interpolation capability, if supported
    fn as_interpolatable(&mut self) -> Option<&mut dyn Interpolatable> {
        None
    }
}

/// Objects that snapshot their state before each integration pass
pub trait StateRecordable {
    fn record_state(&mut self);
}

/// Objects that can blend between their recorded and current state
pub trait Interpolatable {
    /// Blend of the recorded snapshot and the current state at `alpha`
    fn state_at(&self, alpha: f32) -> BodyState;

    /// Store the blended state for render consumption
    fn cache_state(&mut self, alpha: f32);
}

/// Shared handle to a registered dynamic object
pub type ObjectRef = Rc<RefCell<dyn DynamicObject>>;

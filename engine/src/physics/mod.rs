//! Fixed-timestep rigid body physics
//!
//! This module advances rigid bodies in fixed-size steps decoupled from the
//! caller's frame rate, exposes interpolated state for rendering, and answers
//! point and sphere-list contact queries against static geometry.

pub mod accumulator;
pub mod collision;
pub mod error;
pub mod events;
pub mod frame;
pub mod object;
pub mod rigid_body;
pub mod sim;

// Re-export commonly used types
pub use accumulator::StepAccumulator;
pub use collision::{
    Bounds, Contact, GroundPlane, PointContactProvider, SphereList, SphereListContactProvider,
    SpherePoint, StaticObject,
};
pub use error::SimError;
pub use events::{StepEvents, SubscriptionId};
pub use frame::ReferenceFrame;
pub use object::{DynamicObject, Interpolatable, ObjectRef, StateRecordable, StepEnv};
pub use rigid_body::{BodyState, RigidBody};
pub use sim::Sim;

//! Fixed-timestep rigid body simulation core
//!
//! This crate steps rigid bodies deterministically at a fixed rate, decoupled
//! from irregular frame deltas, and provides interpolated state for smooth
//! rendering plus minimal contact queries against static geometry.

pub mod config;
pub mod physics;
pub mod render;

// Re-export commonly used types
pub mod prelude {
    // Math types
    pub use glam::{Mat3, Mat4, Quat, Vec3, Vec4};

    // Config types
    pub use crate::config::SimConfig;

    // Physics types
    pub use crate::physics::{
        BodyState, Contact, DynamicObject, GroundPlane, Interpolatable, ReferenceFrame,
        RigidBody, Sim, SimError, SphereList, SpherePoint, StateRecordable, StaticObject,
        SubscriptionId,
    };

    // Render types
    pub use crate::render::RenderInstance;
}

/// Initialize logging for the simulation
pub fn init_logging() {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

//! Rigid body with cuboid mass properties and momentum-based rotation
//!
//! Translation uses semi-implicit Euler. Rotation integrates angular momentum
//! and derives angular velocity each step through the diagonal body-local
//! inertia, then advances the orientation with a first-order additive
//! quaternion update.

use crate::physics::error::SimError;
use crate::physics::frame::ReferenceFrame;
use crate::physics::object::{DynamicObject, Interpolatable, StateRecordable, StepEnv};
use crate::physics::sim::Sim;
use glam::{Quat, Vec3, Vec4};
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::rc::Rc;
use tracing::debug;

/// Empirical inflation applied to the mass before computing cuboid inertia
const CUBOID_MASS_INFLATION: f32 = 1.5;

/// Kinematic state of a body at one instant
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BodyState {
    pub position: Vec3,
    pub orientation: Quat,
    pub linear_velocity: Vec3,
    pub angular_velocity: Vec3,
}

impl Default for BodyState {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            orientation: Quat::IDENTITY,
            linear_velocity: Vec3::ZERO,
            angular_velocity: Vec3::ZERO,
        }
    }
}

impl BodyState {
    /// Componentwise blend from `self` towards `other`
    ///
    /// The orientation is blended on its raw (x, y, z, w) coordinates with no
    /// renormalization, which is only accurate for small rotations between
    /// the two states.
    pub fn blend(&self, other: &BodyState, alpha: f32) -> BodyState {
        let from = Vec4::from(self.orientation);
        let to = Vec4::from(other.orientation);
        BodyState {
            position: self.position + (other.position - self.position) * alpha,
            orientation: Quat::from_vec4(from + (to - from) * alpha),
            linear_velocity: self.linear_velocity
                + (other.linear_velocity - self.linear_velocity) * alpha,
            angular_velocity: self.angular_velocity
                + (other.angular_velocity - self.angular_velocity) * alpha,
        }
    }
}

/// Principal moments of inertia of a cuboid with the inflated mass
fn cuboid_moments(mass: f32, half_extents: Vec3) -> Vec3 {
    let inflated = mass * CUBOID_MASS_INFLATION;
    let sq = half_extents * half_extents * inflated / 3.0;
    Vec3::new(sq.y + sq.z, sq.z + sq.x, sq.x + sq.y)
}

/// A simulated rigid body
#[derive(Debug, Clone)]
pub struct RigidBody {
    frame: ReferenceFrame,

    mass: f32,
    /// Diagonal inertia in body-local axes
    angular_mass: Vec3,
    angular_mass_inverse: Vec3,

    linear_vel: Vec3,
    /// Derived from `angular_momentum` every step
    angular_vel: Vec3,
    angular_momentum: Vec3,

    /// World space accumulators, zeroed after each integration step
    accum_force: Vec3,
    accum_torque: Vec3,

    /// State at the start of the last integration pass
    previous: BodyState,
    /// Interpolated state cached by the simulation for rendering
    interp: BodyState,
}

impl Default for RigidBody {
    fn default() -> Self {
        let angular_mass = cuboid_moments(1.0, Vec3::ONE);
        Self {
            frame: ReferenceFrame::default(),
            mass: 1.0,
            angular_mass,
            angular_mass_inverse: angular_mass.recip(),
            linear_vel: Vec3::ZERO,
            angular_vel: Vec3::ZERO,
            angular_momentum: Vec3::ZERO,
            accum_force: Vec3::ZERO,
            accum_torque: Vec3::ZERO,
            previous: BodyState::default(),
            interp: BodyState::default(),
        }
    }
}

impl RigidBody {
    /// Create a unit-cuboid body at the origin and register it with `sim`
    pub fn new(sim: &mut Sim) -> Rc<RefCell<RigidBody>> {
        let mut body = RigidBody::default();
        body.record_state();
        body.interp = body.current_state();

        let body = Rc::new(RefCell::new(body));
        sim.add_object(body.clone());
        body
    }

    /// Set mass and inertia from a solid cuboid with the given half-extents
    ///
    /// Non-positive mass or half-extents are rejected and the previous mass
    /// properties are kept.
    pub fn set_mass_cuboid(&mut self, mass: f32, half_extents: Vec3) -> Result<(), SimError> {
        if !(mass > 0.0) {
            debug!(mass, "Rejecting non-positive cuboid mass");
            return Err(SimError::InvalidConfiguration(format!(
                "cuboid mass must be positive, got {mass}"
            )));
        }
        if !half_extents.cmpgt(Vec3::ZERO).all() {
            debug!(?half_extents, "Rejecting non-positive cuboid half-extents");
            return Err(SimError::InvalidConfiguration(format!(
                "cuboid half-extents must be positive, got {half_extents}"
            )));
        }

        self.mass = mass;
        self.angular_mass = cuboid_moments(mass, half_extents);
        self.angular_mass_inverse = self.angular_mass.recip();
        Ok(())
    }

    pub fn mass(&self) -> f32 {
        self.mass
    }

    pub fn angular_mass(&self) -> Vec3 {
        self.angular_mass
    }

    pub fn angular_mass_inverse(&self) -> Vec3 {
        self.angular_mass_inverse
    }

    pub fn frame(&self) -> &ReferenceFrame {
        &self.frame
    }

    pub fn frame_mut(&mut self) -> &mut ReferenceFrame {
        &mut self.frame
    }

    pub fn position(&self) -> Vec3 {
        self.frame.position
    }

    pub fn set_position(&mut self, position: Vec3) {
        self.frame.position = position;
    }

    pub fn orientation(&self) -> Quat {
        self.frame.orientation
    }

    /// Set the orientation and refresh the rotation matrices
    pub fn set_orientation(&mut self, orientation: Quat) {
        self.frame.orientation = orientation;
        self.frame.update_matrices();
    }

    pub fn linear_vel(&self) -> Vec3 {
        self.linear_vel
    }

    pub fn set_linear_vel(&mut self, velocity: Vec3) {
        self.linear_vel = velocity;
    }

    pub fn angular_vel(&self) -> Vec3 {
        self.angular_vel
    }

    pub fn angular_momentum(&self) -> Vec3 {
        self.angular_momentum
    }

    /// Set the angular momentum; angular velocity follows on the next step
    pub fn set_angular_momentum(&mut self, momentum: Vec3) {
        self.angular_momentum = momentum;
    }

    pub fn accumulated_force(&self) -> Vec3 {
        self.accum_force
    }

    pub fn accumulated_torque(&self) -> Vec3 {
        self.accum_torque
    }

    pub fn local_to_world_vector(&self, vector: Vec3) -> Vec3 {
        self.frame.local_to_world_vector(vector)
    }

    pub fn world_to_local_vector(&self, vector: Vec3) -> Vec3 {
        self.frame.world_to_local_vector(vector)
    }

    pub fn local_to_world_point(&self, point: Vec3) -> Vec3 {
        self.frame.local_to_world_point(point)
    }

    pub fn world_to_local_point(&self, point: Vec3) -> Vec3 {
        self.frame.world_to_local_point(point)
    }

    /// Add a world space force through the center of mass
    pub fn add_force(&mut self, force: Vec3) {
        self.accum_force += force;
    }

    /// Add a body-local force through the center of mass
    pub fn add_local_force(&mut self, force: Vec3) {
        self.add_force(self.local_to_world_vector(force));
    }

    /// Add a world space force applied at a world space point
    pub fn add_force_at_point(&mut self, force: Vec3, point: Vec3) {
        self.accum_force += force;
        let offset = point - self.frame.position;
        self.add_torque(offset.cross(force));
    }

    /// Add a body-local force applied at a world space point
    pub fn add_local_force_at_point(&mut self, force: Vec3, point: Vec3) {
        self.add_force_at_point(self.local_to_world_vector(force), point);
    }

    /// Add a world space force applied at a body-local point
    pub fn add_force_at_local_point(&mut self, force: Vec3, point: Vec3) {
        self.add_force_at_point(force, self.local_to_world_point(point));
    }

    /// Add a body-local force applied at a body-local point
    pub fn add_local_force_at_local_point(&mut self, force: Vec3, point: Vec3) {
        self.add_force_at_point(
            self.local_to_world_vector(force),
            self.local_to_world_point(point),
        );
    }

    pub fn add_torque(&mut self, torque: Vec3) {
        self.accum_torque += torque;
    }

    pub fn add_local_torque(&mut self, torque: Vec3) {
        self.add_torque(self.local_to_world_vector(torque));
    }

    /// World space velocity of a world space point rigidly attached to the body
    pub fn velocity_at_point(&self, point: Vec3) -> Vec3 {
        self.linear_vel + self.angular_vel.cross(point - self.frame.position)
    }

    pub fn current_state(&self) -> BodyState {
        BodyState {
            position: self.frame.position,
            orientation: self.frame.orientation,
            linear_velocity: self.linear_vel,
            angular_velocity: self.angular_vel,
        }
    }

    /// Snapshot taken by the last `record_state`
    pub fn previous_state(&self) -> &BodyState {
        &self.previous
    }

    /// Interpolated state cached by the last `Sim::tick`
    pub fn interp(&self) -> &BodyState {
        &self.interp
    }
}

impl DynamicObject for RigidBody {
    fn tick(&mut self, delta: f32, env: &StepEnv) {
        // Linear components
        let linear_accel = self.accum_force / self.mass + env.gravity;
        self.linear_vel += linear_accel * delta;
        self.frame.position += self.linear_vel * delta;

        // Integrate angular momentum
        self.angular_momentum += self.accum_torque * delta;

        // Inertia is diagonal in body-local axes only
        let local_momentum = self.frame.world_to_local_vector(self.angular_momentum);
        self.angular_vel = self
            .frame
            .local_to_world_vector(local_momentum * self.angular_mass_inverse);

        // First-order orientation update, normalized by update_matrices
        let half_delta = 0.5 * delta;
        let omega = Quat::from_xyzw(
            self.angular_vel.x * half_delta,
            self.angular_vel.y * half_delta,
            self.angular_vel.z * half_delta,
            0.0,
        );
        let spin = omega * self.frame.orientation;
        self.frame.orientation = self.frame.orientation + spin;
        self.frame.update_matrices();

        self.accum_force = Vec3::ZERO;
        self.accum_torque = Vec3::ZERO;
    }

    fn as_recordable(&mut self) -> Option<&mut dyn StateRecordable> {
        Some(self)
    }

    fn as_interpolatable(&mut self) -> Option<&mut dyn Interpolatable> {
        Some(self)
    }
}

impl StateRecordable for RigidBody {
    fn record_state(&mut self) {
        self.previous = self.current_state();
    }
}

impl Interpolatable for RigidBody {
    fn state_at(&self, alpha: f32) -> BodyState {
        self.previous.blend(&self.current_state(), alpha)
    }

    fn cache_state(&mut self, alpha: f32) {
        self.interp = self.state_at(alpha);
    }
}

//! Fixed-step simulation driver
//!
//! `Sim::tick` consumes irregular frame deltas in fixed-size steps. Each step
//! notifies "step" subscribers (who may apply forces), records every body's
//! pre-step state, then integrates every body. After the loop the leftover
//! fraction of a step is exposed as `alpha` and each interpolatable body
//! caches its blended state for rendering.

use crate::config::SimConfig;
use crate::physics::accumulator::StepAccumulator;
use crate::physics::collision::{Contact, SphereList, StaticObject};
use crate::physics::error::SimError;
use crate::physics::events::{StepEvents, SubscriptionId};
use crate::physics::object::{ObjectRef, StepEnv};
use glam::Vec3;
use std::rc::Rc;
use tracing::{debug, info, trace};

/// Fixed timestep simulation
pub struct Sim {
    /// Uniform gravity applied to every body; may change between ticks
    pub gravity: Vec3,
    objects: Vec<ObjectRef>,
    /// Just used for clipping
    static_objects: Vec<Rc<dyn StaticObject>>,
    accumulator: StepAccumulator,
    /// Fixed steps executed since the last restart
    steps: u64,
    alpha: f32,
    events: StepEvents,
}

impl Sim {
    /// Create a simulation with the given fixed timestep and default settings
    pub fn new(fixed_timestep: f32) -> Result<Self, SimError> {
        Self::from_config(&SimConfig::with_timestep(fixed_timestep))
    }

    pub fn from_config(config: &SimConfig) -> Result<Self, SimError> {
        config.validate()?;
        info!(
            fixed_timestep = config.fixed_timestep,
            gravity = ?config.gravity,
            max_frame_delta = config.max_frame_delta,
            "Initializing simulation"
        );

        Ok(Self {
            gravity: config.gravity,
            objects: Vec::new(),
            static_objects: Vec::new(),
            accumulator: StepAccumulator::new(config.fixed_timestep, config.max_frame_delta),
            steps: 0,
            alpha: 0.0,
            events: StepEvents::new(),
        })
    }

    /// Reset simulated time; registries and subscribers are kept
    pub fn restart(&mut self) {
        info!(time = self.time(), "Restarting simulation clock");
        self.steps = 0;
        self.accumulator.reset();
        self.alpha = 0.0;
    }

    /// Append a dynamic object to the end of the iteration order
    pub fn add_object(&mut self, object: ObjectRef) {
        self.objects.push(object);
        debug!(count = self.objects.len(), "Dynamic object registered");
    }

    /// Append static geometry to the end of the query order
    pub fn add_static_object(&mut self, object: Rc<dyn StaticObject>) {
        self.static_objects.push(object);
        debug!(count = self.static_objects.len(), "Static object registered");
    }

    /// Subscribe to the per-step notification, run before integration
    pub fn on_step(&mut self, callback: impl FnMut() + 'static) -> SubscriptionId {
        self.events.subscribe(callback)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.events.unsubscribe(id)
    }

    /// Advance by a frame delta, running as many fixed steps as are due
    pub fn tick(&mut self, delta: f32) {
        if !self.accumulator.accumulate(delta) {
            return;
        }

        while self.accumulator.consume_step() {
            self.step();
        }

        // Cache interpolated state
        self.alpha = self.accumulator.interpolation_alpha();
        let alpha = self.alpha;
        for object in &self.objects {
            let mut object = object.borrow_mut();
            if let Some(interpolatable) = object.as_interpolatable() {
                interpolatable.cache_state(alpha);
            }
        }
    }

    /// Execute exactly one fixed step
    pub fn step(&mut self) {
        self.events.publish();
        self.integrate(self.timestep());
        self.steps += 1;
        trace!(steps = self.steps, "Fixed step complete");
    }

    /// Record every body, then advance every body by `delta`
    pub fn integrate(&mut self, delta: f32) {
        for object in &self.objects {
            let mut object = object.borrow_mut();
            if let Some(recordable) = object.as_recordable() {
                recordable.record_state();
            }
        }

        let env = StepEnv {
            gravity: self.gravity,
        };
        for object in &self.objects {
            object.borrow_mut().tick(delta, &env);
        }
    }

    /// Collide a point against registered static objects
    ///
    /// Returns only contacts with positive depth, in registration order.
    pub fn collide_point(&self, point: Vec3) -> Vec<Contact> {
        self.static_objects
            .iter()
            .filter_map(|object| object.as_point_contact())
            .filter_map(|provider| provider.point_contact(point))
            .filter_map(|mut contact| {
                contact.depth = contact.depth_of(point);
                (contact.depth > 0.0).then_some(contact)
            })
            .collect()
    }

    /// Collide a sphere list against registered static objects
    ///
    /// Each point is queried at the bottom of the shared bounding sphere,
    /// then the whole list is offered to geometry that handles sphere lists.
    pub fn collide_sphere_list(&self, spheres: &SphereList) -> Vec<Contact> {
        let mut contacts = Vec::new();

        for point in &spheres.points {
            contacts.extend(self.collide_point(spheres.query_location(point)));
        }

        for object in &self.static_objects {
            if let Some(provider) = object.as_sphere_list_contact() {
                contacts.extend(provider.sphere_list_contact(spheres));
            }
        }

        contacts
    }

    pub fn timestep(&self) -> f32 {
        self.accumulator.fixed_timestep()
    }

    /// Total simulated time consumed by fixed steps
    ///
    /// Derived from the step count so it does not drift over long sessions.
    pub fn time(&self) -> f64 {
        self.steps as f64 * self.timestep() as f64
    }

    /// Number of fixed steps executed since the last restart
    pub fn step_count(&self) -> u64 {
        self.steps
    }

    /// Fractional progress into the next unexecuted step
    pub fn alpha(&self) -> f32 {
        self.alpha
    }

    pub fn accumulated_time(&self) -> f32 {
        self.accumulator.accumulated_time()
    }

    /// Simulated time including the unconsumed remainder
    pub fn interpolated_time(&self) -> f64 {
        self.time() + self.accumulator.accumulated_time() as f64
    }

    pub fn object_count(&self) -> usize {
        self.objects.len()
    }

    pub fn static_object_count(&self) -> usize {
        self.static_objects.len()
    }
}

impl std::fmt::Debug for Sim {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Sim")
            .field("gravity", &self.gravity)
            .field("objects", &self.objects.len())
            .field("static_objects", &self.static_objects.len())
            .field("accumulator", &self.accumulator)
            .field("steps", &self.steps)
            .field("alpha", &self.alpha)
            .field("events", &self.events)
            .finish()
    }
}

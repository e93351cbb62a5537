//! Tests for the fixed-step accumulator loop

use glam::Vec3;
use std::cell::RefCell;
use std::rc::Rc;
use engine::physics::{DynamicObject, RigidBody, Sim, StepEnv};

const STEP: f32 = 1.0 / 64.0;

/// Counts how many times it was advanced
struct TickCounter {
    ticks: u32,
    last_delta: f32,
}

impl DynamicObject for TickCounter {
    fn tick(&mut self, delta: f32, _env: &StepEnv) {
        self.ticks += 1;
        self.last_delta = delta;
    }
}

fn counter() -> Rc<RefCell<TickCounter>> {
    Rc::new(RefCell::new(TickCounter {
        ticks: 0,
        last_delta: 0.0,
    }))
}

#[test]
fn test_every_body_ticked_once_per_step() {
    let mut sim = Sim::new(STEP).unwrap();
    let counters: Vec<_> = (0..5).map(|_| counter()).collect();
    for c in &counters {
        sim.add_object(c.clone());
    }

    // 3 steps, then 4 more, then none
    sim.tick(STEP * 3.0);
    sim.tick(STEP * 4.0);
    sim.tick(STEP * 0.25);

    for c in &counters {
        assert_eq!(c.borrow().ticks, 7);
        assert_eq!(c.borrow().last_delta, STEP);
    }
}

#[test]
fn test_elapsed_time_is_conserved() {
    let _ = tracing_subscriber::fmt::try_init();

    let mut sim = Sim::new(1.0 / 60.0).unwrap();
    let deltas = [0.016, 0.033, 0.007, 0.1, 0.0501, 0.019, 0.016, 0.016, 0.002];

    let mut total = 0.0f64;
    for delta in deltas {
        sim.tick(delta);
        total += delta as f64;
        assert!(
            (sim.time() + sim.accumulated_time() as f64 - total).abs() < 1e-4,
            "expected {total}, got {}",
            sim.interpolated_time()
        );
        assert!((0.0..1.0).contains(&sim.alpha()));
    }
}

#[test]
fn test_time_does_not_drift() {
    let step = 1.0f32 / 60.0;
    let mut sim = Sim::new(step).unwrap();

    // One simulated hour of frames at the step rate
    let frames = 216_000u64;
    let mut total = 0.0f64;
    for _ in 0..frames {
        sim.tick(step);
        total += step as f64;
    }

    assert_eq!(sim.step_count(), frames);
    assert!(
        (sim.interpolated_time() - total).abs() < 1e-6,
        "expected {total}, got {}",
        sim.interpolated_time()
    );
    assert!((sim.time() - 3600.0).abs() < 1e-3);
}

#[test]
fn test_large_delta_is_clamped() {
    let mut sim = Sim::new(STEP).unwrap();
    let c = counter();
    sim.add_object(c.clone());

    sim.tick(5.0);
    // Only 0.1s is consumed: 6 full steps
    assert_eq!(c.borrow().ticks, 6);
    assert!((sim.interpolated_time() - 0.1).abs() < 1e-5);
}

#[test]
fn test_non_positive_delta_leaves_state_unchanged() {
    let mut sim = Sim::new(STEP).unwrap();
    sim.gravity = Vec3::ZERO;
    let body = RigidBody::new(&mut sim);
    body.borrow_mut().set_linear_vel(Vec3::new(1.0, 0.0, 0.0));

    sim.tick(STEP * 1.5);
    let time = sim.time();
    let alpha = sim.alpha();
    let current = body.borrow().current_state();
    let interp = *body.borrow().interp();

    sim.tick(0.0);
    sim.tick(-1.0);

    assert_eq!(sim.time(), time);
    assert_eq!(sim.alpha(), alpha);
    assert_eq!(body.borrow().current_state(), current);
    assert_eq!(*body.borrow().interp(), interp);
}

#[test]
fn test_subscribers_apply_forces_each_step() {
    let mut sim = Sim::new(STEP).unwrap();
    sim.gravity = Vec3::ZERO;
    let body = RigidBody::new(&mut sim);

    let thrusted = body.clone();
    let id = sim.on_step(move || thrusted.borrow_mut().add_force(Vec3::new(64.0, 0.0, 0.0)));

    // Unit mass: each step adds 64 * STEP = 1 m/s
    sim.tick(STEP * 2.0);
    assert!((body.borrow().linear_vel().x - 2.0).abs() < 1e-5);

    assert!(sim.unsubscribe(id));
    sim.tick(STEP * 2.0);
    assert!((body.borrow().linear_vel().x - 2.0).abs() < 1e-5);
}

#[test]
fn test_recording_sees_pre_step_world() {
    // A subscriber-free world where every body records before any body moves
    let mut sim = Sim::new(STEP).unwrap();
    sim.gravity = Vec3::ZERO;
    let a = RigidBody::new(&mut sim);
    let b = RigidBody::new(&mut sim);
    a.borrow_mut().set_linear_vel(Vec3::X);
    b.borrow_mut().set_linear_vel(Vec3::Y);

    sim.step();

    assert_eq!(a.borrow().previous_state().position, Vec3::ZERO);
    assert_eq!(b.borrow().previous_state().position, Vec3::ZERO);
    assert_eq!(a.borrow().previous_state().linear_velocity, Vec3::X);
}

#[test]
fn test_registration_counts() {
    let mut sim = Sim::new(STEP).unwrap();
    let c = counter();
    // No de-duplication
    sim.add_object(c.clone());
    sim.add_object(c.clone());
    assert_eq!(sim.object_count(), 2);

    sim.tick(STEP);
    assert_eq!(c.borrow().ticks, 2);
}

//! Scenario tests for rigid body integration

use glam::{Quat, Vec3};
use engine::physics::{Interpolatable, RigidBody, Sim};

const STEP: f32 = 1.0 / 64.0;

fn assert_vec_eq(a: Vec3, b: Vec3, tolerance: f32) {
    assert!(
        (a - b).length() < tolerance,
        "expected {b:?}, got {a:?}"
    );
}

#[test]
fn test_pure_linear_motion() {
    let mut sim = Sim::new(STEP).unwrap();
    sim.gravity = Vec3::ZERO;
    let body = RigidBody::new(&mut sim);
    let velocity = Vec3::new(3.0, -2.0, 0.5);
    body.borrow_mut().set_linear_vel(velocity);

    for _ in 0..32 {
        let before = body.borrow().position();
        sim.step();
        assert_vec_eq(body.borrow().position(), before + velocity * STEP, 1e-5);
    }
}

#[test]
fn test_gravity_only() {
    let mut sim = Sim::new(STEP).unwrap();
    let body = RigidBody::new(&mut sim);

    let steps = 100;
    for _ in 0..steps {
        sim.step();
    }

    let expected = sim.gravity * (steps as f32 * STEP);
    assert_vec_eq(body.borrow().linear_vel(), expected, 1e-4);
    assert!(body.borrow().position().z < 0.0);
}

#[test]
fn test_gravity_can_change_between_ticks() {
    let mut sim = Sim::new(STEP).unwrap();
    let body = RigidBody::new(&mut sim);

    sim.gravity = Vec3::new(0.0, -1.62, 0.0);
    sim.tick(STEP * 4.0);
    sim.gravity = Vec3::ZERO;
    sim.tick(STEP * 4.0);

    assert_vec_eq(body.borrow().linear_vel(), Vec3::new(0.0, -1.62 * 4.0 * STEP, 0.0), 1e-5);
}

#[test]
fn test_offset_force_spins_body() {
    let mut sim = Sim::new(STEP).unwrap();
    sim.gravity = Vec3::ZERO;
    let body = RigidBody::new(&mut sim);
    body.borrow_mut()
        .set_mass_cuboid(2.0, Vec3::new(1.0, 0.5, 0.25))
        .unwrap();

    let pushed = body.clone();
    sim.on_step(move || {
        let mut body = pushed.borrow_mut();
        // Push +Y on the +X face: torque about +Z
        body.add_force_at_local_point(Vec3::new(0.0, 1.0, 0.0), Vec3::new(1.0, 0.0, 0.0));
    });

    for _ in 0..16 {
        sim.step();
    }

    let body = body.borrow();
    assert!(body.angular_vel().z > 0.0);
    assert!(body.orientation().is_normalized());
    let (axis, angle) = body.orientation().to_axis_angle();
    assert!(angle > 0.0);
    assert_vec_eq(axis, Vec3::Z, 1e-3);
}

#[test]
fn test_free_spin_conserves_momentum() {
    let mut sim = Sim::new(STEP).unwrap();
    sim.gravity = Vec3::ZERO;
    let body = RigidBody::new(&mut sim);
    body.borrow_mut()
        .set_mass_cuboid(1.0, Vec3::new(2.0, 1.0, 0.5))
        .unwrap();
    body.borrow_mut().set_orientation(Quat::from_rotation_x(0.4));
    body.borrow_mut().set_angular_momentum(Vec3::new(0.3, 0.0, 1.0));

    for _ in 0..128 {
        sim.step();
    }

    // No torque: momentum is untouched, orientation stays unit length
    assert_eq!(body.borrow().angular_momentum(), Vec3::new(0.3, 0.0, 1.0));
    assert!(body.borrow().orientation().is_normalized());
}

#[test]
fn test_interpolated_state_follows_alpha() {
    let mut sim = Sim::new(STEP).unwrap();
    sim.gravity = Vec3::ZERO;
    let body = RigidBody::new(&mut sim);
    body.borrow_mut().set_linear_vel(Vec3::new(64.0, 0.0, 0.0));

    // One step plus a quarter
    sim.tick(STEP * 1.25);
    assert!((sim.alpha() - 0.25).abs() < 1e-5);

    let body = body.borrow();
    let previous = *body.previous_state();
    let current = body.current_state();
    assert_eq!(previous.position, Vec3::ZERO);
    assert_eq!(current.position, Vec3::new(1.0, 0.0, 0.0));

    let interp = body.interp();
    assert_eq!(*interp, previous.blend(&current, sim.alpha()));
    assert!((interp.position.x - 0.25).abs() < 1e-5);

    assert_eq!(body.state_at(0.0), previous);
    assert_eq!(body.state_at(1.0), current);
}

#[test]
fn test_interpolated_orientation_is_componentwise() {
    let mut sim = Sim::new(STEP).unwrap();
    sim.gravity = Vec3::ZERO;
    let body = RigidBody::new(&mut sim);
    body.borrow_mut().set_angular_momentum(Vec3::new(0.0, 0.0, 8.0));

    sim.tick(STEP * 1.5);

    let body = body.borrow();
    let a = glam::Vec4::from(body.previous_state().orientation);
    let b = glam::Vec4::from(body.orientation());
    let expected = a + (b - a) * sim.alpha();
    let got = glam::Vec4::from(body.interp().orientation);
    assert!((got - expected).length() < 1e-6);
}

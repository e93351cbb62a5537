//! Headless driver: drops a spinning box onto the ground with irregular frames

use glam::Vec3;
use std::cell::Cell;
use std::path::PathBuf;
use std::rc::Rc;
use engine::prelude::*;
use tracing::{error, info};

/// Irregular frame deltas, cycled to mimic an uneven render loop
const FRAME_DELTAS: [f32; 6] = [0.016, 0.021, 0.012, 0.033, 0.017, 0.15];

/// Frames to simulate
const FRAME_COUNT: usize = 120;

fn main() {
    // Initialize logging
    engine::init_logging();
    info!("Starting physics demo");

    let config = match std::env::args().nth(1).map(PathBuf::from) {
        Some(path) => match SimConfig::load(&path) {
            Ok(config) => config,
            Err(err) => {
                error!("Failed to load config from {path:?}: {err}");
                std::process::exit(1);
            }
        },
        None => SimConfig::default(),
    };

    let mut sim = match Sim::from_config(&config) {
        Ok(sim) => sim,
        Err(err) => {
            error!("Failed to create simulation: {err}");
            std::process::exit(1);
        }
    };

    sim.add_static_object(Rc::new(GroundPlane::new(0.0)));

    let half_extents = Vec3::new(1.0, 0.5, 0.25);
    let body = RigidBody::new(&mut sim);
    {
        let mut body = body.borrow_mut();
        body.set_position(Vec3::new(0.0, 0.0, 5.0));
        if let Err(err) = body.set_mass_cuboid(10.0, half_extents) {
            error!("Rejected box mass: {err}");
        }
    }

    // Spin the box up with a body-local torque for the first half second
    let steps = Rc::new(Cell::new(0u32));
    let spin_steps = (0.5 / sim.timestep()) as u32;
    let thruster = body.clone();
    let counter = steps.clone();
    let spin_up = sim.on_step(move || {
        counter.set(counter.get() + 1);
        if counter.get() <= spin_steps {
            thruster
                .borrow_mut()
                .add_local_torque(Vec3::new(0.0, 0.0, 20.0));
        }
    });

    let corners: Vec<SpherePoint> = [-1.0f32, 1.0]
        .iter()
        .flat_map(|&x| [-1.0f32, 1.0].map(move |y| Vec3::new(x, y, -1.0)))
        .map(|corner| SpherePoint::new(corner * half_extents, 0.0))
        .collect();

    for frame in 0..FRAME_COUNT {
        sim.tick(FRAME_DELTAS[frame % FRAME_DELTAS.len()]);

        let body = body.borrow();
        let state = body.interp();
        // Query the bottom corners of the box
        let points = corners
            .iter()
            .map(|corner| SpherePoint::new(body.local_to_world_vector(corner.position), 0.0))
            .collect();
        let batch = SphereList::new(points, 0.0, state.position);
        let contacts = sim.collide_sphere_list(&batch);
        let instance = RenderInstance::from_state(state);

        info!(
            frame,
            time = sim.interpolated_time(),
            alpha = sim.alpha(),
            height = state.position.z,
            spin = body.angular_vel().z,
            contacts = contacts.len(),
            translation = ?instance.model[3],
            "Frame"
        );
    }

    sim.unsubscribe(spin_up);
    info!(steps = steps.get(), "Finished");

    match serde_json::to_string_pretty(body.borrow().interp()) {
        Ok(json) => println!("{json}"),
        Err(err) => error!("Failed to serialize final state: {err}"),
    };
}

//! Contact queries against static, non-simulated geometry

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Contact between a query point and a static surface
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Contact {
    /// World space point on the surface
    pub surface_pos: Vec3,
    /// Surface normal, pointing out of the surface
    pub normal: Vec3,
    /// Penetration depth; only positive depths are reported by the simulation
    pub depth: f32,
}

impl Contact {
    /// Create a contact whose depth is filled in by the simulation
    pub fn new(surface_pos: Vec3, normal: Vec3) -> Self {
        Self {
            surface_pos,
            normal,
            depth: 0.0,
        }
    }

    /// Depth of `point` below the surface along the normal
    pub fn depth_of(&self, point: Vec3) -> f32 {
        (self.surface_pos - point).dot(self.normal)
    }
}

/// A single sphere in a sphere list
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpherePoint {
    pub position: Vec3,
    pub radius: f32,
}

impl SpherePoint {
    pub fn new(position: Vec3, radius: f32) -> Self {
        Self { position, radius }
    }
}

/// Bounding volume of a sphere list
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Bounds {
    pub center: Vec3,
}

/// A batch of query points sharing a bounding sphere
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SphereList {
    pub points: Vec<SpherePoint>,
    /// Radius of the shared bounding sphere
    pub radius: f32,
    pub bounds: Bounds,
}

impl SphereList {
    pub fn new(points: Vec<SpherePoint>, radius: f32, center: Vec3) -> Self {
        Self {
            points,
            radius,
            bounds: Bounds { center },
        }
    }

    /// Query location for a point: shifted to the bottom of the bounding
    /// sphere, then lowered by the point's own radius
    pub fn query_location(&self, point: &SpherePoint) -> Vec3 {
        let offset = self.bounds.center + Vec3::new(0.0, 0.0, -self.radius);
        let mut query = point.position + offset;
        query.z -= point.radius;
        query
    }
}

/// Static geometry that answers point queries
pub trait PointContactProvider {
    /// Nearest surface contact for `point`, if the surface covers it
    fn point_contact(&self, point: Vec3) -> Option<Contact>;
}

/// Static geometry that answers sphere-list queries directly
pub trait SphereListContactProvider {
    fn sphere_list_contact(&self, spheres: &SphereList) -> Vec<Contact>;
}

/// Static geometry registered for clipping
///
/// Both query capabilities are optional; geometry exposing neither is
/// skipped by the simulation.
pub trait StaticObject {
    fn as_point_contact(&self) -> Option<&dyn PointContactProvider> {
        None
    }

    fn as_sphere_list_contact(&self) -> Option<&dyn SphereListContactProvider> {
        None
    }
}

/// Infinite plane of constant height, normal along +Z
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GroundPlane {
    pub height: f32,
}

impl GroundPlane {
    pub fn new(height: f32) -> Self {
        Self { height }
    }
}

impl PointContactProvider for GroundPlane {
    fn point_contact(&self, point: Vec3) -> Option<Contact> {
        Some(Contact::new(
            Vec3::new(point.x, point.y, self.height),
            Vec3::Z,
        ))
    }
}

impl StaticObject for GroundPlane {
    fn as_point_contact(&self) -> Option<&dyn PointContactProvider> {
        Some(self)
    }
}

//! Particle state and the gravitational pair kernel.

use super::vector::NVec3;

/// Gravitational constant of the simulation (natural units).
pub const GRAVITATIONAL_CONSTANT: f64 = 1.0;

/// Pairs closer than this are skipped by the gravity kernel.
const MIN_GRAVITY_DISTANCE: f64 = 1e-10;

/// A point particle owned by a [`SimulationDomain`](super::domain::SimulationDomain).
///
/// `id` is caller-assigned and expected to be unique within a domain; it is
/// the stable total order used to process each unordered pair exactly once.
/// `old_force` holds the previous step's force for the Verlet half-step
/// velocity update.
#[derive(Debug, Clone)]
pub struct Particle {
    pub id: u32,
    pub category: String,
    pub mass: f64,
    pub position: NVec3,
    pub velocity: NVec3,
    pub force: NVec3,
    pub old_force: NVec3,
}

impl Particle {
    /// Create a particle with zeroed force accumulators.
    pub fn new(
        id: u32,
        category: impl Into<String>,
        mass: f64,
        position: NVec3,
        velocity: NVec3,
    ) -> Self {
        Self {
            id,
            category: category.into(),
            mass,
            position,
            velocity,
            force: NVec3::zeros(),
            old_force: NVec3::zeros(),
        }
    }

    /// Kinetic energy: 0.5 * m * |v|^2.
    pub fn kinetic_energy(&self) -> f64 {
        0.5 * self.mass * self.velocity.norm_squared()
    }
}

/// Accumulate Newtonian gravity on both particles of a pair (action–reaction).
///
/// Separations below 1e-10 are skipped silently and leave both force
/// accumulators untouched.
pub fn apply_gravitational_force(p1: &mut Particle, p2: &mut Particle) {
    let delta = p1.position - p2.position;
    let distance = delta.norm();
    if distance < MIN_GRAVITY_DISTANCE {
        return;
    }

    let magnitude = GRAVITATIONAL_CONSTANT * p1.mass * p2.mass / (distance * distance);
    let force = (delta / distance) * magnitude;

    // delta points from p2 to p1, so p1 is pulled along -delta
    p1.force -= force;
    p2.force += force;
}

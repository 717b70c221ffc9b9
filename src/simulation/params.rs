//! Numerical and physical parameters for the simulation
//!
//! `Parameters` holds runtime settings:
//! - integration step size and step count,
//! - Lennard-Jones interaction constants (`epsilon`, `sigma`),
//! - kinetic-energy rescaling target and interval

#[derive(Debug, Clone)]
pub struct Parameters {
    pub dt: f64,                       // integration step size
    pub steps: usize,                  // number of steps to run
    pub epsilon: f64,                  // Lennard-Jones well depth
    pub sigma: f64,                    // Lennard-Jones characteristic distance
    pub target_kinetic_energy: f64,    // 0 disables rescaling
    pub rescale_interval: usize,       // steps between rescalings
}

impl Parameters {
    pub const DEFAULT_RESCALE_INTERVAL: usize = 1000;
}

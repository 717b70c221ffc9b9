//! Configuration types for loading simulation scenarios from YAML.
//!
//! This module defines a thin, `serde`-deserializable representation of a
//! simulation scenario. A scenario consists of:
//!
//! - [`DomainConfig`]     – geometry, cutoff radius and boundary selection
//! - [`ParametersConfig`] – numerical parameters and interaction constants
//! - [`ParticleConfig`]   – initial state for an individual particle
//! - [`BlockConfig`]      – rectangular lattice of identical particles
//! - [`ScenarioConfig`]   – top-level wrapper used to load a scenario
//!
//! # YAML format
//! An example 2D scenario YAML matching these types:
//!
//! ```yaml
//! domain:
//!   dimension: 2
//!   lengths: [250.0, 40.0]
//!   cutoff: 2.5
//!   boundary: reflect       # reflect | absorb | periodic | potential_reflect
//!
//! parameters:
//!   dt: 0.005
//!   steps: 3000
//!   epsilon: 5.0
//!   sigma: 1.0
//!   target_kinetic_energy: 0.0   # 0 disables rescaling
//!
//! particles:
//!   - x: [10.0, 20.0]
//!     v: [0.0, -10.0]
//!     m: 1.0
//!     category: probe
//!
//! blocks:
//!   - origin: [67.0, 0.0]
//!     count: [160, 40]
//!     v: [0.0, 0.0]
//!     m: 1.0
//!     category: base
//!
//! output: collision
//! ```
//!
//! The engine maps this configuration into its runtime representation via
//! [`Scenario::build`](crate::simulation::scenario::Scenario::build).

use serde::Deserialize;

/// Which boundary strategy the domain applies at its edges.
/// Omitting the field leaves the domain without boundary handling.
#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum BoundaryConfig {
    Reflect,        // mirror position, invert velocity component
    Absorb,         // remove the particle from the domain
    Periodic,       // wrap position modulo the axis length
    PotentialReflect, // soft Lennard-Jones wall repulsion
}

/// Domain geometry and edge behavior.
#[derive(Deserialize, Debug, Clone)]
pub struct DomainConfig {
    pub dimension: usize,     // 1, 2 or 3
    pub lengths: Vec<f64>,    // per-axis domain lengths, one per active axis
    pub cutoff: f64,          // interaction cutoff; also the cell edge length
    pub boundary: Option<BoundaryConfig>,
}

/// Global numerical parameters and interaction constants for a scenario.
#[derive(Deserialize, Debug, Clone)]
pub struct ParametersConfig {
    pub dt: f64,      // integration step size
    pub steps: usize, // number of steps to run
    pub epsilon: f64, // Lennard-Jones well depth
    pub sigma: f64,   // Lennard-Jones characteristic distance
    #[serde(default)]
    pub target_kinetic_energy: f64, // 0 disables rescaling
    #[serde(default = "default_rescale_interval")]
    pub rescale_interval: usize, // steps between rescalings
}

fn default_rescale_interval() -> usize {
    crate::simulation::params::Parameters::DEFAULT_RESCALE_INTERVAL
}

/// Configuration for a single particle's initial state.
#[derive(Deserialize, Debug, Clone)]
pub struct ParticleConfig {
    pub x: Vec<f64>, // initial position, one component per active axis
    #[serde(default)]
    pub v: Vec<f64>, // initial velocity, zero when omitted
    pub m: f64,      // mass
    #[serde(default)]
    pub category: String, // free-form label
}

/// A rectangular lattice of identical particles, the usual way scenes set
/// up blocks of material. Spacing defaults to the Lennard-Jones contact
/// distance `2^(1/6) * sigma`.
#[derive(Deserialize, Debug, Clone)]
pub struct BlockConfig {
    pub origin: Vec<f64>,   // lattice corner
    pub count: Vec<usize>,  // particles per axis
    #[serde(default)]
    pub v: Vec<f64>,        // shared initial velocity
    pub m: f64,             // shared mass
    pub spacing: Option<f64>,
    #[serde(default)]
    pub category: String,
}

/// Top-level scenario configuration loaded from YAML.
#[derive(Deserialize, Debug, Clone)]
pub struct ScenarioConfig {
    pub domain: DomainConfig,
    pub parameters: ParametersConfig,
    #[serde(default)]
    pub particles: Vec<ParticleConfig>,
    #[serde(default)]
    pub blocks: Vec<BlockConfig>,
    #[serde(default = "default_output")]
    pub output: String, // per-run output directory name under out/
}

fn default_output() -> String {
    "run".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_a_full_scenario() {
        let yaml = r#"
domain:
  dimension: 2
  lengths: [250.0, 40.0]
  cutoff: 2.5
  boundary: periodic
parameters:
  dt: 0.005
  steps: 100
  epsilon: 5.0
  sigma: 1.0
particles:
  - x: [1.0, 2.0]
    v: [0.0, -10.0]
    m: 1.0
blocks:
  - origin: [10.0, 0.0]
    count: [4, 4]
    m: 1.0
    category: base
output: demo
"#;
        let cfg: ScenarioConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(cfg.domain.dimension, 2);
        assert_eq!(cfg.domain.boundary, Some(BoundaryConfig::Periodic));
        assert_eq!(cfg.parameters.rescale_interval, 1000);
        assert_eq!(cfg.parameters.target_kinetic_energy, 0.0);
        assert_eq!(cfg.particles.len(), 1);
        assert_eq!(cfg.blocks[0].count, vec![4, 4]);
        assert_eq!(cfg.output, "demo");
    }

    #[test]
    fn boundary_and_output_are_optional() {
        let yaml = r#"
domain:
  dimension: 1
  lengths: [10.0]
  cutoff: 2.5
parameters:
  dt: 0.01
  steps: 10
  epsilon: 1.0
  sigma: 1.0
"#;
        let cfg: ScenarioConfig = serde_yaml::from_str(yaml).unwrap();
        assert!(cfg.domain.boundary.is_none());
        assert!(cfg.particles.is_empty());
        assert_eq!(cfg.output, "run");
    }
}

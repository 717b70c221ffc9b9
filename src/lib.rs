pub mod configuration;
pub mod error;
pub mod simulation;
pub mod visualization;

pub use error::{Error, Result};

pub use simulation::boundary::{Boundary, BoundaryOutcome};
pub use simulation::domain::SimulationDomain;
pub use simulation::grid::{Cell, CellGrid};
pub use simulation::params::Parameters;
pub use simulation::particle::{apply_gravitational_force, Particle};
pub use simulation::scenario::Scenario;
pub use simulation::vector::{unit_vector, vec3_from, NVec3};

pub use configuration::config::{
    BlockConfig, BoundaryConfig, DomainConfig, ParametersConfig, ParticleConfig, ScenarioConfig,
};

pub use visualization::vtk;

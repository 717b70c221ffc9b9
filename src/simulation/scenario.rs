//! Build fully-initialized simulation scenarios from configuration
//!
//! Takes a `ScenarioConfig` (YAML-facing) and produces the runtime bundle:
//! - the domain with its cell grid, particles and boundary strategy
//! - numerical parameters for the stepping loop
//! - the per-run output directory name for visualization export

use crate::configuration::config::{
    BlockConfig, BoundaryConfig, ParticleConfig, ScenarioConfig,
};
use crate::error::{Error, Result};

use super::boundary::Boundary;
use super::domain::SimulationDomain;
use super::params::Parameters;
use super::particle::Particle;
use super::vector::vec3_from;

/// A fully-initialized simulation run: domain state at step 0 plus the
/// numerical parameters driving it.
pub struct Scenario {
    pub domain: SimulationDomain,
    pub parameters: Parameters,
    pub output: String,
}

impl Scenario {
    /// Validate the configuration and assemble the runtime domain.
    pub fn build(cfg: ScenarioConfig) -> Result<Scenario> {
        let dim = cfg.domain.dimension;
        if !(1..=3).contains(&dim) {
            return Err(Error::InvalidParam(format!(
                "dimension must be 1, 2 or 3, got {dim}"
            )));
        }
        if cfg.domain.lengths.len() < dim {
            return Err(Error::InvalidParam(format!(
                "{dim}D domain needs {dim} axis lengths, got {}",
                cfg.domain.lengths.len()
            )));
        }
        if cfg.domain.cutoff <= 0.0 {
            return Err(Error::InvalidParam("cutoff must be positive".into()));
        }
        if cfg.parameters.dt <= 0.0 {
            return Err(Error::InvalidParam("dt must be positive".into()));
        }

        let parameters = Parameters {
            dt: cfg.parameters.dt,
            steps: cfg.parameters.steps,
            epsilon: cfg.parameters.epsilon,
            sigma: cfg.parameters.sigma,
            target_kinetic_energy: cfg.parameters.target_kinetic_energy,
            rescale_interval: cfg.parameters.rescale_interval,
        };

        let capacity = cfg.particles.len()
            + cfg
                .blocks
                .iter()
                .map(|b| b.count.iter().product::<usize>())
                .sum::<usize>();
        let mut domain =
            SimulationDomain::with_grid(dim, capacity, cfg.domain.cutoff, &cfg.domain.lengths);
        domain.set_boundary(cfg.domain.boundary.map(|b| match b {
            BoundaryConfig::Reflect => Boundary::Reflect,
            BoundaryConfig::Absorb => Boundary::Absorb,
            BoundaryConfig::Periodic => Boundary::Periodic,
            BoundaryConfig::PotentialReflect => Boundary::PotentialReflect {
                epsilon: cfg.parameters.epsilon,
                sigma: cfg.parameters.sigma,
            },
        }));

        let mut next_id = 0u32;
        for pc in &cfg.particles {
            domain.add_particle(build_particle(next_id, pc)?);
            next_id += 1;
        }
        for block in &cfg.blocks {
            next_id = expand_block(&mut domain, block, cfg.parameters.sigma, next_id)?;
        }

        Ok(Scenario {
            domain,
            parameters,
            output: cfg.output,
        })
    }
}

fn build_particle(id: u32, pc: &ParticleConfig) -> Result<Particle> {
    if pc.m <= 0.0 {
        return Err(Error::InvalidParam(format!(
            "particle {id}: mass must be positive"
        )));
    }
    Ok(Particle::new(
        id,
        pc.category.clone(),
        pc.m,
        vec3_from(&pc.x),
        vec3_from(&pc.v),
    ))
}

/// Lay out a rectangular lattice of identical particles. Spacing defaults
/// to the Lennard-Jones contact distance `2^(1/6) * sigma`.
fn expand_block(
    domain: &mut SimulationDomain,
    block: &BlockConfig,
    sigma: f64,
    mut next_id: u32,
) -> Result<u32> {
    if block.m <= 0.0 {
        return Err(Error::InvalidParam("block mass must be positive".into()));
    }
    let spacing = block
        .spacing
        .unwrap_or_else(|| 2f64.powf(1.0 / 6.0) * sigma);

    let mut count = [1usize; 3];
    for (i, &c) in block.count.iter().take(3).enumerate() {
        count[i] = c.max(1);
    }
    let origin = vec3_from(&block.origin);
    let velocity = vec3_from(&block.v);

    for iz in 0..count[2] {
        for iy in 0..count[1] {
            for ix in 0..count[0] {
                let mut position = origin;
                position.x += ix as f64 * spacing;
                position.y += iy as f64 * spacing;
                position.z += iz as f64 * spacing;
                domain.add_particle(Particle::new(
                    next_id,
                    block.category.clone(),
                    block.m,
                    position,
                    velocity,
                ));
                next_id += 1;
            }
        }
    }
    Ok(next_id)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_config() -> ScenarioConfig {
        serde_yaml::from_str(
            r#"
domain:
  dimension: 2
  lengths: [10.0, 10.0]
  cutoff: 2.5
  boundary: absorb
parameters:
  dt: 0.005
  steps: 10
  epsilon: 1.0
  sigma: 1.0
blocks:
  - origin: [1.0, 1.0]
    count: [3, 2]
    m: 1.0
    category: base
"#,
        )
        .unwrap()
    }

    #[test]
    fn block_expansion_produces_the_full_lattice() {
        let scenario = Scenario::build(base_config()).unwrap();
        assert_eq!(scenario.domain.particle_count(), 6);
        // ids are unique and sequential
        let ids: Vec<u32> = scenario.domain.particles().iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![0, 1, 2, 3, 4, 5]);
    }

    #[test]
    fn rejects_invalid_dimension() {
        let mut cfg = base_config();
        cfg.domain.dimension = 4;
        assert!(matches!(
            Scenario::build(cfg),
            Err(Error::InvalidParam(_))
        ));
    }

    #[test]
    fn rejects_missing_axis_lengths() {
        let mut cfg = base_config();
        cfg.domain.lengths = vec![10.0];
        assert!(Scenario::build(cfg).is_err());
    }

    #[test]
    fn rejects_non_positive_mass() {
        let mut cfg = base_config();
        cfg.blocks[0].m = 0.0;
        assert!(Scenario::build(cfg).is_err());
    }
}

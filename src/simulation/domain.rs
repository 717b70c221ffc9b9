//! Simulation domain: particle ownership, force accumulation and the
//! Störmer–Verlet stepping loop.
//!
//! The domain owns the particle vector and the cell grid; cells refer to
//! both only by index. One step advances positions, snapshots forces,
//! applies the configured boundary, rebuilds the grid, recomputes forces
//! and finishes the velocity half-step — strictly in that order.

use tracing::{debug, info};

use crate::error::{Error, Result};

use super::boundary::{Boundary, BoundaryOutcome};
use super::forces::apply_lennard_jones_force;
use super::grid::CellGrid;
use super::params::Parameters;
use super::particle::{apply_gravitational_force, Particle};
use super::vector::NVec3;

/// A bounded region of space with its particles, cell grid and optional
/// boundary strategy.
pub struct SimulationDomain {
    dim: usize,
    particles: Vec<Particle>,
    grid: Option<CellGrid>,
    boundary: Option<Boundary>,
}

impl SimulationDomain {
    /// Minimal constructor: dimensionality and expected particle count,
    /// grid construction deferred to [`SimulationDomain::init_grid`].
    pub fn new(dim: usize, capacity: usize) -> Self {
        Self {
            dim,
            particles: Vec::with_capacity(capacity),
            grid: None,
            boundary: None,
        }
    }

    /// Full constructor: builds the cell grid immediately from the per-axis
    /// domain lengths and the cutoff radius (which is also the cell edge).
    pub fn with_grid(dim: usize, capacity: usize, cutoff: f64, lengths: &[f64]) -> Self {
        let mut domain = Self::new(dim, capacity);
        domain.init_grid(cutoff, lengths);
        domain
    }

    /// Build the cell grid and place all current particles into it.
    pub fn init_grid(&mut self, cutoff: f64, lengths: &[f64]) {
        let mut grid = CellGrid::new(self.dim, lengths, cutoff);
        grid.rebuild(&self.particles);
        info!(
            dim = self.dim,
            cells = grid.cells().len(),
            cutoff,
            "cell grid initialized"
        );
        self.grid = Some(grid);
    }

    pub fn set_boundary(&mut self, boundary: Option<Boundary>) {
        self.boundary = boundary;
    }

    pub fn dim(&self) -> usize {
        self.dim
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn particles_mut(&mut self) -> &mut [Particle] {
        &mut self.particles
    }

    pub fn particle_count(&self) -> usize {
        self.particles.len()
    }

    pub fn grid(&self) -> Option<&CellGrid> {
        self.grid.as_ref()
    }

    pub fn add_particle(&mut self, particle: Particle) {
        self.particles.push(particle);
    }

    /// Remove a particle by id. Returns whether anything was removed; cell
    /// membership catches up at the next grid rebuild.
    pub fn remove_particle(&mut self, id: u32) -> bool {
        let before = self.particles.len();
        self.particles.retain(|p| p.id != id);
        self.particles.len() != before
    }

    /// Clear all membership lists and reinsert every particle by its current
    /// position. Must run before the first force evaluation and after every
    /// position change.
    pub fn rebuild_grid(&mut self) -> Result<()> {
        let grid = self.grid.as_mut().ok_or(Error::GridNotInitialized)?;
        grid.rebuild(&self.particles);
        Ok(())
    }

    /// Reset all force accumulators and evaluate pairwise forces over the
    /// cell neighborhoods: gravity for every pair, Lennard-Jones only below
    /// the cutoff radius.
    ///
    /// Each unordered pair is processed exactly once, ordered by particle id
    /// (a stable total order, unlike the address comparison a naive port
    /// would use).
    pub fn update_forces(&mut self, epsilon: f64, sigma: f64) -> Result<()> {
        for p in &mut self.particles {
            p.force = NVec3::zeros();
        }

        let grid = self.grid.as_ref().ok_or(Error::GridNotInitialized)?;
        let cutoff = grid.cell_edge();

        for cell in grid.cells() {
            for &i in &cell.particles {
                for &neighbor in &cell.neighbors {
                    for &j in &grid.cells()[neighbor].particles {
                        if self.particles[i].id >= self.particles[j].id {
                            continue;
                        }
                        let (p1, p2) = pair_mut(&mut self.particles, i, j);
                        apply_gravitational_force(p1, p2);

                        let distance = (p1.position - p2.position).norm();
                        if distance < cutoff {
                            apply_lennard_jones_force(p1, p2, epsilon, sigma, cutoff);
                        }
                    }
                }
            }
        }
        Ok(())
    }

    /// Verlet position update: `x += (v + 0.5*dt*f/m) * dt`.
    pub fn update_positions(&mut self, dt: f64) {
        for p in &mut self.particles {
            let acceleration = p.force / p.mass;
            p.position += (p.velocity + acceleration * (0.5 * dt)) * dt;
        }
    }

    /// Verlet velocity half-steps: `v += 0.5*dt*(f + f_old)/m`.
    pub fn update_velocities(&mut self, dt: f64) {
        for p in &mut self.particles {
            p.velocity += (p.force + p.old_force) * (0.5 * dt / p.mass);
        }
    }

    /// Snapshot every particle's force into `old_force`. Must happen before
    /// forces are recomputed for the step.
    pub fn save_old_forces(&mut self) {
        for p in &mut self.particles {
            p.old_force = p.force;
        }
    }

    /// Apply a configured Reflect/Absorb/Periodic strategy to every particle
    /// it reports out of bounds. No-op for PotentialReflect or when no
    /// boundary is set. Runs between the position update and the grid
    /// rebuild so the rebuild never indexes an escaped particle.
    pub fn apply_positional_boundary(&mut self) {
        let Some(boundary) = &self.boundary else { return };
        if !boundary.is_positional() {
            return;
        }
        let Some(grid) = &self.grid else { return };

        let mut removed: Vec<u32> = Vec::new();
        for p in &mut self.particles {
            if boundary.applies_out_of_bounds(p, grid)
                && boundary.apply(p, grid) == BoundaryOutcome::Removed
            {
                removed.push(p.id);
            }
        }
        if !removed.is_empty() {
            debug!(count = removed.len(), "absorbed particles leaving the domain");
            self.particles.retain(|p| !removed.contains(&p.id));
        }
    }

    /// Apply a configured PotentialReflect wall force to every particle near
    /// a wall. No-op for the hard boundaries or when no boundary is set.
    /// Runs after force recomputation so the wall force joins the same
    /// velocity half-step as the pair forces.
    pub fn apply_boundary_potential(&mut self) {
        let Some(boundary) = &self.boundary else { return };
        if boundary.is_positional() {
            return;
        }
        let Some(grid) = &self.grid else { return };

        for p in &mut self.particles {
            if boundary.applies_out_of_bounds(p, grid) {
                boundary.apply(p, grid);
            }
        }
    }

    /// Initialization phase of the Störmer–Verlet scheme: rebuild the grid
    /// and evaluate forces once, with no position or velocity change.
    pub fn prepare(&mut self, params: &Parameters) -> Result<()> {
        self.rebuild_grid()?;
        self.update_forces(params.epsilon, params.sigma)
    }

    /// Advance the domain by one Störmer–Verlet step.
    pub fn step(&mut self, params: &Parameters) -> Result<()> {
        self.update_positions(params.dt);
        self.save_old_forces();
        self.apply_positional_boundary();
        self.rebuild_grid()?;
        self.update_forces(params.epsilon, params.sigma)?;
        self.apply_boundary_potential();
        self.update_velocities(params.dt);
        Ok(())
    }

    /// Run the full stepping loop. `on_step` is invoked with the step index
    /// and the domain after the initialization phase (step 0) and after each
    /// completed step; visualization export hooks in here.
    pub fn run<F>(&mut self, params: &Parameters, mut on_step: F) -> Result<()>
    where
        F: FnMut(usize, &SimulationDomain),
    {
        self.prepare(params)?;
        on_step(0, self);

        for step in 1..params.steps {
            self.step(params)?;

            if params.target_kinetic_energy != 0.0
                && params.rescale_interval != 0
                && step % params.rescale_interval == 0
            {
                self.rescale_kinetic_energy(params.target_kinetic_energy);
            }

            on_step(step, self);
        }
        Ok(())
    }

    /// Total kinetic energy of the active particle set.
    pub fn total_kinetic_energy(&self) -> f64 {
        self.particles.iter().map(Particle::kinetic_energy).sum()
    }

    /// Scale all velocities so the total kinetic energy matches `target`.
    /// No-op when the current total is numerically negligible.
    pub fn rescale_kinetic_energy(&mut self, target: f64) {
        let total = self.total_kinetic_energy();
        if total <= 1e-9 {
            return;
        }
        let beta = (target / total).sqrt();
        debug!(total, target, beta, "rescaling kinetic energy");
        for p in &mut self.particles {
            p.velocity *= beta;
        }
    }
}

/// Disjoint mutable references to two particles of the same slice.
fn pair_mut(particles: &mut [Particle], i: usize, j: usize) -> (&mut Particle, &mut Particle) {
    debug_assert_ne!(i, j);
    if i < j {
        let (head, tail) = particles.split_at_mut(j);
        (&mut head[i], &mut tail[0])
    } else {
        let (head, tail) = particles.split_at_mut(i);
        (&mut tail[0], &mut head[j])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_domain() -> SimulationDomain {
        let mut domain = SimulationDomain::with_grid(3, 2, 2.5, &[10.0, 10.0, 10.0]);
        domain.add_particle(Particle::new(
            0,
            "heavy",
            5.0,
            NVec3::new(4.0, 5.0, 5.0),
            NVec3::zeros(),
        ));
        domain.add_particle(Particle::new(
            1,
            "light",
            1.0,
            NVec3::new(6.0, 5.0, 5.0),
            NVec3::zeros(),
        ));
        domain
    }

    fn params() -> Parameters {
        Parameters {
            dt: 0.001,
            steps: 10,
            epsilon: 0.0,
            sigma: 1.0,
            target_kinetic_energy: 0.0,
            rescale_interval: Parameters::DEFAULT_RESCALE_INTERVAL,
        }
    }

    #[test]
    fn deferred_domain_requires_grid_before_stepping() {
        let mut domain = SimulationDomain::new(3, 0);
        assert!(matches!(
            domain.step(&params()),
            Err(Error::GridNotInitialized)
        ));
    }

    #[test]
    fn pair_mut_returns_disjoint_references() {
        let mut domain = small_domain();
        let (a, b) = pair_mut(domain.particles_mut(), 1, 0);
        assert_eq!(a.id, 1);
        assert_eq!(b.id, 0);
    }

    #[test]
    fn prepare_evaluates_forces_without_moving_anything() {
        let mut domain = small_domain();
        let positions: Vec<NVec3> = domain.particles().iter().map(|p| p.position).collect();
        domain.prepare(&params()).unwrap();
        for (p, x0) in domain.particles().iter().zip(&positions) {
            assert_eq!(p.position, *x0);
            assert_eq!(p.velocity, NVec3::zeros());
        }
        // forces populated, attraction along x
        assert!(domain.particles()[0].force.x > 0.0);
        assert!(domain.particles()[1].force.x < 0.0);
    }

    #[test]
    fn each_pair_is_counted_once() {
        // Two particles in the same cell: gravity at r=1 between unit masses
        // gives |f| = 1 exactly if the pair is processed exactly once.
        let mut domain = SimulationDomain::with_grid(3, 2, 2.5, &[10.0, 10.0, 10.0]);
        domain.add_particle(Particle::new(
            0,
            "a",
            1.0,
            NVec3::new(1.0, 1.0, 1.0),
            NVec3::zeros(),
        ));
        domain.add_particle(Particle::new(
            1,
            "b",
            1.0,
            NVec3::new(2.0, 1.0, 1.0),
            NVec3::zeros(),
        ));
        let p = Parameters { epsilon: 0.0, ..params() };
        domain.prepare(&p).unwrap();
        assert!((domain.particles()[0].force.norm() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn remove_particle_by_id() {
        let mut domain = small_domain();
        assert!(domain.remove_particle(1));
        assert!(!domain.remove_particle(1));
        assert_eq!(domain.particle_count(), 1);
    }

    #[test]
    fn rescaling_hits_the_target() {
        let mut domain = small_domain();
        domain.particles_mut()[0].velocity = NVec3::new(1.0, 0.0, 0.0);
        domain.particles_mut()[1].velocity = NVec3::new(0.0, 2.0, 0.0);
        domain.rescale_kinetic_energy(3.0);
        assert!((domain.total_kinetic_energy() - 3.0).abs() < 1e-9);
    }

    #[test]
    fn rescaling_is_a_noop_at_negligible_energy() {
        let mut domain = small_domain();
        domain.rescale_kinetic_energy(3.0);
        assert_eq!(domain.total_kinetic_energy(), 0.0);
    }
}

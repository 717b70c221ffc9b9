//! Domain-edge strategies.
//!
//! A closed set of boundary behaviors selected at domain construction time.
//! Reflect, Absorb and Periodic act on position/velocity/membership right
//! after the position update; PotentialReflect is not a hard boundary at
//! all — it adds a short-range repulsive wall force into the particle's
//! force accumulator and runs after force recomputation instead.

use super::grid::CellGrid;
use super::particle::Particle;

/// What applying a boundary decided for the particle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoundaryOutcome {
    Kept,
    /// The particle must be removed from the domain's active set.
    Removed,
}

/// Boundary-condition strategy attached to a domain.
#[derive(Debug, Clone, PartialEq)]
pub enum Boundary {
    /// Mirror the position back inside and invert the velocity component,
    /// per axis independently.
    Reflect,
    /// Remove the particle from the domain when it leaves on any axis.
    Absorb,
    /// Wrap the position modulo the axis length; velocity unchanged.
    Periodic,
    /// Soft wall: Lennard-Jones repulsion pushed into the force accumulator
    /// when the particle is within `2^(1/6)*sigma` of a wall.
    PotentialReflect { epsilon: f64, sigma: f64 },
}

impl Boundary {
    /// True for strategies that mutate position/velocity/membership after
    /// the position update; false for the force-space soft wall.
    pub fn is_positional(&self) -> bool {
        !matches!(self, Boundary::PotentialReflect { .. })
    }

    /// Pure predicate: does this strategy have work to do for `particle`?
    ///
    /// For the hard boundaries this means the particle left `[0, length)`
    /// on some active axis. For [`Boundary::PotentialReflect`] it reports
    /// proximity to a wall (within the wall cutoff), not an actual crossing.
    pub fn applies_out_of_bounds(&self, particle: &Particle, grid: &CellGrid) -> bool {
        match self {
            Boundary::Reflect | Boundary::Absorb | Boundary::Periodic => {
                (0..grid.dim()).any(|axis| {
                    let p = particle.position[axis];
                    p < 0.0 || p >= grid.axis_length(axis)
                })
            }
            Boundary::PotentialReflect { sigma, .. } => {
                let cutoff = wall_cutoff(*sigma);
                (0..grid.dim()).any(|axis| {
                    let p = particle.position[axis];
                    p < cutoff || p > grid.axis_length(axis) - cutoff
                })
            }
        }
    }

    /// Apply the strategy to one particle. Mutates position/velocity/force
    /// depending on the variant; returns [`BoundaryOutcome::Removed`] when
    /// the domain must drop the particle.
    pub fn apply(&self, particle: &mut Particle, grid: &CellGrid) -> BoundaryOutcome {
        match self {
            Boundary::Reflect => {
                for axis in 0..grid.dim() {
                    let length = grid.axis_length(axis);
                    if particle.position[axis] < 0.0 {
                        particle.position[axis] = -particle.position[axis];
                        particle.velocity[axis] = -particle.velocity[axis];
                    } else if particle.position[axis] >= length {
                        particle.position[axis] = 2.0 * length - particle.position[axis];
                        particle.velocity[axis] = -particle.velocity[axis];
                    }
                }
                BoundaryOutcome::Kept
            }
            Boundary::Absorb => BoundaryOutcome::Removed,
            Boundary::Periodic => {
                for axis in 0..grid.dim() {
                    let length = grid.axis_length(axis);
                    if particle.position[axis] < 0.0 {
                        particle.position[axis] += length;
                    } else if particle.position[axis] >= length {
                        particle.position[axis] -= length;
                    }
                }
                BoundaryOutcome::Kept
            }
            Boundary::PotentialReflect { epsilon, sigma } => {
                let cutoff = wall_cutoff(*sigma);
                for axis in 0..grid.dim() {
                    let length = grid.axis_length(axis);

                    // left wall
                    let r = particle.position[axis];
                    if r < cutoff && r > MIN_WALL_DISTANCE {
                        particle.force[axis] += wall_force(*epsilon, *sigma, r);
                    }

                    // right wall
                    let d = length - particle.position[axis];
                    if d < cutoff && d > MIN_WALL_DISTANCE {
                        particle.force[axis] -= wall_force(*epsilon, *sigma, d);
                    }
                }
                BoundaryOutcome::Kept
            }
        }
    }
}

/// Walls closer than this contribute no force (degenerate distance).
const MIN_WALL_DISTANCE: f64 = 1e-9;

/// Range of the soft-wall repulsion: the Lennard-Jones well minimum.
fn wall_cutoff(sigma: f64) -> f64 {
    2f64.powf(1.0 / 6.0) * sigma
}

/// Repulsive Lennard-Jones magnitude against a wall at distance `r`.
fn wall_force(epsilon: f64, sigma: f64, r: f64) -> f64 {
    let sr = sigma / r;
    let sr6 = sr.powi(6);
    let sr12 = sr6 * sr6;
    24.0 * epsilon * (2.0 * sr12 - sr6) / r
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulation::vector::NVec3;

    fn grid() -> CellGrid {
        // 120-long box in each of 3 axes, cutoff 2.5 -> 48 cells per axis
        CellGrid::new(3, &[120.0, 120.0, 120.0], 2.5)
    }

    fn escaped(x: f64) -> Particle {
        Particle::new(0, "p", 1.0, NVec3::new(x, 60.0, 60.0), NVec3::new(-2.0, 1.0, 0.0))
    }

    #[test]
    fn reflect_mirrors_position_and_flips_velocity() {
        let g = grid();
        let mut p = escaped(-5.0);
        assert!(Boundary::Reflect.applies_out_of_bounds(&p, &g));
        assert_eq!(Boundary::Reflect.apply(&mut p, &g), BoundaryOutcome::Kept);
        assert_eq!(p.position.x, 5.0);
        assert_eq!(p.velocity.x, 2.0);
        // untouched axes
        assert_eq!(p.position.y, 60.0);
        assert_eq!(p.velocity.y, 1.0);
    }

    #[test]
    fn reflect_mirrors_at_upper_edge() {
        let g = grid();
        let mut p = escaped(125.0);
        Boundary::Reflect.apply(&mut p, &g);
        assert_eq!(p.position.x, 115.0);
        assert_eq!(p.velocity.x, 2.0);
    }

    #[test]
    fn periodic_wraps_both_directions() {
        let g = grid();
        let mut p = escaped(125.0);
        Boundary::Periodic.apply(&mut p, &g);
        assert_eq!(p.position.x, 5.0);
        assert_eq!(p.velocity.x, -2.0, "velocity must not change");

        let mut q = escaped(-5.0);
        Boundary::Periodic.apply(&mut q, &g);
        assert_eq!(q.position.x, 115.0);
    }

    #[test]
    fn absorb_requests_removal() {
        let g = grid();
        let mut p = escaped(-1.0);
        assert!(Boundary::Absorb.applies_out_of_bounds(&p, &g));
        assert_eq!(Boundary::Absorb.apply(&mut p, &g), BoundaryOutcome::Removed);
    }

    #[test]
    fn in_bounds_particle_does_not_trigger_hard_boundaries() {
        let g = grid();
        let p = escaped(60.0);
        assert!(!Boundary::Reflect.applies_out_of_bounds(&p, &g));
        assert!(!Boundary::Absorb.applies_out_of_bounds(&p, &g));
        assert!(!Boundary::Periodic.applies_out_of_bounds(&p, &g));
    }

    #[test]
    fn potential_reflect_pushes_away_from_near_wall() {
        let g = grid();
        let wall = Boundary::PotentialReflect { epsilon: 1.0, sigma: 1.0 };
        let mut p = escaped(0.5);
        assert!(wall.applies_out_of_bounds(&p, &g));
        wall.apply(&mut p, &g);
        assert!(p.force.x > 0.0, "left wall must push toward +x");

        let mut q = escaped(119.5);
        wall.apply(&mut q, &g);
        assert!(q.force.x < 0.0, "right wall must push toward -x");
    }

    #[test]
    fn potential_reflect_is_inactive_away_from_walls() {
        let g = grid();
        let wall = Boundary::PotentialReflect { epsilon: 1.0, sigma: 1.0 };
        let mut p = escaped(60.0);
        assert!(!wall.applies_out_of_bounds(&p, &g));
        wall.apply(&mut p, &g);
        assert_eq!(p.force, NVec3::zeros());
    }
}

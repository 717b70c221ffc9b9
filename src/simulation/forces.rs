//! Short-range pairwise force kernels.
//!
//! Gravity lives next to the particle type (it needs no parameters beyond
//! the masses); the Lennard-Jones kernel here carries the epsilon/sigma
//! interaction constants and the cutoff truncation.

use super::particle::Particle;

/// Lennard-Jones separations below this are skipped (near-singularity
/// guard, independent of the gravity guard).
const MIN_LJ_DISTANCE: f64 = 1e-2;

/// Accumulate the truncated Lennard-Jones force on both particles of a pair.
///
/// Magnitude is `24*eps*(2*(sigma/r)^12 - (sigma/r)^6)/r` along the pair
/// axis, repulsive below `2^(1/6)*sigma` and attractive beyond. The kernel
/// is a no-op when the separation exceeds `cutoff`, is exactly zero, or is
/// below 1e-2.
pub fn apply_lennard_jones_force(
    p1: &mut Particle,
    p2: &mut Particle,
    epsilon: f64,
    sigma: f64,
    cutoff: f64,
) {
    let delta = p1.position - p2.position;
    let distance = delta.norm();

    if distance > cutoff || distance == 0.0 || distance < MIN_LJ_DISTANCE {
        return;
    }

    let sr = sigma / distance;
    let sr6 = sr.powi(6);
    let sr12 = sr6 * sr6;
    let magnitude = 24.0 * epsilon * (2.0 * sr12 - sr6) / distance;

    let force = (delta / distance) * magnitude;
    p1.force += force;
    p2.force -= force;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulation::vector::NVec3;

    fn pair(d: f64) -> (Particle, Particle) {
        let p1 = Particle::new(0, "a", 1.0, NVec3::new(d, 0.0, 0.0), NVec3::zeros());
        let p2 = Particle::new(1, "b", 1.0, NVec3::zeros(), NVec3::zeros());
        (p1, p2)
    }

    #[test]
    fn repulsive_below_equilibrium_distance() {
        // r = sigma: inside the 2^(1/6)*sigma well minimum
        let (mut p1, mut p2) = pair(1.0);
        apply_lennard_jones_force(&mut p1, &mut p2, 1.0, 1.0, 2.5);
        // 24 * (2 - 1) / 1 = 24, pushing p1 away along +x
        assert!((p1.force.x - 24.0).abs() < 1e-12);
        assert!((p2.force.x + 24.0).abs() < 1e-12);
    }

    #[test]
    fn attractive_beyond_equilibrium_distance() {
        let (mut p1, mut p2) = pair(1.5);
        apply_lennard_jones_force(&mut p1, &mut p2, 1.0, 1.0, 2.5);
        assert!(p1.force.x < 0.0, "expected attraction toward p2");
        assert!((p1.force + p2.force).norm() < 1e-15);
    }

    #[test]
    fn skipped_beyond_cutoff() {
        let (mut p1, mut p2) = pair(3.0);
        apply_lennard_jones_force(&mut p1, &mut p2, 1.0, 1.0, 2.5);
        assert_eq!(p1.force, NVec3::zeros());
    }

    #[test]
    fn skipped_below_singularity_guard() {
        let (mut p1, mut p2) = pair(5e-3);
        apply_lennard_jones_force(&mut p1, &mut p2, 1.0, 1.0, 2.5);
        assert_eq!(p1.force, NVec3::zeros());
        assert_eq!(p2.force, NVec3::zeros());
    }
}

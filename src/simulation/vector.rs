//! Vector primitive used throughout the core.
//!
//! Positions, velocities and forces are plain `nalgebra` 3-vectors; inactive
//! axes of 1D/2D domains simply stay at zero. Component access by index
//! panics outside `0..3`, matching the out-of-range contract.

use nalgebra::Vector3;

use crate::error::{Error, Result};

pub type NVec3 = Vector3<f64>;

/// Unit vector pointing in the direction of `v`.
///
/// Fails on zero-length input instead of falling back to a zero vector;
/// callers that already guarded the norm can divide directly.
pub fn unit_vector(v: &NVec3) -> Result<NVec3> {
    let n = v.norm();
    if n == 0.0 {
        return Err(Error::ZeroNorm);
    }
    Ok(v / n)
}

/// Build an `NVec3` from up to three leading components, zero-padding the
/// rest. Used when mapping per-axis config lists onto vectors.
pub fn vec3_from(components: &[f64]) -> NVec3 {
    let mut v = NVec3::zeros();
    for (i, &c) in components.iter().take(3).enumerate() {
        v[i] = c;
    }
    v
}

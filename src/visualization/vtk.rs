//! Per-step VTK export for visualization.
//!
//! One `.vtu` file per step, written into a per-run directory. Particles go
//! out as a bare point cloud: positions as points, velocity and mass as
//! point data, zero cell connectivity. Export failures are the caller's
//! business to log and skip; nothing here aborts a simulation.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::simulation::particle::Particle;

/// Path of the export file for `step` under `dir`.
pub fn step_file(dir: &Path, step: usize) -> PathBuf {
    dir.join(format!("output_step_{step}.vtu"))
}

/// Write the point-cloud snapshot for one step, creating `dir` if needed.
pub fn write_step(dir: &Path, step: usize, particles: &[Particle]) -> Result<()> {
    fs::create_dir_all(dir)?;
    let file = File::create(step_file(dir, step))?;
    let mut out = BufWriter::new(file);

    writeln!(
        out,
        "<VTKFile type=\"UnstructuredGrid\" version=\"0.1\" byte_order=\"LittleEndian\">"
    )?;
    writeln!(out, "  <UnstructuredGrid>")?;
    writeln!(
        out,
        "    <Piece NumberOfPoints=\"{}\" NumberOfCells=\"0\">",
        particles.len()
    )?;

    writeln!(out, "      <Points>")?;
    writeln!(
        out,
        "        <DataArray name=\"Position\" type=\"Float32\" NumberOfComponents=\"3\" format=\"ascii\">"
    )?;
    for p in particles {
        writeln!(
            out,
            "          {} {} {}",
            p.position.x, p.position.y, p.position.z
        )?;
    }
    writeln!(out, "        </DataArray>")?;
    writeln!(out, "      </Points>")?;

    writeln!(out, "      <PointData Vectors=\"vector\">")?;
    writeln!(
        out,
        "        <DataArray type=\"Float32\" Name=\"Velocity\" NumberOfComponents=\"3\" format=\"ascii\">"
    )?;
    for p in particles {
        writeln!(
            out,
            "          {} {} {}",
            p.velocity.x, p.velocity.y, p.velocity.z
        )?;
    }
    writeln!(out, "        </DataArray>")?;
    writeln!(
        out,
        "        <DataArray type=\"Float32\" Name=\"Mass\" format=\"ascii\">"
    )?;
    for p in particles {
        writeln!(out, "          {}", p.mass)?;
    }
    writeln!(out, "        </DataArray>")?;
    writeln!(out, "      </PointData>")?;

    // point cloud only: empty connectivity
    writeln!(out, "      <Cells>")?;
    writeln!(
        out,
        "        <DataArray type=\"Int32\" Name=\"connectivity\" format=\"ascii\">"
    )?;
    writeln!(out, "        </DataArray>")?;
    writeln!(
        out,
        "        <DataArray type=\"Int32\" Name=\"offsets\" format=\"ascii\">"
    )?;
    writeln!(out, "        </DataArray>")?;
    writeln!(
        out,
        "        <DataArray type=\"UInt8\" Name=\"types\" format=\"ascii\">"
    )?;
    writeln!(out, "        </DataArray>")?;
    writeln!(out, "      </Cells>")?;

    writeln!(out, "    </Piece>")?;
    writeln!(out, "  </UnstructuredGrid>")?;
    writeln!(out, "</VTKFile>")?;

    out.flush()?;
    Ok(())
}

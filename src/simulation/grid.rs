//! Cell-list spatial decomposition.
//!
//! The domain is divided into a fixed grid of cells whose edge length equals
//! the interaction cutoff radius, so every pair within the cutoff lives in
//! the same or an adjacent cell. Cells reference particles and each other by
//! index into domain-owned vectors; nothing here owns or borrows particle
//! storage across steps.

use super::particle::Particle;
use super::vector::NVec3;

/// One spatial bucket: indices of the particles currently inside it, plus
/// the indices of its neighbor cells (the cell itself included).
#[derive(Debug, Default, Clone)]
pub struct Cell {
    pub particles: Vec<usize>,
    pub neighbors: Vec<usize>,
}

/// Fixed grid of cells over the simulation box.
///
/// Geometry is set once at construction; only the per-cell membership lists
/// change afterwards, via [`CellGrid::rebuild`].
#[derive(Debug, Clone)]
pub struct CellGrid {
    cells: Vec<Cell>,
    grid_size: [usize; 3],
    cell_edge: f64,
    dim: usize,
}

impl CellGrid {
    /// Build the grid for a `dim`-dimensional box with the given per-axis
    /// lengths. `cell_edge` is the cutoff radius; each active axis gets
    /// `floor(length / cell_edge)` cells (at least one), inactive axes get
    /// exactly one. Neighbor lists are linked immediately.
    pub fn new(dim: usize, lengths: &[f64], cell_edge: f64) -> Self {
        let mut grid_size = [1usize; 3];
        for (i, size) in grid_size.iter_mut().enumerate() {
            if i < dim && i < lengths.len() {
                *size = (lengths[i] / cell_edge).floor().max(1.0) as usize;
            }
        }

        let total = grid_size[0] * grid_size[1] * grid_size[2];
        let mut grid = Self {
            cells: vec![Cell::default(); total],
            grid_size,
            cell_edge,
            dim,
        };
        grid.link_neighbors();
        grid
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn grid_size(&self) -> [usize; 3] {
        self.grid_size
    }

    /// Cell edge length; equal to the interaction cutoff radius.
    pub fn cell_edge(&self) -> f64 {
        self.cell_edge
    }

    pub fn dim(&self) -> usize {
        self.dim
    }

    /// Physical extent of the box along `axis`, derived from the grid.
    pub fn axis_length(&self, axis: usize) -> f64 {
        self.grid_size[axis] as f64 * self.cell_edge
    }

    /// Flat index of the cell containing `pos`.
    ///
    /// Out-of-range coordinates are clamped into the boundary cells rather
    /// than rejected, so force evaluation stays total for particles a
    /// boundary strategy chose not to touch. Axes beyond the domain's
    /// dimensionality always map to 0.
    pub fn cell_index(&self, pos: &NVec3) -> usize {
        let ix = self.axis_index(pos[0], 0);
        let iy = if self.dim >= 2 { self.axis_index(pos[1], 1) } else { 0 };
        let iz = if self.dim == 3 { self.axis_index(pos[2], 2) } else { 0 };
        ix + self.grid_size[0] * (iy + self.grid_size[1] * iz)
    }

    fn axis_index(&self, coordinate: f64, axis: usize) -> usize {
        let index = (coordinate / self.cell_edge).floor() as i64;
        index.clamp(0, self.grid_size[axis] as i64 - 1) as usize
    }

    /// Clear every membership list and reinsert all particles by current
    /// position. Must run before the first force evaluation and after every
    /// position update.
    pub fn rebuild(&mut self, particles: &[Particle]) {
        for cell in &mut self.cells {
            cell.particles.clear();
        }
        for (index, particle) in particles.iter().enumerate() {
            let cell = self.cell_index(&particle.position);
            self.cells[cell].particles.push(index);
        }
    }

    /// Register each cell's Moore neighborhood: itself first, then every
    /// cell reachable by a nonzero offset in {-1,0,1} per axis, clipped at
    /// the grid bounds (no wraparound). Inactive axes have size 1, so their
    /// offsets fall out of bounds and never contribute.
    fn link_neighbors(&mut self) {
        let [nx, ny, nz] = self.grid_size;
        for z in 0..nz {
            for y in 0..ny {
                for x in 0..nx {
                    let index = x + nx * (y + ny * z);
                    self.cells[index].neighbors.push(index);

                    for dz in -1i64..=1 {
                        for dy in -1i64..=1 {
                            for dx in -1i64..=1 {
                                if dx == 0 && dy == 0 && dz == 0 {
                                    continue;
                                }
                                let x2 = x as i64 + dx;
                                let y2 = y as i64 + dy;
                                let z2 = z as i64 + dz;
                                if x2 < 0 || x2 >= nx as i64
                                    || y2 < 0 || y2 >= ny as i64
                                    || z2 < 0 || z2 >= nz as i64
                                {
                                    continue;
                                }
                                let neighbor =
                                    x2 as usize + nx * (y2 as usize + ny * z2 as usize);
                                self.cells[index].neighbors.push(neighbor);
                            }
                        }
                    }
                }
            }
        }
    }
}

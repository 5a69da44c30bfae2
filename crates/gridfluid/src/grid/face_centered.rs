//! Staggered (MAC) vector field.
//!
//! Component `a` is stored on the faces normal to axis `a`:
//! - u (x) on faces at `x = origin.x + i * dx`, cell centres in y and z
//! - v (y) on faces at `y = origin.y + j * dx`, cell centres in x and z
//! - w (z) on faces at `z = origin.z + k * dx`, cell centres in x and y
//!
//! A grid of `nx * ny * nz` cells therefore stores `(nx + 1) * ny * nz`
//! u samples, and so on.

use glam::{Vec2, Vec3};
use rayon::prelude::*;

use super::{GridSize, Lattice, ScalarGrid};
use crate::vector::SpatialVector;

#[derive(Clone, Debug)]
pub struct FaceCenteredGrid<P> {
    cells: Lattice<P>,
    components: Vec<ScalarGrid<P>>,
}

pub type FaceCenteredGrid2 = FaceCenteredGrid<Vec2>;
pub type FaceCenteredGrid3 = FaceCenteredGrid<Vec3>;

impl<P: SpatialVector> FaceCenteredGrid<P> {
    /// Grid of `resolution` cells whose lower corner is `origin`.
    pub fn new(resolution: impl Into<GridSize>, spacing: f32, origin: P) -> Self {
        let resolution = resolution.into();
        let half = 0.5 * spacing;
        let cells = Lattice::new(resolution, spacing, origin + P::splat(half));

        let components = (0..P::DIMENSION)
            .map(|axis| {
                let face_origin = P::from_fn(|a| origin.component(a) + if a == axis { 0.0 } else { half });
                ScalarGrid::from_lattice(Lattice::new(resolution.grown_along(axis), spacing, face_origin))
            })
            .collect();

        Self { cells, components }
    }

    /// Cell-centre lattice the faces surround.
    pub fn cell_lattice(&self) -> &Lattice<P> {
        &self.cells
    }

    /// Number of cells (not faces).
    pub fn resolution(&self) -> GridSize {
        self.cells.size()
    }

    pub fn spacing(&self) -> f32 {
        self.cells.spacing()
    }

    pub fn component(&self, axis: usize) -> &ScalarGrid<P> {
        &self.components[axis]
    }

    pub fn component_mut(&mut self, axis: usize) -> &mut ScalarGrid<P> {
        &mut self.components[axis]
    }

    pub fn components(&self) -> &[ScalarGrid<P>] {
        &self.components
    }

    pub fn components_mut(&mut self) -> &mut [ScalarGrid<P>] {
        &mut self.components
    }

    /// Faces `(backward, forward)` of cell `idx` along `axis`, as indices into
    /// `component(axis)`.
    #[inline]
    pub fn faces_of_cell(&self, idx: usize, axis: usize) -> (usize, usize) {
        let [i, j, k] = self.cells.coords_of(idx);
        let faces = self.components[axis].lattice();
        let backward = faces.index_of(i, j, k);
        let forward = match axis {
            0 => faces.index_of(i + 1, j, k),
            1 => faces.index_of(i, j + 1, k),
            _ => faces.index_of(i, j, k + 1),
        };
        (backward, forward)
    }

    /// Cells `(backward, forward)` on either side of face `idx` of
    /// `component(axis)`, `None` outside the domain.
    #[inline]
    pub fn cells_of_face(&self, idx: usize, axis: usize) -> (Option<usize>, Option<usize>) {
        let coords = self.components[axis].lattice().coords_of(idx);
        let size = self.cells.size();
        let forward = (coords[axis] < size.get(axis))
            .then(|| self.cells.index_of(coords[0], coords[1], coords[2]));
        let backward = (coords[axis] > 0).then(|| {
            let mut c = coords;
            c[axis] -= 1;
            self.cells.index_of(c[0], c[1], c[2])
        });
        (backward, forward)
    }

    /// Set every component to the matching component of `value`.
    pub fn fill(&mut self, value: P) {
        for (axis, component) in self.components.iter_mut().enumerate() {
            component.fill(value.component(axis));
        }
    }

    /// Sample a velocity function at each face position, keeping the
    /// component normal to that face.
    pub fn fill_with<F>(&mut self, f: F)
    where
        F: Fn(P) -> P + Send + Sync,
    {
        for (axis, component) in self.components.iter_mut().enumerate() {
            component.fill_with(|p| f(p).component(axis));
        }
    }

    /// Velocity at a cell centre, averaging the two faces on each axis.
    pub fn value_at_cell_center(&self, i: usize, j: usize, k: usize) -> P {
        let idx = self.cells.index_of(i, j, k);
        P::from_fn(|axis| {
            let (back, front) = self.faces_of_cell(idx, axis);
            let data = self.components[axis].data();
            0.5 * (data[back] + data[front])
        })
    }

    /// Divergence at cell `idx`: sum over axes of `(front - back) / dx`.
    pub fn divergence_at(&self, idx: usize) -> f32 {
        let inv_dx = 1.0 / self.spacing();
        (0..P::DIMENSION)
            .map(|axis| {
                let (back, front) = self.faces_of_cell(idx, axis);
                let data = self.components[axis].data();
                data[front] - data[back]
            })
            .sum::<f32>()
            * inv_dx
    }

    /// Cell-centred divergence of the whole field.
    pub fn divergence(&self) -> ScalarGrid<P> {
        let mut out = ScalarGrid::from_lattice(self.cells);
        out.data_mut()
            .par_iter_mut()
            .enumerate()
            .for_each(|(idx, div)| *div = self.divergence_at(idx));
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_face_counts_and_positions() {
        let grid = FaceCenteredGrid3::new((4, 3, 2), 0.5, Vec3::ZERO);
        assert_eq!(grid.component(0).data().len(), 5 * 3 * 2);
        assert_eq!(grid.component(1).data().len(), 4 * 4 * 2);
        assert_eq!(grid.component(2).data().len(), 4 * 3 * 3);

        // First u face sits on the left wall, centred in y and z
        assert_eq!(grid.component(0).lattice().position_at(0), Vec3::new(0.0, 0.25, 0.25));
        assert_eq!(grid.component(2).lattice().position_at(0), Vec3::new(0.25, 0.25, 0.0));
    }

    #[test]
    fn test_uniform_flow_is_divergence_free() {
        let mut grid = FaceCenteredGrid2::new((5, 5), 0.2, Vec2::ZERO);
        grid.fill(Vec2::new(1.0, -2.0));
        let div = grid.divergence();
        assert!(div.data().iter().all(|d| d.abs() < 1e-6));
        assert_eq!(grid.value_at_cell_center(2, 2, 0), Vec2::new(1.0, -2.0));
    }

    #[test]
    fn test_expanding_flow_has_uniform_divergence() {
        let mut grid = FaceCenteredGrid3::new((4, 4, 4), 0.25, Vec3::ZERO);
        grid.fill_with(|p| p);
        // div(x, y, z) = 3
        let div = grid.divergence();
        assert!(div.data().iter().all(|d| (d - 3.0).abs() < 1e-4), "{:?}", div.data());
    }

    #[test]
    fn test_cells_of_face_at_walls() {
        let grid = FaceCenteredGrid2::new((3, 2), 1.0, Vec2::ZERO);
        let faces = grid.component(0).lattice();
        assert_eq!(grid.cells_of_face(faces.index_of(0, 1, 0), 0), (None, Some(3)));
        assert_eq!(grid.cells_of_face(faces.index_of(3, 1, 0), 0), (Some(5), None));
        assert_eq!(grid.cells_of_face(faces.index_of(1, 0, 0), 0), (Some(0), Some(1)));
    }

    #[test]
    fn test_faces_of_cell() {
        let grid = FaceCenteredGrid2::new((3, 2), 1.0, Vec2::ZERO);
        let cell = grid.cell_lattice().index_of(1, 1, 0);
        // u lattice is 4 wide, v lattice is 3 wide
        assert_eq!(grid.faces_of_cell(cell, 0), (5, 6));
        assert_eq!(grid.faces_of_cell(cell, 1), (4, 7));
    }
}

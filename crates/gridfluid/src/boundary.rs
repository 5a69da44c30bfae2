//! Boundary conditions for face-centred velocity fields.

use crate::constants::DEFAULT_EXTRAPOLATION_DEPTH;
use crate::geometry::ScalarField;
use crate::grid::{build_solid_markers, FaceCenteredGrid, Lattice};
use crate::vector::SpatialVector;

/// Applies collider boundary conditions to a velocity field, paired with a
/// pressure solver's discretisation.
pub trait GridBoundaryConditionSolver<P>: Send {
    /// Rebuild collider markers at the cell centres of `cells`.
    fn update_collider(&mut self, collider: &dyn ScalarField<P>, cells: &Lattice<P>);

    /// Extrapolate fluid velocity `extrapolation_depth` faces into the
    /// collider, then enforce no-penetration on the collider surface.
    fn constrain_velocity(&self, velocity: &mut FaceCenteredGrid<P>, extrapolation_depth: usize);

    /// Same as [`constrain_velocity`](Self::constrain_velocity) with the
    /// default depth.
    fn constrain_velocity_default(&self, velocity: &mut FaceCenteredGrid<P>) {
        self.constrain_velocity(velocity, DEFAULT_EXTRAPOLATION_DEPTH);
    }
}

/// Cell-blocking boundary conditions: a cell whose centre lies inside the
/// collider is entirely solid, and the velocity normal to every face between
/// a solid and a non-solid cell is zero.
#[derive(Clone, Debug)]
pub struct BlockedBoundaryConditionSolver {
    /// Also zero the normal velocity on the outer domain faces.
    pub closed_domain: bool,
    solid: Vec<bool>,
}

impl BlockedBoundaryConditionSolver {
    pub fn new() -> Self {
        Self {
            closed_domain: true,
            solid: Vec::new(),
        }
    }

    pub fn with_closed_domain(closed_domain: bool) -> Self {
        Self {
            closed_domain,
            solid: Vec::new(),
        }
    }

    /// Per-cell collider markers from the last [`update_collider`](GridBoundaryConditionSolver::update_collider).
    pub fn solid_markers(&self) -> &[bool] {
        &self.solid
    }

    fn is_solid(&self, cell: Option<usize>) -> bool {
        cell.is_some_and(|c| self.solid.get(c).copied().unwrap_or(false))
    }
}

impl Default for BlockedBoundaryConditionSolver {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: SpatialVector> GridBoundaryConditionSolver<P> for BlockedBoundaryConditionSolver {
    fn update_collider(&mut self, collider: &dyn ScalarField<P>, cells: &Lattice<P>) {
        self.solid = build_solid_markers(cells, collider);
    }

    fn constrain_velocity(&self, velocity: &mut FaceCenteredGrid<P>, extrapolation_depth: usize) {
        let cell_count = velocity.cell_lattice().sample_count();
        if !self.solid.is_empty() && self.solid.len() != cell_count {
            log::warn!(
                "Collider markers cover {} cells but the velocity grid has {}; ignoring collider",
                self.solid.len(),
                cell_count
            );
        }
        let markers_valid = self.solid.len() == cell_count;

        for axis in 0..P::DIMENSION {
            let face_count = velocity.component(axis).data().len();
            let sides: Vec<(Option<usize>, Option<usize>)> =
                (0..face_count).map(|face| velocity.cells_of_face(face, axis)).collect();
            let touches_solid = |(back, front): (Option<usize>, Option<usize>)| {
                markers_valid && (self.is_solid(back) || self.is_solid(front))
            };

            // Faces with a solid on either side hold no fluid velocity
            let mut known: Vec<bool> = sides.iter().map(|s| !touches_solid(*s)).collect();

            let component = velocity.component_mut(axis);
            let lattice = *component.lattice();
            let data = component.data_mut();

            // Layered wavefront, two buffers so a layer only reads the previous one
            for _ in 0..extrapolation_depth {
                let mut next_values = data.to_vec();
                let mut next_known = known.clone();
                let mut changed = false;

                for face in 0..face_count {
                    if known[face] {
                        continue;
                    }
                    let mut sum = 0.0;
                    let mut count = 0;
                    for a in 0..P::DIMENSION {
                        let (back, front) = lattice.neighbors_of(face, a);
                        for neighbor in [back, front].into_iter().flatten() {
                            if known[neighbor] {
                                sum += data[neighbor];
                                count += 1;
                            }
                        }
                    }
                    if count > 0 {
                        next_values[face] = sum / count as f32;
                        next_known[face] = true;
                        changed = true;
                    }
                }

                data.copy_from_slice(&next_values);
                known = next_known;
                if !changed {
                    break;
                }
            }

            // No flux through the collider surface or (optionally) the domain walls
            for (face, &(back, front)) in sides.iter().enumerate() {
                let on_wall = back.is_none() || front.is_none();
                let on_collider_surface =
                    markers_valid && self.is_solid(back) != self.is_solid(front) && !on_wall;
                let wall_blocked = on_wall && (self.closed_domain || touches_solid((back, front)));
                if on_collider_surface || wall_blocked {
                    data[face] = 0.0;
                }
            }
        }
    }
}
